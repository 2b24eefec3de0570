// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # profenum
//!
//! Reference-counted snapshot enumerators for the .NET profiling API.
//!
//! Profilers and other observer tools ask the runtime for collections that change while they
//! look at them: live objects, loaded modules, running threads, JIT-compiled functions. The
//! runtime answers with COM-style enumerators (`ICorProfilerModuleEnum`,
//! `ICorProfilerThreadEnum`, ...) that all behave the same way. `profenum` implements that
//! behaviour once, generically:
//!
//! - **Snapshot isolation** - an enumerator keeps a private copy of its elements, taken at
//!   construction, and is unaffected by later changes to the runtime collection
//! - **Cursor protocol** - `Next`, `Skip`, `Reset`, `GetCount` and `Clone` with the exact
//!   partial-fetch and error semantics of the `IEnumXXX` contract
//! - **Reference counting** - one instance shared through any number of references, destroyed
//!   with the last one
//! - **Interface identity** - identity queries answered for the enumerator's own interface and
//!   for `IUnknown`
//!
//! ## Quick Start
//!
//! ```rust
//! use profenum::prelude::*;
//!
//! let objects = ObjectEnum::new(&[ObjectId(0x1000), ObjectId(0x2000), ObjectId(0x3000)])?;
//!
//! // Drain the enumerator in chunks without knowing its size
//! let mut buffer = [ObjectId::default(); 2];
//! let mut fetched = 0;
//! while objects.next_into(2, Some(&mut buffer[..]), Some(&mut fetched))? == Outcome::Complete {
//!     println!("got {} objects", fetched);
//! }
//! println!("got {} objects", fetched);
//!
//! // Start over
//! objects.reset();
//! assert_eq!(objects.remaining(), 3);
//! # Ok::<(), profenum::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`enumerator`] - the generic engine ([`ProfilerEnum`]) and its building blocks
//! - [`identity`] - interface identifiers and the [`identity::EnumInterface`] trait
//! - [`ids`] - the opaque runtime identifiers the enumerators carry
//! - [`producers`] - population of enumerators from runtime state
//! - [`hresult`] - binary status codes for the COM boundary
//! - [`config`] - producer configuration
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: enumerator creation and destruction at `debug`,
//! rejected calls at `trace`, producer failures at `warn`. No logger is installed.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types
pub mod prelude;

/// Producer configuration
pub mod config;

/// The generic snapshot enumerator engine
pub mod enumerator;

/// Binary `HRESULT` encoding of enumerator outcomes
pub mod hresult;

/// Interface identifiers and the interface trait
pub mod identity;

/// Opaque runtime identifiers
pub mod ids;

/// Producers populating enumerators from runtime state
pub mod producers;

/// Metadata tokens
pub mod token;

/// `profenum` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `profenum` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use profenum::{Error, ModuleEnum};
/// use profenum::identity::IID_ICORPROFILER_THREAD_ENUM;
///
/// let modules = ModuleEnum::empty();
/// match modules.query_interface(&IID_ICORPROFILER_THREAD_ENUM) {
///     Err(Error::NoInterface(iid)) => println!("not a {}", iid),
///     Err(e) => println!("Error: {}", e),
///     Ok(_) => println!("supported"),
/// }
/// ```
pub use error::Error;

pub use config::CollectionConfig;
pub use enumerator::{
    FunctionEnum, Interface, MethodEnum, ModuleEnum, ObjectEnum, Outcome, ProfilerEnum,
    ThreadEnum, UnknownRef,
};
pub use hresult::HResult;
pub use ids::{
    AppDomainId, FunctionId, FunctionInfo, MethodInfo, ModuleId, ObjectId, ReJitId, ThreadId,
};
pub use token::Token;
