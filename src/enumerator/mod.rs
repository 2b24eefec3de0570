//! Generic snapshot enumerator for the profiling API.
//!
//! This module provides the one-size-fits-all implementation behind every COM-style
//! enumerator the profiling API hands out (`ICorProfilerObjectEnum`,
//! `ICorProfilerModuleEnum`, ...). An enumerator is created once from an element sequence,
//! keeps a private copy of it, and lets observer tools walk that copy with a forward-only
//! cursor, no matter how the underlying runtime collection changes afterwards.
//!
//! # Architecture
//!
//! - [`Snapshot`] - owned element storage and the cursor protocol
//! - [`ProfilerEnum`] - a reference-counted handle to a snapshot, answering identity
//!   queries for its interface
//! - [`UnknownRef`] - the type-erased `IUnknown` view of an enumerator
//! - [`Outcome`] - success result distinguishing full from partial requests
//!
//! # Protocol
//!
//! | Operation                     | Result                                                  |
//! |-------------------------------|---------------------------------------------------------|
//! | [`ProfilerEnum::next_into`]   | [`Outcome::Partial`] when fewer than requested remained |
//! | [`ProfilerEnum::skip`]        | [`Outcome::Partial`] when fewer than requested remained |
//! | [`ProfilerEnum::reset`]       | always succeeds                                         |
//! | [`ProfilerEnum::get_count`]   | number of remaining elements                            |
//! | [`ProfilerEnum::clone_enum`]  | independent enumerator over the full snapshot           |
//!
//! # Examples
//!
//! ```rust
//! use profenum::{ModuleEnum, ModuleId, Outcome};
//!
//! let modules = ModuleEnum::new(&[ModuleId(0x10), ModuleId(0x20), ModuleId(0x30)])?;
//!
//! let mut buffer = [ModuleId::default(); 2];
//! let mut fetched = 0;
//! loop {
//!     let outcome = modules.next_into(2, Some(&mut buffer[..]), Some(&mut fetched))?;
//!     for module in &buffer[..fetched as usize] {
//!         println!("module {}", module);
//!     }
//!     if outcome == Outcome::Partial {
//!         break;
//!     }
//! }
//! assert_eq!(modules.remaining(), 0);
//! # Ok::<(), profenum::Error>(())
//! ```

mod profilerenum;
mod snapshot;
mod unknown;

pub use profilerenum::{Elements, Interface, ProfilerEnum};
pub use snapshot::Snapshot;
pub use unknown::UnknownRef;

pub(crate) use profilerenum::EnumState;

use strum::{Display, EnumCount, EnumIter};

use crate::identity::{
    ICorProfilerFunctionEnum, ICorProfilerMethodEnum, ICorProfilerModuleEnum,
    ICorProfilerObjectEnum, ICorProfilerThreadEnum,
};

/// Successful result of a fetch or skip request.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount)]
pub enum Outcome {
    /// The request was fully satisfied (`S_OK`)
    Complete,
    /// Fewer elements than requested were available (`S_FALSE`)
    Partial,
}

impl Outcome {
    /// Derives the outcome of a request for `requested` elements of which `done` were served
    #[must_use]
    pub fn from_counts(requested: u32, done: u32) -> Self {
        if done < requested {
            Outcome::Partial
        } else {
            Outcome::Complete
        }
    }

    /// Returns true for [`Outcome::Complete`]
    #[must_use]
    pub fn is_complete(self) -> bool {
        self == Outcome::Complete
    }
}

/// Enumerates live objects (`ICorProfilerObjectEnum`)
pub type ObjectEnum = ProfilerEnum<ICorProfilerObjectEnum>;
/// Enumerates JIT-compiled functions (`ICorProfilerFunctionEnum`)
pub type FunctionEnum = ProfilerEnum<ICorProfilerFunctionEnum>;
/// Enumerates loaded modules (`ICorProfilerModuleEnum`)
pub type ModuleEnum = ProfilerEnum<ICorProfilerModuleEnum>;
/// Enumerates managed threads (`ICorProfilerThreadEnum`)
pub type ThreadEnum = ProfilerEnum<ICorProfilerThreadEnum>;
/// Enumerates methods by module and token (`ICorProfilerMethodEnum`)
pub type MethodEnum = ProfilerEnum<ICorProfilerMethodEnum>;

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_outcome_from_counts() {
        assert_eq!(Outcome::from_counts(0, 0), Outcome::Complete);
        assert_eq!(Outcome::from_counts(3, 3), Outcome::Complete);
        assert_eq!(Outcome::from_counts(3, 1), Outcome::Partial);
        assert_eq!(Outcome::from_counts(3, 0), Outcome::Partial);
    }

    #[test]
    fn test_outcome_names() {
        let names: Vec<String> = Outcome::iter().map(|o| o.to_string()).collect();
        assert_eq!(names, ["Complete", "Partial"]);
        assert_eq!(Outcome::COUNT, 2);
        assert!(Outcome::Complete.is_complete());
        assert!(!Outcome::Partial.is_complete());
    }
}
