//! # profenum Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the profenum library. Import this module to get quick access to the enumerators,
//! the identifiers they carry and the producers that populate them.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all profenum operations
pub use crate::Error;

/// The result type used throughout profenum
pub use crate::Result;

/// Successful outcome of fetch and skip requests
pub use crate::Outcome;

/// Binary status codes
pub use crate::hresult::{HResult, E_INVALIDARG, E_NOINTERFACE, E_OUTOFMEMORY, S_FALSE, S_OK};

// ================================================================================================
// Enumerators
// ================================================================================================

/// The generic engine and its interface views
pub use crate::enumerator::{Interface, ProfilerEnum, UnknownRef};

/// One enumerator type per profiling interface
pub use crate::enumerator::{FunctionEnum, MethodEnum, ModuleEnum, ObjectEnum, ThreadEnum};

/// Interface identity
pub use crate::identity::{EnumInterface, InterfaceKind, IID_IUNKNOWN};

// ================================================================================================
// Identifiers
// ================================================================================================

/// Opaque runtime identifiers
pub use crate::ids::{
    AppDomainId, FunctionId, FunctionInfo, MethodInfo, ModuleId, ObjectId, ReJitId, ThreadId,
};

/// Metadata token carried by method entries
pub use crate::token::Token;

// ================================================================================================
// Producers
// ================================================================================================

/// Population of enumerators from runtime state
pub use crate::producers::{
    AppDomainsContainingModule, CodeVersionSource, FunctionProducer, ModuleProducer,
    ModuleSource, Producer, ThreadProducer, ThreadStore,
};

/// Producer configuration
pub use crate::CollectionConfig;
