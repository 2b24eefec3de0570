//! Interface identities for the profiling enumerators
//!
//! Every enumerator instantiation implements exactly one enumerator interface, identified
//! by the interface's GUID (`IID`). Identity queries compare the requested GUID against the
//! instantiation's own IID and against [`IID_IUNKNOWN`], the identity every COM object
//! answers to.
//!
//! The identity of an instantiation is a compile-time property: it is carried by the
//! [`EnumInterface`] marker type the generic engine is parameterized with, together with the
//! element type the interface enumerates.
//!
//! # Supported Interfaces
//!
//! | Marker                       | Element                           |
//! |------------------------------|-----------------------------------|
//! | [`ICorProfilerObjectEnum`]   | [`crate::ids::ObjectId`]          |
//! | [`ICorProfilerFunctionEnum`] | [`crate::ids::FunctionInfo`]      |
//! | [`ICorProfilerModuleEnum`]   | [`crate::ids::ModuleId`]          |
//! | [`ICorProfilerThreadEnum`]   | [`crate::ids::ThreadId`]          |
//! | [`ICorProfilerMethodEnum`]   | [`crate::ids::MethodInfo`]        |

use strum::{Display, EnumCount, EnumIter};
use uguid::{guid, Guid};

use crate::ids::{FunctionInfo, MethodInfo, ModuleId, ObjectId, ThreadId};

/// The identity every object answers to (`IUnknown`)
pub const IID_IUNKNOWN: Guid = guid!("00000000-0000-0000-c000-000000000046");

/// `ICorProfilerObjectEnum`
pub const IID_ICORPROFILER_OBJECT_ENUM: Guid = guid!("2c6269bd-2d13-4321-ae12-6686365fd6af");
/// `ICorProfilerFunctionEnum`
pub const IID_ICORPROFILER_FUNCTION_ENUM: Guid = guid!("ff71301a-b994-429d-a10b-b345a65280ef");
/// `ICorProfilerModuleEnum`
pub const IID_ICORPROFILER_MODULE_ENUM: Guid = guid!("b0266d75-2081-4493-af7f-028ba34db891");
/// `ICorProfilerThreadEnum`
pub const IID_ICORPROFILER_THREAD_ENUM: Guid = guid!("571194f7-25ed-419f-aa8b-7016b3159701");
/// `ICorProfilerMethodEnum`
pub const IID_ICORPROFILER_METHOD_ENUM: Guid = guid!("fccee788-0088-454b-a811-c99f298d1942");

/// A compile-time description of one enumerator interface.
///
/// Implementors are zero-sized markers; they are never instantiated. The generic engine
/// [`crate::ProfilerEnum`] reads the associated items to know what it stores and which
/// identity queries it answers.
pub trait EnumInterface: 'static {
    /// The value type the interface enumerates
    type Element: Copy + Send + Sync + 'static;

    /// The kind of this interface
    const KIND: InterfaceKind;

    /// The interface identifier answered by identity queries
    const IID: Guid = Self::KIND.iid();
}

/// The enumerator interfaces defined by the profiling API.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount)]
pub enum InterfaceKind {
    /// Live objects, e.g. frozen objects of a module
    #[strum(to_string = "ICorProfilerObjectEnum")]
    Object,
    /// JIT-compiled functions, optionally with their re-JIT versions
    #[strum(to_string = "ICorProfilerFunctionEnum")]
    Function,
    /// Loaded modules
    #[strum(to_string = "ICorProfilerModuleEnum")]
    Module,
    /// Managed threads
    #[strum(to_string = "ICorProfilerThreadEnum")]
    Thread,
    /// Methods identified by module and token
    #[strum(to_string = "ICorProfilerMethodEnum")]
    Method,
}

impl InterfaceKind {
    /// Returns the interface identifier of this kind
    #[must_use]
    pub const fn iid(self) -> Guid {
        match self {
            InterfaceKind::Object => IID_ICORPROFILER_OBJECT_ENUM,
            InterfaceKind::Function => IID_ICORPROFILER_FUNCTION_ENUM,
            InterfaceKind::Module => IID_ICORPROFILER_MODULE_ENUM,
            InterfaceKind::Thread => IID_ICORPROFILER_THREAD_ENUM,
            InterfaceKind::Method => IID_ICORPROFILER_METHOD_ENUM,
        }
    }

    /// Looks up the interface kind with the given identifier
    #[must_use]
    pub fn from_iid(iid: &Guid) -> Option<InterfaceKind> {
        use strum::IntoEnumIterator;

        InterfaceKind::iter().find(|kind| kind.iid() == *iid)
    }
}

/// Marker for `ICorProfilerObjectEnum`
pub enum ICorProfilerObjectEnum {}

impl EnumInterface for ICorProfilerObjectEnum {
    type Element = ObjectId;
    const KIND: InterfaceKind = InterfaceKind::Object;
}

/// Marker for `ICorProfilerFunctionEnum`
pub enum ICorProfilerFunctionEnum {}

impl EnumInterface for ICorProfilerFunctionEnum {
    type Element = FunctionInfo;
    const KIND: InterfaceKind = InterfaceKind::Function;
}

/// Marker for `ICorProfilerModuleEnum`
pub enum ICorProfilerModuleEnum {}

impl EnumInterface for ICorProfilerModuleEnum {
    type Element = ModuleId;
    const KIND: InterfaceKind = InterfaceKind::Module;
}

/// Marker for `ICorProfilerThreadEnum`
pub enum ICorProfilerThreadEnum {}

impl EnumInterface for ICorProfilerThreadEnum {
    type Element = ThreadId;
    const KIND: InterfaceKind = InterfaceKind::Thread;
}

/// Marker for `ICorProfilerMethodEnum`
pub enum ICorProfilerMethodEnum {}

impl EnumInterface for ICorProfilerMethodEnum {
    type Element = MethodInfo;
    const KIND: InterfaceKind = InterfaceKind::Method;
}
