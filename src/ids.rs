//! Opaque runtime identifiers handed out through the profiling enumerators
//!
//! The profiling API identifies runtime entities by pointer-sized handles whose values
//! are only meaningful to the runtime that issued them. The enumerators never interpret
//! them; they only require that they are small, `Copy` and fixed size.
//!
//! Struct elements ([`FunctionInfo`], [`MethodInfo`]) are `#[repr(C)]` with the field
//! order of `COR_PRF_FUNCTION` and `COR_PRF_METHOD`, so a snapshot of them can be handed to
//! native code unchanged.

use std::fmt;

use crate::token::Token;

macro_rules! runtime_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub usize);

        impl $name {
            /// Creates a new identifier from its raw value
            #[must_use]
            pub const fn new(value: usize) -> Self {
                $name(value)
            }

            /// Returns the raw identifier value
            #[must_use]
            pub const fn value(&self) -> usize {
                self.0
            }

            /// Returns true if this is the null identifier
            #[must_use]
            pub const fn is_null(&self) -> bool {
                self.0 == 0
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                $name(value)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(0x{:x})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{:x}", self.0)
            }
        }
    };
}

runtime_id!(
    /// Identifies a live object on the managed heap (`ObjectID`)
    ObjectId
);
runtime_id!(
    /// Identifies a loaded module (`ModuleID`)
    ModuleId
);
runtime_id!(
    /// Identifies a managed thread (`ThreadID`)
    ThreadId
);
runtime_id!(
    /// Identifies a function (`FunctionID`)
    FunctionId
);
runtime_id!(
    /// Identifies an application domain (`AppDomainID`)
    AppDomainId
);
runtime_id!(
    /// Identifies a re-JIT compiled version of a function body (`ReJITID`)
    ///
    /// The value `0` denotes the original body produced by the first JIT compilation.
    ReJitId
);

impl ReJitId {
    /// The original, non-rejitted code body
    pub const ORIGINAL: ReJitId = ReJitId(0);
}

/// A JIT-compiled function body (`COR_PRF_FUNCTION`)
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct FunctionInfo {
    /// The function the body belongs to
    pub function_id: FunctionId,
    /// The code version of the body, [`ReJitId::ORIGINAL`] for the first compilation
    pub rejit_id: ReJitId,
}

impl FunctionInfo {
    /// Creates a new entry for the given function and code version
    #[must_use]
    pub const fn new(function_id: FunctionId, rejit_id: ReJitId) -> Self {
        FunctionInfo {
            function_id,
            rejit_id,
        }
    }

    /// Returns true if this entry describes a re-JIT compiled body
    #[must_use]
    pub const fn is_rejit(&self) -> bool {
        !self.rejit_id.is_null()
    }
}

/// A method identified by its module and `MethodDef` token (`COR_PRF_METHOD`)
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MethodInfo {
    /// The module that defines the method
    pub module_id: ModuleId,
    /// The `MethodDef` token of the method within its module
    pub method_id: Token,
}

impl MethodInfo {
    /// Creates a new entry for the given module and method token
    #[must_use]
    pub const fn new(module_id: ModuleId, method_id: Token) -> Self {
        MethodInfo {
            module_id,
            method_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accessors() {
        let id = ObjectId::new(0x7ff0_1000);
        assert_eq!(id.value(), 0x7ff0_1000);
        assert!(!id.is_null());
        assert!(ThreadId::default().is_null());
    }

    #[test]
    fn test_id_conversion() {
        let module: ModuleId = 0x1234usize.into();
        let raw: usize = module.into();
        assert_eq!(raw, 0x1234);
    }

    #[test]
    fn test_id_formatting() {
        assert_eq!(format!("{}", ModuleId(0xdead)), "0xdead");
        assert_eq!(format!("{:?}", ModuleId(0xdead)), "ModuleId(0xdead)");
        assert_eq!(format!("{:?}", AppDomainId(1)), "AppDomainId(0x1)");
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(
            std::mem::size_of::<ObjectId>(),
            std::mem::size_of::<usize>()
        );
        assert_eq!(
            std::mem::size_of::<FunctionInfo>(),
            2 * std::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_function_info() {
        let original = FunctionInfo::new(FunctionId(0x10), ReJitId::ORIGINAL);
        assert!(!original.is_rejit());

        let rejitted = FunctionInfo::new(FunctionId(0x10), ReJitId(2));
        assert!(rejitted.is_rejit());
        assert_ne!(original, rejitted);
    }

    #[test]
    fn test_method_info() {
        let method = MethodInfo::new(ModuleId(0x20), Token::new(0x06000003));
        assert_eq!(method.method_id.row(), 3);
        assert_eq!(method.module_id, ModuleId(0x20));
    }
}
