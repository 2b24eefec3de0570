//! Producers that populate enumerators from runtime state.
//!
//! An enumerator only ever sees a complete, ordered element sequence. Producers are the
//! other half: they walk whatever runtime structure holds the live collection (thread
//! store, loaded modules, JIT code heaps) and hand the result to
//! [`crate::ProfilerEnum::from_producer`]. A producer either delivers its full sequence or
//! fails as a whole; partial failures during the walk are the producer's business.
//!
//! The runtime structures themselves are reached through small collaborator traits that
//! the host implements:
//!
//! - [`ThreadStore`] - the list of managed threads and their states
//! - [`ModuleSource`] - app domains and the modules loaded into them
//! - [`CodeVersionSource`] - JIT-compiled function bodies
//!
//! # Producers
//!
//! | Producer                       | Element                            | Enumerator           |
//! |--------------------------------|------------------------------------|----------------------|
//! | [`ThreadProducer`]             | [`crate::ids::ThreadId`]           | [`crate::ThreadEnum`]   |
//! | [`ModuleProducer`]             | [`crate::ids::ModuleId`]           | [`crate::ModuleEnum`]   |
//! | [`FunctionProducer`]           | [`crate::ids::FunctionInfo`]       | [`crate::FunctionEnum`] |
//!
//! [`AppDomainsContainingModule`] does not feed an enumerator; it fills a caller-supplied
//! array directly.
//!
//! Slices and vectors are producers of their own elements, which covers object and method
//! enumerators whose population is a plain list.

mod appdomains;
mod functions;
mod modules;
mod threads;

pub use appdomains::AppDomainsContainingModule;
pub use functions::{CodeVersionSource, FunctionProducer};
pub use modules::{ModuleProducer, ModuleRecord, ModuleSource};
pub use threads::{ThreadProducer, ThreadRecord, ThreadState, ThreadStore};

use crate::Result;

/// Collects an ordered element sequence for an enumerator.
pub trait Producer {
    /// The element type the sequence consists of
    type Element: Copy;

    /// Appends the complete sequence to `out`.
    ///
    /// # Errors
    /// Returns an error if the sequence could not be collected. Whatever was appended to
    /// `out` before the failure is discarded by the caller.
    fn produce(&self, out: &mut Vec<Self::Element>) -> Result<()>;
}

impl<E: Copy> Producer for [E] {
    type Element = E;

    fn produce(&self, out: &mut Vec<E>) -> Result<()> {
        out.extend_from_slice(self);
        Ok(())
    }
}

impl<E: Copy> Producer for Vec<E> {
    type Element = E;

    fn produce(&self, out: &mut Vec<E>) -> Result<()> {
        out.extend_from_slice(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ids::{MethodInfo, ModuleId, ObjectId},
        token::Token,
        Error, MethodEnum, ObjectEnum,
    };

    struct Failing;

    impl Producer for Failing {
        type Element = ObjectId;

        fn produce(&self, out: &mut Vec<ObjectId>) -> Result<()> {
            out.push(ObjectId(1));
            Err(Error::Producer("heap walk interrupted".into()))
        }
    }

    #[test]
    fn test_slice_producer() {
        let objects = [ObjectId(0x10), ObjectId(0x20)];
        let e = ObjectEnum::from_producer(&objects[..]).unwrap();
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn test_vec_producer() {
        let methods = vec![
            MethodInfo::new(ModuleId(1), Token::method_def(1)),
            MethodInfo::new(ModuleId(1), Token::method_def(2)),
        ];
        let e = MethodEnum::from_producer(&methods).unwrap();
        let collected: Vec<MethodInfo> = e.iter().collect();
        assert_eq!(collected, methods);
    }

    #[test]
    fn test_failing_producer_creates_nothing() {
        let result = ObjectEnum::from_producer(&Failing);
        assert_eq!(
            result.err(),
            Some(Error::Producer("heap walk interrupted".into()))
        );
    }
}
