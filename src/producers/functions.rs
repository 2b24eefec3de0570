use log::debug;

use crate::{
    config::CollectionConfig,
    ids::{FunctionInfo, ReJitId},
    producers::Producer,
    Result,
};

/// The runtime's JIT-compiled code.
pub trait CodeVersionSource {
    /// Returns one entry per JIT-compiled function body, in code heap order.
    ///
    /// A function that was re-JIT compiled has one entry per body, each carrying the
    /// re-JIT identifier of its code version.
    ///
    /// # Errors
    /// Returns an error if the code heaps cannot be walked
    fn jitted_bodies(&self) -> Result<Vec<FunctionInfo>>;
}

/// Produces the JIT-compiled function bodies.
///
/// Every body is reported. Without [`CollectionConfig::with_rejit_ids`] the re-JIT
/// identifier of each entry is reported as [`ReJitId::ORIGINAL`], which is what observer
/// tools that predate re-JIT support expect; a re-JIT compiled function then shows up
/// once per body with identical entries.
pub struct FunctionProducer<'a, S: CodeVersionSource + ?Sized> {
    source: &'a S,
    config: CollectionConfig,
}

impl<'a, S: CodeVersionSource + ?Sized> FunctionProducer<'a, S> {
    /// Creates a producer over `source` with the default configuration
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, CollectionConfig::default())
    }

    /// Creates a producer over `source` with an explicit configuration
    pub fn with_config(source: &'a S, config: CollectionConfig) -> Self {
        FunctionProducer { source, config }
    }
}

impl<S: CodeVersionSource + ?Sized> Producer for FunctionProducer<'_, S> {
    type Element = FunctionInfo;

    fn produce(&self, out: &mut Vec<FunctionInfo>) -> Result<()> {
        let bodies = self.source.jitted_bodies()?;

        if self.config.with_rejit_ids {
            out.extend_from_slice(&bodies);
        } else {
            out.extend(
                bodies
                    .iter()
                    .map(|body| FunctionInfo::new(body.function_id, ReJitId::ORIGINAL)),
            );
        }

        debug!(
            "Collected {} function bodies (rejit ids: {})",
            bodies.len(),
            self.config.with_rejit_ids
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ids::FunctionId, FunctionEnum};

    struct CodeHeap(Vec<FunctionInfo>);

    impl CodeVersionSource for CodeHeap {
        fn jitted_bodies(&self) -> Result<Vec<FunctionInfo>> {
            Ok(self.0.clone())
        }
    }

    fn heap() -> CodeHeap {
        CodeHeap(vec![
            FunctionInfo::new(FunctionId(0xA0), ReJitId::ORIGINAL),
            FunctionInfo::new(FunctionId(0xB0), ReJitId::ORIGINAL),
            FunctionInfo::new(FunctionId(0xA0), ReJitId(1)),
        ])
    }

    #[test]
    fn test_bodies_without_rejit_ids() {
        let heap = heap();
        let functions = FunctionEnum::from_producer(&FunctionProducer::new(&heap)).unwrap();

        let entries: Vec<FunctionInfo> = functions.iter().collect();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|entry| !entry.is_rejit()));
        assert_eq!(entries[2].function_id, FunctionId(0xA0));
    }

    #[test]
    fn test_bodies_with_rejit_ids() {
        let heap = heap();
        let producer = FunctionProducer::with_config(&heap, CollectionConfig::with_rejit());
        let functions = FunctionEnum::from_producer(&producer).unwrap();

        let entries: Vec<FunctionInfo> = functions.iter().collect();
        assert_eq!(entries, heap.0);
        assert_eq!(entries[2].rejit_id, ReJitId(1));
    }
}
