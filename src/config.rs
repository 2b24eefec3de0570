//! Collection configuration for producers
//!
//! This module provides the options that control how producers walk runtime state
//! before handing a sequence to an enumerator. The enumerator itself has no options:
//! it always copies exactly what it is given.

use crate::producers::ThreadState;

/// Configuration for populating enumerators from runtime state
///
/// The defaults reproduce what the profiling API reports to observer tools:
/// - Function bodies are reported without their re-JIT identifiers
/// - Only modules the profiler has been notified about are reported
/// - Threads that are dead, unstarted or detached are left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Report the re-JIT identifier of each function body (`EnumJITedFunctions2`)
    /// instead of reporting every body as the original version (`EnumJITedFunctions`)
    pub with_rejit_ids: bool,

    /// Only report modules whose load has finished
    /// Modules still loading have not been announced to the profiler yet
    pub only_notified_modules: bool,

    /// Threads carrying any of these states are skipped
    pub excluded_thread_states: ThreadState,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            with_rejit_ids: false,
            only_notified_modules: true,
            excluded_thread_states: ThreadState::DEAD
                | ThreadState::UNSTARTED
                | ThreadState::DETACHED,
        }
    }
}

impl CollectionConfig {
    /// Creates the default configuration extended with re-JIT identifiers
    #[must_use]
    pub fn with_rejit() -> Self {
        Self {
            with_rejit_ids: true,
            ..Self::default()
        }
    }

    /// Creates a configuration that reports everything it finds
    ///
    /// No module or thread is held back, regardless of its load or run state.
    /// **Warning**: Handing out identifiers the profiler was not notified about breaks the
    /// ordering guarantees observer tools rely on. Use for diagnostics only.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            with_rejit_ids: true,
            only_notified_modules: false,
            excluded_thread_states: ThreadState::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_config_presets() {
        let default = CollectionConfig::default();
        assert!(!default.with_rejit_ids);
        assert!(default.only_notified_modules);
        assert!(default.excluded_thread_states.contains(ThreadState::DEAD));
        assert!(default.excluded_thread_states.contains(ThreadState::UNSTARTED));
        assert!(default.excluded_thread_states.contains(ThreadState::DETACHED));
        assert!(!default.excluded_thread_states.contains(ThreadState::BACKGROUND));

        let rejit = CollectionConfig::with_rejit();
        assert!(rejit.with_rejit_ids);
        assert_eq!(rejit.excluded_thread_states, default.excluded_thread_states);

        let unfiltered = CollectionConfig::unfiltered();
        assert!(!unfiltered.only_notified_modules);
        assert!(unfiltered.excluded_thread_states.is_empty());
    }
}
