use bitflags::bitflags;
use log::debug;

use crate::{config::CollectionConfig, ids::ThreadId, producers::Producer, Result};

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    /// Run states of a managed thread relevant to enumeration
    pub struct ThreadState : u32 {
        /// The thread object exists but the OS thread was never started
        const UNSTARTED = 0x0001;
        /// The thread has finished running
        const DEAD = 0x0002;
        /// The thread does not keep the process alive
        const BACKGROUND = 0x0004;
        /// The thread has been detached from the runtime
        const DETACHED = 0x0008;
    }
}

/// One entry of the runtime's thread store
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ThreadRecord {
    /// The thread's identifier
    pub id: ThreadId,
    /// The thread's current state
    pub state: ThreadState,
}

impl ThreadRecord {
    /// Creates a new record
    #[must_use]
    pub fn new(id: ThreadId, state: ThreadState) -> Self {
        ThreadRecord { id, state }
    }
}

/// The runtime's list of managed threads.
pub trait ThreadStore {
    /// Returns every thread the store knows about, in store order.
    ///
    /// The implementation is expected to hold whatever lock keeps the list consistent
    /// for the duration of the call.
    ///
    /// # Errors
    /// Returns an error if the thread list cannot be read
    fn threads(&self) -> Result<Vec<ThreadRecord>>;
}

/// Produces the identifiers of all live managed threads.
///
/// A thread is reported unless its state intersects
/// [`CollectionConfig::excluded_thread_states`] (dead, unstarted and detached threads by
/// default). Store order is preserved.
pub struct ThreadProducer<'a, S: ThreadStore + ?Sized> {
    store: &'a S,
    config: CollectionConfig,
}

impl<'a, S: ThreadStore + ?Sized> ThreadProducer<'a, S> {
    /// Creates a producer over `store` with the default configuration
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, CollectionConfig::default())
    }

    /// Creates a producer over `store` with an explicit configuration
    pub fn with_config(store: &'a S, config: CollectionConfig) -> Self {
        ThreadProducer { store, config }
    }
}

impl<S: ThreadStore + ?Sized> Producer for ThreadProducer<'_, S> {
    type Element = ThreadId;

    fn produce(&self, out: &mut Vec<ThreadId>) -> Result<()> {
        let threads = self.store.threads()?;
        let total = threads.len();

        out.extend(
            threads
                .into_iter()
                .filter(|thread| !thread.state.intersects(self.config.excluded_thread_states))
                .map(|thread| thread.id),
        );

        debug!("Thread store walk kept {} of {} threads", out.len(), total);
        Ok(())
    }
}
