use log::{debug, trace};

use crate::{
    config::CollectionConfig,
    ids::{AppDomainId, ModuleId},
    producers::Producer,
    Result,
};

/// A module as seen from one app domain
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModuleRecord {
    /// The module's identifier
    pub id: ModuleId,
    /// The module is loaded domain-neutral and appears in several app domains
    pub shared: bool,
    /// The module finished loading and the profiler has been notified about it
    pub load_finished: bool,
}

impl ModuleRecord {
    /// Creates a record for a module private to its app domain
    #[must_use]
    pub fn unshared(id: ModuleId, load_finished: bool) -> Self {
        ModuleRecord {
            id,
            shared: false,
            load_finished,
        }
    }

    /// Creates a record for a domain-neutral module
    #[must_use]
    pub fn shared(id: ModuleId, load_finished: bool) -> Self {
        ModuleRecord {
            id,
            shared: true,
            load_finished,
        }
    }
}

/// The runtime's app domains and the modules loaded into them.
pub trait ModuleSource {
    /// Returns all app domains, in creation order
    ///
    /// # Errors
    /// Returns an error if the app domain list cannot be read
    fn app_domains(&self) -> Result<Vec<AppDomainId>>;

    /// Returns the domain-neutral modules, each listed once
    ///
    /// # Errors
    /// Returns an error if the shared module list cannot be read
    fn shared_modules(&self) -> Result<Vec<ModuleRecord>>;

    /// Returns every module loaded into `domain`, shared modules included
    ///
    /// # Errors
    /// Returns an error if the domain's module list cannot be read
    fn modules_in(&self, domain: AppDomainId) -> Result<Vec<ModuleRecord>>;

    /// Returns true if `module` is loaded into `domain` and its load has finished
    ///
    /// # Errors
    /// Returns an error if the domain's module list cannot be read
    fn contains_module(&self, domain: AppDomainId, module: ModuleId) -> Result<bool> {
        Ok(self
            .modules_in(domain)?
            .iter()
            .any(|record| record.id == module && record.load_finished))
    }
}

/// Produces the identifiers of all loaded modules.
///
/// A domain-neutral module is loaded into every app domain that uses it, so walking the
/// app domains alone would report it several times. The producer therefore adds the
/// shared modules first, then walks each app domain and adds only the modules private to
/// it. Each module is reported exactly once.
pub struct ModuleProducer<'a, S: ModuleSource + ?Sized> {
    source: &'a S,
    config: CollectionConfig,
}

impl<'a, S: ModuleSource + ?Sized> ModuleProducer<'a, S> {
    /// Creates a producer over `source` with the default configuration
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, CollectionConfig::default())
    }

    /// Creates a producer over `source` with an explicit configuration
    pub fn with_config(source: &'a S, config: CollectionConfig) -> Self {
        ModuleProducer { source, config }
    }

    /// Adds the modules private to `domain`, skipping domain-neutral ones.
    ///
    /// # Errors
    /// Returns an error if the domain's module list cannot be read
    pub fn add_unshared_modules_from_app_domain(
        &self,
        domain: AppDomainId,
        out: &mut Vec<ModuleId>,
    ) -> Result<()> {
        for record in self.source.modules_in(domain)? {
            if !record.shared {
                self.add_module(&record, out);
            }
        }

        Ok(())
    }

    /// Adds a single module if it is visible to the profiler.
    pub fn add_module(&self, record: &ModuleRecord, out: &mut Vec<ModuleId>) {
        if self.config.only_notified_modules && !record.load_finished {
            trace!("Skipping module {} - load not finished", record.id);
            return;
        }

        out.push(record.id);
    }
}

impl<S: ModuleSource + ?Sized> Producer for ModuleProducer<'_, S> {
    type Element = ModuleId;

    fn produce(&self, out: &mut Vec<ModuleId>) -> Result<()> {
        for record in self.source.shared_modules()? {
            self.add_module(&record, out);
        }

        let domains = self.source.app_domains()?;
        for domain in &domains {
            self.add_unshared_modules_from_app_domain(*domain, out)?;
        }

        debug!(
            "Collected {} modules across {} app domains",
            out.len(),
            domains.len()
        );
        Ok(())
    }
}
