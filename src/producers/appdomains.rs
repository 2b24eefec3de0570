use log::trace;

use crate::{
    ids::{AppDomainId, ModuleId},
    producers::ModuleSource,
    Result,
};

/// Fills a caller-supplied array with the app domains a module is loaded into.
///
/// This backs `GetAppDomainsContainingModule`, which does not hand out an enumerator:
/// the caller passes an array and receives the *total* number of matching app domains,
/// even if the array was too small to hold them all. A caller that does not know the
/// count up front calls once with an empty array to learn it, then again with an array
/// of that size.
///
/// # Examples
///
/// ```rust
/// use profenum::producers::{AppDomainsContainingModule, ModuleRecord, ModuleSource};
/// use profenum::{AppDomainId, ModuleId, Result};
///
/// struct OneDomain;
///
/// impl ModuleSource for OneDomain {
///     fn app_domains(&self) -> Result<Vec<AppDomainId>> { Ok(vec![AppDomainId(1)]) }
///     fn shared_modules(&self) -> Result<Vec<ModuleRecord>> { Ok(vec![]) }
///     fn modules_in(&self, _: AppDomainId) -> Result<Vec<ModuleRecord>> {
///         Ok(vec![ModuleRecord::unshared(ModuleId(0x40), true)])
///     }
/// }
///
/// let iterate = AppDomainsContainingModule::new(&OneDomain, ModuleId(0x40));
/// let needed = iterate.populate(&mut [])?;
///
/// let mut domains = vec![AppDomainId::default(); needed as usize];
/// assert_eq!(iterate.populate(&mut domains)?, 1);
/// assert_eq!(domains, [AppDomainId(1)]);
/// # Ok::<(), profenum::Error>(())
/// ```
pub struct AppDomainsContainingModule<'a, S: ModuleSource + ?Sized> {
    source: &'a S,
    module: ModuleId,
}

impl<'a, S: ModuleSource + ?Sized> AppDomainsContainingModule<'a, S> {
    /// Creates an iteration over the app domains of `source` looking for `module`
    pub fn new(source: &'a S, module: ModuleId) -> Self {
        AppDomainsContainingModule { source, module }
    }

    /// Writes the matching app domains into `domains` and returns how many exist.
    ///
    /// At most `domains.len()` identifiers are written, in app domain order; entries past
    /// the returned count are left untouched.
    ///
    /// # Errors
    /// Returns an error if the app domains or their modules cannot be read
    #[allow(clippy::cast_possible_truncation)]
    pub fn populate(&self, domains: &mut [AppDomainId]) -> Result<u32> {
        let mut index = 0usize;

        for domain in self.source.app_domains()? {
            if !self.source.contains_module(domain, self.module)? {
                continue;
            }

            if let Some(slot) = domains.get_mut(index) {
                *slot = domain;
            }
            index += 1;
        }

        if index > domains.len() {
            trace!(
                "Module {} is in {} app domains, caller provided room for {}",
                self.module,
                index,
                domains.len()
            );
        }

        Ok(index as u32)
    }
}
