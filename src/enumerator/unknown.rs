use std::{any::Any, fmt, sync::Arc};

use log::trace;
use uguid::Guid;

use crate::{
    enumerator::{EnumState, ProfilerEnum},
    identity::{EnumInterface, IID_IUNKNOWN},
    Error, Result,
};

/// The `IUnknown` view of an enumerator.
///
/// Observer tools frequently receive objects typed only as `IUnknown` and recover the
/// concrete interface through an identity query. An `UnknownRef` is such a reference: it
/// counts towards the same reference count as the typed [`ProfilerEnum`] handles of the
/// instance, and can be queried back into the typed interface.
///
/// # Examples
///
/// ```rust
/// use profenum::{ObjectEnum, ObjectId};
/// use profenum::identity::ICorProfilerObjectEnum;
///
/// let objects = ObjectEnum::new(&[ObjectId(0x1000)])?;
/// let unknown = objects.as_unknown();
///
/// let typed = unknown.query::<ICorProfilerObjectEnum>()?;
/// assert!(typed.is_same(&objects));
/// assert_eq!(objects.ref_count(), 3);
/// # Ok::<(), profenum::Error>(())
/// ```
pub struct UnknownRef {
    object: Arc<dyn Any + Send + Sync>,
    iid: Guid,
    release_last: fn(Arc<dyn Any + Send + Sync>) -> bool,
}

/// Drops one reference to an erased `EnumState<I>`, returning true if it was the last one
fn release_state<I: EnumInterface>(object: Arc<dyn Any + Send + Sync>) -> bool {
    match object.downcast::<EnumState<I>>() {
        Ok(state) => Arc::into_inner(state).is_some(),
        Err(_) => false,
    }
}

impl UnknownRef {
    /// The identifier of the interface the underlying instance implements
    #[must_use]
    pub fn iid(&self) -> Guid {
        self.iid
    }

    /// Returns a new reference to this instance if it answers to `iid`.
    ///
    /// # Errors
    /// Returns [`Error::NoInterface`] if the instance implements neither `iid` nor
    /// `IUnknown`
    pub fn query_interface(&self, iid: &Guid) -> Result<UnknownRef> {
        if *iid == self.iid || *iid == IID_IUNKNOWN {
            Ok(self.add_ref())
        } else {
            trace!("{} does not implement {}", self.iid, iid);
            Err(Error::NoInterface(*iid))
        }
    }

    /// Recovers the typed enumerator interface `I` as a new reference.
    ///
    /// # Errors
    /// Returns [`Error::NoInterface`] with `I`'s identifier if the instance does not
    /// implement `I`
    pub fn query<I: EnumInterface>(&self) -> Result<ProfilerEnum<I>> {
        if I::IID != self.iid {
            trace!("{} does not implement {}", self.iid, I::KIND);
            return Err(Error::NoInterface(I::IID));
        }

        Arc::clone(&self.object)
            .downcast::<EnumState<I>>()
            .map(ProfilerEnum::from_state)
            .map_err(|_| Error::NoInterface(I::IID))
    }

    /// Acquires another reference to this same instance.
    #[must_use]
    pub fn add_ref(&self) -> Self {
        UnknownRef {
            object: Arc::clone(&self.object),
            iid: self.iid,
            release_last: self.release_last,
        }
    }

    /// Number of live references to this instance, typed or not
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn ref_count(&self) -> u32 {
        Arc::strong_count(&self.object) as u32
    }

    /// Gives up this reference and returns the number of references left.
    ///
    /// As with [`ProfilerEnum::release`], exactly one release of an instance returns 0,
    /// whether it goes through a typed or an `IUnknown` reference.
    #[allow(clippy::cast_possible_truncation)]
    pub fn release(self) -> u32 {
        let observed = Arc::strong_count(&self.object);

        if (self.release_last)(self.object) {
            0
        } else {
            observed.saturating_sub(1).max(1) as u32
        }
    }

    /// Returns true if this is a reference to the same instance as `other`
    #[must_use]
    pub fn is_same<I: EnumInterface>(&self, other: &ProfilerEnum<I>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.object), Arc::as_ptr(other.state()))
    }
}

impl<I: EnumInterface> From<ProfilerEnum<I>> for UnknownRef {
    fn from(enumerator: ProfilerEnum<I>) -> Self {
        let object: Arc<dyn Any + Send + Sync> = enumerator.state().clone();
        UnknownRef {
            object,
            iid: I::IID,
            release_last: release_state::<I>,
        }
    }
}

impl fmt::Debug for UnknownRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnknownRef")
            .field("iid", &format_args!("{}", self.iid))
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
