use std::{fmt, marker::PhantomData, sync::Arc};

use log::{debug, trace, warn};
use uguid::Guid;

use crate::{
    enumerator::{Outcome, Snapshot, UnknownRef},
    identity::{EnumInterface, InterfaceKind, IID_IUNKNOWN},
    producers::Producer,
    Error, Result,
};

/// The shared state behind every reference to one enumerator instance.
///
/// Tagged with the interface marker so that a type-erased [`UnknownRef`] can only be
/// recovered as the interface it was created for.
pub(crate) struct EnumState<I: EnumInterface> {
    pub(crate) snapshot: Snapshot<I::Element>,
    _interface: PhantomData<fn() -> I>,
}

impl<I: EnumInterface> Drop for EnumState<I> {
    fn drop(&mut self) {
        debug!(
            "{} destroyed, released {} elements",
            I::KIND,
            self.snapshot.len()
        );
    }
}

/// A reference-counted snapshot enumerator implementing the interface `I`.
///
/// Each `ProfilerEnum` value is one reference to a shared instance. [`ProfilerEnum::add_ref`]
/// hands out another reference to the *same* instance (shared cursor), dropping a value or
/// calling [`ProfilerEnum::release`] gives one up, and the instance with its element storage
/// is destroyed when the last reference goes away. [`ProfilerEnum::try_clone`] on the other
/// hand creates a *new* instance with its own cursor.
///
/// The enumerator does NOT take ownership of the elements it is created from; it keeps its
/// own private copy.
///
/// # Thread Safety
///
/// References may be acquired and released from any thread. The cursor operations
/// (`next_into`, `skip`, `reset`, `get_count`, `clone_enum`) are memory-safe but not
/// serialized against each other; holders sharing one instance across threads must
/// coordinate their cursor use.
///
/// # Examples
///
/// ```rust
/// use profenum::{ThreadEnum, ThreadId, Outcome};
///
/// let threads = ThreadEnum::new(&[ThreadId(1), ThreadId(2), ThreadId(3), ThreadId(4)])?;
///
/// let mut buffer = [ThreadId::default(); 2];
/// let mut fetched = 0;
/// assert_eq!(threads.next_into(2, Some(&mut buffer[..]), Some(&mut fetched))?, Outcome::Complete);
/// assert_eq!(threads.remaining(), 2);
///
/// // A clone starts over with the full snapshot
/// let copy = threads.try_clone()?;
/// assert_eq!(copy.remaining(), 4);
/// # Ok::<(), profenum::Error>(())
/// ```
pub struct ProfilerEnum<I: EnumInterface> {
    state: Arc<EnumState<I>>,
}

impl<I: EnumInterface> ProfilerEnum<I> {
    fn from_snapshot(snapshot: Snapshot<I::Element>) -> Self {
        debug!("{} created with {} elements", I::KIND, snapshot.len());

        ProfilerEnum {
            state: Arc::new(EnumState {
                snapshot,
                _interface: PhantomData,
            }),
        }
    }

    pub(crate) fn from_state(state: Arc<EnumState<I>>) -> Self {
        ProfilerEnum { state }
    }

    pub(crate) fn state(&self) -> &Arc<EnumState<I>> {
        &self.state
    }

    /// Creates an enumerator over a private copy of `elements`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfMemory`] if the snapshot cannot be allocated, and
    /// [`Error::InvalidArgument`] if `elements` holds more than `u32::MAX` entries, which
    /// the 32-bit counts of the protocol cannot express
    pub fn new(elements: &[I::Element]) -> Result<Self> {
        Ok(Self::from_snapshot(Snapshot::copy_from(elements)?))
    }

    /// Creates an enumerator without elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_snapshot(Snapshot::empty())
    }

    /// Creates an enumerator over the sequence collected by `producer`.
    ///
    /// The producer either delivers its complete sequence or fails; no enumerator is
    /// created from a failed collection.
    ///
    /// # Errors
    /// Returns the producer's error, or [`Error::InvalidArgument`] if the collected
    /// sequence holds more than `u32::MAX` entries
    pub fn from_producer<P>(producer: &P) -> Result<Self>
    where
        P: Producer<Element = I::Element> + ?Sized,
    {
        let mut elements = Vec::new();
        if let Err(error) = producer.produce(&mut elements) {
            warn!("{} population failed - {}", I::KIND, error);
            return Err(error);
        }

        Ok(Self::from_snapshot(Snapshot::from_vec(elements)?))
    }

    /// The interface this enumerator implements
    #[must_use]
    pub fn kind(&self) -> InterfaceKind {
        I::KIND
    }

    /// The interface identifier this enumerator answers to
    #[must_use]
    pub fn iid(&self) -> Guid {
        I::IID
    }

    /// Dynamically casts this enumerator to the interface identified by `iid`.
    ///
    /// Succeeds for the enumerator's own interface and for `IUnknown`, returning a new
    /// reference to this same instance.
    ///
    /// ## Arguments
    /// * 'iid' - The interface identifier requested
    ///
    /// # Errors
    /// Returns [`Error::NoInterface`] for any other identifier; the reference count is
    /// left unchanged.
    pub fn query_interface(&self, iid: &Guid) -> Result<Interface<I>> {
        if *iid == I::IID {
            Ok(Interface::Enum(self.add_ref()))
        } else if *iid == IID_IUNKNOWN {
            Ok(Interface::Unknown(UnknownRef::from(self.add_ref())))
        } else {
            trace!("{} does not implement {}", I::KIND, iid);
            Err(Error::NoInterface(*iid))
        }
    }

    /// Returns the type-erased `IUnknown` view of this instance as a new reference.
    #[must_use]
    pub fn as_unknown(&self) -> UnknownRef {
        UnknownRef::from(self.add_ref())
    }

    /// Acquires another reference to this same instance.
    ///
    /// The returned value shares snapshot and cursor with `self`.
    #[must_use]
    pub fn add_ref(&self) -> Self {
        ProfilerEnum {
            state: Arc::clone(&self.state),
        }
    }

    /// Number of live references to this instance
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn ref_count(&self) -> u32 {
        Arc::strong_count(&self.state) as u32
    }

    /// Gives up this reference and returns the number of references left.
    ///
    /// Exactly one release of an instance returns 0: the one that destroyed it together
    /// with its snapshot. Any other release returns at least 1; the exact value is a
    /// snapshot of the count and may be stale while other threads acquire or release
    /// references concurrently.
    #[allow(clippy::cast_possible_truncation)]
    pub fn release(self) -> u32 {
        let observed = Arc::strong_count(&self.state);

        match Arc::into_inner(self.state) {
            Some(_last) => 0,
            None => observed.saturating_sub(1).max(1) as u32,
        }
    }

    /// Returns true if `self` and `other` are references to the same instance
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Retrieves up to `requested` elements and advances the enumerator.
    ///
    /// ## Arguments
    /// * 'requested' - The number of elements to read
    /// * 'elements'  - Buffer receiving the elements, at least `requested` long
    /// * 'fetched'   - Receives the number of elements actually retrieved
    ///
    /// If `requested` is 1 and `fetched` is `None`, the enumerator advances one element
    /// and reports [`Outcome::Complete`] if it succeeded.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if more than one element is requested without a
    /// `fetched` slot, or if the buffer is missing or shorter than `requested`
    pub fn next_into(
        &self,
        requested: u32,
        elements: Option<&mut [I::Element]>,
        fetched: Option<&mut u32>,
    ) -> Result<Outcome> {
        self.state
            .snapshot
            .next(requested, elements, fetched)
            .inspect_err(|error| trace!("{}::Next rejected - {}", I::KIND, error))
    }

    /// Advances the enumerator by up to `count` elements without retrieving them.
    pub fn skip(&self, count: u32) -> Outcome {
        self.state.snapshot.skip(count)
    }

    /// Returns the enumerator to the first element.
    pub fn reset(&self) {
        self.state.snapshot.reset();
    }

    /// Writes the number of elements remaining in the enumeration into `count`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `count` is `None`
    pub fn get_count(&self, count: Option<&mut u32>) -> Result<()> {
        self.state
            .snapshot
            .get_count(count)
            .inspect_err(|error| trace!("{}::GetCount rejected - {}", I::KIND, error))
    }

    /// Number of elements remaining in the enumeration
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.state.snapshot.remaining()
    }

    /// Total number of elements in the snapshot, independent of the cursor
    #[must_use]
    pub fn len(&self) -> u32 {
        self.state.snapshot.len()
    }

    /// Returns true if the snapshot holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.snapshot.is_empty()
    }

    /// Creates an independent enumerator over the full snapshot and stores it in `out`.
    ///
    /// On failure `out` is set to `None`; `self` is never affected.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `out` is `None`, and [`Error::OutOfMemory`]
    /// if the copy cannot be allocated
    pub fn clone_enum(&self, out: Option<&mut Option<ProfilerEnum<I>>>) -> Result<()> {
        let Some(slot) = out else {
            trace!("{}::Clone rejected - missing output slot", I::KIND);
            return Err(invalid_argument!("output slot for the clone is required"));
        };

        match self.try_clone() {
            Ok(clone) => {
                *slot = Some(clone);
                Ok(())
            }
            Err(error) => {
                *slot = None;
                Err(error)
            }
        }
    }

    /// Creates an independent enumerator over the full snapshot.
    ///
    /// The new instance starts at the first element with a reference count of 1,
    /// regardless of where the cursor of `self` stands.
    ///
    /// # Errors
    /// Returns [`Error::OutOfMemory`] if the copy cannot be allocated
    pub fn try_clone(&self) -> Result<Self> {
        let snapshot = self.state.snapshot.try_clone()?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Returns an iterator that drains the enumerator one element at a time.
    ///
    /// The iterator advances the shared cursor of this instance.
    #[must_use]
    pub fn iter(&self) -> Elements<'_, I> {
        Elements { source: self }
    }
}

impl<I: EnumInterface> Default for ProfilerEnum<I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<I: EnumInterface> fmt::Debug for ProfilerEnum<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilerEnum")
            .field("interface", &format_args!("{}", I::KIND))
            .field("len", &self.len())
            .field("position", &self.state.snapshot.position())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

impl<'a, I: EnumInterface> IntoIterator for &'a ProfilerEnum<I> {
    type Item = I::Element;
    type IntoIter = Elements<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator draining a [`ProfilerEnum`] from its current position.
pub struct Elements<'a, I: EnumInterface> {
    source: &'a ProfilerEnum<I>,
}

impl<I: EnumInterface> Iterator for Elements<'_, I> {
    type Item = I::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let snapshot = &self.source.state.snapshot;
        let element = *snapshot.as_slice().get(snapshot.position() as usize)?;
        snapshot.skip(1);
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.source.remaining() as usize;
        (remaining, Some(remaining))
    }
}

/// The result of a successful identity query.
pub enum Interface<I: EnumInterface> {
    /// The enumerator's own interface
    Enum(ProfilerEnum<I>),
    /// `IUnknown`
    Unknown(UnknownRef),
}

impl<I: EnumInterface> Interface<I> {
    /// The identifier of the interface this reference is typed as
    #[must_use]
    pub fn iid(&self) -> Guid {
        match self {
            Interface::Enum(_) => I::IID,
            Interface::Unknown(_) => IID_IUNKNOWN,
        }
    }

    /// Returns the typed enumerator, if this is one
    #[must_use]
    pub fn into_enum(self) -> Option<ProfilerEnum<I>> {
        match self {
            Interface::Enum(enumerator) => Some(enumerator),
            Interface::Unknown(_) => None,
        }
    }

    /// Returns the `IUnknown` view, if this is one
    #[must_use]
    pub fn into_unknown(self) -> Option<UnknownRef> {
        match self {
            Interface::Enum(_) => None,
            Interface::Unknown(unknown) => Some(unknown),
        }
    }
}

impl<I: EnumInterface> fmt::Debug for Interface<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interface::Enum(enumerator) => f.debug_tuple("Enum").field(enumerator).finish(),
            Interface::Unknown(unknown) => f.debug_tuple("Unknown").field(unknown).finish(),
        }
    }
}
