//! Private element storage with a forward-only cursor.
//!
//! A [`Snapshot`] owns a copy of the elements it was created from and implements the
//! cursor half of the enumerator protocol (`Next`, `Skip`, `Reset`, `GetCount`). It knows
//! nothing about interface identity or reference counting, which live in
//! [`crate::enumerator::ProfilerEnum`].
//!
//! # Cursor Model
//!
//! The cursor is an [`AtomicU32`] accessed with relaxed ordering. This keeps the type
//! `Sync` and every access memory-safe, but read-modify-write sequences such as `next`
//! are not atomic as a whole: two holders of the same instance advancing it concurrently
//! may both read the same position. Callers sharing one instance across threads must
//! serialize the cursor operations themselves.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{enumerator::Outcome, Error, Result};

/// An immutable element sequence plus a cursor into it.
pub struct Snapshot<E> {
    elements: Box<[E]>,
    cursor: AtomicU32,
}

impl<E: Copy> Snapshot<E> {
    /// Copies `elements` into a new snapshot positioned at the first element.
    ///
    /// The source may be modified or dropped afterwards without affecting the snapshot.
    ///
    /// # Errors
    /// Returns [`Error::OutOfMemory`] if the storage cannot be allocated, and
    /// [`Error::InvalidArgument`] if the sequence is longer than a 32-bit count can express.
    pub fn copy_from(elements: &[E]) -> Result<Self> {
        Self::check_len(elements.len())?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(elements.len())
            .map_err(|_| Error::OutOfMemory(elements.len()))?;
        storage.extend_from_slice(elements);

        Ok(Snapshot {
            elements: storage.into_boxed_slice(),
            cursor: AtomicU32::new(0),
        })
    }

    /// Takes ownership of an already collected sequence.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the sequence is longer than a 32-bit count
    /// can express.
    pub fn from_vec(elements: Vec<E>) -> Result<Self> {
        Self::check_len(elements.len())?;

        Ok(Snapshot {
            elements: elements.into_boxed_slice(),
            cursor: AtomicU32::new(0),
        })
    }

    /// Creates a snapshot without elements.
    #[must_use]
    pub fn empty() -> Self {
        Snapshot {
            elements: Box::new([]),
            cursor: AtomicU32::new(0),
        }
    }

    fn check_len(len: usize) -> Result<()> {
        if u32::try_from(len).is_err() {
            return Err(invalid_argument!(
                "snapshot of {} elements exceeds the 32-bit count range",
                len
            ));
        }

        Ok(())
    }

    /// Total number of elements in the snapshot
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn len(&self) -> u32 {
        // Bounded by check_len at construction
        self.elements.len() as u32
    }

    /// Returns true if the snapshot holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements consumed so far
    #[must_use]
    pub fn position(&self) -> u32 {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Number of elements not yet consumed
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.len() - self.position()
    }

    /// The full element sequence, independent of the cursor
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    /// Copies up to `requested` elements into `elements` and advances the cursor.
    ///
    /// Follows the `IEnumXXX::Next` contract:
    /// - More than one element may only be requested together with a `fetched` slot
    /// - A request for zero elements succeeds without touching the cursor
    /// - Otherwise `min(requested, remaining)` elements are copied
    ///
    /// ## Arguments
    /// * 'requested' - Number of elements the caller asks for
    /// * 'elements'  - Output buffer, must hold at least `requested` elements
    /// * 'fetched'   - Receives the number of elements actually copied
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] for an ambiguous request or a missing or
    /// undersized buffer. The cursor is left unchanged.
    pub fn next(
        &self,
        requested: u32,
        elements: Option<&mut [E]>,
        fetched: Option<&mut u32>,
    ) -> Result<Outcome> {
        // It's illegal to advance more than one element without a way to report how many
        if fetched.is_none() && requested > 1 {
            return Err(invalid_argument!(
                "fetching {} elements requires a fetched-count slot",
                requested
            ));
        }

        if requested == 0 {
            if let Some(fetched) = fetched {
                *fetched = 0;
            }

            return Ok(Outcome::Complete);
        }

        let Some(buffer) = elements else {
            return Err(invalid_argument!("output buffer is required"));
        };

        if buffer.len() < requested as usize {
            return Err(invalid_argument!(
                "output buffer holds {} elements but {} were requested",
                buffer.len(),
                requested
            ));
        }

        let start = self.position();
        let to_copy = requested.min(self.len() - start);
        let (start_idx, count) = (start as usize, to_copy as usize);

        buffer[..count].copy_from_slice(&self.elements[start_idx..start_idx + count]);
        self.cursor.store(start + to_copy, Ordering::Relaxed);

        debug_assert!(self.position() <= self.len());

        if let Some(fetched) = fetched {
            *fetched = to_copy;
        }

        Ok(Outcome::from_counts(requested, to_copy))
    }

    /// Advances the cursor by up to `count` elements without copying.
    ///
    /// Never fails; returns [`Outcome::Partial`] if the end was reached first.
    pub fn skip(&self, count: u32) -> Outcome {
        let start = self.position();
        let to_skip = count.min(self.len() - start);
        self.cursor.store(start + to_skip, Ordering::Relaxed);

        Outcome::from_counts(count, to_skip)
    }

    /// Moves the cursor back to the first element.
    pub fn reset(&self) {
        self.cursor.store(0, Ordering::Relaxed);
    }

    /// Writes the number of remaining elements into `count`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if no output slot is provided
    pub fn get_count(&self, count: Option<&mut u32>) -> Result<()> {
        let Some(count) = count else {
            return Err(invalid_argument!("count slot is required"));
        };

        *count = self.remaining();
        Ok(())
    }

    /// Copies the full element sequence into a new snapshot positioned at the start.
    ///
    /// The cursor of `self` is irrelevant: already consumed elements are included.
    ///
    /// # Errors
    /// Returns [`Error::OutOfMemory`] if the storage cannot be allocated
    pub fn try_clone(&self) -> Result<Self> {
        Self::copy_from(&self.elements)
    }
}

impl<E: Copy> Default for Snapshot<E> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Snapshot<char> {
        Snapshot::copy_from(&['A', 'B', 'C', 'D']).unwrap()
    }

    #[test]
    fn test_copy_in_is_isolated() {
        let mut source = vec![1u32, 2, 3];
        let snapshot = Snapshot::copy_from(&source).unwrap();

        source[0] = 99;
        source.clear();

        assert_eq!(snapshot.as_slice(), &[1, 2, 3]);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_length_beyond_u32_rejected() {
        let too_long = u32::MAX as usize + 1;
        assert!(matches!(
            Snapshot::<u8>::check_len(too_long),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(Snapshot::<u8>::check_len(u32::MAX as usize).is_ok());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: Snapshot<u64> = Snapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.remaining(), 0);

        let mut buf = [0u64; 1];
        assert_eq!(
            snapshot.next(1, Some(&mut buf[..]), None).unwrap(),
            Outcome::Partial
        );
        assert_eq!(snapshot.skip(0), Outcome::Complete);
        assert_eq!(snapshot.skip(1), Outcome::Partial);
    }

    #[test]
    fn test_next_copies_and_advances() {
        let snapshot = abcd();
        let mut buf = ['-'; 2];
        let mut fetched = 0;

        let outcome = snapshot
            .next(2, Some(&mut buf[..]), Some(&mut fetched))
            .unwrap();
        assert_eq!(outcome, Outcome::Complete);
        assert_eq!(fetched, 2);
        assert_eq!(buf, ['A', 'B']);
        assert_eq!(snapshot.position(), 2);
        assert_eq!(snapshot.remaining(), 2);
    }

    #[test]
    fn test_next_partial_at_end() {
        let snapshot = abcd();
        snapshot.skip(3);

        let mut buf = ['-'; 5];
        let mut fetched = 0;
        let outcome = snapshot
            .next(5, Some(&mut buf[..]), Some(&mut fetched))
            .unwrap();

        assert_eq!(outcome, Outcome::Partial);
        assert_eq!(fetched, 1);
        assert_eq!(buf[0], 'D');
        assert_eq!(buf[1], '-');
        assert_eq!(snapshot.remaining(), 0);

        // exhausted: nothing copied, still not an error
        let outcome = snapshot
            .next(2, Some(&mut buf[..]), Some(&mut fetched))
            .unwrap();
        assert_eq!(outcome, Outcome::Partial);
        assert_eq!(fetched, 0);
    }

    #[test]
    fn test_next_single_without_fetched_slot() {
        let snapshot = abcd();
        let mut buf = ['-'; 1];

        assert_eq!(
            snapshot.next(1, Some(&mut buf[..]), None).unwrap(),
            Outcome::Complete
        );
        assert_eq!(buf[0], 'A');
        assert_eq!(snapshot.position(), 1);
    }

    #[test]
    fn test_next_many_without_fetched_slot_rejected() {
        let snapshot = abcd();
        snapshot.skip(1);
        let mut buf = ['-'; 4];

        let result = snapshot.next(2, Some(&mut buf[..]), None);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert_eq!(snapshot.position(), 1);
        assert_eq!(buf, ['-'; 4]);
    }

    #[test]
    fn test_next_zero_requested() {
        let snapshot = abcd();
        let mut fetched = 7;

        assert_eq!(
            snapshot.next(0, None, Some(&mut fetched)).unwrap(),
            Outcome::Complete
        );
        assert_eq!(fetched, 0);
        assert_eq!(snapshot.next(0, None, None).unwrap(), Outcome::Complete);
        assert_eq!(snapshot.position(), 0);
    }

    #[test]
    fn test_next_missing_buffer_rejected() {
        let snapshot = abcd();
        let mut fetched = 7;

        let result = snapshot.next(1, None, Some(&mut fetched));
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert_eq!(fetched, 7);
        assert_eq!(snapshot.position(), 0);
    }

    #[test]
    fn test_next_short_buffer_rejected() {
        let snapshot = abcd();
        let mut buf = ['-'; 1];
        let mut fetched = 0;

        let result = snapshot.next(3, Some(&mut buf[..]), Some(&mut fetched));
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert_eq!(snapshot.position(), 0);
    }

    #[test]
    fn test_skip_clamps_to_end() {
        let snapshot = abcd();

        assert_eq!(snapshot.skip(1), Outcome::Complete);
        assert_eq!(snapshot.remaining(), 3);
        assert_eq!(snapshot.skip(u32::MAX), Outcome::Partial);
        assert_eq!(snapshot.remaining(), 0);
        assert_eq!(snapshot.position(), 4);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let snapshot = abcd();
        snapshot.skip(3);
        snapshot.reset();
        assert_eq!(snapshot.remaining(), 4);
        snapshot.reset();
        assert_eq!(snapshot.remaining(), 4);
    }

    #[test]
    fn test_get_count_requires_slot() {
        let snapshot = abcd();
        snapshot.skip(1);

        let mut count = 0;
        snapshot.get_count(Some(&mut count)).unwrap();
        assert_eq!(count, 3);

        assert!(matches!(
            snapshot.get_count(None),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_clone_copies_full_sequence() {
        let snapshot = abcd();
        snapshot.skip(3);

        let copy = snapshot.try_clone().unwrap();
        assert_eq!(copy.position(), 0);
        assert_eq!(copy.remaining(), 4);
        assert_eq!(copy.as_slice(), snapshot.as_slice());

        copy.skip(2);
        assert_eq!(snapshot.position(), 3);
        assert_eq!(copy.position(), 2);
    }

    #[test]
    fn test_from_vec_starts_at_zero() {
        let snapshot = Snapshot::from_vec(vec![5u8, 6]).unwrap();
        assert_eq!(snapshot.position(), 0);
        assert_eq!(snapshot.len(), 2);
    }
}
