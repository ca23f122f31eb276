use crate::error::Error;
use std::iter;

/// Index of the guard slot.
pub(crate) const SENTINEL: usize = 0;
/// Stored in `prev` for slots on the free chain.
pub(crate) const NONE: usize = usize::MAX;

/// The three parallel arrays backing a `List`. Slot `i` is made of
/// `data[i]`, `next[i]`, and `prev[i]`.
#[derive(Clone)]
pub(crate) struct Store<T> {
    // `None` for free slots and for the sentinel.
    pub(crate) data: Vec<Option<T>>,
    // Live slots: the following slot. Free slots: the next free slot.
    pub(crate) next: Vec<usize>,
    // Live slots: the preceding slot. Free slots: NONE.
    pub(crate) prev: Vec<usize>,
}

impl<T> Store<T> {
    /// Builds `capacity` slots: an empty ring on the sentinel and an
    /// ascending free chain over the rest.
    pub(crate) fn new(capacity: usize) -> Store<T> {
        let mut s = Store {
            data: Vec::with_capacity(capacity),
            next: Vec::with_capacity(capacity),
            prev: Vec::with_capacity(capacity),
        };
        s.extend_free(capacity);
        s.next[SENTINEL] = SENTINEL;
        s.prev[SENTINEL] = SENTINEL;
        s
    }

    pub(crate) fn capacity(&self) -> usize {
        self.next.len()
    }

    /// True for slots that may be used as an insertion anchor: the
    /// sentinel, or a slot holding an element.
    pub(crate) fn is_linked(&self, ix: usize) -> bool {
        match self.prev.get(ix) {
            Some(_) if SENTINEL == ix => true,
            Some(p) => NONE != *p,
            None => false,
        }
    }

    /// True for slots holding an element.
    pub(crate) fn is_live(&self, ix: usize) -> bool {
        SENTINEL != ix && self.is_linked(ix)
    }

    /// Extends all three arrays to `new_capacity` slots. The new slots
    /// form an ascending free chain that ends at the sentinel; the
    /// caller points the free head at the old capacity.
    ///
    /// Every array is reserved before any is extended, so on failure
    /// the store is exactly as it was.
    pub(crate) fn grow(&mut self, new_capacity: usize) -> Result<(), Error> {
        let old = self.capacity();
        debug_assert!(new_capacity > old);
        let additional = new_capacity - old;

        reserve(&mut self.data, additional, new_capacity)?;
        reserve(&mut self.next, additional, new_capacity)?;
        reserve(&mut self.prev, additional, new_capacity)?;

        self.extend_free(new_capacity);
        Ok(())
    }

    /// Turns every non-sentinel slot into a free slot, dropping any
    /// values, and empties the ring.
    pub(crate) fn reset(&mut self) {
        let capacity = self.capacity();
        self.data.truncate(1);
        self.next.truncate(1);
        self.prev.truncate(1);
        self.extend_free(capacity);
        self.next[SENTINEL] = SENTINEL;
        self.prev[SENTINEL] = SENTINEL;
    }

    fn extend_free(&mut self, new_capacity: usize) {
        let old = self.capacity();
        if new_capacity <= old {
            return;
        }

        self.data.extend(iter::repeat_with(|| None).take(new_capacity - old));
        self.next
            .extend((old + 1..new_capacity).chain(iter::once(SENTINEL)));
        self.prev
            .extend(iter::repeat(NONE).take(new_capacity - old));
    }
}

fn reserve<V>(v: &mut Vec<V>, additional: usize, requested: usize) -> Result<(), Error> {
    v.try_reserve_exact(additional)
        .map_err(|_| Error::AllocationFailure { requested })
}

/// Reserves exactly `capacity` elements in a fresh vector.
pub(crate) fn reserved<V>(capacity: usize) -> Result<Vec<V>, Error> {
    let mut v = Vec::new();
    reserve(&mut v, capacity, capacity)?;
    Ok(v)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_store_chains_free_slots_in_order() {
        let s: Store<u8> = Store::new(5);
        assert_eq!(vec![0, 2, 3, 4, 0], s.next);
        assert_eq!(vec![0, NONE, NONE, NONE, NONE], s.prev);
        assert!(s.data.iter().all(Option::is_none));
    }

    #[test]
    fn grow_appends_an_ascending_free_chain() {
        let mut s: Store<u8> = Store::new(5);
        s.grow(10).unwrap();

        assert_eq!(10, s.capacity());
        assert_eq!(10, s.data.len());
        assert_eq!(&[6, 7, 8, 9, 0], &s.next[5..]);
        assert!(s.prev[5..].iter().all(|p| NONE == *p));
    }

    #[test]
    fn impossible_growth_reports_allocation_failure() {
        let mut s: Store<u64> = Store::new(5);
        let r = s.grow(usize::MAX / 2);

        assert_eq!(
            Err(Error::AllocationFailure {
                requested: usize::MAX / 2
            }),
            r
        );
        assert_eq!(5, s.capacity());
        assert_eq!(5, s.data.len());
        assert_eq!(5, s.prev.len());
    }

    #[test]
    fn linked_and_live_slots() {
        let mut s: Store<u8> = Store::new(5);
        assert!(s.is_linked(SENTINEL));
        assert!(!s.is_live(SENTINEL));
        assert!(!s.is_linked(1));
        assert!(!s.is_linked(5));

        s.prev[1] = SENTINEL;
        assert!(s.is_live(1));
    }

    #[test]
    fn reset_frees_everything() {
        let mut s: Store<u8> = Store::new(5);
        s.data[1] = Some(1);
        s.prev[1] = SENTINEL;
        s.next[SENTINEL] = 1;

        s.reset();

        assert_eq!(vec![0, 2, 3, 4, 0], s.next);
        assert!(s.data.iter().all(Option::is_none));
        assert!(!s.is_live(1));
    }
}
