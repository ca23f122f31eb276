use crate::config::{Checks, Config};
use crate::cursor::{Cursor, CursorMut};
use crate::error::{Error, Violation};
use crate::handle::Handle;
use crate::iterators::{Drain, Iter};
use crate::snapshot::{RawParts, Snapshot};
use crate::store::{self, Store, NONE, SENTINEL};
use crate::verify;
use log::{debug, error, trace, warn};
use std::fmt;
use std::iter::{self, FromIterator};
use std::panic::Location;

/// A doubly-linked list whose nodes live in flat arrays and link to
/// each other by index.
///
/// Slot 0 is a sentinel: its `next` is the front of the list and its
/// `prev` is the back, so the list is a ring through the sentinel.
/// Unused slots are chained through the same `next` array and reused
/// last-in first-out. When no free slot remains the arrays double in
/// size.
#[derive(Clone)]
pub struct List<T> {
    pub(crate) store: Store<T>,
    // Head of the free chain. SENTINEL when no slot is free.
    pub(crate) free_head: usize,
    // The number of slots holding elements.
    pub(crate) size: usize,
    checks: Checks,
}

impl<T> fmt::Debug for List<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> List<T> {
        List::new()
    }
}

impl<T> List<T> {
    /// Creates an empty `List` with the minimum capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{List, MIN_CAPACITY};
    ///
    /// let list: List<u32> = List::new();
    /// assert_eq!(MIN_CAPACITY, list.capacity());
    /// ```
    pub fn new() -> List<T> {
        List::with_config(Config::default())
    }

    /// Creates an empty `List` with `capacity` slots, the sentinel
    /// included. Capacities below [`MIN_CAPACITY`] are raised.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let list: List<u32> = List::with_capacity(16);
    /// assert_eq!(16, list.capacity());
    ///
    /// let list: List<u32> = List::with_capacity(2);
    /// assert_eq!(5, list.capacity());
    /// ```
    ///
    /// [`MIN_CAPACITY`]: constant.MIN_CAPACITY.html
    pub fn with_capacity(capacity: usize) -> List<T> {
        List::with_config(Config::new().initial_capacity(capacity))
    }

    /// Create an empty list from a `Config`: its initial capacity and
    /// how mutations are checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Checks, Config, List};
    ///
    /// let l: List<u8> = List::with_config(Config::new().checks(Checks::Report));
    /// assert_eq!(Checks::Report, l.checks());
    /// ```
    pub fn with_config(config: Config) -> List<T> {
        let capacity = config.effective_capacity();
        List {
            store: Store::new(capacity),
            free_head: if capacity > 1 { 1 } else { SENTINEL },
            size: 0,
            checks: config.checks,
        }
    }

    /// Reassembles a list from its arrays, verifying them first.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Config, Error, List};
    ///
    /// let l: List<u8> = vec![1, 2].into_iter().collect();
    /// let mut parts = l.into_raw_parts();
    ///
    /// let l = List::from_raw_parts(parts.clone(), Config::new()).unwrap();
    /// assert_eq!(vec![&1, &2], l.iter().collect::<Vec<_>>());
    ///
    /// parts.size = 3;
    /// assert!(matches!(
    ///     List::from_raw_parts(parts, Config::new()),
    ///     Err(Error::CorruptedStructure(_))
    /// ));
    /// ```
    pub fn from_raw_parts(parts: RawParts<T>, config: Config) -> Result<List<T>, Error> {
        verify::verify(&parts.snapshot())?;
        Ok(List::from_raw_parts_unchecked(parts, config))
    }

    /// Reassembles a list from its arrays without verifying them.
    ///
    /// A corrupt structure cannot cause undefined behaviour, but with
    /// `Checks::Off` the operations on it may panic or produce
    /// nonsense. Call [`verify`] to find out.
    ///
    /// [`verify`]: #method.verify
    pub fn from_raw_parts_unchecked(parts: RawParts<T>, config: Config) -> List<T> {
        let RawParts {
            data,
            next,
            prev,
            size,
            free_head,
        } = parts;

        List {
            store: Store { data, next, prev },
            free_head,
            size,
            checks: config.checks,
        }
    }

    /// Takes the list apart into its arrays.
    pub fn into_raw_parts(self) -> RawParts<T> {
        let List {
            store: Store { data, next, prev },
            free_head,
            size,
            ..
        } = self;

        RawParts {
            data,
            next,
            prev,
            size,
            free_head,
        }
    }

    /// A read-only view of the backing arrays.
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            data: &self.store.data,
            next: &self.store.next,
            prev: &self.store.prev,
            capacity: self.store.capacity(),
            size: self.size,
            free_head: self.free_head,
        }
    }

    /// Check every structural invariant and return the first one that
    /// does not hold. This runs regardless of the configured
    /// [`Checks`].
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Checks, Config, List, Violation};
    ///
    /// let mut l = List::with_config(Config::new().checks(Checks::Report));
    /// let a = l.push_back(1).unwrap();
    /// l.push_back(2).unwrap();
    /// assert_eq!(Ok(()), l.verify());
    ///
    /// let mut parts = l.into_raw_parts();
    /// parts.next[a.index()] = a.index();
    /// let l = List::from_raw_parts_unchecked(parts, Config::new().checks(Checks::Report));
    ///
    /// assert_eq!(Err(Violation::InfiniteLoop { slot: a.index() }), l.verify());
    /// ```
    ///
    /// [`Checks`]: enum.Checks.html
    pub fn verify(&self) -> Result<(), Violation> {
        verify::verify(&self.snapshot())
    }

    /// How mutations verify the list.
    pub fn checks(&self) -> Checks {
        self.checks
    }

    /// Change how later mutations verify the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Checks, List};
    ///
    /// let mut l: List<u8> = List::new();
    /// l.set_checks(Checks::Off);
    /// assert_eq!(Checks::Off, l.checks());
    /// ```
    pub fn set_checks(&mut self, checks: Checks) {
        self.checks = checks;
    }

    /// The number of slots in the backing arrays, the sentinel
    /// included.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// The number of elements in the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::new();
    ///
    /// l.push_front(1).unwrap();
    /// l.push_back(2).unwrap();
    /// assert_eq!(2, l.len());
    ///
    /// l.pop_front().unwrap();
    /// assert_eq!(1, l.len());
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        0 == self.size
    }

    /// Insert `value` right after the slot `after`. Passing
    /// [`Handle::SENTINEL`] inserts at the front. Returns the handle
    /// of the new slot, which stays valid until that slot is deleted
    /// or the list is linearized.
    ///
    /// Fails with `OutOfBounds` if `after` is neither the sentinel nor
    /// a live slot, and with `AllocationFailure` if the list had to
    /// grow and could not. On failure the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Handle, List};
    ///
    /// let mut l = List::new();
    /// let a = l.insert_after(10, Handle::SENTINEL).unwrap();
    /// l.insert_after(20, a).unwrap();
    /// l.insert_after(5, Handle::SENTINEL).unwrap();
    ///
    /// assert_eq!(vec![&5, &10, &20], l.iter().collect::<Vec<_>>());
    /// ```
    ///
    /// [`Handle::SENTINEL`]: struct.Handle.html#associatedconstant.SENTINEL
    #[track_caller]
    pub fn insert_after(&mut self, value: T, after: Handle) -> Result<Handle, Error> {
        self.check_before("insert_after")?;
        let after = self.require_linked(after, "insert_after")?;

        let ix = self.allocate()?;
        self.link_after(ix, after, value);
        trace!(
            "insert_after: slot {} after {}, size {}",
            ix,
            after,
            self.size
        );

        self.check_after("insert_after");
        Ok(Handle(ix))
    }

    /// Insert `value` right before the slot `before`. Passing
    /// [`Handle::SENTINEL`] inserts at the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Handle, List};
    ///
    /// let mut l = List::new();
    /// let b = l.insert_before(20, Handle::SENTINEL).unwrap();
    /// l.insert_before(10, b).unwrap();
    /// l.insert_before(30, Handle::SENTINEL).unwrap();
    ///
    /// assert_eq!(vec![&10, &20, &30], l.iter().collect::<Vec<_>>());
    /// ```
    ///
    /// [`Handle::SENTINEL`]: struct.Handle.html#associatedconstant.SENTINEL
    #[track_caller]
    pub fn insert_before(&mut self, value: T, before: Handle) -> Result<Handle, Error> {
        self.check_before("insert_before")?;
        let before = self.require_linked(before, "insert_before")?;
        let after = self.store.prev[before];

        let ix = self.allocate()?;
        self.link_after(ix, after, value);
        trace!(
            "insert_before: slot {} before {}, size {}",
            ix,
            before,
            self.size
        );

        self.check_after("insert_before");
        Ok(Handle(ix))
    }

    /// Remove the element in `slot` and return it. The slot goes onto
    /// the free chain and is the next one handed out.
    ///
    /// Fails with `OutOfBounds` for the sentinel or a slot that does
    /// not hold an element. On failure the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Error, List};
    ///
    /// let mut l = List::new();
    /// let h = l.push_back(10).unwrap();
    ///
    /// assert_eq!(Ok(10), l.delete_at(h));
    /// assert!(matches!(l.delete_at(h), Err(Error::OutOfBounds { .. })));
    /// ```
    #[track_caller]
    pub fn delete_at(&mut self, slot: Handle) -> Result<T, Error> {
        self.check_before("delete_at")?;
        let ix = self.require_live(slot, "delete_at")?;

        let value = self.unlink(ix).ok_or_else(|| {
            Error::CorruptedStructure(Violation::EmptyLiveSlot { slot: ix })
        })?;
        trace!("delete_at: slot {}, size {}", ix, self.size);

        self.check_after("delete_at");
        Ok(value)
    }

    /// The slot after `slot`. The sentinel follows the last element,
    /// and the first element follows the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Handle, List};
    ///
    /// let mut l = List::new();
    /// let a = l.push_back(1).unwrap();
    /// let b = l.push_back(2).unwrap();
    ///
    /// assert_eq!(Ok(a), l.next(Handle::SENTINEL));
    /// assert_eq!(Ok(b), l.next(a));
    /// assert_eq!(Ok(Handle::SENTINEL), l.next(b));
    /// ```
    #[track_caller]
    pub fn next(&self, slot: Handle) -> Result<Handle, Error> {
        let ix = self.require_linked(slot, "next")?;
        Ok(Handle(self.store.next[ix]))
    }

    /// The slot before `slot`. The sentinel precedes the first
    /// element, and the last element precedes the sentinel.
    #[track_caller]
    pub fn prev(&self, slot: Handle) -> Result<Handle, Error> {
        let ix = self.require_linked(slot, "prev")?;
        Ok(Handle(self.store.prev[ix]))
    }

    /// The slot of the first element, or the sentinel when empty.
    pub fn begin(&self) -> Handle {
        Handle(self.store.next.get(SENTINEL).copied().unwrap_or(SENTINEL))
    }

    /// The slot of the last element, or the sentinel when empty.
    pub fn end(&self) -> Handle {
        Handle(self.store.prev.get(SENTINEL).copied().unwrap_or(SENTINEL))
    }

    /// Get a reference to the element in `slot`. Returns `None` for the
    /// sentinel and for slots without an element.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::new();
    /// let h = l.push_front(10).unwrap();
    /// assert_eq!(Some(&10), l.get(h));
    ///
    /// l.pop_front().unwrap();
    /// assert_eq!(None, l.get(h));
    /// ```
    pub fn get(&self, slot: Handle) -> Option<&T> {
        if self.store.is_live(slot.0) {
            self.store.data.get(slot.0)?.as_ref()
        } else {
            None
        }
    }

    /// Get a mutable reference to the element in `slot`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::new();
    /// let h = l.push_front(10).unwrap();
    ///
    /// if let Some(v) = l.get_mut(h) {
    ///     *v += 10;
    /// }
    ///
    /// assert_eq!(Some(&20), l.get(h));
    /// ```
    pub fn get_mut(&mut self, slot: Handle) -> Option<&mut T> {
        if self.store.is_live(slot.0) {
            self.store.data.get_mut(slot.0)?.as_mut()
        } else {
            None
        }
    }

    /// True if `slot` currently holds an element.
    pub fn contains(&self, slot: Handle) -> bool {
        self.store.is_live(slot.0)
    }

    /// Get the first element, or `None` if the list is empty.
    pub fn front(&self) -> Option<&T> {
        self.get(self.begin())
    }

    /// Get a mutable reference to the first element, or `None` if the
    /// list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l: List<u8> = vec![1, 2].into_iter().collect();
    /// if let Some(v) = l.front_mut() {
    ///     *v = 10;
    /// }
    /// assert_eq!(Some(&10), l.front());
    /// ```
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.begin())
    }

    /// Get the last element, or `None` if the list is empty.
    pub fn back(&self) -> Option<&T> {
        self.get(self.end())
    }

    /// Get a mutable reference to the last element, or `None` if the
    /// list is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.end())
    }

    /// Insert `value` at the front of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::new();
    /// let h = l.push_front(10).unwrap();
    ///
    /// assert_eq!(Some(&10), l.get(h));
    /// assert_eq!(Ok(10), l.delete_at(h));
    /// ```
    #[track_caller]
    pub fn push_front(&mut self, value: T) -> Result<Handle, Error> {
        self.insert_after(value, Handle::SENTINEL)
    }

    /// Insert `value` at the back of the list.
    #[track_caller]
    pub fn push_back(&mut self, value: T) -> Result<Handle, Error> {
        self.insert_before(value, Handle::SENTINEL)
    }

    /// Remove the first element and return it, or `None` if the list
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::new();
    /// l.push_back(10).unwrap();
    /// l.push_back(20).unwrap();
    ///
    /// assert_eq!(Ok(Some(10)), l.pop_front());
    /// assert_eq!(Ok(Some(20)), l.pop_front());
    /// assert_eq!(Ok(None), l.pop_front());
    /// ```
    #[track_caller]
    pub fn pop_front(&mut self) -> Result<Option<T>, Error> {
        if self.is_empty() {
            Ok(None)
        } else {
            self.delete_at(self.begin()).map(Some)
        }
    }

    /// Remove the last element and return it, or `None` if the list is
    /// empty.
    #[track_caller]
    pub fn pop_back(&mut self) -> Result<Option<T>, Error> {
        if self.is_empty() {
            Ok(None)
        } else {
            self.delete_at(self.end()).map(Some)
        }
    }

    /// The slot of the first element equal to `value`, searching from
    /// the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::new();
    /// l.push_back(1).unwrap();
    /// let h = l.push_back(2).unwrap();
    ///
    /// assert_eq!(Some(h), l.find(&2));
    /// assert_eq!(None, l.find(&3));
    /// ```
    pub fn find(&self, value: &T) -> Option<Handle>
    where
        T: PartialEq,
    {
        let mut ix = self.begin().0;
        for _ in 0..self.size {
            if self.store.data.get(ix)?.as_ref() == Some(value) {
                return Some(Handle(ix));
            }
            ix = *self.store.next.get(ix)?;
        }
        None
    }

    /// Remove every element. The capacity is kept and every slot goes
    /// back onto the free chain.
    #[track_caller]
    pub fn clear(&mut self) -> Result<(), Error> {
        self.check_before("clear")?;
        if 0 == self.store.capacity() {
            return Err(Error::NullField);
        }

        self.store.reset();
        self.free_head = if self.store.capacity() > 1 { 1 } else { SENTINEL };
        self.size = 0;
        trace!("clear: capacity {}", self.store.capacity());

        self.check_after("clear");
        Ok(())
    }

    /// Rebuild the backing arrays with no free slots: the capacity
    /// becomes `len() + 1` and the element at position `i` (counting
    /// from 1) moves to slot `i`.
    ///
    /// **Every previously returned handle is invalidated.** Afterwards
    /// the handles are simply `1..=len()` in list order.
    ///
    /// The new arrays are allocated before anything is moved, so on
    /// `AllocationFailure` the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::{Handle, List};
    ///
    /// let mut l = List::new();
    /// let a = l.push_back(1).unwrap();
    /// l.push_back(2).unwrap();
    /// l.push_front(0).unwrap();
    /// l.delete_at(a).unwrap();
    ///
    /// l.linearize().unwrap();
    ///
    /// assert_eq!(3, l.capacity());
    /// assert_eq!(Some(&0), l.get(Handle::from_index(1)));
    /// assert_eq!(Some(&2), l.get(Handle::from_index(2)));
    /// ```
    #[track_caller]
    pub fn linearize(&mut self) -> Result<(), Error> {
        self.check_before("linearize")?;
        if 0 == self.store.capacity() {
            return Err(Error::NullField);
        }

        let size = self.size;
        let capacity = size
            .checked_add(1)
            .ok_or(Error::AllocationFailure { requested: usize::MAX })?;

        let mut data: Vec<Option<T>> = store::reserved(capacity)?;
        let mut next: Vec<usize> = store::reserved(capacity)?;
        let mut prev: Vec<usize> = store::reserved(capacity)?;

        data.push(None);
        let mut ix = self.store.next[SENTINEL];
        for _ in 0..size {
            data.push(self.store.data[ix].take());
            ix = self.store.next[ix];
        }
        next.extend((1..capacity).chain(iter::once(SENTINEL)));
        prev.extend(iter::once(size).chain(0..size));

        let old = self.store.capacity();
        self.store = Store { data, next, prev };
        self.free_head = SENTINEL;
        debug!("linearize: capacity {} -> {}", old, capacity);

        self.check_after("linearize");
        Ok(())
    }

    /// An iterator over the elements from front to back. It is double
    /// ended, so `.rev()` walks from the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::new();
    /// l.push_back(1).unwrap();
    /// l.push_back(2).unwrap();
    /// l.push_back(3).unwrap();
    ///
    /// assert_eq!(vec![&1, &2, &3], l.iter().collect::<Vec<_>>());
    /// assert_eq!(vec![&3, &2, &1], l.iter().rev().collect::<Vec<_>>());
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.begin().0, self.end().0, self.size)
    }

    /// A draining iterator from the front. All drained slots are moved
    /// onto the free list. Elements not consumed are dropped along
    /// with the iterator.
    ///
    /// The list is checked before draining starts and, with
    /// `Checks::Abort`, again when the iterator is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::with_capacity(8);
    /// l.push_back(1).unwrap();
    /// l.push_back(2).unwrap();
    ///
    /// assert_eq!(vec![1, 2], l.drain().unwrap().collect::<Vec<_>>());
    /// assert!(l.is_empty());
    /// assert_eq!(7, l.free_len());
    /// ```
    #[track_caller]
    pub fn drain(&mut self) -> Result<Drain<'_, T>, Error> {
        self.check_before("drain")?;
        Ok(Drain::new(self))
    }

    /// A cursor focused on `slot`, or `None` if `slot` is neither the
    /// sentinel nor a live slot.
    pub fn cursor(&self, slot: Handle) -> Option<Cursor<'_, T>> {
        if self.store.is_linked(slot.0) {
            Some(Cursor::new(self, slot.0))
        } else {
            None
        }
    }

    /// A cursor focused on the first element, or on the sentinel if
    /// the list is empty.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin().0)
    }

    /// A cursor focused on the last element, or on the sentinel if the
    /// list is empty.
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.end().0)
    }

    /// A mutable cursor focused on `slot`, or `None` if `slot` is
    /// neither the sentinel nor a live slot.
    pub fn cursor_mut(&mut self, slot: Handle) -> Option<CursorMut<'_, T>> {
        if self.store.is_linked(slot.0) {
            Some(CursorMut::new(self, slot.0))
        } else {
            None
        }
    }

    /// A mutable cursor focused on the first element, or on the
    /// sentinel if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l: List<u8> = vec![2, 3].into_iter().collect();
    /// l.cursor_front_mut().insert_before(1).unwrap();
    /// assert_eq!(vec![&1, &2, &3], l.iter().collect::<Vec<_>>());
    /// ```
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let focus = self.begin().0;
        CursorMut::new(self, focus)
    }

    /// A mutable cursor focused on the last element, or on the
    /// sentinel if the list is empty.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let focus = self.end().0;
        CursorMut::new(self, focus)
    }

    // Splices the allocated slot `ix` in between `after` and its
    // successor.
    fn link_after(&mut self, ix: usize, after: usize, value: T) {
        let next = self.store.next[after];

        self.store.data[ix] = Some(value);
        self.store.next[ix] = next;
        self.store.prev[ix] = after;
        self.store.prev[next] = ix;
        self.store.next[after] = ix;

        self.size += 1;
    }

    // Splices the live slot `ix` out of the ring and releases it. A
    // slot without a value is left untouched.
    pub(crate) fn unlink(&mut self, ix: usize) -> Option<T> {
        debug_assert!(self.store.is_live(ix));
        let value = self.store.data[ix].take()?;

        let prev = self.store.prev[ix];
        let next = self.store.next[ix];
        self.store.next[prev] = next;
        self.store.prev[next] = prev;

        self.release(ix);
        self.size -= 1;
        Some(value)
    }

    #[track_caller]
    fn require_linked(&self, slot: Handle, op: &'static str) -> Result<usize, Error> {
        if self.store.is_linked(slot.0) {
            Ok(slot.0)
        } else {
            Err(self.out_of_bounds(slot, op))
        }
    }

    #[track_caller]
    fn require_live(&self, slot: Handle, op: &'static str) -> Result<usize, Error> {
        if self.store.is_live(slot.0) {
            Ok(slot.0)
        } else {
            Err(self.out_of_bounds(slot, op))
        }
    }

    #[track_caller]
    fn out_of_bounds(&self, slot: Handle, op: &'static str) -> Error {
        let capacity = self.store.capacity();
        warn!(
            "{}: slot {} is not usable (capacity {}) at {}",
            op,
            slot.0,
            capacity,
            Location::caller()
        );
        Error::OutOfBounds {
            slot: slot.0,
            capacity,
        }
    }

    #[track_caller]
    fn check_before(&self, op: &'static str) -> Result<(), Error> {
        match self.checks {
            Checks::Off => Ok(()),
            Checks::Report => {
                let location = Location::caller();
                self.verify().map_err(|v| {
                    error!("{}: {} at {}", op, v, location);
                    Error::from(v)
                })
            }
            Checks::Abort => {
                if let Err(v) = self.verify() {
                    self.abort(op, &v);
                }
                Ok(())
            }
        }
    }

    #[track_caller]
    pub(crate) fn check_after(&self, op: &'static str) {
        if Checks::Abort == self.checks {
            if let Err(v) = self.verify() {
                self.abort(op, &v);
            }
        }
    }

    #[track_caller]
    fn abort(&self, op: &'static str, v: &Violation) -> ! {
        let location = Location::caller();
        error!(
            "{}: {} at {}\n{}",
            op,
            v,
            location,
            RawTable(self.snapshot())
        );
        panic!("{}: corrupted structure: {} at {}", op, v, location)
    }
}

// Renders the link arrays without requiring `T: Debug`.
struct RawTable<'l, T>(Snapshot<'l, T>);

impl<'l, T> fmt::Display for RawTable<'l, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.0;
        writeln!(
            f,
            "capacity {} size {} free {}",
            s.capacity, s.size, s.free_head
        )?;
        writeln!(f, "next {:?}", s.next)?;
        write!(f, "prev ")?;
        f.debug_list()
            .entries(s.prev.iter().map(|p| if NONE == *p { None } else { Some(*p) }))
            .finish()
    }
}

impl<T> FromIterator<T> for List<T> {
    /// Builds a list that is already linearized: the `i`-th element is
    /// in slot `i`.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut data: Vec<Option<T>> = iter::once(None).chain(iter.into_iter().map(Some)).collect();
        let size = data.len() - 1;
        let used = size + 1;
        let capacity = used.max(Config::default().effective_capacity());

        data.extend(iter::repeat_with(|| None).take(capacity - used));
        let next = (1..used)
            .chain(iter::once(SENTINEL))
            .chain((used + 1..capacity).chain(iter::once(SENTINEL)).take(capacity - used))
            .collect();
        let prev = iter::once(size)
            .chain(0..size)
            .chain(iter::repeat(NONE).take(capacity - used))
            .collect();

        List {
            store: Store { data, next, prev },
            free_head: if capacity > used { used } else { SENTINEL },
            size,
            checks: Checks::default(),
        }
    }
}

impl<'l, T> IntoIterator for &'l List<T> {
    type Item = &'l T;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Iter<'l, T> {
        self.iter()
    }
}
