//! The allocator for slots. Unused slots are chained through the same
//! `next` array the list uses, starting from `free_head`, and the
//! sentinel terminates the chain.

use crate::error::Error;
use crate::list::List;
use crate::store::{NONE, SENTINEL};
use log::debug;

impl<T> List<T> {
    /// Pops a slot off the free chain, doubling the capacity first if
    /// the chain is empty. The returned slot is on neither chain until
    /// the caller links it.
    pub(crate) fn allocate(&mut self) -> Result<usize, Error> {
        if SENTINEL == self.free_head {
            let old = self.store.capacity();
            if 0 == old {
                return Err(Error::NullField);
            }
            let new = old
                .checked_mul(2)
                .ok_or(Error::AllocationFailure { requested: usize::MAX })?;

            self.store.grow(new)?;
            self.free_head = old;
            debug!("grow: capacity {} -> {}", old, new);
        }

        let ix = self.free_head;
        self.free_head = self.store.next[ix];
        Ok(ix)
    }

    /// Pushes `ix` onto the head of the free chain. The slot's data is
    /// left alone; only its own links are reset.
    pub(crate) fn release(&mut self, ix: usize) {
        debug_assert_ne!(SENTINEL, ix);

        self.store.next[ix] = self.free_head;
        self.store.prev[ix] = NONE;
        self.free_head = ix;
    }

    /// The number of slots that can be filled before the list grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_list::List;
    ///
    /// let mut l = List::with_capacity(8);
    /// assert_eq!(7, l.free_len());
    ///
    /// let h = l.push_front(1).unwrap();
    /// assert_eq!(6, l.free_len());
    ///
    /// l.delete_at(h).unwrap();
    /// assert_eq!(7, l.free_len());
    /// ```
    pub fn free_len(&self) -> usize {
        self.store.capacity().saturating_sub(self.size + 1)
    }
}
