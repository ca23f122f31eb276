use crate::list::List;
use log::trace;
use std::thread;

/// An iterator over the list from front to back. It is constructed
/// from the [`iter`] method on `List`, and can be reversed.
///
/// The walk is bounded by the length of the list when the iterator was
/// created.
///
/// [`iter`]: struct.List.html#method.iter
pub struct Iter<'l, T> {
    target: &'l List<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'l, T> Iter<'l, T> {
    pub(crate) fn new(target: &'l List<T>, front: usize, back: usize, remaining: usize) -> Self {
        Self {
            target,
            front,
            back,
            remaining,
        }
    }
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        if 0 == self.remaining {
            return None;
        }

        let ix = self.front;
        self.front = self.target.store.next[ix];
        self.remaining -= 1;
        self.target.store.data[ix].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'l, T> DoubleEndedIterator for Iter<'l, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if 0 == self.remaining {
            return None;
        }

        let ix = self.back;
        self.back = self.target.store.prev[ix];
        self.remaining -= 1;
        self.target.store.data[ix].as_ref()
    }
}

impl<'l, T> ExactSizeIterator for Iter<'l, T> {}

/// A draining iterator over the list starting from the front. It is
/// constructed from the [`drain`] method on `List`.
///
/// [`drain`]: struct.List.html#method.drain
pub struct Drain<'l, T> {
    target: &'l mut List<T>,
    drained: usize,
}

impl<'l, T> Drain<'l, T> {
    pub(crate) fn new(target: &'l mut List<T>) -> Self {
        Self { target, drained: 0 }
    }
}

impl<'l, T> Iterator for Drain<'l, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.target.is_empty() {
            None
        } else {
            let ix = self.target.begin().index();
            if !self.target.store.is_live(ix) {
                return None;
            }
            let value = self.target.unlink(ix)?;
            self.drained += 1;
            Some(value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.target.len(), Some(self.target.len()))
    }
}

impl<'l, T> ExactSizeIterator for Drain<'l, T> {}

impl<'l, T> Drop for Drain<'l, T> {
    fn drop(&mut self) {
        while self.next().is_some() {}
        trace!("drain: removed {}", self.drained);

        // A second panic while unwinding would abort.
        if !thread::panicking() {
            self.target.check_after("drain");
        }
    }
}
