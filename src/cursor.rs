use crate::error::Error;
use crate::handle::Handle;
use crate::list::List;
use crate::store::SENTINEL;

// The slot `links` points to from `focus`. Unallocated arrays have no
// links, so the focus stays on the sentinel.
fn step(links: &[usize], focus: usize) -> usize {
    links.get(focus).copied().unwrap_or(SENTINEL)
}

/// A movable cursor over a `List`. It is constructed from the
/// [`cursor`] method on `List`.
///
/// The cursor may rest on the sentinel, which sits between the back
/// and the front of the list. Moving past either end lands there, and
/// moving once more wraps around.
///
/// [`cursor`]: struct.List.html#method.cursor
pub struct Cursor<'l, T> {
    target: &'l List<T>,
    focus: usize,
}

impl<'l, T> Cursor<'l, T> {
    pub(crate) fn new(target: &'l List<T>, focus: usize) -> Self {
        Self { target, focus }
    }

    /// Return a reference to the focused value, or `None` when the
    /// cursor rests on the sentinel.
    pub fn current(&self) -> Option<&'l T> {
        self.target.get(Handle(self.focus))
    }

    /// Return the handle of the current focus.
    pub fn handle(&self) -> Handle {
        Handle(self.focus)
    }

    /// Move the cursor towards the back of the list and return the new
    /// focus.
    pub fn move_next(&mut self) -> Option<&'l T> {
        self.focus = step(&self.target.store.next, self.focus);
        self.current()
    }

    /// Move the cursor towards the front of the list and return the
    /// new focus.
    pub fn move_prev(&mut self) -> Option<&'l T> {
        self.focus = step(&self.target.store.prev, self.focus);
        self.current()
    }

    /// Return a reference to the value after the focus without moving.
    /// `None` when the focus is the back of the list.
    pub fn peek_next(&self) -> Option<&'l T> {
        self.target.get(Handle(step(&self.target.store.next, self.focus)))
    }

    /// Return a reference to the value before the focus without
    /// moving. `None` when the focus is the front of the list.
    pub fn peek_prev(&self) -> Option<&'l T> {
        self.target.get(Handle(step(&self.target.store.prev, self.focus)))
    }
}

/// A movable cursor over a `List` that can change it. It is
/// constructed from the [`cursor_mut`] method on `List`.
///
/// Insertions and removals go through the list's own operations, so
/// they are checked the same way.
///
/// [`cursor_mut`]: struct.List.html#method.cursor_mut
pub struct CursorMut<'l, T> {
    target: &'l mut List<T>,
    focus: usize,
}

impl<'l, T> CursorMut<'l, T> {
    pub(crate) fn new(target: &'l mut List<T>, focus: usize) -> Self {
        Self { target, focus }
    }

    /// Return a mutable reference to the focused value, or `None` when
    /// the cursor rests on the sentinel.
    pub fn current(&mut self) -> Option<&mut T> {
        self.target.get_mut(Handle(self.focus))
    }

    /// Return the handle of the current focus.
    pub fn handle(&self) -> Handle {
        Handle(self.focus)
    }

    /// Move the cursor towards the back of the list and return the new
    /// focus.
    pub fn move_next(&mut self) -> Option<&mut T> {
        self.focus = step(&self.target.store.next, self.focus);
        self.current()
    }

    /// Move the cursor towards the front of the list and return the
    /// new focus.
    pub fn move_prev(&mut self) -> Option<&mut T> {
        self.focus = step(&self.target.store.prev, self.focus);
        self.current()
    }

    /// Insert `value` after the focus. The cursor remains unmoved.
    #[track_caller]
    pub fn insert_after(&mut self, value: T) -> Result<Handle, Error> {
        self.target.insert_after(value, Handle(self.focus))
    }

    /// Insert `value` before the focus. The cursor remains unmoved.
    #[track_caller]
    pub fn insert_before(&mut self, value: T) -> Result<Handle, Error> {
        self.target.insert_before(value, Handle(self.focus))
    }

    /// Remove the focused value and move the focus to the slot that
    /// followed it. Returns `None` when the cursor rests on the
    /// sentinel.
    #[track_caller]
    pub fn remove_current(&mut self) -> Result<Option<T>, Error> {
        if SENTINEL == self.focus {
            return Ok(None);
        }

        let next = step(&self.target.store.next, self.focus);
        let value = self.target.delete_at(Handle(self.focus))?;
        self.focus = next;
        Ok(Some(value))
    }

    /// If the focus is not the back of the list, remove the value
    /// after the focus and return it.
    #[track_caller]
    pub fn remove_next(&mut self) -> Result<Option<T>, Error> {
        match step(&self.target.store.next, self.focus) {
            SENTINEL => Ok(None),
            next => self.target.delete_at(Handle(next)).map(Some),
        }
    }

    /// If the focus is not the front of the list, remove the value
    /// before the focus and return it.
    #[track_caller]
    pub fn remove_prev(&mut self) -> Result<Option<T>, Error> {
        match step(&self.target.store.prev, self.focus) {
            SENTINEL => Ok(None),
            prev => self.target.delete_at(Handle(prev)).map(Some),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{Checks, Config};
    use crate::snapshot::RawParts;

    #[test]
    fn cursor_can_navigate() {
        let mut l = List::new();
        l.push_back(1u8).unwrap();
        let h = l.push_back(2u8).unwrap();
        l.push_back(3u8).unwrap();

        let mut c = l.cursor(h).unwrap();
        assert_eq!(Some(&2), c.current());

        assert_eq!(Some(&1), c.move_prev());
        assert_eq!(None, c.move_prev());
        assert!(c.handle().is_sentinel());

        assert_eq!(Some(&1), c.move_next());
        assert_eq!(Some(&2), c.move_next());
        assert_eq!(Some(&3), c.move_next());
        assert_eq!(None, c.peek_next());
        assert_eq!(Some(&2), c.peek_prev());
        assert_eq!(None, c.move_next());

        // Wraps around through the sentinel.
        assert_eq!(Some(&1), c.move_next());
    }

    #[test]
    fn cursor_can_return_a_handle() {
        let mut l = List::new();
        l.push_back(1u8).unwrap();
        let h = l.push_back(2u8).unwrap();
        l.push_back(3u8).unwrap();

        let mut c = l.cursor(h).unwrap();
        c.move_prev();
        let h = c.handle();
        assert_eq!(Some(&1), l.get(h));
    }

    #[test]
    fn cursor_rejects_free_slots() {
        let mut l = List::new();
        let h = l.push_back(1u8).unwrap();
        l.delete_at(h).unwrap();

        assert!(l.cursor(h).is_none());
        assert!(l.cursor_mut(h).is_none());
        assert!(l.cursor(Handle::SENTINEL).is_some());
    }

    #[test]
    fn cursor_front_and_back() {
        let l: List<u8> = (1..=3).collect();

        let mut c = l.cursor_front();
        assert_eq!(Some(&1), c.current());
        assert_eq!(Some(&2), c.move_next());

        let mut c = l.cursor_back();
        assert_eq!(Some(&3), c.current());
        assert_eq!(Some(&2), c.move_prev());

        let e: List<u8> = List::new();
        assert_eq!(None, e.cursor_front().current());
    }

    #[test]
    fn cursormut_can_navigate_and_modify() {
        let mut l = List::new();
        l.push_back(1u8).unwrap();
        let h = l.push_back(2u8).unwrap();
        l.push_back(3u8).unwrap();

        let mut c = l.cursor_mut(h).unwrap();
        assert_eq!(Some(&mut 2), c.current());

        assert_eq!(Some(&mut 3), c.move_next());
        if let Some(v) = c.current() {
            *v = 30;
        }
        assert_eq!(Some(&mut 2), c.move_prev());

        assert_eq!(vec![&1, &2, &30], l.iter().collect::<Vec<&u8>>());
    }

    #[test]
    fn cursormut_insert_before_and_after() {
        let mut l = List::new();
        l.push_back(1u8).unwrap();
        let h = l.push_back(2u8).unwrap();
        l.push_back(3u8).unwrap();

        let mut c = l.cursor_mut(h).unwrap();
        c.insert_before(10).unwrap();
        c.insert_after(20).unwrap();
        assert_eq!(h, c.handle());

        assert_eq!(
            vec![&1, &10, &2, &20, &3],
            l.iter().collect::<Vec<&u8>>()
        );
    }

    #[test]
    fn cursormut_remove_neighbours() {
        let mut l: List<u8> = (1..=5).collect();
        let h = l.find(&3).unwrap();

        let mut c = l.cursor_mut(h).unwrap();

        assert_eq!(Ok(Some(2)), c.remove_prev());
        assert_eq!(Ok(Some(1)), c.remove_prev());
        assert_eq!(Ok(None), c.remove_prev());
        assert_eq!(Ok(Some(4)), c.remove_next());
        assert_eq!(Ok(Some(5)), c.remove_next());
        assert_eq!(Ok(None), c.remove_next());

        assert_eq!(vec![&3], l.iter().collect::<Vec<&u8>>());
        assert_eq!(Ok(()), l.verify());
    }

    #[test]
    fn cursormut_remove_current_advances() {
        let mut l: List<u8> = (1..=3).collect();

        let mut c = l.cursor_front_mut();
        assert_eq!(Ok(Some(1)), c.remove_current());
        assert_eq!(Some(&mut 2), c.current());
        assert_eq!(Ok(Some(2)), c.remove_current());
        assert_eq!(Ok(Some(3)), c.remove_current());
        assert!(c.handle().is_sentinel());
        assert_eq!(Ok(None), c.remove_current());

        assert!(l.is_empty());
    }

    #[test]
    fn cursor_back_mut_on_empty_list_inserts_at_both_ends() {
        let mut l = List::new();

        let mut c = l.cursor_back_mut();
        c.insert_after(1u8).unwrap();
        c.insert_before(3u8).unwrap();
        c.move_next();
        c.insert_after(2u8).unwrap();

        assert_eq!(vec![&1, &2, &3], l.iter().collect::<Vec<&u8>>());
    }

    fn unallocated() -> List<u8> {
        let parts = RawParts {
            data: vec![],
            next: vec![],
            prev: vec![],
            size: 0,
            free_head: 0,
        };
        List::from_raw_parts_unchecked(parts, Config::new().checks(Checks::Off))
    }

    #[test]
    fn cursor_on_unallocated_list_stays_on_the_sentinel() {
        let l = unallocated();

        let mut c = l.cursor_front();
        assert_eq!(None, c.move_next());
        assert_eq!(None, c.move_prev());
        assert_eq!(None, c.peek_next());
        assert_eq!(None, c.peek_prev());
        assert!(c.handle().is_sentinel());
    }

    #[test]
    fn cursormut_on_unallocated_list_removes_nothing() {
        let mut l = unallocated();

        let mut c = l.cursor_back_mut();
        assert_eq!(None, c.move_next());
        assert_eq!(Ok(None), c.remove_next());
        assert_eq!(Ok(None), c.remove_prev());
        assert_eq!(Ok(None), c.remove_current());
        assert_eq!(
            Err(Error::OutOfBounds {
                slot: 0,
                capacity: 0
            }),
            c.insert_after(1)
        );
    }
}
