/// A handle referring to a slot in a `List`. It is returned by the
/// insertion methods and can be used to get, remove, or insert next
/// to the element stored in that slot.
///
/// A handle is only an index. It stays valid until the element it
/// refers to is deleted, or until [`linearize`] renumbers every
/// slot. Using a stale handle is not memory-unsafe: the list checks
/// every handle it is given and reports `OutOfBounds` for slots that
/// are not live. However, a slot that was freed and then reused by a
/// later insertion will be accepted and refer to the new element.
///
/// Handles deliberately do not implement arithmetic. Slot indices are
/// not positions in the list.
///
/// [`linearize`]: struct.List.html#method.linearize
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle(pub(crate) usize);

impl Handle {
    /// The guard slot. It stands for both "before the first element"
    /// and "after the last element".
    pub const SENTINEL: Handle = Handle(0);

    /// Build a handle from a raw slot index, for example one read
    /// back from a [`Snapshot`]. The index is bounds checked when the
    /// handle is used.
    ///
    /// [`Snapshot`]: struct.Snapshot.html
    pub fn from_index(ix: usize) -> Handle {
        Handle(ix)
    }

    /// The raw slot index.
    pub fn index(self) -> usize {
        self.0
    }

    /// True for the guard slot.
    pub fn is_sentinel(self) -> bool {
        self == Handle::SENTINEL
    }
}

impl From<Handle> for usize {
    fn from(h: Handle) -> usize {
        h.0
    }
}
