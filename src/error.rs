use std::fmt;

/// Which of the two link arrays a [`Violation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Next,
    Prev,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Next => write!(f, "next"),
            LinkKind::Prev => write!(f, "prev"),
        }
    }
}

/// The first structural invariant found broken by [`List::verify`].
///
/// [`List::verify`]: struct.List.html#method.verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The arrays hold no slots at all, not even the sentinel.
    Unallocated,
    /// `data`, `next`, and `prev` do not have the same length.
    LengthMismatch { data: usize, next: usize, prev: usize },
    /// There are more live elements than non-sentinel slots.
    SizeExceedsCapacity { size: usize, capacity: usize },
    /// A stored link points outside `[0, capacity)`.
    BadLink {
        slot: usize,
        kind: LinkKind,
        link: usize,
        capacity: usize,
    },
    /// Following `next` from the sentinel revisits `slot`, or runs for
    /// more than `size + 1` steps, before returning to the sentinel.
    InfiniteLoop { slot: usize },
    /// Following `next` from the sentinel returns to it after visiting
    /// only `visited` live slots.
    BrokenLoop { visited: usize, size: usize },
    /// The free chain starts outside `[0, capacity)`.
    BadFreeHead { free_head: usize, capacity: usize },
    /// `slot` is linked into the list but holds no element.
    EmptyLiveSlot { slot: usize },
    /// `prev[next[slot]] != slot`.
    MismatchedLinks { slot: usize, next: usize, back: usize },
    /// The free chain revisits `slot`.
    FreeChainCycle { slot: usize },
    /// `slot` is reachable from the sentinel and from the free chain.
    LiveSlotInFreeChain { slot: usize },
    /// `slot` is reachable from the sentinel but marked free.
    FreeSlotInLiveChain { slot: usize },
    /// Live and free slots do not account for every non-sentinel slot.
    SlotCountMismatch {
        live: usize,
        free: usize,
        capacity: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unallocated => write!(f, "backing arrays are not allocated"),
            Violation::LengthMismatch { data, next, prev } => write!(
                f,
                "array lengths differ: data {} next {} prev {}",
                data, next, prev
            ),
            Violation::SizeExceedsCapacity { size, capacity } => {
                write!(f, "size {} exceeds capacity {}", size, capacity)
            }
            Violation::BadLink {
                slot,
                kind,
                link,
                capacity,
            } => write!(
                f,
                "{}[{}] = {} is outside capacity {}",
                kind, slot, link, capacity
            ),
            Violation::InfiniteLoop { slot } => {
                write!(f, "infinite next loop through slot {}", slot)
            }
            Violation::BrokenLoop { visited, size } => write!(
                f,
                "next loop is broken: reached {} of {} elements",
                visited, size
            ),
            Violation::BadFreeHead {
                free_head,
                capacity,
            } => write!(
                f,
                "free head {} is outside capacity {}",
                free_head, capacity
            ),
            Violation::EmptyLiveSlot { slot } => {
                write!(f, "linked slot {} holds no element", slot)
            }
            Violation::MismatchedLinks { slot, next, back } => write!(
                f,
                "next[{}] = {} but prev[{}] = {}",
                slot, next, next, back
            ),
            Violation::FreeChainCycle { slot } => {
                write!(f, "free chain revisits slot {}", slot)
            }
            Violation::LiveSlotInFreeChain { slot } => {
                write!(f, "live slot {} is on the free chain", slot)
            }
            Violation::FreeSlotInLiveChain { slot } => {
                write!(f, "free slot {} is linked into the list", slot)
            }
            Violation::SlotCountMismatch {
                live,
                free,
                capacity,
            } => write!(
                f,
                "{} live + {} free slots do not fill capacity {}",
                live, free, capacity
            ),
        }
    }
}

/// Errors returned by `List` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backing arrays could not be grown to `requested` slots. The
    /// list is unchanged.
    AllocationFailure { requested: usize },
    /// `slot` is outside `[0, capacity)` or does not refer to a slot
    /// of the kind the operation requires.
    OutOfBounds { slot: usize, capacity: usize },
    /// The verifier found the structure corrupt.
    CorruptedStructure(Violation),
    /// The list has no backing arrays.
    NullField,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure { requested } => {
                write!(f, "allocation of {} slots failed", requested)
            }
            Error::OutOfBounds { slot, capacity } => write!(
                f,
                "slot {} is out of bounds (capacity {})",
                slot, capacity
            ),
            Error::CorruptedStructure(v) => write!(f, "corrupted structure: {}", v),
            Error::NullField => write!(f, "backing arrays are not allocated"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Violation> for Error {
    fn from(v: Violation) -> Error {
        match v {
            Violation::Unallocated => Error::NullField,
            v => Error::CorruptedStructure(v),
        }
    }
}
