//! Structural verification of the backing arrays.
//!
//! The checks run in a fixed order and stop at the first violation:
//!
//! 1. the arrays exist and have equal lengths,
//! 2. `size` fits and every stored link is in range,
//! 3. following `next` from the sentinel returns to it after exactly
//!    `size` live slots without revisiting any,
//! 4. `prev` mirrors `next` around the ring,
//! 5. the free chain is acyclic, disjoint from the ring, and together
//!    with the ring covers every slot.
//!
//! Every walk is bounded by the capacity, so a corrupt structure is
//! reported rather than looped over.

use crate::error::{LinkKind, Violation};
use crate::snapshot::Snapshot;
use crate::store::{NONE, SENTINEL};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Seen {
    Unseen,
    Live,
    Free,
}

pub(crate) fn verify<T>(s: &Snapshot<'_, T>) -> Result<(), Violation> {
    let capacity = s.next.len();

    if s.data.is_empty() || s.next.is_empty() || s.prev.is_empty() {
        return Err(Violation::Unallocated);
    }
    if s.data.len() != capacity || s.prev.len() != capacity {
        return Err(Violation::LengthMismatch {
            data: s.data.len(),
            next: capacity,
            prev: s.prev.len(),
        });
    }
    if s.size >= capacity {
        return Err(Violation::SizeExceedsCapacity {
            size: s.size,
            capacity,
        });
    }

    check_links(s, capacity)?;

    let mut seen = vec![Seen::Unseen; capacity];
    let live = walk_ring(s, &mut seen)?;
    check_mirrored(s)?;
    let free = walk_free_chain(s, &mut seen)?;

    if live + free != capacity - 1 {
        return Err(Violation::SlotCountMismatch {
            live,
            free,
            capacity,
        });
    }

    Ok(())
}

fn check_links<T>(s: &Snapshot<'_, T>, capacity: usize) -> Result<(), Violation> {
    if s.free_head >= capacity {
        return Err(Violation::BadFreeHead {
            free_head: s.free_head,
            capacity,
        });
    }

    if NONE == s.prev[SENTINEL] {
        return Err(Violation::FreeSlotInLiveChain { slot: SENTINEL });
    }

    for (slot, (&next, &prev)) in s.next.iter().zip(s.prev.iter()).enumerate() {
        if next >= capacity {
            return Err(Violation::BadLink {
                slot,
                kind: LinkKind::Next,
                link: next,
                capacity,
            });
        }
        if NONE != prev && prev >= capacity {
            return Err(Violation::BadLink {
                slot,
                kind: LinkKind::Prev,
                link: prev,
                capacity,
            });
        }
    }

    Ok(())
}

// Returns the number of live slots reached.
fn walk_ring<T>(s: &Snapshot<'_, T>, seen: &mut [Seen]) -> Result<usize, Violation> {
    seen[SENTINEL] = Seen::Live;

    let mut visited = 0;
    let mut ix = s.next[SENTINEL];

    while SENTINEL != ix {
        // Either a revisit, or more live slots than `size` claims.
        if Seen::Unseen != seen[ix] || visited == s.size {
            return Err(Violation::InfiniteLoop { slot: ix });
        }
        if NONE == s.prev[ix] {
            return Err(Violation::FreeSlotInLiveChain { slot: ix });
        }
        if s.data[ix].is_none() {
            return Err(Violation::EmptyLiveSlot { slot: ix });
        }

        seen[ix] = Seen::Live;
        visited += 1;
        ix = s.next[ix];
    }

    if visited < s.size {
        return Err(Violation::BrokenLoop {
            visited,
            size: s.size,
        });
    }

    Ok(visited)
}

// Only called once the ring is known to close on the sentinel.
fn check_mirrored<T>(s: &Snapshot<'_, T>) -> Result<(), Violation> {
    let mut ix = SENTINEL;
    loop {
        let next = s.next[ix];
        if s.prev[next] != ix {
            return Err(Violation::MismatchedLinks {
                slot: ix,
                next,
                back: s.prev[next],
            });
        }

        ix = next;
        if SENTINEL == ix {
            return Ok(());
        }
    }
}

// Returns the number of free slots reached.
fn walk_free_chain<T>(s: &Snapshot<'_, T>, seen: &mut [Seen]) -> Result<usize, Violation> {
    let mut free = 0;
    let mut ix = s.free_head;

    while SENTINEL != ix {
        match seen[ix] {
            Seen::Live => return Err(Violation::LiveSlotInFreeChain { slot: ix }),
            Seen::Free => return Err(Violation::FreeChainCycle { slot: ix }),
            Seen::Unseen => {}
        }
        if NONE != s.prev[ix] {
            return Err(Violation::LiveSlotInFreeChain { slot: ix });
        }

        seen[ix] = Seen::Free;
        free += 1;
        ix = s.next[ix];
    }

    Ok(free)
}
