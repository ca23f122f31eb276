use slot_list::{Checks, Config, Error, Handle, LinkKind, List, Violation};

fn report(capacity: usize) -> Config {
    let _ = pretty_env_logger::try_init();
    Config::new().initial_capacity(capacity).checks(Checks::Report)
}

fn values(l: &List<i32>) -> Vec<i32> {
    l.iter().cloned().collect()
}

#[test]
fn small_list_walkthrough() {
    let mut l = List::with_config(report(2));

    let a = l.insert_after(10, Handle::SENTINEL).unwrap();
    assert_eq!(1, a.index());
    assert_eq!(vec![10], values(&l));

    let b = l.insert_after(20, a).unwrap();
    assert_ne!(a, b);
    assert_eq!(vec![10, 20], values(&l));

    assert_eq!(Ok(10), l.delete_at(a));
    assert_eq!(vec![20], values(&l));

    let c = l.insert_after(30, Handle::SENTINEL).unwrap();
    assert_eq!(a, c);
    assert_eq!(vec![30, 20], values(&l));
    assert_eq!(Ok(()), l.verify());
}

#[test]
fn self_linked_slot_is_reported_as_an_infinite_loop() {
    let mut l = List::with_config(report(2));
    l.push_back(10).unwrap();
    let b = l.push_back(20).unwrap();
    l.push_back(30).unwrap();

    let mut parts = l.into_raw_parts();
    parts.next[b.index()] = b.index();
    let mut l = List::from_raw_parts_unchecked(parts, report(2));

    assert_eq!(
        Err(Violation::InfiniteLoop { slot: b.index() }),
        l.verify()
    );
    assert_eq!(
        Err(Error::CorruptedStructure(Violation::InfiniteLoop {
            slot: b.index()
        })),
        l.push_back(40)
    );
}

#[test]
fn dangling_link_is_reported() {
    let mut l = List::with_config(report(2));
    l.insert_after(10, Handle::SENTINEL).unwrap();
    l.insert_after(10, Handle::SENTINEL).unwrap();
    l.insert_after(10, Handle::SENTINEL).unwrap();

    let mut parts = l.into_raw_parts();
    parts.next[2] = 1000;
    let mut l = List::from_raw_parts_unchecked(parts, report(2));

    assert_eq!(
        Err(Error::CorruptedStructure(Violation::BadLink {
            slot: 2,
            kind: LinkKind::Next,
            link: 1000,
            capacity: 5,
        })),
        l.insert_after(10, Handle::SENTINEL)
    );
}

#[test]
fn from_raw_parts_rejects_corruption() {
    let l: List<i32> = (0..3).collect();
    let mut parts = l.into_raw_parts();
    parts.prev[2] = 3;

    assert_eq!(
        Err(Error::CorruptedStructure(Violation::MismatchedLinks {
            slot: 1,
            next: 2,
            back: 3
        })),
        List::from_raw_parts(parts, report(0)).map(|_| ())
    );
}

#[test]
fn insert_then_delete_everything_round_trips() {
    let mut l = List::with_config(report(0));
    let handles: Vec<Handle> = (0..100).map(|i| l.push_back(i).unwrap()).collect();

    for h in handles {
        l.delete_at(h).unwrap();
    }

    assert!(l.is_empty());
    assert_eq!(Ok(Handle::SENTINEL), l.next(Handle::SENTINEL));
    assert_eq!(Ok(Handle::SENTINEL), l.prev(Handle::SENTINEL));
    assert_eq!(l.capacity() - 1, l.free_len());
    assert_eq!(Ok(()), l.verify());
}

#[test]
fn growth_doubles_and_keeps_every_element() {
    let mut l = List::with_config(report(5));
    let mut capacities = vec![l.capacity()];

    for i in 0..40 {
        l.push_back(i).unwrap();
        if *capacities.last().unwrap() != l.capacity() {
            capacities.push(l.capacity());
        }
        assert!(l.capacity() >= l.len() + 1);
    }

    assert_eq!(vec![5, 10, 20, 40, 80], capacities);
    assert_eq!((0..40).collect::<Vec<i32>>(), values(&l));
}

#[test]
fn free_slots_are_reused_last_in_first_out() {
    let mut l = List::with_config(report(16));
    let hs: Vec<Handle> = (0..8).map(|i| l.push_back(i).unwrap()).collect();

    l.delete_at(hs[2]).unwrap();
    l.delete_at(hs[5]).unwrap();

    assert_eq!(Ok(hs[5]), l.push_back(100));
    assert_eq!(Ok(hs[2]), l.push_back(101));
    assert_eq!(Ok(Handle::from_index(9)), l.push_back(102));
}

#[test]
fn linearize_after_deletions() {
    let mut l = List::with_config(report(2));
    let mut h = Handle::SENTINEL;
    for v in &[10, 20, 30, 40, 50, 60] {
        h = l.insert_after(*v, h).unwrap();
    }

    l.delete_at(Handle::from_index(3)).unwrap();
    l.delete_at(Handle::from_index(2)).unwrap();
    l.linearize().unwrap();

    assert_eq!(vec![10, 40, 50, 60], values(&l));
    assert_eq!(5, l.capacity());
    let snapshot = l.snapshot();
    assert_eq!(&[1, 2, 3, 4, 0], snapshot.next);
    assert_eq!(&[4, 0, 1, 2, 3], snapshot.prev);
    assert_eq!(0, snapshot.free_head);
}

#[test]
fn traversal_with_begin_and_next() {
    let l: List<i32> = vec![4, 8, 15, 16, 23, 42].into_iter().collect();

    let mut seen = Vec::new();
    let mut h = l.begin();
    while !h.is_sentinel() {
        seen.push(*l.get(h).unwrap());
        h = l.next(h).unwrap();
    }
    assert_eq!(vec![4, 8, 15, 16, 23, 42], seen);

    let mut seen = Vec::new();
    let mut h = l.end();
    while !h.is_sentinel() {
        seen.push(*l.get(h).unwrap());
        h = l.prev(h).unwrap();
    }
    assert_eq!(vec![42, 23, 16, 15, 8, 4], seen);
}

#[test]
fn off_mode_skips_verification() {
    let l: List<i32> = (0..3).collect();
    let mut parts = l.into_raw_parts();
    parts.size = 2;
    let mut l = List::from_raw_parts_unchecked(parts, Config::new().checks(Checks::Off));

    // The corrupt size goes unnoticed until verify is called.
    assert!(l.push_front(7).is_ok());
    assert!(l.verify().is_err());
}
