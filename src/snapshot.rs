use crate::store::NONE;
use std::fmt;

/// A read-only view of a list's backing arrays, for diagnostics and
/// rendering. It is constructed from the [`snapshot`] method on
/// `List`.
///
/// `prev` holds `usize::MAX` for slots on the free chain.
///
/// [`snapshot`]: struct.List.html#method.snapshot
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<'l, T> {
    pub data: &'l [Option<T>],
    pub next: &'l [usize],
    pub prev: &'l [usize],
    pub capacity: usize,
    pub size: usize,
    pub free_head: usize,
}

impl<'l, T> fmt::Display for Snapshot<'l, T>
where
    T: fmt::Debug,
{
    /// Renders the arrays as a table, one column per slot.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "capacity {} size {} free {}",
            self.capacity, self.size, self.free_head
        )?;

        write!(f, "{:>6} |", "index")?;
        for i in 0..self.capacity {
            write!(f, " {:>5}", i)?;
        }
        writeln!(f)?;

        write!(f, "{:>6} |", "data")?;
        for d in self.data {
            match d {
                Some(d) => write!(f, " {:>5}", format!("{:?}", d))?,
                None => write!(f, " {:>5}", "-")?,
            }
        }
        writeln!(f)?;

        write_links(f, "next", self.next)?;
        write_links(f, "prev", self.prev)
    }
}

fn write_links(f: &mut fmt::Formatter<'_>, name: &str, links: &[usize]) -> fmt::Result {
    write!(f, "{:>6} |", name)?;
    for l in links {
        if NONE == *l {
            write!(f, " {:>5}", "-")?;
        } else {
            write!(f, " {:>5}", l)?;
        }
    }
    writeln!(f)
}

/// The backing arrays of a list, taken apart. Produced by
/// [`into_raw_parts`] and consumed by [`from_raw_parts`].
///
/// [`into_raw_parts`]: struct.List.html#method.into_raw_parts
/// [`from_raw_parts`]: struct.List.html#method.from_raw_parts
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawParts<T> {
    pub data: Vec<Option<T>>,
    pub next: Vec<usize>,
    pub prev: Vec<usize>,
    pub size: usize,
    pub free_head: usize,
}

impl<T> RawParts<T> {
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            data: &self.data,
            next: &self.next,
            prev: &self.prev,
            capacity: self.next.len(),
            size: self.size,
            free_head: self.free_head,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::List;

    #[test]
    fn table_marks_free_slots() {
        let mut l = List::with_capacity(5);
        l.push_back(7).unwrap();

        let s = l.snapshot().to_string();
        let lines: Vec<&str> = s.lines().collect();

        assert_eq!("capacity 5 size 1 free 2", lines[0]);
        assert_eq!("  data |     -     7     -     -     -", lines[2]);
        assert_eq!("  next |     1     0     3     4     0", lines[3]);
        assert_eq!("  prev |     1     0     -     -     -", lines[4]);
    }

    #[test]
    fn raw_parts_snapshot_matches_list_snapshot() {
        let l: List<u8> = vec![1, 2, 3].into_iter().collect();
        let expected = l.snapshot().to_string();
        let parts = l.into_raw_parts();

        assert_eq!(expected, parts.snapshot().to_string());
    }
}
