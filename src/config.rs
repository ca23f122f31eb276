/// The smallest capacity a list is built with, counting the sentinel.
pub const MIN_CAPACITY: usize = 5;

/// Controls whether the list verifies itself around mutations.
///
/// [`List::verify`] is always available; this only decides whether
/// mutating operations call it on their own.
///
/// [`List::verify`]: struct.List.html#method.verify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Checks {
    /// Never verify automatically.
    Off,
    /// Verify before every mutation. A corrupt structure is reported
    /// as an error and the mutation is not performed.
    Report,
    /// Verify before and after every mutation. A corrupt structure is
    /// logged and the process panics.
    Abort,
}

impl Default for Checks {
    /// `Abort` in debug builds or with the `strict` feature, `Off`
    /// otherwise.
    fn default() -> Checks {
        if cfg!(any(debug_assertions, feature = "strict")) {
            Checks::Abort
        } else {
            Checks::Off
        }
    }
}

/// Construction parameters for a `List`.
///
/// # Examples
///
/// ```
/// use slot_list::{Checks, Config, List};
///
/// let l: List<i32> = List::with_config(Config::new().initial_capacity(64).checks(Checks::Report));
/// assert_eq!(64, l.capacity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Requested number of slots, sentinel included. Raised to
    /// [`MIN_CAPACITY`] when smaller.
    ///
    /// [`MIN_CAPACITY`]: constant.MIN_CAPACITY.html
    pub initial_capacity: usize,
    /// Whether mutations verify the list, and what a violation does.
    pub checks: Checks,
}

impl Config {
    /// The default configuration: `MIN_CAPACITY` slots and
    /// `Checks::default()`.
    pub fn new() -> Config {
        Config::default()
    }

    /// Set the requested number of slots, sentinel included.
    pub fn initial_capacity(mut self, capacity: usize) -> Config {
        self.initial_capacity = capacity;
        self
    }

    /// Set how mutations verify the list.
    pub fn checks(mut self, checks: Checks) -> Config {
        self.checks = checks;
        self
    }

    pub(crate) fn effective_capacity(&self) -> usize {
        self.initial_capacity.max(MIN_CAPACITY)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            initial_capacity: MIN_CAPACITY,
            checks: Checks::default(),
        }
    }
}
