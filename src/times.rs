use std::fmt::{self, Formatter};

/// Expected number of calls for [`Mock::verify`](crate::Mock::verify).
///
/// Plain integers convert into `Times`, so `verify(member, 3)` and
/// `verify(member, Times::Exactly(3))` are the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Never,
    Once,
    Exactly(usize),
}

impl Times {
    pub fn count(self) -> usize {
        match self {
            Times::Never => 0,
            Times::Once => 1,
            Times::Exactly(n) => n,
        }
    }
}

impl From<usize> for Times {
    fn from(count: usize) -> Self {
        match count {
            0 => Times::Never,
            1 => Times::Once,
            n => Times::Exactly(n),
        }
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Times::Never => f.write_str("never"),
            Times::Once => f.write_str("once"),
            Times::Exactly(n) => write!(f, "{} times", n),
        }
    }
}
