use std::fmt;

/// Precondition failures reported by every tree in this crate.
///
/// Checks happen before any write, so a returned error never leaves a tree
/// partially updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentTreeError {
    /// A tree was constructed from zero elements.
    Empty,
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    /// `start > end` or `end > len`.
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },
    /// A `max_right`/`min_left` predicate returned `false` for the identity.
    IdentityRejected,
}

impl fmt::Display for SegmentTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "segment tree needs at least one element"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: the len is {len} but the index is {index}")
            }
            Self::InvalidRange { start, end, len } => {
                write!(f, "invalid range {start}..{end} for len {len}")
            }
            Self::IdentityRejected => write!(f, "predicate must accept the identity element"),
        }
    }
}

impl std::error::Error for SegmentTreeError {}

pub type Result<T> = std::result::Result<T, SegmentTreeError>;
