use std::ops::{Bound, RangeBounds};

use tracing::debug;

use crate::error::{Result, SegmentTreeError};

/// Shape of the implicit tree shared by every variant.
///
/// Leaves live at `[size, size + len)` of a `2 * size` array and `size` is the
/// smallest power of two `>= len`. `log` is the height, `size == 1 << log`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) len: usize,
    pub(crate) size: usize,
    pub(crate) log: u32,
}

impl Layout {
    pub(crate) fn new(len: usize) -> Result<Self> {
        if len == 0 {
            debug!("rejected empty segment tree");
            return Err(SegmentTreeError::Empty);
        }
        let size = len.next_power_of_two();
        Ok(Self {
            len,
            size,
            log: size.trailing_zeros(),
        })
    }

    #[inline(always)]
    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            return Ok(());
        }
        debug!(index, len = self.len, "index out of bounds");
        Err(SegmentTreeError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Like [`Layout::check_index`] but also accepts `len` itself, for the
    /// open end of a binary search.
    #[inline(always)]
    pub(crate) fn check_boundary(&self, index: usize) -> Result<()> {
        if index <= self.len {
            return Ok(());
        }
        debug!(index, len = self.len, "boundary out of bounds");
        Err(SegmentTreeError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Converts any `RangeBounds` into a half-open `(start, end)` within `[0, len]`.
    pub(crate) fn resolve_range<R: RangeBounds<usize>>(&self, range: R) -> Result<(usize, usize)> {
        let len = self.len;
        let start = match range.start_bound() {
            Bound::Included(&start) => Some(start),
            Bound::Excluded(&start) => start.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.checked_add(1),
            Bound::Excluded(&end) => Some(end),
            Bound::Unbounded => Some(len),
        };

        match (start, end) {
            (Some(start), Some(end)) if start <= end && end <= len => Ok((start, end)),
            (start, end) => {
                let start = start.unwrap_or(usize::MAX);
                let end = end.unwrap_or(usize::MAX);
                debug!(start, end, len, "invalid range");
                Err(SegmentTreeError::InvalidRange { start, end, len })
            }
        }
    }
}
