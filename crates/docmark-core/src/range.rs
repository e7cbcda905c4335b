//! Source location tracking for parsed blocks.
//!
//! Every block produced by the parser is paired with a `TextRange` covering
//! the source lines it consumed. Ranges make diagnostics point at real bytes
//! and let hosts map a rendered block back to its markup.

/// A byte range in the source text.
///
/// Ranges use byte offsets (not character offsets).
/// `start` is inclusive and `end` exclusive: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use docmark_core::range::TextRange;
///
/// let range = TextRange::new(3, 8);
/// assert_eq!(range.len(), 5);
/// assert_eq!(range.slice("## Title\n"), "Title");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TextRange {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl TextRange {
    /// Create a new range from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of this range in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this range contains a byte offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Merge two ranges into one covering both.
    #[inline]
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Build a range from byte offsets, saturating at `u32::MAX`.
    ///
    /// Ranges are positional metadata only; block text never depends on
    /// them, so inputs past 4 GiB parse correctly with clamped ranges.
    #[inline]
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(end).unwrap_or(u32::MAX),
        )
    }

    /// Borrow the bytes this range covers from `source`.
    ///
    /// Returns an empty string when the range does not fall on valid
    /// boundaries of `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_spans_both_ranges() {
        let a = TextRange::new(10, 14);
        let b = TextRange::new(2, 6);
        assert_eq!(a.cover(b), TextRange::new(2, 14));
        assert_eq!(b.cover(a), TextRange::new(2, 14));
    }

    #[test]
    fn contains_is_half_open() {
        let r = TextRange::new(3, 5);
        assert!(!r.contains(2));
        assert!(r.contains(3));
        assert!(r.contains(4));
        assert!(!r.contains(5));
    }

    #[test]
    fn offsets_saturate_instead_of_wrapping() {
        assert_eq!(TextRange::from_offsets(2, 9), TextRange::new(2, 9));
        assert_eq!(
            TextRange::from_offsets(7, usize::MAX),
            TextRange::new(7, u32::MAX)
        );
        assert_eq!(
            TextRange::from_offsets(usize::MAX, usize::MAX),
            TextRange::new(u32::MAX, u32::MAX)
        );
    }

    #[test]
    fn slice_out_of_bounds_is_empty() {
        assert_eq!(TextRange::new(0, 3).slice("ab"), "");
        assert_eq!(TextRange::new(1, 2).slice("ab"), "b");
        assert!(TextRange::new(4, 4).is_empty());
    }
}
