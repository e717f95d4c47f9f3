//! Source location spans.

use std::fmt;

/// Byte range in the source text a node was parsed from.
///
/// Spans are informational: they travel with nodes into error messages but
/// never take part in node equality.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a span from start and end offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a span from a start offset and a length.
    #[inline]
    pub const fn with_len(start: u32, len: u32) -> Self {
        Span {
            start,
            end: start.saturating_add(len),
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos={}; len={}", self.start, self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len_and_merge() {
        let a = Span::with_len(4, 3);
        assert_eq!(a, Span::new(4, 7));
        assert_eq!(a.len(), 3);
        assert!(!a.is_empty());

        let merged = a.merge(Span::new(1, 5));
        assert_eq!(merged, Span::new(1, 7));
    }

    #[test]
    fn span_display_uses_pos_and_len() {
        assert_eq!(Span::with_len(8, 10).to_string(), "pos=8; len=10");
    }

    #[test]
    fn inverted_span_is_empty() {
        let span = Span::new(9, 3);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
