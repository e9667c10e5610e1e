//! Borrowed token.

/// A slice of the source text plus its starting byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    text: &'src str,
    offset: usize,
}

impl<'src> Token<'src> {
    /// Token covering `src[start..end]`.
    ///
    /// Callers only cut at ASCII bytes, so both ends are char boundaries.
    #[inline]
    pub(crate) fn new(src: &'src str, start: usize, end: usize) -> Self {
        Token {
            text: &src[start..end],
            offset: start,
        }
    }

    #[inline]
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Byte offset of the first byte in the original source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the token is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.bytes().all(|b| b.is_ascii_whitespace())
    }
}
