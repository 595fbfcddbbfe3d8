use thiserror::Error;

/// Why a path could not be parsed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    #[error("path is blank")]
    Blank,
    #[error("empty segment")]
    EmptySegment,
    #[error("index without a property name")]
    MissingName,
    #[error("index is not closed")]
    UnclosedIndex,
    #[error("unexpected characters after the index")]
    TrailingCharacters,
    #[error("index is not a non-negative integer")]
    InvalidIndex,
}

/// A malformed path segment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid path segment `{segment}` at offset {offset}: {kind}")]
pub struct ParseError {
    /// The raw text of the offending segment.
    pub segment: String,
    /// Byte offset of the segment in the whole path.
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    #[inline]
    pub(crate) fn new(segment: &str, offset: usize, kind: ParseErrorKind) -> Self {
        Self {
            segment: segment.to_owned(),
            offset,
            kind,
        }
    }
}
