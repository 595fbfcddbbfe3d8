use core::fmt;

use crate::path::{ParseError, PathSegments};

/// One step of a [`PropertyPath`]: a property name and an optional index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment<'a> {
    name: &'a str,
    index: Option<usize>,
    offset: usize,
}

impl<'a> Segment<'a> {
    #[inline]
    pub(crate) const fn new(name: &'a str, index: Option<usize>, offset: usize) -> Self {
        Self {
            name,
            index,
            offset,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Byte offset of the segment in its path.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.name),
            None => f.write_str(self.name),
        }
    }
}

/// A parsed, non-empty sequence of [`Segment`]s borrowing from the path text.
///
/// # Examples
///
/// ```
/// use prop_reflect::path::PropertyPath;
///
/// let path = PropertyPath::parse("user.hobbies[1]").unwrap();
/// let (last, parents) = path.split_last();
///
/// assert_eq!(parents.len(), 1);
/// assert_eq!(last.name(), "hobbies");
/// assert_eq!(last.index(), Some(1));
/// assert_eq!(path.to_string(), "user.hobbies[1]");
///
/// assert!(PropertyPath::parse("user..name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath<'a> {
    raw: &'a str,
    segments: Box<[Segment<'a>]>,
}

impl<'a> PropertyPath<'a> {
    /// Parses the whole path, failing on the first malformed segment.
    pub fn parse(raw: &'a str) -> Result<Self, ParseError> {
        let segments = PathSegments::new(raw).collect::<Result<Box<[_]>, _>>()?;
        // A blank path is rejected by the iterator, so there is always a segment.
        debug_assert!(!segments.is_empty());
        Ok(Self { raw, segments })
    }

    #[inline]
    pub const fn as_str(&self) -> &'a str {
        self.raw
    }

    #[inline]
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The final segment and the segments leading to it.
    #[inline]
    pub fn split_last(&self) -> (&Segment<'a>, &[Segment<'a>]) {
        match self.segments.split_last() {
            Some(split) => split,
            None => unreachable!("parsed paths are never empty"),
        }
    }
}

impl fmt::Display for PropertyPath<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}
