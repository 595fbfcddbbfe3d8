use core::iter::FusedIterator;

use crate::path::{ParseError, ParseErrorKind, Segment};

/// Lazily splits a path into [`Segment`]s.
///
/// The first malformed segment yields an error and ends the iteration.
///
/// ```
/// use prop_reflect::path::{ParseErrorKind, PathSegments};
///
/// let mut iter = PathSegments::new("a.b[2]..c");
/// assert_eq!(iter.next().unwrap().unwrap().name(), "a");
/// assert_eq!(iter.next().unwrap().unwrap().index(), Some(2));
/// assert_eq!(iter.next().unwrap().unwrap_err().kind, ParseErrorKind::EmptySegment);
/// assert!(iter.next().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathSegments<'a> {
    path: &'a str,
    offset: usize,
    done: bool,
}

impl<'a> PathSegments<'a> {
    #[inline]
    pub const fn new(path: &'a str) -> Self {
        Self {
            path,
            offset: 0,
            done: false,
        }
    }

    fn fail(
        &mut self,
        raw: &str,
        offset: usize,
        kind: ParseErrorKind,
    ) -> Option<Result<Segment<'a>, ParseError>> {
        self.done = true;
        Some(Err(ParseError::new(raw, offset, kind)))
    }
}

impl<'a> Iterator for PathSegments<'a> {
    type Item = Result<Segment<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.offset == 0 && self.path.trim().is_empty() {
            return self.fail(self.path, 0, ParseErrorKind::Blank);
        }

        let path = self.path;
        let offset = self.offset;
        let rest = &path[offset..];
        let raw = match rest.find('.') {
            Some(end) => {
                self.offset += end + 1;
                &rest[..end]
            }
            None => {
                self.done = true;
                rest
            }
        };

        Some(parse_segment(raw, offset).inspect_err(|_| self.done = true))
    }
}

impl FusedIterator for PathSegments<'_> {}

fn parse_segment(raw: &str, offset: usize) -> Result<Segment<'_>, ParseError> {
    let error = |kind| ParseError::new(raw, offset, kind);

    if raw.is_empty() {
        return Err(error(ParseErrorKind::EmptySegment));
    }

    let Some(open) = raw.find('[') else {
        if raw.contains(']') {
            return Err(error(ParseErrorKind::TrailingCharacters));
        }
        return Ok(Segment::new(raw, None, offset));
    };

    let name = &raw[..open];
    if name.is_empty() {
        return Err(error(ParseErrorKind::MissingName));
    }
    if name.contains(']') {
        return Err(error(ParseErrorKind::TrailingCharacters));
    }

    let tail = &raw[open + 1..];
    let Some(close) = tail.find(']') else {
        return Err(error(ParseErrorKind::UnclosedIndex));
    };
    if close + 1 != tail.len() {
        return Err(error(ParseErrorKind::TrailingCharacters));
    }

    let digits = &tail[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(error(ParseErrorKind::InvalidIndex));
    }
    let index = digits
        .parse::<usize>()
        .map_err(|_| error(ParseErrorKind::InvalidIndex))?;

    Ok(Segment::new(name, Some(index), offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(path: &str) -> ParseErrorKind {
        PathSegments::new(path)
            .find_map(Result::err)
            .map(|err| err.kind)
            .unwrap()
    }

    #[test]
    fn malformed_paths() {
        assert_eq!(kind_of(""), ParseErrorKind::Blank);
        assert_eq!(kind_of("  "), ParseErrorKind::Blank);
        assert_eq!(kind_of("a..b"), ParseErrorKind::EmptySegment);
        assert_eq!(kind_of(".a"), ParseErrorKind::EmptySegment);
        assert_eq!(kind_of("a."), ParseErrorKind::EmptySegment);
        assert_eq!(kind_of("[1]"), ParseErrorKind::MissingName);
        assert_eq!(kind_of("a[1"), ParseErrorKind::UnclosedIndex);
        assert_eq!(kind_of("a[1]x"), ParseErrorKind::TrailingCharacters);
        assert_eq!(kind_of("a[1][2]"), ParseErrorKind::TrailingCharacters);
        assert_eq!(kind_of("a]"), ParseErrorKind::TrailingCharacters);
        assert_eq!(kind_of("a[-1]"), ParseErrorKind::InvalidIndex);
        assert_eq!(kind_of("a[]"), ParseErrorKind::InvalidIndex);
        assert_eq!(kind_of("a[x]"), ParseErrorKind::InvalidIndex);
        assert_eq!(kind_of("a[99999999999999999999999]"), ParseErrorKind::InvalidIndex);
    }

    #[test]
    fn offsets_point_at_the_segment() {
        let err = PathSegments::new("address.city[x]").find_map(Result::err).unwrap();
        assert_eq!(err.offset, 8);
        assert_eq!(err.segment, "city[x]");

        let offsets: Vec<usize> = PathSegments::new("a.bb.ccc")
            .map(|seg| seg.unwrap().offset())
            .collect();
        assert_eq!(offsets, [0, 2, 5]);
    }
}
