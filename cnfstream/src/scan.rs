//! Cursor based scanning primitives for the text formats.
//!
//! All functions take the scanned bytes together with a cursor position and return the position
//! where scanning stopped. None of them look beyond the end of the given bytes, which makes them
//! usable on arbitrary chunks of a larger input.

/// Whether a byte is whitespace in the DIMACS and DRAT text formats.
///
/// Matches C's `isspace` in the default locale: space, `\t`, `\n`, `\v`, `\f` and `\r`.
#[inline]
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Returns the position of the first non-whitespace byte at or after `pos`.
#[inline]
pub fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Returns the position of the next `\n` at or after `pos`.
#[inline]
pub fn find_line_end(bytes: &[u8], pos: usize) -> Option<usize> {
    bytes[pos..]
        .iter()
        .position(|&byte| byte == b'\n')
        .map(|offset| pos + offset)
}

/// Where [`skip_comments`] stopped.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CommentScan {
    /// The bytes ended inside a comment, the rest of the comment follows in later input.
    InComment,
    /// Stopped at content that is neither whitespace nor comment, or at the end of the bytes
    /// outside of any comment.
    Content,
}

/// Skips whitespace and comment lines.
///
/// A comment starts with a `c` in a position where a token could start, i.e. the `c` may be
/// preceded by whitespace on its line, and runs up to and including the next `\n`.
pub fn skip_comments(bytes: &[u8], mut pos: usize) -> (usize, CommentScan) {
    loop {
        pos = skip_whitespace(bytes, pos);
        if bytes.get(pos) != Some(&b'c') {
            return (pos, CommentScan::Content);
        }
        match find_line_end(bytes, pos) {
            Some(line_end) => pos = line_end + 1,
            None => return (bytes.len(), CommentScan::InComment),
        }
    }
}

/// Result of [`scan_int`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum IntToken {
    /// A complete integer token ending right before the given position.
    ///
    /// The value is `None` when it does not fit into an `i64`.
    Value(Option<i64>, usize),
    /// The bytes end before the token could be completed, e.g. after a lone `-`.
    Incomplete,
    /// The byte at the given position cannot be part of an integer token.
    Invalid(usize),
}

/// Scans a decimal integer token starting at `pos`.
///
/// A token consists of an optional `-` followed by at least one decimal digit. It has to be
/// followed by whitespace or the end of the bytes. A digit run reaching the end of the bytes is
/// considered complete.
pub fn scan_int(bytes: &[u8], pos: usize) -> IntToken {
    let mut cursor = pos;
    let negative = bytes.get(cursor) == Some(&b'-');
    cursor += negative as usize;

    let digits_start = cursor;
    let mut value = Some(0i64);

    while let Some(&byte) = bytes.get(cursor) {
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = (byte - b'0') as i64;
        value = value.and_then(|value| value.checked_mul(10)).and_then(|value| {
            if negative {
                value.checked_sub(digit)
            } else {
                value.checked_add(digit)
            }
        });
        cursor += 1;
    }

    if cursor == digits_start {
        if cursor == bytes.len() {
            return IntToken::Incomplete;
        }
        return IntToken::Invalid(cursor);
    }

    match bytes.get(cursor) {
        Some(&byte) if !is_space(byte) => IntToken::Invalid(cursor),
        _ => IntToken::Value(value, cursor),
    }
}

/// Returns the position right after the non-whitespace run starting at `pos`.
///
/// Used to delimit offending tokens in error messages.
pub(crate) fn token_end(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&byte| is_space(byte))
        .map_or(bytes.len(), |offset| pos + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace() {
        for byte in [b' ', b'\t', b'\n', 0x0b, 0x0c, b'\r'] {
            assert!(is_space(byte));
        }
        for byte in [b'0', b'c', b'd', b'-', 0x00, 0x7f] {
            assert!(!is_space(byte));
        }

        assert_eq!(skip_whitespace(b" \t\x0b\x0c\r\n1", 0), 6);
        assert_eq!(skip_whitespace(b"  ", 1), 2);
        assert_eq!(skip_whitespace(b"1 ", 0), 0);
    }

    #[test]
    fn line_end() {
        assert_eq!(find_line_end(b"abc\ndef\n", 0), Some(3));
        assert_eq!(find_line_end(b"abc\ndef\n", 4), Some(7));
        assert_eq!(find_line_end(b"abc\ndef", 4), None);
        assert_eq!(find_line_end(b"", 0), None);
    }

    #[test]
    fn comments_inside_chunk() {
        assert_eq!(
            skip_comments(b"c foo\nc bar\n1 0", 0),
            (12, CommentScan::Content)
        );
        assert_eq!(
            skip_comments(b"\r\t c foo\n  -1", 0),
            (11, CommentScan::Content)
        );
        assert_eq!(skip_comments(b"1 c", 0), (0, CommentScan::Content));
        assert_eq!(skip_comments(b" \n ", 0), (3, CommentScan::Content));
    }

    #[test]
    fn comment_ending_outside_chunk() {
        assert_eq!(
            skip_comments(b"c foo\nc bar", 0),
            (11, CommentScan::InComment)
        );
        assert_eq!(skip_comments(b"  c", 0), (3, CommentScan::InComment));
    }

    #[test]
    fn integer_tokens() {
        assert_eq!(scan_int(b"123 ", 0), IntToken::Value(Some(123), 3));
        assert_eq!(scan_int(b"-42\n", 0), IntToken::Value(Some(-42), 3));
        assert_eq!(scan_int(b"1 -2 0", 2), IntToken::Value(Some(-2), 4));
        assert_eq!(scan_int(b"007", 0), IntToken::Value(Some(7), 3));
        assert_eq!(scan_int(b"-0 ", 0), IntToken::Value(Some(0), 2));
        assert_eq!(
            scan_int(b"-9223372036854775808", 0),
            IntToken::Value(Some(i64::MIN), 20)
        );
        assert_eq!(
            scan_int(b"9223372036854775808 ", 0),
            IntToken::Value(None, 19)
        );
    }

    #[test]
    fn incomplete_and_invalid_tokens() {
        assert_eq!(scan_int(b"-", 0), IntToken::Incomplete);
        assert_eq!(scan_int(b"1 -", 2), IntToken::Incomplete);
        assert_eq!(scan_int(b"- 1", 0), IntToken::Invalid(1));
        assert_eq!(scan_int(b"x", 0), IntToken::Invalid(0));
        assert_eq!(scan_int(b"12x", 0), IntToken::Invalid(2));
        assert_eq!(scan_int(b"1-2", 0), IntToken::Invalid(1));
        assert_eq!(scan_int(b"--1", 0), IntToken::Invalid(1));
    }

    #[test]
    fn token_ends() {
        assert_eq!(token_end(b"12x 3", 0), 3);
        assert_eq!(token_end(b"12x", 1), 3);
    }
}
