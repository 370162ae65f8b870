//! Character classes and readers shared by the default tokenizer rules.
//!
//! Every reader takes the remaining input and returns how many bytes it consumed, so that
//! callers can advance their cursor without re-scanning.

/// The separator allowed between digit groups (`1_000_000`). It may also start an identifier.
pub const GROUP_SEPARATOR: char = '_';

#[inline]
pub fn is_space(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\r' | '\n')
}

#[inline]
pub fn is_digit(character: char) -> bool {
    character.is_ascii_digit()
}

#[inline]
pub fn is_digit_or_separator(character: char) -> bool {
    is_digit(character) || character == GROUP_SEPARATOR
}

#[inline]
pub fn is_ident_start(character: char) -> bool {
    character.is_ascii_alphabetic() || character == GROUP_SEPARATOR
}

#[inline]
pub fn is_ident(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == GROUP_SEPARATOR
}

/// Whether the whole of `text` would be read as a single identifier.
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_ident)
}

pub fn skip_spaces(input: &str) -> usize {
    input.len() - input.trim_start_matches(is_space).len()
}

pub fn read_ident(input: &str) -> usize {
    input.len() - input.trim_start_matches(is_ident).len()
}

/// Read digits and digit group separators.
pub fn read_integer(input: &str) -> usize {
    input.len() - input.trim_start_matches(is_digit_or_separator).len()
}

/// Read a numeric literal, returning its length and whether it is a float.
///
/// A `.` makes the literal a float unless it is immediately followed by a second `.` (so that
/// `1..2` reads `1`). An exponent marker (`e`/`E`) is only consumed when followed by digits,
/// optionally signed.
pub fn read_number(input: &str) -> (usize, bool) {
    let bytes = input.as_bytes();
    let mut end = read_integer(input);
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1) != Some(&b'.') {
        is_float = true;
        end += 1;
        end += read_integer(&input[end..]);
    }

    if let Some(exponent) = read_exponent(&input[end..]) {
        is_float = true;
        end += exponent;
    }

    (end, is_float)
}

fn read_exponent(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return None;
    }

    let mut end = 1;
    if matches!(bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
    }
    if !bytes.get(end).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    Some(end + read_integer(&input[end..]))
}

/// Read the body of a string literal whose opening delimiter was already consumed.
///
/// Returns the number of bytes consumed (closing delimiter included) and the decoded value.
/// Reaching the end of the input before `close` ends the literal there. Unknown escapes are
/// kept verbatim, backslash included.
pub fn read_string(input: &str, close: &str) -> (usize, String) {
    let escaped_close = close.chars().next();
    let mut value = String::new();
    let mut characters = input.char_indices();

    while let Some((offset, character)) = characters.next() {
        if !close.is_empty() && input[offset..].starts_with(close) {
            return (offset + close.len(), value);
        }

        if character != '\\' {
            value.push(character);
            continue;
        }

        match characters.next() {
            Some((_, escaped)) if Some(escaped) == escaped_close => value.push(escaped),
            Some((_, 'n')) => value.push('\n'),
            Some((_, 'r')) => value.push('\r'),
            Some((_, 't')) => value.push('\t'),
            Some((_, '0')) => value.push('\0'),
            Some((_, escaped @ ('\\' | '"' | '\''))) => value.push(escaped),
            Some((_, escaped)) => {
                value.push('\\');
                value.push(escaped);
            }
            None => value.push('\\'),
        }
    }

    (input.len(), value)
}

/// Parse an integer literal, ignoring digit group separators.
pub fn parse_integer(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| *c != GROUP_SEPARATOR).collect();
    digits.parse().ok()
}

/// Parse a float literal, ignoring digit group separators.
///
/// Only finite values written with digits are accepted: `inf`, `nan` and literals overflowing
/// `f64` are not numbers.
pub fn parse_float(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|c| *c != GROUP_SEPARATOR).collect();
    let unsigned = digits.strip_prefix(['-', '+']).unwrap_or(&digits);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}
