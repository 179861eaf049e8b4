use super::Stream;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Longest token that fits a counted string.
pub const MAX_TOKEN_LEN: usize = 255;

pub fn is_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t' || c == b'\n' || c == 0x0c
}

pub fn skip_whitespace(stream: &mut dyn Stream) {
    while let Some(c) = stream.peek() {
        if !is_whitespace(c) {
            break;
        }
        stream.advance();
    }
}

/// Read the next whitespace delimited token. The delimiter that ends the
/// token stays in the lookahead. An empty token means end of stream.
pub fn next_token(stream: &mut dyn Stream) -> Result<Vec<u8>> {
    skip_whitespace(stream);
    let mut token = vec![];
    while let Some(c) = stream.peek() {
        if is_whitespace(c) {
            break;
        }
        token.push(c);
        stream.advance();
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(error!(TokenTooLong));
    }
    Ok(token)
}

/// Signed decimal, or hexadecimal with a `$` prefix.
pub fn parse_number(token: &[u8]) -> Option<isize> {
    let s = std::str::from_utf8(token).ok()?;
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (radix, digits) = match s.strip_prefix('$') {
        Some(rest) => (16, rest),
        None => (10, s),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let n = usize::from_str_radix(digits, radix).ok()? as isize;
    Some(if negative { n.wrapping_neg() } else { n })
}
