//! Integers as space-separated lists of their characters' ASCII codes.
//!
//! `4095` becomes `"52 48 57 53"`. A leading `-` is encoded like any other character (`45`).

use core::fmt::{self, Write};
use heapless::String;

/// Longest decimal rendering of an `i32`: `-2147483648`
const MAX_CHARS: usize = 11;

/// Up to 3 digits plus a separator per character.
pub const CODES_LEN: usize = MAX_CHARS * 4;

pub type Codes = String<CODES_LEN>;

pub fn codes(value: i32) -> Codes {
    let mut text = String::<MAX_CHARS>::new();
    fill(&mut text, format_args!("{}", value));

    let mut codes = Codes::new();
    for (i, byte) in text.bytes().enumerate() {
        if i > 0 {
            fill(&mut codes, format_args!(" "));
        }
        fill(&mut codes, format_args!("{}", byte));
    }
    codes
}

/// Reverse [`codes`]. Returns `None` unless `codes` is exactly what [`codes`] would produce for
/// some value.
pub fn decode(codes: &str) -> Option<i32> {
    let mut text = String::<MAX_CHARS>::new();
    for token in codes.split(' ') {
        if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
            return None;
        }
        let code: u8 = token.parse().ok()?;
        if !code.is_ascii() {
            return None;
        }
        text.push(char::from(code)).ok()?;
    }
    let value: i32 = text.parse().ok()?;
    // reject non-canonical forms like "+1" or "007"
    if codes_match(value, &text) {
        Some(value)
    } else {
        None
    }
}

fn codes_match(value: i32, text: &str) -> bool {
    let mut canonical = String::<MAX_CHARS>::new();
    fill(&mut canonical, format_args!("{}", value));
    canonical.as_str() == text
}

/// Write into a fixed-capacity buffer, which is sized so that this cannot overflow.
fn fill<const N: usize>(buf: &mut String<N>, args: fmt::Arguments<'_>) {
    if buf.write_fmt(args).is_err() {
        panic!("text buffer overflow (capacity {})", N);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert_eq!(codes(0).as_str(), "48");
    }

    #[test]
    fn full_scale_sample() {
        assert_eq!(codes(4095).as_str(), "52 48 57 53");
    }

    #[test]
    fn negative_values_encode_the_sign() {
        assert_eq!(codes(-7).as_str(), "45 55");
        assert_eq!(decode("45 55"), Some(-7));
    }

    #[test]
    fn extremes_fit() {
        assert_eq!(
            codes(i32::MIN).as_str(),
            "45 50 49 52 55 52 56 51 54 52 56"
        );
        assert_eq!(decode(&codes(i32::MIN)), Some(i32::MIN));
        assert_eq!(decode(&codes(i32::MAX)), Some(i32::MAX));
    }

    #[test]
    fn one_token_per_character_and_no_trailing_separator() {
        for value in [0, 9, 10, 99, 100, 12345, -1, -100, 999_999_999] {
            let codes = codes(value);
            assert!(!codes.ends_with(' '), "{:?}", codes);
            assert!(!codes.starts_with(' '), "{:?}", codes);
            let chars = std::format!("{}", value).len();
            assert_eq!(codes.split(' ').count(), chars, "{:?}", codes);
        }
    }

    #[test]
    fn decodes_what_it_encodes() {
        let mut n = 0;
        while n < 1_000_000_000 {
            assert_eq!(decode(&codes(n)), Some(n), "{}", n);
            n += 999_983;
        }
        for n in [1, 9, 10, 99, 100, 999, 1000, 999_999_999] {
            assert_eq!(decode(&codes(n)), Some(n), "{}", n);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("52 "), None);
        assert_eq!(decode("52  48"), None);
        assert_eq!(decode("065"), None);
        // "A"
        assert_eq!(decode("65"), None);
        // "+1"
        assert_eq!(decode("43 49"), None);
        // "007"
        assert_eq!(decode("48 48 55"), None);
        assert_eq!(decode("300"), None);
        assert_eq!(decode("52 48 57 53 52 48 57 53 52 48 57 53"), None);
    }
}
