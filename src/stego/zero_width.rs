//! Zero-width character steganography for text carriers.
//!
//! A payload is written as its UTF-16 code units, 16 bits each, most
//! significant bit first. Every bit becomes one invisible marker and the
//! marker run is bracketed by a delimiter on both sides:
//!
//! ```text
//! DELIM (MARK_0 | MARK_1){16 * units} DELIM
//! ```
//!
//! The hidden sequence is spliced into the carrier right after its first
//! character, so the rendered text is unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ZERO WIDTH SPACE, encodes a 0 bit.
pub const MARK_0: char = '\u{200B}';

/// ZERO WIDTH NON-JOINER, encodes a 1 bit.
pub const MARK_1: char = '\u{200C}';

/// ZERO WIDTH JOINER, opens and closes a hidden payload.
pub const DELIM: char = '\u{200D}';

/// Bits per encoded code unit. Encoder and decoder must agree on this exactly.
pub const UNIT_BITS: usize = 16;

/// Carrier used when the caller supplies an empty one.
const MINIMAL_CARRIER: &str = " ";

/// Errors that can occur while extracting a hidden payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No hidden data found in text")]
    NotFound,

    #[error("Hidden data ends with {bits} bits that do not form a whole character")]
    TrailingBits { bits: usize },

    #[error("Hidden data is not valid UTF-16")]
    InvalidUtf16,
}

/// What to do with a marker run whose length is not a multiple of 16.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingBits {
    /// Fail with [`ExtractError::TrailingBits`].
    #[default]
    Reject,
    /// Drop the incomplete final group.
    Truncate,
}

impl TrailingBits {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailingBits::Reject => "reject",
            TrailingBits::Truncate => "truncate",
        }
    }
}

impl fmt::Display for TrailingBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TrailingBits`] name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown trailing-bits policy: {0}. Expected: reject | truncate")]
pub struct ParsePolicyError(String);

impl FromStr for TrailingBits {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" | "strict" => Ok(TrailingBits::Reject),
            "truncate" | "lenient" => Ok(TrailingBits::Truncate),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Returns true if `c` belongs to the marker alphabet.
pub fn is_alphabet_char(c: char) -> bool {
    c == MARK_0 || c == MARK_1 || c == DELIM
}

/// Number of zero-width characters [`hide`] adds for `secret`.
pub fn hidden_len(secret: &str) -> usize {
    secret.encode_utf16().count() * UNIT_BITS + 2
}

/// Encodes `payload` as a delimited run of zero-width markers.
///
/// The result contains no visible characters and no carrier.
pub fn encode(payload: &str) -> String {
    let mut out = String::with_capacity(hidden_len(payload) * DELIM.len_utf8());
    out.push(DELIM);
    for unit in payload.encode_utf16() {
        for shift in (0..UNIT_BITS).rev() {
            out.push(if (unit >> shift) & 1 == 1 { MARK_1 } else { MARK_0 });
        }
    }
    out.push(DELIM);
    out
}

/// Hides `secret` inside `carrier`.
///
/// The hidden sequence goes right after the first character of the carrier.
/// An empty carrier is replaced by a single space so the output always has
/// something visible. Never fails.
pub fn hide(carrier: &str, secret: &str) -> String {
    let carrier = if carrier.is_empty() {
        MINIMAL_CARRIER
    } else {
        carrier
    };

    let hidden = encode(secret);

    // Split on a char boundary so a non-BMP first character stays intact
    let split = carrier.chars().next().map_or(0, char::len_utf8);
    let (head, tail) = carrier.split_at(split);

    let mut out = String::with_capacity(carrier.len() + hidden.len());
    out.push_str(head);
    out.push_str(&hidden);
    out.push_str(tail);
    out
}

/// Extracts the first hidden payload from `text`, rejecting trailing bits.
pub fn extract(text: &str) -> Result<String, ExtractError> {
    extract_with_policy(text, TrailingBits::default())
}

/// Extracts the first hidden payload from `text` with an explicit policy
/// for marker runs that are not a whole number of code units.
pub fn extract_with_policy(text: &str, policy: TrailingBits) -> Result<String, ExtractError> {
    let run = find_marker_run(text).ok_or(ExtractError::NotFound)?;
    decode_run(run, policy)
}

/// Returns true if `text` contains a complete hidden payload.
pub fn contains_hidden(text: &str) -> bool {
    find_marker_run(text).is_some()
}

/// Removes every marker and delimiter character from `text`.
pub fn strip(text: &str) -> String {
    text.chars().filter(|&c| !is_alphabet_char(c)).collect()
}

/// Finds the first `DELIM markers* DELIM` span and returns the markers.
///
/// A run interrupted by any other character is abandoned and the search
/// resumes at the interruption point.
fn find_marker_run(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find(DELIM) {
        let start = search_from + offset + DELIM.len_utf8();
        let mut end = start;

        for c in text[start..].chars() {
            if c == DELIM {
                return Some(&text[start..end]);
            }
            if c != MARK_0 && c != MARK_1 {
                break;
            }
            end += c.len_utf8();
        }

        search_from = end;
    }

    None
}

/// Converts a marker run back into text, 16 bits per code unit.
fn decode_run(run: &str, policy: TrailingBits) -> Result<String, ExtractError> {
    let mut units: Vec<u16> = Vec::with_capacity(run.len() / (DELIM.len_utf8() * UNIT_BITS));
    let mut acc: u16 = 0;
    let mut pending = 0usize;

    for c in run.chars() {
        acc = (acc << 1) | u16::from(c == MARK_1);
        pending += 1;
        if pending == UNIT_BITS {
            units.push(acc);
            acc = 0;
            pending = 0;
        }
    }

    if pending != 0 && policy == TrailingBits::Reject {
        return Err(ExtractError::TrailingBits { bits: pending });
    }

    String::from_utf16(&units).map_err(|_| ExtractError::InvalidUtf16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(bits: &str) -> String {
        bits.chars()
            .map(|b| if b == '1' { MARK_1 } else { MARK_0 })
            .collect()
    }

    #[test]
    fn test_encode_single_unit_msb_first() {
        // 'A' = 0x0041
        let encoded = encode("A");
        let expected = format!("{DELIM}{}{DELIM}", markers("0000000001000001"));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_empty_payload_is_bare_delimiters() {
        assert_eq!(encode(""), format!("{DELIM}{DELIM}"));
    }

    #[test]
    fn test_encode_astral_uses_surrogate_pair() {
        let encoded = encode("😀");
        assert_eq!(encoded.chars().count(), 2 * UNIT_BITS + 2);
        assert_eq!(extract(&encoded).unwrap(), "😀");
    }

    #[test]
    fn test_hide_inserts_after_first_char() {
        let out = hide("Hello", "x");
        assert!(out.starts_with('H'));
        assert!(out.ends_with("ello"));
        assert_eq!(out.chars().nth(1), Some(DELIM));
        assert_eq!(strip(&out), "Hello");
    }

    #[test]
    fn test_hide_empty_carrier_uses_space() {
        let out = hide("", "hi");
        assert!(out.starts_with(' '));
        assert_eq!(strip(&out), " ");
        assert_eq!(extract(&out).unwrap(), "hi");
    }

    #[test]
    fn test_hide_single_char_carrier() {
        let out = hide("X", "ok");
        assert!(out.starts_with('X'));
        assert!(out.ends_with(DELIM));
        assert_eq!(extract(&out).unwrap(), "ok");
    }

    #[test]
    fn test_hide_empty_secret_extracts_empty() {
        let out = hide("X", "");
        assert_eq!(out, format!("X{DELIM}{DELIM}"));
        assert_eq!(extract(&out), Ok(String::new()));
    }

    #[test]
    fn test_hide_non_bmp_first_char_not_split() {
        let out = hide("🎉 party", "s");
        assert!(out.starts_with('🎉'));
        assert_eq!(strip(&out), "🎉 party");
        assert_eq!(extract(&out).unwrap(), "s");
    }

    #[test]
    fn test_hidden_len_matches_output() {
        let secret = "día 😀";
        let out = hide("carrier", secret);
        let zero_width = out.chars().filter(|&c| is_alphabet_char(c)).count();
        assert_eq!(zero_width, hidden_len(secret));
    }

    #[test]
    fn test_secret_with_zero_width_chars_roundtrip() {
        let secret = format!("a{MARK_0}b{DELIM}c{MARK_1}");
        let out = hide("visible", &secret);
        assert_eq!(extract(&out).unwrap(), secret);
    }

    #[test]
    fn test_extract_without_delimiter_not_found() {
        assert_eq!(extract("plain text"), Err(ExtractError::NotFound));
        assert_eq!(extract(""), Err(ExtractError::NotFound));
    }

    #[test]
    fn test_extract_single_delimiter_not_found() {
        let text = format!("a{DELIM}{}", markers("0101"));
        assert_eq!(extract(&text), Err(ExtractError::NotFound));
    }

    #[test]
    fn test_extract_invalid_char_between_delimiters_not_found() {
        let text = format!("a{DELIM}{}x{}{DELIM}b", markers("01"), markers("10"));
        assert_eq!(extract(&text), Err(ExtractError::NotFound));
    }

    #[test]
    fn test_extract_skips_broken_run_and_finds_later_payload() {
        let broken = format!("{DELIM}{}!", markers("0110"));
        let text = format!("{broken} and then{}", encode("ok"));
        assert_eq!(extract(&text).unwrap(), "ok");
    }

    #[test]
    fn test_extract_returns_first_payload_only() {
        let text = format!("a{}b{}c", encode("first"), encode("second"));
        assert_eq!(extract(&text).unwrap(), "first");
    }

    #[test]
    fn test_extract_trailing_bits_rejected_by_default() {
        let text = format!("{DELIM}{}{DELIM}", markers("000000000100000101"));
        assert_eq!(extract(&text), Err(ExtractError::TrailingBits { bits: 2 }));
    }

    #[test]
    fn test_extract_trailing_bits_truncated_when_lenient() {
        let text = format!("{DELIM}{}{DELIM}", markers("000000000100000101"));
        assert_eq!(
            extract_with_policy(&text, TrailingBits::Truncate).unwrap(),
            "A"
        );
    }

    #[test]
    fn test_extract_lone_surrogate_is_invalid() {
        // 0xD800 on its own
        let text = format!("{DELIM}{}{DELIM}", markers("1101100000000000"));
        assert_eq!(extract(&text), Err(ExtractError::InvalidUtf16));
    }

    #[test]
    fn test_contains_hidden() {
        assert!(contains_hidden(&hide("abc", "x")));
        assert!(!contains_hidden("abc"));
    }

    #[test]
    fn test_trailing_bits_parse() {
        assert_eq!("reject".parse::<TrailingBits>(), Ok(TrailingBits::Reject));
        assert_eq!("Truncate".parse::<TrailingBits>(), Ok(TrailingBits::Truncate));
        assert!("sometimes".parse::<TrailingBits>().is_err());
    }
}
