//! Steganography module for hiding data in text carriers.
//!
//! Supports:
//! - Zero-width character embedding (ZWSP / ZWNJ bits, ZWJ delimiters)

pub mod zero_width;

pub use zero_width::{
    contains_hidden, encode, extract, extract_with_policy, hidden_len, hide, is_alphabet_char,
    strip, ExtractError, ParsePolicyError, TrailingBits, DELIM, MARK_0, MARK_1,
};
