//! Base-N conversion between record identifiers and short codes.
//!
//! Short codes are never stored. They are derived from the store-assigned
//! identifier on the way out and decoded back to it on the way in, so a
//! unique id always yields a unique code.

use thiserror::Error;

/// Digits, then lowercase, then uppercase. Position in this string is the digit value.
pub const BASE62: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid character '{0}' found in string for decoding")]
    InvalidCharacter(char),
    #[error("value of '{0}' does not fit in a 64-bit identifier")]
    Overflow(String),
}

fn symbols(alphabet: &str) -> Result<Vec<char>, CodecError> {
    let symbols: Vec<char> = alphabet.chars().collect();
    if symbols.len() < 2 {
        return Err(CodecError::InvalidInput(
            "alphabet must contain at least two symbols".to_string(),
        ));
    }
    for (i, c) in symbols.iter().enumerate() {
        if symbols[..i].contains(c) {
            return Err(CodecError::InvalidInput(format!(
                "alphabet contains duplicate symbol '{c}'"
            )));
        }
    }
    Ok(symbols)
}

/// Encode a non-negative number using `alphabet`, most significant symbol first.
pub fn encode(num: i64, alphabet: &str) -> Result<String, CodecError> {
    if num < 0 {
        return Err(CodecError::InvalidInput(format!(
            "cannot encode negative number {num}"
        )));
    }

    let symbols = symbols(alphabet)?;
    if num == 0 {
        return Ok(symbols[0].to_string());
    }

    let base = symbols.len() as u64;
    let mut n = num as u64;
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(symbols[(n % base) as usize]);
        n /= base;
    }
    digits.reverse();

    Ok(digits.into_iter().collect())
}

/// Decode `code` back into the number it represents under `alphabet`.
pub fn decode(code: &str, alphabet: &str) -> Result<i64, CodecError> {
    let symbols = symbols(alphabet)?;
    let base = symbols.len() as i64;

    code.chars().try_fold(0i64, |acc, c| {
        let digit = symbols
            .iter()
            .position(|&s| s == c)
            .ok_or(CodecError::InvalidCharacter(c))? as i64;

        acc.checked_mul(base)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| CodecError::Overflow(code.to_string()))
    })
}

pub fn encode_base62(num: i64) -> Result<String, CodecError> {
    encode(num, BASE62)
}

pub fn decode_base62(code: &str) -> Result<i64, CodecError> {
    decode(code, BASE62)
}
