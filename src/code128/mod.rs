//! # Code 128 Encoder
//!
//! Converts a short string into the module sequence of a Code 128 symbol.
//!
//! ## Symbol Layout
//!
//! ```text
//! ┌────────────┬─────────┬──────────────┬──────────┬──────────────┬────────────┐
//! │ quiet zone │ start B │ data symbols │ checksum │ stop + "11"  │ quiet zone │
//! │ 10 × '0'   │ 11      │ 11 × n       │ 11       │ 11 + 2       │ 10 × '0'   │
//! └────────────┴─────────┴──────────────┴──────────┴──────────────┴────────────┘
//! ```
//!
//! Every input character is emitted with the same fixed table (see
//! [`charset`]); there is no subset switching. The checksum is the start
//! value plus each data value weighted by its 1-based position, modulo 103.
//!
//! ## Example
//!
//! ```
//! use skulabel::code128;
//!
//! let symbol = code128::encode("AB").unwrap();
//! assert_eq!(symbol.len(), 10 + 11 + 22 + 11 + 11 + 2 + 10);
//! assert_eq!(symbol.checksum_value(), Some(33));
//! ```

pub mod charset;
pub mod table;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use table::{
    CHECKSUM_MODULUS, QUIET_ZONE_WIDTH, START_B, STOP, SYMBOL_TABLE, SYMBOL_WIDTH,
    TERMINATION_BAR,
};

/// Errors raised by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Nothing to encode.
    #[error("data is required for barcode generation")]
    InvalidInput,

    /// Character outside the supported alphabet.
    #[error("unsupported character {ch:?} at position {position}")]
    UnsupportedCharacter {
        ch: char,
        /// 1-based position in the input.
        position: usize,
    },

    /// A bit string that is not a well-formed symbol.
    #[error("malformed symbol: {0}")]
    Malformed(String),
}

/// Encoded module sequence, `'1'` for a bar and `'0'` for a space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedSymbol(String);

/// Number of modules for `data_len` input characters.
#[inline]
pub const fn symbol_length(data_len: usize) -> usize {
    QUIET_ZONE_WIDTH
        + SYMBOL_WIDTH
        + SYMBOL_WIDTH * data_len
        + SYMBOL_WIDTH
        + SYMBOL_WIDTH
        + TERMINATION_BAR.len()
        + QUIET_ZONE_WIDTH
}

/// Weighted mod-103 checksum over data code values, seeded with start B.
pub fn checksum(values: &[u8]) -> u8 {
    let sum = values
        .iter()
        .enumerate()
        .fold(START_B as u32, |acc, (idx, &value)| {
            let weight = (idx % CHECKSUM_MODULUS as usize) as u32 + 1;
            (acc + value as u32 * weight) % CHECKSUM_MODULUS
        });
    (sum % CHECKSUM_MODULUS) as u8
}

/// Encode `data` as a Code 128 module string.
///
/// Fails with [`EncodeError::InvalidInput`] for an empty string and with
/// [`EncodeError::UnsupportedCharacter`] for the first character outside
/// the alphabet. Nothing is emitted on failure.
pub fn encode(data: &str) -> Result<EncodedSymbol, EncodeError> {
    if data.is_empty() {
        return Err(EncodeError::InvalidInput);
    }

    let values = data
        .chars()
        .enumerate()
        .map(|(idx, ch)| {
            charset::code_value(ch).ok_or(EncodeError::UnsupportedCharacter {
                ch,
                position: idx + 1,
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let mut bits = String::with_capacity(symbol_length(values.len()));
    push_quiet_zone(&mut bits);
    bits.push_str(SYMBOL_TABLE[START_B as usize]);
    for &value in &values {
        bits.push_str(SYMBOL_TABLE[value as usize]);
    }
    bits.push_str(SYMBOL_TABLE[checksum(&values) as usize]);
    bits.push_str(SYMBOL_TABLE[STOP as usize]);
    bits.push_str(TERMINATION_BAR);
    push_quiet_zone(&mut bits);

    Ok(EncodedSymbol(bits))
}

fn push_quiet_zone(bits: &mut String) {
    bits.extend(std::iter::repeat_n('0', QUIET_ZONE_WIDTH));
}

impl EncodedSymbol {
    /// The module string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of modules including quiet zones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a symbol produced by [`encode`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Modules as booleans, `true` = bar (black).
    pub fn bars(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// Code values of every symbol between the quiet zones, from the start
    /// code through the stop code.
    ///
    /// Returns `None` when the string does not have the expected framing or
    /// contains a pattern that is not in the table.
    pub fn symbol_values(&self) -> Option<Vec<u8>> {
        let bits = self.0.as_str();
        let zone = "0".repeat(QUIET_ZONE_WIDTH);
        let inner = bits.strip_prefix(zone.as_str())?.strip_suffix(zone.as_str())?;
        let body = inner.strip_suffix(TERMINATION_BAR)?;
        if body.len() % SYMBOL_WIDTH != 0 {
            return None;
        }

        body.as_bytes()
            .chunks(SYMBOL_WIDTH)
            .map(|chunk| std::str::from_utf8(chunk).ok().and_then(table::value_of))
            .collect()
    }

    /// Code values of the data characters only.
    pub fn data_values(&self) -> Option<Vec<u8>> {
        let values = self.symbol_values()?;
        match values.as_slice() {
            [START_B, data @ .., _checksum, STOP] => Some(data.to_vec()),
            _ => None,
        }
    }

    /// The checksum value embedded in the symbol.
    pub fn checksum_value(&self) -> Option<u8> {
        let values = self.symbol_values()?;
        match values.as_slice() {
            [START_B, .., check, STOP] if values.len() >= 4 => Some(*check),
            _ => None,
        }
    }

    /// Whether the embedded checksum matches the data symbols.
    pub fn verify(&self) -> bool {
        match (self.data_values(), self.checksum_value()) {
            (Some(data), Some(check)) => checksum(&data) == check,
            _ => false,
        }
    }

    /// Consume into the underlying module string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EncodedSymbol> for String {
    fn from(symbol: EncodedSymbol) -> Self {
        symbol.0
    }
}

impl TryFrom<String> for EncodedSymbol {
    type Error = EncodeError;

    fn try_from(bits: String) -> Result<Self, Self::Error> {
        if !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(EncodeError::Malformed("expected only '0' and '1'".to_string()));
        }
        let symbol = EncodedSymbol(bits);
        if !symbol.verify() {
            return Err(EncodeError::Malformed(
                "framing or checksum does not match".to_string(),
            ));
        }
        Ok(symbol)
    }
}
