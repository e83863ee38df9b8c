//! Code 128 module patterns.
//!
//! Each symbol is 11 modules wide and always begins with a bar. The stop
//! symbol is followed by a two-module termination bar, giving the usual
//! 13-module stop character.

/// Number of modules in one symbol.
pub const SYMBOL_WIDTH: usize = 11;

/// Quiet zone emitted before and after the symbol, in modules.
pub const QUIET_ZONE_WIDTH: usize = 10;

/// Trailing bar that closes the stop character.
pub const TERMINATION_BAR: &str = "11";

/// Start code for character set B.
pub const START_B: u8 = 104;

/// Stop code.
pub const STOP: u8 = 106;

/// Checksum modulus.
pub const CHECKSUM_MODULUS: u32 = 103;

/// Module patterns indexed by code value (0..=106).
#[rustfmt::skip]
pub const SYMBOL_TABLE: [&str; 107] = [
    "11011001100", "11001101100", "11001100110", "10010011000", "10010001100", // 0-4
    "10001001100", "10011001000", "10011000100", "10001100100", "11001001000", // 5-9
    "11001000100", "11000100100", "10110011100", "10011011100", "10011001110", // 10-14
    "10111001100", "10011101100", "10011100110", "11001110010", "11001011100", // 15-19
    "11001001110", "11011100100", "11001110100", "11101101110", "11101001100", // 20-24
    "11100101100", "11100100110", "11101100100", "11100110100", "11100110010", // 25-29
    "11011011000", "11011000110", "11000110110", "10100011000", "10001011000", // 30-34
    "10001000110", "10110001000", "10001101000", "10001100010", "11010001000", // 35-39
    "11000101000", "11000100010", "10110111000", "10110001110", "10001101110", // 40-44
    "10111011000", "10111000110", "10001110110", "11101110110", "11010001110", // 45-49
    "11000101110", "11011101000", "11011100010", "11011101110", "11101011000", // 50-54
    "11101000110", "11100010110", "11101101000", "11101100010", "11100011010", // 55-59
    "11101111010", "11001000010", "11110001010", "10100110000", "10100001100", // 60-64
    "10010110000", "10010000110", "10000101100", "10000100110", "10110010000", // 65-69
    "10110000100", "10011010000", "10011000010", "10000110100", "10000110010", // 70-74
    "11000010010", "11001010000", "11110111010", "11000010100", "10001111010", // 75-79
    "10100111100", "10010111100", "10010011110", "10111100100", "10011110100", // 80-84
    "10011110010", "11110100100", "11110010100", "11110010010", "11011011110", // 85-89
    "11011110110", "11110110110", "10101111000", "10100011110", "10001011110", // 90-94
    "10111101000", "10111100010", "11110101000", "11110100010", "10111011110", // 95-99
    "10111101110", "11101011110", "11110101110", "11010000100", "11010010000", // 100-104
    "11010011100", "11000111010",                                              // 105-106
];

/// Pattern for a code value, if it is in the table.
#[inline]
pub fn pattern(value: u8) -> Option<&'static str> {
    SYMBOL_TABLE.get(value as usize).copied()
}

/// Reverse lookup from an 11-module pattern to its code value.
pub fn value_of(pattern: &str) -> Option<u8> {
    SYMBOL_TABLE
        .iter()
        .position(|p| *p == pattern)
        .map(|idx| idx as u8)
}
