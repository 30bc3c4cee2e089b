//! Allocation-free integer parsing over a borrowed character window
//!
//! Used to turn hexadecimal digest text (e.g. the first 8 characters of a
//! SHA1 digest) into 32-bit hash seeds without building substrings.
//!
//! Rules:
//! - Leading whitespace is skipped unless parsing is tight
//! - Tight parsing rejects any character left after the digits
//! - `+` is accepted for every radix, `-` only for base 10
//! - `0x` / `0X` is consumed for `Radix::Hex` and `Radix::Auto`
//! - Base 10 is bounded by the signed range of the output width; other
//!   radixes by the unsigned range, reinterpreted as two's complement

use std::ops::Range;

use crate::error::ParseError;

/// Supported radixes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
    /// Hex when the window carries a `0x` prefix, decimal otherwise
    Auto,
}

impl Radix {
    fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal | Radix::Auto => 10,
            Radix::Hex => 16,
        }
    }
}

impl TryFrom<u32> for Radix {
    type Error = ParseError;

    /// `0` selects `Radix::Auto`
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Radix::Auto),
            2 => Ok(Radix::Binary),
            8 => Ok(Radix::Octal),
            10 => Ok(Radix::Decimal),
            16 => Ok(Radix::Hex),
            other => Err(ParseError::UnsupportedRadix(other)),
        }
    }
}

/// Output width that bounds the parsed magnitude
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
}

impl IntWidth {
    fn signed_max(self) -> u32 {
        match self {
            IntWidth::I8 => i8::MAX as u32,
            IntWidth::I16 => i16::MAX as u32,
            IntWidth::I32 => i32::MAX as u32,
        }
    }

    fn unsigned_max(self) -> u32 {
        match self {
            IntWidth::I8 => u8::MAX as u32,
            IntWidth::I16 => u16::MAX as u32,
            IntWidth::I32 => u32::MAX,
        }
    }

    fn sign_extend(self, raw: u32) -> i32 {
        match self {
            IntWidth::I8 => raw as u8 as i8 as i32,
            IntWidth::I16 => raw as u16 as i16 as i32,
            IntWidth::I32 => raw as i32,
        }
    }
}

/// Parser settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub radix: Radix,
    pub width: IntWidth,
    /// No leading whitespace, no trailing characters
    pub tight: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(Radix::Decimal)
    }
}

impl ParseOptions {
    pub const fn new(radix: Radix) -> Self {
        Self {
            radix,
            width: IntWidth::I32,
            tight: false,
        }
    }

    pub const fn tight(mut self) -> Self {
        self.tight = true;
        self
    }

    pub const fn width(mut self, width: IntWidth) -> Self {
        self.width = width;
        self
    }
}

/// A parsed value and the byte offset just past the last consumed digit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedInt {
    pub value: i32,
    pub end: usize,
}

/// Parse an integer from the start of `window`
///
/// In non-tight mode parsing stops at the first non-digit and `end` tells
/// the caller where it stopped.
pub fn parse_int(window: &str, options: ParseOptions) -> Result<ParsedInt, ParseError> {
    let bytes = window.as_bytes();
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut pos = 0;
    if !options.tight {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
    }

    let mut negative = false;
    match bytes.get(pos) {
        Some(b'-') => {
            if !matches!(options.radix, Radix::Decimal | Radix::Auto) {
                return Err(ParseError::NegativeNonDecimal);
            }
            negative = true;
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let mut radix = options.radix;
    if matches!(radix, Radix::Hex | Radix::Auto)
        && bytes.get(pos) == Some(&b'0')
        && matches!(bytes.get(pos + 1), Some(b'x' | b'X'))
    {
        radix = Radix::Hex;
        pos += 2;
    }
    if radix == Radix::Auto {
        radix = Radix::Decimal;
    }
    if negative && radix != Radix::Decimal {
        return Err(ParseError::NegativeNonDecimal);
    }

    let base = radix.base();
    let limit = if radix == Radix::Decimal {
        options.width.signed_max() + u32::from(negative)
    } else {
        options.width.unsigned_max()
    };
    let max_before_multiply = u32::MAX / base;
    let overflow = ParseError::Overflow {
        width: options.width,
    };

    let start = pos;
    let mut acc: u32 = 0;
    while let Some(digit) = bytes.get(pos).and_then(|&b| char::from(b).to_digit(base)) {
        if acc > max_before_multiply {
            return Err(overflow);
        }
        let shifted = acc * base;
        let next = shifted.wrapping_add(digit);
        if next < shifted {
            return Err(overflow);
        }
        acc = next;
        pos += 1;
    }

    if pos == start {
        return Err(ParseError::NoDigits { position: pos });
    }
    if acc > limit {
        return Err(overflow);
    }
    if options.tight && pos < bytes.len() {
        return Err(ParseError::TrailingCharacters { position: pos });
    }

    let value = if radix == Radix::Decimal {
        let magnitude = i64::from(acc);
        (if negative { -magnitude } else { magnitude }) as i32
    } else {
        options.width.sign_extend(acc)
    };

    Ok(ParsedInt { value, end: pos })
}

/// Borrow `range` out of `text`, failing instead of panicking when it does not fit
pub fn window(text: &str, range: Range<usize>) -> Result<&str, ParseError> {
    if text.len() < range.end {
        return Err(ParseError::WindowTooShort {
            needed: range.end,
            got: text.len(),
        });
    }
    let position = range.start;
    // Fails only when the range splits a multi-byte character
    text.get(range).ok_or(ParseError::NoDigits { position })
}

/// Tight 32-bit hex parse, as used for digest seeds
pub fn parse_hex_seed(window: &str) -> Result<i32, ParseError> {
    parse_int(window, ParseOptions::new(Radix::Hex).tight()).map(|parsed| parsed.value)
}
