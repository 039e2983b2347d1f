//! Two-character coda tokens: a rhythm letter followed by a tempo digit.
//!
//! The letter is `a` + rhythm class, upper-cased when the coda carries an
//! ornament click. The digit is tempo class + 1. A rubato marker, when known,
//! is prefixed by the renderer (`/a3`, `-B2`, `\c1`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::{CodaEvent, RHYTHM_CLASSES, TEMPO_CLASSES};
use super::rubato::RubatoMarker;
use crate::error::{Result, TranscriptError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token as it appears in the transcript, with the rubato marker in front.
    pub fn with_rubato(&self, marker: Option<RubatoMarker>) -> String {
        match marker {
            Some(marker) => format!("{}{}", marker.as_char(), self.0),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category fields recovered from a base token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub rhythm_class: u8,
    pub ornamented: bool,
    pub tempo_class: u8,
}

pub struct SymbolEncoder;

impl SymbolEncoder {
    pub fn encode_parts(rhythm_class: u8, ornamented: bool, tempo_class: u8) -> Result<Symbol> {
        if rhythm_class >= RHYTHM_CLASSES || tempo_class >= TEMPO_CLASSES {
            return Err(TranscriptError::InvalidCategory {
                rhythm_class,
                tempo_class,
            });
        }
        let letter = (b'a' + rhythm_class) as char;
        let letter = if ornamented {
            letter.to_ascii_uppercase()
        } else {
            letter
        };
        Ok(Symbol(format!("{}{}", letter, tempo_class + 1)))
    }

    pub fn encode(event: &CodaEvent) -> Result<Symbol> {
        Self::encode_parts(event.rhythm_class, event.ornamented, event.tempo_class)
    }

    /// Inverse of [`SymbolEncoder::encode_parts`]. Accepts base tokens only.
    pub fn decode(token: &str) -> Option<DecodedSymbol> {
        let mut chars = token.chars();
        let letter = chars.next()?;
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() || !letter.is_ascii_alphabetic() {
            return None;
        }
        let rhythm_class = (letter.to_ascii_lowercase() as u8).checked_sub(b'a')?;
        if rhythm_class >= RHYTHM_CLASSES || digit == 0 || digit > TEMPO_CLASSES as u32 {
            return None;
        }
        Some(DecodedSymbol {
            rhythm_class,
            ornamented: letter.is_ascii_uppercase(),
            tempo_class: (digit - 1) as u8,
        })
    }
}
