//! Short share codes.
//!
//! A share code is the human-typeable handle for a shared cart: seven
//! symbols drawn from a 32-glyph alphabet that excludes the visually
//! ambiguous I, O, 0 and 1. Codes are stored and displayed uppercase;
//! parsing accepts any case.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbols valid in a share code.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of every share code.
pub const CODE_LEN: usize = 7;

/// Canonical (uppercase) share code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Draw a uniformly random candidate code.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LEN)
            .filter_map(|_| ALPHABET.choose(rng))
            .map(|&b| char::from(b))
            .collect();

        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl FromStr for ShortCode {
    type Err = ParseShortCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CODE_LEN {
            return Err(ParseShortCodeError::Length(s.len()));
        }

        let canonical = s.to_ascii_uppercase();

        if let Some(symbol) = canonical.bytes().find(|b| !ALPHABET.contains(b)) {
            return Err(ParseShortCodeError::Symbol(char::from(symbol)));
        }

        Ok(Self(canonical))
    }
}

impl TryFrom<String> for ShortCode {
    type Error = ParseShortCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Failure to parse a share code from caller input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseShortCodeError {
    #[error("share codes are {CODE_LEN} characters, got {0}")]
    Length(usize),

    #[error("invalid share code symbol {0:?}")]
    Symbol(char),
}
