//! Token ids and the token-offset table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SymtabError;

/// A symbol's id: 15 bits, stored in the trie as `[hi & 0x7F][lo]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Token(u16);

impl Token {
    /// Largest token a 2-byte field can hold.
    pub const MAX: Token = Token(0x7FFF);

    /// `None` when `value` does not fit in 15 bits.
    #[inline]
    pub const fn new(value: u16) -> Option<Token> {
        if value <= Self::MAX.0 {
            Some(Token(value))
        } else {
            None
        }
    }

    /// Decode a 2-byte token field. The high bit of `hi` is a marker, not data.
    #[inline]
    pub(crate) const fn from_field(hi: u8, lo: u8) -> Token {
        Token((((hi & 0x7F) as u16) << 8) | lo as u16)
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Token> for u16 {
    fn from(token: Token) -> u16 {
        token.0
    }
}

impl TryFrom<u16> for Token {
    type Error = SymtabError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Token::new(value).ok_or(SymtabError::OutOfRange {
            token: value as i64,
            count: Token::MAX.as_usize() + 1,
        })
    }
}

impl TryFrom<i64> for Token {
    type Error = SymtabError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Token::new)
            .ok_or(SymtabError::OutOfRange {
                token: value,
                count: Token::MAX.as_usize() + 1,
            })
    }
}

impl TryFrom<usize> for Token {
    type Error = SymtabError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .unwrap_or(i64::MAX)
            .try_into()
    }
}

/// Token id → byte offset of that token's 2-byte field in the trie.
///
/// Entries follow the generator's numbering, not serialization order, so
/// no ordering is assumed. No token field can start at byte 0 (the first
/// node needs at least one byte ahead of it), which lets generated tables
/// use 0 as a terminator.
#[derive(Debug, Clone, Copy)]
pub struct TokenOffsets<'a> {
    offsets: &'a [u16],
}

impl<'a> TokenOffsets<'a> {
    pub fn new(offsets: &'a [u16]) -> Self {
        Self { offsets }
    }

    /// Take entries up to (not including) the first 0.
    pub fn from_zero_terminated(offsets: &'a [u16]) -> Self {
        let end = offsets
            .iter()
            .position(|&o| o == 0)
            .unwrap_or(offsets.len());
        Self {
            offsets: &offsets[..end],
        }
    }

    /// Number of tokens in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of `token`'s field, or `None` past the end of the table.
    #[inline]
    pub fn get(&self, token: Token) -> Option<usize> {
        self.offsets.get(token.as_usize()).map(|&o| o as usize)
    }

    /// Resolve a caller-supplied id, bounds-checked against this table.
    pub(crate) fn resolve(&self, token: i64) -> Result<(Token, usize), SymtabError> {
        let out_of_range = SymtabError::OutOfRange {
            token,
            count: self.len(),
        };
        let token = Token::try_from(token).map_err(|_| out_of_range.clone())?;
        let offset = self.get(token).ok_or(out_of_range)?;
        Ok((token, offset))
    }

    pub fn as_slice(&self) -> &'a [u16] {
        self.offsets
    }
}
