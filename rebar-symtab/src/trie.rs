//! Validated view over a trie buffer.

use crate::error::{Result, SymtabError};
use crate::format::EOFILE;
use crate::read::{forward, reverse};
use crate::token::{Token, TokenOffsets};

/// A trie buffer that passed up-front validation.
///
/// Borrowed and immutable, so one buffer can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Trie<'a> {
    data: &'a [u8],
}

impl<'a> Trie<'a> {
    /// Wrap a generated trie buffer.
    ///
    /// The buffer must be non-empty and end with EOFILE. Deeper structure is
    /// checked lazily by each lookup.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        match data.last() {
            None => Err(SymtabError::Malformed("empty trie buffer".into())),
            Some(&EOFILE) => Ok(Self { data }),
            Some(&b) => Err(SymtabError::Malformed(format!(
                "trie must end with EOFILE (0x{EOFILE:02X}), found 0x{b:02X}"
            ))),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a validated trie; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Token for `symbol`, or `None` (see [`forward::find_token`]).
    pub fn find_token(&self, symbol: &str) -> Option<Token> {
        forward::find_token(self.data, symbol)
    }

    /// Token for `symbol`, with structural faults reported as errors.
    pub fn try_find_token(&self, symbol: &[u8]) -> Result<Option<Token>> {
        forward::try_find_token(self.data, symbol)
    }

    /// Symbol for `token`, with no length limit.
    pub fn find_string(&self, offsets: TokenOffsets<'_>, token: i64) -> Result<String> {
        reverse::decode_symbol(self.data, offsets, token, usize::MAX)
    }
}
