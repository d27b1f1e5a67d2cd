//! Error types for symbol table lookups.

use std::fmt;
use thiserror::Error;

use crate::token::Token;

/// Structural fault found while walking a trie.
///
/// Every variant points at a defect in the generated artifact (or at a
/// trie/offset-table pair that do not belong together), never at the
/// caller's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A read ran past the end of the buffer.
    Truncated,
    /// The token field at the target offset stores a different token.
    TokenMismatch { expected: Token, found: u16 },
    /// The walk moved past the target offset without landing on it.
    Overshoot,
    /// The walk reached a leaf's token field before the target offset.
    DeadEnd,
    /// EOFILE reached before the target offset.
    UnexpectedEndOfFile,
    /// A byte with the high bit set inside a slide run.
    ControlByteInRun(u8),
    /// The rebuilt symbol is longer than the configured maximum.
    SymbolTooLong,
    /// A symbol does not look up to the token it was decoded from.
    RoundTrip,
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::Truncated => f.write_str("truncated trie"),
            Inconsistency::TokenMismatch { expected, found } => {
                write!(f, "token field holds {found}, expected {expected}")
            }
            Inconsistency::Overshoot => f.write_str("walk passed the target offset"),
            Inconsistency::DeadEnd => f.write_str("leaf ended before the target offset"),
            Inconsistency::UnexpectedEndOfFile => f.write_str("EOFILE before target offset"),
            Inconsistency::ControlByteInRun(b) => {
                write!(f, "control byte 0x{b:02X} inside slide run")
            }
            Inconsistency::SymbolTooLong => f.write_str("symbol exceeds maximum length"),
            Inconsistency::RoundTrip => f.write_str("symbol does not map back to its token"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymtabError {
    /// No symbol is reachable for this token.
    #[error("token {token} not found")]
    NotFound { token: i64 },

    /// Requested token id is outside `[0, count)`.
    #[error("token {token} out of range (table has {count} tokens)")]
    OutOfRange { token: i64, count: usize },

    /// The trie and offset table disagree with each other or with the format.
    #[error("inconsistent trie at offset {offset}: {reason}")]
    Inconsistent { offset: usize, reason: Inconsistency },

    /// The buffer failed up-front validation.
    #[error("malformed trie: {0}")]
    Malformed(String),
}

impl SymtabError {
    pub(crate) fn inconsistent(offset: usize, reason: Inconsistency) -> Self {
        SymtabError::Inconsistent { offset, reason }
    }

    /// True for errors that indicate a corrupt or mismatched artifact.
    pub fn is_inconsistent(&self) -> bool {
        matches!(
            self,
            SymtabError::Inconsistent { .. } | SymtabError::Malformed(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SymtabError>;
