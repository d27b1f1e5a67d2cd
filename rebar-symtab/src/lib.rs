//! Read-side codec for packed symbol-table tries.
//!
//! A symbol table maps short 7-bit strings to small integer tokens. The
//! generator (outside this crate) serializes the symbols into a compressed
//! prefix tree, one flat byte buffer, plus a token-offset table giving the
//! position of each token's field in that buffer. This crate answers both
//! directions without allocating into or copying the buffer:
//!
//! - **forward** (symbol → token): [`find_token`], a single pass
//!   guided by the needle.
//! - **reverse** (token → symbol): [`find_string`], a walk toward the
//!   token's field offset that collects the characters on the way down.
//!
//! See [`format`] for the wire format. [`SymbolTable`] binds a validated
//! [`Trie`] to its [`TokenOffsets`] and adds configuration and a self-check.

pub mod config;
pub mod error;
pub mod format;
pub mod read;
pub mod table;
pub mod token;
pub mod trie;

pub use config::{InconsistencyPolicy, SymbolTableConfig};
pub use error::{Inconsistency, Result, SymtabError};
pub use read::{find_string, find_token, try_find_token};
pub use table::SymbolTable;
pub use token::{Token, TokenOffsets};
pub use trie::Trie;
