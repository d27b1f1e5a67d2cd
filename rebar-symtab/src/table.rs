//! Symbol table: a trie paired with its token-offset table.
//!
//! The two artifacts come out of the same generator run and are only
//! meaningful together. `SymbolTable` binds them, applies the configured
//! limits and inconsistency policy, and can self-check the pair.

use crate::config::{InconsistencyPolicy, SymbolTableConfig};
use crate::error::{Inconsistency, Result, SymtabError};
use crate::read::reverse;
use crate::token::{Token, TokenOffsets};
use crate::trie::Trie;

/// Bidirectional symbol ↔ token map over generated artifacts.
#[derive(Debug, Clone)]
pub struct SymbolTable<'a> {
    trie: Trie<'a>,
    offsets: TokenOffsets<'a>,
    config: SymbolTableConfig,
}

impl<'a> SymbolTable<'a> {
    /// Create a table with the default configuration.
    pub fn new(trie: Trie<'a>, offsets: TokenOffsets<'a>) -> Result<Self> {
        Self::with_config(trie, offsets, SymbolTableConfig::default())
    }

    /// Create a table with an explicit configuration.
    ///
    /// Fails if the offset table has more entries than a token can address.
    pub fn with_config(
        trie: Trie<'a>,
        offsets: TokenOffsets<'a>,
        config: SymbolTableConfig,
    ) -> Result<Self> {
        let capacity = Token::MAX.as_usize() + 1;
        if offsets.len() > capacity {
            return Err(SymtabError::Malformed(format!(
                "offset table has {} entries, tokens address at most {capacity}",
                offsets.len()
            )));
        }
        Ok(Self {
            trie,
            offsets,
            config,
        })
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn trie(&self) -> Trie<'a> {
        self.trie
    }

    pub fn offsets(&self) -> TokenOffsets<'a> {
        self.offsets
    }

    pub fn config(&self) -> &SymbolTableConfig {
        &self.config
    }

    /// Token assigned to `symbol`.
    pub fn token(&self, symbol: &str) -> Option<Token> {
        self.trie.find_token(symbol)
    }

    /// Symbol for `token`, subject to the configured length limit and
    /// inconsistency policy.
    pub fn symbol(&self, token: Token) -> Result<String> {
        match self.decode(token) {
            Err(err)
                if err.is_inconsistent()
                    && self.config.on_inconsistent == InconsistencyPolicy::NotFound =>
            {
                tracing::warn!(
                    %token,
                    error = %err,
                    "inconsistent symbol table; reporting token as not found"
                );
                Err(SymtabError::NotFound {
                    token: token.as_u16() as i64,
                })
            }
            other => other,
        }
    }

    /// All `(token, symbol)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, Result<String>)> + '_ {
        self.tokens().map(move |token| (token, self.symbol(token)))
    }

    /// Check that every token decodes and that each symbol looks up to the
    /// token it came from.
    ///
    /// Ignores the inconsistency policy: any fault is returned. Since lookup
    /// is deterministic, passing also means no two tokens share a symbol.
    pub fn verify(&self) -> Result<()> {
        let _span = tracing::debug_span!("symtab_verify", tokens = self.len()).entered();

        for token in self.tokens() {
            let symbol = self.decode(token)?;
            if self.trie.find_token(&symbol) != Some(token) {
                let offset = self.offsets.get(token).unwrap_or_default();
                return Err(SymtabError::inconsistent(offset, Inconsistency::RoundTrip));
            }
        }

        tracing::debug!(tokens = self.len(), "symbol table verified");
        Ok(())
    }

    fn tokens(&self) -> impl Iterator<Item = Token> {
        // len() is capped at Token::MAX + 1 by the constructor
        (0..self.len() as u16).filter_map(Token::new)
    }

    fn decode(&self, token: Token) -> Result<String> {
        reverse::decode_symbol(
            self.trie.as_bytes(),
            self.offsets,
            token.as_u16() as i64,
            self.config.max_symbol_len,
        )
    }
}
