//! Symbol table configuration

use serde::{Deserialize, Serialize};

/// What a [`SymbolTable`](crate::SymbolTable) does when a reverse lookup
/// finds the trie and offset table out of step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InconsistencyPolicy {
    /// Return `SymtabError::Inconsistent`.
    #[default]
    Error,
    /// Log a warning and return `SymtabError::NotFound`.
    NotFound,
}

/// Configuration for symbol table lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolTableConfig {
    /// Longest symbol a reverse lookup will rebuild.
    ///
    /// A walk that would produce more characters is reported as
    /// inconsistent.
    /// Default: 255
    pub max_symbol_len: usize,

    /// Handling of inconsistent artifacts in reverse lookups.
    ///
    /// Default: `Error`
    pub on_inconsistent: InconsistencyPolicy,
}

/// Default maximum symbol length.
pub const DEFAULT_MAX_SYMBOL_LEN: usize = 255;

impl Default for SymbolTableConfig {
    fn default() -> Self {
        Self {
            max_symbol_len: DEFAULT_MAX_SYMBOL_LEN,
            on_inconsistent: InconsistencyPolicy::Error,
        }
    }
}

impl SymbolTableConfig {
    /// Degrade inconsistencies to "not found" instead of failing.
    pub fn lenient() -> Self {
        Self {
            on_inconsistent: InconsistencyPolicy::NotFound,
            ..Self::default()
        }
    }

    pub fn with_max_symbol_len(mut self, max_symbol_len: usize) -> Self {
        self.max_symbol_len = max_symbol_len;
        self
    }
}
