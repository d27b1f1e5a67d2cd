#![allow(dead_code)]

pub mod tracing;
pub mod trie_writer;

use rebar_symtab::{SymbolTable, Token, TokenOffsets, Trie};

pub fn tok(n: u16) -> Token {
    Token::new(n).expect("token in range")
}

pub fn table<'a>(trie: &'a [u8], offsets: &'a [u16]) -> SymbolTable<'a> {
    let trie = Trie::from_bytes(trie).expect("valid trie");
    SymbolTable::new(trie, TokenOffsets::new(offsets)).expect("offset table fits")
}
