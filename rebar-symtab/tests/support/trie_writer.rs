//! Test-only trie writer.
//!
//! Emits the packed format for a symbol set so lookups can be checked over
//! generated tables. Children are laid out in ascending byte order; the
//! last child of a node is written inline (slide, final string or DIFS),
//! the others behind branch headers.

use std::collections::BTreeMap;

use rebar_symtab::format::{CONTROL_BIT, DIFS, EOD, EOFILE, EOS};

#[derive(Default)]
struct Node {
    children: BTreeMap<u8, Node>,
    token: Option<u16>,
}

/// A generated trie and its offset table.
pub struct Written {
    pub trie: Vec<u8>,
    pub offsets: Vec<u16>,
}

/// Write `symbols`, assigning token `t` to `symbols[t]`.
pub fn write_trie(symbols: &[&str]) -> Written {
    let entries: Vec<(u16, &str)> = symbols
        .iter()
        .enumerate()
        .map(|(t, s)| (u16::try_from(t).expect("token fits u16"), *s))
        .collect();
    write_trie_with_tokens(&entries)
}

/// Write explicit `(token, symbol)` pairs. Offset entries for ids that are
/// not assigned stay 0.
pub fn write_trie_with_tokens(entries: &[(u16, &str)]) -> Written {
    let mut root = Node::default();
    for &(token, symbol) in entries {
        let mut node = &mut root;
        for &b in symbol.as_bytes() {
            node = node.children.entry(b).or_default();
        }
        assert!(node.token.is_none(), "duplicate symbol {symbol:?}");
        node.token = Some(token);
    }

    let slots = entries.iter().map(|&(t, _)| t as usize + 1).max().unwrap_or(0);
    let mut writer = Writer {
        out: Vec::new(),
        offsets: vec![0; slots],
    };
    writer.node(&root);
    writer.out.push(EOFILE);
    assert!(writer.out.len() <= u16::MAX as usize, "trie too large for u16 offsets");

    Written {
        trie: writer.out,
        offsets: writer.offsets,
    }
}

struct Writer {
    out: Vec<u8>,
    offsets: Vec<u16>,
}

impl Writer {
    fn token(&mut self, token: u16, terminator: bool) {
        assert!(token <= 0x7FFF, "token {token} out of range");
        self.offsets[token as usize] = self.out.len() as u16;
        let hi = (token >> 8) as u8;
        let hi = if terminator { hi | CONTROL_BIT } else { hi };
        self.out.push(hi);
        self.out.push(token as u8);
    }

    /// Content of `node` once its prefix has been consumed.
    fn node(&mut self, node: &Node) {
        match node.token {
            Some(token) if node.children.is_empty() => {
                self.out.push(EOD);
                self.token(token, false);
                return;
            }
            Some(token) => {
                self.out.push(EOS);
                self.token(token, false);
            }
            None => {}
        }
        self.children(node);
    }

    fn children(&mut self, node: &Node) {
        let Some((&last, last_child)) = node.children.iter().next_back() else {
            return;
        };
        for (&byte, child) in node.children.range(..last) {
            let start = self.out.len();
            self.out.extend_from_slice(&[byte, 0, 0]);
            self.node(child);
            let jump = self.out.len() - start - 1;
            assert!(jump < 0x8000, "jump {jump} too long");
            self.out[start + 1] = CONTROL_BIT | (jump >> 8) as u8;
            self.out[start + 2] = jump as u8;
        }
        self.last_child(last, last_child);
    }

    fn last_child(&mut self, byte: u8, child: &Node) {
        let mut chain = vec![(byte, child)];
        let mut tail = child;
        while tail.children.len() == 1 {
            let (&b, next) = tail.children.iter().next().expect("one child");
            chain.push((b, next));
            tail = next;
        }

        if tail.children.is_empty() {
            if chain.len() == 1 {
                self.out.extend_from_slice(&[byte, DIFS]);
                self.token(child.token.expect("leaf has a token"), false);
                return;
            }
            let last = chain.len() - 1;
            for (i, &(b, node)) in chain.iter().enumerate() {
                self.out.push(b);
                if i == last {
                    self.token(node.token.expect("leaf has a token"), true);
                } else if let Some(token) = node.token {
                    self.out.push(EOS);
                    self.token(token, false);
                }
            }
            return;
        }

        // the branching node's first child byte closes the slide
        let count = chain.len() + 1;
        assert!(count <= 0x7F, "slide of {count} too long");
        self.out.push(CONTROL_BIT | count as u8);
        for &(b, node) in &chain {
            self.out.push(b);
            if let Some(token) = node.token {
                self.out.push(EOS);
                self.token(token, false);
            }
        }
        self.children(tail);
    }
}
