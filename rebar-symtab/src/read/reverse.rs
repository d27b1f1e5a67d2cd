//! Reverse lookup: token → symbol.
//!
//! Walks the trie from byte 0 toward the token's field offset, taken from
//! the token-offset table. At each branch the walk descends only if the
//! target lies inside the child subtree; otherwise it jumps. Characters
//! consumed on the way down are the symbol. The token stored at the target
//! is checked against the requested one before the symbol is returned.

use super::Step;
use crate::error::{Inconsistency, Result, SymtabError};
use crate::format::{byte_at, classify, token_at, Node, CONTROL_BIT, EOS, FIELD_SIZE};
use crate::token::{Token, TokenOffsets};

/// Rebuild the symbol for `token`.
///
/// `offsets[t]` is the byte offset of token `t`'s field in `trie`. Fails
/// with `OutOfRange` for ids outside the table, `NotFound` for a 0 entry,
/// and `Inconsistent` when the trie and table disagree.
pub fn find_string(trie: &[u8], offsets: &[u16], token: i64) -> Result<String> {
    decode_symbol(trie, TokenOffsets::new(offsets), token, usize::MAX)
}

pub(crate) fn decode_symbol(
    trie: &[u8],
    offsets: TokenOffsets<'_>,
    token: i64,
    max_len: usize,
) -> Result<String> {
    let (token, target) = offsets.resolve(token)?;
    if target == 0 {
        return Err(SymtabError::NotFound {
            token: token.as_u16() as i64,
        });
    }

    let _span = tracing::trace_span!("symtab_find_string", token = token.as_u16()).entered();
    let walk = SymbolWalk {
        trie,
        token,
        target,
        max_len,
        out: String::new(),
    };
    walk.run().inspect_err(|err| {
        tracing::debug!(error = %err, offset = target, "token did not decode");
    })
}

/// Walk state for one reverse lookup.
struct SymbolWalk<'a> {
    trie: &'a [u8],
    token: Token,
    /// Offset of the token's field.
    target: usize,
    max_len: usize,
    out: String,
}

impl SymbolWalk<'_> {
    fn run(mut self) -> Result<String> {
        let mut pos = 0usize;
        loop {
            if pos >= self.target {
                return Err(SymtabError::inconsistent(pos, Inconsistency::Overshoot));
            }
            match classify(self.trie, pos)? {
                Node::EndOfFile => {
                    return Err(SymtabError::inconsistent(
                        pos,
                        Inconsistency::UnexpectedEndOfFile,
                    ));
                }
                Node::EndOfData => return self.land(pos + 1),
                Node::Mark => {
                    if pos + 1 == self.target {
                        return self.land(pos + 1);
                    }
                    pos += 1 + FIELD_SIZE;
                }
                Node::Branch { byte, jump } => {
                    let sibling = pos + 1 + jump as usize;
                    if sibling <= self.target {
                        pos = sibling;
                    } else {
                        self.push(byte, pos)?;
                        pos += 1 + FIELD_SIZE;
                    }
                }
                Node::Single { byte } => {
                    self.push(byte, pos)?;
                    return self.land(pos + 2);
                }
                Node::Final => return self.final_string(pos),
                Node::Slide { count } => match self.slide(pos + 1, count)? {
                    Step::Done(symbol) => return Ok(symbol),
                    Step::Resume(next) => pos = next,
                },
            }
        }
    }

    fn final_string(&mut self, mut pos: usize) -> Result<String> {
        loop {
            if pos > self.target {
                return Err(SymtabError::inconsistent(pos, Inconsistency::Overshoot));
            }
            let b = byte_at(self.trie, pos)?;
            if b == EOS {
                if pos + 1 == self.target {
                    return self.land(pos + 1);
                }
                pos += 1 + FIELD_SIZE;
                continue;
            }
            if b & CONTROL_BIT != 0 {
                return self.land(pos);
            }
            self.push(b, pos)?;
            pos += 1;
        }
    }

    fn slide(&mut self, mut pos: usize, mut count: u8) -> Result<Step<String>> {
        loop {
            if pos > self.target {
                return Err(SymtabError::inconsistent(pos, Inconsistency::Overshoot));
            }
            let b = byte_at(self.trie, pos)?;
            if b == EOS {
                if pos + 1 == self.target {
                    return self.land(pos + 1).map(Step::Done);
                }
                pos += 1 + FIELD_SIZE;
                continue;
            }
            if b & CONTROL_BIT != 0 {
                return Err(SymtabError::inconsistent(
                    pos,
                    Inconsistency::ControlByteInRun(b),
                ));
            }
            if count == 1 {
                return Ok(Step::Resume(pos));
            }
            self.push(b, pos)?;
            pos += 1;
            count -= 1;
        }
    }

    fn push(&mut self, b: u8, pos: usize) -> Result<()> {
        if self.out.len() >= self.max_len {
            return Err(SymtabError::inconsistent(pos, Inconsistency::SymbolTooLong));
        }
        // literal bytes are 7-bit, so each is one char
        self.out.push(char::from(b));
        Ok(())
    }

    /// The walk reached a token field at `pos`; it must be the target.
    fn land(&mut self, pos: usize) -> Result<String> {
        if pos != self.target {
            let reason = if pos < self.target {
                Inconsistency::DeadEnd
            } else {
                Inconsistency::Overshoot
            };
            return Err(SymtabError::inconsistent(pos, reason));
        }
        let found = token_at(self.trie, pos)?;
        if found != self.token {
            return Err(SymtabError::inconsistent(
                pos,
                Inconsistency::TokenMismatch {
                    expected: self.token,
                    found: found.as_u16(),
                },
            ));
        }
        Ok(std::mem::take(&mut self.out))
    }
}
