//! Forward lookup: symbol → token.
//!
//! Single pass over the trie. The cursor only moves forward: a
//! branch either descends into its inline child or jumps to its sibling,
//! and a slide hands its last character back as the start of the next node.

use std::cmp::Ordering;

use super::Step;
use crate::error::{Inconsistency, Result, SymtabError};
use crate::format::{
    byte_at, classify, is_symbol_byte, token_at, Node, CONTROL_BIT, EOS, FIELD_SIZE,
};
use crate::token::Token;

/// Look up the token for `needle`.
///
/// Returns `None` when the needle is not in the trie. A structurally broken
/// trie is also reported as `None` (and logged); use [`try_find_token`] to
/// tell the two apart.
pub fn find_token(trie: &[u8], needle: &str) -> Option<Token> {
    match try_find_token(trie, needle.as_bytes()) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(error = %err, needle, "symbol lookup hit an inconsistent trie");
            None
        }
    }
}

/// Look up the token for `needle`, surfacing structural faults as errors.
pub fn try_find_token(trie: &[u8], needle: &[u8]) -> Result<Option<Token>> {
    // reserved bytes can never be matched
    if !needle.iter().all(|&b| is_symbol_byte(b)) {
        return Ok(None);
    }

    let mut pos = 0usize;
    let mut i = 0usize;
    loop {
        match classify(trie, pos)? {
            Node::EndOfFile => return Ok(None),
            Node::EndOfData => {
                return if i == needle.len() {
                    token_at(trie, pos + 1).map(Some)
                } else {
                    Ok(None)
                };
            }
            Node::Mark => {
                if i == needle.len() {
                    return token_at(trie, pos + 1).map(Some);
                }
                pos += 1 + FIELD_SIZE;
            }
            Node::Branch { byte, jump } => {
                let Some(&c) = needle.get(i) else {
                    return Ok(None);
                };
                match c.cmp(&byte) {
                    Ordering::Equal => {
                        i += 1;
                        pos += 1 + FIELD_SIZE;
                    }
                    Ordering::Greater => pos += 1 + jump as usize,
                    Ordering::Less => return Ok(None),
                }
            }
            Node::Single { byte } => {
                return if needle[i..] == [byte] {
                    token_at(trie, pos + 2).map(Some)
                } else {
                    Ok(None)
                };
            }
            Node::Final => return match_final(trie, pos, &needle[i..]),
            Node::Slide { count } => match match_slide(trie, pos + 1, count, needle, &mut i)? {
                Step::Done(found) => return Ok(found),
                Step::Resume(next) => pos = next,
            },
        }
    }
}

/// Match the rest of the needle against a final string starting at `pos`.
fn match_final(trie: &[u8], mut pos: usize, mut rest: &[u8]) -> Result<Option<Token>> {
    loop {
        let b = byte_at(trie, pos)?;
        if b == EOS {
            if rest.is_empty() {
                return token_at(trie, pos + 1).map(Some);
            }
            pos += 1 + FIELD_SIZE;
            continue;
        }
        if b & CONTROL_BIT != 0 {
            // terminator: high byte of the final token
            return if rest.is_empty() {
                token_at(trie, pos).map(Some)
            } else {
                Ok(None)
            };
        }
        match rest.split_first() {
            Some((&c, tail)) if c == b => {
                rest = tail;
                pos += 1;
            }
            _ => return Ok(None),
        }
    }
}

/// Match a slide run of `count` characters starting at `pos`.
///
/// The last character is not consumed; its position is returned so the
/// caller can classify it as the next node.
fn match_slide(
    trie: &[u8],
    mut pos: usize,
    mut count: u8,
    needle: &[u8],
    i: &mut usize,
) -> Result<Step<Option<Token>>> {
    loop {
        let b = byte_at(trie, pos)?;
        if b == EOS {
            if *i == needle.len() {
                return token_at(trie, pos + 1).map(|t| Step::Done(Some(t)));
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
        if needle.get(*i) != Some(&b) {
            return Ok(Step::Done(None));
        }
        *i += 1;
        pos += 1;
        count -= 1;
    }
}
