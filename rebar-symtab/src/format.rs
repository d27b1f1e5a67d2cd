//! Packed symbol trie wire format.
//!
//! The trie is one flat byte buffer. Every byte below `0x80` is a
//! character (or EOS/DIFS); bytes with the high bit set are control
//! markers or the high byte of a jump/token field.
//!
//! ## Node kinds
//!
//! ```text
//! EOFILE     [0x80]                       end of buffer, no match
//! EOD        [0x81] [hi] [lo]             empty final string, token follows
//! mark       [0x00] [hi] [lo]             token for the prefix consumed so far
//! slide      [0x80|N] c1 .. cN            N-char run, cN starts the next node
//! branch     [c] [0x80|jhi] [jlo]         match c and descend, or jump
//! single     [c] [0x01] [hi] [lo]         one-char final string
//! final      [c] [c2] .. [0x80|hi] [lo]   final string, >= 2 chars
//! ```
//!
//! Inside final strings and slide runs, `[0x00] [hi] [lo]` stores the token
//! of the prefix ending just before it; the run continues afterwards.
//!
//! ## Fields
//!
//! - token: `((hi & 0x7F) << 8) | lo`, 15 bits. Final strings set the high
//!   bit of `hi` to terminate the run.
//! - jump: `((jhi & 0x7F) << 8) | jlo`, measured from the `jhi` byte. The
//!   destination is the next sibling of the branch's child subtree.
//! - slide count: `N >= 2`; 0 and 1 would collide with EOFILE and EOD.
//!
//! Branch children are laid out in ascending byte order. The last child of
//! a node has no branch header: it is a final string, a single, or a slide.

use crate::error::{Inconsistency, Result, SymtabError};
use crate::token::Token;

/// End of the whole buffer.
pub const EOFILE: u8 = 0x80;
/// Empty final string; a token field follows.
pub const EOD: u8 = 0x81;
/// Inline token marker inside a string or run.
pub const EOS: u8 = 0x00;
/// Second byte of a one-character final string.
pub const DIFS: u8 = 0x01;

/// High bit: control marker / field terminator.
pub const CONTROL_BIT: u8 = 0x80;

/// Size of a token field, and of a branch's jump field.
pub const FIELD_SIZE: usize = 2;

/// Node kind at a cursor position, produced by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    EndOfFile,
    /// Token field at `pos + 1`.
    EndOfData,
    /// Leading EOS: token field at `pos + 1`, children start at `pos + 3`.
    Mark,
    /// `count` run characters start at `pos + 1`.
    Slide { count: u8 },
    /// Child at `pos + 3`, sibling at `pos + 1 + jump`.
    Branch { byte: u8, jump: u16 },
    /// Token field at `pos + 2`.
    Single { byte: u8 },
    /// Run starts at `pos`, ends at an EOS'd token or a terminator field.
    Final,
}

/// True for a byte that may appear in a needle.
#[inline]
pub fn is_symbol_byte(b: u8) -> bool {
    b != EOS && b != DIFS && b & CONTROL_BIT == 0
}

/// Bounds-checked byte read.
#[inline]
pub(crate) fn byte_at(data: &[u8], pos: usize) -> Result<u8> {
    data.get(pos)
        .copied()
        .ok_or_else(|| SymtabError::inconsistent(pos, Inconsistency::Truncated))
}

/// Decode the token field starting at `pos`.
#[inline]
pub(crate) fn token_at(data: &[u8], pos: usize) -> Result<Token> {
    let hi = byte_at(data, pos)?;
    let lo = byte_at(data, pos + 1)?;
    Ok(Token::from_field(hi, lo))
}

/// Classify the node starting at `pos`.
pub(crate) fn classify(data: &[u8], pos: usize) -> Result<Node> {
    let b = byte_at(data, pos)?;
    let node = match b {
        EOFILE => Node::EndOfFile,
        EOD => Node::EndOfData,
        EOS => Node::Mark,
        // counts 0 and 1 are EOFILE/EOD above
        _ if b & CONTROL_BIT != 0 => Node::Slide {
            count: b & !CONTROL_BIT,
        },
        _ => {
            let next = byte_at(data, pos + 1)?;
            if next & CONTROL_BIT != 0 {
                let lo = byte_at(data, pos + 2)?;
                Node::Branch {
                    byte: b,
                    jump: (((next & !CONTROL_BIT) as u16) << 8) | lo as u16,
                }
            } else if next == DIFS {
                Node::Single { byte: b }
            } else {
                Node::Final
            }
        }
    };
    Ok(node)
}
