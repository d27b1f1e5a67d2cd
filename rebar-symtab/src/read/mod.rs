//! Read-side lookups over a packed trie: forward (symbol → token) and
//! reverse (token → symbol).

pub mod forward;
pub mod reverse;

pub use forward::{find_token, try_find_token};
pub use reverse::find_string;

/// Outcome of walking a run (final string or slide).
#[derive(Debug)]
pub(crate) enum Step<T> {
    /// The lookup finished inside the run.
    Done(T),
    /// The run's last character starts the next node at this offset.
    Resume(usize),
}
