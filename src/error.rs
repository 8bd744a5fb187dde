//! Errors raised while setting up a battle.
//!
//! Once a battle is running nothing is surfaced as an error: bad commands are
//! ignored and missing data degrades to a fallback.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("{side} roster is empty")]
    EmptyRoster { side: &'static str },

    #[error("{side} roster has {count} members, at most {max} are allowed")]
    RosterTooLarge {
        side: &'static str,
        count: usize,
        max: usize,
    },

    #[error("{name} knows {count} moves, at most {max} are allowed")]
    TooManyMoves {
        name: String,
        count: usize,
        max: usize,
    },
}
