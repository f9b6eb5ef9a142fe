//! Error types for the LR(1) recognizer.

use thiserror::Error;

/// The three ways an ACTION-table cell can end up with two distinct actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
    /// `accept` competing with a shift or reduce on `$` in the same state.
    AcceptConflict,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConflictKind::ShiftReduce => "shift/reduce",
            ConflictKind::ReduceReduce => "reduce/reduce",
            ConflictKind::AcceptConflict => "accept conflict",
        };
        write!(f, "{}", s)
    }
}

/// Errors that can occur while building a grammar or fitting an automaton.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("start symbol `{0}` is not a declared nonterminal")]
    UnknownStart(String),

    #[error("symbol `{0}` is used in a production but was not declared as a terminal or nonterminal")]
    UndeclaredSymbol(String),

    #[error("terminal and nonterminal sets are not disjoint: `{0}` appears in both")]
    NotDisjoint(String),

    #[error("augmented start symbol `{0}` collides with an existing nonterminal")]
    AugmentedStartCollision(String),

    #[error("grammar must contain at least one production")]
    EmptyProductions,

    #[error("grammar is not LR(1): {kind} conflict in state {state} on lookahead `{terminal}`")]
    NotLr1 {
        state: usize,
        terminal: String,
        kind: ConflictKind,
    },

    #[error("invalid grammar format: {0}")]
    InvalidFormat(String),

    #[error("invalid production line: {0}")]
    InvalidProduction(String),

    #[error("empty grammar input")]
    EmptyInput,

    #[error("not enough input lines: expected {expected}, got {actual}")]
    NotEnoughLines { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
