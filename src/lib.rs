//! LR(1) Recognizer Library
//!
//! A canonical LR(1) recognizer for context-free grammars: FIRST-set
//! computation, LR(1) item-set closure and canonical collection
//! construction, ACTION/GOTO table compilation with conflict detection, and
//! a shift/reduce recognition driver. An LR(0)/SLR(1) companion automaton
//! (`lr0`) is carried alongside as a lighter-weight alternative for
//! grammars that don't need per-item lookahead.

pub mod cli;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod input;
pub mod lr0;
pub mod lr1;
pub mod symbol;

// Re-export commonly used types
pub use error::{GrammarError, Result};
pub use grammar::{Grammar, Production};
pub use lr0::Lr0Automaton;
pub use lr1::Lr1Automaton;
pub use symbol::Symbol;
