//! LR(1) Recognizer
//!
//! A Rust implementation of a canonical LR(1) recognizer for context-free
//! grammars: FIRST-set computation, LR(1) item-set closure and canonical
//! collection construction, ACTION/GOTO table compilation with conflict
//! detection, and a shift/reduce recognition driver.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

mod cli;
mod error;
mod first_follow;
mod grammar;
mod input;
mod lr0;
mod lr1;
mod symbol;

use std::process;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
