//! CLI module for the recognizer application.

use crate::input::read_input;
use crate::lr1::Lr1Automaton;
use crate::symbol::string_to_symbols;
use std::io::{self, Write};

/// Main CLI runner: reads a grammar and a batch of query words from stdin,
/// fits an LR(1) automaton, and prints one `Yes`/`No` line per query.
///
/// A grammar that fails to build or fails to fit as LR(1) is reported the
/// same way a rejected word is: `No` for every pending query, on stdout,
/// with the underlying error on stderr. The process exit code stays 0 —
/// only I/O failures on the output stream propagate as an error.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let parsed = match read_input(stdin.lock()) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("Error: {}", err);
            return Ok(());
        }
    };

    let query_count = parsed.queries.len();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match Lr1Automaton::fit(parsed.grammar) {
        Ok(automaton) => {
            for query in &parsed.queries {
                let word = string_to_symbols(query);
                let verdict = if automaton.predict(&word) { "Yes" } else { "No" };
                writeln!(out, "{}", verdict)?;
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            for _ in 0..query_count {
                writeln!(out, "No")?;
            }
        }
    }

    Ok(())
}
