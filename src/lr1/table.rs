//! ACTION/GOTO table construction with shift/reduce and reduce/reduce
//! conflict detection.

use crate::error::{ConflictKind, GrammarError, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::HashMap;

use super::automaton::CanonicalCollection;

/// A single ACTION table entry. Represented as a tagged variant (rather
/// than, say, a signed integer encoding) so conflict detection and the
/// driver's dispatch are both plain case-by-case matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// The compiled ACTION and GOTO tables.
pub struct Tables {
    /// ACTION[state, terminal] -> Action. Absence means reject.
    pub action: HashMap<(usize, Symbol), Action>,
    /// GOTO[state, nonterminal] -> state. Absence means reject.
    pub goto: HashMap<(usize, Symbol), usize>,
}

/// Builds ACTION/GOTO from a canonical collection, failing with `NotLr1` on
/// the first conflicting cell encountered.
///
/// For each state i and item `[A -> α · a β, b]` with a a terminal, sets
/// ACTION[i, a] = shift(δ(i, a)). For each complete item `[A -> α ·, b]`
/// with A ≠ S', sets ACTION[i, b] = reduce(A -> α). For the complete item
/// `[S' -> S ·, $]`, sets ACTION[i, $] = accept. GOTO[i, X] = δ(i, X) for
/// every nonterminal X. Setting an already-set cell to the same action is
/// idempotent; setting it to a different action — shift/reduce,
/// reduce/reduce, or accept colliding with either — is a conflict.
pub fn build_tables(grammar: &Grammar, collection: &CanonicalCollection) -> Result<Tables> {
    let mut action: HashMap<(usize, Symbol), Action> = HashMap::new();
    let mut goto: HashMap<(usize, Symbol), usize> = HashMap::new();

    for (state_idx, state) in collection.states.iter().enumerate() {
        for item in state {
            let production = grammar.production(item.production);

            if item.dot < production.rhs.len() {
                let next = &production.rhs[item.dot];
                if next.is_terminal() {
                    if let Some(&target) = collection.transitions.get(&(state_idx, next.clone())) {
                        set_action(&mut action, state_idx, next.clone(), Action::Shift(target))?;
                    }
                }
            } else if production.lhs == *grammar.augmented_start() {
                if item.lookahead == Symbol::EndMarker {
                    set_action(&mut action, state_idx, Symbol::EndMarker, Action::Accept)?;
                }
            } else {
                set_action(
                    &mut action,
                    state_idx,
                    item.lookahead.clone(),
                    Action::Reduce(item.production),
                )?;
            }
        }

        for nonterminal in grammar.nonterminals() {
            if let Some(&target) = collection.transitions.get(&(state_idx, nonterminal.clone())) {
                goto.insert((state_idx, nonterminal.clone()), target);
            }
        }
    }

    Ok(Tables { action, goto })
}

fn set_action(
    table: &mut HashMap<(usize, Symbol), Action>,
    state: usize,
    terminal: Symbol,
    new_action: Action,
) -> Result<()> {
    let key = (state, terminal.clone());
    match table.get(&key) {
        None => {
            table.insert(key, new_action);
            Ok(())
        }
        Some(existing) if *existing == new_action => Ok(()),
        Some(existing) => {
            let kind = match (existing, &new_action) {
                (Action::Shift(_), Action::Reduce(_)) | (Action::Reduce(_), Action::Shift(_)) => {
                    ConflictKind::ShiftReduce
                }
                (Action::Reduce(_), Action::Reduce(_)) => ConflictKind::ReduceReduce,
                _ => ConflictKind::AcceptConflict,
            };
            Err(GrammarError::NotLr1 {
                state,
                terminal: terminal.to_string(),
                kind,
            })
        }
    }
}
