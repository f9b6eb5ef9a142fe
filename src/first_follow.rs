//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! This module implements the algorithms from Aho et al., "Compilers:
//! Principles, Techniques, and Tools" (2nd Edition), section 4.4. FIRST is
//! the data the LR(1) item closure leans on directly; FOLLOW is computed
//! for diagnostic purposes only — canonical LR(1) lookahead propagation
//! never consults it.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// Type alias for FIRST sets mapping.
pub type FirstSets = HashMap<Symbol, HashSet<Symbol>>;

/// Type alias for FOLLOW sets mapping.
pub type FollowSets = HashMap<Symbol, HashSet<Symbol>>;

/// Computes the FIRST sets for every terminal and nonterminal in the
/// grammar via fixed-point iteration.
///
/// FIRST(a) = {a} for every terminal a. FIRST(A) for a nonterminal A is the
/// least fixed point under: for each production `A → X1 X2 ... Xn`, add
/// FIRST(X1) - {ε} to FIRST(A); if ε ∈ FIRST(X1), continue with X2, and so
/// on; if ε ∈ FIRST(Xi) for every i (including the empty RHS), add ε to
/// FIRST(A). The lattice (subsets of T ∪ {ε}) is finite and the step is
/// monotone, so this always terminates.
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = HashMap::new();

    for terminal in grammar.terminals() {
        first_sets.insert(terminal.clone(), HashSet::from([terminal.clone()]));
    }
    first_sets.insert(Symbol::Epsilon, HashSet::from([Symbol::Epsilon]));
    first_sets.insert(Symbol::EndMarker, HashSet::from([Symbol::EndMarker]));
    for nonterminal in grammar.nonterminals() {
        first_sets.entry(nonterminal.clone()).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let lhs = production.lhs.clone();
            let current_first = first_sets.get(&lhs).unwrap().clone();

            let rhs_first = first_of_sequence(&first_sets, &production.rhs);

            let new_first: HashSet<Symbol> = current_first.union(&rhs_first).cloned().collect();

            if new_first.len() != current_first.len() {
                first_sets.insert(lhs, new_first);
                changed = true;
            }
        }
    }

    first_sets
}

/// Computes FIRST of a sequence of symbols (the "FIRST of a string"
/// operation): FIRST(X1) - {ε}, plus FIRST(X2) - {ε} if ε ∈ FIRST(X1), and
/// so on; ε is in the result iff every Xi can derive ε, including for the
/// empty sequence. Pure and non-caching — called on the short suffixes that
/// arise during item closure.
pub fn first_of_sequence(first_sets: &FirstSets, symbols: &[Symbol]) -> HashSet<Symbol> {
    let mut result = HashSet::new();
    let mut all_nullable_so_far = true;

    for symbol in symbols {
        if !all_nullable_so_far {
            break;
        }

        let first_of_symbol = first_sets.get(symbol).cloned().unwrap_or_default();

        for sym in &first_of_symbol {
            if !sym.is_epsilon() {
                result.insert(sym.clone());
            }
        }

        all_nullable_so_far = first_of_symbol.contains(&Symbol::Epsilon);
    }

    if all_nullable_so_far {
        result.insert(Symbol::Epsilon);
    }

    result
}

/// Computes the FOLLOW sets for all nonterminals. Not required by the
/// canonical LR(1) builder (lookaheads propagate through closure instead),
/// but computed and exposed as diagnostic data on the built automaton.
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = HashMap::new();

    for nonterminal in grammar.nonterminals() {
        follow_sets.entry(nonterminal.clone()).or_default();
    }

    follow_sets
        .entry(grammar.start_symbol().clone())
        .or_default()
        .insert(Symbol::EndMarker);

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let lhs = &production.lhs;
            let rhs = &production.rhs;

            for (i, symbol) in rhs.iter().enumerate() {
                if !symbol.is_nonterminal() {
                    continue;
                }

                let current_follow = follow_sets.get(symbol).unwrap().clone();
                let mut new_follow = current_follow.clone();

                let beta = &rhs[i + 1..];
                let first_beta = first_of_sequence(first_sets, beta);

                for sym in &first_beta {
                    if !sym.is_epsilon() {
                        new_follow.insert(sym.clone());
                    }
                }

                if beta.is_empty() || first_beta.contains(&Symbol::Epsilon) {
                    let follow_lhs = follow_sets.get(lhs).unwrap().clone();
                    new_follow = new_follow.union(&follow_lhs).cloned().collect();
                }

                if new_follow.len() != current_follow.len() {
                    follow_sets.insert(symbol.clone(), new_follow);
                    changed = true;
                }
            }
        }
    }

    follow_sets
}
