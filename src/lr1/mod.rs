//! Canonical LR(1) recognizer: the public façade over FIRST/FOLLOW,
//! canonical collection construction, and table-driven recognition.

pub mod automaton;
pub mod item;
pub mod table;

use crate::error::Result;
use crate::first_follow::{compute_first_sets, compute_follow_sets, FirstSets, FollowSets};
use crate::grammar::Grammar;
use crate::symbol::{string_to_symbols, Symbol};

use automaton::{build_canonical_collection, ItemSet};
use table::{build_tables, Action, Tables};

/// A grammar compiled into a canonical LR(1) automaton: immutable tables
/// plus the grammar they were derived from. Produced by `fit`, consumed by
/// `predict`.
pub struct Lr1Automaton {
    grammar: Grammar,
    states: Vec<ItemSet>,
    tables: Tables,
    first_sets: FirstSets,
    follow_sets: FollowSets,
}

impl Lr1Automaton {
    /// Computes FIRST, builds the canonical collection of LR(1) item sets,
    /// and compiles the ACTION/GOTO tables. Fails with `GrammarError::NotLr1`
    /// if any cell would receive two distinct actions.
    ///
    /// `fit` runs to completion or failure before any `predict` call; the
    /// resulting automaton's tables are frozen and safe to call `predict`
    /// on concurrently from multiple threads.
    pub fn fit(grammar: Grammar) -> Result<Self> {
        let first_sets = compute_first_sets(&grammar);
        let follow_sets = compute_follow_sets(&grammar, &first_sets);
        let collection = build_canonical_collection(&grammar, &first_sets);
        let tables = build_tables(&grammar, &collection)?;

        Ok(Self {
            grammar,
            states: collection.states,
            tables,
            first_sets,
            follow_sets,
        })
    }

    /// Returns true iff `word` belongs to the language of the grammar this
    /// automaton was fit from.
    ///
    /// Any symbol outside the grammar's terminal alphabet causes rejection
    /// (returns `false`) rather than an error: recognition never throws.
    pub fn predict(&self, word: &[Symbol]) -> bool {
        let mut input: Vec<Symbol> = word.to_vec();
        input.push(Symbol::EndMarker);

        let mut stack: Vec<usize> = vec![0];
        let mut idx = 0;

        loop {
            let state = *stack.last().expect("stack is never empty");
            let current = &input[idx];

            match self.tables.action.get(&(state, current.clone())) {
                Some(Action::Shift(next_state)) => {
                    stack.push(*next_state);
                    idx += 1;
                }
                Some(Action::Reduce(production_idx)) => {
                    let production = self.grammar.production(*production_idx);
                    for _ in 0..production.rhs.len() {
                        stack.pop();
                    }
                    let state_after_pop = *stack.last().expect("stack is never empty");
                    match self.tables.goto.get(&(state_after_pop, production.lhs.clone())) {
                        Some(&next_state) => stack.push(next_state),
                        None => return false,
                    }
                }
                Some(Action::Accept) => return true,
                None => return false,
            }
        }
    }

    /// Convenience wrapper over `predict` for single-character terminal
    /// alphabets: each character of `word` becomes one terminal symbol.
    pub fn predict_str(&self, word: &str) -> bool {
        self.predict(&string_to_symbols(word))
    }

    /// The grammar this automaton was fit from.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// FIRST sets computed during `fit`.
    pub fn first_sets(&self) -> &FirstSets {
        &self.first_sets
    }

    /// FOLLOW sets computed during `fit`. Diagnostic only — the canonical
    /// LR(1) tables never consult FOLLOW.
    pub fn follow_sets(&self) -> &FollowSets {
        &self.follow_sets
    }

    /// Number of states in the canonical collection.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;
    use std::collections::HashSet;

    fn nt(s: &str) -> Symbol {
        Symbol::nonterminal(s)
    }

    fn t(s: &str) -> Symbol {
        Symbol::terminal(s)
    }

    #[test]
    fn arithmetic_grammar_recognizes_expected_words() {
        // S -> E ; E -> E + T | T ; T -> T * F | F ; F -> ( E ) | I
        let terminals = HashSet::from([t("+"), t("*"), t("("), t(")"), t("I")]);
        let nonterminals = HashSet::from([nt("S"), nt("E"), nt("T"), nt("F")]);
        let productions = vec![
            Production::new(nt("S"), vec![nt("E")]),
            Production::new(nt("E"), vec![nt("E"), t("+"), nt("T")]),
            Production::new(nt("E"), vec![nt("T")]),
            Production::new(nt("T"), vec![nt("T"), t("*"), nt("F")]),
            Production::new(nt("T"), vec![nt("F")]),
            Production::new(nt("F"), vec![t("("), nt("E"), t(")")]),
            Production::new(nt("F"), vec![t("I")]),
        ];
        let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
        let automaton = Lr1Automaton::fit(grammar).unwrap();

        assert!(automaton.predict_str("I+I*I"));
        assert!(automaton.predict_str("(I+I)*I"));
        assert!(!automaton.predict_str("I+*I"));
        assert!(!automaton.predict_str("I+I*"));
        assert!(!automaton.predict_str("(I+I*I"));
    }

    #[test]
    fn epsilon_production_grammar() {
        // S -> A ; A -> aA | ε
        let terminals = HashSet::from([t("a")]);
        let nonterminals = HashSet::from([nt("S"), nt("A")]);
        let productions = vec![
            Production::new(nt("S"), vec![nt("A")]),
            Production::new(nt("A"), vec![t("a"), nt("A")]),
            Production::new(nt("A"), vec![]),
        ];
        let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
        let automaton = Lr1Automaton::fit(grammar).unwrap();

        assert!(automaton.predict_str(""));
        assert!(automaton.predict_str("a"));
        assert!(automaton.predict_str("aaaaa"));
        assert!(!automaton.predict_str("b"));
        assert!(!automaton.predict_str("aaab"));
    }

    #[test]
    fn unknown_symbol_is_rejected_not_errored() {
        let terminals = HashSet::from([t("a")]);
        let nonterminals = HashSet::from([nt("S"), nt("A")]);
        let productions = vec![
            Production::new(nt("S"), vec![nt("A")]),
            Production::new(nt("A"), vec![t("a"), nt("A")]),
            Production::new(nt("A"), vec![]),
        ];
        let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
        let automaton = Lr1Automaton::fit(grammar).unwrap();

        assert!(!automaton.predict_str("Z"));
    }

    #[test]
    fn predict_is_safe_to_call_from_multiple_threads() {
        use std::sync::Arc;
        use std::thread;

        let terminals = HashSet::from([t("a")]);
        let nonterminals = HashSet::from([nt("S")]);
        let productions = vec![Production::new(nt("S"), vec![t("a")])];
        let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
        let automaton = Arc::new(Lr1Automaton::fit(grammar).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let automaton = Arc::clone(&automaton);
                thread::spawn(move || automaton.predict_str("a"))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
