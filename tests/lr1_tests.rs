//! Integration tests for the canonical LR(1) construction pipeline:
//! FIRST sets, the canonical collection, and conflict detection, driven
//! through the crate's public API rather than `src/lr1`'s own unit tests.

use lr1_recognizer::first_follow::compute_first_sets;
use lr1_recognizer::grammar::Production;
use lr1_recognizer::lr1::automaton::build_canonical_collection;
use lr1_recognizer::lr1::table::build_tables;
use lr1_recognizer::{Grammar, GrammarError, Lr1Automaton, Symbol};
use std::collections::HashSet;

fn nt(s: &str) -> Symbol {
    Symbol::nonterminal(s)
}

fn t(s: &str) -> Symbol {
    Symbol::terminal(s)
}

#[test]
fn canonical_collection_has_one_state_per_distinct_context() {
    // S -> C C ; C -> c C | d
    let terminals = HashSet::from([t("c"), t("d")]);
    let nonterminals = HashSet::from([nt("S"), nt("C")]);
    let productions = vec![
        Production::new(nt("S"), vec![nt("C"), nt("C")]),
        Production::new(nt("C"), vec![t("c"), nt("C")]),
        Production::new(nt("C"), vec![t("d")]),
    ];
    let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
    let first = compute_first_sets(&grammar);
    let collection = build_canonical_collection(&grammar, &first);

    // This grammar's canonical LR(1) collection has more states than its
    // LR(0) skeleton would, since the two `C` occurrences carry distinct
    // lookaheads ($/c/d for the first, just $ for the second).
    assert!(collection.states.len() > 6);
}

#[test]
fn build_tables_surfaces_conflict_state_and_terminal() {
    // S -> A a | b A c | d c | b d a ; A -> d
    let terminals = HashSet::from([t("a"), t("b"), t("c"), t("d")]);
    let nonterminals = HashSet::from([nt("S"), nt("A")]);
    let productions = vec![
        Production::new(nt("S"), vec![nt("A"), t("a")]),
        Production::new(nt("S"), vec![t("b"), nt("A"), t("c")]),
        Production::new(nt("S"), vec![t("d"), t("c")]),
        Production::new(nt("S"), vec![t("b"), t("d"), t("a")]),
        Production::new(nt("A"), vec![t("d")]),
    ];
    let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
    let first = compute_first_sets(&grammar);
    let collection = build_canonical_collection(&grammar, &first);

    let err = build_tables(&grammar, &collection).unwrap_err();
    assert!(matches!(err, GrammarError::NotLr1 { .. }));
}

#[test]
fn state_count_is_exposed_after_fit() {
    let terminals = HashSet::from([t("a")]);
    let nonterminals = HashSet::from([nt("S")]);
    let productions = vec![Production::new(nt("S"), vec![t("a")])];
    let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();

    let automaton = Lr1Automaton::fit(grammar).unwrap();
    assert!(automaton.state_count() >= 2);
}
