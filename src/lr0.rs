//! LR(0) automaton construction and SLR(1) table-driven recognition.
//!
//! This is the "partial LR(0) variant" the repository carries alongside the
//! canonical LR(1) recognizer: items drop the per-item lookahead, and
//! reduce actions are instead keyed by FOLLOW sets. It is not part of the
//! `lr1::fit`/`predict` path — kept as the LR(0)/SLR(1) companion the
//! canonical collection builder's closure/goto operations are modeled
//! after, for grammars where a full LR(1) lookahead isn't needed.

use crate::error::{ConflictKind, GrammarError, Result};
use crate::first_follow::FollowSets;
use crate::grammar::{Grammar, Production};
use crate::symbol::{string_to_symbols, Symbol};
use std::collections::{HashMap, HashSet, VecDeque};

/// An LR(0) item: a production with a dot position and no lookahead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Lr0Item {
    production: usize,
    dot: usize,
}

impl Lr0Item {
    fn new(production: usize, dot: usize) -> Self {
        Self { production, dot }
    }

    fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
        grammar.production(self.production).rhs.get(self.dot)
    }

    fn is_complete(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.production(self.production).rhs.len()
    }
}

type ItemSet = HashSet<Lr0Item>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// An SLR(1) parser built on top of an LR(0) automaton.
pub struct Lr0Automaton {
    grammar: Grammar,
    states: Vec<ItemSet>,
    action_table: HashMap<(usize, Symbol), Action>,
    goto_table: HashMap<(usize, Symbol), usize>,
}

impl Lr0Automaton {
    /// Builds an SLR(1) parser from a grammar and its precomputed FOLLOW
    /// sets.
    pub fn fit(grammar: Grammar, follow_sets: &FollowSets) -> Result<Self> {
        let (states, transitions) = Self::build_automaton(&grammar);
        let (action_table, goto_table) =
            Self::build_tables(&grammar, &states, &transitions, follow_sets)?;

        Ok(Self {
            grammar,
            states,
            action_table,
            goto_table,
        })
    }

    /// CLOSURE(K): for every item `[A -> α · B β]` with B a nonterminal, add
    /// `[B -> · γ]` for every production `B -> γ`.
    fn closure(grammar: &Grammar, items: ItemSet) -> ItemSet {
        let mut result = items;
        let mut worklist: VecDeque<Lr0Item> = result.iter().cloned().collect();

        while let Some(item) = worklist.pop_front() {
            let Some(symbol) = item.next_symbol(grammar) else {
                continue;
            };
            if !symbol.is_nonterminal() {
                continue;
            }
            let symbol = symbol.clone();

            for (production_idx, _rule) in grammar.productions_for(&symbol) {
                let new_item = Lr0Item::new(production_idx, 0);
                if result.insert(new_item.clone()) {
                    worklist.push_back(new_item);
                }
            }
        }

        result
    }

    /// GOTO(I, X): CLOSURE of every item in I with the dot moved past X.
    fn goto(grammar: &Grammar, items: &ItemSet, symbol: &Symbol) -> ItemSet {
        let moved: ItemSet = items
            .iter()
            .filter(|item| item.next_symbol(grammar) == Some(symbol))
            .map(|item| Lr0Item::new(item.production, item.dot + 1))
            .collect();

        Self::closure(grammar, moved)
    }

    /// Builds the canonical collection of LR(0) item sets and the
    /// transition function δ.
    fn build_automaton(grammar: &Grammar) -> (Vec<ItemSet>, HashMap<(usize, Symbol), usize>) {
        let initial_item = Lr0Item::new(0, 0);
        let initial_state = Self::closure(grammar, ItemSet::from([initial_item]));

        let mut states = vec![initial_state];
        let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
        let mut worklist: VecDeque<usize> = VecDeque::from([0]);

        let alphabet: Vec<Symbol> = grammar
            .terminals()
            .iter()
            .cloned()
            .chain(grammar.nonterminals().iter().cloned())
            .collect();

        while let Some(state_idx) = worklist.pop_front() {
            let state = states[state_idx].clone();

            for symbol in &alphabet {
                let goto_set = Self::goto(grammar, &state, symbol);
                if goto_set.is_empty() {
                    continue;
                }

                let target = match states.iter().position(|s| s == &goto_set) {
                    Some(existing) => existing,
                    None => {
                        let idx = states.len();
                        states.push(goto_set);
                        worklist.push_back(idx);
                        idx
                    }
                };

                transitions.insert((state_idx, symbol.clone()), target);
            }
        }

        (states, transitions)
    }

    /// Builds ACTION/GOTO for SLR(1): shift on every terminal transition,
    /// reduce `A -> α` on every terminal in FOLLOW(A) for a complete item,
    /// accept on the completed augmented production.
    fn build_tables(
        grammar: &Grammar,
        states: &[ItemSet],
        transitions: &HashMap<(usize, Symbol), usize>,
        follow_sets: &FollowSets,
    ) -> Result<(HashMap<(usize, Symbol), Action>, HashMap<(usize, Symbol), usize>)> {
        let mut action_table: HashMap<(usize, Symbol), Action> = HashMap::new();
        let mut goto_table: HashMap<(usize, Symbol), usize> = HashMap::new();

        for (state_idx, state) in states.iter().enumerate() {
            for item in state {
                let production = grammar.production(item.production);

                if !item.is_complete(grammar) {
                    if let Some(symbol) = item.next_symbol(grammar) {
                        if symbol.is_terminal() {
                            if let Some(&target) = transitions.get(&(state_idx, symbol.clone())) {
                                Self::set_action(
                                    &mut action_table,
                                    state_idx,
                                    symbol.clone(),
                                    Action::Shift(target),
                                )?;
                            }
                        }
                    }
                } else if production.lhs == *grammar.augmented_start() {
                    Self::set_action(
                        &mut action_table,
                        state_idx,
                        Symbol::EndMarker,
                        Action::Accept,
                    )?;
                } else {
                    let follow = follow_sets.get(&production.lhs).cloned().unwrap_or_default();
                    for symbol in follow {
                        Self::set_action(
                            &mut action_table,
                            state_idx,
                            symbol,
                            Action::Reduce(item.production),
                        )?;
                    }
                }
            }

            for nonterminal in grammar.nonterminals() {
                if let Some(&target) = transitions.get(&(state_idx, nonterminal.clone())) {
                    goto_table.insert((state_idx, nonterminal.clone()), target);
                }
            }
        }

        Ok((action_table, goto_table))
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
                    (Action::Shift(_), Action::Reduce(_))
                    | (Action::Reduce(_), Action::Shift(_)) => ConflictKind::ShiftReduce,
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

    /// Parses `word` (one terminal per character) using the shift/reduce
    /// driver. Pops exactly `|rhs|` stack entries per reduce, including
    /// zero for ε-productions.
    pub fn predict_str(&self, word: &str) -> bool {
        let mut input = string_to_symbols(word);
        input.push(Symbol::EndMarker);

        let mut stack: Vec<usize> = vec![0];
        let mut idx = 0;

        loop {
            let state = *stack.last().unwrap();
            let current = &input[idx];

            match self.action_table.get(&(state, current.clone())) {
                Some(Action::Shift(next)) => {
                    stack.push(*next);
                    idx += 1;
                }
                Some(Action::Reduce(production_idx)) => {
                    let production: &Production = self.grammar.production(*production_idx);
                    for _ in 0..production.rhs.len() {
                        stack.pop();
                    }
                    let state_after_pop = *stack.last().unwrap();
                    match self.goto_table.get(&(state_after_pop, production.lhs.clone())) {
                        Some(&next) => stack.push(next),
                        None => return false,
                    }
                }
                Some(Action::Accept) => return true,
                None => return false,
            }
        }
    }

    /// Number of states in the LR(0) automaton.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_follow::{compute_first_sets, compute_follow_sets};
    use std::collections::HashSet as StdHashSet;

    fn nt(s: &str) -> Symbol {
        Symbol::nonterminal(s)
    }

    fn t(s: &str) -> Symbol {
        Symbol::terminal(s)
    }

    #[test]
    fn slr1_accepts_arithmetic_expressions() {
        // S -> S+T T ; T -> T*F F ; F -> (S) I
        let terminals = StdHashSet::from([t("+"), t("*"), t("("), t(")"), t("I")]);
        let nonterminals = StdHashSet::from([nt("S"), nt("T"), nt("F")]);
        let productions = vec![
            Production::new(nt("S"), vec![nt("S"), t("+"), nt("T")]),
            Production::new(nt("S"), vec![nt("T")]),
            Production::new(nt("T"), vec![nt("T"), t("*"), nt("F")]),
            Production::new(nt("T"), vec![nt("F")]),
            Production::new(nt("F"), vec![t("("), nt("S"), t(")")]),
            Production::new(nt("F"), vec![t("I")]),
        ];
        let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
        let first = compute_first_sets(&grammar);
        let follow = compute_follow_sets(&grammar, &first);

        let automaton = Lr0Automaton::fit(grammar, &follow).unwrap();
        assert!(automaton.predict_str("I+I*I"));
        assert!(automaton.predict_str("(I+I)*I"));
        assert!(!automaton.predict_str("(I+I)*I)"));
    }

    #[test]
    fn left_recursive_grammar_is_recognized() {
        // S -> S a | b
        let terminals = StdHashSet::from([t("a"), t("b")]);
        let nonterminals = StdHashSet::from([nt("S")]);
        let productions = vec![
            Production::new(nt("S"), vec![nt("S"), t("a")]),
            Production::new(nt("S"), vec![t("b")]),
        ];
        let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
        let first = compute_first_sets(&grammar);
        let follow = compute_follow_sets(&grammar, &first);

        let automaton = Lr0Automaton::fit(grammar, &follow).unwrap();
        assert!(automaton.predict_str("b"));
        assert!(automaton.predict_str("ba"));
        assert!(automaton.predict_str("baaa"));
        assert!(!automaton.predict_str("a"));
    }

    #[test]
    fn classic_slr1_shift_reduce_conflict_grammar() {
        // S -> L = R | R ; L -> * R | id ; R -> L
        // The textbook grammar that is LR(1) but not SLR(1): the state
        // reached after an `L` holds both `S -> L . = R` (shift on `=`)
        // and `R -> L .` (reduce, since `=` falls into FOLLOW(R)).
        let terminals = StdHashSet::from([t("="), t("*"), t("id")]);
        let nonterminals = StdHashSet::from([nt("S"), nt("L"), nt("R")]);
        let productions = vec![
            Production::new(nt("S"), vec![nt("L"), t("="), nt("R")]),
            Production::new(nt("S"), vec![nt("R")]),
            Production::new(nt("L"), vec![t("*"), nt("R")]),
            Production::new(nt("L"), vec![t("id")]),
            Production::new(nt("R"), vec![nt("L")]),
        ];
        let grammar = Grammar::build(terminals, nonterminals, productions, nt("S")).unwrap();
        let first = compute_first_sets(&grammar);
        let follow = compute_follow_sets(&grammar, &first);

        let result = Lr0Automaton::fit(grammar, &follow);
        assert!(matches!(result, Err(GrammarError::NotLr1 { .. })));
    }
}
