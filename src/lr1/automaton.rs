//! CLOSURE, GOTO, and canonical collection construction for LR(1) item
//! sets.

use crate::first_follow::{first_of_sequence, FirstSets};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{BTreeSet, HashMap, VecDeque};

use super::item::Lr1Item;

/// A state: a set of LR(1) items, closed under CLOSURE. Stored as a
/// `BTreeSet` so that two states with the same items compare equal and
/// hash identically regardless of insertion order — the canonicalization
/// the builder needs to de-duplicate states in near-O(1).
pub type ItemSet = BTreeSet<Lr1Item>;

/// Computes CLOSURE(K): the least superset of `items` such that for every
/// item `[A -> α · B β, a]` with B a nonterminal, and every production
/// `B -> γ`, the item `[B -> · γ, b]` is included for every
/// `b ∈ FIRST(β a)`.
///
/// Uses a worklist with a "seen" set (the closure itself) rather than
/// iterating to a fixed point, which is near-linear in the size of the
/// resulting closure.
pub fn closure(grammar: &Grammar, first_sets: &FirstSets, items: ItemSet) -> ItemSet {
    let mut closure_set: ItemSet = items.clone();
    let mut worklist: VecDeque<Lr1Item> = items.into_iter().collect();

    while let Some(item) = worklist.pop_front() {
        let Some(next_sym) = item.next_symbol(grammar) else {
            continue;
        };
        if !next_sym.is_nonterminal() {
            continue;
        }
        let next_sym = next_sym.clone();

        let mut beta_then_lookahead: Vec<Symbol> = item.beta(grammar).to_vec();
        beta_then_lookahead.push(item.lookahead.clone());
        // FIRST(beta a) never contains ε since `a` is a terminal/`$`.
        let lookaheads = first_of_sequence(first_sets, &beta_then_lookahead);

        for (production_idx, _rule) in grammar.productions_for(&next_sym) {
            for lookahead in &lookaheads {
                let new_item = Lr1Item::new(production_idx, 0, lookahead.clone());
                if closure_set.insert(new_item.clone()) {
                    worklist.push_back(new_item);
                }
            }
        }
    }

    closure_set
}

/// Computes GOTO(I, X): CLOSURE of every item in `I` with the dot advanced
/// past `X`. Returns the empty set if no item has `X` immediately after the
/// dot.
pub fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, symbol: &Symbol) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.next_symbol(grammar) == Some(symbol))
        .map(Lr1Item::advance)
        .collect();

    if moved.is_empty() {
        ItemSet::new()
    } else {
        closure(grammar, first_sets, moved)
    }
}

/// The canonical collection of LR(1) states plus the transition function δ.
pub struct CanonicalCollection {
    /// States in order of first discovery (BFS from state 0).
    pub states: Vec<ItemSet>,
    /// δ(state, symbol) -> state, defined only where GOTO is non-empty.
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Builds the canonical collection: state 0 is CLOSURE({[S' -> ·S, $]});
/// every other state is discovered by taking GOTO(I, X) over every symbol X
/// for every already-discovered state I, in BFS order. States are compared
/// for de-duplication by item-set equality via a hash-indexed map, avoiding
/// an O(|states|) linear scan per insertion.
pub fn build_canonical_collection(grammar: &Grammar, first_sets: &FirstSets) -> CanonicalCollection {
    let initial_item = Lr1Item::new(0, 0, Symbol::EndMarker);
    let initial_state = closure(grammar, first_sets, ItemSet::from([initial_item]));

    let mut states = vec![initial_state.clone()];
    let mut index_of: HashMap<ItemSet, usize> = HashMap::new();
    index_of.insert(initial_state, 0);

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
            let goto_set = goto(grammar, first_sets, &state, symbol);
            if goto_set.is_empty() {
                continue;
            }

            let target = match index_of.get(&goto_set) {
                Some(&idx) => idx,
                None => {
                    let idx = states.len();
                    index_of.insert(goto_set.clone(), idx);
                    states.push(goto_set);
                    worklist.push_back(idx);
                    idx
                }
            };

            transitions.insert((state_idx, symbol.clone()), target);
        }
    }

    CanonicalCollection { states, transitions }
}
