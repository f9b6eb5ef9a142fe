//! Grammar module for context-free grammars.
//!
//! This module provides the data structures for context-free grammars —
//! productions, the terminal/nonterminal alphabets, and the augmented start
//! symbol — plus the builder that validates and freezes a grammar before it
//! is handed to `fit`.

use crate::error::{GrammarError, Result};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A production rule in a context-free grammar.
///
/// Represents a rule of the form: LHS → RHS, where LHS is a single
/// nonterminal and RHS is a (possibly empty) ordered sequence of symbols.
/// An empty RHS denotes ε.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    /// Left-hand side (always a nonterminal).
    pub lhs: Symbol,
    /// Right-hand side (sequence of symbols); empty means ε.
    pub rhs: Vec<Symbol>,
}

impl Production {
    /// Creates a new production.
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rhs.is_empty() {
            write!(f, "{} → ε", self.lhs)
        } else {
            let rhs_str = self
                .rhs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{} → {}", self.lhs, rhs_str)
        }
    }
}

/// A context-free grammar, frozen after construction.
///
/// Holds the full production list (with the synthesized augmented start
/// production at index 0), the terminal and nonterminal alphabets (the
/// latter including the augmented start), and the original start symbol.
/// Productions are addressed by index so that a reduce action can refer to
/// one unambiguously.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// All productions, augmented production first (index 0).
    productions: Vec<Production>,
    /// All nonterminal symbols, including the augmented start.
    nonterminals: HashSet<Symbol>,
    /// All terminal symbols.
    terminals: HashSet<Symbol>,
    /// The original (pre-augmentation) start symbol.
    start_symbol: Symbol,
    /// The synthesized augmented start symbol S'.
    augmented_start: Symbol,
    /// Nonterminal -> indices of its productions in `productions`.
    production_map: HashMap<Symbol, Vec<usize>>,
}

impl Grammar {
    /// Builds a grammar from an explicit terminal set, nonterminal set,
    /// ordered production list, and start symbol.
    ///
    /// Rejects a start symbol that is not a declared nonterminal, any
    /// production referencing an undeclared symbol, non-disjoint
    /// terminal/nonterminal sets, and a synthesized augmented start symbol
    /// S' that collides with a declared nonterminal. On success, inserts the
    /// augmented production `S' → S` at index 0 and merges syntactically
    /// identical productions (same LHS and RHS) into one.
    pub fn build(
        terminals: HashSet<Symbol>,
        nonterminals: HashSet<Symbol>,
        productions: Vec<Production>,
        start_symbol: Symbol,
    ) -> Result<Self> {
        if productions.is_empty() {
            return Err(GrammarError::EmptyProductions);
        }

        if let Some(shared) = terminals.intersection(&nonterminals).next() {
            return Err(GrammarError::NotDisjoint(shared.to_string()));
        }

        if !start_symbol.is_nonterminal() || !nonterminals.contains(&start_symbol) {
            return Err(GrammarError::UnknownStart(start_symbol.to_string()));
        }

        for production in &productions {
            if !nonterminals.contains(&production.lhs) {
                return Err(GrammarError::UndeclaredSymbol(production.lhs.to_string()));
            }
            for symbol in &production.rhs {
                let declared = terminals.contains(symbol) || nonterminals.contains(symbol);
                if !declared {
                    return Err(GrammarError::UndeclaredSymbol(symbol.to_string()));
                }
            }
        }

        let augmented_start = Self::augmented_start_name(&start_symbol);
        if nonterminals.contains(&augmented_start) {
            return Err(GrammarError::AugmentedStartCollision(
                augmented_start.to_string(),
            ));
        }

        let mut all_nonterminals = nonterminals;
        all_nonterminals.insert(augmented_start.clone());

        let mut all_productions = Vec::with_capacity(productions.len() + 1);
        all_productions.push(Production::new(
            augmented_start.clone(),
            vec![start_symbol.clone()],
        ));
        let mut seen: HashSet<(Symbol, Vec<Symbol>)> = HashSet::new();
        for production in productions {
            let key = (production.lhs.clone(), production.rhs.clone());
            if seen.insert(key) {
                all_productions.push(production);
            }
        }

        let mut production_map: HashMap<Symbol, Vec<usize>> = HashMap::new();
        for (idx, production) in all_productions.iter().enumerate() {
            production_map.entry(production.lhs.clone()).or_default().push(idx);
        }

        Ok(Self {
            productions: all_productions,
            nonterminals: all_nonterminals,
            terminals,
            start_symbol,
            augmented_start,
            production_map,
        })
    }

    /// Builds the augmented-start name `S'` from `start`. The caller checks
    /// this against the declared nonterminals and rejects the grammar on
    /// collision rather than renaming around it.
    fn augmented_start_name(start: &Symbol) -> Symbol {
        let base = start.name().unwrap_or("S");
        Symbol::nonterminal(format!("{}'", base))
    }

    /// Returns all productions, indexed as reduce actions reference them.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns the production at `idx`.
    pub fn production(&self, idx: usize) -> &Production {
        &self.productions[idx]
    }

    /// Returns the (index, production) pairs for a given nonterminal's
    /// alternatives, in declaration order.
    pub fn productions_for(&self, nt: &Symbol) -> impl Iterator<Item = (usize, &Production)> {
        self.production_map
            .get(nt)
            .into_iter()
            .flatten()
            .map(move |&idx| (idx, &self.productions[idx]))
    }

    /// Returns all nonterminals, including the augmented start.
    pub fn nonterminals(&self) -> &HashSet<Symbol> {
        &self.nonterminals
    }

    /// Returns all terminals.
    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    /// Returns the original (pre-augmentation) start symbol.
    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    /// Returns the synthesized augmented start symbol S'.
    pub fn augmented_start(&self) -> &Symbol {
        &self.augmented_start
    }

    /// Returns the augmented start production `S' → S`, always index 0.
    pub fn augmented_production(&self) -> &Production {
        &self.productions[0]
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for production in &self.productions {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}
