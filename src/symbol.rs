//! Symbol types and utilities for context-free grammars.
//!
//! This module defines the core Symbol type used throughout the crate: the
//! disjoint terminal/nonterminal alphabets plus the two reserved sentinels
//! (end-of-input `$` and the ε marker used only inside FIRST sets).

use std::cmp::Ordering;
use std::fmt;

/// Represents a symbol in a context-free grammar.
///
/// Symbols are opaque named tokens rather than single characters: the
/// grammar's alphabet is a finite set of short names, not ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol: an input token.
    Terminal(String),
    /// A nonterminal symbol: a grammar variable.
    Nonterminal(String),
    /// The empty string (ε). Appears only inside FIRST sets, never in a
    /// production's right-hand side (an empty RHS represents ε instead).
    Epsilon,
    /// The end-of-input marker ($). A terminal for table purposes only.
    EndMarker,
}

impl Symbol {
    /// Builds a terminal symbol from a name.
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    /// Builds a nonterminal symbol from a name.
    pub fn nonterminal(name: impl Into<String>) -> Self {
        Symbol::Nonterminal(name.into())
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    #[inline]
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    #[inline]
    pub fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::EndMarker)
    }

    /// Returns the name of this symbol, if it has one (terminals and
    /// nonterminals only).
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => Some(s.as_str()),
            Symbol::Epsilon | Symbol::EndMarker => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => write!(f, "{}", s),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::EndMarker => write!(f, "$"),
        }
    }
}

/// Custom ordering for symbols, used to canonicalize item sets into a
/// deterministic order (see `lr1::item`).
///
/// Order: Epsilon < Terminals < Nonterminals < EndMarker, with terminals and
/// nonterminals ordered lexicographically by name within their group.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Symbol::Epsilon, Symbol::Epsilon) => Ordering::Equal,
            (Symbol::Epsilon, _) => Ordering::Less,
            (_, Symbol::Epsilon) => Ordering::Greater,

            (Symbol::EndMarker, Symbol::EndMarker) => Ordering::Equal,
            (Symbol::EndMarker, _) => Ordering::Greater,
            (_, Symbol::EndMarker) => Ordering::Less,

            (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
            (Symbol::Terminal(_), Symbol::Nonterminal(_)) => Ordering::Less,
            (Symbol::Nonterminal(_), Symbol::Terminal(_)) => Ordering::Greater,
            (Symbol::Nonterminal(a), Symbol::Nonterminal(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Converts a string into a vector of single-character terminal symbols.
///
/// Used by the recognizer's convenience `predict_str` and by the grammar
/// text reader, which both treat each character of a query word or
/// production right-hand side as one symbol (the crate's input format).
pub fn string_to_symbols(s: &str) -> Vec<Symbol> {
    s.chars().map(|c| Symbol::Terminal(c.to_string())).collect()
}
