//! Grammar and query text-format reader.
//!
//! Reads the line-oriented grammar description the CLI consumes from
//! stdin: counts, declared alphabets, productions, the start symbol, and
//! a trailing batch of query words. Independent of the core recognizer —
//! only the `cli` module calls into this.

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::HashSet;
use std::io::BufRead;

/// A parsed grammar plus the batch of words to query against it.
pub struct ParsedInput {
    pub grammar: Grammar,
    pub queries: Vec<String>,
}

/// Reads the full input format from `reader`:
///
/// - Line 1: `N T P` (nonterminal count, terminal count, production count).
/// - Line 2: N nonterminal names, whitespace-separated.
/// - Line 3: T terminal names, whitespace-separated.
/// - Lines 4..3+P: productions as `LEFT -> RIGHT`, RIGHT a (possibly empty)
///   concatenation of single-character symbols.
/// - Line 4+P: the start symbol.
/// - Line 5+P: an integer M.
/// - Next M lines: query words, one per line.
pub fn read_input<R: BufRead>(reader: R) -> Result<ParsedInput> {
    let mut lines = reader.lines();

    let counts_line = next_line(&mut lines)?;
    let counts: Vec<usize> = counts_line
        .split_whitespace()
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| GrammarError::InvalidFormat(format!("expected integer, got `{}`", s)))
        })
        .collect::<Result<_>>()?;
    let [n, t, p] = counts[..] else {
        return Err(GrammarError::InvalidFormat(
            "first line must contain exactly three integers `N T P`".to_string(),
        ));
    };

    let nonterminal_names: Vec<String> = next_line(&mut lines)?
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if nonterminal_names.len() != n {
        return Err(GrammarError::NotEnoughLines {
            expected: n,
            actual: nonterminal_names.len(),
        });
    }

    let terminal_names: Vec<String> = next_line(&mut lines)?
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if terminal_names.len() != t {
        return Err(GrammarError::NotEnoughLines {
            expected: t,
            actual: terminal_names.len(),
        });
    }

    let nonterminals: HashSet<Symbol> = nonterminal_names
        .iter()
        .map(|name| Symbol::nonterminal(name.clone()))
        .collect();
    let terminals: HashSet<Symbol> = terminal_names
        .iter()
        .map(|name| Symbol::terminal(name.clone()))
        .collect();

    let nonterminal_name_set: HashSet<&str> =
        nonterminal_names.iter().map(String::as_str).collect();

    let mut productions = Vec::with_capacity(p);
    for _ in 0..p {
        let line = next_line(&mut lines)?;
        productions.push(parse_production_line(&line, &nonterminal_name_set)?);
    }

    let start_name = next_line(&mut lines)?;
    let start_symbol = Symbol::nonterminal(start_name.trim());

    let grammar = Grammar::build(terminals, nonterminals, productions, start_symbol)?;

    let m_line = next_line(&mut lines)?;
    let m: usize = m_line
        .trim()
        .parse()
        .map_err(|_| GrammarError::InvalidFormat(format!("expected integer, got `{}`", m_line)))?;

    let mut queries = Vec::with_capacity(m);
    for _ in 0..m {
        queries.push(next_line(&mut lines)?);
    }

    Ok(ParsedInput { grammar, queries })
}

/// Parses a single `LEFT -> RIGHT` production line. `LEFT` is a
/// nonterminal name; `RIGHT` is a (possibly empty) run of single-character
/// symbols with no separators. Each character becomes a `Nonterminal` if
/// its name was declared on the nonterminal line, a `Terminal` otherwise —
/// final validation (undeclared symbols, non-disjoint sets) still happens
/// in `Grammar::build`.
fn parse_production_line(line: &str, nonterminal_names: &HashSet<&str>) -> Result<Production> {
    let (left, right) = line
        .split_once("->")
        .ok_or_else(|| GrammarError::InvalidProduction(line.to_string()))?;

    let lhs = Symbol::nonterminal(left.trim());
    let rhs = right
        .trim()
        .chars()
        .map(|c| {
            let name = c.to_string();
            if nonterminal_names.contains(name.as_str()) {
                Symbol::nonterminal(name)
            } else {
                Symbol::terminal(name)
            }
        })
        .collect();

    Ok(Production::new(lhs, rhs))
}

fn next_line<R: BufRead>(lines: &mut std::io::Lines<R>) -> Result<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(GrammarError::EmptyInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(s: &str) -> Symbol {
        Symbol::nonterminal(s)
    }

    #[test]
    fn reads_grammar_and_queries() {
        let text = "\
2 2 3
S A
a b
S->Ab
A->a
A->
S
3
ab
b
aab
";
        let parsed = read_input(text.as_bytes()).unwrap();
        assert_eq!(parsed.grammar.start_symbol(), &nt("S"));
        assert_eq!(parsed.queries, vec!["ab", "b", "aab"]);
        assert_eq!(parsed.grammar.productions().len(), 4); // +1 for augmentation
    }

    #[test]
    fn empty_production_rhs_is_epsilon() {
        let text = "\
1 1 1
A
a
A->
A
0
";
        let parsed = read_input(text.as_bytes()).unwrap();
        let epsilon_production = parsed
            .grammar
            .productions_for(&nt("A"))
            .next()
            .unwrap()
            .1;
        assert!(epsilon_production.rhs.is_empty());
    }

    #[test]
    fn malformed_counts_line_is_rejected() {
        let text = "not a number\n";
        let result = read_input(text.as_bytes());
        assert!(matches!(result, Err(GrammarError::InvalidFormat(_))));
    }

    #[test]
    fn production_line_without_arrow_is_rejected() {
        let text = "\
1 1 1
S
a
S a
S
0
";
        let result = read_input(text.as_bytes());
        assert!(matches!(result, Err(GrammarError::InvalidProduction(_))));
    }

    #[test]
    fn truncated_input_reports_eof() {
        let text = "1 1 1\nS\n";
        let result = read_input(text.as_bytes());
        assert!(result.is_err());
    }
}
