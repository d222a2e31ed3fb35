//! Conjunction elimination.
//!
//! `A AND B IS C` means both `A IS C` and `B IS C`. Each pass finds the
//! first `AND` in a rule and splits the rule in two — one keeping the
//! left neighbor, one keeping the right — building fresh sequences
//! rather than editing in place. Passes repeat until no rule contains
//! `AND`, then the set is deduplicated structurally.

use rustc_hash::FxHashSet;

use crate::core::{Operator, Text};

use super::rule::{Rule, Tokens};

/// Rewrite `rules` until no `AND` token remains, deduplicating the
/// result. Order of the surviving rules is not significant.
#[must_use]
pub fn simplify(rules: Vec<Rule>) -> Vec<Rule> {
    let mut working = rules;

    while working.iter().any(Rule::contains_and) {
        let mut next = Vec::with_capacity(working.len() + 1);
        for rule in working {
            match split_first_and(&rule) {
                Some((left, right)) => {
                    next.push(left);
                    next.push(right);
                }
                None => next.push(rule),
            }
        }
        working = next;
    }

    let mut seen = FxHashSet::default();
    working.retain(|rule| seen.insert(rule.clone()));
    working
}

/// Split `rule` at its first `AND`, replacing the `(prev, AND, next)`
/// triple with `prev` in one result and `next` in the other.
///
/// An `AND` at either edge has no triple to collapse; it is dropped and
/// the single remaining rule is returned twice (dedup folds them).
fn split_first_and(rule: &Rule) -> Option<(Rule, Rule)> {
    let tokens = rule.tokens();
    let i = tokens
        .iter()
        .position(|&t| t == Text::Operator(Operator::And))?;

    if i == 0 || i == tokens.len() - 1 {
        // Dangling conjunction: no operands to distribute over.
        let mut rest: Tokens = Tokens::new();
        rest.extend_from_slice(&tokens[..i]);
        rest.extend_from_slice(&tokens[i + 1..]);
        let dropped = Rule::new(rest);
        return Some((dropped.clone(), dropped));
    }

    let mut left: Tokens = Tokens::new();
    left.extend_from_slice(&tokens[..i]);
    left.extend_from_slice(&tokens[i + 2..]);

    let mut right: Tokens = Tokens::new();
    right.extend_from_slice(&tokens[..i - 1]);
    right.extend_from_slice(&tokens[i + 1..]);

    Some((Rule::new(left), Rule::new(right)))
}
