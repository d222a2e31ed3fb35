//! Operator evaluation: reducing sentences against the board.
//!
//! Operators reduce in the fixed priority order `ON`, `HAS`, `IS`
//! (`AND` is gone by now). For each operator kind, every rule is scanned
//! left to right and each `(left, op, right)` triple collapses to the
//! operator's result, building a fresh token sequence per rule. The
//! order across kinds matters: `ON` and `HAS` only read positions, `IS`
//! mutates blocks and property sets.
//!
//! Evaluation is total. An operator whose operands have the wrong kinds
//! is a semantic no-op that passes its right operand through; a rule is
//! never rejected.
//!
//! - `ON(left, right)` — both nouns: yields `left` if some live block of
//!   `left`'s object shares a cell with one of `right`'s object, else
//!   `right`. An unmet `ON` thereby degrades to the right operand, so a
//!   following `IS` binds to the wrong subject and misses — which is
//!   exactly the guard semantics.
//! - `HAS(left, right)` — both nouns: every dead block of `left`'s
//!   object is replaced in place by a fresh live block of `right`'s
//!   object at the same cell. Yields `right`.
//! - `IS(left, right)` — `left` a noun or group, `right` a noun or
//!   property: rewrites blocks or grants properties; see
//!   [`Evaluator::eval_is`]. Yields `right`.

use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Ident, Operator, Position, Property, Text, Vocabulary};

use super::rule::{Rule, Tokens};

/// Reduces rules against a board.
///
/// Holds the vocabulary reference needed to expand group extensions;
/// all other state lives on the board passed per call.
pub struct Evaluator<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over `vocab`.
    #[must_use]
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// Reduce every rule in place, applying operator side effects to
    /// `board`. Rules end up fully collapsed (usually to one token).
    pub fn evaluate(&self, rules: &mut [Rule], board: &mut Board) {
        for op in Operator::EVAL_ORDER {
            for rule in rules.iter_mut() {
                *rule = self.reduce(rule, op, board);
            }
        }
    }

    /// Collapse every `(left, op, right)` triple in one rule, left to
    /// right, into a fresh sequence. A collapse result can serve as the
    /// left operand of the next triple in the same pass.
    fn reduce(&self, rule: &Rule, op: Operator, board: &mut Board) -> Rule {
        let tokens = rule.tokens();
        let mut out: Tokens = Tokens::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];
            if token == Text::Operator(op) && !out.is_empty() && i + 1 < tokens.len() {
                let left = out.pop().unwrap_or(token);
                let right = tokens[i + 1];
                out.push(self.apply(op, left, right, board));
                i += 2;
            } else {
                out.push(token);
                i += 1;
            }
        }

        Rule::new(out)
    }

    fn apply(&self, op: Operator, left: Text, right: Text, board: &mut Board) -> Text {
        match op {
            // AND carries no operation; it never reaches evaluation.
            Operator::And => right,
            Operator::On => Self::eval_on(left, right, board),
            Operator::Has => Self::eval_has(left, right, board),
            Operator::Is => self.eval_is(left, right, board),
        }
    }

    fn eval_on(left: Text, right: Text, board: &Board) -> Text {
        let (Text::Noun(l), Text::Noun(r)) = (left, right) else {
            return right;
        };

        let positions_of = |ident: Ident| -> SmallVec<[Position; 8]> {
            board
                .live_of(ident)
                .iter()
                .map(|&idx| board.block(idx).position())
                .collect()
        };

        let left_positions = positions_of(Ident::Object(l.object()));
        let right_positions = positions_of(Ident::Object(r.object()));

        if left_positions.iter().any(|p| right_positions.contains(p)) {
            left
        } else {
            right
        }
    }

    fn eval_has(left: Text, right: Text, board: &mut Board) -> Text {
        let (Text::Noun(l), Text::Noun(r)) = (left, right) else {
            return right;
        };

        let target = Ident::Object(l.object());
        let dead: Vec<usize> = board
            .dead()
            .filter(|(_, b)| b.ident() == target)
            .map(|(i, _)| i)
            .collect();

        for idx in dead {
            board.block_mut(idx).replace(r.object());
        }

        right
    }

    /// `IS` assignment.
    ///
    /// The effective left target is `left`'s linked object when `left`
    /// is a noun and `right` is anything but the `REAL` property;
    /// otherwise `left` itself (so `BABA IS REAL` tags the text token,
    /// and group tokens target their own literal blocks too).
    ///
    /// When `left` is a group, every member of its extension is applied
    /// as a target directly, and then the group token itself: `TEXT IS
    /// PUSH` makes each text block pushable, including a literal `TEXT`
    /// token on the board.
    fn eval_is(&self, left: Text, right: Text, board: &mut Board) -> Text {
        if !matches!(left, Text::Noun(_) | Text::Group(_))
            || !matches!(right, Text::Noun(_) | Text::Property(_))
        {
            return right;
        }

        if let Text::Group(group) = left {
            for member in group.members(self.vocab) {
                Self::assign(Ident::Text(member), right, board);
            }
        }

        let target = match left {
            Text::Noun(n) if right != Text::Property(Property::Real) => Ident::Object(n.object()),
            other => Ident::Text(other),
        };
        Self::assign(target, right, board);

        right
    }

    /// Apply one `IS` assignment to every live block carrying `target`.
    fn assign(target: Ident, right: Text, board: &mut Board) {
        match right {
            Text::Noun(n) => {
                for idx in board.live_of(target) {
                    board.block_mut(idx).replace(n.object());
                }
            }
            Text::Property(p) => board.grant_all(target, p),
            // Guarded by eval_is.
            Text::Operator(_) | Text::Group(_) => {}
        }
    }
}
