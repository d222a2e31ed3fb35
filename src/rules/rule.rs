//! Rule sentences.
//!
//! A rule is an ordered sequence of text tokens, produced by the
//! sentence extractor and consumed by the simplifier and the operator
//! evaluator. Identity is structural: two rules are equal iff their
//! token sequences are equal, regardless of where on the board they were
//! read.

use smallvec::SmallVec;

use crate::core::{Operator, Text, Vocabulary};

/// Token storage. Rules are almost always exactly three tokens; five
/// covers a single conjunction without spilling to the heap.
pub type Tokens = SmallVec<[Text; 5]>;

/// An ordered sequence of text tokens forming a candidate sentence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    tokens: Tokens,
}

impl Rule {
    /// Build a rule from tokens.
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = Text>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Build a rule from literal token names, resolving each through the
    /// vocabulary. Names that do not resolve to a text token are skipped,
    /// mirroring how unknown tokens are ignored everywhere else.
    ///
    /// This is the injection seam for driver-supplied starting rules.
    #[must_use]
    pub fn from_names(vocab: &Vocabulary, names: &[&str]) -> Self {
        Self::new(names.iter().filter_map(|name| vocab.lookup_text(name)))
    }

    /// The token sequence.
    #[must_use]
    pub fn tokens(&self) -> &[Text] {
        &self.tokens
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the rule has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether any token is the `AND` operator.
    #[must_use]
    pub fn contains_and(&self) -> bool {
        self.tokens.contains(&Text::Operator(Operator::And))
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
