//! The identifier model: the closed vocabulary of everything that can
//! exist on the board.
//!
//! Identifiers come in five kinds:
//!
//! - [`RealObject`]: a physical kind (baba, rock, wall, ...). Carries no
//!   behavior itself; rules give it behavior each frame.
//! - [`Noun`]: a text token naming exactly one `RealObject`.
//! - [`Operator`]: a text token encoding a relation (`AND`, `ON`, `HAS`,
//!   `IS`).
//! - [`Property`]: a text token encoding a transient behavior tag
//!   (`YOU`, `PUSH`, `STOP`, ...).
//! - [`Group`]: a meta token whose extension is every registered
//!   identifier of a category (`TEXT`, `NOUN`, `OPERATOR`, `PROPERTY`).
//!
//! [`Text`] is the union of the four textual kinds — the only tokens the
//! sentence extractor looks at. [`Ident`] is the union of `Text` and
//! `RealObject` — anything a block can be.
//!
//! The [`Vocabulary`] maps canonical token names to identifiers. It is an
//! explicit value built once at startup and passed by reference wherever
//! names are resolved; there is no ambient global registry.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A physical object kind.
///
/// Declaration order doubles as the render-layer tiebreak among real
/// objects: earlier kinds draw above later ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RealObject {
    Baba,
    Rock,
    Wall,
    Flag,
    Lava,
    Water,
    Skull,
    Tile,
    Grass,
}

impl RealObject {
    /// All object kinds in declaration order.
    pub const ALL: [RealObject; 9] = [
        RealObject::Baba,
        RealObject::Rock,
        RealObject::Wall,
        RealObject::Flag,
        RealObject::Lava,
        RealObject::Water,
        RealObject::Skull,
        RealObject::Tile,
        RealObject::Grass,
    ];

    /// Canonical token name, `OBJ_`-prefixed to keep object names
    /// distinct from the nouns that denote them.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            RealObject::Baba => "OBJ_BABA",
            RealObject::Rock => "OBJ_ROCK",
            RealObject::Wall => "OBJ_WALL",
            RealObject::Flag => "OBJ_FLAG",
            RealObject::Lava => "OBJ_LAVA",
            RealObject::Water => "OBJ_WATER",
            RealObject::Skull => "OBJ_SKULL",
            RealObject::Tile => "OBJ_TILE",
            RealObject::Grass => "OBJ_GRASS",
        }
    }

    /// Position in declaration order, used for render layering.
    #[must_use]
    pub fn ordinal(self) -> usize {
        Self::ALL.iter().position(|&o| o == self).unwrap_or(0)
    }
}

/// A text token naming a real object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Noun {
    Baba,
    Rock,
    Wall,
    Flag,
    Lava,
    Water,
    Skull,
    Tile,
    Grass,
}

impl Noun {
    /// All nouns in declaration order.
    pub const ALL: [Noun; 9] = [
        Noun::Baba,
        Noun::Rock,
        Noun::Wall,
        Noun::Flag,
        Noun::Lava,
        Noun::Water,
        Noun::Skull,
        Noun::Tile,
        Noun::Grass,
    ];

    /// The real object this noun denotes. Total: every noun links to
    /// exactly one object.
    #[must_use]
    pub const fn object(self) -> RealObject {
        match self {
            Noun::Baba => RealObject::Baba,
            Noun::Rock => RealObject::Rock,
            Noun::Wall => RealObject::Wall,
            Noun::Flag => RealObject::Flag,
            Noun::Lava => RealObject::Lava,
            Noun::Water => RealObject::Water,
            Noun::Skull => RealObject::Skull,
            Noun::Tile => RealObject::Tile,
            Noun::Grass => RealObject::Grass,
        }
    }

    /// Canonical token name.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Noun::Baba => "BABA",
            Noun::Rock => "ROCK",
            Noun::Wall => "WALL",
            Noun::Flag => "FLAG",
            Noun::Lava => "LAVA",
            Noun::Water => "WATER",
            Noun::Skull => "SKULL",
            Noun::Tile => "TILE",
            Noun::Grass => "GRASS",
        }
    }
}

/// A relation token.
///
/// `AND` is eliminated by the conjunction simplifier before evaluation;
/// the other three reduce `(left, op, right)` triples in the fixed
/// priority order `ON`, `HAS`, `IS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    And,
    On,
    Has,
    Is,
}

impl Operator {
    /// The evaluable operators, in reduction priority order. `AND` is
    /// excluded: it has no operation.
    pub const EVAL_ORDER: [Operator; 3] = [Operator::On, Operator::Has, Operator::Is];

    /// Canonical token name.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::On => "ON",
            Operator::Has => "HAS",
            Operator::Is => "IS",
        }
    }
}

/// A transient behavior tag.
///
/// Declaration order is the effect-application order. `PUSH`, `STOP` and
/// `MELT` carry no effect of their own; they are read by the movement
/// resolver and by the `HOT`/`SINK` effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    You,
    Push,
    Stop,
    Hot,
    Melt,
    Sink,
    Defeat,
    Win,
    Real,
}

impl Property {
    /// All properties in effect-application order.
    pub const ALL: [Property; 9] = [
        Property::You,
        Property::Push,
        Property::Stop,
        Property::Hot,
        Property::Melt,
        Property::Sink,
        Property::Defeat,
        Property::Win,
        Property::Real,
    ];

    /// Canonical token name.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Property::You => "YOU",
            Property::Push => "PUSH",
            Property::Stop => "STOP",
            Property::Hot => "HOT",
            Property::Melt => "MELT",
            Property::Sink => "SINK",
            Property::Defeat => "DEFEAT",
            Property::Win => "WIN",
            Property::Real => "REAL",
        }
    }
}

/// A meta token whose extension is a whole category of identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Text,
    Noun,
    Operator,
    Property,
}

impl Group {
    /// All groups in declaration order.
    pub const ALL: [Group; 4] = [Group::Text, Group::Noun, Group::Operator, Group::Property];

    /// Canonical token name.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Group::Text => "TEXT",
            Group::Noun => "NOUN",
            Group::Operator => "OPERATOR",
            Group::Property => "PROPERTY",
        }
    }

    /// Membership predicate over text tokens. Groups never contain
    /// other groups, so a group token matches nothing.
    #[must_use]
    pub fn contains(self, text: Text) -> bool {
        match self {
            Group::Text => !matches!(text, Text::Group(_)),
            Group::Noun => matches!(text, Text::Noun(_)),
            Group::Operator => matches!(text, Text::Operator(_)),
            Group::Property => matches!(text, Text::Property(_)),
        }
    }

    /// The group's extension: every registered text token satisfying the
    /// membership predicate, in a deterministic (token name) order.
    #[must_use]
    pub fn members(self, vocab: &Vocabulary) -> Vec<Text> {
        let mut out: Vec<Text> = vocab
            .texts()
            .filter(|&text| self.contains(text))
            .collect();
        out.sort_by_key(Text::token);
        out
    }
}

/// A textual token: anything the sentence extractor can pick up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Text {
    Noun(Noun),
    Operator(Operator),
    Property(Property),
    Group(Group),
}

impl Text {
    /// Canonical token name.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Text::Noun(n) => n.token(),
            Text::Operator(op) => op.token(),
            Text::Property(p) => p.token(),
            Text::Group(g) => g.token(),
        }
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl From<Noun> for Text {
    fn from(n: Noun) -> Self {
        Text::Noun(n)
    }
}

impl From<Operator> for Text {
    fn from(op: Operator) -> Self {
        Text::Operator(op)
    }
}

impl From<Property> for Text {
    fn from(p: Property) -> Self {
        Text::Property(p)
    }
}

impl From<Group> for Text {
    fn from(g: Group) -> Self {
        Text::Group(g)
    }
}

/// Any identifier a block can carry: a text token or a real object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ident {
    Object(RealObject),
    Text(Text),
}

impl Ident {
    /// The text token, if this identifier is textual.
    #[must_use]
    pub const fn as_text(self) -> Option<Text> {
        match self {
            Ident::Text(text) => Some(text),
            Ident::Object(_) => None,
        }
    }

    /// Canonical token name, as used by the level and save formats.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Ident::Object(o) => o.token(),
            Ident::Text(t) => t.token(),
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl From<Text> for Ident {
    fn from(text: Text) -> Self {
        Ident::Text(text)
    }
}

impl From<RealObject> for Ident {
    fn from(o: RealObject) -> Self {
        Ident::Object(o)
    }
}

/// The string -> identifier registry.
///
/// Built exactly once before any board is loaded; lookups are total
/// within the registered vocabulary and `None` otherwise.
///
/// ## Example
///
/// ```
/// use gridspell::core::{Ident, Noun, RealObject, Vocabulary};
///
/// let vocab = Vocabulary::new();
/// assert_eq!(vocab.lookup("ROCK"), Some(Ident::Text(Noun::Rock.into())));
/// assert_eq!(vocab.lookup("OBJ_ROCK"), Some(Ident::Object(RealObject::Rock)));
/// assert_eq!(vocab.lookup("XYZZY"), None);
/// ```
#[derive(Clone, Debug)]
pub struct Vocabulary {
    by_name: FxHashMap<&'static str, Ident>,
}

impl Vocabulary {
    /// Build the registry from the closed identifier sets.
    #[must_use]
    pub fn new() -> Self {
        let mut by_name = FxHashMap::default();

        for o in RealObject::ALL {
            by_name.insert(o.token(), Ident::Object(o));
        }
        for n in Noun::ALL {
            by_name.insert(n.token(), Ident::Text(Text::Noun(n)));
        }
        for op in [Operator::And, Operator::On, Operator::Has, Operator::Is] {
            by_name.insert(op.token(), Ident::Text(Text::Operator(op)));
        }
        for p in Property::ALL {
            by_name.insert(p.token(), Ident::Text(Text::Property(p)));
        }
        for g in Group::ALL {
            by_name.insert(g.token(), Ident::Text(Text::Group(g)));
        }

        Self { by_name }
    }

    /// Resolve a token name. `None` for anything outside the vocabulary.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Ident> {
        self.by_name.get(name).copied()
    }

    /// Resolve a token name to a text token.
    #[must_use]
    pub fn lookup_text(&self, name: &str) -> Option<Text> {
        self.lookup(name).and_then(Ident::as_text)
    }

    /// Iterate over every registered text token.
    pub fn texts(&self) -> impl Iterator<Item = Text> + '_ {
        self.by_name.values().filter_map(|id| id.as_text())
    }

    /// Number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the registry is empty (it never is after `new`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
