//! Block instances.
//!
//! A block is one placed game object: an identifier, a grid position, a
//! liveness flag and a transient property set. Dead blocks stay in the
//! board arena — they are invisible to gameplay queries but remain
//! matchable by the `HAS` operator's dead-block scan.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Ident, Position, Property};

/// A game object instance on the board.
///
/// Identity for rule purposes is the identifier, not the instance: any
/// number of blocks may share an identifier and a position.
///
/// The property set is frame-scoped. It is cleared on every board change
/// and re-derived by the next rule pass; it is never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    ident: Ident,
    position: Position,
    dead: bool,
    #[serde(skip)]
    properties: FxHashSet<Property>,
}

impl Block {
    /// Create a live block.
    #[must_use]
    pub fn new(ident: impl Into<Ident>, position: Position) -> Self {
        Self {
            ident: ident.into(),
            position,
            dead: false,
            properties: FxHashSet::default(),
        }
    }

    /// The block's identifier.
    #[must_use]
    pub fn ident(&self) -> Ident {
        self.ident
    }

    /// The block's position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the block. Bounds are the caller's responsibility.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Whether the block is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Mark the block dead or alive.
    pub fn set_dead(&mut self, dead: bool) {
        self.dead = dead;
    }

    /// Replace this block in place with a fresh one of `ident`.
    ///
    /// Position is kept; the block comes back live. This is the
    /// transformation primitive behind `IS` noun rewrites, `HAS`
    /// replacement and the `REAL` effect.
    pub fn replace(&mut self, ident: impl Into<Ident>) {
        self.ident = ident.into();
        self.dead = false;
    }

    /// Whether the block currently holds `property`.
    #[must_use]
    pub fn has(&self, property: Property) -> bool {
        self.properties.contains(&property)
    }

    /// Grant `property` for the remainder of the frame.
    pub fn grant(&mut self, property: Property) {
        self.properties.insert(property);
    }

    /// Drop all properties. Called whenever the board changes, before
    /// rules are recomputed.
    pub fn clear_properties(&mut self) {
        self.properties.clear();
    }

    /// Render layer. Lower draws first (underneath): real objects below
    /// text, later-declared objects below earlier ones.
    #[must_use]
    pub fn layer(&self) -> i32 {
        match self.ident {
            Ident::Object(o) => -(o.ordinal() as i32),
            Ident::Text(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Noun, RealObject, Text};

    #[test]
    fn test_new_block_is_live_and_bare() {
        let block = Block::new(RealObject::Rock, Position::new(1, 2));
        assert!(!block.is_dead());
        assert!(!block.has(Property::Push));
        assert_eq!(block.position(), Position::new(1, 2));
    }

    #[test]
    fn test_grant_and_clear() {
        let mut block = Block::new(RealObject::Baba, Position::new(0, 0));
        block.grant(Property::You);
        block.grant(Property::Win);
        assert!(block.has(Property::You));
        assert!(block.has(Property::Win));

        block.clear_properties();
        assert!(!block.has(Property::You));
        assert!(!block.has(Property::Win));
    }

    #[test]
    fn test_replace_revives_and_keeps_position() {
        let mut block = Block::new(RealObject::Rock, Position::new(3, 4));
        block.set_dead(true);

        block.replace(RealObject::Wall);
        assert_eq!(block.ident(), Ident::Object(RealObject::Wall));
        assert_eq!(block.position(), Position::new(3, 4));
        assert!(!block.is_dead());
    }

    #[test]
    fn test_layering() {
        let text = Block::new(Text::Noun(Noun::Baba), Position::new(0, 0));
        let baba = Block::new(RealObject::Baba, Position::new(0, 0));
        let grass = Block::new(RealObject::Grass, Position::new(0, 0));

        // Text on top, then objects by declaration order.
        assert!(text.layer() > baba.layer());
        assert!(baba.layer() > grass.layer());
    }

    #[test]
    fn test_properties_not_serialized() {
        let mut block = Block::new(RealObject::Baba, Position::new(0, 0));
        block.grant(Property::You);

        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ident(), block.ident());
        assert!(!back.has(Property::You));
    }
}
