//! The board: one level's block arena and its query surface.
//!
//! All blocks, live and dead, live in a single arena and are addressed
//! by index. Live and dead views, spatial lookups and identifier lookups
//! are computed on demand over the arena; there is never a second
//! structural representation to keep in sync.
//!
//! The board also owns the two per-level flags:
//!
//! - `dirty`: a position changed since the last rule recompute. Starts
//!   true so the first frame derives rules.
//! - `finished`: the `WIN` effect fired; the driving loop checks it once
//!   per frame.

use smallvec::SmallVec;

use crate::core::{Ident, Position, Property};

use super::block::Block;

/// Index of a block in the board arena. Stable for the lifetime of a
/// level: blocks are transformed or marked dead in place, never removed.
pub type BlockIdx = usize;

/// One level's worth of blocks.
#[derive(Clone, Debug)]
pub struct Board {
    size: Position,
    blocks: Vec<Block>,
    dirty: bool,
    finished: bool,
}

impl Board {
    /// Create an empty board of `size` cells.
    #[must_use]
    pub fn new(size: Position) -> Self {
        Self {
            size,
            blocks: Vec::new(),
            dirty: true,
            finished: false,
        }
    }

    /// Board dimensions.
    #[must_use]
    pub fn size(&self) -> Position {
        self.size
    }

    /// Whether `position` lies on the board.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.size.x).contains(&position.x) && (0..self.size.y).contains(&position.y)
    }

    /// Add a block to the arena.
    pub fn add(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Replace the entire arena. Used by save restore; resets the dirty
    /// flag so rules are rebuilt from the new blocks.
    pub fn replace_all(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.dirty = true;
    }

    /// All blocks, live and dead, in arena order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// A block by index.
    #[must_use]
    pub fn block(&self, idx: BlockIdx) -> &Block {
        &self.blocks[idx]
    }

    /// A block by index, mutable.
    pub fn block_mut(&mut self, idx: BlockIdx) -> &mut Block {
        &mut self.blocks[idx]
    }

    // === Views ===

    /// Live blocks, with indices.
    pub fn live(&self) -> impl Iterator<Item = (BlockIdx, &Block)> {
        self.blocks.iter().enumerate().filter(|(_, b)| !b.is_dead())
    }

    /// Dead blocks, with indices. Only the `HAS` operator reads this.
    pub fn dead(&self) -> impl Iterator<Item = (BlockIdx, &Block)> {
        self.blocks.iter().enumerate().filter(|(_, b)| b.is_dead())
    }

    /// Indices of live blocks at `position`.
    #[must_use]
    pub fn live_at(&self, position: Position) -> SmallVec<[BlockIdx; 4]> {
        self.live()
            .filter(|(_, b)| b.position() == position)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of live blocks carrying `ident`.
    #[must_use]
    pub fn live_of(&self, ident: Ident) -> SmallVec<[BlockIdx; 4]> {
        self.live()
            .filter(|(_, b)| b.ident() == ident)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of live blocks holding `property`.
    #[must_use]
    pub fn live_with(&self, property: Property) -> SmallVec<[BlockIdx; 4]> {
        self.live()
            .filter(|(_, b)| b.has(property))
            .map(|(i, _)| i)
            .collect()
    }

    // === Property maintenance ===

    /// Grant `property` to every live block carrying `ident`.
    pub fn grant_all(&mut self, ident: Ident, property: Property) {
        for block in self.blocks.iter_mut().filter(|b| !b.is_dead()) {
            if block.ident() == ident {
                block.grant(property);
            }
        }
    }

    /// Drop every live block's property set.
    pub fn clear_properties(&mut self) {
        for block in self.blocks.iter_mut().filter(|b| !b.is_dead()) {
            block.clear_properties();
        }
    }

    // === Flags ===

    /// Whether a position changed since the last rule recompute.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a board change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Acknowledge a rule recompute.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Whether the level has been won.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Set the finished flag.
    pub fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    // === Render surface ===

    /// Live blocks in draw order: lowest layer first, so text tokens come
    /// last and real objects stack by declaration order.
    #[must_use]
    pub fn render_order(&self) -> Vec<&Block> {
        let mut out: Vec<&Block> = self.live().map(|(_, b)| b).collect();
        out.sort_by_key(|b| b.layer());
        out
    }
}
