//! A page: an ordered block sequence bound to a surface

use crate::document::Block;
use crate::layout::Surface;

/// Measurement slack absorbed when testing for overflow.
///
/// The last inserted element measures with some noise; without this margin
/// boundary-adjacent content oscillates between fitting and overflowing on
/// successive measurements.
pub const OVERFLOW_TOLERANCE: f32 = 20.0;

/// One produced page.
///
/// The block sequence and the surface are mirrored on every mutation:
/// appending a block renders it, removing the last block removes its
/// rendered unit, so the two never diverge.
#[derive(Debug)]
pub struct Page<S> {
    blocks: Vec<Block>,
    surface: S,
}

impl<S: Surface> Page<S> {
    /// Create an empty page bound to a surface
    pub fn new(surface: S) -> Self {
        Self {
            blocks: Vec::new(),
            surface,
        }
    }

    /// Append a deep copy of a block and render it onto the surface
    pub fn add_block(&mut self, block: &Block) {
        let copy = block.clone();
        self.surface.push(&copy.render());
        self.blocks.push(copy);
    }

    /// Remove the last block and its rendered unit.
    ///
    /// Returns `None` when the page is empty; never panics.
    pub fn remove_last_block(&mut self) -> Option<Block> {
        let block = self.blocks.pop()?;
        self.surface.pop();
        Some(block)
    }

    /// Whether the surface's occupied extent exceeds `max_extent` plus the
    /// tolerance margin
    pub fn is_overflow(&self, max_extent: f32) -> bool {
        self.surface.extent() > max_extent + OVERFLOW_TOLERANCE
    }

    /// Blocks on this page, in visual top-to-bottom order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks on this page
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the page holds no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Borrow the bound surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Hand off the block sequence and surface
    pub fn into_parts(self) -> (Vec<Block>, S) {
        (self.blocks, self.surface)
    }
}
