//! Document model: content blocks and their classification

mod block;
mod classify;

pub use block::{strip_markup, Block, BlockKind, DEFAULT_MIN_SPLIT_LEN};
pub use classify::{classify, SourceElement, SourceTag};
