//! Classification of source elements into pagination blocks

use crate::document::{Block, BlockKind};

/// Tag of a source content element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTag {
    Paragraph,
    /// Heading level 1-6
    Heading(u8),
    OrderedList,
    UnorderedList,
    Preformatted,
    Quote,
    Table,
    Callout,
    Image,
    /// Anything outside the selector set; skipped by classification
    Other,
}

/// A source content element: a tag plus its rendered markup.
///
/// For paragraph-like elements `markup` is the inner markup carried into a
/// text block verbatim; for structural and media elements it is the full
/// rendered form captured as an immutable snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceElement {
    pub tag: SourceTag,
    pub markup: String,
}

impl SourceElement {
    pub fn new(tag: SourceTag, markup: impl Into<String>) -> Self {
        Self {
            tag,
            markup: markup.into(),
        }
    }
}

/// Map an ordered sequence of source elements to pagination blocks.
///
/// Paragraphs and headings become splittable text blocks; lists, tables,
/// quotes, preformatted blocks, and callouts become atomic structured
/// blocks; images become atomic media blocks. Snapshots are cloned here,
/// so mutating a source element afterwards never reaches the block.
pub fn classify(elements: &[SourceElement]) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(elements.len());

    for element in elements {
        let block = match element.tag {
            SourceTag::Paragraph => Block::paragraph(element.markup.clone()),
            SourceTag::Heading(level) => Block::heading(level, element.markup.clone()),
            SourceTag::OrderedList | SourceTag::UnorderedList => {
                Block::embed(BlockKind::List, element.markup.clone())
            }
            SourceTag::Preformatted => {
                Block::embed(BlockKind::Preformatted, element.markup.clone())
            }
            SourceTag::Quote => Block::embed(BlockKind::Quote, element.markup.clone()),
            SourceTag::Table => Block::embed(BlockKind::Table, element.markup.clone()),
            SourceTag::Callout => Block::embed(BlockKind::Callout, element.markup.clone()),
            SourceTag::Image => Block::figure(element.markup.clone()),
            SourceTag::Other => continue,
        };
        blocks.push(block);
    }

    blocks
}
