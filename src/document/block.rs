//! Block-level content units

use unicode_segmentation::UnicodeSegmentation;

/// Minimum retained length (in grapheme clusters) for a tail split
pub const DEFAULT_MIN_SPLIT_LEN: usize = 40;

/// The kind of block element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Regular paragraph
    Paragraph,
    /// Heading with level (1-6)
    Heading { level: u8 },
    /// Ordered or unordered list
    List,
    /// Preformatted text
    Preformatted,
    /// Block quote
    Quote,
    /// Table
    Table,
    /// Callout / admonition box
    Callout,
    /// Image
    Image,
}

impl Default for BlockKind {
    fn default() -> Self {
        BlockKind::Paragraph
    }
}

impl BlockKind {
    /// Check if this is a heading
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading { .. })
    }

    /// Markup tag used when rendering a text block of this kind
    pub fn tag(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "p",
            BlockKind::Heading { level } => match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            BlockKind::List => "ul",
            BlockKind::Preformatted => "pre",
            BlockKind::Quote => "blockquote",
            BlockKind::Table => "table",
            BlockKind::Callout => "aside",
            BlockKind::Image => "figure",
        }
    }
}

/// A unit of content participating in pagination.
///
/// Text blocks carry markup and can be split at their tail; the two atomic
/// variants carry an immutable rendered snapshot and never split or merge.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Splittable text content (paragraphs, headings)
    Text { kind: BlockKind, content: String },
    /// Atomic structured content (lists, tables, quotes, ...)
    Embed { kind: BlockKind, snapshot: String },
    /// Atomic media content
    Figure { snapshot: String },
}

impl Block {
    /// Create a paragraph text block
    pub fn paragraph(content: impl Into<String>) -> Self {
        Block::Text {
            kind: BlockKind::Paragraph,
            content: content.into(),
        }
    }

    /// Create a heading text block, clamping the level to 1-6
    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        Block::Text {
            kind: BlockKind::Heading {
                level: level.clamp(1, 6),
            },
            content: content.into(),
        }
    }

    /// Create an atomic structured block from a rendered snapshot
    pub fn embed(kind: BlockKind, snapshot: impl Into<String>) -> Self {
        Block::Embed {
            kind,
            snapshot: snapshot.into(),
        }
    }

    /// Create an atomic media block from a rendered snapshot
    pub fn figure(snapshot: impl Into<String>) -> Self {
        Block::Figure {
            snapshot: snapshot.into(),
        }
    }

    /// Get the kind tag of this block
    pub fn kind(&self) -> &BlockKind {
        match self {
            Block::Text { kind, .. } => kind,
            Block::Embed { kind, .. } => kind,
            Block::Figure { .. } => &BlockKind::Image,
        }
    }

    /// Check whether this block can be split
    pub fn is_splittable(&self) -> bool {
        matches!(self, Block::Text { .. })
    }

    /// Check whether this block has any visible content.
    ///
    /// Media blocks are never considered empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Text { content, .. } => strip_markup(content).trim().is_empty(),
            Block::Embed { snapshot, .. } => strip_markup(snapshot).trim().is_empty(),
            Block::Figure { .. } => false,
        }
    }

    /// Length of the text payload in grapheme clusters (0 for atomic blocks)
    pub fn content_len(&self) -> usize {
        match self {
            Block::Text { content, .. } => content.graphemes(true).count(),
            _ => 0,
        }
    }

    /// Split off a suffix of this block's content.
    ///
    /// Scans tail-to-head through the window `[min_len, len - min_len]` for a
    /// clause terminator; if none is found the split falls at the midpoint.
    /// Both halves are trimmed of surrounding whitespace. Returns
    /// `(head, tail)` without touching `self`, or `None` when the content is
    /// too short (length at or below `2 * min_len`), the trimmed tail would
    /// fall below `min_len`, or the block is atomic.
    pub fn split_tail(&self, min_len: usize) -> Option<(Block, Block)> {
        let (kind, content) = match self {
            Block::Text { kind, content } => (kind, content),
            _ => return None,
        };

        let graphemes: Vec<(usize, &str)> = content.grapheme_indices(true).collect();
        let total = graphemes.len();
        if min_len == 0 || total <= min_len * 2 {
            return None;
        }

        // Prefer a clause boundary; fall back to the midpoint so a split
        // always lands somewhere when the content is long enough.
        let mut split_at = total / 2;
        for i in (min_len..=total - min_len).rev() {
            if is_terminator(graphemes[i].1) {
                split_at = i + 1;
                break;
            }
        }

        let byte_split = graphemes
            .get(split_at)
            .map(|(b, _)| *b)
            .unwrap_or(content.len());
        let head = content[..byte_split].trim();
        let tail = content[byte_split..].trim();

        if tail.graphemes(true).count() < min_len {
            return None;
        }

        Some((
            Block::Text {
                kind: kind.clone(),
                content: head.to_string(),
            },
            Block::Text {
                kind: kind.clone(),
                content: tail.to_string(),
            },
        ))
    }

    /// Append another block's content verbatim to the end of this one.
    ///
    /// Only two text blocks of the same kind merge; atomic blocks silently
    /// ignore the request. Returns whether a merge happened. Nothing is
    /// inserted at the seam, so rejoining the halves of a mid-run split
    /// reproduces the original content exactly.
    pub fn merge_tail(&mut self, other: &Block) -> bool {
        match (self, other) {
            (
                Block::Text { kind, content },
                Block::Text {
                    kind: other_kind,
                    content: other_content,
                },
            ) if *kind == *other_kind => {
                content.push_str(other_content);
                true
            }
            _ => false,
        }
    }

    /// Produce the rendered markup unit for this block
    pub fn render(&self) -> String {
        match self {
            Block::Text { kind, content } => {
                let tag = kind.tag();
                format!("<{tag}>{content}</{tag}>")
            }
            Block::Embed { snapshot, .. } => snapshot.clone(),
            Block::Figure { snapshot } => snapshot.clone(),
        }
    }
}

/// Check whether a grapheme cluster ends a sentence or clause
fn is_terminator(grapheme: &str) -> bool {
    matches!(
        grapheme,
        "." | "!" | "?" | ";" | ":" | "," | "。" | "！" | "？" | "；" | "：" | "，"
    )
}

/// Strip markup tags from a rendered string, keeping visible text
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
