//! Table-of-contents extraction and pagination

use crate::document::{strip_markup, Block, BlockKind};
use crate::layout::{Page, Surface};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A heading found on a produced page.
///
/// `page_number` is 1-based and equal to the page's position in the final
/// page sequence; `anchor` is a stable identifier synthesized from the page
/// index and the heading's index within its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRef {
    pub level: u8,
    pub text: String,
    pub anchor: String,
    pub page_number: usize,
}

/// Collect heading records from produced pages, in page order then in-page
/// document order
pub fn extract_headings<S: Surface>(pages: &[Page<S>]) -> Vec<HeadingRef> {
    let mut headings = Vec::new();

    for (page_idx, page) in pages.iter().enumerate() {
        let mut on_page: SmallVec<[HeadingRef; 4]> = SmallVec::new();
        for block in page.blocks() {
            if let Block::Text {
                kind: BlockKind::Heading { level },
                content,
            } = block
            {
                on_page.push(HeadingRef {
                    level: *level,
                    text: strip_markup(content).trim().to_string(),
                    anchor: format!("toc-{}-{}", page_idx, on_page.len()),
                    page_number: page_idx + 1,
                });
            }
        }
        headings.extend(on_page);
    }

    headings
}

/// A page holding only table-of-contents list items
#[derive(Debug)]
pub struct TocPage<S> {
    entries: Vec<HeadingRef>,
    surface: S,
}

impl<S: Surface> TocPage<S> {
    pub fn new(surface: S) -> Self {
        Self {
            entries: Vec::new(),
            surface,
        }
    }

    /// Append an entry and render its list item onto the surface
    pub fn add_entry(&mut self, entry: &HeadingRef) {
        self.surface.push(&render_entry(entry));
        self.entries.push(entry.clone());
    }

    /// Remove the last entry and its rendered list item
    pub fn remove_last_entry(&mut self) -> Option<HeadingRef> {
        let entry = self.entries.pop()?;
        self.surface.pop();
        Some(entry)
    }

    /// Same overflow semantics as a content page
    pub fn is_overflow(&self, max_extent: f32) -> bool {
        self.surface.extent() > max_extent + crate::layout::OVERFLOW_TOLERANCE
    }

    pub fn entries(&self) -> &[HeadingRef] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Rendered list-item markup for one TOC entry
fn render_entry(entry: &HeadingRef) -> String {
    format!(
        "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a><span>{}</span></li>",
        entry.level, entry.anchor, entry.text, entry.page_number
    )
}

/// Greedy list packer for TOC entries.
///
/// Items are indivisible: an entry that overflows the current page is
/// rolled back whole and retried on a fresh page. An entry that overflows
/// even an empty page is kept anyway, so the index always advances and no
/// iteration ceiling is needed.
pub struct TocPaginator<S, F> {
    pages: Vec<TocPage<S>>,
    max_extent: f32,
    new_surface: F,
}

impl<S, F> TocPaginator<S, F>
where
    S: Surface,
    F: FnMut() -> S,
{
    pub fn new(max_extent: f32, new_surface: F) -> Self {
        Self {
            pages: Vec::new(),
            max_extent,
            new_surface,
        }
    }

    /// Paginate heading records onto TOC pages; returns the page count
    pub fn paginate(&mut self, headings: &[HeadingRef]) -> usize {
        self.pages.clear();
        self.open_page();

        let max_extent = self.max_extent;
        let mut i = 0;
        while i < headings.len() {
            self.current_page().add_entry(&headings[i]);
            if self.current_page().is_overflow(max_extent) {
                if self.current_page().entry_count() == 1 {
                    // A lone entry taller than the page: keep it rather than
                    // bounce between empty pages
                    i += 1;
                    continue;
                }
                self.current_page().remove_last_entry();
                self.open_page();
                // Retry the same record on the fresh page
                continue;
            }
            i += 1;
        }

        self.pages.len()
    }

    fn open_page(&mut self) {
        let page = TocPage::new((self.new_surface)());
        self.pages.push(page);
    }

    fn current_page(&mut self) -> &mut TocPage<S> {
        self.pages.last_mut().expect("no open TOC page")
    }

    pub fn pages(&self) -> &[TocPage<S>] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<TocPage<S>> {
        self.pages
    }
}
