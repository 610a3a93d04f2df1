//! Folio: a greedy block-pagination core
//!
//! This crate paginates a flowing sequence of content blocks (paragraphs,
//! headings, tables, images, ...) into discrete fixed-size pages:
//! - Greedy page filling with overflow detection and tail-splitting retry
//! - Back-to-front splits only; tail-only merges; atomic structured/media
//!   blocks are never split
//! - Guaranteed termination via forced placement and a hard iteration
//!   ceiling
//! - A derived, identically-disciplined table of contents
//!
//! Measurement is injected through the [`Surface`] trait, so the algorithm
//! runs against a real layout target in production and a synthetic oracle
//! in tests.

pub mod document;
pub mod layout;
pub mod options;
pub mod render;

// Re-export primary types
pub use document::{classify, Block, BlockKind, SourceElement, SourceTag};
pub use layout::{
    extract_headings, EstimatingSurface, HeadingRef, Page, PageSizeTable, PaginationEngine,
    Surface, TextMetrics, TocPage, TocPaginator, OVERFLOW_TOLERANCE,
};
pub use options::PaginationOptions;
pub use render::{format_page_marker, BookLayout};

/// The main pagination facade combining classification, the page engine,
/// TOC derivation, and marker formatting.
pub struct Paginator {
    options: PaginationOptions,
    sizes: PageSizeTable,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PaginationOptions::default())
    }
}

impl Paginator {
    /// Create a paginator with the given options
    pub fn new(options: PaginationOptions) -> Self {
        Self {
            options,
            sizes: PageSizeTable::new(),
        }
    }

    /// Get the configured options
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Maximum extent for content pages
    pub fn content_extent(&self) -> f32 {
        self.sizes
            .resolve(&self.options.book_size, self.options.page_height)
    }

    /// Maximum extent for TOC pages
    pub fn toc_extent(&self) -> f32 {
        self.sizes
            .resolve(&self.options.toc_size, self.options.toc_height)
    }

    /// Paginate classified source elements into a [`BookLayout`].
    ///
    /// `new_surface` supplies one fresh measurement surface per page
    /// (content and TOC alike).
    pub fn paginate<S, F>(&self, elements: &[SourceElement], mut new_surface: F) -> BookLayout<S>
    where
        S: Surface,
        F: FnMut() -> S,
    {
        let blocks = classify(elements);
        self.paginate_blocks(&blocks, &mut new_surface)
    }

    /// Paginate an already-classified block sequence
    pub fn paginate_blocks<S, F>(&self, blocks: &[Block], mut new_surface: F) -> BookLayout<S>
    where
        S: Surface,
        F: FnMut() -> S,
    {
        let mut engine = PaginationEngine::new(
            self.content_extent(),
            self.options.min_split_len,
            &mut new_surface,
        );
        engine.paginate(blocks);
        let pages = engine.into_pages();

        let headings = extract_headings(&pages);
        let mut toc = TocPaginator::new(self.toc_extent(), &mut new_surface);
        toc.paginate(&headings);
        let toc_pages = toc.into_pages();

        let markers = (1..=pages.len())
            .map(|n| format_page_marker(&self.options.marker_format, n))
            .collect();

        BookLayout {
            pages,
            toc_pages,
            markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_book() -> Vec<SourceElement> {
        let mut elements = vec![SourceElement::new(SourceTag::Heading(1), "Introduction")];
        for i in 0..6 {
            elements.push(SourceElement::new(
                SourceTag::Paragraph,
                format!(
                    "Paragraph {} has a first sentence. Then a second one, with a clause; and an end.",
                    i
                ),
            ));
        }
        elements.push(SourceElement::new(SourceTag::Heading(2), "Details"));
        elements.push(SourceElement::new(
            SourceTag::Table,
            "<table><tr><td>k</td><td>v</td></tr></table>",
        ));
        elements.push(SourceElement::new(SourceTag::Heading(1), "Conclusion"));
        elements.push(SourceElement::new(SourceTag::Paragraph, "The end."));
        elements
    }

    fn options_with_extent(extent: f32) -> PaginationOptions {
        PaginationOptions {
            book_size: "custom".to_string(),
            page_height: extent,
            toc_size: "custom".to_string(),
            toc_height: extent,
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end() {
        let paginator = Paginator::new(options_with_extent(120.0));
        let book =
            paginator.paginate(&small_book(), || EstimatingSurface::new(TextMetrics::unit()));

        assert!(book.page_count() > 1);
        assert_eq!(book.markers.len(), book.page_count());
        assert_eq!(book.markers[0], "- 001 -");

        // No page overflows its extent plus the tolerance
        for page in &book.pages {
            assert!(page.surface().extent() <= 120.0 + OVERFLOW_TOLERANCE);
        }

        // All three headings survive into the TOC with monotonic pages
        let entries: Vec<_> = book
            .toc_pages
            .iter()
            .flat_map(|p| p.entries())
            .collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].text, "Introduction");
        assert!(entries
            .windows(2)
            .all(|w| w[0].page_number <= w[1].page_number));
        assert!(entries
            .iter()
            .all(|e| e.page_number >= 1 && e.page_number <= book.page_count()));
    }

    #[test]
    fn test_named_sizes_resolve() {
        let paginator = Paginator::new(PaginationOptions {
            book_size: "a5".to_string(),
            toc_size: "nonsense".to_string(),
            toc_height: 333.0,
            ..Default::default()
        });
        assert_eq!(paginator.content_extent(), 794.0);
        assert_eq!(paginator.toc_extent(), 333.0);
    }

    #[test]
    fn test_custom_marker_format() {
        let paginator = Paginator::new(PaginationOptions {
            marker_format: "page {page}".to_string(),
            book_size: "custom".to_string(),
            page_height: 1000.0,
            ..Default::default()
        });
        let book = paginator.paginate(
            &[SourceElement::new(SourceTag::Paragraph, "hello")],
            || EstimatingSurface::new(TextMetrics::unit()),
        );
        assert_eq!(book.markers, vec!["page 001".to_string()]);
    }
}
