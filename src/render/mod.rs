//! Render artifacts: page markers and the final book layout

use crate::layout::{Page, Surface, TocPage};

/// Placeholder substituted with the page ordinal in marker templates
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Format a page marker from a template.
///
/// Every occurrence of `{page}` is replaced with the zero-padded 1-based
/// page ordinal. Pure formatting; pagination never depends on the result.
pub fn format_page_marker(template: &str, page_number: usize) -> String {
    template.replace(PAGE_PLACEHOLDER, &format!("{:03}", page_number))
}

/// The final pagination artifact: content pages, TOC pages, and one marker
/// per content page. Handed to the caller by value; the engine keeps no
/// references after returning.
#[derive(Debug)]
pub struct BookLayout<S> {
    pub pages: Vec<Page<S>>,
    pub toc_pages: Vec<TocPage<S>>,
    pub markers: Vec<String>,
}

impl<S: Surface> BookLayout<S> {
    /// Number of content pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of TOC pages
    pub fn toc_page_count(&self) -> usize {
        self.toc_pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_page_marker() {
        assert_eq!(format_page_marker("- {page} -", 1), "- 001 -");
        assert_eq!(format_page_marker("- {page} -", 42), "- 042 -");
        assert_eq!(format_page_marker("p.{page}", 1234), "p.1234");
    }

    #[test]
    fn test_template_without_placeholder() {
        assert_eq!(format_page_marker("footer", 7), "footer");
    }
}
