//! Pagination layout: surfaces, pages, and the greedy engines

mod engine;
mod page;
mod page_size;
mod surface;
mod toc;

pub use engine::PaginationEngine;
pub use page::{Page, OVERFLOW_TOLERANCE};
pub use page_size::PageSizeTable;
pub use surface::{EstimatingSurface, Surface, TextMetrics};
pub use toc::{extract_headings, HeadingRef, TocPage, TocPaginator};
