//! Pagination configuration surface

use crate::document::DEFAULT_MIN_SPLIT_LEN;
use serde::{Deserialize, Serialize};

/// Recognized pagination options.
///
/// `book_size` and `toc_size` name presets from
/// [`PageSizeTable`](crate::layout::PageSizeTable); the explicit height
/// fields are used only when the corresponding name is unrecognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    /// Named preset for content pages
    pub book_size: String,
    /// Override extent when `book_size` is unrecognized
    pub page_height: f32,
    /// Named preset for TOC pages (may differ from the content size)
    pub toc_size: String,
    /// Override extent when `toc_size` is unrecognized
    pub toc_height: f32,
    /// Minimum retained length for tail splits, in character units
    pub min_split_len: usize,
    /// Page-marker template with a `{page}` placeholder
    pub marker_format: String,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            book_size: "a4".to_string(),
            page_height: 1123.0,
            toc_size: "a4".to_string(),
            toc_height: 1123.0,
            min_split_len: DEFAULT_MIN_SPLIT_LEN,
            marker_format: "- {page} -".to_string(),
        }
    }
}
