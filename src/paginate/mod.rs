//! Pagination Module
//!
//! Splits a flat, positioned sibling list into bounded-height pages:
//!
//! ```text
//! PositionedBox siblings → group_rows → Row list → paginate → Page list
//! ```
//!
//! Rows are the unit of pagination; a row is never split across pages.
//! Splitting is vertical only.

mod pages;
mod rows;

pub use pages::{paginate, Page};
pub use rows::{group_rows, group_rows_sorted, Row, DEFAULT_ROW_EPSILON};

use crate::config::{PaginationConfig, RowOrder};
use crate::types::PositionedBox;

/// Group `boxes` into rows per `config.row_order`, then paginate.
pub fn paginate_boxes(boxes: Vec<PositionedBox>, config: &PaginationConfig) -> Vec<Page> {
    let rows = match config.row_order {
        RowOrder::Encounter => group_rows(boxes, config.row_epsilon),
        RowOrder::Sorted => group_rows_sorted(boxes, config.row_epsilon),
    };
    paginate(rows, config.max_page_height, config.page_offset)
}

/// Paginate the direct children of a positioned box.
///
/// The children's coordinates are relative to `parent`, so pages start at
/// `config.page_offset` regardless of where `parent` sits on the canvas.
pub fn paginate_children(parent: &PositionedBox, config: &PaginationConfig) -> Vec<Page> {
    paginate_boxes(parent.children.clone(), config)
}
