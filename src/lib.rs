//! # canvas-slides
//!
//! Positions a tree of content boxes on an infinite canvas, then cuts the
//! positioned output into bounded-height pages ("slides").
//!
//! ## Architecture
//!
//! Layout itself is delegated to a [`LayoutOracle`] (taffy by default). This
//! crate owns the protocol around it and the pagination pass after it:
//!
//! ```text
//! ContentBox tree → stage → one measurement barrier → normalize → PositionedBox tree
//! PositionedBox siblings → group_rows → paginate → Page list
//! ```
//!
//! Every call is synchronous and self-contained: no caching, no shared state
//! between calls, one oracle round trip per layout.
//!
//! ## Modules
//!
//! - [`types`] - Box tree, positioned tree, geometry
//! - [`layout`] - Tree builder, oracle adapter, coordinate normalizer
//! - [`paginate`] - Row grouper and paginator
//! - [`config`] - Pagination settings loaded from JSON
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod layout;
pub mod paginate;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{PaginationConfig, RowOrder};

pub use error::{ConfigError, LayoutError, LayoutOracleError};

pub use layout::{
    layout, measure, normalize, stage_tree, ComputedLayout, LayoutOracle, MeasurementMap,
    OracleNode, TaffyOracle,
};

pub use paginate::{
    group_rows, group_rows_sorted, paginate, paginate_boxes, paginate_children, Page, Row,
    DEFAULT_ROW_EPSILON,
};
