//! Layout Module
//!
//! Positions a box tree on the canvas by delegating size and position
//! resolution to a layout oracle.
//!
//! # Pipeline
//!
//! ```text
//! ContentBox tree → stage_tree → oracle barrier → MeasurementMap → normalize → PositionedBox tree
//! ```
//!
//! 1. [`stage_tree`] writes every node (and any child-group wrappers) into the
//!    oracle. No reads happen during staging.
//! 2. [`measure`] issues the single measurement barrier and reads every
//!    rectangle in one batch, then clears the oracle.
//! 3. [`normalize`] rewrites container-space rectangles as offsets from each
//!    node's logical parent.
//!
//! [`TaffyOracle`] is the default oracle; anything implementing
//! [`LayoutOracle`] can stand in for it.
//!
//! # Example
//!
//! ```
//! use canvas_slides::{layout, ContentBox, Size, TaffyOracle};
//!
//! let root = ContentBox::variable("deck", "display: flex; flex-wrap: wrap; width: 300px")
//!     .with_children((0..4).map(|i| ContentBox::fixed(format!("card{i}"), 100.0, 60.0, "")));
//!
//! let mut oracle = TaffyOracle::new();
//! let computed = layout(&mut oracle, &root, Size::new(800.0, 600.0)).unwrap().unwrap();
//! assert_eq!(computed.root.children[3].y, 60.0);
//! ```

mod builder;
mod measure;
mod normalize;
mod oracle;
mod style;
mod taffy_bridge;

pub use builder::{stage_tree, StagedBox, StagedTree};
pub use measure::{measure, MeasurementMap};
pub use normalize::normalize;
pub use oracle::{LayoutOracle, OracleNode};
pub use style::parse_style;
pub use taffy_bridge::TaffyOracle;

use tracing::instrument;

use crate::error::LayoutError;
use crate::types::{ContentBox, Point, PositionedBox, Size};

/// Result of one layout call.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLayout {
    /// Positioned tree, root relative to the container.
    pub root: PositionedBox,
    /// Raw container-space rectangles the tree was built from.
    pub measurements: MeasurementMap,
}

impl ComputedLayout {
    /// Where box `id` grouped its children, relative to box `id`.
    ///
    /// `None` when the box has no child-group wrapper.
    pub fn wrapper_offset(&self, id: &str) -> Option<Point> {
        self.measurements.wrapper_offset(id)
    }
}

/// Lay out `root` inside a container of `bounds`.
///
/// Returns `Ok(None)` for degenerate bounds; the oracle is not contacted.
/// Oracle failures are returned unchanged and never retried.
#[instrument(skip_all, fields(root = %root.id, nodes = root.node_count()))]
pub fn layout<O: LayoutOracle + ?Sized>(
    oracle: &mut O,
    root: &ContentBox,
    bounds: Size,
) -> Result<Option<ComputedLayout>, LayoutError> {
    let measurements = measure(oracle, root, bounds)?;
    if measurements.is_empty() {
        return Ok(None);
    }

    let positioned = normalize(root, &measurements)?;
    Ok(Some(ComputedLayout {
        root: positioned,
        measurements,
    }))
}
