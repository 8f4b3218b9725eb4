//! Layout Oracle - the call contract of the external layout engine.
//!
//! The oracle owns a staging area. One layout call goes through it exactly
//! once, in this order:
//!
//! 1. `stage_container` + `stage_node` / `attach` for every node (writes only)
//! 2. `measure` (the single measurement barrier)
//! 3. `rect` for every node (reads only)
//! 4. `clear`
//!
//! Rectangles share one coordinate space: the container's.

use crate::error::LayoutOracleError;
use crate::types::{Rect, Size};

/// Opaque handle to a node staged in an oracle.
///
/// Only meaningful to the oracle that issued it, and only until its next
/// [`LayoutOracle::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OracleNode(usize);

impl OracleNode {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// An engine that resolves box sizes and positions from style descriptors.
pub trait LayoutOracle {
    /// Stage the container hosting the tree, with explicit pixel bounds.
    fn stage_container(&mut self, bounds: Size) -> Result<OracleNode, LayoutOracleError>;

    /// Stage one node. `size_hint` carries hard width/height constraints.
    fn stage_node(
        &mut self,
        style: &str,
        size_hint: Option<Size>,
    ) -> Result<OracleNode, LayoutOracleError>;

    /// Append `child` as the last child of `parent`.
    fn attach(&mut self, parent: OracleNode, child: OracleNode) -> Result<(), LayoutOracleError>;

    /// Measurement barrier: resolve every node reachable from `container`.
    fn measure(&mut self, container: OracleNode) -> Result<(), LayoutOracleError>;

    /// Resolved rectangle of `node` in the container's coordinate space.
    fn rect(&self, node: OracleNode) -> Result<Rect, LayoutOracleError>;

    /// Tear down everything staged since the last clear.
    fn clear(&mut self);
}
