//! Taffy Bridge - the default layout oracle, backed by a `TaffyTree`.
//!
//! Taffy reports each node's location relative to its parent. The barrier
//! accumulates those into container-space rectangles once, top-down, so
//! every later `rect` read is a plain lookup.

use std::collections::HashMap;

use taffy::{AvailableSpace, Dimension, Display, NodeId, Size as TaffySize, Style, TaffyTree};
use tracing::trace;

use crate::error::LayoutOracleError;
use crate::types::{Point, Rect, Size};

use super::oracle::{LayoutOracle, OracleNode};
use super::style::{apply_fixed_size, parse_style};

fn engine_error(err: impl std::fmt::Display) -> LayoutOracleError {
    LayoutOracleError::Engine(err.to_string())
}

/// Layout oracle running taffy's flexbox/block algorithms.
pub struct TaffyOracle {
    tree: TaffyTree<()>,
    /// Oracle handle index → taffy node.
    nodes: Vec<NodeId>,
    /// Taffy node → oracle handle index.
    handles: HashMap<NodeId, usize>,
    /// Explicit bounds of each staged container.
    containers: HashMap<usize, Size>,
    /// Container-space rectangles, filled in by `measure`.
    measured: Vec<Option<Rect>>,
}

impl Default for TaffyOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl TaffyOracle {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            nodes: Vec::new(),
            handles: HashMap::new(),
            containers: HashMap::new(),
            measured: Vec::new(),
        }
    }

    /// Number of nodes currently staged (containers included).
    pub fn staged_count(&self) -> usize {
        self.nodes.len()
    }

    fn stage(&mut self, style: Style) -> Result<OracleNode, LayoutOracleError> {
        let node_id = self.tree.new_leaf(style).map_err(engine_error)?;
        let index = self.nodes.len();
        self.nodes.push(node_id);
        self.handles.insert(node_id, index);
        self.measured.push(None);
        Ok(OracleNode::new(index))
    }

    fn node_id(&self, node: OracleNode) -> Result<NodeId, LayoutOracleError> {
        self.nodes
            .get(node.index())
            .copied()
            .ok_or(LayoutOracleError::UnknownNode(node))
    }

    /// Accumulate parent-relative locations into container space.
    fn resolve_absolute(&mut self, container: NodeId) -> Result<(), LayoutOracleError> {
        let mut stack = vec![(container, Point::ZERO)];

        while let Some((node_id, parent_origin)) = stack.pop() {
            let layout = self.tree.layout(node_id).map_err(engine_error)?;
            let origin = parent_origin + Point::new(layout.location.x, layout.location.y);
            let rect = Rect::new(origin.x, origin.y, layout.size.width, layout.size.height);

            if let Some(&index) = self.handles.get(&node_id) {
                self.measured[index] = Some(rect);
            }

            for child in self.tree.children(node_id).map_err(engine_error)? {
                stack.push((child, origin));
            }
        }

        Ok(())
    }
}

impl LayoutOracle for TaffyOracle {
    fn stage_container(&mut self, bounds: Size) -> Result<OracleNode, LayoutOracleError> {
        // Block display: the hosted root keeps its own height instead of
        // being shrunk to the container's.
        let style = Style {
            display: Display::Block,
            size: TaffySize {
                width: Dimension::Length(bounds.width),
                height: Dimension::Length(bounds.height),
            },
            ..Default::default()
        };
        let node = self.stage(style)?;
        self.containers.insert(node.index(), bounds);
        Ok(node)
    }

    fn stage_node(
        &mut self,
        style: &str,
        size_hint: Option<Size>,
    ) -> Result<OracleNode, LayoutOracleError> {
        let mut parsed = parse_style(style)?;
        if let Some(size) = size_hint {
            apply_fixed_size(&mut parsed, size);
        }
        let node = self.stage(parsed)?;
        trace!(node = node.index(), fixed = size_hint.is_some(), "staged node");
        Ok(node)
    }

    fn attach(&mut self, parent: OracleNode, child: OracleNode) -> Result<(), LayoutOracleError> {
        let parent_id = self.node_id(parent)?;
        let child_id = self.node_id(child)?;
        self.tree.add_child(parent_id, child_id).map_err(engine_error)
    }

    fn measure(&mut self, container: OracleNode) -> Result<(), LayoutOracleError> {
        let root = self.node_id(container)?;
        let bounds = self
            .containers
            .get(&container.index())
            .copied()
            .ok_or(LayoutOracleError::UnknownNode(container))?;

        let available = TaffySize {
            width: AvailableSpace::Definite(bounds.width),
            height: AvailableSpace::Definite(bounds.height),
        };
        self.tree.compute_layout(root, available).map_err(engine_error)?;
        self.resolve_absolute(root)
    }

    fn rect(&self, node: OracleNode) -> Result<Rect, LayoutOracleError> {
        match self.measured.get(node.index()) {
            Some(Some(rect)) => Ok(*rect),
            Some(None) => Err(LayoutOracleError::NotMeasured(node)),
            None => Err(LayoutOracleError::UnknownNode(node)),
        }
    }

    fn clear(&mut self) {
        self.tree.clear();
        self.nodes.clear();
        self.handles.clear();
        self.containers.clear();
        self.measured.clear();
    }
}
