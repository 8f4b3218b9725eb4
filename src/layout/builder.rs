//! Tree Builder - stages a whole box tree into an oracle.
//!
//! Staging is write-only: nothing here asks the oracle for a rectangle. The
//! adapter issues the measurement barrier once this returns.

use crate::error::LayoutError;
use crate::types::{ContentBox, DimensionConstraint, Size};

use super::oracle::{LayoutOracle, OracleNode};

/// One staged box.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedBox {
    pub id: String,
    pub node: OracleNode,
    /// Child-group wrapper interposed between this box and its children.
    pub wrapper: Option<OracleNode>,
}

/// Everything staged for one layout call, boxes in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedTree {
    pub container: OracleNode,
    pub boxes: Vec<StagedBox>,
}

impl StagedTree {
    /// Staged nodes including the container and wrappers.
    pub fn node_count(&self) -> usize {
        1 + self.boxes.len() + self.boxes.iter().filter(|b| b.wrapper.is_some()).count()
    }
}

fn size_hint(content: &ContentBox) -> Result<Option<Size>, LayoutError> {
    match content.dimension_constraint {
        DimensionConstraint::Variable => Ok(None),
        DimensionConstraint::Fixed => content
            .fixed_size()
            .map(Some)
            .ok_or_else(|| LayoutError::MissingFixedSize {
                id: content.id.clone(),
            }),
    }
}

fn stage_box<O: LayoutOracle + ?Sized>(
    oracle: &mut O,
    content: &ContentBox,
    parent: OracleNode,
    staged: &mut Vec<StagedBox>,
) -> Result<(), LayoutError> {
    let node = oracle.stage_node(&content.style_descriptor, size_hint(content)?)?;
    oracle.attach(parent, node)?;

    let wrapper = match &content.child_group_style {
        Some(style) => {
            let wrapper = oracle.stage_node(style, None)?;
            oracle.attach(node, wrapper)?;
            Some(wrapper)
        }
        None => None,
    };

    staged.push(StagedBox {
        id: content.id.clone(),
        node,
        wrapper,
    });

    let children_parent = wrapper.unwrap_or(node);
    for child in &content.children {
        stage_box(oracle, child, children_parent, staged)?;
    }

    Ok(())
}

/// Stage `root` inside a container of `bounds`.
///
/// Every node is created and attached before this returns; children are
/// attached in authored order.
pub fn stage_tree<O: LayoutOracle + ?Sized>(
    oracle: &mut O,
    root: &ContentBox,
    bounds: Size,
) -> Result<StagedTree, LayoutError> {
    let container = oracle.stage_container(bounds)?;
    let mut boxes = Vec::with_capacity(root.node_count());
    stage_box(oracle, root, container, &mut boxes)?;

    Ok(StagedTree { container, boxes })
}
