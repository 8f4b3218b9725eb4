//! Coordinate Normalizer - container-space rectangles to parent-relative boxes.
//!
//! Each box is positioned relative to its logical parent. When the parent
//! grouped its children in a wrapper, a child's position is the sum of two
//! offsets: wrapper-in-parent and child-in-wrapper. The wrapper itself never
//! becomes a node.

use crate::error::LayoutError;
use crate::types::{ContentBox, Point, PositionedBox, Rect};

use super::measure::MeasurementMap;

/// The frame children are measured against, and where that frame sits inside
/// the logical parent.
#[derive(Debug, Clone, Copy)]
struct Frame {
    rect: Rect,
    offset_in_parent: Point,
}

fn lookup(rects: &MeasurementMap, id: &str) -> Result<Rect, LayoutError> {
    rects
        .get(id)
        .ok_or_else(|| LayoutError::MissingMeasurement { id: id.to_string() })
}

fn child_frame(content: &ContentBox, rect: Rect, rects: &MeasurementMap) -> Result<Frame, LayoutError> {
    if content.child_group_style.is_none() {
        return Ok(Frame {
            rect,
            offset_in_parent: Point::ZERO,
        });
    }

    let wrapper = rects
        .wrapper(&content.id)
        .ok_or_else(|| LayoutError::MissingMeasurement {
            id: format!("{} (child group)", content.id),
        })?;

    Ok(Frame {
        rect: wrapper,
        offset_in_parent: wrapper.offset_from(&rect),
    })
}

fn normalize_node(
    content: &ContentBox,
    frame: Frame,
    rects: &MeasurementMap,
) -> Result<PositionedBox, LayoutError> {
    let rect = lookup(rects, &content.id)?;
    let position = frame.offset_in_parent + rect.offset_from(&frame.rect);

    let children_frame = child_frame(content, rect, rects)?;
    let children = content
        .children
        .iter()
        .map(|child| normalize_node(child, children_frame, rects))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PositionedBox {
        id: content.id.clone(),
        x: position.x,
        y: position.y,
        width: rect.width,
        height: rect.height,
        children,
    })
}

/// Build the positioned tree for `root` from its measurements.
///
/// The root is positioned relative to the container. The output mirrors
/// `root` node for node. A missing rectangle is reported as
/// [`LayoutError::MissingMeasurement`] and aborts the whole walk.
pub fn normalize(root: &ContentBox, rects: &MeasurementMap) -> Result<PositionedBox, LayoutError> {
    let frame = Frame {
        rect: rects.container(),
        offset_in_parent: Point::ZERO,
    };
    normalize_node(root, frame, rects)
}
