//! Row Grouper - clusters siblings into rows by vertical proximity.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::PositionedBox;

/// Default vertical tolerance for row membership, in pixels.
///
/// Absorbs sub-pixel rounding between nominally aligned boxes.
pub const DEFAULT_ROW_EPSILON: f32 = 1.0;

/// Sibling boxes sharing a vertical band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// `y` of the first member.
    pub top: f32,
    /// Lowest `y + height` among members.
    pub bottom: f32,
    pub boxes: Vec<PositionedBox>,
}

impl Row {
    fn open(first: PositionedBox) -> Self {
        Self {
            top: first.y,
            bottom: first.bottom(),
            boxes: vec![first],
        }
    }

    fn accepts(&self, candidate: &PositionedBox, epsilon: f32) -> bool {
        (candidate.y - self.top).abs() <= epsilon
    }

    fn push(&mut self, member: PositionedBox) {
        self.bottom = self.bottom.max(member.bottom());
        self.boxes.push(member);
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Group `boxes` into rows, trusting their order.
///
/// `boxes` must already be row-major (as a wrap-flow oracle emits them): a
/// box joins the current row when its `y` is within `epsilon` of the row's
/// top, and opens a new row otherwise. Nothing is sorted, so a column-major
/// sequence produces one row per box. Row order and member order follow
/// encounter order.
pub fn group_rows(boxes: impl IntoIterator<Item = PositionedBox>, epsilon: f32) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();

    for candidate in boxes {
        if let Some(row) = rows.last_mut().filter(|row| row.accepts(&candidate, epsilon)) {
            trace!(id = %candidate.id, top = row.top, "joins row");
            row.push(candidate);
            continue;
        }
        trace!(id = %candidate.id, top = candidate.y, "opens row");
        rows.push(Row::open(candidate));
    }

    rows
}

/// Like [`group_rows`], but stable-sorts by `(y, x)` first.
///
/// For inputs whose order is not row-major.
pub fn group_rows_sorted(boxes: impl IntoIterator<Item = PositionedBox>, epsilon: f32) -> Vec<Row> {
    let mut boxes: Vec<PositionedBox> = boxes.into_iter().collect();
    boxes.sort_by(|a, b| match a.y.total_cmp(&b.y) {
        Ordering::Equal => a.x.total_cmp(&b.x),
        other => other,
    });
    group_rows(boxes, epsilon)
}
