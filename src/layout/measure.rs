//! Layout Oracle Adapter - one build phase, one barrier, one batch of reads.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::error::LayoutError;
use crate::types::{ContentBox, Point, Rect, Size};

use super::builder::{stage_tree, StagedTree};
use super::oracle::LayoutOracle;

/// Oracle rectangles for one layout call, keyed by box id.
///
/// All rectangles share the container's coordinate space. Populated once per
/// call and never reused across calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementMap {
    container: Rect,
    rects: HashMap<String, Rect>,
    /// Child-group wrapper rectangles, keyed by the owning box's id.
    wrappers: HashMap<String, Rect>,
}

impl MeasurementMap {
    /// An empty map for a container measured at `container`.
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            ..Self::default()
        }
    }

    /// Record a box rectangle. A repeated id overwrites the earlier one.
    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        self.rects.insert(id.into(), rect);
    }

    /// Record the child-group wrapper rectangle owned by box `owner`.
    pub fn insert_wrapper(&mut self, owner: impl Into<String>, rect: Rect) {
        self.wrappers.insert(owner.into(), rect);
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    pub fn wrapper(&self, owner: &str) -> Option<Rect> {
        self.wrappers.get(owner).copied()
    }

    /// Position of `owner`'s child-group wrapper relative to `owner` itself.
    pub fn wrapper_offset(&self, owner: &str) -> Option<Point> {
        Some(self.wrapper(owner)?.offset_from(&self.get(owner)?))
    }

    /// Number of box rectangles (wrappers not counted).
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rects.keys().map(String::as_str)
    }
}

fn read_staged<O: LayoutOracle + ?Sized>(
    oracle: &O,
    staged: &StagedTree,
) -> Result<MeasurementMap, LayoutError> {
    let mut map = MeasurementMap::new(oracle.rect(staged.container)?);
    for staged_box in &staged.boxes {
        map.insert(staged_box.id.clone(), oracle.rect(staged_box.node)?);
        if let Some(wrapper) = staged_box.wrapper {
            map.insert_wrapper(staged_box.id.clone(), oracle.rect(wrapper)?);
        }
    }
    Ok(map)
}

fn stage_and_measure<O: LayoutOracle + ?Sized>(
    oracle: &mut O,
    root: &ContentBox,
    bounds: Size,
) -> Result<MeasurementMap, LayoutError> {
    let staged = stage_tree(oracle, root, bounds)?;

    debug!(
        nodes = staged.node_count(),
        width = bounds.width,
        height = bounds.height,
        "measurement barrier"
    );
    oracle.measure(staged.container)?;

    read_staged(oracle, &staged)
}

/// Measure every box of `root` inside a container of `bounds`.
///
/// Degenerate bounds (either axis not strictly positive) return an empty map
/// without touching the oracle. Otherwise the whole tree is staged, measured
/// once, and read back in one batch; the oracle is cleared before returning,
/// on success and on failure alike.
#[instrument(skip_all, fields(root = %root.id))]
pub fn measure<O: LayoutOracle + ?Sized>(
    oracle: &mut O,
    root: &ContentBox,
    bounds: Size,
) -> Result<MeasurementMap, LayoutError> {
    if bounds.is_degenerate() {
        debug!(
            width = bounds.width,
            height = bounds.height,
            "degenerate container, skipping layout"
        );
        return Ok(MeasurementMap::default());
    }

    let result = stage_and_measure(oracle, root, bounds);
    oracle.clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TaffyOracle;

    fn card_grid() -> ContentBox {
        ContentBox::variable("grid", "display: flex; flex-wrap: wrap; width: 100px")
            .with_children((0..3).map(|i| ContentBox::fixed(format!("card{i}"), 40.0, 20.0, "")))
    }

    #[test]
    fn test_measure_wrap_rows() {
        let mut oracle = TaffyOracle::new();
        let map = measure(&mut oracle, &card_grid(), Size::new(200.0, 200.0)).unwrap();

        assert_eq!(map.len(), 4);
        assert_eq!(map.get("card0"), Some(Rect::new(0.0, 0.0, 40.0, 20.0)));
        assert_eq!(map.get("card1"), Some(Rect::new(40.0, 0.0, 40.0, 20.0)));
        assert_eq!(map.get("card2"), Some(Rect::new(0.0, 20.0, 40.0, 20.0)));
        assert_eq!(oracle.staged_count(), 0);
    }

    #[test]
    fn test_degenerate_container() {
        let mut oracle = TaffyOracle::new();
        for bounds in [Size::new(0.0, 100.0), Size::new(100.0, -5.0)] {
            let map = measure(&mut oracle, &card_grid(), bounds).unwrap();
            assert!(map.is_empty());
        }
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let root = ContentBox::variable("root", "display: flex; flex-direction: column")
            .with_child(ContentBox::fixed("dup", 10.0, 10.0, ""))
            .with_child(ContentBox::fixed("dup", 10.0, 30.0, ""));

        let mut oracle = TaffyOracle::new();
        let map = measure(&mut oracle, &root, Size::new(100.0, 100.0)).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("dup"), Some(Rect::new(0.0, 10.0, 10.0, 30.0)));
    }

    #[test]
    fn test_oracle_error_clears_staging() {
        let root = ContentBox::variable("root", "")
            .with_child(ContentBox::variable("ok", "display: flex"))
            .with_child(ContentBox::variable("bad", "display: table"));

        let mut oracle = TaffyOracle::new();
        let err = measure(&mut oracle, &root, Size::new(100.0, 100.0)).unwrap_err();

        assert!(matches!(err, LayoutError::Oracle(_)));
        assert_eq!(oracle.staged_count(), 0);
    }

    #[test]
    fn test_wrapper_offset() {
        let root = ContentBox::variable("slide", "display: flex; padding: 10px")
            .with_child_group("display: flex; padding: 6px 4px")
            .with_child(ContentBox::fixed("a", 10.0, 10.0, ""));

        let mut oracle = TaffyOracle::new();
        let map = measure(&mut oracle, &root, Size::new(100.0, 100.0)).unwrap();

        assert_eq!(map.wrapper_offset("slide"), Some(Point::new(10.0, 10.0)));
        assert_eq!(map.get("a"), Some(Rect::new(14.0, 16.0, 10.0, 10.0)));
        assert_eq!(map.wrapper_offset("a"), None);
    }
}
