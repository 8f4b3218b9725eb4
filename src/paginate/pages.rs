//! Paginator - packs rows into height-bounded pages.
//!
//! Rows are never split. A row that alone exceeds the page height still gets
//! a page of its own, so pagination always makes progress.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::{Point, PositionedBox};

use super::rows::Row;

/// One slide: boxes re-based to the page's local origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub boxes: Vec<PositionedBox>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Vertical extent from the highest top to the lowest bottom.
    pub fn height(&self) -> f32 {
        let top = self.boxes.iter().map(|b| b.y).fold(f32::INFINITY, f32::min);
        let bottom = self
            .boxes
            .iter()
            .map(PositionedBox::bottom)
            .fold(f32::NEG_INFINITY, f32::max);
        if self.boxes.is_empty() { 0.0 } else { bottom - top }
    }

    /// Member ids in page order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.boxes.iter().map(|b| b.id.as_str())
    }
}

/// The page being filled.
struct PageCursor {
    /// Canvas `y` the page starts at.
    top: f32,
    rows: Vec<Row>,
}

impl PageCursor {
    fn open(first: Row) -> Self {
        Self {
            top: first.top,
            rows: vec![first],
        }
    }

    fn overflows(&self, row: &Row, max_page_height: f32) -> bool {
        row.bottom - self.top > max_page_height
    }

    /// Re-base every member to the page origin plus `page_offset`.
    fn flush(self, page_offset: Point) -> Page {
        let delta = Point::new(page_offset.x, page_offset.y - self.top);
        let boxes: Vec<PositionedBox> = self
            .rows
            .into_iter()
            .flat_map(|row| row.boxes)
            .map(|mut member| {
                member.translate(delta);
                member
            })
            .collect();

        debug!(top = self.top, boxes = boxes.len(), "page flushed");
        Page { boxes }
    }
}

/// Pack `rows` into pages no taller than `max_page_height`.
///
/// A row starts a new page when the page already holds a row and the row's
/// bottom would sit more than `max_page_height` below the page top. Boxes
/// are shifted so each page starts at `page_offset.y`, and by `page_offset.x`
/// horizontally; their children are left untouched. Box and page order
/// follow row order. No rows, no pages.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn paginate(rows: Vec<Row>, max_page_height: f32, page_offset: Point) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut cursor: Option<PageCursor> = None;

    for row in rows {
        cursor = Some(match cursor.take() {
            Some(mut page) if !page.overflows(&row, max_page_height) => {
                page.rows.push(row);
                page
            }
            Some(page) => {
                pages.push(page.flush(page_offset));
                PageCursor::open(row)
            }
            None => PageCursor::open(row),
        });
    }

    pages.extend(cursor.map(|page| page.flush(page_offset)));
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(prefix: &str, top: f32, bottom: f32, count: usize) -> Row {
        Row {
            top,
            bottom,
            boxes: (0..count)
                .map(|i| PositionedBox {
                    id: format!("{prefix}{i}"),
                    x: i as f32 * 50.0,
                    y: top,
                    width: 40.0,
                    height: bottom - top,
                    children: Vec::new(),
                })
                .collect(),
        }
    }

    fn min_y(page: &Page) -> f32 {
        page.boxes.iter().map(|b| b.y).fold(f32::INFINITY, f32::min)
    }

    #[test]
    fn test_concrete_scenario() {
        let rows = vec![
            row("a", 0.0, 40.0, 3),
            row("b", 50.0, 90.0, 2),
            row("c", 500.0, 540.0, 1),
        ];

        let pages = paginate(rows, 400.0, Point::ZERO);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].ids().collect::<Vec<_>>(), ["a0", "a1", "a2", "b0", "b1"]);
        assert_eq!(pages[0].boxes[3].y, 50.0);
        assert_eq!(pages[1].ids().collect::<Vec<_>>(), ["c0"]);
        assert_eq!(pages[1].boxes[0].y, 0.0);
        assert_eq!(pages[1].height(), 40.0);
    }

    #[test]
    fn test_no_rows_no_pages() {
        assert!(paginate(Vec::new(), 100.0, Point::ZERO).is_empty());
    }

    #[test]
    fn test_oversized_row_gets_own_page() {
        let rows = vec![
            row("a", 0.0, 30.0, 1),
            row("big", 40.0, 540.0, 2),
            row("c", 550.0, 560.0, 1),
        ];

        let pages = paginate(rows, 100.0, Point::ZERO);

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].ids().collect::<Vec<_>>(), ["big0", "big1"]);
        assert_eq!(pages[1].height(), 500.0);
    }

    #[test]
    fn test_single_oversized_row() {
        let pages = paginate(vec![row("big", 10.0, 900.0, 1)], 100.0, Point::ZERO);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].boxes[0].y, 0.0);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let rows = vec![row("a", 0.0, 50.0, 1), row("b", 60.0, 100.0, 1)];

        assert_eq!(paginate(rows, 100.0, Point::ZERO).len(), 1);
    }

    #[test]
    fn test_page_offset_applied() {
        let rows = vec![
            row("a", 100.0, 140.0, 2),
            row("b", 300.0, 340.0, 1),
        ];
        let offset = Point::new(24.0, 16.0);

        let pages = paginate(rows, 100.0, offset);

        assert_eq!(pages.len(), 2);
        for page in &pages {
            assert_eq!(min_y(page), offset.y);
        }
        assert_eq!(pages[0].boxes[1].x, 74.0);
        assert_eq!(pages[1].boxes[0].x, 24.0);
    }

    #[test]
    fn test_count_preserved() {
        let rows: Vec<Row> = (0..17)
            .map(|i| row(&format!("r{i}-"), i as f32 * 35.0, i as f32 * 35.0 + 30.0, i % 4 + 1))
            .collect();
        let total: usize = rows.iter().map(Row::len).sum();

        for max in [10.0, 64.0, 100.0, 250.0, 10_000.0] {
            let pages = paginate(rows.clone(), max, Point::ZERO);
            assert_eq!(pages.iter().map(Page::len).sum::<usize>(), total);
            assert!(pages.iter().all(|page| min_y(page) == 0.0));
        }
    }

    #[test]
    fn test_children_untouched() {
        let mut rows = vec![row("a", 200.0, 260.0, 1)];
        let child = PositionedBox {
            id: "inner".into(),
            x: 3.0,
            y: 4.0,
            width: 5.0,
            height: 6.0,
            children: Vec::new(),
        };
        rows[0].boxes[0].children.push(child.clone());

        let pages = paginate(rows, 100.0, Point::new(10.0, 10.0));

        assert_eq!(pages[0].boxes[0].y, 10.0);
        assert_eq!(pages[0].boxes[0].children[0], child);
    }
}
