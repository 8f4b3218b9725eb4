//! End-to-end tests: box tree → taffy → positioned tree → slides.
//!
//! Run with: cargo test --test slides_pipeline

use canvas_slides::{
    group_rows, layout, paginate, paginate_children, ContentBox, PaginationConfig, Point,
    PositionedBox, Size, TaffyOracle, DEFAULT_ROW_EPSILON,
};

// =============================================================================
// FIXTURES
// =============================================================================

const CANVAS: Size = Size::new(1280.0, 720.0);

/// 7 cards of 120x100 in a 400px wrap row with 10px gaps: 3 + 3 + 1.
fn card_deck() -> ContentBox {
    ContentBox::variable("deck", "display: flex; flex-wrap: wrap; width: 400px; gap: 10px")
        .with_children((0..7).map(|i| ContentBox::fixed(format!("card{i}"), 120.0, 100.0, "")))
}

/// Deterministic tree with mixed depth, fan-out and wrappers.
fn generated_tree(seed: usize, depth: usize) -> ContentBox {
    let id = format!("n{seed}-{depth}");
    let mut node = if seed % 3 == 0 {
        ContentBox::fixed(id, 20.0 + (seed % 5) as f32 * 7.0, 10.0 + (seed % 4) as f32 * 3.0, "")
    } else {
        ContentBox::variable(id, "display: flex; flex-wrap: wrap; padding: 2px")
    };
    if seed % 4 == 1 {
        node = node.with_child_group("display: flex; flex-direction: column; gap: 3px");
    }
    if depth > 0 {
        let fan_out = seed % 4;
        node = node.with_children(
            (0..fan_out).map(|i| generated_tree(seed * 7 + i + 1, depth - 1)),
        );
    }
    node
}

fn ids(boxes: &[PositionedBox]) -> Vec<&str> {
    boxes.iter().map(|b| b.id.as_str()).collect()
}

// =============================================================================
// LAYOUT
// =============================================================================

#[test]
fn test_deck_positions() {
    let mut oracle = TaffyOracle::new();
    let computed = layout(&mut oracle, &card_deck(), CANVAS).unwrap().unwrap();
    let deck = &computed.root;

    assert_eq!((deck.x, deck.y, deck.width), (0.0, 0.0, 400.0));
    assert_eq!(deck.height, 320.0);

    let positions: Vec<(f32, f32)> = deck.children.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(
        positions,
        [
            (0.0, 0.0),
            (130.0, 0.0),
            (260.0, 0.0),
            (0.0, 110.0),
            (130.0, 110.0),
            (260.0, 110.0),
            (0.0, 220.0),
        ]
    );
}

#[test]
fn test_isomorphism_over_generated_trees() {
    let mut oracle = TaffyOracle::new();
    for seed in 1..40 {
        let root = generated_tree(seed, 3);
        let computed = layout(&mut oracle, &root, CANVAS).unwrap().unwrap();

        assert!(computed.root.mirrors(&root), "seed {seed}");
        assert_eq!(computed.root.node_count(), root.node_count(), "seed {seed}");
    }
}

#[test]
fn test_degenerate_container_is_empty() {
    let mut oracle = TaffyOracle::new();
    for seed in 1..10 {
        let root = generated_tree(seed, 2);
        assert!(layout(&mut oracle, &root, Size::new(0.0, 720.0)).unwrap().is_none());
        assert!(layout(&mut oracle, &root, Size::new(1280.0, -3.0)).unwrap().is_none());
    }
}

#[test]
fn test_child_group_hidden_from_tree() {
    let form = ContentBox::variable("form", "display: flex; flex-direction: column; padding: 16px")
        .with_child(ContentBox::fixed("title", 200.0, 30.0, ""))
        .with_child(
            ContentBox::variable("fields", "display: flex; flex-direction: column")
                .with_child_group("display: flex; flex-direction: column; gap: 6px; padding: 8px")
                .with_children((0..3).map(|i| ContentBox::fixed(format!("field{i}"), 150.0, 20.0, ""))),
        );

    let mut oracle = TaffyOracle::new();
    let computed = layout(&mut oracle, &form, CANVAS).unwrap().unwrap();

    let fields = computed.root.find("fields").unwrap();
    assert_eq!((fields.x, fields.y), (16.0, 46.0));
    assert_eq!(ids(&fields.children), ["field0", "field1", "field2"]);

    // wrapper padding (8, 8) plus 26px per stacked field
    let ys: Vec<f32> = fields.children.iter().map(|f| f.y).collect();
    assert_eq!(ys, [8.0, 34.0, 60.0]);
    assert!(fields.children.iter().all(|f| f.x == 8.0));

    assert_eq!(computed.wrapper_offset("fields"), Some(Point::ZERO));
    assert_eq!(computed.wrapper_offset("form"), None);
}

#[test]
fn test_json_round_trip_shape() {
    let json = r#"{
        "id": "slide",
        "dimensionConstraint": "variable",
        "styleDescriptor": "display: flex; gap: 4px",
        "children": [
            { "id": "a", "dimensionConstraint": "fixed", "width": 50, "height": 20, "styleDescriptor": "" },
            { "id": "b", "dimensionConstraint": "fixed", "width": 30, "height": 20, "styleDescriptor": "" }
        ]
    }"#;
    let root: ContentBox = serde_json::from_str(json).unwrap();

    let mut oracle = TaffyOracle::new();
    let computed = layout(&mut oracle, &root, CANVAS).unwrap().unwrap();
    let value = serde_json::to_value(&computed.root).unwrap();

    assert_eq!(value["children"][1]["id"], "b");
    assert_eq!(value["children"][1]["x"], 54.0);
    assert!(value["children"][0].get("children").is_none());
}

// =============================================================================
// PAGINATION
// =============================================================================

#[test]
fn test_deck_into_slides() {
    let mut oracle = TaffyOracle::new();
    let computed = layout(&mut oracle, &card_deck(), CANVAS).unwrap().unwrap();

    let config = PaginationConfig::new(250.0).with_page_offset(Point::new(40.0, 96.0));
    let pages = paginate_children(&computed.root, &config);

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 6);
    assert_eq!(pages[1].ids().collect::<Vec<_>>(), ["card6"]);

    assert_eq!((pages[0].boxes[4].x, pages[0].boxes[4].y), (170.0, 206.0));
    assert_eq!((pages[1].boxes[0].x, pages[1].boxes[0].y), (40.0, 96.0));
}

#[test]
fn test_counts_preserved_for_any_height() {
    let mut oracle = TaffyOracle::new();
    let computed = layout(&mut oracle, &card_deck(), CANVAS).unwrap().unwrap();
    let children = computed.root.children;

    for max in [1.0, 99.0, 100.0, 210.0, 320.0, 5000.0] {
        let rows = group_rows(children.clone(), DEFAULT_ROW_EPSILON);
        assert_eq!(rows.len(), 3);

        let pages = paginate(rows, max, Point::ZERO);
        let total: usize = pages.iter().map(|p| p.len()).sum();
        assert_eq!(total, 7, "max {max}");

        let flattened: Vec<&str> = pages.iter().flat_map(|p| p.ids()).collect();
        assert_eq!(flattened, ids(&children), "max {max}");

        for page in &pages {
            let top = page.boxes.iter().map(|b| b.y).fold(f32::INFINITY, f32::min);
            assert_eq!(top, 0.0);
        }
    }
}
