//! Slides Example - wrap-row cards paginated into slides
//!
//! This example demonstrates:
//! - Building a box tree of cards with nested field lists
//! - Laying it out on the canvas with the taffy oracle
//! - Cutting the card rows into 720px slides below a title bar
//!
//! Run with: cargo run --example slides [pagination.json]
//! Set RUST_LOG=canvas_slides=trace to watch staging and row decisions.

use std::error::Error;

use canvas_slides::{
    layout, paginate_children, ContentBox, PaginationConfig, Point, Size, TaffyOracle,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn card(index: usize, fields: usize) -> ContentBox {
    ContentBox::variable(
        format!("card{index}"),
        "display: flex; flex-direction: column; width: 280px; padding: 12px",
    )
    .with_child(ContentBox::fixed(format!("card{index}-title"), 256.0, 28.0, ""))
    .with_child(
        ContentBox::variable(format!("card{index}-fields"), "display: flex; flex-direction: column")
            .with_child_group("display: flex; flex-direction: column; gap: 6px; padding-top: 8px")
            .with_children(
                (0..fields).map(|f| ContentBox::fixed(format!("card{index}-field{f}"), 256.0, 22.0, "")),
            ),
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("canvas_slides=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PaginationConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => PaginationConfig::new(720.0 - 96.0).with_page_offset(Point::new(40.0, 96.0)),
    };

    println!("=== canvas-slides Example ===\n");

    let gallery = ContentBox::variable(
        "gallery",
        "display: flex; flex-wrap: wrap; width: 1200px; gap: 24px",
    )
    .with_children((0..14).map(|i| card(i, 2 + i % 5)));

    let mut oracle = TaffyOracle::new();
    let Some(computed) = layout(&mut oracle, &gallery, Size::new(1280.0, 720.0))? else {
        println!("Container is degenerate, nothing to lay out.");
        return Ok(());
    };

    println!(
        "Canvas: gallery {}x{} with {} nodes",
        computed.root.width,
        computed.root.height,
        computed.root.node_count()
    );

    let pages = paginate_children(&computed.root, &config);
    for (number, page) in pages.iter().enumerate() {
        println!("\nSlide {} ({} cards, {}px tall)", number + 1, page.len(), page.height());
        for card in &page.boxes {
            println!(
                "  {:<8} at ({:>6.1}, {:>6.1})  {}x{}",
                card.id, card.x, card.y, card.width, card.height
            );
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&pages)?);
    Ok(())
}
