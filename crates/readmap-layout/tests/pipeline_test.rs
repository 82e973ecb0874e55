use readmap_layout::{
    Canvas, LayoutConfig, RoadmapDocument, Size, ViewportClass, delete_book_tracked,
    layout_roadmap, layout_roadmap_with_config,
};
use std::path::PathBuf;

fn fixture(name: &str) -> RoadmapDocument {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/roadmaps")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    RoadmapDocument::from_json(&text).unwrap()
}

#[test]
fn titled_fixture_lays_out_end_to_end() {
    let doc = fixture("software-craft.json");
    assert_eq!(doc.title(), Some("Software Craftsmanship: A Reading Roadmap"));
    let books = doc.books();
    assert_eq!(books.len(), 10);

    let roadmap = layout_roadmap(books, Size::new(1400.0, 1000.0)).unwrap();
    assert_eq!(roadmap.viewport, ViewportClass::Full);
    assert_eq!(roadmap.nodes.len(), 10);
    assert_eq!(roadmap.node("staff-engineer").unwrap().level, 1);
    assert_eq!(roadmap.node("tdd").unwrap().level, 2);
    assert_eq!(roadmap.node("continuous-delivery").unwrap().level, 3);
    assert_eq!(roadmap.connections.len(), 7);
    assert!(roadmap.connection("tdd->continuous-delivery").is_some());
    assert!(!roadmap.overflows());
    assert_eq!(roadmap.content_size, roadmap.canvas);
}

#[test]
fn bare_array_fixture_ignores_unknown_fields() {
    let doc = fixture("business-fundamentals.json");
    assert_eq!(doc.title(), None);
    let books = doc.into_books();
    assert_eq!(books[0].primary_category(), Some("Business"));

    let roadmap = layout_roadmap(&books, Size::new(1024.0, 768.0)).unwrap();
    assert_eq!(roadmap.viewport, ViewportClass::Medium);
    assert_eq!(roadmap.node("competitive-strategy").unwrap().level, 3);
}

#[test]
fn delete_then_relayout() {
    let books = fixture("software-craft.json").into_books();
    let deletion = delete_book_tracked(&books, "clean-code");
    assert_eq!(
        deletion.removed,
        [
            "clean-code",
            "clean-architecture",
            "refactoring",
            "domain-driven-design"
        ]
    );

    let roadmap = layout_roadmap(&deletion.books, Size::new(1400.0, 1000.0)).unwrap();
    assert_eq!(roadmap.nodes.len(), 6);
    assert_eq!(roadmap.node("continuous-delivery").unwrap().level, 3);
    assert_eq!(roadmap.connections.len(), 3);
}

#[test]
fn narrow_canvas_reports_scrollable_overflow() {
    let books = fixture("software-craft.json").into_books();
    let canvas = Size::new(360.0, 640.0);
    let roadmap = layout_roadmap(&books, canvas).unwrap();
    assert_eq!(roadmap.viewport, ViewportClass::Compact);
    assert!(roadmap.overflows());
    assert!(roadmap.content_size.width > canvas.width);
    for node in &roadmap.nodes {
        assert!(node.bounds().min_x >= 0.0, "{} starts off-canvas", node.id);
    }
}

#[test]
fn viewport_override_wins_over_classification() {
    let books = fixture("business-fundamentals.json").into_books();
    let roadmap = layout_roadmap_with_config(
        &books,
        Size::new(1600.0, 1000.0),
        &LayoutConfig::default(),
        Some(ViewportClass::Compact),
    )
    .unwrap();
    assert_eq!(roadmap.viewport, ViewportClass::Compact);
    assert!(roadmap.nodes.iter().all(|n| n.size.width <= 200.0));
}

#[test]
fn container_size_tracks_the_window() {
    assert_eq!(
        Canvas::from_screen(Size::new(1920.0, 1080.0)),
        Size::new(1824.0, 1000.0)
    );
    let small = Canvas::from_screen(Size::new(1280.0, 720.0));
    assert_eq!(small.width, 1216.0);
    assert!((small.height - 705.6).abs() < 1e-9);
}
