//! Full recompute: classify -> levels -> positions -> connections.

use crate::config::{LayoutConfig, ViewportClass};
use crate::model::{Book, Canvas, Connection, PositionedNode, Size};
use crate::{Result, position, rank, route};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    pub viewport: ViewportClass,
    pub canvas: Canvas,
    /// Scrollable extent: the canvas, grown to contain every node plus its padding.
    pub content_size: Size,
    pub nodes: Vec<PositionedNode>,
    pub connections: Vec<Connection>,
}

impl Roadmap {
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn overflows(&self) -> bool {
        self.content_size.width > self.canvas.width || self.content_size.height > self.canvas.height
    }
}

pub fn layout_roadmap(books: &[Book], canvas: Canvas) -> Result<Roadmap> {
    layout_roadmap_with_config(books, canvas, &LayoutConfig::default(), None)
}

/// Lays out `books` on `canvas`. `viewport` overrides the width-based classification.
pub fn layout_roadmap_with_config(
    books: &[Book],
    canvas: Canvas,
    config: &LayoutConfig,
    viewport: Option<ViewportClass>,
) -> Result<Roadmap> {
    let viewport = viewport.unwrap_or_else(|| config.classify(canvas));
    let levels = rank::assign_levels(books)?;
    let nodes = position::layout_with_config(books, &levels, canvas, viewport, config)?;
    let connections = route::connections(books, &nodes)?;

    let profile = config.profile(viewport);
    let mut content_size = canvas;
    for node in &nodes {
        let b = node.bounds();
        content_size.width = content_size.width.max(b.max_x + profile.padding_side);
        content_size.height = content_size.height.max(b.max_y + profile.padding_bottom);
    }

    Ok(Roadmap {
        viewport,
        canvas,
        content_size,
        nodes,
        connections,
    })
}
