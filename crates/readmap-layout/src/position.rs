//! Spatial layout: node size, gaps and centers per level.
//!
//! Every node in one layout shares a single size. The size is chosen so that the widest level
//! and the full level stack fit the drawable area, then scaled for the screen and clamped to
//! the viewport class's bounds. Gaps shrink toward their floors when content would overflow;
//! node sizes never shrink below the class minimum, so overflowing content is returned as-is
//! for the caller to scroll.

use crate::config::{LayoutConfig, ViewportClass, ViewportProfile};
use crate::index::BookIndex;
use crate::model::{Book, Canvas, Point, PositionedNode, Size};
use crate::rank::LevelMap;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Sizing decisions shared by every node of one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub node: Size,
    pub drawable: Size,
    pub screen_scale: f64,
    pub vertical_gap: f64,
    pub top_offset: f64,
}

pub fn layout(
    books: &[Book],
    levels: &LevelMap,
    canvas: Canvas,
    viewport: ViewportClass,
) -> Result<Vec<PositionedNode>> {
    layout_with_config(books, levels, canvas, viewport, &LayoutConfig::default())
}

pub fn layout_with_config(
    books: &[Book],
    levels: &LevelMap,
    canvas: Canvas,
    viewport: ViewportClass,
    config: &LayoutConfig,
) -> Result<Vec<PositionedNode>> {
    if !canvas.is_drawable() {
        return Err(Error::DegenerateCanvas {
            width: canvas.width,
            height: canvas.height,
        });
    }
    config.validate()?;
    let index = BookIndex::new(books)?;

    let mut level_of: Vec<usize> = Vec::with_capacity(books.len());
    for book in books {
        let level = levels
            .get(&book.id)
            .filter(|l| *l >= 1)
            .ok_or_else(|| Error::MissingLevel {
                id: book.id.clone(),
            })?;
        level_of.push(level);
    }
    if books.is_empty() {
        return Ok(Vec::new());
    }

    // Stable within a level: collection order.
    let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (ix, level) in level_of.iter().enumerate() {
        rows.entry(*level).or_default().push(ix);
    }

    let profile = config.profile(viewport);
    let widest = rows.values().map(Vec::len).max().unwrap_or(1);
    let level_count = level_of.iter().copied().max().unwrap_or(1);
    let metrics = compute_metrics(
        profile,
        canvas,
        config.screen_scale(canvas, viewport),
        widest,
        level_count,
    );
    tracing::debug!(
        ?viewport,
        books = books.len(),
        levels = level_count,
        widest,
        node_width = metrics.node.width,
        node_height = metrics.node.height,
        vertical_gap = metrics.vertical_gap,
        "computed roadmap metrics"
    );

    let mut centers: Vec<Point> = vec![Point::default(); books.len()];
    for (level, row) in &rows {
        let y = metrics.top_offset
            + (*level as f64 - 1.0) * (metrics.node.height + metrics.vertical_gap)
            + metrics.node.height / 2.0;
        let gap = horizontal_gap(profile, metrics.node.width, metrics.drawable.width, row.len());
        let row_width = row_extent(row.len(), metrics.node.width, gap);
        let start_x = profile.padding_side + ((metrics.drawable.width - row_width) / 2.0).max(0.0);
        for (slot, ix) in row.iter().enumerate() {
            let x = start_x + slot as f64 * (metrics.node.width + gap) + metrics.node.width / 2.0;
            centers[*ix] = Point::new(x, y);
        }
    }

    let dependents = index.dependents();
    Ok(books
        .iter()
        .enumerate()
        .map(|(ix, book)| PositionedNode {
            id: book.id.clone(),
            level: level_of[ix],
            center: centers[ix],
            size: metrics.node,
            parent_id: index
                .prerequisites_of(ix)
                .next()
                .map(|p| books[p].id.clone()),
            child_ids: dependents[ix].iter().map(|d| books[*d].id.clone()).collect(),
        })
        .collect())
}

/// Node size, vertical gap and top offset for a layout with `widest` nodes in its fullest
/// level and `level_count` levels.
pub fn compute_metrics(
    profile: &ViewportProfile,
    canvas: Canvas,
    screen_scale: f64,
    widest: usize,
    level_count: usize,
) -> Metrics {
    let widest = widest.max(1) as f64;
    let levels = level_count.max(1) as f64;
    let drawable = profile.drawable(canvas);

    let fit_width = (drawable.width - (widest - 1.0) * profile.sizing_allowance_x) / widest;
    let fit_height = (drawable.height - (levels - 1.0) * profile.sizing_allowance_y) / levels;
    let base = Size::new(
        profile.node_width.clamp(fit_width),
        profile.node_height.clamp(fit_height),
    );
    let node = Size::new(
        profile.node_width.clamp(base.width * screen_scale),
        profile.node_height.clamp(base.height * screen_scale),
    );

    let mut vertical_gap = profile.gap_base_y.max(node.height * profile.gap_ratio_y);
    if levels > 1.0 {
        let nodes_height = levels * node.height;
        if nodes_height + (levels - 1.0) * vertical_gap > drawable.height {
            vertical_gap = profile
                .gap_floor_y
                .max((drawable.height - nodes_height) / (levels - 1.0));
        }
    }

    let content_height = row_extent(level_count.max(1), node.height, vertical_gap);
    let top_offset =
        profile.padding_top + profile.min_top_bias.max((drawable.height - content_height) / 2.0);

    Metrics {
        node,
        drawable,
        screen_scale,
        vertical_gap,
        top_offset,
    }
}

/// Gap between neighbours in a level of `count` nodes, compacted toward the floor when the
/// level would overflow `available` width.
pub fn horizontal_gap(profile: &ViewportProfile, node_width: f64, available: f64, count: usize) -> f64 {
    let gap = profile.gap_base_x.max(node_width * profile.gap_ratio_x);
    if count < 2 {
        return gap;
    }
    let n = count as f64;
    let nodes_width = n * node_width;
    if nodes_width + (n - 1.0) * gap <= available {
        return gap;
    }
    let compacted = profile.gap_floor_x.max((available - nodes_width) / (n - 1.0));
    if nodes_width + (n - 1.0) * compacted > available {
        tracing::debug!(
            count,
            node_width,
            available,
            gap = compacted,
            "level overflows the canvas at the gap floor"
        );
    }
    compacted
}

fn row_extent(count: usize, item: f64, gap: f64) -> f64 {
    let n = count as f64;
    n * item + (n - 1.0).max(0.0) * gap
}
