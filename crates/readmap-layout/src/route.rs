//! Connection derivation and curve routing.

use crate::index::BookIndex;
use crate::model::{Book, Connection, CubicPath, Point, PositionedNode};
use crate::Result;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

/// Horizontal pull of each control point toward the other endpoint, as a share of `dx`.
const CONTROL_X_SHARE: f64 = 0.1;
/// Vertical reach of each control point away from its endpoint, as a share of `dy`.
const CONTROL_Y_SHARE: f64 = 0.4;

/// Curve from `source`'s bottom-center anchor to `target`'s top-center anchor.
///
/// Both control points stay close to their endpoint horizontally and travel 40% of the
/// vertical distance, so the curve leaves and enters nodes nearly vertically.
pub fn route(source: &PositionedNode, target: &PositionedNode) -> CubicPath {
    route_between(source.bottom_anchor(), target.top_anchor())
}

pub fn route_between(start: Point, end: Point) -> CubicPath {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    CubicPath {
        start,
        control1: Point::new(start.x + dx * CONTROL_X_SHARE, start.y + dy * CONTROL_Y_SHARE),
        control2: Point::new(end.x - dx * CONTROL_X_SHARE, end.y - dy * CONTROL_Y_SHARE),
        end,
    }
}

/// One connection per resolved (prerequisite -> dependent) pair, in collection order.
///
/// Dangling prerequisite keys produce no connection. A key repeated in one prerequisite list
/// yields a single connection.
pub fn connections(books: &[Book], nodes: &[PositionedNode]) -> Result<Vec<Connection>> {
    let index = BookIndex::new(books)?;
    let by_id: HashMap<&str, &PositionedNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut seen: HashSet<(usize, usize)> = HashSet::default();
    let mut out: Vec<Connection> = Vec::new();
    for (dep_ix, book) in books.iter().enumerate() {
        for pre_ix in index.prerequisites_of(dep_ix) {
            if !seen.insert((pre_ix, dep_ix)) {
                continue;
            }
            let source = &books[pre_ix].id;
            let (Some(source_node), Some(target_node)) =
                (by_id.get(source.as_str()), by_id.get(book.id.as_str()))
            else {
                tracing::debug!(
                    prerequisite = %source,
                    dependent = %book.id,
                    "skipping connection to unplaced node"
                );
                continue;
            };
            out.push(Connection {
                id: Connection::make_id(source, &book.id),
                source: source.clone(),
                target: book.id.clone(),
                path: route(source_node, target_node),
            });
        }
    }
    Ok(out)
}
