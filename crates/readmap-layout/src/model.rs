//! Roadmap data types and geometry primitives.
//!
//! `Book` is the caller-owned input; everything else here is derived data that the engine
//! recomputes from scratch on every call.

use serde::{Deserialize, Serialize};

/// Secondary book identifier (an ISBN-13 in the bundled datasets) used by prerequisite lists.
pub type ExternalKey = u64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "isbn13", alias = "externalKey")]
    pub external_key: ExternalKey,
    #[serde(default)]
    pub prerequisites: Vec<ExternalKey>,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub categories: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<u32>,
}

impl Book {
    pub fn new(id: impl Into<String>, external_key: ExternalKey) -> Self {
        Self {
            id: id.into(),
            external_key,
            ..Default::default()
        }
    }

    pub fn with_prerequisites(mut self, prerequisites: impl IntoIterator<Item = ExternalKey>) -> Self {
        self.prerequisites = prerequisites.into_iter().collect();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// First entry of the comma-separated category list, as shown on a node badge.
    pub fn primary_category(&self) -> Option<&str> {
        self.categories
            .split(',')
            .map(str::trim)
            .find(|c| !c.is_empty())
    }
}

/// A roadmap as supplied by the search step: either a bare book list or a titled document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RoadmapDocument {
    Books(Vec<Book>),
    Titled {
        #[serde(default)]
        query: Option<String>,
        #[serde(default, rename = "roadmapTitle")]
        roadmap_title: Option<String>,
        books: Vec<Book>,
    },
}

impl RoadmapDocument {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Books(_) => None,
            Self::Titled { roadmap_title, .. } => roadmap_title.as_deref(),
        }
    }

    pub fn books(&self) -> &[Book] {
        match self {
            Self::Books(books) | Self::Titled { books, .. } => books,
        }
    }

    pub fn into_books(self) -> Vec<Book> {
        match self {
            Self::Books(books) | Self::Titled { books, .. } => books,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Drawable surface supplied by the host UI, in pixels.
pub type Canvas = Size;

impl Size {
    /// Roadmap container size for a given browser window.
    ///
    /// Wide windows get a container of at least 1400x1000, but never more than 95% of the
    /// window width or 98% of its height.
    pub fn from_screen(screen: Size) -> Canvas {
        let width = (screen.width - 60.0).max(1400.0).min(screen.width * 0.95);
        let height = (screen.height - 100.0).max(1000.0).min(screen.height * 0.98);
        Size::new(width, height)
    }

    pub(crate) fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            min_x: center.x - size.width / 2.0,
            min_y: center.y - size.height / 2.0,
            max_x: center.x + size.width / 2.0,
            max_y: center.y + size.height / 2.0,
        }
    }

    /// Strict overlap test; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub level: usize,
    pub center: Point,
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
}

impl PositionedNode {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center, self.size)
    }

    /// Bottom-center anchor, where outgoing connections start.
    pub fn bottom_anchor(&self) -> Point {
        Point::new(self.center.x, self.center.y + self.size.height / 2.0)
    }

    /// Top-center anchor, where incoming connections end.
    pub fn top_anchor(&self) -> Point {
        Point::new(self.center.x, self.center.y - self.size.height / 2.0)
    }
}

/// Cubic Bézier segment describing a connection curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicPath {
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.start.x + b1 * self.control1.x + b2 * self.control2.x + b3 * self.end.x,
            b0 * self.start.y + b1 * self.control1.y + b2 * self.control2.y + b3 * self.end.y,
        )
    }

    /// SVG path data (`M x y C c1x c1y, c2x c2y, x y`).
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            fmt_num(self.start.x),
            fmt_num(self.start.y),
            fmt_num(self.control1.x),
            fmt_num(self.control1.y),
            fmt_num(self.control2.x),
            fmt_num(self.control2.y),
            fmt_num(self.end.x),
            fmt_num(self.end.y),
        )
    }
}

fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    pub path: CubicPath,
}

impl Connection {
    pub fn make_id(source: &str, target: &str) -> String {
        format!("{source}->{target}")
    }

    /// Whether the connection should be drawn emphasized.
    ///
    /// A connection is highlighted when it is hovered itself, or when the hovered or selected
    /// book is the dependent it points to.
    pub fn is_highlighted(&self, hovered_connection: Option<&str>, focused_book: Option<&str>) -> bool {
        hovered_connection.is_some_and(|id| id == self.id)
            || focused_book.is_some_and(|id| id == self.target)
    }
}
