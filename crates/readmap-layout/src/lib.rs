#![forbid(unsafe_code)]

//! Prerequisite-graph layout for reading roadmaps.
//!
//! A roadmap is a list of [`Book`]s whose `prerequisites` reference other books by external
//! key. The engine turns that list into a layered drawing:
//!
//! - [`assign_levels`] gives each book its longest-prerequisite-chain depth (1-based).
//! - [`layout`] sizes nodes for the viewport class and centers every level on the canvas.
//! - [`route`] and [`connections`] produce the curves between prerequisite and dependent.
//! - [`delete_book`] removes a book and every dependent it leaves without prerequisites.
//!
//! Every function is pure: callers own the book list and re-run the pipeline after each
//! resize or mutation. [`layout_roadmap`] runs all steps at once.

pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod mutation;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod route;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{Breakpoints, LayoutConfig, Range, ViewportClass, ViewportProfile, classify};
pub use error::{Error, Result};
pub use index::BookIndex;
pub use model::{
    Book, Bounds, Canvas, Connection, CubicPath, ExternalKey, Point, PositionedNode,
    RoadmapDocument, Size,
};
pub use mutation::{Deletion, delete_book, delete_book_tracked};
pub use pipeline::{Roadmap, layout_roadmap, layout_roadmap_with_config};
pub use position::{layout, layout_with_config};
pub use rank::{LevelMap, assign_levels};
pub use route::{connections, route, route_between};
