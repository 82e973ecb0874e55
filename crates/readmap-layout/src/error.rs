use crate::model::ExternalKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("book at position {index} has no id")]
    MissingId { index: usize },

    #[error("duplicate book id: {id}")]
    DuplicateId { id: String },

    #[error("duplicate external key {key} (books {first} and {second})")]
    DuplicateExternalKey {
        key: ExternalKey,
        first: String,
        second: String,
    },

    #[error("prerequisite cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("no level assigned for book: {id}")]
    MissingLevel { id: String },

    #[error("degenerate canvas {width}x{height}: both dimensions must be finite and positive")]
    DegenerateCanvas { width: f64, height: f64 },

    #[error("invalid layout config: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
