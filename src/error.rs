// Network errors
// Only configuration problems are errors. Domain rejections (missing user,
// full list, duplicate name) come back as bool / Option instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    /// A capacity that must be positive was zero
    #[error("invalid capacity for {field}: {value} (must be at least 1)")]
    InvalidCapacity { field: &'static str, value: usize },

    /// Demo seeding needs more room than the network has
    #[error("demo network needs capacity {required}, got {capacity}")]
    DemoCapacity { required: usize, capacity: usize },

    /// A serialized user that breaks the followee rules
    #[error("invalid user {name:?}: {reason}")]
    InvalidUser { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
