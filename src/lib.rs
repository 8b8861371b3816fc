// Social Network - Core Library
// Exposes the entity models for the demo driver and tests

pub mod config;
pub mod entities;
pub mod error;

// Re-export commonly used types
pub use config::{NetworkConfig, SelfFollowPolicy, DEFAULT_MAX_FOLLOWEE_COUNT, DEFAULT_MAX_USER_COUNT};
pub use entities::{Network, Recommendation, User};
pub use error::{NetworkError, Result};
