// ⚙️ Network Configuration
// Capacities and the self-follow policy, loadable from JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NetworkError, Result};

/// Default number of users a network holds
pub const DEFAULT_MAX_USER_COUNT: usize = 10;

/// Default number of names a user can follow
pub const DEFAULT_MAX_FOLLOWEE_COUNT: usize = 10;

// ============================================================================
// SELF-FOLLOW POLICY
// ============================================================================

/// What the network does when a user tries to follow themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfFollowPolicy {
    /// Refuse the edge at the network layer
    #[default]
    Reject,

    /// Pass the edge through to the user's followee list
    Allow,
}

impl SelfFollowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelfFollowPolicy::Reject => "reject",
            SelfFollowPolicy::Allow => "allow",
        }
    }
}

// ============================================================================
// NETWORK CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_max_user_count")]
    pub max_user_count: usize,
    #[serde(default = "default_max_followee_count")]
    pub max_followee_count: usize,
    #[serde(default)]
    pub self_follow: SelfFollowPolicy,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_user_count: default_max_user_count(),
            max_followee_count: default_max_followee_count(),
            self_follow: SelfFollowPolicy::default(),
        }
    }
}

fn default_max_user_count() -> usize {
    DEFAULT_MAX_USER_COUNT
}

fn default_max_followee_count() -> usize {
    DEFAULT_MAX_FOLLOWEE_COUNT
}

impl NetworkConfig {
    /// Default followee capacity with the given user capacity
    pub fn with_max_users(max_user_count: usize) -> Self {
        Self {
            max_user_count,
            ..Self::default()
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Both capacities must be positive
    pub fn validate(&self) -> Result<()> {
        if self.max_user_count == 0 {
            return Err(NetworkError::InvalidCapacity {
                field: "max_user_count",
                value: self.max_user_count,
            });
        }
        if self.max_followee_count == 0 {
            return Err(NetworkError::InvalidCapacity {
                field: "max_followee_count",
                value: self.max_followee_count,
            });
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
