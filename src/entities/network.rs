// 🌐 Network - bounded registry of users + aggregate queries
//
// The network owns every User. Follow edges live inside each User as names,
// so queries walk the user list and resolve names through `get_user`.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use super::user::{names_match, User};
use crate::config::{NetworkConfig, SelfFollowPolicy};
use crate::error::{NetworkError, Result};

/// Names seeded by `Network::with_demo_users`
const DEMO_USERS: [&str; 3] = ["Foo", "Bar", "Baz"];

// ============================================================================
// RECOMMENDATION
// ============================================================================

/// Outcome of `Network::recommend_who_to_follow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    /// The user sharing the most followees with the subject
    Recommended(String),

    /// The subject is not in the network
    UserNotFound,

    /// The subject is the only user
    NoCandidates,
}

impl Recommendation {
    pub fn name(&self) -> Option<&str> {
        match self {
            Recommendation::Recommended(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Name or legacy sentinel text
    pub fn message(&self) -> &str {
        match self {
            Recommendation::Recommended(name) => name.as_str(),
            Recommendation::UserNotFound => "User not found",
            Recommendation::NoCandidates => "No recommendation",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// NETWORK
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Network {
    config: NetworkConfig,

    /// Insertion order, case-insensitively unique names
    users: Vec<User>,
}

impl Network {
    /// Create an empty network holding at most `max_user_count` users
    pub fn new(max_user_count: usize) -> Result<Self> {
        Self::with_config(NetworkConfig::with_max_users(max_user_count))
    }

    pub fn with_config(config: NetworkConfig) -> Result<Self> {
        config.validate()?;
        info!(
            max_users = config.max_user_count,
            max_followees = config.max_followee_count,
            self_follow = config.self_follow.as_str(),
            "created network"
        );
        Ok(Network {
            users: Vec::with_capacity(config.max_user_count),
            config,
        })
    }

    /// Create a network with Foo, Bar and Baz already registered
    pub fn with_demo_users(max_user_count: usize) -> Result<Self> {
        if max_user_count < DEMO_USERS.len() {
            return Err(NetworkError::DemoCapacity {
                required: DEMO_USERS.len(),
                capacity: max_user_count,
            });
        }

        let mut network = Self::new(max_user_count)?;
        for name in DEMO_USERS {
            let added = network.add_user(name);
            debug_assert!(added, "demo user {} rejected", name);
        }
        Ok(network)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.max_user_count
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn is_full(&self) -> bool {
        self.users.len() >= self.config.max_user_count
    }

    /// All users in the order they joined
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.users.iter().position(|u| names_match(u.name(), name))
    }

    /// Case-insensitive lookup
    pub fn get_user(&self, name: &str) -> Option<&User> {
        self.position(name).map(|index| &self.users[index])
    }

    /// Register a new user with an empty followee list
    pub fn add_user(&mut self, name: &str) -> bool {
        if name.is_empty() {
            debug!("can't add a user with an empty name");
            return false;
        }
        if self.get_user(name).is_some() {
            debug!(user = name, "user already exists");
            return false;
        }
        if self.is_full() {
            debug!(user = name, capacity = self.capacity(), "network is full");
            return false;
        }

        self.users.push(User::with_capacity(
            name.to_string(),
            self.config.max_followee_count,
        ));
        debug!(user = name, "added user");
        true
    }

    /// Make `follower` follow `followee`
    ///
    /// Both names must resolve. The followee is stored under its canonical
    /// spelling, not the spelling the caller passed.
    pub fn add_followee(&mut self, follower: &str, followee: &str) -> bool {
        let (Some(from), Some(to)) = (self.position(follower), self.position(followee)) else {
            debug!(follower, followee, "unknown user in follow request");
            return false;
        };

        if from == to && self.config.self_follow == SelfFollowPolicy::Reject {
            debug!(user = follower, "self-follow rejected");
            return false;
        }

        let canonical = self.users[to].name().to_string();
        self.users[from].add_followee(&canonical)
    }

    /// Make `follower` stop following `followee`
    pub fn remove_followee(&mut self, follower: &str, followee: &str) -> bool {
        match self.position(follower) {
            Some(index) => self.users[index].remove_followee(followee),
            None => {
                debug!(follower, "unknown user in unfollow request");
                false
            }
        }
    }

    /// Suggest the user with the most followees in common with `name`
    ///
    /// Ties go to whoever joined first.
    pub fn recommend_who_to_follow(&self, name: &str) -> Recommendation {
        let Some(subject_index) = self.position(name) else {
            return Recommendation::UserNotFound;
        };
        let subject = &self.users[subject_index];

        let mut best: Option<(&User, usize)> = None;
        for (index, candidate) in self.users.iter().enumerate() {
            if index == subject_index {
                continue;
            }
            let mutual = candidate.count_mutual(subject);
            if best.map_or(true, |(_, max)| mutual > max) {
                best = Some((candidate, mutual));
            }
        }

        match best {
            Some((user, _)) => Recommendation::Recommended(user.name().to_string()),
            None => Recommendation::NoCandidates,
        }
    }

    /// Number of other users whose followee list contains `name`
    pub fn follower_count(&self, name: &str) -> usize {
        self.users
            .iter()
            .filter(|u| !names_match(u.name(), name))
            .filter(|u| u.follows(name))
            .count()
    }

    /// The user followed by the most others; ties go to whoever joined first
    pub fn most_popular_user(&self) -> Option<&str> {
        let mut best: Option<(&User, usize)> = None;
        for user in &self.users {
            let followers = self.follower_count(user.name());
            if best.map_or(true, |(_, max)| followers > max) {
                best = Some((user, followers));
            }
        }
        best.map(|(user, _)| user.name())
    }

    /// Most popular name or legacy sentinel text
    pub fn most_popular_or_sentinel(&self) -> &str {
        self.most_popular_user().unwrap_or("No users available")
    }

    /// Users who follow `name` and are followed back
    pub fn friends_of(&self, name: &str) -> Vec<&str> {
        let Some(subject_index) = self.position(name) else {
            return Vec::new();
        };
        let subject = &self.users[subject_index];

        self.users
            .iter()
            .enumerate()
            .filter(|(index, u)| *index != subject_index && u.is_friend_of(subject))
            .map(|(_, u)| u.name())
            .collect()
    }

    /// Pretty JSON snapshot of config and users
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network:")?;
        for user in &self.users {
            write!(f, "\n{}", user)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
