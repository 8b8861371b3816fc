// 👤 User Entity - name identity + bounded followee list
//
// Follows are stored as plain names, never as links to other User values.
// The owning Network resolves a name back to a User when it needs one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::DEFAULT_MAX_FOLLOWEE_COUNT;
use crate::error::NetworkError;

// ============================================================================
// USER ENTITY
// ============================================================================

/// A member of the network and the names they follow
///
/// Identity: `name` (case-insensitive, never changes)
/// Values: `followees` in the order they were added
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    /// Opaque handle, not used for comparisons
    pub id: String,

    name: String,

    followees: Vec<String>,

    max_followees: usize,

    pub joined_at: DateTime<Utc>,
}

impl User {
    /// Create a user with an empty followee list and the default capacity
    pub fn new(name: String) -> Self {
        Self::with_capacity(name, DEFAULT_MAX_FOLLOWEE_COUNT)
    }

    /// Create a user that can follow at most `max_followees` names
    pub fn with_capacity(name: String, max_followees: usize) -> Self {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            followees: Vec::with_capacity(max_followees),
            max_followees,
            joined_at: Utc::now(),
        }
    }

    /// Create a user already following Foo, Bar and Baz
    pub fn with_demo_followees(name: String) -> Self {
        let mut user = Self::new(name);
        for followee in ["Foo", "Bar", "Baz"] {
            let added = user.add_followee(followee);
            debug_assert!(added, "demo followee {} rejected", followee);
        }
        user
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Followee names in the order they were added
    pub fn followees(&self) -> &[String] {
        &self.followees
    }

    pub fn followee_count(&self) -> usize {
        self.followees.len()
    }

    pub fn max_followees(&self) -> usize {
        self.max_followees
    }

    pub fn is_full(&self) -> bool {
        self.followees.len() >= self.max_followees
    }

    /// Case-insensitive membership test; an empty name is never followed
    pub fn follows(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.followees.iter().any(|f| names_match(f, name))
    }

    /// Append `name` to the followee list
    ///
    /// Returns false, leaving the list untouched, when the name is empty,
    /// the list is full, or the name is already followed.
    pub fn add_followee(&mut self, name: &str) -> bool {
        if name.is_empty() {
            debug!(user = %self.name, "can't follow an empty name");
            return false;
        }
        if self.is_full() {
            debug!(user = %self.name, followee = name, "follows list is full");
            return false;
        }
        if self.follows(name) {
            debug!(user = %self.name, followee = name, "already following");
            return false;
        }

        self.followees.push(name.to_string());
        debug!(user = %self.name, followee = name, "added followee");
        true
    }

    /// Remove `name` from the followee list, keeping the order of the rest
    pub fn remove_followee(&mut self, name: &str) -> bool {
        let position = self.followees.iter().position(|f| names_match(f, name));

        match position {
            Some(index) => {
                // Vec::remove shifts the tail left
                let removed = self.followees.remove(index);
                debug!(user = %self.name, followee = %removed, "removed followee");
                true
            }
            None => {
                debug!(user = %self.name, followee = name, "not following, nothing to remove");
                false
            }
        }
    }

    /// Number of names both users follow
    pub fn count_mutual(&self, other: &User) -> usize {
        self.followees.iter().filter(|f| other.follows(f)).count()
    }

    /// Two users are friends when each follows the other
    pub fn is_friend_of(&self, other: &User) -> bool {
        self.follows(&other.name) && other.follows(&self.name)
    }
}

/// `name -> a b c`, with no space after the last followee
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.followees.join(" "))
    }
}

// ============================================================================
// DESERIALIZATION
// ============================================================================

/// Raw serialized form; only reaches `User` through `TryFrom`
#[derive(Deserialize)]
struct UserRecord {
    id: String,
    name: String,
    followees: Vec<String>,
    max_followees: usize,
    joined_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for User {
    type Error = NetworkError;

    /// Replays every followee through `add_followee` so the list stays bounded
    /// and duplicate-free
    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        if record.name.is_empty() {
            return Err(NetworkError::InvalidUser {
                name: record.name,
                reason: "empty name".to_string(),
            });
        }
        if record.max_followees == 0 {
            return Err(NetworkError::InvalidCapacity {
                field: "max_followees",
                value: 0,
            });
        }

        let mut user = User::with_capacity(record.name, record.max_followees);
        user.id = record.id;
        user.joined_at = record.joined_at;

        for followee in &record.followees {
            if !user.add_followee(followee) {
                return Err(NetworkError::InvalidUser {
                    name: user.name,
                    reason: format!("followee {:?} is empty, duplicated or over capacity", followee),
                });
            }
        }
        Ok(user)
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Case-insensitive name equality, without allocating
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn user_following(name: &str, followees: &[&str]) -> User {
        let mut user = User::new(name.to_string());
        for followee in followees {
            assert!(user.add_followee(followee));
        }
        user
    }

    #[test]
    fn test_user_creation() {
        let user = User::new("Alice".to_string());

        assert!(!user.id.is_empty());
        assert_eq!(user.name(), "Alice");
        assert_eq!(user.followee_count(), 0);
        assert_eq!(user.max_followees(), 10);
        assert!(!user.is_full());
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("alice", "ALICE"));
        assert!(names_match("Émile", "éMILE"));
        assert!(!names_match("alice", "alicia"));
        assert!(!names_match("alice", ""));
    }

    #[test]
    fn test_follows_case_insensitive() {
        let user = User::with_demo_followees("Alice".to_string());

        assert!(user.follows("Foo"));
        assert!(user.follows("bar"));
        assert!(user.follows("BAZ"));
        assert!(!user.follows("Qux"));
        assert!(!user.follows(""));
    }

    #[test]
    fn test_add_followee_appends_in_order() {
        let user = user_following("Alice", &["Bob", "Carol", "Dave"]);
        assert_eq!(user.followees(), ["Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_add_followee_rejects_empty_and_duplicates() {
        let mut user = user_following("Alice", &["Bob"]);

        assert!(!user.add_followee(""));
        assert!(!user.add_followee("Bob"));
        assert!(!user.add_followee("bOB"));
        assert_eq!(user.followee_count(), 1);
    }

    #[test]
    fn test_add_followee_respects_capacity() {
        let mut user = User::new("Alice".to_string());
        for i in 0..10 {
            assert!(user.add_followee(&format!("User{}", i)));
        }

        assert!(user.is_full());
        assert!(!user.add_followee("User10"));
        assert_eq!(user.followee_count(), 10);
        assert!(!user.follows("User10"));
    }

    #[test]
    fn test_custom_capacity() {
        let mut user = User::with_capacity("Alice".to_string(), 2);
        assert!(user.add_followee("Bob"));
        assert!(user.add_followee("Carol"));
        assert!(!user.add_followee("Dave"));
        assert_eq!(user.followees(), ["Bob", "Carol"]);
    }

    #[test]
    fn test_remove_followee_preserves_order() {
        let mut user = user_following("Alice", &["A", "B", "C"]);

        assert!(user.remove_followee("b"));
        assert!(!user.follows("B"));
        assert_eq!(user.followees(), ["A", "C"]);
    }

    #[test]
    fn test_remove_followee_missing_or_empty_list() {
        let mut empty = User::new("Alice".to_string());
        assert!(!empty.remove_followee("Bob"));

        let mut user = user_following("Alice", &["Bob"]);
        assert!(!user.remove_followee("Carol"));
        assert!(!user.remove_followee(""));
        assert_eq!(user.followee_count(), 1);
    }

    #[test]
    fn test_remove_then_re_add() {
        let mut user = user_following("Alice", &["A", "B"]);
        assert!(user.remove_followee("A"));
        assert!(user.add_followee("A"));
        assert_eq!(user.followees(), ["B", "A"]);
    }

    #[test]
    fn test_count_mutual() {
        let alice = user_following("Alice", &["Bob", "Carol", "Dave"]);
        let erin = user_following("Erin", &["carol", "DAVE", "Frank"]);
        let nobody = User::new("Nobody".to_string());

        assert_eq!(alice.count_mutual(&erin), 2);
        assert_eq!(alice.count_mutual(&nobody), 0);
        assert_eq!(nobody.count_mutual(&alice), 0);
    }

    #[test]
    fn test_count_mutual_symmetric() {
        let a = user_following("A", &["X", "y", "Z", "W"]);
        let b = user_following("B", &["w", "Y", "Q"]);

        assert_eq!(a.count_mutual(&b), b.count_mutual(&a));
        assert_eq!(a.count_mutual(&b), 2);
    }

    #[test]
    fn test_is_friend_of() {
        let alice = user_following("Alice", &["Bob"]);
        let bob = user_following("Bob", &["alice"]);
        let carol = user_following("Carol", &["Alice"]);

        assert!(alice.is_friend_of(&bob));
        assert!(bob.is_friend_of(&alice));
        assert!(!alice.is_friend_of(&carol));
        assert!(!carol.is_friend_of(&alice));
    }

    #[test]
    fn test_display() {
        let user = User::with_demo_followees("Alice".to_string());
        assert_eq!(user.to_string(), "Alice -> Foo Bar Baz");

        let lonely = User::new("Bob".to_string());
        assert_eq!(lonely.to_string(), "Bob -> ");
    }

    #[test]
    fn test_serialize_roundtrip_keeps_followees() {
        let user = user_following("Alice", &["Bob", "Carol"]);
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();

        assert_eq!(back.name(), "Alice");
        assert_eq!(back.followees(), ["Bob", "Carol"]);
        assert_eq!(back.id, user.id);
        assert_eq!(back.max_followees(), 10);
        assert_eq!(back.joined_at, user.joined_at);
    }

    #[test]
    fn test_deserialize_rejects_over_capacity() {
        let json = r#"{"id":"x","name":"Alice","followees":["Bob","Carol"],"max_followees":1,"joined_at":"2024-01-01T00:00:00Z"}"#;
        let result = serde_json::from_str::<User>(json);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("Alice"), "unexpected error: {}", err);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_followees() {
        let json = r#"{"id":"x","name":"Alice","followees":["Bob","bob","Carol"],"max_followees":10,"joined_at":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_name_and_zero_capacity() {
        let empty_name = r#"{"id":"x","name":"","followees":[],"max_followees":10,"joined_at":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<User>(empty_name).is_err());

        let zero_capacity = r#"{"id":"x","name":"Alice","followees":[],"max_followees":0,"joined_at":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<User>(zero_capacity).is_err());
    }

    #[test]
    fn test_deserialized_user_keeps_invariants() {
        let json = r#"{"id":"x","name":"Alice","followees":["Bob","Carol"],"max_followees":2,"joined_at":"2024-01-01T00:00:00Z"}"#;
        let mut user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.followees(), ["Bob", "Carol"]);
        assert!(user.is_full());
        assert!(!user.add_followee("Dave"));

        let other = user_following("Erin", &["bob"]);
        assert_eq!(user.count_mutual(&other), other.count_mutual(&user));
    }
}
