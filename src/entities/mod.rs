// Entity Models
//
// User owns its followee names; Network owns every User.
// Follows are name-keyed, so there are no links between User values.

pub mod network;
pub mod user;

pub use network::{Network, Recommendation};
pub use user::User;
