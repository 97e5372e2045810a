//! User identity type for core updates.

use serde::{Deserialize, Serialize};

/// User identity. `id` is the platform-assigned id and the rate-limit key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}
