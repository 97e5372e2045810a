//! Chat identity type for core updates.

use serde::{Deserialize, Serialize};

/// Chat (private, group or channel) the update came from and the reply goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}
