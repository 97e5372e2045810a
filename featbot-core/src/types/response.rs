//! Handler result type.

use super::reply::Reply;

/// What a handler produced for one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Send this reply to the update's chat.
    Reply(Reply),
    /// Nothing to send.
    Ignore,
}

impl From<Reply> for HandlerResponse {
    fn from(reply: Reply) -> Self {
        HandlerResponse::Reply(reply)
    }
}
