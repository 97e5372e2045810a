//! Handler trait.

use async_trait::async_trait;

use super::{response::HandlerResponse, update::Update};

/// One variant per command or content kind. Handlers build a reply; sending it is the
/// invoker's job, so a handler never touches the transport.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, update: &Update) -> crate::error::Result<HandlerResponse>;
}
