//! Backend actor layer: the greet contract, its transports, and the task
//! dispatcher that runs calls off the UI loop.

pub mod dispatcher;
pub mod http;
pub mod local;

use crate::config::model::BackendConfig;
use crate::config::BackendKind;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use dispatcher::CallDispatcher;
pub use http::HttpActor;
pub use local::LocalActor;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend rejected the call ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("could not decode reply: {0}")]
    Decode(String),
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

/// A remote actor exposing `greet(name) -> string`.
#[async_trait]
pub trait GreetActor: Send + Sync {
    async fn greet(&self, name: &str) -> Result<String, ActorError>;

    /// Short label for the status bar.
    fn describe(&self) -> String;
}

/// Build the actor selected by the config.
pub fn build_actor(config: &BackendConfig) -> Result<Arc<dyn GreetActor>, ActorError> {
    let actor: Arc<dyn GreetActor> = match config.kind {
        BackendKind::Local => {
            let [min, max] = config.latency_ms;
            Arc::new(LocalActor::new(
                Duration::from_millis(min),
                Duration::from_millis(max),
            ))
        }
        BackendKind::Http => Arc::new(HttpActor::new(&config.url)?),
    };
    Ok(actor)
}
