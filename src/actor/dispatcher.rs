//! Runs greet calls on background tasks and reports back on the app channel.
//!
//! Calls are never cancelled and never serialized: each activation gets its
//! own task, and replies are posted in whatever order they complete.

use crate::actor::{ActorError, GreetActor};
use crate::app::event::{AppEvent, CallId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct CallDispatcher {
    actor: Arc<dyn GreetActor>,
    timeout: Option<Duration>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl CallDispatcher {
    pub fn new(
        actor: Arc<dyn GreetActor>,
        timeout: Option<Duration>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            actor,
            timeout,
            event_tx,
        }
    }

    pub fn describe(&self) -> String {
        self.actor.describe()
    }

    pub fn spawn_greet(&self, call_id: CallId, name: String) -> JoinHandle<()> {
        let actor = Arc::clone(&self.actor);
        let timeout = self.timeout;
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, actor.greet(&name))
                    .await
                    .unwrap_or(Err(ActorError::Timeout(limit))),
                None => actor.greet(&name).await,
            };

            let event = match result {
                Ok(greeting) => AppEvent::GreetResolved { call_id, greeting },
                Err(e) => AppEvent::GreetFailed {
                    call_id,
                    error: e.to_string(),
                },
            };
            // The receiver is gone only during shutdown
            let _ = event_tx.send(event);
        })
    }
}
