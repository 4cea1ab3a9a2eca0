//! In-process greet actor.
//!
//! Replies with `Hello, <name>!` after a random delay, so overlapping calls
//! can resolve out of order just as they do against a real backend.

use super::{ActorError, GreetActor};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;

pub struct LocalActor {
    min_latency: Duration,
    max_latency: Duration,
}

impl LocalActor {
    pub fn new(min_latency: Duration, max_latency: Duration) -> Self {
        Self {
            min_latency,
            max_latency: max_latency.max(min_latency),
        }
    }

    fn pick_latency(&self) -> Duration {
        if self.min_latency == self.max_latency {
            return self.min_latency;
        }
        let mut rng = rand::rng();
        let ms = rng.random_range(
            self.min_latency.as_millis() as u64..=self.max_latency.as_millis() as u64,
        );
        Duration::from_millis(ms)
    }
}

#[async_trait]
impl GreetActor for LocalActor {
    async fn greet(&self, name: &str) -> Result<String, ActorError> {
        let latency = self.pick_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(format!("Hello, {}!", name))
    }

    fn describe(&self) -> String {
        "local".to_string()
    }
}
