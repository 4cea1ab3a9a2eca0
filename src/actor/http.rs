//! JSON-over-HTTP greet actor.
//!
//! `POST <base>/greet` with `{"name": "..."}`; a successful reply body is a
//! JSON string holding the greeting.

use super::{ActorError, GreetActor};
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

#[derive(Serialize)]
struct GreetRequest<'a> {
    name: &'a str,
}

pub struct HttpActor {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpActor {
    pub fn new(base_url: &str) -> Result<Self, ActorError> {
        let mut base =
            Url::parse(base_url).map_err(|e| ActorError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("greet")
            .map_err(|e| ActorError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl GreetActor for HttpActor {
    async fn greet(&self, name: &str) -> Result<String, ActorError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&GreetRequest { name })
            .send()
            .await
            .map_err(|e| ActorError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ActorError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ActorError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<String>(&body).map_err(|e| ActorError::Decode(e.to_string()))
    }

    fn describe(&self) -> String {
        match self.endpoint.host_str() {
            Some(host) => match self.endpoint.port() {
                Some(port) => format!("http {}:{}", host, port),
                None => format!("http {}", host),
            },
            None => "http".to_string(),
        }
    }
}
