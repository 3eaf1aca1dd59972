use async_trait::async_trait;
use serde_json::json;
use venuelink_domain::notify::{PushMessage, PushRelay};

/// Push relay client posting Expo-style payloads
/// (`{to, title, body, data}`) to the configured endpoint.
pub struct HttpPushRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPushRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PushRelay for HttpPushRelay {
    async fn send(
        &self,
        message: &PushMessage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "to": message.token,
                "title": message.title,
                "body": message.body,
                "data": message.data,
            }))
            .send()
            .await?;

        response.error_for_status()?;
        tracing::debug!("Push notification delivered to relay");
        Ok(())
    }
}
