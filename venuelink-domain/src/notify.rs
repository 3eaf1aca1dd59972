use async_trait::async_trait;

/// One push notification addressed to a single device token.
#[derive(Debug, Clone)]
pub struct PushMessage {
    pub token: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Adapter over the push-notification relay. Delivery is best-effort:
/// callers log failures and move on, they never propagate them.
#[async_trait]
pub trait PushRelay: Send + Sync {
    async fn send(
        &self,
        message: &PushMessage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
