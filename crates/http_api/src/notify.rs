use reqwest::Client;
use serde_json::json;
use tracing::warn;

/// Posts plain-text notices to a chat webhook.
#[derive(Clone)]
pub struct Notifier {
    client: Client,
    webhook_url: String,
}

impl Notifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    pub async fn post(&self, content: &str) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.webhook_url)
            .json(&json!({ "content": content }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Fire-and-forget variant; failures are logged and dropped.
    pub fn post_in_background(&self, content: String) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(err) = notifier.post(&content).await {
                warn!(error = %err, "webhook notification failed");
            }
        });
    }
}
