use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Service for delivering a single transactional email
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Returns true only when the provider accepted the message. Never fails.
    async fn send(&self, message: &EmailMessage) -> bool;
}
