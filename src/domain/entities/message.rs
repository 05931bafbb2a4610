use super::User;
use chrono::{DateTime, Utc};

/// An inbound text message, created per notification and dropped after handling
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: User,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
    pub raw: Option<serde_json::Value>,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, sender: User, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
            raw: None,
        }
    }

    /// Message from a sender replying in their own chat
    pub fn from_text(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        let sender_id = sender_id.into();
        Self::new(sender_id.clone(), User::new(sender_id), text)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = user;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// First 50 characters, for log lines
    pub fn preview(&self) -> String {
        self.text.chars().take(50).collect()
    }
}
