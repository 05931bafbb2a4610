//! Message parser - Turns raw platform payloads into structured messages

use chrono::DateTime;
use serde::Deserialize;

use crate::application::errors::BotError;
use crate::domain::entities::{Message, User};

/// Webhook type carrying a message sent to the bot
pub const INCOMING_MESSAGE: &str = "incomingMessageReceived";

/// Green API webhook body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookBody {
    pub type_webhook: String,
    #[serde(default)]
    pub id_message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub sender_data: Option<SenderData>,
    #[serde(default)]
    pub message_data: Option<MessageData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderData {
    pub chat_id: String,
    pub sender: String,
    #[serde(default)]
    pub sender_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub type_message: String,
    #[serde(default)]
    pub text_message_data: Option<TextMessageData>,
    #[serde(default)]
    pub extended_text_message_data: Option<ExtendedTextMessageData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageData {
    pub text_message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedTextMessageData {
    #[serde(default)]
    pub text: String,
}

impl MessageData {
    /// Text of the message; empty for media and other non-text types
    pub fn text(&self) -> &str {
        if let Some(data) = &self.text_message_data {
            return &data.text_message;
        }
        if let Some(data) = &self.extended_text_message_data {
            return &data.text;
        }
        ""
    }
}

/// Parses incoming payloads into Message objects
pub struct MessageParser {
    platform: String,
}

impl MessageParser {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    /// Parse a plain text line
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: User) -> Message {
        Message::new(chat_id, sender, text).with_platform(&self.platform)
    }

    /// Parse a Green API webhook body.
    ///
    /// Returns `Ok(None)` for webhooks that are not incoming messages
    /// (delivery statuses, outgoing echoes, instance state changes).
    pub fn parse_webhook(&self, raw: serde_json::Value) -> Result<Option<Message>, BotError> {
        let body: WebhookBody = serde_json::from_value(raw.clone())
            .map_err(|e| BotError::Parse(format!("Invalid webhook body: {}", e)))?;

        if body.type_webhook != INCOMING_MESSAGE {
            tracing::debug!("Ignoring webhook of type {}", body.type_webhook);
            return Ok(None);
        }

        let sender_data = body
            .sender_data
            .ok_or_else(|| BotError::Parse("Missing senderData in incoming message".to_string()))?;

        let text = body
            .message_data
            .as_ref()
            .map(|data| data.text().to_string())
            .unwrap_or_default();

        let mut sender = User::new(sender_data.sender);
        if let Some(name) = sender_data.sender_name {
            sender = sender.with_name(name);
        }

        let mut message = self.parse(sender_data.chat_id, text, sender).with_raw(raw);
        if let Some(id) = body.id_message {
            message = message.with_id(id);
        }
        if let Some(ts) = body.timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
            message = message.with_timestamp(ts);
        }

        Ok(Some(message))
    }
}
