use async_trait::async_trait;
use crate::domain::entities::Message;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Check the platform is reachable before listening for messages
    async fn start(&self) -> Result<(), BotError>;

    /// Wait for the next inbound message.
    ///
    /// `Ok(None)` means the poll ended without a message worth routing.
    /// `Err(BotError::Disconnected)` means no further messages will arrive.
    async fn receive(&self) -> Result<Option<Message>, BotError>;

    /// Send a text message to a chat, returning the platform message id
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub platform: String,
}
