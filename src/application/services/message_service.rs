use std::future::Future;
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::MessageRouter;
use crate::domain::entities::Message;
use crate::domain::traits::Bot;

/// Pause after a failed poll before asking the platform again
const POLL_ERROR_DELAY: Duration = Duration::from_secs(5);

/// Service for processing messages
pub struct MessageService<B: Bot> {
    bot: B,
    router: MessageRouter,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, router: MessageRouter) -> Self {
        Self { bot, router }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn into_bot(self) -> B {
        self.bot
    }

    /// Route an incoming message and send the single reply
    pub async fn handle(&self, message: Message) -> Result<String, BotError> {
        tracing::info!(
            "📨 [{}] Message from {} ({}): {}",
            message.platform,
            message.sender.id,
            message.sender.display_name(),
            message.preview()
        );

        let reply = self.router.route(&message);
        self.respond(&message.chat_id, &reply.text).await
    }

    /// Send a response message
    pub async fn respond(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        self.bot.send_message(chat_id, text).await
    }

    /// Poll the platform and answer messages until `shutdown` resolves
    /// or the platform disconnects.
    pub async fn run<F>(&self, shutdown: F) -> Result<(), BotError>
    where
        F: Future<Output = ()>,
    {
        self.bot.start().await?;

        let info = self.bot.bot_info();
        tracing::info!("Bot started: {} on {} ({} rules)", info.name, info.platform, self.router.len());
        for rule in self.router.rules() {
            tracing::debug!("  {} - {}", rule.name, rule.description.as_deref().unwrap_or(""));
        }

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested");
                    return Ok(());
                }
                polled = self.bot.receive() => match polled {
                    Ok(Some(message)) => {
                        let chat_id = message.chat_id.clone();
                        if let Err(e) = self.handle(message).await {
                            tracing::error!("[{}] Failed to send reply: {}", chat_id, e);
                        }
                    }
                    Ok(None) => {}
                    Err(BotError::Disconnected(reason)) => {
                        tracing::info!("Transport closed: {}", reason);
                        return Ok(());
                    }
                    Err(e) => {
                        tracing::error!("Error receiving messages: {}", e);
                        tokio::time::sleep(POLL_ERROR_DELAY).await;
                    }
                },
            }
        }
    }
}
