//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{Message, User};
use crate::domain::traits::{Bot, BotInfo};

/// Chat id used for every console message
pub const CONSOLE_CHAT: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter<R = BufReader<Stdin>, W = Stdout> {
    info: BotInfo,
    sender: User,
    parser: MessageParser,
    input: Mutex<Lines<R>>,
    output: Mutex<W>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self::with_io(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, W> ConsoleAdapter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn with_io(input: R, output: W) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "muntushop-bot".to_string(),
                platform: "console".to_string(),
            },
            sender: User::new("console-user"),
            parser: MessageParser::new("console"),
            input: Mutex::new(input.lines()),
            output: Mutex::new(output),
        }
    }

    /// Name the local sender, as shown in the welcome menu
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender = self.sender.with_name(name);
        self
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

#[async_trait]
impl<R, W> Bot for ConsoleAdapter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn receive(&self) -> Result<Option<Message>, BotError> {
        let line = self.input.lock().await.next_line().await?;

        match line {
            Some(text) => Ok(Some(self.parser.parse(CONSOLE_CHAT, text, self.sender.clone()))),
            None => Err(BotError::Disconnected("end of input".to_string())),
        }
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        let mut output = self.output.lock().await;
        output.write_all(format!("[BOT] {}\n", text).as_bytes()).await?;
        output.flush().await?;
        Ok(uuid::Uuid::new_v4().to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::storefront::storefront_router;
    use crate::application::services::MessageService;
    use crate::application::templates;

    #[tokio::test]
    async fn test_console_session() {
        let input: &[u8] = b"shop\nthanks\n";
        let bot = ConsoleAdapter::with_io(BufReader::new(input), Vec::new()).with_sender_name("Dev");

        let service = MessageService::new(bot, storefront_router("/"));
        service.run(std::future::pending()).await.unwrap();

        let written = String::from_utf8(service.into_bot().into_output()).unwrap();
        assert_eq!(
            written,
            format!("[BOT] {}\n[BOT] {}\n", templates::shopping_menu(), templates::THANKS)
        );
    }

    #[tokio::test]
    async fn test_receive_keeps_text_as_typed() {
        let input: &[u8] = b"  shop \r\nMENU\n";
        let bot = ConsoleAdapter::with_io(BufReader::new(input), Vec::new());

        let first = bot.receive().await.unwrap().unwrap();
        assert_eq!(first.text, "  shop ");
        assert_eq!(storefront_router("/").route(&first).rule, "fallback");

        let second = bot.receive().await.unwrap().unwrap();
        assert_eq!(second.text, "MENU");
        assert_eq!(second.chat_id, CONSOLE_CHAT);
    }

    #[tokio::test]
    async fn test_receive_after_eof_is_disconnected() {
        let input: &[u8] = b"";
        let bot = ConsoleAdapter::with_io(BufReader::new(input), Vec::new());
        assert!(matches!(bot.receive().await, Err(BotError::Disconnected(_))));
    }
}
