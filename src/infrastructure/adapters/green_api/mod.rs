//! Green API (WhatsApp) adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::Message;
use crate::domain::traits::{Bot, BotInfo};
use crate::infrastructure::config::{GreenApiConfig, GreenApiCredentials};

/// Extra time allowed on top of the long-poll timeout
const HTTP_GRACE: Duration = Duration::from_secs(10);

/// Upper bound on notifications drained at startup
const MAX_BACKLOG: usize = 1000;

/// Shortest long-poll the queue accepts, in seconds
const BACKLOG_POLL_TIMEOUT: u64 = 5;

// Request URLs carry the API token, so errors are reported without them
fn network_error(e: reqwest::Error) -> BotError {
    BotError::Network(e.without_url().to_string())
}

fn parse_error(e: reqwest::Error) -> BotError {
    BotError::Parse(e.without_url().to_string())
}

/// Queued notification returned by receiveNotification
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub receipt_id: i64,
    pub body: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateInstance {
    state_instance: String,
}

/// Green API bot adapter
pub struct GreenApiAdapter {
    credentials: GreenApiCredentials,
    api_url: String,
    receive_timeout: u64,
    skip_backlog: bool,
    client: Client,
    parser: MessageParser,
    info: BotInfo,
}

impl GreenApiAdapter {
    pub fn new(credentials: GreenApiCredentials, config: &GreenApiConfig) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.receive_timeout) + HTTP_GRACE)
            .build()
            .map_err(network_error)?;

        Ok(Self {
            info: BotInfo {
                id: credentials.id_instance.clone(),
                name: "muntushop-bot".to_string(),
                platform: "whatsapp".to_string(),
            },
            credentials,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            receive_timeout: config.receive_timeout,
            skip_backlog: config.skip_backlog,
            client,
            parser: MessageParser::new("whatsapp"),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/waInstance{}/{}/{}",
            self.api_url, self.credentials.id_instance, method, self.credentials.api_token_instance
        )
    }

    /// Fetch the instance authorization state
    pub async fn get_state_instance(&self) -> Result<String, BotError> {
        let response = self.client
            .get(self.api_url("getStateInstance"))
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Green API error: {}", response.status())));
        }

        let data: StateInstance = response
            .json()
            .await
            .map_err(parse_error)?;

        Ok(data.state_instance)
    }

    /// Long-poll the notification queue
    pub async fn receive_notification(&self, timeout_secs: u64) -> Result<Option<Notification>, BotError> {
        let response = self.client
            .get(self.api_url("receiveNotification"))
            .query(&[("receiveTimeout", timeout_secs)])
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Green API error: {}", response.status())));
        }

        // The queue answers `null` when the poll times out
        response
            .json::<Option<Notification>>()
            .await
            .map_err(parse_error)
    }

    /// Acknowledge a notification so it leaves the queue
    pub async fn delete_notification(&self, receipt_id: i64) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: bool,
        }

        let url = format!("{}/{}", self.api_url("deleteNotification"), receipt_id);
        let response = self.client
            .delete(&url)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Green API error: {}", response.status())));
        }

        let data: Response = response
            .json()
            .await
            .map_err(parse_error)?;

        if !data.result {
            tracing::warn!("Notification {} was not deleted", receipt_id);
        }
        Ok(())
    }

    /// Acknowledge everything already queued. Returns the number dropped.
    pub async fn drain_backlog(&self) -> Result<usize, BotError> {
        let mut dropped = 0;
        while dropped < MAX_BACKLOG {
            let Some(notification) = self.receive_notification(BACKLOG_POLL_TIMEOUT).await? else {
                break;
            };
            self.delete_notification(notification.receipt_id).await?;
            dropped += 1;
        }
        Ok(dropped)
    }

    /// Send a text message via Green API
    pub async fn send_message_api(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            message: &'a str,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            id_message: String,
        }

        let response = self.client
            .post(self.api_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, message: text })
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!("Green API error: {} {}", status, error)));
        }

        let data: Response = response
            .json()
            .await
            .map_err(parse_error)?;

        Ok(data.id_message)
    }
}

#[async_trait]
impl Bot for GreenApiAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting Green API bot (instance: {})", self.credentials.id_instance);

        let state = self.get_state_instance().await?;
        if state == "authorized" {
            tracing::info!("Instance state: {}", state);
        } else {
            tracing::warn!("Instance state: {} (messages may not be delivered)", state);
        }

        if self.skip_backlog {
            let dropped = self.drain_backlog().await?;
            if dropped > 0 {
                tracing::info!("Skipped {} queued notifications", dropped);
            }
        }
        Ok(())
    }

    async fn receive(&self) -> Result<Option<Message>, BotError> {
        let Some(notification) = self.receive_notification(self.receive_timeout).await? else {
            return Ok(None);
        };

        let parsed = self.parser.parse_webhook(notification.body);

        // Acknowledge even unparseable notifications or they are redelivered forever
        self.delete_notification(notification.receipt_id).await?;

        match parsed {
            Ok(message) => Ok(message),
            Err(e) => {
                tracing::warn!("Dropping notification {}: {}", notification.receipt_id, e);
                Ok(None)
            }
        }
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {} chars", chat_id, text.chars().count());
        self.send_message_api(chat_id, text).await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
