//! Google Chat webhook notification channel.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::GoogleChatConfig;
use crate::endpoint::{apply_threading, loggable_space, resolve_endpoint, resolve_space};
use crate::error::{ConfigError, SendError};
use crate::message::GoogleChatMessage;
use crate::notification::{Notifiable, Notification, GOOGLE_CHAT_CHANNEL};
use crate::NotifyChannel;

/// Posts notifications to Google Chat incoming webhooks.
///
/// Stateless apart from the HTTP client and the shared, read-only
/// configuration. Timeouts are whatever the supplied client enforces.
#[derive(Debug, Clone)]
pub struct GoogleChatChannel {
    client: reqwest::Client,
    config: Arc<GoogleChatConfig>,
}

impl GoogleChatChannel {
    /// Create a channel with a default HTTP client.
    #[must_use]
    pub fn new(config: impl Into<Arc<GoogleChatConfig>>) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a channel with a caller-configured HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: impl Into<Arc<GoogleChatConfig>>) -> Self {
        Self {
            client,
            config: config.into(),
        }
    }

    /// Create a channel configured from `GOOGLE_CHAT_SPACE` / `GOOGLE_CHAT_SPACES`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the environment holds malformed configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(GoogleChatConfig::from_env()?))
    }

    #[must_use]
    pub fn config(&self) -> &GoogleChatConfig {
        &self.config
    }

    /// Send `notification` to `notifiable`.
    ///
    /// Returns `self` so sends can be chained.
    ///
    /// # Errors
    /// - [`SendError::UndefinedMethod`] if the notification has no Google Chat rendering
    /// - [`SendError::InvalidMessage`] if the rendered message is empty
    /// - see [`Self::send_message`] for the rest
    pub async fn send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<&Self, SendError> {
        let renderer = notification
            .as_google_chat()
            .ok_or_else(|| SendError::UndefinedMethod {
                notification: notification.name().to_string(),
            })?;

        let message = renderer.to_google_chat(notifiable);
        if message.is_empty() {
            return Err(SendError::InvalidMessage {
                message: Box::new(message),
                reason: "message has neither text nor cards",
            });
        }

        self.send_message(notifiable, &message).await
    }

    /// Resolve the endpoint for `message` and post it.
    ///
    /// # Errors
    /// - [`SendError::WebhookUnavailable`] if no non-empty endpoint resolves
    /// - [`SendError::ClientError`] on a 4xx response
    /// - [`SendError::UnexpectedException`] on any other failure
    pub async fn send_message(
        &self,
        notifiable: &dyn Notifiable,
        message: &GoogleChatMessage,
    ) -> Result<&Self, SendError> {
        let (source, space) = resolve_space(message, notifiable, &self.config)
            .ok_or(SendError::WebhookUnavailable)?;

        let endpoint =
            resolve_endpoint(&space, &self.config).ok_or(SendError::WebhookUnavailable)?;
        let endpoint = apply_threading(endpoint, message.is_threaded());

        debug!(
            channel = GOOGLE_CHAT_CHANNEL,
            space = loggable_space(&space, &self.config),
            source = ?source,
            threaded = message.is_threaded(),
            "Sending notification"
        );

        let response = self
            .client
            .post(&endpoint)
            .json(&message.to_payload())
            .send()
            .await?;

        let status = response.status();

        if status.is_client_error() {
            let (body, read_error) = match response.text().await {
                Ok(body) => (body, None),
                Err(err) => (String::new(), Some(err.without_url().to_string())),
            };

            warn!(
                channel = GOOGLE_CHAT_CHANNEL,
                status = %status,
                body = %body,
                read_error = ?read_error,
                "Google Chat webhook rejected the message"
            );

            return Err(SendError::ClientError { status, body });
        }

        if let Err(err) = response.error_for_status() {
            let err = err.without_url();
            warn!(
                channel = GOOGLE_CHAT_CHANNEL,
                status = %status,
                error = %err,
                "Google Chat webhook request failed"
            );
            return Err(err.into());
        }

        debug!(channel = GOOGLE_CHAT_CHANNEL, "Notification sent successfully");
        Ok(self)
    }
}

#[async_trait]
impl NotifyChannel for GoogleChatChannel {
    fn name(&self) -> &'static str {
        GOOGLE_CHAT_CHANNEL
    }

    async fn deliver(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<(), SendError> {
        self.send(notifiable, notification).await.map(|_| ())
    }
}
