//! Error types for the Google Chat channel.

use reqwest::StatusCode;
use thiserror::Error;

use crate::message::GoogleChatMessage;

/// Boxed source carried by [`SendError::UnexpectedException`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when sending a notification to Google Chat.
///
/// Every variant is fatal to the current `send` call; nothing is retried
/// inside the channel.
#[derive(Debug, Error)]
pub enum SendError {
    /// The notification has no Google Chat representation.
    #[error(
        "Cannot send Google Chat message for notification `{notification}`: it does not implement `ToGoogleChat`"
    )]
    UndefinedMethod { notification: String },

    /// `to_google_chat` produced a message Google Chat would reject.
    #[error("`to_google_chat` returned an invalid message ({reason}): {message:?}")]
    InvalidMessage {
        message: Box<GoogleChatMessage>,
        reason: &'static str,
    },

    /// No webhook URL could be resolved for the notification.
    #[error("Could not send Google Chat message: no webhook URL is configured")]
    WebhookUnavailable,

    /// The webhook answered with a 4xx status.
    #[error("Google Chat rejected the message with client error {status}: {body}")]
    ClientError { status: StatusCode, body: String },

    /// Anything else that went wrong while issuing the request.
    #[error("Unexpected error while sending Google Chat message: {0}")]
    UnexpectedException(#[source] BoxError),
}

impl SendError {
    /// HTTP status attached to this error, if the webhook answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ClientError { status, .. } => Some(*status),
            Self::UnexpectedException(source) => source
                .downcast_ref::<reqwest::Error>()
                .and_then(reqwest::Error::status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::ClientError { .. })
    }
}

/// The request URL is dropped: webhook URLs carry credentials.
impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        Self::UnexpectedException(Box::new(err.without_url()))
    }
}

/// Errors raised while loading [`GoogleChatConfig`](crate::GoogleChatConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The space alias table is not a JSON object of strings.
    #[error("{var} must be a JSON object mapping space aliases to webhook URLs: {source}")]
    InvalidSpaces {
        var: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// TOML configuration could not be parsed.
    #[error("Invalid Google Chat TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
