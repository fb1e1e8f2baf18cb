//! Google Chat notification channel.
//!
//! Formats notifications as Google Chat messages and posts them to an
//! incoming webhook.
//!
//! # Usage
//!
//! ```no_run
//! use google_chat_notify::{
//!     AnonymousNotifiable, GoogleChatChannel, GoogleChatConfig, GoogleChatMessage, Notifiable,
//!     Notification, ToGoogleChat, GOOGLE_CHAT_CHANNEL,
//! };
//!
//! struct DeployFinished {
//!     service: String,
//! }
//!
//! impl ToGoogleChat for DeployFinished {
//!     fn to_google_chat(&self, _notifiable: &dyn Notifiable) -> GoogleChatMessage {
//!         GoogleChatMessage::new()
//!             .bold("Deploy finished")
//!             .text(format!(" for `{}`", self.service))
//!             .threaded()
//!     }
//! }
//!
//! impl Notification for DeployFinished {
//!     fn as_google_chat(&self) -> Option<&dyn ToGoogleChat> {
//!         Some(self)
//!     }
//! }
//!
//! # async fn run() -> Result<(), google_chat_notify::SendError> {
//! let config = GoogleChatConfig::new()
//!     .with_space("ops", "https://chat.googleapis.com/v1/spaces/XXX/messages?key=k&token=t");
//! let channel = GoogleChatChannel::new(config);
//!
//! let ops = AnonymousNotifiable::new().route(GOOGLE_CHAT_CHANNEL, "ops");
//! channel
//!     .send(&ops, &DeployFinished { service: "api".into() })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Routing
//!
//! The destination space is the first non-empty value of:
//!
//! 1. the message's own space ([`GoogleChatMessage::to`])
//! 2. the notifiable's `googleChat` route ([`Notifiable::route_notification_for`])
//! 3. the configured default space ([`GoogleChatConfig::space`])
//!
//! A space matching a configured alias resolves to the aliased webhook URL;
//! anything else is used as the webhook URL directly.
//!
//! # Configuration
//!
//! [`GoogleChatConfig::from_env`] reads:
//!
//! - `GOOGLE_CHAT_SPACE`: default space (alias or webhook URL)
//! - `GOOGLE_CHAT_SPACES`: JSON object mapping aliases to webhook URLs

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod notification;

pub use channels::google_chat::GoogleChatChannel;
pub use channels::NotifyChannel;
pub use config::GoogleChatConfig;
pub use error::{ConfigError, SendError};
pub use message::{Card, GoogleChatMessage};
pub use notification::{
    AnonymousNotifiable, Notifiable, Notification, ToGoogleChat, GOOGLE_CHAT_CHANNEL,
};
