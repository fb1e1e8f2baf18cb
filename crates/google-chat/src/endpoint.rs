//! Webhook endpoint resolution.
//!
//! A message is routed to a *space*, taken from the first source in
//! [`SPACE_PRECEDENCE`] that yields a non-empty value. The space is then
//! looked up in the configured aliases; an unknown space is used verbatim
//! as the webhook URL.

use std::collections::HashMap;

use tracing::warn;

use crate::config::GoogleChatConfig;
use crate::message::GoogleChatMessage;
use crate::notification::{Notifiable, GOOGLE_CHAT_CHANNEL};

/// Query fragment appended to the endpoint for threaded messages.
///
/// Appended with `&`, so the endpoint is expected to already carry a query
/// string (Google Chat webhook URLs always include `?key=...&token=...`).
pub const THREAD_REPLY_QUERY: &str = "&messageReplyOption=REPLY_MESSAGE_FALLBACK_TO_NEW_THREAD";

/// Where a space can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceSource {
    /// `GoogleChatMessage::to`
    Message,
    /// `Notifiable::route_notification_for("googleChat")`
    Notifiable,
    /// `GoogleChatConfig::space`
    DefaultSpace,
}

/// Order in which space sources are consulted.
pub const SPACE_PRECEDENCE: [SpaceSource; 3] = [
    SpaceSource::Message,
    SpaceSource::Notifiable,
    SpaceSource::DefaultSpace,
];

impl SpaceSource {
    /// Space offered by this source, if non-empty.
    #[must_use]
    pub fn resolve(
        self,
        message: &GoogleChatMessage,
        notifiable: &dyn Notifiable,
        config: &GoogleChatConfig,
    ) -> Option<String> {
        let space = match self {
            Self::Message => message.space().map(str::to_string),
            Self::Notifiable => notifiable.route_notification_for(GOOGLE_CHAT_CHANNEL),
            Self::DefaultSpace => config.default_space().map(str::to_string),
        };
        space.filter(|s| !s.is_empty())
    }
}

/// Pick the space for `message`, returning it together with its source.
#[must_use]
pub fn resolve_space(
    message: &GoogleChatMessage,
    notifiable: &dyn Notifiable,
    config: &GoogleChatConfig,
) -> Option<(SpaceSource, String)> {
    SPACE_PRECEDENCE.iter().find_map(|source| {
        source
            .resolve(message, notifiable, config)
            .map(|space| (*source, space))
    })
}

/// Webhook URL registered under `alias`.
#[must_use]
pub fn lookup_alias<'a>(aliases: &'a HashMap<String, String>, alias: &str) -> Option<&'a str> {
    aliases.get(alias).map(String::as_str)
}

/// Resolve `space` to a webhook URL: the aliased URL, or `space` itself.
///
/// Returns `None` when the result is empty.
#[must_use]
pub fn resolve_endpoint(space: &str, config: &GoogleChatConfig) -> Option<String> {
    let endpoint = lookup_alias(&config.spaces, space).unwrap_or(space);
    if endpoint.is_empty() {
        None
    } else {
        Some(endpoint.to_string())
    }
}

/// Placeholder logged in place of a space that is a literal webhook URL.
pub const LITERAL_SPACE_LABEL: &str = "<webhook url>";

/// Name of `space` that is safe to log.
///
/// Webhook URLs carry `key` and `token` credentials, so only configured
/// aliases are logged verbatim.
#[must_use]
pub fn loggable_space<'a>(space: &'a str, config: &GoogleChatConfig) -> &'a str {
    if lookup_alias(&config.spaces, space).is_some() {
        space
    } else {
        LITERAL_SPACE_LABEL
    }
}

/// Append [`THREAD_REPLY_QUERY`] when `threaded` is set.
#[must_use]
pub fn apply_threading(mut endpoint: String, threaded: bool) -> String {
    if !threaded {
        return endpoint;
    }

    if !endpoint.contains('?') {
        warn!(
            channel = GOOGLE_CHAT_CHANNEL,
            "Threaded message endpoint has no query string; reply option appended with '&'"
        );
    }

    endpoint.push_str(THREAD_REPLY_QUERY);
    endpoint
}
