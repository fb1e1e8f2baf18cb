//! Notification-side abstractions the channel consumes.
//!
//! The host notification framework owns delivery; this module only names
//! the capabilities the Google Chat channel needs from it.

use std::collections::HashMap;

use crate::message::GoogleChatMessage;

/// Routing key used to ask a notifiable for its Google Chat destination.
pub const GOOGLE_CHAT_CHANNEL: &str = "googleChat";

/// A recipient of notifications.
pub trait Notifiable: Send + Sync {
    /// Routing value for `channel` (a space alias or webhook URL).
    fn route_notification_for(&self, _channel: &str) -> Option<String> {
        None
    }
}

/// Renders a notification as a Google Chat message.
pub trait ToGoogleChat: Send + Sync {
    fn to_google_chat(&self, notifiable: &dyn Notifiable) -> GoogleChatMessage;
}

/// A notification that may be delivered over several channels.
///
/// Notifications that can be sent to Google Chat return themselves from
/// [`Notification::as_google_chat`]:
///
/// ```
/// use google_chat_notify::{GoogleChatMessage, Notifiable, Notification, ToGoogleChat};
///
/// struct InvoicePaid;
///
/// impl ToGoogleChat for InvoicePaid {
///     fn to_google_chat(&self, _notifiable: &dyn Notifiable) -> GoogleChatMessage {
///         GoogleChatMessage::new().text("Invoice paid")
///     }
/// }
///
/// impl Notification for InvoicePaid {
///     fn as_google_chat(&self) -> Option<&dyn ToGoogleChat> {
///         Some(self)
///     }
/// }
/// ```
pub trait Notification: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Google Chat rendering capability, if this notification has one.
    fn as_google_chat(&self) -> Option<&dyn ToGoogleChat> {
        None
    }
}

/// A notifiable with no identity of its own, routed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymousNotifiable {
    routes: HashMap<String, String>,
}

impl AnonymousNotifiable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a routing value for `channel`.
    #[must_use]
    pub fn route(mut self, channel: impl Into<String>, route: impl Into<String>) -> Self {
        self.routes.insert(channel.into(), route.into());
        self
    }
}

impl Notifiable for AnonymousNotifiable {
    fn route_notification_for(&self, channel: &str) -> Option<String> {
        self.routes.get(channel).cloned()
    }
}
