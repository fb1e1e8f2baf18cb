//! Notification channel implementations.

pub mod google_chat;

use async_trait::async_trait;

use crate::error::SendError;
use crate::notification::{Notifiable, Notification};

/// Trait the host notification framework drives channels through.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Routing key for this channel.
    fn name(&self) -> &'static str;

    /// Deliver `notification` to `notifiable` over this channel.
    async fn deliver(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<(), SendError>;
}
