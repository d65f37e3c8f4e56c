//! Outbound notification capability.
//!
//! External chat/LMS integrations are represented only as a capability seam:
//! implement [`Notifier`] against a real messaging API when one exists. The
//! crate ships [`LogNotifier`], which writes a structured log line and is the
//! stand-in used in development.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;

/// The outbound channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// An Intercom-style in-app messenger.
    Intercom,
    /// A WhatsApp phone number.
    Whatsapp,
    /// A learning-management-system dashboard.
    Lms,
}

impl Channel {
    fn as_str(self) -> &'static str {
        match self {
            Channel::Intercom => "intercom",
            Channel::Whatsapp => "whatsapp",
            Channel::Lms => "lms",
        }
    }
}

/// Sends a message to a recipient over an external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` to `recipient` on `channel`.
    async fn notify(&self, channel: Channel, recipient: &str, message: &str) -> Result<()>;
}

/// A [`Notifier`] that logs instead of delivering.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, channel: Channel, recipient: &str, message: &str) -> Result<()> {
        info!(channel = channel.as_str(), recipient, message, "notification");
        Ok(())
    }
}
