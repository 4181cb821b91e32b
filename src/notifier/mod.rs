mod telegram;
pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use thiserror::Error;

pub type MessageId = i64;

const NO_DESCRIPTION: &str = "no description";

/// Why a notification did not reach the chat. Never surfaced to callers of
/// the HTTP API, only logged.
#[derive(Error, Debug)]
pub enum DeliveryFailure {
    #[error("bot token or chat id is not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {}", .description.as_deref().unwrap_or(NO_DESCRIPTION))]
    Status {
        status: u16,
        description: Option<String>,
    },

    #[error("rejected by API: {}", .description.as_deref().unwrap_or(NO_DESCRIPTION))]
    Rejected { description: Option<String> },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Id of the sent message, when the API reports one.
    async fn try_notify(&self, text: &str) -> Result<Option<MessageId>, DeliveryFailure>;

    /// Delivery outcome as a flag. Failures are logged and swallowed so the
    /// caller's own request never fails because the chat is unreachable.
    async fn notify(&self, text: &str) -> bool {
        return match self.try_notify(text).await {
            Ok(message_id) => {
                tracing::debug!(message_id, "Notification delivered");
                true
            }
            Err(DeliveryFailure::NotConfigured) => {
                tracing::warn!("Skipping notification: {}", DeliveryFailure::NotConfigured);
                false
            }
            Err(e) => {
                tracing::warn!("Error sending notification: {e}");
                false
            }
        };
    }
}
