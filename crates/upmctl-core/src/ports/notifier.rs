//! Notification port.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationResult};

/// Fans a notification out to external endpoints.
///
/// Implementations never fail: delivery problems are logged and reflected
/// in the returned [`NotificationResult`].
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// Send `notification` to every endpoint in `endpoints`.
    async fn notify(&self, endpoints: &[String], notification: &Notification)
    -> NotificationResult;
}

/// Notifier that never sends anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl NotifierPort for NoopNotifier {
    async fn notify(&self, _endpoints: &[String], _notification: &Notification) -> NotificationResult {
        NotificationResult::NotAttempted
    }
}
