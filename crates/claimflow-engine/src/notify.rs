//! Notifier seam
//!
//! Email rendering and delivery live outside this system. The workflow
//! only needs a collaborator with the contract `send(kind, payload,
//! recipient) -> status`: it never returns an error to the caller and
//! never blocks an operation's outcome. Delivery results surface in a
//! side-channel status field on the operation's receipt.

use async_trait::async_trait;
use serde::Serialize;

/// What the notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PolicyConfirmation,
    ClaimConfirmation,
    DecisionNotice,
}

/// Fields a notification template may use
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationPayload {
    /// Claim or policy reference quoted in the message
    pub reference: String,
    pub policy_number: Option<String>,
    pub claim_type: Option<String>,
    /// Amount in whole rupees, when relevant
    pub amount: Option<u64>,
    pub surveyor_name: Option<String>,
}

/// Delivery outcome, reported but never thrown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationStatus {
    /// Whether the notifier accepted the message
    pub delivered: bool,
    /// Delivery mode, e.g. "log", "disabled"
    pub mode: String,
}

impl NotificationStatus {
    /// Accepted by the given delivery mode
    #[inline]
    #[must_use]
    pub fn delivered(mode: impl Into<String>) -> Self {
        Self {
            delivered: true,
            mode: mode.into(),
        }
    }

    /// Not delivered; still a success from the workflow's point of view
    #[inline]
    #[must_use]
    pub fn skipped(mode: impl Into<String>) -> Self {
        Self {
            delivered: false,
            mode: mode.into(),
        }
    }
}

/// External notification collaborator.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver (or attempt to deliver) one notification. Implementations
    /// swallow their own failures and report them through the status.
    async fn send(
        &self,
        kind: NotificationKind,
        payload: &NotificationPayload,
        recipient: &str,
    ) -> NotificationStatus;
}

/// Notifier that writes to the tracing log. The default in development
/// and the fallback when no mail relay is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(
        &self,
        kind: NotificationKind,
        payload: &NotificationPayload,
        recipient: &str,
    ) -> NotificationStatus {
        tracing::info!(
            ?kind,
            recipient,
            reference = %payload.reference,
            "notification dispatched"
        );
        NotificationStatus::delivered("log")
    }
}

/// Notifier that drops everything. Used where notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(
        &self,
        _kind: NotificationKind,
        _payload: &NotificationPayload,
        _recipient: &str,
    ) -> NotificationStatus {
        NotificationStatus::skipped("disabled")
    }
}
