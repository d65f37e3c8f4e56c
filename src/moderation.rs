//! Moderation gate: classifies user input before it reaches the pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;

/// A content-classification backend.
///
/// Returns `true` when the input is flagged as violating content policy.
#[async_trait]
pub trait ModerationProvider: Send + Sync {
    /// Classify raw user input. `Ok(true)` means flagged.
    async fn classify(&self, input: &str) -> Result<bool>;
}

/// Gates user input on a [`ModerationProvider`] verdict.
///
/// When the provider errors (network failure, service down), the gate falls
/// back to the configured policy. The default is fail-open — the input is
/// allowed — trading safety for availability so an outage never takes the
/// chat surface down with it. Fail-closed is available via
/// [`ChatConfig::fail_open_moderation`](crate::config::ChatConfig); the
/// default must not be changed silently.
pub struct ModerationGate {
    provider: Arc<dyn ModerationProvider>,
    fail_open: bool,
}

impl ModerationGate {
    /// Create a gate over the given provider.
    pub fn new(provider: Arc<dyn ModerationProvider>, fail_open: bool) -> Self {
        Self { provider, fail_open }
    }

    /// Check whether `input` may proceed to the answer pipeline.
    ///
    /// Returns `true` if the input is allowed. Provider errors resolve to the
    /// configured fail-open/fail-closed policy and are logged, never
    /// propagated.
    pub async fn check(&self, input: &str) -> bool {
        match self.provider.classify(input).await {
            Ok(flagged) => !flagged,
            Err(e) => {
                warn!(error = %e, fail_open = self.fail_open, "moderation check failed");
                self.fail_open
            }
        }
    }
}
