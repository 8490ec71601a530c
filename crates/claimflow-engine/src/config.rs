//! Workflow configuration

use std::time::Duration;

/// Tunables for the claim workflow engine
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Delay between payment initiation and automatic settlement
    pub settlement_delay: Duration,
    /// Whether freshly registered policies activate immediately
    pub auto_approve_policies: bool,
    /// How many policy numbers to try before giving up on uniqueness
    pub policy_number_attempts: u32,
}

impl WorkflowConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a settlement delay
    #[inline]
    #[must_use]
    pub fn with_settlement_delay(mut self, delay: Duration) -> Self {
        self.settlement_delay = delay;
        self
    }

    /// With manual policy approval
    #[inline]
    #[must_use]
    pub fn with_manual_policy_approval(mut self) -> Self {
        self.auto_approve_policies = false;
        self
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            settlement_delay: Duration::from_secs(5),
            auto_approve_policies: true,
            policy_number_attempts: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides() {
        let config = WorkflowConfig::new()
            .with_settlement_delay(Duration::from_millis(10))
            .with_manual_policy_approval();
        assert_eq!(config.settlement_delay, Duration::from_millis(10));
        assert!(!config.auto_approve_policies);
    }
}
