mod slack;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{NotificationChannelType, NotificationConfig};

/// Final state of a watched job, handed to notification channels once the
/// execution reaches a terminal status.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub execution_id: String,
    pub name: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

impl JobOutcome {
    /// Whether the terminal status looks like a failure.
    pub fn failed(&self) -> bool {
        self.error_message.is_some()
            || matches!(self.status.as_deref(), Some("Failed") | Some("Error"))
    }
}

/// Trait for notification channel implementations (Slack, Discord, etc.)
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn notify(&self, outcome: JobOutcome) -> Result<()>;
}

/// Factory function to create a notifier based on config
pub fn create_notifier(config: &NotificationConfig) -> Option<Arc<dyn NotificationChannel>> {
    match &config.channel {
        NotificationChannelType::None => None,
        NotificationChannelType::Slack => {
            let webhook = config.slack_webhook.as_ref()?;
            if webhook.is_empty() {
                return None;
            }
            Some(Arc::new(slack::SlackNotifier::new(webhook.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_notifier_without_webhook() {
        let config = NotificationConfig {
            channel: NotificationChannelType::Slack,
            slack_webhook: None,
        };
        assert!(create_notifier(&config).is_none());

        let config = NotificationConfig {
            channel: NotificationChannelType::Slack,
            slack_webhook: Some(String::new()),
        };
        assert!(create_notifier(&config).is_none());
    }

    #[test]
    fn outcome_failure_detection() {
        let outcome = JobOutcome {
            execution_id: "EXEC-1".to_string(),
            name: None,
            status: Some("Successful".to_string()),
            error_message: None,
        };
        assert!(!outcome.failed());

        let outcome = JobOutcome {
            execution_id: "EXEC-1".to_string(),
            name: None,
            status: Some("Successful".to_string()),
            error_message: Some("step 3 timed out".to_string()),
        };
        assert!(outcome.failed());

        let outcome = JobOutcome {
            execution_id: "EXEC-1".to_string(),
            name: None,
            status: Some("Failed".to_string()),
            error_message: None,
        };
        assert!(outcome.failed());
    }
}
