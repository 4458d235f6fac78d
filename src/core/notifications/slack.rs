use super::{JobOutcome, NotificationChannel};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

pub struct SlackNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    fn format_message(&self, outcome: &JobOutcome) -> serde_json::Value {
        let header = if outcome.failed() {
            "Job Failed"
        } else {
            "Job Finished"
        };
        let short_id = &outcome.execution_id[..8.min(outcome.execution_id.len())];

        let mut blocks = vec![
            json!({
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": header,
                    "emoji": true
                }
            }),
            json!({
                "type": "section",
                "fields": [
                    {
                        "type": "mrkdwn",
                        "text": format!("*Job:*\n{}", outcome.name.as_deref().unwrap_or("(unnamed)"))
                    },
                    {
                        "type": "mrkdwn",
                        "text": format!("*Execution:*\n`{}`", short_id)
                    },
                    {
                        "type": "mrkdwn",
                        "text": format!("*Status:*\n{}", outcome.status.as_deref().unwrap_or("-"))
                    }
                ]
            }),
        ];

        if let Some(error) = &outcome.error_message {
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Error:*\n```{}```", error)
                }
            }));
        }

        json!({ "blocks": blocks })
    }
}

#[async_trait]
impl NotificationChannel for SlackNotifier {
    async fn notify(&self, outcome: JobOutcome) -> Result<()> {
        let payload = self.format_message(&outcome);
        self.client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;
        Ok(())
    }
}
