//! Critical error alerting layer for tracing.
//!
//! Events at or above the configured level are forwarded, off the request
//! path, to an [`AlertSender`] (console or webhook).

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{Layer, layer::Context};

/// Alert message containing error details.
#[derive(Debug, Clone)]
pub struct AlertMessage {
    pub service: String,
    pub level: String,
    pub message: String,
    pub target: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub fields: Vec<(String, String)>,
}

/// Configuration for the alert layer.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Least severe level that triggers an alert (default: ERROR).
    pub min_level: Level,
    /// Channel buffer size. Alerts beyond it are dropped.
    pub buffer_size: usize,
    pub service_name: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            min_level: Level::ERROR,
            buffer_size: 100,
            service_name: "thinkspeak-api".to_string(),
        }
    }
}

/// Trait for alert senders - implement this for different backends.
#[async_trait::async_trait]
pub trait AlertSender: Send + Sync {
    async fn send(&self, alert: AlertMessage) -> Result<(), AlertError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("Failed to send alert: {0}")]
    SendError(String),
}

/// Console alert sender - writes alerts to stderr (for development).
pub struct ConsoleAlertSender;

#[async_trait::async_trait]
impl AlertSender for ConsoleAlertSender {
    async fn send(&self, alert: AlertMessage) -> Result<(), AlertError> {
        eprintln!(
            "\n[ALERT] {}\n\
             Level: {}\n\
             Target: {}\n\
             Message: {}\n\
             Time: {}\n",
            alert.service, alert.level, alert.target, alert.message, alert.timestamp
        );
        Ok(())
    }
}

/// Webhook alert sender - posts alerts to a webhook URL (Slack, Discord, etc.).
pub struct WebhookAlertSender {
    url: String,
    client: reqwest::Client,
}

impl WebhookAlertSender {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl AlertSender for WebhookAlertSender {
    async fn send(&self, alert: AlertMessage) -> Result<(), AlertError> {
        let fields: serde_json::Map<String, serde_json::Value> = alert
            .fields
            .into_iter()
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();
        let payload = serde_json::json!({
            "text": format!(
                "*{}* {}\n*Target:* {}\n*Message:* {}\n*Time:* {}",
                alert.service, alert.level, alert.target, alert.message, alert.timestamp
            ),
            "fields": fields,
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AlertError::SendError(e.to_string()))?;

        Ok(())
    }
}

/// Tracing layer that queues alerts for severe events.
pub struct AlertLayer {
    sender: mpsc::Sender<AlertMessage>,
    config: AlertConfig,
}

impl AlertLayer {
    /// Create a new alert layer. Must be called inside a tokio runtime.
    pub fn new(alert_sender: Arc<dyn AlertSender>, config: AlertConfig) -> Self {
        let (tx, mut rx) = mpsc::channel::<AlertMessage>(config.buffer_size.max(1));

        tokio::spawn(async move {
            while let Some(alert) = rx.recv().await {
                if let Err(e) = alert_sender.send(alert).await {
                    eprintln!("Failed to send alert: {}", e);
                }
            }
        });

        Self { sender: tx, config }
    }

    pub fn console(config: AlertConfig) -> Self {
        Self::new(Arc::new(ConsoleAlertSender), config)
    }

    pub fn webhook(url: String, config: AlertConfig) -> Self {
        Self::new(Arc::new(WebhookAlertSender::new(url)), config)
    }

    fn should_alert(&self, level: &Level) -> bool {
        // More verbose levels compare greater.
        *level <= self.config.min_level
    }
}

/// Visitor to extract fields from events.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

impl<S> Layer<S> for AlertLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.should_alert(metadata.level()) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let alert = AlertMessage {
            service: self.config.service_name.clone(),
            level: metadata.level().to_string(),
            message: visitor.message,
            target: metadata.target().to_string(),
            timestamp: chrono::Utc::now(),
            fields: visitor.fields,
        };

        // Never block the caller; a full buffer drops the alert.
        let _ = self.sender.try_send(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    struct ChannelSender(mpsc::UnboundedSender<AlertMessage>);

    #[async_trait::async_trait]
    impl AlertSender for ChannelSender {
        async fn send(&self, alert: AlertMessage) -> Result<(), AlertError> {
            self.0
                .send(alert)
                .map_err(|e| AlertError::SendError(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_only_severe_events_are_forwarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let layer = AlertLayer::new(
            Arc::new(ChannelSender(tx)),
            AlertConfig {
                service_name: "test".to_string(),
                ..AlertConfig::default()
            },
        );
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("just a warning");
            tracing::error!(post_id = 3, "store failure");
        });

        let alert = rx.recv().await.unwrap();
        assert_eq!(alert.service, "test");
        assert_eq!(alert.level, "ERROR");
        assert_eq!(alert.message, "store failure");
        assert_eq!(alert.fields, vec![("post_id".to_string(), "3".to_string())]);
        assert!(rx.try_recv().is_err());
    }
}
