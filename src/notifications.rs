//! Email notifications.
//!
//! A small template registry and a simulated delivery service. Delivery is
//! best-effort everywhere it is used: callers log a failure and carry on,
//! so a quote or order never fails because the mail gateway did. Accepted
//! sends land in an in-process outbox that the admin dashboard (and the
//! tests) can inspect.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

pub struct EmailTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub subject: &'static str,
    /// Variables the subject and body require; a send without all of them
    /// is rejected.
    pub variables: &'static [&'static str],
}

pub const TEMPLATES: &[EmailTemplate] = &[
    EmailTemplate {
        id: "order-confirmation",
        name: "Order Confirmation",
        subject: "Order Confirmation - {{orderNumber}} | All Tanks Limited",
        variables: &["customerName", "orderNumber", "orderDate", "orderTotal"],
    },
    EmailTemplate {
        id: "quote-ready",
        name: "Quote Ready",
        subject: "Your Quote is Ready - {{quoteNumber}} | All Tanks Limited",
        variables: &[
            "customerName",
            "quoteNumber",
            "quoteDate",
            "expiryDate",
            "quoteTotal",
        ],
    },
    EmailTemplate {
        id: "order-status-update",
        name: "Order Status Update",
        subject: "Order Update - {{orderNumber}} is now {{orderStatus}} | All Tanks Limited",
        variables: &["customerName", "orderNumber", "orderStatus"],
    },
];

pub fn template(id: &str) -> Option<&'static EmailTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Interpolate `{{name}}` placeholders from the variable map.
fn render(text: &str, variables: &BTreeMap<String, String>) -> String {
    let mut out = text.to_string();
    for (key, value) in variables {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationRequest {
    pub to: String,
    pub template_id: String,
    pub variables: BTreeMap<String, String>,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("unknown email template: {0}")]
    UnknownTemplate(String),
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),
    #[error("missing template variable: {0}")]
    MissingVariable(&'static str),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SentEmail {
    pub message_id: String,
    pub to: String,
    pub template_id: String,
    pub subject: String,
    pub priority: Priority,
    pub sent_at: DateTime<Utc>,
}

/// Simulated email gateway. A production deployment would put a real
/// provider behind the same `send` signature; retry-with-backoff belongs
/// there, not in the callers.
pub struct EmailService {
    outbox: Mutex<Vec<SentEmail>>,
    gateway_down: bool,
}

impl EmailService {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            gateway_down: false,
        }
    }

    /// A service whose gateway rejects every delivery. Used to exercise
    /// the fire-and-forget paths.
    pub fn failing() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            gateway_down: true,
        }
    }

    pub fn send(&self, request: NotificationRequest) -> Result<SentEmail, NotifyError> {
        if !request.to.contains('@') {
            return Err(NotifyError::InvalidRecipient(request.to));
        }
        let template = template(&request.template_id)
            .ok_or_else(|| NotifyError::UnknownTemplate(request.template_id.clone()))?;
        for required in template.variables {
            if !request.variables.contains_key(*required) {
                return Err(NotifyError::MissingVariable(required));
            }
        }
        if self.gateway_down {
            return Err(NotifyError::Delivery("email gateway unavailable".into()));
        }

        let sent = SentEmail {
            message_id: format!("msg-{}", Uuid::new_v4()),
            to: request.to,
            template_id: template.id.to_string(),
            subject: render(template.subject, &request.variables),
            priority: request.priority,
            sent_at: Utc::now(),
        };
        tracing::info!(
            to = %sent.to,
            template = %sent.template_id,
            subject = %sent.subject,
            "email queued"
        );

        let mut outbox = self.outbox.lock().expect("outbox lock poisoned");
        outbox.push(sent.clone());
        Ok(sent)
    }

    pub fn outbox(&self) -> Vec<SentEmail> {
        self.outbox.lock().expect("outbox lock poisoned").clone()
    }

    pub fn outbox_len(&self) -> usize {
        self.outbox.lock().expect("outbox lock poisoned").len()
    }
}

impl Default for EmailService {
    fn default() -> Self {
        Self::new()
    }
}

/// Fire-and-forget delivery: spawn the send and log any failure.
pub fn send_detached(service: std::sync::Arc<EmailService>, request: NotificationRequest) {
    tokio::spawn(async move {
        if let Err(err) = service.send(request) {
            tracing::warn!(error = %err, "notification delivery failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_vars() -> BTreeMap<String, String> {
        [
            ("customerName", "John Smith"),
            ("quoteNumber", "ATL-123456"),
            ("quoteDate", "1/1/2026"),
            ("expiryDate", "31/1/2026"),
            ("quoteTotal", "1,794"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn send_renders_subject_and_records_outbox() {
        let service = EmailService::new();
        let sent = service
            .send(NotificationRequest {
                to: "john@example.com".into(),
                template_id: "quote-ready".into(),
                variables: quote_vars(),
                priority: Priority::Normal,
            })
            .expect("send");

        assert_eq!(
            sent.subject,
            "Your Quote is Ready - ATL-123456 | All Tanks Limited"
        );
        assert_eq!(service.outbox_len(), 1);
    }

    #[test]
    fn missing_variable_is_rejected() {
        let service = EmailService::new();
        let mut vars = quote_vars();
        vars.remove("expiryDate");

        let err = service
            .send(NotificationRequest {
                to: "john@example.com".into(),
                template_id: "quote-ready".into(),
                variables: vars,
                priority: Priority::Normal,
            })
            .unwrap_err();
        assert!(matches!(err, NotifyError::MissingVariable("expiryDate")));
        assert_eq!(service.outbox_len(), 0);
    }

    #[test]
    fn failing_gateway_reports_delivery_error() {
        let service = EmailService::failing();
        let err = service
            .send(NotificationRequest {
                to: "john@example.com".into(),
                template_id: "quote-ready".into(),
                variables: quote_vars(),
                priority: Priority::High,
            })
            .unwrap_err();
        assert!(matches!(err, NotifyError::Delivery(_)));
        assert_eq!(service.outbox_len(), 0);
    }

    #[test]
    fn bad_recipient_and_unknown_template_are_rejected() {
        let service = EmailService::new();
        assert!(
            service
                .send(NotificationRequest {
                    to: "not-an-address".into(),
                    template_id: "quote-ready".into(),
                    variables: quote_vars(),
                    priority: Priority::Normal,
                })
                .is_err()
        );
        assert!(
            service
                .send(NotificationRequest {
                    to: "john@example.com".into(),
                    template_id: "carrier-pigeon".into(),
                    variables: quote_vars(),
                    priority: Priority::Normal,
                })
                .is_err()
        );
    }
}
