//! Audit trail as structured log events.
//!
//! Every security- or money-relevant action (login, cart mutation, quote
//! and order submission, admin changes) is recorded under the `audit`
//! tracing target so it can be routed to a dedicated sink by the
//! subscriber configuration.

use serde_json::Value;
use uuid::Uuid;

pub fn record(user_id: Option<Uuid>, action: &str, resource: Option<&str>, metadata: Option<Value>) {
    // The macro body shadows `Value` with a tracing trait, so the fallback
    // has to be resolved outside of it.
    let metadata = metadata.unwrap_or(Value::Null);
    tracing::info!(
        target: "audit",
        user_id = user_id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
        action,
        resource = resource.unwrap_or("-"),
        metadata = %metadata,
        "audit event"
    );
}
