//! Fire-and-forget audit trail. Recording an event can never fail the
//! operation that emitted it, so the trait is synchronous and infallible.

use serde_json::json;
use uuid::Uuid;

pub trait AuditSink: Send + Sync {
    fn record(&self, action: &str, subject_id: Uuid, details: Option<serde_json::Value>);
}

/// Default sink: structured JSON events on the `audit` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudit;

impl AuditSink for TracingAudit {
    fn record(&self, action: &str, subject_id: Uuid, details: Option<serde_json::Value>) {
        let event = json!({
            "action": action,
            "subjectId": subject_id,
            "details": details,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        tracing::info!(target: "audit", "{}", event);
    }
}
