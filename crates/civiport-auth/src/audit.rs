//! Default audit sink backed by structured tracing events.

use async_trait::async_trait;
use tracing::info;

use civiport_core::result::AppResult;
use civiport_entity::audit::AuditEvent;
use civiport_entity::store::AuditSink;

/// Emits audit events as structured log records under the `audit` target.
/// Deployments that ship events to an external collector subscribe to that
/// target; this core never stores or queries them.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    /// Creates the sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn emit(&self, event: AuditEvent) -> AppResult<()> {
        info!(
            target: "audit",
            actor_id = ?event.actor_id,
            email = event.email.as_deref().unwrap_or("-"),
            action = event.action.as_str(),
            details = %event
                .details
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            occurred_at = %event.occurred_at,
            "audit event"
        );
        Ok(())
    }
}
