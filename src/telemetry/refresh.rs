use std::time::SystemTime;

use tracing::{Level, event};
use uuid::Uuid;

use crate::session::RefreshOutcome;

/// Correlates the log events of one refresh cycle.
#[derive(Clone, Debug)]
pub struct RefreshTelemetry {
    attempt_id: Uuid,
    context: String,
}

impl RefreshTelemetry {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            context: context.into(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn emit_start(&self, url: &str, at: SystemTime) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            url,
            timestamp = ?at,
            "refresh.start"
        );
    }

    pub fn emit_join(&self) {
        event!(
            Level::DEBUG,
            attempt_id = %self.attempt_id,
            context = %self.context,
            "refresh.join"
        );
    }

    pub fn emit_outcome(&self, outcome: &RefreshOutcome, at: SystemTime) {
        match outcome {
            RefreshOutcome::Renewed => event!(
                Level::INFO,
                attempt_id = %self.attempt_id,
                context = %self.context,
                timestamp = ?at,
                "refresh.success"
            ),
            RefreshOutcome::Rejected(status) => event!(
                Level::ERROR,
                attempt_id = %self.attempt_id,
                context = %self.context,
                timestamp = ?at,
                status = status.as_u16(),
                "refresh.failure"
            ),
            RefreshOutcome::Unreachable(reason) => event!(
                Level::ERROR,
                attempt_id = %self.attempt_id,
                context = %self.context,
                timestamp = ?at,
                error = %reason,
                "refresh.failure"
            ),
        }
    }
}
