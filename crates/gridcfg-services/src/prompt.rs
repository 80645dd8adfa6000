//! User interaction seams for the import flow.

use async_trait::async_trait;
use gridcfg_core::DomainModel;
use gridcfg_interchange::OverwriteDecision;

/// Questions asked during an import
#[async_trait]
pub trait ImportPrompt: Send + Sync {
    /// Yes/no confirmation
    async fn confirm(&self, message: &str) -> bool;

    /// Decision for a record that would overwrite an existing domain model
    async fn decide_overwrite(&self, model: &DomainModel, message: &str) -> OverwriteDecision;
}

/// One-way status messages
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);
}

/// Answers yes to everything and overwrites existing models
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl ImportPrompt for AutoConfirm {
    async fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "auto-confirmed");
        true
    }

    async fn decide_overwrite(&self, model: &DomainModel, _message: &str) -> OverwriteDecision {
        tracing::debug!(value_type = %model.value_type, "auto-overwrite");
        OverwriteDecision::Overwrite
    }
}

/// Sends notifications to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
