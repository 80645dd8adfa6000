//! Detection of name collisions between newly built and existing records.

use gridcfg_core::DomainModel;
use std::collections::HashMap;

/// Reported when the user aborts on an overwrite prompt
pub const INTERRUPTED_MESSAGE: &str = "Importing of domain models interrupted by user.";

/// Per-item answer to an overwrite prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    Overwrite,
    Skip,
    /// Stop the whole import without saving anything
    Abort,
}

/// Prompt text for an overwrite candidate
pub fn overwrite_message(model: &DomainModel) -> String {
    let name = model
        .database_table
        .as_deref()
        .unwrap_or(model.value_type.as_str());
    format!(
        "Domain model with name \"{name}\" already exist. Are you sure you want to overwrite it?"
    )
}

pub struct ConflictResolver;

impl ConflictResolver {
    /// Matches built records against existing ones by value type.
    ///
    /// A match carries forward the existing `id` and `caches` and marks the
    /// record as an overwrite candidate. When several existing records share a
    /// value type the first one in collection order wins.
    pub fn resolve(built: Vec<DomainModel>, existing: &[DomainModel]) -> ConflictResolution {
        let mut by_value_type: HashMap<&str, &DomainModel> = HashMap::with_capacity(existing.len());
        for model in existing {
            by_value_type
                .entry(model.value_type.as_str())
                .or_insert(model);
        }

        let mut to_confirm = Vec::new();
        let batch = built
            .into_iter()
            .enumerate()
            .map(|(idx, mut record)| {
                record.skip = false;
                match by_value_type.get(record.value_type.as_str()) {
                    Some(found) => {
                        record.id = found.id.clone();
                        record.caches = found.caches.clone();
                        record.confirm = true;
                        to_confirm.push(idx);
                    }
                    None => {
                        record.id = None;
                        record.confirm = false;
                    }
                }
                record
            })
            .collect();

        tracing::debug!(candidates = to_confirm.len(), "resolved import conflicts");

        ConflictResolution {
            batch,
            to_confirm,
            aborted: false,
        }
    }
}

/// Batch with overwrite candidates awaiting per-item decisions
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictResolution {
    batch: Vec<DomainModel>,
    to_confirm: Vec<usize>,
    aborted: bool,
}

impl ConflictResolution {
    pub fn batch(&self) -> &[DomainModel] {
        &self.batch
    }

    pub fn has_candidates(&self) -> bool {
        !self.to_confirm.is_empty()
    }

    /// Batch positions of overwrite candidates, in batch order
    pub fn candidates(&self) -> &[usize] {
        &self.to_confirm
    }

    pub fn candidate_records(&self) -> impl Iterator<Item = (usize, &DomainModel)> {
        self.to_confirm.iter().map(|&idx| (idx, &self.batch[idx]))
    }

    /// Records the decision for the candidate at batch position `index`.
    ///
    /// Returns false when `index` is not an overwrite candidate.
    pub fn apply(&mut self, index: usize, decision: OverwriteDecision) -> bool {
        if !self.to_confirm.contains(&index) {
            return false;
        }

        match decision {
            OverwriteDecision::Overwrite => self.batch[index].skip = false,
            OverwriteDecision::Skip => self.batch[index].skip = true,
            OverwriteDecision::Abort => self.aborted = true,
        }
        true
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Records to send, without skipped ones
    pub fn into_batch(self) -> Vec<DomainModel> {
        self.batch.into_iter().filter(|record| !record.skip).collect()
    }
}
