//! Long-lived in-memory collection of domain models and related console data.

use gridcfg_core::{CacheRef, ClusterRef, DomainListing, DomainModel, SaveBatchResult, Space};

/// Domain models, spaces, clusters and caches as last loaded from the console.
///
/// Only updated after the console confirms a change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomainCatalog {
    spaces: Vec<Space>,
    clusters: Vec<ClusterRef>,
    caches: Vec<CacheRef>,
    metadatas: Vec<DomainModel>,
    /// Clusters assigned to caches generated on import
    generated_caches_clusters: Vec<String>,
}

impl DomainCatalog {
    pub fn from_listing(listing: DomainListing) -> Self {
        let generated_caches_clusters = listing.clusters.iter().map(|c| c.value.clone()).collect();
        Self {
            spaces: listing.spaces,
            clusters: listing.clusters,
            caches: listing.caches,
            metadatas: listing.metadatas,
            generated_caches_clusters,
        }
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn first_space_id(&self) -> Option<&str> {
        self.spaces.first().map(|s| s.id.as_str())
    }

    pub fn clusters(&self) -> &[ClusterRef] {
        &self.clusters
    }

    pub fn caches(&self) -> &[CacheRef] {
        &self.caches
    }

    pub fn models(&self) -> &[DomainModel] {
        &self.metadatas
    }

    pub fn generated_caches_clusters(&self) -> &[String] {
        &self.generated_caches_clusters
    }

    pub fn set_generated_caches_clusters(&mut self, clusters: Vec<String>) {
        self.generated_caches_clusters = clusters;
    }

    pub fn find(&self, id: &str) -> Option<&DomainModel> {
        self.metadatas.iter().find(|m| m.id.as_deref() == Some(id))
    }

    pub fn find_by_value_type(&self, value_type: &str) -> Option<&DomainModel> {
        self.metadatas.iter().find(|m| m.value_type == value_type)
    }

    pub fn has_demo_items(&self) -> bool {
        self.metadatas.iter().any(|m| m.demo)
    }

    /// Models mapped to a table but without key fields
    pub fn models_missing_keys(&self) -> impl Iterator<Item = &DomainModel> {
        self.metadatas
            .iter()
            .filter(|m| m.is_configured_for_store() && m.key_fields.is_empty())
    }

    /// Merges saved records by id: existing ones are replaced in place, new
    /// ones appended in the order received. Returns the position of the last
    /// saved record.
    pub fn merge_saved(&mut self, saved: Vec<DomainModel>) -> Option<usize> {
        let mut last = None;
        let mut appended = Vec::new();

        for record in saved {
            let existing = record.id.as_ref().and_then(|id| {
                self.metadatas
                    .iter()
                    .position(|m| m.id.as_ref() == Some(id))
            });

            match existing {
                Some(idx) => {
                    self.metadatas[idx] = record;
                    last = Some(Position::Existing(idx));
                }
                None => {
                    appended.push(record);
                    last = Some(Position::Appended(appended.len() - 1));
                }
            }
        }

        let base = self.metadatas.len();
        self.metadatas.extend(appended);

        last.map(|pos| match pos {
            Position::Existing(idx) => idx,
            Position::Appended(offset) => base + offset,
        })
    }

    /// Applies a batch save: generated caches are appended and saved records
    /// merged. Returns the record to select afterwards: the last saved one,
    /// or the first record when nothing was saved.
    pub fn apply_batch_result(&mut self, result: SaveBatchResult) -> Option<&DomainModel> {
        self.caches.extend(result.generated_caches);
        let last = self.merge_saved(result.saved_metas);
        self.select_after_save(last)
    }

    pub fn select_after_save(&self, last_saved: Option<usize>) -> Option<&DomainModel> {
        last_saved
            .and_then(|idx| self.metadatas.get(idx))
            .or_else(|| self.metadatas.first())
    }

    pub fn remove(&mut self, id: &str) -> Option<DomainModel> {
        let idx = self
            .metadatas
            .iter()
            .position(|m| m.id.as_deref() == Some(id))?;
        Some(self.metadatas.remove(idx))
    }

    pub fn clear_models(&mut self) {
        self.metadatas.clear();
    }
}

enum Position {
    Existing(usize),
    Appended(usize),
}
