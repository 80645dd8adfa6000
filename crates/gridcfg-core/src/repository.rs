//! Console-side persistence of domain models.

use crate::{DomainModel, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Space {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Cluster reference as listed by the console
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterRef {
    pub value: String,
    pub label: String,
}

/// Cache reference as listed by the console, also returned for generated caches
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheRef {
    pub value: String,
    pub label: String,
}

/// Everything the domain model screen needs on load
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainListing {
    pub spaces: Vec<Space>,
    pub clusters: Vec<ClusterRef>,
    pub caches: Vec<CacheRef>,
    pub metadatas: Vec<DomainModel>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveBatchResult {
    pub saved_metas: Vec<DomainModel>,
    pub generated_caches: Vec<CacheRef>,
}

/// Saves a batch of domain models.
///
/// Records without `id` are inserted and come back with one; records with
/// `id` replace the stored record.
#[async_trait]
pub trait BatchPersister: Send + Sync {
    async fn save_batch(&self, batch: &[DomainModel]) -> Result<SaveBatchResult>;
}

/// Full set of console operations on domain models.
///
/// Errors are reported as [`GridcfgError::Persistence`](crate::GridcfgError::Persistence).
#[async_trait]
pub trait DomainRepository: BatchPersister {
    async fn list_existing(&self) -> Result<DomainListing>;

    async fn save_one(&self, model: &DomainModel) -> Result<SaveBatchResult>;

    async fn remove_one(&self, id: &str) -> Result<()>;

    async fn remove_all(&self) -> Result<()>;

    async fn remove_demo(&self) -> Result<()>;
}
