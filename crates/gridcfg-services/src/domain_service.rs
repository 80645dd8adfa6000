//! Domain model management service
//!
//! Keeps a [`DomainCatalog`] in sync with the console. The catalog is only
//! touched after the console confirms an operation, so a failed call leaves
//! it exactly as it was.

use std::sync::Arc;

use gridcfg_core::{DomainModel, DomainRepository, ValidationError};
use gridcfg_interchange::validation::{validate_domain_model, validate_java_class};
use parking_lot::RwLock;

use crate::catalog::DomainCatalog;
use crate::error::{ServiceError, ServiceResult};

pub const REMOVE_ALL_CONFIRM: &str = "Are you sure you want to remove all domain models?";
pub const REMOVE_DEMO_CONFIRM: &str =
    "Are you sure you want to remove all generated demo domain models and caches?";
pub const REMOVED_ALL_MESSAGE: &str = "All domain models have been removed";
pub const REMOVED_DEMO_MESSAGE: &str = "All demo domain models and caches have been removed";

pub fn remove_confirm_message(model: &DomainModel) -> String {
    format!(
        "Are you sure you want to remove domain model: \"{}\"?",
        model.value_type
    )
}

pub fn removed_message(model: &DomainModel) -> String {
    format!("Domain model has been removed: {}", model.value_type)
}

pub fn saved_message(model: &DomainModel) -> String {
    format!("Domain model \"{}\" saved.", model.value_type)
}

/// Service for loading, saving and removing domain models
pub struct DomainService {
    repository: Arc<dyn DomainRepository>,
    catalog: RwLock<DomainCatalog>,
}

impl DomainService {
    pub fn new(repository: Arc<dyn DomainRepository>) -> Self {
        Self {
            repository,
            catalog: RwLock::new(DomainCatalog::default()),
        }
    }

    /// Snapshot of the current catalog
    pub fn catalog(&self) -> DomainCatalog {
        self.catalog.read().clone()
    }

    pub fn models(&self) -> Vec<DomainModel> {
        self.catalog.read().models().to_vec()
    }

    pub fn first_space_id(&self) -> Option<String> {
        self.catalog.read().first_space_id().map(str::to_string)
    }

    pub fn generated_caches_clusters(&self) -> Vec<String> {
        self.catalog.read().generated_caches_clusters().to_vec()
    }

    pub fn set_generated_caches_clusters(&self, clusters: Vec<String>) {
        self.catalog.write().set_generated_caches_clusters(clusters);
    }

    pub fn has_demo_items(&self) -> bool {
        self.catalog.read().has_demo_items()
    }

    /// Load spaces, clusters, caches and domain models from the console.
    ///
    /// Replaces the whole catalog and resets generated-cache clusters to all
    /// clusters.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> ServiceResult<()> {
        let listing = self
            .repository
            .list_existing()
            .await
            .map_err(ServiceError::persistence)?;

        tracing::debug!(
            models = listing.metadatas.len(),
            clusters = listing.clusters.len(),
            "loaded domain models"
        );

        *self.catalog.write() = DomainCatalog::from_listing(listing);
        Ok(())
    }

    /// Validate and save a single domain model.
    ///
    /// The saved record replaces the catalog entry with the same id, or is
    /// appended when new.
    #[tracing::instrument(skip(self, model), fields(value_type = %model.value_type))]
    pub async fn save(&self, mut model: DomainModel) -> ServiceResult<DomainModel> {
        validate_domain_model(&model)?;
        model.kind = Some(model.kind());

        let result = self
            .repository
            .save_one(&model)
            .await
            .map_err(ServiceError::persistence)?;

        let saved = result.saved_metas.into_iter().next().ok_or_else(|| {
            ServiceError::PersistenceFailed("Console returned no saved domain model".into())
        })?;

        self.catalog.write().merge_saved(vec![saved.clone()]);
        tracing::info!(id = ?saved.id, "domain model saved");
        Ok(saved)
    }

    /// Save a copy of `source` under a new value type
    #[tracing::instrument(skip(self, source), fields(source = %source.value_type))]
    pub async fn clone_as(
        &self,
        source: &DomainModel,
        new_value_type: &str,
    ) -> ServiceResult<DomainModel> {
        validate_domain_model(source)?;
        validate_java_class("Value type", new_value_type, false, "valueType")?;

        if self
            .catalog
            .read()
            .find_by_value_type(new_value_type)
            .is_some()
        {
            return Err(ValidationError::new(
                "valueType",
                "Domain model with such name already exists!",
            )
            .into());
        }

        let mut copy = source.clone();
        copy.id = None;
        copy.demo = false;
        copy.value_type = new_value_type.to_string();

        self.save(copy).await
    }

    /// Remove a domain model by id
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> ServiceResult<DomainModel> {
        if self.catalog.read().find(id).is_none() {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.repository
            .remove_one(id)
            .await
            .map_err(ServiceError::persistence)?;

        self.catalog
            .write()
            .remove(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_all(&self) -> ServiceResult<()> {
        self.repository
            .remove_all()
            .await
            .map_err(ServiceError::persistence)?;

        self.catalog.write().clear_models();
        Ok(())
    }

    /// Remove generated demo models and caches, then reload the catalog
    #[tracing::instrument(skip(self))]
    pub async fn remove_demo(&self) -> ServiceResult<()> {
        self.repository
            .remove_demo()
            .await
            .map_err(ServiceError::persistence)?;

        self.load().await
    }

    /// Send an import batch and merge the result.
    ///
    /// An empty batch is not sent. Returns the record to select afterwards.
    #[tracing::instrument(skip(self, batch), fields(batch_size = batch.len()))]
    pub async fn import_batch(&self, batch: Vec<DomainModel>) -> ServiceResult<Option<DomainModel>> {
        if batch.is_empty() {
            tracing::debug!("empty import batch, nothing to save");
            return Ok(None);
        }

        let result = self
            .repository
            .save_batch(&batch)
            .await
            .map_err(ServiceError::persistence)?;

        tracing::info!(
            saved = result.saved_metas.len(),
            generated_caches = result.generated_caches.len(),
            "import batch saved"
        );

        let mut catalog = self.catalog.write();
        Ok(catalog.apply_batch_result(result).cloned())
    }
}
