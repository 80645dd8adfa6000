//! Import session
//!
//! Runs the import wizard against the discovery agent and the console. Every
//! remote step is a single awaited call. The next step is requested only after
//! the previous one resolves, and every call races the session's
//! cancellation token so a closed wizard never applies a stale response.
//! User prompts race the token as well.

use std::future::Future;
use std::sync::Arc;

use gridcfg_core::{DomainModel, SchemaDiscoveryClient};
use gridcfg_interchange::{
    ConflictResolver, DomainImportOptions, DomainModelBuilder, IMPORTED_MESSAGE,
    INTERRUPTED_MESSAGE, ImportWizard, NO_DRIVERS_MESSAGE, NO_KEY_MESSAGE, OverwriteDecision,
    WizardError, WizardStep, overwrite_message,
};
use gridcfg_settings::{PresetCatalog, PresetStore};
use tokio_util::sync::CancellationToken;

use crate::domain_service::DomainService;
use crate::error::{ServiceError, ServiceResult};
use crate::prompt::{ImportPrompt, Notifier};

/// Result of a "next" request
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    /// The wizard moved to the given step
    Advanced(WizardStep),
    /// The options step finished the import
    Finished(ImportOutcome),
    /// The wizard was closed
    Cancelled,
}

/// How an import run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Saved {
        count: usize,
        selected: Option<DomainModel>,
    },
    /// Every record was skipped
    NothingToSave,
    /// The missing primary key warning was declined
    Declined,
    /// The user aborted on an overwrite prompt
    Interrupted,
}

pub struct ImportSession {
    discovery: Arc<dyn SchemaDiscoveryClient>,
    domains: Arc<DomainService>,
    preset_store: Arc<dyn PresetStore>,
    presets: PresetCatalog,
    prompt: Arc<dyn ImportPrompt>,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationToken,
    wizard: ImportWizard,
}

impl ImportSession {
    /// Creates a session. Remembered presets are restored from `preset_store`.
    pub fn new(
        discovery: Arc<dyn SchemaDiscoveryClient>,
        domains: Arc<DomainService>,
        preset_store: Arc<dyn PresetStore>,
        prompt: Arc<dyn ImportPrompt>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let presets = PresetCatalog::restore(preset_store.as_ref());
        Self {
            discovery,
            domains,
            preset_store,
            presets,
            prompt,
            notifier,
            cancel: CancellationToken::new(),
            wizard: ImportWizard::start(false, DomainImportOptions::default()),
        }
    }

    pub fn wizard(&self) -> &ImportWizard {
        &self.wizard
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    /// Token that closes the wizard when cancelled, usable from other tasks
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Starts a fresh wizard and loads the driver list.
    ///
    /// Generated caches go to all known clusters unless `options` names some.
    #[tracing::instrument(skip(self, options))]
    pub async fn start(
        &mut self,
        demo: bool,
        mut options: DomainImportOptions,
    ) -> ServiceResult<WizardStep> {
        if options.generated_caches_clusters.is_empty() {
            options.generated_caches_clusters = self.domains.generated_caches_clusters();
        }

        self.cancel = CancellationToken::new();
        self.wizard = ImportWizard::start(demo, options);

        let drivers = match self
            .race(async { self.discovery.list_drivers().await.map_err(ServiceError::discovery) })
            .await
        {
            Ok(drivers) => drivers,
            Err(e) => return Err(self.fail(e)),
        };

        tracing::debug!(count = drivers.len(), "drivers loaded");

        self.wizard = self.wizard.drivers_loaded(drivers, &self.presets)?;
        if self.wizard.step() == WizardStep::Failed {
            self.notifier.error(NO_DRIVERS_MESSAGE);
            return Err(ServiceError::NoDrivers);
        }

        Ok(self.wizard.step())
    }

    /// Applies a local transition such as a selection change
    pub fn update(
        &mut self,
        transition: impl FnOnce(&ImportWizard, &PresetCatalog) -> Result<ImportWizard, WizardError>,
    ) -> ServiceResult<WizardStep> {
        self.wizard = transition(&self.wizard, &self.presets)?;
        Ok(self.wizard.step())
    }

    /// Performs the wizard's "next" action for the current step
    #[tracing::instrument(skip(self), fields(step = %self.wizard.step()))]
    pub async fn next(&mut self) -> ServiceResult<NextOutcome> {
        let result = match self.wizard.step() {
            WizardStep::Connect if self.wizard.next_cancels() => {
                self.cancel();
                return Ok(NextOutcome::Cancelled);
            }
            WizardStep::Connect => self.load_schemas().await,
            WizardStep::Schemas => self.load_tables().await,
            WizardStep::Tables => {
                self.wizard = self.wizard.show_options()?;
                Ok(NextOutcome::Advanced(WizardStep::Options))
            }
            WizardStep::Options => self.save().await.map(NextOutcome::Finished),
            step => Err(WizardError::InvalidTransition {
                step,
                action: "continue",
            }
            .into()),
        };

        match result {
            Err(ServiceError::Cancelled) => {
                self.cancel();
                Ok(NextOutcome::Cancelled)
            }
            other => other,
        }
    }

    /// Steps back to the previous wizard step
    pub fn previous(&mut self) -> ServiceResult<WizardStep> {
        self.wizard = self.wizard.previous()?;
        Ok(self.wizard.step())
    }

    /// Closes the wizard. Any in-flight request is abandoned.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if let Ok(cancelled) = self.wizard.cancel() {
            tracing::debug!(step = %self.wizard.step(), "import cancelled");
            self.wizard = cancelled;
        }
    }

    async fn race<T>(&self, call: impl Future<Output = ServiceResult<T>>) -> ServiceResult<T> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(ServiceError::Cancelled),
            result = call => result,
        }
    }

    fn fail(&self, err: ServiceError) -> ServiceError {
        if !matches!(err, ServiceError::Cancelled) {
            self.notifier.error(&err.to_string());
        }
        err
    }

    async fn load_schemas(&mut self) -> ServiceResult<NextOutcome> {
        let request = self.wizard.schemas_request()?;

        if request.remember {
            self.presets
                .remember(&request.preset, self.preset_store.as_ref());
        }

        let schemas = self
            .race(async {
                self.discovery
                    .list_schemas(&request.preset)
                    .await
                    .map_err(ServiceError::discovery)
            })
            .await
            .map_err(|e| self.fail(e))?;

        tracing::debug!(count = schemas.len(), "schemas loaded");
        self.wizard = self.wizard.schemas_loaded(schemas)?;

        if self.wizard.schemas().is_empty() {
            return self.load_tables().await;
        }

        Ok(NextOutcome::Advanced(self.wizard.step()))
    }

    async fn load_tables(&mut self) -> ServiceResult<NextOutcome> {
        let preset = self.wizard.tables_request()?;

        let tables = self
            .race(async {
                self.discovery
                    .list_tables(&preset)
                    .await
                    .map_err(ServiceError::discovery)
            })
            .await
            .map_err(|e| self.fail(e))?;

        tracing::debug!(count = tables.len(), "tables loaded");
        self.wizard = self.wizard.tables_loaded(tables)?;
        Ok(NextOutcome::Advanced(self.wizard.step()))
    }

    /// build → confirm missing keys → resolve conflicts → decide → persist
    async fn save(&mut self) -> ServiceResult<ImportOutcome> {
        let existing = self.domains.models();
        let output = DomainModelBuilder::new(self.wizard.options())
            .with_space(self.domains.first_space_id())
            .build(self.wizard.selected_tables())?;

        if output.any_missing_key
            && !self
                .race(async { Ok(self.prompt.confirm(NO_KEY_MESSAGE).await) })
                .await?
        {
            tracing::info!("import declined: tables without primary key");
            return Ok(ImportOutcome::Declined);
        }

        let mut resolution = ConflictResolver::resolve(output.records, &existing);

        let candidates = resolution.candidates().to_vec();
        for idx in candidates {
            let record = &resolution.batch()[idx];
            let message = overwrite_message(record);
            let decision = self
                .race(async { Ok(self.prompt.decide_overwrite(record, &message).await) })
                .await?;
            resolution.apply(idx, decision);

            if decision == OverwriteDecision::Abort {
                self.notifier.error(INTERRUPTED_MESSAGE);
                return Ok(ImportOutcome::Interrupted);
            }
        }

        let batch = resolution.into_batch();
        if batch.is_empty() {
            self.wizard = self.wizard.complete()?;
            return Ok(ImportOutcome::NothingToSave);
        }

        let count = batch.len();
        let domains = Arc::clone(&self.domains);
        let selected = self
            .race(domains.import_batch(batch))
            .await
            .map_err(|e| self.fail(e))?;

        self.wizard = self.wizard.complete()?;
        self.notifier.info(IMPORTED_MESSAGE);
        Ok(ImportOutcome::Saved { count, selected })
    }
}
