//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use gridcfg_core::{
    BatchPersister, CacheRef, ClusterRef, ConnectionPreset, DbColumn, DbTable, DomainListing,
    DomainModel, DomainRepository, GridcfgError, JdbcDriver, Result, SaveBatchResult,
    SchemaDiscoveryClient, Space,
};
use gridcfg_interchange::OverwriteDecision;
use gridcfg_services::{ImportPrompt, Notifier};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

pub fn driver(jar: &str, class: &str) -> JdbcDriver {
    JdbcDriver {
        jdbc_driver_jar: jar.into(),
        jdbc_driver_class: class.into(),
    }
}

pub fn column(name: &str, jdbc_type: i32, nullable: bool, key: bool) -> DbColumn {
    DbColumn {
        name: name.into(),
        jdbc_type,
        nullable,
        key,
    }
}

pub fn table(schema: &str, name: &str, with_key: bool) -> DbTable {
    DbTable {
        schema: schema.into(),
        tbl: name.into(),
        cols: vec![
            column("ID", 4, false, with_key),
            column("NAME", 12, true, false),
        ],
        idxs: vec![],
    }
}

pub fn model(id: &str, value_type: &str) -> DomainModel {
    DomainModel {
        id: Some(id.into()),
        key_type: "java.lang.Integer".into(),
        value_type: value_type.into(),
        caches: vec![format!("cache-{id}")],
        ..Default::default()
    }
}

/// Mock discovery agent with canned responses.
///
/// `hang_on` makes the named call never complete, for cancellation tests.
pub struct MockAgent {
    pub drivers: Vec<JdbcDriver>,
    pub schemas: Vec<String>,
    pub tables: Vec<DbTable>,
    pub fail_on: Option<&'static str>,
    pub hang_on: Option<&'static str>,
    /// Log of calls with the schemas requested, for assertion in tests
    pub call_log: Arc<Mutex<Vec<String>>>,
    pub presets_seen: Arc<Mutex<Vec<ConnectionPreset>>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self {
            drivers: vec![
                driver("postgresql-42.jar", "org.postgresql.Driver"),
                driver("h2-1.4.jar", "org.h2.Driver"),
            ],
            schemas: vec!["PUBLIC".into()],
            tables: vec![table("PUBLIC", "CAR", true), table("PUBLIC", "PARKING", true)],
            fail_on: None,
            hang_on: None,
            call_log: Arc::new(Mutex::new(Vec::new())),
            presets_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_drivers(mut self, drivers: Vec<JdbcDriver>) -> Self {
        self.drivers = drivers;
        self
    }

    pub fn with_schemas(mut self, schemas: &[&str]) -> Self {
        self.schemas = schemas.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tables(mut self, tables: Vec<DbTable>) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_failure(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn with_hang(mut self, call: &'static str) -> Self {
        self.hang_on = Some(call);
        self
    }

    pub fn call_log(&self) -> Vec<String> {
        self.call_log.lock().clone()
    }

    async fn call<T: Clone>(&self, name: &'static str, value: &T) -> Result<T> {
        self.call_log.lock().push(name.to_string());

        if self.hang_on == Some(name) {
            std::future::pending::<()>().await;
        }
        if self.fail_on == Some(name) {
            return Err(GridcfgError::Discovery(format!("{name} failed")));
        }
        Ok(value.clone())
    }
}

#[async_trait]
impl SchemaDiscoveryClient for MockAgent {
    async fn list_drivers(&self) -> Result<Vec<JdbcDriver>> {
        self.call("drivers", &self.drivers).await
    }

    async fn list_schemas(&self, preset: &ConnectionPreset) -> Result<Vec<String>> {
        self.presets_seen.lock().push(preset.clone());
        self.call("schemas", &self.schemas).await
    }

    async fn list_tables(&self, preset: &ConnectionPreset) -> Result<Vec<DbTable>> {
        self.presets_seen.lock().push(preset.clone());
        let tables: Vec<DbTable> = self
            .tables
            .iter()
            .filter(|t| preset.schemas.is_empty() || preset.schemas.contains(&t.schema))
            .cloned()
            .collect();
        self.call("tables", &tables).await
    }
}

/// In-memory console that assigns ids on insert
pub struct MockRepository {
    pub listing: Mutex<DomainListing>,
    pub should_fail: bool,
    pub call_log: Arc<Mutex<Vec<String>>>,
    pub batches: Arc<Mutex<Vec<Vec<DomainModel>>>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            listing: Mutex::new(DomainListing {
                spaces: vec![Space {
                    id: "space-1".into(),
                    name: "Default".into(),
                }],
                clusters: vec![ClusterRef {
                    value: "cluster-1".into(),
                    label: "Cluster".into(),
                }],
                caches: vec![],
                metadatas: vec![],
            }),
            should_fail: false,
            call_log: Arc::new(Mutex::new(Vec::new())),
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_models(self, models: Vec<DomainModel>) -> Self {
        self.listing.lock().metadatas = models;
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub fn call_log(&self) -> Vec<String> {
        self.call_log.lock().clone()
    }

    pub fn batches(&self) -> Vec<Vec<DomainModel>> {
        self.batches.lock().clone()
    }

    fn record(&self, call: &str) -> Result<()> {
        self.call_log.lock().push(call.to_string());
        if self.should_fail {
            return Err(GridcfgError::Persistence(format!("{call} rejected")));
        }
        Ok(())
    }

    fn store(&self, mut model: DomainModel) -> DomainModel {
        let mut listing = self.listing.lock();
        model.confirm = false;
        model.skip = false;
        model.new_cache = None;

        match model
            .id
            .as_ref()
            .and_then(|id| listing.metadatas.iter().position(|m| m.id.as_ref() == Some(id)))
        {
            Some(idx) => listing.metadatas[idx] = model.clone(),
            None => {
                model.id = Some(uuid::Uuid::new_v4().to_string());
                listing.metadatas.push(model.clone());
            }
        }
        model
    }
}

#[async_trait]
impl BatchPersister for MockRepository {
    async fn save_batch(&self, batch: &[DomainModel]) -> Result<SaveBatchResult> {
        self.record("save_batch")?;
        self.batches.lock().push(batch.to_vec());

        let mut generated_caches = Vec::new();
        let mut saved_metas = Vec::new();
        for model in batch {
            if let Some(cache) = &model.new_cache {
                generated_caches.push(CacheRef {
                    value: uuid::Uuid::new_v4().to_string(),
                    label: cache.name.clone(),
                });
            }
            saved_metas.push(self.store(model.clone()));
        }

        Ok(SaveBatchResult {
            saved_metas,
            generated_caches,
        })
    }
}

#[async_trait]
impl DomainRepository for MockRepository {
    async fn list_existing(&self) -> Result<DomainListing> {
        self.record("list")?;
        Ok(self.listing.lock().clone())
    }

    async fn save_one(&self, model: &DomainModel) -> Result<SaveBatchResult> {
        self.record("save")?;
        Ok(SaveBatchResult {
            saved_metas: vec![self.store(model.clone())],
            generated_caches: vec![],
        })
    }

    async fn remove_one(&self, id: &str) -> Result<()> {
        self.record("remove")?;
        self.listing
            .lock()
            .metadatas
            .retain(|m| m.id.as_deref() != Some(id));
        Ok(())
    }

    async fn remove_all(&self) -> Result<()> {
        self.record("remove_all")?;
        self.listing.lock().metadatas.clear();
        Ok(())
    }

    async fn remove_demo(&self) -> Result<()> {
        self.record("remove_demo")?;
        self.listing.lock().metadatas.retain(|m| !m.demo);
        Ok(())
    }
}

/// Prompt with scripted answers. Overwrite decisions are consumed in order;
/// when the script runs out every candidate is overwritten.
pub struct ScriptedPrompt {
    pub confirm_answer: bool,
    /// Never answer, like a user who walked away
    pub hang: bool,
    pub decisions: Mutex<VecDeque<OverwriteDecision>>,
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self {
            confirm_answer: true,
            hang: false,
            decisions: Mutex::new(VecDeque::new()),
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn declining(mut self) -> Self {
        self.confirm_answer = false;
        self
    }

    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn with_decisions(self, decisions: &[OverwriteDecision]) -> Self {
        self.decisions.lock().extend(decisions.iter().copied());
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl ImportPrompt for ScriptedPrompt {
    async fn confirm(&self, message: &str) -> bool {
        self.messages.lock().push(message.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.confirm_answer
    }

    async fn decide_overwrite(&self, _model: &DomainModel, message: &str) -> OverwriteDecision {
        self.messages.lock().push(message.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.decisions
            .lock()
            .pop_front()
            .unwrap_or(OverwriteDecision::Overwrite)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub infos: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }
}
