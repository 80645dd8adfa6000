//! HTTP client for the configuration console and its discovery agent.

use std::time::Duration;

use async_trait::async_trait;
use gridcfg_core::{
    BatchPersister, ConnectionPreset, DbTable, DomainListing, DomainModel, DomainRepository,
    GridcfgError, JdbcDriver, Result, SaveBatchResult, SchemaDiscoveryClient,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

const AGENT_DRIVERS: &str = "/api/v1/agent/drivers";
const AGENT_SCHEMAS: &str = "/api/v1/agent/schemas";
const AGENT_TABLES: &str = "/api/v1/agent/tables";
const DOMAINS_LIST: &str = "/api/v1/configuration/domains/list";
const DOMAINS_SAVE: &str = "/api/v1/configuration/domains/save";
const DOMAINS_SAVE_BATCH: &str = "/api/v1/configuration/domains/save/batch";
const DOMAINS_REMOVE: &str = "/api/v1/configuration/domains/remove";
const DOMAINS_REMOVE_ALL: &str = "/api/v1/configuration/domains/remove/all";
const DOMAINS_REMOVE_DEMO: &str = "/api/v1/configuration/domains/remove/demo";

#[derive(Serialize)]
struct RemoveRequest<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
}

/// JSON-over-HTTP client for the console API.
///
/// Every call is a POST. A non-2xx response fails with the response body as
/// the error message.
#[derive(Clone)]
pub struct HttpConsoleClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpConsoleClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                GridcfgError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<reqwest::Response, String>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(%url, "console request");

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(%url, %status, "console request failed");
        if text.trim().is_empty() {
            Err(format!("{status} from {url}"))
        } else {
            Err(text)
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: Option<&B>) -> std::result::Result<R, String>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(path, body)
            .await?
            .json::<R>()
            .await
            .map_err(|e| format!("Invalid response from {path}: {e}"))
    }

    async fn post_ignoring_body<B>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<(), String>
    where
        B: Serialize + ?Sized,
    {
        self.send(path, body).await.map(|_| ())
    }
}

#[async_trait]
impl SchemaDiscoveryClient for HttpConsoleClient {
    async fn list_drivers(&self) -> Result<Vec<JdbcDriver>> {
        self.post_json(AGENT_DRIVERS, None::<&()>)
            .await
            .map_err(GridcfgError::Discovery)
    }

    async fn list_schemas(&self, preset: &ConnectionPreset) -> Result<Vec<String>> {
        self.post_json(AGENT_SCHEMAS, Some(preset))
            .await
            .map_err(GridcfgError::Discovery)
    }

    async fn list_tables(&self, preset: &ConnectionPreset) -> Result<Vec<DbTable>> {
        self.post_json(AGENT_TABLES, Some(preset))
            .await
            .map_err(GridcfgError::Discovery)
    }
}

#[async_trait]
impl BatchPersister for HttpConsoleClient {
    async fn save_batch(&self, batch: &[DomainModel]) -> Result<SaveBatchResult> {
        self.post_json(DOMAINS_SAVE_BATCH, Some(batch))
            .await
            .map_err(GridcfgError::Persistence)
    }
}

#[async_trait]
impl DomainRepository for HttpConsoleClient {
    async fn list_existing(&self) -> Result<DomainListing> {
        self.post_json(DOMAINS_LIST, None::<&()>)
            .await
            .map_err(GridcfgError::Persistence)
    }

    async fn save_one(&self, model: &DomainModel) -> Result<SaveBatchResult> {
        self.post_json(DOMAINS_SAVE, Some(model))
            .await
            .map_err(GridcfgError::Persistence)
    }

    async fn remove_one(&self, id: &str) -> Result<()> {
        self.post_ignoring_body(DOMAINS_REMOVE, Some(&RemoveRequest { id }))
            .await
            .map_err(GridcfgError::Persistence)
    }

    async fn remove_all(&self) -> Result<()> {
        self.post_ignoring_body(DOMAINS_REMOVE_ALL, None::<&()>)
            .await
            .map_err(GridcfgError::Persistence)
    }

    async fn remove_demo(&self) -> Result<()> {
        self.post_ignoring_body(DOMAINS_REMOVE_DEMO, None::<&()>)
            .await
            .map_err(GridcfgError::Persistence)
    }
}
