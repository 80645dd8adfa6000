//! Command implementations

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, bail};
use comfy_table::{Table, presets::UTF8_FULL};
use gridcfg_core::DomainModel;
use gridcfg_interchange::{DomainImportOptions, WizardStep, default_package_for_email};
use gridcfg_services::{
    DomainService, HttpConsoleClient, ImportOutcome, ImportPrompt, ImportSession, NextOutcome,
    Notifier, REMOVE_ALL_CONFIRM, REMOVE_DEMO_CONFIRM, REMOVED_ALL_MESSAGE, REMOVED_DEMO_MESSAGE,
    remove_confirm_message, removed_message,
};
use gridcfg_settings::{
    GridcfgSettings, ImportDefaults, JsonPresetStore, MemoryPresetStore, PresetStore,
};

use crate::ImportArgs;

/// Everything a command needs to talk to the console and the user
pub struct Context {
    pub client: HttpConsoleClient,
    pub settings: GridcfgSettings,
    pub prompt: Arc<dyn ImportPrompt>,
    pub notifier: Arc<dyn Notifier>,
}

impl Context {
    pub fn new(
        settings: GridcfgSettings,
        server: Option<String>,
        prompt: Arc<dyn ImportPrompt>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let url = server.unwrap_or_else(|| settings.server.url.clone());
        let timeout = Duration::from_secs(settings.server.request_timeout_secs);
        let client = HttpConsoleClient::new(url, timeout)?;

        Ok(Self {
            client,
            settings,
            prompt,
            notifier,
        })
    }

    async fn domains(&self) -> anyhow::Result<Arc<DomainService>> {
        let domains = Arc::new(DomainService::new(Arc::new(self.client.clone())));
        domains.load().await.with_context(|| {
            format!(
                "Failed to load domain models from {}",
                self.client.base_url()
            )
        })?;
        Ok(domains)
    }
}

// ============ list ============

pub async fn list(ctx: &Context, missing_keys: bool) -> anyhow::Result<()> {
    let domains = ctx.domains().await?;
    let catalog = domains.catalog();

    let models: Vec<&DomainModel> = if missing_keys {
        catalog.models_missing_keys().collect()
    } else {
        catalog.models().iter().collect()
    };

    if models.is_empty() {
        println!("No domain models");
        return Ok(());
    }

    println!("{}", models_table(&models));
    Ok(())
}

fn models_table(models: &[&DomainModel]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Id", "Value type", "Key type", "Kind", "Table", "Caches", "Demo"]);

    for model in models {
        let location = match (&model.database_schema, &model.database_table) {
            (Some(schema), Some(table)) => format!("{schema}.{table}"),
            (None, Some(table)) => table.clone(),
            _ => String::new(),
        };

        table.add_row(vec![
            model.id.clone().unwrap_or_default(),
            model.value_type.clone(),
            model.key_type.clone(),
            model.kind().to_string(),
            location,
            model.caches.len().to_string(),
            if model.demo { "yes" } else { "" }.to_string(),
        ]);
    }

    table
}

// ============ import ============

/// Import options from command-line flags over the saved defaults.
///
/// The package falls back to the saved default, then to one derived from the
/// user's email.
pub fn import_options(args: &ImportArgs, defaults: &ImportDefaults) -> DomainImportOptions {
    let package = args
        .package
        .clone()
        .or_else(|| Some(defaults.package_name.clone()).filter(|p| !p.trim().is_empty()))
        .or_else(|| defaults.user_email.as_deref().map(default_package_for_email))
        .unwrap_or_default();

    let mut options = DomainImportOptions::from_defaults(defaults, package);
    if args.no_primitives {
        options.use_primitives = false;
    }
    if args.no_built_in_keys {
        options.built_in_keys = false;
    }
    if args.no_caches {
        options.generate_caches = false;
    }
    if !args.clusters.is_empty() {
        options.generated_caches_clusters = args.clusters.clone();
    }
    options
}

/// The opened preset file, or an in-memory store when it is unavailable
fn preset_store_or_memory(opened: anyhow::Result<JsonPresetStore>) -> Arc<dyn PresetStore> {
    match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("Connection presets will not be saved: {:#}", e);
            Arc::new(MemoryPresetStore::new())
        }
    }
}

#[tracing::instrument(skip(ctx, args), fields(demo = args.demo))]
pub async fn import(ctx: &Context, args: &ImportArgs) -> anyhow::Result<()> {
    let domains = ctx.domains().await?;
    let preset_store = preset_store_or_memory(JsonPresetStore::open_default());

    let mut session = ImportSession::new(
        Arc::new(ctx.client.clone()),
        domains,
        preset_store,
        ctx.prompt.clone(),
        ctx.notifier.clone(),
    );

    session
        .start(args.demo, import_options(args, &ctx.settings.import))
        .await?;

    if let Some(class) = &args.driver_class {
        session.update(|wizard, presets| wizard.select_driver_class(class, presets))?;
    }

    if args.jdbc_url.is_some() || args.user.is_some() || args.password.is_some() {
        session.update(|wizard, _| {
            wizard.update_connection(|connection| {
                if let Some(url) = &args.jdbc_url {
                    connection.jdbc_url = url.clone();
                }
                if let Some(user) = &args.user {
                    connection.user = user.clone();
                }
                if let Some(password) = &args.password {
                    connection.password = password.clone();
                }
            })
        })?;
    }

    if session.wizard().next_cancels() {
        bail!("{}", session.wizard().next_tooltip());
    }

    let connection = session.wizard().connection();
    tracing::info!(db = %connection.db, url = %connection.jdbc_url, "connecting");

    let token = session.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let result = drive(&mut session, args).await;
    interrupt.abort();

    report(result?);
    Ok(())
}

async fn drive(session: &mut ImportSession, args: &ImportArgs) -> anyhow::Result<ImportOutcome> {
    loop {
        eprintln!("{}", session.wizard().loading_text());

        match session.next().await? {
            NextOutcome::Advanced(WizardStep::Schemas) => {
                if !args.schemas.is_empty() {
                    session.update(|wizard, _| wizard.select_schemas_named(&args.schemas))?;
                }
                let selected: Vec<_> = session.wizard().selected_schemas().collect();
                eprintln!("Schemas: {}", selected.join(", "));
            }
            NextOutcome::Advanced(WizardStep::Tables) => {
                if !args.tables.is_empty() {
                    session.update(|wizard, _| wizard.select_tables_named(&args.tables))?;
                } else if args.all_tables {
                    session.update(|wizard, _| wizard.select_all_tables(true))?;
                }
                let wizard = session.wizard();
                eprintln!(
                    "Selected {} of {} tables",
                    wizard.selected_tables().count(),
                    wizard.tables().len()
                );
            }
            NextOutcome::Advanced(step) => {
                tracing::debug!(%step, "wizard advanced");
            }
            NextOutcome::Finished(outcome) => return Ok(outcome),
            NextOutcome::Cancelled => bail!("Import cancelled"),
        }
    }
}

fn report(outcome: ImportOutcome) {
    match outcome {
        ImportOutcome::Saved { count, selected } => {
            println!("Imported {count} domain model(s)");
            if let Some(model) = selected {
                println!("Last saved: {}", model.value_type);
            }
        }
        ImportOutcome::NothingToSave => {
            println!("All domain models were skipped, nothing saved")
        }
        ImportOutcome::Declined => println!("Import declined, nothing saved"),
        ImportOutcome::Interrupted => println!("Import interrupted, nothing saved"),
    }
}

// ============ remove ============

pub async fn remove(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let domains = ctx.domains().await?;

    let catalog = domains.catalog();
    if let Some(model) = catalog.find(id) {
        if !ctx.prompt.confirm(&remove_confirm_message(model)).await {
            return Ok(());
        }
    }

    let removed = domains.remove(id).await?;
    ctx.notifier.info(&removed_message(&removed));
    Ok(())
}

pub async fn remove_all(ctx: &Context) -> anyhow::Result<()> {
    let domains = ctx.domains().await?;

    if !ctx.prompt.confirm(REMOVE_ALL_CONFIRM).await {
        return Ok(());
    }

    domains.remove_all().await?;
    ctx.notifier.info(REMOVED_ALL_MESSAGE);
    Ok(())
}

pub async fn remove_demo(ctx: &Context) -> anyhow::Result<()> {
    let domains = ctx.domains().await?;

    if !domains.has_demo_items() {
        println!("No demo domain models");
        return Ok(());
    }

    if !ctx.prompt.confirm(REMOVE_DEMO_CONFIRM).await {
        return Ok(());
    }

    domains.remove_demo().await?;
    ctx.notifier.info(REMOVED_DEMO_MESSAGE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcfg_settings::StoredPreset;
    use pretty_assertions::assert_eq;

    fn args() -> ImportArgs {
        ImportArgs {
            demo: false,
            driver_class: None,
            jdbc_url: None,
            user: None,
            password: None,
            schemas: vec![],
            tables: vec![],
            all_tables: false,
            package: None,
            no_primitives: false,
            no_built_in_keys: false,
            no_caches: false,
            clusters: vec![],
        }
    }

    #[test]
    fn test_package_from_flag() {
        let options = import_options(
            &ImportArgs {
                package: Some("org.shop".into()),
                ..args()
            },
            &ImportDefaults::default(),
        );
        assert_eq!(options.package_name, "org.shop");
    }

    #[test]
    fn test_package_from_email() {
        let defaults = ImportDefaults {
            user_email: Some("jane@corp.com".into()),
            ..Default::default()
        };
        let options = import_options(&args(), &defaults);
        assert_eq!(options.package_name, "com.corp.jane.model");
    }

    #[test]
    fn test_saved_package_wins_over_email() {
        let defaults = ImportDefaults {
            package_name: "org.saved".into(),
            user_email: Some("jane@corp.com".into()),
            ..Default::default()
        };
        let options = import_options(&args(), &defaults);
        assert_eq!(options.package_name, "org.saved");
    }

    #[test]
    fn test_flags_override_defaults() {
        let options = import_options(
            &ImportArgs {
                no_primitives: true,
                no_caches: true,
                clusters: vec!["c1".into()],
                ..args()
            },
            &ImportDefaults::default(),
        );
        assert!(!options.use_primitives);
        assert!(options.built_in_keys);
        assert!(!options.generate_caches);
        assert_eq!(options.generated_caches_clusters, vec!["c1"]);
    }

    #[test]
    fn test_unavailable_preset_file_falls_back_to_memory() {
        let store = preset_store_or_memory(Err(anyhow::anyhow!("no data directory")));
        assert_eq!(store.get("org.h2.Driver"), None);

        store
            .put(StoredPreset {
                jdbc_driver_class: "org.h2.Driver".into(),
                jdbc_url: "jdbc:h2:mem:test".into(),
                user: "sa".into(),
            })
            .unwrap();
        assert_eq!(
            store.get("org.h2.Driver").map(|p| p.jdbc_url),
            Some("jdbc:h2:mem:test".to_string())
        );
    }

    #[test]
    fn test_models_table_lists_models() {
        let model = DomainModel {
            id: Some("42".into()),
            key_type: "java.lang.Integer".into(),
            value_type: "com.corp.Car".into(),
            database_schema: Some("PUBLIC".into()),
            database_table: Some("CAR".into()),
            demo: true,
            ..Default::default()
        };

        let rendered = models_table(&[&model]).to_string();
        assert!(rendered.contains("com.corp.Car"));
        assert!(rendered.contains("PUBLIC.CAR"));
        assert!(rendered.contains("store"));
    }
}
