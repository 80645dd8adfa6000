use gridcfg_core::{ConnectionPreset, DbTable, JdbcDriver};
use gridcfg_settings::{PresetCatalog, demo_connection};

use super::types::*;
use crate::builder::DomainImportOptions;

/// Value-typed import wizard state.
///
/// Every transition takes `&self` and returns the next state, so a rejected
/// call leaves the current state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportWizard {
    step: WizardStep,
    demo: bool,
    drivers: Vec<JdbcDriver>,
    selected_driver: Option<usize>,
    connection: ConnectionPreset,
    demo_available: bool,
    schemas: Vec<SchemaItem>,
    all_schemas_selected: bool,
    tables: Vec<TableItem>,
    all_tables_selected: bool,
    options: DomainImportOptions,
    failure: Option<&'static str>,
}

impl ImportWizard {
    /// Fresh wizard waiting for the driver list
    pub fn start(demo: bool, mut options: DomainImportOptions) -> Self {
        options.demo = demo;
        Self {
            step: WizardStep::Drivers,
            demo,
            drivers: Vec::new(),
            selected_driver: None,
            connection: ConnectionPreset::default(),
            demo_available: false,
            schemas: Vec::new(),
            all_schemas_selected: false,
            tables: Vec::new(),
            all_tables_selected: false,
            options,
            failure: None,
        }
    }

    fn expect_step(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> WizardError {
        WizardError::InvalidTransition {
            step: self.step,
            action,
        }
    }

    fn with_step(&self, step: WizardStep) -> Self {
        let mut next = self.clone();
        next.step = step;
        next
    }

    // ============ Transitions ============

    /// Applies the agent's driver list.
    ///
    /// An empty list ends the wizard in [`WizardStep::Failed`].
    pub fn drivers_loaded(
        &self,
        mut drivers: Vec<JdbcDriver>,
        presets: &PresetCatalog,
    ) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Drivers, "load drivers")?;

        if drivers.is_empty() {
            let mut next = self.with_step(WizardStep::Failed);
            next.failure = Some(NO_DRIVERS_MESSAGE);
            return Ok(next);
        }

        drivers.sort_by(|a, b| a.jdbc_driver_jar.cmp(&b.jdbc_driver_jar));

        let mut next = self.with_step(WizardStep::Connect);
        next.tables.clear();

        if self.demo {
            let mut connection = demo_connection();
            match drivers.iter().find(|d| d.jdbc_driver_jar.starts_with("h2")) {
                Some(h2) => {
                    connection.jdbc_driver_jar = h2.jdbc_driver_jar.clone();
                    next.demo_available = true;
                }
                None => {
                    tracing::warn!("no H2 driver available for demo import");
                    connection.db = "unknown".to_string();
                    next.demo_available = false;
                }
            }
            next.connection = connection;
        } else {
            next.connection = presets.find(&drivers[0]);
            next.selected_driver = Some(0);
        }

        next.drivers = drivers;
        Ok(next)
    }

    /// Selects a driver and loads its preset into the connection
    pub fn select_driver(&self, index: usize, presets: &PresetCatalog) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Connect, "select driver")?;
        if self.demo {
            return Err(self.invalid("select driver"));
        }

        let driver = self
            .drivers
            .get(index)
            .ok_or(WizardError::IndexOutOfRange { index })?;

        let mut next = self.clone();
        next.connection = presets.find(driver);
        next.selected_driver = Some(index);
        Ok(next)
    }

    /// Selects the driver with the given class
    pub fn select_driver_class(
        &self,
        jdbc_driver_class: &str,
        presets: &PresetCatalog,
    ) -> Result<Self, WizardError> {
        let index = self
            .drivers
            .iter()
            .position(|d| d.jdbc_driver_class == jdbc_driver_class)
            .ok_or_else(|| WizardError::UnknownItem {
                kind: "driver",
                name: jdbc_driver_class.to_string(),
            })?;
        self.select_driver(index, presets)
    }

    /// Edits the connection (URL, user, password) on the connect step
    pub fn update_connection(
        &self,
        edit: impl FnOnce(&mut ConnectionPreset),
    ) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Connect, "edit connection")?;
        if self.demo {
            return Err(self.invalid("edit connection"));
        }

        let mut next = self.clone();
        edit(&mut next.connection);
        Ok(next)
    }

    /// Request for the schema list, issued by "next" on the connect step
    pub fn schemas_request(&self) -> Result<SchemaRequest, WizardError> {
        self.expect_step(WizardStep::Connect, "load schemas")?;
        if self.next_cancels() {
            return Err(WizardError::DemoDriverUnavailable);
        }

        Ok(SchemaRequest {
            preset: self.connection.clone(),
            remember: !self.demo,
        })
    }

    /// Applies the schema list. All schemas start selected.
    pub fn schemas_loaded(&self, schemas: Vec<String>) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Connect, "show schemas")?;

        let mut next = self.with_step(WizardStep::Schemas);
        next.schemas = schemas
            .into_iter()
            .map(|name| SchemaItem {
                name,
                selected: true,
            })
            .collect();
        next.all_schemas_selected = !next.schemas.is_empty();
        Ok(next)
    }

    pub fn toggle_schema(&self, index: usize, selected: bool) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Schemas, "select schema")?;

        let mut next = self.clone();
        next.schemas
            .get_mut(index)
            .ok_or(WizardError::IndexOutOfRange { index })?
            .selected = selected;
        next.sync_schema_selection();
        Ok(next)
    }

    pub fn select_all_schemas(&self, selected: bool) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Schemas, "select schemas")?;

        let mut next = self.clone();
        next.schemas
            .iter_mut()
            .for_each(|schema| schema.selected = selected);
        next.sync_schema_selection();
        Ok(next)
    }

    /// Selects exactly the named schemas
    pub fn select_schemas_named(&self, names: &[String]) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Schemas, "select schemas")?;

        if let Some(missing) = names
            .iter()
            .find(|name| !self.schemas.iter().any(|s| &s.name == *name))
        {
            return Err(WizardError::UnknownItem {
                kind: "schema",
                name: missing.clone(),
            });
        }

        let mut next = self.clone();
        for schema in &mut next.schemas {
            schema.selected = names.contains(&schema.name);
        }
        next.sync_schema_selection();
        Ok(next)
    }

    fn sync_schema_selection(&mut self) {
        self.all_schemas_selected =
            !self.schemas.is_empty() && self.schemas.iter().all(|s| s.selected);
    }

    /// Request for the table list of the selected schemas
    pub fn tables_request(&self) -> Result<ConnectionPreset, WizardError> {
        self.expect_step(WizardStep::Schemas, "load tables")?;
        if !self.next_enabled() {
            return Err(WizardError::NextDisabled(self.next_tooltip()));
        }

        let mut preset = self.connection.clone();
        preset.schemas = self.selected_schemas().map(str::to_string).collect();
        Ok(preset)
    }

    /// Applies the table list. Tables with a primary key start selected.
    pub fn tables_loaded(&self, tables: Vec<DbTable>) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Schemas, "show tables")?;

        let mut next = self.with_step(WizardStep::Tables);
        next.tables = tables
            .into_iter()
            .map(|table| TableItem {
                selected: table.has_primary_key(),
                table,
            })
            .collect();
        next.sync_table_selection();
        Ok(next)
    }

    pub fn toggle_table(&self, index: usize, selected: bool) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Tables, "select table")?;

        let mut next = self.clone();
        next.tables
            .get_mut(index)
            .ok_or(WizardError::IndexOutOfRange { index })?
            .selected = selected;
        next.sync_table_selection();
        Ok(next)
    }

    pub fn select_all_tables(&self, selected: bool) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Tables, "select tables")?;

        let mut next = self.clone();
        next.tables.iter_mut().for_each(|t| t.selected = selected);
        next.sync_table_selection();
        Ok(next)
    }

    /// Selects exactly the tables with the given names. A name matches either
    /// the `schema.table` label or the bare table name.
    pub fn select_tables_named(&self, names: &[String]) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Tables, "select tables")?;

        let matches = |item: &TableItem, name: &str| item.label() == name || item.table.tbl == name;

        if let Some(missing) = names
            .iter()
            .find(|name| !self.tables.iter().any(|t| matches(t, name.as_str())))
        {
            return Err(WizardError::UnknownItem {
                kind: "table",
                name: missing.clone(),
            });
        }

        let mut next = self.clone();
        for item in &mut next.tables {
            item.selected = names.iter().any(|name| matches(&*item, name.as_str()));
        }
        next.sync_table_selection();
        Ok(next)
    }

    fn sync_table_selection(&mut self) {
        self.all_tables_selected =
            !self.tables.is_empty() && self.tables.iter().all(|t| t.selected);
    }

    pub fn show_options(&self) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Tables, "show options")?;
        if !self.next_enabled() {
            return Err(WizardError::NextDisabled(self.next_tooltip()));
        }
        Ok(self.with_step(WizardStep::Options))
    }

    /// Edits import options. The demo flag cannot be changed.
    pub fn update_options(
        &self,
        edit: impl FnOnce(&mut DomainImportOptions),
    ) -> Result<Self, WizardError> {
        if self.step.is_terminal() {
            return Err(self.invalid("edit options"));
        }

        let mut next = self.clone();
        edit(&mut next.options);
        next.options.demo = self.demo;
        Ok(next)
    }

    /// Marks the import as saved
    pub fn complete(&self) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Options, "save")?;
        Ok(self.with_step(WizardStep::Saved))
    }

    /// Steps back. `connect` is the floor.
    pub fn previous(&self) -> Result<Self, WizardError> {
        let step = match self.step {
            WizardStep::Options => WizardStep::Tables,
            WizardStep::Tables if !self.schemas.is_empty() => WizardStep::Schemas,
            WizardStep::Tables | WizardStep::Schemas => WizardStep::Connect,
            _ => return Err(self.invalid("go back")),
        };
        Ok(self.with_step(step))
    }

    pub fn cancel(&self) -> Result<Self, WizardError> {
        if self.step.is_terminal() {
            return Err(self.invalid("cancel"));
        }
        Ok(self.with_step(WizardStep::Cancelled))
    }

    // ============ Queries ============

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn drivers(&self) -> &[JdbcDriver] {
        &self.drivers
    }

    pub fn selected_driver(&self) -> Option<&JdbcDriver> {
        self.selected_driver.and_then(|idx| self.drivers.get(idx))
    }

    pub fn connection(&self) -> &ConnectionPreset {
        &self.connection
    }

    /// Demo import and no H2 driver: "next" on the connect step cancels
    pub fn next_cancels(&self) -> bool {
        self.step == WizardStep::Connect && self.demo && !self.demo_available
    }

    pub fn schemas(&self) -> &[SchemaItem] {
        &self.schemas
    }

    pub fn selected_schemas(&self) -> impl Iterator<Item = &str> {
        self.schemas
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name.as_str())
    }

    pub fn all_schemas_selected(&self) -> bool {
        self.all_schemas_selected
    }

    pub fn tables(&self) -> &[TableItem] {
        &self.tables
    }

    pub fn selected_tables(&self) -> impl Iterator<Item = &DbTable> {
        self.tables
            .iter()
            .filter(|t| t.selected)
            .map(|t| &t.table)
    }

    pub fn all_tables_selected(&self) -> bool {
        self.all_tables_selected
    }

    pub fn options(&self) -> &DomainImportOptions {
        &self.options
    }

    /// Failure message of a wizard that ended in [`WizardStep::Failed`]
    pub fn failure(&self) -> Option<&'static str> {
        self.failure
    }

    pub fn next_enabled(&self) -> bool {
        match self.step {
            WizardStep::Connect | WizardStep::Options => true,
            WizardStep::Schemas => {
                self.schemas.is_empty() || self.schemas.iter().any(|s| s.selected)
            }
            WizardStep::Tables => self.tables.iter().any(|t| t.selected),
            _ => false,
        }
    }

    pub fn button(&self) -> NextButton {
        if self.next_cancels() {
            NextButton::Cancel
        } else if self.step == WizardStep::Options {
            NextButton::Save
        } else {
            NextButton::Next
        }
    }

    pub fn info(&self) -> &'static str {
        match self.step {
            WizardStep::Connect => INFO_CONNECT_TO_DB,
            WizardStep::Schemas => INFO_SELECT_SCHEMAS,
            WizardStep::Tables => INFO_SELECT_TABLES,
            WizardStep::Options => INFO_SELECT_OPTIONS,
            _ => "",
        }
    }

    /// Text shown while the request issued by "next" is in flight
    pub fn loading_text(&self) -> &'static str {
        match self.step {
            WizardStep::Drivers => LOADING_JDBC_DRIVERS,
            WizardStep::Connect => LOADING_SCHEMAS,
            WizardStep::Schemas | WizardStep::Tables => LOADING_TABLES,
            WizardStep::Options => SAVING_DOMAINS,
            _ => "",
        }
    }

    pub fn next_tooltip(&self) -> &'static str {
        let enabled = self.next_enabled();
        match self.step {
            WizardStep::Connect if self.next_cancels() => {
                "Resolve issue with H2 database driver. Close this dialog and try again"
            }
            WizardStep::Connect if enabled => "Click to load list of schemas from database",
            WizardStep::Schemas if enabled => "Click to load list of tables from database",
            WizardStep::Schemas => "Select schemas to continue",
            WizardStep::Tables if enabled => "Click to show import options",
            WizardStep::Tables => "Select tables to continue",
            WizardStep::Options => "Click to import domain model for selected tables",
            _ => "Click to continue",
        }
    }

    pub fn prev_tooltip(&self) -> Option<&'static str> {
        match self.step {
            WizardStep::Schemas if self.demo => Some("Click to return on demo description step"),
            WizardStep::Schemas => Some("Click to return on connection configuration step"),
            WizardStep::Tables => Some("Click to return on schemas selection step"),
            WizardStep::Options => Some("Click to return on tables selection step"),
            _ => None,
        }
    }
}
