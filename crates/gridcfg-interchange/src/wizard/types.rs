//! Import wizard steps, selection items and status texts.

use gridcfg_core::{ConnectionPreset, DbTable};
use thiserror::Error;

pub const INFO_CONNECT_TO_DB: &str = "Configure connection to database";
pub const INFO_SELECT_SCHEMAS: &str = "Select schemas to load tables from";
pub const INFO_SELECT_TABLES: &str = "Select tables to import as domain models";
pub const INFO_SELECT_OPTIONS: &str = "Select import domain models options";

pub const LOADING_JDBC_DRIVERS: &str = "Loading JDBC drivers...";
pub const LOADING_SCHEMAS: &str = "Loading schemas...";
pub const LOADING_TABLES: &str = "Loading tables...";
pub const SAVING_DOMAINS: &str = "Saving domain models...";

pub const NO_DRIVERS_MESSAGE: &str = "JDBC drivers not found!";
pub const NO_KEY_MESSAGE: &str = "Some tables have no primary key. You will need to configure key type and key fields for such tables after import complete.";
pub const IMPORTED_MESSAGE: &str = "Domain models imported from database.";

/// Import wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Waiting for the list of JDBC drivers
    Drivers,
    Connect,
    Schemas,
    Tables,
    Options,
    Saved,
    Cancelled,
    /// No drivers available
    Failed,
}

impl WizardStep {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Drivers => "drivers",
            Self::Connect => "connect",
            Self::Schemas => "schemas",
            Self::Tables => "tables",
            Self::Options => "options",
            Self::Saved => "saved",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Saved | Self::Cancelled | Self::Failed)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Label of the wizard's forward button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NextButton {
    #[default]
    Next,
    Save,
    /// Demo import without an H2 driver: the button closes the wizard
    Cancel,
}

impl NextButton {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Save => "Save",
            Self::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaItem {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableItem {
    pub table: DbTable,
    pub selected: bool,
}

impl TableItem {
    pub fn label(&self) -> String {
        self.table.label()
    }
}

/// Schema listing request produced when leaving the connect step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRequest {
    pub preset: ConnectionPreset,
    /// Whether the connection should be remembered as a preset first
    pub remember: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Cannot {action} in {step} step")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },

    #[error("{0}")]
    NextDisabled(&'static str),

    #[error("Resolve issue with H2 database driver. Close this dialog and try again")]
    DemoDriverUnavailable,

    #[error("Index {index} is out of range")]
    IndexOutOfRange { index: usize },

    #[error("Unknown {kind}: {name}")]
    UnknownItem { kind: &'static str, name: String },
}
