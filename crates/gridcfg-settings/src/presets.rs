//! Built-in JDBC connection presets and the catalog that overlays remembered
//! values onto them.

use gridcfg_core::{ConnectionPreset, JdbcDriver};

use crate::{PresetStore, StoredPreset};

/// Driver class used for the demo database
pub const DEMO_DRIVER_CLASS: &str = "org.h2.Driver";

pub const DEMO_JDBC_URL: &str = "jdbc:h2:mem:demo-db";

/// (db, driver class, URL template, default user)
const BUILTIN_PRESETS: &[(&str, &str, &str, &str)] = &[
    (
        "oracle",
        "oracle.jdbc.OracleDriver",
        "jdbc:oracle:thin:@[host]:[port]:[database]",
        "system",
    ),
    (
        "db2",
        "com.ibm.db2.jcc.DB2Driver",
        "jdbc:db2://[host]:[port]/[database]",
        "db2admin",
    ),
    (
        "mssql",
        "com.microsoft.sqlserver.jdbc.SQLServerDriver",
        "jdbc:sqlserver://[host]:[port][;databaseName=database]",
        "sa",
    ),
    (
        "postgre",
        "org.postgresql.Driver",
        "jdbc:postgresql://[host]:[port]/[database]",
        "sa",
    ),
    (
        "mysql",
        "com.mysql.jdbc.Driver",
        "jdbc:mysql://[host]:[port]/[database]",
        "root",
    ),
    ("h2", "org.h2.Driver", "jdbc:h2:tcp://[host]/[database]", "sa"),
];

/// Connection used when importing from the bundled demo database
pub fn demo_connection() -> ConnectionPreset {
    ConnectionPreset {
        db: "H2".to_string(),
        jdbc_driver_class: DEMO_DRIVER_CLASS.to_string(),
        jdbc_url: DEMO_JDBC_URL.to_string(),
        user: "sa".to_string(),
        tables_only: true,
        ..Default::default()
    }
}

impl From<&ConnectionPreset> for StoredPreset {
    fn from(preset: &ConnectionPreset) -> Self {
        Self {
            jdbc_driver_class: preset.jdbc_driver_class.clone(),
            jdbc_url: preset.jdbc_url.clone(),
            user: preset.user.clone(),
        }
    }
}

/// Known connection presets, one per driver class
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCatalog {
    presets: Vec<ConnectionPreset>,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    pub fn builtin() -> Self {
        let presets = BUILTIN_PRESETS
            .iter()
            .map(|(db, class, url, user)| ConnectionPreset {
                db: db.to_string(),
                jdbc_driver_class: class.to_string(),
                jdbc_url: url.to_string(),
                user: user.to_string(),
                tables_only: true,
                ..Default::default()
            })
            .collect();
        Self { presets }
    }

    /// Built-in presets with remembered URL and user applied
    pub fn restore(store: &dyn PresetStore) -> Self {
        let mut catalog = Self::builtin();
        for preset in &mut catalog.presets {
            if let Some(stored) = store.get(&preset.jdbc_driver_class) {
                tracing::debug!(driver = %stored.jdbc_driver_class, "restored connection preset");
                preset.jdbc_url = stored.jdbc_url;
                preset.user = stored.user;
            }
        }
        catalog
    }

    pub fn presets(&self) -> &[ConnectionPreset] {
        &self.presets
    }

    /// Preset for the selected driver.
    ///
    /// Unknown drivers get a generic `jdbc:[database]` template with user `admin`.
    pub fn find(&self, driver: &JdbcDriver) -> ConnectionPreset {
        let mut preset = self
            .presets
            .iter()
            .find(|p| p.jdbc_driver_class == driver.jdbc_driver_class)
            .cloned()
            .unwrap_or_else(|| ConnectionPreset {
                db: "unknown".to_string(),
                jdbc_url: "jdbc:[database]".to_string(),
                user: "admin".to_string(),
                tables_only: true,
                ..Default::default()
            });

        preset.jdbc_driver_jar = driver.jdbc_driver_jar.clone();
        preset.jdbc_driver_class = driver.jdbc_driver_class.clone();
        preset
    }

    /// Save-or-update the preset in memory and in `store`.
    ///
    /// Store failures are logged and otherwise ignored so a broken preset file
    /// never blocks a connection.
    pub fn remember(&mut self, preset: &ConnectionPreset, store: &dyn PresetStore) {
        let mut remembered = preset.clone();
        remembered.password.clear();
        remembered.schemas.clear();

        match self
            .presets
            .iter_mut()
            .find(|p| p.jdbc_driver_class == preset.jdbc_driver_class)
        {
            Some(existing) => *existing = remembered,
            None => self.presets.push(remembered),
        }

        if let Err(e) = store.put(StoredPreset::from(preset)) {
            tracing::warn!(
                driver = %preset.jdbc_driver_class,
                "Failed to remember connection preset: {:#}",
                e
            );
        }
    }
}
