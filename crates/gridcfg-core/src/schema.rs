//! Shapes reported by the discovery agent and the trait used to query it.

use crate::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JDBC driver available to the agent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdbcDriver {
    pub jdbc_driver_jar: String,
    pub jdbc_driver_class: String,
}

/// Connection parameters sent to the agent for schema and table listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionPreset {
    pub db: String,
    pub jdbc_driver_jar: String,
    pub jdbc_driver_class: String,
    pub jdbc_url: String,
    pub user: String,
    pub password: String,
    pub tables_only: bool,
    pub schemas: Vec<String>,
}

/// Column metadata. `jdbc_type` is a `java.sql.Types` code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DbColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub jdbc_type: i32,
    pub nullable: bool,
    pub key: bool,
}

/// Index metadata. Field order is significant; the value is `true` for a
/// descending field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DbIndex {
    pub name: String,
    pub fields: IndexMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DbTable {
    pub schema: String,
    pub tbl: String,
    pub cols: Vec<DbColumn>,
    pub idxs: Vec<DbIndex>,
}

impl DbTable {
    pub fn has_primary_key(&self) -> bool {
        self.cols.iter().any(|col| col.key)
    }

    /// Display label in `schema.table` form
    pub fn label(&self) -> String {
        format!("{}.{}", self.schema, self.tbl)
    }
}

/// Remote agent operations used by the import wizard.
///
/// Errors are reported as [`GridcfgError::Discovery`](crate::GridcfgError::Discovery)
/// carrying the agent's message.
#[async_trait]
pub trait SchemaDiscoveryClient: Send + Sync {
    /// List JDBC drivers the agent can load
    async fn list_drivers(&self) -> Result<Vec<JdbcDriver>>;

    /// List schemas reachable with the given connection
    async fn list_schemas(&self, preset: &ConnectionPreset) -> Result<Vec<String>>;

    /// List tables of `preset.schemas` (all schemas when empty)
    async fn list_tables(&self, preset: &ConnectionPreset) -> Result<Vec<DbTable>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_wire_shape() {
        let json = r#"{
            "schema": "PUBLIC",
            "tbl": "CAR",
            "cols": [
                {"name": "ID", "type": 4, "nullable": false, "key": true},
                {"name": "NAME", "type": 12, "nullable": true, "key": false}
            ],
            "idxs": [{"name": "CAR_NAME", "fields": {"NAME": false, "ID": true}}]
        }"#;

        let table: DbTable = serde_json::from_str(json).unwrap();
        assert!(table.has_primary_key());
        assert_eq!(table.label(), "PUBLIC.CAR");
        assert_eq!(table.cols[1].jdbc_type, 12);

        let order: Vec<_> = table.idxs[0].fields.keys().cloned().collect();
        assert_eq!(order, vec!["NAME".to_string(), "ID".to_string()]);
    }

    #[test]
    fn test_table_without_key() {
        let table = DbTable {
            schema: "S".into(),
            tbl: "LOG".into(),
            cols: vec![DbColumn {
                name: "MSG".into(),
                jdbc_type: 12,
                nullable: true,
                key: false,
            }],
            idxs: vec![],
        };
        assert!(!table.has_primary_key());
    }

    #[test]
    fn test_preset_serializes_camel_case() {
        let preset = ConnectionPreset {
            jdbc_driver_class: "org.h2.Driver".into(),
            tables_only: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&preset).unwrap();
        assert_eq!(json["jdbcDriverClass"], "org.h2.Driver");
        assert_eq!(json["tablesOnly"], true);
    }
}
