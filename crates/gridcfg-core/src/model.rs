use serde::{Deserialize, Serialize};

/// Index kinds supported by the grid's SQL engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexType {
    #[default]
    Sorted,
    Fulltext,
    Geospatial,
}

impl IndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::Sorted => "SORTED",
            IndexType::Fulltext => "FULLTEXT",
            IndexType::Geospatial => "GEOSPATIAL",
        }
    }
}

/// How query metadata is declared for a domain model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryMetadata {
    Annotations,
    #[default]
    Configuration,
}

/// What a domain model is used for, computed on save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Query,
    Store,
    Both,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Query => write!(f, "query"),
            ModelKind::Store => write!(f, "store"),
            ModelKind::Both => write!(f, "both"),
        }
    }
}

/// Queryable projection of a column
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryField {
    pub name: String,
    pub class_name: String,
}

/// Column mapped into the key or value part of a cache entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DbField {
    pub database_field_name: String,
    pub database_field_type: String,
    pub java_field_name: String,
    pub java_field_type: String,
}

/// Field reference inside an index. `direction` is true for ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexField {
    pub name: String,
    pub direction: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexDefinition {
    pub name: String,
    pub index_type: IndexType,
    pub fields: Vec<IndexField>,
}

/// Request to auto-generate a cache for an imported domain model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCacheRequest {
    pub name: String,
    pub clusters: Vec<String>,
    pub demo: bool,
}

/// A persisted key/value type definition with its query and store mapping.
///
/// A record without `id` has never been saved. Saving it inserts a new record
/// on the console; saving a record with `id` updates the existing one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainModel {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    pub caches: Vec<String>,
    pub key_type: String,
    pub value_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_table: Option<String>,
    pub fields: Vec<QueryField>,
    pub key_fields: Vec<DbField>,
    pub value_fields: Vec<DbField>,
    pub indexes: Vec<IndexDefinition>,
    pub query_metadata: QueryMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ModelKind>,
    #[serde(skip_serializing_if = "is_false")]
    pub demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_cache: Option<NewCacheRequest>,
    #[serde(skip_serializing_if = "is_false")]
    pub confirm: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub skip: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl DomainModel {
    /// Whether query fields or indexes are declared through configuration
    pub fn is_configured_for_query(&self) -> bool {
        self.query_metadata == QueryMetadata::Configuration
            && (!self.fields.is_empty() || !self.indexes.is_empty())
    }

    /// Whether the model carries a mapping onto a physical table
    pub fn is_configured_for_store(&self) -> bool {
        self.database_schema.as_deref().is_some_and(|s| !s.is_empty())
            || self.database_table.as_deref().is_some_and(|t| !t.is_empty())
            || !self.key_fields.is_empty()
            || !self.value_fields.is_empty()
    }

    pub fn kind(&self) -> ModelKind {
        match (self.is_configured_for_query(), self.is_configured_for_store()) {
            (true, true) => ModelKind::Both,
            (false, true) => ModelKind::Store,
            _ => ModelKind::Query,
        }
    }

    /// Number of columns mapped across key and value fields
    pub fn mapped_column_count(&self) -> usize {
        self.key_fields.len() + self.value_fields.len()
    }
}
