//! Derivation of domain model records from selected tables.

use gridcfg_core::{
    DbField, DbTable, DomainModel, IndexDefinition, IndexField, IndexType, NewCacheRequest,
    QueryField, QueryMetadata, ValidationError,
};
use gridcfg_settings::ImportDefaults;
use std::collections::HashSet;

use crate::naming::{to_class_name, to_field_name, to_package_name};
use crate::type_mapping::{JavaTypeMapping, JdbcTypeMapper, TypeMapper};
use crate::validation::validate_package_name;

/// Package used for models imported from the demo database
pub const DEMO_PACKAGE: &str = "org.apache.ignite.console.demo.model";

static JDBC_TYPE_MAPPER: JdbcTypeMapper = JdbcTypeMapper;

/// Options chosen on the last step of the import wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainImportOptions {
    pub package_name: String,
    /// Use primitive Java types for non-nullable columns
    pub use_primitives: bool,
    /// Use the column's Java type as key type for single-column keys
    pub built_in_keys: bool,
    pub generate_caches: bool,
    pub generated_caches_clusters: Vec<String>,
    pub demo: bool,
}

impl Default for DomainImportOptions {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            use_primitives: true,
            built_in_keys: true,
            generate_caches: true,
            generated_caches_clusters: Vec::new(),
            demo: false,
        }
    }
}

impl DomainImportOptions {
    pub fn from_defaults(defaults: &ImportDefaults, package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            use_primitives: defaults.use_primitives,
            built_in_keys: defaults.built_in_keys,
            generate_caches: defaults.generate_caches,
            ..Default::default()
        }
    }

    /// Package actually used for generated types
    pub fn effective_package(&self) -> &str {
        if self.demo {
            DEMO_PACKAGE
        } else {
            &self.package_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildOutput {
    pub records: Vec<DomainModel>,
    /// Some selected table has no primary key column
    pub any_missing_key: bool,
}

/// Builds domain model records from table metadata
pub struct DomainModelBuilder<'a> {
    options: &'a DomainImportOptions,
    mapper: &'a dyn TypeMapper,
    space: Option<String>,
}

impl<'a> DomainModelBuilder<'a> {
    pub fn new(options: &'a DomainImportOptions) -> Self {
        Self {
            options,
            mapper: &JDBC_TYPE_MAPPER,
            space: None,
        }
    }

    pub fn with_mapper(mut self, mapper: &'a dyn TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Space assigned to every built record
    pub fn with_space(mut self, space: Option<String>) -> Self {
        self.space = space;
        self
    }

    /// Builds one record per table, in input order.
    ///
    /// A table whose class name was already produced earlier in the batch gets
    /// a `_n` suffix on its key and value types, where `n` counts duplicates
    /// across the whole batch.
    pub fn build<'t>(
        &self,
        tables: impl IntoIterator<Item = &'t DbTable>,
    ) -> Result<BuildOutput, ValidationError> {
        let package = self.options.effective_package();
        validate_package_name(package)?;
        let package = to_package_name(package);

        let mut output = BuildOutput::default();
        let mut seen_classes: HashSet<String> = HashSet::new();
        let mut dup_count = 0usize;

        for table in tables {
            let suffix = if seen_classes.insert(to_class_name(&table.tbl)) {
                String::new()
            } else {
                dup_count += 1;
                format!("_{dup_count}")
            };

            let record = self.build_record(table, &package, &suffix);
            if record.key_fields.is_empty() {
                tracing::debug!(table = %table.label(), "table has no primary key");
                output.any_missing_key = true;
            }
            output.records.push(record);
        }

        tracing::debug!(
            records = output.records.len(),
            duplicates = dup_count,
            any_missing_key = output.any_missing_key,
            "built domain models"
        );

        Ok(output)
    }

    fn db_field(&self, name: &str, mapping: &JavaTypeMapping, nullable: bool) -> DbField {
        let java_field_type = match mapping.primitive_type {
            Some(primitive) if self.options.use_primitives && !nullable => primitive,
            _ => mapping.java_type,
        };

        DbField {
            database_field_name: name.to_string(),
            database_field_type: mapping.db_name.to_string(),
            java_field_name: to_field_name(name),
            java_field_type: java_field_type.to_string(),
        }
    }

    fn build_record(&self, table: &DbTable, package: &str, suffix: &str) -> DomainModel {
        let type_name = to_class_name(&table.tbl);
        let value_type = format!("{package}.{type_name}");

        let mut fields = Vec::with_capacity(table.cols.len());
        let mut key_fields = Vec::new();
        let mut value_fields = Vec::new();
        let mut key_mappings = Vec::new();

        for col in &table.cols {
            let mapping = self.mapper.map_or_fallback(col.jdbc_type);

            fields.push(QueryField {
                name: to_field_name(&col.name),
                class_name: mapping.java_type.to_string(),
            });

            let field = self.db_field(&col.name, &mapping, col.nullable);
            if col.key {
                key_fields.push(field);
                key_mappings.push(mapping);
            } else {
                value_fields.push(field);
            }
        }

        let indexes = table
            .idxs
            .iter()
            .map(|idx| IndexDefinition {
                name: idx.name.clone(),
                index_type: IndexType::Sorted,
                fields: idx
                    .fields
                    .iter()
                    .map(|(field_name, descending)| IndexField {
                        name: to_field_name(field_name),
                        direction: !descending,
                    })
                    .collect(),
            })
            .collect();

        let key_type = match key_mappings.as_slice() {
            [single] if self.options.built_in_keys => single.java_type.to_string(),
            _ => format!("{value_type}Key{suffix}"),
        };

        let new_cache = self.options.generate_caches.then(|| NewCacheRequest {
            name: format!("{type_name}Cache"),
            clusters: self.options.generated_caches_clusters.clone(),
            demo: self.options.demo,
        });

        DomainModel {
            space: self.space.clone(),
            key_type,
            value_type: format!("{value_type}{suffix}"),
            database_schema: Some(table.schema.clone()),
            database_table: Some(table.tbl.clone()),
            fields,
            key_fields,
            value_fields,
            indexes,
            query_metadata: QueryMetadata::Configuration,
            demo: self.options.demo,
            new_cache,
            ..Default::default()
        }
    }
}
