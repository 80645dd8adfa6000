//! Validation rules for domain models and their editable lists.
//!
//! Every check returns a [`ValidationError`] naming the offending field by its
//! wire name. Pair-list checks take the index of the row being edited, which
//! is excluded from duplicate detection.

use gridcfg_core::{
    DbField, DomainModel, IndexDefinition, IndexField, QueryField, QueryMetadata, ValidationError,
};
use regex::Regex;
use std::sync::LazyLock;

use crate::type_mapping::{JdbcTypeMapper, is_java_builtin_class};

static IDENTIFIER_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_$]*$").expect("valid regex"));

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

const JAVA_PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short",
];

fn check_segments(label: &str, value: &str, field: &str) -> Result<(), ValidationError> {
    for segment in value.split('.') {
        if JAVA_KEYWORDS.contains(&segment) {
            return Err(ValidationError::new(
                field,
                format!("{label} could not contain reserved Java keyword: '{segment}'"),
            ));
        }
        if !IDENTIFIER_SEGMENT.is_match(segment) {
            return Err(ValidationError::new(
                field,
                format!("{label} is invalid Java identifier"),
            ));
        }
    }
    Ok(())
}

/// Checks a fully qualified class name
pub fn validate_java_class(
    label: &str,
    value: &str,
    allow_builtin: bool,
    field: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{label} should not be empty"),
        ));
    }

    if !allow_builtin && is_java_builtin_class(value) {
        return Err(ValidationError::new(
            field,
            format!("{label} should not be the Java built-in class"),
        ));
    }

    check_segments(label, value, field)
}

pub fn validate_package_name(package: &str) -> Result<(), ValidationError> {
    if package.trim().is_empty() {
        return Err(ValidationError::new(
            "packageName",
            "Package should be not empty",
        ));
    }

    check_segments("Package", package, "packageName")
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Validates a domain model before it is saved.
///
/// Checks run in a fixed order and the first failure is returned.
pub fn validate_domain_model(model: &DomainModel) -> Result<(), ValidationError> {
    if model.key_type.trim().is_empty() {
        return Err(ValidationError::new("keyType", "Key type should not be empty"));
    }
    validate_java_class("Key type", &model.key_type, true, "keyType")?;

    if model.value_type.trim().is_empty() {
        return Err(ValidationError::new(
            "valueType",
            "Value type should not be empty",
        ));
    }
    validate_java_class("Value type", &model.value_type, false, "valueType")?;

    let for_query = model.is_configured_for_query();

    if for_query {
        if model.fields.is_empty() {
            return Err(ValidationError::new(
                "fields",
                "Query fields should not be empty",
            ));
        }

        if let Some(index) = model.indexes.iter().find(|index| index.fields.is_empty()) {
            return Err(ValidationError::new(
                "indexes",
                format!("Index fields are not specified for index: '{}'", index.name),
            ));
        }
    }

    if model.is_configured_for_store() {
        if is_blank(model.database_schema.as_deref()) {
            return Err(ValidationError::new(
                "databaseSchema",
                "Database schema should not be empty",
            ));
        }

        if is_blank(model.database_table.as_deref()) {
            return Err(ValidationError::new(
                "databaseTable",
                "Database table should not be empty",
            ));
        }

        if model.key_fields.is_empty() {
            return Err(ValidationError::new("keyFields", "Key fields are not specified"));
        }

        if is_java_builtin_class(&model.key_type) && model.key_fields.len() != 1 {
            return Err(ValidationError::new(
                "keyFields",
                "Only one field should be specified in case when key type is a Java built-in type",
            ));
        }

        if model.value_fields.is_empty() {
            return Err(ValidationError::new(
                "valueFields",
                "Value fields are not specified",
            ));
        }
    } else if !for_query && model.query_metadata == QueryMetadata::Configuration {
        return Err(ValidationError::new(
            "queryMetadata",
            "SQL query domain model should be configured",
        ));
    }

    Ok(())
}

fn is_duplicate<T>(items: &[T], edited: Option<usize>, matches: impl Fn(&T) -> bool) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(idx, item)| Some(idx) != edited && matches(item))
}

fn check_java_field_type(label: &str, value: &str, field: &str) -> Result<(), ValidationError> {
    if JAVA_PRIMITIVES.contains(&value) {
        return Ok(());
    }
    validate_java_class(label, value, true, field)
}

fn check_field_name(label: &str, value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{label} should not be empty"),
        ));
    }
    if value.contains('.') {
        return Err(ValidationError::new(
            field,
            format!("{label} is invalid Java identifier"),
        ));
    }
    check_segments(label, value, field)
}

/// Checks a query field before it is added at `edited` (or appended when `None`)
pub fn check_query_field(
    fields: &[QueryField],
    edited: Option<usize>,
    candidate: &QueryField,
) -> Result<(), ValidationError> {
    check_field_name("Field name", &candidate.name, "fields")?;
    check_java_field_type("Field class", &candidate.class_name, "fields")?;

    if is_duplicate(fields, edited, |f| f.name == candidate.name) {
        return Err(ValidationError::new(
            "fields",
            "Field with such name already exists!",
        ));
    }
    Ok(())
}

/// Checks a key or value field. `list` is the wire name of the list being
/// edited (`keyFields` or `valueFields`).
pub fn check_db_field(
    fields: &[DbField],
    edited: Option<usize>,
    candidate: &DbField,
    list: &str,
) -> Result<(), ValidationError> {
    if candidate.database_field_name.trim().is_empty() {
        return Err(ValidationError::new(
            list,
            "Database field name should not be empty",
        ));
    }

    if JdbcTypeMapper.by_name(&candidate.database_field_type).is_none() {
        return Err(ValidationError::new(
            list,
            format!(
                "Database field type '{}' is not a supported JDBC type",
                candidate.database_field_type
            ),
        ));
    }

    check_field_name("Java field name", &candidate.java_field_name, list)?;
    check_java_field_type("Java field type", &candidate.java_field_type, list)?;

    if is_duplicate(fields, edited, |f| {
        f.database_field_name == candidate.database_field_name
    }) {
        return Err(ValidationError::new(
            list,
            "Field with such database name already exists!",
        ));
    }

    if is_duplicate(fields, edited, |f| f.java_field_name == candidate.java_field_name) {
        return Err(ValidationError::new(
            list,
            "Field with such java name already exists!",
        ));
    }

    Ok(())
}

pub fn check_index(
    indexes: &[IndexDefinition],
    edited: Option<usize>,
    candidate: &IndexDefinition,
) -> Result<(), ValidationError> {
    if candidate.name.trim().is_empty() {
        return Err(ValidationError::new("indexes", "Index name should not be empty"));
    }

    if is_duplicate(indexes, edited, |index| index.name == candidate.name) {
        return Err(ValidationError::new(
            "indexes",
            "Index with such name already exists!",
        ));
    }
    Ok(())
}

/// Checks a field of an index. Index fields must refer to existing query fields.
pub fn check_index_field(
    query_fields: &[QueryField],
    index_fields: &[IndexField],
    edited: Option<usize>,
    candidate: &IndexField,
) -> Result<(), ValidationError> {
    if candidate.name.trim().is_empty() {
        return Err(ValidationError::new(
            "indexFields",
            "Index field name should not be empty",
        ));
    }

    if !query_fields.iter().any(|f| f.name == candidate.name) {
        return Err(ValidationError::new(
            "indexFields",
            format!("Index field '{}' is not one of query fields", candidate.name),
        ));
    }

    if is_duplicate(index_fields, edited, |f| f.name == candidate.name) {
        return Err(ValidationError::new(
            "indexFields",
            "Field with such name already exists in index!",
        ));
    }
    Ok(())
}
