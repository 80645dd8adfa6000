//! JDBC to Java type mapping
//!
//! The discovery agent reports column types as `java.sql.Types` codes. This
//! module maps them to the Java types used in generated domain models.

use thiserror::Error;

/// Java type descriptor for a JDBC type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaTypeMapping {
    /// JDBC type name, e.g. `VARCHAR`
    pub db_name: &'static str,
    /// Fully qualified boxed Java type
    pub java_type: &'static str,
    /// Primitive alternative, when one exists
    pub primitive_type: Option<&'static str>,
}

impl JavaTypeMapping {
    /// Mapping used when a type code is not supported
    pub const FALLBACK: JavaTypeMapping = JavaTypeMapping {
        db_name: "OTHER",
        java_type: "java.lang.Object",
        primitive_type: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unsupported JDBC type code: {0}")]
pub struct UnsupportedTypeError(pub i32);

/// Maps database column types to Java types
pub trait TypeMapper: Send + Sync {
    fn map(&self, jdbc_type: i32) -> Result<JavaTypeMapping, UnsupportedTypeError>;

    /// Map the type, falling back to `java.lang.Object` for unsupported codes
    fn map_or_fallback(&self, jdbc_type: i32) -> JavaTypeMapping {
        match self.map(jdbc_type) {
            Ok(mapping) => mapping,
            Err(e) => {
                tracing::warn!(jdbc_type, "{}, using java.lang.Object", e);
                JavaTypeMapping::FALLBACK
            }
        }
    }
}

const fn boxed(db_name: &'static str, java_type: &'static str) -> JavaTypeMapping {
    JavaTypeMapping {
        db_name,
        java_type,
        primitive_type: None,
    }
}

const fn primitive(
    db_name: &'static str,
    java_type: &'static str,
    primitive_type: &'static str,
) -> JavaTypeMapping {
    JavaTypeMapping {
        db_name,
        java_type,
        primitive_type: Some(primitive_type),
    }
}

/// `java.sql.Types` codes and their mappings
const JDBC_TYPES: &[(i32, JavaTypeMapping)] = &[
    (-7, primitive("BIT", "java.lang.Boolean", "boolean")),
    (-6, primitive("TINYINT", "java.lang.Byte", "byte")),
    (5, primitive("SMALLINT", "java.lang.Short", "short")),
    (4, primitive("INTEGER", "java.lang.Integer", "int")),
    (-5, primitive("BIGINT", "java.lang.Long", "long")),
    (6, primitive("FLOAT", "java.lang.Float", "float")),
    (7, primitive("REAL", "java.lang.Double", "double")),
    (8, primitive("DOUBLE", "java.lang.Double", "double")),
    (2, boxed("NUMERIC", "java.math.BigDecimal")),
    (3, boxed("DECIMAL", "java.math.BigDecimal")),
    (1, boxed("CHAR", "java.lang.String")),
    (12, boxed("VARCHAR", "java.lang.String")),
    (-1, boxed("LONGVARCHAR", "java.lang.String")),
    (91, boxed("DATE", "java.sql.Date")),
    (92, boxed("TIME", "java.sql.Time")),
    (93, boxed("TIMESTAMP", "java.sql.Timestamp")),
    (-2, boxed("BINARY", "java.lang.Object")),
    (-3, boxed("VARBINARY", "java.lang.Object")),
    (-4, boxed("LONGVARBINARY", "java.lang.Object")),
    (0, boxed("NULL", "java.lang.Object")),
    (1111, boxed("OTHER", "java.lang.Object")),
    (2000, boxed("JAVA_OBJECT", "java.lang.Object")),
    (2001, boxed("DISTINCT", "java.lang.Object")),
    (2002, boxed("STRUCT", "java.lang.Object")),
    (2003, boxed("ARRAY", "java.lang.Object")),
    (2004, boxed("BLOB", "java.lang.Object")),
    (2005, boxed("CLOB", "java.lang.String")),
    (2006, boxed("REF", "java.lang.Object")),
    (70, boxed("DATALINK", "java.lang.Object")),
    (16, primitive("BOOLEAN", "java.lang.Boolean", "boolean")),
    (-8, boxed("ROWID", "java.lang.Object")),
    (-15, boxed("NCHAR", "java.lang.String")),
    (-9, boxed("NVARCHAR", "java.lang.String")),
    (-16, boxed("LONGNVARCHAR", "java.lang.String")),
    (2011, boxed("NCLOB", "java.lang.String")),
    (2009, boxed("SQLXML", "java.lang.Object")),
];

/// (short name, fully qualified name)
const JAVA_BUILTIN_CLASSES: &[(&str, &str)] = &[
    ("BigDecimal", "java.math.BigDecimal"),
    ("Boolean", "java.lang.Boolean"),
    ("Byte", "java.lang.Byte"),
    ("Character", "java.lang.Character"),
    ("Date", "java.sql.Date"),
    ("Date", "java.util.Date"),
    ("Double", "java.lang.Double"),
    ("Float", "java.lang.Float"),
    ("Integer", "java.lang.Integer"),
    ("Long", "java.lang.Long"),
    ("Object", "java.lang.Object"),
    ("Short", "java.lang.Short"),
    ("String", "java.lang.String"),
    ("Time", "java.sql.Time"),
    ("Timestamp", "java.sql.Timestamp"),
    ("UUID", "java.util.UUID"),
];

/// Whether `name` is a Java built-in class, in short or fully qualified form
pub fn is_java_builtin_class(name: &str) -> bool {
    JAVA_BUILTIN_CLASSES
        .iter()
        .any(|(short, full)| *short == name || *full == name)
}

/// Standard `java.sql.Types` mapper
#[derive(Debug, Clone, Copy, Default)]
pub struct JdbcTypeMapper;

impl JdbcTypeMapper {
    /// Lookup by JDBC type name, case-insensitive
    pub fn by_name(&self, db_name: &str) -> Option<JavaTypeMapping> {
        let name = db_name.trim();
        JDBC_TYPES
            .iter()
            .find(|(_, mapping)| mapping.db_name.eq_ignore_ascii_case(name))
            .map(|(_, mapping)| *mapping)
    }

    /// All supported JDBC type names
    pub fn supported_names(&self) -> impl Iterator<Item = &'static str> {
        JDBC_TYPES.iter().map(|(_, mapping)| mapping.db_name)
    }
}

impl TypeMapper for JdbcTypeMapper {
    fn map(&self, jdbc_type: i32) -> Result<JavaTypeMapping, UnsupportedTypeError> {
        JDBC_TYPES
            .iter()
            .find(|(code, _)| *code == jdbc_type)
            .map(|(_, mapping)| *mapping)
            .ok_or(UnsupportedTypeError(jdbc_type))
    }
}
