//! Domain model derivation from relational schema metadata.
//!
//! The pipeline turns tables reported by the discovery agent into domain
//! model records:
//!
//! ```text
//! DbTable ──► TypeMapper + naming ──► DomainModelBuilder ──► ConflictResolver ──► batch
//! ```
//!
//! [`ImportWizard`] drives the user-facing step sequence around it, and the
//! [`validation`] module holds the rules the domain model editor applies.

pub mod builder;
pub mod conflicts;
pub mod naming;
pub mod type_mapping;
pub mod validation;
pub mod wizard;

pub use builder::{BuildOutput, DEMO_PACKAGE, DomainImportOptions, DomainModelBuilder};
pub use conflicts::{
    ConflictResolution, ConflictResolver, INTERRUPTED_MESSAGE, OverwriteDecision,
    overwrite_message,
};
pub use gridcfg_core::ValidationError;
pub use naming::{default_package_for_email, to_class_name, to_field_name, to_package_name};
pub use type_mapping::{
    JavaTypeMapping, JdbcTypeMapper, TypeMapper, UnsupportedTypeError, is_java_builtin_class,
};
pub use wizard::*;
