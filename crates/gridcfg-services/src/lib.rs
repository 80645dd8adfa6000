//! gridcfg services layer
//!
//! Sits between front ends and the domain logic. Services orchestrate the
//! remote calls and keep long-lived state consistent with the console.
//!
//! # Architecture
//!
//! ```text
//! Front end (gridcfg-cli)
//!     ↓
//! Service layer (gridcfg-services) ← This crate
//!     ↓
//! Domain layer (gridcfg-interchange, gridcfg-settings)
//!     ↓
//! Core (gridcfg-core)
//! ```
//!
//! # Services
//!
//! - [`DomainService`] - Load, save, clone and remove domain models
//! - [`ImportSession`] - Run the import wizard end to end
//! - [`HttpConsoleClient`] - Console and agent API over HTTP

mod catalog;
mod domain_service;
mod error;
mod http_client;
mod import_session;
mod prompt;

pub use catalog::DomainCatalog;
pub use domain_service::{
    DomainService, REMOVE_ALL_CONFIRM, REMOVE_DEMO_CONFIRM, REMOVED_ALL_MESSAGE,
    REMOVED_DEMO_MESSAGE, remove_confirm_message, removed_message, saved_message,
};
pub use error::{ServiceError, ServiceResult};
pub use http_client::HttpConsoleClient;
pub use import_session::{ImportOutcome, ImportSession, NextOutcome};
pub use prompt::{AutoConfirm, ImportPrompt, Notifier, TracingNotifier};
