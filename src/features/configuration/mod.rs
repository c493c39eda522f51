//! Business configuration stored in the database.
//!
//! Entries are scoped to the whole system, an organization, an event or a
//! single ticket category. A lookup resolves the most specific scope that
//! defines the key.

pub mod models;
pub mod services;

pub use models::{ConfigurationKey, ConfigurationLevel};
pub use services::{ConfigurationService, ConfigurationSnapshot};
