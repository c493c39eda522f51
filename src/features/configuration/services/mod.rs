mod configuration_service;

pub use configuration_service::{ConfigurationService, ConfigurationSnapshot};
