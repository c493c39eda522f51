mod configuration_entry;
mod configuration_key;

pub use configuration_entry::{ConfigurationEntry, ConfigurationLevel, ConfigurationScope};
pub use configuration_key::ConfigurationKey;
