pub mod clock;
pub mod constants;
pub mod formatters;
pub mod i18n;
pub mod markdown;
pub mod money;
pub mod templates;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
