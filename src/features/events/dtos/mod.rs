mod event_dto;
mod event_settings_dto;

pub use event_dto::*;
pub use event_settings_dto::*;
