mod event_code_dto;

pub use event_code_dto::*;
