mod ticket_category_dto;

pub use ticket_category_dto::*;
