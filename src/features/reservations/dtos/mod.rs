mod reservation_form_dto;

pub use reservation_form_dto::*;
