mod ticket_category_handler;

pub use ticket_category_handler::*;
