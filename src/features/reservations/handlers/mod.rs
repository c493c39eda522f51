mod reservation_handler;

pub use reservation_handler::*;
