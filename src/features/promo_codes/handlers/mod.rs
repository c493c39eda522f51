mod validate_code_handler;

pub use validate_code_handler::*;
