mod waiting_list_handler;

pub use waiting_list_handler::*;
