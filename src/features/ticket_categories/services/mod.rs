mod ticket_category_service;
mod waiting_queue_rules;

pub use ticket_category_service::TicketCategoryService;
pub use waiting_queue_rules::{
    display_waiting_queue_form, is_pre_sales, waiting_list_categories, WaitingQueueSettings,
};
