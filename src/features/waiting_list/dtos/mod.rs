mod waiting_queue_subscription_dto;

pub use waiting_queue_subscription_dto::*;
