mod waiting_list_service;

pub use waiting_list_service::{SubscriptionOutcome, WaitingListService};
