pub mod configuration;
pub mod events;
pub mod payments;
pub mod promo_codes;
pub mod reservations;
pub mod ticket_categories;
pub mod waiting_list;
