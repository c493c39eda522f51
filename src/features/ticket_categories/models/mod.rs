mod additional_service;
mod saleable_additional_service;
mod saleable_ticket_category;
mod ticket_category;

pub use additional_service::{
    AdditionalService, AdditionalServiceText, AdditionalServiceTextType, AdditionalServiceType,
    SupplementPolicy,
};
pub use saleable_additional_service::SaleableAdditionalService;
pub use saleable_ticket_category::{gross_price, SaleableTicketCategory};
pub use ticket_category::{TicketCategory, TicketCategoryStatus};
