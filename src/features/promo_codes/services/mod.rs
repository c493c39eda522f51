mod code_repository;
mod code_rules;
mod promo_code_service;

pub use code_repository::{CodeRepository, PgCodeRepository};
pub use code_rules::{
    max_tickets_for_category, should_apply_discount, should_display_restricted_category,
};
pub use promo_code_service::PromoCodeService;
