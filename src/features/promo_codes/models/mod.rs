mod code_check;
mod event_scope;
mod promo_code_discount;
mod special_price;

pub use code_check::{CodeCheck, CodeError, ResolvedCode};
pub use event_scope::EventScope;
pub use promo_code_discount::{CodeType, DiscountType, PromoCodeDiscount};
pub use special_price::{SpecialPrice, SpecialPriceStatus};
