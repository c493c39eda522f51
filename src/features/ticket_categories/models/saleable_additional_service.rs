use chrono::{DateTime, Utc};

use crate::features::events::models::Event;
use crate::features::promo_codes::models::{CodeType, DiscountType};
use crate::features::promo_codes::PromoCodeDiscount;
use crate::features::ticket_categories::models::AdditionalService;
use crate::shared::money;

/// An additional service as offered to a buyer at a given instant
#[derive(Debug, Clone, PartialEq)]
pub struct SaleableAdditionalService {
    pub service: AdditionalService,
    pub expired: bool,
    pub sale_in_future: bool,
    pub vat_included: bool,
    pub final_price_cts: i32,
    pub discounted_price_cts: Option<i32>,
}

impl SaleableAdditionalService {
    pub fn new(
        event: &Event,
        service: AdditionalService,
        discount: Option<&PromoCodeDiscount>,
        now: DateTime<Utc>,
    ) -> Self {
        let final_price_cts = if service.vat_applies && !event.vat_included {
            money::add_vat(service.price_cts, service.vat.unwrap_or_else(|| event.vat()))
        } else {
            service.price_cts
        };

        let discounted_price_cts = discount
            .filter(|d| supports_discount(&service, d))
            .map(|d| d.apply_to(final_price_cts));

        Self {
            expired: service.is_expired(now),
            sale_in_future: service.is_sale_in_future(now),
            vat_included: event.vat_included,
            final_price_cts,
            discounted_price_cts,
            service,
        }
    }

    pub fn id(&self) -> i32 {
        self.service.id
    }

    pub fn is_free(&self) -> bool {
        self.service.fix_price && self.service.price_cts == 0
    }

    pub fn supports_discount(&self) -> bool {
        self.discounted_price_cts.is_some()
    }

    pub fn formatted_final_price(&self) -> String {
        money::format_cents(self.final_price_cts)
    }

    pub fn formatted_discounted_price(&self) -> String {
        money::format_cents(self.discounted_price_cts.unwrap_or(self.final_price_cts))
    }
}

/// Only fixed, non-free prices take a monetary discount
fn supports_discount(service: &AdditionalService, discount: &PromoCodeDiscount) -> bool {
    service.fix_price
        && service.price_cts > 0
        && discount.code_type == CodeType::Discount
        && discount.discount_type != DiscountType::None
}
