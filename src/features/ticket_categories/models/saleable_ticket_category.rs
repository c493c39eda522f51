use chrono::{DateTime, Utc};

use crate::features::events::models::Event;
use crate::features::promo_codes::PromoCodeDiscount;
use crate::features::ticket_categories::models::TicketCategory;
use crate::shared::money;

/// A ticket category as offered to a buyer at a given instant
#[derive(Debug, Clone, PartialEq)]
pub struct SaleableTicketCategory {
    pub category: TicketCategory,
    pub available_tickets: i64,
    /// Maximum quantity selectable in one reservation
    pub max_tickets: i32,
    /// Discount of the accepted code, when it applies to this category
    pub discount: Option<PromoCodeDiscount>,
    pub expired: bool,
    pub sale_in_future: bool,
    pub sold_out: bool,
    /// Unit price including VAT
    pub final_price_cts: i32,
}

impl SaleableTicketCategory {
    pub fn new(
        category: TicketCategory,
        now: DateTime<Utc>,
        event: &Event,
        available_tickets: i64,
        max_tickets: i32,
        discount: Option<PromoCodeDiscount>,
    ) -> Self {
        let final_price_cts = gross_price(event, category.price_cts);
        Self {
            expired: category.is_expired(now),
            sale_in_future: category.is_sale_in_future(now),
            sold_out: available_tickets <= 0,
            available_tickets,
            max_tickets,
            discount,
            final_price_cts,
            category,
        }
    }

    pub fn id(&self) -> i32 {
        self.category.id
    }

    pub fn is_saleable(&self) -> bool {
        self.category.is_active() && !self.expired && !self.sale_in_future && !self.sold_out
    }

    /// Quantity the buyer can actually pick
    pub fn selectable_amount(&self) -> i32 {
        let available = self.available_tickets.clamp(0, i64::from(i32::MAX)) as i32;
        self.max_tickets.min(available).max(0)
    }

    pub fn discounted_price_cts(&self) -> Option<i32> {
        self.discount
            .as_ref()
            .map(|discount| discount.apply_to(self.final_price_cts))
    }

    pub fn formatted_final_price(&self) -> String {
        money::format_cents(self.final_price_cts)
    }

    pub fn formatted_discounted_price(&self) -> String {
        money::format_cents(self.discounted_price_cts().unwrap_or(self.final_price_cts))
    }
}

/// Price shown to buyers: VAT is added when the event's prices exclude it
pub fn gross_price(event: &Event, price_cts: i32) -> i32 {
    if event.vat_included {
        price_cts
    } else {
        money::add_vat(price_cts, event.vat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    use crate::shared::test_helpers::{discount_code, sample_event, ticket_category};

    #[test]
    fn test_flags_follow_sale_window() {
        let category = ticket_category(1, false);
        let event = sample_event();

        let before = SaleableTicketCategory::new(
            category.clone(),
            category.inception - Duration::minutes(1),
            &event,
            10,
            5,
            None,
        );
        assert!(before.sale_in_future);
        assert!(!before.is_saleable());

        let during = SaleableTicketCategory::new(
            category.clone(),
            category.inception + Duration::minutes(1),
            &event,
            10,
            5,
            None,
        );
        assert!(during.is_saleable());

        let after =
            SaleableTicketCategory::new(category.clone(), category.expiration, &event, 10, 5, None);
        assert!(after.expired);
    }

    #[test]
    fn test_sold_out_when_no_tickets_left() {
        let category = ticket_category(1, false);
        let now = category.inception + Duration::hours(1);
        let stc = SaleableTicketCategory::new(category, now, &sample_event(), 0, 5, None);

        assert!(stc.sold_out);
        assert!(!stc.is_saleable());
        assert_eq!(stc.selectable_amount(), 0);
    }

    #[test]
    fn test_selectable_amount_is_bounded_by_availability() {
        let category = ticket_category(1, false);
        let now = category.inception + Duration::hours(1);

        let plenty = SaleableTicketCategory::new(category.clone(), now, &sample_event(), 100, 5, None);
        assert_eq!(plenty.selectable_amount(), 5);

        let few = SaleableTicketCategory::new(category, now, &sample_event(), 2, 5, None);
        assert_eq!(few.selectable_amount(), 2);
    }

    #[test]
    fn test_vat_is_added_when_excluded() {
        let mut event = sample_event();
        event.vat_included = false;
        event.vat_percent = Some(Decimal::new(10, 0));
        let mut category = ticket_category(1, false);
        category.price_cts = 10_000;
        let now = category.inception;

        let stc = SaleableTicketCategory::new(category, now, &event, 10, 5, None);
        assert_eq!(stc.final_price_cts, 11_000);
        assert_eq!(stc.formatted_final_price(), "110.00");
    }

    #[test]
    fn test_discounted_price() {
        let mut category = ticket_category(1, false);
        category.price_cts = 10_000;
        let now = category.inception;

        let stc = SaleableTicketCategory::new(
            category,
            now,
            &sample_event(),
            10,
            5,
            Some(discount_code("SAVE10")),
        );
        assert_eq!(stc.discounted_price_cts(), Some(9_000));
        assert_eq!(stc.formatted_discounted_price(), "90.00");
    }
}
