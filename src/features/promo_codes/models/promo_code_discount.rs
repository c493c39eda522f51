use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::shared::money;

/// What a promo code grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "promo_code_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeType {
    /// Price reduction on matching categories
    Discount,
    /// Unlocks one access-restricted category
    Access,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "discount_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
    None,
}

/// Database model for a promo code, defined on an event or a whole organization
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PromoCodeDiscount {
    pub id: i32,
    pub promo_code: String,
    pub event_id: Option<i32>,
    pub organization_id: i32,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    /// Percentage points, or cents for fixed amounts
    pub discount_amount: i32,
    pub discount_type: DiscountType,
    /// Categories the code is restricted to; empty means every category
    pub categories: Vec<i32>,
    pub max_usage: Option<i32>,
    pub code_type: CodeType,
    pub hidden_category_id: Option<i32>,
    pub description: Option<String>,
}

impl PromoCodeDiscount {
    /// Whether `now` falls inside the half-open window `[valid_from, valid_to)`.
    /// A missing bound leaves that side open.
    pub fn is_currently_valid<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let now = now.with_timezone(&Utc);
        let started = self.valid_from.map_or(true, |start| start <= now);
        let not_ended = self.valid_to.map_or(true, |end| now < end);
        started && not_ended
    }

    /// Restricted category ids, or `None` when the code applies everywhere
    pub fn restricted_categories(&self) -> Option<&[i32]> {
        if self.categories.is_empty() {
            None
        } else {
            Some(&self.categories)
        }
    }

    /// Discount amount as shown to buyers: currency units for fixed amounts,
    /// plain percentage points otherwise
    pub fn formatted_discount_amount(&self) -> String {
        match self.discount_type {
            DiscountType::FixedAmount => money::format_cents(self.discount_amount),
            DiscountType::Percentage | DiscountType::None => self.discount_amount.to_string(),
        }
    }

    /// Price of one unit after the discount
    pub fn apply_to(&self, price_cts: i32) -> i32 {
        match self.discount_type {
            DiscountType::Percentage => money::apply_percentage(price_cts, self.discount_amount),
            DiscountType::FixedAmount => money::apply_fixed_amount(price_cts, self.discount_amount),
            DiscountType::None => price_cts,
        }
    }

    pub fn is_access_code(&self) -> bool {
        self.code_type == CodeType::Access
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chrono_tz::Tz;

    fn discount(valid_from: Option<DateTime<Utc>>, valid_to: Option<DateTime<Utc>>) -> PromoCodeDiscount {
        PromoCodeDiscount {
            id: 1,
            promo_code: "SAVE10".to_string(),
            event_id: Some(1),
            organization_id: 1,
            valid_from,
            valid_to,
            discount_amount: 10,
            discount_type: DiscountType::Percentage,
            categories: vec![],
            max_usage: None,
            code_type: CodeType::Discount,
            hidden_category_id: None,
            description: None,
        }
    }

    #[test]
    fn test_validity_window_is_half_open() {
        let start = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let end = start + Duration::days(10);
        let code = discount(Some(start), Some(end));

        assert!(!code.is_currently_valid(&(start - Duration::seconds(1))));
        assert!(code.is_currently_valid(&start));
        assert!(code.is_currently_valid(&(end - Duration::seconds(1))));
        assert!(!code.is_currently_valid(&end));
    }

    #[test]
    fn test_validity_compares_instants_across_timezones() {
        let start = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let code = discount(Some(start), None);

        // 09:30 in Rome (CEST) is 07:30 UTC, still before the start
        let rome: Tz = "Europe/Rome".parse().unwrap();
        let now = rome.with_ymd_and_hms(2025, 5, 1, 9, 30, 0).unwrap();
        assert!(!code.is_currently_valid(&now));
    }

    #[test]
    fn test_open_window_is_always_valid() {
        let code = discount(None, None);
        assert!(code.is_currently_valid(&Utc::now()));
    }

    #[test]
    fn test_formatted_amount_and_application() {
        let mut code = discount(None, None);
        assert_eq!(code.formatted_discount_amount(), "10");
        assert_eq!(code.apply_to(2_000), 1_800);

        code.discount_type = DiscountType::FixedAmount;
        code.discount_amount = 550;
        assert_eq!(code.formatted_discount_amount(), "5.50");
        assert_eq!(code.apply_to(2_000), 1_450);
    }

    #[test]
    fn test_restricted_categories() {
        let mut code = discount(None, None);
        assert_eq!(code.restricted_categories(), None);

        code.categories = vec![3, 4];
        assert_eq!(code.restricted_categories(), Some(&[3, 4][..]));
    }
}
