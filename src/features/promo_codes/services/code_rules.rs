//! Pure rules deciding what a resolved code does to a ticket category.

use crate::features::promo_codes::models::{CodeType, PromoCodeDiscount, ResolvedCode};
use crate::features::ticket_categories::models::TicketCategory;

/// Whether an access-restricted category is unlocked by the code: an access
/// code naming it as hidden category, or a special price issued for it.
pub fn should_display_restricted_category(code: &ResolvedCode, category: &TicketCategory) -> bool {
    match code {
        ResolvedCode::Discount(discount) => {
            discount.code_type == CodeType::Access
                && discount.hidden_category_id == Some(category.id)
        }
        ResolvedCode::Special(special) => special.ticket_category_id == category.id,
        ResolvedCode::None => false,
    }
}

/// Whether the discount's price reduction applies to a category
pub fn should_apply_discount(discount: &PromoCodeDiscount, category: &TicketCategory) -> bool {
    match discount.code_type {
        CodeType::Discount => {
            discount.categories.is_empty() || discount.categories.contains(&category.id)
        }
        CodeType::Access => {
            category.access_restricted && discount.hidden_category_id == Some(category.id)
        }
    }
}

/// Maximum quantity a buyer may select for one category.
///
/// `remaining_discount_usage` is `max_usage - confirmed usage` of the
/// discount filtered for this category, when that discount has a cap.
pub fn max_tickets_for_category(
    configured_max: i32,
    special_price_used: bool,
    remaining_discount_usage: Option<i64>,
) -> i32 {
    if special_price_used {
        configured_max.min(1)
    } else if let Some(remaining) = remaining_discount_usage {
        remaining.clamp(0, i64::from(i32::MAX)) as i32
    } else {
        configured_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::promo_codes::models::{DiscountType, SpecialPriceStatus};
    use crate::shared::test_helpers::{discount_code, special_price, ticket_category};

    fn access_code(hidden_category_id: i32) -> PromoCodeDiscount {
        PromoCodeDiscount {
            code_type: CodeType::Access,
            discount_type: DiscountType::None,
            discount_amount: 0,
            hidden_category_id: Some(hidden_category_id),
            ..discount_code("VIP")
        }
    }

    #[test]
    fn test_access_code_displays_its_hidden_category_only() {
        let code = ResolvedCode::Discount(access_code(5));

        assert!(should_display_restricted_category(&code, &ticket_category(5, true)));
        assert!(!should_display_restricted_category(&code, &ticket_category(6, true)));
    }

    #[test]
    fn test_special_price_displays_its_category() {
        let code = ResolvedCode::Special(special_price("SP-1", 7, SpecialPriceStatus::Free));

        assert!(should_display_restricted_category(&code, &ticket_category(7, true)));
        assert!(!should_display_restricted_category(&code, &ticket_category(5, true)));
    }

    #[test]
    fn test_discount_code_never_unlocks_restricted_categories() {
        let mut code = discount_code("SAVE10");
        code.hidden_category_id = Some(5);

        assert!(!should_display_restricted_category(
            &ResolvedCode::Discount(code),
            &ticket_category(5, true)
        ));
        assert!(!should_display_restricted_category(
            &ResolvedCode::None,
            &ticket_category(5, true)
        ));
    }

    #[test]
    fn test_unrestricted_discount_applies_to_every_category() {
        let code = discount_code("SAVE10");

        for id in [1, 2, 42, 1000] {
            assert!(should_apply_discount(&code, &ticket_category(id, false)));
            assert!(should_apply_discount(&code, &ticket_category(id, true)));
        }
    }

    #[test]
    fn test_restricted_discount_applies_to_listed_categories() {
        let mut code = discount_code("SAVE10");
        code.categories = vec![2, 3];

        assert!(should_apply_discount(&code, &ticket_category(2, false)));
        assert!(should_apply_discount(&code, &ticket_category(3, false)));
        assert!(!should_apply_discount(&code, &ticket_category(4, false)));
    }

    #[test]
    fn test_access_code_applies_only_to_restricted_hidden_category() {
        let code = access_code(5);

        assert!(should_apply_discount(&code, &ticket_category(5, true)));
        assert!(!should_apply_discount(&code, &ticket_category(5, false)));
        assert!(!should_apply_discount(&code, &ticket_category(6, true)));
    }

    #[test]
    fn test_max_tickets_special_price_is_single_seat() {
        assert_eq!(max_tickets_for_category(5, true, None), 1);
        assert_eq!(max_tickets_for_category(5, true, Some(10)), 1);
        assert_eq!(max_tickets_for_category(0, true, None), 0);
    }

    #[test]
    fn test_max_tickets_uses_remaining_discount_usage() {
        assert_eq!(max_tickets_for_category(5, false, Some(3)), 3);
        assert_eq!(max_tickets_for_category(5, false, Some(12)), 12);
        assert_eq!(max_tickets_for_category(5, false, Some(-2)), 0);
    }

    #[test]
    fn test_max_tickets_falls_back_to_configured_value() {
        assert_eq!(max_tickets_for_category(5, false, None), 5);
        assert_eq!(max_tickets_for_category(8, false, None), 8);
    }
}
