use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::promo_codes::models::{CodeType, DiscountType, ResolvedCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCodeType {
    SpecialPrice,
    Access,
    Discount,
}

/// A validated code as shown to the buyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCodeDto {
    pub code: String,
    #[serde(rename = "type")]
    pub code_type: Option<EventCodeType>,
    pub discount_type: Option<DiscountType>,
    /// Currency units for fixed amounts, integer percentage otherwise
    pub discount_amount: Option<String>,
}

impl EventCodeDto {
    /// Describe an accepted code; `None` when nothing was resolved
    pub fn from_resolved(code: &str, resolved: &ResolvedCode) -> Option<Self> {
        match resolved {
            ResolvedCode::None => None,
            ResolvedCode::Special(_) => Some(Self {
                code: code.to_string(),
                code_type: Some(EventCodeType::SpecialPrice),
                discount_type: Some(DiscountType::None),
                discount_amount: None,
            }),
            ResolvedCode::Discount(discount) => Some(Self {
                code: code.to_string(),
                code_type: Some(match discount.code_type {
                    CodeType::Access => EventCodeType::Access,
                    CodeType::Discount => EventCodeType::Discount,
                }),
                discount_type: Some(discount.discount_type),
                discount_amount: Some(discount.formatted_discount_amount()),
            }),
        }
    }

    /// Only the submitted code, returned alongside a rejection
    pub fn rejected(code: &str) -> Self {
        Self {
            code: code.to_string(),
            code_type: None,
            discount_type: None,
            discount_amount: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::promo_codes::models::SpecialPriceStatus;
    use crate::shared::test_helpers::{discount_code, special_price};

    #[test]
    fn test_special_price_has_no_discount_amount() {
        let resolved = ResolvedCode::Special(special_price("SP-1", 7, SpecialPriceStatus::Free));
        let dto = EventCodeDto::from_resolved("SP-1", &resolved).unwrap();

        assert_eq!(dto.code_type, Some(EventCodeType::SpecialPrice));
        assert_eq!(dto.discount_type, Some(DiscountType::None));
        assert_eq!(dto.discount_amount, None);
    }

    #[test]
    fn test_fixed_amount_is_shown_in_currency_units() {
        let mut code = discount_code("FIVEOFF");
        code.discount_type = DiscountType::FixedAmount;
        code.discount_amount = 500;
        let dto = EventCodeDto::from_resolved("FIVEOFF", &ResolvedCode::Discount(code)).unwrap();

        assert_eq!(dto.code_type, Some(EventCodeType::Discount));
        assert_eq!(dto.discount_amount.as_deref(), Some("5.00"));
    }

    #[test]
    fn test_serializes_type_field() {
        let dto = EventCodeDto::from_resolved(
            "SAVE10",
            &ResolvedCode::Discount(discount_code("SAVE10")),
        )
        .unwrap();
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["type"], "DISCOUNT");
        assert_eq!(json["discountType"], "PERCENTAGE");
        assert_eq!(json["discountAmount"], "10");
    }
}
