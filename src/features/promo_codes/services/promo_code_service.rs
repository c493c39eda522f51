use std::sync::Arc;

use crate::core::error::Result;
use crate::features::promo_codes::models::{
    CodeCheck, CodeError, EventScope, PromoCodeDiscount, ResolvedCode,
};
use crate::features::promo_codes::services::CodeRepository;
use crate::shared::clock::Clock;
use crate::shared::validation::trim_to_none;

/// Resolves raw codes typed by buyers into special prices or promo codes
pub struct PromoCodeService {
    repository: Arc<dyn CodeRepository>,
    clock: Arc<dyn Clock>,
}

impl PromoCodeService {
    pub fn new(repository: Arc<dyn CodeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn find_event_scope(&self, short_name: &str) -> Result<Option<EventScope>> {
        self.repository.find_event_scope(short_name).await
    }

    /// Resolve a code for an event.
    ///
    /// A blank code is accepted and resolves to nothing. Otherwise the first
    /// failing rule rejects the code:
    /// 1. a special price must target an active category of the event and be FREE
    /// 2. a promo code must be inside its validity window and below its usage cap
    /// 3. a code matching neither is unknown
    pub async fn resolve_code(&self, event: &EventScope, raw_code: Option<&str>) -> Result<CodeCheck> {
        let Some(code) = trim_to_none(raw_code) else {
            return Ok(CodeCheck::Accepted(ResolvedCode::None));
        };

        let (special_price, discount) = tokio::try_join!(
            self.repository.find_special_price_by_code(code),
            self.repository
                .find_promo_code_discount(event.id, event.organization_id, code),
        )?;

        if let Some(special_price) = special_price {
            let category_active = self
                .repository
                .is_category_active_and_exists(special_price.ticket_category_id, event.id)
                .await?;

            if !category_active {
                tracing::debug!(
                    "Special price {} targets inactive category {} of event {}",
                    special_price.id,
                    special_price.ticket_category_id,
                    event.id
                );
                return Ok(CodeCheck::Rejected(CodeError::InvalidOrExpiredCode));
            }

            if !special_price.is_free() {
                tracing::debug!(
                    "Special price {} is {:?}",
                    special_price.id,
                    special_price.status
                );
                return Ok(CodeCheck::Rejected(CodeError::InvalidOrExpiredCode));
            }

            return Ok(CodeCheck::Accepted(ResolvedCode::Special(special_price)));
        }

        if let Some(discount) = discount {
            let now = self.clock.now(event.zone());
            if !discount.is_currently_valid(&now) {
                tracing::debug!("Promo code {} is outside its validity window", discount.id);
                return Ok(CodeCheck::Rejected(CodeError::InvalidOrExpiredCode));
            }

            if self.is_usage_exceeded(&discount).await? {
                tracing::debug!("Promo code {} reached its maximum usage", discount.id);
                return Ok(CodeCheck::Rejected(CodeError::InvalidOrExpiredCode));
            }

            return Ok(CodeCheck::Accepted(ResolvedCode::Discount(discount)));
        }

        tracing::debug!("Unknown code submitted for event {}", event.id);
        Ok(CodeCheck::Rejected(CodeError::InvalidOrExpiredCode))
    }

    /// Confirmed usage, scoped to the discount's restricted categories
    pub async fn confirmed_usage(&self, discount: &PromoCodeDiscount) -> Result<i64> {
        self.repository
            .count_confirmed_usage(discount.id, discount.restricted_categories())
            .await
    }

    pub async fn is_usage_exceeded(&self, discount: &PromoCodeDiscount) -> Result<bool> {
        match discount.max_usage {
            Some(max_usage) => Ok(self.confirmed_usage(discount).await? >= i64::from(max_usage)),
            None => Ok(false),
        }
    }

    /// Uses left before the cap is reached; `None` for uncapped codes
    pub async fn remaining_usage(&self, discount: &PromoCodeDiscount) -> Result<Option<i64>> {
        match discount.max_usage {
            Some(max_usage) => {
                Ok(Some(i64::from(max_usage) - self.confirmed_usage(discount).await?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::features::promo_codes::models::SpecialPriceStatus;
    use crate::shared::test_helpers::{
        discount_code, event_scope, special_price, FixedClock, InMemoryCodeRepository,
    };

    fn service(repository: InMemoryCodeRepository, clock: FixedClock) -> PromoCodeService {
        PromoCodeService::new(Arc::new(repository), Arc::new(clock))
    }

    fn now() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_blank_codes_are_accepted_without_lookups() {
        let repository = InMemoryCodeRepository::default();
        let lookups = repository.lookup_counter();
        let service = service(repository, now());
        let event = event_scope();

        for raw in [None, Some(""), Some("   "), Some("\t\n")] {
            let check = service.resolve_code(&event, raw).await.unwrap();
            assert_eq!(check, CodeCheck::Accepted(ResolvedCode::None));
        }
        assert_eq!(lookups.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_free_special_price_on_active_category_is_accepted() {
        let sp = special_price("SP-1", 7, SpecialPriceStatus::Free);
        let repository = InMemoryCodeRepository::default()
            .with_special_price(sp.clone())
            .with_active_category(7, 1);
        let service = service(repository, now());

        let check = service
            .resolve_code(&event_scope(), Some("  SP-1 "))
            .await
            .unwrap();

        assert_eq!(check, CodeCheck::Accepted(ResolvedCode::Special(sp)));
        assert!(check.code().discount().is_none());
    }

    #[tokio::test]
    async fn test_special_price_not_free_is_rejected() {
        for status in [
            SpecialPriceStatus::Pending,
            SpecialPriceStatus::Taken,
            SpecialPriceStatus::Cancelled,
        ] {
            let repository = InMemoryCodeRepository::default()
                .with_special_price(special_price("SP-1", 7, status))
                .with_active_category(7, 1);
            let service = service(repository, now());

            let check = service.resolve_code(&event_scope(), Some("SP-1")).await.unwrap();
            assert_eq!(check, CodeCheck::Rejected(CodeError::InvalidOrExpiredCode));
        }
    }

    #[tokio::test]
    async fn test_special_price_on_inactive_category_is_rejected() {
        let repository = InMemoryCodeRepository::default()
            .with_special_price(special_price("SP-1", 7, SpecialPriceStatus::Free));
        let service = service(repository, now());

        let check = service.resolve_code(&event_scope(), Some("SP-1")).await.unwrap();

        assert!(!check.is_success());
        assert_eq!(check.code(), &ResolvedCode::None);
        assert_eq!(
            check.error().map(|e| e.code()),
            Some("error.STEP_1_CODE_NOT_FOUND")
        );
    }

    #[tokio::test]
    async fn test_special_price_wins_over_promo_code_with_same_text() {
        let sp = special_price("SHARED", 7, SpecialPriceStatus::Free);
        let repository = InMemoryCodeRepository::default()
            .with_special_price(sp.clone())
            .with_discount(discount_code("SHARED"))
            .with_active_category(7, 1);
        let service = service(repository, now());

        let check = service.resolve_code(&event_scope(), Some("SHARED")).await.unwrap();
        assert_eq!(check, CodeCheck::Accepted(ResolvedCode::Special(sp)));
    }

    #[tokio::test]
    async fn test_promo_code_validity_window() {
        let clock = now();
        let start = clock.0 - Duration::days(1);
        let end = clock.0 + Duration::days(1);

        let cases = [
            (Some(clock.0 + Duration::seconds(1)), Some(end), false),
            (Some(start), Some(clock.0), false),
            (Some(clock.0), Some(end), true),
            (Some(start), Some(end), true),
            (None, None, true),
        ];

        for (valid_from, valid_to, expected) in cases {
            let mut code = discount_code("SAVE10");
            code.valid_from = valid_from;
            code.valid_to = valid_to;
            let service = service(InMemoryCodeRepository::default().with_discount(code), clock);

            let check = service.resolve_code(&event_scope(), Some("SAVE10")).await.unwrap();
            assert_eq!(check.is_success(), expected, "window {:?}..{:?}", valid_from, valid_to);
        }
    }

    #[tokio::test]
    async fn test_promo_code_usage_cap() {
        let mut code = discount_code("SAVE10");
        code.max_usage = Some(3);

        let at_cap = service(
            InMemoryCodeRepository::default()
                .with_discount(code.clone())
                .with_usage(code.id, 1, 3),
            now(),
        );
        let check = at_cap.resolve_code(&event_scope(), Some("SAVE10")).await.unwrap();
        assert_eq!(check, CodeCheck::Rejected(CodeError::InvalidOrExpiredCode));

        let below_cap = service(
            InMemoryCodeRepository::default()
                .with_discount(code.clone())
                .with_usage(code.id, 1, 2),
            now(),
        );
        let check = below_cap.resolve_code(&event_scope(), Some("SAVE10")).await.unwrap();
        assert_eq!(check, CodeCheck::Accepted(ResolvedCode::Discount(code)));
    }

    #[tokio::test]
    async fn test_usage_is_scoped_to_restricted_categories() {
        let mut code = discount_code("SAVE10");
        code.max_usage = Some(2);
        code.categories = vec![3];

        let repository = InMemoryCodeRepository::default()
            .with_discount(code.clone())
            .with_usage(code.id, 3, 1)
            .with_usage(code.id, 4, 10);
        let service = service(repository, now());

        assert_eq!(service.confirmed_usage(&code).await.unwrap(), 1);
        assert_eq!(service.remaining_usage(&code).await.unwrap(), Some(1));
        assert!(service
            .resolve_code(&event_scope(), Some("SAVE10"))
            .await
            .unwrap()
            .is_success());
    }

    #[tokio::test]
    async fn test_unknown_code_is_rejected() {
        let service = service(InMemoryCodeRepository::default(), now());

        let check = service.resolve_code(&event_scope(), Some("NOPE")).await.unwrap();
        assert_eq!(check, CodeCheck::Rejected(CodeError::InvalidOrExpiredCode));
    }

    #[tokio::test]
    async fn test_codes_of_other_organizations_are_not_found() {
        let mut code = discount_code("SAVE10");
        code.event_id = None;
        code.organization_id = 99;
        let service = service(InMemoryCodeRepository::default().with_discount(code), now());

        let check = service.resolve_code(&event_scope(), Some("SAVE10")).await.unwrap();
        assert!(!check.is_success());
    }

    #[tokio::test]
    async fn test_uncapped_code_has_no_remaining_usage() {
        let code = discount_code("SAVE10");
        let service = service(InMemoryCodeRepository::default(), now());

        assert_eq!(service.remaining_usage(&code).await.unwrap(), None);
        assert!(!service.is_usage_exceeded(&code).await.unwrap());
    }
}
