use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::core::error::Result;
use crate::features::configuration::models::{ConfigurationEntry, ConfigurationKey, ConfigurationScope};
use crate::features::configuration::services::ConfigurationSnapshot;
use crate::features::events::models::{Event, EventStatus};
use crate::features::promo_codes::models::{
    CodeType, DiscountType, EventScope, PromoCodeDiscount, SpecialPrice, SpecialPriceStatus,
};
use crate::features::promo_codes::services::CodeRepository;
use crate::features::ticket_categories::models::{
    AdditionalService, AdditionalServiceType, SupplementPolicy, TicketCategory,
    TicketCategoryStatus,
};
use crate::shared::clock::Clock;

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn event_scope() -> EventScope {
    EventScope {
        id: 1,
        organization_id: 1,
        time_zone: "Europe/Zurich".to_string(),
    }
}

pub fn sample_event() -> Event {
    Event {
        id: 1,
        short_name: "summit".to_string(),
        display_name: "Tech Summit".to_string(),
        status: EventStatus::Public,
        organization_id: 1,
        time_zone: "Europe/Zurich".to_string(),
        location: "Palazzo dei Congressi, Lugano".to_string(),
        latitude: None,
        longitude: None,
        start_ts: Utc.with_ymd_and_hms(2026, 9, 10, 7, 0, 0).unwrap(),
        end_ts: Utc.with_ymd_and_hms(2026, 9, 11, 16, 0, 0).unwrap(),
        currency: "CHF".to_string(),
        regular_price_cts: 10_000,
        vat_percent: Some(Decimal::new(77, 1)),
        vat_included: true,
        languages: vec!["en".to_string(), "it".to_string()],
        file_blob_id: None,
        website_url: Some("https://summit.example.org".to_string()),
        terms_url: Some("https://summit.example.org/terms".to_string()),
        privacy_url: None,
    }
}

/// Active, unbounded category of event 1, on sale during the first half of 2026
pub fn ticket_category(id: i32, access_restricted: bool) -> TicketCategory {
    TicketCategory {
        id,
        event_id: 1,
        name: format!("Category {}", id),
        inception: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        expiration: Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(),
        max_tickets: 100,
        price_cts: 10_000,
        access_restricted,
        bounded: false,
        status: TicketCategoryStatus::Active,
        ordinal: id,
    }
}

pub fn additional_service(id: i32) -> AdditionalService {
    AdditionalService {
        id,
        event_id: 1,
        price_cts: 1_500,
        fix_price: true,
        ordinal: id,
        available_qty: -1,
        max_qty_per_order: 5,
        inception_ts: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        expiration_ts: Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(),
        vat: None,
        vat_applies: true,
        service_type: AdditionalServiceType::Supplement,
        supplement_policy: Some(SupplementPolicy::OptionalMaxAmountPerTicket),
    }
}

pub fn special_price(code: &str, ticket_category_id: i32, status: SpecialPriceStatus) -> SpecialPrice {
    SpecialPrice {
        id: 100 + ticket_category_id,
        code: code.to_string(),
        price_cts: 0,
        ticket_category_id,
        status,
    }
}

/// 10% event-level discount on every category, no cap and no window
pub fn discount_code(code: &str) -> PromoCodeDiscount {
    PromoCodeDiscount {
        id: 10,
        promo_code: code.to_string(),
        event_id: Some(1),
        organization_id: 1,
        valid_from: None,
        valid_to: None,
        discount_amount: 10,
        discount_type: DiscountType::Percentage,
        categories: vec![],
        max_usage: None,
        code_type: CodeType::Discount,
        hidden_category_id: None,
        description: None,
    }
}

/// Snapshot holding the given values at event scope
pub fn configuration_snapshot(values: &[(ConfigurationKey, &str)]) -> ConfigurationSnapshot {
    ConfigurationSnapshot::from_entries(
        values
            .iter()
            .map(|(key, value)| ConfigurationEntry {
                scope: ConfigurationScope::Event,
                c_key: key.as_str().to_string(),
                c_value: value.to_string(),
            })
            .collect(),
    )
}

/// In-memory code lookups for service and handler tests
#[derive(Default)]
pub struct InMemoryCodeRepository {
    events: HashMap<String, EventScope>,
    special_prices: Vec<SpecialPrice>,
    discounts: Vec<PromoCodeDiscount>,
    active_categories: Vec<(i32, i32)>,
    /// (discount id, category id, confirmed tickets)
    usage: Vec<(i32, i32, i64)>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryCodeRepository {
    pub fn with_event(mut self, short_name: &str, scope: EventScope) -> Self {
        self.events.insert(short_name.to_string(), scope);
        self
    }

    pub fn with_special_price(mut self, special_price: SpecialPrice) -> Self {
        self.special_prices.push(special_price);
        self
    }

    pub fn with_discount(mut self, discount: PromoCodeDiscount) -> Self {
        self.discounts.push(discount);
        self
    }

    pub fn with_active_category(mut self, category_id: i32, event_id: i32) -> Self {
        self.active_categories.push((category_id, event_id));
        self
    }

    pub fn with_usage(mut self, discount_id: i32, category_id: i32, tickets: i64) -> Self {
        self.usage.push((discount_id, category_id, tickets));
        self
    }

    /// Counts code lookups performed so far
    pub fn lookup_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.lookups)
    }
}

#[async_trait]
impl CodeRepository for InMemoryCodeRepository {
    async fn find_event_scope(&self, short_name: &str) -> Result<Option<EventScope>> {
        Ok(self.events.get(short_name).cloned())
    }

    async fn find_special_price_by_code(&self, code: &str) -> Result<Option<SpecialPrice>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.special_prices.iter().find(|sp| sp.code == code).cloned())
    }

    async fn find_promo_code_discount(
        &self,
        event_id: i32,
        organization_id: i32,
        code: &str,
    ) -> Result<Option<PromoCodeDiscount>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let matching = |d: &&PromoCodeDiscount| d.promo_code == code;

        let event_level = self
            .discounts
            .iter()
            .filter(matching)
            .find(|d| d.event_id == Some(event_id));
        let organization_level = || {
            self.discounts
                .iter()
                .filter(matching)
                .find(|d| d.event_id.is_none() && d.organization_id == organization_id)
        };

        Ok(event_level.or_else(organization_level).cloned())
    }

    async fn is_category_active_and_exists(
        &self,
        category_id: i32,
        event_id: i32,
    ) -> Result<bool> {
        Ok(self.active_categories.contains(&(category_id, event_id)))
    }

    async fn count_confirmed_usage(
        &self,
        discount_id: i32,
        restricted_categories: Option<&[i32]>,
    ) -> Result<i64> {
        Ok(self
            .usage
            .iter()
            .filter(|(id, category_id, _)| {
                *id == discount_id
                    && restricted_categories.map_or(true, |ids| ids.contains(category_id))
            })
            .map(|(_, _, tickets)| tickets)
            .sum())
    }
}
