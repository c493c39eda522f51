use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::configuration::{ConfigurationKey, ConfigurationLevel, ConfigurationService};
use crate::features::events::{Event, EventService};
use crate::features::promo_codes::{
    max_tickets_for_category, should_apply_discount, should_display_restricted_category,
    PromoCodeService, ResolvedCode,
};
use crate::features::ticket_categories::dtos::{
    AdditionalServiceDto, ItemsByCategoryDto, TicketCategoryDto, TicketCategoryForWaitingListDto,
};
use crate::features::ticket_categories::models::{
    AdditionalService, AdditionalServiceText, AdditionalServiceTextType, SaleableAdditionalService,
    SaleableTicketCategory, TicketCategory,
};
use crate::features::ticket_categories::services::{
    display_waiting_queue_form, is_pre_sales, waiting_list_categories, WaitingQueueSettings,
};
use crate::shared::clock::Clock;
use crate::shared::constants::DEFAULT_MAX_TICKETS_PER_RESERVATION;
use crate::shared::i18n::event_languages;
use crate::shared::markdown;

const CATEGORY_COLUMNS: &str = r#"
    id, event_id, name, inception, expiration, max_tickets, price_cts,
    access_restricted, bounded, status, ordinal
"#;

/// Service for the ticket selection step: categories, supplements and
/// waiting list availability
pub struct TicketCategoryService {
    pool: PgPool,
    events: Arc<EventService>,
    promo_codes: Arc<PromoCodeService>,
    configuration: Arc<ConfigurationService>,
    clock: Arc<dyn Clock>,
}

impl TicketCategoryService {
    pub fn new(
        pool: PgPool,
        events: Arc<EventService>,
        promo_codes: Arc<PromoCodeService>,
        configuration: Arc<ConfigurationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pool,
            events,
            promo_codes,
            configuration,
            clock,
        }
    }

    /// Items a buyer can pick for an event, as unlocked and discounted by `code`.
    ///
    /// A rejected code is ignored: the listing is then the one without any code.
    pub async fn list_items(&self, short_name: &str, code: Option<&str>) -> Result<ItemsByCategoryDto> {
        let event = self.events.get_visible(short_name).await?;
        let now = self.clock.now_utc();

        let check = self.promo_codes.resolve_code(&event.scope(), code).await?;
        if let Some(error) = check.error() {
            tracing::debug!("Listing categories of event {} without code: {}", event.id, error);
        }
        let resolved = check.into_code();

        let (categories, services, waiting_queue) = tokio::try_join!(
            self.saleable_categories(&event, &resolved, now),
            self.find_additional_services(event.id),
            self.waiting_queue_settings(&event),
        )?;

        let category_ids: Vec<i32> = categories.iter().map(|c| c.id()).collect();
        let service_ids: Vec<i32> = services.iter().map(|s| s.id).collect();
        let (mut descriptions, mut texts) = tokio::try_join!(
            self.find_category_descriptions(&category_ids),
            self.find_additional_service_texts(&service_ids),
        )?;

        let languages = event_languages(&event.languages);
        let zone = event.zone();

        let mut ticket_categories = Vec::new();
        let mut expired_categories = Vec::new();
        for stc in &categories {
            let description = descriptions.remove(&stc.id()).unwrap_or_default();
            let dto = TicketCategoryDto::new(stc, description, &languages, zone);
            if stc.expired {
                expired_categories.push(dto);
            } else {
                ticket_categories.push(dto);
            }
        }

        let discount = resolved.discount();
        let additional_services = services
            .into_iter()
            .map(|service| SaleableAdditionalService::new(&event, service, discount, now))
            .filter(|sas| !sas.expired)
            .map(|sas| {
                let mut service_texts = texts.remove(&sas.id()).unwrap_or_default();
                let title = service_texts
                    .remove(&AdditionalServiceTextType::Title)
                    .unwrap_or_default();
                let description = markdown::render_all(
                    service_texts
                        .remove(&AdditionalServiceTextType::Description)
                        .unwrap_or_default(),
                );
                AdditionalServiceDto::new(&sas, title, description, &languages, zone)
            })
            .collect();

        Ok(ItemsByCategoryDto {
            ticket_categories,
            expired_categories,
            additional_services,
            waiting_list: display_waiting_queue_form(&event, &categories, waiting_queue, now),
            pre_sales: is_pre_sales(&categories, now),
            ticket_categories_for_waiting_list: waiting_list_categories(&categories)
                .map(TicketCategoryForWaitingListDto::from)
                .collect(),
        })
    }

    /// Active categories visible with `code`, with availability, caps and
    /// applicable discount resolved
    pub async fn saleable_categories(
        &self,
        event: &Event,
        code: &ResolvedCode,
        now: DateTime<Utc>,
    ) -> Result<Vec<SaleableTicketCategory>> {
        let visible: Vec<TicketCategory> = self
            .find_active_categories(event.id)
            .await?
            .into_iter()
            .filter(|c| !c.access_restricted || should_display_restricted_category(code, c))
            .collect();

        let remaining_usage = match code.discount() {
            Some(discount) => self.promo_codes.remaining_usage(discount).await?,
            None => None,
        };
        let special_price_used = code.special_price().is_some();

        try_join_all(visible.into_iter().map(|category| async move {
            let (available, configured_max) = tokio::try_join!(
                self.available_tickets(&category),
                self.max_tickets_per_reservation(event, category.id),
            )?;

            let discount = code
                .discount()
                .filter(|d| should_apply_discount(d, &category))
                .cloned();
            let category_usage = discount.as_ref().and(remaining_usage);
            let max_tickets =
                max_tickets_for_category(configured_max, special_price_used, category_usage);

            Ok::<_, AppError>(SaleableTicketCategory::new(
                category, now, event, available, max_tickets, discount,
            ))
        }))
        .await
    }

    pub async fn find_active_categories(&self, event_id: i32) -> Result<Vec<TicketCategory>> {
        sqlx::query_as::<_, TicketCategory>(&format!(
            r#"
            SELECT {}
            FROM ticket_categories
            WHERE event_id = $1 AND status = 'ACTIVE'
            ORDER BY ordinal, inception, id
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load ticket categories: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn find_additional_services(&self, event_id: i32) -> Result<Vec<AdditionalService>> {
        sqlx::query_as::<_, AdditionalService>(
            r#"
            SELECT id, event_id, price_cts, fix_price, ordinal, available_qty,
                   max_qty_per_order, inception_ts, expiration_ts, vat, vat_applies,
                   service_type, supplement_policy
            FROM additional_services
            WHERE event_id = $1
            ORDER BY ordinal, id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load additional services: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Per-reservation maximum, which can be overridden per category
    pub async fn max_tickets_per_reservation(&self, event: &Event, category_id: i32) -> Result<i32> {
        let value = self
            .configuration
            .get_int(
                ConfigurationLevel::ticket_category(event.organization_id, event.id, category_id),
                ConfigurationKey::MaxAmountOfTicketsByReservation,
                i64::from(DEFAULT_MAX_TICKETS_PER_RESERVATION),
            )
            .await?;
        Ok(value.clamp(0, i64::from(i32::MAX)) as i32)
    }

    /// Free tickets a buyer can still get. Bounded categories own their
    /// tickets; unbounded ones draw from the event's unassigned pool.
    async fn available_tickets(&self, category: &TicketCategory) -> Result<i64> {
        let query = if category.bounded {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM tickets WHERE event_id = $1 AND category_id = $2 AND status = 'FREE'",
            )
            .bind(category.event_id)
            .bind(category.id)
        } else {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM tickets WHERE event_id = $1 AND category_id IS NULL AND status = 'FREE'",
            )
            .bind(category.event_id)
        };

        query.fetch_one(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to count available tickets: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn waiting_queue_settings(&self, event: &Event) -> Result<WaitingQueueSettings> {
        let snapshot = self
            .configuration
            .load(
                event.configuration_level(),
                &[
                    ConfigurationKey::EnableWaitingQueue,
                    ConfigurationKey::EnablePreRegistration,
                ],
            )
            .await?;

        Ok(WaitingQueueSettings {
            waiting_queue_enabled: snapshot.get_bool(ConfigurationKey::EnableWaitingQueue, false),
            pre_registration_enabled: snapshot
                .get_bool(ConfigurationKey::EnablePreRegistration, false),
        })
    }

    /// Rendered descriptions keyed by category id, then language
    async fn find_category_descriptions(
        &self,
        category_ids: &[i32],
    ) -> Result<HashMap<i32, HashMap<String, String>>> {
        if category_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String, String)> = sqlx::query_as(
            r#"
            SELECT ticket_category_id, locale, description
            FROM ticket_category_descriptions
            WHERE ticket_category_id = ANY($1)
            "#,
        )
        .bind(category_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load ticket category descriptions: {:?}", e);
            AppError::Database(e)
        })?;

        let mut grouped: HashMap<i32, HashMap<String, String>> = HashMap::new();
        for (category_id, locale, description) in rows {
            grouped
                .entry(category_id)
                .or_default()
                .insert(locale, markdown::render(&description));
        }
        Ok(grouped)
    }

    async fn find_additional_service_texts(
        &self,
        service_ids: &[i32],
    ) -> Result<HashMap<i32, HashMap<AdditionalServiceTextType, HashMap<String, String>>>> {
        if service_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, AdditionalServiceText>(
            r#"
            SELECT additional_service_id, locale, text_type, value
            FROM additional_service_texts
            WHERE additional_service_id = ANY($1)
            "#,
        )
        .bind(service_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load additional service texts: {:?}", e);
            AppError::Database(e)
        })?;

        let mut grouped: HashMap<i32, HashMap<AdditionalServiceTextType, HashMap<String, String>>> =
            HashMap::new();
        for text in rows {
            grouped
                .entry(text.additional_service_id)
                .or_default()
                .entry(text.text_type)
                .or_default()
                .insert(text.locale, text.value);
        }
        Ok(grouped)
    }
}
