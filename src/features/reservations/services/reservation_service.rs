use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::configuration::{ConfigurationKey, ConfigurationService};
use crate::features::events::{Event, EventService};
use crate::features::promo_codes::models::SpecialPriceStatus;
use crate::features::promo_codes::{CodeCheck, PromoCodeService, ResolvedCode};
use crate::features::reservations::dtos::ReservationFormDto;
use crate::features::reservations::models::{ReservationError, ReservationPlan, TicketSelection};
use crate::features::reservations::services::reservation_rules::{
    check_claimed_tickets, check_discount_usage, check_special_price_claimable, plan_reservation,
    reservation_validity, ReservationContext, USAGE_HOLDING_STATUSES,
};
use crate::features::ticket_categories::{SaleableAdditionalService, TicketCategoryService};
use crate::modules::captcha::RecaptchaClient;
use crate::shared::clock::Clock;
use crate::shared::constants::{
    DEFAULT_MAX_TICKETS_PER_RESERVATION, DEFAULT_RESERVATION_TIMEOUT_MINUTES,
};
use crate::shared::i18n::find_language;

const RESERVATION_KEYS: &[ConfigurationKey] = &[
    ConfigurationKey::MaxAmountOfTicketsByReservation,
    ConfigurationKey::ReservationTimeout,
    ConfigurationKey::EnableCaptchaForTicketSelection,
    ConfigurationKey::RecaptchaSecret,
];

/// Result of a reservation attempt the buyer can act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    Created(Uuid),
    Rejected(Vec<ReservationError>),
}

/// Failure while writing a reservation: either the buyer's fault or ours
enum ReserveFailure {
    Rejected(ReservationError),
    App(AppError),
}

impl From<ReservationError> for ReserveFailure {
    fn from(e: ReservationError) -> Self {
        ReserveFailure::Rejected(e)
    }
}

impl From<AppError> for ReserveFailure {
    fn from(e: AppError) -> Self {
        ReserveFailure::App(e)
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::Database(e)
    }
}

/// Service creating pending reservations from a ticket selection
pub struct ReservationService {
    pool: PgPool,
    events: Arc<EventService>,
    ticket_categories: Arc<TicketCategoryService>,
    promo_codes: Arc<PromoCodeService>,
    configuration: Arc<ConfigurationService>,
    captcha: Arc<RecaptchaClient>,
    clock: Arc<dyn Clock>,
}

impl ReservationService {
    pub fn new(
        pool: PgPool,
        events: Arc<EventService>,
        ticket_categories: Arc<TicketCategoryService>,
        promo_codes: Arc<PromoCodeService>,
        configuration: Arc<ConfigurationService>,
        captcha: Arc<RecaptchaClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pool,
            events,
            ticket_categories,
            promo_codes,
            configuration,
            captcha,
            clock,
        }
    }

    /// Validate a selection and, when it is acceptable, hold the tickets in a
    /// new pending reservation
    pub async fn reserve(
        &self,
        short_name: &str,
        form: &ReservationFormDto,
        lang: Option<&str>,
        client_ip: Option<&str>,
    ) -> Result<ReservationOutcome> {
        let event = self.events.get_visible(short_name).await?;
        let now = self.clock.now_utc();

        let scope = event.scope();
        let (check, snapshot) = tokio::try_join!(
            self.promo_codes
                .resolve_code(&scope, form.promo_code.as_deref()),
            self.configuration
                .load(event.configuration_level(), RESERVATION_KEYS),
        )?;

        let mut errors = Vec::new();
        if let CodeCheck::Rejected(error) = &check {
            tracing::debug!("Reservation for event {} with rejected code: {}", event.id, error);
            errors.push(ReservationError::CodeNotFound);
        }

        if let Some(secret) = snapshot.captcha_secret_for_ticket_selection() {
            if !self
                .captcha
                .verify(secret, form.captcha.as_deref(), client_ip)
                .await
            {
                errors.push(ReservationError::CaptchaValidationFailed);
            }
        }

        let code = check.into_code();
        let (active_categories, saleable, services) = tokio::try_join!(
            self.ticket_categories.find_active_categories(event.id),
            self.ticket_categories.saleable_categories(&event, &code, now),
            self.ticket_categories.find_additional_services(event.id),
        )?;
        let services: Vec<SaleableAdditionalService> = services
            .into_iter()
            .map(|s| SaleableAdditionalService::new(&event, s, code.discount(), now))
            .collect();

        let max_per_reservation = snapshot
            .get_int(
                ConfigurationKey::MaxAmountOfTicketsByReservation,
                i64::from(DEFAULT_MAX_TICKETS_PER_RESERVATION),
            )
            .clamp(0, i64::from(i32::MAX)) as i32;

        let context = ReservationContext {
            event: &event,
            code: &code,
            active_categories: &active_categories,
            saleable: &saleable,
            services: &services,
            max_per_reservation,
        };
        let plan = match plan_reservation(form, &context) {
            Ok(plan) => Some(plan),
            Err(plan_errors) => {
                errors.extend(plan_errors);
                None
            }
        };

        let plan = match plan {
            Some(plan) if errors.is_empty() => plan,
            _ => return Ok(ReservationOutcome::Rejected(errors)),
        };

        let timeout = snapshot.get_int(
            ConfigurationKey::ReservationTimeout,
            DEFAULT_RESERVATION_TIMEOUT_MINUTES,
        );
        let validity = reservation_validity(now, timeout);
        let user_language = lang
            .and_then(find_language)
            .map(|l| l.code.to_string());

        match self
            .create_reservation(&event, &code, &plan, validity, user_language.as_deref())
            .await
        {
            Ok(id) => {
                tracing::info!("Reservation {} created for event {}", id, event.id);
                Ok(ReservationOutcome::Created(id))
            }
            Err(ReserveFailure::Rejected(error)) => {
                tracing::debug!("Reservation for event {} refused: {}", event.id, error);
                Ok(ReservationOutcome::Rejected(vec![error]))
            }
            Err(ReserveFailure::App(e)) => Err(e),
        }
    }

    /// Write the reservation in one transaction. Any refusal rolls back
    /// every ticket claimed so far.
    async fn create_reservation(
        &self,
        event: &Event,
        code: &ResolvedCode,
        plan: &ReservationPlan,
        validity: DateTime<Utc>,
        user_language: Option<&str>,
    ) -> std::result::Result<Uuid, ReserveFailure> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if let Some(special_price) = code.special_price() {
            claim_special_price(&mut tx, special_price.id).await?;
        }

        let promo_code_id = match code.discount() {
            Some(discount) => {
                if let Some(max_usage) = discount.max_usage {
                    let used =
                        lock_and_count_usage(&mut tx, discount.id, discount.restricted_categories())
                            .await?;
                    check_discount_usage(used, plan.discounted_tickets(), Some(max_usage))?;
                }
                Some(discount.id)
            }
            None => None,
        };

        let reservation_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO tickets_reservation (id, event_id, validity, status, promo_code_id, user_language)
            VALUES ($1, $2, $3, 'PENDING', $4, $5)
            "#,
        )
        .bind(reservation_id)
        .bind(event.id)
        .bind(validity)
        .bind(promo_code_id)
        .bind(user_language)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to insert reservation"))?;

        for selection in &plan.tickets {
            let claimed =
                claim_tickets(&mut tx, event.id, reservation_id, selection, user_language).await?;
            check_claimed_tickets(selection, claimed)?;
        }

        for selection in &plan.services {
            for _ in 0..selection.quantity {
                sqlx::query(
                    r#"
                    INSERT INTO additional_service_items
                        (uuid, additional_service_id, tickets_reservation_id, event_id,
                         src_price_cts, final_price_cts)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(selection.additional_service_id)
                .bind(reservation_id)
                .bind(event.id)
                .bind(selection.src_price_cts)
                .bind(selection.final_price_cts)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to insert additional service item"))?;
            }
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit reservation"))?;

        Ok(reservation_id)
    }
}

/// Move a FREE special price to PENDING, refusing one taken in the meantime
async fn claim_special_price(
    tx: &mut Transaction<'_, Postgres>,
    special_price_id: i32,
) -> std::result::Result<(), ReserveFailure> {
    let status = sqlx::query_scalar::<_, SpecialPriceStatus>(
        "SELECT status FROM special_prices WHERE id = $1 FOR UPDATE",
    )
    .bind(special_price_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_error("Failed to lock special price"))?;

    check_special_price_claimable(status)?;

    sqlx::query("UPDATE special_prices SET status = 'PENDING' WHERE id = $1")
        .bind(special_price_id)
        .execute(&mut **tx)
        .await
        .map_err(db_error("Failed to update special price"))?;

    Ok(())
}

/// Lock the promo code row so concurrent reservations count usage one at a time
async fn lock_and_count_usage(
    tx: &mut Transaction<'_, Postgres>,
    promo_code_id: i32,
    restricted_categories: Option<&[i32]>,
) -> Result<i64> {
    sqlx::query("SELECT id FROM promo_codes WHERE id = $1 FOR UPDATE")
        .bind(promo_code_id)
        .execute(&mut **tx)
        .await
        .map_err(db_error("Failed to lock promo code"))?;

    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(t.id)
        FROM tickets t
        JOIN tickets_reservation tr ON tr.id = t.tickets_reservation_id
        WHERE tr.promo_code_id = $1
          AND tr.status::TEXT = ANY($3)
          AND ($2::INTEGER[] IS NULL OR t.category_id = ANY($2))
        "#,
    )
    .bind(promo_code_id)
    .bind(restricted_categories.map(<[i32]>::to_vec))
    .bind(USAGE_HOLDING_STATUSES)
    .fetch_one(&mut **tx)
    .await
    .map_err(db_error("Failed to count promo code usage"))
}

/// Claim up to `selection.amount` free tickets, skipping rows other
/// reservations hold locks on. Returns how many were claimed.
async fn claim_tickets(
    tx: &mut Transaction<'_, Postgres>,
    event_id: i32,
    reservation_id: Uuid,
    selection: &TicketSelection,
    user_language: Option<&str>,
) -> Result<u64> {
    let pool_filter = if selection.bounded {
        "category_id = $2"
    } else {
        "category_id IS NULL"
    };

    let query = format!(
        r#"
        UPDATE tickets
        SET status = 'PENDING',
            tickets_reservation_id = $1,
            category_id = $2,
            src_price_cts = $3,
            final_price_cts = $4,
            special_price_id = $5,
            user_language = $6
        WHERE id IN (
            SELECT id FROM tickets
            WHERE event_id = $7 AND status = 'FREE' AND {}
            ORDER BY id
            LIMIT $8
            FOR UPDATE SKIP LOCKED
        )
        "#,
        pool_filter
    );

    let result = sqlx::query(&query)
        .bind(reservation_id)
        .bind(selection.category_id)
        .bind(selection.src_price_cts)
        .bind(selection.final_price_cts)
        .bind(selection.special_price_id)
        .bind(user_language)
        .bind(event_id)
        .bind(i64::from(selection.amount))
        .execute(&mut **tx)
        .await
        .map_err(db_error("Failed to claim tickets"))?;

    Ok(result.rows_affected())
}
