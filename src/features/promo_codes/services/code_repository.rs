use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::promo_codes::models::{EventScope, PromoCodeDiscount, SpecialPrice};

/// Lookups needed to resolve a code.
///
/// Every method is a read-only point query; implementations must not mutate.
#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Event id, organization and timezone for a public short name
    async fn find_event_scope(&self, short_name: &str) -> Result<Option<EventScope>>;

    async fn find_special_price_by_code(&self, code: &str) -> Result<Option<SpecialPrice>>;

    /// Promo code defined on the event, or else on the event's organization
    async fn find_promo_code_discount(
        &self,
        event_id: i32,
        organization_id: i32,
        code: &str,
    ) -> Result<Option<PromoCodeDiscount>>;

    async fn is_category_active_and_exists(&self, category_id: i32, event_id: i32)
        -> Result<bool>;

    /// Tickets in confirmed reservations using the code, limited to the
    /// given categories when present
    async fn count_confirmed_usage(
        &self,
        discount_id: i32,
        restricted_categories: Option<&[i32]>,
    ) -> Result<i64>;
}

/// Postgres-backed code lookups
pub struct PgCodeRepository {
    pool: PgPool,
}

impl PgCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CodeRepository for PgCodeRepository {
    async fn find_event_scope(&self, short_name: &str) -> Result<Option<EventScope>> {
        sqlx::query_as::<_, EventScope>(
            r#"
            SELECT id, organization_id, time_zone
            FROM events
            WHERE short_name = $1
            "#,
        )
        .bind(short_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find event scope: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_special_price_by_code(&self, code: &str) -> Result<Option<SpecialPrice>> {
        sqlx::query_as::<_, SpecialPrice>(
            r#"
            SELECT id, code, price_cts, ticket_category_id, status
            FROM special_prices
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find special price: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_promo_code_discount(
        &self,
        event_id: i32,
        organization_id: i32,
        code: &str,
    ) -> Result<Option<PromoCodeDiscount>> {
        // Event-level codes shadow organization-level ones with the same text
        sqlx::query_as::<_, PromoCodeDiscount>(
            r#"
            SELECT id, promo_code, event_id, organization_id, valid_from, valid_to,
                   discount_amount, discount_type, categories, max_usage, code_type,
                   hidden_category_id, description
            FROM promo_codes
            WHERE promo_code = $1
              AND (event_id = $2 OR (event_id IS NULL AND organization_id = $3))
            ORDER BY event_id NULLS LAST
            LIMIT 1
            "#,
        )
        .bind(code)
        .bind(event_id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find promo code: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn is_category_active_and_exists(
        &self,
        category_id: i32,
        event_id: i32,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM ticket_categories
                WHERE id = $1 AND event_id = $2 AND status = 'ACTIVE'
            )
            "#,
        )
        .bind(category_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check ticket category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn count_confirmed_usage(
        &self,
        discount_id: i32,
        restricted_categories: Option<&[i32]>,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(t.id)
            FROM tickets t
            JOIN tickets_reservation tr ON tr.id = t.tickets_reservation_id
            WHERE tr.promo_code_id = $1
              AND tr.status IN ('IN_PAYMENT', 'EXTERNAL_PROCESSING', 'OFFLINE_PAYMENT',
                                'DEFERRED_OFFLINE_PAYMENT', 'COMPLETE', 'STUCK')
              AND ($2::INTEGER[] IS NULL OR t.category_id = ANY($2))
            "#,
        )
        .bind(discount_id)
        .bind(restricted_categories.map(<[i32]>::to_vec))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count promo code usage: {:?}", e);
            AppError::Database(e)
        })
    }
}
