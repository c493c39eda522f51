use std::sync::Arc;

use sqlx::PgPool;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::events::{Event, EventService};
use crate::features::waiting_list::dtos::WaitingQueueSubscriptionDto;
use crate::shared::constants::INVALID_CATEGORY;
use crate::shared::i18n::find_language;
use crate::shared::types::ErrorDescriptor;
use crate::shared::validation::error_descriptors;

const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    /// `false` when the address was already subscribed to the event
    Subscribed(bool),
    Rejected(Vec<ErrorDescriptor>),
}

/// Service for waiting list and pre-registration subscriptions
pub struct WaitingListService {
    pool: PgPool,
    events: Arc<EventService>,
}

impl WaitingListService {
    pub fn new(pool: PgPool, events: Arc<EventService>) -> Self {
        Self { pool, events }
    }

    pub async fn subscribe(
        &self,
        short_name: &str,
        dto: &WaitingQueueSubscriptionDto,
    ) -> Result<SubscriptionOutcome> {
        let event = self
            .events
            .find_by_short_name(short_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", short_name)))?;

        let mut errors = match dto.validate() {
            Ok(()) => Vec::new(),
            Err(e) => error_descriptors(&e),
        };

        if let Some(category_id) = dto.selected_category {
            if !self.is_subscribable_category(&event, category_id).await? {
                errors.push(ErrorDescriptor::new("selectedCategory", INVALID_CATEGORY));
            }
        }

        if !errors.is_empty() {
            return Ok(SubscriptionOutcome::Rejected(errors));
        }

        let language = dto
            .user_language
            .as_deref()
            .and_then(find_language)
            .map_or(FALLBACK_LANGUAGE, |l| l.code);

        let result = sqlx::query(
            r#"
            INSERT INTO waiting_queue
                (event_id, full_name, first_name, last_name, email_address,
                 user_language, selected_category_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'WAITING')
            ON CONFLICT (event_id, email_address) DO NOTHING
            "#,
        )
        .bind(event.id)
        .bind(dto.full_name())
        .bind(dto.first_name.trim())
        .bind(dto.last_name.trim())
        .bind(dto.email.trim())
        .bind(language)
        .bind(dto.selected_category)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to subscribe to waiting list: {:?}", e);
            AppError::Database(e)
        })?;

        let subscribed = result.rows_affected() == 1;
        if subscribed {
            tracing::info!("Waiting list subscription added for event {}", event.id);
        } else {
            tracing::debug!("Duplicate waiting list subscription for event {}", event.id);
        }

        Ok(SubscriptionOutcome::Subscribed(subscribed))
    }

    /// Active, unbounded category of the event
    async fn is_subscribable_category(&self, event: &Event, category_id: i32) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM ticket_categories
                WHERE id = $1 AND event_id = $2 AND status = 'ACTIVE' AND NOT bounded
            )
            "#,
        )
        .bind(category_id)
        .bind(event.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check waiting list category: {:?}", e);
            AppError::Database(e)
        })
    }
}
