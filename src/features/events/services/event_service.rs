use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::configuration::{ConfigurationKey, ConfigurationService};
use crate::features::events::dtos::{
    AssignmentConfigurationDto, BasicEventInfoDto, CaptchaConfigurationDto, EventDetailDto,
    FormattedEventDatesDto, InvoicingConfigurationDto, PromotionsConfigurationDto,
};
use crate::features::events::models::{Event, MapsProvider, Organization};
use crate::features::events::services::CalendarEntry;
use crate::features::payments::services::bank_account_owner;
use crate::features::payments::PaymentService;
use crate::shared::clock::Clock;
use crate::shared::i18n::{event_languages, find_language, SUPPORTED_LANGUAGES};
use crate::shared::markdown;

const EVENT_COLUMNS: &str = r#"
    id, short_name, display_name, status, organization_id, time_zone, location,
    latitude, longitude, start_ts, end_ts, currency, regular_price_cts, vat_percent,
    vat_included, languages, file_blob_id, website_url, terms_url, privacy_url
"#;

const DETAIL_KEYS: &[ConfigurationKey] = &[
    ConfigurationKey::MapsProvider,
    ConfigurationKey::MapsClientApiKey,
    ConfigurationKey::MapsHereApiKey,
    ConfigurationKey::EnableCaptchaForTicketSelection,
    ConfigurationKey::RecaptchaSecret,
    ConfigurationKey::RecaptchaApiKey,
    ConfigurationKey::BankAccountNr,
    ConfigurationKey::BankAccountOwner,
    ConfigurationKey::InvoiceAddress,
    ConfigurationKey::VatNr,
    ConfigurationKey::GenerateOnlyInvoice,
    ConfigurationKey::EnableEuVatDirective,
    ConfigurationKey::EnableCustomerReference,
    ConfigurationKey::EnableItalyEInvoicing,
    ConfigurationKey::VatNumberIsRequired,
    ConfigurationKey::ForceTicketOwnerAssignmentAtReservation,
    ConfigurationKey::EnableAttendeeAutocomplete,
    ConfigurationKey::EnableTicketTransfer,
    ConfigurationKey::DisplayDiscountCodeBox,
    ConfigurationKey::UsePartnerCodeInsteadOfPromotional,
];

/// Service for the public event catalogue
pub struct EventService {
    pool: PgPool,
    configuration: Arc<ConfigurationService>,
    payments: Arc<PaymentService>,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(
        pool: PgPool,
        configuration: Arc<ConfigurationService>,
        payments: Arc<PaymentService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pool,
            configuration,
            payments,
            clock,
        }
    }

    pub async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Event>> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE short_name = $1",
            EVENT_COLUMNS
        ))
        .bind(short_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find event: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Event by short name, unless missing or disabled
    pub async fn get_visible(&self, short_name: &str) -> Result<Event> {
        self.find_by_short_name(short_name)
            .await?
            .filter(|e| !e.is_disabled())
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", short_name)))
    }

    /// Published events that have not ended yet
    pub async fn list_published(&self) -> Result<Vec<BasicEventInfoDto>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE status = 'PUBLIC' AND end_ts > $1 ORDER BY start_ts, id",
            EVENT_COLUMNS
        ))
        .bind(self.clock.now_utc())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list events: {:?}", e);
            AppError::Database(e)
        })?;

        let languages: Vec<_> = SUPPORTED_LANGUAGES.iter().collect();
        Ok(events
            .into_iter()
            .map(|event| BasicEventInfoDto::new(event, &languages))
            .collect())
    }

    pub async fn get_detail(&self, short_name: &str) -> Result<EventDetailDto> {
        let event = self.get_visible(short_name).await?;

        let (organization, descriptions, snapshot, payment_methods, has_codes) = tokio::try_join!(
            self.find_organization(event.organization_id),
            self.find_descriptions(event.id),
            self.configuration
                .load(event.configuration_level(), DETAIL_KEYS),
            self.payments.available_payment_methods(&event),
            self.has_access_codes(&event),
        )?;

        let provider = MapsProvider::from_config(snapshot.get_string(ConfigurationKey::MapsProvider));
        let maps_key = match provider {
            MapsProvider::Here => snapshot.get_string(ConfigurationKey::MapsHereApiKey),
            _ => snapshot.get_string(ConfigurationKey::MapsClientApiKey),
        };
        let map_url = provider.map_url(&event, maps_key);

        let languages = event_languages(&event.languages);
        let dates = FormattedEventDatesDto::new(&event, &languages);

        Ok(EventDetailDto {
            map_url,
            same_day: event.is_same_day(),
            vat: event.vat().to_string(),
            free: event.is_free_of_charge(),
            content_languages: languages.iter().map(|l| l.code.to_string()).collect(),
            organization: organization.into(),
            description: markdown::render_all(descriptions),
            active_payment_methods: payment_methods,
            bank_account: snapshot
                .get_string(ConfigurationKey::BankAccountNr)
                .unwrap_or_default()
                .to_string(),
            bank_account_owner: bank_account_owner(&snapshot),
            dates,
            invoicing_configuration: InvoicingConfigurationDto::from_snapshot(&snapshot),
            captcha_configuration: CaptchaConfigurationDto::from_snapshot(&snapshot),
            assignment_configuration: AssignmentConfigurationDto::from_snapshot(&snapshot),
            promotions_configuration: PromotionsConfigurationDto::from_snapshot(
                &snapshot, has_codes,
            ),
            short_name: event.short_name,
            display_name: event.display_name,
            file_blob_id: event.file_blob_id,
            location: event.location,
            time_zone: event.time_zone,
            currency: event.currency,
            vat_included: event.vat_included,
            website_url: event.website_url,
            terms_and_conditions_url: event.terms_url,
            privacy_policy_url: event.privacy_url,
        })
    }

    /// Content languages of an event, as language codes
    pub async fn get_languages(&self, short_name: &str) -> Result<Vec<String>> {
        let languages: Vec<String> = self
            .find_by_short_name(short_name)
            .await?
            .map(|event| {
                event
                    .languages
                    .iter()
                    .filter_map(|tag| find_language(tag))
                    .map(|lang| lang.code.to_string())
                    .collect()
            })
            .unwrap_or_default();

        if languages.is_empty() {
            return Err(AppError::NotFound(format!(
                "No languages for event '{}'",
                short_name
            )));
        }
        Ok(languages)
    }

    /// Calendar entry for an event; the ticket, if found, names its category
    pub async fn get_calendar_entry(
        &self,
        short_name: &str,
        locale: &str,
        ticket_id: Option<&str>,
    ) -> Result<CalendarEntry> {
        let event = self
            .find_by_short_name(short_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", short_name)))?;

        let ticket_uuid = ticket_id.and_then(|id| Uuid::parse_str(id.trim()).ok());

        let (description, category_name, organization) = tokio::try_join!(
            self.find_description(event.id, locale),
            self.find_ticket_category_name(event.id, ticket_uuid),
            self.find_organization(event.organization_id),
        )?;

        Ok(CalendarEntry::new(
            &event,
            category_name.as_deref(),
            description.unwrap_or_default(),
            Some(organization),
        ))
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now_utc()
    }

    async fn find_organization(&self, organization_id: i32) -> Result<Organization> {
        sqlx::query_as::<_, Organization>("SELECT id, name, email FROM organizations WHERE id = $1")
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find organization: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::Internal(format!("Organization {} not found", organization_id)))
    }

    async fn find_descriptions(&self, event_id: i32) -> Result<HashMap<String, String>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT locale, description FROM event_descriptions WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load event descriptions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().collect())
    }

    async fn find_description(&self, event_id: i32, locale: &str) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT description FROM event_descriptions WHERE event_id = $1 AND locale = $2",
        )
        .bind(event_id)
        .bind(locale)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load event description: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_ticket_category_name(
        &self,
        event_id: i32,
        ticket_uuid: Option<Uuid>,
    ) -> Result<Option<String>> {
        let Some(ticket_uuid) = ticket_uuid else {
            return Ok(None);
        };

        sqlx::query_scalar::<_, String>(
            r#"
            SELECT tc.name
            FROM tickets t
            JOIN ticket_categories tc ON tc.id = t.category_id
            WHERE t.uuid = $1 AND t.event_id = $2
            "#,
        )
        .bind(ticket_uuid)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find ticket category: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Whether the event has restricted categories or promo codes a buyer could enter
    async fn has_access_codes(&self, event: &Event) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM ticket_categories
                WHERE event_id = $1 AND access_restricted
            ) OR EXISTS(
                SELECT 1 FROM promo_codes
                WHERE event_id = $1 OR (event_id IS NULL AND organization_id = $2)
            )
            "#,
        )
        .bind(event.id)
        .bind(event.organization_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check promo codes: {:?}", e);
            AppError::Database(e)
        })
    }
}
