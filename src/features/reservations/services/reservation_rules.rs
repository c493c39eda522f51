//! Validation of a ticket selection against what is currently on sale.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::features::events::Event;
use crate::features::promo_codes::models::SpecialPriceStatus;
use crate::features::promo_codes::ResolvedCode;
use crate::features::reservations::dtos::ReservationFormDto;
use crate::features::reservations::models::{
    ReservationError, ReservationPlan, ServiceSelection, TicketSelection,
};
use crate::features::ticket_categories::models::gross_price;
use crate::features::ticket_categories::{
    SaleableAdditionalService, SaleableTicketCategory, TicketCategory,
};
use crate::shared::constants::DEFAULT_RESERVATION_TIMEOUT_MINUTES;

/// What a selection is checked against
pub struct ReservationContext<'a> {
    pub event: &'a Event,
    pub code: &'a ResolvedCode,
    /// Every active category of the event, restricted ones included
    pub active_categories: &'a [TicketCategory],
    /// Categories visible with the submitted code
    pub saleable: &'a [SaleableTicketCategory],
    pub services: &'a [SaleableAdditionalService],
    pub max_per_reservation: i32,
}

/// Turn a form into a reservation plan, or every reason it cannot be one.
///
/// Amounts for the same category, and quantities for the same additional
/// service, are added up; entries with a missing id or a non-positive amount
/// are ignored. Ticket availability is not checked here, it is only known
/// once tickets are claimed.
pub fn plan_reservation(
    form: &ReservationFormDto,
    ctx: &ReservationContext<'_>,
) -> Result<ReservationPlan, Vec<ReservationError>> {
    let requested = merge_amounts(
        form.reservation
            .iter()
            .map(|item| (item.ticket_category_id, item.amount)),
    );

    if requested.is_empty() {
        return Err(vec![ReservationError::SelectAtLeastOne]);
    }

    let mut errors = Vec::new();
    let total: i64 = requested.values().sum();
    if total > i64::from(ctx.max_per_reservation) {
        errors.push(ReservationError::OverMaximum);
    }

    let mut plan = ReservationPlan::default();
    for (&category_id, &amount) in &requested {
        match ctx.saleable.iter().find(|c| c.id() == category_id) {
            Some(stc) if !stc.expired && !stc.sale_in_future => {
                match within_cap(amount, stc.max_tickets) {
                    Some(amount) => plan.tickets.push(ticket_selection(ctx, stc, amount)),
                    None => push_once(&mut errors, ReservationError::OverMaximum),
                }
            }
            Some(_) => errors.push(ReservationError::CategoryNotSaleable(category_id)),
            None => {
                let restricted = ctx
                    .active_categories
                    .iter()
                    .any(|c| c.id == category_id && c.access_restricted);
                errors.push(if restricted {
                    ReservationError::AccessRestricted(category_id)
                } else {
                    ReservationError::CategoryNotSaleable(category_id)
                });
            }
        }
    }

    let services = merge_amounts(
        form.additional_service
            .iter()
            .map(|item| (item.additional_service_id, item.quantity)),
    );
    for (&service_id, &quantity) in &services {
        let offered = ctx
            .services
            .iter()
            .find(|s| s.id() == service_id && !s.expired && !s.sale_in_future);

        let Some(sas) = offered else {
            errors.push(ReservationError::AdditionalServiceNotFound(service_id));
            continue;
        };

        match within_cap(quantity, sas.service.max_qty_per_order) {
            Some(quantity) => plan.services.push(ServiceSelection {
                additional_service_id: service_id,
                quantity,
                src_price_cts: sas.service.price_cts,
                final_price_cts: sas.discounted_price_cts.unwrap_or(sas.final_price_cts),
            }),
            None => push_once(&mut errors, ReservationError::OverMaximum),
        }
    }

    if errors.is_empty() {
        Ok(plan)
    } else {
        Err(errors)
    }
}

/// Reservation states holding tickets that count against a promo code's
/// `max_usage` while a new reservation is written. Pending holds are included
/// so two concurrent reservations cannot both take the last uses.
pub const USAGE_HOLDING_STATUSES: &[&str] = &[
    "PENDING",
    "IN_PAYMENT",
    "EXTERNAL_PROCESSING",
    "OFFLINE_PAYMENT",
    "DEFERRED_OFFLINE_PAYMENT",
    "COMPLETE",
    "STUCK",
];

/// A special price can only be claimed while it is still FREE
pub fn check_special_price_claimable(
    status: Option<SpecialPriceStatus>,
) -> Result<(), ReservationError> {
    match status {
        Some(SpecialPriceStatus::Free) => Ok(()),
        _ => Err(ReservationError::CodeNotFound),
    }
}

/// `used` tickets already hold the code; `requested` more would be added
pub fn check_discount_usage(
    used: i64,
    requested: i64,
    max_usage: Option<i32>,
) -> Result<(), ReservationError> {
    match max_usage {
        Some(max) if used.saturating_add(requested) > i64::from(max) => {
            Err(ReservationError::DiscountUsageExceeded)
        }
        _ => Ok(()),
    }
}

pub fn check_claimed_tickets(
    selection: &TicketSelection,
    claimed: u64,
) -> Result<(), ReservationError> {
    if claimed < u64::try_from(selection.amount).unwrap_or(0) {
        return Err(ReservationError::NotEnoughTickets(selection.category_id));
    }
    Ok(())
}

/// Expiration of a new pending reservation. Out-of-range timeouts fall back
/// to the default.
pub fn reservation_validity(now: DateTime<Utc>, timeout_minutes: i64) -> DateTime<Utc> {
    let timeout = match Duration::try_minutes(timeout_minutes) {
        Some(timeout) if timeout_minutes > 0 => timeout,
        _ => Duration::minutes(DEFAULT_RESERVATION_TIMEOUT_MINUTES),
    };
    now.checked_add_signed(timeout)
        .unwrap_or_else(|| now + Duration::minutes(DEFAULT_RESERVATION_TIMEOUT_MINUTES))
}

/// Sum positive amounts per id, in `i64` so large inputs cannot overflow
fn merge_amounts(items: impl Iterator<Item = (Option<i32>, Option<i32>)>) -> BTreeMap<i32, i64> {
    let mut merged: BTreeMap<i32, i64> = BTreeMap::new();
    for item in items {
        if let (Some(id), Some(amount)) = item {
            if amount > 0 {
                *merged.entry(id).or_default() += i64::from(amount);
            }
        }
    }
    merged
}

/// The amount as `i32` when it does not exceed `cap`
fn within_cap(amount: i64, cap: i32) -> Option<i32> {
    if amount > i64::from(cap) {
        return None;
    }
    i32::try_from(amount).ok()
}

fn ticket_selection(
    ctx: &ReservationContext<'_>,
    stc: &SaleableTicketCategory,
    amount: i32,
) -> TicketSelection {
    let special_price = ctx
        .code
        .special_price()
        .filter(|sp| sp.ticket_category_id == stc.id());

    let final_price_cts = match special_price {
        Some(sp) => gross_price(ctx.event, sp.price_cts),
        None => stc.discounted_price_cts().unwrap_or(stc.final_price_cts),
    };

    TicketSelection {
        category_id: stc.id(),
        bounded: stc.category.bounded,
        amount,
        src_price_cts: stc.category.price_cts,
        final_price_cts,
        discounted: stc.discount.is_some(),
        special_price_id: special_price.map(|sp| sp.id),
    }
}

fn push_once(errors: &mut Vec<ReservationError>, error: ReservationError) {
    if !errors.contains(&error) {
        errors.push(error);
    }
}
