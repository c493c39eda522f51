//! When to offer the waiting list or pre-registration form.

use chrono::{DateTime, Utc};

use crate::features::events::models::Event;
use crate::features::ticket_categories::models::SaleableTicketCategory;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitingQueueSettings {
    pub waiting_queue_enabled: bool,
    pub pre_registration_enabled: bool,
}

/// No category has started selling yet
pub fn is_pre_sales(categories: &[SaleableTicketCategory], now: DateTime<Utc>) -> bool {
    categories
        .iter()
        .map(|c| c.category.inception)
        .min()
        .is_some_and(|first_inception| now < first_inception)
}

/// Before sales start the form is a pre-registration. Afterwards it is the
/// waiting list, shown only while sales are open and every category is sold out.
pub fn display_waiting_queue_form(
    event: &Event,
    categories: &[SaleableTicketCategory],
    settings: WaitingQueueSettings,
    now: DateTime<Utc>,
) -> bool {
    if event.has_ended(now) {
        return false;
    }

    if is_pre_sales(categories, now) {
        return settings.pre_registration_enabled;
    }

    let sales_open = categories
        .iter()
        .map(|c| c.category.expiration)
        .max()
        .is_some_and(|last_expiration| now < last_expiration);

    settings.waiting_queue_enabled && sales_open && no_seats_available(categories)
}

fn no_seats_available(categories: &[SaleableTicketCategory]) -> bool {
    categories
        .iter()
        .filter(|c| !c.expired)
        .all(|c| c.sold_out)
}

/// Categories a waiting list subscriber may pick
pub fn waiting_list_categories(
    categories: &[SaleableTicketCategory],
) -> impl Iterator<Item = &SaleableTicketCategory> {
    categories
        .iter()
        .filter(|c| !c.expired && !c.category.bounded)
}
