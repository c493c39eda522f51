mod calendar;
mod event_service;

pub use calendar::CalendarEntry;
pub use event_service::EventService;
