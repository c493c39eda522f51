mod event;
mod map_provider;
mod organization;

pub use event::{Event, EventStatus};
pub use map_provider::MapsProvider;
pub use organization::Organization;
