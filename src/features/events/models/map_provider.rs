use crate::features::events::models::Event;

/// Provider used to render the static map of an event's location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapsProvider {
    #[default]
    None,
    Google,
    Here,
}

impl MapsProvider {
    /// Parse a configured provider name; unknown values disable maps
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
            Some("GOOGLE") => MapsProvider::Google,
            Some("HERE") => MapsProvider::Here,
            _ => MapsProvider::None,
        }
    }

    /// Static map URL for the event, if it has coordinates and a provider
    pub fn map_url(&self, event: &Event, api_key: Option<&str>) -> Option<String> {
        let (lat, lng) = event.coordinates()?;
        let lat = urlencoding::encode(lat);
        let lng = urlencoding::encode(lng);

        match self {
            MapsProvider::None => None,
            MapsProvider::Google => {
                let key = api_key
                    .map(|k| format!("&key={}", urlencoding::encode(k)))
                    .unwrap_or_default();
                Some(format!(
                    "https://maps.googleapis.com/maps/api/staticmap?center={lat},{lng}{key}&zoom=16&size=400x400&markers=color:blue%7Clabel:E%7C{lat},{lng}"
                ))
            }
            MapsProvider::Here => {
                let key = api_key?;
                Some(format!(
                    "https://image.maps.ls.hereapi.com/mia/1.6/mapview?c={lat},{lng}&z=16&w=400&h=400&poi={lat},{lng}&apikey={}",
                    urlencoding::encode(key)
                ))
            }
        }
    }
}
