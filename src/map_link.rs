//! Deep links into an external mapping app for the current order.

use serde::Deserialize;

use crate::model::Stop;

/// Link returned when there is nothing to show.
pub const EMPTY_LINK: &str = "about:blank";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapLinkConfig {
    pub base_url: String,
    /// Mapping providers cap URL length; stops past this are dropped.
    pub max_stops: usize,
}

impl Default for MapLinkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.google.com/maps".to_string(),
            max_stops: 20,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapLinkBuilder {
    config: MapLinkConfig,
}

impl MapLinkBuilder {
    pub fn new(config: MapLinkConfig) -> Self {
        Self { config }
    }

    /// Directions link: first stop is the origin, last the destination.
    pub fn build_deep_link(&self, itinerary: &[Stop]) -> String {
        let limit = self.config.max_stops.max(1);
        let stops = &itinerary[..itinerary.len().min(limit)];

        let (Some(origin), Some(destination)) = (stops.first(), stops.last()) else {
            return EMPTY_LINK.to_string();
        };

        let mut url = format!(
            "{}/dir/?api=1&origin={}&destination={}",
            self.config.base_url.trim_end_matches('/'),
            origin.coordinates.to_lat_lng(),
            destination.coordinates.to_lat_lng()
        );

        if stops.len() > 2 {
            let waypoints = stops[1..stops.len() - 1]
                .iter()
                .map(|stop| stop.coordinates.to_lat_lng())
                .collect::<Vec<_>>()
                .join("|");
            url.push_str("&waypoints=");
            url.push_str(&waypoints);
        }

        url
    }
}
