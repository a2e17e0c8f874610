//! Planner configuration.

use serde::Deserialize;

use crate::haversine::DEFAULT_SPEED_KMH;
use crate::map_link::MapLinkConfig;
use crate::model::{Coordinate, DEFAULT_DURATION_MINUTES};
use crate::optimizer::OptimizerConfig;

/// Center of the default service area (Morelia, MX).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(19.7008, -101.1844);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Position given to stops whose record has no usable coordinates.
    pub default_center: Coordinate,
    pub default_duration_minutes: u32,
    /// Average speed used to turn distance into travel minutes.
    pub assumed_speed_kmh: f64,
    pub fuel_price_per_liter: f64,
    pub map_link: MapLinkConfig,
    /// Remote optimizer; `None` means the heuristic is always used.
    pub optimizer: Option<OptimizerConfig>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            assumed_speed_kmh: DEFAULT_SPEED_KMH,
            fuel_price_per_liter: 24.0,
            map_link: MapLinkConfig::default(),
            optimizer: None,
        }
    }
}

impl PlannerConfig {
    /// Defaults, with the optimizer taken from the environment.
    pub fn from_env() -> Self {
        Self {
            optimizer: OptimizerConfig::from_env(),
            ..Self::default()
        }
    }
}
