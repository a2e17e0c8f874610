//! Value types shared across the planner.

use serde::{Deserialize, Serialize};

/// Default on-site duration for a stop that does not specify one.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and within their ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `lat,lng` with six decimals, the form mapping links and logs use.
    pub fn to_lat_lng(&self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Delivery,
    Pickup,
    TechnicalAdvisory,
    CommercialVisit,
}

impl StopKind {
    pub const ALL: [StopKind; 4] = [
        StopKind::Delivery,
        StopKind::Pickup,
        StopKind::TechnicalAdvisory,
        StopKind::CommercialVisit,
    ];

    /// Label sent to the remote optimizer.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopKind::Delivery => "delivery",
            StopKind::Pickup => "pickup",
            StopKind::TechnicalAdvisory => "technical_advisory",
            StopKind::CommercialVisit => "commercial_visit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    #[default]
    Pending,
    EnRoute,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// One field task to be visited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub kind: StopKind,
    pub title: String,
    pub address: String,
    pub coordinates: Coordinate,
    /// Unix timestamp. Advisory only; never used for ordering.
    pub scheduled_at: Option<i64>,
    pub status: StopStatus,
    pub priority: Priority,
    /// Seconds from midnight.
    pub time_window: Option<(i32, i32)>,
    pub assigned_vehicle_id: Option<String>,
    pub assigned_driver_id: Option<String>,
    pub estimated_duration_minutes: u32,
}

impl Stop {
    pub fn new(
        id: impl Into<String>,
        kind: StopKind,
        title: impl Into<String>,
        coordinates: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            address: String::new(),
            coordinates,
            scheduled_at: None,
            status: StopStatus::Pending,
            priority: Priority::Normal,
            time_window: None,
            assigned_vehicle_id: None,
            assigned_driver_id: None,
            estimated_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration_minutes = minutes.max(1);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_time_window(mut self, start: i32, end: i32) -> Self {
        self.time_window = Some((start, end));
        self
    }

    pub fn with_status(mut self, status: StopStatus) -> Self {
        self.status = status;
        self
    }
}

/// Vehicle descriptor forwarded to the optimizer and used for fuel estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub capacity_label: String,
    pub fuel_efficiency_km_per_liter: f64,
}

impl Default for VehicleInfo {
    fn default() -> Self {
        Self {
            capacity_label: "standard".to_string(),
            fuel_efficiency_km_per_liter: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationConstraints {
    pub max_time_minutes: Option<u32>,
    pub prioritize_urgent: bool,
}

/// Which path produced an [`OptimizationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultSource {
    Heuristic,
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub ordered_stop_ids: Vec<String>,
    pub total_distance_km: f64,
    pub estimated_time_minutes: u32,
    pub fuel_estimate_liters: f64,
    pub cost_estimate: f64,
    pub suggestions: Vec<String>,
    pub reasoning: Option<String>,
    pub source: ResultSource,
}

impl OptimizationResult {
    /// Zero-metric heuristic result, returned for an empty stop set.
    pub fn empty() -> Self {
        Self {
            ordered_stop_ids: Vec::new(),
            total_distance_km: 0.0,
            estimated_time_minutes: 0,
            fuel_estimate_liters: 0.0,
            cost_estimate: 0.0,
            suggestions: Vec::new(),
            reasoning: None,
            source: ResultSource::Heuristic,
        }
    }

    /// True when distance, fuel and cost are finite and non-negative.
    pub fn has_valid_metrics(&self) -> bool {
        [
            self.total_distance_km,
            self.fuel_estimate_liters,
            self.cost_estimate,
        ]
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0)
    }
}
