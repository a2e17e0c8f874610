//! HTTP adapter for a remote route optimizer.
//!
//! The remote service may be AI-backed or a classical solver; either way its
//! answer is untrusted. The returned order must be a permutation of the
//! request indices or the whole response is discarded.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OptimizerError;
use crate::model::{
    OptimizationConstraints, OptimizationResult, ResultSource, Stop, VehicleInfo,
};
use crate::traits::RouteOptimizer;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub base_url: String,
    pub path: String,
    /// Bound on the whole request; a timeout counts as "unavailable".
    pub timeout_secs: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            path: "/optimize-route".to_string(),
            timeout_secs: 15,
        }
    }
}

impl OptimizerConfig {
    /// Reads `ROUTE_OPTIMIZER_URL` and `ROUTE_OPTIMIZER_TIMEOUT_SECS`.
    ///
    /// Returns `None` when no URL is set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// A blank URL counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("ROUTE_OPTIMIZER_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())?;
        let defaults = Self::default();
        let timeout_secs = lookup("ROUTE_OPTIMIZER_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults.timeout_secs);
        Some(Self {
            base_url,
            timeout_secs,
            ..defaults
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub struct OptimizerClient {
    config: OptimizerConfig,
    client: reqwest::blocking::Client,
}

impl OptimizerClient {
    pub fn new(config: OptimizerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn request(&self, body: &OptimizeRequest) -> Result<OptimizeResponse, OptimizerError> {
        let url = self.config.endpoint();
        let timeout_secs = self.config.timeout_secs;

        self.client
            .post(&url)
            .json(body)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OptimizeResponse>())
            .map_err(|err| OptimizerError::from_reqwest(&url, timeout_secs, err))
    }
}

impl RouteOptimizer for OptimizerClient {
    fn optimize(
        &self,
        stops: &[Stop],
        vehicle: &VehicleInfo,
        constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        if stops.is_empty() {
            return None;
        }

        let body = OptimizeRequest::new(stops, vehicle, constraints);
        debug!(stops = stops.len(), url = %self.config.endpoint(), "requesting external optimization");

        match self.request(&body).and_then(|response| response.into_result(stops)) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(error = %err, "external optimizer unavailable");
                None
            }
        }
    }
}

/// Checks that `order` is a permutation of `0..len`.
pub fn validate_order(order: &[i64], len: usize) -> Result<Vec<usize>, OptimizerError> {
    let invalid = || OptimizerError::InvalidOrder { expected: len };
    if order.len() != len {
        return Err(invalid());
    }

    let mut seen = vec![false; len];
    let mut indices = Vec::with_capacity(len);
    for &raw in order {
        let index = usize::try_from(raw).map_err(|_| invalid())?;
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(invalid()),
        }
        indices.push(index);
    }
    Ok(indices)
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub stops: Vec<WireStop>,
    pub vehicle_info: WireVehicle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<WireConstraints>,
}

impl OptimizeRequest {
    pub fn new(stops: &[Stop], vehicle: &VehicleInfo, constraints: &OptimizationConstraints) -> Self {
        let constraints = (constraints.max_time_minutes.is_some() || constraints.prioritize_urgent)
            .then(|| WireConstraints {
                max_time: constraints.max_time_minutes,
                prioritize_urgent: constraints.prioritize_urgent,
            });

        Self {
            stops: stops
                .iter()
                .enumerate()
                .map(|(index, stop)| WireStop {
                    index,
                    name: stop.title.clone(),
                    kind: stop.kind.as_str(),
                    priority: stop.priority.as_str(),
                    coordinates: WireCoordinates {
                        lat: stop.coordinates.latitude,
                        lng: stop.coordinates.longitude,
                    },
                    time_window: stop.time_window.map(|(start, end)| WireTimeWindow { start, end }),
                    duration: stop.estimated_duration_minutes,
                })
                .collect(),
            vehicle_info: WireVehicle {
                capacity: vehicle.capacity_label.clone(),
                fuel_efficiency: vehicle.fuel_efficiency_km_per_liter,
            },
            constraints,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStop {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub priority: &'static str,
    pub coordinates: WireCoordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<WireTimeWindow>,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WireCoordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WireTimeWindow {
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVehicle {
    pub capacity: String,
    pub fuel_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u32>,
    pub prioritize_urgent: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_order: Vec<i64>,
    pub total_distance: f64,
    pub estimated_time: f64,
    pub fuel_estimate: f64,
    pub cost_estimate: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl OptimizeResponse {
    /// Validates the response against the stops it was computed for.
    pub fn into_result(self, stops: &[Stop]) -> Result<OptimizationResult, OptimizerError> {
        let order = validate_order(&self.optimized_order, stops.len())?;

        let metrics = [
            self.total_distance,
            self.estimated_time,
            self.fuel_estimate,
            self.cost_estimate,
        ];
        if metrics.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(OptimizerError::InvalidMetric);
        }

        Ok(OptimizationResult {
            ordered_stop_ids: order.into_iter().map(|index| stops[index].id.clone()).collect(),
            total_distance_km: self.total_distance,
            estimated_time_minutes: self.estimated_time.round().min(u32::MAX as f64) as u32,
            fuel_estimate_liters: self.fuel_estimate,
            cost_estimate: self.cost_estimate,
            suggestions: self.suggestions,
            reasoning: self.reasoning.filter(|text| !text.trim().is_empty()),
            source: ResultSource::External,
        })
    }
}
