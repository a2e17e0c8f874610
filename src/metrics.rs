//! Aggregate figures for an itinerary snapshot.
//!
//! Recomputed from scratch after every change; nothing here is cached.

use std::collections::BTreeMap;

use crate::config::PlannerConfig;
use crate::haversine::{tour_distance_km, HaversineMatrix};
use crate::model::{Coordinate, Stop, StopKind, StopStatus, VehicleInfo};

#[derive(Debug, Clone, PartialEq)]
pub struct ItinerarySummary {
    pub stop_count: usize,
    /// Every kind is present, with zero when unused.
    pub count_by_kind: BTreeMap<StopKind, usize>,
    pub count_by_status: BTreeMap<StopStatus, usize>,
    /// Sum of on-site durations.
    pub total_estimated_minutes: u32,
}

/// Travel-aware estimates for the current visiting order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    pub total_distance_km: f64,
    /// On-site durations plus driving time.
    pub estimated_time_minutes: u32,
    pub fuel_estimate_liters: f64,
    pub cost_estimate: f64,
}

impl TravelEstimate {
    pub const ZERO: TravelEstimate = TravelEstimate {
        total_distance_km: 0.0,
        estimated_time_minutes: 0,
        fuel_estimate_liters: 0.0,
        cost_estimate: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    travel: HaversineMatrix,
    fuel_price_per_liter: f64,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

impl MetricsAggregator {
    pub fn new(travel: HaversineMatrix, fuel_price_per_liter: f64) -> Self {
        Self {
            travel,
            fuel_price_per_liter,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(
            HaversineMatrix::new(config.assumed_speed_kmh),
            config.fuel_price_per_liter,
        )
    }

    pub fn summarize(&self, itinerary: &[Stop]) -> ItinerarySummary {
        let mut count_by_kind: BTreeMap<StopKind, usize> =
            StopKind::ALL.iter().map(|kind| (*kind, 0)).collect();
        let mut count_by_status: BTreeMap<StopStatus, usize> = BTreeMap::new();

        for stop in itinerary {
            *count_by_kind.entry(stop.kind).or_default() += 1;
            *count_by_status.entry(stop.status).or_default() += 1;
        }

        ItinerarySummary {
            stop_count: itinerary.len(),
            count_by_kind,
            count_by_status,
            total_estimated_minutes: service_minutes(itinerary),
        }
    }

    /// Distance, time, fuel and cost for visiting `itinerary` in order.
    pub fn travel_estimate(&self, itinerary: &[Stop], vehicle: &VehicleInfo) -> TravelEstimate {
        if itinerary.is_empty() {
            return TravelEstimate::ZERO;
        }

        let points: Vec<Coordinate> = itinerary.iter().map(|stop| stop.coordinates).collect();
        let total_distance_km = tour_distance_km(&points);
        let travel_minutes = self.travel.km_to_minutes(total_distance_km);

        let fuel_estimate_liters = if vehicle.fuel_efficiency_km_per_liter > 0.0 {
            total_distance_km / vehicle.fuel_efficiency_km_per_liter
        } else {
            0.0
        };

        TravelEstimate {
            total_distance_km,
            estimated_time_minutes: service_minutes(itinerary).saturating_add(travel_minutes),
            fuel_estimate_liters,
            cost_estimate: fuel_estimate_liters * self.fuel_price_per_liter.max(0.0),
        }
    }
}

fn service_minutes(itinerary: &[Stop]) -> u32 {
    itinerary
        .iter()
        .fold(0u32, |total, stop| total.saturating_add(stop.estimated_duration_minutes))
}
