//! Test support for itinerary-planner.
//!
//! Provides a builder-style business record and stub optimizers that stand
//! in for the remote optimization service.

#![allow(dead_code)]

use std::cell::Cell;

use itinerary_planner::model::{
    OptimizationConstraints, OptimizationResult, Priority, ResultSource, Stop, StopKind, VehicleInfo,
};
use itinerary_planner::optimizer::OptimizeResponse;
use itinerary_planner::traits::{BusinessRecord, RouteOptimizer};

// ============================================================================
// Business records
// ============================================================================

/// Builder for test records with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestRecord {
    id: Option<String>,
    name: Option<String>,
    kind: StopKind,
    location: Option<(f64, f64)>,
    duration_min: Option<u32>,
    priority: Priority,
}

impl TestRecord {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(format!("Record {id}")),
            kind: StopKind::Delivery,
            location: None,
            duration_min: None,
            priority: Priority::Normal,
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some((lat, lng));
        self
    }

    pub fn kind(mut self, kind: StopKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.duration_min = Some(minutes);
        self
    }

    pub fn urgent(mut self) -> Self {
        self.priority = Priority::Urgent;
        self
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }
}

impl BusinessRecord for TestRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn stop_kind(&self) -> StopKind {
        self.kind
    }

    fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    fn estimated_duration_minutes(&self) -> Option<u32> {
        self.duration_min
    }

    fn priority(&self) -> Priority {
        self.priority
    }
}

pub fn ids(stops: &[Stop]) -> Vec<&str> {
    stops.iter().map(|stop| stop.id.as_str()).collect()
}

// ============================================================================
// Optimizer stubs
// ============================================================================

/// Answers with a fixed wire order, validated the way the HTTP client does.
pub struct WireOrderOptimizer {
    pub order: Vec<i64>,
    pub calls: Cell<usize>,
}

impl WireOrderOptimizer {
    pub fn new(order: Vec<i64>) -> Self {
        Self {
            order,
            calls: Cell::new(0),
        }
    }
}

impl RouteOptimizer for WireOrderOptimizer {
    fn optimize(
        &self,
        stops: &[Stop],
        _vehicle: &VehicleInfo,
        _constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        self.calls.set(self.calls.get() + 1);
        let response = OptimizeResponse {
            optimized_order: self.order.clone(),
            total_distance: 12.5,
            estimated_time: 140.0,
            fuel_estimate: 1.25,
            cost_estimate: 30.0,
            suggestions: vec!["visit urgent stops first".to_string()],
            reasoning: Some("urgent stops first".to_string()),
        };
        response.into_result(stops).ok()
    }
}

/// Answers with arbitrary ids, bypassing wire validation.
pub struct RawIdOptimizer {
    pub ids: Vec<String>,
}

impl RouteOptimizer for RawIdOptimizer {
    fn optimize(
        &self,
        _stops: &[Stop],
        _vehicle: &VehicleInfo,
        _constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        Some(OptimizationResult {
            ordered_stop_ids: self.ids.clone(),
            total_distance_km: 1.0,
            estimated_time_minutes: 10,
            fuel_estimate_liters: 0.1,
            cost_estimate: 2.4,
            suggestions: Vec::new(),
            reasoning: None,
            source: ResultSource::External,
        })
    }
}

/// Answers with a canned result, whatever the input.
pub struct CannedResultOptimizer {
    pub result: OptimizationResult,
}

impl RouteOptimizer for CannedResultOptimizer {
    fn optimize(
        &self,
        _stops: &[Stop],
        _vehicle: &VehicleInfo,
        _constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        Some(self.result.clone())
    }
}

/// Always unavailable.
pub struct FailingOptimizer;

impl RouteOptimizer for FailingOptimizer {
    fn optimize(
        &self,
        _stops: &[Stop],
        _vehicle: &VehicleInfo,
        _constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        None
    }
}
