//! Single entry point for "optimize this stop set".
//!
//! Tries the external optimizer first and falls back to the nearest-neighbor
//! heuristic whenever it declines or fails, returns an order that is not a
//! permutation of the input, or reports negative or non-finite metrics. The
//! fallback is deterministic.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::OptimizeError;
use crate::haversine::HaversineMatrix;
use crate::heuristic::HeuristicRouter;
use crate::itinerary::is_permutation;
use crate::metrics::MetricsAggregator;
use crate::model::{
    OptimizationConstraints, OptimizationResult, ResultSource, Stop, VehicleInfo,
};
use crate::traits::RouteOptimizer;

#[derive(Debug)]
pub struct RouteOptimizationService<O> {
    optimizer: O,
    router: HeuristicRouter,
    metrics: MetricsAggregator,
    optimizing: AtomicBool,
}

impl<O: RouteOptimizer> RouteOptimizationService<O> {
    pub fn new(optimizer: O, config: &PlannerConfig) -> Self {
        Self {
            optimizer,
            router: HeuristicRouter::new(HaversineMatrix::new(config.assumed_speed_kmh)),
            metrics: MetricsAggregator::from_config(config),
            optimizing: AtomicBool::new(false),
        }
    }

    /// True while an [`optimize`](Self::optimize) call is outstanding.
    pub fn is_optimizing(&self) -> bool {
        self.optimizing.load(Ordering::Acquire)
    }

    /// Marks the service busy until the returned guard is dropped.
    pub fn begin(&self) -> Result<OptimizingGuard<'_>, OptimizeError> {
        self.optimizing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| OptimizingGuard {
                flag: &self.optimizing,
            })
            .map_err(|_| OptimizeError::AlreadyOptimizing)
    }

    /// Orders `stops`, preferring the external optimizer.
    ///
    /// Fails only when another optimization is already running.
    pub fn optimize(
        &self,
        stops: &[Stop],
        vehicle: &VehicleInfo,
        constraints: &OptimizationConstraints,
    ) -> Result<OptimizationResult, OptimizeError> {
        let _guard = self.begin()?;

        if stops.is_empty() {
            return Ok(OptimizationResult::empty());
        }

        let result = match self.external(stops, vehicle, constraints) {
            Some(result) => result,
            None => self.heuristic_result(stops, vehicle),
        };

        info!(
            source = ?result.source,
            stops = stops.len(),
            distance_km = result.total_distance_km,
            "optimization complete"
        );
        Ok(result)
    }

    /// Deterministic nearest-neighbor result with locally computed metrics.
    pub fn heuristic_result(&self, stops: &[Stop], vehicle: &VehicleInfo) -> OptimizationResult {
        let ordered = self.router.route(stops);
        let estimate = self.metrics.travel_estimate(&ordered, vehicle);

        OptimizationResult {
            ordered_stop_ids: ordered.into_iter().map(|stop| stop.id).collect(),
            total_distance_km: estimate.total_distance_km,
            estimated_time_minutes: estimate.estimated_time_minutes,
            fuel_estimate_liters: estimate.fuel_estimate_liters,
            cost_estimate: estimate.cost_estimate,
            suggestions: Vec::new(),
            reasoning: None,
            source: ResultSource::Heuristic,
        }
    }

    fn external(
        &self,
        stops: &[Stop],
        vehicle: &VehicleInfo,
        constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        let mut result = self.optimizer.optimize(stops, vehicle, constraints)?;

        let input_ids: Vec<&str> = stops.iter().map(|stop| stop.id.as_str()).collect();
        if !is_permutation(&input_ids, &result.ordered_stop_ids) {
            warn!(
                expected = stops.len(),
                received = result.ordered_stop_ids.len(),
                "external order is not a permutation of the input, falling back"
            );
            return None;
        }
        if !result.has_valid_metrics() {
            warn!(
                distance_km = result.total_distance_km,
                fuel_liters = result.fuel_estimate_liters,
                cost = result.cost_estimate,
                "external metrics are negative or non-finite, falling back"
            );
            return None;
        }

        result.source = ResultSource::External;
        Some(result)
    }
}

/// Clears the service's optimizing flag on drop.
#[derive(Debug)]
pub struct OptimizingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for OptimizingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
