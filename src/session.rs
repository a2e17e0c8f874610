//! A planning session wires the components together.
//!
//! catalog -> optimization service -> itinerary store -> metrics / map link.
//! Manual reorders re-enter at the store, and the last optimization result
//! is refreshed so its time, fuel and cost figures follow the new order.
//!
//! A session is driven through `&mut self`, so it never overlaps its own
//! optimizations. Share a [`RouteOptimizationService`] directly when the
//! optimizing flag needs to be observed.

use tracing::debug;

use crate::catalog::StopCatalog;
use crate::config::PlannerConfig;
use crate::error::SessionError;
use crate::itinerary::ItineraryStore;
use crate::map_link::MapLinkBuilder;
use crate::metrics::{ItinerarySummary, MetricsAggregator, TravelEstimate};
use crate::model::{OptimizationConstraints, OptimizationResult, Stop, VehicleInfo};
use crate::optimizer::OptimizerClient;
use crate::service::RouteOptimizationService;
use crate::traits::{BusinessRecord, RouteOptimizer};

#[derive(Debug)]
pub struct PlanningSession<O = Option<OptimizerClient>> {
    catalog: StopCatalog,
    service: RouteOptimizationService<O>,
    store: ItineraryStore,
    metrics: MetricsAggregator,
    map_links: MapLinkBuilder,
    vehicle: VehicleInfo,
    constraints: OptimizationConstraints,
    last_result: Option<OptimizationResult>,
}

impl PlanningSession {
    /// Session using the configured remote optimizer, if any.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, reqwest::Error> {
        let optimizer = config.optimizer.clone().map(OptimizerClient::new).transpose()?;
        Ok(Self::new(optimizer, config))
    }
}

impl<O: RouteOptimizer> PlanningSession<O> {
    pub fn new(optimizer: O, config: &PlannerConfig) -> Self {
        Self {
            catalog: StopCatalog::from_config(config),
            service: RouteOptimizationService::new(optimizer, config),
            store: ItineraryStore::default(),
            metrics: MetricsAggregator::from_config(config),
            map_links: MapLinkBuilder::new(config.map_link.clone()),
            vehicle: VehicleInfo::default(),
            constraints: OptimizationConstraints::default(),
            last_result: None,
        }
    }

    /// Rebuilds the stop list from upstream records, in record order.
    pub fn load_records<R: BusinessRecord>(&mut self, records: &[R]) -> usize {
        let stops = self.catalog.build_stops(records);
        let count = stops.len();
        self.store = ItineraryStore::new(stops);
        self.last_result = None;
        debug!(stops = count, "planning session loaded");
        count
    }

    /// Changing the vehicle invalidates the last result.
    pub fn set_vehicle(&mut self, vehicle: VehicleInfo) {
        self.vehicle = vehicle;
        self.last_result = None;
    }

    pub fn set_constraints(&mut self, constraints: OptimizationConstraints) {
        self.constraints = constraints;
    }

    /// Optimizes the current stops and adopts the resulting order.
    pub fn optimize(&mut self) -> Result<&OptimizationResult, SessionError> {
        let result = self
            .service
            .optimize(self.store.stops(), &self.vehicle, &self.constraints)?;
        self.store.apply_order(&result.ordered_stop_ids)?;
        Ok(self.last_result.insert(result))
    }

    /// Moves one stop and refreshes the derived estimates.
    pub fn reorder(&mut self, stop_id: &str, new_position: usize) -> Result<usize, SessionError> {
        let landed = self.store.reorder(stop_id, new_position)?;
        self.refresh_result();
        Ok(landed)
    }

    pub fn itinerary(&self) -> &[Stop] {
        self.store.stops()
    }

    pub fn last_result(&self) -> Option<&OptimizationResult> {
        self.last_result.as_ref()
    }

    pub fn summary(&self) -> ItinerarySummary {
        self.metrics.summarize(self.store.stops())
    }

    pub fn travel_estimate(&self) -> TravelEstimate {
        self.metrics.travel_estimate(self.store.stops(), &self.vehicle)
    }

    pub fn deep_link(&self) -> String {
        self.map_links.build_deep_link(self.store.stops())
    }

    fn refresh_result(&mut self) {
        let estimate = self.travel_estimate();
        let ordered_ids: Vec<String> = self.store.stops().iter().map(|stop| stop.id.clone()).collect();

        if let Some(result) = self.last_result.as_mut() {
            result.ordered_stop_ids = ordered_ids;
            result.total_distance_km = estimate.total_distance_km;
            result.estimated_time_minutes = estimate.estimated_time_minutes;
            result.fuel_estimate_liters = estimate.fuel_estimate_liters;
            result.cost_estimate = estimate.cost_estimate;
        }
    }
}
