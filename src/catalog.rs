//! Builds the candidate stop list from upstream business records.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::model::{Coordinate, Priority, Stop, StopKind, StopStatus};
use crate::traits::BusinessRecord;

/// Turns business records into stops. Rebuilt each planning session.
#[derive(Debug, Clone)]
pub struct StopCatalog {
    default_center: Coordinate,
    default_duration_minutes: u32,
}

impl Default for StopCatalog {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

impl StopCatalog {
    pub fn new(default_center: Coordinate, default_duration_minutes: u32) -> Self {
        Self {
            default_center,
            default_duration_minutes: default_duration_minutes.max(1),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.default_center, config.default_duration_minutes)
    }

    /// One stop per well-formed record, in input order.
    ///
    /// Records missing an id or a name are skipped, as are repeats of an id
    /// already taken; neither fails the batch.
    pub fn build_stops<R: BusinessRecord>(&self, records: &[R]) -> Vec<Stop> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stops = Vec::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            let (Some(id), Some(name)) = (non_blank(record.id()), non_blank(record.name())) else {
                warn!(position, "skipping business record without id or name");
                continue;
            };
            if !seen.insert(id) {
                warn!(id, "skipping business record with duplicate id");
                continue;
            }
            stops.push(self.stop_for(id, name, record));
        }

        debug!(records = records.len(), stops = stops.len(), "built stop catalog");
        stops
    }

    fn stop_for<R: BusinessRecord>(&self, id: &str, name: &str, record: &R) -> Stop {
        let coordinates = record
            .location()
            .map(Coordinate::from)
            .filter(Coordinate::is_valid)
            .unwrap_or(self.default_center);

        Stop {
            id: id.to_string(),
            kind: record.stop_kind(),
            title: name.to_string(),
            address: record.address().unwrap_or_default().to_string(),
            coordinates,
            scheduled_at: record.scheduled_at(),
            status: StopStatus::Pending,
            priority: record.priority(),
            time_window: record.time_window(),
            assigned_vehicle_id: record.assigned_vehicle_id().map(str::to_string),
            assigned_driver_id: record.assigned_driver_id().map(str::to_string),
            estimated_duration_minutes: record
                .estimated_duration_minutes()
                .filter(|minutes| *minutes > 0)
                .unwrap_or(self.default_duration_minutes),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// A plain record type for callers without their own model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub kind: Option<StopKind>,
    /// Suppliers become pickups unless `kind` says otherwise.
    pub is_supplier: bool,
    pub scheduled_at: Option<i64>,
    pub duration_minutes: Option<u32>,
    pub priority: Priority,
    pub time_window: Option<(i32, i32)>,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
}

impl BusinessRecord for SourceRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn stop_kind(&self) -> StopKind {
        match (self.kind, self.is_supplier) {
            (Some(kind), _) => kind,
            (None, true) => StopKind::Pickup,
            (None, false) => StopKind::Delivery,
        }
    }

    fn location(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    fn scheduled_at(&self) -> Option<i64> {
        self.scheduled_at
    }

    fn estimated_duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn time_window(&self) -> Option<(i32, i32)> {
        self.time_window
    }

    fn assigned_vehicle_id(&self) -> Option<&str> {
        self.vehicle_id.as_deref()
    }

    fn assigned_driver_id(&self) -> Option<&str> {
        self.driver_id.as_deref()
    }
}
