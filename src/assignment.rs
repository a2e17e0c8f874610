//! Vehicle and driver assignment policy.
//!
//! Kept apart from route ordering: it never reorders stops and never writes
//! to them. Callers apply the proposals through their fleet/HR systems.

use crate::model::Stop;

/// Proposed vehicle and driver for one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub stop_id: String,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
}

/// Hands out vehicles and drivers by stop index modulo pool size.
///
/// Existing assignments on a stop win over the rotation.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinAssignment {
    vehicle_ids: Vec<String>,
    driver_ids: Vec<String>,
}

impl RoundRobinAssignment {
    pub fn new(vehicle_ids: Vec<String>, driver_ids: Vec<String>) -> Self {
        Self {
            vehicle_ids,
            driver_ids,
        }
    }

    pub fn assign(&self, stops: &[Stop]) -> Vec<Assignment> {
        stops
            .iter()
            .enumerate()
            .map(|(index, stop)| Assignment {
                stop_id: stop.id.clone(),
                vehicle_id: stop
                    .assigned_vehicle_id
                    .clone()
                    .or_else(|| pick(&self.vehicle_ids, index)),
                driver_id: stop
                    .assigned_driver_id
                    .clone()
                    .or_else(|| pick(&self.driver_ids, index)),
            })
            .collect()
    }
}

fn pick(pool: &[String], index: usize) -> Option<String> {
    if pool.is_empty() {
        None
    } else {
        Some(pool[index % pool.len()].clone())
    }
}
