//! Seams between the planner and its collaborators.
//!
//! Upstream business data (clients, suppliers) enters through
//! [`BusinessRecord`]; remote ordering services plug in through
//! [`RouteOptimizer`]. Concrete apps implement these for their own types.

use crate::model::{OptimizationConstraints, OptimizationResult, Priority, Stop, StopKind, VehicleInfo};

/// An upstream record that becomes one stop.
///
/// `id` and `name` are required; a record missing either is skipped by the
/// catalog. Everything else has a default.
pub trait BusinessRecord {
    fn id(&self) -> Option<&str>;

    fn name(&self) -> Option<&str>;

    /// Kind-determining flag (client vs supplier, service type).
    fn stop_kind(&self) -> StopKind;

    /// Location (lat, lng), if geocoded.
    fn location(&self) -> Option<(f64, f64)>;

    fn address(&self) -> Option<&str> {
        None
    }

    /// Scheduled time (unix timestamp).
    fn scheduled_at(&self) -> Option<i64> {
        None
    }

    fn estimated_duration_minutes(&self) -> Option<u32> {
        None
    }

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    /// Window start/end (seconds from midnight).
    fn time_window(&self) -> Option<(i32, i32)> {
        None
    }

    fn assigned_vehicle_id(&self) -> Option<&str> {
        None
    }

    fn assigned_driver_id(&self) -> Option<&str> {
        None
    }
}

/// A collaborator that may reorder stops better than the local heuristic.
///
/// Implementations must not fail past this boundary: any problem (network,
/// timeout, malformed or untrusted output) is reported as `None`. Callers
/// still validate the returned order before trusting it.
pub trait RouteOptimizer {
    fn optimize(
        &self,
        stops: &[Stop],
        vehicle: &VehicleInfo,
        constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult>;
}

/// Optimizer used when no remote service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalOptimizer;

impl RouteOptimizer for NoExternalOptimizer {
    fn optimize(
        &self,
        _stops: &[Stop],
        _vehicle: &VehicleInfo,
        _constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        None
    }
}

impl<T: RouteOptimizer + ?Sized> RouteOptimizer for &T {
    fn optimize(
        &self,
        stops: &[Stop],
        vehicle: &VehicleInfo,
        constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        (**self).optimize(stops, vehicle, constraints)
    }
}

impl<T: RouteOptimizer + ?Sized> RouteOptimizer for Box<T> {
    fn optimize(
        &self,
        stops: &[Stop],
        vehicle: &VehicleInfo,
        constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        (**self).optimize(stops, vehicle, constraints)
    }
}

impl<T: RouteOptimizer> RouteOptimizer for Option<T> {
    fn optimize(
        &self,
        stops: &[Stop],
        vehicle: &VehicleInfo,
        constraints: &OptimizationConstraints,
    ) -> Option<OptimizationResult> {
        self.as_ref()?.optimize(stops, vehicle, constraints)
    }
}
