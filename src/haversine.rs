//! Great-circle distances between stops.
//!
//! Straight-line distance ignores roads, but it needs no external service and
//! is always available, so both the heuristic router and the travel-time
//! estimates are built on it.

use rayon::prelude::*;

use crate::model::Coordinate;

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Symmetric, zero for identical points, never negative.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).abs().to_radians();
    let delta_lng = (b.longitude - a.longitude).abs().to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of leg distances over consecutive points, in visiting order.
pub fn tour_distance_km(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|leg| distance_km(leg[0], leg[1]))
        .sum()
}

/// Haversine-based distance matrix with a travel-time model.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Pairwise distances in km, indexed by the provided order.
    pub fn matrix_for(&self, locations: &[Coordinate]) -> Vec<Vec<f64>> {
        locations
            .par_iter()
            .enumerate()
            .map(|(i, from)| {
                locations
                    .iter()
                    .enumerate()
                    .map(|(j, to)| if i == j { 0.0 } else { distance_km(*from, *to) })
                    .collect::<Vec<f64>>()
            })
            .collect()
    }

    /// Convert distance in km to whole minutes of travel.
    pub fn km_to_minutes(&self, km: f64) -> u32 {
        if self.speed_kmh <= 0.0 || !km.is_finite() || km <= 0.0 {
            return 0;
        }
        (km / self.speed_kmh * 60.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let p = Coordinate::new(36.1, -115.1);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, roughly 370 km.
        let dist = distance_km(Coordinate::new(36.17, -115.14), Coordinate::new(34.05, -118.24));
        assert!(dist > 350.0 && dist < 400.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_haversine_antipodal_is_finite() {
        let dist = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!(dist.is_finite());
        assert!((dist - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-3);
    }

    #[test]
    fn test_tour_distance_sums_legs() {
        let a = Coordinate::new(19.70, -101.18);
        let b = Coordinate::new(19.71, -101.19);
        let c = Coordinate::new(19.69, -101.17);
        let expected = distance_km(a, b) + distance_km(b, c);
        assert!((tour_distance_km(&[a, b, c]) - expected).abs() < 1e-12);
        assert_eq!(tour_distance_km(&[a]), 0.0);
        assert_eq!(tour_distance_km(&[]), 0.0);
    }

    #[test]
    fn test_matrix_diagonal_is_zero() {
        let provider = HaversineMatrix::default();
        let locations = vec![
            Coordinate::new(36.1, -115.1),
            Coordinate::new(36.2, -115.2),
            Coordinate::new(36.3, -115.3),
        ];
        let matrix = provider.matrix_for(&locations);

        for i in 0..locations.len() {
            assert_eq!(matrix[i][i], 0.0, "Diagonal should be zero");
        }
    }

    #[test]
    fn test_matrix_symmetric() {
        let provider = HaversineMatrix::default();
        let locations = vec![Coordinate::new(36.1, -115.1), Coordinate::new(36.2, -115.2)];
        let matrix = provider.matrix_for(&locations);

        assert_eq!(matrix[0][1], matrix[1][0], "Matrix should be symmetric");
    }

    #[test]
    fn test_reasonable_travel_time() {
        let provider = HaversineMatrix::new(40.0);
        // 10 km at 40 km/h = 15 minutes
        assert_eq!(provider.km_to_minutes(10.0), 15);
        assert_eq!(provider.km_to_minutes(0.0), 0);
        assert_eq!(HaversineMatrix::new(0.0).km_to_minutes(10.0), 0);
    }
}
