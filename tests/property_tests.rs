//! Property tests for routing invariants.

use proptest::prelude::*;

use itinerary_planner::config::PlannerConfig;
use itinerary_planner::haversine::distance_km;
use itinerary_planner::heuristic::HeuristicRouter;
use itinerary_planner::itinerary::ItineraryStore;
use itinerary_planner::model::{
    Coordinate, OptimizationConstraints, ResultSource, Stop, StopKind, VehicleInfo,
};
use itinerary_planner::service::RouteOptimizationService;
use itinerary_planner::traits::NoExternalOptimizer;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

fn stops(max: usize) -> impl Strategy<Value = Vec<Stop>> {
    prop::collection::vec(coordinate(), 0..max).prop_map(|points| {
        points
            .into_iter()
            .enumerate()
            .map(|(i, point)| Stop::new(format!("stop-{i}"), StopKind::Delivery, "stop", point))
            .collect()
    })
}

fn sorted_ids(stops: &[Stop]) -> Vec<String> {
    let mut ids: Vec<String> = stops.iter().map(|stop| stop.id.clone()).collect();
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        prop_assert!((distance_km(a, b) - distance_km(b, a)).abs() <= 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        prop_assert_eq!(distance_km(a, a), 0.0);
    }

    #[test]
    fn distance_is_never_negative(a in coordinate(), b in coordinate()) {
        let d = distance_km(a, b);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0.0);
    }

    #[test]
    fn heuristic_route_is_a_permutation(input in stops(30)) {
        let routed = HeuristicRouter::default().route(&input);
        prop_assert_eq!(routed.len(), input.len());
        prop_assert_eq!(sorted_ids(&routed), sorted_ids(&input));
        if let Some(first) = input.first() {
            prop_assert_eq!(&routed[0].id, &first.id);
        }
    }

    #[test]
    fn fallback_result_is_a_permutation(input in stops(20)) {
        let result = RouteOptimizationService::new(NoExternalOptimizer, &PlannerConfig::default())
            .optimize(&input, &VehicleInfo::default(), &OptimizationConstraints::default())
            .expect("service idle");
        prop_assert_eq!(result.source, ResultSource::Heuristic);
        let mut ordered = result.ordered_stop_ids.clone();
        ordered.sort();
        prop_assert_eq!(ordered, sorted_ids(&input));
        prop_assert!(result.total_distance_km >= 0.0);
    }

    #[test]
    fn reorder_preserves_stop_set(input in stops(15), pick in any::<prop::sample::Index>(), to in 0usize..40) {
        prop_assume!(!input.is_empty());
        let mut store = ItineraryStore::new(input.clone());
        let moved = input[pick.index(input.len())].id.clone();

        let landed = store.reorder(&moved, to).expect("known stop");
        prop_assert_eq!(landed, to.min(input.len() - 1));
        prop_assert_eq!(&store.stops()[landed].id, &moved);
        prop_assert_eq!(sorted_ids(store.stops()), sorted_ids(&input));

        let others_before: Vec<&str> = input.iter().filter(|s| s.id != moved).map(|s| s.id.as_str()).collect();
        let others_after: Vec<&str> = store.stops().iter().filter(|s| s.id != moved).map(|s| s.id.as_str()).collect();
        prop_assert_eq!(others_before, others_after);
    }

    #[test]
    fn reorder_to_current_position_is_noop(input in stops(15), pick in any::<prop::sample::Index>()) {
        prop_assume!(!input.is_empty());
        let mut store = ItineraryStore::new(input.clone());
        let position = pick.index(input.len());
        let id = input[position].id.clone();
        store.reorder(&id, position).expect("known stop");
        prop_assert_eq!(store.stops(), &input[..]);
    }

    #[test]
    fn replace_accepts_any_heuristic_order(input in stops(20)) {
        let mut store = ItineraryStore::new(input.clone());
        let routed = HeuristicRouter::default().route(&input);
        prop_assert!(store.replace(routed.clone()).is_ok());
        prop_assert_eq!(store.stops(), &routed[..]);
    }
}
