//! The current visiting order for a planning session.
//!
//! Every mutation builds a new sequence and swaps it in whole, so readers
//! always see a consistent snapshot. Both mutations are permutations: the
//! set of stop ids never changes.

use tracing::{debug, warn};

use crate::error::ItineraryError;
use crate::model::Stop;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItineraryStore {
    stops: Vec<Stop>,
}

impl ItineraryStore {
    pub fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stop_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.id.as_str()).collect()
    }

    pub fn position_of(&self, stop_id: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.id == stop_id)
    }

    /// Moves one stop to `new_position`, clamped to the last index.
    ///
    /// Other stops keep their relative order. Returns the position the stop
    /// landed at.
    pub fn reorder(&mut self, moved_stop_id: &str, new_position: usize) -> Result<usize, ItineraryError> {
        if self.stops.is_empty() {
            warn!(stop_id = moved_stop_id, "reorder declined: itinerary is empty");
            return Err(ItineraryError::Empty);
        }
        let Some(from) = self.position_of(moved_stop_id) else {
            warn!(stop_id = moved_stop_id, "reorder declined: unknown stop");
            return Err(ItineraryError::UnknownStop(moved_stop_id.to_string()));
        };

        let to = new_position.min(self.stops.len() - 1);
        if from != to {
            let mut next = self.stops.clone();
            let moved = next.remove(from);
            next.insert(to, moved);
            self.stops = next;
        }

        debug!(stop_id = moved_stop_id, from, to, "stop reordered");
        Ok(to)
    }

    /// Accepts `new_order` only if it holds exactly the current stop ids.
    pub fn replace(&mut self, new_order: Vec<Stop>) -> Result<(), ItineraryError> {
        let current: Vec<&str> = self.stop_ids();
        let proposed: Vec<&str> = new_order.iter().map(|stop| stop.id.as_str()).collect();
        if !is_permutation(&current, &proposed) {
            warn!(current = current.len(), proposed = proposed.len(), "replace declined: not a permutation");
            return Err(ItineraryError::NotAPermutation);
        }

        self.stops = new_order;
        Ok(())
    }

    /// Reorders the held stops to follow `ordered_ids`.
    pub fn apply_order<S: AsRef<str>>(&mut self, ordered_ids: &[S]) -> Result<(), ItineraryError> {
        let mut next = Vec::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            let id = id.as_ref();
            let stop = self
                .stops
                .iter()
                .find(|stop| stop.id == id)
                .ok_or_else(|| ItineraryError::UnknownStop(id.to_string()))?;
            next.push(stop.clone());
        }
        self.replace(next)
    }
}

/// True when both slices hold the same ids with the same multiplicities.
pub fn is_permutation<A: AsRef<str>, B: AsRef<str>>(left: &[A], right: &[B]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut left: Vec<&str> = left.iter().map(AsRef::as_ref).collect();
    let mut right: Vec<&str> = right.iter().map(AsRef::as_ref).collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}
