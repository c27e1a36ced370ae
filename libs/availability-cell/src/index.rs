use std::collections::{HashMap, HashSet};

use shared_models::booking::BookedSlot;

/// Occupancy queries over one doctor's booked slots.
///
/// Callers hand in slots already filtered to non-cancelled,
/// future-or-present bookings; the index performs no filtering of its own.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    taken: HashSet<(String, String)>,
    per_date: HashMap<String, usize>,
    universe_size: usize,
}

impl AvailabilityIndex {
    pub fn new(booked: &[BookedSlot], universe: &[String]) -> Self {
        let mut taken = HashSet::new();
        let mut per_date: HashMap<String, usize> = HashMap::new();

        for slot in booked {
            taken.insert((slot.date.clone(), slot.time.clone()));
            *per_date.entry(slot.date.clone()).or_default() += 1;
        }

        Self {
            taken,
            per_date,
            universe_size: universe.len(),
        }
    }

    /// Whether `date` should be offered at all.
    ///
    /// Coarse occupancy check: compares the number of booked entries for the
    /// date against the universe cardinality, without verifying that those
    /// entries actually cover the universe. A doctor booked under a different
    /// slot universe can therefore be marked full early or late. Kept as-is.
    pub fn is_date_fully_booked(&self, date: &str) -> bool {
        self.per_date.get(date).copied().unwrap_or(0) >= self.universe_size
    }

    /// Whether the exact (date, time) pair is taken.
    pub fn is_time_booked(&self, date: &str, time: &str) -> bool {
        self.taken
            .contains(&(date.to_string(), time.to_string()))
    }

    pub fn booked_count(&self, date: &str) -> usize {
        self.per_date.get(date).copied().unwrap_or(0)
    }
}
