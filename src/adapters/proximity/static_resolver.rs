//! Static distance table.
//!
//! Resolves distances from a fixed table of location pairs. Stands in for
//! a geocoding collaborator in tests and demos; lookups are symmetric and
//! case-insensitive.

use std::collections::HashMap;

use crate::ports::ProximityResolver;

/// Table-backed proximity resolver.
#[derive(Debug, Clone, Default)]
pub struct StaticProximityResolver {
    distances: HashMap<(String, String), f64>,
}

impl StaticProximityResolver {
    /// Creates an empty resolver; every lookup returns `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a distance between two locations, both directions.
    pub fn with_distance(mut self, from: &str, to: &str, miles: f64) -> Self {
        self.distances.insert(Self::key(from, to), miles);
        self
    }

    fn key(from: &str, to: &str) -> (String, String) {
        let a = from.trim().to_lowercase();
        let b = to.trim().to_lowercase();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl ProximityResolver for StaticProximityResolver {
    fn distance_miles(&self, from: &str, to: &str) -> Option<f64> {
        self.distances.get(&Self::key(from, to)).copied()
    }
}
