//! Proximity Resolver Port - injected distance lookup.
//!
//! Real geocoding lives outside this core. The matching engine asks this
//! port for a distance in miles and scores whatever comes back; `None`
//! means the distance is unknown and scoring falls back to a neutral value.

/// Port for resolving the distance between a patient and a practice.
pub trait ProximityResolver: Send + Sync {
    /// Distance in miles, or `None` when it cannot be resolved.
    fn distance_miles(&self, user_location: &str, office_address: &str) -> Option<f64>;
}

/// Resolver used when no location service is wired in; every distance is
/// unknown and proximity scores neutrally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProximity;

impl ProximityResolver for NoProximity {
    fn distance_miles(&self, _user_location: &str, _office_address: &str) -> Option<f64> {
        None
    }
}
