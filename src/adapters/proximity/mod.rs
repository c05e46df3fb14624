//! Proximity resolver adapters.

mod static_resolver;

pub use static_resolver::StaticProximityResolver;
