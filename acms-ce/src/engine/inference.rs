//! Attribute inference
//!
//! Airports frequently arrive from the authority's registry with no size
//! tier or passenger volume recorded. This module fills the gaps from
//! whatever partial data exists, preferring explicit values, then the usage
//! classification, then an explicit passenger count, then a fixed
//! conservative default. Pure functions only; the compliance check persists
//! the result separately via the db layer.

use acms_common::db::Airport;
use acms_common::policy;
use acms_common::types::AirportSize;

/// Inferred (or confirmed) classification attributes for one airport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredProfile {
    pub size: AirportSize,
    pub annual_passengers: i64,
}

/// Resolve an airport's size tier and annual passenger volume
///
/// Explicit values always win and are never downgraded. Idempotent: feeding
/// an airport whose fields were filled from a previous inference yields the
/// same profile again.
pub fn infer_profile(airport: &Airport) -> InferredProfile {
    let size = effective_size(airport);

    let annual_passengers = match airport.annual_passengers {
        Some(count) => count,
        None => match airport.usage_class {
            Some(class) => policy::usage_passenger_baseline(class),
            None => policy::DEFAULT_PASSENGER_ESTIMATE,
        },
    };

    InferredProfile {
        size,
        annual_passengers,
    }
}

/// Resolve only the size tier: explicit, else usage class, else passenger
/// count, else smallest
pub fn effective_size(airport: &Airport) -> AirportSize {
    if let Some(size) = airport.size {
        return size;
    }
    if let Some(class) = airport.usage_class {
        return policy::usage_size_tier(class);
    }
    if let Some(count) = airport.annual_passengers {
        return policy::size_from_passengers(count);
    }
    AirportSize::Small
}
