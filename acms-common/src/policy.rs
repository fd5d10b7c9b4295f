//! Certification policy constants
//!
//! Every fixed threshold and inference table used by the compliance engine
//! lives here under a name, so tests and callers never reach for magic
//! numbers. The tables are calibrated to the authority's published passenger
//! and aircraft-weight bands.

use crate::types::{AirportSize, UsageClass};

/// Minimum weighted compliance, in percent, required of essential (tier D)
/// items before certification can be granted.
pub const ESSENTIAL_GATE_PERCENT: f64 = 85.0;

/// Overall score below which the engine recommends focusing on
/// complementary and recommended items.
pub const IMPROVEMENT_FOCUS_PERCENT: f64 = 70.0;

/// Weight assumed for a regulation that does not declare one.
pub const DEFAULT_REGULATION_WEIGHT: i64 = 1;

/// Conservative annual-passenger estimate used when an airport reports
/// neither an explicit count nor a usage class.
pub const DEFAULT_PASSENGER_ESTIMATE: i64 = 100_000;

/// Passenger-count boundaries between size tiers.
pub const SMALL_MAX_PASSENGERS: i64 = 200_000;
pub const MEDIUM_MAX_PASSENGERS: i64 = 1_000_000;
pub const LARGE_MAX_PASSENGERS: i64 = 10_000_000;

/// Size tier implied by a usage classification.
pub fn usage_size_tier(class: UsageClass) -> AirportSize {
    match class {
        UsageClass::Private | UsageClass::ClassI => AirportSize::Small,
        UsageClass::ClassII => AirportSize::Medium,
        UsageClass::ClassIII => AirportSize::Large,
        UsageClass::ClassIV => AirportSize::International,
    }
}

/// Baseline annual passengers recorded for an airport of the given usage
/// class when no explicit count exists. Restricted-use airports record zero.
pub fn usage_passenger_baseline(class: UsageClass) -> i64 {
    match class {
        UsageClass::Private => 0,
        UsageClass::ClassI => 100_000,
        UsageClass::ClassII => 600_000,
        UsageClass::ClassIII => 3_000_000,
        UsageClass::ClassIV => 10_000_000,
    }
}

/// Conservative annual-passenger estimate used by the applicability matcher
/// when the airport has no usable explicit count. Restricted-use airports
/// are estimated at the class-I level rather than zero so that low
/// thresholds still match.
pub fn usage_passenger_estimate(class: UsageClass) -> i64 {
    match class {
        UsageClass::Private | UsageClass::ClassI => 100_000,
        UsageClass::ClassII => 600_000,
        UsageClass::ClassIII => 3_000_000,
        UsageClass::ClassIV => 10_000_000,
    }
}

/// Conservative maximum-aircraft-weight estimate (metric tons) by usage
/// class, used by the applicability matcher when no explicit capacity is
/// recorded.
pub fn usage_weight_estimate(class: UsageClass) -> i64 {
    match class {
        UsageClass::Private | UsageClass::ClassI => 20,
        UsageClass::ClassII => 100,
        UsageClass::ClassIII => 250,
        UsageClass::ClassIV => 400,
    }
}

/// Annual-passenger range `(lo, hi)` covered by a size tier. The top tier
/// is open-ended.
pub fn size_passenger_range(size: AirportSize) -> (i64, i64) {
    match size {
        AirportSize::Small => (0, SMALL_MAX_PASSENGERS),
        AirportSize::Medium => (SMALL_MAX_PASSENGERS, MEDIUM_MAX_PASSENGERS),
        AirportSize::Large => (MEDIUM_MAX_PASSENGERS, LARGE_MAX_PASSENGERS),
        AirportSize::International => (LARGE_MAX_PASSENGERS, i64::MAX),
    }
}

/// Maximum-aircraft-weight range `(lo, hi)` in metric tons covered by a
/// size tier. The top tier is open-ended.
pub fn size_weight_range(size: AirportSize) -> (i64, i64) {
    match size {
        AirportSize::Small => (0, 50),
        AirportSize::Medium => (50, 150),
        AirportSize::Large => (150, 300),
        AirportSize::International => (300, i64::MAX),
    }
}

/// Size tier implied by an explicit annual passenger count.
pub fn size_from_passengers(annual_passengers: i64) -> AirportSize {
    if annual_passengers < SMALL_MAX_PASSENGERS {
        AirportSize::Small
    } else if annual_passengers < MEDIUM_MAX_PASSENGERS {
        AirportSize::Medium
    } else if annual_passengers < LARGE_MAX_PASSENGERS {
        AirportSize::Large
    } else {
        AirportSize::International
    }
}
