//! Applicability matcher
//!
//! Decides whether one regulation applies to one airport. Six conjunctive
//! predicates evaluated in a fixed order, short-circuiting on the first
//! failure; each predicate is independent, so the order only matters for
//! efficiency. Missing airport data is bridged with the conservative
//! estimates from the policy tables; missing predicate data means "no
//! restriction".

use acms_common::db::{Airport, Regulation};
use acms_common::policy;
use acms_common::types::AirportType;

use crate::engine::inference::effective_size;

/// True if every predicate on the regulation matches the airport's profile
pub fn applies(regulation: &Regulation, airport: &Airport) -> bool {
    // 1. Size restriction
    if let Some(sizes) = &regulation.applies_to_sizes {
        if !sizes.contains(&effective_size(airport)) {
            return false;
        }
    }

    // 2. Type restriction
    if let Some(types) = &regulation.applies_to_types {
        let airport_type = airport.airport_type.unwrap_or(AirportType::Commercial);
        if !types.contains(&airport_type) {
            return false;
        }
    }

    // 3. Minimum annual passengers
    if let Some(min) = regulation.min_passengers {
        if !passenger_threshold_met(airport, min) {
            return false;
        }
    }

    // 4. Operational flags
    if regulation.requires_international && !airport.has_international_operations {
        return false;
    }
    if regulation.requires_cargo && !airport.has_cargo_operations {
        return false;
    }
    if regulation.requires_maintenance && !airport.has_maintenance_facility {
        return false;
    }

    // 5. Minimum runway count
    if let Some(min) = regulation.min_runways {
        if airport.number_of_runways < min {
            return false;
        }
    }

    // 6. Minimum aircraft weight capacity
    if let Some(min) = regulation.min_aircraft_weight {
        if !weight_threshold_met(airport, min) {
            return false;
        }
    }

    true
}

/// Passenger threshold check with conservative fallbacks
///
/// A recorded count of zero is treated like a missing count: restricted-use
/// airports persist zero after inference, and judging them by it would
/// exclude every threshold. When only an explicit size tier is known the
/// check is deliberately asymmetric: a threshold in the upper half of the
/// tier's passenger range is assumed unmet, because an airport with an
/// unrecorded count is probably near the low end of its tier.
fn passenger_threshold_met(airport: &Airport, min_passengers: i64) -> bool {
    match airport.annual_passengers {
        Some(count) if count > 0 => count >= min_passengers,
        _ => {
            if let Some(class) = airport.usage_class {
                policy::usage_passenger_estimate(class) >= min_passengers
            } else if let Some(size) = airport.size {
                let (lo, hi) = policy::size_passenger_range(size);
                if min_passengers > hi {
                    return false;
                }
                if min_passengers > lo + (hi - lo) / 2 {
                    return false;
                }
                true
            } else {
                // Nothing to judge against: fail open
                true
            }
        }
    }
}

/// Aircraft-weight threshold check with the same fallback chain as
/// passengers, minus the midpoint rule (weight ranges are narrow enough
/// that the tier ceiling alone is the conservative bound)
fn weight_threshold_met(airport: &Airport, min_weight: i64) -> bool {
    match airport.max_aircraft_weight {
        Some(weight) if weight > 0 => weight >= min_weight,
        _ => {
            if let Some(class) = airport.usage_class {
                policy::usage_weight_estimate(class) >= min_weight
            } else if let Some(size) = airport.size {
                let (_lo, hi) = policy::size_weight_range(size);
                min_weight <= hi
            } else {
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acms_common::types::{AirportSize, SafetyCategory, UsageClass};
    use uuid::Uuid;

    fn airport() -> Airport {
        Airport {
            guid: Uuid::new_v4(),
            code: "SBXX".to_string(),
            name: "Matcher Test".to_string(),
            size: None,
            airport_type: None,
            usage_class: None,
            annual_passengers: None,
            has_international_operations: false,
            has_cargo_operations: false,
            has_maintenance_facility: false,
            number_of_runways: 1,
            max_aircraft_weight: None,
        }
    }

    fn regulation() -> Regulation {
        Regulation {
            guid: Uuid::new_v4(),
            code: "TEST-01".to_string(),
            title: "Test regulation".to_string(),
            description: None,
            safety_category: SafetyCategory::OperationalSafety,
            requirement_tier: None,
            evaluation_mode: None,
            weight: None,
            authority_reference: None,
            applies_to_sizes: None,
            applies_to_types: None,
            min_passengers: None,
            requires_international: false,
            requires_cargo: false,
            requires_maintenance: false,
            min_runways: None,
            min_aircraft_weight: None,
            requirements: "General requirements".to_string(),
            expected_performance: None,
        }
    }

    #[test]
    fn test_unrestricted_regulation_applies_to_anything() {
        let reg = regulation();
        for size in AirportSize::all_variants() {
            let mut ap = airport();
            ap.size = Some(size);
            assert!(applies(&reg, &ap));
        }
        assert!(applies(&reg, &airport()));
    }

    #[test]
    fn test_size_restriction_uses_inferred_size() {
        let mut reg = regulation();
        reg.applies_to_sizes = Some(vec![AirportSize::Large, AirportSize::International]);

        // Usage class III infers Large even with no explicit size
        let mut ap = airport();
        ap.usage_class = Some(UsageClass::ClassIII);
        assert!(applies(&reg, &ap));

        // A bare airport defaults to Small and is excluded
        assert!(!applies(&reg, &airport()));
    }

    #[test]
    fn test_empty_size_set_matches_nothing() {
        let mut reg = regulation();
        reg.applies_to_sizes = Some(vec![]);
        let mut ap = airport();
        ap.size = Some(AirportSize::Medium);
        assert!(!applies(&reg, &ap));
    }

    #[test]
    fn test_type_restriction_defaults_to_commercial() {
        let mut reg = regulation();
        reg.applies_to_types = Some(vec![AirportType::Commercial, AirportType::Mixed]);
        assert!(applies(&reg, &airport()));

        reg.applies_to_types = Some(vec![AirportType::Military]);
        assert!(!applies(&reg, &airport()));
    }

    #[test]
    fn test_explicit_passengers_compared_directly() {
        let mut reg = regulation();
        reg.min_passengers = Some(500_000);

        let mut ap = airport();
        ap.annual_passengers = Some(600_000);
        assert!(applies(&reg, &ap));

        ap.annual_passengers = Some(499_999);
        assert!(!applies(&reg, &ap));
    }

    #[test]
    fn test_zero_passenger_count_uses_usage_estimate() {
        // A persisted restricted-use airport reports zero; the conservative
        // class estimate keeps low thresholds matching.
        let mut reg = regulation();
        reg.min_passengers = Some(50_000);

        let mut ap = airport();
        ap.usage_class = Some(UsageClass::Private);
        ap.annual_passengers = Some(0);
        assert!(applies(&reg, &ap));

        reg.min_passengers = Some(200_000);
        assert!(!applies(&reg, &ap));
    }

    #[test]
    fn test_size_range_fallback_is_conservative() {
        // Small tier covers 0..200k; a threshold at the ceiling sits above
        // the midpoint, so the regulation is assumed not to apply.
        let mut reg = regulation();
        reg.min_passengers = Some(200_000);

        let mut ap = airport();
        ap.size = Some(AirportSize::Small);
        assert!(!applies(&reg, &ap));

        // Below the midpoint of the tier range it does apply
        reg.min_passengers = Some(90_000);
        assert!(applies(&reg, &ap));

        // Above the tier ceiling it never applies
        reg.min_passengers = Some(250_000);
        assert!(!applies(&reg, &ap));
    }

    #[test]
    fn test_passenger_monotonicity() {
        let mut reg = regulation();
        reg.min_passengers = Some(1_000_000);

        let mut ap = airport();
        let mut previous = false;
        for count in [10_000, 500_000, 1_000_000, 5_000_000] {
            ap.annual_passengers = Some(count);
            let now = applies(&reg, &ap);
            assert!(now >= previous, "applicability must not regress as passengers grow");
            previous = now;
        }
        assert!(previous);
    }

    #[test]
    fn test_operational_flags() {
        let mut reg = regulation();
        reg.requires_international = true;

        let mut ap = airport();
        assert!(!applies(&reg, &ap));
        ap.has_international_operations = true;
        assert!(applies(&reg, &ap));

        reg.requires_cargo = true;
        assert!(!applies(&reg, &ap));
        ap.has_cargo_operations = true;
        assert!(applies(&reg, &ap));

        reg.requires_maintenance = true;
        assert!(!applies(&reg, &ap));
        ap.has_maintenance_facility = true;
        assert!(applies(&reg, &ap));
    }

    #[test]
    fn test_minimum_runways() {
        let mut reg = regulation();
        reg.min_runways = Some(2);

        let mut ap = airport();
        assert!(!applies(&reg, &ap));
        ap.number_of_runways = 2;
        assert!(applies(&reg, &ap));
    }

    #[test]
    fn test_weight_threshold_fallbacks() {
        let mut reg = regulation();
        reg.min_aircraft_weight = Some(120);

        // Explicit capacity wins
        let mut ap = airport();
        ap.max_aircraft_weight = Some(150);
        assert!(applies(&reg, &ap));
        ap.max_aircraft_weight = Some(80);
        assert!(!applies(&reg, &ap));

        // Usage-class estimate: class II handles ~100t, below threshold
        let mut ap = airport();
        ap.usage_class = Some(UsageClass::ClassII);
        assert!(!applies(&reg, &ap));
        ap.usage_class = Some(UsageClass::ClassIII);
        assert!(applies(&reg, &ap));

        // Size-range ceiling: medium tops out at 150t, so 120 is plausible
        let mut ap = airport();
        ap.size = Some(AirportSize::Medium);
        assert!(applies(&reg, &ap));
        reg.min_aircraft_weight = Some(200);
        assert!(!applies(&reg, &ap));
    }
}
