//! Built-in regulation catalog
//!
//! A representative set of airport certification regulations covering every
//! safety category, requirement tier and evaluation mode, with applicability
//! predicates spanning the full matcher. Seeding is idempotent: regulations
//! are keyed by code and existing codes are skipped, so the endpoint can be
//! called on every deployment.

use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use acms_common::db::Regulation;
use acms_common::types::{
    AirportSize, AirportType, EvaluationMode, RequirementTier, SafetyCategory,
};
use acms_common::Result;

use crate::db;

/// Outcome of one seeding pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert every catalog regulation whose code is not yet present
pub async fn seed_regulations(pool: &SqlitePool) -> Result<SeedSummary> {
    let mut summary = SeedSummary {
        inserted: 0,
        skipped: 0,
    };

    for regulation in catalog() {
        if db::regulations::get_by_code(pool, &regulation.code)
            .await?
            .is_some()
        {
            summary.skipped += 1;
            continue;
        }
        db::regulations::insert(pool, &regulation).await?;
        summary.inserted += 1;
    }

    info!(
        "Seeded regulation catalog: {} inserted, {} skipped",
        summary.inserted, summary.skipped
    );
    Ok(summary)
}

fn base(
    code: &str,
    title: &str,
    category: SafetyCategory,
    requirements: &str,
) -> Regulation {
    Regulation {
        guid: Uuid::new_v4(),
        code: code.to_string(),
        title: title.to_string(),
        description: None,
        safety_category: category,
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
        requirements: requirements.to_string(),
        expected_performance: None,
    }
}

/// The catalog itself
pub fn catalog() -> Vec<Regulation> {
    vec![
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(7),
            authority_reference: Some("154.301".to_string()),
            applies_to_sizes: Some(vec![
                AirportSize::Medium,
                AirportSize::Large,
                AirportSize::International,
            ]),
            applies_to_types: Some(vec![AirportType::Commercial, AirportType::Mixed]),
            min_passengers: Some(200_000),
            expected_performance: Some("SMS implemented and audited annually".to_string()),
            ..base(
                "RBAC-154-01",
                "Safety management system",
                SafetyCategory::OperationalSafety,
                "Implement a complete safety management system (SMS) covering safety policy, \
                 risk management, safety assurance and safety promotion. Conduct annual \
                 internal audits and provide recurrent training for safety personnel.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(10),
            authority_reference: Some("154.105".to_string()),
            ..base(
                "RBAC-154-02",
                "Basic operational safety requirements",
                SafetyCategory::OperationalSafety,
                "Maintain an incident and accident register, provide basic safety training \
                 for all operational personnel, and inspect movement areas regularly.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::A),
            evaluation_mode: Some(EvaluationMode::Docs),
            weight: Some(1),
            ..base(
                "RBAC-154-10",
                "Industry benchmarking participation",
                SafetyCategory::OperationalSafety,
                "Participate in voluntary industry safety benchmarking programmes and share \
                 de-identified occurrence data.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Tops),
            weight: Some(10),
            authority_reference: Some("153.201".to_string()),
            applies_to_sizes: Some(vec![
                AirportSize::Medium,
                AirportSize::Large,
                AirportSize::International,
            ]),
            ..base(
                "RBAC-153-10",
                "Rescue and firefighting service",
                SafetyCategory::FireSafety,
                "Provide a rescue and firefighting service sized to the airport category, \
                 with certified equipment and extinguishers positioned per the standard.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(6),
            applies_to_sizes: Some(vec![AirportSize::Large, AirportSize::International]),
            ..base(
                "RBAC-153-11",
                "Fire detection and alarm systems",
                SafetyCategory::FireSafety,
                "Install automatic fire detection and alarm systems in terminal buildings \
                 and hangars, integrated with a monitored central station.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Docs),
            weight: Some(9),
            applies_to_types: Some(vec![AirportType::Commercial, AirportType::Mixed]),
            min_passengers: Some(200_000),
            ..base(
                "RBAC-108-01",
                "Aviation security programme",
                SafetyCategory::Security,
                "Maintain a documented aviation security (AVSEC) programme including \
                 screening of passengers and baggage before boarding.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(8),
            requires_international: true,
            ..base(
                "RBAC-108-02",
                "International operations security",
                SafetyCategory::Security,
                "International operations require customs coordination and segregated \
                 inspection facilities for arriving passengers.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Tops),
            weight: Some(5),
            ..base(
                "RBAC-107-01",
                "Perimeter protection",
                SafetyCategory::Security,
                "Maintain perimeter fencing, lighting and patrol routines around the \
                 movement area.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Tops),
            weight: Some(8),
            authority_reference: Some("153.323(e)".to_string()),
            ..base(
                "RBAC-153-20",
                "Pavement and apron condition",
                SafetyCategory::Infrastructure,
                "Inspect runway and apron pavement daily and keep markings visible and \
                 conformant.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(6),
            min_runways: Some(2),
            ..base(
                "RBAC-153-21",
                "Airfield lighting",
                SafetyCategory::Infrastructure,
                "Maintain airfield edge lighting systems with backup power for \
                 multi-runway operations.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::B),
            evaluation_mode: Some(EvaluationMode::Docs),
            weight: Some(3),
            requires_cargo: true,
            ..base(
                "RBAC-153-22",
                "Cargo handling infrastructure",
                SafetyCategory::Infrastructure,
                "Provide covered cargo handling areas with adequate handling capacity.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Tops),
            weight: Some(5),
            min_aircraft_weight: Some(150),
            ..base(
                "RBAC-153-23",
                "Heavy aircraft pavement strength",
                SafetyCategory::Infrastructure,
                "Runway bearing strength must support heavy aircraft in regular \
                 operation; assess pavement classification yearly.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(10),
            authority_reference: Some("153.509".to_string()),
            ..base(
                "RBAC-153-30",
                "Airport emergency plan",
                SafetyCategory::EmergencyResponse,
                "Maintain a documented airport emergency plan exercised jointly with \
                 external response agencies.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Tops),
            weight: Some(4),
            applies_to_sizes: Some(vec![
                AirportSize::Medium,
                AirportSize::Large,
                AirportSize::International,
            ]),
            ..base(
                "RBAC-153-31",
                "Emergency communication",
                SafetyCategory::EmergencyResponse,
                "Provide dedicated emergency communication channels for response teams.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::B),
            evaluation_mode: Some(EvaluationMode::Docs),
            weight: Some(3),
            min_passengers: Some(1_000_000),
            ..base(
                "RBAC-161-01",
                "Noise monitoring",
                SafetyCategory::Environmental,
                "Monitor aircraft noise exposure in surrounding communities and publish \
                 periodic reports.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::B),
            evaluation_mode: Some(EvaluationMode::Docs),
            weight: Some(2),
            ..base(
                "RBAC-161-02",
                "Waste management",
                SafetyCategory::Environmental,
                "Implement waste segregation and disposal procedures for operational \
                 and hazardous waste.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(7),
            ..base(
                "RBAC-164-01",
                "Wildlife hazard management",
                SafetyCategory::WildlifeManagement,
                "Manage wildlife hazards in the aerodrome vicinity and report strikes \
                 to the authority.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Docs),
            weight: Some(5),
            requires_maintenance: true,
            ..base(
                "RBAC-145-01",
                "Maintenance organization certification",
                SafetyCategory::Maintenance,
                "Aeronautical maintenance facilities and hangars must hold valid \
                 certification, supported by preventive maintenance and calibration \
                 programmes for critical equipment.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::D),
            evaluation_mode: Some(EvaluationMode::Docs),
            weight: Some(6),
            ..base(
                "RBAC-153-40",
                "Operational supervisor certification",
                SafetyCategory::PersonnelCertification,
                "Operational supervisors must hold valid authority certification and \
                 complete recurrent training on schedule.",
            )
        },
        Regulation {
            requirement_tier: Some(RequirementTier::C),
            evaluation_mode: Some(EvaluationMode::Both),
            weight: Some(7),
            applies_to_sizes: Some(vec![AirportSize::Large, AirportSize::International]),
            min_runways: Some(2),
            ..base(
                "RBAC-172-01",
                "Air traffic services provision",
                SafetyCategory::AirTrafficServices,
                "Provide certified control tower services with VHF communication and \
                 navigation aids maintained in service.",
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_codes_are_unique() {
        let codes: HashSet<_> = catalog().iter().map(|r| r.code.clone()).collect();
        assert_eq!(codes.len(), catalog().len());
    }

    #[test]
    fn test_catalog_covers_every_safety_category() {
        let categories: HashSet<_> = catalog().iter().map(|r| r.safety_category).collect();
        assert_eq!(categories.len(), 10);
    }

    #[test]
    fn test_catalog_covers_every_tier_and_mode() {
        let tiers: HashSet<_> = catalog().iter().filter_map(|r| r.requirement_tier).collect();
        assert_eq!(tiers.len(), 4);

        let modes: HashSet<_> = catalog().iter().filter_map(|r| r.evaluation_mode).collect();
        assert_eq!(modes.len(), 3);
    }

    #[test]
    fn test_catalog_exercises_every_predicate() {
        let regs = catalog();
        assert!(regs.iter().any(|r| r.applies_to_sizes.is_some()));
        assert!(regs.iter().any(|r| r.applies_to_types.is_some()));
        assert!(regs.iter().any(|r| r.min_passengers.is_some()));
        assert!(regs.iter().any(|r| r.requires_international));
        assert!(regs.iter().any(|r| r.requires_cargo));
        assert!(regs.iter().any(|r| r.requires_maintenance));
        assert!(regs.iter().any(|r| r.min_runways.is_some()));
        assert!(regs.iter().any(|r| r.min_aircraft_weight.is_some()));
    }
}
