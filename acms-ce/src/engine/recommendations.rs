//! Recommendation synthesis
//!
//! Turns record statuses and the scorecard into ranked operator guidance.
//! A fixed, ordered rule list; each rule appends at most one message, so
//! output order is stable and deterministic.

use acms_common::db::{Airport, ComplianceRecord};
use acms_common::policy::{ESSENTIAL_GATE_PERCENT, IMPROVEMENT_FOCUS_PERCENT};
use acms_common::types::{AirportSize, ComplianceStatus};

use crate::engine::inference::effective_size;
use crate::engine::scoring::Scorecard;

/// Generate guidance for one airport from its records and scorecard
pub fn recommend(
    airport: &Airport,
    records: &[ComplianceRecord],
    scorecard: Option<&Scorecard>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let non_compliant = records
        .iter()
        .filter(|r| r.status == ComplianceStatus::NonCompliant)
        .count();
    let pending = records
        .iter()
        .filter(|r| r.status == ComplianceStatus::PendingReview)
        .count();

    if non_compliant > 0 {
        recommendations.push(format!(
            "Urgent: {} regulation(s) are non-compliant. Review and address immediately to avoid penalties.",
            non_compliant
        ));
    }

    if pending > 0 {
        recommendations.push(format!(
            "Action required: {} regulation(s) need compliance review. Schedule inspections to verify compliance status.",
            pending
        ));
    }

    if let Some(scores) = scorecard {
        if !scores.essential_compliant {
            recommendations.push(format!(
                "CRITICAL: essential (tier D) compliance is {:.1}%. A minimum of {:.0}% is required for certification. Focus on D-classified items immediately.",
                scores.essential_percentage, ESSENTIAL_GATE_PERCENT
            ));
        } else {
            recommendations.push(format!(
                "Essential (tier D) compliance: {:.1}% - meets the minimum certification threshold.",
                scores.essential_percentage
            ));
        }

        if scores.overall_score < IMPROVEMENT_FOCUS_PERCENT {
            recommendations.push(format!(
                "Overall compliance score is {:.1}%. Consider focusing on complementary (C) and recommended (B) practices to improve the certification rating.",
                scores.overall_score
            ));
        }
    }

    match effective_size(airport) {
        AirportSize::Small => {
            recommendations.push(
                "As a small airport, ensure basic safety equipment and trained personnel meet the authority's minimum requirements.".to_string(),
            );
        }
        AirportSize::Large | AirportSize::International => {
            recommendations.push(
                "As a large or international airport, ensure a comprehensive safety management system (SMS) is in place and regularly audited.".to_string(),
            );
        }
        AirportSize::Medium => {}
    }

    if airport.has_international_operations {
        recommendations.push(
            "International operations require additional security and customs compliance. Verify AVSEC requirements are met.".to_string(),
        );
    }

    recommendations
}

/// Message prepended when a compliance check finds nothing applicable
///
/// Distinguishes an empty regulation table from a profile that matched
/// nothing: the operator's next step differs (seed the catalog vs fix the
/// airport's classification data).
pub fn no_applicable_message(total_regulations: i64) -> String {
    if total_regulations == 0 {
        "No regulations loaded. Seed the regulation catalog via POST /api/seed before running compliance checks.".to_string()
    } else {
        "No regulations match this airport's current profile. Review its usage class, type, and size classification.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn airport(size: AirportSize) -> Airport {
        Airport {
            guid: Uuid::new_v4(),
            code: "SBRC".to_string(),
            name: "Recommendation Test".to_string(),
            size: Some(size),
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

    fn record(status: ComplianceStatus) -> ComplianceRecord {
        let mut r = ComplianceRecord::new(Uuid::new_v4(), Uuid::new_v4(), vec![]);
        r.status = status;
        r
    }

    fn scorecard(essential_pct: f64, overall: f64) -> Scorecard {
        Scorecard {
            essential_compliant: essential_pct >= ESSENTIAL_GATE_PERCENT,
            essential_percentage: essential_pct,
            complementary_percentage: 0.0,
            recommended_percentage: 0.0,
            best_practices_percentage: 0.0,
            overall_score: overall,
            d_items_total: 0,
            d_items_compliant: 0,
            c_items_total: 0,
            b_items_total: 0,
            a_items_total: 0,
            docs_items_total: 0,
            tops_items_total: 0,
        }
    }

    #[test]
    fn test_urgent_message_for_non_compliant_records() {
        let records = vec![
            record(ComplianceStatus::NonCompliant),
            record(ComplianceStatus::NonCompliant),
            record(ComplianceStatus::Compliant),
        ];
        let messages = recommend(&airport(AirportSize::Medium), &records, None);
        assert!(messages[0].starts_with("Urgent: 2 regulation(s)"));
    }

    #[test]
    fn test_pending_review_message() {
        let records = vec![record(ComplianceStatus::PendingReview)];
        let messages = recommend(&airport(AirportSize::Medium), &records, None);
        assert!(messages[0].starts_with("Action required: 1 regulation(s)"));
    }

    #[test]
    fn test_essential_gate_messages() {
        let failing = recommend(
            &airport(AirportSize::Medium),
            &[],
            Some(&scorecard(50.0, 80.0)),
        );
        assert!(failing.iter().any(|m| m.starts_with("CRITICAL")));

        let passing = recommend(
            &airport(AirportSize::Medium),
            &[],
            Some(&scorecard(90.0, 80.0)),
        );
        assert!(passing
            .iter()
            .any(|m| m.contains("meets the minimum certification threshold")));
    }

    #[test]
    fn test_low_overall_score_adds_focus_message() {
        let messages = recommend(
            &airport(AirportSize::Medium),
            &[],
            Some(&scorecard(90.0, 55.5)),
        );
        assert!(messages.iter().any(|m| m.contains("55.5%")));

        let messages = recommend(
            &airport(AirportSize::Medium),
            &[],
            Some(&scorecard(90.0, 70.0)),
        );
        assert!(!messages.iter().any(|m| m.contains("complementary (C)")));
    }

    #[test]
    fn test_size_tiered_reminder() {
        let small = recommend(&airport(AirportSize::Small), &[], None);
        assert!(small.iter().any(|m| m.contains("small airport")));

        let medium = recommend(&airport(AirportSize::Medium), &[], None);
        assert!(medium.is_empty());

        let international = recommend(&airport(AirportSize::International), &[], None);
        assert!(international
            .iter()
            .any(|m| m.contains("large or international airport")));
    }

    #[test]
    fn test_international_operations_reminder() {
        let mut ap = airport(AirportSize::Medium);
        ap.has_international_operations = true;
        let messages = recommend(&ap, &[], None);
        assert!(messages.iter().any(|m| m.contains("AVSEC")));
    }

    #[test]
    fn test_no_applicable_messages_differ() {
        assert!(no_applicable_message(0).contains("No regulations loaded"));
        assert!(no_applicable_message(12).contains("match this airport's current profile"));
    }
}
