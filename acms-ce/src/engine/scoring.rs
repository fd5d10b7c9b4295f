//! Compliance scoring
//!
//! Buckets records by requirement tier, accumulates regulation weights, and
//! produces the tiered percentages plus the essential-compliance gate used
//! for certification. Only a status of exactly `compliant` earns weight:
//! partial completion counts at the record level but never at the
//! aggregate. Records whose regulation cannot be resolved are skipped; a
//! broken reference is a data problem, not a scoring failure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

use acms_common::db::{ComplianceRecord, Regulation};
use acms_common::policy::{DEFAULT_REGULATION_WEIGHT, ESSENTIAL_GATE_PERCENT};
use acms_common::types::{ComplianceStatus, EvaluationMode, RequirementTier};

/// Aggregate compliance scorecard for one airport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// True when the tier-D percentage meets the certification gate
    pub essential_compliant: bool,
    pub essential_percentage: f64,
    pub complementary_percentage: f64,
    pub recommended_percentage: f64,
    pub best_practices_percentage: f64,
    pub overall_score: f64,
    pub d_items_total: usize,
    pub d_items_compliant: usize,
    pub c_items_total: usize,
    pub b_items_total: usize,
    pub a_items_total: usize,
    pub docs_items_total: usize,
    pub tops_items_total: usize,
}

#[derive(Debug, Default)]
struct TierBucket {
    total_weight: i64,
    compliant_weight: i64,
    items: usize,
    compliant_items: usize,
}

impl TierBucket {
    fn add(&mut self, weight: i64, compliant: bool) {
        self.total_weight += weight;
        self.items += 1;
        if compliant {
            self.compliant_weight += weight;
            self.compliant_items += 1;
        }
    }

    fn percentage(&self) -> f64 {
        if self.total_weight > 0 {
            round2(self.compliant_weight as f64 / self.total_weight as f64 * 100.0)
        } else {
            0.0
        }
    }
}

/// Compute the scorecard for one airport's records
pub fn score(records: &[ComplianceRecord], regulations: &[Regulation]) -> Scorecard {
    let by_id: HashMap<Uuid, &Regulation> = regulations.iter().map(|r| (r.guid, r)).collect();

    let mut d = TierBucket::default();
    let mut c = TierBucket::default();
    let mut b = TierBucket::default();
    let mut a = TierBucket::default();
    let mut docs_items_total = 0;
    let mut tops_items_total = 0;

    for record in records {
        let Some(regulation) = by_id.get(&record.regulation_id) else {
            warn!(
                "Skipping record {} in scoring: regulation {} not resolvable",
                record.guid, record.regulation_id
            );
            continue;
        };

        let weight = regulation.weight.unwrap_or(DEFAULT_REGULATION_WEIGHT);
        let compliant = record.status == ComplianceStatus::Compliant;

        if let Some(tier) = regulation.requirement_tier {
            let bucket = match tier {
                RequirementTier::D => &mut d,
                RequirementTier::C => &mut c,
                RequirementTier::B => &mut b,
                RequirementTier::A => &mut a,
            };
            bucket.add(weight, compliant);
        }

        // An item evaluated in BOTH modes counts toward both tallies
        match regulation.evaluation_mode.unwrap_or(EvaluationMode::Both) {
            EvaluationMode::Docs => docs_items_total += 1,
            EvaluationMode::Tops => tops_items_total += 1,
            EvaluationMode::Both => {
                docs_items_total += 1;
                tops_items_total += 1;
            }
        }
    }

    let essential_percentage = d.percentage();
    let total_weight = d.total_weight + c.total_weight + b.total_weight + a.total_weight;
    let compliant_weight =
        d.compliant_weight + c.compliant_weight + b.compliant_weight + a.compliant_weight;
    let overall_score = if total_weight > 0 {
        round2(compliant_weight as f64 / total_weight as f64 * 100.0)
    } else {
        0.0
    };

    Scorecard {
        essential_compliant: essential_percentage >= ESSENTIAL_GATE_PERCENT,
        essential_percentage,
        complementary_percentage: c.percentage(),
        recommended_percentage: b.percentage(),
        best_practices_percentage: a.percentage(),
        overall_score,
        d_items_total: d.items,
        d_items_compliant: d.compliant_items,
        c_items_total: c.items,
        b_items_total: b.items,
        a_items_total: a.items,
        docs_items_total,
        tops_items_total,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
