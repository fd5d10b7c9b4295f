//! The applicability-and-scoring engine
//!
//! One compliance check is a sequential read-modify-write pipeline over a
//! single airport: infer and persist missing classification attributes,
//! filter the regulation set through the applicability matcher, fetch or
//! create one compliance record per applicable regulation, score the lot,
//! and synthesize recommendations. The decision logic lives in the pure
//! submodules; this module owns orchestration and persistence ordering.

pub mod actions;
pub mod applicability;
pub mod inference;
pub mod lifecycle;
pub mod recommendations;
pub mod scoring;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use acms_common::db::{Airport, ComplianceRecord, Regulation};
use acms_common::types::ComplianceStatus;
use acms_common::{Error, Result};

use crate::db;
pub use applicability::applies;
pub use lifecycle::RecordUpdate;
pub use scoring::Scorecard;

/// Record tallies by status for one compliance check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub compliant: usize,
    pub non_compliant: usize,
    pub partial: usize,
    pub pending: usize,
}

impl StatusCounts {
    fn tally(records: &[ComplianceRecord]) -> Self {
        let mut counts = StatusCounts::default();
        for record in records {
            match record.status {
                ComplianceStatus::Compliant => counts.compliant += 1,
                ComplianceStatus::NonCompliant => counts.non_compliant += 1,
                ComplianceStatus::Partial => counts.partial += 1,
                ComplianceStatus::PendingReview => counts.pending += 1,
                ComplianceStatus::NotApplicable => {}
            }
        }
        counts
    }
}

/// Result of one full compliance check
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub airport_id: Uuid,
    pub total_applicable: usize,
    pub status_counts: StatusCounts,
    pub records: Vec<ComplianceRecord>,
    pub recommendations: Vec<String>,
    pub scorecard: Scorecard,
}

/// Engine facade over one database pool
#[derive(Clone)]
pub struct ComplianceEngine {
    db: SqlitePool,
}

impl ComplianceEngine {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// All regulations whose predicates match the airport's profile
    pub async fn applicable_regulations(&self, airport: &Airport) -> Result<Vec<Regulation>> {
        let all = db::regulations::list_all(&self.db).await?;
        Ok(all
            .into_iter()
            .filter(|regulation| applies(regulation, airport))
            .collect())
    }

    /// Run a full compliance check for one airport
    ///
    /// Creates a compliance record for every newly applicable regulation
    /// (unless `auto_create_records` is false) and regenerates empty
    /// checklists on non-compliant and pending records.
    pub async fn run_compliance_check(
        &self,
        airport_id: Uuid,
        auto_create_records: bool,
    ) -> Result<ComplianceReport> {
        let mut airport = db::airports::get(&self.db, airport_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Airport {} not found", airport_id)))?;

        // Fill missing classification attributes once, so downstream reads
        // within this check and future checks see stable data
        if airport.size.is_none() || airport.annual_passengers.is_none() {
            let profile = inference::infer_profile(&airport);
            db::airports::persist_profile(
                &self.db,
                airport.guid,
                profile.size,
                profile.annual_passengers,
            )
            .await?;
            airport.size = Some(profile.size);
            airport.annual_passengers = Some(profile.annual_passengers);
        }

        let applicable = self.applicable_regulations(&airport).await?;

        let mut records = Vec::with_capacity(applicable.len());
        for regulation in &applicable {
            let existing = db::records::get_by_pair(&self.db, airport.guid, regulation.guid).await?;
            let record = match existing {
                None if auto_create_records => {
                    let items = actions::generate_action_items(regulation, &airport);
                    let record = ComplianceRecord::new(airport.guid, regulation.guid, items);
                    db::records::insert(&self.db, &record).await?;
                    // A concurrent check may have won the insert race; the
                    // unique (airport, regulation) constraint guarantees
                    // exactly one row survives, so read it back
                    db::records::get_by_pair(&self.db, airport.guid, regulation.guid)
                        .await?
                        .ok_or_else(|| {
                            Error::Internal("compliance record missing after insert".to_string())
                        })?
                }
                None => continue,
                Some(mut record) => {
                    if lifecycle::needs_checklist_regeneration(&record) {
                        record.action_items = actions::generate_action_items(regulation, &airport);
                        db::records::save(&self.db, &record).await?;
                    }
                    record
                }
            };
            records.push(record);
        }

        let status_counts = StatusCounts::tally(&records);
        let scorecard = scoring::score(&records, &applicable);
        let mut recommendations =
            recommendations::recommend(&airport, &records, Some(&scorecard));

        if applicable.is_empty() {
            let total = db::regulations::count(&self.db).await?;
            recommendations.insert(0, recommendations::no_applicable_message(total));
        }

        Ok(ComplianceReport {
            airport_id,
            total_applicable: applicable.len(),
            status_counts,
            records,
            recommendations,
            scorecard,
        })
    }

    /// Apply a partial update to one compliance record
    ///
    /// Fails with not-found for unknown ids; never fabricates a record.
    pub async fn update_record(
        &self,
        record_id: Uuid,
        update: RecordUpdate,
    ) -> Result<ComplianceRecord> {
        let mut record = db::records::get(&self.db, record_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("Compliance record {} not found", record_id))
            })?;

        let now = Utc::now();
        lifecycle::apply_update(&mut record, update, now.date_naive());
        record.last_verified = Some(now.to_rfc3339());

        db::records::save(&self.db, &record).await?;
        Ok(record)
    }
}
