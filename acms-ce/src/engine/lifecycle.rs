//! Compliance record lifecycle
//!
//! Owns the status state machine of a single record. `apply_update` is pure
//! and deterministic given the update and today's date; the async engine
//! wrapper loads the record, applies, stamps the verification time and
//! persists.
//!
//! Update order: merge due dates → expire past-due completions → replace
//! checklist → checklist-driven auto-transition → explicit status side
//! effects → metadata. Expiry runs first so that an expired action item can
//! no longer count as done, and its effect cascades into the auto-transition
//! when no explicit status arrives in the same update.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use acms_common::db::ComplianceRecord;
use acms_common::types::ComplianceStatus;

/// Partial update to one compliance record; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordUpdate {
    pub status: Option<ComplianceStatus>,
    pub notes: Option<String>,
    pub action_items: Option<Vec<String>>,
    pub completed_items: Option<Vec<usize>>,
    pub item_due_dates: Option<BTreeMap<usize, NaiveDate>>,
    pub verified_by: Option<String>,
    pub custom_fields: Option<serde_json::Value>,
}

/// Apply one update to a record in place
pub fn apply_update(record: &mut ComplianceRecord, update: RecordUpdate, today: NaiveDate) {
    // New due dates merge over existing ones rather than replacing the map
    if let Some(dates) = update.item_due_dates {
        record.item_due_dates.extend(dates);
    }

    let completed_supplied = update.completed_items.is_some();
    let mut completed: BTreeSet<usize> = match update.completed_items {
        Some(list) => list.into_iter().collect(),
        None => std::mem::take(&mut record.completed_items),
    };

    // An action item whose due date has passed can no longer count as done
    let before_expiry = completed.len();
    completed.retain(|idx| {
        record
            .item_due_dates
            .get(idx)
            .map_or(true, |due| *due >= today)
    });
    let expired_any = completed.len() != before_expiry;

    if let Some(items) = update.action_items {
        record.action_items = items;
    }
    record.completed_items = completed;

    // Checklist-driven auto-transition: only when the completed set actually
    // changed in this update and the caller did not set a status explicitly
    if update.status.is_none()
        && (completed_supplied || expired_any)
        && !record.action_items.is_empty()
    {
        let total = record.action_items.len();
        let done = record.completed_items.len();
        if done == 0 {
            // A record cannot remain compliant once completions are cleared
            if record.status == ComplianceStatus::Compliant {
                record.status = ComplianceStatus::PendingReview;
            }
        } else if done < total {
            record.status = ComplianceStatus::Partial;
        } else {
            record.status = ComplianceStatus::Compliant;
        }
    }

    // Explicit status keeps checklist and status consistent
    match update.status {
        Some(ComplianceStatus::Compliant) => {
            if !record.action_items.is_empty() {
                record.completed_items = (0..record.action_items.len()).collect();
            }
            record.status = ComplianceStatus::Compliant;
        }
        Some(ComplianceStatus::NonCompliant) => {
            record.completed_items.clear();
            record.status = ComplianceStatus::NonCompliant;
        }
        Some(status) => record.status = status,
        None => {}
    }

    if let Some(notes) = update.notes {
        record.notes = Some(notes);
    }
    if let Some(verified_by) = update.verified_by {
        record.verified_by = Some(verified_by);
    }
    if let Some(custom_fields) = update.custom_fields {
        record.custom_fields = Some(custom_fields);
    }
}

/// True if a record read during a compliance check should have its
/// checklist regenerated: only non-compliant or pending records with an
/// empty checklist qualify
pub fn needs_checklist_regeneration(record: &ComplianceRecord) -> bool {
    record.action_items.is_empty()
        && matches!(
            record.status,
            ComplianceStatus::NonCompliant | ComplianceStatus::PendingReview
        )
}
