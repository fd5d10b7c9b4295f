//! Domain models and the JSON codecs for their stored list/map fields
//!
//! Checklists, completed-index sets, due-date maps, custom fields and the
//! applicability sets on regulations are stored as JSON text columns. All
//! encoding and decoding happens here, at the storage boundary; the rest of
//! the system only sees typed values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

use crate::types::{
    AirportSize, AirportType, ComplianceStatus, EvaluationMode, RequirementTier, SafetyCategory,
    UsageClass,
};

/// Airport profile with the variables that determine which regulations apply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub guid: Uuid,
    /// ICAO code, unique
    pub code: String,
    pub name: String,
    pub size: Option<AirportSize>,
    pub airport_type: Option<AirportType>,
    pub usage_class: Option<UsageClass>,
    pub annual_passengers: Option<i64>,
    pub has_international_operations: bool,
    pub has_cargo_operations: bool,
    pub has_maintenance_facility: bool,
    pub number_of_runways: i64,
    /// Maximum aircraft weight the airport can handle, metric tons
    pub max_aircraft_weight: Option<i64>,
}

/// A certification regulation and its applicability predicates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regulation {
    pub guid: Uuid,
    /// Regulation code, unique (e.g. RBAC-154-02)
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub safety_category: SafetyCategory,
    pub requirement_tier: Option<RequirementTier>,
    pub evaluation_mode: Option<EvaluationMode>,
    pub weight: Option<i64>,
    /// Normative reference within the authority's rulebook (e.g. 153.323(e))
    pub authority_reference: Option<String>,
    /// Size tiers the regulation is restricted to; None means no restriction
    pub applies_to_sizes: Option<Vec<AirportSize>>,
    /// Airport types the regulation is restricted to; None means no restriction
    pub applies_to_types: Option<Vec<AirportType>>,
    pub min_passengers: Option<i64>,
    pub requires_international: bool,
    pub requires_cargo: bool,
    pub requires_maintenance: bool,
    pub min_runways: Option<i64>,
    pub min_aircraft_weight: Option<i64>,
    /// Free-text requirement description; drives action-item generation
    pub requirements: String,
    pub expected_performance: Option<String>,
}

/// Compliance state of one (airport, regulation) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub guid: Uuid,
    pub airport_id: Uuid,
    pub regulation_id: Uuid,
    pub status: ComplianceStatus,
    pub notes: Option<String>,
    /// RFC 3339 timestamp of the most recent update
    pub last_verified: Option<String>,
    pub verified_by: Option<String>,
    /// Generated remediation checklist, ordered
    pub action_items: Vec<String>,
    /// Indices into action_items marked complete
    pub completed_items: BTreeSet<usize>,
    /// Due date per checklist index; past-due items cannot count as complete
    pub item_due_dates: BTreeMap<usize, NaiveDate>,
    /// Regulation-specific structured data, opaque to the engine
    pub custom_fields: Option<serde_json::Value>,
}

impl ComplianceRecord {
    /// New record for a freshly applicable pair, pending review
    pub fn new(airport_id: Uuid, regulation_id: Uuid, action_items: Vec<String>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            airport_id,
            regulation_id,
            status: ComplianceStatus::PendingReview,
            notes: None,
            last_verified: None,
            verified_by: None,
            action_items,
            completed_items: BTreeSet::new(),
            item_due_dates: BTreeMap::new(),
            custom_fields: None,
        }
    }
}

// ============================================================================
// JSON column codecs
// ============================================================================

/// Encode a string list column; empty lists store as NULL
pub fn encode_string_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        serde_json::to_string(items).ok()
    }
}

/// Decode a string list column; malformed data decodes to empty
pub fn decode_string_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(text) => serde_json::from_str(text).unwrap_or_else(|e| {
            warn!("Dropping malformed string list column: {}", e);
            Vec::new()
        }),
    }
}

/// Encode a completed-index set; empty sets store as NULL
pub fn encode_index_set(indices: &BTreeSet<usize>) -> Option<String> {
    if indices.is_empty() {
        None
    } else {
        serde_json::to_string(indices).ok()
    }
}

/// Decode a completed-index set; malformed data decodes to empty
pub fn decode_index_set(raw: Option<&str>) -> BTreeSet<usize> {
    match raw {
        None => BTreeSet::new(),
        Some(text) => serde_json::from_str(text).unwrap_or_else(|e| {
            warn!("Dropping malformed index set column: {}", e);
            BTreeSet::new()
        }),
    }
}

/// Encode a due-date map; empty maps store as NULL
pub fn encode_due_dates(dates: &BTreeMap<usize, NaiveDate>) -> Option<String> {
    if dates.is_empty() {
        None
    } else {
        serde_json::to_string(dates).ok()
    }
}

/// Decode a due-date map; malformed data decodes to empty
pub fn decode_due_dates(raw: Option<&str>) -> BTreeMap<usize, NaiveDate> {
    match raw {
        None => BTreeMap::new(),
        Some(text) => serde_json::from_str(text).unwrap_or_else(|e| {
            warn!("Dropping malformed due-date column: {}", e);
            BTreeMap::new()
        }),
    }
}

/// Encode an applicability set of enum values as a JSON array of their wire
/// strings
pub fn encode_enum_set<T: ToString>(set: Option<&Vec<T>>) -> Option<String> {
    set.map(|values| {
        let strings: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        serde_json::to_string(&strings).unwrap_or_else(|_| "[]".to_string())
    })
}

/// Decode an applicability set, failing open
///
/// A regulation with a corrupt stored predicate must not block an entire
/// compliance run: unparsable JSON decodes to None ("no restriction") and
/// unknown entries are dropped. An intact empty set stays an empty set,
/// which matches nothing.
pub fn decode_enum_set<T>(raw: Option<&str>, column: &str) -> Option<Vec<T>>
where
    T: FromStr,
{
    let text = raw?;
    let strings: Vec<String> = match serde_json::from_str(text) {
        Ok(list) => list,
        Err(e) => {
            warn!("Treating malformed {} as unrestricted: {}", column, e);
            return None;
        }
    };
    Some(
        strings
            .iter()
            .filter_map(|s| match T::from_str(s) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Dropping unknown {} entry: {}", column, s);
                    None
                }
            })
            .collect(),
    )
}
