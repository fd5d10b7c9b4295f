//! Integration tests for the compliance engine
//!
//! Exercise the full check pipeline against an in-memory database: attribute
//! inference and persistence, applicability filtering, record creation,
//! checklist regeneration, scoring and recommendations, plus the record
//! update lifecycle end to end.

use sqlx::SqlitePool;
use uuid::Uuid;

use acms_ce::db;
use acms_ce::engine::{ComplianceEngine, RecordUpdate};
use acms_ce::seed;
use acms_common::db::{init_memory_database, Airport, Regulation};
use acms_common::types::{
    AirportSize, AirportType, ComplianceStatus, RequirementTier, SafetyCategory, UsageClass,
};

async fn setup_db() -> SqlitePool {
    init_memory_database()
        .await
        .expect("Should create in-memory database")
}

fn airport(code: &str) -> Airport {
    Airport {
        guid: Uuid::new_v4(),
        code: code.to_string(),
        name: format!("{} Test Airport", code),
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

fn plain_regulation(code: &str, tier: RequirementTier) -> Regulation {
    Regulation {
        guid: Uuid::new_v4(),
        code: code.to_string(),
        title: format!("{} test regulation", code),
        description: None,
        safety_category: SafetyCategory::OperationalSafety,
        requirement_tier: Some(tier),
        evaluation_mode: None,
        weight: Some(1),
        authority_reference: None,
        applies_to_sizes: None,
        applies_to_types: None,
        min_passengers: None,
        requires_international: false,
        requires_cargo: false,
        requires_maintenance: false,
        min_runways: None,
        min_aircraft_weight: None,
        requirements: "Maintain an incident register and provide training.".to_string(),
        expected_performance: None,
    }
}

// =============================================================================
// Seeding
// =============================================================================

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let pool = setup_db().await;

    let first = seed::seed_regulations(&pool).await.unwrap();
    assert_eq!(first.inserted, seed::catalog().len());
    assert_eq!(first.skipped, 0);

    let second = seed::seed_regulations(&pool).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, seed::catalog().len());
}

// =============================================================================
// Full compliance check pipeline
// =============================================================================

#[tokio::test]
async fn test_check_infers_and_persists_missing_attributes() {
    let pool = setup_db().await;
    seed::seed_regulations(&pool).await.unwrap();

    // Class IV airport with no explicit size or passenger count
    let mut ap = airport("SBGR");
    ap.usage_class = Some(UsageClass::ClassIV);
    ap.airport_type = Some(AirportType::Commercial);
    ap.has_international_operations = true;
    ap.has_cargo_operations = true;
    ap.number_of_runways = 2;
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool.clone());
    let report = engine.run_compliance_check(ap.guid, true).await.unwrap();
    assert!(report.total_applicable > 0);

    // Inference was written through exactly once
    let stored = db::airports::get(&pool, ap.guid).await.unwrap().unwrap();
    assert_eq!(stored.size, Some(AirportSize::International));
    assert_eq!(stored.annual_passengers, Some(10_000_000));
}

#[tokio::test]
async fn test_check_preserves_explicit_attributes() {
    let pool = setup_db().await;
    seed::seed_regulations(&pool).await.unwrap();

    // Explicit size conflicts with what the usage class would infer; the
    // explicit value must survive the check untouched
    let mut ap = airport("SBKP");
    ap.size = Some(AirportSize::Large);
    ap.usage_class = Some(UsageClass::ClassII);
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool.clone());
    engine.run_compliance_check(ap.guid, true).await.unwrap();

    let stored = db::airports::get(&pool, ap.guid).await.unwrap().unwrap();
    assert_eq!(stored.size, Some(AirportSize::Large));
    // Passengers were missing and get the usage-class baseline
    assert_eq!(stored.annual_passengers, Some(600_000));
}

#[tokio::test]
async fn test_new_records_start_pending_with_checklists() {
    let pool = setup_db().await;
    seed::seed_regulations(&pool).await.unwrap();

    let mut ap = airport("SBCF");
    ap.usage_class = Some(UsageClass::ClassIII);
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool.clone());
    let report = engine.run_compliance_check(ap.guid, true).await.unwrap();

    assert_eq!(report.status_counts.pending, report.total_applicable);
    assert_eq!(report.records.len(), report.total_applicable);
    for record in &report.records {
        assert_eq!(record.status, ComplianceStatus::PendingReview);
        assert!(
            !record.action_items.is_empty(),
            "every new record gets a generated checklist"
        );
    }

    // All pending, nothing compliant: the essential gate fails and the
    // review-needed guidance is present
    assert!(!report.scorecard.essential_compliant);
    assert!(report
        .recommendations
        .iter()
        .any(|m| m.starts_with("Action required")));
    assert!(report.recommendations.iter().any(|m| m.contains("CRITICAL")));
}

#[tokio::test]
async fn test_check_creates_each_record_exactly_once() {
    let pool = setup_db().await;
    seed::seed_regulations(&pool).await.unwrap();

    let mut ap = airport("SBPA");
    ap.usage_class = Some(UsageClass::ClassIII);
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool.clone());
    let first = engine.run_compliance_check(ap.guid, true).await.unwrap();
    let second = engine.run_compliance_check(ap.guid, true).await.unwrap();

    assert_eq!(first.total_applicable, second.total_applicable);
    let first_ids: Vec<Uuid> = first.records.iter().map(|r| r.guid).collect();
    let second_ids: Vec<Uuid> = second.records.iter().map(|r| r.guid).collect();
    assert_eq!(first_ids, second_ids, "records are reused, not recreated");
}

#[tokio::test]
async fn test_auto_create_disabled_creates_nothing() {
    let pool = setup_db().await;
    seed::seed_regulations(&pool).await.unwrap();

    let mut ap = airport("SBSV");
    ap.usage_class = Some(UsageClass::ClassIII);
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool.clone());
    let report = engine.run_compliance_check(ap.guid, false).await.unwrap();

    assert!(report.total_applicable > 0);
    assert!(report.records.is_empty());
    assert!(db::records::list_by_airport(&pool, ap.guid)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_check_unknown_airport_is_not_found() {
    let pool = setup_db().await;
    let engine = ComplianceEngine::new(pool);

    let err = engine
        .run_compliance_check(Uuid::new_v4(), true)
        .await
        .unwrap_err();
    assert!(matches!(err, acms_common::Error::NotFound(_)));
}

// =============================================================================
// Zero-applicable branches
// =============================================================================

#[tokio::test]
async fn test_empty_catalog_yields_seed_guidance() {
    let pool = setup_db().await;
    let ap = airport("SBUL");
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool);
    let report = engine.run_compliance_check(ap.guid, true).await.unwrap();

    assert_eq!(report.total_applicable, 0);
    assert!(report.recommendations[0].contains("No regulations loaded"));
}

#[tokio::test]
async fn test_unmatched_profile_yields_profile_guidance() {
    let pool = setup_db().await;

    // The only regulation requires 200k passengers; a small airport with no
    // recorded count falls back to the 0..200k size range, and the threshold
    // sits above its midpoint, so nothing applies
    let mut reg = plain_regulation("MIN-PAX-01", RequirementTier::C);
    reg.min_passengers = Some(200_000);
    db::regulations::insert(&pool, &reg).await.unwrap();

    let mut ap = airport("SBCN");
    ap.size = Some(AirportSize::Small);
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool);
    let report = engine.run_compliance_check(ap.guid, true).await.unwrap();

    assert_eq!(report.total_applicable, 0);
    assert!(report.recommendations[0].contains("match this airport's current profile"));
}

// =============================================================================
// Record updates through the engine
// =============================================================================

async fn single_record_setup(pool: &SqlitePool) -> (ComplianceEngine, Uuid) {
    let reg = plain_regulation("UPD-01", RequirementTier::D);
    db::regulations::insert(pool, &reg).await.unwrap();

    let mut ap = airport("SBFL");
    ap.usage_class = Some(UsageClass::ClassII);
    db::airports::insert(pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool.clone());
    let report = engine.run_compliance_check(ap.guid, true).await.unwrap();
    assert_eq!(report.records.len(), 1);
    (engine, report.records[0].guid)
}

#[tokio::test]
async fn test_partial_completion_marks_record_partial() {
    let pool = setup_db().await;
    let (engine, record_id) = single_record_setup(&pool).await;

    // The incident+training requirement generates a 6-item checklist
    let updated = engine
        .update_record(
            record_id,
            RecordUpdate {
                completed_items: Some(vec![0, 1]),
                verified_by: Some("inspector-3".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ComplianceStatus::Partial);
    assert_eq!(updated.verified_by.as_deref(), Some("inspector-3"));
    assert!(updated.last_verified.is_some());

    // The change survives a reload
    let stored = db::records::get(&pool, record_id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_explicit_compliant_completes_checklist() {
    let pool = setup_db().await;
    let (engine, record_id) = single_record_setup(&pool).await;

    let updated = engine
        .update_record(
            record_id,
            RecordUpdate {
                status: Some(ComplianceStatus::Compliant),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ComplianceStatus::Compliant);
    assert_eq!(updated.completed_items.len(), updated.action_items.len());
}

#[tokio::test]
async fn test_explicit_non_compliant_clears_completions() {
    let pool = setup_db().await;
    let (engine, record_id) = single_record_setup(&pool).await;

    engine
        .update_record(
            record_id,
            RecordUpdate {
                status: Some(ComplianceStatus::Compliant),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = engine
        .update_record(
            record_id,
            RecordUpdate {
                status: Some(ComplianceStatus::NonCompliant),
                notes: Some("failed on-site inspection".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ComplianceStatus::NonCompliant);
    assert!(updated.completed_items.is_empty());
    assert_eq!(updated.notes.as_deref(), Some("failed on-site inspection"));
}

#[tokio::test]
async fn test_past_due_completions_are_expired_on_update() {
    let pool = setup_db().await;
    let (engine, record_id) = single_record_setup(&pool).await;

    // Complete two items, one of them with a due date long past
    let updated = engine
        .update_record(
            record_id,
            RecordUpdate {
                completed_items: Some(vec![0, 1]),
                item_due_dates: Some(
                    [(0, chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())]
                        .into_iter()
                        .collect(),
                ),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.completed_items.contains(&0));
    assert!(updated.completed_items.contains(&1));
    assert_eq!(updated.status, ComplianceStatus::Partial);
}

#[tokio::test]
async fn test_update_unknown_record_is_not_found() {
    let pool = setup_db().await;
    let engine = ComplianceEngine::new(pool);

    let err = engine
        .update_record(Uuid::new_v4(), RecordUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, acms_common::Error::NotFound(_)));
}

// =============================================================================
// Checklist regeneration guard
// =============================================================================

#[tokio::test]
async fn test_emptied_checklist_regenerates_on_next_check() {
    let pool = setup_db().await;
    let (engine, record_id) = single_record_setup(&pool).await;

    // Wipe the checklist while the record stays pending
    engine
        .update_record(
            record_id,
            RecordUpdate {
                action_items: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let wiped = db::records::get(&pool, record_id).await.unwrap().unwrap();
    assert!(wiped.action_items.is_empty());

    // The next check restores a generated checklist
    let report = engine
        .run_compliance_check(wiped.airport_id, true)
        .await
        .unwrap();
    assert!(!report.records[0].action_items.is_empty());
}

#[tokio::test]
async fn test_compliant_records_are_not_regenerated() {
    let pool = setup_db().await;
    let (engine, record_id) = single_record_setup(&pool).await;

    engine
        .update_record(
            record_id,
            RecordUpdate {
                status: Some(ComplianceStatus::Compliant),
                action_items: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let record = db::records::get(&pool, record_id).await.unwrap().unwrap();
    let report = engine
        .run_compliance_check(record.airport_id, true)
        .await
        .unwrap();

    // Status compliant: the empty checklist is left alone
    assert!(report.records[0].action_items.is_empty());
    assert_eq!(report.records[0].status, ComplianceStatus::Compliant);
    assert_eq!(report.status_counts.compliant, 1);
}

// =============================================================================
// Scoring across the pipeline
// =============================================================================

#[tokio::test]
async fn test_tier_d_split_fails_essential_gate() {
    let pool = setup_db().await;

    // Two tier-D regulations of equal weight: one compliant, one not,
    // landing tier D at exactly 50%
    let mut reg_a = plain_regulation("GATE-01", RequirementTier::D);
    reg_a.weight = Some(10);
    let mut reg_b = plain_regulation("GATE-02", RequirementTier::D);
    reg_b.weight = Some(10);
    db::regulations::insert(&pool, &reg_a).await.unwrap();
    db::regulations::insert(&pool, &reg_b).await.unwrap();

    let mut ap = airport("SBBR");
    ap.usage_class = Some(UsageClass::ClassIII);
    db::airports::insert(&pool, &ap).await.unwrap();

    let engine = ComplianceEngine::new(pool.clone());
    let report = engine.run_compliance_check(ap.guid, true).await.unwrap();
    assert_eq!(report.records.len(), 2);

    engine
        .update_record(
            report.records[0].guid,
            RecordUpdate {
                status: Some(ComplianceStatus::Compliant),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    engine
        .update_record(
            report.records[1].guid,
            RecordUpdate {
                status: Some(ComplianceStatus::NonCompliant),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let report = engine.run_compliance_check(ap.guid, true).await.unwrap();
    assert_eq!(report.scorecard.essential_percentage, 50.0);
    assert!(!report.scorecard.essential_compliant);
    assert_eq!(report.status_counts.compliant, 1);
    assert_eq!(report.status_counts.non_compliant, 1);
    assert!(report.recommendations.iter().any(|m| m.contains("CRITICAL")));
    assert!(report
        .recommendations
        .iter()
        .any(|m| m.starts_with("Urgent")));
}
