//! Comprehensive integration tests for the schedule resolution engine.
//!
//! This test suite exercises the full priority chain through the HTTP API:
//! - Template fallback resolution
//! - Period selection (category rank and range specificity)
//! - Exception-day overrides and manual shifts
//! - Absence short-circuiting
//! - Rotation cycle matching
//! - Paid-break cross-referencing
//! - Week aggregation with unscheduled days
//! - Assignment validation
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use schedule_engine::api::{AppState, create_router};
use schedule_engine::config::CatalogLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let catalog = CatalogLoader::load("./config/demo").expect("Failed to load demo catalog");
    AppState::new(catalog)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn office_assignment() -> Value {
    json!({
        "id": "asg_001",
        "employee_id": "emp_001",
        "template_id": "office_standard",
        "valid_from": "2026-01-01"
    })
}

fn ward_assignment() -> Value {
    json!({
        "id": "asg_002",
        "employee_id": "emp_002",
        "template_id": "ward_rotation",
        "valid_from": "2026-01-01",
        "rotation_anchor": "2026-01-05",
        "cycle_length": 4
    })
}

fn day_request(employee_id: &str, date: &str, assignments: Vec<Value>) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "assignments": assignments
    })
}

// =============================================================================
// IT-001: plain weekday resolves from the template
// =============================================================================
#[tokio::test]
async fn test_it_001_weekday_template_resolution() {
    let router = create_router_for_test();
    let (status, result) = post_json(
        router,
        "/resolve/day",
        day_request("emp_001", "2026-01-14", vec![office_assignment()]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "template");
    assert_eq!(result["provenance"]["template_id"], "office_standard");

    let slots = result["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["slot_id"], "wed_am");
    assert_eq!(slots[0]["start_minutes"], 540);
    assert_eq!(slots[0]["end_minutes"], 780);
    assert_eq!(slots[1]["slot_id"], "wed_lunch");
    assert_eq!(slots[1]["counts_as_work"], false);
    assert_eq!(slots[2]["slot_id"], "wed_pm");
}

// =============================================================================
// IT-002: absence wins over an active special period
// =============================================================================
#[tokio::test]
async fn test_it_002_absence_beats_special_period() {
    let router = create_router_for_test();
    let body = json!({
        "employee_id": "emp_001",
        "date": "2026-07-16",
        "assignments": [office_assignment()],
        "absences": [{
            "id": "abs_001",
            "employee_id": "emp_001",
            "kind": "vacation",
            "start_date": "2026-07-13",
            "end_date": "2026-07-17"
        }]
    });

    let (status, result) = post_json(router, "/resolve/day", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "absence");
    assert_eq!(result["provenance"]["absence_id"], "abs_001");
    assert!(result["slots"].as_array().unwrap().is_empty());
}

// =============================================================================
// IT-003: exception-day override bypasses period resolution
// =============================================================================
#[tokio::test]
async fn test_it_003_override_bypasses_periods() {
    let router = create_router_for_test();
    // The audit week special period is active on this date, but the
    // override replaces the whole resolved day.
    let body = json!({
        "employee_id": "emp_001",
        "date": "2026-07-16",
        "assignments": [office_assignment()],
        "overrides": [{
            "id": "ovr_001",
            "employee_id": "emp_001",
            "date": "2026-07-16",
            "label": "Worked holiday",
            "slots": [
                {"id": "holiday_am", "start": "08:00", "end": "12:00", "slot_type": "work"},
                {"id": "holiday_pm", "start": "12:30", "end": "15:30", "slot_type": "work"}
            ]
        }]
    });

    let (status, result) = post_json(router, "/resolve/day", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "override");
    assert_eq!(result["provenance"]["override_id"], "ovr_001");

    let slots = result["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["slot_id"], "holiday_am");
    assert_eq!(slots[1]["slot_id"], "holiday_pm");
}

// =============================================================================
// IT-004: special period wins over intensive on the same date
// =============================================================================
#[tokio::test]
async fn test_it_004_special_beats_intensive() {
    // 2026-07-14 is inside both summer_intensive_2026 and audit_week_2026.
    let (status, result) = post_json(
        create_router_for_test(),
        "/resolve/day",
        day_request("emp_001", "2026-07-14", vec![office_assignment()]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "period");
    assert_eq!(result["provenance"]["period_id"], "audit_week_2026");

    let slots = result["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["slot_id"], "au_tue");
    assert_eq!(slots[0]["start_minutes"], 600);
    assert_eq!(slots[0]["end_minutes"], 960);
}

// =============================================================================
// IT-005: between equal categories the narrower range wins
// =============================================================================
#[tokio::test]
async fn test_it_005_narrower_special_wins() {
    // 2026-07-15 is covered by two SPECIAL periods; the single-day
    // inventory count is narrower than the audit week and wins even
    // though it was created earlier.
    let (status, result) = post_json(
        create_router_for_test(),
        "/resolve/day",
        day_request("emp_001", "2026-07-15", vec![office_assignment()]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "period");
    assert_eq!(result["provenance"]["period_id"], "inventory_count_2026");
    assert_eq!(result["slots"][0]["slot_id"], "inv_wed");
}

// =============================================================================
// IT-006: intensive period applies outside the special range
// =============================================================================
#[tokio::test]
async fn test_it_006_intensive_period_applies() {
    let (status, result) = post_json(
        create_router_for_test(),
        "/resolve/day",
        day_request("emp_001", "2026-06-10", vec![office_assignment()]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "period");
    assert_eq!(result["provenance"]["period_id"], "summer_intensive_2026");
    assert_eq!(result["slots"][0]["start_minutes"], 480);
    assert_eq!(result["slots"][0]["end_minutes"], 900);
}

// =============================================================================
// IT-007: manual shift resolves above the period layer
// =============================================================================
#[tokio::test]
async fn test_it_007_manual_shift_beats_period() {
    let body = json!({
        "employee_id": "emp_001",
        "date": "2026-06-10",
        "assignments": [office_assignment()],
        "manual_shifts": [{
            "id": "man_001",
            "employee_id": "emp_001",
            "date": "2026-06-10",
            "template_id": "ward_rotation",
            "slots": [
                {"id": "cover_day", "start": "07:00", "end": "15:00", "slot_type": "work"}
            ]
        }]
    });

    let (status, result) = post_json(create_router_for_test(), "/resolve/day", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "manual");
    assert_eq!(result["provenance"]["manual_id"], "man_001");
    assert_eq!(result["slots"][0]["slot_id"], "cover_day");
}

// =============================================================================
// IT-008: rotation cycle resolves on-days, off-days and pre-anchor dates
// =============================================================================
#[tokio::test]
async fn test_it_008_rotation_cycle() {
    // Anchor 2026-01-05, cycle of 4 with patterns at positions 0 and 1.
    // 2026-01-06 is position 1: an on-day.
    let (status, on_day) = post_json(
        create_router_for_test(),
        "/resolve/day",
        day_request("emp_002", "2026-01-06", vec![ward_assignment()]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(on_day["source"], "template");
    assert_eq!(on_day["slots"].as_array().unwrap().len(), 3);

    // 2026-01-07 is position 2: an off-day, resolved as unscheduled.
    let (status, off_day) = post_json(
        create_router_for_test(),
        "/resolve/day",
        day_request("emp_002", "2026-01-07", vec![ward_assignment()]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(off_day["source"], "unscheduled");
    assert_eq!(off_day["reason"], "no_pattern");

    // One full cycle before the anchor is position 0: an on-day again.
    let (status, before_anchor) = post_json(
        create_router_for_test(),
        "/resolve/day",
        day_request("emp_002", "2026-01-01", vec![ward_assignment()]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before_anchor["source"], "template");
}

// =============================================================================
// IT-009: paid-break policy upgrades a lunch slot
// =============================================================================
#[tokio::test]
async fn test_it_009_paid_break_upgrade() {
    let body = json!({
        "employee_id": "emp_001",
        "date": "2026-01-14",
        "assignments": [office_assignment()],
        "paid_break_slot_ids": ["wed_lunch"]
    });

    let (status, result) = post_json(create_router_for_test(), "/resolve/day", body).await;
    assert_eq!(status, StatusCode::OK);

    let slots = result["slots"].as_array().unwrap();
    let lunch = slots.iter().find(|s| s["slot_id"] == "wed_lunch").unwrap();
    assert_eq!(lunch["counts_as_work"], true);

    // 540 scheduled minutes all count once the lunch break is paid.
    let schedule: schedule_engine::models::EffectiveSchedule =
        serde_json::from_value(result).unwrap();
    assert_eq!(schedule.counted_minutes(), 540);
}

// =============================================================================
// IT-010: week aggregation with absence, override and weekend
// =============================================================================
#[tokio::test]
async fn test_it_010_week_aggregation() {
    let body = json!({
        "employee_id": "emp_001",
        "week_start": "2026-01-12",
        "assignments": [office_assignment()],
        "absences": [{
            "id": "abs_002",
            "employee_id": "emp_001",
            "kind": "sick_leave",
            "start_date": "2026-01-14",
            "end_date": "2026-01-14"
        }],
        "overrides": [{
            "id": "ovr_002",
            "employee_id": "emp_001",
            "date": "2026-01-15",
            "label": "Short day",
            "slots": [
                {"id": "short", "start": "10:00", "end": "14:00", "slot_type": "work"}
            ]
        }]
    });

    let (status, result) = post_json(create_router_for_test(), "/resolve/week", body).await;
    assert_eq!(status, StatusCode::OK);

    let days = result["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["source"], "template"); // Monday
    assert_eq!(days[1]["source"], "template"); // Tuesday
    assert_eq!(days[2]["source"], "absence"); // Wednesday, sick
    assert_eq!(days[3]["source"], "override"); // Thursday, short day
    assert_eq!(days[4]["source"], "template"); // Friday
    assert_eq!(days[5]["source"], "unscheduled"); // Saturday
    assert_eq!(days[6]["source"], "unscheduled"); // Sunday

    // Mon + Tue + Fri at 540 each, Thu override at 240, Wed absent.
    assert_eq!(result["total_scheduled_minutes"], 1860);
    // Counted: 480 + 480 + 240 + 480.
    assert_eq!(result["total_counted_minutes"], 1680);
}

// =============================================================================
// IT-011: week totals equal the sum of the daily resolutions
// =============================================================================
#[tokio::test]
async fn test_it_011_week_totals_match_days() {
    let body = json!({
        "employee_id": "emp_001",
        "week_start": "2026-01-12",
        "assignments": [office_assignment()]
    });

    let (status, result) = post_json(create_router_for_test(), "/resolve/week", body).await;
    assert_eq!(status, StatusCode::OK);

    let week: schedule_engine::models::WeekSchedule = serde_json::from_value(result).unwrap();
    let daily_sum: u32 = week.days.iter().map(|d| d.scheduled_minutes()).sum();
    assert_eq!(week.total_scheduled_minutes, daily_sum);
    assert_eq!(week.total_scheduled_minutes, 2700);
}

// =============================================================================
// IT-012: a week with no assignment is seven unscheduled days, not an error
// =============================================================================
#[tokio::test]
async fn test_it_012_week_without_assignment() {
    let body = json!({
        "employee_id": "emp_unknown",
        "week_start": "2026-01-12"
    });

    let (status, result) = post_json(create_router_for_test(), "/resolve/week", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["total_scheduled_minutes"], 0);

    let days = result["days"].as_array().unwrap();
    assert!(days.iter().all(|d| d["source"] == "unscheduled"));
    assert!(days.iter().all(|d| d["reason"] == "no_assignment"));
}

// =============================================================================
// IT-013: assignment validation reports all conflicts at once
// =============================================================================
#[tokio::test]
async fn test_it_013_validation_reports_all_conflicts() {
    let body = json!({
        "candidate": {
            "id": "asg_new",
            "employee_id": "emp_001",
            "template_id": "office_standard",
            "valid_from": "2024-06-01"
        },
        "contract": {
            "id": "ctr_001",
            "employee_id": "emp_001",
            "start_date": "2025-01-01",
            "end_date": "2026-12-31"
        },
        "existing": [office_assignment()]
    });

    let (status, result) = post_json(create_router_for_test(), "/assignments/validate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["valid"], false);

    let conflicts = result["conflicts"].as_array().unwrap();
    // Overlap with asg_001, starts before the contract, and open-ended
    // past the contract end.
    assert_eq!(conflicts.len(), 3);
    assert!(conflicts.iter().any(|c| c["kind"] == "assignment_overlap"));
    assert!(conflicts.iter().any(|c| c["kind"] == "contract_bounds"));
}

// =============================================================================
// IT-014: a clean candidate validates
// =============================================================================
#[tokio::test]
async fn test_it_014_validation_clean_candidate() {
    let body = json!({
        "candidate": {
            "id": "asg_new",
            "employee_id": "emp_002",
            "template_id": "ward_rotation",
            "valid_from": "2026-03-01",
            "valid_to": "2026-08-31"
        },
        "contract": {
            "id": "ctr_002",
            "employee_id": "emp_002",
            "start_date": "2025-01-01"
        }
    });

    let (status, result) = post_json(create_router_for_test(), "/assignments/validate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["valid"], true);
    assert!(result["conflicts"].as_array().unwrap().is_empty());
}

// =============================================================================
// IT-015: missing required field returns a validation error
// =============================================================================
#[tokio::test]
async fn test_it_015_missing_field_returns_400() {
    // No employee_id.
    let body = json!({
        "date": "2026-01-14"
    });

    let (status, result) = post_json(create_router_for_test(), "/resolve/day", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(
        result["message"]
            .as_str()
            .unwrap()
            .contains("missing field")
    );
}

// =============================================================================
// IT-016: malformed slot clock string is rejected
// =============================================================================
#[tokio::test]
async fn test_it_016_bad_clock_string_rejected() {
    let body = json!({
        "employee_id": "emp_001",
        "date": "2026-01-14",
        "assignments": [office_assignment()],
        "overrides": [{
            "id": "ovr_bad",
            "employee_id": "emp_001",
            "date": "2026-01-14",
            "label": "Broken",
            "slots": [
                {"id": "bad", "start": "9am", "end": "17:00", "slot_type": "work"}
            ]
        }]
    });

    let (status, result) = post_json(create_router_for_test(), "/resolve/day", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_TIME_FORMAT");
}

// =============================================================================
// IT-017: resolution is idempotent across identical requests
// =============================================================================
#[tokio::test]
async fn test_it_017_idempotent_resolution() {
    let body = day_request("emp_001", "2026-07-15", vec![office_assignment()]);

    let (_, first) = post_json(create_router_for_test(), "/resolve/day", body.clone()).await;
    let (_, second) = post_json(create_router_for_test(), "/resolve/day", body).await;
    assert_eq!(first, second);
}

// =============================================================================
// IT-018: employee with no assignment on the date resolves unscheduled
// =============================================================================
#[tokio::test]
async fn test_it_018_no_assignment_unscheduled() {
    // Assignment starts in 2026; the requested date is before it.
    let (status, result) = post_json(
        create_router_for_test(),
        "/resolve/day",
        day_request("emp_001", "2025-06-11", vec![office_assignment()]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "unscheduled");
    assert_eq!(result["reason"], "no_assignment");
}
