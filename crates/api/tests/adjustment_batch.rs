//! Tests for the adjustment batch request shape and its up-front validation.
//!
//! No HTTP server or database needed: the batch DTO and its validator rules
//! are exercised directly.

use validator::Validate;

use schichtplan_api::handlers::adjustments::AdjustmentBatch;

fn batch_from_json(json: serde_json::Value) -> AdjustmentBatch {
    serde_json::from_value(json).expect("valid request body")
}

// ---------------------------------------------------------------------------
// Test: a well-formed batch passes validation
// ---------------------------------------------------------------------------

#[test]
fn well_formed_batch_validates() {
    let batch = batch_from_json(serde_json::json!({
        "adjustments": [
            {
                "woche_number": 3,
                "change_date": "2026-09-07",
                "shift_type": "morning",
                "adjustment_minutes": 30
            },
            {
                "woche_number": 3,
                "change_date": "2026-09-07",
                "shift_type": "night",
                "adjustment_minutes": -15
            }
        ],
        "reason": "Betriebsversammlung"
    }));

    assert!(batch.validate().is_ok());
    assert_eq!(batch.adjustments.len(), 2);
    assert_eq!(batch.adjustments[1].adjustment_minutes, -15);
}

// ---------------------------------------------------------------------------
// Test: an empty adjustment list is rejected before any write
// ---------------------------------------------------------------------------

#[test]
fn empty_adjustment_list_is_rejected() {
    let batch = batch_from_json(serde_json::json!({
        "adjustments": [],
        "reason": "Betriebsversammlung"
    }));

    let err = batch.validate().unwrap_err();
    assert!(err.to_string().contains("At least one adjustment is required"));
}

// ---------------------------------------------------------------------------
// Test: an empty reason is rejected
// ---------------------------------------------------------------------------

#[test]
fn empty_reason_is_rejected() {
    let batch = batch_from_json(serde_json::json!({
        "adjustments": [
            {
                "woche_number": 1,
                "change_date": "2026-09-07",
                "shift_type": "afternoon",
                "adjustment_minutes": 45
            }
        ],
        "reason": ""
    }));

    let err = batch.validate().unwrap_err();
    assert!(err.to_string().contains("A reason is required"));
}

// ---------------------------------------------------------------------------
// Test: missing fields fail at deserialization
// ---------------------------------------------------------------------------

#[test]
fn missing_shift_type_fails_to_deserialize() {
    let result: Result<AdjustmentBatch, _> = serde_json::from_value(serde_json::json!({
        "adjustments": [
            {
                "woche_number": 1,
                "change_date": "2026-09-07",
                "adjustment_minutes": 45
            }
        ],
        "reason": "Wartung"
    }));

    assert!(result.is_err());
}
