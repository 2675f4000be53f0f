use parcel_core::{Parcel, STATUS_REGISTERED};
use serde_json::json;

#[test]
fn parcel_serializes_with_flat_snake_case_fields() {
    let parcel = Parcel {
        number: 3,
        client: 1000,
        address: "test".to_string(),
        status: STATUS_REGISTERED.to_string(),
        created_at: "2024-05-01T10:15:00Z".to_string(),
    };

    let value = serde_json::to_value(&parcel).unwrap();
    assert_eq!(
        value,
        json!({
            "number": 3,
            "client": 1000,
            "address": "test",
            "status": "registered",
            "created_at": "2024-05-01T10:15:00Z",
        })
    );
}

#[test]
fn status_is_open_ended() {
    let parcel = Parcel {
        status: "held_at_customs".to_string(),
        ..Parcel::new(1, "Dock 4")
    };
    assert!(parcel.validate().is_ok());
    assert!(!parcel.is_registered());
}

#[test]
fn created_at_is_utc_rfc3339() {
    let parcel = Parcel::new(1, "Dock 4");
    assert!(parcel.created_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&parcel.created_at).is_ok());
}
