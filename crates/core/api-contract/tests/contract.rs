use api_contract::{
    ChosenLocationResponse, ErrorBody, LocationDto, ReadingDto, ReadingsPageQuery,
    UpdateLocationQuery,
};
use serde_json::{Value, json};

#[test]
fn reading_dto_uses_snake_case() {
    let reading = ReadingDto {
        id: 7,
        device_id: "arduino_001".to_string(),
        room_name: "Room_A".to_string(),
        sound_level: 75.0,
        threshold: 70.0,
        measure_time: "2025-11-07T10:00:00Z".to_string(),
        is_alert: true,
        description: String::new(),
        is_periodic: true,
    };
    let value = serde_json::to_value(reading).expect("serialize");
    for key in [
        "id",
        "device_id",
        "room_name",
        "sound_level",
        "threshold",
        "measure_time",
        "is_alert",
        "description",
        "is_periodic",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert!(value.get("deviceId").is_none());
}

#[test]
fn reading_dto_omits_zero_id_and_non_periodic() {
    let value = serde_json::to_value(ReadingDto::default()).expect("serialize");
    assert!(value.get("id").is_none());
    assert!(value.get("is_periodic").is_none());
    assert_eq!(value.get("is_alert"), Some(&Value::Bool(false)));
}

#[test]
fn reading_dto_missing_fields_default_to_zero() {
    let payload = r#"{"sound_level": 42.5}"#;
    let reading: ReadingDto = serde_json::from_str(payload).expect("parse");
    assert_eq!(reading.sound_level, 42.5);
    assert_eq!(reading.threshold, 0.0);
    assert!(reading.device_id.is_empty());
    assert!(reading.measure_time.is_empty());
    assert!(!reading.is_periodic);
}

#[test]
fn error_body_shape() {
    let value = serde_json::to_value(ErrorBody::new("Resource not found.")).expect("serialize");
    assert_eq!(value, json!({ "error": "Resource not found." }));
}

#[test]
fn chosen_location_response_shape() {
    let response = ChosenLocationResponse {
        message: "Location retrieved".to_string(),
        data: LocationDto {
            id: 1,
            name: "Room_A".to_string(),
            chosen: true,
            threshold: 70.0,
        },
    };
    let value = serde_json::to_value(response).expect("serialize");
    assert_eq!(value["message"], "Location retrieved");
    assert_eq!(value["data"]["name"], "Room_A");
    assert_eq!(value["data"]["chosen"], true);
}

#[test]
fn query_params_are_camel_case() {
    let page: ReadingsPageQuery =
        serde_json::from_value(json!({ "page": "2", "rowsPerPage": "5" })).expect("parse");
    assert_eq!(page.page.as_deref(), Some("2"));
    assert_eq!(page.rows_per_page.as_deref(), Some("5"));

    let update: UpdateLocationQuery =
        serde_json::from_value(json!({ "newThreshold": "abc" })).expect("parse");
    assert_eq!(update.new_threshold.as_deref(), Some("abc"));
}
