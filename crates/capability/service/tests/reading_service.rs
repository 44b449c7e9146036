use async_trait::async_trait;
use chrono::DateTime;
use domain::{Location, Reading};
use noise_service::{Deadline, ErrorKind, LocationService, ReadingService};
use noise_storage::{
    InMemoryLocationStore, InMemoryReadingStore, LocationStore, ReadingStore, StorageError,
};
use std::sync::Arc;
use std::time::Duration;

fn deadline() -> Deadline {
    Deadline::after(Duration::from_secs(2))
}

fn services() -> (ReadingService, LocationService, Arc<InMemoryReadingStore>) {
    let readings = Arc::new(InMemoryReadingStore::new());
    let locations: Arc<dyn LocationStore> = Arc::new(InMemoryLocationStore::new());
    (
        ReadingService::new(readings.clone(), locations.clone()),
        LocationService::new(locations),
        readings,
    )
}

fn periodic(sound_level: f64, threshold: f64) -> Reading {
    Reading {
        device_id: "arduino_001".to_string(),
        room_name: "Room_A".to_string(),
        sound_level,
        threshold,
        measure_time: "2025-11-07T10:00:00Z".to_string(),
        is_periodic: true,
        ..Reading::default()
    }
}

#[tokio::test]
async fn alert_flag_follows_threshold() {
    let (service, _, _) = services();
    for (sound, threshold, expected) in [
        (75.0, 70.0, true),
        (70.0, 70.0, true),
        (69.99, 70.0, false),
        (0.0, 150.0, false),
        (150.0, 150.0, true),
    ] {
        let created = service
            .create_historical(periodic(sound, threshold), deadline())
            .await
            .expect("create");
        assert_eq!(created.is_alert, expected, "{sound} vs {threshold}");
    }
}

#[tokio::test]
async fn zero_threshold_defaults_to_seventy() {
    let (service, _, _) = services();
    let created = service
        .create_historical(periodic(65.0, 0.0), deadline())
        .await
        .expect("create");
    let stored = service
        .get_by_id(created.id, deadline())
        .await
        .expect("read")
        .expect("exists");
    assert_eq!(stored.threshold, 70.0);
    assert!(!stored.is_alert);
}

#[tokio::test]
async fn empty_room_resolves_to_chosen_location() {
    let (service, locations, _) = services();
    let mut reading = periodic(50.0, 70.0);
    reading.room_name.clear();

    let created = service
        .create_historical(reading.clone(), deadline())
        .await
        .expect("create");
    assert_eq!(created.room_name, "Unknown");

    locations
        .create(Location::new("Lab", 70.0), deadline())
        .await
        .expect("location");
    let created = service
        .create_historical(reading, deadline())
        .await
        .expect("create");
    assert_eq!(created.room_name, "Lab");
}

#[tokio::test]
async fn missing_fields_are_defaulted() {
    let (service, _, _) = services();
    let created = service
        .create_historical(
            Reading {
                sound_level: 40.0,
                is_periodic: true,
                ..Reading::default()
            },
            deadline(),
        )
        .await
        .expect("create");
    assert_eq!(created.device_id, "arduino_001");
    assert_eq!(created.threshold, 70.0);
    assert_eq!(created.room_name, "Unknown");
    assert!(DateTime::parse_from_rfc3339(&created.measure_time).is_ok());
    assert!(created.measure_time.ends_with('Z'));
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let (service, _, _) = services();
    let mut input = periodic(80.5, 75.0);
    input.description = "door open".to_string();
    let created = service
        .create_historical(input, deadline())
        .await
        .expect("create");
    let fetched = service
        .get_by_id(created.id, deadline())
        .await
        .expect("read")
        .expect("exists");
    assert_eq!(
        fetched,
        Reading {
            is_periodic: false,
            ..created
        }
    );
}

#[tokio::test]
async fn invalid_reading_is_validation_error() {
    let (service, _, store) = services();
    let err = service
        .create_historical(periodic(150.0001, 70.0), deadline())
        .await
        .expect_err("rejected");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.message(),
        "Invalid data: SoundLevel must be between 0 and 150 dB. "
    );
    assert!(store.read_all().await.expect("all").is_empty());
}

#[tokio::test]
async fn ingest_routes_by_periodic_flag() {
    let (service, _, store) = services();
    let mut latest = periodic(90.0, 70.0);
    latest.is_periodic = false;
    latest.device_id = "dev-7".to_string();
    service.ingest(latest, deadline()).await.expect("latest");
    assert!(store.read_all().await.expect("all").is_empty());
    let got = service
        .get_latest_by_device("dev-7", deadline())
        .await
        .expect("latest")
        .expect("exists");
    assert!(got.is_alert);

    service
        .ingest(periodic(50.0, 70.0), deadline())
        .await
        .expect("periodic");
    assert_eq!(store.read_all().await.expect("all").len(), 1);
}

#[tokio::test]
async fn latest_lookup_distinguishes_malformed_and_missing() {
    let (service, _, _) = services();
    let missing = service
        .get_latest_by_device("dev-unknown", deadline())
        .await
        .expect("lookup");
    assert!(missing.is_none());

    let err = service
        .get_latest_by_device(&"x".repeat(51), deadline())
        .await
        .expect_err("malformed");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn paging_is_one_indexed() {
    let (service, _, _) = services();
    for _ in 0..5 {
        service
            .create_historical(periodic(50.0, 70.0), deadline())
            .await
            .expect("create");
    }
    assert_eq!(service.get_page(0, 2, deadline()).await.expect("all").len(), 5);
    let second = service.get_page(2, 2, deadline()).await.expect("page");
    assert_eq!(second.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 4]);
    assert_eq!(service.get_page(3, 2, deadline()).await.expect("page").len(), 1);
    assert!(service.get_page(4, 2, deadline()).await.expect("page").is_empty());
}

#[tokio::test]
async fn room_queries_require_room() {
    let (service, _, _) = services();
    let err = service.get_by_room("", deadline()).await.expect_err("room");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "Room name is required");

    let date = DateTime::parse_from_rfc3339("2025-11-07T00:00:00Z").expect("date");
    let err = service
        .get_daily_summary("", &date, deadline())
        .await
        .expect_err("room");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn daily_summary_returns_ordered_day() {
    let (service, _, _) = services();
    for time in [
        "2025-11-07T18:00:00Z",
        "2025-11-06T23:00:00Z",
        "2025-11-07T06:00:00Z",
        "2025-11-08T00:00:00Z",
    ] {
        let mut reading = periodic(55.0, 70.0);
        reading.measure_time = time.to_string();
        service
            .create_historical(reading, deadline())
            .await
            .expect("create");
    }
    let date = DateTime::parse_from_rfc3339("2025-11-07T12:34:56Z").expect("date");
    let day = service
        .get_daily_summary("Room_A", &date, deadline())
        .await
        .expect("daily");
    let times: Vec<&str> = day.iter().map(|r| r.measure_time.as_str()).collect();
    assert_eq!(times, vec!["2025-11-07T06:00:00Z", "2025-11-07T18:00:00Z"]);
}

#[tokio::test]
async fn weekly_window_excludes_old_rows() {
    let (service, _, _) = services();
    let mut recent = periodic(55.0, 70.0);
    recent.measure_time.clear();
    service
        .create_historical(recent, deadline())
        .await
        .expect("create");
    let mut old = periodic(55.0, 70.0);
    old.measure_time = "2001-01-01T00:00:00Z".to_string();
    service.create_historical(old, deadline()).await.expect("create");

    let rows = service.get_by_room("Room_A", deadline()).await.expect("weekly");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn update_and_delete_report_affected_rows() {
    let (service, _, _) = services();
    let created = service
        .create_historical(periodic(50.0, 70.0), deadline())
        .await
        .expect("create");

    let mut changed = created.clone();
    changed.sound_level = 99.0;
    assert_eq!(service.update(&mut changed, deadline()).await.expect("update"), 1);
    let stored = service
        .get_by_id(created.id, deadline())
        .await
        .expect("read")
        .expect("exists");
    assert_eq!(stored.sound_level, 99.0);
    assert!(!stored.is_alert);

    let mut missing = created.clone();
    missing.id = 404;
    assert_eq!(service.update(&mut missing, deadline()).await.expect("update"), 0);

    let mut invalid = created.clone();
    invalid.room_name.clear();
    let err = service.update(&mut invalid, deadline()).await.expect_err("invalid");
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(service.delete(created.id, deadline()).await.expect("delete"), 1);
    assert_eq!(service.delete(created.id, deadline()).await.expect("delete"), 0);
}

#[tokio::test]
async fn clean_old_data_removes_expired_rows() {
    let (service, _, store) = services();
    let mut old = periodic(50.0, 70.0);
    old.measure_time = "2000-01-01T00:00:00Z".to_string();
    service.create_historical(old, deadline()).await.expect("create");
    let mut fresh = periodic(50.0, 70.0);
    fresh.measure_time.clear();
    service.create_historical(fresh, deadline()).await.expect("create");

    let deleted = service.clean_old_data(deadline()).await.expect("cleanup");
    assert_eq!(deleted, 1);
    assert_eq!(store.read_all().await.expect("all").len(), 1);
}

/// 位置查询总是失败的存储。
struct BrokenLocations;

#[async_trait]
impl LocationStore for BrokenLocations {
    async fn create(&self, _location: &Location) -> Result<Location, StorageError> {
        Err(StorageError::new("down"))
    }
    async fn read_all(&self) -> Result<Vec<Location>, StorageError> {
        Err(StorageError::new("down"))
    }
    async fn read_chosen(&self) -> Result<Option<Location>, StorageError> {
        Err(StorageError::new("down"))
    }
    async fn set_chosen(&self, _id: i64) -> Result<bool, StorageError> {
        Err(StorageError::new("down"))
    }
    async fn update_threshold(&self, _id: i64, _threshold: f64) -> Result<bool, StorageError> {
        Err(StorageError::new("down"))
    }
    async fn delete(&self, _id: i64) -> Result<u64, StorageError> {
        Err(StorageError::new("down"))
    }
}

#[tokio::test]
async fn failed_room_lookup_falls_back_to_unknown() {
    let service = ReadingService::new(
        Arc::new(InMemoryReadingStore::new()),
        Arc::new(BrokenLocations),
    );
    let mut reading = periodic(50.0, 70.0);
    reading.room_name.clear();
    let created = service
        .create_historical(reading, deadline())
        .await
        .expect("create");
    assert_eq!(created.room_name, "Unknown");
}

/// 所有读取都挂起的存储，用于验证截止时间。
struct StalledReadings;

#[async_trait]
impl ReadingStore for StalledReadings {
    async fn create_historical(&self, _reading: &Reading) -> Result<i64, StorageError> {
        stall().await
    }
    async fn upsert_latest(&self, _reading: &Reading) -> Result<(), StorageError> {
        stall().await
    }
    async fn read_one(&self, _id: i64) -> Result<Option<Reading>, StorageError> {
        stall().await
    }
    async fn read_latest(&self, _device_id: &str) -> Result<Option<Reading>, StorageError> {
        stall().await
    }
    async fn read_page(&self, _limit: i64, _offset: i64) -> Result<Vec<Reading>, StorageError> {
        stall().await
    }
    async fn read_all(&self) -> Result<Vec<Reading>, StorageError> {
        stall().await
    }
    async fn update(&self, _reading: &Reading) -> Result<u64, StorageError> {
        stall().await
    }
    async fn delete(&self, _id: i64) -> Result<u64, StorageError> {
        stall().await
    }
    async fn read_by_room_since(
        &self,
        _room_name: &str,
        _since: &str,
    ) -> Result<Vec<Reading>, StorageError> {
        stall().await
    }
    async fn read_by_room_between(
        &self,
        _room_name: &str,
        _start: &str,
        _end: &str,
    ) -> Result<Vec<Reading>, StorageError> {
        stall().await
    }
    async fn delete_before(&self, _cutoff: &str) -> Result<u64, StorageError> {
        stall().await
    }
}

async fn stall<T>() -> Result<T, StorageError> {
    tokio::time::sleep(Duration::from_secs(3600)).await;
    Err(StorageError::new("unreachable"))
}

#[tokio::test(start_paused = true)]
async fn expired_deadline_aborts_storage_call() {
    let service = ReadingService::new(
        Arc::new(StalledReadings),
        Arc::new(InMemoryLocationStore::new()),
    );
    let err = service
        .get_by_id(1, Deadline::after(Duration::from_secs(2)))
        .await
        .expect_err("deadline");
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.message(), "deadline exceeded");
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime")
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// 告警标记等于 sound_level >= 生效阈值（阈值 0 按 70 计）。
        #[test]
        fn alert_flag_matches_effective_threshold(
            sound in 0.0f64..=150.0,
            threshold in prop_oneof![Just(0.0f64), 0.0f64..=150.0],
        ) {
            let created = block_on(async {
                let (service, _, _) = services();
                service
                    .create_historical(periodic(sound, threshold), deadline())
                    .await
                    .expect("create")
            });
            let effective = if threshold == 0.0 { 70.0 } else { threshold };
            prop_assert_eq!(created.threshold, effective);
            prop_assert_eq!(created.is_alert, sound >= effective);
        }

        /// 阈值 0 写入后读回为 70。
        #[test]
        fn zero_threshold_is_stored_as_seventy(sound in 0.0f64..=150.0) {
            let stored = block_on(async {
                let (service, _, _) = services();
                let created = service
                    .create_historical(periodic(sound, 0.0), deadline())
                    .await
                    .expect("create");
                service
                    .get_by_id(created.id, deadline())
                    .await
                    .expect("read")
                    .expect("exists")
            });
            prop_assert_eq!(stored.threshold, 70.0);
            prop_assert_eq!(stored.is_alert, sound >= 70.0);
        }
    }
}
