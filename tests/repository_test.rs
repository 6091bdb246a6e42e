//! Repository behaviour against an in-memory SQLite store.
//!
//! Run with: cargo test --test repository_test

mod common;

use chrono::NaiveDate;
use sensor_api::db::{Record, SessionError};

use common::{at, reading, repository, sensor};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn list_sensors_is_newest_activation_first() {
    let repo = repository().await;

    repo.bulk_insert(vec![
        sensor("b", "lab", at("2024-02-01", "08:00:00")).into(),
        sensor("a", "lab", at("2023-12-31", "23:00:00")).into(),
        sensor("c", "roof", at("2024-03-15", "12:30:00")).into(),
    ])
    .await
    .unwrap();

    let ids: Vec<String> = repo
        .list_sensors()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(ids, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn get_sensor_by_id_returns_none_when_absent() {
    let repo = repository().await;
    repo.bulk_insert(vec![sensor("s1", "lab", at("2024-01-01", "00:00:00")).into()])
        .await
        .unwrap();

    let found = repo.get_sensor_by_id("s1").await.unwrap();
    assert_eq!(found.map(|s| s.name), Some("s1 sensor".to_string()));

    assert_eq!(repo.get_sensor_by_id("missing").await.unwrap(), None);
}

#[tokio::test]
async fn list_sensors_by_location_matches_exactly() {
    let repo = repository().await;
    repo.bulk_insert(vec![
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
        sensor("s2", "lab-annex", at("2024-01-02", "00:00:00")).into(),
        sensor("s3", "lab", at("2024-01-03", "00:00:00")).into(),
    ])
    .await
    .unwrap();

    let mut ids: Vec<String> = repo
        .list_sensors_by_location("lab")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    ids.sort();

    assert_eq!(ids, vec!["s1", "s3"]);
    assert!(repo.list_sensors_by_location("LAB").await.unwrap().is_empty());
}

#[tokio::test]
async fn sensor_unit_distinguishes_missing_sensor_from_null_unit() {
    let repo = repository().await;
    let mut unitless = sensor("bare", "lab", at("2024-01-01", "00:00:00"));
    unitless.unit = None;

    repo.bulk_insert(vec![
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
        unitless.into(),
    ])
    .await
    .unwrap();

    assert_eq!(repo.get_sensor_unit("s1").await.unwrap(), Some(Some("C".to_string())));
    assert_eq!(repo.get_sensor_unit("bare").await.unwrap(), Some(None));
    assert_eq!(repo.get_sensor_unit("missing").await.unwrap(), None);
}

#[tokio::test]
async fn values_by_date_cover_exactly_one_day() {
    let repo = repository().await;
    repo.bulk_insert(vec![
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
        reading("s1", at("2024-01-14", "23:59:59"), 1.0).into(),
        reading("s1", at("2024-01-15", "00:00:00"), 2.0).into(),
        reading("s1", at("2024-01-15", "23:59:59"), 3.0).into(),
        reading("s1", at("2024-01-16", "00:00:01"), 4.0).into(),
    ])
    .await
    .unwrap();

    let values = repo
        .get_sensor_values_by_date("s1", day("2024-01-15"), true)
        .await
        .unwrap();

    assert_eq!(values, vec![Some(2.0), Some(3.0)]);
}

#[tokio::test]
async fn ordered_values_follow_creation_time() {
    let repo = repository().await;
    repo.bulk_insert(vec![
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
        reading("s1", at("2024-01-15", "18:00:00"), 30.0).into(),
        reading("s1", at("2024-01-15", "06:00:00"), 10.0).into(),
        reading("s1", at("2024-01-15", "12:00:00"), 20.0).into(),
    ])
    .await
    .unwrap();

    let ordered = repo
        .get_sensor_values_by_date("s1", day("2024-01-15"), true)
        .await
        .unwrap();
    assert_eq!(ordered, vec![Some(10.0), Some(20.0), Some(30.0)]);

    // Unordered results hold the same set
    let mut unordered: Vec<f64> = repo
        .get_sensor_values_by_date("s1", day("2024-01-15"), false)
        .await
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    unordered.sort_by(f64::total_cmp);
    assert_eq!(unordered, vec![10.0, 20.0, 30.0]);
}

#[tokio::test]
async fn values_of_other_sensors_are_not_returned() {
    let repo = repository().await;
    repo.bulk_insert(vec![
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
        sensor("s2", "lab", at("2024-01-01", "00:00:00")).into(),
        reading("s1", at("2024-01-15", "10:00:00"), 1.0).into(),
        reading("s2", at("2024-01-15", "10:00:00"), 99.0).into(),
    ])
    .await
    .unwrap();

    let values = repo
        .get_sensor_values_by_date("s1", day("2024-01-15"), true)
        .await
        .unwrap();
    assert_eq!(values, vec![Some(1.0)]);
}

#[tokio::test]
async fn bulk_insert_accepts_values_listed_before_their_sensor() {
    let repo = repository().await;
    let batch: Vec<Record> = vec![
        reading("s1", at("2024-01-15", "10:00:00"), 1.5).into(),
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
    ];

    repo.bulk_insert(batch).await.unwrap();

    let values = repo
        .get_sensor_values_by_date("s1", day("2024-01-15"), true)
        .await
        .unwrap();
    assert_eq!(values, vec![Some(1.5)]);
}

#[tokio::test]
async fn bulk_insert_with_duplicate_key_persists_nothing() {
    let repo = repository().await;
    let batch: Vec<Record> = vec![
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
        reading("s1", at("2024-01-15", "10:00:00"), 1.0).into(),
        reading("s1", at("2024-01-15", "10:00:00"), 2.0).into(),
    ];

    assert_eq!(repo.bulk_insert(batch).await, Err(SessionError));

    assert!(repo.list_sensors().await.unwrap().is_empty());
    assert!(
        repo.get_sensor_values_by_date("s1", day("2024-01-15"), true)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn bulk_insert_with_unknown_sensor_persists_nothing() {
    let repo = repository().await;
    repo.bulk_insert(vec![sensor("s1", "lab", at("2024-01-01", "00:00:00")).into()])
        .await
        .unwrap();

    let batch: Vec<Record> = vec![
        reading("s1", at("2024-01-15", "10:00:00"), 1.0).into(),
        reading("ghost", at("2024-01-15", "10:00:00"), 2.0).into(),
    ];
    assert_eq!(repo.bulk_insert(batch).await, Err(SessionError));

    assert!(
        repo.get_sensor_values_by_date("s1", day("2024-01-15"), true)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn duplicate_sensor_id_is_rejected() {
    let repo = repository().await;
    repo.bulk_insert(vec![sensor("s1", "lab", at("2024-01-01", "00:00:00")).into()])
        .await
        .unwrap();

    let again = repo
        .bulk_insert(vec![
            sensor("s2", "roof", at("2024-01-02", "00:00:00")).into(),
            sensor("s1", "roof", at("2024-01-02", "00:00:00")).into(),
        ])
        .await;

    assert_eq!(again, Err(SessionError));
    let ids: Vec<String> = repo.list_sensors().await.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["s1"]);
}

#[tokio::test]
async fn empty_bulk_insert_is_a_no_op() {
    let repo = repository().await;
    repo.bulk_insert(Vec::new()).await.unwrap();
    assert!(repo.list_sensors().await.unwrap().is_empty());
}

#[tokio::test]
async fn large_batches_are_split_across_statements() {
    let repo = repository().await;
    let start = at("2024-01-15", "00:00:00");

    let mut batch: Vec<Record> = vec![sensor("s1", "lab", at("2024-01-01", "00:00:00")).into()];
    batch.extend(
        (0..2500).map(|i| Record::from(reading("s1", start + chrono::Duration::seconds(i), i as f64))),
    );

    repo.bulk_insert(batch).await.unwrap();

    let values = repo
        .get_sensor_values_by_date("s1", day("2024-01-15"), true)
        .await
        .unwrap();
    assert_eq!(values.len(), 2500);
    assert_eq!(values.last(), Some(&Some(2499.0)));
}

#[tokio::test]
async fn delete_sensor_removes_its_values() {
    let repo = repository().await;
    repo.bulk_insert(vec![
        sensor("s1", "lab", at("2024-01-01", "00:00:00")).into(),
        sensor("s2", "lab", at("2024-01-01", "00:00:00")).into(),
        reading("s1", at("2024-01-15", "10:00:00"), 1.0).into(),
        reading("s1", at("2024-01-16", "10:00:00"), 2.0).into(),
        reading("s2", at("2024-01-15", "10:00:00"), 3.0).into(),
    ])
    .await
    .unwrap();

    assert!(repo.delete_sensor("s1").await.unwrap());

    assert_eq!(repo.get_sensor_by_id("s1").await.unwrap(), None);
    for d in ["2024-01-15", "2024-01-16"] {
        assert!(
            repo.get_sensor_values_by_date("s1", day(d), true)
                .await
                .unwrap()
                .is_empty()
        );
    }

    // Other sensors keep their readings
    assert_eq!(
        repo.get_sensor_values_by_date("s2", day("2024-01-15"), true)
            .await
            .unwrap(),
        vec![Some(3.0)]
    );
}

#[tokio::test]
async fn deleting_unknown_sensor_is_a_no_op() {
    let repo = repository().await;
    repo.bulk_insert(vec![sensor("s1", "lab", at("2024-01-01", "00:00:00")).into()])
        .await
        .unwrap();

    assert!(!repo.delete_sensor("missing").await.unwrap());
    assert_eq!(repo.list_sensors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn store_failures_surface_as_session_error() {
    // No tables: every statement fails inside the session
    let repo = sensor_api::db::SensorRepository::new(sensor_api::db::SessionScope::new(
        common::empty_database().await,
    ));

    assert_eq!(repo.list_sensors().await, Err(SessionError));
    assert_eq!(repo.get_sensor_unit("s1").await, Err(SessionError));
    assert_eq!(repo.delete_sensor("s1").await, Err(SessionError));
}
