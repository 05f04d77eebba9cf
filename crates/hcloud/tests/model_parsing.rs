//! Integration tests for parsing Hetzner Cloud API payloads.
//!
//! These tests validate that the hcloud models deserialize full API responses,
//! including fields the models do not map.

use hcloud::{
    ActionStatus, CreateImageResult, Image, ImageType, Server, ServerStatus, TimeSeries,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture from disk.
fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[derive(Deserialize)]
struct ActionsPage {
    actions: Vec<hcloud::Action>,
    meta: hcloud::Meta,
}

#[derive(Deserialize)]
struct ServerResponse {
    server: Server,
}

#[derive(Deserialize)]
struct MetricsResponse {
    metrics: hcloud::Metrics,
}

#[test]
fn test_deserialize_action_list() {
    let json_data = load_fixture("server_actions_list.json");
    let page: ActionsPage = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize action list: {}", e));

    assert_eq!(page.actions.len(), 3, "Expected 3 actions in test data");

    let started = &page.actions[0];
    assert_eq!(started.id.get(), 13);
    assert!(started.is_success());
    assert!(started.is_finished());
    assert_eq!(started.resources[0].resource_type, "server");

    let failed = &page.actions[1];
    assert_eq!(failed.status, ActionStatus::Error);
    let error = failed.error.as_ref().expect("failed action carries an error");
    assert_eq!(error.code, "iso_not_found");
    assert_eq!(failed.resources.len(), 2);

    let running = &page.actions[2];
    assert!(running.is_running());
    assert!(running.finished.is_none());
    assert_eq!(running.progress, 20);

    let pagination = page.meta.pagination.expect("pagination present");
    assert_eq!(pagination.next_page, Some(2));
    assert_eq!(pagination.previous_page, None);
    assert_eq!(pagination.total_entries, Some(10));
}

#[test]
fn test_deserialize_server() {
    let json_data = load_fixture("server.json");
    let response: ServerResponse = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize server: {}", e));
    let server = response.server;

    assert_eq!(server.id.get(), 42);
    assert_eq!(server.name, "my-server");
    assert_eq!(server.status, ServerStatus::Running);
    assert_eq!(server.backup_window.as_deref(), Some("22-02"));
    assert_eq!(server.primary_disk_size, Some(50));
    assert_eq!(server.labels.get("env").map(String::as_str), Some("dev"));
    assert_eq!(server.private_net.len(), 1);

    let server_type = server.server_type.expect("server type present");
    assert_eq!(server_type.name, "cx11");
    assert_eq!(server_type.cores, Some(1));

    let image = server.image.expect("image present");
    assert_eq!(image.image_type, ImageType::System);
    assert_eq!(image.os_flavor.as_deref(), Some("ubuntu"));

    let iso = server.iso.expect("iso present");
    assert_eq!(iso.id.get(), 4711);
}

#[test]
fn test_server_round_trips_through_value() {
    let json_data = load_fixture("server.json");
    let raw: Value = serde_json::from_str(&json_data).unwrap();
    let server: Server = serde_json::from_value(raw["server"].clone()).unwrap();

    let value = serde_json::to_value(&server).unwrap();
    let again: Server = serde_json::from_value(value).unwrap();
    assert_eq!(server, again);
}

#[test]
fn test_deserialize_metrics() {
    let json_data = load_fixture("server_metrics.json");
    let response: MetricsResponse = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize metrics: {}", e));
    let metrics = response.metrics;

    assert!((metrics.step - 60.0).abs() < f64::EPSILON);
    let series: &HashMap<String, TimeSeries> = &metrics.time_series;
    assert_eq!(series.len(), 2);

    let cpu: Vec<_> = series["cpu"].points().map(|(_, value)| value).collect();
    assert_eq!(cpu, vec![Some(42.0), Some(43.5)]);

    let disk: Vec<_> = series["disk.0.iops.read"]
        .points()
        .map(|(_, value)| value)
        .collect();
    assert_eq!(disk, vec![Some(1.0), None]);
}

#[test]
fn test_deserialize_create_image_result() {
    let json_data = load_fixture("create_image.json");
    let result: CreateImageResult = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize create_image result: {}", e));

    let image: &Image = &result.image;
    assert_eq!(image.id.get(), 4712);
    assert_eq!(image.image_type, ImageType::Snapshot);
    assert_eq!(image.description.as_deref(), Some("my image"));
    assert!(image.name.is_none());
    let created_from = image.created_from.as_ref().expect("created_from present");
    assert_eq!(created_from.id.get(), 42);

    assert_eq!(result.action.command, "create_image");
    assert!(result.action.is_running());
}
