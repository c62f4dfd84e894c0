//! Integration tests for the alert log.

use std::sync::Arc;

use farmalink_core::AlertKind;
use farmalink_integration_tests::FlakySlots;
use farmalink_panel::services::{AlertLog, MAX_ALERTS};
use farmalink_panel::storage::{FileSlots, MemorySlots, SlotStore, keys};
use serde_json::json;

#[tokio::test]
async fn test_log_keeps_newest_hundred() {
    let log = AlertLog::new(MemorySlots::new());

    for i in 1..=105 {
        log.info(&format!("evento {i}"), None).await.expect("append");
    }

    let entries = log.list().await;
    assert_eq!(entries.len(), MAX_ALERTS);
    assert_eq!(entries[0].message, "evento 105");
    assert_eq!(entries[99].message, "evento 6");
    assert!(entries.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[tokio::test]
async fn test_malformed_log_is_replaced_on_append() {
    let slots = FlakySlots::default();
    slots.seed(keys::ALERT_LOG, "{not json").await.expect("seed");
    let log = AlertLog::new(slots);

    assert!(log.list().await.is_empty());

    log.warning("Stock bajo", Some(json!({ "codigo": "P-001" })))
        .await
        .expect("append");

    let raw = log
        .slots()
        .get(keys::ALERT_LOG)
        .await
        .expect("get")
        .expect("slot written");
    let stored: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(stored.as_array().map(Vec::len), Some(1));
    assert_eq!(stored[0]["tipo"], "warning");
    assert_eq!(stored[0]["detalles"]["codigo"], "P-001");
}

#[tokio::test]
async fn test_failed_write_keeps_previous_log() {
    let log = AlertLog::new(FlakySlots::default());
    log.success("Compra registrada", None).await.expect("append");

    log.slots().set_failing(true);
    assert!(log.error("No se pudo guardar", None).await.is_err());
    log.record(AlertKind::Error, "tampoco", None).await;
    log.slots().set_failing(false);

    let entries = log.list().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "Compra registrada");
}

#[tokio::test]
async fn test_file_log_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let log = AlertLog::new(FileSlots::new(dir.path()).expect("slots"));
        log.info("Inicio de sesión", Some(json!({ "email": "admin@x" })))
            .await
            .expect("append");
        log.error("No se pudieron cargar los productos (status: 500)", None)
            .await
            .expect("append");
    }

    let reopened = AlertLog::new(FileSlots::new(dir.path()).expect("slots"));
    let entries = reopened.list().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, AlertKind::Error);
    assert_eq!(entries[1].kind, AlertKind::Info);

    reopened.clear().await.expect("clear");
    assert!(
        AlertLog::new(FileSlots::new(dir.path()).expect("slots"))
            .list()
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_concurrent_appends_are_all_kept() {
    let log = Arc::new(AlertLog::new(MemorySlots::new()));

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let log = Arc::clone(&log);
            tokio::spawn(async move { log.info(&format!("tarea {i}"), None).await })
        })
        .collect();
    for task in tasks {
        task.await.expect("join").expect("append");
    }

    let entries = log.list().await;
    assert_eq!(entries.len(), 20);
    let mut ids: Vec<_> = entries.iter().map(|entry| entry.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 20, "ids are unique");
}
