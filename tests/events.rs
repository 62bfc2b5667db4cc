//! Events dispatched through the global listener registry.
//!
//! The registry can only be set once per process, so these tests share one
//! recording listener and run serially.

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serial_test::serial;

use roster_store::events::listeners::LoggingListener;
use roster_store::events::{Listener, StoreEvent};
use roster_store::{
    register_event_listeners, InMemoryStore, Registration, StorageKey, Store, StoreConfig,
    StudentInput,
};

static SETUP: Once = Once::new();
static RECORDED: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Recorder;

#[async_trait]
impl Listener for Recorder {
    async fn handle(&self, event: &StoreEvent) {
        let entry = match event {
            StoreEvent::RecordAdded { key, .. } => format!("{}:{key}", event.name()),
            _ => event.name().to_owned(),
        };
        RECORDED.lock().unwrap().push(entry);
    }
}

fn recorded() -> Vec<String> {
    std::mem::take(&mut *RECORDED.lock().unwrap())
}

fn setup() -> Store {
    SETUP.call_once(|| {
        register_event_listeners(|registry| {
            registry.listen(LoggingListener::new()).listen(Recorder);
        });
    });
    recorded();

    Store::open(Arc::new(InMemoryStore::new()), StoreConfig::development()).unwrap()
}

fn student(name: &str) -> StudentInput {
    StudentInput::new(name, "10th", "Pune", "City School")
}

#[tokio::test]
#[serial]
async fn test_auth_events() {
    let store = setup();

    let session = store
        .auth()
        .register(Registration::mock("alice1", "secret1"))
        .await
        .unwrap();
    store.auth().logout(session.into()).await.unwrap();
    let _ = store.auth().login("alice1", "nope").await;
    store.auth().login("alice1", "secret1").await.unwrap();

    assert_eq!(
        recorded(),
        vec![
            "user.registered",
            "auth.logout.success",
            "auth.login.failed",
            "auth.login.success",
        ]
    );
}

#[tokio::test]
#[serial]
async fn test_roster_events() {
    let store = setup();

    let team = store
        .teams()
        .create_team("Rockets", vec![student("Ada"), student("Bo")])
        .await
        .unwrap();
    store.teams().add_member(&team.id, student("Cy")).await.unwrap();
    store.teams().remove_member(&team.id, 0).await.unwrap();
    // rejected operations dispatch nothing
    let _ = store.teams().remove_member(&team.id, 0).await;
    store.teams().delete_team(&team.id).await.unwrap();

    assert_eq!(
        recorded(),
        vec![
            format!("record.added:{}", StorageKey::Teams),
            "team.member.added".to_owned(),
            "team.member.removed".to_owned(),
            "record.removed".to_owned(),
        ]
    );
}
