use std::sync::Arc;

use cineflix_client::models::{ChatMessage, ChatRole, FilterState};
use cineflix_client::services::{ChatStore, FilterStore};
use cineflix_client::storage::{
    derive_key, FileStore, KeyValueStore, Loaded, MemoryStore, Saved, FILTERS_PREFIX,
};

const QUOTA: usize = 5 * 1024 * 1024;

#[test]
fn test_filters_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_storage.json");
    let filters = FilterState::new("dune", "Sci-Fi", "Netflix");

    let store = FilterStore::new(Arc::new(FileStore::new(&path, QUOTA)));
    assert_eq!(store.save(Some("alice"), &filters), Saved::Persisted);

    // A new process sees the same record
    let reopened = FilterStore::new(Arc::new(FileStore::new(&path, QUOTA)));
    assert_eq!(
        reopened.load(Some("alice"), FilterState::default()),
        Loaded::Restored(filters)
    );
}

#[test]
fn test_guest_key_shared_by_none_and_empty() {
    assert_eq!(derive_key(FILTERS_PREFIX, None), "cineflix_filters_guest");
    assert_eq!(derive_key(FILTERS_PREFIX, Some("")), "cineflix_filters_guest");

    let store = FilterStore::new(Arc::new(MemoryStore::new()));
    store.save(Some(""), &FilterState::new("alien", "", ""));
    assert_eq!(
        store.load(None, FilterState::default()).into_inner().search,
        "alien"
    );
}

#[test]
fn test_default_when_nothing_saved() {
    let store = FilterStore::new(Arc::new(MemoryStore::new()));
    let default = FilterState::new("", "Drama", "");
    assert_eq!(
        store.load(Some("carol"), default.clone()),
        Loaded::Missing(default)
    );
}

#[test]
fn test_corrupt_text_falls_back_to_default() {
    let backend = Arc::new(MemoryStore::new());
    backend
        .set("cineflix_filters_alice", "definitely { not json")
        .unwrap();

    let store = FilterStore::new(backend);
    let default = FilterState::new("x", "y", "z");
    assert_eq!(
        store.load(Some("alice"), default.clone()),
        Loaded::Corrupt(default)
    );
}

#[test]
fn test_partial_record_merges_over_default() {
    let backend = Arc::new(MemoryStore::new());
    backend
        .set("cineflix_filters_alice", r#"{"search":"dune"}"#)
        .unwrap();

    let store = FilterStore::new(backend);
    let restored = store
        .load(Some("alice"), FilterState::new("", "action", "netflix"))
        .into_inner();
    assert_eq!(restored, FilterState::new("dune", "action", "netflix"));
}

#[test]
fn test_chat_seeded_then_grows_without_dedup() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FileStore::new(dir.path().join("state.json"), QUOTA));
    let store = ChatStore::new(backend);

    let mut transcript = store.load(Some("alice")).into_inner();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.messages()[0].role, ChatRole::Bot);

    store.append(Some("alice"), &mut transcript, ChatMessage::user("same"));
    store.append(Some("alice"), &mut transcript, ChatMessage::user("same"));

    let reloaded = store.load(Some("alice")).into_inner();
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded, transcript);
}

#[test]
fn test_filters_and_chat_never_share_a_key() {
    let backend = Arc::new(MemoryStore::new());
    let filters = FilterStore::new(backend.clone());
    let chat = ChatStore::new(backend.clone());

    assert_ne!(filters.key(Some("alice")), chat.key(Some("alice")));

    filters.save(Some("alice"), &FilterState::new("dune", "", ""));
    assert!(matches!(chat.load(Some("alice")), Loaded::Missing(_)));
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_quota_exceeded_keeps_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FileStore::new(dir.path().join("state.json"), 80));
    let store = FilterStore::new(backend);

    let small = FilterState::new("dune", "", "");
    assert_eq!(store.save(None, &small), Saved::Persisted);

    let huge = FilterState::new("x".repeat(200), "", "");
    assert_eq!(store.save(None, &huge), Saved::Failed);

    assert_eq!(
        store.load(None, FilterState::default()),
        Loaded::Restored(small)
    );
}

#[test]
fn test_clear_wipes_every_user() {
    let backend = Arc::new(MemoryStore::new());
    let filters = FilterStore::new(backend.clone());
    let chat = ChatStore::new(backend.clone());

    filters.save(Some("alice"), &FilterState::new("dune", "", ""));
    let mut transcript = chat.load(Some("bob")).into_inner();
    chat.append(Some("bob"), &mut transcript, ChatMessage::user("hi"));

    backend.clear().unwrap();

    assert!(matches!(
        filters.load(Some("alice"), FilterState::default()),
        Loaded::Missing(_)
    ));
    assert_eq!(chat.load(Some("bob")).into_inner().len(), 1);
}
