use super::*;
use crate::net::fake::FakeItems;
use futures::executor::block_on;
use std::sync::Mutex;
use std::sync::atomic::Ordering;

type TestCell = Arc<Mutex<ItemsState>>;

fn item(id: &str, kind: ItemKind, resolved: bool, created_by: Option<&str>) -> Item {
    Item {
        id: id.to_owned(),
        kind,
        title: format!("title {id}"),
        description: String::new(),
        location: None,
        contact: None,
        image_url: None,
        created_at: None,
        resolved,
        created_by: created_by.map(str::to_owned),
    }
}

fn store(table: &Arc<FakeItems>) -> ItemsStore<TestCell> {
    let dyn_table: Arc<dyn ItemTable> = table.clone();
    ItemsStore::new(dyn_table, Arc::new(Mutex::new(ItemsState::default())))
}

fn wallet() -> NewItem {
    NewItem { kind: ItemKind::Lost, description: "wallet".to_owned(), ..NewItem::default() }
}

fn u1() -> Identity {
    Identity { id: "u1".to_owned(), email: Some("a@x.edu".to_owned()) }
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn items_state_defaults() {
    let s = ItemsState::default();
    assert!(s.items.is_empty());
    assert!(!s.loading);
    assert!(s.error.is_none());
}

#[test]
fn stats_count_found_and_resolved() {
    let items = vec![
        item("1", ItemKind::Lost, false, None),
        item("2", ItemKind::Found, true, None),
        item("3", ItemKind::Found, false, None),
        item("4", ItemKind::Lost, true, None),
    ];
    assert_eq!(ItemStats::from_items(&items), ItemStats { total: 4, found: 2, resolved: 2 });
}

#[test]
fn visible_items_hides_resolved_when_toggled_off() {
    let items = vec![item("1", ItemKind::Lost, false, None), item("2", ItemKind::Found, true, None)];
    let shown: Vec<String> = visible_items(&items, false).into_iter().map(|i| i.id).collect();
    assert_eq!(shown, vec!["1"]);
    assert_eq!(visible_items(&items, true).len(), 2);
}

#[test]
fn can_mark_found_requires_signed_in_user() {
    assert!(!can_mark_found(&item("1", ItemKind::Lost, false, None), None));
}

#[test]
fn can_mark_found_owner_only_for_owned_items() {
    let owned = item("1", ItemKind::Lost, false, Some("u1"));
    assert!(can_mark_found(&owned, Some("u1")));
    assert!(!can_mark_found(&owned, Some("u2")));
}

#[test]
fn can_mark_found_anyone_for_anonymous_items() {
    assert!(can_mark_found(&item("1", ItemKind::Found, false, None), Some("u9")));
}

#[test]
fn can_mark_found_false_once_resolved() {
    assert!(!can_mark_found(&item("1", ItemKind::Lost, true, Some("u1")), Some("u1")));
}

// =============================================================
// refresh
// =============================================================

#[test]
fn refresh_preserves_backend_order() {
    let table = Arc::new(FakeItems::with_rows(vec![
        item("b", ItemKind::Lost, false, None),
        item("a", ItemKind::Found, false, None),
        item("c", ItemKind::Lost, true, None),
    ]));
    let store = store(&table);
    block_on(store.refresh());

    let ids: Vec<String> = store.items().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert!(!store.loading());
}

#[test]
fn refresh_failure_keeps_previous_items_and_records_error() {
    let table = Arc::new(FakeItems::with_rows(vec![item("a", ItemKind::Lost, false, None)]));
    let store = store(&table);
    block_on(store.refresh());

    *table.list_error.lock().unwrap() = Some(DataError::Network("offline".to_owned()));
    block_on(store.refresh());

    let state = store.state().snapshot();
    assert_eq!(state.items.len(), 1);
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("network error: offline"));
}

#[test]
fn successful_refresh_clears_previous_error() {
    let table = Arc::new(FakeItems::default());
    *table.list_error.lock().unwrap() = Some(DataError::Unavailable);
    let store = store(&table);
    block_on(store.refresh());
    assert!(store.state().snapshot().error.is_some());

    *table.list_error.lock().unwrap() = None;
    block_on(store.refresh());
    assert!(store.state().snapshot().error.is_none());
}

// =============================================================
// add_item
// =============================================================

#[test]
fn add_item_while_signed_in_stamps_creator_and_shows_item() {
    let table = Arc::new(FakeItems::default());
    let store = store(&table);

    let row = block_on(store.add_item(wallet(), Some(&u1()))).unwrap();
    assert_eq!(row.created_by.as_deref(), Some("u1"));
    assert_eq!(table.inserted.lock().unwrap()[0].created_by.as_deref(), Some("u1"));

    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].description, "wallet");
    assert_eq!(items[0].created_by.as_deref(), Some("u1"));
}

#[test]
fn add_item_anonymous_leaves_creator_unset() {
    let table = Arc::new(FakeItems::default());
    let store = store(&table);

    let row = block_on(store.add_item(wallet(), None)).unwrap();
    assert!(row.created_by.is_none());
    assert!(table.inserted.lock().unwrap()[0].created_by.is_none());
}

#[test]
fn add_item_places_new_row_first() {
    let table = Arc::new(FakeItems::with_rows(vec![item("old", ItemKind::Found, false, None)]));
    let store = store(&table);
    block_on(store.refresh());

    let row = block_on(store.add_item(wallet(), None)).unwrap();
    let ids: Vec<String> = store.items().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![row.id, "old".to_owned()]);
}

#[test]
fn rejected_add_item_leaves_collection_unchanged() {
    let table = Arc::new(FakeItems::with_rows(vec![item("old", ItemKind::Found, false, None)]));
    let store = store(&table);
    block_on(store.refresh());
    let before = store.items();

    *table.insert_error.lock().unwrap() = Some(DataError::Rejected("permission denied".to_owned()));
    let err = block_on(store.add_item(wallet(), Some(&u1()))).unwrap_err();
    assert_eq!(err.to_string(), "permission denied");
    assert_eq!(store.items(), before);
}

// =============================================================
// mark_as_found
// =============================================================

#[test]
fn mark_as_found_sets_resolved_locally() {
    let table = Arc::new(FakeItems::with_rows(vec![item("a", ItemKind::Lost, false, None)]));
    let store = store(&table);
    block_on(store.refresh());

    block_on(store.mark_as_found("a")).unwrap();
    assert!(store.items()[0].resolved);
}

#[test]
fn mark_as_found_is_idempotent() {
    let table = Arc::new(FakeItems::with_rows(vec![item("a", ItemKind::Lost, false, None)]));
    let store = store(&table);
    block_on(store.refresh());

    block_on(store.mark_as_found("a")).unwrap();
    block_on(store.mark_as_found("a")).unwrap();
    assert!(store.items()[0].resolved);
    assert_eq!(table.update_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failed_mark_as_found_leaves_item_unresolved() {
    let table = Arc::new(FakeItems::default());
    let store = store(&table);
    store.state().apply(|s| s.items.push(item("ghost", ItemKind::Lost, false, None)));

    let err = block_on(store.mark_as_found("ghost")).unwrap_err();
    assert_eq!(err, DataError::NotFound("ghost".to_owned()));
    assert!(!store.items()[0].resolved);
}
