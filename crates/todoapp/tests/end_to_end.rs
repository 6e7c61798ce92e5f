use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use todoapp::api::{FileApi, TodoApi};
use todoapp::commands::{DeadlineChange, ItemEdit, NewItem, NewList};
use todoapp::error::TodoError;
use todoapp::ids::file::FileIdRegistry;
use todoapp::ids::IdAllocator;
use todoapp::model::{ItemStatus, List, ListScope, OwnerKey};
use todoapp::store::fs::FileStore;

const OWNER: OwnerKey = OwnerKey(42);
const USER: u64 = 42;

fn open(root: &Path) -> FileApi {
    TodoApi::new(
        FileStore::new(root.join("lists")),
        FileIdRegistry::new(root.join("bot_data.json")),
    )
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_list_and_item_lifecycle() {
    let dir = TempDir::new().unwrap();
    let api = open(dir.path());

    let list = api
        .create_list(OWNER, USER, NewList::named("Groceries"))
        .unwrap();
    assert_eq!(list.id, 0);

    let item = api
        .add_item(OWNER, USER, 0, NewItem::new("buy milk"))
        .unwrap();
    assert_eq!(item.id, 0);
    assert_eq!(item.status, ItemStatus::NotStarted);

    api.set_item_status(OWNER, USER, 0, 0, 2).unwrap();
    let reloaded = open(dir.path()).view_list(OWNER, 0).unwrap();
    assert_eq!(reloaded.get_item(0).unwrap().status, ItemStatus::Done);

    api.delete_list(OWNER, USER, 0).unwrap();
    assert!(matches!(
        api.view_list(OWNER, 0),
        Err(TodoError::ListNotFound { list_id: 0, .. })
    ));
    assert!(api.lists(OWNER).unwrap().is_empty());
}

#[test]
fn test_on_disk_layout() {
    let dir = TempDir::new().unwrap();
    let api = open(dir.path());
    api.create_list(OWNER, USER, NewList::named("Trip")).unwrap();
    api.add_item(
        OWNER,
        USER,
        0,
        NewItem {
            content: "passport".into(),
            deadline: Some("2024-08-01 07:30".into()),
            status: None,
        },
    )
    .unwrap();

    let owner_file = read_json(&dir.path().join("lists").join("42.json"));
    assert_eq!(owner_file[0]["type"], "List");
    assert_eq!(owner_file[0]["name"], "Trip");
    assert_eq!(owner_file[0]["items"][0]["type"], "Item");
    assert_eq!(owner_file[0]["items"][0]["status"], 0);
    assert_eq!(owner_file[0]["items"][0]["deadline"], "2024-08-01 07:30");

    let registry = read_json(&dir.path().join("bot_data.json"));
    assert_eq!(registry["all_list_ids"], json!([0]));
}

#[test]
fn test_list_ids_are_unique_across_owners_and_reused() {
    let dir = TempDir::new().unwrap();
    let api = open(dir.path());

    let a = api.create_list(OwnerKey(1), 1, NewList::default()).unwrap();
    let b = api.create_list(OwnerKey(2), 2, NewList::default()).unwrap();
    let c = api.create_list(OwnerKey(1), 1, NewList::default()).unwrap();
    assert_eq!((a.id, b.id, c.id), (0, 1, 2));

    api.delete_list(OwnerKey(2), 2, 1).unwrap();
    let d = open(dir.path())
        .create_list(OwnerKey(3), 3, NewList::default())
        .unwrap();
    assert_eq!(d.id, 1);
}

#[test]
fn test_item_ids_are_per_list() {
    let dir = TempDir::new().unwrap();
    let api = open(dir.path());
    api.create_list(OWNER, USER, NewList::named("a")).unwrap();
    api.create_list(OWNER, USER, NewList::named("b")).unwrap();

    let first = api.add_item(OWNER, USER, 0, NewItem::new("x")).unwrap();
    let second = api.add_item(OWNER, USER, 1, NewItem::new("y")).unwrap();
    assert_eq!((first.id, second.id), (0, 0));
}

#[test]
fn test_unrecognized_records_survive_saves() {
    let dir = TempDir::new().unwrap();
    let lists_dir = dir.path().join("lists");
    fs::create_dir_all(&lists_dir).unwrap();
    fs::write(
        lists_dir.join("42.json"),
        r#"[{"type": "Reminder", "at": "09:00"}, {"note": "untagged"}]"#,
    )
    .unwrap();

    let api = open(dir.path());
    api.create_list(OWNER, USER, NewList::named("Kept")).unwrap();

    let owner_file = read_json(&lists_dir.join("42.json"));
    let records = owner_file.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["name"], "Kept");
    assert_eq!(records[1], json!({"type": "Reminder", "at": "09:00"}));
    assert_eq!(records[2], json!({"note": "untagged"}));
}

#[test]
fn test_untagged_item_is_rejected() {
    let dir = TempDir::new().unwrap();
    let lists_dir = dir.path().join("lists");
    fs::create_dir_all(&lists_dir).unwrap();
    fs::write(
        lists_dir.join("42.json"),
        r#"[{"type": "List", "id": 0, "name": "Bad", "scope_id": 42,
             "items": [{"id": 0, "content": "no tag"}]}]"#,
    )
    .unwrap();

    assert!(open(dir.path()).lists(OWNER).is_err());
}

#[test]
fn test_edit_and_doctor_on_disk() {
    let dir = TempDir::new().unwrap();
    let api = open(dir.path());
    api.create_list(OWNER, USER, NewList::default()).unwrap();
    api.add_item(OWNER, USER, 0, NewItem::new("draft")).unwrap();
    api.edit_item(
        OWNER,
        USER,
        0,
        0,
        ItemEdit {
            content: Some("final".into()),
            deadline: DeadlineChange::Set("2025-01-31 17:00".into()),
        },
    )
    .unwrap();
    assert_eq!(
        open(dir.path()).view_list(OWNER, 0).unwrap().items[0].content,
        "final"
    );

    // Leak an id the way a crash between allocation and save would.
    api.ids().allocate().unwrap();
    let report = api.doctor().unwrap();
    assert_eq!(report.released_ids, vec![1]);
    assert_eq!(
        api.ids().registered().unwrap().into_iter().collect::<Vec<_>>(),
        vec![0]
    );
}

#[test]
fn test_save_lists_overwrites_corrupt_owner_file() {
    let dir = TempDir::new().unwrap();
    let lists_dir = dir.path().join("lists");
    fs::create_dir_all(&lists_dir).unwrap();
    fs::write(lists_dir.join("42.json"), "{ not json").unwrap();

    let api = open(dir.path());
    assert!(api.lists(OWNER).is_err());

    let fresh = List::new(0, "fresh", ListScope::User, 42, USER);
    api.store().save_lists(OWNER, &[fresh.clone()]).unwrap();
    assert_eq!(api.lists(OWNER).unwrap(), vec![fresh]);
}

#[test]
fn test_delete_succeeds_when_registry_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let api = open(dir.path());
    api.create_list(OWNER, USER, NewList::named("doomed")).unwrap();
    fs::write(dir.path().join("bot_data.json"), "garbage").unwrap();

    let removed = api.delete_list(OWNER, USER, 0).unwrap();
    assert_eq!(removed.name, "doomed");
    assert!(api.lists(OWNER).unwrap().is_empty());
}

#[test]
fn test_legacy_owner_file_is_read_and_rewritten() {
    let dir = TempDir::new().unwrap();
    let lists_dir = dir.path().join("lists");
    fs::create_dir_all(&lists_dir).unwrap();
    fs::write(
        lists_dir.join("42.json"),
        r#"[{"type": "ToDoList", "id": 3, "name": "Old bot", "author": "sam",
             "author_id": 42,
             "items": [{"id": 0, "type": "ToDoItem", "content": "carry over",
                        "deadline": null, "status": 1}]}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("bot_data.json"), r#"{"all_list_ids": [3]}"#).unwrap();

    let api = open(dir.path());
    let lists = api.lists(OWNER).unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].items[0].status, ItemStatus::InProgress);

    api.add_item(OWNER, USER, 3, NewItem::new("new one")).unwrap();
    let owner_file = read_json(&lists_dir.join("42.json"));
    assert_eq!(owner_file[0]["type"], "List");
    assert_eq!(owner_file[0]["authors"], json!([42]));
    assert_eq!(owner_file[0]["items"][1]["content"], "new one");
}
