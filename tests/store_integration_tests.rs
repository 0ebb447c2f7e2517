//! End-to-end tests of the document store over the file backend
use license_tracker::store::document_store::{SEED_COLUMN_NAMES, SEED_MANUFACTURER_NAME};
use license_tracker::store::{Backend, DocumentStore, FileBackend, SequentialIds};
use license_tracker::{Cell, Document, Manufacturer, Outcome};

fn file_store(dir: &std::path::Path) -> DocumentStore<FileBackend, SequentialIds> {
    DocumentStore::with_ids(FileBackend::new(dir), SequentialIds::new("it"))
}

#[test]
fn test_add_column_row_and_edit_survive_reload() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = file_store(tmp.path());

    let mut doc = Document::default();
    let example = store.add_manufacturer(&mut doc, "Example").expect("add");
    assert!(example.columns.is_empty() && example.rows.is_empty());

    let mut m = example.clone();
    let key_id = m.add_column(store.ids(), "Key").id.clone();
    let row_id = m.add_row(store.ids()).id.clone();
    assert_eq!(m.rows[0].cells, vec![Cell::empty(key_id.clone())]);
    assert_eq!(
        store.update_manufacturer(&mut doc, m.clone()).expect("update"),
        Outcome::Applied
    );

    assert_eq!(m.set_cell_value(&row_id, &key_id, "ABC-123"), Outcome::Applied);
    store.update_manufacturer(&mut doc, m).expect("update");

    // A fresh store over the same directory sees the edit
    let reopened = file_store(tmp.path());
    let reloaded = reopened.load().expect("load");
    let m = reloaded.find_manufacturer(&example.id).expect("manufacturer");
    assert_eq!(m.row(&row_id).expect("row").value(&key_id), "ABC-123");
}

#[test]
fn test_seed_on_empty_directory_is_persisted() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = file_store(tmp.path());

    let doc = store.load().expect("load");

    assert_eq!(doc.manufacturers.len(), 1);
    let m = &doc.manufacturers[0];
    assert_eq!(m.name, SEED_MANUFACTURER_NAME);
    assert_eq!(m.columns.len(), SEED_COLUMN_NAMES.len());
    assert!(m.rows.is_empty());

    let raw = store
        .backend()
        .get(store.key())
        .expect("read")
        .expect("seed written");
    let on_disk: Document = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(on_disk, doc);
}

#[test]
fn test_corrupt_file_is_replaced_by_seed() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = file_store(tmp.path());
    let path = store.backend().path_for(store.key());
    std::fs::write(&path, "\u{0}\u{1}garbage").expect("write corrupt file");

    let doc = store.load().expect("corruption is not an error");

    assert_eq!(doc.manufacturers.len(), 1);
    assert_eq!(doc.manufacturers[0].columns.len(), 3);
    let on_disk: Document =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("reseeded");
    assert_eq!(on_disk, doc);
}

#[test]
fn test_undecodable_file_is_replaced_by_seed() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = file_store(tmp.path());
    let path = store.backend().path_for(store.key());
    std::fs::write(&path, [0xFF, 0xFE]).expect("write undecodable file");

    let doc = store.load().expect("undecodable content is not an error");

    assert_eq!(doc.manufacturers.len(), 1);
    assert_eq!(doc.manufacturers[0].name, SEED_MANUFACTURER_NAME);
    let on_disk: Document =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("reseeded");
    assert_eq!(on_disk, doc);
}

#[test]
fn test_malformed_cells_keep_the_rest_of_the_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = file_store(tmp.path());
    let stored = r#"{
        "manufacturers": [
            {
                "id": "keep",
                "name": "Keep",
                "columns": [{ "id": "c1", "name": "Key" }],
                "rows": [{ "id": "r1", "cells": [{ "columnId": "c1", "value": "LIC-1" }] }]
            },
            {
                "id": "other",
                "name": "Other",
                "columns": [{ "id": "c2", "name": "Key" }],
                "rows": [{ "id": "r2", "cells": {} }, { "id": "r3", "cells": [{ "columnId": "c2" }] }]
            }
        ]
    }"#;
    store.backend().set(store.key(), stored).expect("write");

    let doc = store.load().expect("load");

    let names: Vec<&str> = doc.manufacturers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Keep", "Other"]);
    let keep = doc.find_manufacturer("keep").expect("keep");
    assert_eq!(keep.row("r1").expect("r1").value("c1"), "LIC-1");
    let other = doc.find_manufacturer("other").expect("other");
    for row in &other.rows {
        assert_eq!(row.cells, vec![Cell::empty("c2")]);
    }

    let again = store.backend().get(store.key()).expect("read").expect("stored");
    assert_eq!(serde_json::from_str::<Document>(&again).expect("parse"), doc);
}

#[test]
fn test_document_round_trips_through_backend() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = file_store(tmp.path());
    let ids = SequentialIds::new("rt");

    let mut full = Manufacturer::new("m-full", "Full");
    full.add_column(&ids, "Key");
    full.add_column(&ids, "Seats");
    let row = full.add_row(&ids).id.clone();
    full.set_cell_value(&row, "rt-1", "K-9");
    let doc = Document {
        manufacturers: vec![full, Manufacturer::new("m-empty", "Empty")],
    };

    store.save(&doc).expect("save");
    let raw = store.backend().get(store.key()).expect("read").expect("written");
    let reparsed: Document = serde_json::from_str(&raw).expect("parse");
    assert_eq!(reparsed, doc);
    assert_eq!(
        serde_json::to_value(&reparsed).expect("value"),
        serde_json::from_str::<serde_json::Value>(&raw).expect("value")
    );
    assert_eq!(store.load().expect("load"), doc);
}

#[test]
fn test_load_repairs_document_from_older_schema() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = file_store(tmp.path());
    let legacy = r#"{
        "manufacturers": [{
            "id": "m1",
            "name": "Legacy",
            "columns": [{ "id": "c1", "name": "Key" }, { "id": "c2", "name": "Expiry" }],
            "rows": [{ "id": "r1", "cells": [{ "columnId": "c1", "value": "K-1" }] },
                     { "id": "r2" }]
        }]
    }"#;
    store.backend().set(store.key(), legacy).expect("write legacy");

    let doc = store.load().expect("load");
    let m = doc.find_manufacturer("m1").expect("m1");
    for row in &m.rows {
        for column in &m.columns {
            assert_eq!(
                row.cells.iter().filter(|c| c.column_id == column.id).count(),
                1
            );
        }
    }
    assert_eq!(m.row("r1").expect("r1").value("c1"), "K-1");

    // Repaired state was written back
    let again = store.backend().get(store.key()).expect("read").expect("stored");
    assert_eq!(serde_json::from_str::<Document>(&again).expect("parse"), doc);
}

#[test]
fn test_last_full_write_wins() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let first = file_store(tmp.path());
    let second = DocumentStore::with_ids(FileBackend::new(tmp.path()), SequentialIds::new("b"));

    let mut a = first.load().expect("load");
    let mut b = second.load().expect("load");
    first.add_manufacturer(&mut a, "From A").expect("add");
    second.add_manufacturer(&mut b, "From B").expect("add");

    let stored = first.load().expect("load");
    let names: Vec<&str> = stored.manufacturers.iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"From B"));
    assert!(!names.contains(&"From A"));
}
