#![cfg(test)]
use routes_common::route::Route;
use routes_core::{Error, RouteStore, codec};
use tempfile::TempDir;

/// Walks a store through insert, render, duplicate rejection and a
/// save/load cycle, the way a single `add` followed by `list` would.
#[test]
fn insert_render_and_persist() {
    let mut store = RouteStore::new();
    store.insert("A", "B", 1).unwrap();
    store.insert("X", "B", 1).unwrap();

    let rendered = store.render();
    let rows: Vec<&str> = rendered.lines().skip(3).take(2).collect();
    assert!(rows[0].starts_with("|  1   | a "));
    assert!(rows[0].contains("| b "));
    assert!(rows[1].starts_with("|  2   | x "));

    let err = store.insert("a", "b", 1).unwrap_err();
    assert!(matches!(err, Error::Duplicate { .. }));
    assert_eq!(store.count(), 2);

    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("routes.json");
    codec::save(&store, &path).unwrap();

    let loaded: RouteStore = codec::load(&path).unwrap();
    assert_eq!(loaded, store);
    assert!(loaded.verify().is_ok());
}

#[test]
fn selection_after_reload() {
    let mut store = RouteStore::new();
    store.insert("a", "c", 2).unwrap();
    store.insert("x", "b", 1).unwrap();
    store.insert("a", "b", 1).unwrap();

    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("routes.json");
    codec::save(&store, &path).unwrap();
    let loaded = codec::load(&path).unwrap();

    let selected = loaded.select("B");
    assert_eq!(
        selected.routes(),
        &[Route::new("x", "b", 1), Route::new("a", "b", 1)]
    );
    assert!(loaded.select("z").is_empty());
}

#[test]
fn invalid_file_loads_nothing() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("fi_invalid.json");
    std::fs::write(
        &path,
        r#"[
            {"__type__": "Route", "start": "stav", "end": "moscow", "number": 1},
            {"__type__": "Route", "start": "kazan", "end": "stav"}
        ]"#,
    )
    .unwrap();

    let result = codec::load(&path);
    assert!(
        matches!(result, Err(Error::Validation { .. })),
        "expected validation failure, got {result:?}"
    );
}

#[test]
fn loaded_routes_accept_further_inserts() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("routes.json");
    std::fs::write(
        &path,
        r#"[
            {"__type__": "Route", "start": "stav", "end": "moscow", "number": 2},
            {"__type__": "Route", "start": "kazan", "end": "stav", "number": 7},
            {"__type__": "Route", "start": "sochi", "end": "kazan", "number": 9}
        ]"#,
    )
    .unwrap();

    let mut store = codec::load(&path).unwrap();
    assert_eq!(store.select("stav").count(), 2);

    store.insert("Omsk", "Sochi", 5).unwrap();
    let numbers: Vec<i64> = store.iter().map(Route::number).collect();
    assert_eq!(numbers, vec![2, 5, 7, 9]);

    codec::save(&store, &path).unwrap();
    assert_eq!(codec::load(&path).unwrap().count(), 4);
}
