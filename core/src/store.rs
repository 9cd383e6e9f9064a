//! # Route Store
//!
//! An in-memory collection of [`Route`]s kept in ascending `number` order.
//!
//! Two invariants hold after every [`RouteStore::insert`]:
//! * the sequence is non-decreasing by route number, with routes sharing a
//!   number kept in insertion order;
//! * no two routes are structurally equal.
//!
//! Stores built with [`From<Vec<Route>>`] skip both checks. Use
//! [`RouteStore::verify`] when the source is not trusted.

use std::collections::HashMap;
use std::fmt;

use routes_common::route::Route;

use crate::error::{Error, Result};

const INDEX_WIDTH: usize = 4;
const START_WIDTH: usize = 30;
const END_WIDTH: usize = 20;
const NUMBER_WIDTH: usize = 16;

/// Rendered in place of a table when there is nothing to show.
pub const EMPTY_MESSAGE: &str = "Route list is empty.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteStore {
    routes: Vec<Route>,
}

impl RouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route, keeping the store sorted by route number.
    ///
    /// Endpoints are lower-cased before the duplicate check. A route equal to
    /// one already stored is rejected with [`Error::Duplicate`] and the store
    /// is left untouched. Otherwise the route lands after every existing
    /// route with the same number.
    pub fn insert(&mut self, start: &str, end: &str, number: i64) -> Result<&Route> {
        let route = Route::new(start, end, number);

        if self.routes.contains(&route) {
            return Err(Error::Duplicate { route });
        }

        let idx = self.routes.partition_point(|stored| stored.number() <= number);
        self.routes.insert(idx, route);
        Ok(&self.routes[idx])
    }

    /// Returns a new store with every route starting or ending at `point`.
    ///
    /// Matching is case-insensitive. No match yields an empty store, not an
    /// error. Result order follows this store's order.
    pub fn select(&self, point: &str) -> RouteStore {
        let routes = self
            .routes
            .iter()
            .filter(|route| route.touches(point))
            .cloned()
            .collect();

        RouteStore { routes }
    }

    pub fn count(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Checks both store invariants, reporting the first violation.
    pub fn verify(&self) -> Result<()> {
        let mut seen: HashMap<&Route, usize> = HashMap::with_capacity(self.routes.len());

        for (idx, route) in self.routes.iter().enumerate() {
            if let Some(first) = seen.insert(route, idx) {
                return Err(Error::validation(
                    format!("$[{idx}]"),
                    format!("duplicate of route at $[{first}]"),
                ));
            }

            if let Some(prev) = idx.checked_sub(1).map(|p| &self.routes[p]) {
                if prev.number() > route.number() {
                    return Err(Error::validation(
                        format!("$[{idx}]"),
                        format!(
                            "route number {} is out of order after {}",
                            route.number(),
                            prev.number()
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Renders the store as a bordered table, one row per route.
    pub fn render(&self) -> String {
        if self.routes.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let rule = format!(
            "+-{}-+-{}-+-{}-+-{}-+",
            "-".repeat(INDEX_WIDTH),
            "-".repeat(START_WIDTH),
            "-".repeat(END_WIDTH),
            "-".repeat(NUMBER_WIDTH)
        );

        let mut table = Vec::with_capacity(self.routes.len() + 4);
        table.push(rule.clone());
        table.push(format!(
            "| {:^INDEX_WIDTH$} | {:^START_WIDTH$} | {:^END_WIDTH$} | {:^NUMBER_WIDTH$} |",
            "No", "Start", "End", "Route number"
        ));
        table.push(rule.clone());

        for (idx, route) in self.routes.iter().enumerate() {
            table.push(format!(
                "| {:^INDEX_WIDTH$} | {:<START_WIDTH$} | {:<END_WIDTH$} | {:>NUMBER_WIDTH$} |",
                idx + 1,
                route.start(),
                route.end(),
                route.number()
            ));
        }

        table.push(rule);
        table.join("\n")
    }
}

impl From<Vec<Route>> for RouteStore {
    fn from(routes: Vec<Route>) -> Self {
        Self { routes }
    }
}

impl<'a> IntoIterator for &'a RouteStore {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl fmt::Display for RouteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(store: &RouteStore) -> Vec<i64> {
        store.iter().map(Route::number).collect()
    }

    #[test]
    fn test_insert_keeps_number_order() {
        let mut store = RouteStore::new();
        for (start, end, number) in [("a", "b", 5), ("c", "d", 1), ("e", "f", 3), ("g", "h", 9), ("i", "j", 2)] {
            store.insert(start, end, number).unwrap();
            assert!(store.routes().windows(2).all(|w| w[0].number() <= w[1].number()));
        }

        assert_eq!(numbers(&store), vec![1, 2, 3, 5, 9]);
    }

    #[test]
    fn test_insert_equal_numbers_keep_insertion_order() {
        let mut store = RouteStore::new();
        store.insert("first", "x", 2).unwrap();
        store.insert("zero", "x", 1).unwrap();
        store.insert("second", "x", 2).unwrap();
        store.insert("third", "x", 2).unwrap();
        store.insert("last", "x", 3).unwrap();

        let starts: Vec<&str> = store.iter().map(Route::start).collect();
        assert_eq!(starts, vec!["zero", "first", "second", "third", "last"]);
    }

    #[test]
    fn test_insert_returns_normalized_route() {
        let mut store = RouteStore::new();
        let route = store.insert("A", "B", 1).unwrap();
        assert_eq!(route, &Route::new("a", "b", 1));
        assert_eq!(route.start(), "a");
    }

    #[test]
    fn test_duplicate_is_rejected_and_store_unchanged() {
        let mut store = RouteStore::new();
        store.insert("A", "B", 1).unwrap();
        store.insert("X", "B", 1).unwrap();
        let before = store.clone();

        let err = store.insert("a", "b", 1).unwrap_err();
        assert!(matches!(err, Error::Duplicate { ref route } if *route == Route::new("a", "b", 1)));
        assert_eq!(store, before);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_same_endpoints_different_number_is_distinct() {
        let mut store = RouteStore::new();
        store.insert("a", "b", 1).unwrap();
        store.insert("a", "b", 2).unwrap();
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_select_matches_either_endpoint_in_order() {
        let mut store = RouteStore::new();
        store.insert("a", "c", 2).unwrap();
        store.insert("a", "b", 1).unwrap();
        store.insert("x", "b", 1).unwrap();

        let selected = store.select("b");
        assert_eq!(
            selected.routes(),
            &[Route::new("a", "b", 1), Route::new("x", "b", 1)]
        );

        let by_start = store.select("a");
        assert_eq!(numbers(&by_start), vec![1, 2]);
    }

    #[test]
    fn test_select_is_case_insensitive() {
        let mut store = RouteStore::new();
        store.insert("A", "B", 1).unwrap();

        assert_eq!(store.select("a").count(), 1);
        assert_eq!(store.select("A").count(), 1);
    }

    #[test]
    fn test_select_without_match_is_empty() {
        let mut store = RouteStore::new();
        store.insert("a", "b", 1).unwrap();

        let selected = store.select("z");
        assert!(selected.is_empty());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(RouteStore::new().render(), EMPTY_MESSAGE);
    }

    #[test]
    fn test_render_table() {
        let mut store = RouteStore::new();
        store.insert("A", "B", 1).unwrap();
        store.insert("X", "B", 1).unwrap();

        let expected = "\
+------+--------------------------------+----------------------+------------------+
|  No  |             Start              |         End          |   Route number   |
+------+--------------------------------+----------------------+------------------+
|  1   | a                              | b                    |                1 |
|  2   | x                              | b                    |                1 |
+------+--------------------------------+----------------------+------------------+";

        assert_eq!(store.render(), expected);
        assert_eq!(store.to_string(), expected);
    }

    #[test]
    fn test_verify_accepts_inserted_data() {
        let mut store = RouteStore::new();
        store.insert("a", "b", 3).unwrap();
        store.insert("a", "b", 1).unwrap();
        assert!(store.verify().is_ok());
    }

    #[test]
    fn test_verify_reports_out_of_order() {
        let store = RouteStore::from(vec![Route::new("a", "b", 2), Route::new("c", "d", 1)]);
        let err = store.verify().unwrap_err();
        assert!(matches!(err, Error::Validation { ref location, .. } if location == "$[1]"));
    }

    #[test]
    fn test_verify_reports_duplicate() {
        let store = RouteStore::from(vec![
            Route::new("a", "b", 1),
            Route::new("c", "d", 1),
            Route::new("A", "B", 1),
        ]);
        let err = store.verify().unwrap_err();
        match err {
            Error::Validation { location, reason } => {
                assert_eq!(location, "$[2]");
                assert_eq!(reason, "duplicate of route at $[0]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
