//! # Route Model
//!
//! A route is an immutable `(start, end, number)` triple. Both endpoints are
//! lower-cased when the route is created, so every comparison downstream
//! (duplicate detection, selection by point) is case-insensitive.

use std::fmt;

/// A single route record.
///
/// Equality is structural: two routes are the same only when start, end
/// and number all match. A route sharing endpoints with another but carrying
/// a different number is a distinct record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    start: String,
    end: String,
    number: i64,
}

impl Route {
    /// Literal stored in the `__type__` tag of persisted records.
    pub const TYPE_NAME: &'static str = "Route";

    pub fn new(start: &str, end: &str, number: i64) -> Self {
        Self {
            start: normalize(start),
            end: normalize(end),
            number,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    /// Returns `true` if the route starts or ends at `point`.
    ///
    /// `point` is normalized the same way endpoints are, so callers may pass
    /// raw user input.
    pub fn touches(&self, point: &str) -> bool {
        let point = normalize(point);
        self.start == point || self.end == point
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} (#{})", self.start, self.end, self.number)
    }
}

/// Case normalization applied to every point name.
pub fn normalize(point: &str) -> String {
    point.to_lowercase()
}
