//! # Persistence Codec
//!
//! Saves a [`RouteStore`] as a JSON array and loads it back.
//!
//! On disk every route is an object tagged with its kind:
//!
//! ```json
//! [
//!     {
//!         "__type__": "Route",
//!         "start": "stavropol",
//!         "end": "moscow",
//!         "number": 12
//!     }
//! ]
//! ```
//!
//! Loading checks the whole document against that shape before a single
//! route is built, so a bad file never yields a partially filled store.
//! The codec does not look at ordering or duplicates; see
//! [`RouteStore::verify`] for that.

#[cfg(unix)]
use std::fs::Permissions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use routes_common::route::Route;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::store::RouteStore;

const TYPE_KEY: &str = "__type__";
const START_KEY: &str = "start";
const END_KEY: &str = "end";
const NUMBER_KEY: &str = "number";
const RECORD_KEYS: [&str; 4] = [TYPE_KEY, START_KEY, END_KEY, NUMBER_KEY];

const INDENT: &[u8] = b"    ";

/// Mode requested for a newly created data file, before the umask.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

#[derive(Serialize)]
struct RouteRecord<'a> {
    #[serde(rename = "__type__")]
    kind: &'static str,
    start: &'a str,
    end: &'a str,
    number: i64,
}

impl<'a> From<&'a Route> for RouteRecord<'a> {
    fn from(route: &'a Route) -> Self {
        Self {
            kind: Route::TYPE_NAME,
            start: route.start(),
            end: route.end(),
            number: route.number(),
        }
    }
}

/// Writes `store` to `path`, replacing any previous content.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it once complete, so readers never observe a half-written file.
/// An existing file keeps its permissions; a new one gets the usual
/// umask-derived mode.
pub fn save(store: &RouteStore, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(Error::io(path, e)),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    if existing.is_none() {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(Permissions::from_mode(NEW_FILE_MODE));
    }

    let mut tmp = builder.tempfile_in(dir).map_err(|e| Error::io(dir, e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::io(tmp.path(), e))?;
    }

    write_to(store, &mut tmp)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Reads and validates the document at `path`.
///
/// A missing file is an [`Error::Io`]; deciding whether that is acceptable
/// belongs to the caller.
pub fn load(path: &Path) -> Result<RouteStore> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    decode(&content)
}

/// Serializes `store` to `writer` as JSON with four-space indentation.
pub fn write_to<W: Write>(store: &RouteStore, writer: W) -> std::io::Result<()> {
    let records: Vec<RouteRecord<'_>> = store.iter().map(RouteRecord::from).collect();

    let mut ser = serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut ser)?;
    Ok(())
}

/// Parses and validates a JSON document, then builds the store in file order.
pub fn decode(content: &str) -> Result<RouteStore> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| Error::validation("$", format!("invalid JSON: {e}")))?;

    let Value::Array(items) = &document else {
        return Err(Error::validation(
            "$",
            format!("expected an array, found {}", kind_of(&document)),
        ));
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(idx, item)| validate_record(idx, item))
        .collect::<Result<Vec<_>>>()?;

    let routes: Vec<Route> = records
        .into_iter()
        .map(|(start, end, number)| Route::new(start, end, number))
        .collect();

    Ok(RouteStore::from(routes))
}

fn validate_record(idx: usize, item: &Value) -> Result<(&str, &str, i64)> {
    let location = format!("$[{idx}]");

    let Value::Object(fields) = item else {
        return Err(Error::validation(
            location,
            format!("expected an object, found {}", kind_of(item)),
        ));
    };

    for key in RECORD_KEYS {
        if !fields.contains_key(key) {
            return Err(Error::validation(location, format!("missing required field '{key}'")));
        }
    }

    if let Some(extra) = fields.keys().find(|key| !RECORD_KEYS.contains(&key.as_str())) {
        return Err(Error::validation(location, format!("unexpected field '{extra}'")));
    }

    let kind = string_field(fields, &location, TYPE_KEY)?;
    if kind != Route::TYPE_NAME {
        return Err(Error::validation(
            format!("{location}.{TYPE_KEY}"),
            format!("expected \"{}\", found \"{kind}\"", Route::TYPE_NAME),
        ));
    }

    let start = string_field(fields, &location, START_KEY)?;
    let end = string_field(fields, &location, END_KEY)?;
    let number = integer_field(fields, &location, NUMBER_KEY)?;

    Ok((start, end, number))
}

fn string_field<'a>(fields: &'a Map<String, Value>, location: &str, key: &str) -> Result<&'a str> {
    match fields.get(key) {
        Some(Value::String(value)) => Ok(value),
        other => Err(type_mismatch(location, key, "a string", other)),
    }
}

fn integer_field(fields: &Map<String, Value>, location: &str, key: &str) -> Result<i64> {
    let value = fields.get(key);
    match value {
        Some(Value::Number(number)) => match number.as_i64() {
            Some(n) => Ok(n),
            None if number.is_u64() => Err(Error::validation(
                format!("{location}.{key}"),
                format!("integer {number} is out of range"),
            )),
            None => Err(type_mismatch(location, key, "an integer", value)),
        },
        other => Err(type_mismatch(location, key, "an integer", other)),
    }
}

fn type_mismatch(location: &str, key: &str, expected: &str, found: Option<&Value>) -> Error {
    let found = found.map_or("nothing", kind_of);
    Error::validation(format!("{location}.{key}"), format!("expected {expected}, found {found}"))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
