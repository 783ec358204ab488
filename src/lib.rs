//! Conversion between nested JSON values and flat "simple keys".
//!
//! A simple key is a path written the way HTML form fields name nested data:
//! `user[address][city]`. [`flatten`] turns a nested value into a map of such
//! keys, [`unflatten`] folds a map of them back into nested mappings, and
//! [`keys`] / [`value`] enumerate and read paths directly.
//!
//! ```
//! use serde_json::json;
//!
//! let flat = simple_keys::flatten(&json!({"user": {"name": "Ada", "tags": ["a", "b"]}})).unwrap();
//! assert_eq!(flat["user[name]"], json!("Ada"));
//! assert_eq!(flat["user[tags][1]"], json!("b"));
//!
//! let nested = simple_keys::unflatten(&flat).unwrap();
//! assert_eq!(simple_keys::value("user[tags][0]", &nested), Some(&json!("a")));
//! ```
//!
//! Sequences are treated as mappings keyed by index, so folded output only
//! ever contains objects. Empty brackets (`x[]`) address the literal key `""`;
//! they are never renumbered.

pub mod constants;
pub mod error;
pub mod options;
pub mod path;
mod unflatten;
pub mod uploads;
mod walk;

use serde_json::{Map, Value};
use tracing::debug;

pub use crate::error::{Error, ErrorKind, ErrorStage};
pub use crate::options::Options;
pub use crate::path::{child_path, extract_segments, format_segment, parse_head, SimpleKey};
pub use crate::uploads::{reorganize_uploads, uploaded_files, UploadedFile};
pub use crate::walk::Leaves;

pub type Result<T> = std::result::Result<T, Error>;

/// Folds a flat map of simple keys into nested mappings.
///
/// Entries are applied in order. A bracketed key is merged into whatever the
/// earlier entries built under the same head; a plain key replaces its entry
/// outright.
pub fn unflatten(flat: &Map<String, Value>) -> Result<Map<String, Value>> {
    unflatten_with_options(flat, &Options::default())
}

pub fn unflatten_with_options(
    flat: &Map<String, Value>,
    options: &Options,
) -> Result<Map<String, Value>> {
    debug!(entries = flat.len(), "unflatten");
    unflatten::unflatten(flat, options)
}

/// Flattens an object or sequence into a map from simple key to scalar.
///
/// The input is canonicalised with [`unflatten`] first, so flat and nested
/// inputs describing the same data produce the same output.
pub fn flatten(input: &Value) -> Result<Map<String, Value>> {
    flatten_with_options(input, &Options::default())
}

pub fn flatten_with_options(input: &Value, options: &Options) -> Result<Map<String, Value>> {
    let canonical = unflatten::unflatten_value(input, options)
        .map_err(|err| err.with_stage(ErrorStage::Flatten))?;
    let mut flat = Map::new();
    for (path, leaf) in Leaves::new(&canonical) {
        flat.insert(path, leaf.clone());
    }
    debug!(entries = flat.len(), "flatten");
    Ok(flat)
}

/// Alias of [`flatten`].
pub fn convert(input: &Value) -> Result<Map<String, Value>> {
    flatten(input)
}

/// Simple keys of every scalar in `nested`, depth first in key order.
pub fn keys(nested: &Map<String, Value>) -> Vec<String> {
    walk::keys(nested)
}

/// Alias of [`keys`].
pub fn enumerate_paths(nested: &Map<String, Value>) -> Vec<String> {
    keys(nested)
}

/// Reads the value stored at `simple_key`, or `None` when nothing is there.
///
/// Never fails: malformed keys and keys that run through scalars simply find
/// nothing. A stored `null` is returned as `Some(&Value::Null)`.
pub fn value<'a>(simple_key: &str, nested: &'a Map<String, Value>) -> Option<&'a Value> {
    walk::lookup(simple_key, nested)
}

/// Alias of [`value`].
pub fn lookup<'a>(simple_key: &str, nested: &'a Map<String, Value>) -> Option<&'a Value> {
    value(simple_key, nested)
}

/// Like [`value`], but canonicalises `input` first so keys stored in
/// bracketed form (`{"c[a]": 1}`) resolve as if nested.
pub fn resolve(simple_key: &str, input: &Value) -> Result<Option<Value>> {
    resolve_with_options(simple_key, input, &Options::default())
}

pub fn resolve_with_options(
    simple_key: &str,
    input: &Value,
    options: &Options,
) -> Result<Option<Value>> {
    let canonical = unflatten::unflatten_value(input, options)?;
    Ok(walk::lookup(simple_key, &canonical).cloned())
}
