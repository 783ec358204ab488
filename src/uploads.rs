//! Regrouping of multi-field upload metadata.
//!
//! Form uploads arrive as one attribute map per field, where each attribute
//! (`name`, `type`, `tmp_name`, ...) is either a scalar or a nested structure
//! mirroring the field's own brackets:
//!
//! ```text
//! {"docs": {"name": {"0": "a.txt", "1": "b.txt"}, "size": {"0": 3, "1": 5}}}
//! ```
//!
//! [`reorganize_uploads`] turns that into one record per file:
//!
//! ```text
//! {"docs": {"0": {"name": "a.txt", "size": 3}, "1": {"name": "b.txt", "size": 5}}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{is_upload_attribute, UPLOAD_ATTRIBUTES};
use crate::path::{child_path, push_segment};
use crate::unflatten::kind_name;
use crate::walk::{lookup, Leaves};
use crate::{unflatten, Error, ErrorStage, Options, Result};

/// One uploaded file, as grouped by [`reorganize_uploads`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadedFile {
    pub name: String,
    pub full_path: Option<String>,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub tmp_name: String,
    pub error: i64,
    pub size: u64,
}

pub fn reorganize_uploads(files: &Map<String, Value>) -> Result<Map<String, Value>> {
    reorganize_uploads_with_options(files, &Options::default())
}

pub fn reorganize_uploads_with_options(
    files: &Map<String, Value>,
    options: &Options,
) -> Result<Map<String, Value>> {
    let mut flat = Map::new();
    for (field, info) in files {
        let attributes = attribute_map(field, info)?;
        for name in attributes.keys().filter(|name| !is_upload_attribute(name)) {
            debug!(field = %field, attribute = %name, "ignoring unknown upload attribute");
        }
        for attribute in UPLOAD_ATTRIBUTES {
            let Some(value) = attributes.get(*attribute) else {
                continue;
            };
            match value {
                Value::Object(_) | Value::Array(_) => {
                    for (path, leaf) in Leaves::of_value(value) {
                        let mut key = field.clone();
                        push_segment(&mut key, &path);
                        push_segment(&mut key, attribute);
                        flat.insert(key, leaf.clone());
                    }
                }
                scalar => {
                    flat.insert(child_path(field, attribute), scalar.clone());
                }
            }
        }
    }
    debug!(fields = files.len(), entries = flat.len(), "reorganizing uploads");
    unflatten::unflatten(&flat, options).map_err(|err| err.with_stage(ErrorStage::Uploads))
}

/// Every uploaded file with the simple key of its record, in field order.
///
/// Positions are taken from the `name` attribute; fields without one are
/// skipped.
pub fn uploaded_files(files: &Map<String, Value>) -> Result<Vec<(String, UploadedFile)>> {
    let grouped = reorganize_uploads(files)?;
    let mut records = Vec::new();
    for (field, info) in files {
        let Some(names) = attribute_map(field, info)?.get("name") else {
            continue;
        };
        let record_keys: Vec<String> = match names {
            Value::Object(_) | Value::Array(_) => Leaves::of_value(names)
                .map(|(path, _)| {
                    let mut key = field.clone();
                    push_segment(&mut key, &path);
                    key
                })
                .collect(),
            _ => vec![field.clone()],
        };
        for key in record_keys {
            let Some(record) = lookup(&key, &grouped) else {
                continue;
            };
            let file = UploadedFile::deserialize(record).map_err(|err| {
                Error::deserialize(format!("invalid upload record: {err}")).within(&key)
            })?;
            records.push((key, file));
        }
    }
    Ok(records)
}

fn attribute_map<'a>(field: &str, info: &'a Value) -> Result<&'a Map<String, Value>> {
    match info {
        Value::Object(attributes) => Ok(attributes),
        other => Err(Error::invalid_argument(format!(
            "upload field expects an attribute map, found {}",
            kind_name(other)
        ))
        .with_stage(ErrorStage::Uploads)
        .within(field)),
    }
}
