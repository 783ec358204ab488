mod merge;

use serde_json::{Map, Value};

use crate::path::{index_key, SimpleKey};
use crate::{Error, ErrorStage, Options, Result};

use self::merge::{build_branch, merge_into};

/// Folds a flat simple-key map into nested mappings.
pub(crate) fn unflatten(
    flat: &Map<String, Value>,
    options: &Options,
) -> Result<Map<String, Value>> {
    Folder::new(options).fold_map(flat, 0)
}

/// Canonical nested form of an object or a sequence.
pub(crate) fn unflatten_value(input: &Value, options: &Options) -> Result<Map<String, Value>> {
    let folder = Folder::new(options);
    match input {
        Value::Object(map) => folder.fold_map(map, 0),
        Value::Array(items) => folder.fold_sequence(items, 0),
        other => Err(Error::invalid_argument(format!(
            "expected an object or an array, found {}",
            kind_name(other)
        ))
        .with_stage(ErrorStage::Unflatten)),
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Levels are counted in keys from the root: a top-level value sits at
/// level 1, the value of `a[b]` at level 2.
struct Folder {
    max_depth: usize,
}

impl Folder {
    fn new(options: &Options) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    fn check_level(&self, level: usize) -> Result<()> {
        if level > self.max_depth {
            return Err(Error::depth_limit(self.max_depth));
        }
        Ok(())
    }

    fn fold_map(&self, flat: &Map<String, Value>, level: usize) -> Result<Map<String, Value>> {
        let mut out = Map::with_capacity(flat.len());
        for (key, value) in flat {
            self.fold_entry(&mut out, key, value, level)
                .map_err(|err| err.within(key))?;
        }
        Ok(out)
    }

    fn fold_sequence(&self, items: &[Value], level: usize) -> Result<Map<String, Value>> {
        let mut out = Map::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let key = index_key(index);
            let folded = self
                .canonical(item, level + 1)
                .map_err(|err| err.within(&key))?;
            out.insert(key, folded);
        }
        Ok(out)
    }

    fn fold_entry(
        &self,
        out: &mut Map<String, Value>,
        key: &str,
        value: &Value,
        level: usize,
    ) -> Result<()> {
        let Some(simple_key) = SimpleKey::parse(key) else {
            let folded = self.canonical(value, level + 1)?;
            out.insert(key.to_string(), folded);
            return Ok(());
        };
        let leaf_level = level + simple_key.depth();
        self.check_level(leaf_level)?;
        let leaf = self.sequences_to_maps(value, leaf_level)?;
        merge_into(out, build_branch(&simple_key, leaf));
        Ok(())
    }

    /// Plain-key values: nested keys are folded again, sequences become
    /// index-keyed mappings.
    fn canonical(&self, value: &Value, level: usize) -> Result<Value> {
        self.check_level(level)?;
        match value {
            Value::Object(map) => Ok(Value::Object(self.fold_map(map, level)?)),
            Value::Array(items) => Ok(Value::Object(self.fold_sequence(items, level)?)),
            scalar => Ok(scalar.clone()),
        }
    }

    /// Bracketed-key values: keys are kept verbatim, only sequences change
    /// shape.
    fn sequences_to_maps(&self, value: &Value, level: usize) -> Result<Value> {
        self.check_level(level)?;
        match value {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    out.insert(key.clone(), self.sequences_to_maps(child, level + 1)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => {
                let mut out = Map::with_capacity(items.len());
                for (index, child) in items.iter().enumerate() {
                    out.insert(index_key(index), self.sequences_to_maps(child, level + 1)?);
                }
                Ok(Value::Object(out))
            }
            scalar => Ok(scalar.clone()),
        }
    }
}
