// ops-sdk/src/store.rs
// JSON key-value file, reopened on every call
use ops_sdk_common::{Result, SdkError};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A flat JSON object persisted as a single file.
///
/// No handle is kept between calls: every `get` and `set` reads the file
/// again, so changes made by other processes are visible. Writes replace the
/// whole file and are not locked, concurrent writers race and the last one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up `key`. A missing file behaves like an empty object and is not created.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut data = self.load()?;
        Ok(data.remove(key))
    }

    /// Merge `key -> value` into the file, keeping every other key
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut data = self.load()?;
        data.insert(key.to_string(), value.into());

        let contents = serde_json::to_vec(&data).map_err(|e| {
            SdkError::serialize(format!(
                "Failed to serialize {}: {}",
                self.path.display(),
                e
            ))
        })?;
        fs::write(&self.path, contents).map_err(|e| {
            SdkError::store_io(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        debug!("Stored key {} in {}", key, self.path.display());
        Ok(())
    }

    /// Read every entry currently in the file
    pub fn entries(&self) -> Result<Map<String, Value>> {
        self.load()
    }

    fn load(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(SdkError::store_io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        match serde_json::from_slice::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(SdkError::store_corrupt(format!(
                "{} holds a JSON {} instead of an object",
                self.path.display(),
                json_kind(&other)
            ))),
            Err(e) => Err(SdkError::store_corrupt(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
