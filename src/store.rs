use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key-value persistence the gesture settings are read from.
///
/// Reads never fail: a missing key or a value of the wrong type yields the
/// supplied default. Writes may fail when the backing storage does.
pub trait KeyValueStore {
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_string(&self, key: &str, default: &str) -> String;
    fn put_bool(&mut self, key: &str, value: bool) -> anyhow::Result<()>;
    fn put_string(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

fn bool_or(value: Option<&Value>, key: &str, default: bool) -> bool {
    match value {
        None => default,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            tracing::debug!(key, ?other, "stored value is not a boolean");
            default
        }
    }
}

fn string_or(value: Option<&Value>, key: &str, default: &str) -> String {
    match value {
        None => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            tracing::debug!(key, ?other, "stored value is not a string");
            default.to_string()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        bool_or(self.values.get(key), key, default)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        string_or(self.values.get(key), key, default)
    }

    fn put_bool(&mut self, key: &str, value: bool) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), Value::Bool(value));
        Ok(())
    }

    fn put_string(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }
}

/// Flat JSON object on disk, cached in memory and written through on every
/// put.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens `path`. A missing or empty file starts an empty store.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };
        let values = if content.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => map,
                other => {
                    return Err(anyhow::anyhow!(
                        "expected a JSON object in {}, found {}",
                        path.display(),
                        other
                    ))
                }
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `values` with `key` set and only then adopts them, so a failed
    /// write leaves the cache matching the file.
    fn commit(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&next)?;
        std::fs::write(&self.path, json)?;
        self.values = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        bool_or(self.values.get(key), key, default)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        string_or(self.values.get(key), key, default)
    }

    fn put_bool(&mut self, key: &str, value: bool) -> anyhow::Result<()> {
        self.commit(key, Value::Bool(value))
    }

    fn put_string(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.commit(key, Value::String(value.to_string()))
    }
}
