use leptos::logging::error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Note {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    Unavailable,
    Read { key: String, reason: String },
    Write { key: String, reason: String },
    Encode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "local storage is unavailable"),
            StoreError::Read { key, reason } => write!(f, "failed to read {key}: {reason}"),
            StoreError::Write { key, reason } => write!(f, "failed to write {key}: {reason}"),
            StoreError::Encode(reason) => write!(f, "failed to encode note: {reason}"),
        }
    }
}

/// Synchronous string key-value storage, shaped after `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// `window.localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<leptos::web_sys::Storage, StoreError> {
        leptos::web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

fn js_reason(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(key).map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: js_reason(&e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: js_reason(&e),
        })
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct NoteStore<'a, S: KeyValueStore> {
    backend: &'a S,
}

impl<'a, S: KeyValueStore> NoteStore<'a, S> {
    pub fn new(backend: &'a S) -> Self {
        Self { backend }
    }

    /// Absent, empty, unreadable and malformed records all come back as `None`.
    pub fn load(&self, key: &str) -> Option<Note> {
        let raw = self.backend.get_item(key).ok().flatten()?;
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(&raw).ok()? {
            value @ serde_json::Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    /// Best-effort write. Failures are logged and returned; callers are free
    /// to carry on as if the write landed.
    pub fn save(&self, key: &str, note: &Note) -> Result<(), StoreError> {
        let result = serde_json::to_string(note)
            .map_err(|e| StoreError::Encode(e.to_string()))
            .and_then(|raw| self.backend.set_item(key, &raw));
        if let Err(err) = &result {
            error!("fatal: failed to save note: {err}");
        }
        result
    }
}
