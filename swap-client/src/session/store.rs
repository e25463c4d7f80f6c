//! Session persistence.
//!
//! A single [`UserAccount`] record under the key `userAccount`. The file
//! store keeps the same key so the file reads like the browser's local storage.

use parking_lot::RwLock;
use serde_json::{Map, Value};
use shared::{UserAccount, USER_ACCOUNT_KEY};
use std::path::PathBuf;

use crate::core::error::{ClientError, Result};

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<UserAccount>>;
    fn save(&self, account: &UserAccount) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// In-process store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    record: RwLock<Option<UserAccount>>,
}

impl MemoryStore {
    pub fn with_account(account: UserAccount) -> Self {
        Self {
            record: RwLock::new(Some(account)),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<UserAccount>> {
        Ok(self.record.read().clone())
    }

    fn save(&self, account: &UserAccount) -> Result<()> {
        *self.record.write() = Some(account.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.write() = None;
        Ok(())
    }
}

/// JSON file store: `{ "userAccount": { ... } }`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Map::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| storage_error(&self.path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(storage_error(&self.path, e)),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }
        let text = serde_json::to_string_pretty(map).map_err(|e| storage_error(&self.path, e))?;
        std::fs::write(&self.path, text).map_err(|e| storage_error(&self.path, e))
    }
}

fn storage_error(path: &std::path::Path, err: impl std::fmt::Display) -> ClientError {
    ClientError::Storage(format!("{}: {}", path.display(), err))
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<UserAccount>> {
        let map = self.read_map()?;
        match map.get(USER_ACCOUNT_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(record) => serde_json::from_value(record.clone())
                .map(Some)
                .map_err(|e| storage_error(&self.path, e)),
        }
    }

    fn save(&self, account: &UserAccount) -> Result<()> {
        let mut map = self.read_map()?;
        let record = serde_json::to_value(account).map_err(|e| storage_error(&self.path, e))?;
        map.insert(USER_ACCOUNT_KEY.to_string(), record);
        self.write_map(&map)
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(USER_ACCOUNT_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
