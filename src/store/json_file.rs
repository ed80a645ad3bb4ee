//! A JSON document on disk guarded by a mutex.
//!
//! Every mutation runs against a copy of the in-memory state, is written to a
//! temporary file, renamed over the original, and only then committed. A
//! failed write leaves both the file and the cached state untouched.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LootError, LootResult};

pub(crate) fn storage_error(path: &Path, err: impl Display) -> LootError {
    LootError::Storage {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[derive(Debug)]
pub(crate) struct JsonFile<T> {
    path: PathBuf,
    state: Mutex<T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Opens the document, starting from `T::default()` when the file is absent or empty.
    pub(crate) fn open(path: impl Into<PathBuf>) -> LootResult<Self> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => T::default(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| storage_error(&path, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file absent, starting empty");
                T::default()
            }
            Err(e) => return Err(storage_error(&path, e)),
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock())
    }

    /// Applies `f` to a copy and commits it once the file is written.
    ///
    /// Blocks on file IO with the lock held; async callers run this on the
    /// blocking pool.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> LootResult<R>) -> LootResult<R> {
        let mut guard = self.state.lock();
        let mut next = guard.clone();
        let result = f(&mut next)?;
        persist(&self.path, &next)?;
        *guard = next;
        Ok(result)
    }
}

fn persist<T: Serialize>(path: &Path, value: &T) -> LootResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_error(path, e))?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| storage_error(path, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| storage_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| storage_error(path, e))?;

    Ok(())
}
