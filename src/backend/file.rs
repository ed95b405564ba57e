//! JSON file backing store: one file per namespace.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::backend::BackingStore;
use crate::error::{LruError, Result};
use crate::store::Entry;

// == File Store ==
/// Persists each namespace as `<dir>/<namespace>.json`.
///
/// Writes land in a sibling temp file first and are renamed into place, so
/// readers never see a half-written sequence.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, namespace: &str) -> Result<PathBuf> {
        validate_namespace(namespace)?;
        Ok(self.dir.join(format!("{namespace}.json")))
    }
}

/// Namespaces become file names, so only `[A-Za-z0-9_.-]` is accepted and a
/// leading dot is refused.
fn validate_namespace(namespace: &str) -> Result<()> {
    let valid = !namespace.is_empty()
        && !namespace.starts_with('.')
        && namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(LruError::InvalidArgument(format!(
            "namespace '{namespace}' is not usable as a file name"
        )))
    }
}

impl<V> BackingStore<V> for FileStore
where
    V: Serialize + DeserializeOwned,
{
    fn get(&self, namespace: &str) -> Result<Option<Vec<Entry<V>>>> {
        let path = self.path_for(namespace)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, namespace: &str, entries: Vec<Entry<V>>) -> Result<()> {
        let path = self.path_for(namespace)?;
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec(&entries)?;

        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &path)) {
            // the temp file is absent when the write itself failed
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(namespace, len = entries.len(), path = %path.display(), "file store set");
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<()> {
        let path = self.path_for(namespace)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(namespace, "file store remove");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
