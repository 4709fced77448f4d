//! File-backed [`Storage`] implementation.

use std::{io, path::PathBuf};

use common::operations::{By, Load, Store};
use derive_more::{Display, Error as StdError};
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracerr::Traced;

use crate::infra::{storage, storage::Key, Storage};

/// [`Storage`] persisting each [`Key`] as a standalone JSON file under a
/// root directory.
///
/// A missing file reads as the default value, so a fresh device starts with
/// empty sets. Writes go through a temporary file renamed into place, so a
/// crash mid-write never leaves a torn file behind.
#[derive(Clone, Debug)]
pub struct FileStorage {
    /// Root directory the files live under.
    root: PathBuf,
}

impl FileStorage {
    /// Creates a new [`FileStorage`] persisting under the provided `root`
    /// directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the path the provided [`Key`] is persisted at.
    fn path(&self, key: Key) -> PathBuf {
        self.root.join(format!("{}.json", key.name()))
    }
}

impl<T> Storage<Load<By<T, Key>>> for FileStorage
where
    T: DeserializeOwned + Default,
{
    type Ok = T;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Load(by): Load<By<T, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = self.path(by.into_inner());
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(Error::Json)
                .map_err(tracerr::from_and_wrap!(=> storage::Error)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(tracerr::new!(storage::Error::from(Error::Io(e)))),
        }
    }
}

impl<T> Storage<Store<(Key, T)>> for FileStorage
where
    T: Serialize,
{
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Store((key, value)): Store<(Key, T)>,
    ) -> Result<Self::Ok, Self::Err> {
        let bytes = serde_json::to_vec(&value)
            .map_err(Error::Json)
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;

        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> storage::Error))
    }
}

/// [`FileStorage`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Filesystem error.
    #[display("filesystem operation failed: {_0}")]
    Io(io::Error),

    /// Persisted value failed to serialize or deserialize.
    #[display("JSON (de)serialization failed: {_0}")]
    Json(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Load, Store};

    use super::{FileStorage, Key};
    use crate::{domain::ContactedSet, infra::Storage as _};

    #[tokio::test]
    async fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let loaded: ContactedSet = storage
            .execute(Load(By::new(Key::LikedProperties)))
            .await
            .unwrap();

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn stored_value_survives_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let key = Key::ContactedLeads(crate::domain::lead::Kind::Agent);

        let mut contacted = ContactedSet::default();
        assert!(contacted.mark("l1".into()));
        assert!(contacted.mark("l2".into()));

        FileStorage::new(dir.path())
            .execute(Store((key, contacted.clone())))
            .await
            .unwrap();

        // A new instance stands in for an app restart.
        let loaded: ContactedSet = FileStorage::new(dir.path())
            .execute(Load(By::new(key)))
            .await
            .unwrap();

        assert_eq!(loaded, contacted);
    }

    #[tokio::test]
    async fn keys_are_isolated_and_overwritable() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let agents = Key::ContactedLeads(crate::domain::lead::Kind::Agent);
        let customers =
            Key::ContactedLeads(crate::domain::lead::Kind::Customer);

        let mut first = ContactedSet::default();
        assert!(first.mark("a1".into()));
        storage.execute(Store((agents, first))).await.unwrap();

        let mut second = ContactedSet::default();
        assert!(second.mark("a2".into()));
        storage
            .execute(Store((agents, second.clone())))
            .await
            .unwrap();

        let agents_set: ContactedSet =
            storage.execute(Load(By::new(agents))).await.unwrap();
        let customers_set: ContactedSet =
            storage.execute(Load(By::new(customers))).await.unwrap();

        assert_eq!(agents_set, second);
        assert!(customers_set.is_empty());
    }
}
