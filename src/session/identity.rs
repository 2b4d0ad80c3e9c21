use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;

/// Locally cached display identity of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

pub trait IdentityStore: Send + Sync {
    fn load(&self) -> Result<Identity, Error>;
    fn store(&self, identity: &Identity) -> Result<(), Error>;
    fn clear(&self) -> Result<(), Error>;
}

#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    identity: RwLock<Identity>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: RwLock::new(identity),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Identity, Error> {
        Ok(self
            .identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, identity: &Identity) -> Result<(), Error> {
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = identity.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = Identity::default();
        Ok(())
    }
}

/// Persists the identity as a small JSON document.
#[derive(Clone, Debug)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Identity, Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Identity::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, identity: &Identity) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(identity)?)?;
        debug!(path = %self.path.display(), "identity.stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
