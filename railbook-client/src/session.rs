//! Session token storage.
//!
//! The token is issued by a login flow outside this crate. The client only
//! reads it before each request and clears it when the server answers 401.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::SessionError;

/// Holds the opaque session token.
///
/// `clear` must be idempotent: overlapping calls that each see a 401 will
/// each clear the store.
pub trait SessionStore: Send + Sync {
    /// The current token, if any.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the backing storage cannot be read.
    fn get(&self) -> Result<Option<String>, SessionError>;

    /// Replace the token.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the backing storage cannot be written.
    fn set(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the token. Succeeds when there is none.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.read().map_err(|_| SessionError::Poisoned)?.clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        *self.token.write().map_err(|_| SessionError::Poisoned)? = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.token.write().map_err(|_| SessionError::Poisoned)?.take();
        Ok(())
    }
}

/// Token persisted in a single file, surviving restarts.
///
/// A missing or blank file means no token.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the token at `path`; the file is created on first `set`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io { path: self.path.clone(), source }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, token).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
