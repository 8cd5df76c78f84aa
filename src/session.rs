//! Session token access
//!
//! The dashboard only ever reads the token. It is written by whatever performs the
//! login against the backend.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{SESSION_FILE, TOKEN_KEY};

/// Source of the bearer token
pub trait SessionProvider: Send + Sync {
    /// Current token, `None` when the user has not logged in
    fn token(&self) -> Option<String>;

    /// Where the user should look to fix a missing session
    fn location(&self) -> String;
}

/// Key/value session store kept as YAML in the config directory
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSession { path: path.into() }
    }

    /// Session file inside the given config directory
    pub fn in_dir(config_dir: &Path) -> Self {
        Self::new(config_dir.join(SESSION_FILE))
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable session file");
                None
            }
        }
    }
}

impl SessionProvider for FileSession {
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory session, mostly for tests
#[derive(Default)]
pub struct MemorySession {
    token: Option<String>,
}

impl MemorySession {
    pub fn with_token(token: impl Into<String>) -> Self {
        MemorySession {
            token: Some(token.into()),
        }
    }

    pub fn empty() -> Self {
        MemorySession::default()
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn location(&self) -> String {
        String::from("memory")
    }
}
