//! # Session Persistence
//!
//! The only state that survives a restart: who is logged in and the display
//! theme. Everything else comes back from the seed data.
//!
//! ## Storage Keys
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ Key          │ Value                                                    │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ currentUser  │ JSON user record, removed on logout                      │
//! │ theme        │ "dark" or "light"; absent means light                    │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! A corrupt `currentUser` entry is logged and treated as logged out rather
//! than failing startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mesa_core::{User, UserRole};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PosConfig;
use crate::error::StateResult;
use crate::state::UserDirectory;

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const THEME_KEY: &str = "theme";

const SETTINGS_FILE: &str = "settings.json";

// =============================================================================
// Key-Value Stores
// =============================================================================

/// String key-value storage, shaped like browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StateResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StateResult<()>;
    fn remove(&mut self, key: &str) -> StateResult<()>;
}

/// In-process store. Nothing outlives the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StateResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StateResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StateResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A single JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens (or starts) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> StateResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            debug!(?path, "Settings file not found, starting empty");
            BTreeMap::new()
        };
        Ok(JsonFileStore { path, entries })
    }

    /// `settings.json` in the configured data directory.
    pub fn in_data_dir(config: &PosConfig) -> StateResult<Self> {
        Self::open(config.data_dir()?.join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StateResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StateResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StateResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StateResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Logged-in user and theme, written through to a [`KeyValueStore`].
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
    user: Option<User>,
    theme: Theme,
}

impl<S: KeyValueStore> Session<S> {
    /// Reads the saved user and theme.
    pub fn restore(store: S) -> StateResult<Self> {
        let user = match store.get(CURRENT_USER_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!(username = %user.username, "Session restored");
                    Some(user)
                }
                Err(e) => {
                    warn!("Ignoring saved user: {}", e);
                    None
                }
            },
            None => None,
        };

        let theme = match store.get(THEME_KEY)?.as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        };

        Ok(Session { store, user, theme })
    }

    /// Logs in by username and remembers the user.
    ///
    /// ## Errors
    /// - `UserNotFound` / `UserInactive` (as `StateError::Core`)
    /// - storage errors writing the session
    pub fn login(&mut self, users: &UserDirectory, username: &str) -> StateResult<&User> {
        let user = users.authenticate(username)?.clone();
        self.store
            .set(CURRENT_USER_KEY, &serde_json::to_string(&user)?)?;

        info!(username = %user.username, role = ?user.role, "User logged in");
        Ok(&*self.user.insert(user))
    }

    pub fn logout(&mut self) -> StateResult<()> {
        self.store.remove(CURRENT_USER_KEY)?;
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "User logged out");
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the logged-in user may act as `role`. Nobody logged in has no
    /// role.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(role))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark_mode(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn toggle_theme(&mut self) -> StateResult<Theme> {
        let next = self.theme.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        debug!(theme = next.as_str(), "Theme toggled");
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use crate::PosState;
    use mesa_core::CoreError;

    #[test]
    fn test_fresh_session() {
        let session = Session::restore(MemoryStore::new()).unwrap();
        assert!(!session.is_authenticated());
        assert!(!session.has_role(UserRole::Waiter));
        assert_eq!(session.theme(), Theme::Light);
    }

    #[test]
    fn test_login_writes_through() {
        let pos = PosState::seeded();
        let mut session = Session::restore(MemoryStore::new()).unwrap();

        let user = session.login(pos.users(), "cajero").unwrap();
        assert_eq!(user.role, UserRole::Cashier);
        assert!(session.has_role(UserRole::Cashier));
        assert!(!session.has_role(UserRole::Kitchen));

        let raw = session.store().get(CURRENT_USER_KEY).unwrap().unwrap();
        assert!(raw.contains("\"username\":\"cajero\""));

        session.logout().unwrap();
        assert!(session.store().get(CURRENT_USER_KEY).unwrap().is_none());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_login_failures() {
        let mut pos = PosState::seeded();
        let mut session = Session::restore(MemoryStore::new()).unwrap();

        assert!(matches!(
            session.login(pos.users(), "nadie"),
            Err(StateError::Core(CoreError::UserNotFound(_)))
        ));

        pos.toggle_user_status("4").unwrap();
        assert!(matches!(
            session.login(pos.users(), "chef"),
            Err(StateError::Core(CoreError::UserInactive(_)))
        ));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let pos = PosState::seeded();

        {
            let store = JsonFileStore::open(&path).unwrap();
            let mut session = Session::restore(store).unwrap();
            session.login(pos.users(), "admin").unwrap();
            assert_eq!(session.toggle_theme().unwrap(), Theme::Dark);
        }

        let session = Session::restore(JsonFileStore::open(&path).unwrap()).unwrap();
        assert_eq!(session.current_user().unwrap().username, "admin");
        assert!(session.is_dark_mode());
        assert!(session.has_role(UserRole::Host));
    }

    #[test]
    fn test_corrupt_user_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_USER_KEY, "{not json").unwrap();
        store.set(THEME_KEY, "dark").unwrap();

        let session = Session::restore(store).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.is_dark_mode());
    }

    #[test]
    fn test_corrupt_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[]").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(err.is_storage());
    }
}
