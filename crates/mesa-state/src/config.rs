//! # Configuration
//!
//! Restaurant-level settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MESA_STORE_NAME="La Terraza"                                       │
//! │     MESA_CURRENCY=EUR                                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/mesa-pos/config.toml (Linux)                             │
//! │     ~/Library/Application Support/com.mesa.pos/config.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Restaurante Mesa"
//! currency = "USD"
//!
//! [kitchen]
//! warning_after_minutes = 10
//! late_after_minutes = 20
//!
//! [storage]
//! data_dir = "/var/lib/mesa-pos"
//! ```

use directories::ProjectDirs;
use mesa_core::Currency;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StateError, StateResult};

const CONFIG_FILE: &str = "config.toml";

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Printed at the top of every invoice.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Display currency for prices and totals.
    #[serde(default)]
    pub currency: Currency,
}

fn default_store_name() -> String {
    "Restaurante Mesa".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency: Currency::default(),
        }
    }
}

// =============================================================================
// Kitchen Settings
// =============================================================================

/// Ticket age thresholds for the kitchen display colors.
///
/// ```text
///   0 ─────────── warning ─────────── late ─────────►  minutes
///      on time       │     delayed     │     late
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenSettings {
    #[serde(default = "default_warning_minutes")]
    pub warning_after_minutes: i64,

    #[serde(default = "default_late_minutes")]
    pub late_after_minutes: i64,
}

fn default_warning_minutes() -> i64 {
    10
}

fn default_late_minutes() -> i64 {
    20
}

impl Default for KitchenSettings {
    fn default() -> Self {
        KitchenSettings {
            warning_after_minutes: default_warning_minutes(),
            late_after_minutes: default_late_minutes(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Where `settings.json` lives. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PosConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub kitchen: KitchenSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl PosConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StateResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StateResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(StateError::NoProjectDirs)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> StateResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(StateError::InvalidConfig(
                "store.name must not be empty".into(),
            ));
        }

        let kitchen = &self.kitchen;
        if kitchen.warning_after_minutes <= 0 {
            return Err(StateError::InvalidConfig(
                "kitchen.warning_after_minutes must be greater than 0".into(),
            ));
        }
        if kitchen.late_after_minutes <= kitchen.warning_after_minutes {
            return Err(StateError::InvalidConfig(format!(
                "kitchen.late_after_minutes ({}) must be greater than warning_after_minutes ({})",
                kitchen.late_after_minutes, kitchen.warning_after_minutes
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `MESA_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("MESA_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(code) = lookup("MESA_CURRENCY") {
            match code.parse::<Currency>() {
                Ok(currency) => {
                    debug!(%currency, "Overriding currency from environment");
                    self.store.currency = currency;
                }
                Err(e) => warn!("Ignoring MESA_CURRENCY: {}", e),
            }
        }

        if let Some(minutes) = lookup("MESA_KITCHEN_WARNING_MINUTES") {
            match minutes.parse::<i64>() {
                Ok(m) => self.kitchen.warning_after_minutes = m,
                Err(_) => warn!(value = %minutes, "Ignoring MESA_KITCHEN_WARNING_MINUTES"),
            }
        }

        if let Some(minutes) = lookup("MESA_KITCHEN_LATE_MINUTES") {
            match minutes.parse::<i64>() {
                Ok(m) => self.kitchen.late_after_minutes = m,
                Err(_) => warn!(value = %minutes, "Ignoring MESA_KITCHEN_LATE_MINUTES"),
            }
        }

        if let Some(dir) = lookup("MESA_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "mesa", "pos")
    }

    /// Platform config file path.
    ///
    /// - **Linux**: `~/.config/pos/config.toml`
    /// - **macOS**: `~/Library/Application Support/com.mesa.pos/config.toml`
    /// - **Windows**: `%APPDATA%\mesa\pos\config\config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Directory holding the session store.
    pub fn data_dir(&self) -> StateResult<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StateError::NoProjectDirs)
    }
}
