//! Persistent configuration for tapwright.
//!
//! Timing and scroll budgets live in `~/.tapwright/config.json`. Every field
//! has a default, so a missing or partial file is fine.
//!
//! # Example
//!
//! ```no_run
//! use tapwright_core::config::AutomationConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = AutomationConfig::load();
//! println!("default wait: {:?}", config.default_timeout());
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";

/// Returns the tapwright home directory (`~/.tapwright/`), creating it if needed.
pub fn tapwright_dir() -> Option<PathBuf> {
    let dir = dirs::home_dir()?.join(".tapwright");
    std::fs::create_dir_all(&dir).ok();
    Some(dir)
}

/// Timing and scroll budgets for the automation helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// How long hard waits block before failing.
    pub default_timeout_ms: u64,
    /// Wait budget for taps.
    pub tap_timeout_ms: u64,
    /// Budget for soft presence checks (`is_present`) and for the wait
    /// `enter_text` makes before it falls back to scrolling.
    pub soft_check_timeout_ms: u64,
    /// Pause between two polls of the same selector.
    pub poll_interval_ms: u64,
    /// Drag+requery attempts before a scroll search gives up.
    pub max_scroll_attempts: u32,
    /// Half the drag distance of one scroll gesture, before clamping.
    pub scroll_gap: f64,
    /// Pause after each drag so the content can settle.
    pub scroll_settle_ms: u64,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 30_000,
            tap_timeout_ms: 20_000,
            soft_check_timeout_ms: 5_000,
            poll_interval_ms: 1_000,
            max_scroll_attempts: 20,
            scroll_gap: 100.0,
            scroll_settle_ms: 250,
        }
    }
}

impl AutomationConfig {
    /// Load config from `~/.tapwright/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        match tapwright_dir() {
            Some(dir) => Self::load_from(dir.join(CONFIG_FILENAME)),
            None => Self::default(),
        }
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(raw) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }

    /// Save config to `~/.tapwright/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        let dir = tapwright_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory")
        })?;
        self.save_to(dir.join(CONFIG_FILENAME))
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub fn tap_timeout(&self) -> Duration {
        Duration::from_millis(self.tap_timeout_ms)
    }

    pub fn soft_check_timeout(&self) -> Duration {
        Duration::from_millis(self.soft_check_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }
}
