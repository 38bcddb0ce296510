use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rules::RuleSet;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub slot: SlotConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Terminal log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Append every decision to the decision log file.
    #[serde(default)]
    pub log_decisions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_decisions: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".into()
}

/// Options a replication session is started with, in source order.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SlotConfig {
    #[serde(default)]
    pub options: Vec<SlotOption>,
}

/// One `name [value]` session option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlotOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl SlotOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    slot: SlotOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    log_level: Option<String>,
    log_decisions: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct SlotOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    options: Vec<SlotOption>,
}

// ── Merge logic ──

/// Merge user options into the defaults.
/// In replace mode: user options replace the defaults entirely.
/// Otherwise they are appended. Repeats are kept: option order is rule order.
fn merge_options(base: &mut Vec<SlotOption>, add: Vec<SlotOption>, replace: bool) {
    if replace {
        *base = add;
    } else {
        base.extend(add);
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/tablegate/config.toml (if exists)
    ///
    /// A missing home overlay is fine; an unreadable or malformed one is an
    /// error, since falling back to the defaults would emit every relation.
    pub fn load() -> Result<Self> {
        let mut config = Self::default_config();
        if let Some(path) = Self::overlay_path()
            && let Some(overlay) = Self::read_overlay(&path, false)?
        {
            config.apply_overlay(overlay);
        }
        Ok(config)
    }

    /// Load the defaults plus the overlay at `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::read_overlay(path, true)? {
            config.apply_overlay(overlay);
        }
        Ok(config)
    }

    fn overlay_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join(".config/tablegate/config.toml"))
    }

    /// Read and parse an overlay. `Ok(None)` only for a missing optional file.
    fn read_overlay(path: &Path, required: bool) -> Result<Option<ConfigOverlay>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        if let Some(v) = overlay.settings.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = overlay.settings.log_decisions {
            self.settings.log_decisions = v;
        }

        let s = overlay.slot;
        merge_options(&mut self.slot.options, s.options, s.replace);
    }

    /// Build the session rule set from the configured options.
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::from_options(
            self.slot
                .options
                .iter()
                .map(|o| (o.name.as_str(), o.value.as_deref())),
        )
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
