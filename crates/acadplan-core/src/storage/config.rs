//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - How dates and percentages are displayed
//! - The label and color used for tasks whose subject was deleted
//! - The color given to new subjects
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Largest accepted `display.percentage_decimals`.
pub const MAX_PERCENTAGE_DECIMALS: u32 = 6;

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// chrono format string for due dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_percentage_decimals")]
    pub percentage_decimals: u32,
    /// Shown for tasks whose subject no longer exists
    #[serde(default = "default_fallback_subject_label")]
    pub fallback_subject_label: String,
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

/// Defaults for new subjects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectsConfig {
    #[serde(default = "default_subject_color")]
    pub default_color: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub subjects: SubjectsConfig,
}

fn default_date_format() -> String {
    "%d %B %Y".into()
}
fn default_percentage_decimals() -> u32 {
    1
}
fn default_fallback_subject_label() -> String {
    "No subject".into()
}
fn default_fallback_color() -> String {
    "#64748b".into()
}
fn default_subject_color() -> String {
    "#6366f1".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            percentage_decimals: default_percentage_decimals(),
            fallback_subject_label: default_fallback_subject_label(),
            fallback_color: default_fallback_color(),
        }
    }
}

impl DisplayConfig {
    /// Format a due date with `date_format`, or RFC 3339 if the format is invalid.
    pub fn format_date(&self, date: DateTime<Utc>) -> String {
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.date_format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return date.to_rfc3339();
        }
        date.format_with_items(items.into_iter()).to_string()
    }

    /// Decimal places for percentages, capped at [`MAX_PERCENTAGE_DECIMALS`]
    /// for hand-edited files.
    pub fn decimals(&self) -> usize {
        self.percentage_decimals.min(MAX_PERCENTAGE_DECIMALS) as usize
    }
}

impl Default for SubjectsConfig {
    fn default() -> Self {
        Self {
            default_color: default_subject_color(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// as the key's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        if next.display.percentage_decimals > MAX_PERCENTAGE_DECIMALS {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("must be at most {MAX_PERCENTAGE_DECIMALS}"),
            }
            .into());
        }
        *self = next;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
