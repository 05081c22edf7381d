use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Engine policy knobs. Product decisions the builders leave open live here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Clear validation keys that do not apply to an item's new type when it
    /// is retyped. Off by default: stale keys are kept but ignored.
    #[serde(default)]
    pub purge_stale_validation: bool,
    /// Reject quizzes whose end date precedes their start date.
    #[serde(default = "default_true")]
    pub enforce_date_order: bool,
    /// Days used for a `custom` quiz frequency saved without an interval.
    #[serde(default = "default_custom_days")]
    pub custom_frequency_fallback_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            purge_stale_validation: false,
            enforce_date_order: true,
            custom_frequency_fallback_days: default_custom_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_custom_days() -> u32 {
    1
}

/// Load a config file, returning defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<EngineConfig, CoreError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EngineConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse config JSON, running migrations before deserializing.
pub fn parse_config(contents: &str) -> Result<EngineConfig, CoreError> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    // Versions past u32 saturate so they are reported as unsupported.
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let config: EngineConfig = serde_json::from_value(migrated)?;
    if config.custom_frequency_fallback_days == 0 {
        return Err(CoreError::InvalidConfig(
            "custom_frequency_fallback_days must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedConfigVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: the quiz policy keys did not exist; pin them to the old behaviour.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::InvalidConfig("config is not a JSON object".to_string()))?;
        obj.entry("enforce_date_order")
            .or_insert(serde_json::Value::Bool(false));
        obj.entry("custom_frequency_fallback_days")
            .or_insert(serde_json::Value::Number(1.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added quiz policy keys)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &EngineConfig) -> Result<(), CoreError> {
    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    write_json_atomic(path, &stamped)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Write `value` as pretty JSON next to `path`, then rename over it.
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), CoreError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
