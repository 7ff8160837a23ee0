//! # Settings
//!
//! Caller preferences applied to every registry request: the default unit
//! system for unit-aware calculators, whether to attach charts and
//! recommendations, and whether JSON output is pretty-printed.
//!
//! Settings files are JSON. Missing fields take their defaults, so `{}` is a
//! valid settings file.
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::settings::Settings;
//! use bulkflow_core::units::UnitSystem;
//!
//! let settings: Settings = serde_json::from_str(r#"{"unit_system": "imperial"}"#).unwrap();
//! assert_eq!(settings.unit_system, UnitSystem::Imperial);
//! assert!(settings.include_chart);
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;

/// Request-wide preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Used when a unit-aware request omits `use_imperial`
    pub unit_system: UnitSystem,

    /// Attach a chart to responses from calculators that have one
    pub include_chart: bool,

    /// Attach advisory notes to responses
    pub include_recommendations: bool,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            unit_system: UnitSystem::Metric,
            include_chart: true,
            include_recommendations: true,
            pretty: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// * `FileError` - the file cannot be opened or read
    /// * `SerializationError` - the file is not valid settings JSON
    pub fn load(path: &Path) -> CalcResult<Settings> {
        let mut file = File::open(path)
            .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid settings in {}: {}", path.display(), e),
        })
    }

    /// Serialize a value as JSON, pretty or compact per `self.pretty`
    pub fn render<T: Serialize>(&self, value: &T) -> CalcResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env::temp_dir;
    use std::fs;
    use std::path::PathBuf;

    fn temp_settings_path(name: &str) -> PathBuf {
        temp_dir().join(format!("bulkflow_test_{}.json", name))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.unit_system, UnitSystem::Metric);
        assert!(settings.include_chart);
        assert!(settings.include_recommendations);
        assert!(settings.pretty);
    }

    #[test]
    fn test_empty_object_is_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file() {
        let path = temp_settings_path("partial");
        fs::write(&path, r#"{"unit_system": "imperial", "include_chart": false}"#).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(
            loaded,
            Settings {
                unit_system: UnitSystem::Imperial,
                include_chart: false,
                ..Settings::default()
            }
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = Settings::load(&temp_settings_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let path = temp_settings_path("bad_json");
        fs::write(&path, r#"{"unit_system": "cubits"}"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_render_respects_pretty() {
        let value = serde_json::json!({"a": 1});
        let compact = Settings {
            pretty: false,
            ..Settings::default()
        };
        assert_eq!(compact.render(&value).unwrap(), r#"{"a":1}"#);
        assert!(Settings::default().render(&value).unwrap().contains('\n'));
    }
}
