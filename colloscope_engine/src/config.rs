//! Engine configuration file support.
//!
//! This module reads the engine configuration (parse policy, export settings
//! and the list of classes) from a TOML file. The resulting struct is passed
//! explicitly to whatever needs it; there is no global configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::export::ExportOptions;
use crate::io::loaders::SourceLayout;
use crate::parsing::ParsePolicy;

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "COLLOSCOPE_CONFIG";

/// Engine configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColloscopeConfig {
    #[serde(default)]
    pub parser: ParsePolicy,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub classes: Vec<ClassSource>,
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(flatten)]
    pub options: ExportOptions,
    /// Maximum number of sessions listed by the upcoming digest.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

/// One class and where its colloscope lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSource {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub layout: SourceLayout,
}

fn default_upcoming_limit() -> usize {
    12
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            options: ExportOptions::default(),
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

impl ColloscopeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative class paths are resolved against the directory holding the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ColloscopeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ColloscopeError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        log::debug!(
            "Loaded configuration from {} ({} classes)",
            path.display(),
            config.classes.len()
        );
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ColloscopeResult<Self> {
        let config: ColloscopeConfig = toml::from_str(content).map_err(|e| {
            ColloscopeError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Uses `COLLOSCOPE_CONFIG` when set, otherwise searches for
    /// `colloscope.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ColloscopeResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(path);
        }

        let search_paths = vec![
            PathBuf::from("colloscope.toml"),
            PathBuf::from("config/colloscope.toml"),
            PathBuf::from("../colloscope.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ColloscopeError::Configuration(
            "No colloscope.toml found in standard locations".to_string(),
        ))
    }

    /// Source of the class named `name`, matched case-insensitively.
    pub fn class(&self, name: &str) -> Option<&ClassSource> {
        self.classes
            .iter()
            .find(|class| class.name.eq_ignore_ascii_case(name))
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|class| class.name.as_str()).collect()
    }

    fn check(&self) -> ColloscopeResult<()> {
        for (index, class) in self.classes.iter().enumerate() {
            if class.name.trim().is_empty() {
                return Err(ColloscopeError::Configuration(format!(
                    "classes[{}] has an empty name",
                    index
                )));
            }
            let duplicates = self.classes[..index]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&class.name));
            if duplicates {
                return Err(ColloscopeError::Configuration(format!(
                    "class '{}' is declared more than once",
                    class.name
                )));
            }
        }

        if self.parser.holiday_sentinels.is_empty() {
            log::warn!("No holiday sentinel configured, holiday columns will not be recognized");
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for class in &mut self.classes {
            if class.path.is_relative() {
                class.path = base.join(&class.path);
            }
        }
    }
}
