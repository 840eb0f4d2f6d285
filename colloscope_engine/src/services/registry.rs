//! Current colloscope of every class.
//!
//! Each class maps to an immutable [`Colloscope`] behind an `Arc`. A reload
//! parses the new source off to the side and only then swaps the pointer, so
//! readers holding the previous snapshot keep a consistent view and a failed
//! reload leaves the previous colloscope in place.

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ColloscopeConfig;
use crate::core::domain::Colloscope;
use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::io::loaders::{ColloscopeLoadResult, ColloscopeLoader, SourceLayout};
use crate::parsing::ParsePolicy;
use crate::services::checksum::calculate_checksum;

/// What a reload did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadOutcome {
    /// First colloscope for this class.
    Installed,
    /// A different source replaced the previous colloscope.
    Replaced,
    /// Same bytes as the current source; nothing was parsed.
    Unchanged,
}

/// A class's current colloscope with its source fingerprint.
#[derive(Debug, Clone)]
pub struct LoadedColloscope {
    pub colloscope: Arc<Colloscope>,
    pub layout: SourceLayout,
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
}

impl From<ColloscopeLoadResult> for LoadedColloscope {
    fn from(result: ColloscopeLoadResult) -> Self {
        Self {
            colloscope: Arc::new(result.colloscope),
            layout: result.layout,
            checksum: result.checksum,
            loaded_at: Utc::now(),
        }
    }
}

/// In-memory registry of class colloscopes.
#[derive(Clone, Default)]
pub struct ColloscopeRegistry {
    loader: ColloscopeLoader,
    classes: Arc<RwLock<HashMap<String, LoadedColloscope>>>,
}

/// Class names are matched case-insensitively.
fn class_key(class: &str) -> String {
    class.trim().to_ascii_uppercase()
}

impl ColloscopeRegistry {
    /// Create an empty registry parsing with `policy`.
    pub fn new(policy: ParsePolicy) -> Self {
        Self {
            loader: ColloscopeLoader::new(policy),
            classes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry and load every class listed in `config`.
    pub fn from_config(config: &ColloscopeConfig) -> Result<Self> {
        let registry = Self::new(config.parser.clone());
        registry.load_all(config)?;
        Ok(registry)
    }

    /// Load every configured class.
    ///
    /// All sources are parsed before any is installed: one bad source leaves
    /// the registry untouched.
    pub fn load_all(&self, config: &ColloscopeConfig) -> Result<usize> {
        let mut loaded = Vec::with_capacity(config.classes.len());
        for class in &config.classes {
            let result = self.loader.load_from_file(&class.path, class.layout)?;
            log::info!(
                "Loaded class {} from {} ({} sessions)",
                class.name,
                class.path.display(),
                result.colloscope.len()
            );
            loaded.push((class_key(&class.name), LoadedColloscope::from(result)));
        }

        let count = loaded.len();
        let mut classes = self.classes.write();
        classes.extend(loaded);
        Ok(count)
    }

    /// Replace the colloscope of `class` with one parsed from `source`.
    ///
    /// Identical bytes are detected by checksum and skipped. On error the
    /// current colloscope stays visible.
    pub fn reload(
        &self,
        class: &str,
        source: &[u8],
        layout: SourceLayout,
    ) -> ColloscopeResult<ReloadOutcome> {
        let key = class_key(class);
        let checksum = calculate_checksum(source);

        let unchanged = self
            .classes
            .read()
            .get(&key)
            .is_some_and(|current| current.checksum == checksum && current.layout == layout);
        if unchanged {
            log::info!("Class {} source unchanged, keeping current colloscope", key);
            return Ok(ReloadOutcome::Unchanged);
        }

        let result = self.loader.load_result(source, layout).map_err(|err| {
            log::warn!("Reload of class {} failed: {}", key, err);
            err
        })?;
        let sessions = result.colloscope.len();

        let previous = self
            .classes
            .write()
            .insert(key.clone(), LoadedColloscope::from(result));

        let outcome = match previous {
            Some(_) => ReloadOutcome::Replaced,
            None => ReloadOutcome::Installed,
        };
        log::info!("Class {} reloaded: {:?} ({} sessions)", key, outcome, sessions);
        Ok(outcome)
    }

    /// Snapshot of the current colloscope for `class`.
    pub fn current(&self, class: &str) -> ColloscopeResult<Arc<Colloscope>> {
        self.get(class).map(|loaded| loaded.colloscope)
    }

    /// Current colloscope of `class` with its source metadata.
    pub fn get(&self, class: &str) -> ColloscopeResult<LoadedColloscope> {
        self.classes
            .read()
            .get(&class_key(class))
            .cloned()
            .ok_or_else(|| ColloscopeError::UnknownClass(class.to_string()))
    }

    /// Names of the loaded classes, sorted.
    pub fn classes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}
