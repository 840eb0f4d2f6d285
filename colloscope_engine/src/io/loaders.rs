use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::domain::Colloscope;
use crate::core::error::ColloscopeResult;
use crate::parsing::{ColloscopeParser, ParsePolicy};
use crate::preprocessing::SpreadsheetNormalizer;
use crate::services::checksum::calculate_checksum;

/// How a source file lays out its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLayout {
    /// Comma-delimited, descriptive columns first.
    #[default]
    Native,
    /// `;`-delimited spreadsheet export, normalized before parsing.
    Spreadsheet,
}

impl fmt::Display for SourceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLayout::Native => write!(f, "native"),
            SourceLayout::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

impl FromStr for SourceLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(SourceLayout::Native),
            "spreadsheet" => Ok(SourceLayout::Spreadsheet),
            other => Err(format!(
                "Invalid source layout: {}. Must be 'native' or 'spreadsheet'",
                other
            )),
        }
    }
}

/// Result of loading a colloscope source
#[derive(Debug)]
pub struct ColloscopeLoadResult {
    pub colloscope: Colloscope,
    pub layout: SourceLayout,
    /// SHA-256 of the raw source bytes.
    pub checksum: String,
}

/// Reads colloscope sources in either layout
#[derive(Debug, Clone, Default)]
pub struct ColloscopeLoader {
    parser: ColloscopeParser,
}

impl ColloscopeLoader {
    pub fn new(policy: ParsePolicy) -> Self {
        Self {
            parser: ColloscopeParser::new(policy),
        }
    }

    /// Load a colloscope from a file
    pub fn load_from_file(&self, path: &Path, layout: SourceLayout) -> Result<ColloscopeLoadResult> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read colloscope file: {}", path.display()))?;

        self.load_result(&bytes, layout)
            .with_context(|| format!("Failed to parse colloscope file: {}", path.display()))
    }

    /// Load a colloscope from raw bytes, keeping the source checksum
    pub fn load_result(&self, bytes: &[u8], layout: SourceLayout) -> ColloscopeResult<ColloscopeLoadResult> {
        let colloscope = self.load_from_bytes(bytes, layout)?;
        Ok(ColloscopeLoadResult {
            colloscope,
            layout,
            checksum: calculate_checksum(bytes),
        })
    }

    /// Load a colloscope from raw bytes
    pub fn load_from_bytes(&self, bytes: &[u8], layout: SourceLayout) -> ColloscopeResult<Colloscope> {
        match layout {
            SourceLayout::Native => self.parser.parse_bytes(bytes),
            SourceLayout::Spreadsheet => {
                let native = SpreadsheetNormalizer.normalize(bytes)?;
                self.parser.parse_str(&native)
            }
        }
    }

    /// Load a colloscope from a string
    pub fn load_from_str(&self, source: &str, layout: SourceLayout) -> ColloscopeResult<Colloscope> {
        self.load_from_bytes(source.as_bytes(), layout)
    }

    /// Rewrite a spreadsheet export as a native source file
    pub fn normalize_file(input: &Path, output: &Path) -> Result<()> {
        let bytes = std::fs::read(input)
            .with_context(|| format!("Failed to read spreadsheet export: {}", input.display()))?;

        let native = SpreadsheetNormalizer
            .normalize(&bytes)
            .with_context(|| format!("Failed to normalize spreadsheet export: {}", input.display()))?;

        std::fs::write(output, native)
            .with_context(|| format!("Failed to write colloscope file: {}", output.display()))
    }
}
