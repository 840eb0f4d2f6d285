//! Preparation and checking of colloscope sources.
//!
//! - [`normalizer`]: Rewrite spreadsheet exports in the native layout
//! - [`validator`]: Non-fatal data-quality report over a parsed colloscope

pub mod normalizer;
pub mod validator;

pub use normalizer::SpreadsheetNormalizer;
pub use validator::{ColloscopeValidator, ValidationReport, ValidationStats};
