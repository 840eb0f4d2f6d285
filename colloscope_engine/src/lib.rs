//! # Colloscope Engine
//!
//! Parsing and export of preparatory-class oral examination timetables.
//!
//! A colloscope is a grid: each row describes one recurring slot (subject,
//! professor, weekday, hour, classroom) and each further column is a week,
//! whose cells name the group that attends the slot that week. This crate
//! turns such a table into dated sessions, answers per-group queries on them
//! and renders them in four output formats.
//!
//! ## Features
//!
//! - **Parsing**: Native comma-delimited sources, with holiday columns and row-level errors
//! - **Preprocessing**: Spreadsheet export normalization and data-quality checks
//! - **Transformations**: Group filtering, upcoming sessions and stable sorting
//! - **Export**: Paginated PDF document, plain table, calendar import and task list
//! - **Services**: Per-class registry with atomic reload, export and digest pipelines
//!
//! ## Architecture
//!
//! - [`core`]: Domain types and the crate error
//! - [`time`]: Hour fields and localized dates
//! - [`parsing`]: Source table parser and its policy
//! - [`preprocessing`]: Normalizer and validator
//! - [`transformations`]: Filtering and sorting
//! - [`export`]: Output renderers
//! - [`io`]: File loading
//! - [`services`]: Registry, export pipeline and digest
//! - [`config`]: TOML configuration
//!
//! ## Example
//!
//! ```
//! use colloscope_engine::export::{ExportFormat, ExportOptions};
//! use colloscope_engine::parsing::parse;
//! use colloscope_engine::services::export_for_group;
//!
//! # fn main() -> colloscope_engine::ColloscopeResult<()> {
//! let colloscope = parse("s,p,w,h,c,30/09/24\nMaths,M. X,mardi,14h,B204,2\n")?;
//! let export = export_for_group(&colloscope, "2", ExportFormat::Table, &ExportOptions::default())?;
//! assert_eq!(
//!     export.as_text().unwrap(),
//!     "date,time,professor,classroom,subject\n01/10/2024,14:00,M. X,B204,Maths\n"
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod export;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod time;
pub mod transformations;

pub use crate::config::ColloscopeConfig;
pub use crate::core::{Colloscope, ColloscopeError, ColloscopeResult, HolidayMarker, ScheduleEntry, Weekday};
pub use crate::export::{ExportFormat, ExportOptions, RenderedExport};
pub use crate::services::ColloscopeRegistry;
