//! Sorting and filtering of schedule entries.
//!
//! Nothing here reads the wall clock: [`upcoming`] takes the reference date
//! as a parameter.
//!
//! # Modules
//!
//! - [`sorting`]: Stable ordering by date, professor or group
//! - [`filtering`]: Group selection and upcoming sessions
//!
//! # Example
//!
//! ```no_run
//! use colloscope_engine::parsing::parse;
//! use colloscope_engine::transformations::{filter_by_group, sort_entries, SortKey};
//!
//! # fn example(source: &str) -> colloscope_engine::ColloscopeResult<()> {
//! let colloscope = parse(source)?;
//! let sorted = sort_entries(colloscope.entries(), SortKey::ByTime);
//! let mine = filter_by_group(&sorted, "3");
//! # Ok(())
//! # }
//! ```

pub mod filtering;
pub mod sorting;

pub use filtering::{filter_by_group, require_entries, upcoming};
pub use sorting::{sort_entries, SortKey};
