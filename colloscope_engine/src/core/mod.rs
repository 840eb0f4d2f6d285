//! Core domain models for colloscopes.
//!
//! This module defines the fundamental data structures used throughout the engine,
//! representing schedule entries, holiday markers, and the error taxonomy.

pub mod domain;
pub mod error;

pub use domain::{Colloscope, HolidayMarker, ScheduleEntry, Weekday};
pub use error::{ColloscopeError, ColloscopeResult};
