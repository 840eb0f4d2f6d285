//! High-level data loading utilities.
//!
//! Loaders read a source file, normalize it when it comes from a spreadsheet
//! export, and parse it into a [`Colloscope`](crate::core::domain::Colloscope).
//! File errors carry the offending path through `anyhow` context.
//!
//! # Example
//!
//! ```no_run
//! use colloscope_engine::io::loaders::{ColloscopeLoader, SourceLayout};
//! use std::path::Path;
//!
//! let result = ColloscopeLoader::default()
//!     .load_from_file(Path::new("colloscope_mp2i.csv"), SourceLayout::Native)
//!     .expect("Failed to load");
//! println!("Loaded {} sessions", result.colloscope.len());
//! ```

pub mod loaders;


pub use loaders::{ColloscopeLoadResult, ColloscopeLoader, SourceLayout};
