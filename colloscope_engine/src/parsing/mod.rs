//! Parsers for colloscope source tables.
//!
//! A colloscope table is plain comma-delimited text. Its first five columns
//! describe a recurring session (subject, professor, weekday, hour, classroom)
//! and every later column is a week: the cell holds the group attending that
//! session that week.
//!
//! # Modules
//!
//! - [`colloscope_parser`]: Row scanning and entry emission
//! - [`header`]: Week and holiday column classification
//! - [`record`]: Fixed-width decoding of the descriptive columns
//! - [`policy`]: Blank-row and holiday-anchor policies
//!
//! # Example
//!
//! ```no_run
//! use colloscope_engine::parsing::{ColloscopeParser, ParsePolicy};
//!
//! let source = std::fs::read("colloscope_mpsi.csv").expect("Failed to read source");
//! let colloscope = ColloscopeParser::new(ParsePolicy::default())
//!     .parse_bytes(&source)
//!     .expect("Failed to parse colloscope");
//! println!("{} sessions", colloscope.len());
//! ```

pub mod colloscope_parser;
pub mod header;
pub mod policy;
pub mod record;


pub use colloscope_parser::{parse, ColloscopeParser};
pub use header::{ColumnKind, HeaderLayout, FIXED_COLUMNS};
pub use policy::{BlankRowPolicy, HolidayAnchor, ParsePolicy};
pub use record::DecodedRow;
