//! Service layer for orchestration.
//!
//! Services sit between the caller (a command handler or the CLI) and the
//! parsing/export building blocks: they hold the current colloscope of every
//! class and chain filtering, sorting and rendering for one request.

pub mod checksum;
pub mod digest;
pub mod exports;
pub mod registry;

pub use checksum::calculate_checksum;
pub use digest::upcoming_digest;
pub use exports::export_for_group;
pub use registry::{ColloscopeRegistry, LoadedColloscope, ReloadOutcome};
