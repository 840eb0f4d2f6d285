//! Export pipeline for one group.

use crate::core::domain::Colloscope;
use crate::core::error::ColloscopeResult;
use crate::export::{render, ExportFormat, ExportOptions, RenderedExport};
use crate::transformations::{filter_by_group, require_entries, sort_entries, SortKey};

/// Export the sessions of `group`: sorted by date, filtered, rendered.
///
/// Fails with `EmptyResult` when the group has no session, instead of
/// rendering an empty document.
pub fn export_for_group(
    colloscope: &Colloscope,
    group: &str,
    format: ExportFormat,
    options: &ExportOptions,
) -> ColloscopeResult<RenderedExport> {
    let sorted = sort_entries(colloscope.entries(), SortKey::ByTime);
    let entries = require_entries(filter_by_group(&sorted, group), group)?;

    log::info!(
        "Exporting {} sessions of group {} as {}",
        entries.len(),
        group,
        format
    );
    render(&entries, format, group, colloscope.holidays(), options)
}
