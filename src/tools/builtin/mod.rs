//! Built-in tool registrations.
//!
//! Each submodule owns the schema and argument builder of a family of
//! tools; [`entries`] collects them for [`ToolCatalog::builtin`].
//!
//! [`ToolCatalog::builtin`]: crate::tools::catalog::ToolCatalog::builtin

mod recon;
mod scanners;
mod web;

use crate::tools::catalog::ToolEntry;
use crate::tools::tags;

/// Every built-in tool, including the remote tag fetch.
pub(crate) fn entries() -> Vec<ToolEntry> {
    let mut entries = Vec::new();
    entries.extend(web::entries());
    entries.extend(scanners::entries());
    entries.extend(recon::entries());
    entries.push(tags::entry());
    entries
}

/// Validate and synthesize through a single entry.
#[cfg(test)]
pub(crate) fn render(entry: &ToolEntry, args: serde_json::Value) -> crate::types::Result<String> {
    use crate::tools::catalog::ToolAction;

    let params = entry.validate(&args)?;
    match &entry.action {
        ToolAction::Command(spec) => Ok(spec.synthesize(&params)?.command),
        ToolAction::FetchTags => Err(crate::types::Error::synthesis("not a command tool")),
    }
}
