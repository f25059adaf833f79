//! JSON export: the items verbatim plus export metadata.

use serde::Serialize;
use whiteboard_core::{Item, Snapshot};

use crate::format::ExportResult;

/// Version tag written into every JSON export.
pub const EXPORT_VERSION: &str = "1.0";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    items: &'a [Item],
    export_date: &'a str,
    version: &'static str,
}

/// Pretty-printed `{items, exportDate, version}` document.
pub fn to_json(snapshot: &Snapshot, exported_at: &str) -> ExportResult<String> {
    let document = ExportDocument {
        items: &snapshot.items,
        export_date: exported_at,
        version: EXPORT_VERSION,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
