//! CLI output: table presentation for error report records.

use crate::ledger::ErrorRecord;
use comfy_table::Table;

/// Render ledger records the way `read_err_report` prints them.
pub fn render_report_table(records: &[ErrorRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Timestamp", "Type", "Message"]);
    for record in records {
        table.add_row(vec![
            &record.timestamp,
            &record.error_type,
            &record.message,
        ]);
    }
    table.to_string()
}
