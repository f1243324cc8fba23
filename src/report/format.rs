//! Format the run summary as text.

use crate::report::types::PackageSummary;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format the summary as human-readable text.
pub fn format_summary_text(summary: &PackageSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Installer Tables")));
    out.push_str(&format!("  Program directory: {}\n", summary.program_dir));
    if !summary.id_prefix.is_empty() {
        out.push_str(&format!("  Identifier prefix: {}\n", summary.id_prefix));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Table", "Rows"]);
    for row in &summary.tables {
        table.add_row(vec![row.table.clone(), row.rows.to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("{}\n\n", format_section_heading("Roots")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Root", "Kind", "Directories"]);
    for root in &summary.roots {
        let kind = if root.primary { "primary" } else { "named" };
        table.add_row(vec![
            root.name.clone(),
            kind.to_string(),
            root.directories.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    if summary.renamed_files > 0 {
        out.push_str(&format!("Renamed {} files.\n", summary.renamed_files));
    }
    out.push_str(&format!("Wrote {} files.\n", summary.written.len()));
    out
}
