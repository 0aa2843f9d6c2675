//! Human-readable summaries for CLI output.

use crate::aggregate::AggregateSummary;
use crate::collate::NodeMap;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// One titled block of a collation summary.
#[derive(Debug, Clone)]
pub struct CollationSection {
    pub title: String,
    pub nodes: NodeMap,
}

impl CollationSection {
    pub fn new(title: impl Into<String>, nodes: NodeMap) -> Self {
        Self {
            title: title.into(),
            nodes,
        }
    }
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// One table per section: node name, recognized files, child count.
pub fn format_collation_text(sections: &[CollationSection]) -> String {
    let mut out = String::new();
    for section in sections {
        out.push_str(&format!("{}\n\n", format_section_heading(&section.title)));
        if section.nodes.is_empty() {
            out.push_str("  No entries found\n\n");
            continue;
        }
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Node", "Files", "Children"]);
        for node in section.nodes.values() {
            let files = node.data.keys().cloned().collect::<Vec<_>>().join(", ");
            table.add_row(vec![
                node.name.clone(),
                files,
                node.children.len().to_string(),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }
    out
}

pub fn format_aggregate_summary_text(summary: &AggregateSummary) -> String {
    let mut out = format!(
        "Wrote {} results ({} new) to {}",
        summary.total,
        summary.added,
        summary.output_path.display()
    );
    if summary.skipped > 0 {
        out.push_str(&format!("\n  Skipped (already present): {}", summary.skipped));
    }
    if summary.errors > 0 {
        out.push_str(&format!("\n  Unreadable results: {}", summary.errors));
    }
    out
}
