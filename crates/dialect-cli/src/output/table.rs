//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use dialect::{Pack, SourcedRule};

/// Format packs as a table of id, label, parents and counts.
pub fn format_pack_table<'a>(packs: impl IntoIterator<Item = &'a Pack>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Pack", "Label", "Inherits", "Rules", "Protected"]);

    for pack in packs {
        table.add_row(vec![
            pack.id.clone(),
            pack.label.clone(),
            pack.inherits.join(", "),
            pack.rules.len().to_string(),
            pack.protected_terms.len().to_string(),
        ]);
    }

    table
}

/// Format an effective rule list in application order.
pub fn format_rule_table(rules: &[SourcedRule]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Pack", "Rule"]);

    for (index, sourced) in rules.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            format!("{}[{}]", sourced.pack_id, sourced.index_in_pack),
            sourced.rule.to_string(),
        ]);
    }

    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}
