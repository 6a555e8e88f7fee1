use colored::Colorize;

use crate::core::models::certificate::Certificate;
use crate::core::services::view_state::{HeaderState, ViewState};

/// Glyph for the select-all header checkbox (tri-state).
pub fn header_glyph(state: HeaderState) -> &'static str {
    match state {
        HeaderState::Checked => "[x]",
        HeaderState::Unchecked => "[ ]",
        HeaderState::Indeterminate => "[~]",
    }
}

/// Print the current page of the collection as a table.
///
/// Rows are numbered 1..=n within the page; the number is the handle
/// the browse commands use to address a row. The focused row is
/// highlighted, selected rows carry a checkmark in the checkbox
/// column.
pub fn table(state: &ViewState) {
    let rows = state.page_slice();
    if rows.is_empty() {
        println!("  {}", "No certificates on this page.".dimmed());
        return;
    }

    let name_width = rows
        .iter()
        .map(|c| c.common_name.len())
        .max()
        .unwrap_or(0)
        .max("Common Name".len());

    let focused_name = state.focused().map(|c| c.common_name.clone());

    // Pad before coloring: ANSI escapes would throw the widths off.
    let header = format!(
        "    # {}  {:<name_width$}  {:<10}  {:<10}",
        header_glyph(state.header_state()),
        "Common Name",
        "Valid From",
        "Valid To",
    );
    println!("{}", header.bold());

    for (i, cert) in rows.iter().enumerate() {
        let mark = if state.is_selected(&cert.common_name) {
            "[x]"
        } else {
            "[ ]"
        };
        let line = format!(
            "  {:>2} {}  {:<name_width$}  {}  {}",
            i + 1,
            mark,
            cert.common_name,
            cert.valid_from.format("%Y-%m-%d"),
            cert.valid_to.format("%Y-%m-%d"),
        );
        if focused_name.as_deref() == Some(cert.common_name.as_str()) {
            println!("{}", line.bold().blue());
        } else {
            println!("{line}");
        }
    }
}

/// Print the "Page X of Y" footer.
pub fn pagination_footer(state: &ViewState) {
    println!(
        "\n  Page {} of {} · {} certificates · {} selected",
        state.current_page(),
        state.total_pages().max(1),
        state.len(),
        state.selection().len(),
    );
}

/// Print the full detail panel for one certificate.
pub fn detail_panel(cert: &Certificate) {
    println!("\n{}", "  Certificate Details".bold());
    print_field("Common Name", &cert.common_name);
    print_field("Issuer", &cert.issuer);
    print_field(
        "Valid From",
        &cert.valid_from.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    print_field(
        "Valid To",
        &cert.valid_to.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    print_field("Serial Number", &cert.serial_number);
    print_field("Version", &cert.version.to_string());
    print_field("Signature Algorithm", &cert.signature_algorithm);
    println!("  {}:", "Public Key".dimmed());
    for line in cert.public_key.lines() {
        println!("    {line}");
    }
}

fn print_field(label: &str, value: &str) {
    println!("  {}: {}", label.dimmed(), value);
}
