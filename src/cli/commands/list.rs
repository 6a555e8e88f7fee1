use crate::cli::render;
use crate::core::errors::{CertdeckError, Result};
use crate::core::services::view_state::ViewState;
use crate::core::traits::directory::CertificateDirectory;

/// Execute the `certdeck list` command.
///
/// One-shot rendition of the table view: fetch, paginate, print the
/// requested page. An out-of-range page is an error here rather than a
/// silent no-op: a script asking for page 9 of 3 should hear about it.
pub fn execute(directory: &dyn CertificateDirectory, page: usize) -> Result<()> {
    let mut state = ViewState::new();
    state.replace_collection(directory.fetch_all()?);

    if state.is_empty() {
        println!("  No certificates on the server.");
        return Ok(());
    }

    if !state.go_to_page(page) {
        return Err(CertdeckError::PageOutOfRange {
            requested: page,
            total_pages: state.total_pages(),
        });
    }

    render::table(&state);
    render::pagination_footer(&state);
    Ok(())
}
