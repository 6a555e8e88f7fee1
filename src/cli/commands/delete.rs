use std::io::{self, BufRead, Write};

use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::certificate::validate_common_name;
use crate::core::traits::directory::CertificateDirectory;

/// Execute the `certdeck delete <common-name>...` command.
///
/// One-shot rendition of the deletion workflow: confirm, fire one
/// request per name concurrently, report each outcome independently,
/// then re-read the collection to show where the server landed. A
/// failed name is a warning, not an error; the command still reports
/// the rest of the batch.
pub fn execute(
    directory: &dyn CertificateDirectory,
    common_names: &[String],
    yes: bool,
) -> Result<()> {
    for name in common_names {
        validate_common_name(name)?;
    }

    if !yes && !confirm(common_names)? {
        println!("  Aborted. Nothing was deleted.");
        return Ok(());
    }

    let report = directory.delete_batch(common_names);

    for name in report.deleted_names() {
        output::success(&format!("Deleted {name}"));
    }
    for (name, reason) in report.failures() {
        output::warning(&format!("Could not delete {name}: {reason}"));
    }

    // Reconcile with backend truth regardless of how many succeeded.
    let remaining = directory.fetch_all()?;
    println!(
        "\n  {} deleted, {} failed · {} certificates remain on the server",
        report.deleted_count(),
        report.failed_count(),
        remaining.len(),
    );
    Ok(())
}

/// Ask for confirmation on stdin. Default is No.
fn confirm(common_names: &[String]) -> Result<bool> {
    println!("  About to delete {} certificate(s):", common_names.len());
    for name in common_names {
        println!("    - {name}");
    }
    print!("  Proceed? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(matches!(input.trim(), "y" | "Y" | "yes"))
}
