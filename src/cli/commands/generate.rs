use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::certificate::validate_common_name;
use crate::core::traits::directory::CertificateDirectory;

/// Execute the `certdeck generate <common-name>` command.
///
/// Asks the backend to issue a new self-signed certificate. The server
/// owns issuance entirely; this side only names the subject and the
/// validity window.
pub fn execute(
    directory: &dyn CertificateDirectory,
    common_name: &str,
    days: u64,
) -> Result<()> {
    validate_common_name(common_name)?;

    directory.generate(common_name, days)?;
    output::success(&format!(
        "Certificate '{common_name}' generated (valid {days} days)"
    ));
    println!("  Run 'certdeck show {common_name}' to inspect it.");
    Ok(())
}
