use crate::cli::render;
use crate::core::errors::{CertdeckError, Result};
use crate::core::models::certificate::validate_common_name;
use crate::core::traits::directory::CertificateDirectory;

/// Execute the `certdeck show <common-name>` command.
pub fn execute(directory: &dyn CertificateDirectory, common_name: &str) -> Result<()> {
    validate_common_name(common_name)?;

    let certificates = directory.fetch_all()?;
    let cert = certificates
        .iter()
        .find(|c| c.common_name == common_name)
        .ok_or_else(|| CertdeckError::CertificateNotFound {
            common_name: common_name.to_string(),
        })?;

    render::detail_panel(cert);
    Ok(())
}
