use crate::core::errors::Result;
use crate::core::models::certificate::Certificate;
use crate::core::models::delete_report::DeleteReport;


/// Port for the backend certificate directory.
///
/// Implementations live in `adapters::http` (e.g. RestDirectory).
/// The core layer only depends on this trait, never on a concrete
/// transport.
pub trait CertificateDirectory {
    /// Read the full collection. Returns every certificate the backend
    /// currently holds; callers replace their snapshot wholesale.
    fn fetch_all(&self) -> Result<Vec<Certificate>>;

    /// Delete the given names, one independent request per name, all
    /// issued concurrently. Never fails as a whole: each name settles
    /// on its own and the report carries every per-name outcome.
    fn delete_batch(&self, common_names: &[String]) -> DeleteReport;

    /// Ask the backend to issue a new self-signed certificate.
    ///
    /// Success is judged by status alone; the response body shape has
    /// varied across backend versions and is not relied upon.
    fn generate(&self, common_name: &str, validity_days: u64) -> Result<()>;
}
