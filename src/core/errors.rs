/// All domain errors for certdeck.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum CertdeckError {
    #[error(
        "Could not reach the backend at {url}: {reason}\n\n  \
         Check that the server is running and the URL is correct.\n\n  \
         Solutions:\n    \
         → Pass the URL explicitly: certdeck --server http://host:port <command>\n    \
         → Or set it once: export CERTDECK_SERVER=http://host:port\n    \
         → Or write it to .certdeck/config.toml under [server]"
    )]
    ServerUnreachable { url: String, reason: String },

    #[error(
        "Certificate fetch failed: server returned status {status}\n\n  \
         The backend answered but refused the collection read.\n  \
         Check the server logs for details."
    )]
    FetchFailed { status: u16 },

    #[error(
        "Certificate fetch failed: unexpected response shape: {detail}\n\n  \
         The server's payload did not match the expected certificate schema.\n  \
         You may be pointing at the wrong endpoint, or the server version\n  \
         may be incompatible with this certdeck."
    )]
    DecodeFailed { detail: String },

    #[error("Certificate generation failed: {detail}")]
    GenerateFailed { detail: String },

    #[error(
        "Certificate '{common_name}' not found on the server\n\n  \
         Run 'certdeck list' to see the available certificates."
    )]
    CertificateNotFound { common_name: String },

    #[error(
        "Invalid common name '{common_name}': {detail}\n\n  \
         Common names are used as URL path segments and must not be empty\n  \
         or contain whitespace, slashes, or '..'."
    )]
    InvalidCommonName { common_name: String, detail: String },

    #[error("Page {requested} is out of range (valid: 1..={total_pages})")]
    PageOutOfRange { requested: usize, total_pages: usize },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CertdeckError>;
