use std::time::Duration;

use futures::future::join_all;

use crate::core::errors::{CertdeckError, Result};
use crate::core::models::certificate::Certificate;
use crate::core::models::delete_report::{DeleteOutcome, DeleteReport};
use crate::core::traits::directory::CertificateDirectory;

/// REST adapter for the backend certificate directory.
///
/// Exposes a blocking API over a current-thread tokio runtime; the
/// runtime is built per call, so the adapter itself stays `Send` and
/// carries no live reactor between commands. The deletion batch is the
/// one place with genuine concurrent I/O: every DELETE is issued
/// without waiting for the others and the batch completes when all of
/// them have settled.
pub struct RestDirectory {
    base_url: String,
    timeout: Duration,
}

impl RestDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("certdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CertdeckError::ServerUnreachable {
                url: self.base_url.clone(),
                reason: format!("failed to create HTTP client: {e}"),
            })
    }

    fn runtime(&self) -> Result<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CertdeckError::ServerUnreachable {
                url: self.base_url.clone(),
                reason: format!("failed to create async runtime: {e}"),
            })
    }

    fn collection_url(&self) -> String {
        format!("{}/certificates", self.base_url)
    }

    fn record_url(&self, common_name: &str) -> String {
        format!("{}/certificates/{}", self.base_url, common_name)
    }
}

impl CertificateDirectory for RestDirectory {
    fn fetch_all(&self) -> Result<Vec<Certificate>> {
        let rt = self.runtime()?;
        rt.block_on(async {
            let client = self.build_client()?;
            let resp = client
                .get(self.collection_url())
                .send()
                .await
                .map_err(|e| CertdeckError::ServerUnreachable {
                    url: self.base_url.clone(),
                    reason: e.to_string(),
                })?;

            if !resp.status().is_success() {
                return Err(CertdeckError::FetchFailed {
                    status: resp.status().as_u16(),
                });
            }

            // Typed decode fails closed: a shape mismatch is a fetch
            // failure, never a partially-trusted payload.
            resp.json::<Vec<Certificate>>()
                .await
                .map_err(|e| CertdeckError::DecodeFailed {
                    detail: e.to_string(),
                })
        })
    }

    fn delete_batch(&self, common_names: &[String]) -> DeleteReport {
        let rt = match self.runtime() {
            Ok(rt) => rt,
            Err(e) => {
                // No runtime means no request was even attempted; every
                // name settles as failed with the same reason.
                let reason = e.to_string();
                return DeleteReport {
                    outcomes: common_names
                        .iter()
                        .map(|name| {
                            (
                                name.clone(),
                                DeleteOutcome::Failed {
                                    reason: reason.clone(),
                                },
                            )
                        })
                        .collect(),
                };
            }
        };

        rt.block_on(async {
            let client = match self.build_client() {
                Ok(client) => client,
                Err(e) => {
                    let reason = e.to_string();
                    return DeleteReport {
                        outcomes: common_names
                            .iter()
                            .map(|name| {
                                (
                                    name.clone(),
                                    DeleteOutcome::Failed {
                                        reason: reason.clone(),
                                    },
                                )
                            })
                            .collect(),
                    };
                }
            };

            // One independent request per name, all in flight at once.
            // Each settles on its own: a rejection never aborts or
            // rolls back the others.
            let requests = common_names.iter().map(|name| {
                let client = client.clone();
                let url = self.record_url(name);
                async move {
                    match client.delete(&url).send().await {
                        Ok(resp) if resp.status().is_success() => DeleteOutcome::Deleted,
                        Ok(resp) => DeleteOutcome::Failed {
                            reason: format!("server returned status {}", resp.status().as_u16()),
                        },
                        Err(e) => DeleteOutcome::Failed {
                            reason: e.to_string(),
                        },
                    }
                }
            });

            let outcomes = join_all(requests).await;
            DeleteReport {
                outcomes: common_names.iter().cloned().zip(outcomes).collect(),
            }
        })
    }

    fn generate(&self, common_name: &str, validity_days: u64) -> Result<()> {
        let rt = self.runtime()?;
        rt.block_on(async {
            let client = self.build_client()?;
            let resp = client
                .post(format!("{}/certificates/generate", self.base_url))
                .query(&[
                    ("commonName", common_name.to_string()),
                    ("validityDays", validity_days.to_string()),
                ])
                .send()
                .await
                .map_err(|e| CertdeckError::ServerUnreachable {
                    url: self.base_url.clone(),
                    reason: e.to_string(),
                })?;

            let status = resp.status();
            if status.is_success() {
                return Ok(());
            }

            // The backend returns plain-text error bodies; surface them.
            let body = resp.text().await.unwrap_or_default();
            let detail = if body.trim().is_empty() {
                format!("server returned status {}", status.as_u16())
            } else {
                format!("server returned status {}: {}", status.as_u16(), body.trim())
            };
            Err(CertdeckError::GenerateFailed { detail })
        })
    }
}
