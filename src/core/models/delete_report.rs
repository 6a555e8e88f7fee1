/// Terminal outcome of a single delete request within a batch.
///
/// A batch never fails as a whole: each name settles independently and
/// a failure here is data to report, not an error to propagate.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The server confirmed the deletion with a 2xx status.
    Deleted,
    /// Non-2xx status or transport-level rejection for this name only.
    Failed { reason: String },
}

/// Settled outcomes of one deletion batch, in request order.
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    pub outcomes: Vec<(String, DeleteOutcome)>,
}

impl DeleteReport {
    /// Names whose deletion the server confirmed.
    pub fn deleted_names(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == DeleteOutcome::Deleted)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Names that failed, with the per-name reason.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|(name, o)| match o {
                DeleteOutcome::Failed { reason } => Some((name.as_str(), reason.as_str())),
                DeleteOutcome::Deleted => None,
            })
            .collect()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_names().len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().len()
    }
}
