use std::collections::BTreeSet;

use crate::core::models::certificate::Certificate;
use crate::core::models::delete_report::DeleteReport;

/// Rows shown per page. Fixed by design, not configurable.
pub const PAGE_SIZE: usize = 10;

/// Display state of the select-all header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// Every row on the current page is selected.
    Checked,
    /// No row on the current page is selected (or the page is empty).
    Unchecked,
    /// Some but not all rows on the current page are selected.
    Indeterminate,
}

/// Phase of the destructive-action gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteFlow {
    Idle,
    /// A confirmation is pending. Only reachable with a non-empty
    /// selection; confirm or cancel both return to `Idle`.
    ConfirmPending,
}

/// The collection view-state controller.
///
/// Owns the fetched collection snapshot, the derived pagination cursor,
/// the selection set, the focused record, and the confirmation gate for
/// batch deletion. All mutation goes through the named transition
/// methods below; callers never reach into the fields. The struct is
/// plain synchronous state; the surrounding event loop serializes
/// every transition, so no interior locking is needed.
#[derive(Debug)]
pub struct ViewState {
    certificates: Vec<Certificate>,
    /// Set on fetch failure. Takes precedence over the collection: the
    /// last good snapshot is discarded, never shown stale.
    error: Option<String>,
    /// Selected common names, independent of pagination. Survives
    /// collection replacement; pruned only by confirmed deletions.
    selection: BTreeSet<String>,
    /// Common name of the record open in the detail panel, if any.
    focus: Option<String>,
    /// 1-based. Invariant: `1 <= current_page <= max(1, total_pages)`.
    current_page: usize,
    delete_flow: DeleteFlow,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            certificates: Vec::new(),
            error: None,
            selection: BTreeSet::new(),
            focus: None,
            current_page: 1,
            delete_flow: DeleteFlow::Idle,
        }
    }

    // ─── Fetch reconciliation ───────────────────────────────────

    /// Replace the collection wholesale after a successful fetch.
    ///
    /// Clears any previous error. The page is clamped back into range
    /// if the collection shrank. Focus survives only if the focused
    /// name still exists in the new snapshot; clamping the page here is
    /// reconciliation, not user navigation, so it does not clear an
    /// otherwise-valid focus. The selection set is left untouched.
    pub fn replace_collection(&mut self, certificates: Vec<Certificate>) {
        self.certificates = certificates;
        self.error = None;
        self.current_page = self.current_page.min(self.max_page());
        if let Some(name) = &self.focus {
            if !self.contains(name) {
                self.focus = None;
            }
        }
    }

    /// Enter the blocking fetch-error state.
    ///
    /// The last good collection is discarded, focus is dropped with it,
    /// and a pending confirmation is cancelled. The selection set is
    /// kept so a recovering poll restores the user's checkmarks.
    pub fn set_error(&mut self, message: String) {
        self.certificates.clear();
        self.error = Some(message);
        self.focus = None;
        self.current_page = 1;
        self.delete_flow = DeleteFlow::Idle;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ─── Pagination ─────────────────────────────────────────────

    pub fn total_pages(&self) -> usize {
        self.certificates.len().div_ceil(PAGE_SIZE)
    }

    /// Upper bound for the page cursor: at least 1 even when empty.
    fn max_page(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The records visible on the current page, in fetch order.
    pub fn page_slice(&self) -> &[Certificate] {
        let start = (self.current_page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.certificates.len());
        if start >= self.certificates.len() {
            &[]
        } else {
            &self.certificates[start..end]
        }
    }

    /// Bounds-checked navigation. A request outside `[1, total_pages]`
    /// is fully inert: the page is retained and focus is NOT cleared.
    /// Successful navigation always clears focus.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        self.focus = None;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        // current_page is at least 1, so this wraps to 0 and is
        // rejected rather than underflowing.
        self.go_to_page(self.current_page.wrapping_sub(1))
    }

    // ─── Selection ──────────────────────────────────────────────

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn is_selected(&self, common_name: &str) -> bool {
        self.selection.contains(common_name)
    }

    /// Add the name if absent, remove it if present.
    pub fn toggle_selection(&mut self, common_name: &str) {
        if !self.selection.remove(common_name) {
            self.selection.insert(common_name.to_string());
        }
    }

    /// Header-checkbox bulk operation, scoped to the current page.
    ///
    /// Enabling unions the page's names into the set; disabling
    /// subtracts exactly the page's names. Selections made on other
    /// pages are preserved either way.
    pub fn select_all_on_page(&mut self, checked: bool) {
        let page_names: Vec<String> = self
            .page_slice()
            .iter()
            .map(|c| c.common_name.clone())
            .collect();
        for name in page_names {
            if checked {
                self.selection.insert(name);
            } else {
                self.selection.remove(&name);
            }
        }
    }

    /// Tri-state predicate driving the header checkbox display.
    pub fn header_state(&self) -> HeaderState {
        let page = self.page_slice();
        let selected = page.iter().filter(|c| self.is_selected(&c.common_name)).count();
        if page.is_empty() || selected == 0 {
            HeaderState::Unchecked
        } else if selected == page.len() {
            HeaderState::Checked
        } else {
            HeaderState::Indeterminate
        }
    }

    // ─── Focus (detail panel) ───────────────────────────────────

    /// Toggle the detail panel: the focused name clears focus, any
    /// other name takes it. Selection changes never pass through here.
    pub fn toggle_focus(&mut self, common_name: &str) {
        if self.focus.as_deref() == Some(common_name) {
            self.focus = None;
        } else {
            self.focus = Some(common_name.to_string());
        }
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// The record open in the detail panel, if any.
    pub fn focused(&self) -> Option<&Certificate> {
        let name = self.focus.as_deref()?;
        self.certificates.iter().find(|c| c.common_name == name)
    }

    // ─── Deletion workflow ──────────────────────────────────────

    pub fn delete_flow(&self) -> DeleteFlow {
        self.delete_flow
    }

    /// `Idle → ConfirmPending`, only when the selection is non-empty.
    /// Returns whether the transition happened; with an empty selection
    /// the trigger is a no-op and state is unchanged.
    pub fn request_delete(&mut self) -> bool {
        if self.delete_flow == DeleteFlow::Idle && !self.selection.is_empty() {
            self.delete_flow = DeleteFlow::ConfirmPending;
            true
        } else {
            false
        }
    }

    /// `ConfirmPending → Idle` with no side effects.
    pub fn cancel_delete(&mut self) {
        self.delete_flow = DeleteFlow::Idle;
    }

    /// Confirm the pending deletion: closes the gate immediately and
    /// returns the names to delete, in selection order. The gate does
    /// not stay open while the batch is in flight. Returns an empty
    /// list when no confirmation was pending.
    pub fn confirm_delete(&mut self) -> Vec<String> {
        if self.delete_flow != DeleteFlow::ConfirmPending {
            return Vec::new();
        }
        self.delete_flow = DeleteFlow::Idle;
        self.selection.iter().cloned().collect()
    }

    /// Reconcile a settled batch: drop from the selection set only the
    /// names the server confirmed deleted. Failed names stay selected
    /// so the user can retry. The caller re-fetches afterwards
    /// unconditionally, whatever the per-name outcomes were.
    pub fn reconcile_deletions(&mut self, report: &DeleteReport) {
        for name in report.deleted_names() {
            self.selection.remove(name);
        }
    }

    // ─── Helpers ────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    fn contains(&self, common_name: &str) -> bool {
        self.certificates.iter().any(|c| c.common_name == common_name)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::delete_report::DeleteOutcome;
    use chrono::TimeZone;

    /// Build a certificate with the given common name.
    fn cert(name: &str) -> Certificate {
        Certificate {
            common_name: name.to_string(),
            issuer: "CN=Test CA".to_string(),
            valid_from: chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            valid_to: chrono::Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
            version: 3,
            serial_number: format!("serial-{name}"),
            signature_algorithm: "SHA256withRSA".to_string(),
            public_key: "-----BEGIN PUBLIC KEY-----".to_string(),
        }
    }

    /// Collection of `n` certificates named cert-00 .. cert-(n-1).
    fn collection(n: usize) -> Vec<Certificate> {
        (0..n).map(|i| cert(&format!("cert-{i:02}"))).collect()
    }

    fn state_with(n: usize) -> ViewState {
        let mut state = ViewState::new();
        state.replace_collection(collection(n));
        state
    }

    // ─── Pagination ─────────────────────────────────────────────

    #[test]
    fn total_pages_is_ceiling_of_count_over_page_size() {
        for (count, expected) in [(0, 0), (1, 1), (9, 1), (10, 1), (11, 2), (20, 2), (23, 3)] {
            let state = state_with(count);
            assert_eq!(state.total_pages(), expected, "count={count}");
            assert!(state.page_slice().len() <= PAGE_SIZE);
        }
    }

    #[test]
    fn twenty_three_records_paginate_as_three_pages() {
        let mut state = state_with(23);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.page_slice().len(), 10);

        assert!(state.go_to_page(3));
        assert_eq!(state.page_slice().len(), 3);
        assert_eq!(state.page_slice()[0].common_name, "cert-20");

        // Out of range both ways: fully inert.
        assert!(!state.go_to_page(4));
        assert_eq!(state.current_page(), 3);
        assert!(!state.go_to_page(0));
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn next_and_prev_are_bounds_checked() {
        let mut state = state_with(23);
        assert!(!state.prev_page());
        assert_eq!(state.current_page(), 1);
        assert!(state.next_page());
        assert!(state.next_page());
        assert_eq!(state.current_page(), 3);
        assert!(!state.next_page());
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn successful_navigation_clears_focus() {
        let mut state = state_with(23);
        state.toggle_focus("cert-02");
        assert!(state.focused().is_some());
        assert!(state.next_page());
        assert!(state.focused().is_none());
    }

    #[test]
    fn rejected_navigation_does_not_clear_focus() {
        let mut state = state_with(23);
        state.toggle_focus("cert-02");
        assert!(!state.go_to_page(9));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.focused().unwrap().common_name, "cert-02");
    }

    #[test]
    fn page_clamps_when_collection_shrinks() {
        let mut state = state_with(23);
        assert!(state.go_to_page(3));
        state.replace_collection(collection(5));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_slice().len(), 5);
    }

    #[test]
    fn empty_collection_has_page_one_and_empty_slice() {
        let state = state_with(0);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 0);
        assert!(state.page_slice().is_empty());
    }

    // ─── Selection ──────────────────────────────────────────────

    #[test]
    fn toggle_selection_is_symmetric() {
        let mut state = state_with(5);
        state.toggle_selection("cert-01");
        assert!(state.is_selected("cert-01"));
        state.toggle_selection("cert-01");
        assert!(!state.is_selected("cert-01"));
    }

    #[test]
    fn select_all_then_none_restores_prior_selection() {
        let mut state = state_with(23);
        // A stray selection from another page must survive the cycle.
        state.toggle_selection("cert-15");
        let before = state.selection().clone();

        state.select_all_on_page(true);
        assert_eq!(state.selection().len(), 11);
        state.select_all_on_page(false);
        assert_eq!(state.selection(), &before);
    }

    #[test]
    fn selection_persists_across_pages() {
        let mut state = state_with(23);
        state.toggle_selection("cert-00");
        state.toggle_selection("cert-01");
        assert!(state.next_page());
        state.toggle_selection("cert-10");

        let names: Vec<&str> = state.selection().iter().map(String::as_str).collect();
        assert_eq!(names, vec!["cert-00", "cert-01", "cert-10"]);
    }

    #[test]
    fn selection_survives_collection_replacement() {
        let mut state = state_with(10);
        state.toggle_selection("cert-03");
        state.replace_collection(collection(10));
        assert!(state.is_selected("cert-03"));
    }

    #[test]
    fn header_state_is_tristate() {
        let mut state = state_with(23);
        assert_eq!(state.header_state(), HeaderState::Unchecked);

        state.toggle_selection("cert-00");
        assert_eq!(state.header_state(), HeaderState::Indeterminate);

        state.select_all_on_page(true);
        assert_eq!(state.header_state(), HeaderState::Checked);

        // Last page: 3 rows, all selected counts as Checked.
        assert!(state.go_to_page(3));
        state.select_all_on_page(true);
        assert_eq!(state.header_state(), HeaderState::Checked);
    }

    #[test]
    fn header_state_ignores_other_pages() {
        let mut state = state_with(23);
        state.toggle_selection("cert-15"); // page 2
        assert_eq!(state.header_state(), HeaderState::Unchecked);
    }

    #[test]
    fn empty_page_header_is_unchecked() {
        let state = state_with(0);
        assert_eq!(state.header_state(), HeaderState::Unchecked);
    }

    // ─── Focus ──────────────────────────────────────────────────

    #[test]
    fn double_focus_toggle_is_identity() {
        let mut state = state_with(5);
        state.toggle_focus("cert-02");
        assert_eq!(state.focused().unwrap().common_name, "cert-02");
        state.toggle_focus("cert-02");
        assert!(state.focused().is_none());
    }

    #[test]
    fn focusing_another_record_moves_focus() {
        let mut state = state_with(5);
        state.toggle_focus("cert-01");
        state.toggle_focus("cert-04");
        assert_eq!(state.focused().unwrap().common_name, "cert-04");
    }

    #[test]
    fn selection_does_not_disturb_focus() {
        // The checkbox-column contract: selecting never opens or
        // closes the detail panel.
        let mut state = state_with(5);
        state.toggle_focus("cert-01");
        state.toggle_selection("cert-01");
        state.select_all_on_page(true);
        assert_eq!(state.focused().unwrap().common_name, "cert-01");
    }

    #[test]
    fn focus_survives_replacement_if_name_still_present() {
        let mut state = state_with(5);
        state.toggle_focus("cert-02");
        state.replace_collection(collection(5));
        assert_eq!(state.focused().unwrap().common_name, "cert-02");
    }

    #[test]
    fn focus_cleared_if_name_vanishes_on_replacement() {
        let mut state = state_with(5);
        state.toggle_focus("cert-04");
        state.replace_collection(collection(3));
        assert!(state.focused().is_none());
    }

    // ─── Deletion workflow ──────────────────────────────────────

    #[test]
    fn confirm_gate_requires_non_empty_selection() {
        let mut state = state_with(5);
        assert!(!state.request_delete());
        assert_eq!(state.delete_flow(), DeleteFlow::Idle);

        state.toggle_selection("cert-01");
        assert!(state.request_delete());
        assert_eq!(state.delete_flow(), DeleteFlow::ConfirmPending);
    }

    #[test]
    fn cancel_returns_to_idle_without_side_effects() {
        let mut state = state_with(5);
        state.toggle_selection("cert-01");
        state.request_delete();
        state.cancel_delete();
        assert_eq!(state.delete_flow(), DeleteFlow::Idle);
        assert!(state.is_selected("cert-01"));
    }

    #[test]
    fn confirm_closes_gate_immediately_and_yields_names() {
        let mut state = state_with(5);
        state.toggle_selection("cert-01");
        state.toggle_selection("cert-03");
        state.request_delete();

        let names = state.confirm_delete();
        assert_eq!(names, vec!["cert-01".to_string(), "cert-03".to_string()]);
        // Gate closed before the batch settles, not after.
        assert_eq!(state.delete_flow(), DeleteFlow::Idle);
    }

    #[test]
    fn confirm_without_pending_gate_yields_nothing() {
        let mut state = state_with(5);
        state.toggle_selection("cert-01");
        assert!(state.confirm_delete().is_empty());
        assert!(state.is_selected("cert-01"));
    }

    #[test]
    fn partial_failure_keeps_failed_names_selected() {
        let mut state = state_with(5);
        for name in ["cert-00", "cert-01", "cert-02"] {
            state.toggle_selection(name);
        }
        state.request_delete();
        let _ = state.confirm_delete();

        // Backend accepts cert-00 and cert-02, rejects cert-01.
        let report = DeleteReport {
            outcomes: vec![
                ("cert-00".into(), DeleteOutcome::Deleted),
                (
                    "cert-01".into(),
                    DeleteOutcome::Failed {
                        reason: "server returned status 500".into(),
                    },
                ),
                ("cert-02".into(), DeleteOutcome::Deleted),
            ],
        };
        state.reconcile_deletions(&report);

        let remaining: Vec<&str> = state.selection().iter().map(String::as_str).collect();
        assert_eq!(remaining, vec!["cert-01"]);
    }

    // ─── Error state ────────────────────────────────────────────

    #[test]
    fn fetch_error_discards_collection_and_focus() {
        let mut state = state_with(23);
        state.toggle_focus("cert-01");
        state.toggle_selection("cert-02");

        state.set_error("connection refused".into());
        assert_eq!(state.error(), Some("connection refused"));
        assert!(state.is_empty());
        assert!(state.focused().is_none());
        // Selection is kept for when the poll recovers.
        assert!(state.is_selected("cert-02"));
    }

    #[test]
    fn successful_fetch_clears_error() {
        let mut state = ViewState::new();
        state.set_error("boom".into());
        state.replace_collection(collection(3));
        assert!(state.error().is_none());
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn error_cancels_pending_confirmation() {
        let mut state = state_with(5);
        state.toggle_selection("cert-01");
        state.request_delete();
        state.set_error("boom".into());
        assert_eq!(state.delete_flow(), DeleteFlow::Idle);
    }
}
