use chrono::{DateTime, Utc};

use crate::models::form::{FieldError, TransactionForm};
use crate::models::summary::{DashboardSummary, PnlClass};
use crate::models::transaction::Transaction;

/// Outcome of starting a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Send this transaction; the form is now locked until the request finishes.
    Ready(Transaction),
    /// The form has errors; nothing is sent.
    Invalid(Vec<FieldError>),
    /// A submission is already in flight.
    Busy,
}

/// Lock held while an add request is outstanding.
///
/// Dropping it unlocks the form, so a request future that is cancelled
/// mid-flight (timeout, `select!`, navigation) never leaves the dashboard
/// stuck in [`SubmitStart::Busy`].
#[must_use = "the form unlocks as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InFlight<'a> {
    state: &'a mut DashboardState,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.submitting = false;
    }
}

/// Everything the dashboard view renders from.
///
/// All mutations go through the methods below so hosts that drive the
/// HTTP calls themselves (e.g. from a browser event loop) get the same
/// transitions as [`DashboardController`](crate::DashboardController).
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Last summary received; zeros until the first successful load.
    pub summary: DashboardSummary,

    /// Last transaction list received.
    pub transactions: Vec<Transaction>,

    /// Add-transaction form.
    pub form: TransactionForm,

    /// Add-form panel visible.
    pub show_form: bool,

    /// Per-product breakdown panel visible.
    pub show_product_pnl: bool,

    submitting: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Panels ──────────────────────────────────────────────────────

    /// Show/hide the add form. Opening it closes the breakdown.
    pub fn toggle_transaction_form(&mut self) {
        self.show_form = !self.show_form;
        if self.show_form {
            self.show_product_pnl = false;
        }
    }

    /// Show/hide the breakdown. Opening it closes the add form.
    pub fn toggle_product_pnl(&mut self) {
        self.show_product_pnl = !self.show_product_pnl;
        if self.show_product_pnl {
            self.show_form = false;
        }
    }

    // ── Summary ─────────────────────────────────────────────────────

    pub fn apply_summary(&mut self, summary: DashboardSummary) {
        self.summary = summary;
    }

    pub fn apply_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    #[must_use]
    pub fn has_product_data(&self) -> bool {
        self.summary.has_product_data()
    }

    /// Product names for iterating the breakdown, in backend order.
    pub fn product_names(&self) -> Vec<&str> {
        self.summary.pnl_by_product.products()
    }

    pub fn product_pnl_class(pnl: f64) -> PnlClass {
        PnlClass::of(pnl)
    }

    pub fn total_pnl_class(&self) -> PnlClass {
        self.summary.total_pnl_class()
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Whether the submit action should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    /// Mark the form submitted and, if it is valid and nothing is in
    /// flight, lock it and hand back the transaction to send.
    pub fn begin_submit(&mut self) -> SubmitStart {
        self.form.submitted = true;
        if self.submitting {
            return SubmitStart::Busy;
        }
        if let Err(errors) = self.form.validate() {
            return SubmitStart::Invalid(errors);
        }
        self.submitting = true;
        SubmitStart::Ready(self.form.to_transaction())
    }

    /// Tie the lock taken by a `Ready` [`begin_submit`](Self::begin_submit)
    /// to a guard that releases it on drop.
    pub fn in_flight(&mut self) -> InFlight<'_> {
        self.submitting = true;
        InFlight { state: self }
    }

    /// The backend accepted the transaction: reset the form and close it.
    pub fn finish_submit_accepted(&mut self, created: Transaction, now: DateTime<Utc>) {
        self.submitting = false;
        self.transactions.push(created);
        self.form.reset_at(now);
        self.show_form = false;
    }

    /// The backend rejected the transaction: unlock, keep what the user typed.
    pub fn finish_submit_rejected(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_never_both_open() {
        let mut state = DashboardState::new();
        state.toggle_transaction_form();
        state.toggle_product_pnl();
        assert!(state.show_product_pnl);
        assert!(!state.show_form);
        state.toggle_transaction_form();
        assert!(state.show_form);
        assert!(!state.show_product_pnl);
    }

    #[test]
    fn closing_a_panel_leaves_the_other_closed() {
        let mut state = DashboardState::new();
        state.toggle_transaction_form();
        state.toggle_transaction_form();
        assert!(!state.show_form);
        assert!(!state.show_product_pnl);
    }

    #[test]
    fn second_begin_while_in_flight_is_busy() {
        let mut state = DashboardState::new();
        state.form.product = "Widget".into();
        state.form.quantity = 1.0;
        state.form.price_per_unit = 2.0;
        assert!(matches!(state.begin_submit(), SubmitStart::Ready(_)));
        assert!(!state.can_submit());
        assert_eq!(state.begin_submit(), SubmitStart::Busy);
        state.finish_submit_rejected();
        assert!(state.can_submit());
    }

    #[test]
    fn dropping_in_flight_guard_unlocks() {
        let mut state = DashboardState::new();
        state.form.product = "Widget".into();
        state.form.quantity = 1.0;
        state.form.price_per_unit = 2.0;
        assert!(matches!(state.begin_submit(), SubmitStart::Ready(_)));

        let guard = state.in_flight();
        drop(guard);

        assert!(state.can_submit());
        assert!(matches!(state.begin_submit(), SubmitStart::Ready(_)));
    }
}
