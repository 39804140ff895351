//! # Display Session
//!
//! The controller that owns everything the pure classifier refuses to hold:
//! the basket, the classification context, and the cached display sequence.
//!
//! ## Recomputation Triggers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Display Session Lifecycle                            │
//! │                                                                         │
//! │  add_line / remove_line ────────┐                                       │
//! │  assign_salesperson ────────────┤                                       │
//! │  set_return_mode ───────────────┼──► refresh() ──► classify() ──► cache │
//! │  begin/update/end selection ────┤                                       │
//! │  register_originating_txn ──────┘                                       │
//! │                                                                         │
//! │  void_transaction ──► freeze: classify() returns the cache verbatim    │
//! │  close ─────────────► clear basket, flags, and cache entirely          │
//! │                                                                         │
//! │  display() is pull-based and always answers from the cache             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cache Ownership
//! The "last good display" lives here, not in the classifier. Each refresh
//! hands it to [`classify`] through `ClassificationContext::previous`, which
//! is the only path that ever reads it.

use std::collections::BTreeSet;

use tracing::debug;

use crate::basket::Basket;
use crate::config::DisplayConfig;
use crate::error::SessionResult;
use crate::totals::BasketTotals;
use lane_core::classify::{classify, Classification, ClassificationContext};
use lane_core::types::{Employee, ItemDisplayLine, OriginatingTransaction, SelectionFilter};

/// One operator-facing display session: a basket plus the state that shapes
/// how its lines classify.
#[derive(Debug)]
pub struct DisplaySession {
    basket: Basket,
    config: DisplayConfig,
    return_mode: bool,
    selection: Option<SelectionFilter>,
    originating_transactions: Vec<OriginatingTransaction>,
    voided: bool,
    cached: Option<Classification>,
}

impl DisplaySession {
    /// Creates an empty session with the given configuration.
    pub fn new(config: DisplayConfig) -> Self {
        DisplaySession {
            basket: Basket::new(),
            config,
            return_mode: false,
            selection: None,
            originating_transactions: Vec::new(),
            voided: false,
            cached: None,
        }
    }

    /// Creates an empty session with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DisplayConfig::default())
    }

    // =========================================================================
    // Basket Mutations
    // =========================================================================

    /// Appends an engine-supplied line and recomputes the display.
    pub fn add_line(&mut self, line: ItemDisplayLine) -> SessionResult<()> {
        debug!(line_number = line.line_number, "add_line");
        self.basket.add_line(line)?;
        self.refresh();
        Ok(())
    }

    /// Removes a line and recomputes the display.
    pub fn remove_line(&mut self, line_number: u32) -> SessionResult<()> {
        debug!(line_number, "remove_line");
        self.basket.remove_line(line_number)?;
        self.refresh();
        Ok(())
    }

    /// Changes a line's salesperson attribution and recomputes the display.
    pub fn assign_salesperson(
        &mut self,
        line_number: u32,
        salesperson: Option<Employee>,
    ) -> SessionResult<()> {
        debug!(
            line_number,
            employee = salesperson.as_ref().map(|e| e.employee_number.as_str()),
            "assign_salesperson"
        );
        self.basket.assign_salesperson(line_number, salesperson)?;
        self.refresh();
        Ok(())
    }

    // =========================================================================
    // Mode and Context Changes
    // =========================================================================

    /// Toggles the return workflow. Return mode hides plain sale lines from
    /// the visible basket.
    pub fn set_return_mode(&mut self, return_mode: bool) {
        debug!(return_mode, "set_return_mode");
        self.return_mode = return_mode;
        self.refresh();
    }

    /// Registers a prior transaction that return lines cross-reference.
    ///
    /// ## Behavior
    /// Transactions keep registration order (their buckets render in that
    /// order); re-registering an id is a no-op.
    pub fn register_originating_transaction(&mut self, transaction: OriginatingTransaction) {
        if self
            .originating_transactions
            .iter()
            .any(|t| t.transaction_id == transaction.transaction_id)
        {
            debug!(
                transaction_id = %transaction.transaction_id,
                "originating transaction already registered"
            );
            return;
        }
        debug!(transaction_id = %transaction.transaction_id, "register_originating_transaction");
        self.originating_transactions.push(transaction);
        self.refresh();
    }

    /// Enters item-selection mode with the given filter.
    pub fn begin_selection(&mut self, filter: SelectionFilter) {
        debug!(enabled = filter.enabled, "begin_selection");
        self.selection = Some(filter);
        self.refresh();
    }

    /// Replaces the selected-line set while selection mode is active.
    /// Ignored when no selection is in progress.
    pub fn set_selected_lines(&mut self, selected: BTreeSet<u32>) {
        match self.selection.as_mut() {
            Some(filter) => {
                debug!(count = selected.len(), "set_selected_lines");
                filter.selected_line_numbers = selected;
                self.refresh();
            }
            None => debug!("set_selected_lines ignored, no selection in progress"),
        }
    }

    /// Leaves item-selection mode and restores full grouping.
    pub fn end_selection(&mut self) {
        debug!("end_selection");
        self.selection = None;
        self.refresh();
    }

    // =========================================================================
    // Lifecycle Transitions
    // =========================================================================

    /// Marks the transaction voided.
    ///
    /// ## Behavior
    /// The display freezes at its last computed sequence; subsequent basket
    /// or context changes no longer alter what is shown, until `close`.
    pub fn void_transaction(&mut self) {
        debug!("void_transaction, display frozen");
        self.voided = true;
        self.refresh();
    }

    /// Ends the session: clears the basket, all modes, and the cached
    /// display sequence entirely.
    pub fn close(&mut self) {
        debug!("close");
        self.basket.clear();
        self.return_mode = false;
        self.selection = None;
        self.originating_transactions.clear();
        self.voided = false;
        self.cached = None;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current display sequence (always answered from the cache).
    pub fn display(&self) -> Classification {
        self.cached.clone().unwrap_or_default()
    }

    /// Footer totals over the basket's engine-supplied amounts.
    pub fn totals(&self) -> BasketTotals {
        BasketTotals::from(&self.basket)
    }

    /// Read access to the underlying basket.
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// The session's display configuration.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Whether the transaction has been voided.
    pub fn is_voided(&self) -> bool {
        self.voided
    }

    /// Whether the session is in the return workflow.
    pub fn is_return_mode(&self) -> bool {
        self.return_mode
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Reclassifies the basket and replaces the cache.
    ///
    /// In the voided state `classify` answers with the previous sequence
    /// verbatim, so the cache is stable across any further triggers.
    fn refresh(&mut self) {
        let ctx = ClassificationContext {
            return_mode: self.return_mode,
            selection: self.selection.as_ref(),
            originating_transactions: &self.originating_transactions,
            transaction_voided: self.voided,
            previous: self.cached.as_ref(),
            none_salesperson_label: &self.config.none_salesperson_label,
        };
        let result = classify(self.basket.lines(), &ctx);
        self.cached = Some(result);
    }
}

impl Default for DisplaySession {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lane_core::types::{AccountStatus, DisplayEntry, LineType};

    fn test_line(line_number: u32) -> ItemDisplayLine {
        ItemDisplayLine {
            id: format!("00000000-0000-4000-8000-{:012}", line_number),
            line_number,
            line_type: LineType::ItemSale,
            salesperson: None,
            transaction_id_from_return_transaction: None,
            line_number_from_return_transaction: None,
            subline_index_from_return_item: None,
            offline_return_reference_number: None,
            selectable: true,
            sku_snapshot: format!("SKU-{}", line_number),
            description_snapshot: format!("Item {}", line_number),
            quantity: 1,
            unit_price_cents: 199,
            extended_amount_cents: 199,
            added_at: Utc::now(),
        }
    }

    fn return_line(line_number: u32, transaction_id: &str) -> ItemDisplayLine {
        ItemDisplayLine {
            line_type: LineType::ItemReturn,
            transaction_id_from_return_transaction: Some(transaction_id.to_string()),
            line_number_from_return_transaction: Some(1),
            subline_index_from_return_item: Some(0),
            extended_amount_cents: -199,
            ..test_line(line_number)
        }
    }

    fn test_employee(number: &str) -> Employee {
        Employee {
            employee_number: number.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            account_status: AccountStatus::Active,
        }
    }

    #[test]
    fn test_mutations_recompute_display() {
        let mut session = DisplaySession::with_defaults();
        assert!(session.display().entries.is_empty());

        session.add_line(test_line(1)).unwrap();
        assert_eq!(session.display().line_count(), 1);

        session.add_line(test_line(2)).unwrap();
        assert_eq!(session.display().line_count(), 2);

        session.remove_line(1).unwrap();
        assert_eq!(session.display().line_count(), 1);
    }

    #[test]
    fn test_salesperson_change_recomputes_banners() {
        let mut session = DisplaySession::with_defaults();
        session.add_line(test_line(1)).unwrap();
        assert!(!session
            .display()
            .entries
            .iter()
            .any(|e| matches!(e, DisplayEntry::Salesperson(_))));

        session
            .assign_salesperson(1, Some(test_employee("100")))
            .unwrap();
        // A real salesperson is no longer the sole sentinel sub-group
        assert!(session
            .display()
            .entries
            .iter()
            .any(|e| matches!(e, DisplayEntry::Salesperson(emp) if emp.employee_number == "100")));
    }

    #[test]
    fn test_return_mode_toggle_recomputes() {
        let mut session = DisplaySession::with_defaults();
        session.add_line(test_line(1)).unwrap();
        session.register_originating_transaction(OriginatingTransaction {
            transaction_id: "txn-1".to_string(),
            reference_number: "R-0001".to_string(),
            order_reference_id: None,
        });
        session.add_line(return_line(2, "txn-1")).unwrap();
        assert_eq!(session.display().line_count(), 2);

        session.set_return_mode(true);
        assert_eq!(session.display().line_count(), 1);

        session.set_return_mode(false);
        assert_eq!(session.display().line_count(), 2);
    }

    #[test]
    fn test_selection_lifecycle() {
        let mut session = DisplaySession::with_defaults();
        let mut locked = test_line(1);
        locked.selectable = false;
        session.add_line(locked).unwrap();
        session.add_line(test_line(2)).unwrap();

        session.begin_selection(SelectionFilter {
            enabled: true,
            selected_line_numbers: BTreeSet::new(),
        });
        assert_eq!(session.display().line_count(), 1);

        session.set_selected_lines(BTreeSet::from([1]));
        assert_eq!(session.display().line_count(), 2);

        session.end_selection();
        assert_eq!(session.display().line_count(), 2);
    }

    #[test]
    fn test_void_freezes_display() {
        let mut session = DisplaySession::with_defaults();
        session.add_line(test_line(1)).unwrap();
        let frozen = session.display();

        session.void_transaction();
        assert!(session.is_voided());

        // Further mutations keep succeeding against the basket but the
        // display no longer moves
        session.add_line(test_line(2)).unwrap();
        session.set_return_mode(true);
        assert_eq!(session.display(), frozen);
    }

    #[test]
    fn test_close_clears_everything() {
        let mut session = DisplaySession::with_defaults();
        session.add_line(test_line(1)).unwrap();
        session.void_transaction();

        session.close();
        assert!(session.display().entries.is_empty());
        assert!(session.basket().is_empty());
        assert!(!session.is_voided());

        // A fresh transaction classifies normally again
        session.add_line(test_line(1)).unwrap();
        assert_eq!(session.display().line_count(), 1);
    }

    #[test]
    fn test_duplicate_transaction_registration_ignored() {
        let mut session = DisplaySession::with_defaults();
        let txn = OriginatingTransaction {
            transaction_id: "txn-1".to_string(),
            reference_number: "R-0001".to_string(),
            order_reference_id: None,
        };
        session.register_originating_transaction(txn.clone());
        session.register_originating_transaction(txn);

        session.add_line(return_line(1, "txn-1")).unwrap();
        // One bucket, one group header
        let headers = session
            .display()
            .entries
            .iter()
            .filter(|e| matches!(e, DisplayEntry::GroupReference(_)))
            .count();
        assert_eq!(headers, 1);
    }

    #[test]
    fn test_configured_none_label_flows_through() {
        let config = DisplayConfig {
            none_salesperson_label: "Unassigned".to_string(),
            ..Default::default()
        };
        let mut session = DisplaySession::new(config);
        session.add_line(test_line(1)).unwrap();
        session
            .assign_salesperson(1, Some(test_employee("100")))
            .unwrap();
        session.add_line(test_line(2)).unwrap();

        let banners: Vec<String> = session
            .display()
            .entries
            .iter()
            .filter_map(|e| match e {
                DisplayEntry::Salesperson(emp) => Some(emp.display_name()),
                _ => None,
            })
            .collect();
        assert_eq!(banners, vec!["Ada Lovelace".to_string(), "Unassigned".to_string()]);
    }
}
