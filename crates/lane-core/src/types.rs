//! # Domain Types
//!
//! Core domain types for the Lane POS display layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Display Types                                   │
//! │                                                                         │
//! │  INPUT (engine-supplied, immutable per render cycle)                   │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │ ItemDisplayLine │   │    Employee     │   │OriginatingTransaction│  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  line_number    │   │  employee_number│   │  transaction_id      │  │
//! │  │  line_type      │   │  first_name     │   │  reference_number    │  │
//! │  │  salesperson    │   │  last_name      │   │  order_reference_id  │  │
//! │  │  return refs    │   │  account_status │   └──────────────────────┘  │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  OUTPUT (classifier-produced, renderer contract)                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  DisplayEntry = Line | Salesperson | Separator | GroupReference │   │
//! │  │  GroupKey     = ItemLines | Transaction | OfflineReturn         │   │
//! │  │                 | NoReceipt                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Display lines freeze the item data (SKU, description, amounts) at the
//! moment the business-rules engine produced them. The display never reaches
//! back into catalog or transaction state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{NONE_EMPLOYEE_NUMBER, NO_RECEIPT_GROUP_KEY, OFFLINE_REFERENCE_SUFFIX};

// =============================================================================
// Line Type
// =============================================================================

/// The kind of basket row a display line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    /// Ordinary sale line.
    ItemSale,
    /// Return line (with or without a receipt cross-reference).
    ItemReturn,
    /// Order line (pickup/delivery placed from the lane).
    ItemOrder,
    /// Fulfillment line for a previously placed order.
    ItemFulfillment,
    /// Cancelled line kept visible for operator audit.
    ItemCancel,
}

impl LineType {
    /// Checks whether this is a return-typed line.
    #[inline]
    pub const fn is_return(&self) -> bool {
        matches!(self, LineType::ItemReturn)
    }
}

// =============================================================================
// Employee
// =============================================================================

/// Account status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
    Locked,
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Active
    }
}

/// A salesperson attributed to one or more basket lines.
///
/// ## Grouping Key
/// `employee_number` is the business identifier the classifier groups by.
/// Two employees with the same number are the same salesperson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Business identifier, unique per store.
    pub employee_number: String,

    pub first_name: String,

    pub last_name: String,

    pub account_status: AccountStatus,
}

impl Employee {
    /// Builds the reserved "no salesperson" sentinel.
    ///
    /// ## Behavior
    /// The sentinel carries the localized "none" label as its display name
    /// and the reserved employee number, so it groups and renders like any
    /// other salesperson without colliding with a real one.
    pub fn none_sentinel(label: &str) -> Self {
        Employee {
            employee_number: NONE_EMPLOYEE_NUMBER.to_string(),
            first_name: label.to_string(),
            last_name: String::new(),
            account_status: AccountStatus::Active,
        }
    }

    /// Checks whether this employee is the "no salesperson" sentinel.
    #[inline]
    pub fn is_none_sentinel(&self) -> bool {
        self.employee_number == NONE_EMPLOYEE_NUMBER
    }

    /// Joins the non-empty name parts for banner display.
    pub fn display_name(&self) -> String {
        let mut name = self.first_name.trim().to_string();
        let last = self.last_name.trim();
        if !last.is_empty() {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(last);
        }
        name
    }
}

// =============================================================================
// Item Display Line
// =============================================================================

/// One row of basket content, as supplied by the business-rules engine.
///
/// ## Provenance Fields
/// - `transaction_id_from_return_transaction` plus the two provenance
///   numbers identify a return-with-transaction line.
/// - `offline_return_reference_number` identifies an offline return line
///   (no electronically verifiable original transaction).
/// - A return line with neither is a no-receipt return.
///
/// ## Snapshot Fields
/// SKU, description and amounts are frozen copies of what the engine
/// computed when it produced the line. Amounts are signed cents; the engine
/// supplies negative extended amounts for returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemDisplayLine {
    /// Line identifier (UUID v4).
    pub id: String,

    /// Unique within the current basket snapshot.
    pub line_number: u32,

    pub line_type: LineType,

    /// Absent means "unassigned".
    pub salesperson: Option<Employee>,

    /// Present when the line originates from a return-with-original-
    /// transaction flow.
    pub transaction_id_from_return_transaction: Option<String>,

    /// Line number within the cross-referenced prior transaction.
    pub line_number_from_return_transaction: Option<u32>,

    /// Subline index within the cross-referenced prior line.
    pub subline_index_from_return_item: Option<u32>,

    /// Operator-entered reference for returns without an electronically
    /// verifiable original transaction.
    pub offline_return_reference_number: Option<String>,

    /// Whether the item-selection UI enables this row.
    pub selectable: bool,

    /// SKU at the time the engine produced the line (frozen).
    pub sku_snapshot: String,

    /// Description at the time the engine produced the line (frozen).
    pub description_snapshot: String,

    pub quantity: i64,

    /// Unit price in cents (frozen, engine-computed).
    pub unit_price_cents: i64,

    /// Extended amount in cents (frozen, engine-computed, signed).
    pub extended_amount_cents: i64,

    /// When the engine appended this line to the basket.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl ItemDisplayLine {
    /// Returns the extended amount as Money.
    #[inline]
    pub fn extended_amount(&self) -> Money {
        Money::from_cents(self.extended_amount_cents)
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Checks whether the line carries full return-transaction provenance
    /// (both the prior line number and the prior subline index).
    #[inline]
    pub fn has_return_provenance(&self) -> bool {
        self.line_number_from_return_transaction.is_some()
            && self.subline_index_from_return_item.is_some()
    }
}

// =============================================================================
// Originating Transaction
// =============================================================================

/// A prior transaction that return lines cross-reference.
///
/// Supplied by the business-rules engine alongside the display lines
/// whenever any line carries a return-transaction id. The order these are
/// supplied in is the order their buckets render in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OriginatingTransaction {
    pub transaction_id: String,

    /// Receipt reference number.
    pub reference_number: String,

    /// Present when the transaction represents an order.
    pub order_reference_id: Option<String>,
}

impl OriginatingTransaction {
    /// The reference text that keys and labels this transaction's bucket:
    /// the order reference id for orders, else the receipt reference number.
    pub fn bucket_reference(&self) -> &str {
        self.order_reference_id
            .as_deref()
            .unwrap_or(&self.reference_number)
    }
}

// =============================================================================
// Selection Filter
// =============================================================================

/// Filter applied while the item-selection UI is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionFilter {
    /// When false, every line passes.
    pub enabled: bool,

    /// Line numbers the operator has explicitly selected.
    pub selected_line_numbers: BTreeSet<u32>,
}

impl SelectionFilter {
    /// Checks whether a line survives the filter.
    ///
    /// ## Rules
    /// - Disabled filter: every line passes.
    /// - Enabled filter: a line passes when it is selectable or explicitly
    ///   selected.
    pub fn passes(&self, line: &ItemDisplayLine) -> bool {
        if !self.enabled {
            return true;
        }
        line.selectable || self.selected_line_numbers.contains(&line.line_number)
    }
}

// =============================================================================
// Salesperson Group
// =============================================================================

/// One salesperson (possibly the "none" sentinel) with the ordered lines
/// attributed to them within one bucket.
///
/// ## Lifetime
/// Recomputed on every classification pass; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalespersonGroup {
    pub salesperson: Employee,
    pub lines: Vec<ItemDisplayLine>,
}

// =============================================================================
// Group Key
// =============================================================================

/// Identifies one bucket of the flattened display sequence.
///
/// An explicit sum type: the renderer never has to probe a bare string to
/// tell a "noreceipt" sentinel from a real reference number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "reference", rename_all = "camelCase")]
pub enum GroupKey {
    /// Ordinary sale/order/fulfillment lines. Never rendered as a reference
    /// row.
    ItemLines,

    /// Return lines cross-referenced to one originating transaction,
    /// carrying that transaction's bucket reference text.
    Transaction(String),

    /// Offline return lines, carrying the operator-entered reference
    /// (without the key suffix).
    OfflineReturn(String),

    /// Return lines with no cross-reference at all.
    NoReceipt,
}

impl GroupKey {
    /// The flat key text for this bucket.
    ///
    /// ## Invariant
    /// Key texts are pairwise distinct across bucket kinds: offline keys
    /// carry a trailing carriage return that validated references can never
    /// contain, and `"noreceipt"` is reserved.
    pub fn key_string(&self) -> String {
        match self {
            GroupKey::ItemLines => crate::ITEM_LINES_GROUPING.to_string(),
            GroupKey::Transaction(reference) => reference.clone(),
            GroupKey::OfflineReturn(reference) => {
                format!("{}{}", reference, OFFLINE_REFERENCE_SUFFIX)
            }
            GroupKey::NoReceipt => NO_RECEIPT_GROUP_KEY.to_string(),
        }
    }

    /// The human-readable reference text for the group header row.
    pub fn display_label(&self) -> &str {
        match self {
            GroupKey::ItemLines => "",
            GroupKey::Transaction(reference) => reference,
            GroupKey::OfflineReturn(reference) => reference,
            GroupKey::NoReceipt => NO_RECEIPT_GROUP_KEY,
        }
    }

    /// Checks whether this is the plain item-lines bucket.
    #[inline]
    pub fn is_item_lines(&self) -> bool {
        matches!(self, GroupKey::ItemLines)
    }
}

// =============================================================================
// Display Entry
// =============================================================================

/// Separator sentinel kinds inserted between buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorKind {
    /// Transition into/out of the plain item-lines bucket.
    ItemLines,
    /// Transition between return-related buckets.
    ReturnTransaction,
}

/// One element of the flattened display sequence.
///
/// ## Renderer Contract
/// Serialized with an internal `kind` tag. The frontend switches on the tag
/// to pick a row template; it never inspects field shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DisplayEntry {
    /// A basket line row.
    Line(ItemDisplayLine),

    /// A salesperson banner row.
    Salesperson(Employee),

    /// A separator row between buckets.
    Separator(SeparatorKind),

    /// A group header row carrying the bucket's reference.
    GroupReference(GroupKey),
}

impl DisplayEntry {
    /// Checks whether this entry is a line row.
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, DisplayEntry::Line(_))
    }

    /// Checks whether this entry is a separator row.
    #[inline]
    pub fn is_separator(&self) -> bool {
        matches!(self, DisplayEntry::Separator(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
