//! # Basket Line Classifier
//!
//! Partitions a flat list of heterogeneous display lines into the ordered
//! sequence of rows the renderer draws: lines grouped by
//! transaction-of-origin and by salesperson, interleaved with separator and
//! group-reference entries.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Classification Pipeline                              │
//! │                                                                         │
//! │  ItemDisplayLine[]                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌───────────┐   return + provenance ──► return-with-transaction set   │
//! │  │ partition │   return + offline ref ─► offline set                   │
//! │  │           │   return + nothing ────► no-receipt set                 │
//! │  └─────┬─────┘   everything else ─────► plain set                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌───────────┐   plain bucket (skipped in return mode)                 │
//! │  │  buckets  │   one bucket per originating transaction (their order)  │
//! │  │           │   one offline bucket, one no-receipt bucket             │
//! │  └─────┬─────┘                                                          │
//! │        ▼                                                                │
//! │  ┌───────────┐   sub-group by salesperson, first-seen order,           │
//! │  │  group    │   sentinel employee when unassigned                     │
//! │  └─────┬─────┘                                                          │
//! │        ▼                                                                │
//! │  ┌───────────┐   separators between buckets, group headers for         │
//! │  │  flatten  │   non-plain buckets, sole-sentinel banner suppression   │
//! │  └─────┬─────┘                                                          │
//! │        ▼                                                                │
//! │  DisplayEntry[] + ClassifyWarning[]                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! `classify` is a pure function: no I/O, no shared state, no side effects.
//! The cached previous result (for the void-freeze case) is owned by the
//! enclosing session and handed in through [`ClassificationContext`].

use serde::Serialize;
use ts_rs::TS;

use crate::error::ClassifyWarning;
use crate::types::{
    DisplayEntry, Employee, GroupKey, ItemDisplayLine, OriginatingTransaction,
    SalespersonGroup, SelectionFilter, SeparatorKind,
};
use crate::DEFAULT_NONE_SALESPERSON_LABEL;

// =============================================================================
// Context and Output
// =============================================================================

/// Everything the classifier consumes besides the lines themselves.
///
/// ## Ownership
/// All fields borrow from the enclosing session. In particular `previous`
/// is the session-owned cache of the last computed classification; the
/// classifier only reads it, and only when `transaction_voided` is set.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationContext<'a> {
    /// Whether the session is currently in a return workflow.
    /// Return mode hides the plain item-lines bucket entirely.
    pub return_mode: bool,

    /// `Some` while the item-selection UI is active. Selection bypasses all
    /// transaction grouping and renders one flat filtered bucket.
    pub selection: Option<&'a SelectionFilter>,

    /// Prior transactions referenced by return lines, in display order.
    pub originating_transactions: &'a [OriginatingTransaction],

    /// Freeze flag: a voided transaction keeps its last known display state
    /// rather than reflecting possibly-stale underlying data.
    pub transaction_voided: bool,

    /// The previously computed classification (session-owned cache).
    pub previous: Option<&'a Classification>,

    /// Localized label for the "no salesperson" sentinel banner.
    pub none_salesperson_label: &'a str,
}

impl Default for ClassificationContext<'_> {
    fn default() -> Self {
        ClassificationContext {
            return_mode: false,
            selection: None,
            originating_transactions: &[],
            transaction_voided: false,
            previous: None,
            none_salesperson_label: DEFAULT_NONE_SALESPERSON_LABEL,
        }
    }
}

/// The classifier's output: the flattened sequence plus any diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// The ordered rows the renderer draws.
    pub entries: Vec<DisplayEntry>,

    /// Lines the classifier had to omit, and why.
    pub warnings: Vec<ClassifyWarning>,
}

impl Classification {
    /// Counts the line rows in the sequence (banners, separators and group
    /// headers excluded).
    pub fn line_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_line()).count()
    }
}

// =============================================================================
// Classifier Entry Point
// =============================================================================

/// Classifies basket lines into the flattened display sequence.
///
/// ## Behavior
/// 1. Voided transaction: returns the previous classification verbatim
///    (empty when none was cached).
/// 2. Selection mode: one flat item-lines bucket of filtered lines.
/// 3. Otherwise: partition, bucket, sub-group, flatten (see module docs).
///
/// ## Determinism
/// Identical input and context produce identical output. Lines are never
/// reordered: bucket order follows the fixed precedence, salesperson order
/// is first-seen, line order within a sub-group is the input order.
pub fn classify(lines: &[ItemDisplayLine], ctx: &ClassificationContext<'_>) -> Classification {
    if ctx.transaction_voided {
        return ctx.previous.cloned().unwrap_or_default();
    }

    if let Some(filter) = ctx.selection {
        let visible: Vec<&ItemDisplayLine> = lines.iter().filter(|l| filter.passes(l)).collect();
        let mut buckets = Vec::new();
        if !visible.is_empty() {
            buckets.push((
                GroupKey::ItemLines,
                group_by_salesperson(&visible, ctx.none_salesperson_label),
            ));
        }
        return Classification {
            entries: flatten(&buckets),
            warnings: Vec::new(),
        };
    }

    let sets = partition(lines);
    let mut warnings = sets.warnings;

    let mut keyed: Vec<(GroupKey, Vec<&ItemDisplayLine>)> = Vec::new();
    if !sets.plain.is_empty() && !ctx.return_mode {
        keyed.push((GroupKey::ItemLines, sets.plain));
    }
    keyed.extend(transaction_buckets(
        &sets.with_transaction,
        ctx.originating_transactions,
        &mut warnings,
    ));
    if let Some(bucket) = offline_bucket(sets.offline, &mut warnings) {
        keyed.push(bucket);
    }
    if !sets.no_receipt.is_empty() {
        keyed.push((GroupKey::NoReceipt, sets.no_receipt));
    }

    let buckets: Vec<(GroupKey, Vec<SalespersonGroup>)> = keyed
        .into_iter()
        .map(|(key, bucket_lines)| {
            let groups = group_by_salesperson(&bucket_lines, ctx.none_salesperson_label);
            (key, groups)
        })
        .collect();

    Classification {
        entries: flatten(&buckets),
        warnings,
    }
}

// =============================================================================
// Stage 1: Partition
// =============================================================================

/// The four disjoint candidate sets, in classification precedence.
struct Partition<'a> {
    with_transaction: Vec<&'a ItemDisplayLine>,
    offline: Vec<&'a ItemDisplayLine>,
    no_receipt: Vec<&'a ItemDisplayLine>,
    plain: Vec<&'a ItemDisplayLine>,
    warnings: Vec<ClassifyWarning>,
}

/// Partitions lines by predicate, tested in fixed precedence.
///
/// A line matches at most one set. Return-typed lines that match none
/// (a return-transaction id without full provenance) are omitted with a
/// warning.
fn partition(lines: &[ItemDisplayLine]) -> Partition<'_> {
    let mut with_transaction = Vec::new();
    let mut offline = Vec::new();
    let mut no_receipt = Vec::new();
    let mut plain = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        if !line.line_type.is_return() {
            plain.push(line);
        } else if line.has_return_provenance() {
            with_transaction.push(line);
        } else if line.offline_return_reference_number.is_some() {
            offline.push(line);
        } else if line.transaction_id_from_return_transaction.is_none() {
            no_receipt.push(line);
        } else {
            warnings.push(ClassifyWarning::UnclassifiedReturnLine {
                line_number: line.line_number,
            });
        }
    }

    Partition {
        with_transaction,
        offline,
        no_receipt,
        plain,
        warnings,
    }
}

// =============================================================================
// Stage 2: Buckets
// =============================================================================

/// Groups return-with-transaction lines into one bucket per originating
/// transaction, in the order the transactions were supplied.
///
/// Lines referencing a transaction id that was never supplied (or carrying
/// no id at all) are omitted with a warning.
fn transaction_buckets<'a>(
    lines: &[&'a ItemDisplayLine],
    transactions: &[OriginatingTransaction],
    warnings: &mut Vec<ClassifyWarning>,
) -> Vec<(GroupKey, Vec<&'a ItemDisplayLine>)> {
    let mut buckets = Vec::new();

    for txn in transactions {
        let matched: Vec<&ItemDisplayLine> = lines
            .iter()
            .copied()
            .filter(|l| {
                l.transaction_id_from_return_transaction.as_deref()
                    == Some(txn.transaction_id.as_str())
            })
            .collect();
        if !matched.is_empty() {
            buckets.push((
                GroupKey::Transaction(txn.bucket_reference().to_string()),
                matched,
            ));
        }
    }

    for line in lines {
        let resolved = line
            .transaction_id_from_return_transaction
            .as_deref()
            .is_some_and(|id| transactions.iter().any(|t| t.transaction_id == id));
        if !resolved {
            warnings.push(ClassifyWarning::UnresolvedReturnTransaction {
                line_number: line.line_number,
                transaction_id: line.transaction_id_from_return_transaction.clone(),
            });
        }
    }

    buckets
}

/// Builds the single offline-return bucket.
///
/// ## Policy
/// Multi-receipt offline return is disallowed: exactly one bucket is built,
/// keyed by the first-seen reference. Further distinct references fold into
/// that bucket and are reported via a warning.
fn offline_bucket<'a>(
    lines: Vec<&'a ItemDisplayLine>,
    warnings: &mut Vec<ClassifyWarning>,
) -> Option<(GroupKey, Vec<&'a ItemDisplayLine>)> {
    let kept = lines
        .first()
        .and_then(|l| l.offline_return_reference_number.clone())?;

    let mut ignored: Vec<String> = Vec::new();
    for line in &lines {
        if let Some(reference) = &line.offline_return_reference_number {
            if *reference != kept && !ignored.contains(reference) {
                ignored.push(reference.clone());
            }
        }
    }
    if !ignored.is_empty() {
        warnings.push(ClassifyWarning::MultipleOfflineReferences {
            kept: kept.clone(),
            ignored,
        });
    }

    Some((GroupKey::OfflineReturn(kept), lines))
}

// =============================================================================
// Stage 3: Salesperson Sub-Grouping
// =============================================================================

/// Sub-groups one bucket's lines by salesperson.
///
/// ## Ordering
/// Stable, insertion-order grouping: salespeople appear in first-seen order
/// and lines keep their input order within each sub-group. No sorting by
/// name, amount, or any other key. Unassigned lines attach to the "none"
/// sentinel employee.
fn group_by_salesperson(lines: &[&ItemDisplayLine], none_label: &str) -> Vec<SalespersonGroup> {
    let mut groups: Vec<SalespersonGroup> = Vec::new();

    for line in lines {
        let salesperson = line
            .salesperson
            .clone()
            .unwrap_or_else(|| Employee::none_sentinel(none_label));

        match groups
            .iter_mut()
            .find(|g| g.salesperson.employee_number == salesperson.employee_number)
        {
            Some(group) => group.lines.push((*line).clone()),
            None => groups.push(SalespersonGroup {
                salesperson,
                lines: vec![(*line).clone()],
            }),
        }
    }

    groups
}

// =============================================================================
// Stage 4: Flatten
// =============================================================================

/// Flattens ordered buckets into the display sequence.
///
/// ## Rules
/// - Between buckets (never before the first): an item-lines separator when
///   the transition enters or leaves the plain bucket, else a
///   return-transaction separator.
/// - A group header for every bucket except the plain item-lines bucket.
/// - A salesperson banner per sub-group, suppressed when the sole sub-group
///   is the "none" sentinel.
fn flatten(buckets: &[(GroupKey, Vec<SalespersonGroup>)]) -> Vec<DisplayEntry> {
    let mut entries = Vec::new();
    let mut previous_key: Option<&GroupKey> = None;

    for (key, groups) in buckets {
        if let Some(prev) = previous_key {
            let kind = if prev.is_item_lines() || key.is_item_lines() {
                SeparatorKind::ItemLines
            } else {
                SeparatorKind::ReturnTransaction
            };
            entries.push(DisplayEntry::Separator(kind));
        }

        if !key.is_item_lines() {
            entries.push(DisplayEntry::GroupReference(key.clone()));
        }

        let sole_sentinel = groups.len() == 1 && groups[0].salesperson.is_none_sentinel();
        for group in groups {
            if !sole_sentinel {
                entries.push(DisplayEntry::Salesperson(group.salesperson.clone()));
            }
            entries.extend(group.lines.iter().cloned().map(DisplayEntry::Line));
        }

        previous_key = Some(key);
    }

    entries
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountStatus, LineType};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn employee(number: &str, first: &str, last: &str) -> Employee {
        Employee {
            employee_number: number.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            account_status: AccountStatus::Active,
        }
    }

    fn sale_line(line_number: u32) -> ItemDisplayLine {
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
            ..sale_line(line_number)
        }
    }

    fn offline_line(line_number: u32, reference: &str) -> ItemDisplayLine {
        ItemDisplayLine {
            line_type: LineType::ItemReturn,
            offline_return_reference_number: Some(reference.to_string()),
            extended_amount_cents: -199,
            ..sale_line(line_number)
        }
    }

    fn no_receipt_line(line_number: u32) -> ItemDisplayLine {
        ItemDisplayLine {
            line_type: LineType::ItemReturn,
            extended_amount_cents: -199,
            ..sale_line(line_number)
        }
    }

    fn transaction(id: &str, reference: &str) -> OriginatingTransaction {
        OriginatingTransaction {
            transaction_id: id.to_string(),
            reference_number: reference.to_string(),
            order_reference_id: None,
        }
    }

    fn line_numbers(result: &Classification) -> Vec<u32> {
        result
            .entries
            .iter()
            .filter_map(|e| match e {
                DisplayEntry::Line(l) => Some(l.line_number),
                _ => None,
            })
            .collect()
    }

    fn separator_kinds(result: &Classification) -> Vec<SeparatorKind> {
        result
            .entries
            .iter()
            .filter_map(|e| match e {
                DisplayEntry::Separator(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_input_empty_sequence() {
        let result = classify(&[], &ClassificationContext::default());
        assert!(result.entries.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_single_unassigned_sale_line() {
        // One sale line, no salesperson: just the line, no banner, no
        // separator, no group header
        let lines = vec![sale_line(1)];
        let result = classify(&lines, &ClassificationContext::default());

        assert_eq!(result.entries.len(), 1);
        assert!(matches!(&result.entries[0], DisplayEntry::Line(l) if l.line_number == 1));
    }

    #[test]
    fn test_plain_lines_keep_original_order() {
        let lines = vec![sale_line(1), sale_line(2), sale_line(3)];
        let result = classify(&lines, &ClassificationContext::default());

        assert_eq!(line_numbers(&result), vec![1, 2, 3]);
        assert!(separator_kinds(&result).is_empty());
    }

    #[test]
    fn test_salesperson_first_seen_order() {
        let ada = employee("100", "Ada", "Lovelace");
        let grace = employee("200", "Grace", "Hopper");

        let mut l1 = sale_line(1);
        l1.salesperson = Some(ada.clone());
        let mut l2 = sale_line(2);
        l2.salesperson = Some(grace.clone());
        let mut l3 = sale_line(3);
        l3.salesperson = Some(ada.clone());

        let result = classify(&[l1, l2, l3], &ClassificationContext::default());

        // Ada's sub-group collects both her lines ahead of Grace's
        match &result.entries[..] {
            [DisplayEntry::Salesperson(a), DisplayEntry::Line(la1), DisplayEntry::Line(la3), DisplayEntry::Salesperson(g), DisplayEntry::Line(lg2)] =>
            {
                assert_eq!(a.employee_number, "100");
                assert_eq!(la1.line_number, 1);
                assert_eq!(la3.line_number, 3);
                assert_eq!(g.employee_number, "200");
                assert_eq!(lg2.line_number, 2);
            }
            other => panic!("unexpected sequence: {:?}", other),
        }
    }

    #[test]
    fn test_none_sentinel_banner_when_not_sole() {
        let ada = employee("100", "Ada", "Lovelace");
        let mut l1 = sale_line(1);
        l1.salesperson = Some(ada);
        let l2 = sale_line(2); // unassigned

        let result = classify(&[l1, l2], &ClassificationContext::default());

        let banners: Vec<&Employee> = result
            .entries
            .iter()
            .filter_map(|e| match e {
                DisplayEntry::Salesperson(emp) => Some(emp),
                _ => None,
            })
            .collect();
        assert_eq!(banners.len(), 2);
        assert!(banners[1].is_none_sentinel());
        assert_eq!(banners[1].display_name(), "None");
    }

    #[test]
    fn test_sole_sentinel_banner_suppressed_per_bucket() {
        // Both buckets contain only unassigned lines; neither gets a banner
        let lines = vec![sale_line(1), no_receipt_line(2)];
        let result = classify(&lines, &ClassificationContext::default());

        assert!(!result
            .entries
            .iter()
            .any(|e| matches!(e, DisplayEntry::Salesperson(_))));
    }

    #[test]
    fn test_offline_return_reference_entry() {
        let lines = vec![offline_line(1, "OFF123")];
        let result = classify(&lines, &ClassificationContext::default());

        match &result.entries[..] {
            [DisplayEntry::GroupReference(key), DisplayEntry::Line(l)] => {
                assert_eq!(key.key_string(), "OFF123\r");
                assert_eq!(key.display_label(), "OFF123");
                assert_eq!(l.line_number, 1);
            }
            other => panic!("unexpected sequence: {:?}", other),
        }
        // Only/first bucket: no separator
        assert!(separator_kinds(&result).is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_plain_and_one_transaction_bucket() {
        let lines = vec![sale_line(1), return_line(2, "txn-1")];
        let transactions = vec![transaction("txn-1", "R-0001")];
        let ctx = ClassificationContext {
            originating_transactions: &transactions,
            ..Default::default()
        };

        let result = classify(&lines, &ctx);

        // Exactly two logical buckets, exactly one separator, and the
        // separator marks the transition out of the plain bucket
        assert_eq!(separator_kinds(&result), vec![SeparatorKind::ItemLines]);
        assert_eq!(line_numbers(&result), vec![1, 2]);
        let headers: Vec<&GroupKey> = result
            .entries
            .iter()
            .filter_map(|e| match e {
                DisplayEntry::GroupReference(key) => Some(key),
                _ => None,
            })
            .collect();
        assert_eq!(headers, vec![&GroupKey::Transaction("R-0001".to_string())]);
    }

    #[test]
    fn test_transaction_buckets_follow_supplied_order() {
        // Lines arrive interleaved; buckets follow the transaction list
        let lines = vec![
            return_line(1, "txn-2"),
            return_line(2, "txn-1"),
            return_line(3, "txn-2"),
        ];
        let transactions = vec![transaction("txn-1", "R-0001"), transaction("txn-2", "R-0002")];
        let ctx = ClassificationContext {
            originating_transactions: &transactions,
            ..Default::default()
        };

        let result = classify(&lines, &ctx);

        assert_eq!(line_numbers(&result), vec![2, 1, 3]);
        assert_eq!(
            separator_kinds(&result),
            vec![SeparatorKind::ReturnTransaction]
        );
    }

    #[test]
    fn test_order_transactions_key_by_order_reference() {
        let lines = vec![return_line(1, "txn-1")];
        let transactions = vec![OriginatingTransaction {
            transaction_id: "txn-1".to_string(),
            reference_number: "R-0001".to_string(),
            order_reference_id: Some("ORD-77".to_string()),
        }];
        let ctx = ClassificationContext {
            originating_transactions: &transactions,
            ..Default::default()
        };

        let result = classify(&lines, &ctx);

        assert!(result
            .entries
            .iter()
            .any(|e| matches!(e, DisplayEntry::GroupReference(GroupKey::Transaction(r)) if r == "ORD-77")));
    }

    #[test]
    fn test_return_mode_hides_plain_lines() {
        let lines = vec![sale_line(1), return_line(2, "txn-1"), no_receipt_line(3)];
        let transactions = vec![transaction("txn-1", "R-0001")];
        let ctx = ClassificationContext {
            return_mode: true,
            originating_transactions: &transactions,
            ..Default::default()
        };

        let result = classify(&lines, &ctx);

        assert_eq!(line_numbers(&result), vec![2, 3]);
        // Both remaining buckets are return-related
        assert_eq!(
            separator_kinds(&result),
            vec![SeparatorKind::ReturnTransaction]
        );
    }

    #[test]
    fn test_bucket_precedence_plain_transactions_offline_no_receipt() {
        let lines = vec![
            no_receipt_line(4),
            offline_line(3, "OFF123"),
            return_line(2, "txn-1"),
            sale_line(1),
        ];
        let transactions = vec![transaction("txn-1", "R-0001")];
        let ctx = ClassificationContext {
            originating_transactions: &transactions,
            ..Default::default()
        };

        let result = classify(&lines, &ctx);

        assert_eq!(line_numbers(&result), vec![1, 2, 3, 4]);
        assert_eq!(
            separator_kinds(&result),
            vec![
                SeparatorKind::ItemLines,
                SeparatorKind::ReturnTransaction,
                SeparatorKind::ReturnTransaction,
            ]
        );
    }

    #[test]
    fn test_no_receipt_group_header() {
        let lines = vec![no_receipt_line(1)];
        let result = classify(&lines, &ClassificationContext::default());

        match &result.entries[..] {
            [DisplayEntry::GroupReference(GroupKey::NoReceipt), DisplayEntry::Line(_)] => {}
            other => panic!("unexpected sequence: {:?}", other),
        }
    }

    #[test]
    fn test_void_freeze_returns_previous() {
        let previous = classify(&[sale_line(1)], &ClassificationContext::default());

        // Underlying lines changed completely; the frozen display ignores them
        let changed = vec![sale_line(7), sale_line(8)];
        let ctx = ClassificationContext {
            transaction_voided: true,
            previous: Some(&previous),
            ..Default::default()
        };

        let frozen = classify(&changed, &ctx);
        assert_eq!(frozen, previous);
    }

    #[test]
    fn test_void_without_previous_is_empty() {
        let ctx = ClassificationContext {
            transaction_voided: true,
            ..Default::default()
        };
        let result = classify(&[sale_line(1)], &ctx);
        assert!(result.entries.is_empty());
    }

    #[test]
    fn test_idempotent_over_non_void_input() {
        let lines = vec![sale_line(1), return_line(2, "txn-1"), offline_line(3, "OFF1")];
        let transactions = vec![transaction("txn-1", "R-0001")];
        let ctx = ClassificationContext {
            originating_transactions: &transactions,
            ..Default::default()
        };

        let first = classify(&lines, &ctx);
        let second = classify(&lines, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_mode_bypasses_grouping() {
        // Return lines would normally bucket separately; selection mode
        // flattens everything that passes the filter into one plain bucket
        let mut locked = sale_line(2);
        locked.selectable = false;

        let lines = vec![sale_line(1), locked, return_line(3, "txn-1")];
        let filter = SelectionFilter {
            enabled: true,
            selected_line_numbers: BTreeSet::new(),
        };
        let transactions = vec![transaction("txn-1", "R-0001")];
        let ctx = ClassificationContext {
            selection: Some(&filter),
            originating_transactions: &transactions,
            ..Default::default()
        };

        let result = classify(&lines, &ctx);

        assert_eq!(line_numbers(&result), vec![1, 3]);
        assert!(!result
            .entries
            .iter()
            .any(|e| matches!(e, DisplayEntry::GroupReference(_) | DisplayEntry::Separator(_))));
    }

    #[test]
    fn test_selection_mode_includes_explicitly_selected() {
        let mut locked = sale_line(2);
        locked.selectable = false;

        let filter = SelectionFilter {
            enabled: true,
            selected_line_numbers: BTreeSet::from([2]),
        };
        let ctx = ClassificationContext {
            selection: Some(&filter),
            ..Default::default()
        };

        let result = classify(&[sale_line(1), locked], &ctx);
        assert_eq!(line_numbers(&result), vec![1, 2]);
    }

    #[test]
    fn test_multiple_offline_references_fold_with_warning() {
        let lines = vec![offline_line(1, "OFF123"), offline_line(2, "OFF999")];
        let result = classify(&lines, &ClassificationContext::default());

        // One bucket under the first-seen reference, both lines kept
        assert_eq!(line_numbers(&result), vec![1, 2]);
        let headers: Vec<String> = result
            .entries
            .iter()
            .filter_map(|e| match e {
                DisplayEntry::GroupReference(key) => Some(key.key_string()),
                _ => None,
            })
            .collect();
        assert_eq!(headers, vec!["OFF123\r".to_string()]);
        assert_eq!(
            result.warnings,
            vec![ClassifyWarning::MultipleOfflineReferences {
                kept: "OFF123".to_string(),
                ignored: vec!["OFF999".to_string()],
            }]
        );
    }

    #[test]
    fn test_unresolved_transaction_dropped_with_warning() {
        let lines = vec![return_line(1, "txn-unknown")];
        let result = classify(&lines, &ClassificationContext::default());

        assert!(result.entries.is_empty());
        assert_eq!(
            result.warnings,
            vec![ClassifyWarning::UnresolvedReturnTransaction {
                line_number: 1,
                transaction_id: Some("txn-unknown".to_string()),
            }]
        );
    }

    #[test]
    fn test_unclassified_return_line_dropped_with_warning() {
        // Return-transaction id present but provenance incomplete
        let mut partial = return_line(1, "txn-1");
        partial.subline_index_from_return_item = None;

        let transactions = vec![transaction("txn-1", "R-0001")];
        let ctx = ClassificationContext {
            originating_transactions: &transactions,
            ..Default::default()
        };

        let result = classify(&[partial], &ctx);
        assert!(result.entries.is_empty());
        assert_eq!(
            result.warnings,
            vec![ClassifyWarning::UnclassifiedReturnLine { line_number: 1 }]
        );
    }

    #[test]
    fn test_line_count_ignores_non_line_entries() {
        let lines = vec![sale_line(1), offline_line(2, "OFF123")];
        let result = classify(&lines, &ClassificationContext::default());
        assert_eq!(result.line_count(), 2);
        assert!(result.entries.len() > 2);
    }
}
