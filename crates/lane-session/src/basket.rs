//! # Basket State
//!
//! Holds the current basket's display lines and their mutations.
//!
//! ## Thread Safety
//! The basket is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple shell callbacks may access/modify the basket
//! 2. Only one callback should modify the basket at a time
//! 3. Host frameworks can dispatch callbacks concurrently
//!
//! ## Basket Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket State Operations                              │
//! │                                                                         │
//! │  Engine Event             Shell Operation          Basket State Change  │
//! │  ────────────             ───────────────          ───────────────────  │
//! │                                                                         │
//! │  Line qualified ─────────► add_line() ───────────► lines.push(line)    │
//! │                                                                         │
//! │  Attribution changed ────► assign_salesperson() ──► lines[i].sp = emp   │
//! │                                                                         │
//! │  Line voided ────────────► remove_line() ────────► lines.remove(i)     │
//! │                                                                         │
//! │  Transaction closed ─────► clear() ──────────────► lines.clear()       │
//! │                                                                         │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use lane_core::error::{CoreError, CoreResult};
use lane_core::types::{Employee, ItemDisplayLine};
use lane_core::validation::{validate_line_number, validate_quantity, validate_uuid};
use lane_core::MAX_BASKET_LINES;

/// The in-progress set of display lines for the current transaction.
///
/// ## Invariants
/// - Line numbers are unique within the basket
/// - Lines keep their insertion order (the classifier never sorts)
/// - Maximum lines: 100 (configured in lane-core)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    /// Lines in the basket, in engine-append order.
    lines: Vec<ItemDisplayLine>,

    /// When the basket was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Basket {
    /// Creates a new empty basket.
    pub fn new() -> Self {
        Basket {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends an engine-supplied line to the basket.
    ///
    /// ## Behavior
    /// Validates id format, line number, and quantity before the line
    /// enters display state; a rejected line never reaches the classifier.
    pub fn add_line(&mut self, line: ItemDisplayLine) -> CoreResult<()> {
        validate_uuid(&line.id)?;
        validate_line_number(line.line_number)?;
        validate_quantity(line.quantity)?;

        if self.lines.len() >= MAX_BASKET_LINES {
            return Err(CoreError::BasketTooLarge {
                max: MAX_BASKET_LINES,
            });
        }

        if self.lines.iter().any(|l| l.line_number == line.line_number) {
            return Err(CoreError::DuplicateLineNumber {
                line_number: line.line_number,
            });
        }

        self.lines.push(line);
        Ok(())
    }

    /// Removes a line from the basket by line number.
    pub fn remove_line(&mut self, line_number: u32) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.line_number != line_number);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound { line_number })
        } else {
            Ok(())
        }
    }

    /// Changes a line's salesperson attribution.
    ///
    /// ## Behavior
    /// `None` clears the attribution; the classifier will attach the line
    /// to the "none" sentinel sub-group.
    pub fn assign_salesperson(
        &mut self,
        line_number: u32,
        salesperson: Option<Employee>,
    ) -> CoreResult<()> {
        match self.lines.iter_mut().find(|l| l.line_number == line_number) {
            Some(line) => {
                line.salesperson = salesperson;
                Ok(())
            }
            None => Err(CoreError::LineNotFound { line_number }),
        }
    }

    /// Clears all lines from the basket.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[ItemDisplayLine] {
        &self.lines
    }

    /// Returns the number of lines in the basket.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The next free line number (engine line numbers start at 1).
    pub fn next_line_number(&self) -> u32 {
        self.lines
            .iter()
            .map(|l| l.line_number)
            .max()
            .map_or(1, |n| n + 1)
    }

    /// Checks if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Basket {
    fn default() -> Self {
        Basket::new()
    }
}

/// Shared basket state for host frameworks.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Basket>>`:
/// - `Arc`: shared ownership across callbacks
/// - `Mutex`: one mutation at a time
#[derive(Debug, Clone)]
pub struct BasketState {
    basket: Arc<Mutex<Basket>>,
}

impl BasketState {
    /// Creates a new empty basket state.
    pub fn new() -> Self {
        BasketState {
            basket: Arc::new(Mutex::new(Basket::new())),
        }
    }

    /// Executes a function with read access to the basket.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = basket_state.with_basket(|b| b.line_count());
    /// ```
    pub fn with_basket<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Basket) -> R,
    {
        let basket = self.basket.lock().expect("Basket mutex poisoned");
        f(&basket)
    }

    /// Executes a function with write access to the basket.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// basket_state.with_basket_mut(|b| b.add_line(line))?;
    /// ```
    pub fn with_basket_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Basket) -> R,
    {
        let mut basket = self.basket.lock().expect("Basket mutex poisoned");
        f(&mut basket)
    }
}

impl Default for BasketState {
    fn default() -> Self {
        Self::new()
    }
}
