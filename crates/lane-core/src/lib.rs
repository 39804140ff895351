//! # lane-core: Pure Display Logic for Lane POS
//!
//! This crate is the **heart** of the Lane POS display layer. It decides what
//! rows appear in the transaction display list, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lane POS Display Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Business-Rules Engine (external)                │   │
//! │  │      owns transactions, tax, pricing; hands us display lines   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ItemDisplayLine[]                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ★ lane-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ classify  │  │   money   │  │ validation│  │   │
//! │  │   │  Line     │  │ Basket    │  │  Money    │  │   rules   │  │   │
//! │  │   │  Employee │  │ Classifier│  │ (display) │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DisplayEntry[]                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Rendering Frontend (external)                   │   │
//! │  │      maps each tagged entry to a visual row template           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ItemDisplayLine, Employee, DisplayEntry, etc.)
//! - [`classify`] - The basket line classifier
//! - [`money`] - Display-amount type with integer cents (no floating point!)
//! - [`error`] - Domain error types and classifier warnings
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Monetary values are engine-supplied cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use lane_core::classify::{classify, ClassificationContext};
//! use lane_core::types::ItemDisplayLine;
//!
//! let lines: Vec<ItemDisplayLine> = Vec::new();
//! let ctx = ClassificationContext::default();
//!
//! // An empty basket classifies to an empty sequence
//! let result = classify(&lines, &ctx);
//! assert!(result.entries.is_empty());
//! assert!(result.warnings.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classify;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lane_core::Money` instead of
// `use lane_core::money::Money`

pub use classify::{classify, Classification, ClassificationContext};
pub use error::{ClassifyWarning, CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Group key text for the plain item-lines bucket.
///
/// This bucket holds ordinary sale/order/fulfillment lines. It is never
/// rendered as a reference row; the constant exists so the flattened key
/// namespace stays disjoint from real transaction references.
pub const ITEM_LINES_GROUPING: &str = "itemLines";

/// Group key text for return lines with no receipt cross-reference at all.
pub const NO_RECEIPT_GROUP_KEY: &str = "noreceipt";

/// Suffix appended to an offline return reference to form its group key.
///
/// A carriage return can never appear in a validated reference number, so an
/// offline key can never collide with a regular transaction reference that
/// shares the same literal text.
pub const OFFLINE_REFERENCE_SUFFIX: char = '\r';

/// Reserved employee number for the "no salesperson" sentinel.
pub const NONE_EMPLOYEE_NUMBER: &str = "__none";

/// Fallback label for the "no salesperson" sentinel when no localized label
/// is configured.
pub const DEFAULT_NONE_SALESPERSON_LABEL: &str = "None";

/// Maximum lines allowed in a single basket.
///
/// ## Business Reason
/// Prevents runaway baskets and keeps the display list renderable.
/// Can be made configurable per-store in future versions.
pub const MAX_BASKET_LINES: usize = 100;

/// Maximum quantity of a single line in a basket.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., scanning 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
