//! # lane-session: Display Session Shell for Lane POS
//!
//! The stateful layer between the pure classifier ([`lane_core`]) and the
//! host UI: basket line state, the cached display sequence, recompute
//! triggers, and display configuration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Lane POS Session Layer                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  lane-session (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────────┐│   │
//! │  │  │   Basket    │  │DisplaySession│  │ DisplayConfig / Totals  ││   │
//! │  │  │ (basket.rs) │  │ (session.rs) │  │ (config.rs, totals.rs)  ││   │
//! │  │  │             │  │              │  │                         ││   │
//! │  │  │ Line state, │  │ Context +    │  │ TOML + env settings,    ││   │
//! │  │  │ mutations   │◄─│ cached       │  │ footer summary          ││   │
//! │  │  │             │  │ sequence     │  │                         ││   │
//! │  │  └─────────────┘  └──────────────┘  └─────────────────────────┘│   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  DEPENDENCIES:                                                         │
//! │  • lane-core: classifier, domain types, validation                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod config;
pub mod error;
pub mod session;
pub mod totals;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketState};
pub use config::{ConfigError, DisplayConfig};
pub use error::{SessionError, SessionResult};
pub use session::DisplaySession;
pub use totals::BasketTotals;
