//! # mesa-core: Pure Business Logic for Mesa POS
//!
//! Domain types and rules for a restaurant point of sale: tables, the menu,
//! orders moving through the kitchen, payments, reservations and the
//! dashboard figures derived from them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Mesa POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Views (tables, POS, KDS, cashier)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PosState accessors                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  mesa-state (stores + side effects)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ mesa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stats   │  │ validation│  │   │
//! │  │   │  Table    │  │   Money   │  │ Dashboard │  │   rules   │  │   │
//! │  │   │  Order    │  │ Currency  │  │   Stats   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Table, Product, Order, Reservation, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`currency`] - Currency symbols and display formatting
//! - [`stats`] - Dashboard statistics derived from the order ledger
//! - [`error`] - Domain error types
//! - [`validation`] - Form and business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use mesa_core::money::Money;
//!
//! let burger = Money::from_cents(1299);
//! let coffee = Money::from_cents(350);
//!
//! let total = burger + coffee * 2;
//! assert_eq!(total.cents(), 1999);
//! assert_eq!(total.to_string(), "$19.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::Currency;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stats::DashboardStats;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines on a single order.
///
/// Keeps a runaway ticket from flooding the kitchen display.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single order line (typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest party a reservation may be booked for.
pub const MAX_PARTY_SIZE: u32 = 50;

/// Highest menu price, and the largest modifier delta either way ($100,000).
pub const MAX_PRICE_CENTS: i64 = 10_000_000;

/// Largest single tender or cash handed over ($10,000,000).
pub const MAX_PAYMENT_CENTS: i64 = 1_000_000_000;

/// Largest total one order may reach ($10,000,000).
pub const MAX_ORDER_TOTAL_CENTS: i64 = 1_000_000_000;
