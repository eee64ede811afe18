//! # Error Types
//!
//! Domain-specific error types for mesa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mesa-core errors (this file)                                          │
//! │  ├── CoreError        - Unknown ids, illegal transitions, payments     │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  mesa-state errors (separate crate)                                    │
//! │  └── StateError       - Config and session storage failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StateError → View                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Contract
//! A mutation that returns `Err` has changed nothing. Views that only care
//! about the happy path may ignore the error; the state is exactly as it was.

use thiserror::Error;

use crate::money::Money;
use crate::types::{OrderStatus, ReservationStatus, TableStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but was deactivated in the catalog.
    #[error("Product {0} is not active")]
    ProductInactive(String),

    #[error("Modifier {modifier_id} is not offered for product {product_id}")]
    ModifierNotFound {
        product_id: String,
        modifier_id: String,
    },

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Item {item_id} not found on order {order_id}")]
    OrderItemNotFound { order_id: String, item_id: String },

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No order is being built for the table.
    ///
    /// ## When This Occurs
    /// - The waiter never opened an order on the table
    /// - The order was already sent to the kitchen (no longer editable)
    /// - The order was cancelled
    #[error("Table {table_id} has no order in progress")]
    NoDraftOrder { table_id: String },

    /// The table already has an order being built.
    #[error("Table {table_id} already has order {order_id} in progress")]
    DraftAlreadyOpen { table_id: String, order_id: String },

    #[error("Table {table_id} cannot go from {from} to {to}")]
    InvalidTableTransition {
        table_id: String,
        from: TableStatus,
        to: TableStatus,
    },

    #[error("Order {order_id} cannot go from {from} to {to}")]
    InvalidOrderTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Reservation {reservation_id} cannot go from {from} to {to}")]
    InvalidReservationTransition {
        reservation_id: String,
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// Tendered payments do not cover the order total.
    ///
    /// ## User Workflow
    /// ```text
    /// Order total: $19.99
    ///      │
    ///      ▼
    /// Card $10.00 + Cash $5.00 = $15.00
    ///      │
    ///      ▼
    /// InsufficientPayment { required: $19.99, paid: $15.00 }
    ///      │
    ///      ▼
    /// Cashier adds another tender, order stays `ready`
    /// ```
    #[error("Payment of {paid} does not cover total {required}")]
    InsufficientPayment { required: Money, paid: Money },

    #[error("User {0} is inactive")]
    UserInactive(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised by the add/edit forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
