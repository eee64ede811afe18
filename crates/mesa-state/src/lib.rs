//! # mesa-state: Application State for Mesa POS
//!
//! The explicit state container behind every Mesa POS view. Views never own
//! entities; they read through [`PosState`] accessors and change things
//! through its operations, which keep tables, orders and reservations
//! consistent with each other and post staff notifications.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         mesa-state                                      │
//! │                                                                         │
//! │   PosHandle (Arc<Mutex<PosState>>)                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────────────────────── PosState ───────────────────────────┐  │
//! │   │  TableRegistry   ProductCatalog   OrderLedger   sales: Vec<Sale> │  │
//! │   │  ReservationBook UserDirectory    NotificationQueue   currency   │  │
//! │   └──────────────────────────────────────────────────────────────────┘  │
//! │        │ projections (read only)                                        │
//! │        ▼                                                                │
//! │   kitchen_queue   SalesReport   Invoice   DashboardStats                │
//! │                                                                         │
//! │   PosConfig (TOML + MESA_* env)      Session (currentUser, theme)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Contract
//! Every operation keyed by an id returns `Err` when the id is unknown or the
//! move is illegal, and in that case nothing has changed and no notification
//! was posted.
//!
//! ## Example
//! ```rust
//! use mesa_core::{NewOrderItem, OrderStatus, Payment, TableStatus};
//! use mesa_state::PosState;
//!
//! let mut pos = PosState::seeded();
//!
//! let order = pos.create_order("1", "w1").unwrap();
//! pos.add_item_to_order("1", NewOrderItem::new("1", 1)).unwrap();
//! pos.add_item_to_order("1", NewOrderItem::new("3", 2)).unwrap();
//! pos.send_order_to_kitchen("1").unwrap();
//! pos.mark_ready(&order.id).unwrap();
//!
//! let sale = pos.settle_order(&order.id, vec![Payment::card(1999)]).unwrap();
//! assert_eq!(sale.total_cents, 1999);
//! assert_eq!(pos.tables().get("1").unwrap().status, TableStatus::Available);
//! assert_eq!(pos.orders().get(&order.id).unwrap().status, OrderStatus::Completed);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod invoice;
pub mod kitchen;
pub mod reports;
pub mod seed;
pub mod session;
pub mod state;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{KitchenSettings, PosConfig};
pub use error::{StateError, StateResult};
pub use invoice::{Invoice, InvoiceLine};
pub use kitchen::{KitchenLine, KitchenTicket, Urgency};
pub use reports::{ProductSales, ReportPeriod, SalesReport, TableRevenue};
pub use session::{JsonFileStore, KeyValueStore, MemoryStore, Session, Theme};
pub use state::{
    NotificationQueue, OrderLedger, PosHandle, PosState, ProductCatalog, ReservationBook,
    TableRegistry, TableStatusCounts, UserDirectory,
};

/// Fresh time-ordered identifier for a new entity.
pub(crate) fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
