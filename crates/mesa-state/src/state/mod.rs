//! # State Module
//!
//! [`PosState`] owns one store per entity. Each store lives in its own file
//! together with the `impl PosState` block for the operations that start at
//! that entity, because most operations touch more than one store:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cross-Entity Side Effects                            │
//! │                                                                         │
//! │  Operation                 Primary store      Also touches             │
//! │  ─────────                 ─────────────      ────────────             │
//! │  create_order              OrderLedger        TableRegistry (occupied) │
//! │  add_item_to_order         OrderLedger        ProductCatalog (lookup)  │
//! │  settle_order              OrderLedger        TableRegistry, sales     │
//! │  cancel_order              OrderLedger        TableRegistry            │
//! │  reset_table_status        TableRegistry      OrderLedger (draft)      │
//! │  add/seat/cancel reserv.   ReservationBook    TableRegistry            │
//! │                                                                         │
//! │  Every successful mutation may push to the NotificationQueue.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `PosState` itself is a plain struct. Shells that call it from several
//! threads wrap it in a [`PosHandle`].

mod catalog;
mod handle;
mod notifications;
mod orders;
mod reservations;
mod tables;
mod users;

pub use catalog::ProductCatalog;
pub use handle::PosHandle;
pub use notifications::NotificationQueue;
pub use orders::OrderLedger;
pub use reservations::ReservationBook;
pub use tables::{TableRegistry, TableStatusCounts};
pub use users::UserDirectory;

use chrono::Utc;
use mesa_core::{Currency, DashboardStats, Notification, Sale, Severity};

use crate::new_id;

/// The whole POS: every entity the views can see.
#[derive(Debug, Clone, Default)]
pub struct PosState {
    tables: TableRegistry,
    catalog: ProductCatalog,
    orders: OrderLedger,
    sales: Vec<Sale>,
    notifications: NotificationQueue,
    reservations: ReservationBook,
    users: UserDirectory,
    currency: Currency,
}

impl PosState {
    /// An empty POS. See [`PosState::seeded`] for the demo data set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        tables: TableRegistry,
        catalog: ProductCatalog,
        reservations: ReservationBook,
        users: UserDirectory,
    ) -> Self {
        PosState {
            tables,
            catalog,
            reservations,
            users,
            ..Self::default()
        }
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderLedger {
        &self.orders
    }

    /// Settled orders, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn reservations(&self) -> &ReservationBook {
        &self.reservations
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Dashboard figures, recomputed from the ledger on every call.
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::compute(self.orders.all())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Posts a staff notification and returns its id.
    pub fn add_notification(&mut self, message: impl Into<String>, severity: Severity) -> String {
        let notification = Notification {
            id: new_id(),
            message: message.into(),
            severity,
            timestamp: Utc::now(),
        };
        let id = notification.id.clone();
        self.notifications.push(notification);
        id
    }

    pub fn remove_notification(&mut self, id: &str) -> bool {
        self.notifications.remove(id)
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }
}
