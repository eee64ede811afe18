//! # Dashboard Statistics
//!
//! Read-only figures derived from the order ledger. Recomputed on every read;
//! nothing is cached, so the numbers can never drift from the orders.
//!
//! ```text
//! ┌───────────────────┬──────────────────────────────────────────────┐
//! │ Figure            │ Orders counted                               │
//! ├───────────────────┼──────────────────────────────────────────────┤
//! │ total sales       │ completed (Σ total)                          │
//! │ tables served     │ completed                                    │
//! │ open orders       │ open, sent, preparing                        │
//! │ completed orders  │ completed                                    │
//! │ average ticket    │ completed (mean total)                       │
//! └───────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! The average ticket is scoped to completed orders like the other revenue
//! figures. Unpaid and cancelled tickets would otherwise drag it around.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sales_cents: i64,
    pub tables_served: usize,
    pub open_orders: usize,
    pub completed_orders: usize,
    pub average_ticket_cents: i64,
}

impl DashboardStats {
    /// Computes every figure in one pass over the ledger.
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use mesa_core::{DashboardStats, Order, OrderStatus};
    ///
    /// let mut paid = Order::new("o1".into(), "1", "w1", Utc::now());
    /// paid.status = OrderStatus::Completed;
    /// paid.total_cents = 1999;
    ///
    /// let open = Order::new("o2".into(), "2", "w1", Utc::now());
    ///
    /// let stats = DashboardStats::compute(&[paid, open]);
    /// assert_eq!(stats.total_sales_cents, 1999);
    /// assert_eq!(stats.open_orders, 1);
    /// assert_eq!(stats.average_ticket_cents, 1999);
    /// ```
    pub fn compute(orders: &[Order]) -> Self {
        let mut total_sales = Money::zero();
        let mut completed = 0usize;
        let mut open = 0usize;

        for order in orders {
            if order.status == OrderStatus::Completed {
                total_sales += order.total();
                completed += 1;
            } else if order.status.is_unfinished() {
                open += 1;
            }
        }

        DashboardStats {
            total_sales_cents: total_sales.cents(),
            tables_served: completed,
            open_orders: open,
            completed_orders: completed,
            average_ticket_cents: total_sales.average_over(completed).cents(),
        }
    }

    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_cents(self.total_sales_cents)
    }

    #[inline]
    pub fn average_ticket(&self) -> Money {
        Money::from_cents(self.average_ticket_cents)
    }
}
