//! # Kitchen Display
//!
//! Read-only tickets for the orders the kitchen is working on, oldest first.
//! Ages are computed from the wall clock passed in, never stored.
//!
//! ```text
//! ┌──────────── Mesa 3 ─────────── 12 min ─┐
//! │  2× Hamburguesa Clásica                 │   urgency:
//! │     + Extra queso                       │     < warning        on time
//! │     "sin pepinillos"                    │     < late           delayed
//! │  1× Café Americano                      │     otherwise        late
//! └─────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use mesa_core::{Order, OrderItem, OrderItemStatus, OrderStatus};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::KitchenSettings;
use crate::state::PosState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    OnTime,
    Delayed,
    Late,
}

impl Urgency {
    /// ```rust
    /// use mesa_state::{KitchenSettings, Urgency};
    ///
    /// let settings = KitchenSettings::default();
    /// assert_eq!(Urgency::classify(9, &settings), Urgency::OnTime);
    /// assert_eq!(Urgency::classify(10, &settings), Urgency::Delayed);
    /// assert_eq!(Urgency::classify(20, &settings), Urgency::Late);
    /// ```
    pub fn classify(elapsed_minutes: i64, settings: &KitchenSettings) -> Urgency {
        if elapsed_minutes < settings.warning_after_minutes {
            Urgency::OnTime
        } else if elapsed_minutes < settings.late_after_minutes {
            Urgency::Delayed
        } else {
            Urgency::Late
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenLine {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    /// Modifier names as printed on the ticket.
    pub modifiers: Vec<String>,
    pub notes: Option<String>,
    pub status: OrderItemStatus,
}

impl From<&OrderItem> for KitchenLine {
    fn from(item: &OrderItem) -> Self {
        KitchenLine {
            item_id: item.id.clone(),
            name: item.product.name.clone(),
            quantity: item.quantity,
            modifiers: item.modifiers.iter().map(|m| m.name.clone()).collect(),
            notes: Some(item.notes.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            status: item.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub order_id: String,
    pub table_id: String,
    /// `None` if the table was removed from the floor plan.
    pub table_number: Option<u32>,
    pub waiter_id: String,
    pub status: OrderStatus,
    pub elapsed_minutes: i64,
    pub urgency: Urgency,
    pub lines: Vec<KitchenLine>,
}

impl KitchenTicket {
    pub fn from_order(
        order: &Order,
        table_number: Option<u32>,
        now: DateTime<Utc>,
        settings: &KitchenSettings,
    ) -> Self {
        let elapsed_minutes = (now - order.created_at).num_minutes().max(0);
        KitchenTicket {
            order_id: order.id.clone(),
            table_id: order.table_id.clone(),
            table_number,
            waiter_id: order.waiter_id.clone(),
            status: order.status,
            elapsed_minutes,
            urgency: Urgency::classify(elapsed_minutes, settings),
            lines: order.items.iter().map(KitchenLine::from).collect(),
        }
    }

    /// Total portions on the ticket.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl PosState {
    /// Tickets for every sent or preparing order, oldest first.
    pub fn kitchen_queue(&self, now: DateTime<Utc>, settings: &KitchenSettings) -> Vec<KitchenTicket> {
        let mut orders: Vec<&Order> = self.orders().in_kitchen().collect();
        orders.sort_by_key(|o| o.created_at);

        orders
            .into_iter()
            .map(|order| {
                let number = self.tables().get(&order.table_id).map(|t| t.number);
                KitchenTicket::from_order(order, number, now, settings)
            })
            .collect()
    }
}
