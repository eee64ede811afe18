//! # Order Ledger
//!
//! Every order ever opened, plus the orders still being built at the POS
//! ("drafts"), keyed by the table they are for.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Lifecycle                                    │
//! │                                                                         │
//! │  Waiter                 Kitchen                Cashier                  │
//! │  ──────                 ───────                ───────                  │
//! │                                                                         │
//! │  create_order ──► open (draft, editable)                               │
//! │    table → occupied      │                                              │
//! │                          │ add / update / remove items                 │
//! │                          ▼                                              │
//! │  send_order_to_kitchen ─► sent ──► start_preparing ──► preparing       │
//! │    draft slot cleared     │                               │             │
//! │                           └──────── mark_ready ◄──────────┘             │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                      ready ──► settle_order ──► completed
//! │                                               table → available        │
//! │                                               Sale recorded            │
//! │                                                                         │
//! │  cancel_order: open | sent | preparing ──► cancelled                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Drafts
//! Each table has at most one draft. Only drafts accept item changes; once an
//! order is sent, POS edits against its table fail with `NoDraftOrder` and
//! leave the sent order exactly as it was.

use std::collections::HashMap;

use chrono::Utc;
use mesa_core::validation::{
    validate_order_size, validate_order_total, validate_payment_amount, validate_required,
    validate_tendered,
};
use mesa_core::{
    CoreError, CoreResult, Money, NewOrderItem, Order, OrderItem, OrderItemPatch,
    OrderItemStatus, OrderStatus, Payment, PaymentMethod, Sale, Severity, TableStatus,
    ValidationError,
};
use tracing::{debug, info, warn};

use super::PosState;
use crate::new_id;

// =============================================================================
// Ledger
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
    /// table id → id of the order being built on it
    drafts: HashMap<String, String>,
}

impl OrderLedger {
    /// All orders, oldest first.
    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// The order being built on `table_id`, if any.
    pub fn current_order(&self, table_id: &str) -> Option<&Order> {
        self.drafts.get(table_id).and_then(|id| self.get(id))
    }

    /// Number of tables with an order being built.
    pub fn draft_count(&self) -> usize {
        self.drafts.len()
    }

    pub fn with_status(&self, status: OrderStatus) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |o| o.status == status)
    }

    /// Orders the kitchen is working on (sent or preparing).
    pub fn in_kitchen(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.status.is_in_kitchen())
    }

    /// Orders waiting at the cashier.
    pub fn ready_to_pay(&self) -> impl Iterator<Item = &Order> {
        self.with_status(OrderStatus::Ready)
    }

    pub fn for_table<'a>(&'a self, table_id: &'a str) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| o.table_id == table_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn require(&self, id: &str) -> CoreResult<&Order> {
        self.get(id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))
    }

    fn require_mut(&mut self, id: &str) -> CoreResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))
    }

    fn draft(&self, table_id: &str) -> CoreResult<&Order> {
        self.current_order(table_id)
            .ok_or_else(|| CoreError::NoDraftOrder {
                table_id: table_id.to_string(),
            })
    }

    fn draft_mut(&mut self, table_id: &str) -> CoreResult<&mut Order> {
        let order_id = self
            .drafts
            .get(table_id)
            .ok_or_else(|| CoreError::NoDraftOrder {
                table_id: table_id.to_string(),
            })?;
        self.orders
            .iter_mut()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| CoreError::NoDraftOrder {
                table_id: table_id.to_string(),
            })
    }

    /// Drops the draft slot of an order, wherever it is.
    fn forget_draft(&mut self, order_id: &str) {
        self.drafts.retain(|_, draft| draft != order_id);
    }
}

// =============================================================================
// Point of Sale (drafts)
// =============================================================================

impl PosState {
    /// Opens an order on a table and seats it.
    ///
    /// ## Errors
    /// - `TableNotFound` for an unknown table
    /// - `DraftAlreadyOpen` if the table already has an order being built
    /// - `InvalidTableTransition` if the table cannot be occupied (dirty)
    pub fn create_order(&mut self, table_id: &str, waiter_id: &str) -> CoreResult<Order> {
        validate_required("waiter", waiter_id)?;

        let table = self.tables.require(table_id)?;
        if let Some(existing) = self.orders.drafts.get(table_id) {
            return Err(CoreError::DraftAlreadyOpen {
                table_id: table_id.to_string(),
                order_id: existing.clone(),
            });
        }
        if !table.status.can_transition_to(TableStatus::Occupied) {
            return Err(CoreError::InvalidTableTransition {
                table_id: table_id.to_string(),
                from: table.status,
                to: TableStatus::Occupied,
            });
        }
        let number = table.number;

        let order = Order::new(new_id(), table_id, waiter_id, Utc::now());

        let table = self.tables.require_mut(table_id)?;
        table.status = TableStatus::Occupied;
        table.current_order = Some(order.id.clone());

        self.orders
            .drafts
            .insert(table_id.to_string(), order.id.clone());
        self.orders.orders.push(order.clone());

        info!(order_id = %order.id, table_id = %table_id, waiter_id = %waiter_id, "Order opened");
        self.add_notification(format!("Pedido iniciado en Mesa {}", number), Severity::Info);
        Ok(order)
    }

    /// Rings up a product on the table's draft and recomputes its total.
    pub fn add_item_to_order(&mut self, table_id: &str, line: NewOrderItem) -> CoreResult<OrderItem> {
        let draft = self.orders.draft(table_id)?;
        validate_order_size(draft.items.len())?;

        let product = self.catalog.require(&line.product_id)?;
        let item = line.into_item(new_id(), product)?;
        validate_order_total(draft.items.iter().chain(std::iter::once(&item)))?;

        let order = self.orders.draft_mut(table_id)?;
        order.items.push(item.clone());
        order.recalculate_total(Utc::now());

        debug!(
            order_id = %order.id,
            product = %item.product.name,
            quantity = item.quantity,
            total = %order.total(),
            "Item added"
        );
        Ok(item)
    }

    /// Changes a line on the table's draft. A rejected patch changes nothing.
    pub fn update_order_item(
        &mut self,
        table_id: &str,
        item_id: &str,
        patch: &OrderItemPatch,
    ) -> CoreResult<OrderItem> {
        let order = self.orders.draft_mut(table_id)?;
        let index = item_index(order, item_id)?;
        let updated = patch.apply(&order.items[index])?;
        validate_order_total(
            order
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| if i == index { &updated } else { item }),
        )?;

        order.items[index] = updated.clone();
        order.recalculate_total(Utc::now());

        debug!(order_id = %order.id, item_id = %item_id, total = %order.total(), "Item updated");
        Ok(updated)
    }

    /// Takes a line off the table's draft and returns it.
    pub fn remove_item_from_order(&mut self, table_id: &str, item_id: &str) -> CoreResult<OrderItem> {
        let order = self.orders.draft_mut(table_id)?;
        let index = item_index(order, item_id)?;

        let removed = order.items.remove(index);
        order.recalculate_total(Utc::now());

        debug!(order_id = %order.id, item_id = %item_id, total = %order.total(), "Item removed");
        Ok(removed)
    }

    /// Hands the table's draft to the kitchen. The order is no longer
    /// editable from the POS afterwards.
    ///
    /// ## Errors
    /// - `NoDraftOrder` if nothing is being built on the table
    /// - `Validation` if the order has no lines
    pub fn send_order_to_kitchen(&mut self, table_id: &str) -> CoreResult<Order> {
        let draft = self.orders.draft(table_id)?;
        if draft.items.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }

        let order = self.orders.draft_mut(table_id)?;
        order.transition(OrderStatus::Sent, Utc::now())?;
        let sent = order.clone();
        self.orders.drafts.remove(table_id);

        info!(order_id = %sent.id, table_id = %table_id, lines = sent.items.len(), total = %sent.total(), "Order sent to kitchen");
        let number = self.tables.label(table_id);
        self.add_notification(
            format!("Pedido enviado a cocina - Mesa {}", number),
            Severity::Success,
        );
        Ok(sent)
    }

    /// Cancels the draft on a table, if there is one. Used when the table is
    /// released before the order was sent.
    pub(crate) fn discard_draft(&mut self, table_id: &str) -> Option<String> {
        let order_id = self.orders.drafts.remove(table_id)?;
        if let Ok(order) = self.orders.require_mut(&order_id) {
            if order.transition(OrderStatus::Cancelled, Utc::now()).is_ok() {
                warn!(order_id = %order_id, table_id = %table_id, "Draft order discarded");
            }
        }
        Some(order_id)
    }
}

fn item_index(order: &Order, item_id: &str) -> CoreResult<usize> {
    order
        .items
        .iter()
        .position(|i| i.id == item_id)
        .ok_or_else(|| CoreError::OrderItemNotFound {
            order_id: order.id.clone(),
            item_id: item_id.to_string(),
        })
}

// =============================================================================
// Kitchen and Cashier
// =============================================================================

impl PosState {
    /// The kitchen picked the ticket up.
    pub fn start_preparing(&mut self, order_id: &str) -> CoreResult<()> {
        let order = self.orders.require_mut(order_id)?;
        order.transition(OrderStatus::Preparing, Utc::now())?;
        for item in &mut order.items {
            if item.status == OrderItemStatus::Pending {
                item.status = OrderItemStatus::Preparing;
            }
        }

        info!(order_id = %order_id, "Order preparing");
        Ok(())
    }

    /// The kitchen finished cooking; the order waits for the cashier.
    pub fn mark_ready(&mut self, order_id: &str) -> CoreResult<()> {
        let order = self.orders.require_mut(order_id)?;
        order.transition(OrderStatus::Ready, Utc::now())?;
        for item in &mut order.items {
            if item.status != OrderItemStatus::Served {
                item.status = OrderItemStatus::Ready;
            }
        }
        let table_id = order.table_id.clone();

        info!(order_id = %order_id, table_id = %table_id, "Order ready");
        let number = self.tables.label(&table_id);
        self.add_notification(
            format!("Pedido listo para cobrar - Mesa {}", number),
            Severity::Info,
        );
        Ok(())
    }

    /// Takes payment for a ready order and frees its table.
    ///
    /// ## Change
    /// Change is what cash tenders hand back plus anything applied beyond the
    /// total.
    ///
    /// ## Errors
    /// - `OrderNotFound`, `InvalidOrderTransition` (order not ready)
    /// - `Validation` for a non-positive amount or cash tendered below the
    ///   amount it covers
    /// - `InsufficientPayment` if the amounts do not cover the total
    pub fn settle_order(&mut self, order_id: &str, payments: Vec<Payment>) -> CoreResult<Sale> {
        let order = self.orders.require(order_id)?;
        if !order.status.can_transition_to(OrderStatus::Completed) {
            return Err(CoreError::InvalidOrderTransition {
                order_id: order_id.to_string(),
                from: order.status,
                to: OrderStatus::Completed,
            });
        }

        for payment in &payments {
            validate_payment_amount(payment.amount_cents)?;
            if let (PaymentMethod::Cash, Some(tendered)) = (payment.method, payment.tendered_cents) {
                validate_tendered(payment.amount_cents, tendered)?;
            }
        }

        let too_much = || ValidationError::OutOfRange {
            field: "payments".to_string(),
            min: 1,
            max: i64::MAX,
        };
        let total = order.total();
        let paid = Money::checked_sum(payments.iter().map(Payment::amount)).ok_or_else(too_much)?;
        if paid < total {
            return Err(CoreError::InsufficientPayment {
                required: total,
                paid,
            });
        }
        let change = Money::checked_sum(payments.iter().map(Payment::change))
            .and_then(|cash| cash.checked_add(paid - total))
            .ok_or_else(too_much)?;

        let now = Utc::now();
        let order = self.orders.require_mut(order_id)?;
        order.transition(OrderStatus::Completed, now)?;
        let table_id = order.table_id.clone();

        let sale = Sale {
            id: new_id(),
            order_id: order_id.to_string(),
            total_cents: total.cents(),
            payments,
            change_cents: change.cents(),
            created_at: now,
        };
        self.sales.push(sale.clone());

        let released = self.release_table_for(&table_id, order_id);
        info!(
            order_id = %order_id,
            table_id = %table_id,
            total = %total,
            paid = %paid,
            change = %change,
            released,
            "Order settled"
        );

        let number = self.tables.label(&table_id);
        self.add_notification(
            format!("Pago completado - Mesa {} ahora disponible", number),
            Severity::Success,
        );
        Ok(sale)
    }

    /// Voids an order that has not been paid. A table still serving it is
    /// freed.
    pub fn cancel_order(&mut self, order_id: &str) -> CoreResult<()> {
        let order = self.orders.require_mut(order_id)?;
        order.transition(OrderStatus::Cancelled, Utc::now())?;
        let table_id = order.table_id.clone();

        self.orders.forget_draft(order_id);
        let table_serving = self
            .tables
            .get(&table_id)
            .is_some_and(|t| t.current_order.as_deref() == Some(order_id));
        if table_serving {
            self.release_table_for(&table_id, order_id);
        }

        warn!(order_id = %order_id, table_id = %table_id, "Order cancelled");
        let number = self.tables.label(&table_id);
        self.add_notification(format!("Pedido cancelado - Mesa {}", number), Severity::Warning);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::NewProduct;

    /// Seeded POS with an open order on table 1 holding burger ×1 and coffee ×2.
    fn pos_with_draft() -> (PosState, Order) {
        let mut pos = PosState::seeded();
        let order = pos.create_order("1", "w1").unwrap();
        pos.add_item_to_order("1", NewOrderItem::new("1", 1)).unwrap();
        pos.add_item_to_order("1", NewOrderItem::new("3", 2)).unwrap();
        (pos, order)
    }

    fn ready_order() -> (PosState, String) {
        let (mut pos, order) = pos_with_draft();
        pos.send_order_to_kitchen("1").unwrap();
        pos.mark_ready(&order.id).unwrap();
        (pos, order.id)
    }

    #[test]
    fn test_create_order_occupies_table() {
        let mut pos = PosState::seeded();
        let order = pos.create_order("1", "w1").unwrap();

        assert_eq!(pos.orders().len(), 1);
        assert_eq!(order.table_id, "1");
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.total_cents, 0);
        assert!(order.items.is_empty());

        let table = pos.tables().get("1").unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.current_order.as_deref(), Some(order.id.as_str()));

        assert_eq!(pos.orders().draft_count(), 1);
        assert_eq!(pos.orders().current_order("1").unwrap().id, order.id);
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Pedido iniciado en Mesa 1"
        );
    }

    #[test]
    fn test_create_order_guards() {
        let mut pos = PosState::seeded();
        let order = pos.create_order("1", "w1").unwrap();

        assert_eq!(
            pos.create_order("1", "w2"),
            Err(CoreError::DraftAlreadyOpen {
                table_id: "1".to_string(),
                order_id: order.id.clone(),
            })
        );
        assert_eq!(
            pos.create_order("99", "w1"),
            Err(CoreError::TableNotFound("99".to_string()))
        );

        pos.set_table_status("3", TableStatus::Occupied).unwrap();
        pos.set_table_status("3", TableStatus::Dirty).unwrap();
        assert!(matches!(
            pos.create_order("3", "w1"),
            Err(CoreError::InvalidTableTransition { .. })
        ));
        assert_eq!(pos.orders().len(), 1);
    }

    #[test]
    fn test_drafts_are_per_table() {
        let mut pos = PosState::seeded();
        let first = pos.create_order("1", "w1").unwrap();
        let second = pos.create_order("3", "w2").unwrap();

        pos.add_item_to_order("1", NewOrderItem::new("1", 1)).unwrap();
        pos.add_item_to_order("3", NewOrderItem::new("2", 2)).unwrap();

        assert_eq!(pos.orders().get(&first.id).unwrap().total_cents, 1299);
        assert_eq!(pos.orders().get(&second.id).unwrap().total_cents, 3198);
        assert_eq!(pos.orders().draft_count(), 2);
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let (pos, order) = pos_with_draft();
        let order = pos.orders().get(&order.id).unwrap();

        assert_eq!(order.total_cents, 1999);
        assert_eq!(order.total().to_string(), "$19.99");
        assert_eq!(order.item_count(), 3);
        assert!(order
            .items
            .iter()
            .all(|i| i.status == OrderItemStatus::Pending));
    }

    #[test]
    fn test_total_includes_modifiers() {
        let mut pos = PosState::seeded();
        pos.create_order("1", "w1").unwrap();
        pos.add_item_to_order("1", NewOrderItem::new("1", 2).with_modifiers(["1", "2"]))
            .unwrap();

        assert_eq!(pos.orders().current_order("1").unwrap().total_cents, 2 * (1299 + 150));
    }

    #[test]
    fn test_add_then_remove_is_total_neutral() {
        let (mut pos, _) = pos_with_draft();
        let before = pos.orders().current_order("1").unwrap().total();

        let item = pos
            .add_item_to_order("1", NewOrderItem::new("6", 3).with_notes("sin sal"))
            .unwrap();
        assert_eq!(
            pos.orders().current_order("1").unwrap().total(),
            before + Money::from_cents(2299) * 3
        );

        let removed = pos.remove_item_from_order("1", &item.id).unwrap();
        assert_eq!(removed.notes, "sin sal");
        assert_eq!(pos.orders().current_order("1").unwrap().total(), before);
    }

    #[test]
    fn test_add_item_errors_change_nothing() {
        let (mut pos, order) = pos_with_draft();
        let snapshot = pos.orders().get(&order.id).unwrap().clone();

        assert_eq!(
            pos.add_item_to_order("1", NewOrderItem::new("404", 1)),
            Err(CoreError::ProductNotFound("404".to_string()))
        );
        assert!(pos.add_item_to_order("1", NewOrderItem::new("1", 0)).is_err());
        assert!(pos
            .add_item_to_order("1", NewOrderItem::new("1", 1).with_modifiers(["5"]))
            .is_err());
        assert_eq!(
            pos.add_item_to_order("3", NewOrderItem::new("1", 1)),
            Err(CoreError::NoDraftOrder {
                table_id: "3".to_string()
            })
        );

        pos.set_product_active("1", false).unwrap();
        assert_eq!(
            pos.add_item_to_order("1", NewOrderItem::new("1", 1)),
            Err(CoreError::ProductInactive("1".to_string()))
        );

        assert_eq!(pos.orders().get(&order.id).unwrap(), &snapshot);
    }

    #[test]
    fn test_order_total_is_capped_before_mutation() {
        let (mut pos, order) = pos_with_draft();
        let banquet = pos
            .add_product(NewProduct {
                name: "Banquete".to_string(),
                description: String::new(),
                price_cents: mesa_core::MAX_PRICE_CENTS,
                category: "Eventos".to_string(),
                image: None,
                modifiers: Vec::new(),
            })
            .unwrap();
        let snapshot = pos.orders().get(&order.id).unwrap().clone();

        assert!(matches!(
            pos.add_item_to_order("1", NewOrderItem::new(&banquet.id, 999)),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(pos.orders().get(&order.id).unwrap(), &snapshot);

        let line = pos
            .add_item_to_order("1", NewOrderItem::new(&banquet.id, 1))
            .unwrap();
        let with_line = pos.orders().get(&order.id).unwrap().clone();
        assert!(matches!(
            pos.update_order_item("1", &line.id, &OrderItemPatch::quantity(999)),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(pos.orders().get(&order.id).unwrap(), &with_line);
    }

    #[test]
    fn test_huge_price_is_rejected_by_catalog() {
        let mut pos = PosState::seeded();
        let products = pos.catalog().len();

        assert!(pos
            .add_product(NewProduct {
                name: "Error de tecleo".to_string(),
                description: String::new(),
                price_cents: i64::MAX / 2 + 1,
                category: "Bebidas".to_string(),
                image: None,
                modifiers: Vec::new(),
            })
            .is_err());
        assert_eq!(pos.catalog().len(), products);
    }

    #[test]
    fn test_update_order_item() {
        let (mut pos, order) = pos_with_draft();
        let coffee = pos.orders().get(&order.id).unwrap().items[1].clone();

        let updated = pos
            .update_order_item("1", &coffee.id, &OrderItemPatch::quantity(4))
            .unwrap();
        assert_eq!(updated.quantity, 4);
        assert_eq!(pos.orders().get(&order.id).unwrap().total_cents, 1299 + 4 * 350);

        let bad = OrderItemPatch::quantity(0);
        assert!(pos.update_order_item("1", &coffee.id, &bad).is_err());
        assert_eq!(
            pos.update_order_item("1", "nope", &OrderItemPatch::quantity(1)),
            Err(CoreError::OrderItemNotFound {
                order_id: order.id.clone(),
                item_id: "nope".to_string(),
            })
        );
        assert_eq!(pos.orders().get(&order.id).unwrap().total_cents, 2699);
    }

    #[test]
    fn test_send_clears_draft_and_freezes_order() {
        let (mut pos, order) = pos_with_draft();

        let sent = pos.send_order_to_kitchen("1").unwrap();
        assert_eq!(sent.status, OrderStatus::Sent);
        assert!(pos.orders().current_order("1").is_none());
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Pedido enviado a cocina - Mesa 1"
        );

        let err = pos
            .add_item_to_order("1", NewOrderItem::new("3", 1))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::NoDraftOrder {
                table_id: "1".to_string()
            }
        );
        let after = pos.orders().get(&order.id).unwrap();
        assert_eq!(after.total_cents, 1999);
        assert_eq!(after.items.len(), 2);
        assert_eq!(after.status, OrderStatus::Sent);
    }

    #[test]
    fn test_send_rejects_empty_order() {
        let mut pos = PosState::seeded();
        pos.create_order("1", "w1").unwrap();

        assert!(matches!(
            pos.send_order_to_kitchen("1"),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(pos.orders().current_order("1").is_some());
    }

    #[test]
    fn test_kitchen_flow_updates_item_status() {
        let (mut pos, order) = pos_with_draft();
        pos.send_order_to_kitchen("1").unwrap();

        pos.start_preparing(&order.id).unwrap();
        let preparing = pos.orders().get(&order.id).unwrap();
        assert_eq!(preparing.status, OrderStatus::Preparing);
        assert!(preparing
            .items
            .iter()
            .all(|i| i.status == OrderItemStatus::Preparing));

        pos.mark_ready(&order.id).unwrap();
        let ready = pos.orders().get(&order.id).unwrap();
        assert_eq!(ready.status, OrderStatus::Ready);
        assert!(ready.items.iter().all(|i| i.status == OrderItemStatus::Ready));
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Pedido listo para cobrar - Mesa 1"
        );
        assert_eq!(pos.orders().ready_to_pay().count(), 1);
    }

    #[test]
    fn test_mark_ready_requires_kitchen() {
        let (mut pos, order) = pos_with_draft();
        assert!(matches!(
            pos.mark_ready(&order.id),
            Err(CoreError::InvalidOrderTransition {
                from: OrderStatus::Open,
                to: OrderStatus::Ready,
                ..
            })
        ));
        assert_eq!(
            pos.mark_ready("ghost"),
            Err(CoreError::OrderNotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_settle_completes_order_and_frees_table() {
        let (mut pos, order_id) = ready_order();
        let sales_before = pos.dashboard_stats().total_sales_cents;

        let sale = pos
            .settle_order(&order_id, vec![Payment::cash(1999, 2000)])
            .unwrap();

        assert_eq!(sale.total_cents, 1999);
        assert_eq!(sale.change_cents, 1);
        assert_eq!(pos.sales().len(), 1);

        let order = pos.orders().get(&order_id).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);

        let table = pos.tables().get("1").unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.current_order.is_none());

        let stats = pos.dashboard_stats();
        assert_eq!(stats.total_sales_cents - sales_before, 1999);
        assert_eq!(stats.tables_served, 1);
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Pago completado - Mesa 1 ahora disponible"
        );
    }

    #[test]
    fn test_split_payment_with_overage() {
        let (mut pos, order_id) = ready_order();

        let sale = pos
            .settle_order(
                &order_id,
                vec![Payment::card(1000), Payment::cash(1000, 2000)],
            )
            .unwrap();

        assert_eq!(sale.paid().cents(), 2000);
        assert_eq!(sale.change().cents(), 1000 + 1);
    }

    #[test]
    fn test_settle_rejects_short_payment() {
        let (mut pos, order_id) = ready_order();

        assert_eq!(
            pos.settle_order(&order_id, vec![Payment::card(1000), Payment::transfer(500)]),
            Err(CoreError::InsufficientPayment {
                required: Money::from_cents(1999),
                paid: Money::from_cents(1500),
            })
        );
        assert!(pos.settle_order(&order_id, Vec::new()).is_err());
        assert!(pos.settle_order(&order_id, vec![Payment::card(-5)]).is_err());
        assert!(pos
            .settle_order(&order_id, vec![Payment::cash(1999, 1000)])
            .is_err());

        assert_eq!(pos.orders().get(&order_id).unwrap().status, OrderStatus::Ready);
        assert_eq!(pos.tables().get("1").unwrap().status, TableStatus::Occupied);
        assert!(pos.sales().is_empty());
    }

    #[test]
    fn test_settle_rejects_oversized_tenders() {
        let (mut pos, order_id) = ready_order();

        assert!(matches!(
            pos.settle_order(&order_id, vec![Payment::card(i64::MAX), Payment::card(i64::MAX)]),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            pos.settle_order(&order_id, vec![Payment::cash(1999, i64::MAX)]),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        assert_eq!(pos.orders().get(&order_id).unwrap().status, OrderStatus::Ready);
        assert!(pos.sales().is_empty());
        assert!(pos
            .settle_order(&order_id, vec![Payment::cash(1999, 5000)])
            .is_ok());
    }

    #[test]
    fn test_settle_requires_ready() {
        let (mut pos, order) = pos_with_draft();
        assert!(matches!(
            pos.settle_order(&order.id, vec![Payment::card(1999)]),
            Err(CoreError::InvalidOrderTransition { .. })
        ));

        let (mut pos, order_id) = ready_order();
        pos.settle_order(&order_id, vec![Payment::card(1999)]).unwrap();
        assert!(pos
            .settle_order(&order_id, vec![Payment::card(1999)])
            .is_err());
        assert_eq!(pos.sales().len(), 1);
    }

    #[test]
    fn test_settle_leaves_reseated_table_alone() {
        let (mut pos, order_id) = ready_order();
        let next = pos.create_order("1", "w2").unwrap();

        pos.settle_order(&order_id, vec![Payment::card(1999)]).unwrap();

        let table = pos.tables().get("1").unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.current_order.as_deref(), Some(next.id.as_str()));
    }

    #[test]
    fn test_cancel_draft_frees_table() {
        let (mut pos, order) = pos_with_draft();

        pos.cancel_order(&order.id).unwrap();

        assert_eq!(pos.orders().get(&order.id).unwrap().status, OrderStatus::Cancelled);
        assert!(pos.orders().current_order("1").is_none());
        assert!(pos.tables().get("1").unwrap().is_available());
        assert_eq!(pos.notifications().latest().unwrap().severity, Severity::Warning);

        assert!(pos.cancel_order(&order.id).is_err());
    }

    #[test]
    fn test_cannot_cancel_ready_order() {
        let (mut pos, order_id) = ready_order();
        assert!(pos.cancel_order(&order_id).is_err());
        assert_eq!(pos.orders().get(&order_id).unwrap().status, OrderStatus::Ready);
    }

    #[test]
    fn test_stats_follow_lifecycle() {
        let (mut pos, order_id) = ready_order();
        let other = pos.create_order("3", "w2").unwrap();

        let stats = pos.dashboard_stats();
        assert_eq!(stats.open_orders, 1);
        assert_eq!(stats.total_sales_cents, 0);

        pos.settle_order(&order_id, vec![Payment::card(1999)]).unwrap();
        pos.cancel_order(&other.id).unwrap();

        let stats = pos.dashboard_stats();
        assert_eq!(stats.open_orders, 0);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.average_ticket_cents, 1999);
    }
}
