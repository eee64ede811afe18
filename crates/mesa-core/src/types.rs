//! # Domain Types
//!
//! Core domain types used throughout Mesa POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Table       │   │     Order       │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  number, zone   │◄──│  table_id       │   │  price_cents    │       │
//! │  │  status         │   │  items ─────────┼──►│  modifiers      │       │
//! │  │  current_order ─┼──►│  status, total  │   │  (snapshotted)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Reservation    │   │      Sale       │   │  Notification   │       │
//! │  │  table_id       │   │  order_id       │   │  severity       │       │
//! │  │  status         │   │  payments       │   │  message        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Machines
//! ```text
//! Table:        available ──► occupied ──► dirty ──► available
//!                   │  ▲          │                      ▲
//!                   │  └──────────┘ (paid / reset)       │
//!                   ├──► pending ──► occupied            │
//!                   └──► reserved ──► occupied / available
//!               (any) ──► reserved
//!
//! Order:        open ──► sent ──► preparing ──► ready ──► completed
//!                 │        │  └─────────────────►▲
//!                 └────────┴──────► cancelled ◄──┘ (preparing)
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{
    validate_modifier_cents, validate_name, validate_party_size, validate_positive,
    validate_price_cents, validate_quantity, validate_required, validate_time_of_day,
};

// =============================================================================
// Table
// =============================================================================

/// Floor-plan status of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    /// Guests left, table needs bussing before it can be seated again.
    Dirty,
    /// Held while a party is being seated.
    Pending,
}

impl TableStatus {
    pub const ALL: [TableStatus; 5] = [
        TableStatus::Available,
        TableStatus::Occupied,
        TableStatus::Reserved,
        TableStatus::Dirty,
        TableStatus::Pending,
    ];

    /// Whether the floor staff may move a table from `self` to `next`.
    ///
    /// Staying in the same status is always allowed, as is reserving a table
    /// from any status. A dirty table has to be cleaned (made available)
    /// before anyone sits at it.
    ///
    /// ```rust
    /// use mesa_core::TableStatus;
    ///
    /// assert!(TableStatus::Available.can_transition_to(TableStatus::Occupied));
    /// assert!(TableStatus::Occupied.can_transition_to(TableStatus::Dirty));
    /// assert!(!TableStatus::Dirty.can_transition_to(TableStatus::Occupied));
    /// ```
    pub fn can_transition_to(self, next: TableStatus) -> bool {
        use TableStatus::*;

        if self == next || next == Reserved {
            return true;
        }

        matches!(
            (self, next),
            (Available, Occupied)
                | (Available, Pending)
                | (Occupied, Dirty)
                | (Occupied, Available)
                | (Reserved, Occupied)
                | (Reserved, Available)
                | (Dirty, Available)
                | (Pending, Occupied)
                | (Pending, Available)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Dirty => "dirty",
            TableStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and size of a table on the floor plan, in plan units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableLayout {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A table in the dining room.
///
/// ## Invariant
/// An `occupied` table opened through the POS references the order being
/// served on it; releasing the table to `available` clears the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    /// Number painted on the table, shown everywhere instead of the id.
    pub number: u32,
    pub capacity: u32,
    /// Free-text area label ("Salón", "Terraza", "Barra").
    pub zone: String,
    pub status: TableStatus,
    pub layout: TableLayout,
    pub current_order: Option<String>,
}

impl Table {
    /// Moves the table to `next`, enforcing the floor transition graph.
    pub fn transition(&mut self, next: TableStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTableTransition {
                table_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Frees the table for the next party, whatever its status was.
    pub fn release(&mut self) {
        self.status = TableStatus::Available;
        self.current_order = None;
    }

    pub fn is_available(&self) -> bool {
        self.status == TableStatus::Available
    }
}

/// Form data for a new table. Id and status are assigned by the registry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewTable {
    pub number: u32,
    pub capacity: u32,
    pub zone: String,
    #[serde(default)]
    pub layout: TableLayout,
}

impl NewTable {
    pub fn validate(&self) -> CoreResult<()> {
        validate_positive("number", self.number)?;
        validate_positive("capacity", self.capacity)?;
        validate_required("zone", &self.zone)?;
        Ok(())
    }

    /// Builds the stored table: fresh id, `available`, no order.
    pub fn into_table(self, id: String) -> Table {
        Table {
            id,
            number: self.number,
            capacity: self.capacity,
            zone: self.zone.trim().to_string(),
            status: TableStatus::Available,
            layout: self.layout,
            current_order: None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    /// "Extra queso"
    Addition,
    /// "Sin cebolla"
    Substitution,
}

/// An addition or substitution the guest can ask for, with its price delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    #[serde(rename = "type")]
    pub kind: ModifierKind,
}

impl Modifier {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in cents.
    pub price_cents: i64,
    /// Free-text menu section ("Bebidas", "Postres").
    pub category: String,
    pub image: Option<String>,
    pub modifiers: Vec<Modifier>,
    /// Inactive products stay in the catalog but cannot be ordered.
    pub is_active: bool,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    pub fn modifier(&self, modifier_id: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.id == modifier_id)
    }

    pub fn validate(&self) -> CoreResult<()> {
        validate_name("name", &self.name)?;
        validate_required("category", &self.category)?;
        validate_price_cents(self.price_cents)?;
        for modifier in &self.modifiers {
            validate_modifier_cents(modifier.price_cents)?;
        }
        Ok(())
    }
}

/// Form data for a new menu item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl NewProduct {
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            price_cents: self.price_cents,
            category: self.category.trim().to_string(),
            image: self.image,
            modifiers: self.modifiers,
            is_active: true,
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// Kitchen progress of a single line. New lines always start `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
}

/// A line on an order.
///
/// Uses the snapshot pattern: the product is embedded as it was when the
/// line was rung up, so later menu edits never rewrite an old ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    /// Product at time of ordering (frozen).
    pub product: Product,
    pub quantity: i64,
    pub modifiers: Vec<Modifier>,
    pub notes: String,
    pub status: OrderItemStatus,
}

impl OrderItem {
    /// Product price plus every chosen modifier's delta.
    pub fn unit_price(&self) -> Money {
        self.product.price() + self.modifiers.iter().map(Modifier::price).sum::<Money>()
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// [`OrderItem::line_total`], or `None` if it does not fit in `i64`.
    pub fn checked_line_total(&self) -> Option<Money> {
        let unit = Money::checked_sum(
            std::iter::once(self.product.price()).chain(self.modifiers.iter().map(Modifier::price)),
        )?;
        unit.checked_multiply_quantity(self.quantity)
    }
}

/// What the waiter picks on the POS screen.
///
/// Modifiers are given by id and must be offered by the product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub modifier_ids: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl NewOrderItem {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        NewOrderItem {
            product_id: product_id.into(),
            quantity,
            modifier_ids: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_modifiers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifier_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Resolves the line against the product it names.
    ///
    /// ## Errors
    /// - `ProductInactive` if the product was taken off the menu
    /// - `ModifierNotFound` for a modifier the product does not offer
    /// - `Validation` for a quantity outside 1..=999
    pub fn into_item(self, id: String, product: &Product) -> CoreResult<OrderItem> {
        if !product.is_active {
            return Err(CoreError::ProductInactive(product.id.clone()));
        }
        validate_quantity(self.quantity)?;

        let modifiers = resolve_modifiers(product, &self.modifier_ids)?;

        Ok(OrderItem {
            id,
            product_id: product.id.clone(),
            product: product.clone(),
            quantity: self.quantity,
            modifiers,
            notes: self.notes,
            status: OrderItemStatus::Pending,
        })
    }
}

fn resolve_modifiers(product: &Product, ids: &[String]) -> CoreResult<Vec<Modifier>> {
    ids.iter()
        .map(|id| {
            product
                .modifier(id)
                .cloned()
                .ok_or_else(|| CoreError::ModifierNotFound {
                    product_id: product.id.clone(),
                    modifier_id: id.clone(),
                })
        })
        .collect()
}

/// Partial update of an order line. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPatch {
    pub quantity: Option<i64>,
    pub modifier_ids: Option<Vec<String>>,
    pub notes: Option<String>,
    pub status: Option<OrderItemStatus>,
}

impl OrderItemPatch {
    pub fn quantity(quantity: i64) -> Self {
        OrderItemPatch {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// Applies the patch to a copy of `item`, so a bad patch changes nothing.
    pub fn apply(&self, item: &OrderItem) -> CoreResult<OrderItem> {
        let mut updated = item.clone();

        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
            updated.quantity = quantity;
        }
        if let Some(ids) = &self.modifier_ids {
            updated.modifiers = resolve_modifiers(&item.product, ids)?;
        }
        if let Some(notes) = &self.notes {
            updated.notes = notes.clone();
        }
        if let Some(status) = self.status {
            updated.status = status;
        }

        Ok(updated)
    }
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Being built at the POS; lines may still change.
    #[default]
    Open,
    /// Handed to the kitchen.
    Sent,
    Preparing,
    /// Cooked, waiting for the cashier.
    Ready,
    /// Paid. Terminal.
    Completed,
    /// Terminal.
    Cancelled,
}

impl OrderStatus {
    /// ```rust
    /// use mesa_core::OrderStatus;
    ///
    /// assert!(OrderStatus::Sent.can_transition_to(OrderStatus::Ready));
    /// assert!(!OrderStatus::Open.can_transition_to(OrderStatus::Completed));
    /// ```
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        matches!(
            (self, next),
            (Open, Sent)
                | (Open, Cancelled)
                | (Sent, Preparing)
                | (Sent, Ready)
                | (Sent, Cancelled)
                | (Preparing, Ready)
                | (Preparing, Cancelled)
                | (Ready, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Counted as "open" on the dashboard.
    pub fn is_unfinished(self) -> bool {
        matches!(
            self,
            OrderStatus::Open | OrderStatus::Sent | OrderStatus::Preparing
        )
    }

    /// Shown on the kitchen display.
    pub fn is_in_kitchen(self) -> bool {
        matches!(self, OrderStatus::Sent | OrderStatus::Preparing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Sent => "sent",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub table_id: String,
    pub waiter_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Derived: Σ line totals. Kept in sync by [`Order::recalculate_total`].
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// A fresh `open` order with no lines and a zero total.
    pub fn new(
        id: String,
        table_id: impl Into<String>,
        waiter_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Order {
            id,
            table_id: table_id.into(),
            waiter_id: waiter_id.into(),
            items: Vec::new(),
            status: OrderStatus::Open,
            total_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Total quantity across lines (what the kitchen ticket shows as "items").
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Recomputes the total from the lines and stamps `updated_at`.
    pub fn recalculate_total(&mut self, now: DateTime<Utc>) {
        self.total_cents = self.items.iter().map(OrderItem::line_total).sum::<Money>().cents();
        self.updated_at = now;
    }

    /// Moves the order to `next`, enforcing the order state machine.
    pub fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidOrderTransition {
                order_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

/// One tender towards an order. An order may be split across several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method: PaymentMethod,
    /// Amount applied to the bill.
    pub amount_cents: i64,
    /// For cash: what the guest handed over.
    pub tendered_cents: Option<i64>,
}

impl Payment {
    pub fn card(amount_cents: i64) -> Self {
        Payment {
            method: PaymentMethod::Card,
            amount_cents,
            tendered_cents: None,
        }
    }

    pub fn transfer(amount_cents: i64) -> Self {
        Payment {
            method: PaymentMethod::Transfer,
            amount_cents,
            tendered_cents: None,
        }
    }

    /// Cash applied to the bill, with the bills the guest handed over.
    pub fn cash(amount_cents: i64, tendered_cents: i64) -> Self {
        Payment {
            method: PaymentMethod::Cash,
            amount_cents,
            tendered_cents: Some(tendered_cents),
        }
    }

    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Change owed for this tender. Only cash gives change.
    pub fn change(&self) -> Money {
        match (self.method, self.tendered_cents) {
            (PaymentMethod::Cash, Some(tendered)) if tendered > self.amount_cents => {
                Money::from_cents(tendered - self.amount_cents)
            }
            _ => Money::zero(),
        }
    }
}

/// Record of a settled order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub order_id: String,
    pub total_cents: i64,
    pub payments: Vec<Payment>,
    pub change_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn paid(&self) -> Money {
        self.payments.iter().map(Payment::amount).sum()
    }

    #[inline]
    pub fn change(&self) -> Money {
        Money::from_cents(self.change_cents)
    }
}

// =============================================================================
// Reservation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    #[default]
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;

        matches!(
            (self, next),
            (Confirmed, Seated) | (Confirmed, Cancelled) | (Confirmed, NoShow) | (Seated, Completed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no-show",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub table_id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
    pub party_size: u32,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn transition(&mut self, next: ReservationStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidReservationTransition {
                reservation_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub table_id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub time: String,
    pub party_size: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewReservation {
    pub fn validate(&self) -> CoreResult<()> {
        validate_name("customer name", &self.customer_name)?;
        validate_required("customer phone", &self.customer_phone)?;
        validate_required("table", &self.table_id)?;
        validate_time_of_day(&self.time)?;
        validate_party_size(self.party_size)?;
        Ok(())
    }

    pub fn into_reservation(self, id: String, now: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            customer_email: self.customer_email.filter(|e| !e.trim().is_empty()),
            table_id: self.table_id,
            date: self.date,
            time: self.time.trim().to_string(),
            party_size: self.party_size,
            status: ReservationStatus::Confirmed,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
        }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Waiter,
    Cashier,
    Kitchen,
    Host,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Admins may act in every role.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == UserRole::Admin || self.role == role
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn validate(&self) -> CoreResult<()> {
        validate_name("name", &self.name)?;
        validate_required("username", &self.username)?;
        Ok(())
    }
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

/// A banner message shown to staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> Product {
        Product {
            id: "1".to_string(),
            name: "Hamburguesa Clásica".to_string(),
            description: String::new(),
            price_cents: 1299,
            category: "Platos principales".to_string(),
            image: None,
            modifiers: vec![
                Modifier {
                    id: "m1".to_string(),
                    name: "Extra queso".to_string(),
                    price_cents: 150,
                    kind: ModifierKind::Addition,
                },
                Modifier {
                    id: "m2".to_string(),
                    name: "Sin cebolla".to_string(),
                    price_cents: 0,
                    kind: ModifierKind::Substitution,
                },
            ],
            is_active: true,
        }
    }

    #[test]
    fn test_table_transition_graph() {
        use TableStatus::*;

        for status in TableStatus::ALL {
            assert!(status.can_transition_to(status));
            assert!(status.can_transition_to(Reserved));
        }
        assert!(Reserved.can_transition_to(Available));
        assert!(Dirty.can_transition_to(Available));
        assert!(!Dirty.can_transition_to(Occupied));
        assert!(!Dirty.can_transition_to(Pending));
        assert!(!Occupied.can_transition_to(Pending));
    }

    #[test]
    fn test_table_transition_rejects_illegal_move() {
        let mut table = NewTable {
            number: 7,
            capacity: 4,
            zone: "Terraza".to_string(),
            layout: TableLayout::default(),
        }
        .into_table("t7".to_string());
        table.status = TableStatus::Dirty;

        let err = table.transition(TableStatus::Occupied).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTableTransition { .. }));
        assert_eq!(table.status, TableStatus::Dirty);

        table.transition(TableStatus::Available).unwrap();
        assert!(table.is_available());
    }

    #[test]
    fn test_new_table_validation() {
        let mut form = NewTable {
            number: 5,
            capacity: 2,
            zone: " ".to_string(),
            layout: TableLayout::default(),
        };
        assert!(form.validate().is_err());

        form.zone = "Barra".to_string();
        assert!(form.validate().is_ok());

        form.capacity = 0;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_order_item_includes_modifier_prices() {
        let item = NewOrderItem::new("1", 2)
            .with_modifiers(["m1", "m2"])
            .into_item("i1".to_string(), &burger())
            .unwrap();

        assert_eq!(item.unit_price().cents(), 1449);
        assert_eq!(item.line_total().cents(), 2898);
        assert_eq!(item.status, OrderItemStatus::Pending);
    }

    #[test]
    fn test_line_total_overflow_is_detected() {
        let mut product = burger();
        product.price_cents = i64::MAX / 2 + 1;
        let item = NewOrderItem::new("1", 2)
            .into_item("i1".to_string(), &product)
            .unwrap();

        assert_eq!(item.checked_line_total(), None);
        assert!(crate::validation::validate_order_total([&item]).is_err());
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_product_validation_bounds_modifiers() {
        let mut product = burger();
        assert!(product.validate().is_ok());

        product.modifiers[0].price_cents = i64::MAX;
        assert!(matches!(
            product.validate(),
            Err(CoreError::Validation(crate::error::ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_order_item_rejects_unknown_modifier() {
        let err = NewOrderItem::new("1", 1)
            .with_modifiers(["m9"])
            .into_item("i1".to_string(), &burger())
            .unwrap_err();
        assert!(matches!(err, CoreError::ModifierNotFound { .. }));
    }

    #[test]
    fn test_order_item_rejects_inactive_product() {
        let mut product = burger();
        product.is_active = false;
        let err = NewOrderItem::new("1", 1)
            .into_item("i1".to_string(), &product)
            .unwrap_err();
        assert_eq!(err, CoreError::ProductInactive("1".to_string()));
    }

    #[test]
    fn test_patch_is_all_or_nothing() {
        let item = NewOrderItem::new("1", 1)
            .into_item("i1".to_string(), &burger())
            .unwrap();

        let bad = OrderItemPatch {
            quantity: Some(3),
            modifier_ids: Some(vec!["nope".to_string()]),
            ..Default::default()
        };
        assert!(bad.apply(&item).is_err());

        let updated = OrderItemPatch::quantity(3).apply(&item).unwrap();
        assert_eq!(updated.quantity, 3);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_order_state_machine() {
        let now = Utc::now();
        let mut order = Order::new("o1".to_string(), "1", "w1", now);
        assert_eq!(order.status, OrderStatus::Open);
        assert!(order.total().is_zero());

        assert!(order.transition(OrderStatus::Ready, now).is_err());
        order.transition(OrderStatus::Sent, now).unwrap();
        order.transition(OrderStatus::Ready, now).unwrap();
        order.transition(OrderStatus::Completed, now).unwrap();
        assert!(order.status.is_terminal());
        assert!(order.transition(OrderStatus::Cancelled, now).is_err());
    }

    #[test]
    fn test_cash_change() {
        assert_eq!(Payment::cash(1999, 2000).change().cents(), 1);
        assert_eq!(Payment::cash(1999, 1999).change().cents(), 0);
        assert!(Payment::card(1999).change().is_zero());
    }

    #[test]
    fn test_reservation_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ReservationStatus::NoShow).unwrap();
        assert_eq!(json, "\"no-show\"");
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Seated));
    }

    #[test]
    fn test_admin_has_every_role() {
        let admin = User {
            id: "1".to_string(),
            name: "Admin User".to_string(),
            username: "admin".to_string(),
            role: UserRole::Admin,
            is_active: true,
            created_at: Utc::now(),
        };
        assert!(admin.has_role(UserRole::Kitchen));

        let waiter = User {
            role: UserRole::Waiter,
            ..admin
        };
        assert!(waiter.has_role(UserRole::Waiter));
        assert!(!waiter.has_role(UserRole::Cashier));
    }
}
