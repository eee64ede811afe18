//! # Invoice
//!
//! Printable projection of an order and, once paid, its sale. Nothing here is
//! stored; the invoice is rebuilt from the ledger every time it is shown.
//!
//! ```text
//!             Restaurante Mesa
//! Pedido 0190a3c4            Mesa 1
//! 2024-03-15 18:30 UTC
//! ----------------------------------------
//! 1 x Hamburguesa Clásica           $12.99
//!     + Extra queso                  $1.50
//! 2 x Café Americano                 $7.00
//! ----------------------------------------
//! Subtotal                          $19.99
//! Modificadores                      $1.50
//! Total                             $21.49
//! Pagado (tarjeta)                  $21.49
//! Cambio                             $0.00
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use mesa_core::{
    CoreError, CoreResult, Currency, Money, Order, OrderItem, Payment, PaymentMethod, Sale, Table,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::StoreSettings;
use crate::state::PosState;

const WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// (name, delta per unit)
    pub modifiers: Vec<(String, i64)>,
    pub line_total_cents: i64,
}

impl From<&OrderItem> for InvoiceLine {
    fn from(item: &OrderItem) -> Self {
        InvoiceLine {
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price_cents: item.product.price_cents,
            modifiers: item
                .modifiers
                .iter()
                .map(|m| (m.name.clone(), m.price_cents))
                .collect(),
            line_total_cents: item.line_total().cents(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub store_name: String,
    pub currency: Currency,
    pub order_id: String,
    pub table_number: Option<u32>,
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<InvoiceLine>,
    /// Base prices × quantity, before modifiers.
    pub subtotal_cents: i64,
    pub modifiers_cents: i64,
    pub total_cents: i64,
    pub payments: Vec<Payment>,
    pub paid_cents: i64,
    pub change_cents: i64,
}

impl Invoice {
    pub fn from_order(
        order: &Order,
        sale: Option<&Sale>,
        table: Option<&Table>,
        store: &StoreSettings,
    ) -> Self {
        let subtotal: Money = order
            .items
            .iter()
            .map(|i| i.product.price().multiply_quantity(i.quantity))
            .sum();

        Invoice {
            store_name: store.name.clone(),
            currency: store.currency,
            order_id: order.id.clone(),
            table_number: table.map(|t| t.number),
            issued_at: sale.map_or(order.updated_at, |s| s.created_at),
            lines: order.items.iter().map(InvoiceLine::from).collect(),
            subtotal_cents: subtotal.cents(),
            modifiers_cents: (order.total() - subtotal).cents(),
            total_cents: order.total_cents,
            payments: sale.map(|s| s.payments.clone()).unwrap_or_default(),
            paid_cents: sale.map_or(0, |s| s.paid().cents()),
            change_cents: sale.map_or(0, |s| s.change_cents),
        }
    }

    pub fn is_paid(&self) -> bool {
        !self.payments.is_empty()
    }

    fn money(&self, cents: i64) -> String {
        self.currency.format(Money::from_cents(cents))
    }
}

fn method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "efectivo",
        PaymentMethod::Card => "tarjeta",
        PaymentMethod::Transfer => "transferencia",
    }
}

/// `label` left, `amount` right, padded to the receipt width.
fn row(f: &mut fmt::Formatter<'_>, label: &str, amount: &str) -> fmt::Result {
    let pad = WIDTH.saturating_sub(label.chars().count() + amount.chars().count()).max(1);
    writeln!(f, "{}{}{}", label, " ".repeat(pad), amount)
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(WIDTH);
        let short_id: String = self.order_id.chars().take(8).collect();
        let table = self
            .table_number
            .map_or_else(|| "Mesa ?".to_string(), |n| format!("Mesa {}", n));

        writeln!(f, "{:^width$}", self.store_name, width = WIDTH)?;
        row(f, &format!("Pedido {}", short_id), &table)?;
        writeln!(f, "{}", self.issued_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f, "{}", rule)?;

        for line in &self.lines {
            let base = self.money(line.unit_price_cents * line.quantity);
            row(f, &format!("{} x {}", line.quantity, line.name), &base)?;
            for (name, delta) in &line.modifiers {
                row(f, &format!("    + {}", name), &self.money(delta * line.quantity))?;
            }
        }

        writeln!(f, "{}", rule)?;
        row(f, "Subtotal", &self.money(self.subtotal_cents))?;
        if self.modifiers_cents != 0 {
            row(f, "Modificadores", &self.money(self.modifiers_cents))?;
        }
        row(f, "Total", &self.money(self.total_cents))?;

        for payment in &self.payments {
            row(
                f,
                &format!("Pagado ({})", method_label(payment.method)),
                &self.money(payment.amount_cents),
            )?;
        }
        if self.is_paid() {
            row(f, "Cambio", &self.money(self.change_cents))?;
        }
        Ok(())
    }
}

impl PosState {
    /// Invoice for an order, including payment details once it is settled.
    pub fn invoice(&self, order_id: &str, store: &StoreSettings) -> CoreResult<Invoice> {
        let order = self
            .orders()
            .get(order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;
        let sale = self.sales().iter().find(|s| s.order_id == order_id);
        let table = self.tables().get(&order.table_id);

        Ok(Invoice::from_order(order, sale, table, store))
    }
}
