//! # Sales Reports
//!
//! Revenue figures over a period, built from completed orders only.
//!
//! ## Period Windows
//! ```text
//! today  │ since 00:00 UTC of the current day
//! week   │ the last 7 × 24 hours
//! month  │ since the 1st of the current month, 00:00 UTC
//! all    │ every order in the ledger
//! ```
//!
//! Orders are placed in a window (and an hour bucket) by when they were
//! opened.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Timelike, Utc};
use mesa_core::{Money, Order, OrderStatus, Table};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::state::PosState;

/// How many products the "top sellers" list shows.
pub const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Today,
    Week,
    Month,
    All,
}

impl ReportPeriod {
    /// Earliest `created_at` included, or `None` for no lower bound.
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        match self {
            ReportPeriod::Today => Some(Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN))),
            ReportPeriod::Week => Some(now - Duration::days(7)),
            ReportPeriod::Month => today
                .with_day(1)
                .map(|first| Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN))),
            ReportPeriod::All => None,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.start(now).map_or(true, |start| at >= start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableRevenue {
    pub table_id: String,
    pub number: u32,
    pub orders: usize,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: ReportPeriod,
    pub revenue_cents: i64,
    pub completed_orders: usize,
    pub average_order_cents: i64,
    /// Best sellers by portions sold, at most [`TOP_PRODUCTS`].
    pub top_products: Vec<ProductSales>,
    /// Revenue per UTC hour of day, index 0 = 00:00–00:59.
    pub hourly_revenue_cents: Vec<i64>,
    /// One row per table on the floor plan, in floor plan order.
    pub by_table: Vec<TableRevenue>,
}

impl SalesReport {
    pub fn build(
        orders: &[Order],
        tables: &[Table],
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> Self {
        let completed: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed && period.contains(o.created_at, now))
            .collect();

        let revenue: Money = completed.iter().map(|o| o.total()).sum();

        let mut hourly = vec![0i64; 24];
        let mut per_product: HashMap<&str, ProductSales> = HashMap::new();
        let mut per_table: HashMap<&str, (usize, Money)> = HashMap::new();

        for order in &completed {
            hourly[order.created_at.hour() as usize] += order.total_cents;

            let entry = per_table.entry(order.table_id.as_str()).or_default();
            entry.0 += 1;
            entry.1 += order.total();

            for item in &order.items {
                let sales = per_product
                    .entry(item.product_id.as_str())
                    .or_insert_with(|| ProductSales {
                        product_id: item.product_id.clone(),
                        name: item.product.name.clone(),
                        quantity: 0,
                        revenue_cents: 0,
                    });
                sales.quantity += item.quantity;
                sales.revenue_cents += item.line_total().cents();
            }
        }

        let mut top_products: Vec<ProductSales> = per_product.into_values().collect();
        top_products.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then(b.revenue_cents.cmp(&a.revenue_cents))
                .then_with(|| a.name.cmp(&b.name))
        });
        top_products.truncate(TOP_PRODUCTS);

        let by_table = tables
            .iter()
            .map(|table| {
                let (orders, revenue) = per_table
                    .get(table.id.as_str())
                    .copied()
                    .unwrap_or_default();
                TableRevenue {
                    table_id: table.id.clone(),
                    number: table.number,
                    orders,
                    revenue_cents: revenue.cents(),
                }
            })
            .collect();

        SalesReport {
            period,
            revenue_cents: revenue.cents(),
            completed_orders: completed.len(),
            average_order_cents: revenue.average_over(completed.len()).cents(),
            top_products,
            hourly_revenue_cents: hourly,
            by_table,
        }
    }

    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }

    /// Hour of day with the most revenue; `None` when nothing sold.
    pub fn peak_hour(&self) -> Option<usize> {
        self.hourly_revenue_cents
            .iter()
            .enumerate()
            .filter(|(_, cents)| **cents > 0)
            .max_by_key(|(_, cents)| **cents)
            .map(|(hour, _)| hour)
    }
}

impl PosState {
    pub fn sales_report(&self, period: ReportPeriod, now: DateTime<Utc>) -> SalesReport {
        SalesReport::build(self.orders().all(), self.tables().all(), period, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::{NewOrderItem, Payment};

    fn sell(pos: &mut PosState, table_id: &str, lines: &[(&str, i64)]) -> String {
        let order = pos.create_order(table_id, "w1").unwrap();
        for (product_id, quantity) in lines {
            pos.add_item_to_order(table_id, NewOrderItem::new(*product_id, *quantity))
                .unwrap();
        }
        pos.send_order_to_kitchen(table_id).unwrap();
        pos.mark_ready(&order.id).unwrap();
        let total = pos.orders().get(&order.id).unwrap().total_cents;
        pos.settle_order(&order.id, vec![Payment::card(total)]).unwrap();
        order.id
    }

    #[test]
    fn test_report_counts_completed_only() {
        let mut pos = PosState::seeded();
        sell(&mut pos, "1", &[("1", 1), ("3", 2)]);
        sell(&mut pos, "3", &[("3", 3)]);
        pos.create_order("1", "w1").unwrap();
        pos.add_item_to_order("1", NewOrderItem::new("6", 5)).unwrap();

        let report = pos.sales_report(ReportPeriod::All, Utc::now());

        assert_eq!(report.completed_orders, 2);
        assert_eq!(report.revenue_cents, 1999 + 1050);
        assert_eq!(report.average_order_cents, (1999 + 1050 + 1) / 2);
        assert_eq!(report.hourly_revenue_cents.len(), 24);
        assert_eq!(report.hourly_revenue_cents.iter().sum::<i64>(), report.revenue_cents);
        assert!(report.peak_hour().is_some());
    }

    #[test]
    fn test_top_products_by_quantity() {
        let mut pos = PosState::seeded();
        sell(
            &mut pos,
            "1",
            &[("1", 1), ("2", 2), ("3", 6), ("4", 1), ("5", 3), ("6", 1), ("7", 4)],
        );

        let report = pos.sales_report(ReportPeriod::Today, Utc::now());
        let ids: Vec<&str> = report
            .top_products
            .iter()
            .map(|p| p.product_id.as_str())
            .collect();

        assert_eq!(ids, vec!["3", "7", "5", "2", "6"]);
        assert_eq!(report.top_products[0].revenue_cents, 6 * 350);
    }

    #[test]
    fn test_revenue_per_table() {
        let mut pos = PosState::seeded();
        sell(&mut pos, "3", &[("9", 1)]);
        sell(&mut pos, "3", &[("10", 2)]);

        let report = pos.sales_report(ReportPeriod::Week, Utc::now());
        let terraza = report.by_table.iter().find(|t| t.number == 3).unwrap();
        assert_eq!(terraza.orders, 2);
        assert_eq!(terraza.revenue_cents, 699 + 900);
        assert_eq!(report.by_table.len(), 4);
        assert_eq!(report.by_table[0].revenue_cents, 0);
    }

    #[test]
    fn test_period_windows() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();

        assert_eq!(
            ReportPeriod::Today.start(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            ReportPeriod::Week.start(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 8, 18, 30, 0).unwrap())
        );
        assert_eq!(
            ReportPeriod::Month.start(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(ReportPeriod::All.start(now), None);

        let last_month = Utc.with_ymd_and_hms(2024, 2, 28, 23, 0, 0).unwrap();
        assert!(!ReportPeriod::Month.contains(last_month, now));
        assert!(ReportPeriod::All.contains(last_month, now));
    }

    #[test]
    fn test_old_orders_fall_outside_today() {
        let mut pos = PosState::seeded();
        sell(&mut pos, "1", &[("1", 1)]);

        let tomorrow = Utc::now() + Duration::days(1);
        let report = pos.sales_report(ReportPeriod::Today, tomorrow);
        assert_eq!(report.completed_orders, 0);
        assert_eq!(report.average_order_cents, 0);
        assert!(report.top_products.is_empty());
        assert!(report.peak_hour().is_none());
    }
}
