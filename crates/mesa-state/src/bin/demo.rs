//! # Mesa POS Demo
//!
//! Walks one table through a full service with logging turned on: seat,
//! ring up, kitchen, cashier, invoice.
//!
//! ## Usage
//! ```bash
//! # Default config location
//! cargo run -p mesa-state --bin demo
//!
//! # Explicit config file
//! cargo run -p mesa-state --bin demo -- --config ./mesa.toml
//!
//! # More logging
//! RUST_LOG=debug cargo run -p mesa-state --bin demo
//! ```

use std::env;
use std::path::PathBuf;

use chrono::{Duration, Utc};
use mesa_core::{NewOrderItem, OrderItemPatch, Payment};
use mesa_state::{
    JsonFileStore, KeyValueStore, MemoryStore, PosConfig, PosHandle, PosState, ReportPeriod,
    Session,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const TABLE: &str = "1";
const WAITER: &str = "mesero";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut persist = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--persist" | "-p" => persist = true,
            "--help" | "-h" => {
                println!("Mesa POS Demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -p, --persist        Save the session in the data directory");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = PosConfig::load_or_default(config_path);
    info!(store = %config.store.name, currency = %config.store.currency, "Starting Mesa POS demo");

    if persist {
        let store = JsonFileStore::in_data_dir(&config)?;
        info!(path = ?store.path(), "Using settings file");
        run(&config, store)
    } else {
        run(&config, MemoryStore::new())
    }
}

fn run<S: KeyValueStore>(config: &PosConfig, store: S) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = PosState::seeded();
    state.set_currency(config.store.currency);
    let pos = PosHandle::new(state);

    let mut session = Session::restore(store)?;
    pos.with_state(|state| session.login(state.users(), WAITER).map(|u| u.name.clone()))?;

    // Waiter: seat table 1 and ring up the order
    let order = pos.with_state_mut(|state| -> Result<_, mesa_core::CoreError> {
        let order = state.create_order(TABLE, WAITER)?;
        state.add_item_to_order(TABLE, NewOrderItem::new("1", 1).with_modifiers(["1"]))?;
        let coffee = state.add_item_to_order(TABLE, NewOrderItem::new("3", 1))?;
        state.update_order_item(TABLE, &coffee.id, &OrderItemPatch::quantity(2))?;
        state.add_item_to_order(TABLE, NewOrderItem::new("9", 1).with_notes("para compartir"))?;
        state.send_order_to_kitchen(TABLE)?;
        Ok(order)
    })?;

    // Kitchen
    let later = Utc::now() + Duration::minutes(12);
    pos.with_state(|state| {
        for ticket in state.kitchen_queue(later, &config.kitchen) {
            println!(
                "[KDS] Mesa {} - {} porciones - {} min ({:?})",
                ticket.table_number.unwrap_or_default(),
                ticket.item_count(),
                ticket.elapsed_minutes,
                ticket.urgency
            );
        }
    });
    pos.with_state_mut(|state| {
        state.start_preparing(&order.id)?;
        state.mark_ready(&order.id)
    })?;

    // Cashier
    session.logout()?;
    pos.with_state(|state| session.login(state.users(), "cajero").map(|_| ()))?;
    let total = pos.with_state(|state| {
        state
            .orders()
            .get(&order.id)
            .map(|o| o.total_cents)
            .unwrap_or_default()
    });
    let sale = pos.with_state_mut(|state| {
        state.settle_order(&order.id, vec![Payment::card(1000), Payment::cash(total - 1000, 2000)])
    })?;
    info!(sale_id = %sale.id, change = %config.store.currency.format(sale.change()), "Sale recorded");

    pos.with_state(|state| -> Result<(), mesa_core::CoreError> {
        println!();
        print!("{}", state.invoice(&order.id, &config.store)?);
        println!();

        let stats = state.dashboard_stats();
        let currency = state.currency();
        println!("Ventas totales:   {}", currency.format(stats.total_sales()));
        println!("Mesas atendidas:  {}", stats.tables_served);
        println!("Ticket promedio:  {}", currency.format(stats.average_ticket()));

        let report = state.sales_report(ReportPeriod::Today, Utc::now());
        for product in &report.top_products {
            println!("  {:>3} x {}", product.quantity, product.name);
        }

        println!();
        for notification in state.notifications().list() {
            println!("[{:?}] {}", notification.severity, notification.message);
        }
        Ok(())
    })?;

    session.logout()?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every state transition
/// - `RUST_LOG=mesa_state=trace` - Everything from the state layer
/// - Default: `info,mesa=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mesa=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
