//! # Table Registry
//!
//! Floor plan of the restaurant and what each table is doing right now.
//!
//! ## Status Changes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation            Graph checked?   Clears order ref   Notification  │
//! │  ─────────            ──────────────   ────────────────   ────────────  │
//! │  update_table         yes              when → available   none          │
//! │  set_table_status     yes              when → available   success       │
//! │  reset_table_status   no (override)    always             info          │
//! │  add_table            n/a              n/a                success       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Releasing a table also discards any order still being built on it, so a
//! freed table never has a stale draft.

use mesa_core::{
    CoreError, CoreResult, NewTable, Severity, Table, TableStatus, ValidationError,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tracing::{debug, info};

use super::PosState;
use crate::new_id;

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: Vec<Table>,
}

impl TableRegistry {
    pub fn new(tables: Vec<Table>) -> Self {
        TableRegistry { tables }
    }

    /// Tables in the order they were added.
    pub fn all(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn by_number(&self, number: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.number == number)
    }

    pub fn with_status(&self, status: TableStatus) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(move |t| t.status == status)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Zone labels in first-seen order, without repeats.
    pub fn zones(&self) -> Vec<&str> {
        let mut zones: Vec<&str> = Vec::new();
        for table in &self.tables {
            if !zones.contains(&table.zone.as_str()) {
                zones.push(&table.zone);
            }
        }
        zones
    }

    pub fn status_counts(&self) -> TableStatusCounts {
        let mut counts = TableStatusCounts::default();
        for table in &self.tables {
            match table.status {
                TableStatus::Available => counts.available += 1,
                TableStatus::Occupied => counts.occupied += 1,
                TableStatus::Reserved => counts.reserved += 1,
                TableStatus::Dirty => counts.dirty += 1,
                TableStatus::Pending => counts.pending += 1,
            }
        }
        counts
    }

    /// Table number for messages; `?` when the table is unknown.
    pub(crate) fn label(&self, id: &str) -> String {
        self.get(id)
            .map(|t| t.number.to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub(crate) fn require(&self, id: &str) -> CoreResult<&Table> {
        self.get(id)
            .ok_or_else(|| CoreError::TableNotFound(id.to_string()))
    }

    pub(crate) fn require_mut(&mut self, id: &str) -> CoreResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TableNotFound(id.to_string()))
    }

    pub(crate) fn push(&mut self, table: Table) {
        self.tables.push(table);
    }
}

/// How many tables sit in each status (table management header).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableStatusCounts {
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub dirty: usize,
    pub pending: usize,
}

impl TableStatusCounts {
    pub fn total(&self) -> usize {
        self.available + self.occupied + self.reserved + self.dirty + self.pending
    }
}

/// Spanish label used in staff notifications.
fn status_label(status: TableStatus) -> &'static str {
    match status {
        TableStatus::Available => "disponible",
        TableStatus::Occupied => "ocupada",
        TableStatus::Reserved => "reservada",
        TableStatus::Dirty => "sucia",
        TableStatus::Pending => "pendiente",
    }
}

// =============================================================================
// Operations
// =============================================================================

impl PosState {
    /// Replaces the stored record with the same id.
    ///
    /// ## Errors
    /// - `TableNotFound` for an unknown id
    /// - `InvalidTableTransition` if the status change is not on the floor graph
    pub fn update_table(&mut self, mut table: Table) -> CoreResult<()> {
        let current = self.tables.require(&table.id)?;
        if !current.status.can_transition_to(table.status) {
            return Err(CoreError::InvalidTableTransition {
                table_id: table.id,
                from: current.status,
                to: table.status,
            });
        }

        if table.status == TableStatus::Available {
            table.current_order = None;
            self.discard_draft(&table.id);
        }

        debug!(table_id = %table.id, status = %table.status, "Table updated");
        let slot = self.tables.require_mut(&table.id)?;
        *slot = table;
        Ok(())
    }

    /// Manual status change from the table management screen.
    ///
    /// Marking a table `occupied` by hand seats a walk-in before anything is
    /// ordered, so the table has no `current_order` yet. The first
    /// [`PosState::create_order`] on it fills the reference in.
    pub fn set_table_status(&mut self, id: &str, status: TableStatus) -> CoreResult<()> {
        let table = self.tables.require(id)?;
        let mut updated = table.clone();
        updated.status = status;
        let number = updated.number;

        self.update_table(updated)?;

        info!(table_id = %id, %status, "Table status changed");
        self.add_notification(
            format!("Mesa {} marcada como {}", number, status_label(status)),
            Severity::Success,
        );
        Ok(())
    }

    /// Adds a table to the floor plan as `available`.
    ///
    /// ## Errors
    /// - `Validation` for a zero number/capacity, a blank zone, or a number
    ///   already in use
    pub fn add_table(&mut self, form: NewTable) -> CoreResult<Table> {
        form.validate()?;
        if self.tables.by_number(form.number).is_some() {
            return Err(ValidationError::Duplicate {
                field: "number".to_string(),
                value: form.number.to_string(),
            }
            .into());
        }

        let table = form.into_table(new_id());
        info!(table_id = %table.id, number = table.number, zone = %table.zone, "Table added");

        self.tables.push(table.clone());
        self.add_notification(
            format!("Mesa {} agregada exitosamente", table.number),
            Severity::Success,
        );
        Ok(table)
    }

    /// Forces a table back to `available` whatever it was doing.
    ///
    /// An order still being built on the table is cancelled. Orders already
    /// in the kitchen are left alone; they are settled or cancelled on their
    /// own.
    pub fn reset_table_status(&mut self, id: &str) -> CoreResult<()> {
        let table = self.tables.require_mut(id)?;
        let previous = table.status;
        table.release();
        let number = table.number;

        self.discard_draft(id);

        info!(table_id = %id, from = %previous, "Table reset to available");
        self.add_notification(
            format!("Mesa {} marcada como disponible", number),
            Severity::Info,
        );
        Ok(())
    }

    /// Frees the table an order was served on, if it still points at it.
    ///
    /// A table that has moved on to another party keeps its status.
    pub(crate) fn release_table_for(&mut self, table_id: &str, order_id: &str) -> bool {
        let Ok(table) = self.tables.require_mut(table_id) else {
            return false;
        };
        match table.current_order.as_deref() {
            Some(current) if current != order_id => false,
            _ => {
                table.release();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::TableLayout;

    fn form(number: u32) -> NewTable {
        NewTable {
            number,
            capacity: 4,
            zone: "Terraza".to_string(),
            layout: TableLayout {
                x: 10,
                y: 10,
                width: 80,
                height: 80,
            },
        }
    }

    #[test]
    fn test_reset_table_from_occupied() {
        let mut pos = PosState::seeded();
        assert_eq!(pos.tables().get("2").unwrap().status, TableStatus::Occupied);
        let before = pos.notifications().len();

        pos.reset_table_status("2").unwrap();

        let table = pos.tables().get("2").unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.current_order.is_none());
        assert_eq!(pos.notifications().len(), before + 1);
        let note = pos.notifications().latest().unwrap();
        assert_eq!(note.severity, Severity::Info);
        assert_eq!(note.message, "Mesa 2 marcada como disponible");
    }

    #[test]
    fn test_reset_always_yields_available() {
        for status in TableStatus::ALL {
            let mut pos = PosState::seeded();
            let mut table = pos.tables().get("1").unwrap().clone();
            table.status = status;
            table.current_order = Some("o-old".to_string());
            pos.tables.require_mut("1").unwrap().clone_from(&table);

            pos.reset_table_status("1").unwrap();

            let table = pos.tables().get("1").unwrap();
            assert_eq!(table.status, TableStatus::Available);
            assert!(table.current_order.is_none());
        }
    }

    #[test]
    fn test_reset_cancels_draft() {
        let mut pos = PosState::seeded();
        let order = pos.create_order("1", "w1").unwrap();

        pos.reset_table_status("1").unwrap();

        assert!(pos.orders().current_order("1").is_none());
        assert_eq!(
            pos.orders().get(&order.id).unwrap().status,
            mesa_core::OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_unknown_table_changes_nothing() {
        let mut pos = PosState::seeded();
        let before = pos.notifications().len();

        assert_eq!(
            pos.reset_table_status("99"),
            Err(CoreError::TableNotFound("99".to_string()))
        );
        assert!(pos.set_table_status("99", TableStatus::Dirty).is_err());
        assert_eq!(pos.notifications().len(), before);
    }

    #[test]
    fn test_update_table_enforces_graph() {
        let mut pos = PosState::seeded();
        let mut table = pos.tables().get("2").unwrap().clone();

        table.status = TableStatus::Dirty;
        pos.update_table(table.clone()).unwrap();

        table.status = TableStatus::Occupied;
        let err = pos.update_table(table).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTableTransition {
                from: TableStatus::Dirty,
                to: TableStatus::Occupied,
                ..
            }
        ));
        assert_eq!(pos.tables().get("2").unwrap().status, TableStatus::Dirty);
    }

    #[test]
    fn test_update_table_edits_other_fields() {
        let mut pos = PosState::seeded();
        let mut table = pos.tables().get("3").unwrap().clone();
        table.capacity = 8;
        table.zone = "Jardín".to_string();

        pos.update_table(table).unwrap();

        let table = pos.tables().get("3").unwrap();
        assert_eq!(table.capacity, 8);
        assert!(pos.tables().zones().contains(&"Jardín"));
    }

    #[test]
    fn test_set_table_status_notifies() {
        let mut pos = PosState::seeded();
        pos.set_table_status("2", TableStatus::Dirty).unwrap();

        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Mesa 2 marcada como sucia"
        );
        assert!(pos.set_table_status("2", TableStatus::Pending).is_err());
    }

    #[test]
    fn test_walk_in_gets_order_reference_on_first_order() {
        let mut pos = PosState::seeded();
        pos.set_table_status("1", TableStatus::Occupied).unwrap();
        assert!(pos.tables().get("1").unwrap().current_order.is_none());

        let order = pos.create_order("1", "w1").unwrap();
        let table = pos.tables().get("1").unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.current_order.as_deref(), Some(order.id.as_str()));
    }

    #[test]
    fn test_add_table() {
        let mut pos = PosState::seeded();
        let table = pos.add_table(form(5)).unwrap();

        assert_eq!(table.status, TableStatus::Available);
        assert!(table.current_order.is_none());
        assert_eq!(pos.tables().len(), 5);
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Mesa 5 agregada exitosamente"
        );
    }

    #[test]
    fn test_add_table_guards() {
        let mut pos = PosState::seeded();
        let before = pos.notifications().len();

        assert!(pos.add_table(form(1)).is_err());
        assert!(pos.add_table(NewTable { capacity: 0, ..form(9) }).is_err());
        assert!(pos
            .add_table(NewTable {
                zone: String::new(),
                ..form(9)
            })
            .is_err());

        assert_eq!(pos.tables().len(), 4);
        assert_eq!(pos.notifications().len(), before);
    }

    #[test]
    fn test_status_counts() {
        let pos = PosState::seeded();
        let counts = pos.tables().status_counts();
        assert_eq!(counts.available, 2);
        assert_eq!(counts.occupied, 1);
        assert_eq!(counts.reserved, 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(pos.tables().zones(), vec!["Salón", "Terraza", "Barra"]);
    }
}
