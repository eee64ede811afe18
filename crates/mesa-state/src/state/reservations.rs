//! # Reservation Book
//!
//! Bookings taken by the host. Loosely tied to the floor plan:
//!
//! ```text
//! add_reservation      reservation: confirmed    table → reserved
//! seat_reservation     reservation: seated       table → occupied
//! cancel_reservation   reservation: cancelled    table → available (only if reserved)
//! complete_reservation reservation: completed    table untouched
//! mark_no_show         reservation: no-show      table → available (only if reserved)
//! ```
//!
//! Reservations never open orders; the waiter does that once the party sits.

use chrono::{NaiveDate, Utc};
use mesa_core::{
    CoreError, CoreResult, NewReservation, Reservation, ReservationStatus, Severity, TableStatus,
};
use tracing::info;

use super::PosState;
use crate::new_id;

#[derive(Debug, Clone, Default)]
pub struct ReservationBook {
    reservations: Vec<Reservation>,
}

impl ReservationBook {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        ReservationBook { reservations }
    }

    pub fn all(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn get(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Bookings for one day, earliest first.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Reservation> {
        let mut day: Vec<&Reservation> =
            self.reservations.iter().filter(|r| r.date == date).collect();
        day.sort_by(|a, b| a.time.cmp(&b.time));
        day
    }

    pub fn with_status(&self, status: ReservationStatus) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(move |r| r.status == status)
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    fn require(&self, id: &str) -> CoreResult<&Reservation> {
        self.get(id)
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))
    }

    fn require_mut(&mut self, id: &str) -> CoreResult<&mut Reservation> {
        self.reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))
    }
}

impl PosState {
    /// Books a table and marks it reserved.
    ///
    /// ## Errors
    /// - `Validation` for a blank name/phone/table, a time that is not
    ///   `HH:MM`, or a party size outside 1..=50
    /// - `TableNotFound` if the table does not exist
    pub fn add_reservation(&mut self, form: NewReservation) -> CoreResult<Reservation> {
        form.validate()?;
        let table = self.tables.require_mut(&form.table_id)?;
        table.transition(TableStatus::Reserved)?;

        let reservation = form.into_reservation(new_id(), Utc::now());
        info!(
            reservation_id = %reservation.id,
            table_id = %reservation.table_id,
            date = %reservation.date,
            time = %reservation.time,
            party_size = reservation.party_size,
            "Reservation added"
        );

        self.reservations.reservations.push(reservation.clone());
        self.add_notification(
            format!("Reserva creada para {}", reservation.customer_name),
            Severity::Success,
        );
        Ok(reservation)
    }

    /// The party arrived: the reservation is seated and its table occupied.
    pub fn seat_reservation(&mut self, id: &str) -> CoreResult<()> {
        let reservation = self.reservations.require(id)?;
        if !reservation.status.can_transition_to(ReservationStatus::Seated) {
            return Err(CoreError::InvalidReservationTransition {
                reservation_id: id.to_string(),
                from: reservation.status,
                to: ReservationStatus::Seated,
            });
        }
        let table_id = reservation.table_id.clone();

        let table = self.tables.require_mut(&table_id)?;
        table.transition(TableStatus::Occupied)?;
        let number = table.number;

        let reservation = self.reservations.require_mut(id)?;
        reservation.transition(ReservationStatus::Seated)?;
        let name = reservation.customer_name.clone();

        info!(reservation_id = %id, table_id = %table_id, "Reservation seated");
        self.add_notification(
            format!("{} ha sido sentado en Mesa {}", name, number),
            Severity::Success,
        );
        Ok(())
    }

    pub fn cancel_reservation(&mut self, id: &str) -> CoreResult<()> {
        let name = self.close_reservation(id, ReservationStatus::Cancelled)?;
        self.add_notification(format!("Reserva de {} cancelada", name), Severity::Info);
        Ok(())
    }

    /// The party never came.
    pub fn mark_no_show(&mut self, id: &str) -> CoreResult<()> {
        let name = self.close_reservation(id, ReservationStatus::NoShow)?;
        self.add_notification(format!("{} no se presentó", name), Severity::Warning);
        Ok(())
    }

    /// The seated party left. The table follows the order it was served.
    pub fn complete_reservation(&mut self, id: &str) -> CoreResult<()> {
        let reservation = self.reservations.require_mut(id)?;
        reservation.transition(ReservationStatus::Completed)?;
        info!(reservation_id = %id, "Reservation completed");
        Ok(())
    }

    /// Ends a reservation before seating; frees its table if it is still
    /// held for it.
    fn close_reservation(&mut self, id: &str, status: ReservationStatus) -> CoreResult<String> {
        let reservation = self.reservations.require_mut(id)?;
        reservation.transition(status)?;
        let name = reservation.customer_name.clone();
        let table_id = reservation.table_id.clone();

        if let Ok(table) = self.tables.require_mut(&table_id) {
            if table.status == TableStatus::Reserved {
                table.release();
            }
        }

        info!(reservation_id = %id, table_id = %table_id, %status, "Reservation closed");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::ValidationError;

    fn form(table_id: &str) -> NewReservation {
        NewReservation {
            customer_name: "Lucía Pérez".to_string(),
            customer_phone: "+58 412-555-0101".to_string(),
            customer_email: Some(String::new()),
            table_id: table_id.to_string(),
            date: Utc::now().date_naive(),
            time: "21:00".to_string(),
            party_size: 3,
            notes: None,
        }
    }

    #[test]
    fn test_seed_has_two_confirmed() {
        let pos = PosState::seeded();
        assert_eq!(pos.reservations().len(), 2);
        assert_eq!(
            pos.reservations()
                .with_status(ReservationStatus::Confirmed)
                .count(),
            2
        );
    }

    #[test]
    fn test_add_reservation_reserves_table() {
        let mut pos = PosState::seeded();
        let reservation = pos.add_reservation(form("3")).unwrap();

        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert!(reservation.customer_email.is_none());
        assert_eq!(pos.tables().get("3").unwrap().status, TableStatus::Reserved);
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Reserva creada para Lucía Pérez"
        );
    }

    #[test]
    fn test_add_reservation_guards() {
        let mut pos = PosState::seeded();

        assert_eq!(
            pos.add_reservation(form("99")),
            Err(CoreError::TableNotFound("99".to_string()))
        );
        assert!(matches!(
            pos.add_reservation(NewReservation {
                time: String::new(),
                ..form("3")
            }),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(pos
            .add_reservation(NewReservation {
                party_size: 0,
                ..form("3")
            })
            .is_err());

        assert_eq!(pos.reservations().len(), 2);
        assert_eq!(pos.tables().get("3").unwrap().status, TableStatus::Available);
    }

    #[test]
    fn test_seat_reservation() {
        let mut pos = PosState::seeded();
        pos.seat_reservation("1").unwrap();

        assert_eq!(
            pos.reservations().get("1").unwrap().status,
            ReservationStatus::Seated
        );
        assert_eq!(pos.tables().get("1").unwrap().status, TableStatus::Occupied);
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "María González ha sido sentado en Mesa 1"
        );

        assert!(pos.seat_reservation("1").is_err());
        pos.complete_reservation("1").unwrap();
    }

    #[test]
    fn test_seat_on_dirty_table_changes_nothing() {
        let mut pos = PosState::seeded();
        pos.set_table_status("1", TableStatus::Occupied).unwrap();
        pos.set_table_status("1", TableStatus::Dirty).unwrap();

        assert!(matches!(
            pos.seat_reservation("1"),
            Err(CoreError::InvalidTableTransition { .. })
        ));
        assert_eq!(
            pos.reservations().get("1").unwrap().status,
            ReservationStatus::Confirmed
        );
    }

    #[test]
    fn test_cancel_frees_reserved_table_only() {
        let mut pos = PosState::seeded();
        let booked = pos.add_reservation(form("3")).unwrap();
        pos.cancel_reservation(&booked.id).unwrap();
        assert_eq!(pos.tables().get("3").unwrap().status, TableStatus::Available);
        assert_eq!(
            pos.notifications().latest().unwrap().message,
            "Reserva de Lucía Pérez cancelada"
        );

        let booked = pos.add_reservation(form("2")).unwrap();
        pos.set_table_status("2", TableStatus::Occupied).unwrap();
        pos.mark_no_show(&booked.id).unwrap();
        assert_eq!(pos.tables().get("2").unwrap().status, TableStatus::Occupied);
    }

    #[test]
    fn test_unknown_reservation() {
        let mut pos = PosState::seeded();
        assert_eq!(
            pos.cancel_reservation("nope"),
            Err(CoreError::ReservationNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_on_date_sorted_by_time() {
        let mut pos = PosState::seeded();
        let today = Utc::now().date_naive();
        pos.add_reservation(NewReservation {
            time: "13:15".to_string(),
            ..form("3")
        })
        .unwrap();

        let day = pos.reservations().on_date(today);
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].time, "13:15");
        assert_eq!(day[1].customer_name, "María González");
    }
}
