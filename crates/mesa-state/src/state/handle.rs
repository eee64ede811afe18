//! # Shared State Handle
//!
//! `PosState` behind `Arc<Mutex<T>>`, for shells that dispatch view events
//! from more than one thread.
//!
//! ```text
//! view event ──► with_state_mut(|pos| pos.create_order(..)) ──► lock, mutate, unlock
//! render     ──► with_state(|pos| pos.dashboard_stats())    ──► lock, read, unlock
//! ```
//!
//! Every operation runs to completion under the lock, so readers always see a
//! state between two whole operations.

use std::sync::{Arc, Mutex};

use super::PosState;

#[derive(Debug, Clone)]
pub struct PosHandle {
    state: Arc<Mutex<PosState>>,
}

impl PosHandle {
    pub fn new(state: PosState) -> Self {
        PosHandle {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust
    /// # use mesa_state::{PosHandle, PosState};
    /// let handle = PosHandle::new(PosState::seeded());
    /// let free = handle.with_state(|pos| pos.tables().status_counts().available);
    /// assert_eq!(free, 2);
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PosState) -> R,
    {
        let state = self.state.lock().expect("PosState mutex poisoned");
        f(&state)
    }

    /// Executes a function with write access to the state.
    ///
    /// ## Usage
    /// ```rust
    /// # use mesa_state::{PosHandle, PosState};
    /// let handle = PosHandle::new(PosState::seeded());
    /// handle.with_state_mut(|pos| pos.reset_table_status("2")).unwrap();
    /// ```
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PosState) -> R,
    {
        let mut state = self.state.lock().expect("PosState mutex poisoned");
        f(&mut state)
    }
}

impl Default for PosHandle {
    fn default() -> Self {
        Self::new(PosState::default())
    }
}
