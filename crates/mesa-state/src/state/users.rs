//! Staff accounts. Login is a lookup by username; there are no passwords.

use chrono::Utc;
use mesa_core::{CoreError, CoreResult, NewUser, Severity, User, UserRole, ValidationError};
use tracing::info;

use super::PosState;
use crate::new_id;

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        UserDirectory { users }
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn by_username(&self, username: &str) -> Option<&User> {
        let username = username.trim();
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }

    pub fn with_role(&self, role: UserRole) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |u| u.role == role)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolves a login. Inactive accounts are refused.
    pub fn authenticate(&self, username: &str) -> CoreResult<&User> {
        let user = self
            .by_username(username)
            .ok_or_else(|| CoreError::UserNotFound(username.trim().to_string()))?;
        if !user.is_active {
            return Err(CoreError::UserInactive(user.username.clone()));
        }
        Ok(user)
    }
}

/// Spanish role label for staff messages.
pub(crate) fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "Administrador",
        UserRole::Waiter => "Mesero",
        UserRole::Cashier => "Cajero",
        UserRole::Kitchen => "Cocina",
        UserRole::Host => "Recepcionista",
    }
}

impl PosState {
    pub fn add_user(&mut self, form: NewUser) -> CoreResult<User> {
        form.validate()?;
        if self.users.by_username(&form.username).is_some() {
            return Err(ValidationError::Duplicate {
                field: "username".to_string(),
                value: form.username.trim().to_string(),
            }
            .into());
        }

        let user = User {
            id: new_id(),
            name: form.name.trim().to_string(),
            username: form.username.trim().to_string(),
            role: form.role,
            is_active: true,
            created_at: Utc::now(),
        };
        info!(user_id = %user.id, username = %user.username, role = role_label(user.role), "User added");

        self.users.users.push(user.clone());
        self.add_notification(
            format!("Usuario \"{}\" creado exitosamente", user.name),
            Severity::Success,
        );
        Ok(user)
    }

    /// Flips a user between active and inactive. Returns the new state.
    pub fn toggle_user_status(&mut self, id: &str) -> CoreResult<bool> {
        let user = self
            .users
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))?;
        user.is_active = !user.is_active;
        let (name, active) = (user.name.clone(), user.is_active);

        info!(user_id = %id, active, "User status toggled");
        let verb = if active { "activado" } else { "desactivado" };
        self.add_notification(format!("Usuario \"{}\" {}", name, verb), Severity::Info);
        Ok(active)
    }
}
