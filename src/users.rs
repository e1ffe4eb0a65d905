//! User account management. Admin only.
//!
//! Passwords are bcrypt-hashed before they hit the store. Point
//! assignments only mean something for supervisors, so any other role is
//! stored with an empty assignment list regardless of what the form sent.

use tracing::info;

use crate::access;
use crate::db::DbState;
use crate::error::Result;
use crate::models::{new_id, Role, User};
use crate::store::{self, Collection};

pub fn create_user(
    state: &DbState,
    acting: &User,
    login: &str,
    password: &str,
    name: &str,
    role: Role,
    assigned_point_ids: Vec<String>,
) -> Result<User> {
    access::ensure_manage_users(acting)?;

    let user = User {
        id: new_id(),
        login: login.to_string(),
        password: bcrypt::hash(password, bcrypt::DEFAULT_COST)?,
        name: name.to_string(),
        role,
        assigned_point_ids: match role {
            Role::Supervisor => assigned_point_ids,
            _ => Vec::new(),
        },
    };

    let mut users = store::users(state)?;
    users.push(user.clone());
    store::save(state, Collection::Users, &users)?;

    info!(user_id = %user.id, login = %user.login, role = ?role, "User created");
    Ok(user)
}

/// Update profile fields (login, name, role, assignments). The stored
/// password is kept as-is; use `set_password` to change it. Demoting a
/// supervisor to another role clears the assignment list.
pub fn update_user(state: &DbState, acting: &User, updated: User) -> Result<()> {
    access::ensure_manage_users(acting)?;

    let mut users = store::users(state)?;
    let Some(idx) = users.iter().position(|u| u.id == updated.id) else {
        return Ok(());
    };

    let current = &mut users[idx];
    current.login = updated.login;
    current.name = updated.name;
    current.role = updated.role;
    current.assigned_point_ids = match updated.role {
        Role::Supervisor => updated.assigned_point_ids,
        _ => Vec::new(),
    };
    store::save(state, Collection::Users, &users)?;

    info!(user_id = %updated.id, "User updated");
    Ok(())
}

pub fn set_password(state: &DbState, acting: &User, user_id: &str, password: &str) -> Result<()> {
    access::ensure_manage_users(acting)?;

    let mut users = store::users(state)?;
    let Some(idx) = users.iter().position(|u| u.id == user_id) else {
        return Ok(());
    };
    users[idx].password = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    store::save(state, Collection::Users, &users)?;

    info!(user_id = %user_id, "Password changed");
    Ok(())
}

pub fn delete_user(state: &DbState, acting: &User, user_id: &str) -> Result<()> {
    access::ensure_manage_users(acting)?;

    let mut users = store::users(state)?;
    users.retain(|u| u.id != user_id);
    store::save(state, Collection::Users, &users)?;

    info!(user_id = %user_id, "User deleted");
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
