//! Login check against the user collection.
//!
//! Accounts created here carry bcrypt hashes; a store imported from the
//! legacy client may still hold plaintext passwords, which are accepted by
//! equality so existing deployments keep working until the password is
//! next changed. There are no sessions or tokens. Exactly one local user
//! is active at a time, and the authenticated `User` (role + assignments)
//! is what the access checks key off.

use tracing::{info, warn};

use crate::db::DbState;
use crate::error::Result;
use crate::models::User;
use crate::store;

/// Verify credentials against a loaded user list.
pub fn authenticate<'a>(users: &'a [User], login: &str, password: &str) -> Option<&'a User> {
    let user = users.iter().find(|u| u.login == login)?;
    if user.password.is_empty() {
        return None;
    }

    let matches = if user.password.starts_with("$2") {
        bcrypt::verify(password, &user.password).unwrap_or(false)
    } else {
        // legacy plaintext record
        user.password == password
    };

    matches.then_some(user)
}

/// Load the user collection and verify credentials. `Ok(None)` is a failed
/// login; `Err` is a store problem.
pub fn login(state: &DbState, login: &str, password: &str) -> Result<Option<User>> {
    let users = store::users(state)?;
    match authenticate(&users, login, password) {
        Some(user) => {
            info!(login = %login, role = ?user.role, "Login successful");
            Ok(Some(user.clone()))
        }
        None => {
            warn!(login = %login, "Login failed");
            Ok(None)
        }
    }
}
