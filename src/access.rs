//! Role-based access control.
//!
//! Every write path calls one of the `ensure_*` guards before touching a
//! collection, so an unauthorized call is rejected with
//! `OpsError::PermissionDenied` rather than relying on the shell hiding a
//! button. Rules:
//!
//! - admin, manager: every point visible; full control over points,
//!   registers and employees. User management is admin-only.
//! - supervisor: sees and records against assigned points only, and may
//!   manage registers (not points or employees) on those points.

use crate::error::{OpsError, Result};
use crate::models::{RentalPoint, Role, User};

/// The subset of `points` the user is allowed to see.
pub fn visible_points<'a>(user: &User, points: &'a [RentalPoint]) -> Vec<&'a RentalPoint> {
    match user.role {
        Role::Admin | Role::Manager => points.iter().collect(),
        Role::Supervisor => points
            .iter()
            .filter(|p| user.assigned_point_ids.iter().any(|id| *id == p.id))
            .collect(),
    }
}

/// Whether the user may see (and therefore record against) a point.
pub fn can_view_point(user: &User, point_id: &str) -> bool {
    match user.role {
        Role::Admin | Role::Manager => true,
        Role::Supervisor => user.assigned_point_ids.iter().any(|id| id == point_id),
    }
}

/// Points and employees are network-level directory data: admin or
/// manager only.
pub fn ensure_manage_catalog(user: &User) -> Result<()> {
    match user.role {
        Role::Admin | Role::Manager => Ok(()),
        Role::Supervisor => Err(OpsError::denied("manage catalog")),
    }
}

/// User accounts: admin only.
pub fn ensure_manage_users(user: &User) -> Result<()> {
    match user.role {
        Role::Admin => Ok(()),
        _ => Err(OpsError::denied("manage users")),
    }
}

/// Registers: admin/manager anywhere, supervisor on assigned points.
pub fn ensure_edit_registers(user: &User, point_id: &str) -> Result<()> {
    if can_view_point(user, point_id) {
        Ok(())
    } else {
        Err(OpsError::denied("edit registers"))
    }
}

/// Operational data entry (revenue, timesheets, encashment, salary
/// adjustments): any role, but supervisors only on assigned points.
pub fn ensure_record(user: &User, point_id: &str) -> Result<()> {
    if can_view_point(user, point_id) {
        Ok(())
    } else {
        Err(OpsError::denied("record operational data"))
    }
}
