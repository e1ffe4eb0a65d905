//! Typed collection store over the local database.
//!
//! Seven named collections, each persisted as one JSON array under its
//! legacy key (`rc_users`, `rc_points`, ...). Loading a collection that was
//! never saved yields an empty vec; aggregators are defined over "whatever
//! currently exists", so that is never an error. All reads and writes go
//! through here; the derivation modules only ever see in-memory slices.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::db::{self, DbState};
use crate::error::Result;
use crate::models::{
    CashRegister, Employee, EncashmentEntry, RentalPoint, RevenueEntry, Role, SalaryAdjustment,
    TimesheetEntry, User,
};

// ---------------------------------------------------------------------------
// Collection names
// ---------------------------------------------------------------------------

/// The named collections. Keys match the legacy client's localStorage keys
/// so an imported legacy dump drops straight in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Points,
    Registers,
    Employees,
    Revenue,
    Timesheets,
    Encashment,
    SalaryAdjustments,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Users => "rc_users",
            Collection::Points => "rc_points",
            Collection::Registers => "rc_registers",
            Collection::Employees => "rc_employees",
            Collection::Revenue => "rc_revenue",
            Collection::Timesheets => "rc_timesheets",
            Collection::Encashment => "rc_encashment",
            Collection::SalaryAdjustments => "rc_salary_adjustments",
        }
    }
}

// ---------------------------------------------------------------------------
// Generic load / save
// ---------------------------------------------------------------------------

/// Load a collection. Missing collection ⇒ empty vec.
pub fn load<T: DeserializeOwned>(state: &DbState, collection: Collection) -> Result<Vec<T>> {
    let conn = state.lock()?;
    match db::read_payload(&conn, collection.key()) {
        Some(payload) => Ok(serde_json::from_str(&payload)?),
        None => Ok(Vec::new()),
    }
}

/// Save a collection, replacing whatever was stored before.
pub fn save<T: Serialize>(state: &DbState, collection: Collection, rows: &[T]) -> Result<()> {
    let payload = serde_json::to_string(rows)?;
    let conn = state.lock()?;
    db::write_payload(&conn, collection.key(), &payload)
}

// ---------------------------------------------------------------------------
// Typed accessors
// ---------------------------------------------------------------------------

pub fn users(state: &DbState) -> Result<Vec<User>> {
    load(state, Collection::Users)
}

pub fn points(state: &DbState) -> Result<Vec<RentalPoint>> {
    load(state, Collection::Points)
}

pub fn registers(state: &DbState) -> Result<Vec<CashRegister>> {
    load(state, Collection::Registers)
}

pub fn employees(state: &DbState) -> Result<Vec<Employee>> {
    load(state, Collection::Employees)
}

pub fn revenue(state: &DbState) -> Result<Vec<RevenueEntry>> {
    load(state, Collection::Revenue)
}

pub fn timesheets(state: &DbState) -> Result<Vec<TimesheetEntry>> {
    load(state, Collection::Timesheets)
}

pub fn encashments(state: &DbState) -> Result<Vec<EncashmentEntry>> {
    load(state, Collection::Encashment)
}

pub fn adjustments(state: &DbState) -> Result<Vec<SalaryAdjustment>> {
    load(state, Collection::SalaryAdjustments)
}

// ---------------------------------------------------------------------------
// First-run seeding
// ---------------------------------------------------------------------------

/// Seed the default users and points on a fresh store, so the first login
/// works out of the box. No-op when a user collection already exists.
/// Returns whether seeding happened.
///
/// Default credentials mirror the legacy deployment (admin/admin,
/// manager/manager, user/user) but are stored bcrypt-hashed.
pub fn seed_defaults(state: &DbState) -> Result<bool> {
    let existing = users(state)?;
    if !existing.is_empty() {
        return Ok(false);
    }

    let hash = |pw: &str| -> Result<String> { Ok(bcrypt::hash(pw, bcrypt::DEFAULT_COST)?) };

    let seeded_users = vec![
        User {
            id: "u1".into(),
            login: "admin".into(),
            password: hash("admin")?,
            name: "Administrator".into(),
            role: Role::Admin,
            assigned_point_ids: vec![],
        },
        User {
            id: "u2".into(),
            login: "manager".into(),
            password: hash("manager")?,
            name: "Network Manager".into(),
            role: Role::Manager,
            assigned_point_ids: vec![],
        },
        User {
            id: "u3".into(),
            login: "user".into(),
            password: hash("user")?,
            name: "Site Supervisor".into(),
            role: Role::Supervisor,
            assigned_point_ids: vec!["1".into()],
        },
    ];
    save(state, Collection::Users, &seeded_users)?;

    if points(state)?.is_empty() {
        let seeded_points = vec![
            RentalPoint {
                id: "1".into(),
                name: "Central".into(),
                service_sale_percent: Some(10.0),
            },
            RentalPoint {
                id: "2".into(),
                name: "Victory Park".into(),
                service_sale_percent: Some(15.0),
            },
        ];
        save(state, Collection::Points, &seeded_points)?;
    }

    info!("Seeded default users and points");
    Ok(true)
}

// ===========================================================================
// Tests
// ===========================================================================
