//! Back-office operations core for a multi-location rental network.
//!
//! Records daily cash/card revenue per register, employee timesheets and
//! till collections, and derives monthly payroll from hours worked plus
//! manual adjustments. Role-gated (admin / manager / supervisor), persisted
//! in a local SQLite file; the embedding shell renders the records and
//! calls the operations here.
//!
//! The derivation functions (`revenue`, `encashment`, `timesheet`,
//! `payroll`) are pure folds over already-loaded slices; only the explicit
//! save/record functions touch the store, once per user action.

use std::path::Path;

pub mod access;
pub mod auth;
pub mod catalog;
pub mod db;
pub mod encashment;
pub mod error;
pub mod logging;
pub mod models;
pub mod payroll;
pub mod revenue;
pub mod store;
pub mod timesheet;
pub mod upsert;
pub mod users;

pub use db::DbState;
pub use error::{OpsError, Result};
pub use models::{
    CashRegister, Employee, EncashmentEntry, RentalPoint, RevenueEntry, RevenueKind, Role,
    SalaryAdjustment, SalaryCalculation, TimesheetEntry, User,
};

/// Open (or create) the local database under `data_dir` and seed the
/// default users and points on first run.
pub fn open(data_dir: &Path) -> Result<DbState> {
    let state = db::init(data_dir)?;
    store::seed_defaults(&state)?;
    Ok(state)
}
