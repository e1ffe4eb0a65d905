//! Entity records for the rental network back office.
//!
//! These shapes double as the persisted-state schema: each collection is
//! stored as a JSON array in camelCase, byte-compatible with the legacy
//! web client's localStorage dump, so an imported legacy store loads
//! without migration. Dates serialize as `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Access role. Admins additionally manage users; managers run the whole
/// network; supervisors are limited to their assigned points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Supervisor,
}

/// Revenue side of a register day: cash drawer vs card terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueKind {
    Cash,
    Card,
}

// ---------------------------------------------------------------------------
// Directory entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub login: String,
    /// bcrypt hash for users created here; legacy stores may still hold
    /// plaintext, which `auth::authenticate` accepts by equality.
    #[serde(default)]
    pub password: String,
    pub name: String,
    pub role: Role,
    /// Point ids this user supervises. Meaningful for `Role::Supervisor`
    /// only; kept empty for the other roles.
    #[serde(default)]
    pub assigned_point_ids: Vec<String>,
}

/// A rental location. Top-level grouping for registers and employees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPoint {
    pub id: String,
    pub name: String,
    /// Commission percent (0-100) on service sales at this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_sale_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegister {
    pub id: String,
    pub point_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    pub point_id: String,
    pub hourly_rate: f64,
}

// ---------------------------------------------------------------------------
// Journal entities
// ---------------------------------------------------------------------------

/// One register's takings for one calendar day. Unique per
/// `(date, register_id)`: re-saving the same day replaces the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueEntry {
    pub id: String,
    pub point_id: String,
    pub register_id: String,
    pub date: NaiveDate,
    pub cash: f64,
    pub card: f64,
    pub refund_cash: f64,
    pub refund_card: f64,
}

/// Hours worked by one employee on one day. Unique per
/// `(employee_id, date)`; an absence is the absence of a row, never a
/// zero-hours row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub id: String,
    pub point_id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub hours: f64,
}

/// A till-collection event: cash physically removed from a register.
/// Append-only; there is no edit or delete operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncashmentEntry {
    pub id: String,
    pub point_id: String,
    pub register_id: String,
    pub date: NaiveDate,
    pub amount: f64,
}

/// Manual payroll correction for one employee in one month. `month` is
/// zero-based (0 = January), matching the legacy records. Unique per
/// `(employee_id, year, month)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAdjustment {
    pub employee_id: String,
    pub year: i32,
    pub month: u32,
    pub bonus: f64,
    pub fine: f64,
}

// ---------------------------------------------------------------------------
// Derived shapes
// ---------------------------------------------------------------------------

/// Result of the monthly pay derivation for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryCalculation {
    pub employee_id: String,
    pub employee_name: String,
    pub total_hours: f64,
    pub base_salary: f64,
    pub bonus: f64,
    pub fine: f64,
    /// `base_salary + bonus - fine`. May go negative when the fine exceeds
    /// the rest; clamping would hide a data-entry problem, so it never does.
    pub total: f64,
}

/// Coerce a form-sourced numeric field. Blank or malformed input becomes
/// 0.0 rather than an error: an empty amount box means "nothing", and the
/// legacy client behaved the same way.
pub fn parse_amount(input: &str) -> f64 {
    input.trim().parse().unwrap_or(0.0)
}

/// Fresh string id for a new record.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
