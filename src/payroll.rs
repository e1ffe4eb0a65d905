//! Monthly payroll derivation.
//!
//! Pay is hours × rate plus a manual bonus, minus a manual fine. The total
//! is never floored at zero: a fine larger than the month's earnings is
//! almost certainly a data-entry mistake, and clamping would hide it from
//! the person reviewing the sheet.

use tracing::info;

use crate::access;
use crate::db::DbState;
use crate::error::Result;
use crate::models::{Employee, SalaryAdjustment, SalaryCalculation, TimesheetEntry, User};
use crate::store::{self, Collection};
use crate::timesheet::monthly_hours;
use crate::upsert::upsert_by_key;

/// Derive one employee's pay for a zero-based month.
pub fn monthly_pay(
    employee: &Employee,
    timesheets: &[TimesheetEntry],
    adjustments: &[SalaryAdjustment],
    year: i32,
    month: u32,
) -> SalaryCalculation {
    let total_hours = monthly_hours(timesheets, &employee.id, year, month);
    let base_salary = total_hours * employee.hourly_rate;

    let (bonus, fine) = adjustments
        .iter()
        .find(|a| a.employee_id == employee.id && a.year == year && a.month == month)
        .map_or((0.0, 0.0), |a| (a.bonus, a.fine));

    SalaryCalculation {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        total_hours,
        base_salary,
        bonus,
        fine,
        total: base_salary + bonus - fine,
    }
}

/// Payroll sheet for a month.
///
/// `point_id = None` aggregates the whole network and drops employees with
/// zero hours; `point_id = Some(..)` keeps a single point's idle staff on
/// the sheet so a supervisor can see them. The asymmetry is deliberate.
pub fn payroll(
    employees: &[Employee],
    timesheets: &[TimesheetEntry],
    adjustments: &[SalaryAdjustment],
    point_id: Option<&str>,
    year: i32,
    month: u32,
) -> Vec<SalaryCalculation> {
    employees
        .iter()
        .filter(|e| point_id.map_or(true, |p| e.point_id == p))
        .map(|e| monthly_pay(e, timesheets, adjustments, year, month))
        .filter(|calc| calc.total_hours > 0.0 || point_id.is_some())
        .collect()
}

/// Wage fund: sum of payable totals on a sheet.
pub fn total_fund(calculations: &[SalaryCalculation]) -> f64 {
    calculations.iter().map(|c| c.total).sum()
}

// ---------------------------------------------------------------------------
// Adjustment writes
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum AdjustField {
    Bonus,
    Fine,
}

/// Set the bonus for `(employee, year, month)`, preserving the current fine.
pub fn set_bonus(
    state: &DbState,
    user: &User,
    employee_id: &str,
    year: i32,
    month: u32,
    bonus: f64,
) -> Result<()> {
    set_field(state, user, employee_id, year, month, AdjustField::Bonus, bonus)
}

/// Set the fine for `(employee, year, month)`, preserving the current bonus.
pub fn set_fine(
    state: &DbState,
    user: &User,
    employee_id: &str,
    year: i32,
    month: u32,
    fine: f64,
) -> Result<()> {
    set_field(state, user, employee_id, year, month, AdjustField::Fine, fine)
}

/// Read-modify-write of one field of the `(employee, year, month)`
/// adjustment record; the other field keeps its current value. One record
/// per key (upsert).
fn set_field(
    state: &DbState,
    user: &User,
    employee_id: &str,
    year: i32,
    month: u32,
    field: AdjustField,
    value: f64,
) -> Result<()> {
    let employees = store::employees(state)?;
    let point_id = employees
        .iter()
        .find(|e| e.id == employee_id)
        .map(|e| e.point_id.clone())
        .unwrap_or_default();
    access::ensure_record(user, &point_id)?;

    let mut adjustments = store::adjustments(state)?;
    let (current_bonus, current_fine) = adjustments
        .iter()
        .find(|a| a.employee_id == employee_id && a.year == year && a.month == month)
        .map_or((0.0, 0.0), |a| (a.bonus, a.fine));

    let candidate = SalaryAdjustment {
        employee_id: employee_id.to_string(),
        year,
        month,
        bonus: match field {
            AdjustField::Bonus => value,
            AdjustField::Fine => current_bonus,
        },
        fine: match field {
            AdjustField::Fine => value,
            AdjustField::Bonus => current_fine,
        },
    };

    upsert_by_key(
        &mut adjustments,
        |a| (a.employee_id.clone(), a.year, a.month),
        candidate,
    );
    store::save(state, Collection::SalaryAdjustments, &adjustments)?;

    info!(employee_id = %employee_id, year, month, value = %value, "Salary adjustment saved");
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{new_id, Role};
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn test_state() -> DbState {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        db::run_migrations_for_test(&conn);
        DbState {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        }
    }

    fn admin() -> User {
        User {
            id: "a".into(),
            login: "a".into(),
            password: String::new(),
            name: "A".into(),
            role: Role::Admin,
            assigned_point_ids: vec![],
        }
    }

    fn employee(id: &str, point: &str, rate: f64) -> Employee {
        Employee {
            id: id.into(),
            name: format!("Emp {id}"),
            position: "Clerk".into(),
            point_id: point.into(),
            hourly_rate: rate,
        }
    }

    fn shift(employee_id: &str, day: u32, hours: f64) -> TimesheetEntry {
        TimesheetEntry {
            id: new_id(),
            point_id: "1".into(),
            employee_id: employee_id.into(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            hours,
        }
    }

    #[test]
    fn pay_is_hours_times_rate_plus_bonus_minus_fine() {
        let emp = employee("e1", "1", 250.0);
        let sheets = vec![shift("e1", 1, 8.0), shift("e1", 2, 10.0)];
        let adjustments = vec![SalaryAdjustment {
            employee_id: "e1".into(),
            year: 2024,
            month: 4,
            bonus: 500.0,
            fine: 200.0,
        }];

        let calc = monthly_pay(&emp, &sheets, &adjustments, 2024, 4);
        assert_eq!(calc.total_hours, 18.0);
        assert_eq!(calc.base_salary, 4500.0);
        assert_eq!(calc.total, 4500.0 + 500.0 - 200.0);
    }

    #[test]
    fn missing_adjustment_means_zero_bonus_and_fine() {
        let emp = employee("e1", "1", 100.0);
        let calc = monthly_pay(&emp, &[shift("e1", 1, 5.0)], &[], 2024, 4);
        assert_eq!(calc.bonus, 0.0);
        assert_eq!(calc.fine, 0.0);
        assert_eq!(calc.total, 500.0);
    }

    #[test]
    fn oversized_fine_drives_the_total_negative() {
        let emp = employee("e1", "1", 100.0);
        let adjustments = vec![SalaryAdjustment {
            employee_id: "e1".into(),
            year: 2024,
            month: 4,
            bonus: 0.0,
            fine: 10_000.0,
        }];

        let calc = monthly_pay(&emp, &[shift("e1", 1, 8.0)], &adjustments, 2024, 4);
        assert_eq!(calc.total, 800.0 - 10_000.0);
        assert!(calc.total < 0.0, "negative totals must be preserved");
    }

    #[test]
    fn network_sheet_drops_idle_staff_but_point_sheet_keeps_them() {
        let employees = vec![
            employee("e1", "1", 100.0),
            employee("e2", "1", 100.0), // no hours this month
            employee("e3", "2", 100.0),
        ];
        let sheets = vec![shift("e1", 1, 8.0)];

        let network = payroll(&employees, &sheets, &[], None, 2024, 4);
        assert_eq!(network.len(), 1);
        assert_eq!(network[0].employee_id, "e1");

        let point = payroll(&employees, &sheets, &[], Some("1"), 2024, 4);
        assert_eq!(point.len(), 2, "idle staff stay visible per point");
        assert!(point.iter().any(|c| c.employee_id == "e2" && c.total_hours == 0.0));
    }

    #[test]
    fn wage_fund_sums_totals() {
        let employees = vec![employee("e1", "1", 100.0), employee("e2", "1", 200.0)];
        let sheets = vec![shift("e1", 1, 8.0), shift("e2", 1, 8.0)];
        let calcs = payroll(&employees, &sheets, &[], Some("1"), 2024, 4);
        assert_eq!(total_fund(&calcs), 800.0 + 1600.0);
    }

    #[test]
    fn setting_fine_preserves_existing_bonus() {
        let state = test_state();
        let user = admin();
        store::save(&state, Collection::Employees, &[employee("e1", "1", 100.0)]).unwrap();

        set_bonus(&state, &user, "e1", 2024, 4, 500.0).unwrap();
        set_fine(&state, &user, "e1", 2024, 4, 120.0).unwrap();

        let stored = store::adjustments(&state).unwrap();
        assert_eq!(stored.len(), 1, "one record per (employee, year, month)");
        assert_eq!(stored[0].bonus, 500.0);
        assert_eq!(stored[0].fine, 120.0);
    }

    #[test]
    fn months_are_independent_adjustment_records() {
        let state = test_state();
        let user = admin();
        store::save(&state, Collection::Employees, &[employee("e1", "1", 100.0)]).unwrap();

        set_bonus(&state, &user, "e1", 2024, 4, 500.0).unwrap();
        set_bonus(&state, &user, "e1", 2024, 5, 700.0).unwrap();

        let stored = store::adjustments(&state).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn adjustment_write_respects_assignment() {
        let state = test_state();
        store::save(&state, Collection::Employees, &[employee("e1", "1", 100.0)]).unwrap();

        let outsider = User {
            role: Role::Supervisor,
            assigned_point_ids: vec!["2".into()],
            ..admin()
        };
        assert!(set_fine(&state, &outsider, "e1", 2024, 4, 50.0).is_err());
        assert!(store::adjustments(&state).unwrap().is_empty());
    }
}
