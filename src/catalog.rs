//! Directory management: rental points, their cash registers, and staff.
//!
//! Points and employees are network-level data (admin/manager); registers
//! can also be managed by a supervisor on their own points. Deleting a
//! point cascades to its registers and employees in the same save, so the
//! directory never holds a register or employee pointing at a gone point.

use tracing::{info, warn};

use crate::access;
use crate::db::DbState;
use crate::error::Result;
use crate::models::{new_id, CashRegister, Employee, RentalPoint, User};
use crate::store::{self, Collection};

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

pub fn create_point(
    state: &DbState,
    user: &User,
    name: &str,
    service_sale_percent: Option<f64>,
) -> Result<RentalPoint> {
    access::ensure_manage_catalog(user)?;

    let point = RentalPoint {
        id: new_id(),
        name: name.to_string(),
        service_sale_percent,
    };

    let mut points = store::points(state)?;
    points.push(point.clone());
    store::save(state, Collection::Points, &points)?;

    info!(point_id = %point.id, name = %point.name, "Point created");
    Ok(point)
}

/// Replace a point's directory record. Unknown id is a no-op (the point
/// was deleted underneath the edit form).
pub fn update_point(state: &DbState, user: &User, point: RentalPoint) -> Result<()> {
    access::ensure_manage_catalog(user)?;

    let mut points = store::points(state)?;
    match points.iter().position(|p| p.id == point.id) {
        Some(idx) => {
            points[idx] = point;
            store::save(state, Collection::Points, &points)
        }
        None => {
            warn!(point_id = %point.id, "Update for unknown point ignored");
            Ok(())
        }
    }
}

/// Delete a point and everything that belongs to it: its registers and its
/// employees go in the same write.
pub fn delete_point(state: &DbState, user: &User, point_id: &str) -> Result<()> {
    access::ensure_manage_catalog(user)?;

    let mut points = store::points(state)?;
    points.retain(|p| p.id != point_id);
    store::save(state, Collection::Points, &points)?;

    let mut registers = store::registers(state)?;
    let registers_before = registers.len();
    registers.retain(|r| r.point_id != point_id);
    store::save(state, Collection::Registers, &registers)?;

    let mut employees = store::employees(state)?;
    let employees_before = employees.len();
    employees.retain(|e| e.point_id != point_id);
    store::save(state, Collection::Employees, &employees)?;

    info!(
        point_id = %point_id,
        registers_removed = registers_before - registers.len(),
        employees_removed = employees_before - employees.len(),
        "Point deleted with cascade"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

pub fn create_register(
    state: &DbState,
    user: &User,
    point_id: &str,
    name: &str,
) -> Result<CashRegister> {
    access::ensure_edit_registers(user, point_id)?;

    let register = CashRegister {
        id: new_id(),
        point_id: point_id.to_string(),
        name: name.to_string(),
    };

    let mut registers = store::registers(state)?;
    registers.push(register.clone());
    store::save(state, Collection::Registers, &registers)?;

    info!(register_id = %register.id, point_id = %point_id, "Register created");
    Ok(register)
}

pub fn rename_register(state: &DbState, user: &User, register_id: &str, name: &str) -> Result<()> {
    let mut registers = store::registers(state)?;
    let Some(idx) = registers.iter().position(|r| r.id == register_id) else {
        warn!(register_id = %register_id, "Rename for unknown register ignored");
        return Ok(());
    };
    access::ensure_edit_registers(user, &registers[idx].point_id)?;

    registers[idx].name = name.to_string();
    store::save(state, Collection::Registers, &registers)
}

pub fn delete_register(state: &DbState, user: &User, register_id: &str) -> Result<()> {
    let mut registers = store::registers(state)?;
    let Some(idx) = registers.iter().position(|r| r.id == register_id) else {
        return Ok(());
    };
    access::ensure_edit_registers(user, &registers[idx].point_id)?;

    registers.remove(idx);
    store::save(state, Collection::Registers, &registers)?;

    info!(register_id = %register_id, "Register deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

pub fn create_employee(
    state: &DbState,
    user: &User,
    name: &str,
    position: &str,
    point_id: &str,
    hourly_rate: f64,
) -> Result<Employee> {
    access::ensure_manage_catalog(user)?;

    let employee = Employee {
        id: new_id(),
        name: name.to_string(),
        position: position.to_string(),
        point_id: point_id.to_string(),
        hourly_rate,
    };

    let mut employees = store::employees(state)?;
    employees.push(employee.clone());
    store::save(state, Collection::Employees, &employees)?;

    info!(employee_id = %employee.id, point_id = %point_id, "Employee created");
    Ok(employee)
}

/// Replace an employee's directory record (name, position, point, rate).
/// Unknown id is a no-op.
pub fn update_employee(state: &DbState, user: &User, employee: Employee) -> Result<()> {
    access::ensure_manage_catalog(user)?;

    let mut employees = store::employees(state)?;
    match employees.iter().position(|e| e.id == employee.id) {
        Some(idx) => {
            employees[idx] = employee;
            store::save(state, Collection::Employees, &employees)
        }
        None => {
            warn!(employee_id = %employee.id, "Update for unknown employee ignored");
            Ok(())
        }
    }
}

pub fn delete_employee(state: &DbState, user: &User, employee_id: &str) -> Result<()> {
    access::ensure_manage_catalog(user)?;

    let mut employees = store::employees(state)?;
    employees.retain(|e| e.id != employee_id);
    store::save(state, Collection::Employees, &employees)?;

    info!(employee_id = %employee_id, "Employee deleted");
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
