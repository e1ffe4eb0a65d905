//! Employee timesheets.
//!
//! One entry per employee per day. An absence is the absence of an entry:
//! saving zero hours deletes the row instead of storing a zero, so "no
//! entry" and "day off" stay the same thing. Months are zero-based
//! throughout (0 = January), matching the persisted adjustment records.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::info;

use crate::access;
use crate::db::DbState;
use crate::error::Result;
use crate::models::{new_id, TimesheetEntry, User};
use crate::store::{self, Collection};
use crate::upsert::remove_first;

/// Hours an employee worked within a calendar month. No entries ⇒ 0.
pub fn monthly_hours(entries: &[TimesheetEntry], employee_id: &str, year: i32, month: u32) -> f64 {
    entries
        .iter()
        .filter(|e| {
            e.employee_id == employee_id && e.date.year() == year && e.date.month0() == month
        })
        .map(|e| e.hours)
        .sum()
}

/// Write one day of one employee's timesheet.
///
/// - existing entry, hours > 0: overwrite the hours field only
/// - existing entry, hours = 0: delete the entry
/// - no entry, hours > 0: append a new one
/// - no entry, hours = 0: nothing to do
pub fn save_hours(
    state: &DbState,
    user: &User,
    employee_id: &str,
    date: NaiveDate,
    hours: f64,
) -> Result<()> {
    let employees = store::employees(state)?;
    let point_id = employees
        .iter()
        .find(|e| e.id == employee_id)
        .map(|e| e.point_id.clone())
        .unwrap_or_default();
    access::ensure_record(user, &point_id)?;

    let mut entries = store::timesheets(state)?;
    let matches = |e: &TimesheetEntry| e.employee_id == employee_id && e.date == date;

    if hours == 0.0 {
        if remove_first(&mut entries, matches).is_none() {
            // nothing stored for that day, nothing to delete
            return Ok(());
        }
    } else {
        match entries.iter().position(matches) {
            Some(idx) => entries[idx].hours = hours,
            None => entries.push(TimesheetEntry {
                id: new_id(),
                point_id,
                employee_id: employee_id.to_string(),
                date,
                hours,
            }),
        }
    }

    store::save(state, Collection::Timesheets, &entries)?;
    info!(employee_id = %employee_id, %date, hours = %hours, "Timesheet day saved");
    Ok(())
}

// ---------------------------------------------------------------------------
// Calendar helpers for the grid
// ---------------------------------------------------------------------------

/// Day count of a zero-based month; 0 for an out-of-range month index.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
        return 0;
    };
    let next_first = if month >= 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    match next_first {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

// ===========================================================================
// Tests
// ===========================================================================
