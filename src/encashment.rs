//! Cash control: running register balances and till collection.
//!
//! The balance of a point (or one register) is everything the cash drawer
//! took in, net of cash refunds, minus everything ever collected:
//! `Σ(cash − refundCash) − Σ(encashment.amount)`. It is a running figure,
//! not scoped to a date: it represents physical cash presumed still
//! on-site. Encashment entries are an append-only log; there is no edit.

use chrono::NaiveDate;
use tracing::info;

use crate::access;
use crate::db::DbState;
use crate::error::Result;
use crate::models::{new_id, EncashmentEntry, RevenueEntry, User};
use crate::store::{self, Collection};

/// Storage limit above which a balance is flagged for collection.
pub const CASH_LIMIT: f64 = 20_000.0;

/// Cash currently sitting at a point, optionally narrowed to one register.
pub fn cash_balance(
    revenue: &[RevenueEntry],
    encashments: &[EncashmentEntry],
    point_id: &str,
    register_id: Option<&str>,
) -> f64 {
    let in_scope = |entry_point: &str, entry_register: &str| {
        entry_point == point_id && register_id.map_or(true, |r| r == entry_register)
    };

    let taken: f64 = revenue
        .iter()
        .filter(|e| in_scope(&e.point_id, &e.register_id))
        .map(|e| e.cash - e.refund_cash)
        .sum();

    let collected: f64 = encashments
        .iter()
        .filter(|e| in_scope(&e.point_id, &e.register_id))
        .map(|e| e.amount)
        .sum();

    taken - collected
}

/// Presentational "too much cash on site" signal. Computed, never stored.
pub fn is_high_risk(balance: f64) -> bool {
    balance > CASH_LIMIT
}

/// Record a till collection. Append-only: nothing existing is touched.
pub fn record(
    state: &DbState,
    user: &User,
    point_id: &str,
    register_id: &str,
    date: NaiveDate,
    amount: f64,
) -> Result<EncashmentEntry> {
    access::ensure_record(user, point_id)?;

    let entry = EncashmentEntry {
        id: new_id(),
        point_id: point_id.to_string(),
        register_id: register_id.to_string(),
        date,
        amount,
    };

    let mut entries = store::encashments(state)?;
    entries.push(entry.clone());
    store::save(state, Collection::Encashment, &entries)?;

    info!(point_id = %point_id, register_id = %register_id, amount = %amount, "Encashment recorded");
    Ok(entry)
}

/// A point's collection history, newest first, capped at `limit`.
pub fn recent_history<'a>(
    entries: &'a [EncashmentEntry],
    point_id: &str,
    limit: usize,
) -> Vec<&'a EncashmentEntry> {
    let mut history: Vec<&EncashmentEntry> =
        entries.iter().filter(|e| e.point_id == point_id).collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history.truncate(limit);
    history
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::Role;
    use crate::revenue;
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

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn revenue_entry(point: &str, register: &str, d: u32, cash: f64) -> RevenueEntry {
        RevenueEntry {
            id: new_id(),
            point_id: point.into(),
            register_id: register.into(),
            date: day(d),
            cash,
            card: 0.0,
            refund_cash: 0.0,
            refund_card: 0.0,
        }
    }

    fn collection(point: &str, register: &str, d: u32, amount: f64) -> EncashmentEntry {
        EncashmentEntry {
            id: new_id(),
            point_id: point.into(),
            register_id: register.into(),
            date: day(d),
            amount,
        }
    }

    #[test]
    fn balance_is_cash_net_of_refunds_minus_collections() {
        let mut rev = vec![revenue_entry("1", "r1", 1, 1000.0)];
        rev[0].refund_cash = 100.0;
        rev[0].card = 700.0; // card money never sits in the drawer
        let enc = vec![collection("1", "r1", 2, 300.0)];

        assert_eq!(cash_balance(&rev, &enc, "1", None), 600.0);
        assert_eq!(cash_balance(&rev, &enc, "1", Some("r1")), 600.0);
        assert_eq!(cash_balance(&rev, &enc, "1", Some("r2")), 0.0);
        assert_eq!(cash_balance(&rev, &enc, "ghost", None), 0.0);
    }

    #[test]
    fn each_collection_strictly_lowers_the_balance() {
        let rev = vec![revenue_entry("1", "r1", 1, 5000.0)];
        let mut enc = Vec::new();

        let before = cash_balance(&rev, &enc, "1", None);
        enc.push(collection("1", "r1", 2, 800.0));
        let after = cash_balance(&rev, &enc, "1", None);

        assert!(after < before);
        assert_eq!(after, 4200.0);
    }

    // The worked scenario: one revenue day, one collection, then a
    // corrected re-save of the same register day.
    #[test]
    fn center_point_scenario() {
        let state = test_state();
        let user = admin();

        revenue::save_entry(&state, &user, revenue_entry("center", "reg-a", 1, 1000.0)).unwrap();
        record(&state, &user, "center", "reg-a", day(2), 800.0).unwrap();

        let rev = store::revenue(&state).unwrap();
        let enc = store::encashments(&state).unwrap();
        assert_eq!(cash_balance(&rev, &enc, "center", None), 200.0);

        // Re-saving the same (date, register) replaces the old amount
        revenue::save_entry(&state, &user, revenue_entry("center", "reg-a", 1, 1200.0)).unwrap();

        let rev = store::revenue(&state).unwrap();
        assert_eq!(rev.len(), 1);
        assert_eq!(cash_balance(&rev, &enc, "center", None), 400.0);
    }

    #[test]
    fn high_risk_flag_trips_above_limit_only() {
        assert!(!is_high_risk(20_000.0));
        assert!(is_high_risk(20_000.01));
        assert!(!is_high_risk(-5.0));
    }

    #[test]
    fn record_appends_and_respects_assignment() {
        let state = test_state();
        let supervisor = User {
            role: Role::Supervisor,
            assigned_point_ids: vec!["1".into()],
            ..admin()
        };

        record(&state, &supervisor, "1", "r1", day(1), 100.0).unwrap();
        record(&state, &supervisor, "1", "r1", day(2), 200.0).unwrap();
        assert!(record(&state, &supervisor, "2", "r9", day(1), 50.0).is_err());

        let entries = store::encashments(&state).unwrap();
        assert_eq!(entries.len(), 2);
        // Append-only log keeps insertion order
        assert_eq!(entries[0].amount, 100.0);
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let entries = vec![
            collection("1", "r1", 3, 30.0),
            collection("1", "r1", 10, 100.0),
            collection("2", "r9", 20, 999.0),
            collection("1", "r2", 7, 70.0),
        ];

        let history = recent_history(&entries, "1", 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].amount, 100.0);
        assert_eq!(history[1].amount, 70.0);
    }
}
