//! Daily revenue reporting per cash register.
//!
//! One `RevenueEntry` per register per day, upserted on save. The totals
//! here are pure folds over already-loaded slices; `save_entry` is the only
//! function that touches the store.
//!
//! Negative amounts are nonsensical caller input but are folded as-is;
//! the legacy client never rejected them and a clamp here would silently
//! disagree with what the operator typed.

use chrono::NaiveDate;
use tracing::info;

use crate::access;
use crate::db::DbState;
use crate::error::Result;
use crate::models::{RentalPoint, RevenueEntry, RevenueKind, User};
use crate::store::{self, Collection};
use crate::upsert::upsert_by_key;

/// Net takings of one kind for a point on a day: Σ(incoming − refund)
/// over the point's registers. No matching rows ⇒ 0, never an error.
pub fn daily_total(
    entries: &[RevenueEntry],
    point_id: &str,
    date: NaiveDate,
    kind: RevenueKind,
) -> f64 {
    entries
        .iter()
        .filter(|e| e.point_id == point_id && e.date == date)
        .map(|e| match kind {
            RevenueKind::Cash => e.cash - e.refund_cash,
            RevenueKind::Card => e.card - e.refund_card,
        })
        .sum()
}

/// Grand total (cash + card) across a set of points for one day. Feeds the
/// network-wide summary plate.
pub fn network_daily_total(entries: &[RevenueEntry], points: &[RentalPoint], date: NaiveDate) -> f64 {
    points
        .iter()
        .map(|p| {
            daily_total(entries, &p.id, date, RevenueKind::Cash)
                + daily_total(entries, &p.id, date, RevenueKind::Card)
        })
        .sum()
}

/// Save a register's day report. Replaces any existing entry sharing the
/// `(date, register_id)` natural key, otherwise appends.
pub fn save_entry(state: &DbState, user: &User, entry: RevenueEntry) -> Result<()> {
    access::ensure_record(user, &entry.point_id)?;

    let mut entries = store::revenue(state)?;
    let date = entry.date;
    let register_id = entry.register_id.clone();
    upsert_by_key(&mut entries, |e| (e.date, e.register_id.clone()), entry);
    store::save(state, Collection::Revenue, &entries)?;

    info!(%date, register_id = %register_id, "Revenue entry saved");
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
