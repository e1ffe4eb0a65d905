//! Natural-key upsert policy shared by the revenue, timesheet and salary
//! adjustment writers.
//!
//! One record per natural key: a linear scan finds the first row whose key
//! matches the candidate's, replaces it in place (preserving its position),
//! or appends when no row matches. O(n) per write is fine at the expected
//! scale (hundreds of rows); a key-indexed map would not change observable
//! behavior.

/// Insert `candidate` into `rows`, replacing the first row that shares its
/// key. Position of a replaced row is preserved.
pub fn upsert_by_key<T, K, F>(rows: &mut Vec<T>, key: F, candidate: T)
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let k = key(&candidate);
    match rows.iter().position(|row| key(row) == k) {
        Some(idx) => rows[idx] = candidate,
        None => rows.push(candidate),
    }
}

/// Remove and return the first row matching `pred`, keeping the order of
/// the rest. Used by the timesheet zero-hours delete path.
pub fn remove_first<T, F>(rows: &mut Vec<T>, pred: F) -> Option<T>
where
    F: Fn(&T) -> bool,
{
    let idx = rows.iter().position(pred)?;
    Some(rows.remove(idx))
}
