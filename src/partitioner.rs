use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::record::AthleteRecord;

// ─────────────────────────────────────────────────────────────
//  Group-by primitives shared by every query
// ─────────────────────────────────────────────────────────────
//
// Hash maps give no ordering guarantee, so every caller sorts the
// collected groups before returning them.

/// Buckets rows by `key`, preserving dataset order inside each bucket.
pub fn partition_by<'a, K, I, F>(rows: I, mut key: F) -> AHashMap<K, Vec<&'a AthleteRecord>>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
    K: Hash + Eq,
    F: FnMut(&'a AthleteRecord) -> K,
{
    let mut partitions: AHashMap<K, Vec<&'a AthleteRecord>> = AHashMap::new();
    for rec in rows {
        partitions.entry(key(rec)).or_default().push(rec);
    }
    partitions
}

/// Number of rows per key.
pub fn count_by<'a, K, I, F>(rows: I, mut key: F) -> AHashMap<K, u32>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
    K: Hash + Eq,
    F: FnMut(&'a AthleteRecord) -> K,
{
    let mut counts: AHashMap<K, u32> = AHashMap::new();
    for rec in rows {
        *counts.entry(key(rec)).or_insert(0) += 1;
    }
    counts
}

/// Keeps the first row of every distinct key, in input order.
pub fn dedup_by<'a, K, I, F>(rows: I, mut key: F) -> Vec<&'a AthleteRecord>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
    K: Hash + Eq,
    F: FnMut(&'a AthleteRecord) -> K,
{
    let mut seen = AHashSet::new();
    rows.into_iter().filter(|&rec| seen.insert(key(rec))).collect()
}

/// Rows collapsed to one per medal-unit. Team medals count once after this.
pub fn dedup_medal_units<'a, I>(rows: I) -> Vec<&'a AthleteRecord>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
{
    dedup_by(rows, AthleteRecord::medal_unit)
}
