use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use tracing::info;

use crate::dataset::Dataset;
use crate::loader::NocRegion;
use crate::record::{AthleteRecord, Medal, Sex};

pub const DEFAULT_SEASON: &str = "Summer";

/// Every column of a row, with floats compared by bit pattern.
#[derive(PartialEq, Eq, Hash)]
struct ExactRowKey<'a> {
    id: Option<u32>,
    name: &'a str,
    sex: Sex,
    age: Option<u64>,
    height: Option<u64>,
    weight: Option<u64>,
    team: &'a str,
    noc: &'a str,
    games: &'a str,
    year: i32,
    season: &'a str,
    city: &'a str,
    sport: &'a str,
    event: &'a str,
    medal: Option<Medal>,
    region: Option<&'a str>,
}

impl<'a> ExactRowKey<'a> {
    fn of(r: &'a AthleteRecord) -> Self {
        Self {
            id: r.id,
            name: &r.name,
            sex: r.sex,
            age: r.age.map(f64::to_bits),
            height: r.height.map(f64::to_bits),
            weight: r.weight.map(f64::to_bits),
            team: &r.team,
            noc: &r.noc,
            games: &r.games,
            year: r.year,
            season: &r.season,
            city: &r.city,
            sport: &r.sport,
            event: &r.event,
            medal: r.medal,
            region: r.region(),
        }
    }
}

/// Builds the query dataset from raw rows:
///
/// 1. keep one season (`Summer` for the usual dashboard),
/// 2. attach `region` by NOC, leaving it empty for unknown codes,
/// 3. drop rows identical in every column, keeping the first.
///
/// Medal indicators need no step of their own; they are derived from
/// `medal` on every row.
pub fn preprocess(events: Vec<AthleteRecord>, regions: &[NocRegion], season: &str) -> Dataset {
    let raw = events.len();

    // First entry per NOC wins if the lookup repeats a code.
    let mut lookup: AHashMap<&str, Option<&str>> = AHashMap::with_capacity(regions.len());
    for r in regions {
        lookup.entry(r.noc.as_str()).or_insert(r.region.as_deref());
    }

    let joined: Vec<AthleteRecord> = events
        .into_par_iter()
        .filter(|r| r.season == season)
        .map(|mut r| {
            r.region = lookup.get(r.noc.as_str()).copied().flatten().map(str::to_string);
            r
        })
        .collect();
    let in_season = joined.len();

    let mut seen = AHashSet::with_capacity(joined.len());
    let keep: Vec<bool> = joined.iter().map(|r| seen.insert(ExactRowKey::of(r))).collect();
    drop(seen);

    let rows: Vec<AthleteRecord> = joined
        .into_iter()
        .zip(keep)
        .filter_map(|(r, first)| first.then_some(r))
        .collect();

    info!(
        raw,
        in_season,
        kept = rows.len(),
        unmapped = rows.iter().filter(|r| r.region.is_none()).count(),
        season,
        "dataset preprocessed"
    );
    Dataset::from_records(rows)
}
