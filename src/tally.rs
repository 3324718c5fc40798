//! Medal tallies: per country, per edition, and per country over time.
//!
//! Every count here runs on rows collapsed to one per medal-unit, so a
//! relay or team final adds exactly one medal to its country.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;
use crate::partitioner::{count_by, dedup_medal_units, partition_by};
use crate::record::AthleteRecord;
use crate::selection::Filter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MedalCounts {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

impl MedalCounts {
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a AthleteRecord>,
    {
        let mut counts = Self::default();
        for rec in rows {
            counts.gold += rec.gold();
            counts.silver += rec.silver();
            counts.bronze += rec.bronze();
        }
        counts.total = counts.gold + counts.silver + counts.bronze;
        counts
    }

    /// Olympic ranking: more golds first, then silvers, then bronzes.
    pub fn olympic_cmp(&self, other: &Self) -> Ordering {
        other
            .gold
            .cmp(&self.gold)
            .then(other.silver.cmp(&self.silver))
            .then(other.bronze.cmp(&self.bronze))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionTally {
    pub region: String,
    #[serde(flatten)]
    pub medals: MedalCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTally {
    pub year: i32,
    #[serde(flatten)]
    pub medals: MedalCounts,
}

/// Result of [`fetch_medal_tally`]. A single country across all editions
/// is broken down by year; every other selection is broken down by region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grouping", content = "rows", rename_all = "snake_case")]
pub enum FetchedTally {
    ByRegion(Vec<RegionTally>),
    ByYear(Vec<YearTally>),
}

impl FetchedTally {
    pub fn len(&self) -> usize {
        match self {
            FetchedTally::ByRegion(rows) => rows.len(),
            FetchedTally::ByYear(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the `total` column.
    pub fn total_medals(&self) -> u32 {
        match self {
            FetchedTally::ByRegion(rows) => rows.iter().map(|r| r.medals.total).sum(),
            FetchedTally::ByYear(rows) => rows.iter().map(|r| r.medals.total).sum(),
        }
    }
}

/// Medals won by one country in one edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMedals {
    pub year: i32,
    pub medals: u32,
}

fn tally_by_region<'a, I>(rows: I) -> Vec<RegionTally>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
{
    let groups = partition_by(rows.into_iter().filter(|r| r.region.is_some()), |r| {
        r.region()
    });

    let mut table: Vec<RegionTally> = groups
        .into_iter()
        .filter_map(|(region, rows)| {
            Some(RegionTally {
                region: region?.to_string(),
                medals: MedalCounts::from_rows(rows),
            })
        })
        .collect();

    table.sort_by(|a, b| {
        a.medals
            .olympic_cmp(&b.medals)
            .then_with(|| a.region.cmp(&b.region))
    });
    table
}

fn tally_by_year<'a, I>(rows: I) -> Vec<YearTally>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
{
    let mut table: Vec<YearTally> = partition_by(rows, |r| r.year)
        .into_iter()
        .map(|(year, rows)| YearTally {
            year,
            medals: MedalCounts::from_rows(rows),
        })
        .collect();

    // Fewest golds first. Odd next to every other tally, but this is the
    // order the per-country history has always been shown in.
    table.sort_by(|a, b| a.medals.gold.cmp(&b.medals.gold).then(a.year.cmp(&b.year)));
    table
}

/// Medal table of every region over the whole dataset.
pub fn medal_tally(dataset: &Dataset) -> Vec<RegionTally> {
    let units = dedup_medal_units(dataset);
    let table = tally_by_region(units);
    debug!(regions = table.len(), "medal tally computed");
    table
}

/// Medal table for a (year, country) selection.
///
/// Selecting nothing gives exactly [`medal_tally`]. Selecting only a
/// country gives its per-edition history. A selection with no matching
/// rows yields an empty table.
pub fn fetch_medal_tally(
    dataset: &Dataset,
    year: &Filter<i32>,
    country: &Filter<String>,
) -> FetchedTally {
    let units = dedup_medal_units(dataset);

    let tally = match (year, country) {
        (Filter::Overall, Filter::Specific(country)) => FetchedTally::ByYear(tally_by_year(
            units.into_iter().filter(|r| r.in_region(country)),
        )),
        _ => FetchedTally::ByRegion(tally_by_region(units.into_iter().filter(|r| {
            year.admits(&r.year) && r.region().is_some_and(|c| country.admits(c))
        }))),
    };

    debug!(%year, %country, rows = tally.len(), "filtered medal tally computed");
    tally
}

/// Medals per edition for one country, oldest edition first.
pub fn yearwise_medal_tally(dataset: &Dataset, country: &str) -> Vec<YearMedals> {
    let units = dedup_medal_units(dataset.medal_rows());
    let counts = count_by(units.into_iter().filter(|r| r.in_region(country)), |r| r.year);

    let mut series: Vec<YearMedals> = counts
        .into_iter()
        .map(|(year, medals)| YearMedals { year, medals })
        .collect();
    series.sort_by_key(|p| p.year);

    debug!(country, editions = series.len(), "yearwise medal tally computed");
    series
}
