//! Sport × edition pivot tables.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;
use crate::partitioner::{count_by, dedup_by};
use crate::record::AthleteRecord;

/// Dense count matrix: one row per sport, one column per edition.
///
/// Labels are sorted ascending; a (sport, year) pair with no rows is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix {
    pub rows: Vec<String>,
    pub columns: Vec<i32>,
    pub cells: Vec<Vec<u32>>,
}

impl Matrix {
    pub fn get(&self, sport: &str, year: i32) -> Option<u32> {
        let r = self.rows.iter().position(|s| s == sport)?;
        let c = self.columns.binary_search(&year).ok()?;
        Some(self.cells[r][c])
    }

    pub fn row(&self, sport: &str) -> Option<&[u32]> {
        let r = self.rows.iter().position(|s| s == sport)?;
        Some(&self.cells[r])
    }

    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn pivot_sport_year<'a, I>(rows: I) -> Matrix
where
    I: IntoIterator<Item = &'a AthleteRecord>,
{
    let counts = count_by(rows, |r| (r.sport.as_str(), r.year));

    let sports: BTreeSet<&str> = counts.keys().map(|(s, _)| *s).collect();
    let years: BTreeSet<i32> = counts.keys().map(|(_, y)| *y).collect();

    let cells = sports
        .iter()
        .map(|sport| {
            years
                .iter()
                .map(|year| counts.get(&(*sport, *year)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Matrix {
        rows: sports.into_iter().map(str::to_string).collect(),
        columns: years.into_iter().collect(),
        cells,
    }
}

/// Medal rows per (sport, edition) for one country.
///
/// `None` means the country never won a medal, which callers show as
/// "no data" rather than as a grid of zeros.
pub fn country_event_heatmap(dataset: &Dataset, country: &str) -> Option<Matrix> {
    let matrix = pivot_sport_year(dataset.medal_rows().filter(|r| r.in_region(country)));
    debug!(country, sports = matrix.rows.len(), "country heatmap computed");
    (!matrix.is_empty()).then_some(matrix)
}

/// Distinct events held per (sport, edition).
pub fn events_heatmap(dataset: &Dataset) -> Matrix {
    let events = dedup_by(dataset, |r| (r.year, r.sport.as_str(), r.event.as_str()));
    pivot_sport_year(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Medal;

    fn medal(sport: &str, year: i32, region: &str, medal: Option<Medal>) -> AthleteRecord {
        AthleteRecord {
            sport: sport.into(),
            event: format!("{sport} final"),
            year,
            region: Some(region.into()),
            medal,
            ..Default::default()
        }
    }

    #[test]
    fn pivots_sport_by_year_with_zero_fill() {
        let ds = Dataset::from_records(vec![
            medal("Judo", 2000, "Japan", Some(Medal::Gold)),
            medal("Judo", 2000, "Japan", Some(Medal::Silver)),
            medal("Archery", 2004, "Japan", Some(Medal::Bronze)),
            medal("Archery", 2008, "Japan", None),
        ]);
        let m = country_event_heatmap(&ds, "Japan").expect("japan has medals");
        assert_eq!(m.rows, ["Archery", "Judo"]);
        assert_eq!(m.columns, [2000, 2004]);
        assert_eq!(m.cells, vec![vec![0, 1], vec![2, 0]]);
        assert_eq!(m.get("Judo", 2004), Some(0));
        assert_eq!(m.total(), 3);
    }

    #[test]
    fn country_without_medals_has_no_heatmap() {
        let ds = Dataset::from_records(vec![medal("Judo", 2000, "Japan", None)]);
        assert_eq!(country_event_heatmap(&ds, "Japan"), None);
        assert_eq!(country_event_heatmap(&ds, "Atlantis"), None);
    }

    #[test]
    fn events_heatmap_counts_distinct_events() {
        let mut second_event = medal("Judo", 2000, "Japan", None);
        second_event.event = "Judo open".into();
        let ds = Dataset::from_records(vec![
            medal("Judo", 2000, "Japan", None),
            medal("Judo", 2000, "France", Some(Medal::Gold)),
            second_event,
        ]);
        let m = events_heatmap(&ds);
        assert_eq!(m.get("Judo", 2000), Some(2));
    }
}
