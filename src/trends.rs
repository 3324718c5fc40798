//! Participation over time and headline counts.

use std::fmt;
use std::str::FromStr;

use ahash::{AHashMap, AHashSet};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::partitioner::{count_by, dedup_by};
use crate::record::{AthleteRecord, Sex};

/// Editions held in a year that the IOC does not count as Olympic Games.
pub const UNOFFICIAL_EDITIONS: &[i32] = &[1906];

/// Column whose distinct values [`data_over_time`] counts per edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    #[serde(rename = "region")]
    Region,
    Event,
    Name,
    Sport,
    City,
    #[serde(rename = "NOC")]
    Noc,
    Team,
}

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::Region => "region",
            Column::Event => "Event",
            Column::Name => "Name",
            Column::Sport => "Sport",
            Column::City => "City",
            Column::Noc => "NOC",
            Column::Team => "Team",
        }
    }

    /// Cell value of this column; only `region` can be missing.
    pub fn value<'a>(&self, rec: &'a AthleteRecord) -> Option<&'a str> {
        match self {
            Column::Region => rec.region(),
            Column::Event => Some(&rec.event),
            Column::Name => Some(&rec.name),
            Column::Sport => Some(&rec.sport),
            Column::City => Some(&rec.city),
            Column::Noc => Some(&rec.noc),
            Column::Team => Some(&rec.team),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "region" | "nations" => Ok(Column::Region),
            "event" | "events" => Ok(Column::Event),
            "name" | "athletes" => Ok(Column::Name),
            "sport" | "sports" => Ok(Column::Sport),
            "city" => Ok(Column::City),
            "noc" => Ok(Column::Noc),
            "team" => Ok(Column::Team),
            _ => Err(Error::invalid_selection("column", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditionCount {
    pub edition: i32,
    pub count: usize,
}

/// Distinct values of one column per edition, oldest first.
///
/// Serializes each point as `{"Editions": year, "<column>": count}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeries {
    pub column: Column,
    pub points: Vec<EditionCount>,
}

struct LabelledPoint<'a> {
    label: &'static str,
    point: &'a EditionCount,
}

impl Serialize for LabelledPoint<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Editions", &self.point.edition)?;
        map.serialize_entry(self.label, &self.point.count)?;
        map.end()
    }
}

impl Serialize for TimeSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let label = self.column.label();
        let points: Vec<LabelledPoint<'_>> = self
            .points
            .iter()
            .map(|point| LabelledPoint { label, point })
            .collect();

        let mut st = serializer.serialize_struct("TimeSeries", 2)?;
        st.serialize_field("column", &self.column)?;
        st.serialize_field("points", &points)?;
        st.end()
    }
}

/// Counts each distinct value of `column` once per edition.
///
/// A missing region is one value of its own, so rows from unmapped NOCs
/// still register as a participant.
pub fn data_over_time(dataset: &Dataset, column: Column) -> TimeSeries {
    let firsts = dedup_by(dataset, |r| (r.year, column.value(r)));
    let counts = count_by(firsts, |r| r.year);

    let mut points: Vec<EditionCount> = counts
        .into_iter()
        .map(|(edition, count)| EditionCount {
            edition,
            count: count as usize,
        })
        .collect();
    points.sort_by_key(|p| p.edition);

    debug!(%column, editions = points.len(), "time series computed");
    TimeSeries { column, points }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParticipationRow {
    pub year: i32,
    pub male: u32,
    pub female: u32,
}

/// Distinct male and female athletes per edition.
///
/// An athlete is one (Name, region) pair, counted in the edition of their
/// first row only. Years where one sex is absent report zero for it.
pub fn men_vs_women(dataset: &Dataset) -> Vec<ParticipationRow> {
    let athletes = dataset.distinct_athletes();

    let mut by_year: AHashMap<i32, ParticipationRow> = AHashMap::new();
    for rec in athletes {
        let row = by_year.entry(rec.year).or_insert(ParticipationRow {
            year: rec.year,
            male: 0,
            female: 0,
        });
        match rec.sex {
            Sex::M => row.male += 1,
            Sex::F => row.female += 1,
        }
    }

    let mut rows: Vec<ParticipationRow> = by_year.into_values().collect();
    rows.sort_by_key(|r| r.year);
    rows
}

/// Headline counts for the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub editions: usize,
    pub hosts: usize,
    pub sports: usize,
    pub events: usize,
    pub athletes: usize,
    pub nations: usize,
}

pub fn overview(dataset: &Dataset) -> OverviewStats {
    fn distinct<'a, K, F>(dataset: &'a Dataset, key: F) -> usize
    where
        K: std::hash::Hash + Eq,
        F: Fn(&'a AthleteRecord) -> K,
    {
        dataset.iter().map(key).collect::<AHashSet<K>>().len()
    }

    OverviewStats {
        editions: distinct(dataset, |r| r.year)
            - UNOFFICIAL_EDITIONS
                .iter()
                .filter(|y| dataset.iter().any(|r| r.year == **y))
                .count(),
        hosts: distinct(dataset, |r| r.city.as_str()),
        sports: distinct(dataset, |r| r.sport.as_str()),
        events: distinct(dataset, |r| r.event.as_str()),
        athletes: distinct(dataset, |r| r.name.as_str()),
        nations: dataset
            .iter()
            .filter_map(AthleteRecord::region)
            .collect::<AHashSet<_>>()
            .len(),
    }
}
