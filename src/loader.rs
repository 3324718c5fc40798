//! CSV readers for the raw athlete-event table and the NOC→region lookup.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::preprocess::preprocess;
use crate::record::AthleteRecord;

/// Row of `athlete_events.csv` as it sits on disk. Missing cells are `NA`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EventRow {
    #[serde(rename = "ID")]
    id: String,
    name: String,
    sex: String,
    age: String,
    height: String,
    weight: String,
    team: String,
    #[serde(rename = "NOC")]
    noc: String,
    games: String,
    year: String,
    season: String,
    city: String,
    sport: String,
    event: String,
    medal: String,
}

/// One entry of `noc_regions.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NocRegion {
    #[serde(rename = "NOC")]
    pub noc: String,
    pub region: Option<String>,
    pub notes: Option<String>,
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value == "NA"
}

fn optional<T: FromStr>(column: &'static str, value: &str, line: u64) -> Result<Option<T>> {
    let value = value.trim();
    if is_missing(value) {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| Error::Parse {
        column,
        value: value.to_string(),
        line,
    })
}

fn required<T: FromStr>(column: &'static str, value: &str, line: u64) -> Result<T> {
    optional(column, value, line)?.ok_or_else(|| Error::Parse {
        column,
        value: value.to_string(),
        line,
    })
}

impl EventRow {
    fn into_record(self, line: u64) -> Result<AthleteRecord> {
        Ok(AthleteRecord {
            id: optional("ID", &self.id, line)?,
            sex: required("Sex", &self.sex, line)?,
            age: optional("Age", &self.age, line)?,
            height: optional("Height", &self.height, line)?,
            weight: optional("Weight", &self.weight, line)?,
            year: required("Year", &self.year, line)?,
            medal: optional("Medal", &self.medal, line)?,
            name: self.name,
            team: self.team,
            noc: self.noc,
            games: self.games,
            season: self.season,
            city: self.city,
            sport: self.sport,
            event: self.event,
            region: None,
        })
    }
}

/// Parses athlete-event rows; `region` is left empty for the preprocessor.
pub fn read_athlete_events<R: Read>(reader: R) -> Result<Vec<AthleteRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (idx, row) in rdr.deserialize::<EventRow>().enumerate() {
        // Line 1 is the header.
        let line = idx as u64 + 2;
        rows.push(row?.into_record(line)?);
    }
    Ok(rows)
}

pub fn read_noc_regions<R: Read>(reader: R) -> Result<Vec<NocRegion>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let regions = rdr.deserialize().collect::<std::result::Result<Vec<NocRegion>, _>>()?;
    Ok(regions)
}

pub fn load_athlete_events(path: impl AsRef<Path>) -> Result<Vec<AthleteRecord>> {
    let path = path.as_ref();
    let rows = read_athlete_events(File::open(path)?)?;
    info!(path = %path.display(), rows = rows.len(), "loaded athlete events");
    Ok(rows)
}

pub fn load_noc_regions(path: impl AsRef<Path>) -> Result<Vec<NocRegion>> {
    let path = path.as_ref();
    let regions = read_noc_regions(File::open(path)?)?;
    info!(path = %path.display(), regions = regions.len(), "loaded NOC regions");
    Ok(regions)
}

/// Reads both files and runs them through [`preprocess`].
pub fn load_dataset(
    athletes_path: impl AsRef<Path>,
    regions_path: impl AsRef<Path>,
    season: &str,
) -> Result<Dataset> {
    let events = load_athlete_events(athletes_path)?;
    let regions = load_noc_regions(regions_path)?;
    Ok(preprocess(events, &regions, season))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Medal, Sex};

    const EVENTS: &str = "\
ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal
1,A Dijiang,M,24,180,80,China,CHN,1992 Summer,1992,Summer,Barcelona,Basketball,Basketball Men's Basketball,NA
4,Edgar Lindenau Aabye,M,34,NA,NA,Denmark/Sweden,DEN,1900 Summer,1900,Summer,Paris,Tug-Of-War,Tug-Of-War Men's Tug-Of-War,Gold
";

    #[test]
    fn parses_na_as_missing() {
        let rows = read_athlete_events(EVENTS.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, Some(1));
        assert_eq!(rows[0].height, Some(180.0));
        assert_eq!(rows[0].medal, None);
        assert_eq!(rows[1].sex, Sex::M);
        assert_eq!(rows[1].height, None);
        assert_eq!(rows[1].medal, Some(Medal::Gold));
        assert_eq!(rows[1].team, "Denmark/Sweden");
        assert!(rows.iter().all(|r| r.region.is_none()));
    }

    #[test]
    fn bad_number_reports_column_and_line() {
        let csv = EVENTS.replace("1992,Summer", "199x,Summer");
        let err = read_athlete_events(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { column: "Year", line: 2, .. }));
    }

    #[test]
    fn blank_region_is_none() {
        let csv = "NOC,region,notes\nAFG,Afghanistan,\nROT,,Refugee Olympic Team\n";
        let regions = read_noc_regions(csv.as_bytes()).unwrap();
        assert_eq!(regions[0].region.as_deref(), Some("Afghanistan"));
        assert_eq!(regions[0].notes, None);
        assert_eq!(regions[1].region, None);
    }
}
