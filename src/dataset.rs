use std::sync::Arc;

use ahash::AHashMap;

use crate::partitioner::dedup_by;
use crate::record::AthleteRecord;

/// The preprocessed, immutable athlete-event table.
///
/// Cloning is cheap: rows live behind an `Arc<[_]>` and nothing hands out
/// a mutable view.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Arc<[AthleteRecord]>,
}

impl Dataset {
    /// Wraps rows that have already been through preprocessing.
    pub fn from_records(rows: Vec<AthleteRecord>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn records(&self) -> &[AthleteRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AthleteRecord> {
        self.rows.iter()
    }

    pub fn medal_rows(&self) -> impl Iterator<Item = &AthleteRecord> {
        self.rows.iter().filter(|r| r.has_medal())
    }

    /// First row of every athlete name, in dataset order.
    ///
    /// Rankings use this to attach a sport and region to a name.
    pub fn first_row_by_name(&self) -> AHashMap<&str, &AthleteRecord> {
        let mut first = AHashMap::new();
        for rec in self.rows.iter() {
            first.entry(rec.name.as_str()).or_insert(rec);
        }
        first
    }

    /// One row per (Name, region), keeping the first occurrence.
    pub fn distinct_athletes(&self) -> Vec<&AthleteRecord> {
        dedup_by(self.rows.iter(), AthleteRecord::athlete_key)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::from_records(Vec::new())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a AthleteRecord;
    type IntoIter = std::slice::Iter<'a, AthleteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<AthleteRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = AthleteRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, region: Option<&str>, sport: &str) -> AthleteRecord {
        AthleteRecord {
            name: name.into(),
            region: region.map(Into::into),
            sport: sport.into(),
            ..Default::default()
        }
    }

    #[test]
    fn distinct_athletes_keeps_first_per_name_and_region() {
        let ds = Dataset::from_records(vec![
            row("Ana", Some("Spain"), "Judo"),
            row("Ana", Some("Spain"), "Rowing"),
            row("Ana", Some("Chile"), "Rowing"),
            row("Ana", None, "Sailing"),
        ]);
        let athletes = ds.distinct_athletes();
        let sports: Vec<_> = athletes.iter().map(|r| r.sport.as_str()).collect();
        assert_eq!(sports, ["Judo", "Rowing", "Sailing"]);
    }

    #[test]
    fn first_row_by_name_follows_dataset_order() {
        let ds = Dataset::from_records(vec![
            row("Bo", Some("Norway"), "Biathlon"),
            row("Bo", Some("Sweden"), "Curling"),
        ]);
        let first = ds.first_row_by_name();
        assert_eq!(first["Bo"].sport, "Biathlon");
    }
}
