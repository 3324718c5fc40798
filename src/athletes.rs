//! Athlete rankings and demographics.
//!
//! Rankings count medal *rows*, not medal-units: each member of a winning
//! team is credited with the medal. Per-athlete attributes (sport, region)
//! come from the athlete's first row in the full dataset.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::dataset::Dataset;
use crate::partitioner::count_by;
use crate::record::{AthleteRecord, Medal, Sex};
use crate::selection::Filter;

pub const TOP_ATHLETES: usize = 15;
pub const TOP_COUNTRY_ATHLETES: usize = 10;

/// Sports compared in the gold-medallist age breakdown.
pub const POPULAR_SPORTS: &[&str] = &[
    "Basketball",
    "Judo",
    "Football",
    "Tug-Of-War",
    "Athletics",
    "Swimming",
    "Badminton",
    "Sailing",
    "Gymnastics",
    "Art Competitions",
    "Handball",
    "Weightlifting",
    "Wrestling",
    "Water Polo",
    "Hockey",
    "Rowing",
    "Fencing",
    "Shooting",
    "Boxing",
    "Taekwondo",
    "Cycling",
    "Diving",
    "Canoeing",
    "Tennis",
    "Golf",
    "Softball",
    "Archery",
    "Volleyball",
    "Synchronized Swimming",
    "Table Tennis",
    "Baseball",
    "Rhythmic Gymnastics",
    "Rugby Sevens",
    "Beach Volleyball",
    "Triathlon",
    "Rugby",
    "Polo",
    "Ice Hockey",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteRanking {
    pub name: String,
    pub medals: u32,
    pub sport: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryAthlete {
    pub name: String,
    pub medals: u32,
    pub sport: String,
}

/// Names with the most medal rows, most first, ties broken by name.
fn rank_names<'a, I>(rows: I, limit: usize) -> Vec<(&'a str, u32)>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
{
    let mut ranked: Vec<(&str, u32)> = count_by(rows, |r| r.name.as_str()).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked.truncate(limit);
    ranked
}

/// Top medal winners overall or within one sport.
pub fn most_successful(dataset: &Dataset, sport: &Filter<String>) -> Vec<AthleteRanking> {
    let winners = dataset.medal_rows().filter(|r| sport.admits(r.sport.as_str()));
    let ranked = rank_names(winners, TOP_ATHLETES);
    let first = dataset.first_row_by_name();

    let table: Vec<AthleteRanking> = ranked
        .into_iter()
        .map(|(name, medals)| {
            let origin = first.get(name);
            AthleteRanking {
                name: name.to_string(),
                medals,
                sport: origin.map(|r| r.sport.clone()).unwrap_or_default(),
                region: origin.and_then(|r| r.region.clone()),
            }
        })
        .collect();

    debug!(%sport, athletes = table.len(), "most successful athletes computed");
    table
}

/// Top medal winners of one country.
pub fn most_successful_countrywise(dataset: &Dataset, country: &str) -> Vec<CountryAthlete> {
    let winners = dataset.medal_rows().filter(|r| r.in_region(country));
    let ranked = rank_names(winners, TOP_COUNTRY_ATHLETES);
    let first = dataset.first_row_by_name();

    ranked
        .into_iter()
        .map(|(name, medals)| CountryAthlete {
            name: name.to_string(),
            medals,
            sport: first
                .get(name)
                .map(|r| r.sport.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Medal of an athlete row, with "No Medal" standing in for none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MedalLabel {
    Won(Medal),
    NoMedal,
}

impl From<Option<Medal>> for MedalLabel {
    fn from(medal: Option<Medal>) -> Self {
        medal.map_or(MedalLabel::NoMedal, MedalLabel::Won)
    }
}

impl fmt::Display for MedalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedalLabel::Won(m) => f.write_str(m.as_str()),
            MedalLabel::NoMedal => f.write_str("No Medal"),
        }
    }
}

impl Serialize for MedalLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthletePhysique {
    pub name: String,
    pub sex: Sex,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub sport: String,
    pub region: Option<String>,
    pub medal: MedalLabel,
}

impl From<&AthleteRecord> for AthletePhysique {
    fn from(rec: &AthleteRecord) -> Self {
        Self {
            name: rec.name.clone(),
            sex: rec.sex,
            age: rec.age,
            height: rec.height,
            weight: rec.weight,
            sport: rec.sport.clone(),
            region: rec.region.clone(),
            medal: rec.medal.into(),
        }
    }
}

/// One row per (Name, region) with height, weight and medal.
///
/// The sport filter applies after deduplication, so an athlete is kept
/// only when their first row is in that sport.
pub fn weight_v_height(dataset: &Dataset, sport: &Filter<String>) -> Vec<AthletePhysique> {
    dataset
        .distinct_athletes()
        .into_iter()
        .filter(|r| sport.admits(r.sport.as_str()))
        .map(AthletePhysique::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Raw ages plus their summary; `summary` is `None` for an empty series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSeries {
    pub ages: Vec<f64>,
    pub summary: Option<AgeSummary>,
}

impl AgeSeries {
    fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a AthleteRecord>,
    {
        let ages: Vec<f64> = rows.into_iter().filter_map(|r| r.age).collect();
        let summary = summarize(&ages);
        Self { ages, summary }
    }
}

fn summarize(ages: &[f64]) -> Option<AgeSummary> {
    if ages.is_empty() {
        return None;
    }
    let mut sorted = ages.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    Some(AgeSummary {
        count: n,
        min: sorted[0],
        max: sorted[n - 1],
        mean: sorted.iter().sum::<f64>() / n as f64,
        median,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDistribution {
    pub overall: AgeSeries,
    pub gold: AgeSeries,
    pub silver: AgeSeries,
    pub bronze: AgeSeries,
}

/// Ages of all athletes and of medallists, one row per (Name, region).
pub fn age_distribution(dataset: &Dataset) -> AgeDistribution {
    let athletes = dataset.distinct_athletes();
    let with_medal = |medal: Medal| {
        AgeSeries::from_rows(athletes.iter().copied().filter(move |r| r.medal == Some(medal)))
    };

    AgeDistribution {
        overall: AgeSeries::from_rows(athletes.iter().copied()),
        gold: with_medal(Medal::Gold),
        silver: with_medal(Medal::Silver),
        bronze: with_medal(Medal::Bronze),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SportAges {
    pub sport: String,
    pub ages: AgeSeries,
}

/// Gold-medallist ages for each listed sport, in the order given.
pub fn gold_ages_by_sport(dataset: &Dataset, sports: &[&str]) -> Vec<SportAges> {
    let athletes = dataset.distinct_athletes();
    sports
        .iter()
        .map(|sport| SportAges {
            sport: sport.to_string(),
            ages: AgeSeries::from_rows(
                athletes
                    .iter()
                    .copied()
                    .filter(|r| r.sport == *sport && r.medal == Some(Medal::Gold)),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, sport: &str, region: &str, medal: Option<Medal>) -> AthleteRecord {
        AthleteRecord {
            name: name.into(),
            sport: sport.into(),
            region: Some(region.into()),
            medal,
            ..Default::default()
        }
    }

    #[test]
    fn ranking_counts_medal_rows_and_uses_first_sport() {
        let ds = Dataset::from_records(vec![
            row("Phelps", "Swimming", "USA", None),
            row("Phelps", "Swimming", "USA", Some(Medal::Gold)),
            row("Phelps", "Swimming", "USA", Some(Medal::Gold)),
            row("Bolt", "Athletics", "Jamaica", Some(Medal::Gold)),
            row("Ennis", "Athletics", "UK", None),
        ]);
        let top = most_successful(&ds, &Filter::Overall);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Phelps");
        assert_eq!(top[0].medals, 2);
        assert_eq!(top[0].region.as_deref(), Some("USA"));
        assert_eq!(top[1].sport, "Athletics");
    }

    #[test]
    fn sport_filter_keeps_career_first_sport_label() {
        let ds = Dataset::from_records(vec![
            row("Dual", "Cycling", "Italy", None),
            row("Dual", "Skating", "Italy", Some(Medal::Silver)),
        ]);
        let top = most_successful(&ds, &Filter::named("Skating"));
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].sport, "Cycling");
    }

    #[test]
    fn countrywise_sport_comes_from_first_row_anywhere() {
        let ds = Dataset::from_records(vec![
            row("Switcher", "Cycling", "Spain", None),
            row("Switcher", "Rowing", "Italy", Some(Medal::Gold)),
            row("Switcher", "Rowing", "Italy", Some(Medal::Bronze)),
            row("Local", "Fencing", "Italy", Some(Medal::Silver)),
        ]);
        let italy = most_successful_countrywise(&ds, "Italy");
        assert_eq!(
            italy,
            vec![
                CountryAthlete {
                    name: "Switcher".into(),
                    medals: 2,
                    sport: "Cycling".into(),
                },
                CountryAthlete {
                    name: "Local".into(),
                    medals: 1,
                    sport: "Fencing".into(),
                },
            ]
        );
        assert!(most_successful_countrywise(&ds, "Spain").is_empty());
    }

    #[test]
    fn caps_rankings_and_breaks_ties_by_name() {
        let rows: Vec<_> = (0..20)
            .map(|i| row(&format!("Athlete {i:02}"), "Judo", "Japan", Some(Medal::Bronze)))
            .collect();
        let ds = Dataset::from_records(rows);
        let top = most_successful(&ds, &Filter::Overall);
        assert_eq!(top.len(), TOP_ATHLETES);
        assert_eq!(top[0].name, "Athlete 00");

        let local = most_successful_countrywise(&ds, "Japan");
        assert_eq!(local.len(), TOP_COUNTRY_ATHLETES);
        assert_eq!(local[9].name, "Athlete 09");
    }

    #[test]
    fn physique_keeps_medalless_athletes() {
        let ds = Dataset::from_records(vec![
            row("A", "Rowing", "Ghana", None),
            row("A", "Rowing", "Ghana", Some(Medal::Gold)),
            row("B", "Judo", "Ghana", Some(Medal::Bronze)),
        ]);
        let all = weight_v_height(&ds, &Filter::Overall);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].medal, MedalLabel::NoMedal);
        assert_eq!(all[0].medal.to_string(), "No Medal");

        let judo = weight_v_height(&ds, &Filter::named("Judo"));
        assert_eq!(judo.len(), 1);
        assert_eq!(judo[0].medal.to_string(), "Bronze");
    }

    #[test]
    fn age_summary() {
        let summary = summarize(&[30.0, 20.0, 25.0, 21.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, 20.0);
        assert_eq!(summary.max, 30.0);
        assert_eq!(summary.median, 23.0);
        assert_eq!(summary.mean, 24.0);
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn gold_ages_skip_missing_ages() {
        let mut young = row("Y", "Diving", "China", Some(Medal::Gold));
        young.age = Some(16.0);
        let ageless = row("Z", "Diving", "China", Some(Medal::Gold));
        let ds = Dataset::from_records(vec![young, ageless]);

        let by_sport = gold_ages_by_sport(&ds, &["Diving", "Polo"]);
        assert_eq!(by_sport[0].ages.ages, vec![16.0]);
        assert!(by_sport[1].ages.summary.is_none());

        let dist = age_distribution(&ds);
        assert_eq!(dist.overall.ages.len(), 1);
        assert!(dist.silver.ages.is_empty());
    }
}
