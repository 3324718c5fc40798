use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gold" => Ok(Medal::Gold),
            "Silver" => Ok(Medal::Silver),
            "Bronze" => Ok(Medal::Bronze),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    M,
    F,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::M => "M",
            Sex::F => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::M),
            "F" => Ok(Sex::F),
            _ => Err(()),
        }
    }
}

/// One athlete-event row of the preprocessed dataset.
///
/// Optional fields mirror cells that may be missing in the source data.
/// `region` is `None` when the NOC has no entry in the region lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AthleteRecord {
    pub id: Option<u32>,
    pub name: String,
    pub sex: Sex,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub team: String,
    pub noc: String,
    pub games: String,
    pub year: i32,
    pub season: String,
    pub city: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
    pub region: Option<String>,
}

/// Identity of one awarded medal. Every member of a winning team carries
/// the same key, so counting distinct keys counts the medal once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MedalUnitKey<'a> {
    pub team: &'a str,
    pub noc: &'a str,
    pub games: &'a str,
    pub year: i32,
    pub city: &'a str,
    pub sport: &'a str,
    pub event: &'a str,
    pub medal: Option<Medal>,
}

impl AthleteRecord {
    pub fn medal_unit(&self) -> MedalUnitKey<'_> {
        MedalUnitKey {
            team: &self.team,
            noc: &self.noc,
            games: &self.games,
            year: self.year,
            city: &self.city,
            sport: &self.sport,
            event: &self.event,
            medal: self.medal,
        }
    }

    /// (Name, region): the key used to count an athlete once per country.
    pub fn athlete_key(&self) -> (&str, Option<&str>) {
        (&self.name, self.region.as_deref())
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn has_medal(&self) -> bool {
        self.medal.is_some()
    }

    // One-hot medal indicators.
    pub fn gold(&self) -> u32 {
        (self.medal == Some(Medal::Gold)) as u32
    }

    pub fn silver(&self) -> u32 {
        (self.medal == Some(Medal::Silver)) as u32
    }

    pub fn bronze(&self) -> u32 {
        (self.medal == Some(Medal::Bronze)) as u32
    }

    pub fn in_region(&self, country: &str) -> bool {
        self.region.as_deref() == Some(country)
    }
}
