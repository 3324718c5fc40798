//! Seeded generator of realistic-looking preprocessed datasets.
//!
//! Output is a pure function of [`SyntheticConfig`]: the same seed always
//! yields the same rows in the same order.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::dataset::Dataset;
use crate::record::{AthleteRecord, Medal, Sex};

/// (NOC, region). `ROT` has no region, like the refugee team in the real lookup.
const NOCS: &[(&str, Option<&str>)] = &[
    ("USA", Some("USA")),
    ("GBR", Some("UK")),
    ("KEN", Some("Kenya")),
    ("JPN", Some("Japan")),
    ("BRA", Some("Brazil")),
    ("FRA", Some("France")),
    ("ROT", None),
];

/// (sport, [(event, team event?)])
const SPORTS: &[(&str, &[(&str, bool)])] = &[
    (
        "Athletics",
        &[
            ("Athletics Men's 100 metres", false),
            ("Athletics Men's 4 x 100 metres Relay", true),
        ],
    ),
    (
        "Swimming",
        &[
            ("Swimming Women's 200 metres Freestyle", false),
            ("Swimming Women's 4 x 100 metres Freestyle Relay", true),
        ],
    ),
    ("Rowing", &[("Rowing Men's Coxless Fours", true)]),
    ("Judo", &[("Judo Men's Lightweight", false)]),
    ("Fencing", &[("Fencing Women's Foil, Individual", false)]),
];

const HOSTS: &[&str] = &[
    "Athina",
    "Paris",
    "London",
    "Sydney",
    "Beijing",
    "Rio de Janeiro",
    "Tokyo",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub athletes: usize,
    pub first_year: i32,
    pub editions: usize,
    pub entrants_per_event: usize,
    /// Probability that an age, height or weight cell is missing.
    pub missing_share: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            athletes: 400,
            first_year: 1992,
            editions: 6,
            entrants_per_event: 12,
            missing_share: 0.1,
        }
    }
}

struct Athlete {
    name: String,
    sex: Sex,
    noc: usize,
    sport: usize,
    birth_year: i32,
    height: f64,
    weight: f64,
}

pub fn generate(cfg: &SyntheticConfig) -> Dataset {
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let athletes: Vec<Athlete> = (0..cfg.athletes)
        .map(|i| Athlete {
            name: format!("Athlete {i:05}"),
            sex: if rng.random_bool(0.5) { Sex::M } else { Sex::F },
            noc: rng.random_range(0..NOCS.len()),
            sport: rng.random_range(0..SPORTS.len()),
            birth_year: cfg.first_year - rng.random_range(16..36),
            height: rng.random_range(150.0..205.0_f64).round(),
            weight: rng.random_range(45.0..120.0_f64).round(),
        })
        .collect();

    let mut rows = Vec::new();
    for e in 0..cfg.editions {
        let year = cfg.first_year + 4 * e as i32;
        let city = HOSTS[e % HOSTS.len()];

        for (s, (sport, events)) in SPORTS.iter().enumerate() {
            let pool: Vec<&Athlete> = athletes.iter().filter(|a| a.sport == s).collect();
            let take = cfg.entrants_per_event.min(pool.len());

            for (event, team_event) in events.iter() {
                let mut entrants: Vec<&Athlete> =
                    pool.choose_multiple(&mut rng, take).copied().collect();
                entrants.shuffle(&mut rng);

                // Placings: individuals by entrant order, teams by the
                // order their first member appears.
                let mut placing: Vec<usize> = Vec::new();
                for a in &entrants {
                    if !*team_event || !placing.contains(&a.noc) {
                        placing.push(a.noc);
                    }
                }

                for (i, a) in entrants.iter().enumerate() {
                    let place = if *team_event {
                        placing.iter().position(|n| *n == a.noc).unwrap_or(usize::MAX)
                    } else {
                        i
                    };
                    let (noc, region) = NOCS[a.noc];
                    let age = year - a.birth_year;
                    let mut maybe = |v: f64| (!rng.random_bool(cfg.missing_share)).then_some(v);

                    rows.push(AthleteRecord {
                        id: None,
                        name: a.name.clone(),
                        sex: a.sex,
                        age: maybe(age as f64),
                        height: maybe(a.height),
                        weight: maybe(a.weight),
                        team: region.unwrap_or(noc).to_string(),
                        noc: noc.to_string(),
                        games: format!("{year} Summer"),
                        year,
                        season: "Summer".to_string(),
                        city: city.to_string(),
                        sport: sport.to_string(),
                        event: event.to_string(),
                        medal: Medal::ALL.get(place).copied(),
                        region: region.map(str::to_string),
                    });
                }
            }
        }
    }

    debug!(seed = cfg.seed, rows = rows.len(), "synthetic dataset generated");
    Dataset::from_records(rows)
}
