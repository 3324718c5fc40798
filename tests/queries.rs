use olympics_analytics::loader::{read_athlete_events, read_noc_regions};
use olympics_analytics::preprocess::preprocess;
use olympics_analytics::synthetic::{generate, SyntheticConfig};
use olympics_analytics::tally::{fetch_medal_tally, medal_tally, FetchedTally, MedalCounts, RegionTally};
use olympics_analytics::trends::{Column, ParticipationRow};
use olympics_analytics::{AthleteRecord, Dataset, Filter, Medal, QueryEngine, Sex};

fn row(name: &str, region: &str, year: i32, event: &str, medal: Option<Medal>) -> AthleteRecord {
    AthleteRecord {
        name: name.into(),
        team: region.into(),
        noc: region.to_ascii_uppercase(),
        games: format!("{year} Summer"),
        year,
        season: "Summer".into(),
        city: "Somewhere".into(),
        sport: "Judo".into(),
        event: event.into(),
        medal,
        region: Some(region.into()),
        ..Default::default()
    }
}

fn sample() -> Dataset {
    Dataset::from_records(vec![
        row("Ana", "Peru", 2000, "Judo A", Some(Medal::Gold)),
        row("Ben", "Chile", 2000, "Judo A", Some(Medal::Silver)),
        row("Cid", "Chile", 2000, "Judo B", Some(Medal::Gold)),
        row("Ana", "Peru", 2004, "Judo A", Some(Medal::Gold)),
        row("Dan", "Peru", 2004, "Judo B", Some(Medal::Gold)),
        row("Eva", "Chile", 2004, "Judo B", Some(Medal::Bronze)),
        row("Fay", "Chile", 2008, "Judo A", None),
        row("Gus", "Peru", 2008, "Judo A", Some(Medal::Silver)),
    ])
}

const RAW_EVENTS: &str = "\
ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal
1,Runner One,M,24,180,75,A,USA,2000 Summer,2000,Summer,Sydney,Judo,E1,Gold
2,Runner Two,M,NA,NA,NA,A,USA,2000 Summer,2000,Summer,Sydney,Judo,E1,Gold
3,Skier,F,30,170,60,B,USA,2002 Winter,2002,Winter,Salt Lake City,Skiing,E2,Gold
";

const RAW_REGIONS: &str = "\
NOC,region,notes
USA,United States,
";

#[test]
fn team_event_duplicate_counts_one_gold() {
    let events = read_athlete_events(RAW_EVENTS.as_bytes()).unwrap();
    let regions = read_noc_regions(RAW_REGIONS.as_bytes()).unwrap();
    let ds = preprocess(events, &regions, "Summer");
    assert_eq!(ds.len(), 2);

    let tally = medal_tally(&ds);
    assert_eq!(tally.len(), 1);
    assert_eq!(tally[0].region, "United States");
    assert_eq!(tally[0].medals.gold, 1);
    assert_eq!(tally[0].medals.total, 1);
}

#[test]
fn overall_fetch_matches_medal_tally() {
    let ds = sample();
    let fetched = fetch_medal_tally(&ds, &Filter::Overall, &Filter::Overall);
    assert_eq!(fetched, FetchedTally::ByRegion(medal_tally(&ds)));
}

#[test]
fn tally_total_equals_distinct_medal_units() {
    let ds = sample();
    let units: std::collections::HashSet<_> =
        ds.medal_rows().map(AthleteRecord::medal_unit).collect();
    let total: u32 = medal_tally(&ds).iter().map(|r| r.medals.total).sum();
    assert_eq!(total as usize, units.len());
}

#[test]
fn country_fetch_agrees_with_yearwise_tally() {
    let ds = sample();
    let engine = QueryEngine::new(&ds);
    for country in ["Peru", "Chile", "Atlantis"] {
        let fetched = engine.fetch_medal_tally(&Filter::Overall, &Filter::Specific(country.into()));
        let yearwise: u32 = engine
            .yearwise_medal_tally(country)
            .iter()
            .map(|y| y.medals)
            .sum();
        assert_eq!(fetched.total_medals(), yearwise, "{country}");
    }
}

#[test]
fn country_across_years_is_sorted_by_gold_ascending() {
    let ds = sample();
    let fetched = fetch_medal_tally(&ds, &Filter::Overall, &Filter::Specific("Peru".into()));
    let FetchedTally::ByYear(rows) = fetched else {
        panic!("expected a per-year breakdown, got {fetched:?}");
    };
    let order: Vec<(i32, u32)> = rows.iter().map(|r| (r.year, r.medals.gold)).collect();
    assert_eq!(order, vec![(2008, 0), (2000, 1), (2004, 2)]);
}

#[test]
fn year_and_country_gives_a_single_region_row() {
    let ds = sample();
    let fetched = fetch_medal_tally(&ds, &Filter::Specific(2004), &Filter::Specific("Chile".into()));
    assert_eq!(
        fetched,
        FetchedTally::ByRegion(vec![RegionTally {
            region: "Chile".into(),
            medals: MedalCounts {
                gold: 0,
                silver: 0,
                bronze: 1,
                total: 1,
            },
        }])
    );
}

#[test]
fn domains_lead_with_overall_and_ascend() {
    let ds = generate(&SyntheticConfig::default());
    let domains = QueryEngine::new(&ds).country_year_list();

    assert_eq!(domains.years[0], Filter::Overall);
    assert_eq!(domains.countries[0], Filter::Overall);

    let years: Vec<i32> = domains.years[1..]
        .iter()
        .filter_map(|f| f.specific().copied())
        .collect();
    assert_eq!(years.len(), domains.years.len() - 1);
    assert!(years.windows(2).all(|w| w[0] < w[1]));

    let countries: Vec<&String> = domains.countries[1..]
        .iter()
        .filter_map(Filter::specific)
        .collect();
    assert!(countries.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn most_successful_is_capped_and_non_increasing() {
    let ds = generate(&SyntheticConfig::default());
    let top = QueryEngine::new(&ds).most_successful(&Filter::Overall);
    assert!(!top.is_empty());
    assert!(top.len() <= 15);
    assert!(top.windows(2).all(|w| w[0].medals >= w[1].medals));
}

#[test]
fn heatmap_is_absent_without_medals() {
    let ds = sample();
    let engine = QueryEngine::new(&ds);
    assert!(engine.country_event_heatmap("Atlantis").is_none());

    let peru = engine.country_event_heatmap("Peru").unwrap();
    assert_eq!(peru.get("Judo", 2004), Some(2));
}

#[test]
fn men_vs_women_reports_missing_sex_as_zero() {
    let athlete = |name: &str, sex: Sex, year: i32| AthleteRecord {
        sex,
        ..row(name, "Peru", year, "Judo A", None)
    };
    let ds = Dataset::from_records(vec![
        athlete("M1", Sex::M, 2004),
        athlete("M2", Sex::M, 2004),
        athlete("M3", Sex::M, 2004),
        athlete("F1", Sex::F, 2004),
        athlete("M4", Sex::M, 2008),
        athlete("M5", Sex::M, 2008),
    ]);

    let rows = QueryEngine::new(&ds).men_vs_women();
    assert_eq!(
        rows,
        vec![
            ParticipationRow {
                year: 2004,
                male: 3,
                female: 1
            },
            ParticipationRow {
                year: 2008,
                male: 2,
                female: 0
            },
        ]
    );
}

#[test]
fn repeated_queries_return_identical_results() {
    let ds = generate(&SyntheticConfig {
        seed: 7,
        ..Default::default()
    });
    let engine = QueryEngine::new(&ds);

    assert_eq!(engine.medal_tally(), engine.medal_tally());
    assert_eq!(
        engine.fetch_medal_tally(&Filter::Specific(1996), &Filter::Overall),
        engine.fetch_medal_tally(&Filter::Specific(1996), &Filter::Overall)
    );
    assert_eq!(engine.data_over_time(Column::Event), engine.data_over_time(Column::Event));
    assert_eq!(engine.events_heatmap(), engine.events_heatmap());
    assert_eq!(engine.men_vs_women(), engine.men_vs_women());
    assert_eq!(engine.overview(), engine.overview());
}

#[test]
fn bad_year_is_rejected() {
    let err = olympics_analytics::Selection::parse("20x4", "Overall", "Overall").unwrap_err();
    assert!(matches!(
        err,
        olympics_analytics::Error::InvalidSelection { field: "year", .. }
    ));
}
