//! `olympics`: query the Olympic athlete-event dataset from the terminal.
//!
//! Data comes from the CSV paths in the configuration, or from the seeded
//! generator with `--synthetic-seed`. Every command prints a table, or
//! JSON with `--output json`; most can also write it as Parquet with
//! `--export`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use olympics_analytics::athletes::POPULAR_SPORTS;
use olympics_analytics::columnar::Columnar;
use olympics_analytics::config::AppConfig;
use olympics_analytics::heatmap::Matrix;
use olympics_analytics::synthetic::{self, SyntheticConfig};
use olympics_analytics::tally::FetchedTally;
use olympics_analytics::trends::Column;
use olympics_analytics::{loader, log, Dataset, Filter, QueryEngine, Selection, OVERALL};

mod output;

use output::{emit, export, opt, OutputFormat, Table};

#[derive(Parser)]
#[command(name = "olympics")]
#[command(about = "Medal tallies and participation trends of the Olympic Games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (default: olympics.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (human, json)
    #[arg(long, global = true, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Also write the result table to this Parquet file
    #[arg(long, global = true)]
    export: Option<PathBuf>,

    /// Query a generated dataset with this seed instead of the CSV files
    #[arg(long, global = true, env = "OLYMPICS_SYNTHETIC_SEED")]
    synthetic_seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Query(QueryCommand),
    /// Generate a seeded dataset and summarise it
    Synthetic {
        #[arg(long, default_value_t = SyntheticConfig::default().seed)]
        seed: u64,
        #[arg(long, default_value_t = SyntheticConfig::default().athletes)]
        athletes: usize,
        #[arg(long, default_value_t = SyntheticConfig::default().editions)]
        editions: usize,
    },
}

/// Commands that query a loaded dataset.
#[derive(Subcommand)]
enum QueryCommand {
    /// List the selectable years, countries and sports
    Domains,
    /// Medal tally, optionally for one year and/or country
    Tally {
        #[arg(long, default_value = OVERALL)]
        year: String,
        #[arg(long, default_value = OVERALL)]
        country: String,
    },
    /// Distinct values of a column per edition
    OverTime {
        /// region, event, name, sport, city, noc or team
        #[arg(long, default_value = "region")]
        column: Column,
    },
    /// Most successful athletes, optionally within one sport
    Top {
        #[arg(long, default_value = OVERALL)]
        sport: String,
    },
    /// Year-by-year medals, event heatmap and best athletes of one country
    Country {
        #[arg(long)]
        country: String,
    },
    /// Height and weight of every athlete, optionally within one sport
    Physique {
        #[arg(long, default_value = OVERALL)]
        sport: String,
    },
    /// Male and female athletes per edition
    Participation,
    /// Headline counts for the whole dataset
    Overview,
    /// Distinct events per sport and edition
    EventsHeatmap,
    /// Age distributions of athletes and medallists
    Ages {
        /// Sports for the gold-medallist breakdown (default: popular sports)
        #[arg(long, value_delimiter = ',')]
        sports: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let _guard = log::init_logging(&cfg);

    let export_path = cli.export.as_deref();

    match cli.command {
        Commands::Synthetic {
            seed,
            athletes,
            editions,
        } => {
            let dataset = synthetic::generate(&SyntheticConfig {
                seed,
                athletes,
                editions,
                ..Default::default()
            });
            let stats = QueryEngine::new(&dataset).overview();
            emit(cli.output, &format!("Synthetic dataset (seed {seed})"), &stats, || {
                format!("{} rows\n\n{}", dataset.len(), overview_table(&stats).render())
            })?;
            export(export_path, || Columnar::from_dataset(&dataset))
        }
        Commands::Query(command) => {
            let dataset = open_dataset(&cfg, cli.synthetic_seed)?;
            run(command, &QueryEngine::new(&dataset), cli.output, export_path)
        }
    }
}

fn open_dataset(cfg: &AppConfig, synthetic_seed: Option<u64>) -> anyhow::Result<Dataset> {
    if let Some(seed) = synthetic_seed {
        info!(seed, "using synthetic dataset");
        return Ok(synthetic::generate(&SyntheticConfig {
            seed,
            ..Default::default()
        }));
    }
    loader::load_dataset(&cfg.athletes_path, &cfg.regions_path, &cfg.season).with_context(|| {
        format!(
            "loading {} and {}",
            cfg.athletes_path.display(),
            cfg.regions_path.display()
        )
    })
}

fn run(
    command: QueryCommand,
    engine: &QueryEngine<'_>,
    format: OutputFormat,
    export_path: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        QueryCommand::Domains => {
            if export_path.is_some() {
                bail!("--export is not supported for domains");
            }
            let domains = engine.country_year_list();
            let sports = engine.sport_list();
            let data = serde_json::json!({
                "years": domains.years,
                "countries": domains.countries,
                "sports": sports,
            });
            emit(format, "Selections", &data, || {
                let join = |v: Vec<String>| v.join(", ");
                format!(
                    "Years: {}\n\nCountries: {}\n\nSports: {}",
                    join(domains.years.iter().map(ToString::to_string).collect()),
                    join(domains.countries.iter().map(ToString::to_string).collect()),
                    join(sports.iter().map(ToString::to_string).collect()),
                )
            })
        }

        QueryCommand::Tally { year, country } => {
            let selection = Selection::parse(&year, &country, OVERALL)?;
            let tally = engine.tally_for(&selection);
            emit(format, &tally_title(&selection), &tally, || tally_table(&tally).render())?;
            export(export_path, || Columnar::from_tally(&tally))
        }

        QueryCommand::OverTime { column } => {
            let series = engine.data_over_time(column);
            let mut table = Table::new(["Editions", column.label()]);
            for p in &series.points {
                table.row([p.edition.to_string(), p.count.to_string()]);
            }
            emit(format, &format!("{column} over the years"), &series, || table.render())?;
            export(export_path, || Columnar::from_time_series(&series))
        }

        QueryCommand::Top { sport } => {
            let sport = Filter::named(&sport);
            let rows = engine.most_successful(&sport);
            let mut table = Table::new(["Name", "Medals", "Sport", "Region"]);
            for r in &rows {
                table.row([
                    r.name.clone(),
                    r.medals.to_string(),
                    r.sport.clone(),
                    opt(r.region.as_deref()),
                ]);
            }
            emit(format, &format!("Most successful athletes: {sport}"), &rows, || {
                table.render()
            })?;
            export(export_path, || Columnar::from_rows(&rows))
        }

        QueryCommand::Country { country } => {
            let yearwise = engine.yearwise_medal_tally(&country);
            let heatmap = engine.country_event_heatmap(&country);
            let athletes = engine.most_successful_countrywise(&country);

            let data = serde_json::json!({
                "country": &country,
                "yearwise": yearwise,
                "heatmap": heatmap,
                "athletes": athletes,
            });
            emit(format, &format!("{country} Medal Tally over the years"), &data, || {
                let mut years = Table::new(["Year", "Medals"]);
                for y in &yearwise {
                    years.row([y.year.to_string(), y.medals.to_string()]);
                }
                let mut best = Table::new(["Name", "Medals", "Sport"]);
                for a in &athletes {
                    best.row([a.name.clone(), a.medals.to_string(), a.sport.clone()]);
                }
                let heat = heatmap
                    .as_ref()
                    .map(matrix_table)
                    .map_or_else(|| "no medals".to_string(), |t| t.render());
                format!(
                    "{}\n\n{country} excels in the following sports\n\n{heat}\n\nTop 10 athletes of {country}\n\n{}",
                    years.render(),
                    best.render()
                )
            })?;
            export(export_path, || Columnar::from_rows(&yearwise))
        }

        QueryCommand::Physique { sport } => {
            let sport = Filter::named(&sport);
            let rows = engine.weight_v_height(&sport);
            let mut table = Table::new(["Name", "Sex", "Height", "Weight", "Medal"]);
            for r in &rows {
                table.row([
                    r.name.clone(),
                    r.sex.as_str().to_string(),
                    opt(r.height),
                    opt(r.weight),
                    r.medal.to_string(),
                ]);
            }
            emit(format, &format!("Height vs weight: {sport}"), &rows, || table.render())?;
            export(export_path, || Columnar::from_rows(&rows))
        }

        QueryCommand::Participation => {
            let rows = engine.men_vs_women();
            let mut table = Table::new(["Year", "Male", "Female"]);
            for r in &rows {
                table.row([r.year.to_string(), r.male.to_string(), r.female.to_string()]);
            }
            emit(format, "Men vs women participation over the years", &rows, || {
                table.render()
            })?;
            export(export_path, || Columnar::from_rows(&rows))
        }

        QueryCommand::Overview => {
            if export_path.is_some() {
                bail!("--export is not supported for overview");
            }
            let stats = engine.overview();
            emit(format, "Top statistics", &stats, || overview_table(&stats).render())
        }

        QueryCommand::EventsHeatmap => {
            let matrix = engine.events_heatmap();
            emit(format, "No. of events over time (every sport)", &matrix, || {
                matrix_table(&matrix).render()
            })?;
            export(export_path, || Columnar::from_matrix(&matrix))
        }

        QueryCommand::Ages { sports } => {
            if export_path.is_some() {
                bail!("--export is not supported for ages");
            }
            let sports: Vec<&str> = if sports.is_empty() {
                POPULAR_SPORTS.to_vec()
            } else {
                sports.iter().map(String::as_str).collect()
            };
            let distribution = engine.age_distribution();
            let by_sport = engine.gold_ages_by_sport(&sports);

            let data = serde_json::json!({
                "distribution": distribution,
                "gold_by_sport": by_sport,
            });
            emit(format, "Distribution of age", &data, || {
                let mut table = Table::new(["Series", "Count", "Min", "Median", "Mean", "Max"]);
                let series = [
                    ("Overall Age", &distribution.overall),
                    ("Gold Medalist", &distribution.gold),
                    ("Silver Medalist", &distribution.silver),
                    ("Bronze Medalist", &distribution.bronze),
                ]
                .into_iter()
                .chain(by_sport.iter().map(|s| (s.sport.as_str(), &s.ages)));
                for (label, ages) in series {
                    let s = ages.summary;
                    table.row([
                        label.to_string(),
                        opt(s.map(|s| s.count)),
                        opt(s.map(|s| s.min)),
                        opt(s.map(|s| s.median)),
                        opt(s.map(|s| format!("{:.1}", s.mean))),
                        opt(s.map(|s| s.max)),
                    ]);
                }
                table.render()
            })
        }
    }
}

fn tally_title(selection: &Selection) -> String {
    match (&selection.year, &selection.country) {
        (Filter::Overall, Filter::Overall) => "Overall Medal Tally".to_string(),
        (Filter::Specific(y), Filter::Overall) => format!("Medal Tally in {y}"),
        (Filter::Overall, Filter::Specific(c)) => format!("{c} Overall Performance"),
        (Filter::Specific(y), Filter::Specific(c)) => {
            format!("Overall Performance of {c} in {y}")
        }
    }
}

fn tally_table(tally: &FetchedTally) -> Table {
    let rows: Vec<(String, _)> = match tally {
        FetchedTally::ByRegion(rows) => rows.iter().map(|r| (r.region.clone(), r.medals)).collect(),
        FetchedTally::ByYear(rows) => rows.iter().map(|r| (r.year.to_string(), r.medals)).collect(),
    };
    let key = match tally {
        FetchedTally::ByRegion(_) => "Region",
        FetchedTally::ByYear(_) => "Year",
    };

    let mut table = Table::new([key, "Gold", "Silver", "Bronze", "Total"]);
    for (label, m) in rows {
        table.row([
            label,
            m.gold.to_string(),
            m.silver.to_string(),
            m.bronze.to_string(),
            m.total.to_string(),
        ]);
    }
    table
}

fn matrix_table(matrix: &Matrix) -> Table {
    let mut table = Table::new(
        std::iter::once("Sport".to_string()).chain(matrix.columns.iter().map(ToString::to_string)),
    );
    for (sport, cells) in matrix.rows.iter().zip(&matrix.cells) {
        table.row(std::iter::once(sport.clone()).chain(cells.iter().map(ToString::to_string)));
    }
    table
}

fn overview_table(stats: &olympics_analytics::trends::OverviewStats) -> Table {
    let mut table = Table::new(["Statistic", "Count"]);
    for (label, n) in [
        ("Editions", stats.editions),
        ("Hosts", stats.hosts),
        ("Sports", stats.sports),
        ("Events", stats.events),
        ("Athletes", stats.athletes),
        ("Nations", stats.nations),
    ] {
        table.row([label.to_string(), n.to_string()]);
    }
    table
}
