//! Human and JSON rendering for CLI results.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use olympics_analytics::columnar::Columnar;
use olympics_analytics::export::write_parquet;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Plain text table with left-aligned, width-padded columns.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            headers: headers.into_iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.rows
            .push(cells.into_iter().map(|c| c.to_string()).collect());
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

/// `"-"` for a missing cell.
pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Prints `data` as pretty JSON, or the title and `human` rendering.
pub fn emit<T, F>(format: OutputFormat, title: &str, data: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Human => {
            println!("{title}\n");
            println!("{}", human());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Writes the table behind a result when `--export` was given.
pub fn export<F>(path: Option<&Path>, build: F) -> anyhow::Result<()>
where
    F: FnOnce() -> olympics_analytics::Result<Columnar>,
{
    let Some(path) = path else {
        return Ok(());
    };
    let columnar = build().context("building columnar table")?;
    write_parquet(&columnar, path).with_context(|| format!("writing {}", path.display()))?;
    eprintln!("exported {} rows to {}", columnar.len(), path.display());
    Ok(())
}
