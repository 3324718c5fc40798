use std::collections::BTreeSet;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::selection::Filter;

/// Choices offered to a caller, each list led by `Overall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionDomains {
    pub years: Vec<Filter<i32>>,
    pub countries: Vec<Filter<String>>,
}

fn with_overall<T, I: IntoIterator<Item = T>>(values: I) -> Vec<Filter<T>> {
    std::iter::once(Filter::Overall)
        .chain(values.into_iter().map(Filter::Specific))
        .collect()
}

/// Distinct years and regions, ascending. Rows without a region add no
/// country choice.
pub fn country_year_list(dataset: &Dataset) -> SelectionDomains {
    let years: BTreeSet<i32> = dataset.iter().map(|r| r.year).collect();
    let countries: BTreeSet<&str> = dataset.iter().filter_map(|r| r.region()).collect();

    SelectionDomains {
        years: with_overall(years),
        countries: with_overall(countries.into_iter().map(str::to_string)),
    }
}

pub fn sport_list(dataset: &Dataset) -> Vec<Filter<String>> {
    let sports: BTreeSet<&str> = dataset.iter().map(|r| r.sport.as_str()).collect();
    with_overall(sports.into_iter().map(str::to_string))
}
