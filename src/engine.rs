use crate::athletes::{
    self, AgeDistribution, AthletePhysique, AthleteRanking, CountryAthlete, SportAges,
};
use crate::dataset::Dataset;
use crate::domains::{self, SelectionDomains};
use crate::heatmap::{self, Matrix};
use crate::selection::{Filter, Selection};
use crate::tally::{self, FetchedTally, RegionTally, YearMedals};
use crate::trends::{self, Column, OverviewStats, ParticipationRow, TimeSeries};

/// Every query over one borrowed dataset.
///
/// Holds no state of its own; calling a method twice returns equal
/// results.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    dataset: &'a Dataset,
}

impl<'a> QueryEngine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn medal_tally(&self) -> Vec<RegionTally> {
        tally::medal_tally(self.dataset)
    }

    pub fn fetch_medal_tally(&self, year: &Filter<i32>, country: &Filter<String>) -> FetchedTally {
        tally::fetch_medal_tally(self.dataset, year, country)
    }

    /// Medal table for the year and country of `selection`; its sport is ignored.
    pub fn tally_for(&self, selection: &Selection) -> FetchedTally {
        self.fetch_medal_tally(&selection.year, &selection.country)
    }

    pub fn country_year_list(&self) -> SelectionDomains {
        domains::country_year_list(self.dataset)
    }

    pub fn sport_list(&self) -> Vec<Filter<String>> {
        domains::sport_list(self.dataset)
    }

    pub fn data_over_time(&self, column: Column) -> TimeSeries {
        trends::data_over_time(self.dataset, column)
    }

    pub fn most_successful(&self, sport: &Filter<String>) -> Vec<AthleteRanking> {
        athletes::most_successful(self.dataset, sport)
    }

    pub fn yearwise_medal_tally(&self, country: &str) -> Vec<YearMedals> {
        tally::yearwise_medal_tally(self.dataset, country)
    }

    pub fn country_event_heatmap(&self, country: &str) -> Option<Matrix> {
        heatmap::country_event_heatmap(self.dataset, country)
    }

    pub fn most_successful_countrywise(&self, country: &str) -> Vec<CountryAthlete> {
        athletes::most_successful_countrywise(self.dataset, country)
    }

    pub fn weight_v_height(&self, sport: &Filter<String>) -> Vec<AthletePhysique> {
        athletes::weight_v_height(self.dataset, sport)
    }

    pub fn men_vs_women(&self) -> Vec<ParticipationRow> {
        trends::men_vs_women(self.dataset)
    }

    pub fn overview(&self) -> OverviewStats {
        trends::overview(self.dataset)
    }

    pub fn events_heatmap(&self) -> Matrix {
        heatmap::events_heatmap(self.dataset)
    }

    pub fn age_distribution(&self) -> AgeDistribution {
        athletes::age_distribution(self.dataset)
    }

    pub fn gold_ages_by_sport(&self, sports: &[&str]) -> Vec<SportAges> {
        athletes::gold_ages_by_sport(self.dataset, sports)
    }
}
