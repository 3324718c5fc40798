use std::borrow::Borrow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Label of the "no filter" choice in selection lists.
pub const OVERALL: &str = "Overall";

/// One selection field: either everything, or one concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    #[default]
    Overall,
    Specific(T),
}

impl<T> Filter<T> {
    pub fn is_overall(&self) -> bool {
        matches!(self, Filter::Overall)
    }

    pub fn specific(&self) -> Option<&T> {
        match self {
            Filter::Overall => None,
            Filter::Specific(v) => Some(v),
        }
    }

    pub fn as_ref(&self) -> Filter<&T> {
        match self {
            Filter::Overall => Filter::Overall,
            Filter::Specific(v) => Filter::Specific(v),
        }
    }

    /// `Overall` admits every value.
    pub fn admits<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self {
            Filter::Overall => true,
            Filter::Specific(v) => v.borrow() == value,
        }
    }
}

impl Filter<String> {
    /// `"Overall"` selects everything; any other string is taken verbatim.
    pub fn named(value: &str) -> Self {
        if value == OVERALL {
            Filter::Overall
        } else {
            Filter::Specific(value.to_string())
        }
    }
}

impl Filter<i32> {
    /// Parses a year choice. Anything other than `"Overall"` must be an integer.
    pub fn year(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed == OVERALL {
            return Ok(Filter::Overall);
        }
        trimmed
            .parse::<i32>()
            .map(Filter::Specific)
            .map_err(|_| Error::invalid_selection("year", value))
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Overall => f.write_str(OVERALL),
            Filter::Specific(v) => write!(f, "{v}"),
        }
    }
}

impl<T: Serialize> Serialize for Filter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Filter::Overall => serializer.serialize_str(OVERALL),
            Filter::Specific(v) => v.serialize(serializer),
        }
    }
}

/// The (year, country, sport) choice a caller passes to the queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub year: Filter<i32>,
    pub country: Filter<String>,
    pub sport: Filter<String>,
}

impl Selection {
    pub fn parse(year: &str, country: &str, sport: &str) -> Result<Self> {
        Ok(Self {
            year: Filter::year(year)?,
            country: Filter::named(country),
            sport: Filter::named(sport),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_parses_to_overall() {
        assert_eq!(Filter::year("Overall").unwrap(), Filter::Overall);
        assert_eq!(Filter::named("Overall"), Filter::<String>::Overall);
    }

    #[test]
    fn year_must_be_an_integer() {
        assert_eq!(Filter::year(" 2008 ").unwrap(), Filter::Specific(2008));
        let err = Filter::year("twenty").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSelection { field: "year", ref value } if value == "twenty"
        ));
    }

    #[test]
    fn overall_admits_everything() {
        assert!(Filter::<i32>::Overall.admits(&1900));
        assert!(Filter::Specific(1900_i32).admits(&1900));
        assert!(!Filter::Specific(1900_i32).admits(&1904));
        assert!(!Filter::named("India").admits("Pakistan"));
        assert!(Filter::named("India").admits("India"));
    }

    #[test]
    fn default_selection_is_unfiltered() {
        let sel = Selection::default();
        assert!(sel.year.is_overall() && sel.country.is_overall() && sel.sport.is_overall());
        assert_eq!(Selection::parse("Overall", "Overall", "Overall").unwrap(), sel);
    }

    #[test]
    fn serializes_overall_as_label() {
        let json = serde_json::to_string(&vec![Filter::Overall, Filter::Specific(1896)]).unwrap();
        assert_eq!(json, r#"["Overall",1896]"#);
    }
}
