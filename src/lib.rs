//! Descriptive analytics over the historical Olympic athlete-event table.
//!
//! A [`Dataset`] is built once (from CSV through [`loader`] and
//! [`preprocess`], or from [`synthetic`]) and then only read. Every query
//! takes it by reference and returns plain tables; [`QueryEngine`] bundles
//! them behind one borrowed handle.

pub mod athletes;
pub mod columnar;
pub mod config;
pub mod dataset;
pub mod domains;
pub mod engine;
pub mod error;
pub mod export;
pub mod heatmap;
pub mod loader;
pub mod log;
pub mod partitioner;
pub mod preprocess;
pub mod record;
pub mod selection;
pub mod synthetic;
pub mod tally;
pub mod trends;

pub use dataset::Dataset;
pub use engine::QueryEngine;
pub use error::{Error, Result};
pub use record::{AthleteRecord, Medal, Sex};
pub use selection::{Filter, Selection, OVERALL};
