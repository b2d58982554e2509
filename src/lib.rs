//! Paddock - championship data analysis
//!
//! This library ingests the seven delimited sources of a motorsport
//! championship (circuits, races, drivers, teams, standings, results)
//! into an immutable in-memory graph and answers analytical queries
//! over it:
//! - Top-5 driver and team rankings with descriptive statistics over a
//!   year range
//! - Recency-weighted performance forecasts, optionally per circuit
//! - The Pearson correlation between grid and finishing position
//!
//! # Example
//!
//! ```no_run
//! use paddock::analysis::stats::top_drivers;
//! use paddock::data::Championship;
//!
//! let data = Championship::load_dir("Database").expect("dataset");
//! for entry in top_drivers(&data, 2010, 2020) {
//!     println!("{}: {:.2}", entry.driver.full_name, entry.summary.mean);
//! }
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod models;
pub mod report;

// Re-export commonly used types
pub use analysis::{Forecast, GridImpact, Strength};
pub use data::{Championship, Sources};
pub use error::DataError;
pub use models::{Circuit, Driver, EntityId, Race, ResultRecord, Standing, Team};
