//! Analytical queries over a loaded [`Championship`](crate::data::Championship)

pub mod correlation;
pub mod predictor;
pub mod stats;

// Re-export commonly used types
pub use correlation::{start_position_impact, GridImpact, Strength};
pub use predictor::{forecast_drivers, forecast_teams, recency_weight, Forecast, REFERENCE_YEAR};
pub use stats::{top_drivers, top_teams, DriverStats, PointsSummary, TeamStats, TOP_N};
