//! Descriptive statistics and top-5 ranking
//!
//! Ranks drivers and teams by mean points over an inclusive year range.
//! Drivers sample their race results, teams their standings; an entity
//! with no qualifying records in the range is excluded from the output
//! entirely rather than reported with empty statistics.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::Championship;
use crate::models::{Driver, EntityId, Race, Team};

/// Number of entities reported by the ranking queries
pub const TOP_N: usize = 5;

/// Descriptive statistics over one entity's points sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsSummary {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl PointsSummary {
    /// Summarize a points sample. `None` for an empty sample, which is
    /// what keeps the entity out of the ranking output.
    fn from_sample(points: &[f64]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let max = points.iter().cloned().fold(f64::MIN, f64::max);
        let min = points.iter().cloned().fold(f64::MAX, f64::min);
        let mean = points.iter().sum::<f64>() / points.len() as f64;
        // Population variance: squared deviations over n, not n - 1.
        let variance =
            points.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / points.len() as f64;
        Some(Self {
            max,
            min,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

/// A ranked driver with its in-range statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverStats {
    pub driver: Driver,
    pub summary: PointsSummary,
}

/// A ranked team with its in-range statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: Team,
    pub summary: PointsSummary,
}

fn race_in_range(races: &BTreeMap<EntityId, Race>, race_id: EntityId, start: i32, end: i32) -> bool {
    races
        .get(&race_id)
        .map_or(false, |race| race.year >= start && race.year <= end)
}

fn by_mean_descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Rank drivers by mean result points over the inclusive year range and
/// keep the top five. The sort is stable over ascending-id iteration, so
/// ties on the mean resolve to the lower driver id.
pub fn top_drivers(data: &Championship, start_year: i32, end_year: i32) -> Vec<DriverStats> {
    let mut ranked: Vec<DriverStats> = data
        .drivers
        .values()
        .filter_map(|driver| {
            let points: Vec<f64> = data
                .driver_results
                .values()
                .filter(|r| r.participant_id == driver.driver_id)
                .filter(|r| race_in_range(&data.races, r.race_id, start_year, end_year))
                .map(|r| r.points)
                .collect();
            PointsSummary::from_sample(&points).map(|summary| DriverStats {
                driver: driver.clone(),
                summary,
            })
        })
        .collect();

    ranked.sort_by(|a, b| by_mean_descending(a.summary.mean, b.summary.mean));
    ranked.truncate(TOP_N);
    ranked
}

/// Rank teams by mean standing points over the inclusive year range and
/// keep the top five.
pub fn top_teams(data: &Championship, start_year: i32, end_year: i32) -> Vec<TeamStats> {
    let mut ranked: Vec<TeamStats> = data
        .teams
        .values()
        .filter_map(|team| {
            let points: Vec<f64> = data
                .team_standings
                .values()
                .filter(|s| s.participant_id == team.team_id)
                .filter(|s| race_in_range(&data.races, s.race_id, start_year, end_year))
                .map(|s| s.points)
                .collect();
            PointsSummary::from_sample(&points).map(|summary| TeamStats {
                team: team.clone(),
                summary,
            })
        })
        .collect();

    ranked.sort_by(|a, b| by_mean_descending(a.summary.mean, b.summary.mean));
    ranked.truncate(TOP_N);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Circuit, ResultRecord, Standing};

    fn driver(id: EntityId, name: &str) -> Driver {
        Driver {
            driver_id: id,
            full_name: name.to_string(),
            dob: "1990-01-01".to_string(),
            nationality: "British".to_string(),
        }
    }

    fn result(id: EntityId, race_id: EntityId, driver_id: EntityId, points: f64) -> ResultRecord {
        ResultRecord {
            result_id: id,
            race_id,
            participant_id: driver_id,
            grid: 1,
            position: 1,
            points,
        }
    }

    fn fixture() -> Championship {
        let mut circuits = BTreeMap::new();
        circuits.insert(
            1,
            Circuit {
                circuit_id: 1,
                name: "Monza".to_string(),
                location: "Monza".to_string(),
                country: "Italy".to_string(),
            },
        );

        let mut races = BTreeMap::new();
        for (race_id, year) in [(100, 2020), (101, 2021), (102, 2022)] {
            races.insert(
                race_id,
                Race {
                    race_id,
                    year,
                    round: 1,
                    name: "Italian Grand Prix".to_string(),
                    circuit_id: 1,
                },
            );
        }

        let mut drivers = BTreeMap::new();
        drivers.insert(1, driver(1, "Driver A"));
        drivers.insert(2, driver(2, "Driver B"));
        drivers.insert(3, driver(3, "Driver C"));

        let mut driver_results = BTreeMap::new();
        // Driver A: 10, 0, 8 across 2020-2022
        driver_results.insert(1, result(1, 100, 1, 10.0));
        driver_results.insert(2, result(2, 101, 1, 0.0));
        driver_results.insert(3, result(3, 102, 1, 8.0));
        // Driver B: a single 4-point finish
        driver_results.insert(4, result(4, 100, 2, 4.0));
        // Driver C: no results at all

        let mut teams = BTreeMap::new();
        teams.insert(
            1,
            Team {
                team_id: 1,
                name: "Team Alpha".to_string(),
                nationality: "Italian".to_string(),
            },
        );

        let mut team_standings = BTreeMap::new();
        team_standings.insert(
            1,
            Standing {
                standing_id: 1,
                race_id: 100,
                participant_id: 1,
                points: 30.0,
                position: 1,
                wins: 1,
            },
        );

        Championship {
            circuits,
            races,
            drivers,
            teams,
            driver_standings: BTreeMap::new(),
            team_standings,
            driver_results,
            team_results: BTreeMap::new(),
        }
    }

    #[test]
    fn test_driver_stats_values() {
        let data = fixture();
        let ranked = top_drivers(&data, 2020, 2022);

        let a = ranked
            .iter()
            .find(|r| r.driver.full_name == "Driver A")
            .unwrap();
        assert!((a.summary.max - 10.0).abs() < 1e-9);
        assert!((a.summary.min - 0.0).abs() < 1e-9);
        assert!((a.summary.mean - 6.0).abs() < 1e-9);
        // Population std dev: sqrt(((10-6)^2 + (0-6)^2 + (8-6)^2) / 3)
        assert!((a.summary.std_dev - (56.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_ranking_is_descending_by_mean() {
        let data = fixture();
        let ranked = top_drivers(&data, 2020, 2022);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].driver.full_name, "Driver A");
        for pair in ranked.windows(2) {
            assert!(pair[0].summary.mean >= pair[1].summary.mean);
        }
    }

    #[test]
    fn test_driver_without_results_is_excluded() {
        let data = fixture();
        let ranked = top_drivers(&data, 2020, 2022);
        assert!(!ranked.iter().any(|r| r.driver.full_name == "Driver C"));
    }

    #[test]
    fn test_empty_year_range_yields_empty_list() {
        let data = fixture();
        assert!(top_drivers(&data, 1950, 1960).is_empty());
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let data = fixture();
        let ranked = top_drivers(&data, 2021, 2021);
        let a = ranked
            .iter()
            .find(|r| r.driver.full_name == "Driver A")
            .unwrap();
        assert!((a.summary.mean - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncates_to_top_five() {
        let mut data = fixture();
        for id in 10..20 {
            data.drivers.insert(id, driver(id, &format!("Filler {}", id)));
            data.driver_results
                .insert(100 + id, result(100 + id, 100, id, id as f64));
        }
        let ranked = top_drivers(&data, 2020, 2022);
        assert_eq!(ranked.len(), TOP_N);
    }

    #[test]
    fn test_single_sample_std_dev_is_zero() {
        let data = fixture();
        let ranked = top_drivers(&data, 2020, 2022);
        let b = ranked
            .iter()
            .find(|r| r.driver.full_name == "Driver B")
            .unwrap();
        assert_eq!(b.summary.std_dev, 0.0);
        assert_eq!(b.summary.max, b.summary.min);
    }

    #[test]
    fn test_team_ranking_uses_standings() {
        let data = fixture();
        let ranked = top_teams(&data, 2020, 2022);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].summary.mean - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let data = fixture();
        let first = top_drivers(&data, 2020, 2022);
        let second = top_drivers(&data, 2020, 2022);
        let ids = |v: &[DriverStats]| v.iter().map(|r| r.driver.driver_id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}
