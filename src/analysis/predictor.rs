//! Recency-weighted performance forecasting
//!
//! Forecasts the relative competitiveness of a requested set of drivers
//! or teams from their standings history. Each standing contributes its
//! points scaled by a logarithmic decay on the record's age, so recent
//! seasons dominate without old ones vanishing entirely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::Championship;
use crate::models::{EntityId, Standing};

/// Horizon against which record age is measured
pub const REFERENCE_YEAR: i32 = 2023;

/// Weighted-score forecast for one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub id: EntityId,
    pub name: String,
    pub score: f64,
}

/// Decay weight for a standing recorded in `year`.
///
/// Age is counted in whole years with the recording year itself included,
/// and the divisor is clamped at 1, so the weight is always in (0, 1]:
/// records up to e years old keep full weight and older ones decay as
/// 1 / ln(age).
pub fn recency_weight(year: i32) -> f64 {
    let age = (REFERENCE_YEAR - year + 1) as f64;
    1.0 / 1.0f64.max(age.ln())
}

/// Forecast the named drivers from the driver standings store.
pub fn forecast_drivers(
    data: &Championship,
    names: &[String],
    circuit: Option<&str>,
) -> Vec<Forecast> {
    weighted_scores(data, data.driver_standings.values(), names, circuit, |id| {
        data.drivers.get(&id).map(|d| d.full_name.clone())
    })
}

/// Forecast the named teams from the team standings store.
pub fn forecast_teams(
    data: &Championship,
    names: &[String],
    circuit: Option<&str>,
) -> Vec<Forecast> {
    weighted_scores(data, data.team_standings.values(), names, circuit, |id| {
        data.teams.get(&id).map(|t| t.name.clone())
    })
}

/// Accumulate weight × points and weight per requested entity, then score
/// each as the weighted-points sum over the weight sum. Names match by
/// exact string equality; requested names with no matching standings are
/// silently left out of the output, as are entities whose accumulated
/// weight is zero.
fn weighted_scores<'a>(
    data: &Championship,
    standings: impl Iterator<Item = &'a Standing>,
    names: &[String],
    circuit: Option<&str>,
    display_name: impl Fn(EntityId) -> Option<String>,
) -> Vec<Forecast> {
    let mut accumulated: BTreeMap<EntityId, (f64, f64)> = BTreeMap::new();

    for standing in standings {
        let matches_name = display_name(standing.participant_id)
            .map_or(false, |name| names.iter().any(|req| *req == name));
        if !matches_name {
            continue;
        }

        let race = match data.races.get(&standing.race_id) {
            Some(race) => race,
            None => continue,
        };

        if let Some(filter) = circuit {
            let at_circuit = data
                .circuits
                .get(&race.circuit_id)
                .map_or(false, |c| c.name == filter);
            if !at_circuit {
                continue;
            }
        }

        let weight = recency_weight(race.year);
        let entry = accumulated.entry(standing.participant_id).or_insert((0.0, 0.0));
        entry.0 += standing.points * weight;
        entry.1 += weight;
    }

    let mut forecasts: Vec<Forecast> = accumulated
        .into_iter()
        .filter(|&(_, (_, weight_sum))| weight_sum > 0.0)
        .filter_map(|(id, (weighted_points, weight_sum))| {
            display_name(id).map(|name| Forecast {
                id,
                name,
                score: weighted_points / weight_sum,
            })
        })
        .collect();

    forecasts.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    forecasts
}
