//! Entity loaders
//!
//! Each loader turns one raw source into a keyed entity store, resolving
//! foreign keys against the stores it depends on. Loaders must run in
//! dependency order (circuits before races, races and participants
//! before standings and results); [`Championship::from_sources`] drives
//! that order.
//!
//! Row handling is uniform across loaders: the first row of every source
//! is a header and is skipped; a row with too few fields, an unparsable
//! numeric field, or a foreign key that does not resolve is dropped and
//! counted. Duplicate identifiers overwrite earlier rows.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::data::record;
use crate::error::{DataError, Result};
use crate::models::{Circuit, Driver, EntityId, Race, ResultRecord, Standing, Team};

/// Source file names inside the dataset directory
const CIRCUITS_FILE: &str = "circuits.csv";
const RACES_FILE: &str = "races.csv";
const DRIVERS_FILE: &str = "drivers.csv";
const TEAMS_FILE: &str = "constructors.csv";
const DRIVER_STANDINGS_FILE: &str = "driver_standings.csv";
const TEAM_STANDINGS_FILE: &str = "constructor_standings.csv";
const RESULTS_FILE: &str = "results.csv";

/// Column of the combined results source naming the driver
const RESULT_DRIVER_COL: usize = 2;
/// Column of the combined results source naming the team
const RESULT_TEAM_COL: usize = 3;

fn parse_id(field: &str) -> Option<EntityId> {
    field.trim().parse().ok()
}

fn report_skips(source: &str, skipped: usize) {
    if skipped > 0 {
        warn!(source, skipped, "dropped unusable rows");
    }
}

/// Load the circuit store. No dependencies.
pub fn load_circuits(text: &str) -> BTreeMap<EntityId, Circuit> {
    let mut circuits = BTreeMap::new();
    let mut skipped = 0usize;

    for row in record::records(text).skip(1) {
        if row.len() < 5 {
            skipped += 1;
            continue;
        }
        if let Some(circuit_id) = parse_id(&row[0]) {
            circuits.insert(
                circuit_id,
                Circuit {
                    circuit_id,
                    name: row[2].clone(),
                    location: row[3].clone(),
                    country: row[4].clone(),
                },
            );
        } else {
            skipped += 1;
        }
    }

    report_skips("circuits", skipped);
    circuits
}

/// Load the race store. Depends on the circuit store: a race whose
/// circuit reference does not resolve is dropped.
pub fn load_races(text: &str, circuits: &BTreeMap<EntityId, Circuit>) -> BTreeMap<EntityId, Race> {
    let mut races = BTreeMap::new();
    let mut skipped = 0usize;

    for row in record::records(text).skip(1) {
        if row.len() < 5 {
            skipped += 1;
            continue;
        }
        if let (Some(race_id), Some(year), Some(round), Some(circuit_id)) = (
            parse_id(&row[0]),
            row[1].trim().parse::<i32>().ok(),
            row[2].trim().parse::<u32>().ok(),
            parse_id(&row[3]),
        ) {
            if !circuits.contains_key(&circuit_id) {
                debug!(race_id, circuit_id, "race references unknown circuit");
                skipped += 1;
                continue;
            }
            races.insert(
                race_id,
                Race {
                    race_id,
                    year,
                    round,
                    name: row[4].clone(),
                    circuit_id,
                },
            );
        } else {
            skipped += 1;
        }
    }

    report_skips("races", skipped);
    races
}

/// Load the driver store. No dependencies. The display name is the
/// forename and surname joined with a space.
pub fn load_drivers(text: &str) -> BTreeMap<EntityId, Driver> {
    let mut drivers = BTreeMap::new();
    let mut skipped = 0usize;

    for row in record::records(text).skip(1) {
        if row.len() < 8 {
            skipped += 1;
            continue;
        }
        if let Some(driver_id) = parse_id(&row[0]) {
            drivers.insert(
                driver_id,
                Driver {
                    driver_id,
                    full_name: format!("{} {}", row[4], row[5]),
                    dob: row[6].clone(),
                    nationality: row[7].clone(),
                },
            );
        } else {
            skipped += 1;
        }
    }

    report_skips("drivers", skipped);
    drivers
}

/// Load the team store. No dependencies.
pub fn load_teams(text: &str) -> BTreeMap<EntityId, Team> {
    let mut teams = BTreeMap::new();
    let mut skipped = 0usize;

    for row in record::records(text).skip(1) {
        if row.len() < 4 {
            skipped += 1;
            continue;
        }
        if let Some(team_id) = parse_id(&row[0]) {
            teams.insert(
                team_id,
                Team {
                    team_id,
                    name: row[2].clone(),
                    nationality: row[3].clone(),
                },
            );
        } else {
            skipped += 1;
        }
    }

    report_skips("teams", skipped);
    teams
}

/// Shared standings loader. Both standings sources carry the same column
/// layout; only the participant store they link against differs.
fn load_standings(
    source: &'static str,
    text: &str,
    races: &BTreeMap<EntityId, Race>,
    participant_exists: impl Fn(EntityId) -> bool,
) -> BTreeMap<EntityId, Standing> {
    let mut standings = BTreeMap::new();
    let mut skipped = 0usize;

    for row in record::records(text).skip(1) {
        if row.len() < 7 {
            skipped += 1;
            continue;
        }
        if let (Some(standing_id), Some(race_id), Some(participant_id), Some(points), Some(position), Some(wins)) = (
            parse_id(&row[0]),
            parse_id(&row[1]),
            parse_id(&row[2]),
            row[3].trim().parse::<f64>().ok(),
            row[4].trim().parse::<u32>().ok(),
            row[6].trim().parse::<u32>().ok(),
        ) {
            if !races.contains_key(&race_id) || !participant_exists(participant_id) {
                debug!(source, standing_id, "standing with unresolved reference");
                skipped += 1;
                continue;
            }
            standings.insert(
                standing_id,
                Standing {
                    standing_id,
                    race_id,
                    participant_id,
                    points,
                    position,
                    wins,
                },
            );
        } else {
            skipped += 1;
        }
    }

    report_skips(source, skipped);
    standings
}

/// Load the driver standings store. Depends on races and drivers.
pub fn load_driver_standings(
    text: &str,
    races: &BTreeMap<EntityId, Race>,
    drivers: &BTreeMap<EntityId, Driver>,
) -> BTreeMap<EntityId, Standing> {
    load_standings("driver_standings", text, races, |id| drivers.contains_key(&id))
}

/// Load the team standings store. Depends on races and teams.
pub fn load_team_standings(
    text: &str,
    races: &BTreeMap<EntityId, Race>,
    teams: &BTreeMap<EntityId, Team>,
) -> BTreeMap<EntityId, Standing> {
    load_standings("team_standings", text, races, |id| teams.contains_key(&id))
}

/// Shared results loader. The combined source is consumed twice: once
/// projected onto the driver column and once onto the team column.
fn load_results(
    source: &'static str,
    text: &str,
    participant_col: usize,
    races: &BTreeMap<EntityId, Race>,
    participant_exists: impl Fn(EntityId) -> bool,
) -> BTreeMap<EntityId, ResultRecord> {
    let mut results = BTreeMap::new();
    let mut skipped = 0usize;

    for row in record::records(text).skip(1) {
        if row.len() < 10 {
            skipped += 1;
            continue;
        }
        if let (Some(result_id), Some(race_id), Some(participant_id), Some(grid), Some(position), Some(points)) = (
            parse_id(&row[0]),
            parse_id(&row[1]),
            parse_id(&row[participant_col]),
            row[5].trim().parse::<u32>().ok(),
            row[6].trim().parse::<u32>().ok(),
            row[9].trim().parse::<f64>().ok(),
        ) {
            if !races.contains_key(&race_id) || !participant_exists(participant_id) {
                debug!(source, result_id, "result with unresolved reference");
                skipped += 1;
                continue;
            }
            results.insert(
                result_id,
                ResultRecord {
                    result_id,
                    race_id,
                    participant_id,
                    grid,
                    position,
                    points,
                },
            );
        } else {
            // Non-finishers carry a non-numeric position and drop here.
            skipped += 1;
        }
    }

    report_skips(source, skipped);
    results
}

/// Load the driver results store. Depends on races and drivers.
pub fn load_driver_results(
    text: &str,
    races: &BTreeMap<EntityId, Race>,
    drivers: &BTreeMap<EntityId, Driver>,
) -> BTreeMap<EntityId, ResultRecord> {
    load_results("driver_results", text, RESULT_DRIVER_COL, races, |id| {
        drivers.contains_key(&id)
    })
}

/// Load the team results store. Depends on races and teams.
pub fn load_team_results(
    text: &str,
    races: &BTreeMap<EntityId, Race>,
    teams: &BTreeMap<EntityId, Team>,
) -> BTreeMap<EntityId, ResultRecord> {
    load_results("team_results", text, RESULT_TEAM_COL, races, |id| {
        teams.contains_key(&id)
    })
}

/// Raw text of the seven delimited sources
pub struct Sources<'a> {
    pub circuits: &'a str,
    pub races: &'a str,
    pub drivers: &'a str,
    pub teams: &'a str,
    pub driver_standings: &'a str,
    pub team_standings: &'a str,
    pub results: &'a str,
}

/// The entity stores, loaded once at startup and immutable afterwards.
///
/// Stores are keyed maps ordered by identifier, so every query iterates
/// entities in ascending-id order and repeated runs over the same input
/// produce identical output.
#[derive(Debug, Clone)]
pub struct Championship {
    pub circuits: BTreeMap<EntityId, Circuit>,
    pub races: BTreeMap<EntityId, Race>,
    pub drivers: BTreeMap<EntityId, Driver>,
    pub teams: BTreeMap<EntityId, Team>,
    pub driver_standings: BTreeMap<EntityId, Standing>,
    pub team_standings: BTreeMap<EntityId, Standing>,
    pub driver_results: BTreeMap<EntityId, ResultRecord>,
    pub team_results: BTreeMap<EntityId, ResultRecord>,
}

impl Championship {
    /// Load every source from a dataset directory.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let circuits = read_source(dir.join(CIRCUITS_FILE))?;
        let races = read_source(dir.join(RACES_FILE))?;
        let drivers = read_source(dir.join(DRIVERS_FILE))?;
        let teams = read_source(dir.join(TEAMS_FILE))?;
        let driver_standings = read_source(dir.join(DRIVER_STANDINGS_FILE))?;
        let team_standings = read_source(dir.join(TEAM_STANDINGS_FILE))?;
        let results = read_source(dir.join(RESULTS_FILE))?;

        Self::from_sources(&Sources {
            circuits: &circuits,
            races: &races,
            drivers: &drivers,
            teams: &teams,
            driver_standings: &driver_standings,
            team_standings: &team_standings,
            results: &results,
        })
    }

    /// Build the store graph from raw source text, in dependency order.
    /// Any store left empty is fatal.
    pub fn from_sources(src: &Sources<'_>) -> Result<Self> {
        let circuits = non_empty("circuits", load_circuits(src.circuits))?;
        let races = non_empty("races", load_races(src.races, &circuits))?;
        let drivers = non_empty("drivers", load_drivers(src.drivers))?;
        let teams = non_empty("teams", load_teams(src.teams))?;
        let driver_standings = non_empty(
            "driver standings",
            load_driver_standings(src.driver_standings, &races, &drivers),
        )?;
        let team_standings = non_empty(
            "team standings",
            load_team_standings(src.team_standings, &races, &teams),
        )?;
        let driver_results = non_empty(
            "driver results",
            load_driver_results(src.results, &races, &drivers),
        )?;
        let team_results = non_empty(
            "team results",
            load_team_results(src.results, &races, &teams),
        )?;

        info!(
            circuits = circuits.len(),
            races = races.len(),
            drivers = drivers.len(),
            teams = teams.len(),
            driver_standings = driver_standings.len(),
            team_standings = team_standings.len(),
            driver_results = driver_results.len(),
            team_results = team_results.len(),
            "dataset loaded"
        );

        Ok(Self {
            circuits,
            races,
            drivers,
            teams,
            driver_standings,
            team_standings,
            driver_results,
            team_results,
        })
    }

    /// Find a circuit by its exact name.
    pub fn circuit_by_name(&self, name: &str) -> Option<&Circuit> {
        self.circuits.values().find(|c| c.name == name)
    }
}

fn read_source(path: PathBuf) -> Result<String> {
    fs::read_to_string(&path).map_err(|source| DataError::Io { path, source })
}

fn non_empty<T>(name: &'static str, store: BTreeMap<EntityId, T>) -> Result<BTreeMap<EntityId, T>> {
    if store.is_empty() {
        Err(DataError::EmptyDataset(name))
    } else {
        Ok(store)
    }
}
