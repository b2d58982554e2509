//! End-to-end tests: load a small championship from raw source text and
//! run every query against it.

use paddock::analysis::correlation::{start_position_impact, Strength};
use paddock::analysis::predictor::{forecast_drivers, forecast_teams};
use paddock::analysis::stats::{top_drivers, top_teams};
use paddock::report::write_driver_report;
use paddock::{Championship, Sources};

const CIRCUITS: &str = "\
circuitId,circuitRef,name,location,country
1,monza,\"Autodromo Nazionale di Monza\",Monza,Italy
2,spa,Circuit de Spa-Francorchamps,Stavelot,Belgium
";

const RACES: &str = "\
raceId,year,round,circuitId,name
100,2021,1,1,Italian Grand Prix
101,2022,1,1,Italian Grand Prix
102,2023,1,2,Belgian Grand Prix
";

const DRIVERS: &str = "\
driverId,driverRef,number,code,forename,surname,dob,nationality
1,hamilton,44,HAM,Lewis,Hamilton,1985-01-07,British
2,alonso,14,ALO,Fernando,Alonso,1981-07-29,Spanish
";

const TEAMS: &str = "\
constructorId,constructorRef,name,nationality
1,mercedes,Mercedes,German
2,ferrari,Ferrari,Italian
";

// Row 5 references an unknown race and must be dropped at load time.
const DRIVER_STANDINGS: &str = "\
driverStandingsId,raceId,driverId,points,position,positionText,wins
1,100,1,25,1,1,1
2,101,1,43,1,1,2
3,102,1,68,1,1,3
4,102,2,40,2,2,0
5,999,1,10,1,1,0
";

const TEAM_STANDINGS: &str = "\
constructorStandingsId,raceId,constructorId,points,position,positionText,wins
1,100,1,40,1,1,1
2,101,1,80,1,1,2
3,102,2,100,1,1,2
";

// Row 7 names an unknown driver and a non-numeric finishing position.
const RESULTS: &str = "\
resultId,raceId,driverId,constructorId,number,grid,position,positionText,positionOrder,points
1,100,1,1,44,1,1,1,1,25
2,100,2,2,14,2,2,2,2,18
3,101,1,1,44,1,1,1,1,25
4,101,2,2,14,3,3,3,3,15
5,102,1,1,44,2,1,1,1,25
6,102,2,2,14,1,2,2,2,18
7,102,99,2,99,5,\\N,R,19,0
";

fn load() -> Championship {
    Championship::from_sources(&Sources {
        circuits: CIRCUITS,
        races: RACES,
        drivers: DRIVERS,
        teams: TEAMS,
        driver_standings: DRIVER_STANDINGS,
        team_standings: TEAM_STANDINGS,
        results: RESULTS,
    })
    .expect("fixture dataset loads")
}

#[test]
fn test_load_resolves_and_drops_consistently() {
    let data = load();

    assert_eq!(data.circuits.len(), 2);
    assert_eq!(data.races.len(), 3);
    assert_eq!(data.drivers.len(), 2);
    assert_eq!(data.teams.len(), 2);
    // Standing 5 referenced race 999 and was dropped.
    assert_eq!(data.driver_standings.len(), 4);
    // Result 7 fails both the driver link and the numeric position.
    assert_eq!(data.driver_results.len(), 6);
    assert_eq!(data.team_results.len(), 6);
}

#[test]
fn test_top_drivers_full_range() {
    let data = load();
    let ranked = top_drivers(&data, 2021, 2023);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].driver.full_name, "Lewis Hamilton");
    assert!((ranked[0].summary.mean - 25.0).abs() < 1e-9);
    assert_eq!(ranked[0].summary.std_dev, 0.0);

    assert_eq!(ranked[1].driver.full_name, "Fernando Alonso");
    assert!((ranked[1].summary.mean - 17.0).abs() < 1e-9);
    assert!((ranked[1].summary.max - 18.0).abs() < 1e-9);
    assert!((ranked[1].summary.min - 15.0).abs() < 1e-9);
    assert!((ranked[1].summary.std_dev - 2.0f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_top_teams_full_range() {
    let data = load();
    let ranked = top_teams(&data, 2021, 2023);

    assert_eq!(ranked.len(), 2);
    // Ferrari's single 100-point standing outranks Mercedes' mean of 60.
    assert_eq!(ranked[0].team.name, "Ferrari");
    assert!((ranked[0].summary.mean - 100.0).abs() < 1e-9);
    assert_eq!(ranked[1].team.name, "Mercedes");
    assert!((ranked[1].summary.mean - 60.0).abs() < 1e-9);
}

#[test]
fn test_out_of_range_window_is_empty() {
    let data = load();
    assert!(top_drivers(&data, 1950, 1960).is_empty());
    assert!(top_teams(&data, 1950, 1960).is_empty());
}

#[test]
fn test_top_ordering_is_deterministic_across_runs() {
    let first = load();
    let second = load();

    let ids_a: Vec<u32> = top_drivers(&first, 2021, 2023)
        .iter()
        .map(|r| r.driver.driver_id)
        .collect();
    let ids_b: Vec<u32> = top_drivers(&second, 2021, 2023)
        .iter()
        .map(|r| r.driver.driver_id)
        .collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn test_forecast_ranks_requested_drivers() {
    let data = load();
    let names = vec!["Lewis Hamilton".to_string(), "Fernando Alonso".to_string()];
    let forecasts = forecast_drivers(&data, &names, None);

    assert_eq!(forecasts.len(), 2);
    assert_eq!(forecasts[0].name, "Lewis Hamilton");
    // Hamilton's weighted average of 25/43/68 lands between the mean and
    // the most recent value; Alonso's single record scores exactly 40.
    assert!(forecasts[0].score > 43.0 && forecasts[0].score < 68.0);
    assert!((forecasts[1].score - 40.0).abs() < 1e-9);
}

#[test]
fn test_forecast_circuit_filter() {
    let data = load();
    let names = vec!["Lewis Hamilton".to_string()];
    let forecasts = forecast_drivers(&data, &names, Some("Circuit de Spa-Francorchamps"));

    // Only the 2023 Spa standing qualifies; a single record scores its
    // own points.
    assert_eq!(forecasts.len(), 1);
    assert!((forecasts[0].score - 68.0).abs() < 1e-9);
}

#[test]
fn test_forecast_unknown_name_is_omitted() {
    let data = load();
    let names = vec!["Nobody At All".to_string()];
    assert!(forecast_drivers(&data, &names, None).is_empty());
    assert!(forecast_teams(&data, &names, None).is_empty());
}

#[test]
fn test_grid_impact_over_pooled_results() {
    let data = load();
    let impact = start_position_impact(&data);

    // Six driver rows plus the same six projected onto teams.
    assert_eq!(impact.samples, 12);
    assert!((impact.coefficient - 0.7).abs() < 1e-9);
    assert_eq!(impact.strength, Strength::StrongPositive);
}

#[test]
fn test_driver_report_blocks() {
    let data = load();
    let ranked = top_drivers(&data, 2021, 2023);

    let mut out = Vec::new();
    write_driver_report(&mut out, &ranked).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("Driver: Lewis Hamilton\n"));
    assert!(text.contains("DOB: 1985-01-07, Nationality: British"));
    assert!(text.contains("Driver: Fernando Alonso"));
    // One blank separator per block.
    assert_eq!(text.matches("\n\n").count(), 2);
}
