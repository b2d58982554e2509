use serde::{Deserialize, Serialize};

/// Identifier assigned by the source dataset. Unique within one entity
/// kind; identifier spaces of different kinds are independent.
pub type EntityId = u32;

/// A racing venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    pub circuit_id: EntityId,
    pub name: String,
    pub location: String,
    pub country: String,
}

/// One championship round. `circuit_id` is resolved against the circuit
/// store at load time and stays valid for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub race_id: EntityId,
    pub year: i32,
    pub round: u32,
    pub name: String,
    pub circuit_id: EntityId,
}

/// A championship driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: EntityId,
    pub full_name: String,
    pub dob: String,
    pub nationality: String,
}

/// A constructor entering cars for the championship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: EntityId,
    pub name: String,
    pub nationality: String,
}

/// Cumulative points for a driver or team as of one race.
///
/// The same shape serves both standings stores; `participant_id` names a
/// driver or a team depending on which store holds the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    pub standing_id: EntityId,
    pub race_id: EntityId,
    pub participant_id: EntityId,
    pub points: f64,
    pub position: u32,
    pub wins: u32,
}

/// One race outcome for a driver or team: starting grid slot, finishing
/// position, and points earned. Instantiated once for the driver store
/// and once for the team store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub result_id: EntityId,
    pub race_id: EntityId,
    pub participant_id: EntityId,
    pub grid: u32,
    pub position: u32,
    pub points: f64,
}
