use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ShipTypeError;

/// Maritime mobile service identity, the key ais uses to identify a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mmsi(pub(crate) i32);

impl Mmsi {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The subset of ais ship type codes we persist static records for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedShipType {
    Cargo,
    Tanker,
}

impl TryFrom<i32> for TrackedShipType {
    type Error = ShipTypeError;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        match value {
            70 => Ok(TrackedShipType::Cargo),
            80 => Ok(TrackedShipType::Tanker),
            _ => Err(ShipTypeError(value)),
        }
    }
}

impl From<TrackedShipType> for i32 {
    fn from(value: TrackedShipType) -> Self {
        match value {
            TrackedShipType::Cargo => 70,
            TrackedShipType::Tanker => 80,
        }
    }
}

/// Vessel related data that is emitted every 6th minute from vessels.
/// A single record is produced per vessel per process run, built from the
/// first static message observed for that vessel.
#[derive(Debug, Clone)]
pub struct NewAisVessel {
    pub mmsi: Mmsi,
    pub message_id: Option<i32>,
    pub repeat_indicator: Option<i32>,
    pub valid: Option<bool>,
    pub ais_version: Option<i32>,
    pub imo_number: Option<i32>,
    pub call_sign: Option<String>,
    pub name: Option<String>,
    pub ship_type: TrackedShipType,
    pub dimension_a: Option<i32>,
    pub dimension_b: Option<i32>,
    pub dimension_c: Option<i32>,
    pub dimension_d: Option<i32>,
    pub fix_type: Option<i32>,
    pub eta: Option<DateTime<Utc>>,
    pub draught: Option<f64>,
    pub destination: Option<String>,
    pub dte: Option<bool>,
    pub spare: Option<bool>,
    /// Ingestion time, stamped when the record is built.
    pub timestamp: DateTime<Utc>,
}

/// Position data that is emitted every 6th second by vessels. Only produced
/// for vessels that already have an accepted static record this run.
#[derive(Debug, Clone)]
pub struct NewAisPosition {
    pub mmsi: Mmsi,
    pub message_id: Option<i32>,
    pub repeat_indicator: Option<i32>,
    pub valid: Option<bool>,
    pub navigational_status: Option<i32>,
    pub rate_of_turn: Option<f64>,
    pub speed_over_ground: Option<f64>,
    pub position_accuracy: Option<bool>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub course_over_ground: Option<f64>,
    pub true_heading: Option<i32>,
    /// Source-provided utc second of the message, 0-59.
    pub timestamp: Option<i32>,
    pub special_manoeuvre_indicator: Option<i32>,
    pub spare: Option<i32>,
    pub raim: Option<bool>,
    pub communication_state: Option<i64>,
    /// Receipt time, stamped when the record is built.
    pub received_timestamp: DateTime<Utc>,
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl Mmsi {
        pub fn test_new(value: i32) -> Mmsi {
            Mmsi(value)
        }

        pub fn test_random() -> Mmsi {
            Mmsi(rand::random::<i32>().abs())
        }
    }
}
