use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use tracker_core::{Mmsi, NewAisPosition, NewAisVessel, TrackedShipType};

/// The message types we subscribe to on the feed.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AisMessageType {
    PositionReport,
    ShipStaticData,
}

impl AisMessageType {
    /// The feed emits more discriminators than we subscribe to; anything
    /// else maps to `None` and is skipped without logging.
    pub fn from_discriminator(value: &str) -> Option<AisMessageType> {
        match value {
            "PositionReport" => Some(AisMessageType::PositionReport),
            "ShipStaticData" => Some(AisMessageType::ShipStaticData),
            _ => None,
        }
    }
}

/// Convenience struct to deserialize the message type prior to attempting to
/// deserialize the full message.
#[derive(Deserialize)]
pub struct MessageType {
    /// What type of message this is.
    #[serde(rename = "MessageType")]
    pub message_type: String,
}

pub enum AisMessage {
    Static(ShipStaticData),
    Position(PositionReport),
}

#[derive(Deserialize)]
pub struct StaticDataEnvelope {
    #[serde(rename = "Message")]
    pub message: StaticDataBody,
}

#[derive(Deserialize)]
pub struct StaticDataBody {
    #[serde(rename = "ShipStaticData")]
    pub ship_static_data: ShipStaticData,
}

#[derive(Deserialize)]
pub struct PositionReportEnvelope {
    #[serde(rename = "Message")]
    pub message: PositionReportBody,
}

#[derive(Deserialize)]
pub struct PositionReportBody {
    #[serde(rename = "PositionReport")]
    pub position_report: PositionReport,
}

/// Vessel related data that is emitted every 6th minute from vessels.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipStaticData {
    #[serde(rename = "MessageID")]
    pub message_id: Option<i32>,
    pub repeat_indicator: Option<i32>,
    #[serde(rename = "UserID")]
    pub user_id: Mmsi,
    pub valid: Option<bool>,
    pub ais_version: Option<i32>,
    pub imo_number: Option<i32>,
    pub call_sign: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub ship_type: Option<i32>,
    pub dimension: Option<Dimension>,
    pub fix_type: Option<i32>,
    pub eta: Option<Eta>,
    pub maximum_static_draught: Option<f64>,
    pub destination: Option<String>,
    pub dte: Option<bool>,
    pub spare: Option<bool>,
}

/// Position data that is emitted every 6th second by vessels.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PositionReport {
    #[serde(rename = "MessageID")]
    pub message_id: Option<i32>,
    pub repeat_indicator: Option<i32>,
    #[serde(rename = "UserID")]
    pub user_id: Mmsi,
    pub valid: Option<bool>,
    pub navigational_status: Option<i32>,
    pub rate_of_turn: Option<f64>,
    pub sog: Option<f64>,
    pub position_accuracy: Option<bool>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub cog: Option<f64>,
    pub true_heading: Option<i32>,
    pub timestamp: Option<i32>,
    pub special_manoeuvre_indicator: Option<i32>,
    pub spare: Option<i32>,
    pub raim: Option<bool>,
    pub communication_state: Option<i64>,
}

/// Reference point dimensions of a vessel in meters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Dimension {
    #[serde(rename = "A")]
    pub a: Option<i32>,
    #[serde(rename = "B")]
    pub b: Option<i32>,
    #[serde(rename = "C")]
    pub c: Option<i32>,
    #[serde(rename = "D")]
    pub d: Option<i32>,
}

/// Estimated time of arrival as broadcast on the wire, month through minute.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Eta {
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

impl Eta {
    /// AIS signals unavailable eta components in-band, see
    /// <https://gpsd.gitlab.io/gpsd/AIVDM.html#_type_5_static_and_voyage_related_data>
    /// for the default values.
    pub fn to_timestamp(&self) -> Option<DateTime<Utc>> {
        let month = self.month.unwrap_or(0);
        let day = self.day.unwrap_or(0);
        let hour = self.hour.unwrap_or(24);
        let minute = self.minute.unwrap_or(60);

        if month == 0 || day == 0 || hour == 24 || minute == 60 {
            return None;
        }

        let year = Utc::now().year();

        let date = NaiveDate::from_ymd_opt(year, month, day);
        let time = NaiveTime::from_hms_opt(hour, minute, 0);

        match (date, time) {
            (Some(date), Some(time)) => {
                Some(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
            }
            _ => {
                warn!("invalid eta: {self:?}");
                None
            }
        }
    }
}

impl ShipStaticData {
    /// Builds the normalized vessel record and stamps the ingestion time.
    /// The caller has already resolved the ship type and consulted the
    /// registry.
    pub fn into_new_vessel(self, ship_type: TrackedShipType) -> NewAisVessel {
        let ShipStaticData {
            message_id,
            repeat_indicator,
            user_id,
            valid,
            ais_version,
            imo_number,
            call_sign,
            name,
            ship_type: _,
            dimension,
            fix_type,
            eta,
            maximum_static_draught,
            destination,
            dte,
            spare,
        } = self;

        let dimension = dimension.unwrap_or_default();

        NewAisVessel {
            mmsi: user_id,
            message_id,
            repeat_indicator,
            valid,
            ais_version,
            imo_number,
            call_sign,
            name,
            ship_type,
            dimension_a: dimension.a,
            dimension_b: dimension.b,
            dimension_c: dimension.c,
            dimension_d: dimension.d,
            fix_type,
            eta: eta.and_then(|e| e.to_timestamp()),
            draught: maximum_static_draught,
            destination,
            dte,
            spare,
            timestamp: Utc::now(),
        }
    }
}

impl From<PositionReport> for NewAisPosition {
    fn from(value: PositionReport) -> Self {
        let PositionReport {
            message_id,
            repeat_indicator,
            user_id,
            valid,
            navigational_status,
            rate_of_turn,
            sog,
            position_accuracy,
            longitude,
            latitude,
            cog,
            true_heading,
            timestamp,
            special_manoeuvre_indicator,
            spare,
            raim,
            communication_state,
        } = value;

        NewAisPosition {
            mmsi: user_id,
            message_id,
            repeat_indicator,
            valid,
            navigational_status,
            rate_of_turn,
            speed_over_ground: sog,
            position_accuracy,
            longitude,
            latitude,
            course_over_ground: cog,
            true_heading,
            timestamp,
            special_manoeuvre_indicator,
            spare,
            raim,
            communication_state,
            received_timestamp: Utc::now(),
        }
    }
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl ShipStaticData {
        pub fn test_default(mmsi: Option<Mmsi>) -> ShipStaticData {
            ShipStaticData {
                message_id: Some(5),
                repeat_indicator: Some(0),
                user_id: mmsi.unwrap_or_else(Mmsi::test_random),
                valid: Some(true),
                ais_version: Some(2),
                imo_number: Some(9321483),
                call_sign: Some("9V2371".to_string()),
                name: Some("MV Test".to_string()),
                ship_type: Some(70),
                dimension: Some(Dimension {
                    a: Some(200),
                    b: Some(100),
                    c: Some(30),
                    d: Some(19),
                }),
                fix_type: Some(1),
                eta: Some(Eta {
                    month: Some(12),
                    day: Some(24),
                    hour: Some(18),
                    minute: Some(30),
                }),
                maximum_static_draught: Some(14.5),
                destination: Some("SINGAPORE".to_string()),
                dte: Some(false),
                spare: Some(false),
            }
        }
    }

    impl PositionReport {
        pub fn test_default(mmsi: Option<Mmsi>) -> PositionReport {
            PositionReport {
                message_id: Some(1),
                repeat_indicator: Some(0),
                user_id: mmsi.unwrap_or_else(Mmsi::test_random),
                valid: Some(true),
                navigational_status: Some(0),
                rate_of_turn: Some(2.0),
                sog: Some(13.5),
                position_accuracy: Some(true),
                longitude: Some(103.8),
                latitude: Some(1.3),
                cog: Some(212.4),
                true_heading: Some(210),
                timestamp: Some(33),
                special_manoeuvre_indicator: Some(0),
                spare: Some(0),
                raim: Some(false),
                communication_state: Some(81982),
            }
        }
    }
}
