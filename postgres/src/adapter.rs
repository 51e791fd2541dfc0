use async_trait::async_trait;
use error_stack::{Result, ResultExt};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
    ConnectOptions, PgPool,
};
use tracker_core::{AisConsumerInboundPort, InsertError, NewAisPosition, NewAisVessel};

use crate::{PostgresError, PsqlLogStatements, PsqlSettings};

#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pool: PgPool,
}

impl PostgresAdapter {
    pub async fn new(settings: &PsqlSettings) -> Result<PostgresAdapter, PostgresError> {
        let mut opts = PgConnectOptions::new()
            .username(&settings.username)
            .password(&settings.password)
            .host(&settings.ip)
            .port(settings.port);

        if let Some(db_name) = &settings.db_name {
            opts = opts.database(db_name);
        }

        if let Some(root_cert_path) = &settings.root_cert {
            opts = opts
                .ssl_root_cert(root_cert_path)
                .ssl_mode(PgSslMode::VerifyFull);
        }

        if settings.log_statements == PsqlLogStatements::Disable {
            opts = opts.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .connect_with(opts)
            .await
            .change_context(PostgresError::Connection)?;

        Ok(PostgresAdapter { pool })
    }

    pub async fn do_migrations(&self) {
        sqlx::migrate!()
            .set_ignore_missing(true)
            .run(&self.pool)
            .await
            .unwrap();
    }

    async fn add_ais_vessel(&self, vessel: NewAisVessel) -> Result<(), PostgresError> {
        // A restart re-ingests the first static message seen for every
        // vessel; the existing row wins.
        sqlx::query(
            r#"
INSERT INTO ais_vessels (
    mmsi, message_id, repeat_indicator, valid, ais_version, imo_number,
    call_sign, name, ship_type, dimension_a, dimension_b, dimension_c,
    dimension_d, fix_type, eta, draught, destination, dte, spare, timestamp
)
VALUES (
    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
)
ON CONFLICT (mmsi) DO NOTHING
            "#,
        )
        .bind(vessel.mmsi.into_inner())
        .bind(vessel.message_id)
        .bind(vessel.repeat_indicator)
        .bind(vessel.valid)
        .bind(vessel.ais_version)
        .bind(vessel.imo_number)
        .bind(vessel.call_sign)
        .bind(vessel.name)
        .bind(i32::from(vessel.ship_type))
        .bind(vessel.dimension_a)
        .bind(vessel.dimension_b)
        .bind(vessel.dimension_c)
        .bind(vessel.dimension_d)
        .bind(vessel.fix_type)
        .bind(vessel.eta)
        .bind(vessel.draught)
        .bind(vessel.destination)
        .bind(vessel.dte)
        .bind(vessel.spare)
        .bind(vessel.timestamp)
        .execute(&self.pool)
        .await
        .change_context(PostgresError::Query)?;

        Ok(())
    }

    async fn add_ais_position(&self, position: NewAisPosition) -> Result<(), PostgresError> {
        sqlx::query(
            r#"
INSERT INTO ais_positions (
    mmsi, message_id, repeat_indicator, valid, navigational_status,
    rate_of_turn, speed_over_ground, position_accuracy, longitude, latitude,
    course_over_ground, true_heading, timestamp, special_manoeuvre_indicator,
    spare, raim, communication_state, received_timestamp
)
VALUES (
    $1, $2, $3, $4, $5, $6, $7, $8, $9,
    $10, $11, $12, $13, $14, $15, $16, $17, $18
)
            "#,
        )
        .bind(position.mmsi.into_inner())
        .bind(position.message_id)
        .bind(position.repeat_indicator)
        .bind(position.valid)
        .bind(position.navigational_status)
        .bind(position.rate_of_turn)
        .bind(position.speed_over_ground)
        .bind(position.position_accuracy)
        .bind(position.longitude)
        .bind(position.latitude)
        .bind(position.course_over_ground)
        .bind(position.true_heading)
        .bind(position.timestamp)
        .bind(position.special_manoeuvre_indicator)
        .bind(position.spare)
        .bind(position.raim)
        .bind(position.communication_state)
        .bind(position.received_timestamp)
        .execute(&self.pool)
        .await
        .change_context(PostgresError::Query)?;

        Ok(())
    }
}

#[async_trait]
impl AisConsumerInboundPort for PostgresAdapter {
    async fn add_vessel(&self, vessel: NewAisVessel) -> Result<(), InsertError> {
        self.add_ais_vessel(vessel)
            .await
            .change_context(InsertError)
    }

    async fn add_position(&self, position: NewAisPosition) -> Result<(), InsertError> {
        self.add_ais_position(position)
            .await
            .change_context(InsertError)
    }
}
