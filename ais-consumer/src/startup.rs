use std::time::Duration;

use error_stack::{Result, ResultExt};
use postgres::PostgresAdapter;
use tracing::{event, instrument, Level};

use crate::{
    aisstream::AisStreamClient,
    consumer::Consumer,
    error::Error,
    settings::{Environment, Settings},
};

pub struct App {
    consumer: Consumer,
    postgres: PostgresAdapter,
    ais_source: Option<AisStreamClient>,
}

impl App {
    pub async fn build(settings: Settings) -> App {
        let postgres = PostgresAdapter::new(&settings.postgres).await.unwrap();

        if settings.environment == Environment::Local {
            postgres.do_migrations().await;
        }

        let ais_source = if settings.environment == Environment::Test {
            None
        } else {
            Some(AisStreamClient::new(
                settings
                    .api_key
                    .expect("missing api_key in a non-test environment"),
                settings
                    .api_address
                    .expect("missing api_address in a non-test environment"),
                settings.bounding_boxes,
            ))
        };

        App {
            consumer: Consumer::new(),
            postgres,
            ais_source,
        }
    }

    /// Reconnection wrapper around the whole consumption loop. A transport
    /// failure is fatal to a single run; the vessel registry keeps its
    /// process-lifetime scope across reconnects.
    pub async fn run(mut self) {
        loop {
            self.run_impl().await;
            // If the ais api is unresponsive we dont want to relentlessly spam it
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    #[instrument(skip_all)]
    async fn run_impl(&mut self) {
        if let Err(e) = self.run_inner().await {
            event!(Level::ERROR, "consumer failed: {:?}", e);
        }
    }

    async fn run_inner(&mut self) -> Result<(), Error> {
        let source = self
            .ais_source
            .as_ref()
            .unwrap()
            .streamer()
            .await
            .change_context(Error::AisSource)?;

        self.consumer
            .run(source, &self.postgres, None)
            .await
            .change_context(Error::Consumer)
    }
}
