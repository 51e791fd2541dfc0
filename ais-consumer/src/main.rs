#![deny(warnings)]
#![deny(rust_2018_idioms)]

use ais_consumer::{settings::Settings, startup::App};
use tracing::{event, Level};

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(&settings.log_level))
        .init();

    event!(Level::INFO, "starting ais-consumer...");

    let app = App::build(settings).await;

    app.run().await;
}
