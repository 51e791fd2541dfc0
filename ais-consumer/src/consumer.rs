use error_stack::{bail, Result, ResultExt};
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio::sync::mpsc::Receiver;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{event, instrument, Level};
use tracker_core::{AisConsumerInboundPort, NewAisPosition, TrackedShipType, VesselRegistry};

use crate::{
    error::{ConsumerError, MessageProcessingError},
    models::{
        AisMessage, AisMessageType, MessageType, PositionReport, PositionReportEnvelope,
        ShipStaticData, StaticDataEnvelope,
    },
};

/// Upper bound on the length of a single message from the feed.
const MAX_MESSAGE_LENGTH: usize = 8192;

/// Drives the ingestion loop: one message is pulled, classified, built and
/// persisted before the next one is read.
#[derive(Default)]
pub struct Consumer {
    registry: VesselRegistry,
}

impl Consumer {
    pub fn new() -> Consumer {
        Consumer {
            registry: VesselRegistry::new(),
        }
    }

    pub async fn run<T>(
        &mut self,
        source: impl AsyncRead + Unpin,
        storage: &T,
        cancellation: Option<Receiver<()>>,
    ) -> Result<(), ConsumerError>
    where
        T: AisConsumerInboundPort,
    {
        let codec = LinesCodec::new_with_max_length(MAX_MESSAGE_LENGTH);
        let mut framed_read = FramedRead::new(source, codec);

        let enable_cancellation = cancellation.is_some();
        let mut cancellation = match cancellation {
            Some(c) => c,
            None => tokio::sync::mpsc::channel(1).1,
        };

        loop {
            tokio::select! {
                message = framed_read.next() => {
                    match message {
                        Some(Ok(message)) => self.process_message(message, storage).await,
                        Some(Err(e)) => event!(Level::ERROR, "failed to read ais message: {:?}", e),
                        None => bail!(ConsumerError::StreamClosed),
                    }
                }
                _ = cancellation.recv(), if enable_cancellation => {
                    event!(Level::WARN, "cancellation message received, exiting");
                    return Ok(());
                }
            }
        }
    }

    #[instrument(skip_all)]
    async fn process_message<T>(&mut self, message: String, storage: &T)
    where
        T: AisConsumerInboundPort,
    {
        match parse_message(&message) {
            Err(e) => event!(Level::ERROR, "{:?}", e),
            Ok(None) => (),
            Ok(Some(AisMessage::Static(m))) => self.process_static(m, storage).await,
            Ok(Some(AisMessage::Position(m))) => self.process_position(m, storage).await,
        }
    }

    async fn process_static<T>(&mut self, message: ShipStaticData, storage: &T)
    where
        T: AisConsumerInboundPort,
    {
        let Some(ship_type) = message
            .ship_type
            .and_then(|t| TrackedShipType::try_from(t).ok())
        else {
            return;
        };

        // First record wins, later static messages for the vessel are
        // dropped for the remainder of the run.
        if self.registry.contains(message.user_id) {
            return;
        }

        let vessel = message.into_new_vessel(ship_type);
        let mmsi = vessel.mmsi;
        let name = vessel.name.clone();
        let destination = vessel.destination.clone();

        match storage.add_vessel(vessel).await {
            Ok(()) => event!(
                Level::DEBUG,
                "saved vessel {} (name: {:?}, destination: {:?})",
                mmsi,
                name,
                destination
            ),
            Err(e) => event!(Level::ERROR, "failed to persist vessel {}: {:?}", mmsi, e),
        }

        // A failed write does not unregister the vessel, its position
        // reports are accepted for the rest of the run.
        self.registry.insert(mmsi);
    }

    async fn process_position<T>(&self, message: PositionReport, storage: &T)
    where
        T: AisConsumerInboundPort,
    {
        // Positions for unregistered vessels are dropped, not buffered.
        if !self.registry.contains(message.user_id) {
            return;
        }

        let position = NewAisPosition::from(message);
        let mmsi = position.mmsi;
        let latitude = position.latitude;
        let longitude = position.longitude;
        let true_heading = position.true_heading;

        match storage.add_position(position).await {
            Ok(()) => event!(
                Level::DEBUG,
                "saved position for {} (lat: {:?}, lon: {:?}, heading: {:?})",
                mmsi,
                latitude,
                longitude,
                true_heading
            ),
            Err(e) => event!(
                Level::ERROR,
                "failed to persist position for {}: {:?}",
                mmsi,
                e
            ),
        }
    }
}

fn parse_message(message: &str) -> Result<Option<AisMessage>, MessageProcessingError> {
    let envelope: MessageType =
        serde_json::from_str(message).change_context(MessageProcessingError)?;

    let Some(message_type) = AisMessageType::from_discriminator(&envelope.message_type) else {
        return Ok(None);
    };

    match message_type {
        AisMessageType::ShipStaticData => {
            let val: StaticDataEnvelope =
                serde_json::from_str(message).change_context(MessageProcessingError)?;

            Ok(Some(AisMessage::Static(val.message.ship_static_data)))
        }
        AisMessageType::PositionReport => {
            let val: PositionReportEnvelope =
                serde_json::from_str(message).change_context(MessageProcessingError)?;

            Ok(Some(AisMessage::Position(val.message.position_report)))
        }
    }
}
