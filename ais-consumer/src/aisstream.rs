use error_stack::{Result, ResultExt};
use futures::{future, SinkExt, StreamExt, TryStreamExt};
use serde::Serialize;
use tokio::io::AsyncRead;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{error::AisStreamError, models::AisMessageType};

/// Geographic rectangle given as two [latitude, longitude] corner points.
/// Forwarded verbatim to the feed, never interpreted locally.
pub type BoundingBox = [[f64; 2]; 2];

pub struct AisStreamClient {
    api_key: String,
    api_address: String,
    bounding_boxes: Vec<BoundingBox>,
}

/// Sent once directly after connecting.
#[derive(Serialize)]
struct Subscription<'a> {
    #[serde(rename = "APIKey")]
    api_key: &'a str,
    #[serde(rename = "BoundingBoxes")]
    bounding_boxes: &'a [BoundingBox],
    #[serde(rename = "FilterMessageTypes")]
    filter_message_types: [AisMessageType; 2],
}

impl AisStreamClient {
    pub fn new(
        api_key: String,
        api_address: String,
        bounding_boxes: Vec<BoundingBox>,
    ) -> AisStreamClient {
        AisStreamClient {
            api_key,
            api_address,
            bounding_boxes,
        }
    }

    /// Returns the ais source as a stream which will continuously receive
    /// data from the feed.
    pub async fn streamer(&self) -> Result<impl AsyncRead, AisStreamError> {
        let (mut stream, _) = connect_async(self.api_address.as_str())
            .await
            .change_context(AisStreamError::Connection)?;

        let subscription = serde_json::to_string(&Subscription {
            api_key: &self.api_key,
            bounding_boxes: &self.bounding_boxes,
            filter_message_types: [AisMessageType::PositionReport, AisMessageType::ShipStaticData],
        })
        .change_context(AisStreamError::Subscription)?;

        stream
            .send(Message::Text(subscription))
            .await
            .change_context(AisStreamError::Subscription)?;

        let stream = stream
            .filter_map(|message| {
                future::ready(match message {
                    Ok(Message::Text(text)) => {
                        let mut bytes = text.into_bytes();
                        bytes.push(b'\n');
                        Some(Ok(bytes))
                    }
                    Ok(Message::Binary(mut bytes)) => {
                        bytes.push(b'\n');
                        Some(Ok(bytes))
                    }
                    // Control frames carry no ais payload.
                    Ok(_) => None,
                    Err(e) => Some(Err(std::io::Error::other(format!("{e:?}")))),
                })
            })
            .into_async_read();

        Ok(tokio_util::compat::FuturesAsyncReadCompatExt::compat(
            stream,
        ))
    }
}
