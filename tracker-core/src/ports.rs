use async_trait::async_trait;
use error_stack::Result;

use crate::{InsertError, NewAisPosition, NewAisVessel};

/// Write target for the records produced by the ais consumer. One logical
/// collection per record kind.
#[async_trait]
pub trait AisConsumerInboundPort: Send + Sync {
    async fn add_vessel(&self, vessel: NewAisVessel) -> Result<(), InsertError>;
    async fn add_position(&self, position: NewAisPosition) -> Result<(), InsertError>;
}
