use error_stack::Context;

#[derive(Debug)]
pub enum Error {
    AisSource,
    Consumer,
}

impl Context for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::AisSource => f.write_str("failed to open the ais source stream"),
            Error::Consumer => f.write_str("the consumer loop failed"),
        }
    }
}

#[derive(Debug)]
pub enum ConsumerError {
    StreamClosed,
}

impl Context for ConsumerError {}

impl std::fmt::Display for ConsumerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsumerError::StreamClosed => f.write_str("ais stream closed unexpectedly"),
        }
    }
}

#[derive(Debug)]
pub struct MessageProcessingError;

impl Context for MessageProcessingError {}

impl std::fmt::Display for MessageProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("error occured during ais message processing")
    }
}

#[derive(Debug)]
pub enum AisStreamError {
    Connection,
    Subscription,
}

impl Context for AisStreamError {}

impl std::fmt::Display for AisStreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AisStreamError::Connection => f.write_str("failed to connect to the ais feed"),
            AisStreamError::Subscription => f.write_str("failed to subscribe to the ais feed"),
        }
    }
}
