use std::sync::{Arc, Mutex};

use ais_consumer::{
    consumer::Consumer,
    error::ConsumerError,
    models::{PositionReport, ShipStaticData},
};
use async_trait::async_trait;
use error_stack::{Report, Result};
use futures::TryStreamExt;
use lazy_static::{initialize, lazy_static};
use serde_json::json;
use tokio_stream::wrappers::ReceiverStream;
use tracing::instrument::WithSubscriber;
use tracing_subscriber::FmtSubscriber;
use tracker_core::{AisConsumerInboundPort, InsertError, NewAisPosition, NewAisVessel};

lazy_static! {
    static ref TRACING: () = tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .unwrap();
}

pub struct TestHelper {
    pub storage: TestStorage,
    out: tokio::sync::mpsc::Sender<std::result::Result<String, std::io::Error>>,
    cancellation: tokio::sync::mpsc::Sender<()>,
    handle: tokio::task::JoinHandle<Result<(), ConsumerError>>,
}

pub fn spawn_consumer() -> TestHelper {
    spawn(None)
}

/// Like `spawn_consumer`, but the spawned consumer logs to the returned
/// capture instead of the global subscriber, down to debug level.
pub fn spawn_consumer_with_log_capture() -> (TestHelper, LogCapture) {
    let capture = LogCapture::default();
    (spawn(Some(capture.clone())), capture)
}

fn spawn(capture: Option<LogCapture>) -> TestHelper {
    initialize(&TRACING);

    let (out, recv) = tokio::sync::mpsc::channel(100);

    let receiver_stream = ReceiverStream::new(recv);
    let compat =
        tokio_util::compat::FuturesAsyncReadCompatExt::compat(receiver_stream.into_async_read());

    let (cancellation, cancellation_recv) = tokio::sync::mpsc::channel(1);

    let storage = TestStorage::default();
    let consumer_storage = storage.clone();

    let consumer_future = async move {
        let mut consumer = Consumer::new();
        consumer
            .run(compat, &consumer_storage, Some(cancellation_recv))
            .await
    };

    let handle = match capture {
        Some(capture) => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(tracing::Level::DEBUG)
                .with_ansi(false)
                .with_writer(move || capture.clone())
                .finish();
            tokio::spawn(consumer_future.with_subscriber(subscriber))
        }
        None => tokio::spawn(consumer_future),
    };

    TestHelper {
        storage,
        out,
        cancellation,
        handle,
    }
}

/// Shared buffer the capturing subscriber writes its formatted events to.
#[derive(Debug, Default, Clone)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8(self.buffer.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl TestHelper {
    pub async fn send_static(&self, message: &ShipStaticData) {
        let envelope = json!({
            "MessageType": "ShipStaticData",
            "Message": { "ShipStaticData": message },
        });
        self.send_raw(&envelope.to_string()).await;
    }

    pub async fn send_position(&self, message: &PositionReport) {
        let envelope = json!({
            "MessageType": "PositionReport",
            "Message": { "PositionReport": message },
        });
        self.send_raw(&envelope.to_string()).await;
    }

    pub async fn send_raw(&self, value: &str) {
        let mut value = value.to_string();
        value.push('\n');
        self.out.send(Ok(value)).await.unwrap();
    }

    /// Closes the feed and waits for the consumer to observe the resulting
    /// end of stream, which is fatal to the run. All messages queued before
    /// the close are processed first.
    pub async fn finish(self) -> TestStorage {
        drop(self.out);
        assert!(self.handle.await.unwrap().is_err());
        self.storage
    }

    /// Stops the consumer through its cancellation signal.
    pub async fn cancel(self) -> TestStorage {
        self.cancellation.send(()).await.unwrap();
        self.handle.await.unwrap().unwrap();
        self.storage
    }
}

#[derive(Debug, Clone)]
pub enum StoredRecord {
    Vessel(NewAisVessel),
    Position(NewAisPosition),
}

/// In-memory stand-in for the storage port, recording every accepted write
/// in arrival order and optionally injecting write failures.
#[derive(Debug, Default, Clone)]
pub struct TestStorage {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredRecord>,
    failures_remaining: u32,
}

impl TestStorage {
    /// Makes the next `n` writes fail.
    pub fn fail_next_writes(&self, n: u32) {
        self.inner.lock().unwrap().failures_remaining = n;
    }

    pub fn records(&self) -> Vec<StoredRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    pub fn vessels(&self) -> Vec<NewAisVessel> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                StoredRecord::Vessel(v) => Some(v),
                StoredRecord::Position(_) => None,
            })
            .collect()
    }

    pub fn positions(&self) -> Vec<NewAisPosition> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                StoredRecord::Position(p) => Some(p),
                StoredRecord::Vessel(_) => None,
            })
            .collect()
    }

    fn store(&self, record: StoredRecord) -> Result<(), InsertError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failures_remaining > 0 {
            inner.failures_remaining -= 1;
            return Err(Report::new(InsertError));
        }
        inner.records.push(record);
        Ok(())
    }
}

#[async_trait]
impl AisConsumerInboundPort for TestStorage {
    async fn add_vessel(&self, vessel: NewAisVessel) -> Result<(), InsertError> {
        self.store(StoredRecord::Vessel(vessel))
    }

    async fn add_position(&self, position: NewAisPosition) -> Result<(), InsertError> {
        self.store(StoredRecord::Position(position))
    }
}
