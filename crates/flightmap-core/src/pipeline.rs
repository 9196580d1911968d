//! Concurrent ingestion of one delimited file.
//!
//! A blocking reader feeds raw records to a coordinating task, which spawns
//! one decode task per record and tracks them in a `JoinSet`. Decoded
//! records and per-line errors travel on two separate channels. Once the
//! file is exhausted and every decode task has been joined, both channels
//! are closed and the completion signal fires.

use std::path::Path;
use std::sync::Arc;

use csv::{Position, StringRecord};
use flightmap_parser::{Header, RowDecoder};
use tokio::sync::{mpsc, oneshot, OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::error::{RecordError, SourceError};
use crate::source::StreamingSource;

/// A decoded record together with the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<R> {
    pub line: u64,
    pub record: R,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionSummary {
    /// Data lines pulled from the source, header excluded.
    pub lines: u64,
    pub decoded: u64,
    pub failed: u64,
}

/// Output endpoints of a running ingestion.
///
/// `records` and `errors` must be drained concurrently: decode tasks wait
/// on a full channel, and the completion signal is only sent after every
/// one of them has returned.
#[derive(Debug)]
pub struct Ingestion<R> {
    pub header: Arc<Header>,
    pub records: mpsc::Receiver<Decoded<R>>,
    pub errors: mpsc::Receiver<RecordError>,
    pub done: oneshot::Receiver<IngestionSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Decoded,
    Failed,
}

/// Opens `path`, reads its header and starts decoding in the background.
///
/// Open and header failures are returned immediately and nothing is
/// spawned. Must be called from within a Tokio runtime.
pub fn ingest<D: RowDecoder>(
    path: impl AsRef<Path>,
    decoder: D,
    config: &PipelineConfig,
) -> Result<Ingestion<D::Record>, SourceError> {
    let source = StreamingSource::open(path)?;
    let header = Arc::new(source.header().clone());
    debug!(
        dataset = decoder.name(),
        path = %source.path().display(),
        columns = header.len(),
        "header read"
    );

    let capacity = config.capacity();
    let (raw_tx, raw_rx) = mpsc::channel(capacity);
    let (records_tx, records_rx) = mpsc::channel(capacity);
    let (errors_tx, errors_rx) = mpsc::channel(capacity);
    let (done_tx, done_rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || read_source(source, raw_tx));

    let coordinator = Coordinator {
        decoder: Arc::new(decoder),
        header: Arc::clone(&header),
        permits: config.decode_limit().map(|limit| Arc::new(Semaphore::new(limit))),
        records: records_tx,
        errors: errors_tx,
    };
    tokio::spawn(coordinator.run(raw_rx, done_tx));

    Ok(Ingestion {
        header,
        records: records_rx,
        errors: errors_rx,
        done: done_rx,
    })
}

fn read_source(source: StreamingSource, raw_tx: mpsc::Sender<Result<StringRecord, SourceError>>) {
    for item in source {
        if raw_tx.blocking_send(item).is_err() {
            // Coordinator is gone; nobody is left to decode.
            break;
        }
    }
}

struct Coordinator<D: RowDecoder> {
    decoder: Arc<D>,
    header: Arc<Header>,
    permits: Option<Arc<Semaphore>>,
    records: mpsc::Sender<Decoded<D::Record>>,
    errors: mpsc::Sender<RecordError>,
}

impl<D: RowDecoder> Coordinator<D> {
    async fn run(
        self,
        mut raw_rx: mpsc::Receiver<Result<StringRecord, SourceError>>,
        done_tx: oneshot::Sender<IngestionSummary>,
    ) {
        let dataset = self.decoder.name();
        let mut summary = IngestionSummary::default();
        let mut tasks = JoinSet::new();

        while let Some(item) = raw_rx.recv().await {
            summary.lines += 1;

            let record = match item {
                Ok(record) => record,
                Err(err) => {
                    summary.failed += 1;
                    let _ = self.errors.send(RecordError::Read(err)).await;
                    continue;
                }
            };

            let permit = self.acquire_permit().await;
            tasks.spawn(decode_record(
                Arc::clone(&self.decoder),
                Arc::clone(&self.header),
                record,
                self.records.clone(),
                self.errors.clone(),
                permit,
            ));

            while let Some(joined) = tasks.try_join_next() {
                tally(&mut summary, joined, dataset);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            tally(&mut summary, joined, dataset);
        }

        // Every decode task has returned, so these are the last senders.
        drop(self.records);
        drop(self.errors);

        debug!(
            dataset,
            lines = summary.lines,
            decoded = summary.decoded,
            failed = summary.failed,
            "ingestion finished"
        );
        let _ = done_tx.send(summary);
    }

    async fn acquire_permit(&self) -> Option<OwnedSemaphorePermit> {
        let semaphore = self.permits.as_ref()?;
        Arc::clone(semaphore).acquire_owned().await.ok()
    }
}

async fn decode_record<D: RowDecoder>(
    decoder: Arc<D>,
    header: Arc<Header>,
    record: StringRecord,
    records: mpsc::Sender<Decoded<D::Record>>,
    errors: mpsc::Sender<RecordError>,
    _permit: Option<OwnedSemaphorePermit>,
) -> Outcome {
    let line = record.position().map_or(0, Position::line);

    match decoder.decode(&record, &header) {
        Ok(decoded) => {
            let _ = records
                .send(Decoded {
                    line,
                    record: decoded,
                })
                .await;
            Outcome::Decoded
        }
        Err(source) => {
            let _ = errors
                .send(RecordError::Decode {
                    line,
                    record: record.iter().map(str::to_owned).collect(),
                    source,
                })
                .await;
            Outcome::Failed
        }
    }
}

fn tally(summary: &mut IngestionSummary, joined: Result<Outcome, JoinError>, dataset: &str) {
    match joined {
        Ok(Outcome::Decoded) => summary.decoded += 1,
        Ok(Outcome::Failed) => summary.failed += 1,
        Err(err) => {
            warn!(dataset, error = %err, "decode task did not complete");
            summary.failed += 1;
        }
    }
}
