use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use flightmap_parser::{
    Carrier, CarrierDecoder, Connection, ConnectionDecoder, Station, StationDecoder,
};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{LoadError, RecordError};
use crate::pipeline::{ingest, Decoded, Ingestion, IngestionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Carriers,
    Stations,
    Connections,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Carriers => "carriers",
            Dataset::Stations => "stations",
            Dataset::Connections => "connections",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct DataFiles {
    pub carriers: PathBuf,
    pub stations: PathBuf,
    pub connections: PathBuf,
}

#[derive(Debug)]
pub struct DatasetReport {
    pub dataset: Dataset,
    pub summary: IngestionSummary,
    pub errors: Vec<RecordError>,
}

impl DatasetReport {
    fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            summary: IngestionSummary::default(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct LoadReport {
    pub carriers: DatasetReport,
    pub stations: DatasetReport,
    pub connections: DatasetReport,
}

impl LoadReport {
    pub fn datasets(&self) -> [&DatasetReport; 3] {
        [&self.carriers, &self.stations, &self.connections]
    }

    pub fn error_count(&self) -> usize {
        self.datasets().iter().map(|report| report.errors.len()).sum()
    }
}

/// In-memory carrier, station and connection collections.
///
/// Carriers and stations are keyed by name; a later line with the same name
/// replaces an earlier one. Connections keep the order they were delivered
/// in. The store is built once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    carriers: HashMap<String, Carrier>,
    stations: HashMap<String, Station>,
    connections: Vec<Connection>,
}

impl RouteStore {
    pub fn from_records(
        carriers: impl IntoIterator<Item = Carrier>,
        stations: impl IntoIterator<Item = Station>,
        connections: impl IntoIterator<Item = Connection>,
    ) -> Self {
        let mut store = Self::default();
        for carrier in carriers {
            store
                .carriers
                .insert(carrier.name.clone().unwrap_or_default(), carrier);
        }
        for station in stations {
            store
                .stations
                .insert(station.name.clone().unwrap_or_default(), station);
        }
        store.connections.extend(connections);
        store
    }

    /// Ingests all three files and returns the populated store.
    ///
    /// The three pipelines run concurrently; their outputs are drained one
    /// dataset at a time, carriers first. Only a file that cannot be opened
    /// or whose header cannot be read fails the load; rejected lines end up
    /// in the report.
    pub async fn load(
        files: &DataFiles,
        config: &PipelineConfig,
    ) -> Result<(Self, LoadReport), LoadError> {
        let carriers = ingest(&files.carriers, CarrierDecoder, config).map_err(|source| {
            LoadError {
                dataset: Dataset::Carriers,
                source,
            }
        })?;
        let stations = ingest(&files.stations, StationDecoder, config).map_err(|source| {
            LoadError {
                dataset: Dataset::Stations,
                source,
            }
        })?;
        let connections =
            ingest(&files.connections, ConnectionDecoder, config).map_err(|source| LoadError {
                dataset: Dataset::Connections,
                source,
            })?;

        let mut carrier_rows = Vec::new();
        let carriers_report = drain(Dataset::Carriers, carriers, |decoded| {
            carrier_rows.push(decoded)
        })
        .await;

        let mut station_rows = Vec::new();
        let stations_report = drain(Dataset::Stations, stations, |decoded| {
            station_rows.push(decoded)
        })
        .await;

        let mut connection_rows = Vec::new();
        let connections_report = drain(Dataset::Connections, connections, |decoded| {
            connection_rows.push(decoded.record)
        })
        .await;

        let store = Self::from_records(
            in_file_order(carrier_rows),
            in_file_order(station_rows),
            connection_rows,
        );

        Ok((
            store,
            LoadReport {
                carriers: carriers_report,
                stations: stations_report,
                connections: connections_report,
            },
        ))
    }

    pub fn carriers(&self) -> &HashMap<String, Carrier> {
        &self.carriers
    }

    pub fn stations(&self) -> &HashMap<String, Station> {
        &self.stations
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn carrier(&self, name: &str) -> Option<&Carrier> {
        self.carriers.get(name)
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }
}

// Keyed collections resolve duplicates by line, not by arrival.
fn in_file_order<R>(mut rows: Vec<Decoded<R>>) -> impl Iterator<Item = R> {
    rows.sort_by_key(|decoded| decoded.line);
    rows.into_iter().map(|decoded| decoded.record)
}

/// Receives records and errors until both channels close, then waits for the
/// completion signal.
async fn drain<R, F>(dataset: Dataset, ingestion: Ingestion<R>, mut sink: F) -> DatasetReport
where
    F: FnMut(Decoded<R>),
{
    let Ingestion {
        mut records,
        mut errors,
        done,
        ..
    } = ingestion;
    let mut report = DatasetReport::new(dataset);
    let mut records_open = true;
    let mut errors_open = true;

    while records_open || errors_open {
        tokio::select! {
            received = records.recv(), if records_open => match received {
                Some(decoded) => sink(decoded),
                None => records_open = false,
            },
            received = errors.recv(), if errors_open => match received {
                Some(err) => {
                    warn!(%dataset, line = ?err.line(), error = %err, "record rejected");
                    report.errors.push(err);
                }
                None => errors_open = false,
            },
        }
    }

    match done.await {
        Ok(summary) => report.summary = summary,
        Err(_) => warn!(%dataset, "ingestion stopped without signalling completion"),
    }

    info!(
        %dataset,
        lines = report.summary.lines,
        records = report.summary.decoded,
        errors = report.summary.failed,
        "dataset loaded"
    );
    report
}
