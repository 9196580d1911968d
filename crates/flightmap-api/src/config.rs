use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use flightmap_core::{DataFiles, PipelineConfig};

/// Runtime configuration. Every flag can also be set through the
/// environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serves carrier connections loaded from CSV files", long_about = None)]
pub struct Config {
    /// Carriers CSV file
    #[arg(long, env = "FLIGHTMAP_CARRIERS", default_value = "data/airlines.csv")]
    pub carriers: PathBuf,

    /// Stations CSV file
    #[arg(long, env = "FLIGHTMAP_STATIONS", default_value = "data/airports.csv")]
    pub stations: PathBuf,

    /// Connections CSV file
    #[arg(long, env = "FLIGHTMAP_CONNECTIONS", default_value = "data/routes.csv")]
    pub connections: PathBuf,

    /// Address the HTTP listener binds to
    #[arg(long, env = "FLIGHTMAP_BIND", default_value = "0.0.0.0:3333")]
    pub bind: SocketAddr,

    /// Per-request timeout in seconds
    #[arg(long, env = "FLIGHTMAP_REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Cap on concurrent row decodes per file (unbounded when unset)
    #[arg(long, env = "FLIGHTMAP_MAX_CONCURRENT_DECODES")]
    pub max_concurrent_decodes: Option<usize>,

    /// Buffer size of the ingestion output channels
    #[arg(long, env = "FLIGHTMAP_CHANNEL_CAPACITY", default_value_t = 1)]
    pub channel_capacity: usize,

    /// Emit logs as JSON
    #[arg(long, env = "FLIGHTMAP_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            carriers: self.carriers.clone(),
            stations: self.stations.clone(),
            connections: self.connections.clone(),
        }
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            channel_capacity: self.channel_capacity,
            max_concurrent_decodes: self.max_concurrent_decodes,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "flightmap-api",
            "--carriers",
            "/srv/carriers.csv",
            "--bind",
            "127.0.0.1:8080",
            "--max-concurrent-decodes",
            "8",
            "--request-timeout-secs",
            "5",
        ])
        .expect("arguments should parse");

        assert_eq!(config.data_files().carriers, PathBuf::from("/srv/carriers.csv"));
        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.pipeline().max_concurrent_decodes, Some(8));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_malformed_bind_address() {
        let result = Config::try_parse_from(["flightmap-api", "--bind", "not-an-address"]);
        assert!(result.is_err());
    }
}
