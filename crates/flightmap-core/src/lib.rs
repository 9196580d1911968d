pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod store;

pub use config::PipelineConfig;
pub use error::{LoadError, RecordError, SourceError};
pub use pipeline::{ingest, Decoded, Ingestion, IngestionSummary};
pub use source::StreamingSource;
pub use store::{DataFiles, Dataset, DatasetReport, LoadReport, RouteStore};
