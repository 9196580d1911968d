//! Row-level decoding for the carrier, station and connection datasets.
//!
//! Everything in this crate is synchronous and allocation-light so the
//! ingestion pipeline can run one decoder call per spawned task.

pub mod errors;
pub mod formats;
pub mod header;
pub mod model;
mod registry;

pub use errors::DecodeError;
pub use formats::{normalize_cell, parse_cell, CarrierDecoder, ConnectionDecoder, StationDecoder};
pub use header::Header;
pub use model::{Carrier, Connection, Station};
pub use registry::RowDecoder;
