mod carriers;
mod common;
mod connections;
mod stations;

pub use carriers::CarrierDecoder;
pub use common::{normalize_cell, parse_cell};
pub use connections::ConnectionDecoder;
pub use stations::StationDecoder;

pub(crate) use common::decode_columns;
