use csv::StringRecord;

use crate::errors::DecodeError;
use crate::header::Header;
use crate::model::Connection;
use crate::registry::RowDecoder;

use super::decode_columns;

#[derive(Debug, Clone, Copy)]
enum ConnectionColumn {
    CarrierId,
    Origin,
    Destination,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionDecoder;

impl ConnectionDecoder {
    const NAME: &'static str = "connections";

    fn classify_column(column: &str) -> Option<ConnectionColumn> {
        match column {
            "airline id" => Some(ConnectionColumn::CarrierId),
            "origin" => Some(ConnectionColumn::Origin),
            "destination" => Some(ConnectionColumn::Destination),
            _ => None,
        }
    }
}

impl RowDecoder for ConnectionDecoder {
    type Record = Connection;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decode(&self, record: &StringRecord, header: &Header) -> Result<Connection, DecodeError> {
        decode_columns(record, header, |connection: &mut Connection, column, value| {
            match Self::classify_column(column) {
                Some(ConnectionColumn::CarrierId) => connection.carrier_id = value,
                Some(ConnectionColumn::Origin) => connection.origin = value,
                Some(ConnectionColumn::Destination) => connection.destination = value,
                None => {}
            }
        })
    }
}
