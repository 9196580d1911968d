use csv::StringRecord;

use crate::errors::DecodeError;
use crate::header::Header;

/// Turns one positional record into a typed value, using the header of the
/// file it came from to give each position a meaning.
pub trait RowDecoder: Send + Sync + 'static {
    type Record: Send + 'static;

    fn name(&self) -> &'static str;
    fn decode(&self, record: &StringRecord, header: &Header) -> Result<Self::Record, DecodeError>;
}
