use csv::StringRecord;

use crate::errors::DecodeError;
use crate::header::Header;
use crate::model::Station;
use crate::registry::RowDecoder;

use super::decode_columns;

#[derive(Debug, Clone, Copy)]
enum StationColumn {
    Name,
    City,
    Iata3,
    Country,
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StationDecoder;

impl StationDecoder {
    const NAME: &'static str = "stations";

    fn classify_column(column: &str) -> Option<StationColumn> {
        match column {
            "name" => Some(StationColumn::Name),
            "city" => Some(StationColumn::City),
            "iata 3" => Some(StationColumn::Iata3),
            "country" => Some(StationColumn::Country),
            "latitude" => Some(StationColumn::Latitude),
            "longitude" => Some(StationColumn::Longitude),
            _ => None,
        }
    }
}

impl RowDecoder for StationDecoder {
    type Record = Station;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decode(&self, record: &StringRecord, header: &Header) -> Result<Station, DecodeError> {
        decode_columns(record, header, |station: &mut Station, column, value| {
            match Self::classify_column(column) {
                Some(StationColumn::Name) => station.name = value,
                Some(StationColumn::City) => station.city = value,
                Some(StationColumn::Iata3) => station.iata3 = value,
                Some(StationColumn::Country) => station.country = value,
                Some(StationColumn::Latitude) => station.latitude = value,
                Some(StationColumn::Longitude) => station.longitude = value,
                None => {}
            }
        })
    }
}
