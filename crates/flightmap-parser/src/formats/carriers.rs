use csv::StringRecord;

use crate::errors::DecodeError;
use crate::header::Header;
use crate::model::Carrier;
use crate::registry::RowDecoder;

use super::decode_columns;

#[derive(Debug, Clone, Copy)]
enum CarrierColumn {
    Name,
    TwoDigitCode,
    ThreeDigitCode,
    Country,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CarrierDecoder;

impl CarrierDecoder {
    const NAME: &'static str = "carriers";

    fn classify_column(column: &str) -> Option<CarrierColumn> {
        match column {
            "name" => Some(CarrierColumn::Name),
            "2 digit code" => Some(CarrierColumn::TwoDigitCode),
            "3 digit code" => Some(CarrierColumn::ThreeDigitCode),
            "country" => Some(CarrierColumn::Country),
            _ => None,
        }
    }
}

impl RowDecoder for CarrierDecoder {
    type Record = Carrier;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decode(&self, record: &StringRecord, header: &Header) -> Result<Carrier, DecodeError> {
        decode_columns(record, header, |carrier: &mut Carrier, column, value| {
            match Self::classify_column(column) {
                Some(CarrierColumn::Name) => carrier.name = value,
                Some(CarrierColumn::TwoDigitCode) => carrier.two_digit_code = value,
                Some(CarrierColumn::ThreeDigitCode) => carrier.three_digit_code = value,
                Some(CarrierColumn::Country) => carrier.country = value,
                None => {}
            }
        })
    }
}
