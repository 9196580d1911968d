use csv::StringRecord;

use crate::errors::DecodeError;
use crate::header::Header;

/// Strips the whitespace that surrounds a delimited cell.
pub fn normalize_cell(cell: &str) -> &str {
    cell.trim()
}

/// Normalizes a cell into an attribute value. Blank cells carry no value.
pub fn parse_cell(cell: &str) -> Option<String> {
    let trimmed = normalize_cell(cell);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Checks the record against the header and hands every (column, value)
/// pair to `assign`. Columns `assign` does not know about are its to skip.
pub(crate) fn decode_columns<R, F>(
    record: &StringRecord,
    header: &Header,
    mut assign: F,
) -> Result<R, DecodeError>
where
    R: Default,
    F: FnMut(&mut R, &str, Option<String>),
{
    if record.len() != header.len() {
        return Err(DecodeError::FieldCountMismatch {
            header: header.len(),
            record: record.len(),
        });
    }

    let mut decoded = R::default();
    for (column, cell) in header.iter().zip(record.iter()) {
        assign(&mut decoded, column, parse_cell(cell));
    }
    Ok(decoded)
}
