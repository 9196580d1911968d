use csv::StringRecord;

use crate::formats::normalize_cell;

/// Lower-cased column names of a delimited file, in file order.
///
/// Built once from the first line and shared read-only by every decode of
/// that file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn from_record(record: &StringRecord) -> Self {
        record.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for Header {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|cell| normalize_cell(cell).to_lowercase())
                .collect(),
        }
    }
}
