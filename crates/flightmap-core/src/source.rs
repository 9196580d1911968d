use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Position, Reader, ReaderBuilder, StringRecord};
use flightmap_parser::Header;

use crate::error::SourceError;

/// Sequential reader over one delimited file.
///
/// The header is read and normalized when the source is opened; every
/// later call yields the next raw record. `csv::Reader` is not shared, so a
/// source must be driven by a single thread.
pub struct StreamingSource {
    path: PathBuf,
    header: Header,
    reader: Reader<File>,
    finished: bool,
}

impl StreamingSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| SourceError::Open {
            path: path.clone(),
            source,
        })?;

        // Row length is checked by the decoders so every line gets exactly
        // one outcome.
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut first = StringRecord::new();
        match reader.read_record(&mut first) {
            Ok(true) => {}
            Ok(false) => return Err(SourceError::EmptyHeader { path }),
            Err(source) => return Err(SourceError::Header { path, source }),
        }

        Ok(Self {
            header: Header::from_record(&first),
            path,
            reader,
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next data line. `None` means the file is exhausted; a
    /// failed line is returned as an error and the next call moves on,
    /// except after an I/O failure, which ends the stream.
    pub fn next_record(&mut self) -> Option<Result<StringRecord, SourceError>> {
        if self.finished {
            return None;
        }

        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => Some(Ok(record)),
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(source) => {
                if source.is_io_error() {
                    self.finished = true;
                }
                let line = source
                    .position()
                    .map_or_else(|| self.reader.position().line(), Position::line);
                Some(Err(SourceError::Read { line, source }))
            }
        }
    }
}

impl Iterator for StreamingSource {
    type Item = Result<StringRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

impl std::fmt::Debug for StreamingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingSource")
            .field("path", &self.path)
            .field("header", &self.header)
            .field("finished", &self.finished)
            .finish()
    }
}
