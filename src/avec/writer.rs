//! Writer-based encoder implementation.

use std::io::Write;

use either::Either::{Left, Right};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::sans::{
    Document,
    check::Crc,
    data::Value,
    definition::{Definition, FieldDefinition, LocalTable},
    header::record_header,
};

use super::{FieldSink, RecordSink, ToRecord};

/// Errors occurring while finishing a document.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied writer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The record section does not fit the header's size field.
    #[error("Record section of {0} bytes exceeds the maximum document size.")]
    TooLarge(usize),
}

/// Encode records into a document written to a writer.
///
/// Records are buffered as they arrive, since the document header holds the
/// size of the record section. Nothing reaches the writer until
/// [`Encoder::close`].
#[derive(Debug)]
pub struct Encoder<W: Write> {
    out: W,
    records: Vec<u8>,
    locals: LocalTable,
    count: usize,
}

impl<W: Write> Encoder<W> {
    /// Begin a document destined for a writer.
    pub fn open(out: W) -> Self {
        Self {
            out,
            records: Vec::new(),
            locals: LocalTable::default(),
            count: 0,
        }
    }

    /// Append a record to the document.
    ///
    /// A definition record is written first whenever no local message slot
    /// holds a matching definition. Fields beyond the 255 a definition can
    /// describe are dropped.
    pub fn write<R: ToRecord + ?Sized>(&mut self, record: &R) {
        let mut collector = Collector {
            definition: Definition::new(record.global()),
            data: Vec::new(),
        };

        record.add_fields(&mut collector);

        let Collector { definition, data } = collector;
        let global = definition.global_message;

        let local = match self.locals.assign(definition) {
            Left((local, definition)) => {
                debug!(global, local, "binding local message");
                definition.encode(local, &mut self.records);
                local
            }
            Right(local) => local,
        };

        self.records.push(record_header(local, false));
        self.records.extend_from_slice(&data);
        self.count += 1;

        trace!(global, local, size = data.len(), "wrote data record");
    }

    /// Number of data records written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Finish the document, writing the header, records and check.
    ///
    /// Returns the writer on success.
    pub fn close(mut self) -> Result<W, Error> {
        let size = self.records.len();
        let data_size = u32::try_from(size).map_err(|_| Error::TooLarge(size))?;

        let header = Document { data_size }.encode();

        let mut crc = Crc::default();
        crc.update(&header);
        crc.update(&self.records);

        self.out.write_all(&header)?;
        self.out.write_all(&self.records)?;
        self.out.write_all(&crc.value().to_le_bytes())?;
        self.out.flush()?;

        debug!(records = self.count, bytes = size, "closed document");

        Ok(self.out)
    }
}

impl<W: Write> RecordSink for Encoder<W> {
    fn add_record(&mut self, record: &dyn ToRecord) {
        self.write(record);
    }
}

/// Gathers a record's definition and data bytes in one pass over its fields.
struct Collector {
    definition: Definition,
    data: Vec<u8>,
}

impl FieldSink for Collector {
    fn add_field(&mut self, field: u8, value: Value<'_>) {
        if self.definition.push(FieldDefinition::of(field, &value)) {
            value.encode(&mut self.data);
        } else {
            let global = self.definition.global_message;
            warn!(global, field, "dropping field beyond definition capacity");
        }
    }
}
