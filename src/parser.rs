//! Record parser for the tree inventory XML.
//!
//! [`RecordAccumulator`] is a small state machine fed with element and text
//! events; it knows nothing about the XML library. [`TreeReader`] drives it
//! from a `quick_xml` pull reader and yields one [`RawRecord`] per
//! `<belfasttrees>` element, in input order.

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::denotation::classify_surround;
use crate::error::{ConvertError, Result};
use crate::model::{fields, fixme, RawRecord, RECORD_ELEMENT};
use crate::species::substitute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Between records
    Idle,
    InRecord,
}

#[derive(Debug)]
pub struct RecordAccumulator {
    state: ParserState,
    record: RawRecord,
    buffer: String,
}

impl Default for RecordAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordAccumulator {
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
            record: RawRecord::new(),
            buffer: String::new(),
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn start_element(&mut self, name: &str) {
        self.buffer.clear();
        if name == RECORD_ELEMENT {
            if self.state == ParserState::InRecord {
                warn!("Nested <{}> discards the open record", RECORD_ELEMENT);
            }
            self.record = RawRecord::new();
            self.state = ParserState::InRecord;
        }
    }

    pub fn characters(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Commits the buffered text. Returns the finished record at `</belfasttrees>`.
    pub fn end_element(&mut self, name: &str) -> Option<RawRecord> {
        if self.state == ParserState::Idle {
            return None;
        }

        let content = std::mem::take(&mut self.buffer);
        match name {
            RECORD_ELEMENT => {
                self.state = ParserState::Idle;
                return Some(std::mem::take(&mut self.record));
            }
            fields::SURROUND => match classify_surround(&content) {
                Some(denotation) => self.record.denotation = Some(denotation),
                None => {
                    debug!("Unrecognised tree surround '{}'", content);
                    self.record.fixme.push(fixme::DENOTATION);
                }
            },
            fields::SPECIES => self.record.species = Some(substitute(&content)),
            field if fields::VERBATIM.contains(&field) => self.record.insert(field, content),
            _ => {}
        }
        None
    }

    /// Called at end of input.
    pub fn finish(&self) -> Result<()> {
        match self.state {
            ParserState::Idle => Ok(()),
            ParserState::InRecord => Err(ConvertError::UnterminatedRecord),
        }
    }
}

pub struct TreeReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    accumulator: RecordAccumulator,
    records_read: usize,
}

impl<R: BufRead> TreeReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: Reader::from_reader(inner),
            buf: Vec::new(),
            accumulator: RecordAccumulator::new(),
            records_read: 0,
        }
    }

    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Reads up to the next complete record, `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>> {
        loop {
            let record = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => {
                    self.accumulator.start_element(&element_name(e.local_name().as_ref()));
                    None
                }
                Event::Empty(e) => {
                    let local = e.local_name();
                    let name = element_name(local.as_ref());
                    self.accumulator.start_element(&name);
                    self.accumulator.end_element(&name)
                }
                Event::End(e) => self
                    .accumulator
                    .end_element(&element_name(e.local_name().as_ref())),
                Event::Text(e) => {
                    self.accumulator.characters(&e.unescape()?);
                    None
                }
                Event::CData(e) => {
                    self.accumulator
                        .characters(&String::from_utf8_lossy(&e.into_inner()));
                    None
                }
                Event::Eof => {
                    self.accumulator.finish()?;
                    debug!("Reached end of input after {} records", self.records_read);
                    return Ok(None);
                }
                _ => None,
            };
            self.buf.clear();

            if let Some(record) = record {
                self.records_read += 1;
                return Ok(Some(record));
            }
        }
    }
}

fn element_name(raw: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(raw)
}
