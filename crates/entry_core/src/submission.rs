//! Form submission: merging selection state with the entry form into a
//! [`FinalRecord`], and the single call site towards the ingestion service.

use std::{collections::BTreeMap, io::Write};

use shared::{
    domain::{LEAF_COUNT_FIELD, PLANT_ID_FIELD},
    error::SinkError,
    record::FinalRecord,
};
use tracing::info;

use crate::reducer::{Notice, WizardState};

pub const PACKAGED_NOTICE: &str =
    "Form is ready to be sent! Check the operator log to see the data.";

/// Ingestion boundary. A networked implementation replaces the sink handed to
/// [`hand_off`]; nothing else changes.
pub trait RecordSink {
    fn ingest(&mut self, record: &FinalRecord) -> Result<(), SinkError>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn ingest(&mut self, record: &FinalRecord) -> Result<(), SinkError> {
        (**self).ingest(record)
    }
}

/// Surfaces the record to the operator through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl RecordSink for LogSink {
    fn ingest(&mut self, record: &FinalRecord) -> Result<(), SinkError> {
        let rendered = record.to_json()?;
        info!(record = %rendered, "final data to be sent to ingestion");
        Ok(())
    }
}

/// Writes one JSON object per record.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn ingest(&mut self, record: &FinalRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Assembles the record from whatever the form currently holds. No validation.
pub fn build_record(state: &WizardState) -> FinalRecord {
    let selection = state.selection();
    let values = state.field_values();

    let mut plant_id = None;
    let mut leaf_count = None;
    let mut extra = BTreeMap::new();

    for field in state.fields() {
        let value = values.get(&field.name).cloned().unwrap_or_default();
        match field.name.as_str() {
            PLANT_ID_FIELD => plant_id = Some(value),
            LEAF_COUNT_FIELD => leaf_count = Some(value),
            _ => {
                extra.insert(field.record_key(), value);
            }
        }
    }

    FinalRecord {
        location: selection.location,
        haus: selection.haus.clone(),
        kultur: state.crop_select().value().to_string(),
        sorte: state.cultivar_select().value().to_string(),
        plant_id,
        leaf_count,
        extra,
    }
}

/// Passes the record to `sink` and returns the packaging confirmation.
pub fn hand_off<S: RecordSink>(mut sink: S, record: &FinalRecord) -> Result<Notice, SinkError> {
    sink.ingest(record)?;
    Ok(Notice::Info(PACKAGED_NOTICE.to_string()))
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
