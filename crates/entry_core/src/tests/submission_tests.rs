use super::*;
use crate::reducer::{reduce, Effect, WizardAction};
use shared::{
    catalog::Catalog,
    domain::{default_entry_fields, FieldSpec, LocationCode},
};

#[derive(Default)]
struct CollectingSink {
    records: Vec<FinalRecord>,
}

impl RecordSink for CollectingSink {
    fn ingest(&mut self, record: &FinalRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

fn entry_state(catalog: &Catalog, fields: Vec<FieldSpec>) -> WizardState {
    [
        WizardAction::ChooseLocation(LocationCode::Tgw),
        WizardAction::SelectGreenhouse("4".into()),
        WizardAction::ConfirmGreenhouse,
    ]
    .into_iter()
    .fold(WizardState::new(catalog, fields), |state, action| {
        reduce(state, catalog, action).state
    })
}

#[test]
fn blank_form_passes_through_without_validation() {
    let catalog = Catalog::builtin();
    let record = build_record(&entry_state(&catalog, default_entry_fields()));
    assert_eq!(record.location, Some(LocationCode::Tgw));
    assert_eq!(record.haus.as_deref(), Some("4"));
    assert_eq!(record.kultur, "");
    assert_eq!(record.sorte, "");
    assert_eq!(record.plant_id.as_deref(), Some(""));
    assert_eq!(record.leaf_count.as_deref(), Some(""));
    assert!(record.extra.is_empty());
}

#[test]
fn additional_fields_land_in_extra_and_missing_ones_are_null() {
    let catalog = Catalog::builtin();
    let fields = vec![
        FieldSpec::new("plant-id", "Pflanzen-ID"),
        FieldSpec::new("stem-diameter", "Stängeldicke"),
    ];
    let state = reduce(
        entry_state(&catalog, fields),
        &catalog,
        WizardAction::SetField {
            name: "stem-diameter".into(),
            value: "11.5".into(),
        },
    )
    .state;

    let record = build_record(&state);
    assert_eq!(record.leaf_count, None);
    assert_eq!(record.extra.get("stem_diameter").map(String::as_str), Some("11.5"));

    let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
    assert_eq!(json["stem_diameter"], "11.5");
    assert!(json["leaf_count"].is_null());
    assert_eq!(json["location"], "TGW");
}

#[test]
fn submit_effect_is_handed_to_the_sink_with_confirmation() {
    let catalog = Catalog::builtin();
    let transition = reduce(
        entry_state(&catalog, default_entry_fields()),
        &catalog,
        WizardAction::Submit,
    );
    let Some(Effect::Ingest(record)) = transition.effect else {
        panic!("submit must produce a record");
    };

    let mut sink = CollectingSink::default();
    let notice = hand_off(&mut sink, &record).expect("hand off");
    assert_eq!(notice, Notice::Info(PACKAGED_NOTICE.to_string()));
    assert_eq!(sink.records, vec![record]);
}

#[test]
fn json_lines_sink_writes_one_object_per_record() {
    let catalog = Catalog::builtin();
    let record = build_record(&entry_state(&catalog, default_entry_fields()));

    let mut sink = JsonLinesSink::new(Vec::new());
    sink.ingest(&record).unwrap();
    sink.ingest(&record).unwrap();
    let written = String::from_utf8(sink.into_inner()).unwrap();

    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    let parsed: FinalRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn log_sink_accepts_records() {
    let catalog = Catalog::builtin();
    let record = build_record(&entry_state(&catalog, default_entry_fields()));
    assert!(hand_off(LogSink, &record).is_ok());
}
