use entry_core::{hand_off, reduce, Effect, JsonLinesSink, WizardAction, WizardState};
use shared::{
    catalog::Catalog,
    domain::{default_entry_fields, LocationCode, Step},
    record::FinalRecord,
};

fn apply(catalog: &Catalog, state: WizardState, actions: &[WizardAction]) -> WizardState {
    actions.iter().cloned().fold(state, |state, action| {
        let transition = reduce(state, catalog, action);
        assert!(transition.notice.is_none(), "unexpected notice");
        transition.state
    })
}

fn forward_to_entry(location: LocationCode, haus: &str) -> Vec<WizardAction> {
    vec![
        WizardAction::ChooseLocation(location),
        WizardAction::SelectGreenhouse(haus.to_string()),
        WizardAction::ConfirmGreenhouse,
    ]
}

#[test]
fn full_pass_produces_the_expected_record() {
    let catalog = Catalog::builtin();
    let mut actions = forward_to_entry(LocationCode::Tgw, "4");
    actions.extend([
        WizardAction::SelectCrop("gurken".into()),
        WizardAction::SelectCultivar("Verdon".into()),
        WizardAction::SetField {
            name: "plant-id".into(),
            value: "12".into(),
        },
        WizardAction::SetField {
            name: "leaf-count".into(),
            value: "18".into(),
        },
    ]);
    let state = apply(
        &catalog,
        WizardState::new(&catalog, default_entry_fields()),
        &actions,
    );

    let transition = reduce(state, &catalog, WizardAction::Submit);
    assert_eq!(transition.state.step(), Step::Entry);
    let Some(Effect::Ingest(record)) = transition.effect else {
        panic!("submit must hand off a record");
    };
    assert_eq!(
        record,
        FinalRecord {
            location: Some(LocationCode::Tgw),
            haus: Some("4".into()),
            kultur: "gurken".into(),
            sorte: "Verdon".into(),
            plant_id: Some("12".into()),
            leaf_count: Some("18".into()),
            extra: Default::default(),
        }
    );

    let mut sink = JsonLinesSink::new(Vec::new());
    hand_off(&mut sink, &record).expect("hand off");
    let line = String::from_utf8(sink.into_inner()).expect("utf8");
    let json: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(json["location"], "TGW");
    assert_eq!(json["haus"], "4");
    assert_eq!(json["kultur"], "gurken");
    assert_eq!(json["sorte"], "Verdon");
    assert_eq!(json["plant_id"], "12");
    assert_eq!(json["leaf_count"], "18");
}

#[test]
fn forward_back_forward_matches_a_single_pass() {
    let catalog = Catalog::builtin();
    let start = WizardState::new(&catalog, default_entry_fields());

    let single = apply(&catalog, start.clone(), &forward_to_entry(LocationCode::Eln, "22"));

    let mut replay = forward_to_entry(LocationCode::Eln, "22");
    replay.push(WizardAction::BackToGreenhouse);
    replay.push(WizardAction::BackToLocation);
    replay.extend(forward_to_entry(LocationCode::Eln, "22"));
    let repeated = apply(&catalog, start, &replay);

    assert_eq!(repeated, single);
}

#[test]
fn switching_location_discards_the_previous_greenhouse_list() {
    let catalog = Catalog::builtin();
    let mut actions = forward_to_entry(LocationCode::Tgw, "7");
    actions.push(WizardAction::BackToGreenhouse);
    actions.push(WizardAction::BackToLocation);
    actions.push(WizardAction::ChooseLocation(LocationCode::Eln));
    let state = apply(
        &catalog,
        WizardState::new(&catalog, default_entry_fields()),
        &actions,
    );

    let values: Vec<&str> = state
        .greenhouse_select()
        .options()
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(
        values,
        ["", "19", "20", "21", "22", "23", "31", "32", "33", "34"]
    );
    assert_eq!(state.selection().location, Some(LocationCode::Eln));
}
