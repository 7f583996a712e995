//! Step navigation and selection state as a pure reducer.
//!
//! Every user interaction is a [`WizardAction`]; [`reduce`] consumes the current
//! [`WizardState`] and returns the next one together with anything the binding
//! layer has to surface (a [`Notice`]) or carry out (an [`Effect`]).

use std::collections::BTreeMap;

use shared::{
    catalog::Catalog,
    domain::{FieldSpec, LocationCode, Step},
    record::FinalRecord,
};
use tracing::{debug, info, warn};

use crate::{
    selector::{
        crop_options, cultivar_options, greenhouse_options, Selector, CROP_PLACEHOLDER,
        CULTIVAR_PLACEHOLDER, GREENHOUSE_PLACEHOLDER,
    },
    submission::build_record,
};

pub const MISSING_GREENHOUSE_WARNING: &str = "Please select a greenhouse.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub location: Option<LocationCode>,
    pub haus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    ChooseLocation(LocationCode),
    SelectGreenhouse(String),
    ConfirmGreenhouse,
    BackToLocation,
    BackToGreenhouse,
    SelectCrop(String),
    SelectCultivar(String),
    SetField { name: String, value: String },
    Submit,
}

impl WizardAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChooseLocation(_) => "choose_location",
            Self::SelectGreenhouse(_) => "select_greenhouse",
            Self::ConfirmGreenhouse => "confirm_greenhouse",
            Self::BackToLocation => "back_to_location",
            Self::BackToGreenhouse => "back_to_greenhouse",
            Self::SelectCrop(_) => "select_crop",
            Self::SelectCultivar(_) => "select_cultivar",
            Self::SetField { .. } => "set_field",
            Self::Submit => "submit",
        }
    }

    /// The step whose controls issue this action.
    fn origin(&self) -> Step {
        match self {
            Self::ChooseLocation(_) => Step::Location,
            Self::SelectGreenhouse(_) | Self::ConfirmGreenhouse | Self::BackToLocation => {
                Step::Greenhouse
            }
            Self::BackToGreenhouse
            | Self::SelectCrop(_)
            | Self::SelectCultivar(_)
            | Self::SetField { .. }
            | Self::Submit => Step::Entry,
        }
    }
}

/// Blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Warning(message) | Self::Info(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the record to the ingestion collaborator.
    Ingest(FinalRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WizardState,
    pub notice: Option<Notice>,
    pub effect: Option<Effect>,
}

impl Transition {
    fn quiet(state: WizardState) -> Self {
        Self {
            state,
            notice: None,
            effect: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    step: Step,
    selection: SelectionState,
    haus_select: Selector,
    kultur_select: Selector,
    sorte_select: Selector,
    fields: Vec<FieldSpec>,
    field_values: BTreeMap<String, String>,
}

impl WizardState {
    pub fn new(catalog: &Catalog, fields: Vec<FieldSpec>) -> Self {
        let mut kultur_select = Selector::empty(CROP_PLACEHOLDER);
        kultur_select.repopulate(crop_options(catalog));
        let field_values = fields
            .iter()
            .map(|field| (field.name.clone(), String::new()))
            .collect();

        Self {
            step: Step::Location,
            selection: SelectionState::default(),
            haus_select: Selector::empty(GREENHOUSE_PLACEHOLDER),
            kultur_select,
            sorte_select: Selector::empty(CULTIVAR_PLACEHOLDER),
            fields,
            field_values,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn greenhouse_select(&self) -> &Selector {
        &self.haus_select
    }

    pub fn crop_select(&self) -> &Selector {
        &self.kultur_select
    }

    pub fn cultivar_select(&self) -> &Selector {
        &self.sorte_select
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.field_values.get(name).map(String::as_str)
    }

    pub(crate) fn field_values(&self) -> &BTreeMap<String, String> {
        &self.field_values
    }

    fn show(&mut self, step: Step) {
        debug!(from = ?self.step, to = ?step, "switching step");
        self.step = step;
    }
}

pub fn reduce(mut state: WizardState, catalog: &Catalog, action: WizardAction) -> Transition {
    if action.origin() != state.step {
        debug!(
            action = action.name(),
            step = ?state.step,
            "ignoring action from a hidden step"
        );
        return Transition::quiet(state);
    }

    match action {
        WizardAction::ChooseLocation(location) => {
            info!(%location, "location chosen");
            state.selection.location = Some(location);
            state
                .haus_select
                .repopulate(greenhouse_options(catalog, location));
            state.show(Step::Greenhouse);
            Transition::quiet(state)
        }
        WizardAction::SelectGreenhouse(haus) => {
            if !state.haus_select.select(&haus) {
                debug!(%haus, "greenhouse not offered for current location");
            }
            Transition::quiet(state)
        }
        WizardAction::ConfirmGreenhouse => {
            if !state.haus_select.has_selection() {
                warn!("greenhouse confirmation without a selection");
                state.selection.haus = None;
                return Transition {
                    state,
                    notice: Some(Notice::Warning(MISSING_GREENHOUSE_WARNING.to_string())),
                    effect: None,
                };
            }
            let haus = state.haus_select.value().to_string();
            info!(%haus, "greenhouse confirmed");
            state.selection.haus = Some(haus);
            state.show(Step::Entry);
            Transition::quiet(state)
        }
        WizardAction::BackToLocation => {
            state.show(Step::Location);
            Transition::quiet(state)
        }
        WizardAction::BackToGreenhouse => {
            state.show(Step::Greenhouse);
            Transition::quiet(state)
        }
        WizardAction::SelectCrop(kultur) => {
            if state.kultur_select.select(&kultur) {
                state
                    .sorte_select
                    .repopulate(cultivar_options(catalog, &kultur));
            } else {
                debug!(%kultur, "crop not offered");
            }
            Transition::quiet(state)
        }
        WizardAction::SelectCultivar(sorte) => {
            if !state.sorte_select.select(&sorte) {
                debug!(%sorte, "cultivar not offered for current crop");
            }
            Transition::quiet(state)
        }
        WizardAction::SetField { name, value } => {
            match state.field_values.get_mut(&name) {
                Some(slot) => *slot = value,
                None => debug!(field = %name, "entry form has no such field"),
            }
            Transition::quiet(state)
        }
        WizardAction::Submit => {
            let record = build_record(&state);
            info!(
                location = ?record.location,
                haus = ?record.haus,
                kultur = %record.kultur,
                "entry form submitted"
            );
            Transition {
                state,
                notice: None,
                effect: Some(Effect::Ingest(record)),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
