//! UI-free core of the greenhouse observation form.
//!
//! Binding layers translate user interactions into [`WizardAction`]s, feed them
//! through [`reduce`], render the resulting [`WizardState`] and pass any
//! [`Effect::Ingest`] record to a [`RecordSink`] via [`hand_off`].

pub mod config;
pub mod reducer;
pub mod selector;
pub mod submission;

pub use config::{Settings, SettingsError};
pub use reducer::{
    reduce, Effect, Notice, SelectionState, Transition, WizardAction, WizardState,
    MISSING_GREENHOUSE_WARNING,
};
pub use selector::{crop_options, cultivar_options, greenhouse_options, Selector};
pub use submission::{build_record, hand_off, JsonLinesSink, LogSink, RecordSink};
