//! Runs UI actions through the reducer and carries out the resulting effects.

use entry_core::{hand_off, reduce, Effect, RecordSink, WizardAction, WizardState};
use shared::catalog::Catalog;
use tracing::{debug, error};

use crate::controller::events::Dialog;

pub struct FormController<S> {
    catalog: Catalog,
    wizard: WizardState,
    sink: S,
}

impl<S: RecordSink> FormController<S> {
    pub fn new(catalog: Catalog, wizard: WizardState, sink: S) -> Self {
        Self {
            catalog,
            wizard,
            sink,
        }
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Applies one action and returns the dialog it raises, if any.
    pub fn dispatch(&mut self, action: WizardAction) -> Option<Dialog> {
        debug!(action = action.name(), "dispatching ui action");
        let transition = reduce(self.wizard.clone(), &self.catalog, action);
        self.wizard = transition.state;

        let mut dialog = transition.notice.map(Dialog::from_notice);
        if let Some(Effect::Ingest(record)) = transition.effect {
            dialog = Some(match hand_off(&mut self.sink, &record) {
                Ok(notice) => Dialog::from_notice(notice),
                Err(err) => {
                    error!(%err, "record hand-off failed");
                    Dialog::from_sink_error(&err)
                }
            });
        }
        dialog
    }
}
