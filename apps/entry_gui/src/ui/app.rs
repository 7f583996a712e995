use eframe::egui;
use entry_core::{RecordSink, Selector, WizardAction, WizardState};
use shared::{
    catalog::Catalog,
    domain::{FieldSpec, LocationCode, Step},
};

use crate::controller::{
    events::{Dialog, DialogSeverity},
    orchestration::FormController,
};

pub struct EntryGuiApp<S> {
    controller: FormController<S>,
    dialog: Option<Dialog>,
}

impl<S: RecordSink> EntryGuiApp<S> {
    pub fn new(catalog: Catalog, fields: Vec<FieldSpec>, sink: S) -> Self {
        let wizard = WizardState::new(&catalog, fields);
        Self {
            controller: FormController::new(catalog, wizard, sink),
            dialog: None,
        }
    }

    fn apply(&mut self, actions: Vec<WizardAction>) {
        for action in actions {
            if let Some(dialog) = self.controller.dispatch(action) {
                self.dialog = Some(dialog);
                // Remaining input of this frame belongs to a form the dialog now blocks.
                break;
            }
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.dialog else {
            return;
        };

        let mut acknowledged = false;
        egui::Window::new(dialog.severity().title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let text = egui::RichText::new(dialog.message());
                let text = match dialog.severity() {
                    DialogSeverity::Info => text,
                    DialogSeverity::Warning => text.color(ui.visuals().warn_fg_color),
                    DialogSeverity::Error => text.color(ui.visuals().error_fg_color),
                };
                ui.label(text);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            });

        if acknowledged {
            self.dialog = None;
        }
    }
}

fn step_header(ui: &mut egui::Ui, current: Step) {
    ui.horizontal(|ui| {
        for (index, step) in [Step::Location, Step::Greenhouse, Step::Entry]
            .into_iter()
            .enumerate()
        {
            if index > 0 {
                ui.weak("›");
            }
            let label = egui::RichText::new(format!("{}. {}", index + 1, step.title()));
            if step == current {
                ui.label(label.strong());
            } else {
                ui.label(label.weak());
            }
        }
    });
    ui.separator();
}

/// Dropdown bound to a [`Selector`]; returns the value the user picked.
fn selector_combo(ui: &mut egui::Ui, id: &str, selector: &Selector) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .width(260.0)
        .selected_text(selector.selected_label())
        .show_ui(ui, |ui| {
            for option in selector.options() {
                let selected = option.value == selector.value();
                if ui.selectable_label(selected, option.label.as_str()).clicked() && !selected {
                    picked = Some(option.value.clone());
                }
            }
        });
    picked
}

fn location_step(ui: &mut egui::Ui, catalog: &Catalog, actions: &mut Vec<WizardAction>) {
    ui.heading("Standort");
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        for location in LocationCode::ALL {
            let button = egui::Button::new(egui::RichText::new(location.as_str()).size(20.0))
                .min_size(egui::vec2(120.0, 48.0));
            let response = ui
                .add(button)
                .on_hover_text(format!("{} Häuser", catalog.greenhouses(location).len()));
            if response.clicked() {
                actions.push(WizardAction::ChooseLocation(location));
            }
        }
    });
}

fn greenhouse_step(ui: &mut egui::Ui, wizard: &WizardState, actions: &mut Vec<WizardAction>) {
    let location = wizard
        .selection()
        .location
        .map(LocationCode::as_str)
        .unwrap_or_default();
    ui.heading(format!("Haus in {location}"));
    ui.add_space(8.0);

    if let Some(haus) = selector_combo(ui, "haus-select", wizard.greenhouse_select()) {
        actions.push(WizardAction::SelectGreenhouse(haus));
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.button("Zurück").clicked() {
            actions.push(WizardAction::BackToLocation);
        }
        if ui.button("Weiter").clicked() {
            actions.push(WizardAction::ConfirmGreenhouse);
        }
    });
}

fn entry_step(ui: &mut egui::Ui, wizard: &WizardState, actions: &mut Vec<WizardAction>) {
    let selection = wizard.selection();
    ui.heading(format!(
        "{} / Haus {}",
        selection.location.map(LocationCode::as_str).unwrap_or_default(),
        selection.haus.as_deref().unwrap_or_default()
    ));
    ui.add_space(8.0);

    egui::Grid::new("entry-form")
        .num_columns(2)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            ui.label("Kultur");
            if let Some(kultur) = selector_combo(ui, "kultur-select", wizard.crop_select()) {
                actions.push(WizardAction::SelectCrop(kultur));
            }
            ui.end_row();

            ui.label("Sorte");
            if let Some(sorte) = selector_combo(ui, "sorte-select", wizard.cultivar_select()) {
                actions.push(WizardAction::SelectCultivar(sorte));
            }
            ui.end_row();

            for field in wizard.fields() {
                ui.label(field.label.as_str());
                let mut value = wizard.field_value(&field.name).unwrap_or_default().to_string();
                let mut edit = egui::TextEdit::singleline(&mut value).desired_width(260.0);
                if let Some(hint) = &field.hint {
                    edit = edit.hint_text(hint.as_str());
                }
                if ui.add(edit).changed() {
                    actions.push(WizardAction::SetField {
                        name: field.name.clone(),
                        value,
                    });
                }
                ui.end_row();
            }
        });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.button("Zurück").clicked() {
            actions.push(WizardAction::BackToGreenhouse);
        }
        if ui.button("Absenden").clicked() {
            actions.push(WizardAction::Submit);
        }
    });
}

impl<S: RecordSink> eframe::App for EntryGuiApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();
        let blocked = self.dialog.is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                let wizard = self.controller.wizard();
                step_header(ui, wizard.step());
                match wizard.step() {
                    Step::Location => location_step(ui, self.controller.catalog(), &mut actions),
                    Step::Greenhouse => greenhouse_step(ui, wizard, &mut actions),
                    Step::Entry => entry_step(ui, wizard, &mut actions),
                }
            });
        });

        self.apply(actions);
        self.show_dialog(ctx);
    }
}
