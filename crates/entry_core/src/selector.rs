//! Dropdown controls and the dependent-dropdown populator.

use shared::{catalog::Catalog, domain::LocationCode, domain::SelectOption};

pub const GREENHOUSE_PLACEHOLDER: &str = "--Choose Greenhouse--";
pub const CULTIVAR_PLACEHOLDER: &str = "--Choose Sorte--";
pub const CROP_PLACEHOLDER: &str = "--Choose Kultur--";

/// State of one dropdown: its option list and the selected value.
///
/// The first option is always the placeholder and the selected value is
/// always one of the option values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    options: Vec<SelectOption>,
    selected: String,
}

impl Selector {
    pub fn empty(placeholder: &str) -> Self {
        Self {
            options: vec![SelectOption::placeholder(placeholder)],
            selected: String::new(),
        }
    }

    /// Drops every existing option and resets the selection to the placeholder.
    pub fn repopulate(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.selected.clear();
    }

    /// Returns false, leaving the selection untouched, when no option carries `value`.
    pub fn select(&mut self, value: &str) -> bool {
        if self.options.iter().any(|option| option.value == value) {
            self.selected = value.to_string();
            true
        } else {
            false
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.selected
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|option| option.value == self.selected)
            .map(|option| option.label.as_str())
            .unwrap_or_default()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }
}

pub fn greenhouse_options(catalog: &Catalog, location: LocationCode) -> Vec<SelectOption> {
    with_placeholder(
        GREENHOUSE_PLACEHOLDER,
        catalog
            .greenhouses(location)
            .iter()
            .map(|haus| SelectOption::new(haus.as_str(), format!("Haus {haus}"))),
    )
}

/// An unknown crop yields only the placeholder.
pub fn cultivar_options(catalog: &Catalog, crop: &str) -> Vec<SelectOption> {
    let cultivars = catalog.cultivars(crop).unwrap_or_default();
    with_placeholder(
        CULTIVAR_PLACEHOLDER,
        cultivars
            .iter()
            .map(|sorte| SelectOption::new(sorte.as_str(), sorte.as_str())),
    )
}

pub fn crop_options(catalog: &Catalog) -> Vec<SelectOption> {
    with_placeholder(
        CROP_PLACEHOLDER,
        catalog
            .crops()
            .iter()
            .map(|crop| SelectOption::new(crop.name.as_str(), crop.display_label())),
    )
}

fn with_placeholder(
    placeholder: &str,
    entries: impl Iterator<Item = SelectOption>,
) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(placeholder))
        .chain(entries)
        .collect()
}

#[cfg(test)]
#[path = "tests/selector_tests.rs"]
mod tests;
