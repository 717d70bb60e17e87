//! Page-surface capabilities the form controller drives, plus an in-memory page.

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Destination,
    Days,
    TravelStyle,
    InterestInput,
}

pub trait Page {
    fn set_budget_selected(&mut self, tag: &str, selected: bool);
    fn field_value(&self, field: FormField) -> String;
    fn clear_interest_input(&mut self);
    /// Drops every rendered chip and inserts `chips` ahead of the live input.
    fn replace_interest_chips(&mut self, chips: &[String]);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    /// Replaces the output container contents wholesale.
    fn set_output(&mut self, markup: String);
    fn set_submit_enabled(&mut self, enabled: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipRowItem {
    Chip(String),
    Input,
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    budget_buttons: BTreeMap<String, bool>,
    fields: HashMap<FormField, String>,
    chip_row: Vec<ChipRowItem>,
    loading_visible: bool,
    loading_shown: usize,
    loading_hidden: usize,
    output: String,
    submit_enabled: bool,
}

impl MemoryPage {
    pub fn new<I, S>(budget_tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            budget_buttons: budget_tiers
                .into_iter()
                .map(|tier| (tier.as_ref().to_string(), false))
                .collect(),
            fields: HashMap::new(),
            chip_row: vec![ChipRowItem::Input],
            loading_visible: false,
            loading_shown: 0,
            loading_hidden: 0,
            output: String::new(),
            submit_enabled: true,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn selected_budgets(&self) -> Vec<&str> {
        self.budget_buttons
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(tag, _)| tag.as_str())
            .collect()
    }

    pub fn chip_row(&self) -> &[ChipRowItem] {
        &self.chip_row
    }

    pub fn chips(&self) -> Vec<&str> {
        self.chip_row
            .iter()
            .filter_map(|item| match item {
                ChipRowItem::Chip(markup) => Some(markup.as_str()),
                ChipRowItem::Input => None,
            })
            .collect()
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn loading_show_count(&self) -> usize {
        self.loading_shown
    }

    pub fn loading_hide_count(&self) -> usize {
        self.loading_hidden
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }
}

impl Page for MemoryPage {
    fn set_budget_selected(&mut self, tag: &str, selected: bool) {
        self.budget_buttons.insert(tag.to_string(), selected);
    }

    fn field_value(&self, field: FormField) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn clear_interest_input(&mut self) {
        self.fields.insert(FormField::InterestInput, String::new());
    }

    fn replace_interest_chips(&mut self, chips: &[String]) {
        self.chip_row.retain(|item| matches!(item, ChipRowItem::Input));
        let input_at = self
            .chip_row
            .iter()
            .position(|item| matches!(item, ChipRowItem::Input))
            .unwrap_or(self.chip_row.len());
        self.chip_row.splice(
            input_at..input_at,
            chips.iter().cloned().map(ChipRowItem::Chip),
        );
    }

    fn show_loading(&mut self) {
        self.loading_visible = true;
        self.loading_shown += 1;
    }

    fn hide_loading(&mut self) {
        self.loading_visible = false;
        self.loading_hidden += 1;
    }

    fn set_output(&mut self, markup: String) {
        self.output = markup;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}
