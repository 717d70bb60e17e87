//! Form controller: selection state, UI event handlers and the submit flow.

pub mod events;
pub mod loading;

use shared::{
    domain::{BudgetTag, SelectionState},
    protocol::{Itinerary, ItineraryResponse, TripRequest},
};
use tracing::{debug, error, info, warn};

use crate::{
    config::Settings,
    page::{FormField, Page},
    render::{render_api_error, render_interest_chips, render_itinerary, render_unexpected_error},
    ItineraryApi,
};
use events::{FormEvent, RenderSummary, SubmitOutcome, CONFIRM_KEY};
use loading::LoadingGuard;

pub struct FormController<A, P> {
    api: A,
    page: P,
    selection: SelectionState,
    budget_tiers: Vec<String>,
    allow_overlapping_submissions: bool,
}

impl<A: ItineraryApi, P: Page> FormController<A, P> {
    pub fn new(api: A, page: P, settings: &Settings) -> Self {
        Self {
            api,
            page,
            selection: SelectionState::default(),
            budget_tiers: settings.budget_tiers.clone(),
            allow_overlapping_submissions: settings.allow_overlapping_submissions,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    /// Routes one UI event. Only `Submit` produces an outcome.
    pub async fn dispatch(&mut self, event: FormEvent) -> Option<SubmitOutcome> {
        debug!(event = event.name(), "form event");
        match event {
            FormEvent::BudgetClicked(tag) => {
                self.on_budget_click(&tag);
                None
            }
            FormEvent::InterestKey(key) => {
                self.on_interest_key(&key);
                None
            }
            FormEvent::ChipRemoveClicked(tag) => {
                self.on_chip_remove(&tag);
                None
            }
            FormEvent::Submit => Some(self.submit().await),
        }
    }

    pub fn on_budget_click(&mut self, tag: &str) {
        let known = self.budget_tiers.iter().any(|tier| tier == tag);
        if !known {
            warn!(budget = tag, "budget tag is not one of the configured tiers");
        }

        if let Some(previous) = self.selection.selected_budget.take() {
            if !self.budget_tiers.iter().any(|tier| tier == previous.as_str()) {
                self.page.set_budget_selected(previous.as_str(), false);
            }
        }
        for tier in &self.budget_tiers {
            self.page.set_budget_selected(tier, tier == tag);
        }
        if !known {
            self.page.set_budget_selected(tag, true);
        }

        self.selection.selected_budget = Some(BudgetTag::from(tag));
    }

    /// Returns whether a new tag was appended.
    pub fn on_interest_key(&mut self, key: &str) -> bool {
        if key != CONFIRM_KEY {
            return false;
        }
        let raw = self.page.field_value(FormField::InterestInput);
        if raw.trim().is_empty() {
            return false;
        }

        let added = self.selection.interests.insert(&raw);
        if added {
            debug!(interest = raw.trim(), total = self.selection.interests.len(), "interest added");
            self.render_interests();
        }
        self.page.clear_interest_input();
        added
    }

    /// Returns whether a tag was removed.
    pub fn on_chip_remove(&mut self, tag: &str) -> bool {
        let removed = self.selection.interests.remove(tag);
        if removed {
            debug!(interest = tag, "interest removed");
        }
        self.render_interests();
        removed
    }

    fn render_interests(&mut self) {
        let chips = render_interest_chips(&self.selection.interests);
        self.page.replace_interest_chips(&chips);
    }

    /// The request the form would send right now.
    pub fn trip_request(&self) -> TripRequest {
        build_request(&self.selection, &self.page)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let mut page = LoadingGuard::engage(&mut self.page, !self.allow_overlapping_submissions);
        page.set_output(String::new());

        let request = build_request(&self.selection, &*page);
        info!(
            destination = %request.destination,
            days = ?request.days,
            budget = %request.budget,
            "submitting trip request"
        );

        match self.api.generate(&request).await {
            Ok(ItineraryResponse::Error(api_error)) => {
                warn!(error = api_error.message(), "itinerary service reported an error");
                page.set_output(render_api_error(api_error.message()));
                SubmitOutcome::ApiError(api_error.error)
            }
            Ok(ItineraryResponse::Itinerary(itinerary)) => {
                let summary = summarize(&itinerary);
                page.set_output(render_itinerary(&itinerary));
                info!(
                    days = summary.days,
                    activities = summary.activities,
                    accommodations = summary.accommodations,
                    "itinerary rendered"
                );
                SubmitOutcome::Rendered(summary)
            }
            Err(err) => {
                error!(error = %err, "itinerary request failed");
                page.set_output(render_unexpected_error());
                SubmitOutcome::Failed
            }
        }
    }
}

fn build_request<P: Page>(selection: &SelectionState, page: &P) -> TripRequest {
    TripRequest::from_form(
        selection,
        &page.field_value(FormField::Destination),
        &page.field_value(FormField::Days),
        &page.field_value(FormField::TravelStyle),
    )
}

fn summarize(itinerary: &Itinerary) -> RenderSummary {
    RenderSummary {
        accommodations: itinerary.accommodation.len(),
        days: itinerary.itinerary.len(),
        activities: itinerary
            .itinerary
            .iter()
            .map(|day| day.activities.len())
            .sum(),
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
