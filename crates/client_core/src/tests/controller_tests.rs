use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{json, Value};

use super::*;
use crate::{page::MemoryPage, tests::spawn_generate_server, SubmitError, TripPlannerClient};

struct ScriptedApi {
    reply: Mutex<Option<Result<ItineraryResponse, SubmitError>>>,
    requests: Mutex<Vec<TripRequest>>,
}

impl ScriptedApi {
    fn replying(reply: Result<ItineraryResponse, SubmitError>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn with_body(body: Value) -> Self {
        Self::replying(Ok(ItineraryResponse::from_value(body).expect("valid body")))
    }

    fn failing() -> Self {
        Self::replying(Err(decode_error()))
    }

    fn requests(&self) -> Vec<TripRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn decode_error() -> SubmitError {
    SubmitError::Decode(serde_json::from_str::<Value>("<html>").expect_err("invalid json"))
}

#[async_trait]
impl ItineraryApi for ScriptedApi {
    async fn generate(&self, request: &TripRequest) -> Result<ItineraryResponse, SubmitError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.reply
            .lock()
            .expect("reply lock")
            .take()
            .unwrap_or_else(|| Err(decode_error()))
    }
}

struct PendingApi;

#[async_trait]
impl ItineraryApi for PendingApi {
    async fn generate(&self, _request: &TripRequest) -> Result<ItineraryResponse, SubmitError> {
        std::future::pending().await
    }
}

/// Memory page that also records the order of loading, submit and output calls.
struct RecordingPage {
    inner: MemoryPage,
    log: Vec<String>,
}

impl RecordingPage {
    fn new(settings: &Settings) -> Self {
        Self {
            inner: MemoryPage::new(&settings.budget_tiers),
            log: Vec::new(),
        }
    }
}

impl Page for RecordingPage {
    fn set_budget_selected(&mut self, tag: &str, selected: bool) {
        self.inner.set_budget_selected(tag, selected);
    }

    fn field_value(&self, field: FormField) -> String {
        self.inner.field_value(field)
    }

    fn clear_interest_input(&mut self) {
        self.inner.clear_interest_input();
    }

    fn replace_interest_chips(&mut self, chips: &[String]) {
        self.inner.replace_interest_chips(chips);
    }

    fn show_loading(&mut self) {
        self.log.push("show_loading".into());
        self.inner.show_loading();
    }

    fn hide_loading(&mut self) {
        self.log.push("hide_loading".into());
        self.inner.hide_loading();
    }

    fn set_output(&mut self, markup: String) {
        self.log.push(if markup.is_empty() {
            "clear_output".into()
        } else {
            "set_output".into()
        });
        self.inner.set_output(markup);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.log.push(format!("submit_enabled={enabled}"));
        self.inner.set_submit_enabled(enabled);
    }
}

fn controller<A: ItineraryApi>(api: A) -> FormController<A, MemoryPage> {
    let settings = Settings::default();
    let page = MemoryPage::new(&settings.budget_tiers);
    FormController::new(api, page, &settings)
}

fn fill_trip_fields(page: &mut MemoryPage, destination: &str, days: &str, travel_style: &str) {
    page.set_field(FormField::Destination, destination);
    page.set_field(FormField::Days, days);
    page.set_field(FormField::TravelStyle, travel_style);
}

fn type_interest<A: ItineraryApi>(
    controller: &mut FormController<A, MemoryPage>,
    text: &str,
) -> bool {
    controller
        .page_mut()
        .set_field(FormField::InterestInput, text);
    controller.on_interest_key(CONFIRM_KEY)
}

fn one_stay_two_activities() -> Value {
    json!({
        "destination": "Lisbon",
        "accommodation": [{
            "name": "Casa Azul",
            "type": "Guesthouse",
            "rating": "4.6/5",
            "price_range": "$80-$120",
            "description": "Near the river",
            "photo": "https://img.example/casa.jpg",
            "booking_link": "https://book.example/casa"
        }],
        "itinerary": [{
            "day": "Day 1",
            "theme": "Old Town",
            "activities": [
                { "location_name": "Belem Tower", "time": "09:00" },
                { "location_name": "Time Out Market", "time": "13:00" }
            ]
        }]
    })
}

#[test]
fn budget_click_leaves_exactly_the_last_clicked_selected() {
    let mut controller = controller(ScriptedApi::failing());

    controller.on_budget_click("low");
    controller.on_budget_click("high");
    controller.on_budget_click("medium");

    assert_eq!(controller.page().selected_budgets(), vec!["medium"]);
    assert_eq!(controller.selection().budget_or_empty(), "medium");
}

#[test]
fn unknown_budget_tag_is_recorded_and_cleared_by_next_click() {
    let mut controller = controller(ScriptedApi::failing());

    controller.on_budget_click("shoestring");
    assert_eq!(controller.page().selected_budgets(), vec!["shoestring"]);
    assert_eq!(controller.selection().budget_or_empty(), "shoestring");

    controller.on_budget_click("low");
    assert_eq!(controller.page().selected_budgets(), vec!["low"]);
}

#[test]
fn confirming_the_same_interest_twice_keeps_one_chip() {
    let mut controller = controller(ScriptedApi::failing());

    assert!(type_interest(&mut controller, "food"));
    assert!(type_interest(&mut controller, "  art "));
    assert!(!type_interest(&mut controller, "food"));

    assert_eq!(controller.selection().interests.joined(), "food, art");
    assert_eq!(controller.page().chips().len(), 2);
    assert_eq!(
        controller.page().chip_row().last(),
        Some(&crate::page::ChipRowItem::Input)
    );
    assert_eq!(controller.page().field_value(FormField::InterestInput), "");
}

#[test]
fn other_keys_and_blank_input_leave_state_untouched() {
    let mut controller = controller(ScriptedApi::failing());

    controller
        .page_mut()
        .set_field(FormField::InterestInput, "museums");
    assert!(!controller.on_interest_key("Tab"));
    assert_eq!(
        controller.page().field_value(FormField::InterestInput),
        "museums"
    );

    controller
        .page_mut()
        .set_field(FormField::InterestInput, "   ");
    assert!(!controller.on_interest_key(CONFIRM_KEY));
    assert_eq!(controller.page().field_value(FormField::InterestInput), "   ");
    assert!(controller.selection().interests.is_empty());
}

#[test]
fn removing_chips_drops_only_the_matching_tag() {
    let mut controller = controller(ScriptedApi::failing());
    for tag in ["food", "art", "music"] {
        type_interest(&mut controller, tag);
    }

    assert!(!controller.on_chip_remove("theatre"));
    assert_eq!(controller.selection().interests.joined(), "food, art, music");
    assert_eq!(controller.page().chips().len(), 3);

    assert!(controller.on_chip_remove("art"));
    assert_eq!(controller.selection().interests.joined(), "food, music");
    let chips = controller.page().chips();
    assert_eq!(chips.len(), 2);
    assert!(chips[0].contains("data-interest=\"food\""));
    assert!(chips[1].contains("data-interest=\"music\""));
}

#[tokio::test]
async fn submit_sends_request_built_from_selection_and_fields() {
    let mut controller = controller(ScriptedApi::with_body(one_stay_two_activities()));
    controller.on_budget_click("mid");
    type_interest(&mut controller, "food");
    type_interest(&mut controller, "art");
    fill_trip_fields(controller.page_mut(), "Lisbon", "3", "relaxed");

    let previewed = controller.trip_request();
    assert!(controller.api().requests().is_empty());

    controller.submit().await;

    assert_eq!(
        controller.api().requests(),
        vec![TripRequest {
            budget: "mid".into(),
            interests: "food, art".into(),
            travel_style: "relaxed".into(),
            days: Some(3),
            destination: "Lisbon".into(),
        }]
    );
    assert_eq!(controller.api().requests(), vec![previewed]);
}

#[tokio::test]
async fn api_error_renders_one_inline_error_and_no_sections() {
    let mut controller = controller(ScriptedApi::with_body(json!({ "error": "Invalid destination" })));
    fill_trip_fields(controller.page_mut(), "Atlantis", "2", "relaxed");

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::ApiError("Invalid destination".into()));
    let output = controller.page().output();
    assert_eq!(output, "<p class=\"error\">Error: Invalid destination</p>");
    assert_eq!(output.matches("class=\"error\"").count(), 1);
    assert!(!output.contains("day-plan"));
    assert!(!controller.page().loading_visible());
    assert_eq!(controller.page().loading_hide_count(), 1);
}

#[tokio::test]
async fn itinerary_renders_cards_and_map_links() {
    let mut controller = controller(ScriptedApi::with_body(one_stay_two_activities()));
    fill_trip_fields(controller.page_mut(), "Lisbon", "1", "relaxed");

    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rendered(RenderSummary {
            accommodations: 1,
            days: 1,
            activities: 2,
        })
    );
    let output = controller.page().output();
    assert_eq!(output.matches("class=\"accommodation-card\"").count(), 1);
    assert_eq!(output.matches("class=\"day-plan\"").count(), 1);
    assert_eq!(output.matches("class=\"activity-card\"").count(), 2);
    assert!(output.contains("query=Belem%20Tower%2C%20Lisbon"));
    assert!(output.contains("query=Time%20Out%20Market%2C%20Lisbon"));
}

#[tokio::test]
async fn transport_failure_shows_generic_message() {
    let mut controller = controller(ScriptedApi::failing());

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(
        controller.page().output(),
        "<p class=\"error\">An unexpected error occurred. Please try again.</p>"
    );
    assert_eq!(controller.page().loading_hide_count(), 1);
}

#[tokio::test]
async fn each_submission_replaces_previous_output() {
    let mut controller = controller(ScriptedApi::with_body(one_stay_two_activities()));
    controller.submit().await;
    assert!(controller.page().output().contains("activity-card"));

    // The scripted reply is consumed, so the second submission fails.
    controller.submit().await;
    let output = controller.page().output();
    assert!(!output.contains("activity-card"));
    assert!(output.contains(crate::render::UNEXPECTED_ERROR_MESSAGE));
}

#[tokio::test]
async fn loading_is_hidden_once_as_the_final_step_on_every_path() {
    let replies = [
        ScriptedApi::with_body(one_stay_two_activities()),
        ScriptedApi::with_body(json!({ "error": "Invalid destination" })),
        ScriptedApi::failing(),
    ];

    for api in replies {
        let settings = Settings::default();
        let page = RecordingPage::new(&settings);
        let mut controller = FormController::new(api, page, &settings);

        controller.submit().await;

        let page = controller.into_page();
        assert_eq!(
            page.log,
            vec![
                "show_loading",
                "submit_enabled=false",
                "clear_output",
                "set_output",
                "submit_enabled=true",
                "hide_loading",
            ]
        );
        assert_eq!(page.inner.loading_show_count(), 1);
        assert_eq!(page.inner.loading_hide_count(), 1);
        assert!(page.inner.submit_enabled());
    }
}

#[tokio::test]
async fn overlapping_submissions_setting_leaves_submit_control_alone() {
    let settings = Settings {
        allow_overlapping_submissions: true,
        ..Settings::default()
    };
    let page = RecordingPage::new(&settings);
    let mut controller = FormController::new(ScriptedApi::failing(), page, &settings);

    controller.submit().await;

    let page = controller.into_page();
    assert!(!page.log.iter().any(|entry| entry.starts_with("submit_enabled")));
    assert_eq!(page.log.last().map(String::as_str), Some("hide_loading"));
}

#[tokio::test]
async fn dropped_submission_still_hides_loading() {
    let mut controller = controller(PendingApi);

    let timed_out = tokio::time::timeout(Duration::from_millis(20), controller.submit()).await;

    assert!(timed_out.is_err());
    assert!(!controller.page().loading_visible());
    assert_eq!(controller.page().loading_show_count(), 1);
    assert_eq!(controller.page().loading_hide_count(), 1);
    assert!(controller.page().submit_enabled());
}

#[tokio::test]
async fn dispatch_drives_full_flow_against_http_service() {
    let (server_url, captured_rx) = spawn_generate_server(
        "/generate",
        StatusCode::OK,
        one_stay_two_activities().to_string(),
    )
    .await
    .expect("spawn server");
    let settings = Settings {
        server_url,
        ..Settings::default()
    };
    let client = TripPlannerClient::from_settings(&settings);
    let mut controller =
        FormController::new(client, MemoryPage::new(&settings.budget_tiers), &settings);

    assert_eq!(
        controller
            .dispatch(FormEvent::BudgetClicked("high".into()))
            .await,
        None
    );
    controller
        .page_mut()
        .set_field(FormField::InterestInput, "seafood");
    controller
        .dispatch(FormEvent::InterestKey(CONFIRM_KEY.into()))
        .await;
    fill_trip_fields(controller.page_mut(), "Lisbon", "2 days", "adventurous");

    let outcome = controller.dispatch(FormEvent::Submit).await;

    assert!(outcome.is_some_and(|outcome| outcome.is_rendered()));
    let captured = captured_rx.await.expect("captured request");
    assert_eq!(
        captured.body,
        json!({
            "budget": "high",
            "interests": "seafood",
            "travel_style": "adventurous",
            "days": 2,
            "destination": "Lisbon"
        })
    );
    assert_eq!(controller.page().loading_hide_count(), 1);
}
