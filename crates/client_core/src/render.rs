//! Markup for the chip row and the itinerary output container.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use shared::{
    domain::InterestList,
    protocol::{AccommodationCard, ActivityCard, DayPlan, Itinerary},
};

pub const ITINERARY_HEADING: &str = "Your Custom Itinerary";
pub const API_ERROR_PREFIX: &str = "Error: ";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const MAP_SEARCH_BASE: &str = "https://www.google.com/maps/search/";
pub const MAP_QUERY_SEPARATOR: &str = ", ";

/// Same unreserved set as a browser's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// One chip with its removal control. The control carries the tag value.
pub fn render_interest_chip(tag: &str) -> String {
    let tag = escape_html(tag);
    format!("<span class=\"tag\">{tag} <span class=\"close\" data-interest=\"{tag}\">&times;</span></span>")
}

pub fn render_interest_chips(interests: &InterestList) -> Vec<String> {
    interests
        .iter()
        .map(|tag| render_interest_chip(tag.as_str()))
        .collect()
}

pub fn render_api_error(message: &str) -> String {
    format!(
        "<p class=\"error\">{API_ERROR_PREFIX}{}</p>",
        escape_html(message)
    )
}

pub fn render_unexpected_error() -> String {
    format!("<p class=\"error\">{UNEXPECTED_ERROR_MESSAGE}</p>")
}

/// Map search URL for `"<location>, <destination>"`, percent-encoded as a URI component.
pub fn map_search_link(location_name: &str, destination: &str) -> String {
    let query = format!("{location_name}{MAP_QUERY_SEPARATOR}{destination}");
    format!(
        "{MAP_SEARCH_BASE}?api=1&query={}",
        utf8_percent_encode(&query, URI_COMPONENT)
    )
}

pub fn render_itinerary(itinerary: &Itinerary) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(&format!("<h2>{ITINERARY_HEADING}</h2>"));

    if !itinerary.accommodation.is_empty() {
        html.push_str("<div class=\"accommodation-section\"><h3>Accommodation</h3>");
        for accommodation in &itinerary.accommodation {
            html.push_str(&render_accommodation_card(accommodation));
        }
        html.push_str("</div>");
    }

    for day_plan in &itinerary.itinerary {
        html.push_str(&render_day_plan(day_plan, &itinerary.destination));
    }

    html
}

fn render_accommodation_card(card: &AccommodationCard) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"accommodation-card\">");
    html.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\" class=\"accommodation-photo\">",
        escape_html(&card.photo),
        escape_html(&card.name)
    ));
    html.push_str("<div class=\"accommodation-details\">");
    html.push_str(&format!("<h4>{}</h4>", escape_html(&card.name)));
    html.push_str(&format!(
        "<p><strong>Type:</strong> {}</p>",
        escape_html(&card.kind)
    ));
    html.push_str(&format!(
        "<p><strong>Rating:</strong> <span class=\"rating\">{}</span></p>",
        escape_html(&card.rating)
    ));
    html.push_str(&format!(
        "<p><strong>Price Range:</strong> {}</p>",
        escape_html(&card.price_range)
    ));
    html.push_str(&format!(
        "<p><strong>Description:</strong> {}</p>",
        escape_html(&card.description)
    ));
    html.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" class=\"map-link\">Book Now</a>",
        escape_html(&card.booking_link)
    ));
    html.push_str("</div></div>");
    html
}

fn render_day_plan(day_plan: &DayPlan, destination: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"day-plan\"><h3>{} - {}</h3>",
        escape_html(&day_plan.day),
        escape_html(&day_plan.theme)
    ));
    for activity in &day_plan.activities {
        html.push_str(&render_activity_card(activity, destination));
    }
    html.push_str("</div>");
    html
}

fn render_activity_card(activity: &ActivityCard, destination: &str) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"activity-card\">");
    html.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\" class=\"activity-photo\">",
        escape_html(&activity.photo),
        escape_html(&activity.location_name)
    ));
    html.push_str("<div class=\"activity-details\">");
    html.push_str(&format!("<h4>{}</h4>", escape_html(&activity.location_name)));
    html.push_str(&format!(
        "<p><strong>Time:</strong> {}</p>",
        escape_html(&activity.time)
    ));
    html.push_str(&format!(
        "<p><strong>Description:</strong> {}</p>",
        escape_html(&activity.description)
    ));
    html.push_str("<div class=\"details-grid\">");
    html.push_str(&format!(
        "<p><strong>Category:</strong> {}</p>",
        escape_html(&activity.category)
    ));
    html.push_str(&format!(
        "<p><strong>Estimated Cost:</strong> {}</p>",
        escape_html(&activity.estimated_cost)
    ));
    html.push_str(&format!(
        "<p><strong>Travel Time:</strong> {}</p>",
        escape_html(&activity.travel_time)
    ));
    html.push_str("</div>");
    html.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" class=\"map-link\">View on Map</a>",
        escape_html(&map_search_link(&activity.location_name, destination))
    ));
    html.push_str("</div></div>");
    html
}
