use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    controller::events::CONFIRM_KEY, load_settings, FormController, FormEvent, FormField,
    MemoryPage, SubmitOutcome, TripPlannerClient,
};
use shared::error::ApiException;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Request a generated trip itinerary and write it as HTML")]
struct Args {
    /// Overrides the configured itinerary service URL.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    destination: String,
    #[arg(long)]
    days: String,
    #[arg(long, default_value = "")]
    travel_style: String,
    #[arg(long)]
    budget: Option<String>,
    /// May be repeated; duplicates are dropped.
    #[arg(long = "interest")]
    interests: Vec<String>,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let client = TripPlannerClient::from_settings(&settings);
    info!(endpoint = client.endpoint(), "using itinerary service");
    let page = MemoryPage::new(&settings.budget_tiers);
    let mut controller = FormController::new(client, page, &settings);

    if let Some(budget) = args.budget {
        controller.dispatch(FormEvent::BudgetClicked(budget)).await;
    }
    for interest in args.interests {
        controller
            .page_mut()
            .set_field(FormField::InterestInput, interest);
        controller
            .dispatch(FormEvent::InterestKey(CONFIRM_KEY.to_string()))
            .await;
    }

    let page = controller.page_mut();
    page.set_field(FormField::Destination, args.destination);
    page.set_field(FormField::Days, args.days);
    page.set_field(FormField::TravelStyle, args.travel_style);
    debug!(request = ?controller.trip_request(), "form filled");

    let outcome = controller
        .dispatch(FormEvent::Submit)
        .await
        .context("submit produced no outcome")?;

    let markup = controller.page().output();
    match &args.output {
        Some(path) => fs::write(path, markup)
            .with_context(|| format!("failed to write itinerary to '{}'", path.display()))?,
        None => println!("{markup}"),
    }

    match outcome {
        SubmitOutcome::Rendered(summary) => {
            info!(
                days = summary.days,
                activities = summary.activities,
                accommodations = summary.accommodations,
                "itinerary written"
            );
            Ok(())
        }
        SubmitOutcome::ApiError(message) => Err(ApiException::new(message).into()),
        SubmitOutcome::Failed => bail!("itinerary request failed; see log for the cause"),
    }
}
