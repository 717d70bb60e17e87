use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::render::{render_api_error, render_itinerary};
use shared::{
    domain::{BudgetTag, InterestList, SelectionState},
    protocol::{ItineraryResponse, TripRequest},
};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved `/generate` response body as itinerary HTML.
    Render {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the request body the trip form would send.
    RequestBody {
        #[arg(long)]
        destination: String,
        #[arg(long)]
        days: String,
        #[arg(long, default_value = "")]
        travel_style: String,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long = "interest")]
        interests: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render { input } => {
            let raw = fs::read_to_string(&input)
                .with_context(|| format!("failed to read '{}'", input.display()))?;
            let markup = match ItineraryResponse::from_json_str(&raw)
                .with_context(|| format!("'{}' is not a usable itinerary response", input.display()))?
            {
                ItineraryResponse::Error(api_error) => render_api_error(api_error.message()),
                ItineraryResponse::Itinerary(itinerary) => render_itinerary(&itinerary),
            };
            println!("{markup}");
        }
        Command::RequestBody {
            destination,
            days,
            travel_style,
            budget,
            interests,
        } => {
            let selection = SelectionState {
                selected_budget: budget.as_deref().map(BudgetTag::from),
                interests: interests.iter().map(String::as_str).collect::<InterestList>(),
            };
            let request = TripRequest::from_form(&selection, &destination, &days, &travel_style);
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }

    Ok(())
}
