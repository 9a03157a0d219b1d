//! Saltra dashboard CLI
//!
//! Usage:
//!     saltra leads --status qualified --limit 20
//!     saltra lead 64c8e71f9b1a8f0012d4f8c9 --check
//!     saltra --api-url https://crm.example.com/api/v1 overview

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use saltra::leads::{validate_lead, LeadSource, LeadStatus};
use saltra::{ApiClient, Config, LeadQuery};

#[derive(Parser, Debug)]
#[command(name = "saltra", about = "Leads dashboard client for the Saltra backend")]
struct Args {
    /// Backend base URL (overrides SALTRA_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline dashboard numbers
    Stats,
    /// List leads, optionally filtered
    Leads {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, value_parser = parse_wire::<LeadStatus>)]
        status: Option<LeadStatus>,
        #[arg(long, value_parser = parse_wire::<LeadSource>)]
        source: Option<LeadSource>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// One lead with its interaction history
    Lead {
        id: String,
        /// Also run the lead field constraints against the record
        #[arg(long)]
        check: bool,
    },
    /// Score distribution, source breakdown and conversion rates
    Analytics,
    /// Signed-in user's profile
    Profile,
    /// Stats and the lead list side by side, with leads grouped by category
    Overview,
}

/// Parses a CLI value using the same names the backend puts on the wire.
fn parse_wire<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(json!(raw)).map_err(|e| format!("'{raw}': {e}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{text}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env_with_api_url(args.api_url.as_deref())?;

    // Logs go to stderr; stdout carries only JSON output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Saltra client v{} -> {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let client = ApiClient::from_config(&config)?;

    match args.command {
        Command::Stats => print_json(&client.dashboard_stats().await?)?,
        Command::Leads {
            skip,
            limit,
            status,
            source,
            company,
            email,
        } => {
            let query = LeadQuery {
                skip,
                limit,
                status,
                source,
                company,
                email,
                ..Default::default()
            };
            print_json(&client.leads_page(&query).await?)?;
        }
        Command::Lead { id, check } => {
            let lead = client.lead_details(&id).await?;
            if check {
                print_json(&json!({
                    "lead": lead,
                    "validation": validate_lead(&lead.base),
                }))?;
            } else {
                print_json(&lead)?;
            }
        }
        Command::Analytics => print_json(&client.analytics().await?)?,
        Command::Profile => print_json(&client.user_profile().await?)?,
        Command::Overview => {
            let (stats, leads) = tokio::join!(client.dashboard_stats(), client.all_leads());
            let (stats, leads) = (stats?, leads?);

            let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
            for lead in &leads {
                *by_category
                    .entry(lead.display_category().as_str().to_string())
                    .or_default() += 1;
            }

            print_json(&json!({
                "stats": stats,
                "lead_count": leads.len(),
                "by_category": by_category,
            }))?;
        }
    }

    Ok(())
}
