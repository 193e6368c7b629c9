//! Airtable field inspector
//!
//! Fetches one table and prints:
//! - the full JSON response, pretty-printed
//! - every unique field name found across its records
//!
//! Credentials and the target table come from environment variables
//! (see `client.rs`). Diagnostics go to stderr so stdout stays clean.

mod client;

use anyhow::{Context, Result};
use client::{record_count, unique_field_names, AirtableClient, Target};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = AirtableClient::from_env()?;
    let target = Target::from_env()?;

    let response = client.list_records(&target).await?;

    println!("Full JSON response:");
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to format response")?
    );

    if record_count(&response) == 0 {
        println!("\nNo records found.");
        return Ok(());
    }

    println!("\nUnique field names found:");
    for name in unique_field_names(&response) {
        println!(" - {}", name);
    }

    Ok(())
}
