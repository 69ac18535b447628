use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::cli::search::truncate_string;
use crate::core::types::{SearchKind, Suggestion};
use crate::services::SimpleServices;

#[derive(Args)]
pub struct SuggestArgs {
    /// Query prefix to complete (prefixes shorter than 2 characters return nothing)
    #[arg(value_name = "PREFIX")]
    prefix: String,

    /// What the prefix describes
    #[arg(short, long, value_enum, default_value = "song")]
    kind: SearchKind,

    /// Output format (table, json)
    #[arg(long, default_value = "table")]
    format: String,
}

pub async fn execute(args: SuggestArgs, services: &SimpleServices) -> Result<()> {
    let client = services.create_search_client();

    let outcome = client.suggest_outcome(&args.prefix, args.kind).await;
    if let Some(reason) = outcome.degrade_reason() {
        println!("⚠️  Live suggestions unavailable ({}), showing catalog matches", reason.as_str());
    }

    let suggestions = outcome.into_records();

    if suggestions.is_empty() {
        info!("No suggestions for '{}'", args.prefix);
        return Ok(());
    }

    match args.format.as_str() {
        "json" => output_json(&suggestions)?,
        _ => output_table(&suggestions),
    }

    Ok(())
}

fn output_json(suggestions: &[Suggestion]) -> Result<()> {
    let json = serde_json::to_string_pretty(suggestions)?;
    println!("{}", json);
    Ok(())
}

fn output_table(suggestions: &[Suggestion]) {
    println!();
    println!("┌────┬─────────────────────────┬───────────────────────────────────┬──────────┐");
    println!("│ #  │ Value                   │ Label                             │ Source   │");
    println!("├────┼─────────────────────────┼───────────────────────────────────┼──────────┤");

    for (i, suggestion) in suggestions.iter().enumerate() {
        println!(
            "│{:>3} │ {} │ {} │ {} │",
            i + 1,
            truncate_string(&suggestion.value, 23),
            truncate_string(&suggestion.label, 33),
            truncate_string(suggestion.source.as_str(), 8),
        );
    }

    println!("└────┴─────────────────────────┴───────────────────────────────────┴──────────┘");
}
