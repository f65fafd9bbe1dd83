use dispatch_lib::config::lib::load_from_source;
use dispatch_lib::config::source::ConfigSource;
use dispatch_lib::dispatch::{CandidateResult, DispatchOutcome, Dispatcher};
use dispatch_lib::extraction::client::HttpExtractionClient;
use dispatch_lib::registry::FunctionRegistry;
use std::sync::Arc;
use tracing::{Level, error, info};

const DEMO_UTTERANCES: &[&str] = &[
    "add 3 and 4",
    "subtract 5 from 10",
    "multiply 2 and 3",
    "divide 10 by 2",
];

fn print_outcome(outcome: &DispatchOutcome) {
    println!("> {}", outcome.text);
    if let Some(err) = &outcome.selection_error {
        println!("  {err}");
    } else if outcome.is_unrecognized() {
        println!("  No function recognized");
    }
    for result in &outcome.results {
        match result {
            CandidateResult::Invoked { function, value } => {
                println!("  Result of {function}: {value}");
            }
            CandidateResult::Failed { error, .. } => println!("  {error}"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting function dispatcher...");

    let source = ConfigSource::from_env();
    let config = load_from_source(&source).map_err(|e| {
        error!("Configuration from {:?} is unusable: {}. Halting.", source, e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    let registry = Arc::new(
        FunctionRegistry::from_config(&config.registry)
            .map_err(|e| anyhow::anyhow!("Failed to build function registry: {}", e))?,
    );
    info!("Registered functions: {}", registry.names().join(", "));

    let client = Arc::new(
        HttpExtractionClient::from_config(&config.extractor)
            .map_err(|e| anyhow::anyhow!("Failed to create extraction client: {}", e))?,
    );
    info!("Using extraction service at {}", client.base_url());

    let dispatcher = Dispatcher::with_client(registry, client, config.selection.clone());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let utterances: Vec<String> = if !args.is_empty() {
        args
    } else if !config.utterances.is_empty() {
        config.utterances.clone()
    } else {
        DEMO_UTTERANCES.iter().map(|s| s.to_string()).collect()
    };

    for outcome in dispatcher.dispatch_all(&utterances).await {
        print_outcome(&outcome);
        println!();
    }

    Ok(())
}
