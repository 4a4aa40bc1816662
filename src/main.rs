mod args;

use args::{Args, Report};
use clap::Parser;
use match_stats::{AggregationConfig, ArchiveSnapshot, StatsError, StatsService};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("match_stats={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(args).await {
        error!(%err, "Report failed");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), StatsError> {
    let mut config = AggregationConfig::from_env()?;
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let stores = ArchiveSnapshot::load(&args.archive).await?;
    let service = StatsService::builder(Arc::new(stores.identities), Arc::new(stores.matches))
        .with_champion_catalog(Arc::new(stores.champions))
        .with_config(config)
        .build()?;

    info!(archive = %args.archive.display(), season = args.season, "Starting report");

    match args.report {
        Report::Players => {
            let stats = service.get_player_stats(args.season).await?;
            let report: Vec<_> = stats
                .iter()
                .map(|player| json!({ "totals": player, "summary": player.summary() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Report::Records => {
            let records = service.get_records(args.season).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Report::ChampionImage { id, output } => {
            let image = service.champion_image(id).await?;
            tokio::fs::write(&output, &image).await?;
            info!(
                champion_id = id,
                bytes = image.len(),
                output = %output.display(),
                "Wrote champion image"
            );
        }
    }

    Ok(())
}
