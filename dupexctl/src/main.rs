use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dupex_client::{ClientConfig, ServerClient};
use dupex_core::{ByteSize, ReviewController, ReviewOptions, SweepOutcome};
use dupex_model::ListingKind;

#[derive(Parser)]
#[command(name = "dupexctl", about = "Review and sweep duplicate media")]
struct Cli {
    /// Server base URL, overriding the saved config
    #[arg(long, global = true)]
    server: Option<String>,
    /// API bearer token, overriding the saved config
    #[arg(long, global = true)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a listing with keep/delete markers
    List {
        #[arg(long, value_enum, default_value = "duplicate")]
        listing: ListingArg,
    },
    /// Delete everything the default selection marks
    Sweep {
        #[arg(long, value_enum, default_value = "duplicate")]
        listing: ListingArg,
        /// Actually delete; without this the sweep is a dry run
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListingArg {
    Duplicate,
    Sample,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let client = Arc::new(build_client(cli.server, cli.token)?);
    // No point in the interactive settle delay when each invocation is
    // one-shot; refresh immediately after a clean sweep.
    let mut controller = ReviewController::with_options(
        client.clone(),
        client,
        ReviewOptions {
            refresh_delay: Duration::ZERO,
        },
    );

    match cli.command {
        Command::List { listing } => {
            controller
                .set_listing(listing.into())
                .await
                .context("loading listing")?;
            print_listing(&controller);
        }
        Command::Sweep { listing, yes } => {
            controller
                .set_listing(listing.into())
                .await
                .context("loading listing")?;

            let summary = controller.summary();
            if summary.num_selected == 0 {
                println!(
                    "Nothing to sweep in the {} listing.",
                    summary.listing.label()
                );
                return Ok(());
            }

            if !yes {
                print_listing(&controller);
                println!();
                println!(
                    "Dry run: {} variants ({}) would be deleted. Pass --yes to sweep.",
                    summary.num_selected, summary.total_size_display
                );
                return Ok(());
            }

            let outcome = controller
                .delete_selected()
                .await
                .context("sweeping selected variants")?;
            print_sweep_outcome(&outcome);

            if outcome.all_succeeded() {
                println!(
                    "Listing refreshed: {} movies remain under review.",
                    controller.movies().len()
                );
            }
        }
    }

    Ok(())
}

fn build_client(
    server: Option<String>,
    token: Option<String>,
) -> Result<ServerClient> {
    let mut config = ClientConfig::load();
    if let Some(server) = server {
        config.server_url = server;
    }
    if let Some(token) = token {
        config.api_token = Some(token);
    }

    ServerClient::from_config(&config).context("building server client")
}

fn print_listing(controller: &ReviewController) {
    let summary = controller.summary();
    println!(
        "{} listing: {} movies, {} variants selected ({} reclaimable)",
        summary.listing.label(),
        summary.num_movies,
        summary.num_selected,
        summary.total_size_display,
    );

    for movie in controller.movies().movies() {
        println!();
        match movie.year {
            Some(year) => println!("{} ({year}) [{}]", movie.title, movie.key),
            None => println!("{} [{}]", movie.title, movie.key),
        }

        for variant in &movie.media {
            let marker = if controller.deleted().contains(variant.id) {
                "gone  "
            } else if controller.selected().contains(variant.id) {
                "delete"
            } else {
                "keep  "
            };
            let resolution = match variant.resolution() {
                Some((w, h)) => format!("{w}x{h}"),
                None => "unprobed".to_string(),
            };
            let path = variant
                .parts
                .first()
                .map(|part| part.path.display().to_string())
                .unwrap_or_else(|| "(no file)".to_string());
            let more_parts = if variant.parts.len() > 1 {
                format!(" (+{} parts)", variant.parts.len() - 1)
            } else {
                String::new()
            };

            println!(
                "  {marker}  #{} {} {} {} {}{}",
                variant.id,
                resolution,
                variant.video_codec.as_deref().unwrap_or("-"),
                ByteSize::from_bytes(variant.total_size()),
                path,
                more_parts,
            );
        }
    }
}

fn print_sweep_outcome(outcome: &SweepOutcome) {
    println!(
        "Sweep complete: {} deleted, {} failed, {} reclaimed",
        outcome.deleted.len(),
        outcome.failed.len(),
        ByteSize::from_bytes(outcome.reclaimed_bytes()),
    );
    for failure in &outcome.failed {
        println!(
            "  still selected: variant {} of {}: {}",
            failure.variant, failure.movie, failure.error
        );
    }
}

impl From<ListingArg> for ListingKind {
    fn from(val: ListingArg) -> Self {
        match val {
            ListingArg::Duplicate => ListingKind::Duplicates,
            ListingArg::Sample => ListingKind::Samples,
        }
    }
}
