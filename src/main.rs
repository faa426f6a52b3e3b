use crate::config::{Cli, Command, ServeArgs, TrainArgs};
use crate::dataset::{load_listings, save_listings, synthesize};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use anyhow::{anyhow, Context, Result};
use astra::Server;
use clap::Parser;
use dotenv::dotenv;
use std::net::ToSocketAddrs;
use tracing::{error, info};

mod config;
mod dataset;
mod domain;
mod errors;
mod ml;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

/// RUST_LOG wins over --log-level when set.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    // .env may carry HOST / PORT, so load it before clap reads the environment
    dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Command::Train(args) => run_train(&args),
        Command::Serve(args) => run_serve(args),
    };

    if let Err(e) = result {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run_train(args: &TrainArgs) -> Result<()> {
    let listings = match &args.input {
        Some(path) => {
            info!("Loading training data from {}", path.display());
            load_listings(path)?
        }
        None => {
            info!("Creating sample dataset ({} records)...", args.records);
            let rows = synthesize(&args.synth_config())?;
            save_listings(&args.data, &rows)?;
            rows
        }
    };

    for row in listings.iter().take(5) {
        info!(
            "  {} sqft, {} br, {} ba, {}, {} -> ${}",
            row.area, row.bedrooms, row.bathrooms, row.city, row.property_type, row.price
        );
    }

    let bundle = ml::train(&listings, &args.train_config()).context("model training failed")?;
    bundle.save(&args.model)?;

    info!(
        "Training complete: {} listings, train R² {:.4}, test R² {:.4}",
        listings.len(),
        bundle.train_score,
        bundle.test_score
    );
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    // No degraded mode: the server does not start without both artifacts
    let state = AppState::load(&args.data, &args.model).context("startup failed")?;

    let addr = (args.host.as_str(), args.port)
        .to_socket_addrs()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?
        .next()
        .ok_or_else(|| anyhow!("{}:{} resolved to no address", args.host, args.port))?;
    info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(args.workers);

    server
        .serve(move |req, _info| match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        })
        .context("server ended with error")?;

    info!("Server shut down cleanly.");
    Ok(())
}
