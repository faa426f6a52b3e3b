// src/config.rs

use crate::dataset::SynthConfig;
use crate::ml::{ForestConfig, TrainConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Real-estate analytics and price prediction",
    long_about = "Trains a price model offline and serves analytics and predictions over HTTP.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  HOST        Address to bind (serve)\n  \
                  PORT        Port to bind (serve)\n  \
                  RUST_LOG    Overrides --log-level\n\n\
                  EXAMPLES:\n  \
                  listing-insights train\n  \
                  listing-insights serve --port 8080"
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the dataset (unless --input is given) and fit the model bundle
    Train(TrainArgs),
    /// Load the dataset and model bundle and answer HTTP requests
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Where the synthesized dataset is written
    #[arg(long, default_value = "data.csv")]
    pub data: PathBuf,

    /// Where the model bundle is written
    #[arg(long, default_value = "model.json")]
    pub model: PathBuf,

    /// Train on an existing CSV instead of synthesizing one
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Number of synthetic records
    #[arg(long, default_value = "100")]
    pub records: usize,

    /// Seed for synthesis, the train/test split and bootstrapping
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Fraction of rows held out for the test score
    #[arg(long, default_value = "0.2")]
    pub test_size: f64,

    /// Trees in the forest
    #[arg(long, default_value = "100")]
    pub trees: usize,

    /// Maximum tree depth (unbounded when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl TrainArgs {
    pub fn synth_config(&self) -> SynthConfig {
        SynthConfig {
            record_count: self.records,
            random_seed: self.seed,
            ..Default::default()
        }
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            test_size: self.test_size,
            split_seed: self.seed,
            forest: ForestConfig {
                n_estimators: self.trees,
                max_depth: self.max_depth,
                seed: self.seed,
                ..Default::default()
            },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Dataset CSV produced by `train`
    #[arg(long, default_value = "data.csv")]
    pub data: PathBuf,

    /// Model bundle produced by `train`
    #[arg(long, default_value = "model.json")]
    pub model: PathBuf,

    /// Worker threads handling requests
    #[arg(long, default_value = "8")]
    pub workers: usize,
}
