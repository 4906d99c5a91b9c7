use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use tinyrand::{Seeded, StdRand};
use tracing::debug;

use nutmeg::model::artifacts::Artifacts;

/// Predicts the most likely scoreline of a single fixture.
#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the model artifacts from
    #[clap(short = 'a', long)]
    artifacts: PathBuf,

    /// home team name, exactly as it appears in the training feed
    home_team: String,

    /// away team name
    away_team: String,

    /// seed for a reproducible simulation
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// simulation iterations
    #[clap(short = 'i', long)]
    iterations: Option<usize>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.iterations == Some(0) {
            bail!("at least one iteration must be specified");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut predictor = Artifacts::read(&args.artifacts)?.into_predictor();
    if let Some(iterations) = args.iterations {
        predictor.iterations = iterations;
    }
    let mut rand = match args.seed {
        Some(seed) => StdRand::seed(seed),
        None => StdRand::default(),
    };
    let score = predictor.predict(&args.home_team, &args.away_team, &mut rand)?;
    println!("{} {score} {}", args.home_team, args.away_team);
    Ok(())
}
