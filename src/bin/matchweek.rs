use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::debug;

use nutmeg::fixtures::{FixtureCalendar, UnlockPolicy};
use nutmeg::matchweek;
use nutmeg::model::artifacts::Artifacts;
use nutmeg::print;

/// Renders the prediction listing of one round, honouring the release policy.
#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the model artifacts from
    #[clap(short = 'a', long)]
    artifacts: PathBuf,

    /// file to source the fixture calendar from
    #[clap(short = 'f', long)]
    fixtures: PathBuf,

    /// round number to list
    #[clap(short = 'r', long)]
    round: u32,

    /// time zone governing the release instant
    #[clap(short = 'z', long, default_value = "America/Chicago")]
    zone: String,

    /// hour of day, in the release zone, at which a round unlocks
    #[clap(long, default_value_t = 0)]
    release_hour: u32,

    /// seed for a reproducible simulation
    #[clap(short = 's', long)]
    seed: Option<u64>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.release_hour > 23 {
            bail!("the release hour must lie in 0..=23");
        }
        Ok(())
    }

    fn zone(&self) -> anyhow::Result<Tz> {
        match self.zone.parse() {
            Ok(zone) => Ok(zone),
            Err(err) => bail!("unsupported time zone {}: {err}", self.zone),
        }
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

    let predictor = Artifacts::read(&args.artifacts)?.into_predictor();
    let calendar = FixtureCalendar::load(&args.fixtures)?;
    let policy = UnlockPolicy {
        zone: args.zone()?,
        release_hour: args.release_hour,
    };
    let mut rand = match args.seed {
        Some(seed) => StdRand::seed(seed),
        None => StdRand::default(),
    };

    let rows = matchweek::listing(
        &calendar,
        args.round,
        &predictor,
        &policy,
        Utc::now(),
        &mut rand,
    );
    println!(
        "{}",
        Console::default().render(&print::tabulate_matchweek(&rows))
    );
    Ok(())
}
