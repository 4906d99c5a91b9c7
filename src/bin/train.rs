use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use nutmeg::data;
use nutmeg::form;
use nutmeg::linear::regression::RegressionModel;
use nutmeg::model::artifacts::{assign_team_ids, Artifacts};
use nutmeg::model::{regressors, training_matrix, FeatureColumn};
use nutmeg::print;
use nutmeg::stats;

/// Fits the expected-goals models from a historical results feed and writes
/// the serving artifacts.
#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the raw results from
    #[clap(short = 'd', long)]
    data: PathBuf,

    /// file to write the model artifacts to
    #[clap(short = 'a', long)]
    artifacts: PathBuf,

    /// optionally persist the cleaned feed
    #[clap(long)]
    cleaned: Option<PathBuf>,

    /// trailing window length for the form features
    #[clap(short = 'w', long, default_value_t = form::DEFAULT_WINDOW)]
    window: usize,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.window == 0 {
            bail!("the window cannot be zero");
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

    let history = data::load_and_clean(&args.data)?;
    info!("cleaned {} match records", history.len());
    if let Some(cleaned) = &args.cleaned {
        data::write_cleaned(cleaned, &history)?;
        info!("wrote cleaned feed to {}", cleaned.display());
    }

    let features = form::build_features(&history, args.window);
    let team_ids = assign_team_ids(&history);
    let matrix = training_matrix(&features, &team_ids, args.window);
    info!(
        "training over {} of {} matches with a filled window",
        matrix.rows(),
        features.len()
    );

    let home_model = RegressionModel::fit(FeatureColumn::HomeGoals, regressors(), &matrix)?;
    let away_model = RegressionModel::fit(FeatureColumn::AwayGoals, regressors(), &matrix)?;
    let renderer = Console::default();
    info!(
        "fitted home goals model, R²={:.6}:\n{}",
        home_model.r_squared,
        renderer.render(&home_model.tabulate())
    );
    info!(
        "fitted away goals model, R²={:.6}:\n{}",
        away_model.r_squared,
        renderer.render(&away_model.tabulate())
    );

    let team_stats = stats::build_snapshots(&history, args.window);
    info!(
        "team form entering the next round:\n{}",
        renderer.render(&print::tabulate_snapshots(&team_stats))
    );

    let artifacts = Artifacts {
        home_model: home_model.predictor,
        away_model: away_model.predictor,
        team_ids,
        team_stats,
    };
    artifacts.write(&args.artifacts)?;
    info!("wrote artifacts to {}", args.artifacts.display());
    Ok(())
}
