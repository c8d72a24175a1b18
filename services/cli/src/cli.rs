use crate::assess::{run_assessment, run_batch, AssessArgs, BatchArgs};
use crate::render::render_vocabulary;
use clap::{Parser, Subcommand};
use glazing_risk::assessment::RiskEvaluator;
use glazing_risk::config::AppConfig;
use glazing_risk::error::AppError;
use glazing_risk::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "glazing-risk",
    about = "Rate architectural glazing configurations for breakage and fall-out risk",
    version
)]
pub(crate) struct Cli {
    /// Emit debug-level logs to stderr
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess a single glazing configuration
    Assess(AssessArgs),
    /// Assess every configuration listed in a CSV file
    Batch(BatchArgs),
    /// List glass presets and the accepted location, framing and exposure values
    Presets,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, cli.verbose)?;

    info!(
        environment = ?config.environment,
        low_level_impact_height_m = config.evaluation.low_level_impact_height_m,
        fragmentation_height_m = config.evaluation.fragmentation_height_m,
        "glazing risk evaluator configured"
    );
    let evaluator = RiskEvaluator::new(config.evaluation);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Assess(args) => run_assessment(args, &evaluator, &mut stdout),
        Command::Batch(args) => run_batch(args, &evaluator, &mut stdout),
        Command::Presets => render_vocabulary(&mut stdout).map_err(AppError::from),
    }
}
