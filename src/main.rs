// Entrypoint for the CLI application.
// - Keeps `main` small: read the configuration, build the orchestrator and
//   hand it to the interactive UI.

use dogdisk_cli::{config::Config, orchestrator::Orchestrator, telemetry, ui::run_interactive};
use indicatif::ProgressBar;

fn main() -> anyhow::Result<()> {
    // The bar stays hidden until the UI starts a run; logging needs it
    // from the start so log lines never draw over it.
    let progress = ProgressBar::hidden();
    telemetry::init(&progress);

    // Service URLs, timeouts and pacing come from the environment; see
    // `Config::from_env` for the variables and defaults.
    let config = Config::from_env()?;
    let orchestrator = Orchestrator::new(config)?;

    run_interactive(&orchestrator, &progress)?;
    Ok(())
}
