// UI layer: asks for the breed and the disk token with `dialoguer`, shows
// an `indicatif` progress bar while the orchestrator runs and prints the
// final status lines.

use crate::messages::{ConsoleFormatter, MessageFormatter, Notice};
use crate::orchestrator::{Orchestrator, RunRequest};
use anyhow::Result;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Prompt, run and report. Early exits are printed, not returned as
/// errors; only terminal I/O problems propagate.
///
/// `progress` is the bar logging was set up with. It is made visible once
/// the prompts are answered.
pub fn run_interactive(orchestrator: &Orchestrator, progress: &ProgressBar) -> Result<()> {
    let formatter = ConsoleFormatter::new(!orchestrator.config().plain_output);

    // Empty answers are allowed here; the orchestrator decides what to do.
    let breed: String = Input::new()
        .with_prompt("Dog breed")
        .allow_empty(true)
        .interact_text()?;
    let token: String = Password::new()
        .with_prompt("Disk token")
        .allow_empty_password(true)
        .interact()?;
    let request = RunRequest::new(&breed, &token);

    progress.set_style(ProgressStyle::with_template(
        "{msg} [{bar:40}] {pos}/{len} [{elapsed}]",
    )?);
    progress.set_message("Uploading");
    progress.set_draw_target(ProgressDrawTarget::stderr());

    match orchestrator.run(&request, progress) {
        Ok(outcome) => {
            for notice in outcome.notices() {
                print_notice(&formatter, &notice);
            }
        }
        Err(err) => {
            progress.finish_and_clear();
            tracing::debug!(error = %err, "run stopped early");
            print_notice(&formatter, &err.notice());
        }
    }
    Ok(())
}

fn print_notice(formatter: &dyn MessageFormatter, notice: &Notice) {
    let line = formatter.format(notice);
    if notice.is_error() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}
