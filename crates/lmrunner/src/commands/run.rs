//! `run` handler: read the script, submit it, wait for output.

use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use lmrunner_core::{RunTarget, ScriptRunner, render};

use crate::cli::{GlobalOpts, RunArgs};
use crate::config::AppContext;
use crate::error::CliError;
use crate::output;
use crate::prompt::TerminalPrompter;

pub async fn handle(
    args: RunArgs,
    ctx: &AppContext,
    prompter: &TerminalPrompter,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let script = read_script(&args.script)?;
    let target = if args.new_device {
        RunTarget::NewDevice
    } else {
        RunTarget::CurrentDevice
    };

    let client = ctx.client(prompter)?;
    let cancel = CancellationToken::new();
    let _stop_listener = cancel.clone().drop_guard();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let runner =
        ScriptRunner::new(&client, prompter, &ctx.settings, &ctx.state).with_cancel(cancel);

    let started = runner.start(target, &script).await;
    // The lookup may have replaced the selection even if submission failed.
    ctx.persist_selection()?;
    let pending = started?;

    let spinner = (!global.quiet && io::stderr().is_terminal())
        .then(|| spinner(&format!("Waiting for output from {}", pending.device.label)));
    let outcome = runner.wait(pending).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let outcome = outcome?;

    output::print_output(&output::render_outcome(global.output, &outcome)?, global.quiet);
    if let Some(path) = args.html {
        output::write_html(&path, &render::output_document(&outcome.device, &outcome.output))?;
    }
    Ok(())
}

/// Read the script from a file, or stdin for `-`.
fn read_script(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::ReadFile {
        path: path.to_owned(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut script = String::new();
        io::stdin().read_to_string(&mut script).map_err(read_err)?;
        return Ok(script);
    }
    std::fs::read_to_string(path).map_err(read_err)
}

async fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::select! {
        () = token.cancelled() => {}
        res = tokio::signal::ctrl_c() => {
            if res.is_ok() {
                tracing::info!("interrupt received, cancelling run");
                token.cancel();
            }
        }
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
