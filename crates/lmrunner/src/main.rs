mod cli;
mod commands;
mod config;
mod error;
mod output;
mod prompt;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::AppContext;
use crate::error::CliError;
use crate::prompt::TerminalPrompter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;

    // Completions need neither config nor keyring.
    if let Command::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "lmrunner", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = AppContext::load(&global)?;
    let prompter = TerminalPrompter::new(prompt::should_color(global.color), global.quiet);

    match cli.command {
        Command::Shell => commands::shell::run(&ctx, &prompter, &global).await,
        cmd => commands::execute(cmd, &ctx, &prompter, &global).await,
    }
}
