//! Command dispatch: bridges CLI args -> core workflow -> output formatting.

pub mod config_cmd;
pub mod credentials;
pub mod devices;
pub mod run;
pub mod shell;

use clap::CommandFactory;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::AppContext;
use crate::error::CliError;
use crate::prompt::TerminalPrompter;

/// Run one command against an already loaded context.
///
/// `shell` is started from `main`; asking for it here (from inside a shell)
/// is a usage error.
pub async fn execute(
    cmd: Command,
    ctx: &AppContext,
    prompter: &TerminalPrompter,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    tracing::debug!(command = ?cmd, "dispatching command");
    match cmd {
        Command::Devices(args) => devices::handle(args, ctx, prompter, global).await,
        Command::Run(args) => run::handle(args, ctx, prompter, global).await,
        Command::Credentials(args) => credentials::handle(&args, ctx, prompter),
        Command::Config(args) => config_cmd::handle(&args, ctx, global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "lmrunner", &mut std::io::stdout());
            Ok(())
        }
        Command::Shell => Err(CliError::Validation {
            message: "Already in a shell session".into(),
        }),
    }
}
