//! `credentials` subcommand handlers.
//!
//! All writes go to the keyring; `--account` / `--api-token` only shadow it
//! for the current process.

use lmrunner_core::{Notice, Prompter, credentials};

use crate::cli::{CredentialsArgs, CredentialsCommand};
use crate::config::AppContext;
use crate::error::CliError;
use crate::prompt::TerminalPrompter;

pub fn handle(
    args: &CredentialsArgs,
    ctx: &AppContext,
    prompter: &TerminalPrompter,
) -> Result<(), CliError> {
    let store = &ctx.secrets;
    match args.command {
        CredentialsCommand::Configure => credentials::configure(store, prompter)?,
        CredentialsCommand::SetAccount => credentials::update_account(store, prompter)?,
        CredentialsCommand::SetToken => credentials::update_token(store, prompter)?,
        CredentialsCommand::Clear => {
            credentials::clear_all(store)?;
            prompter.notify(Notice::Info, "Account name and API token cleared.");
        }
        CredentialsCommand::ClearAccount => {
            credentials::clear_account(store)?;
            prompter.notify(Notice::Info, "Account name cleared.");
        }
        CredentialsCommand::ClearToken => {
            credentials::clear_token(store)?;
            prompter.notify(Notice::Info, "API token cleared.");
        }
    }
    Ok(())
}
