//! Interactive `shell`: one long-lived session.
//!
//! The startup reset runs once when the shell starts and the selected device
//! is shared by every command typed at the prompt. A failed command prints
//! its diagnostic and the session carries on.

use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser};

use lmrunner_core::{Notice, Prompter};

use crate::cli::{GlobalOpts, ShellLine};
use crate::config::AppContext;
use crate::error::CliError;
use crate::prompt::TerminalPrompter;

const PROMPT: &str = "lmrunner> ";

pub async fn run(
    ctx: &AppContext,
    prompter: &TerminalPrompter,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if ctx.reset.device_cleared {
        prompter.notify(Notice::Info, "Selected device cleared on startup.");
    }
    if ctx.reset.token_cleared {
        prompter.notify(Notice::Info, "API token cleared on startup.");
    }
    if let Some(device) = ctx.state.selected() {
        prompter.notify(Notice::Info, &format!("Selected device: {}", device.label));
    }
    prompter.notify(Notice::Info, "Type `help` for commands, `exit` to leave.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        eprint!("{PROMPT}");
        io::stderr().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["exit" | "quit"] => break,
            ["help"] => {
                let _ = ShellLine::command().print_help();
            }
            _ => match ShellLine::try_parse_from(words.iter().copied()) {
                Ok(parsed) => {
                    if let Err(err) =
                        super::execute(parsed.command, ctx, prompter, global).await
                    {
                        eprintln!("{:?}", miette::Report::new(err));
                    }
                }
                Err(e) => {
                    let _ = e.print();
                }
            },
        }
    }
    Ok(())
}
