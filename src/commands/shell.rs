//! Interactive session over a single store.
//!
//! One-shot commands start from a fresh store every time; inside the shell
//! the same store serves every line, so added and edited events stick
//! around until `exit`.

use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::Session;
use crate::Commands;
use crate::parse::split_args;

#[derive(Parser)]
#[command(name = "agenda", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

enum Line {
    Skip,
    Exit,
    Run(Commands),
}

fn interpret(line: &str) -> Result<Line> {
    let args = split_args(line)?;

    match args.first().map(String::as_str) {
        None => return Ok(Line::Skip),
        Some("exit" | "quit") => return Ok(Line::Exit),
        _ => {}
    }

    let parsed = ShellLine::try_parse_from(args)?;
    Ok(Line::Run(parsed.command))
}

pub async fn run(session: &Session<'_>) -> Result<()> {
    let count = session.store.len().await;
    println!(
        "{}",
        format!("agenda shell, {} events loaded. Type `help` or `exit`.", count).dimmed()
    );

    loop {
        let input: String = match Input::new()
            .with_prompt("agenda")
            .default(String::new())
            .show_default(false)
            .interact_text()
        {
            Ok(input) => input,
            // Ctrl-D / closed terminal
            Err(_) => break,
        };

        let command = match interpret(&input) {
            Ok(Line::Skip) => continue,
            Ok(Line::Exit) => break,
            Ok(Line::Run(command)) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if let Err(e) = super::run(session, command).await {
            eprintln!("  {}", format!("Error: {e}").red());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_skipped() {
        assert!(matches!(interpret("   ").unwrap(), Line::Skip));
    }

    #[test]
    fn exit_and_quit_leave() {
        assert!(matches!(interpret("exit").unwrap(), Line::Exit));
        assert!(matches!(interpret("quit").unwrap(), Line::Exit));
    }

    #[test]
    fn commands_parse_with_quoted_arguments() {
        match interpret(r#"new "Team lunch" --date 2025-12-01 --time "1:00 PM""#).unwrap() {
            Line::Run(Commands::New { title, date, time, .. }) => {
                assert_eq!(title.as_deref(), Some("Team lunch"));
                assert_eq!(date.as_deref(), Some("2025-12-01"));
                assert_eq!(time.as_deref(), Some("1:00 PM"));
            }
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(interpret("frobnicate").is_err());
        assert!(interpret("show not-a-number").is_err());
    }
}
