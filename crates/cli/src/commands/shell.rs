//! Interactive shell: many commands, one session.
//!
//! Lines are split on whitespace with double quotes grouping words, then
//! parsed with the same clap definitions as the command line.

#![allow(clippy::print_stdout)]

use std::io::Write as _;

use clap::Parser;
use food_store_client::error::Result;
use food_store_client::state::AppState;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{Command, execute};

#[derive(Parser)]
#[command(name = "", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

const PROMPT: &str = "food-store> ";

/// Read commands from stdin until `quit`, `exit`, or end of input.
///
/// A failing command is reported and the shell carries on.
pub async fn run(state: &mut AppState) -> Result<()> {
    println!("Type `help` for commands, `quit` to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT}");
        let _ = std::io::stdout().flush();

        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };

        let words = match split_words(&line) {
            Ok(words) => words,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some("quit" | "exit") => break,
            Some(_) => {}
        }

        match ShellLine::try_parse_from(words) {
            Ok(ShellLine { command }) => {
                if let Err(e) = execute(state, command).await {
                    e.report();
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }

    Ok(())
}

/// Split a line into words, keeping double-quoted text together.
fn split_words(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
