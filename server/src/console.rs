//! Line-driven console over a [`RosterView`].

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::view::RosterView;

const HELP: &str = "\
commands:
  load           show every employee as a table
  list           show every employee, one line each
  names          show \"name (department)\" for every employee
  average        show the average salary
  filter <age>   show employees older than <age>
  help           show this message
  quit           leave the console
";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Load,
    List,
    Names,
    Average,
    Filter(&'a str),
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));
    let command = match word.to_ascii_lowercase().as_str() {
        "load" => Command::Load,
        "list" => Command::List,
        "names" | "concat" => Command::Names,
        "average" | "avg" => Command::Average,
        "filter" => Command::Filter(rest),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(word),
    };
    Some(command)
}

/// Run the console until `quit` or end of input. The roster is shown first.
pub fn run_console<R, W>(view: &mut RosterView, input: R, mut output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}", view.load())?;
    writeln!(output, "type `help` for commands")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            continue;
        };
        debug!(?command, "console command");
        match command {
            Command::Load => write!(output, "{}", view.load())?,
            Command::List => write!(output, "{}", view.list())?,
            Command::Names => write!(output, "{}", view.name_departments())?,
            Command::Average => write!(output, "{}", view.average_salary())?,
            Command::Filter(raw) => match view.filter(raw) {
                Ok(screen) => write!(output, "{screen}")?,
                Err(err) => writeln!(output, "error: {err}")?,
            },
            Command::Help => write!(output, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(word) => {
                writeln!(output, "unknown command `{word}`; type `help` for commands")?
            }
        }
        output.flush()?;
    }
    Ok(())
}
