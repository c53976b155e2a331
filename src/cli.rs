//! CLI argument parsing
//!
//! Hand-rolled parsing for the demonstration binary: a subcommand followed
//! by its positional arguments, with global flags accepted anywhere.

use std::env;

use anyhow::{bail, Context, Result};

pub const USAGE: &str = "\
Usage: conionova [OPTIONS] [COMMAND]

Commands:
  demo                   Show every directive on the terminal (default)
  dump                   List each directive's bytes in hex
  ask [PROMPT]           Read a line and report its first character
  label ROW COLUMN TEXT  Print TEXT as a double-height label

Options:
  -7, --seven-bit        Write ESC [ instead of the 8-bit CSI byte
  --save                 Remember the options above in the config file
  -v, --verbose          Log debug output to stderr
  -h, --help             Show this help";

/// Subcommand to run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Command {
    #[default]
    Demo,
    Dump,
    Ask {
        prompt: Option<String>,
    },
    Label {
        row: u16,
        column: u16,
        text: String,
    },
    Help,
}

/// Parsed command-line arguments
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub seven_bit: bool,
    /// Persist option flags to the config file
    pub save: bool,
    pub verbose: bool,
}

/// Parse the process's command-line arguments
pub fn parse_args() -> Result<Args> {
    parse_from(env::args().skip(1)) // Skip the binary name
}

/// Parse arguments, excluding the binary name
pub fn parse_from<I>(args: I) -> Result<Args>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut parsed = Args::default();
    let mut positional = Vec::new();

    for arg in args.into_iter().map(Into::into) {
        match arg.as_str() {
            "--seven-bit" | "-7" => parsed.seven_bit = true,
            "--save" => parsed.save = true,
            "--verbose" | "-v" => parsed.verbose = true,
            "--help" | "-h" => parsed.command = Command::Help,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                bail!("Unknown option: {flag}");
            }
            _ => positional.push(arg),
        }
    }

    if parsed.command == Command::Help {
        return Ok(parsed);
    }

    let mut positional = positional.into_iter();
    parsed.command = match positional.next().as_deref() {
        None | Some("demo") => Command::Demo,
        Some("dump") => Command::Dump,
        Some("ask") => {
            let words: Vec<String> = positional.by_ref().collect();
            let prompt = (!words.is_empty()).then(|| words.join(" "));
            Command::Ask { prompt }
        }
        Some("label") => {
            let row = parse_coordinate(positional.next(), "ROW")?;
            let column = parse_coordinate(positional.next(), "COLUMN")?;
            let words: Vec<String> = positional.by_ref().collect();
            if words.is_empty() {
                bail!("label: missing TEXT");
            }
            Command::Label {
                row,
                column,
                text: words.join(" "),
            }
        }
        Some(other) => bail!("Unknown command: {other}"),
    };

    if let Some(extra) = positional.next() {
        bail!("Unexpected argument: {extra}");
    }

    Ok(parsed)
}

fn parse_coordinate(value: Option<String>, name: &str) -> Result<u16> {
    let value = value.with_context(|| format!("label: missing {name}"))?;
    value
        .parse()
        .with_context(|| format!("label: {name} must be a number, got {value:?}"))
}
