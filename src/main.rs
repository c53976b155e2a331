mod cli;

use std::io::{stdout, Write};
use std::panic;

use anyhow::Result;
use conionova::{Config, Console, ConsoleError, Directive, Encoding};
use crossterm::terminal::size as terminal_size;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, USAGE};

const TITLE: &str = "CONIONOVA";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Put the terminal back into a usable state if we panic mid-demo
fn setup_panic_handler(encoding: Encoding) {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let mut out = stdout();
        for directive in [Directive::Normal, Directive::CursorOn, Directive::KeyOn] {
            let _ = out.write_all(&directive.encode(encoding));
        }
        let _ = out.flush();
        original_hook(panic_info);
    }));
}

fn run_demo(config: &Config) -> Result<()> {
    let (cols, _) = terminal_size().unwrap_or((80, 24));
    // Double-width lines halve the addressable columns
    let title_len = TITLE.len() as u16;
    let title_col = (cols / 2).saturating_sub(title_len) / 2 + 1;

    let mut con = Console::stdio(config);
    con.clear_screen()?;
    con.cursor_off()?;
    con.big_label(2, title_col, TITLE)?;

    con.goto(5, 1)?;
    con.text("Attributes: ")?;
    con.bold()?;
    con.text("bold")?;
    con.no_bold()?;
    con.text(" ")?;
    con.underline()?;
    con.text("underline")?;
    con.no_underline()?;
    con.text(" ")?;
    con.blink()?;
    con.text("blink")?;
    con.no_blink()?;
    con.text(" ")?;
    con.inverse()?;
    con.text("inverse")?;
    con.no_inverse()?;

    con.goto(7, 1)?;
    con.double_width()?;
    con.text("Double width")?;
    con.goto(8, 1)?;
    con.normal_text()?;
    con.text("Back to normal width")?;

    con.goto(10, 1)?;
    con.cursor_on()?;
    con.text("Press Enter to finish: ")?;
    let answer = con.getchar();

    con.normal()?;
    con.flush()?;

    match answer {
        Ok(_) | Err(ConsoleError::EndOfInput) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn run_dump(encoding: Encoding) -> Result<()> {
    let mut out = stdout().lock();
    let samples = Directive::ALL
        .into_iter()
        .chain([Directive::CursorTo { row: 1, column: 1 }]);
    for directive in samples {
        let hex: Vec<String> = directive
            .encode(encoding)
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        writeln!(out, "{:<22} {}", directive.name(), hex.join(" "))?;
    }
    Ok(())
}

fn run_ask(config: &Config, prompt: Option<String>) -> Result<()> {
    let mut con = Console::stdio(config);
    con.text(prompt.as_deref().unwrap_or("? "))?;
    let c = con.getchar()?;
    con.text(&format!("First character: {c:?}\n"))?;
    con.flush()?;
    Ok(())
}

fn run_label(config: &Config, row: u16, column: u16, text: &str) -> Result<()> {
    let mut con = Console::stdio(config);
    con.big_label(row, column, text)?;
    con.normal_text()?;
    con.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = cli::parse_args()?;
    init_logging(args.verbose);

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Using default config: {e:#}");
        Config::default()
    });
    if args.seven_bit {
        config.seven_bit = true;
    }
    if args.save {
        config.save()?;
        debug!("config saved");
    }
    debug!(?config, command = ?args.command, "starting");

    setup_panic_handler(config.encoding());

    match args.command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Demo => run_demo(&config),
        Command::Dump => run_dump(config.encoding()),
        Command::Ask { prompt } => run_ask(&config, prompt),
        Command::Label { row, column, text } => run_label(&config, row, column, &text),
    }
}
