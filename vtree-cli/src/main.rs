//! `vtree`: a terminal front end for the virtual tree engine.

mod cli;
mod commands;
mod paths;
mod render;
mod settings;

use std::fs::{self, File};
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, WriteLogger};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use vtree_lib::provider::InMemoryProvider;
use vtree_lib::{EngineConfig, RenderedRow, VirtualTree};

use crate::cli::Cli;
use crate::commands::{Command, HELP};
use crate::settings::{Settings, SettingsError};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Engine(#[from] vtree_lib::error::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type Engine = VirtualTree<InMemoryProvider>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[cli] {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let settings = match cli.settings.clone().or_else(paths::settings_file) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    }
    .apply(&cli);

    init_logging(&cli, &settings);
    log::info!("[cli] starting with {:?}", settings);

    let mut provider = InMemoryProvider::generate(settings.roots, settings.fan_out, settings.depth);
    if let Some(latency) = settings.latency() {
        provider = provider.with_latency(latency);
    }
    let config = EngineConfig::new()
        .with_row_height(settings.row_height)
        .with_indent_width(settings.indent_width);

    let roots = provider.root_count();
    let mut engine = VirtualTree::with_config(provider, roots, config);
    engine.resize(settings.rows);
    engine.refresh().await?;
    print_page(&engine).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        log::debug!("[cli] {:?}", command);

        match execute(&mut engine, command).await {
            Ok(Flow::Render) => print_page(&engine).await?,
            Ok(Flow::Quiet) => {}
            Ok(Flow::Quit) => break,
            Err(Rejected(message)) => eprintln!("{}", message),
        }
    }

    log::info!("[cli] exiting");
    Ok(())
}

/// Initialize the file logger. Logging is skipped if no log file can be created.
fn init_logging(cli: &Cli, settings: &Settings) {
    let path = match &cli.log_file {
        Some(path) => Some(path.clone()),
        None => {
            paths::rotate_logs();
            paths::log_file()
        }
    };
    let Some(path) = path else { return };

    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(settings.level_filter(), Config::default(), file);
    }
}

enum Flow {
    Render,
    Quiet,
    Quit,
}

/// A command the engine could not carry out, reported to the user.
struct Rejected(String);

impl From<vtree_lib::error::Error> for Rejected {
    fn from(e: vtree_lib::error::Error) -> Self {
        Rejected(e.to_string())
    }
}

async fn execute(engine: &mut Engine, command: Command) -> Result<Flow, Rejected> {
    match command {
        Command::Scroll(row) => engine.scroll_to(row),
        Command::Pixels(px) => engine.scroll_to_pixels(px),
        Command::Resize(rows) => engine.resize(rows),
        Command::Toggle(id) => {
            let row = expandable_row(engine, &id)?;
            engine.toggle_row(&row).await?;
            return Ok(Flow::Render);
        }
        Command::Expand(id) => {
            let row = expandable_row(engine, &id)?;
            if !engine.expand(row.id(), row.parent(), row.offset, row.children())? {
                return Err(Rejected(format!("{} is already expanded", id)));
            }
        }
        Command::Collapse(id) => {
            let row = visible_row(engine, &id)?;
            if !engine.collapse(row.id(), row.parent()) {
                return Err(Rejected(format!("{} is not expanded", id)));
            }
        }
        Command::Show => return Ok(Flow::Render),
        Command::Help => {
            println!("{}", HELP);
            return Ok(Flow::Quiet);
        }
        Command::Quit => return Ok(Flow::Quit),
    }

    engine.refresh().await?;
    Ok(Flow::Render)
}

fn visible_row(engine: &Engine, id: &str) -> Result<RenderedRow, Rejected> {
    engine
        .page()
        .rows()
        .iter()
        .find(|row| row.id() == id)
        .cloned()
        .ok_or_else(|| Rejected(format!("{} is not on the current page", id)))
}

fn expandable_row(engine: &Engine, id: &str) -> Result<RenderedRow, Rejected> {
    let row = visible_row(engine, id)?;
    if row.row.is_expandable() {
        Ok(row)
    } else {
        Err(Rejected(format!("{} has no children", id)))
    }
}

async fn print_page(engine: &Engine) -> Result<(), std::io::Error> {
    let mut text = render::page_lines(engine.page(), engine.config()).join("\n");
    text.push('\n');

    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await
}
