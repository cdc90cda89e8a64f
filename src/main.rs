// src/main.rs
mod app;
mod config;
mod directory;
mod error;
mod form;
mod progress;
mod types;
mod ui;
mod utils;
mod web;

use app::DrinkMaker;
use config::{AppConfig, SourceKind};
use directory::DirectorySource;
use utils::logging::{FileLogger, LogBuffer, Logger};

use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Parser)]
#[command(author, version, about = "Hot Drinks Maker 5000", long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "hot_drinks_config.json")]
    pub config: String,
    #[arg(short, long)]
    pub debug: bool,
    /// Base URL of the drinks API
    #[arg(short, long)]
    pub backend: Option<String>,
    #[arg(short, long, value_enum)]
    pub source: Option<SourceKind>,
    /// Directory JSON used with `--source file`
    #[arg(short, long)]
    pub file: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the bundled drinks API
    Serve {
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

fn load_config(args: &Args) -> io::Result<AppConfig> {
    let mut config = AppConfig::load_or_init(&args.config)?;
    if let Some(backend) = &args.backend {
        config.backend_url = backend.clone();
    }
    if let Some(source) = args.source {
        config.source = source;
    }
    if let Some(file) = &args.file {
        config.static_file = Some(file.clone());
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(Command::Serve { port }) = args.command {
        return web::start_web_server(port, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
    }

    let config = load_config(&args)?;
    let source = DirectorySource::from_config(&config)?;

    let sink: Option<Box<dyn Logger>> = match FileLogger::new(&config.log_path(), args.debug) {
        Ok(logger) => Some(Box::new(logger)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", config.log_path(), e);
            None
        }
    };
    let logs = LogBuffer::new(sink, args.debug);

    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    let drink_maker = DrinkMaker::new(config, source, logs, event_tx);

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = app::run_app(&mut terminal, drink_maker, event_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors that occurred during execution
    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
        return Err(err);
    }

    Ok(())
}
