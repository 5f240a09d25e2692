//! Anime Browser - browse, filter, search and inspect titles from the Jikan
//! catalog in the terminal.

use anime_browser::command::HELP;
use anime_browser::{BrowseController, Category, Command, Surface, TerminalSurface};
use anyhow::{Context, Result};
use clap::Parser;
use jikan_client::{ApiBase, JikanClient};
use shared::Config;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// View to open first (top, airing, upcoming, movie)
    #[arg(long, default_value = "top", value_parser = parse_view)]
    category: Category,

    /// Start with a title search instead of a ranking view
    #[arg(long)]
    search: Option<String>,
}

/// Ranking views only; searches start with `--search`
fn parse_view(s: &str) -> Result<Category, String> {
    match s.parse()? {
        Category::Search => Err("use --search <text> to start with a search".to_string()),
        category => Ok(category),
    }
}

/// Run one input line; returns false when the user asked to quit
fn handle_line<S: Surface>(controller: &mut BrowseController<S>, line: &str) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            controller.notify(e.to_string());
            return true;
        }
    };

    let dispatch = match command {
        Command::Category(category) => controller.select_category(category),
        Command::More => controller.advance_page(),
        Command::Search(query) => controller.search(&query),
        Command::Filter(kind, value) => controller.set_filter(kind, &value),
        Command::Open(number) => controller.open_card(number),
        Command::Close | Command::Outside => {
            if controller.surface().page().overlay.is_open() {
                controller.close_detail();
            }
            return true;
        }
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::Quit => return false,
    };

    tracing::debug!(?dispatch, "Command handled");
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "anime-browser".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("Anime browser starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    // Initialize API client
    let base = ApiBase::parse(&config.api.base_url).context("Invalid API base URL")?;
    let client = JikanClient::new(
        Duration::from_secs(config.api.timeout_seconds),
        &config.api.user_agent,
    )
    .context("Failed to create Jikan client")?;
    info!(base_url = %base.as_url(), "Catalog client ready");

    let (mut controller, mut completions) = BrowseController::new(
        base,
        config.display.placeholder_image.clone(),
        Arc::new(client),
        TerminalSurface::new(std::io::stdout()),
    );

    println!("{}", HELP);
    controller.launch(args.category, args.search.as_deref());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read from stdin")? {
                    Some(line) => {
                        if !handle_line(&mut controller, &line) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Some(completion) = completions.recv() => controller.complete(completion),
        }
    }

    info!("Anime browser finished");

    Ok(())
}
