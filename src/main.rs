//! freight-gallery: Command-line front end for the logistics image gallery

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use freight_gallery::config::{app_config::AppConfig, path_resolver};
use freight_gallery::query::Mode;
use freight_gallery::state::{Command, DetailView, Gallery, ListStatus, UiState};
use std::fmt::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// Configuration Helper
// ============================================================================

/// Load config: explicit file or default file, then environment, then CLI.
fn load_config(config_path: Option<&str>, endpoint: Option<&str>) -> Result<AppConfig> {
    let file_config = match config_path {
        Some(path) => AppConfig::from_file(&path_resolver::expand_home(path))?,
        None => {
            let default_path = path_resolver::get_default_config_path();
            if default_path.exists() {
                tracing::debug!("loading config from {}", default_path.display());
                AppConfig::from_file(&default_path)?
            } else {
                AppConfig::default()
            }
        }
    };

    let mut config = file_config.merge_with(&AppConfig::from_env());
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Rendering
// ============================================================================

/// Status line followed by the grid. A failed search shows only its message.
fn render_results(state: &UiState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", state.status_line());
    if state.status != ListStatus::Loaded {
        return out;
    }
    if state.results.is_empty() {
        let _ = writeln!(out, "No results found.");
        return out;
    }
    let _ = writeln!(out);
    for (i, record) in state.results.iter().enumerate() {
        let _ = writeln!(out, "{}. {} [{}]", i + 1, record.title, record.id);
        if let Some(url) = &record.thumbnail_url {
            let _ = writeln!(out, "   Image: {}", url);
        }
        if !record.excerpt.is_empty() {
            let _ = writeln!(out, "   {}", record.excerpt);
        }
        let _ = writeln!(out);
    }
    out
}

fn print_results(state: &UiState) {
    print!("{}", render_results(state));
}

fn print_detail(detail: &DetailView) {
    match detail {
        DetailView::Closed => {}
        DetailView::Loading => println!("Loading details…"),
        DetailView::Open(record) => {
            println!("== {} [{}] ==", record.title, record.id);
            println!(
                "Image: {}",
                record.large_image_url.as_deref().unwrap_or("(none)")
            );
            println!();
            println!("{}", record.long_excerpt);
            println!();
        }
    }
}

// ============================================================================
// Interactive Browser
// ============================================================================

const BROWSE_HELP: &str = "\
Commands:
  search [text]   search with text (or the current text) and mode
  mode <m>        select mode: all, rail, air, sea
  reset           clear text and mode, then search
  open <n>        open result number n
  close           close the detail view
  help            show this help
  quit            exit";

/// One parsed line of browse input
#[derive(Debug, PartialEq)]
enum Input {
    Commands(Vec<Command>),
    Help,
    Quit,
}

fn parse_input(line: &str, state: &UiState) -> Result<Input> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let commands = match word.to_ascii_lowercase().as_str() {
        "" => Vec::new(),
        "search" | "s" if rest.is_empty() => vec![Command::Search],
        "search" | "s" => vec![Command::SetQuery(rest.to_string()), Command::Search],
        "mode" | "m" => vec![Command::SelectMode(rest.parse::<Mode>()?)],
        "reset" => vec![Command::Reset],
        "open" | "o" => {
            let n: usize = rest
                .parse()
                .map_err(|_| anyhow!("Expected a result number, got '{}'", rest))?;
            let record = n
                .checked_sub(1)
                .and_then(|i| state.results.get(i))
                .ok_or_else(|| anyhow!("No result number {}", n))?;
            vec![Command::OpenRecord(record.id)]
        }
        "close" | "c" => vec![Command::CloseDetail],
        "help" | "h" | "?" => return Ok(Input::Help),
        "quit" | "q" | "exit" => return Ok(Input::Quit),
        other => return Err(anyhow!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Input::Commands(commands))
}

async fn browse(mut gallery: Gallery) -> Result<()> {
    println!("{}\n", BROWSE_HELP);
    gallery.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let busy = gallery.is_busy();
        tokio::select! {
            applied = gallery.next_event(), if busy => {
                if applied {
                    print_results(gallery.state());
                    print_detail(&gallery.state().detail);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                match parse_input(&line, gallery.state()) {
                    Ok(Input::Quit) => return Ok(()),
                    Ok(Input::Help) => println!("{}", BROWSE_HELP),
                    Ok(Input::Commands(commands)) => {
                        for command in commands {
                            gallery.dispatch(command);
                        }
                        let state = gallery.state();
                        println!(
                            "[mode: {} | text: {:?}] {}",
                            state.mode.label(),
                            state.query,
                            state.status_line()
                        );
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }
}

// ============================================================================
// CLI Implementation
// ============================================================================

/// freight-gallery: search cargo and freight images by transport mode
#[derive(Parser)]
#[command(name = "freight-gallery")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (default: ~/.config/freight-gallery/config.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// MediaWiki api.php endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize freight-gallery configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Search once and print the results
    Search {
        /// Free-text search (search operators are passed through)
        text: Option<String>,

        /// Transport mode: all, rail, air, or sea
        #[arg(short, long)]
        mode: Option<Mode>,
    },
    /// Show the detail view for one page id
    Show {
        /// Wiki page id
        page_id: u64,
    },
    /// Browse interactively
    Browse {
        /// Transport mode to start with
        #[arg(short, long)]
        mode: Option<Mode>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they do not mix with the gallery output
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Commands::Init { force } = cli.command {
        let config_path = match cli.config.as_deref() {
            Some(path) => path_resolver::expand_home(path),
            None => path_resolver::get_default_config_path(),
        };
        return init_config(config_path, force);
    }

    let config = load_config(cli.config.as_deref(), cli.endpoint.as_deref())?;
    tracing::info!("using endpoint {}", config.endpoint());

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Search { text, mode } => {
            let mut gallery = Gallery::with_mode(config.client(), mode.unwrap_or(config.default_mode()));
            if let Some(text) = text {
                gallery.dispatch(Command::SetQuery(text));
            }
            gallery.dispatch(Command::Search);
            print_results(gallery.settle().await);
            Ok(())
        }
        Commands::Show { page_id } => {
            let response = config.client().fetch_page(page_id).await?;
            let page = response
                .pages()
                .and_then(|pages| pages.first())
                .ok_or_else(|| anyhow!("No page with id {}", page_id))?;
            println!("== {} [{}] ==", page.title.as_deref().unwrap_or(""), page_id);
            println!(
                "Image: {}",
                page.thumbnail
                    .as_ref()
                    .and_then(|t| t.source.as_deref())
                    .unwrap_or("(none)")
            );
            println!();
            println!("{}", page.extract.as_deref().unwrap_or("(none)"));
            Ok(())
        }
        Commands::Browse { mode } => {
            let gallery = Gallery::with_mode(config.client(), mode.unwrap_or(config.default_mode()));
            browse(gallery).await
        }
    }
}

fn init_config(config_path: PathBuf, force: bool) -> Result<()> {
    eprintln!("Initializing freight-gallery configuration...");

    if let Some(dir) = config_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
            eprintln!("Created config directory: {}", dir.display());
        }
    }

    if config_path.exists() && !force {
        eprintln!("Configuration file already exists: {}", config_path.display());
        eprintln!("Use --force to overwrite");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default().to_toml()?)?;
    eprintln!("Created configuration file: {}", config_path.display());
    Ok(())
}
