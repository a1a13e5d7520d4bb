//! cryptochat CLI: Command-line interface for the crypto assistant chat widget

use clap::{Parser, Subcommand};
use cryptochat_engine::{
    ChatBackend, ChatWidget, HttpChatBackend, Submission, WidgetConfig, CONFIG_DIR, CONFIG_FILE,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Crypto market assistant chat, in the terminal
#[derive(Parser)]
#[command(name = "cryptochat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .cryptochat/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat widget (default when no command specified)
    Tui {
        /// Backend base URL
        #[arg(long)]
        backend: Option<String>,

        /// Write logs to this file instead of discarding them
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Ask one question and print the reply
    Ask {
        /// The question to send
        question: String,

        /// Backend base URL
        #[arg(long)]
        backend: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init,

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new(CONFIG_DIR).join(CONFIG_FILE));

    let result = match cli.command {
        None => cmd_tui(&config_path, cli.verbose, None, None),
        Some(Commands::Tui { backend, log_file }) => {
            cmd_tui(&config_path, cli.verbose, backend, log_file.as_deref())
        }
        Some(Commands::Ask {
            question,
            backend,
            json,
        }) => {
            init_tracing(cli.verbose);
            cmd_ask(&config_path, &question, backend, json)
        }
        Some(Commands::Init) => {
            init_tracing(cli.verbose);
            cmd_init(&config_path)
        }
        Some(Commands::Config { json }) => {
            init_tracing(cli.verbose);
            cmd_config(&config_path, json)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr.
fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .init();
}

/// Log to `path`; the terminal belongs to the TUI.
fn init_file_tracing(path: &Path, verbose: bool) -> CliResult {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Load the config file and apply environment and flag overrides.
fn load_config(
    path: &Path,
    backend: Option<String>,
) -> Result<WidgetConfig, Box<dyn std::error::Error>> {
    let mut config = WidgetConfig::load_or_default(path)?.with_env_overrides();
    if let Some(url) = backend {
        config.backend_url = url;
    }
    Ok(config)
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
}

fn cmd_tui(
    config_path: &Path,
    verbose: bool,
    backend: Option<String>,
    log_file: Option<&Path>,
) -> CliResult {
    if let Some(path) = log_file {
        init_file_tracing(path, verbose)?;
    }

    let config = load_config(config_path, backend)?;
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpChatBackend::from_config(&config)?);
    runtime()?.block_on(cryptochat_tui::run_tui(config, backend))
}

fn cmd_ask(config_path: &Path, question: &str, backend: Option<String>, json: bool) -> CliResult {
    let config = load_config(config_path, backend)?;
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpChatBackend::from_config(&config)?);
    runtime()?.block_on(ask(&config, backend, question, json))
}

async fn ask(
    config: &WidgetConfig,
    backend: Arc<dyn ChatBackend>,
    question: &str,
    json: bool,
) -> CliResult {
    let mut widget = ChatWidget::mount(config, backend);
    widget.open();

    if widget.submit(question) == Submission::Rejected {
        widget.unmount();
        return Err("question is empty".into());
    }
    info!(backend = %config.backend_url, "waiting for reply");
    widget.settle_all().await;

    let reply = widget
        .last_reply()
        .map(|m| m.text.clone())
        .unwrap_or_default();

    if json {
        let output = serde_json::json!({
            "question": question,
            "reply": reply,
            "timeline": widget.timeline().entries(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{reply}");
    }

    widget.unmount();
    Ok(())
}

fn cmd_init(config_path: &Path) -> CliResult {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    WidgetConfig::default().save(config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}

fn cmd_config(config_path: &Path, json: bool) -> CliResult {
    let config = load_config(config_path, None)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file: {}", config_path.display());
    println!("  backend_url:          {}", config.backend_url);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!("  launcher_delay_ms:    {}", config.launcher_delay_ms);
    println!("  greeting:             {}", config.greeting);
    println!("  typing_label:         {}", config.typing_label);
    println!("  fallback_reply:       {}", config.fallback_reply);
    Ok(())
}
