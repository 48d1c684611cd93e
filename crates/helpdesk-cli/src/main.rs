//! helpdesk CLI: Command-line interface for the helpdesk chat

use clap::{Parser, Subcommand};
use helpdesk_engine::{Config, ResponseTable, Route};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "HELPDESK_LOG";

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Terminal helpdesk chat with a keyword-matching assistant
#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .helpdesk/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Fixed seed for reply selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat (default when no command specified)
    Chat,

    /// Classify one utterance and print the reply
    Ask {
        /// The utterance, words are joined with spaces
        #[arg(required = true)]
        utterance: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the active response table
    Table {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Chat));
    if let Err(e) = init_logging(cli.log_file.as_deref(), interactive) {
        eprintln!("Error: cannot open log file: {e}");
        std::process::exit(1);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Config::default_path(Path::new(".")));

    let result = match cli.command {
        None | Some(Commands::Chat) => cmd_chat(&cli, &config_path),
        Some(Commands::Ask {
            ref utterance,
            json,
        }) => cmd_ask(&cli, &config_path, &utterance.join(" "), json),
        Some(Commands::Table { json }) => cmd_table(&cli, &config_path, json),
        Some(Commands::Init { force }) => cmd_init(&config_path, cli.seed, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given. Without one, only non-interactive
/// commands log (to stderr), since the chat owns the terminal.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if !interactive {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

/// Load the config and apply command-line overrides.
///
/// An explicit `--config` must exist; the default location may be missing.
fn load_config(cli: &Cli, path: &Path) -> Result<Config, helpdesk_engine::ConfigError> {
    let mut config = if cli.config.is_some() {
        Config::load(path)?
    } else {
        Config::load_or_default(path)?
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    debug!(path = %path.display(), seed = ?config.seed, "config loaded");
    Ok(config)
}

fn cmd_chat(cli: &Cli, path: &Path) -> CliResult {
    let config = load_config(cli, path)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(helpdesk_tui::run_tui(&config))
}

fn cmd_ask(cli: &Cli, path: &Path, utterance: &str, json: bool) -> CliResult {
    let config = load_config(cli, path)?;
    let answer = ask(&config, utterance)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else if let Some(response) = answer["response"].as_str() {
        println!("{response}");
    }
    Ok(())
}

/// Classify one utterance into a JSON answer.
fn ask(config: &Config, utterance: &str) -> Result<serde_json::Value, helpdesk_engine::TableError> {
    let mut classifier = config.classifier()?;
    let reply = classifier.respond(utterance);
    let phrase = match reply.route {
        Route::Category(index) => classifier
            .table()
            .categories
            .get(index)
            .map(|c| c.phrase.clone()),
        Route::Greeting | Route::Unknown => None,
    };

    Ok(serde_json::json!({
        "utterance": utterance,
        "route": reply.route.name(),
        "phrase": phrase,
        "response": reply.text,
    }))
}

fn cmd_table(cli: &Cli, path: &Path, json: bool) -> CliResult {
    let config = load_config(cli, path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config.responses)?);
    } else {
        print!("{}", format_table(&config.responses));
    }
    Ok(())
}

fn format_table(table: &ResponseTable) -> String {
    let mut out = String::from("Categories (first match wins)\n");
    for (i, category) in table.categories.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<20} {}\n",
            i + 1,
            category.phrase,
            category.response
        ));
    }

    out.push_str("\nGreetings\n");
    for greeting in &table.greetings {
        out.push_str(&format!("  - {greeting}\n"));
    }

    out.push_str("\nFallbacks\n");
    for fallback in &table.unknown {
        out.push_str(&format!("  - {fallback}\n"));
    }
    out
}

fn cmd_init(path: &Path, seed: Option<u64>, force: bool) -> CliResult {
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    let config = Config {
        seed,
        ..Config::default()
    };
    config.save(path)?;
    println!("Created {}", path.display());
    Ok(())
}
