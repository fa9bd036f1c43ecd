use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use shopscope_core::AnswerStore;
use shopscope_core::Config;
use shopscope_core::UiTheme;
use shopscope_core::WizardState;
use shopscope_exec::submit;
use shopscope_exec::GeminiClient;
use shopscope_exec::GenerationClient;
use shopscope_exec::SimulatedGenerationClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod export;
mod markdown;
mod ui;

const LOG_ENV: &str = "SHOPSCOPE_LOG";
const DEFAULT_LOG_FILTER: &str = "shopscope=info";

#[derive(Parser, Debug)]
#[command(
    name = "shopscope",
    version,
    about = "Guided e-commerce project questionnaire that drafts a scope brief"
)]
struct Args {
    /// Config file (defaults to <config dir>/shopscope/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the offline generator instead of the Gemini API.
    #[arg(long)]
    simulate: bool,

    /// classic, ocean or forest.
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Read an answers JSON document from stdin, print the brief and exit.
    #[arg(long)]
    headless: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.headless)?;

    let fallback = dirs::config_dir().map(|dir| dir.join("shopscope").join("config.toml"));
    let config = Config::resolve(args.config.as_deref(), fallback.as_deref())
        .context("loading configuration")?;
    let theme = match args.theme.as_deref() {
        Some(name) => UiTheme::from_label(name)
            .with_context(|| format!("unknown theme `{name}` (expected classic, ocean or forest)"))?,
        None => config.ui.theme()?,
    };

    let client: Arc<dyn GenerationClient> = if args.simulate {
        Arc::new(SimulatedGenerationClient::default())
    } else {
        Arc::new(GeminiClient::new(&config.generation).context("building generation client")?)
    };
    info!(client = client.label(), headless = args.headless, "starting shopscope");

    if args.headless {
        return run_headless(client.as_ref());
    }
    ui::run(WizardState::new(theme), client)
}

fn run_headless(client: &dyn GenerationClient) -> anyhow::Result<()> {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("reading answers from stdin")?;
    let answers: AnswerStore = if raw.trim().is_empty() {
        AnswerStore::new()
    } else {
        serde_json::from_str(&raw).context("parsing answers JSON")?
    };

    let result = submit(client, &answers);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", result.text())?;
    if result.is_error() {
        anyhow::bail!("scope generation failed");
    }
    Ok(())
}

/// Headless runs log to stderr; the terminal UI owns the screen, so it logs to
/// a file instead.
fn init_logging(headless: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if headless {
        builder.with_writer(io::stderr).init();
        return Ok(());
    }

    let log_dir = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("shopscope");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("shopscope.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;
    builder
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
