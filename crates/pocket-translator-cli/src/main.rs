//! Pocket Translator CLI - translate text from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pocket_translator_core::{
    AppConfig, Debouncer, JsonSettingsStore, Lang, MemorySettingsStore, ProviderKind,
    SessionEvent, SettingsStore, TranslationCoordinator, TranslationSession, detect_direction,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pocket-translate")]
#[command(author, version, about = "Translate short text between Chinese and English", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Settings document path (provider and credentials)
    #[arg(long, global = true, env = "POCKET_TRANSLATOR_SETTINGS")]
    settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate TEXT (or stdin) once
    Translate {
        /// Text to translate; read from stdin when omitted
        text: Option<String>,

        /// Source language code (default: guessed from the text)
        #[arg(short = 's', long)]
        source: Option<String>,

        /// Target language code (default: guessed from the text)
        #[arg(short = 't', long)]
        target: Option<String>,

        /// Use this provider for this call only
        #[arg(short = 'p', long)]
        provider: Option<String>,
    },

    /// Inspect or change the persisted provider settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Translate each stdin line as an edit, debounced
    Interactive,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print current settings with secrets masked
    Show,
    /// Print where settings are stored
    Path,
    /// Update selected fields and save
    Set {
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        youdao_app_key: Option<String>,
        #[arg(long)]
        youdao_app_secret: Option<String>,
        #[arg(long)]
        baidu_app_id: Option<String>,
        #[arg(long)]
        baidu_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout carries translations only
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };

    let store = match args.settings.clone().or_else(|| config.settings_path.clone()) {
        Some(path) => JsonSettingsStore::new(path),
        None => JsonSettingsStore::default_location(),
    };
    debug!("Using settings at {}", store.path().display());

    match args.command {
        Command::Translate {
            text,
            source,
            target,
            provider,
        } => translate_once(&config, store, text, source, target, provider).await,
        Command::Settings { action } => run_settings(&store, action),
        Command::Config => {
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            print_out(rendered.trim_end());
            Ok(ExitCode::SUCCESS)
        }
        Command::Interactive => run_interactive(&config, store).await,
    }
}

async fn translate_once(
    config: &AppConfig,
    store: JsonSettingsStore,
    text: Option<String>,
    source: Option<String>,
    target: Option<String>,
    provider: Option<String>,
) -> Result<ExitCode> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };
    let text = text.trim();

    let (guessed_source, guessed_target) = detect_direction(text);
    let source = source.map_or(guessed_source, Lang::from);
    let target = target.map_or(guessed_target, Lang::from);

    let store: Arc<dyn SettingsStore> = match provider {
        Some(name) => {
            let kind: ProviderKind = name.parse().context("Invalid --provider")?;
            let mut settings = store.load();
            settings.provider = kind;
            Arc::new(MemorySettingsStore::new(settings))
        }
        None => Arc::new(store),
    };

    let coordinator = TranslationCoordinator::with_defaults(store, config);
    info!("Translating with {} ({} -> {})", coordinator.provider(), source, target);

    let response = coordinator
        .translate(text, &source, &target)
        .await
        .into_response();

    if response.success {
        print_out(&response.render());
        Ok(ExitCode::SUCCESS)
    } else {
        print_err(&response.render());
        Ok(ExitCode::FAILURE)
    }
}

fn run_settings(store: &JsonSettingsStore, action: SettingsAction) -> Result<ExitCode> {
    match action {
        SettingsAction::Show => {
            let settings = store.load().redacted();
            print_out(&serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Path => print_out(&store.path().display().to_string()),
        SettingsAction::Set {
            provider,
            youdao_app_key,
            youdao_app_secret,
            baidu_app_id,
            baidu_key,
        } => {
            let mut settings = store.load();

            if let Some(name) = provider {
                settings.provider = name.parse().context("Invalid --provider")?;
            }
            if let Some(value) = youdao_app_key {
                settings.youdao.app_key = value;
            }
            if let Some(value) = youdao_app_secret {
                settings.youdao.app_secret = value;
            }
            if let Some(value) = baidu_app_id {
                settings.baidu.app_id = value;
            }
            if let Some(value) = baidu_key {
                settings.baidu.key = value;
            }

            store.save(&settings).context("Failed to save settings")?;
            if !settings.is_ready() {
                print_err(&format!(
                    "warning: {} is selected but its credentials are incomplete",
                    settings.provider.display_name()
                ));
            }
            print_out(&serde_json::to_string_pretty(&settings.redacted())?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_interactive(config: &AppConfig, store: JsonSettingsStore) -> Result<ExitCode> {
    let coordinator = Arc::new(TranslationCoordinator::with_defaults(Arc::new(store), config));
    let (session, mut events) = TranslationSession::new(coordinator);
    let debouncer = Debouncer::spawn(session, Duration::from_millis(config.session.debounce_ms));

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::Started { source, target, .. } => {
                    debug!("Translating {} -> {}", source, target);
                }
                SessionEvent::Finished { response, .. } => print_out(&response.render()),
                SessionEvent::Cleared => print_out(""),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if !debouncer.push(line) {
            break;
        }
    }

    debouncer.finish().await;
    // The session (and its event sender) is gone once the debouncer finishes
    let _ = printer.await;

    Ok(ExitCode::SUCCESS)
}

// CLI output is intentional
#[allow(clippy::print_stdout)]
fn print_out(line: &str) {
    println!("{line}");
}

#[allow(clippy::print_stderr)]
fn print_err(line: &str) {
    eprintln!("{line}");
}
