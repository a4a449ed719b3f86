use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use env_logger::Env;
use services::config::{ENV_API_KEY, parse_timeout_secs};
use services::{
    AiConfig, AppServices, Clock, ConfigurationError, QuizGenerationService, SummaryService,
    load_document,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    initial_text: Option<String>,
}

impl UiApp for DesktopApp {
    fn summaries(&self) -> Arc<SummaryService> {
        self.services.summaries()
    }

    fn quizzes(&self) -> Arc<QuizGenerationService> {
        self.services.quizzes()
    }

    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn initial_text(&self) -> Option<String> {
        self.initial_text.clone()
    }
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    file: Option<PathBuf>,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--file <path>] [--model <name>] [--base-url <url>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --file          preload a .txt or .md document into the input step");
    eprintln!("  --model         chat model name (default deepseek-chat)");
    eprintln!("  --base-url      OpenAI-compatible API root (default https://api.deepseek.com/v1)");
    eprintln!("  --timeout-secs  request timeout; no timeout when omitted");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  {ENV_API_KEY} (required), REVISE_AI_BASE_URL, REVISE_AI_MODEL,");
    eprintln!("  REVISE_AI_TEMPERATURE, REVISE_AI_TIMEOUT_SECS, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => parsed.model = Some(require_value(args, "--model")?),
                "--base-url" => parsed.base_url = Some(require_value(args, "--base-url")?),
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    let timeout = parse_timeout_secs(&value)
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    parsed.timeout = Some(timeout);
                }
                "--file" => parsed.file = Some(PathBuf::from(require_value(args, "--file")?)),
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

/// Environment config with command-line overrides. A missing key is not fatal: the app
/// starts unconfigured and tells the user.
fn resolve_config(args: &Args) -> Result<Option<AiConfig>, ConfigurationError> {
    let mut config = match AiConfig::from_env() {
        Ok(config) => config,
        Err(ConfigurationError::MissingApiKey) => {
            log::warn!("{ENV_API_KEY} is not set; summaries and quizzes are disabled");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(model) = &args.model {
        config = config.with_model(model.as_str());
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    log::info!("using model {} at {}", config.model, config.endpoint());
    Ok(Some(config))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let config = resolve_config(&args)?;
    let services = AppServices::from_config(config, Clock::system())?;

    let initial_text = match &args.file {
        Some(path) => Some(load_document(path)?.text.as_str().to_string()),
        None => None,
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        initial_text,
    });
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top; turn it off explicitly.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Revise")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
