mod telemetry;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ApiConfig, AppServices, CatalogService, ChatClient, Clock, LessonService, ProgressService,
};
use ui::{App, UiApp, build_app_context};

const DB_URL_ENV: &str = "EE_DB_URL";
const DEFAULT_DB_URL: &str = "sqlite://engineer_english.sqlite3";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn chat(&self) -> Arc<dyn ChatClient> {
        self.services.chat()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    api_base: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  engineer-english ui   [--db <sqlite_url>] [--api-base <url>]");
    eprintln!("  engineer-english sync [--db <sqlite_url>] [--api-base <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --api-base {}", services::api::DEFAULT_API_BASE_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!(
        "  {DB_URL_ENV}, {}, LOG_LEVEL, LOG_FORMAT=json|pretty",
        services::api::API_BASE_URL_ENV
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Sync,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "sync" => Some(Self::Sync),
            _ => None,
        }
    }
}

impl Args {
    /// Flags win over `db_env`; the API base falls back to its own
    /// environment variable inside `ApiConfig::resolve`.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        db_env: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = db_env
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut api_base = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-base" => {
                    api_base = Some(require_value(args, "--api-base")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, api_base })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, std::env::var(DB_URL_ENV).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let api = ApiConfig::resolve(parsed.api_base.as_deref())?;
    prepare_sqlite_file(&parsed.db_url)?;
    tracing::info!(db_url = %parsed.db_url, api_base = %api.base_url(), ?cmd, "starting");
    let services = AppServices::new_sqlite(&parsed.db_url, api, Clock::default_clock()).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Engineer English")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Sync => {
            let report = services.progress().sync_local_to_server().await?;
            if report.uploaded == 0 {
                println!("nothing to sync");
            } else {
                println!("synced {} lesson(s)", report.uploaded);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], db_env: Option<&str>) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter, db_env.map(str::to_string))
    }

    #[test]
    fn defaults_apply_without_flags() {
        let args = parse(&[], None).unwrap();
        assert_eq!(args.db_url, DEFAULT_DB_URL);
        assert_eq!(args.api_base, None);
    }

    #[test]
    fn flags_win_over_environment() {
        let args = parse(
            &["--db", "sqlite:///tmp/ee.sqlite3", "--api-base", "http://10.0.0.2:8000"],
            Some("sqlite:///var/env.sqlite3"),
        )
        .unwrap();
        assert_eq!(args.db_url, "sqlite:///tmp/ee.sqlite3");
        assert_eq!(args.api_base.as_deref(), Some("http://10.0.0.2:8000"));

        let from_env = parse(&[], Some("sqlite:///var/env.sqlite3")).unwrap();
        assert_eq!(from_env.db_url, "sqlite:///var/env.sqlite3");
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            parse(&["--db"], None),
            Err(ArgsError::MissingValue { flag: "--db" })
        );
        assert_eq!(
            parse(&["--bogus"], None),
            Err(ArgsError::UnknownArg("--bogus".into()))
        );
        assert!(matches!(
            parse(&["--db", "  "], None),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = normalize_sqlite_url("data/ee.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/ee.sqlite3"), "{url}");
        assert_eq!(
            normalize_sqlite_url("sqlite::memory:".into()),
            "sqlite::memory:"
        );
    }

    #[test]
    fn subcommands_parse() {
        assert_eq!(Command::from_arg("ui"), Some(Command::Ui));
        assert_eq!(Command::from_arg("sync"), Some(Command::Sync));
        assert_eq!(Command::from_arg("seed"), None);
    }
}
