//! CLI entry point for commentof.
//!
//! Prints the documentation model of Go files, directories and standard
//! library packages as JSON, one document per package.

use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use commentof::Settings;
use commentof::io::{ExitCode, Runner};
use std::path::PathBuf;
use tracing::Level;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Extract doc comments from Go source as JSON
#[derive(Parser, Debug)]
#[command(
    name = "commentof",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract doc comments from Go source as JSON",
    long_about = "Collect types, interfaces and functions with their doc and line comments.\n\
                  Each PATH is a .go file, a package directory, or a standard library \
                  package path resolved under $GOROOT/src.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Files, directories or package paths (`-` is ignored)
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<String>,

    /// Include *_test.go files when reading directories
    #[arg(long)]
    include_test_file: bool,

    /// Keep unexported names in the output
    #[arg(long)]
    include_unexported: bool,

    /// Leave methods as `Recv#Name` functions instead of merging them into their type
    #[arg(long)]
    no_merge_methods: bool,

    /// Path to custom settings.toml file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// CLI flags override settings; they only ever switch behaviour on.
    fn apply(&self, settings: &mut Settings) {
        if self.include_test_file {
            settings.discovery.include_tests = true;
        }
        if self.include_unexported {
            settings.collect.include_unexported = true;
        }
        if self.no_merge_methods {
            settings.collect.merge_methods = false;
        }
        if self.verbose {
            settings.debug = true;
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .map_err(|e| anyhow::anyhow!("loading {}: {e}", path.display()))?,
        None => Settings::load().map_err(|e| anyhow::anyhow!("loading workspace settings: {e}"))?,
    };
    Ok(settings)
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let mut settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::ConfigError.into();
        }
    };
    cli.apply(&mut settings);
    init_logging(settings.debug);

    let stdout = std::io::stdout().lock();
    let mut runner = match Runner::new(settings, stdout) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("!! {e}");
            return ExitCode::from_error(&e).into();
        }
    };

    let mut exit = ExitCode::Success;
    for path in cli.paths.iter().filter(|path| path.as_str() != "-") {
        if let Err(e) = runner.run(path) {
            eprintln!("!! {e}");
            for suggestion in e.recovery_suggestions() {
                eprintln!("  • {suggestion}");
            }
            exit = ExitCode::from_error(&e);
        }
    }
    exit.into()
}
