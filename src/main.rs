//! recentfind — report the newest file created today whose name matches a
//! pattern.
//!
//! Thin binary entry point. All logic lives in the `recentfind-core` crate.

use anyhow::Context;
use clap::Parser;
use recentfind_core::{EngineOptions, SearchEngine, SearchError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "recentfind", version, about)]
struct Cli {
    /// Regular expression the whole file name must match.
    pattern: String,

    /// Settings file (default: <config dir>/recentfind/recentfind.ini).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Register an extra search directory before scanning (repeatable).
    #[arg(long = "add", value_name = "DIR")]
    add: Vec<PathBuf>,

    /// Print the search directories in scan order and exit.
    #[arg(long)]
    list_roots: bool,

    /// Print every match instead of only today's newest.
    #[arg(long)]
    all: bool,

    /// Emit JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Separator for the stored extra-directory list.
    #[arg(long, default_value = "\n", hide_default_value = true)]
    separator: String,

    /// Text encoding of the settings file.
    #[arg(long, default_value = "UTF-8")]
    encoding: String,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for piping.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            // Actionable failures get a plain message; anything else keeps the chain.
            match err.downcast_ref::<SearchError>() {
                Some(SearchError::NoMatchFound { pattern }) => {
                    eprintln!("No file matching `{pattern}` found. Add a directory with --add DIR.");
                }
                Some(SearchError::InvalidDirectory { path }) => {
                    eprintln!("{} is not a directory; pass an existing folder to --add.", path.display());
                }
                _ => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = match cli.settings {
        Some(p) => p,
        None => default_settings_path()?,
    };
    tracing::debug!("Using settings file {}", settings.display());

    let options = EngineOptions {
        separator: cli.separator,
        encoding: cli.encoding,
    };
    let mut engine = SearchEngine::open(&cli.pattern, &settings, options)
        .with_context(|| format!("opening settings {}", settings.display()))?;

    for dir in &cli.add {
        if engine.add_directory(dir)? {
            eprintln!("added {}", dir.display());
        } else {
            eprintln!("already searched: {}", dir.display());
        }
    }

    if cli.list_roots {
        let roots = engine.root_directories();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&roots)?);
        } else {
            for root in roots {
                println!("{}", root.display());
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    engine.scan()?;

    if cli.all {
        let matches = engine.matches();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(matches.records())?);
        } else {
            for record in &matches {
                println!(
                    "{}\t{}",
                    record.created.format("%Y-%m-%d %H:%M:%S"),
                    record.path().display()
                );
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    match engine.most_recent_today() {
        Some(recent) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recent)?);
            } else {
                println!("{}", recent.path.join(&recent.name).display());
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No matching file was created today.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn default_settings_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir().context("no configuration directory for this user")?;
    Ok(base.join("recentfind").join("recentfind.ini"))
}
