//! Theme Replay CLI
//!
//! Replays a JSON event script against an in-memory page and prints the
//! final state as JSON.
//!
//! Usage:
//!   theme-replay [--storage <value>] <script.json>
//!   theme-replay [--storage <value>] --stdin
//!
//! `--storage` seeds the persisted preference, overriding the script's own
//! `stored` field.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use theme_switcher::config;
use theme_switcher::replay::{replay, Script};

enum Input {
    Stdin,
    File(String),
}

struct Args {
    storage: Option<String>,
    input: Input,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut storage = None;
    let mut input = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--storage" => {
                let value = iter.next().context("--storage needs a value")?;
                storage = Some(value.clone());
            }
            "--stdin" => input = Some(Input::Stdin),
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("unknown option {}", other),
            path => input = Some(Input::File(path.to_string())),
        }
    }

    let Some(input) = input else {
        print_usage();
        bail!("missing script argument");
    };

    Ok(Args { storage, input })
}

fn print_usage() {
    eprintln!("Theme Replay - Run an event script against the theme switcher");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  theme-replay [--storage <value>] <script.json>");
    eprintln!("  theme-replay [--storage <value>] --stdin");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  theme-replay --storage theme-ocean session.json");
    eprintln!(
        "  echo '[{{\"type\":\"click\",\"target\":\"toggle\"}}]' | theme-replay --stdin"
    );
}

fn read_input(input: &Input) -> Result<String> {
    match input {
        Input::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
        Input::File(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theme_switcher=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = config::load_config()?;
    tracing::debug!(?config, "Configuration loaded");

    let json = read_input(&args.input)?;
    let mut script = Script::parse(&json)?;
    if args.storage.is_some() {
        script.stored = args.storage;
    }
    tracing::info!("Replaying {} events", script.events.len());

    let report = replay(&script, &config);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
