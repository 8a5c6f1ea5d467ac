//! `cjson` CLI: check, normalize and summarize composite JSON documents.
//!
//! A composite document is a JSON array or object whose nested values are all arrays,
//! objects or `null`. Anything else is rejected as a whole; run with
//! `RUST_LOG=composite_json=trace` to see which nested value failed.
//!
//! ## Usage
//!
//! ```sh
//! # Is stdin a composite document? Prints "array" or "object".
//! echo '{"a":[null,{}]}' | cjson check
//!
//! # Re-encode compactly (object keys sorted), file to file
//! cjson normalize -i data.json -o data.min.json
//!
//! # Pretty-print, going through serde_json::Value instead of the serde decoder
//! cjson normalize --pretty --via dynamic -i data.json
//!
//! # Count arrays, objects and nulls
//! cjson stats -i data.json
//!
//! # Show decoding decisions
//! RUST_LOG=composite_json=trace cjson check -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use composite_json::JsonValue;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cjson",
    version,
    about = "Check and normalize composite JSON (arrays and objects)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoding decisions to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether the input is a composite JSON array or object
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Which bridge reads the input
        #[arg(long, value_enum, default_value_t = Via::Serde)]
        via: Via,
    },
    /// Decode and re-encode the input
    Normalize {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
        /// Which bridge reads and writes the document
        #[arg(long, value_enum, default_value_t = Via::Serde)]
        via: Via,
    },
    /// Show counts of arrays, objects and nulls, and the nesting depth
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

/// How a document gets in and out of a `JsonValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Via {
    /// serde decoder/encoder (object-first shape guessing, error paths)
    Serde,
    /// parse into serde_json::Value, then convert (array-first probing)
    Dynamic,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { input, via } => {
            let text = read_input(input.as_deref())?;
            let value = read_value(&text, via)?;
            println!("{}", value.kind());
        }
        Commands::Normalize {
            input,
            output,
            pretty,
            via,
        } => {
            let text = read_input(input.as_deref())?;
            let value = read_value(&text, via)?;
            let rendered = render_value(&value, via, pretty)?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Stats { input } => {
            let text = read_input(input.as_deref())?;
            let value = read_value(&text, Via::Serde)?;
            let summary = value.summary();
            println!("Kind:       {}", value.kind());
            println!("Arrays:     {}", summary.arrays);
            println!("Objects:    {}", summary.objects);
            println!("Nulls:      {}", summary.nulls);
            println!("Max depth:  {}", summary.max_depth);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_value(text: &str, via: Via) -> Result<JsonValue> {
    match via {
        Via::Serde => {
            composite_json::from_json_str(text).context("Failed to decode composite JSON")
        }
        Via::Dynamic => {
            let tree: serde_json::Value =
                serde_json::from_str(text).context("Failed to parse JSON")?;
            JsonValue::try_from(&tree).context("Failed to convert JSON tree")
        }
    }
}

fn render_value(value: &JsonValue, via: Via, pretty: bool) -> Result<String> {
    let rendered = match (via, pretty) {
        (Via::Serde, false) => composite_json::to_json_string(value)?,
        (Via::Serde, true) => composite_json::to_json_string_pretty(value)?,
        (Via::Dynamic, false) => serde_json::to_string(&value.to_serde_json())?,
        (Via::Dynamic, true) => serde_json::to_string_pretty(&value.to_serde_json())?,
    };
    tracing::debug!(bytes = rendered.len(), ?via, "rendered document");
    Ok(rendered)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
