//! `rison` CLI — convert between Rison and JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Decode Rison to JSON (stdin → stdout)
//! echo "(name:Alice,scores:!(95,87))" | rison decode
//!
//! # Decode O-Rison from a query string, pretty-printed
//! echo "q:'red shoes',page:2" | rison decode -m object --pretty
//!
//! # Error messages in Japanese
//! echo "(a:1" | rison decode --lang ja
//!
//! # Encode JSON from file to file
//! rison encode -i state.json -o state.rison
//!
//! # Escape Rison for a URL query
//! rison encode -m object -i state.json | rison quote
//! ```
//!
//! Set `RUST_LOG=debug` to see decoder diagnostics on stderr.

use std::io::{self, Read, Write};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rison_core::{json, Decoder, Mode, SUPPORTED_LANGUAGES};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rison", version, about = "Rison ↔ JSON converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode Rison into JSON
    Decode {
        /// Rison variation of the input: full, object (O-Rison) or array (A-Rison)
        #[arg(short, long, default_value = "full")]
        mode: Mode,
        /// Allow whitespace between tokens
        #[arg(long)]
        skip_whitespace: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Language of error messages
        #[arg(long, default_value = "en")]
        lang: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Encode JSON into Rison
    Encode {
        /// Rison variation of the output: full, object (O-Rison) or array (A-Rison)
        #[arg(short, long, default_value = "full")]
        mode: Mode,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Percent-encode text for a URI query, keeping Rison readable
    Quote {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            mode,
            skip_whitespace,
            pretty,
            lang,
            input,
            output,
        } => {
            if !SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
                debug!(lang = %lang, "unsupported language, using en");
            }
            let rison = read_input(input.as_deref())?;
            let value = match Decoder::new(mode)
                .skip_whitespace(skip_whitespace)
                .decode(trim_line_ending(&rison))
            {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Error: {}", e.describe(&lang));
                    process::exit(1);
                }
            };
            let rendered = if pretty {
                json::to_json_pretty(&value)
            } else {
                json::to_json(&value)
            };
            json::dismantle(value);
            write_output(output.as_deref(), &rendered.context("Failed to write JSON")?)?;
        }
        Commands::Encode {
            mode,
            input,
            output,
        } => {
            let json = read_input(input.as_deref())?;
            let json = String::from_utf8(json).context("JSON input is not valid UTF-8")?;
            let rison = rison_core::encode_from_json(&json, mode)
                .with_context(|| format!("Failed to encode JSON to {mode}"))?;
            write_output(output.as_deref(), &rison)?;
        }
        Commands::Quote { input, output } => {
            let text = read_input(input.as_deref())?;
            let quoted = rison_core::quote(trim_line_ending(&text));
            let quoted = String::from_utf8(quoted).context("Quoted output is not ASCII")?;
            write_output(output.as_deref(), &quoted)?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Drop one trailing `\n` or `\r\n`, as left by `echo` or an editor.
fn trim_line_ending(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
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
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", content).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
