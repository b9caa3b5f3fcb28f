mod render;

use anyhow::{anyhow, bail, Context, Result};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use textsleuth_core::api::{AnalysisResponse, ForensicsEngine};
use textsleuth_core::cipher::{caesar_shift, CipherKind};

#[derive(Parser)]
#[command(author, version, about = "Text forensics: ciphers, hidden content, plagiarism, authorship", long_about = None)]
struct Cli {
    /// Print the raw JSON response envelope instead of a report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Brute-force classical ciphers and rank candidate decodings
    Decode {
        /// Text to analyze; omitted or "-" reads stdin
        text: Option<String>,
        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Cipher family: caesar, atbash, reverse, morse, base64, all
        #[arg(short, long, default_value = "all")]
        kind: String,
    },
    /// Scan a text for hidden messages
    Hidden {
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Scan a text for steganographic anomalies
    Anomalies {
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Compare a suspect document against an original
    Plagiarism {
        /// Path to the original document
        original: PathBuf,
        /// Path to the suspect document
        suspect: PathBuf,
        /// Decision threshold in [0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Compare the writing style of two documents
    Authorship {
        first: PathBuf,
        second: PathBuf,
    },
    /// Caesar-encode a text, for demos and round trips
    Encode {
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Rotation in 1..=25
        #[arg(short, long)]
        shift: u8,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let engine = ForensicsEngine::new();

    match cli.command {
        Commands::Decode { text, file, kind } => {
            let input = read_input(text, file)?;
            let kind: CipherKind = kind.parse().map_err(|e| anyhow!("{e}"))?;
            emit(&engine.decode_cipher(&input, kind), cli.json, render::decode_report)?;
        }
        Commands::Hidden { text, file } => {
            let input = read_input(text, file)?;
            emit(&engine.detect_hidden_message(&input), cli.json, render::hidden_report)?;
        }
        Commands::Anomalies { text, file } => {
            let input = read_input(text, file)?;
            emit(&engine.detect_anomalies(&input), cli.json, render::anomaly_report)?;
        }
        Commands::Plagiarism {
            original,
            suspect,
            threshold,
        } => {
            let original = read_file(&original)?;
            let suspect = read_file(&suspect)?;
            emit(
                &engine.check_plagiarism(&original, &suspect, threshold),
                cli.json,
                render::plagiarism_report,
            )?;
        }
        Commands::Authorship { first, second } => {
            let first = read_file(&first)?;
            let second = read_file(&second)?;
            emit(
                &engine.analyze_authorship(&first, &second),
                cli.json,
                render::authorship_report,
            )?;
        }
        Commands::Encode { text, file, shift } => {
            if !(1..=25).contains(&shift) {
                bail!("shift must be in 1..=25");
            }
            let input = read_input(text, file)?;
            println!("{}", caesar_shift(&input, shift));
        }
    }

    Ok(())
}

/// Resolves the analysis text from the positional argument, a file, or
/// stdin when neither is given (or the argument is `-`).
fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(path) = file {
        return read_file(&path);
    }
    match text {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read text from stdin")?;
            Ok(buffer)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Prints the response: the raw envelope in JSON mode, a rendered report
/// otherwise. A failed analysis becomes a JSON envelope with
/// `success: false`, or a non-zero exit in report mode.
fn emit<T: Serialize>(
    response: &AnalysisResponse<T>,
    json: bool,
    render: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    match (&response.data, &response.error) {
        (Some(data), _) => {
            print!("{}", render(data));
            println!(
                "\nGenerated: {}",
                response.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
            );
            Ok(())
        }
        (None, Some(error)) => bail!("analysis failed: {error}"),
        (None, None) => bail!("analysis returned an empty response"),
    }
}
