use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reach_rank::output::{self, ScoredText};
use reach_rank::prompt::{optimize_prompt, MAX_POST_CHARS};
use reach_rank::scoring::{validate_scoring, Ranker};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single message (reads stdin when no text is given)
    Score {
        /// Message text; multiple words are joined with spaces
        text: Vec<String>,

        /// An image, GIF or video is attached
        #[arg(short, long)]
        media: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score one message per line from a file or stdin
    Batch {
        /// Input file (defaults to stdin)
        file: Option<PathBuf>,

        /// Treat every message as having media attached
        #[arg(short, long)]
        media: bool,

        /// Print one JSON object per line instead of TSV
        #[arg(long)]
        json: bool,
    },
    /// List the ranking rules and their multipliers
    Rules,
    /// Print a prompt for rewriting a message with an external model
    Prompt {
        /// Message text; multiple words are joined with spaces
        text: Vec<String>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "reach-rank")]
#[command(about = "Score a post against reach heuristics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-rule breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/reach-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match reach_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let ranker = match Ranker::from_config(&scoring) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let use_colors = output::should_use_colors();

    let outcome = match cli.command {
        Commands::Score { text, media, json } => {
            run_score(&ranker, text, media, json, cli.verbose, use_colors)
        }
        Commands::Batch { file, media, json } => run_batch(&ranker, file, media, json),
        Commands::Rules => {
            println!("{}", output::format_rules(&ranker));
            Ok(())
        }
        Commands::Prompt { text } => read_text(text).map(|text| {
            let (names, tlds) = scoring.competitor_domains();
            print!("{}", optimize_prompt(&text, &names, &tlds));
        }),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_IO);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_score(
    ranker: &Ranker,
    text: Vec<String>,
    media: bool,
    json: bool,
    verbose: bool,
    use_colors: bool,
) -> Result<()> {
    let text = read_text(text)?;
    warn_if_long(&text);
    let result = ranker.rank(&text, media);

    if json {
        println!("{}", output::format_json(&result)?);
        return Ok(());
    }

    println!("{}", output::format_result(&result, use_colors));
    if verbose {
        let contributions = ranker.contributions(&text, media).unwrap_or_default();
        println!();
        println!("{}", output::format_breakdown(&contributions, use_colors));
    }
    Ok(())
}

fn run_batch(ranker: &Ranker, file: Option<PathBuf>, media: bool, json: bool) -> Result<()> {
    let input = match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => read_stdin()?,
    };

    let scored: Vec<ScoredText> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            warn_if_long(line);
            ScoredText {
                text: line,
                result: ranker.rank(line, media),
            }
        })
        .collect();
    tracing::debug!("scored {} messages", scored.len());

    if json {
        for s in &scored {
            println!("{}", output::format_json_line(s)?);
        }
    } else if !scored.is_empty() {
        println!("{}", output::format_tsv(&scored));
    }
    Ok(())
}

/// Join positional words, or fall back to stdin when there are none.
fn read_text(words: Vec<String>) -> Result<String> {
    if words.is_empty() {
        let text = read_stdin()?;
        Ok(text.trim_end_matches(['\n', '\r']).to_string())
    } else {
        Ok(words.join(" "))
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn warn_if_long(text: &str) {
    let len = text.chars().count();
    if len > MAX_POST_CHARS {
        tracing::warn!(
            "message is {} characters, longer than the {} a post allows",
            len,
            MAX_POST_CHARS
        );
    }
}
