use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use leadrank::config::{WeightSources, WeightsOrigin, DEFAULT_WEIGHTS_PATH};
use leadrank::lead::{LeadQuery, SortOrder};
use leadrank::scoring::Weights;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Json,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a JSON file of leads and list them
    Score {
        /// Path to a JSON array of lead objects
        leads: PathBuf,

        /// Ideal customer profile as JSON, e.g. '{"industries":["SaaS"],"countries":["US"]}'
        #[arg(long)]
        prefs: Option<String>,

        /// Only show leads scoring at least this much
        #[arg(long, default_value_t = 0)]
        min_score: u8,

        /// Sort order (score_desc)
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show the per-factor breakdown under each lead (table format only)
        #[arg(long)]
        explain: bool,

        /// Append top industries and Hot leads per country (table format only)
        #[arg(long)]
        summary: bool,
    },
    /// Write the default weights to a file for tuning
    Init {
        /// Destination (defaults to config/lead_scoring.json); .yaml/.yml writes YAML
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective weights after merging all sources
    Weights {
        /// Print as YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "leadrank")]
#[command(about = "Sales lead scoring and prioritization CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a weights file (JSON or YAML); $LEAD_SCORING_WEIGHTS_JSON takes precedence
    #[arg(short, long, global = true)]
    weights: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve weights from all layers and validate them, exiting on invalid config.
fn load_validated_weights(path: Option<PathBuf>) -> (Weights, WeightsOrigin) {
    let sources = WeightSources::from_env(path);
    let (weights, origin) = leadrank::config::resolve_weights(&sources);
    tracing::debug!("using weights from {}", origin);

    if let Err(errors) = leadrank::scoring::validate_weights(&weights) {
        eprintln!("Weights config errors ({}):", origin);
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    (weights, origin)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    match cli.command {
        Commands::Init { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_WEIGHTS_PATH));
            if let Err(e) = leadrank::config::write_default_weights(&path, force) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Weights written to {}", path.display());
        }
        Commands::Weights { yaml } => {
            let (weights, origin) = load_validated_weights(cli.weights);
            let rendered = if yaml {
                serde_saphyr::to_string(&weights).map_err(|e| e.to_string())
            } else {
                serde_json::to_string_pretty(&weights).map_err(|e| e.to_string())
            };
            match rendered {
                Ok(text) => {
                    eprintln!("# source: {}", origin);
                    println!("{}", text.trim_end());
                }
                Err(e) => {
                    eprintln!("Failed to render weights: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Score {
            leads,
            prefs,
            min_score,
            sort,
            format,
            explain,
            summary,
        } => {
            let (weights, _origin) = load_validated_weights(cli.weights);

            let records = match leadrank::lead::load_leads(&leads) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let prefs = prefs.as_deref().and_then(|raw| {
                let parsed = leadrank::scoring::parse_prefs_arg(raw);
                if parsed.is_none() {
                    tracing::warn!("ignoring --prefs: not valid JSON");
                }
                parsed
            });

            let scored =
                leadrank::scoring::score_and_label_leads(&records, Some(&weights), prefs.as_ref());
            let query = LeadQuery { min_score, sort };
            let selected = query.apply(scored);

            tracing::info!(
                total = records.len(),
                shown = selected.len(),
                elapsed = ?start_time.elapsed(),
                "scored leads"
            );

            match format {
                OutputFormat::Json => match leadrank::output::format_json(&selected) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                OutputFormat::Tsv => {
                    let tsv = leadrank::output::format_tsv(&selected);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Table if explain && !selected.is_empty() => {
                    // Verbose mode: each row followed by its factor breakdown
                    let use_colors = leadrank::output::should_use_colors();
                    for (idx, scored) in selected.iter().enumerate() {
                        println!(
                            "{}",
                            leadrank::output::format_scored_row(idx + 1, scored, use_colors)
                        );
                        let breakdown =
                            leadrank::scoring::explain_lead(&scored.lead, &weights, prefs.as_ref());
                        println!(
                            "{}",
                            leadrank::output::format_breakdown(&breakdown, use_colors)
                        );
                    }
                }
                OutputFormat::Table => {
                    let use_colors = leadrank::output::should_use_colors();
                    println!(
                        "{}",
                        leadrank::output::format_scored_table(&selected, use_colors)
                    );
                }
            }

            if summary && matches!(format, OutputFormat::Table) {
                let use_colors = leadrank::output::should_use_colors();
                let aggregates = leadrank::lead::summarize(&selected);
                println!();
                println!(
                    "{}",
                    leadrank::output::format_summary(&aggregates, use_colors)
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
