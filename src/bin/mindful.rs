//! Mindful CLI - Command-line interface for Mindful Signals
//!
//! Commands:
//! - hrv: Compute RMSSD and stress level from RR intervals
//! - trend: Build a scored mood trend from stored entries
//! - score: Score a single mood symbol
//! - doctor: Diagnose configuration and environment

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use mindful_signals::chart::RrChart;
use mindful_signals::encoder::ReportEncoder;
use mindful_signals::entries;
use mindful_signals::{
    is_chronological, score_mood, AnalyticsConfig, AnalyticsError, AnalyticsProcessor,
    IntervalPolicy, MoodEntry, MoodSymbol, ScoredMoodEntry, ValidationError, ENGINE_VERSION,
    PRODUCER_NAME,
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "MINDFUL_LOG";

/// Mindful - signal analytics for mood journaling
#[derive(Parser)]
#[command(name = "mindful")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute HRV stress levels and mood trends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute RMSSD and stress level from comma-separated RR intervals (ms)
    Hrv {
        /// Interval text, e.g. "800, 810, 790"
        #[arg(long, conflicts_with = "input")]
        intervals: Option<String>,

        /// Read interval text from a file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Reject invalid and non-positive tokens instead of dropping them
        #[arg(long)]
        strict: bool,

        /// Load configuration from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print a full JSON report
        #[arg(long)]
        json: bool,

        /// Include the RR chart dataset in the output
        #[arg(long)]
        chart: bool,
    },

    /// Build a scored mood trend from entries sorted ascending by date
    Trend {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Score a single mood symbol (1-5)
    Score {
        /// Mood symbol, e.g. 🙂
        symbol: String,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check a configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one entry per line)
    Ndjson,
    /// JSON array of entries
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one scored entry per line)
    Ndjson,
    /// JSON array of scored entries
    Json,
    /// Pretty-printed trend report
    JsonPretty,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), MindfulCliError> {
    match cli.command {
        Commands::Hrv {
            intervals,
            input,
            strict,
            config,
            json,
            chart,
        } => cmd_hrv(
            intervals,
            input.as_deref(),
            strict,
            config.as_deref(),
            json,
            chart,
        ),

        Commands::Trend {
            input,
            output,
            input_format,
            output_format,
        } => cmd_trend(&input, &output, input_format, output_format),

        Commands::Score { symbol } => cmd_score(&symbol),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn cmd_hrv(
    intervals: Option<String>,
    input: Option<&Path>,
    strict: bool,
    config_path: Option<&Path>,
    json: bool,
    chart: bool,
) -> Result<(), MindfulCliError> {
    let raw = match (intervals, input) {
        (Some(text), _) => text,
        (None, Some(path)) => read_input(path)?,
        (None, None) => return Err(MindfulCliError::MissingIntervals),
    };

    let mut config = match config_path {
        Some(path) => AnalyticsConfig::from_json(&fs::read_to_string(path)?)?,
        None => AnalyticsConfig::default(),
    };
    if strict {
        config.interval_policy = IntervalPolicy::Strict;
    }
    debug!(policy = config.interval_policy.as_str(), "parsing intervals");

    let processor = AnalyticsProcessor::with_config(config);
    let rr = processor.parse_intervals(raw.trim())?;
    let result = mindful_signals::compute_hrv(&rr);

    if json {
        let report = ReportEncoder::new().encode_hrv(&rr, &result);
        let mut value = serde_json::to_value(&report)?;
        if chart {
            value["chart"] = serde_json::to_value(RrChart::new(&rr, &result))?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("HRV (RMSSD): {} ms", result.rmssd_display());
        println!(
            "Stress Level: {} {}",
            result.stress_level.label(),
            result.stress_level.emoji()
        );
        if chart {
            let dataset = RrChart::new(&rr, &result);
            for (label, value) in dataset.labels.iter().zip(&dataset.values) {
                println!("  {label}: {value} ms");
            }
        }
    }

    Ok(())
}

fn cmd_trend(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), MindfulCliError> {
    let input_data = read_input(input)?;

    let entries: Vec<MoodEntry> = match input_format {
        InputFormat::Ndjson => entries::parse_ndjson(&input_data)?,
        InputFormat::Json => entries::parse_array(&input_data)?,
    };

    if !is_chronological(&entries) {
        warn!(
            entries = entries.len(),
            "mood entries are not sorted ascending by date; trend will be drawn out of order"
        );
    }

    let processor = AnalyticsProcessor::new();
    let output_data = match output_format {
        OutputFormat::Ndjson => format_ndjson(&processor.mood_trend(&entries))?,
        OutputFormat::Json => serde_json::to_string(&processor.mood_trend(&entries))? + "\n",
        OutputFormat::JsonPretty => processor.trend_report_json(&entries)? + "\n",
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_score(symbol: &str) -> Result<(), MindfulCliError> {
    let parsed = MoodSymbol::parse(symbol);
    let score = score_mood(symbol);
    if parsed.is_recognized() {
        println!("{} ({}): {}", parsed, parsed.label(), score);
    } else {
        println!("{} (unrecognized, neutral): {}", parsed, score);
    }
    Ok(())
}

fn cmd_doctor(config_path: Option<&Path>, json: bool) -> Result<(), MindfulCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} version {}", PRODUCER_NAME, ENGINE_VERSION),
    });

    // Round the worked example through the engine
    let self_test = mindful_signals::hrv_from_text("800, 810, 790");
    checks.push(match self_test {
        Ok(result) if result.rmssd_display() == "15.81" => DoctorCheck {
            name: "self_test".to_string(),
            status: CheckStatus::Ok,
            message: format!(
                "RMSSD {} ms, {}",
                result.rmssd_display(),
                result.stress_level.label()
            ),
        },
        Ok(result) => DoctorCheck {
            name: "self_test".to_string(),
            status: CheckStatus::Error,
            message: format!("Unexpected RMSSD {}", result.rmssd_display()),
        },
        Err(e) => DoctorCheck {
            name: "self_test".to_string(),
            status: CheckStatus::Error,
            message: e.to_string(),
        },
    });

    if let Some(path) = config_path {
        checks.push(check_config(path));
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (use --input - to read it)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Mindful Doctor Report");
        println!("=====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(MindfulCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn check_config(path: &Path) -> DoctorCheck {
    if !path.exists() {
        return DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Warning,
            message: "Config file does not exist; defaults apply".to_string(),
        };
    }

    match fs::read_to_string(path) {
        Ok(content) => match AnalyticsConfig::from_json(&content) {
            Ok(config) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "Config valid (interval policy: {})",
                    config.interval_policy.as_str()
                ),
            },
            Err(e) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        },
        Err(e) => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Error,
            message: format!("Cannot read config file: {}", e),
        },
    }
}

// Helper functions

fn read_input(path: &Path) -> Result<String, MindfulCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn format_ndjson(series: &[ScoredMoodEntry]) -> Result<String, MindfulCliError> {
    let mut lines: Vec<String> = Vec::new();
    for entry in series {
        lines.push(serde_json::to_string(entry)?);
    }
    Ok(lines.join("\n") + "\n")
}

// Error types

#[derive(Debug)]
enum MindfulCliError {
    Io(io::Error),
    Analytics(AnalyticsError),
    Json(serde_json::Error),
    Validation(ValidationError),
    MissingIntervals,
    DoctorFailed,
}

impl From<io::Error> for MindfulCliError {
    fn from(e: io::Error) -> Self {
        MindfulCliError::Io(e)
    }
}

impl From<AnalyticsError> for MindfulCliError {
    fn from(e: AnalyticsError) -> Self {
        match e {
            AnalyticsError::Validation(v) => MindfulCliError::Validation(v),
            other => MindfulCliError::Analytics(other),
        }
    }
}

impl From<serde_json::Error> for MindfulCliError {
    fn from(e: serde_json::Error) -> Self {
        MindfulCliError::Json(e)
    }
}

impl From<ValidationError> for MindfulCliError {
    fn from(e: ValidationError) -> Self {
        MindfulCliError::Validation(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MindfulCliError> for CliError {
    fn from(e: MindfulCliError) -> Self {
        match e {
            MindfulCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MindfulCliError::Analytics(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Entries need a \"date\" (YYYY-MM-DD) and a \"mood\"".to_string()),
            },
            MindfulCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            MindfulCliError::Validation(e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Enter at least 2 positive RR intervals in ms, comma-separated".to_string()),
            },
            MindfulCliError::MissingIntervals => CliError {
                code: "NO_INTERVALS".to_string(),
                message: "No interval input given".to_string(),
                hint: Some("Pass --intervals \"800,810,790\" or --input <file>".to_string()),
            },
            MindfulCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
