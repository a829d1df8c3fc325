//! Credit Guardian CLI - Command-line interface for credit data validation
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like file I/O, process exit codes, and terminal output
//! - Provides clean separation between user interface and business logic

use clap::{Parser, Subcommand, ValueEnum};
use credit_guardian::{
    CreditReportDraft, CreditResult, CreditValidator, FicoScore, OutputFormat, Policy,
    ReportFormatter, ReportOptions, Severity,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

/// Credit Guardian - FCRA-aligned credit data validation
#[derive(Parser)]
#[command(name = "credit-guardian")]
#[command(version = "0.1.0")]
#[command(about = "FCRA-aligned validation for consumer credit report data")]
#[command(
    long_about = "Credit Guardian validates consumer credit report data: FICO score range, permissible purpose whitelists, report freshness, and bureau attribution. Designed for intake pipelines and terminal use."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Policy file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a credit data JSON document for findings
    Check {
        /// Path to the JSON document (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Minimum severity level to report
        #[arg(short, long, value_enum)]
        severity: Option<SeverityArg>,

        /// Maximum number of findings to report
        #[arg(long)]
        max_findings: Option<usize>,
    },

    /// Render a credit score with its qualitative band
    Score {
        /// The score to render
        value: u16,

        /// Key factor lines shown under the score (repeatable)
        #[arg(long = "factor", action = clap::ArgAction::Append)]
        factors: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Project the score improvement from removing negative items
    Project {
        /// Current credit score
        score: u16,

        /// Number of negative items assumed removed
        #[arg(long)]
        negative_items: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// List permissible purposes from the active policy
    Purposes,

    /// Validate a policy file
    ValidateConfig {
        /// Policy file to validate
        config_file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum SeverityArg {
    Info,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run_command(cli);

    match result {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> CreditResult<i32> {
    match cli.command {
        Commands::Check { input, format, severity, max_findings } => run_check(
            cli.config,
            input,
            format,
            severity,
            max_findings,
            !cli.no_color,
        ),
        Commands::Score { value, factors, format } => {
            run_score(value, factors, format, !cli.no_color)
        }
        Commands::Project { score, negative_items, format } => {
            run_project(cli.config, score, negative_items, format, !cli.no_color)
        }
        Commands::Purposes => run_purposes(cli.config),
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config))
        }
    }
}

/// Load the active policy: explicit path, conventional file names, or defaults
fn load_policy(config_path: Option<PathBuf>) -> CreditResult<Policy> {
    if let Some(config_path) = config_path {
        return Policy::load_from_file(config_path);
    }

    let default_configs =
        ["credit_guardian.yaml", "credit_guardian.yml", ".credit_guardian.yaml"];

    for config_name in &default_configs {
        if Path::new(config_name).exists() {
            return Policy::load_from_file(config_name);
        }
    }

    Ok(Policy::default())
}

fn run_check(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    format: OutputFormatArg,
    severity: Option<SeverityArg>,
    max_findings: Option<usize>,
    use_colors: bool,
) -> CreditResult<i32> {
    let policy = load_policy(config_path)?;

    let json = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let draft = CreditReportDraft::from_json(&json)?;

    let formatter = ReportFormatter::new(ReportOptions {
        use_colors,
        max_findings,
        min_severity: severity.map(|s| s.into()),
    });
    let validator = CreditValidator::with_policy(policy).with_report_formatter(formatter);

    let report = validator.check_draft(&draft);

    let formatted = validator.format_report(&report, format.into())?;
    println!("{formatted}");

    // Exit code 1 for blocking findings
    if report.is_valid() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn run_score(
    value: u16,
    factors: Vec<String>,
    format: OutputFormatArg,
    use_colors: bool,
) -> CreditResult<i32> {
    let card = CreditValidator::new().score_card(value)?.with_factors(factors);

    let formatter = ReportFormatter::new(ReportOptions { use_colors, ..Default::default() });
    let formatted = formatter.format_score_card(&card, format.into())?;
    println!("{formatted}");

    Ok(0)
}

fn run_project(
    config_path: Option<PathBuf>,
    score: u16,
    negative_items: u32,
    format: OutputFormatArg,
    use_colors: bool,
) -> CreditResult<i32> {
    let policy = load_policy(config_path)?;
    let validator = CreditValidator::with_policy(policy);

    let projection = validator.project(score, negative_items)?;

    let formatter = ReportFormatter::new(ReportOptions { use_colors, ..Default::default() });
    let current = FicoScore::new(score)?;
    let formatted = formatter.format_projection(current, &projection, format.into())?;
    println!("{formatted}");

    Ok(0)
}

fn run_purposes(config_path: Option<PathBuf>) -> CreditResult<i32> {
    let policy = load_policy(config_path)?;

    println!("📋 Permissible Purposes (FCRA Section 604)\n");
    for purpose in &policy.purposes.allowed {
        println!("  ✅ {purpose}");
    }
    println!("\n{} purposes allowed", policy.purposes.allowed.len());

    Ok(0)
}

fn run_validate_config(config_path: Option<PathBuf>) -> CreditResult<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("credit_guardian.yaml"));

    println!("Validating policy: {}", config_path.display());

    match Policy::load_from_file(&config_path) {
        Ok(policy) => {
            println!("✅ Policy is valid");

            println!("📊 Policy summary:");
            println!("  Permissible purposes: {}", policy.purposes.allowed.len());
            println!("  Report freshness window: {} days", policy.freshness.max_report_age_days);
            println!("  Low score advisory floor: {}", policy.advisory.low_score_floor);
            println!(
                "  Improvement projection: {} points/item, {} cap",
                policy.improvement.points_per_item, policy.improvement.max_total_points
            );

            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ Policy validation failed: {e}");
            Ok(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}
