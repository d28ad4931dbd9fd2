use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use omegaaudit::config::{Config, CONFIG_FILE_NAME};
use omegaaudit::error::AuditError;
use omegaaudit::output::{self, console, OutputFormat};
use omegaaudit::rules::RuleEngine;
use omegaaudit::scoring::RiskLevel;
use omegaaudit::{AuditLevel, AuditOptions, SavedAudit, ScanOptions, ScanOutput};

#[derive(Parser)]
#[command(
    name = "omega-audit",
    about = "Security scanner and audit engine for OMEGA contracts",
    version
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a contract file or directory for vulnerabilities
    Scan {
        /// File or directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// File-name pattern for directory scans
        #[arg(long, short = 'p')]
        pattern: Option<String>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Show scan statistics
        #[arg(long)]
        stats: bool,
    },

    /// Run a comprehensive audit of a contract project
    Audit {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Audit level (basic, standard, comprehensive, critical)
        #[arg(long, short = 'l')]
        level: Option<String>,

        /// File-name pattern selecting contract sources
        #[arg(long, short = 'p')]
        pattern: Option<String>,

        /// Directory for the persisted reports
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// List all available detection rules
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .omega-audit.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Scan {
            path,
            config,
            pattern,
            format,
            output,
            stats,
        } => cmd_scan(path, config, pattern, format, output, stats),
        Commands::Audit {
            path,
            config,
            level,
            pattern,
            output_dir,
        } => cmd_audit(path, config, level, pattern, output_dir),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    path: PathBuf,
    config_path: Option<PathBuf>,
    pattern: Option<String>,
    format_str: String,
    output_path: Option<PathBuf>,
    show_stats: bool,
) -> Result<i32, AuditError> {
    if !path.exists() {
        eprintln!("Error: Path not found: {}", path.display());
        return Ok(1);
    }

    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = ScanOptions {
        config_path,
        pattern_override: pattern,
    };
    let ScanOutput { report, statistics } = omegaaudit::scan(&path, &options)?;

    match (output_path, format) {
        (Some(out), OutputFormat::Json) => output::json::save_scan_report(&report, &out)?,
        (Some(out), OutputFormat::Console) => {
            std::fs::write(&out, output::render_scan(&report, format)?)?;
        }
        (None, _) => print!("{}", output::render_scan(&report, format)?),
    }

    if show_stats {
        print!("{}", console::render_statistics(&statistics));
    }

    // Exit code: 0 = LOW/INFO risk, 1 = anything higher
    Ok(match report.summary.risk_level {
        RiskLevel::Low | RiskLevel::Info => 0,
        _ => 1,
    })
}

fn cmd_audit(
    path: PathBuf,
    config_path: Option<PathBuf>,
    level_str: Option<String>,
    pattern: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<i32, AuditError> {
    if !path.exists() {
        eprintln!("Error: Project path not found: {}", path.display());
        return Ok(1);
    }

    let level = match level_str {
        Some(s) => Some(AuditLevel::from_str_lenient(&s).ok_or_else(|| {
            AuditError::Config(format!("unknown audit level '{}'", s))
        })?),
        None => None,
    };

    let options = AuditOptions {
        config_path,
        level_override: level,
        pattern_override: pattern,
        output_dir_override: output_dir,
    };
    let SavedAudit { report, json_path } = omegaaudit::audit_and_save(&path, &options)?;
    print!("{}", console::render_audit_summary(&report, &json_path));

    Ok(if report.risk_assessment.risk_level.is_severe() {
        1
    } else {
        0
    })
}

fn cmd_list_rules(format_str: String) -> Result<i32, AuditError> {
    let engine = RuleEngine::new();
    let rules = engine.list_rules();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<12} {:<38} {:<10} DESCRIPTION", "ID", "TITLE", "SEVERITY");
            println!("{}", "-".repeat(100));
            for rule in &rules {
                println!(
                    "{:<12} {:<38} {:<10} {}",
                    rule.id,
                    rule.title,
                    rule.severity.to_string(),
                    rule.description,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, AuditError> {
    let path = PathBuf::from(CONFIG_FILE_NAME);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", CONFIG_FILE_NAME);
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {}", CONFIG_FILE_NAME);

    Ok(0)
}
