//! TrendScan CLI: market scan, single-symbol analysis and the interactive loop.
//!
//! Commands:
//! - `scan`: assess the market index, then screen the top listings by turnover
//! - `analyze`: trend, SAR stop level and advice for one code
//! - `interactive`: scan, then read codes from stdin (`q` quits, `r` rescans)
//! - `config init`: write the default configuration

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use trendscan_core::data::UniverseSource;
use trendscan_core::signals::BuyRule;
use trendscan_runner::{
    assess_market, build_provider, build_screener, build_universe, export_scan_json,
    export_series_csv, run_scan, write_artifact, Analysis, ScanConfig, ScanReport, Screener,
};

const DEFAULT_CONFIG_PATH: &str = "trendscan.toml";

#[derive(Parser)]
#[command(
    name = "trendscan",
    about = "TrendScan CLI: Parabolic SAR / MACD / Bollinger trend screener"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./trendscan.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess the market index and screen the most traded listings.
    Scan {
        /// Override the number of listings to screen.
        #[arg(long)]
        top_n: Option<usize>,

        /// Write the full scan report as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Show trend, SAR stop level and advice for one listing code.
    Analyze {
        /// Listing code (e.g., 2330). The configured suffix is appended.
        code: String,

        /// Write the indicator series as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Scan once, then analyze codes typed on stdin.
    Interactive,
    /// Configuration commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration as TOML.
    Init {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { path, force },
        } => run_config_init(&path, force),
        Commands::Scan { top_n, json } => {
            let config = load_config(cli.config.as_deref())?;
            let session = Session::new(config)?;
            run_scan_cmd(&session, top_n, json.as_deref())
        }
        Commands::Analyze { code, csv } => {
            let config = load_config(cli.config.as_deref())?;
            let session = Session::new(config)?;
            run_analyze_cmd(&session, &code, csv.as_deref())
        }
        Commands::Interactive => {
            let config = load_config(cli.config.as_deref())?;
            let session = Session::new(config)?;
            run_interactive(&session)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    match path {
        Some(path) => Ok(ScanConfig::from_file(path)?),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                debug!(path = DEFAULT_CONFIG_PATH, "loading config");
                Ok(ScanConfig::from_file(default)?)
            } else {
                Ok(ScanConfig::default())
            }
        }
    }
}

fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (pass --force to overwrite)", path.display());
    }
    let toml = ScanConfig::default().to_toml()?;
    write_artifact(path, &toml)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Collaborators built once per invocation.
struct Session {
    config: ScanConfig,
    universe: Box<dyn UniverseSource>,
    screener: Screener,
    today: NaiveDate,
}

impl Session {
    fn new(config: ScanConfig) -> Result<Self> {
        let provider = build_provider(&config).context("failed to set up price provider")?;
        let universe = build_universe(&config).context("failed to set up listing source")?;
        let today = chrono::Local::now().date_naive();
        let screener = build_screener(&config, provider, today);
        Ok(Self {
            config,
            universe,
            screener,
            today,
        })
    }

    fn print_market(&self) {
        let index = &self.config.market.index_symbol;
        match assess_market(
            self.screener.provider(),
            index,
            self.screener.window(),
            self.screener.params(),
        ) {
            Ok(market) => {
                let s = &market.summary;
                println!(
                    "Market {index} ({}): {}  close {:.2}  SAR {:.2}  -> {}",
                    market.date, s.trend, s.close, s.sar, s.action
                );
                if let Some(caution) = market.caution() {
                    println!("  Caution: {caution}");
                }
            }
            Err(e) => {
                warn!(symbol = %index, error = %e, "market assessment failed");
                println!("Market {index}: unavailable");
            }
        }
    }

    fn scan(&self, top_n: usize) -> Result<ScanReport> {
        println!(
            "Screening top {top_n} from {} as of {}...",
            self.universe.name(),
            self.today
        );
        run_scan(self.universe.as_ref(), &self.screener, top_n, None).context("scan failed")
    }
}

fn run_scan_cmd(session: &Session, top_n: Option<usize>, json: Option<&Path>) -> Result<()> {
    session.print_market();
    let top_n = top_n.unwrap_or(session.config.universe.top_n);
    if top_n == 0 {
        bail!("--top-n must be >= 1");
    }
    let report = session.scan(top_n)?;
    print_candidates(&report);

    if let Some(path) = json {
        write_artifact(path, &export_scan_json(&report)?)?;
        println!("Scan report saved to: {}", path.display());
    }
    Ok(())
}

fn run_analyze_cmd(session: &Session, code: &str, csv: Option<&Path>) -> Result<()> {
    let analysis = session
        .screener
        .analyze(code)
        .with_context(|| format!("cannot analyze {code}"))?;
    print_analysis(&analysis);

    if let Some(path) = csv {
        write_artifact(path, &export_series_csv(&analysis.series)?)?;
        println!("Indicator series saved to: {}", path.display());
    }
    Ok(())
}

fn run_interactive(session: &Session) -> Result<()> {
    let top_n = session.config.universe.top_n;
    session.print_market();
    scan_and_print(session, top_n);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nCode to analyze (r = rescan, q = quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        match input.trim() {
            "" => continue,
            "q" | "Q" => break,
            "r" | "R" => {
                session.print_market();
                scan_and_print(session, top_n);
            }
            code => match session.screener.analyze(code) {
                Ok(analysis) => print_analysis(&analysis),
                Err(e) => {
                    debug!(code, error = %e, "analysis failed");
                    println!("No usable data for {code}.");
                }
            },
        }
    }
    Ok(())
}

/// Interactive scans report failure and keep the loop alive.
fn scan_and_print(session: &Session, top_n: usize) {
    match session.scan(top_n) {
        Ok(report) => print_candidates(&report),
        Err(e) => println!("Scan failed: {e:#}"),
    }
}

fn print_candidates(report: &ScanReport) {
    let candidates = report.candidates();
    let counts = report.screen.counts();
    println!();
    if candidates.is_empty() {
        println!("No candidates passed the buy rule.");
    } else {
        println!("=== Strong buy candidates ===");
        println!("{:<8} {:<20} {:>10}", "Code", "Name", "Close");
        for c in &candidates {
            println!("{:<8} {:<20} {:>10.2}", c.code, c.name, c.price);
        }
        println!("(criteria: {})", BuyRule.criteria());
    }
    println!(
        "({} screened: {} passed, {} rejected, {} short history, {} unavailable)",
        report.screen.entries.len(),
        counts.passed,
        counts.rejected,
        counts.not_enough_data,
        counts.retrieval_failed
    );
}

fn print_analysis(analysis: &Analysis) {
    let s = &analysis.summary;
    let level = if s.trend.is_bullish() { "Stop" } else { "Breakout" };
    let check = &analysis.buy_check;
    println!();
    println!("=== {} ({}) ===", analysis.symbol, analysis.date);
    println!("Close:          {:.2}", s.close);
    println!("Trend:          {}", s.trend);
    println!("{:<16}{:.2}", format!("{level}:"), s.sar);
    println!("Action:         {}", s.action);
    println!(
        "Buy rule:       {}  (SAR {}, MA {}, MACD {})",
        if check.passes() { "pass" } else { "fail" },
        mark(check.above_sar),
        mark(check.above_ma),
        mark(check.macd_above_signal)
    );
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "yes"
    } else {
        "no"
    }
}
