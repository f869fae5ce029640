//! CoinLens CLI: technical analysis and alerts for crypto assets.
//!
//! Commands:
//! - `analyze`: full indicator report and alerts for one asset
//! - `scan`: batched scan of many assets, with optional JSON/CSV export
//! - `overview`: top quotes, fear & greed index, bitcoin dominance
//! - `portfolio`: value holdings from a TOML file and summarise P&L
//! - `config init` / `config show`: manage the configuration file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use coinlens_core::data::{DataError, FallbackChain};
use coinlens_core::domain::AssetQuote;
use coinlens_core::portfolio::{value_holdings, Holding, PortfolioStats};
use coinlens_core::signals::AlertHistory;
use coinlens_runner::export::{write_csv, write_json};
use coinlens_runner::overview::fetch_quotes;
use coinlens_runner::sources::synthetic_only;
use coinlens_runner::{
    analyze_asset, run_scan, AssetReport, CoinLensConfig, DominanceOrigin, MarketOverview,
    Sources, StdoutProgress,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "coinlens",
    version,
    about = "CoinLens: crypto technical indicators and alerts"
)]
struct Cli {
    /// Config file. Defaults to <config dir>/coinlens/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Indicator report, composite signal and alerts for one asset.
    Analyze {
        /// Asset id as used by CoinGecko (e.g. bitcoin, ethereum).
        asset: String,

        /// Days of history to fetch. Defaults to the configured range.
        #[arg(long)]
        days: Option<u32>,

        /// Skip the network and use deterministic synthetic prices.
        #[arg(long, default_value_t = false)]
        synthetic_only: bool,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Scan many assets in rate-limited rounds.
    Scan {
        /// Assets to scan. Defaults to the configured list.
        assets: Vec<String>,

        /// Skip the network and use deterministic synthetic prices.
        #[arg(long, default_value_t = false)]
        synthetic_only: bool,

        /// Write full reports as JSON.
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Write one row per asset as CSV.
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },
    /// Market overview: quotes, fear & greed, dominance.
    Overview {
        /// Number of quotes to list.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Value holdings from a TOML file.
    Portfolio {
        /// File with `[[holdings]]` entries and an optional `[prices]` table.
        file: PathBuf,

        /// Use only the prices in the file; no network.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// Configuration file management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration.
    Init {
        /// Destination. Defaults to the standard config path.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the resolved configuration as TOML.
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Analyze {
            asset,
            days,
            synthetic_only,
            json,
        } => run_analyze(cli.config.as_deref(), &asset, days, synthetic_only, json),
        Commands::Scan {
            assets,
            synthetic_only,
            json_out,
            csv_out,
        } => run_scan_cmd(cli.config.as_deref(), assets, synthetic_only, json_out, csv_out),
        Commands::Overview { limit } => run_overview(cli.config.as_deref(), limit),
        Commands::Portfolio { file, offline } => run_portfolio(cli.config.as_deref(), &file, offline),
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => run_config_init(path, force),
            ConfigAction::Show => run_config_show(cli.config.as_deref()),
        },
    }
}

// ─── Setup ───────────────────────────────────────────────────────────

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    // A subscriber can only be installed once per process.
    result.ok();
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("coinlens").join("config.toml"))
}

fn load_config(explicit: Option<&Path>) -> Result<CoinLensConfig> {
    let config = match explicit {
        Some(path) => CoinLensConfig::from_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                CoinLensConfig::from_file(&path)?
            }
            None => CoinLensConfig::default(),
        },
    };
    config.validate()?;
    Ok(config)
}

fn price_chain(config: &CoinLensConfig, synthetic: bool) -> Result<FallbackChain> {
    if synthetic {
        return Ok(synthetic_only(config));
    }
    Ok(Sources::from_config(config)?.prices)
}

// ─── analyze ─────────────────────────────────────────────────────────

fn run_analyze(
    config_path: Option<&Path>,
    asset: &str,
    days: Option<u32>,
    synthetic: bool,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(days) = days {
        if days == 0 {
            bail!("--days must be at least 1");
        }
        config.scan.range_days = days;
    }

    let chain = price_chain(&config, synthetic)?;
    let report = analyze_asset(asset, &chain, &config, chrono::Utc::now())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(r: &AssetReport) {
    let s = &r.snapshot;
    let header = format!("{}: {} points from {}", r.asset, r.points, r.source);
    println!("{header}");
    println!("{}", "=".repeat(header.chars().count()));
    if r.is_synthetic() {
        println!("WARNING: synthetic data, not real market prices");
    }
    println!();
    println!("Price:            {:.4}", r.last_price);
    println!("Signal:           {}", r.summary.composite);
    println!();
    println!("RSI (14):         {:>10.2}  {:?}", s.rsi, r.summary.rsi_zone);
    println!("MFI:              {:>10.2}", s.mfi);
    println!(
        "Momentum (10):    {:>9.2}%  {:?}, {:?}",
        s.momentum, r.summary.momentum_strength, r.summary.momentum_bias
    );
    println!("SMA 50:           {:>10.4}", s.sma50);
    println!("SMA 100:          {:>10.4}", s.sma100);
    println!("SMA 200:          {:>10.4}  trend {:?}", s.sma200, r.summary.trend_bias);
    println!(
        "Bollinger:        {:.4} / {:.4}  volatility {:.2}%",
        s.bollinger_upper,
        s.bollinger_lower,
        s.volatility_pct()
    );

    println!();
    println!("Fibonacci levels:");
    for (ratio, level) in coinlens_core::indicators::FIBONACCI_RATIOS
        .iter()
        .zip(s.fibonacci_levels.iter())
    {
        println!("  {:>5.1}%  {:.4}", ratio * 100.0, level);
    }

    match &r.ichimoku {
        Some(i) => {
            println!();
            println!("Ichimoku:         {:?}", i.signal);
            println!("  tenkan {:.4}  kijun {:.4}", i.tenkan_sen, i.kijun_sen);
            println!("  span A {:.4}  span B {:.4}", i.senkou_span_a, i.senkou_span_b);
        }
        None => println!("\nIchimoku:         not enough data"),
    }

    if let Some(w) = &r.waves {
        println!(
            "Waves:            {:?} {:?}, {} turns, {:.0}% confidence",
            w.phase, w.trend, w.wave_count, w.confidence
        );
    }

    if !r.daily_signals.is_empty() {
        println!();
        println!("Signals:");
        for sig in &r.daily_signals {
            println!("  [{}] {}", sig.kind, sig.message);
        }
    }

    println!();
    if r.alerts.is_empty() {
        println!("No alerts.");
    } else {
        println!("Alerts:");
        for a in &r.alerts {
            println!("  [{}] {}", a.kind, a.message);
        }
    }
}

// ─── scan ────────────────────────────────────────────────────────────

fn run_scan_cmd(
    config_path: Option<&Path>,
    assets: Vec<String>,
    synthetic: bool,
    json_out: Option<PathBuf>,
    csv_out: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let assets = if assets.is_empty() {
        config.scan.assets.clone()
    } else {
        assets
    };

    let chain = price_chain(&config, synthetic)?;
    info!(assets = assets.len(), sources = ?chain.provider_names(), "starting scan");
    let result = run_scan(&assets, &chain, &config, &StdoutProgress)?;

    print_alert_history(&result.history);

    if let Some(path) = json_out {
        write_json(&result.reports, &path)?;
        println!("JSON written to {}", path.display());
    }
    if let Some(path) = csv_out {
        write_csv(&result.reports, &path)?;
        println!("CSV written to {}", path.display());
    }

    if result.reports.is_empty() {
        bail!("every asset failed");
    }
    Ok(())
}

fn print_alert_history(history: &AlertHistory) {
    if history.is_empty() {
        return;
    }
    println!();
    println!("Recent alerts ({}):", history.len());
    for a in history.iter() {
        println!(
            "  {} [{}] {}",
            a.timestamp.format("%Y-%m-%d %H:%M:%S"),
            a.kind,
            a.message
        );
    }
}

// ─── overview ────────────────────────────────────────────────────────

fn run_overview(config_path: Option<&Path>, limit: usize) -> Result<()> {
    let config = load_config(config_path)?;
    let sources = Sources::from_config(&config)?;
    let overview = MarketOverview::fetch(&sources, limit);

    if !overview.quotes.is_empty() {
        println!(
            "{:>4}  {:<8} {:<18} {:>14} {:>9} {:>18}",
            "#", "Symbol", "Name", "Price", "24h %", "Market cap"
        );
        for (i, q) in overview.quotes.iter().enumerate() {
            let rank = q.market_cap_rank.map(|r| r as usize).unwrap_or(i + 1);
            println!(
                "{:>4}  {:<8} {:<18} {:>14.4} {:>8.2}% {:>18.0}",
                rank, q.symbol, q.name, q.current_price, q.price_change_percentage_24h, q.market_cap
            );
        }
        println!();
    }

    match &overview.fear_greed {
        Some(r) => println!(
            "Fear & Greed:     {} ({}, {})",
            r.value,
            r.band().label(),
            r.timestamp.format("%Y-%m-%d")
        ),
        None => println!("Fear & Greed:     N/A"),
    }

    match (&overview.dominance, overview.dominance_origin) {
        (Some(d), origin) => {
            let note = match origin {
                Some(DominanceOrigin::Estimated) => " (estimated from top quotes)",
                _ => "",
            };
            println!("BTC dominance:    {:.2}%{note}", d.btc_dominance);
            println!("Altcoin cap:      ${:.2}B", d.altcoins_cap / 1e9);
            println!("Total market cap: ${:.2}T", d.total_market_cap / 1e12);
        }
        (None, _) => println!("BTC dominance:    N/A"),
    }

    Ok(())
}

// ─── portfolio ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PortfolioFile {
    holdings: Vec<Holding>,
    /// Current prices by symbol; override fetched quotes.
    #[serde(default)]
    prices: HashMap<String, f64>,
}

fn load_portfolio(path: &Path) -> Result<PortfolioFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read portfolio file {}", path.display()))?;
    let file: PortfolioFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse portfolio file {}", path.display()))?;
    for h in &file.holdings {
        if h.quantity < 0.0 || h.avg_price < 0.0 {
            bail!("holding {} has a negative quantity or price", h.symbol);
        }
    }
    Ok(file)
}

/// Quote prices by upper-cased symbol, overridden by the file's prices.
fn merge_prices(
    quotes: Result<Vec<AssetQuote>, DataError>,
    file_prices: &HashMap<String, f64>,
) -> HashMap<String, f64> {
    let mut prices = HashMap::new();
    match quotes {
        Ok(quotes) => {
            for q in quotes {
                prices.entry(q.symbol.to_uppercase()).or_insert(q.current_price);
            }
        }
        Err(e) => warn!(error = %e, "quotes unavailable, using file prices only"),
    }
    for (symbol, price) in file_prices {
        prices.insert(symbol.to_uppercase(), *price);
    }
    prices
}

fn run_portfolio(config_path: Option<&Path>, path: &Path, offline: bool) -> Result<()> {
    let file = load_portfolio(path)?;

    let quotes = if offline {
        Ok(Vec::new())
    } else {
        let config = load_config(config_path)?;
        let sources = Sources::from_config(&config)?;
        fetch_quotes(&sources.quotes, 100)
    };
    let prices = merge_prices(quotes, &file.prices);

    let valuations = value_holdings(&file.holdings, &prices);
    let stats = PortfolioStats::from_valuations(&valuations);

    println!(
        "{:<8} {:>14} {:>14} {:>14} {:>16} {:>14} {:>9}",
        "Symbol", "Quantity", "Avg price", "Price", "Value", "P&L", "P&L %"
    );
    for v in &valuations {
        let flag = if v.priced { "" } else { " *" };
        println!(
            "{:<8} {:>14.6} {:>14.4} {:>14.4} {:>16.2} {:>14.2} {:>8.2}%{flag}",
            v.symbol, v.quantity, v.avg_price, v.current_price, v.total_value, v.pnl, v.pnl_pct
        );
    }
    if valuations.iter().any(|v| !v.priced) {
        println!("* no current price; valued at average price");
    }

    println!();
    println!("Invested:  {:.2}", stats.total_invested);
    println!("Value:     {:.2}", stats.total_value);
    println!("P&L:       {:.2} ({:.2}%)", stats.total_pnl, stats.total_pnl_pct);
    if let Some(best) = &stats.best_performer {
        println!("Best:      {} ({:+.2}%)", best.symbol, best.pnl_pct);
    }
    if let Some(worst) = &stats.worst_performer {
        println!("Worst:     {} ({:+.2}%)", worst.symbol, worst.pnl_pct);
    }
    Ok(())
}

// ─── config ──────────────────────────────────────────────────────────

fn run_config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let Some(path) = path.or_else(default_config_path) else {
        bail!("no config directory on this platform; pass --path");
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = CoinLensConfig::default().to_toml()?;
    std::fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Config written to {}", path.display());
    Ok(())
}

fn run_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
