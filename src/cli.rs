//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{self, CsvCandleAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis_config::{AnalysisConfig, build_analysis_config};
use crate::domain::candle::Candle;
use crate::domain::currency_strength::{CurrencyStrength, currency_strength};
use crate::domain::error::FxSignalError;
use crate::domain::indicator::{IndicatorType, Indicators, VolatilityInfo};
use crate::domain::indicator_helpers::{compute_indicators_with, compute_volatility_with};
use crate::domain::position_size::{PositionSize, RiskInputs, position_size};
use crate::domain::session::{self, SessionState};
use crate::domain::strategy::{Strategy, TradeSignal, evaluate};
use crate::domain::timeframe::Timeframe;
use crate::ports::data_port::CandleSource;

#[derive(Parser, Debug)]
#[command(
    name = "fxsignal",
    about = "Technical indicators and divergence signals for forex candles"
)]
pub struct Cli {
    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the full indicator snapshot for the latest candle
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Report ATR and its volatility level
    Volatility {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Evaluate a named strategy against the latest snapshot
    Signal {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long)]
        strategy: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Relative strength of the base and quote currencies
    Strength {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Position size for a fixed account risk and stop-loss distance
    Size {
        #[command(flatten)]
        source: SourceArgs,
        /// Entry price; defaults to the latest close
        #[arg(long)]
        price: Option<f64>,
        #[arg(long, default_value_t = 1000.0)]
        balance: f64,
        /// Percentage of the balance put at risk
        #[arg(long, default_value_t = 2.0)]
        risk: f64,
        #[arg(long, default_value_t = 20.0)]
        stop_loss_pips: f64,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// List the strategy catalogue
    Strategies,
    /// Show trading sessions for a pair
    Sessions {
        #[arg(long, default_value = "EUR/USD")]
        pair: String,
        /// UTC hour (0-23); defaults to the current hour
        #[arg(long, conflicts_with = "at")]
        hour: Option<u32>,
        /// Epoch-millisecond timestamp to take the hour from, e.g. a candle's
        #[arg(long)]
        at: Option<i64>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Write a synthetic candle series to CSV
    Generate {
        #[arg(long, default_value = "EUR/USD")]
        pair: String,
        #[arg(long, default_value = "1h")]
        timeframe: String,
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate an analysis configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Where candles come from and how the engine is calibrated.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// CSV file with timestamp,open,high,low,close rows
    #[arg(long, conflicts_with = "candles_dir")]
    pub candles: Option<PathBuf>,
    /// Directory of per-pair files named like EUR_USD_1h.csv
    #[arg(long)]
    pub candles_dir: Option<PathBuf>,
    #[arg(long, default_value = "EUR/USD")]
    pub pair: String,
    #[arg(long, default_value = "1h")]
    pub timeframe: String,
    #[arg(long, default_value_t = 100)]
    pub count: usize,
    /// Seed for synthetic candles when no CSV file is given
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// INI file overriding periods, thresholds and volatility bands
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Analyze { source, format } => run_analyze(&source, format),
        Command::Volatility { source, format } => run_volatility(&source, format),
        Command::Signal {
            source,
            strategy,
            format,
        } => run_signal(&source, &strategy, format),
        Command::Strength { source, format } => run_strength(&source, format),
        Command::Size {
            source,
            price,
            balance,
            risk,
            stop_loss_pips,
            format,
        } => {
            let inputs = RiskInputs {
                balance,
                risk_pct: risk,
                stop_loss_pips,
            };
            run_size(&source, price, &inputs, format)
        }
        Command::Strategies => {
            run_strategies();
            Ok(())
        }
        Command::Sessions {
            pair,
            hour,
            at,
            format,
        } => run_sessions(&pair, hour, at, format),
        Command::Generate {
            pair,
            timeframe,
            count,
            seed,
            output,
        } => run_generate(&pair, &timeframe, count, seed, &output),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Logs go to stderr so JSON on stdout stays machine-readable.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config(path: &Path) -> Result<AnalysisConfig, FxSignalError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    let config = build_analysis_config(&adapter)?;
    info!(file = %path.display(), "analysis config loaded");
    Ok(config)
}

fn resolve_config(path: Option<&PathBuf>) -> Result<AnalysisConfig, FxSignalError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(AnalysisConfig::default()),
    }
}

pub fn load_candles(source: &SourceArgs) -> Result<Vec<Candle>, FxSignalError> {
    let timeframe: Timeframe = source.timeframe.parse()?;

    let csv = match (&source.candles, &source.candles_dir) {
        (Some(path), _) => Some(CsvCandleAdapter::from_file(path.clone())),
        (None, Some(dir)) => Some(CsvCandleAdapter::new(dir.clone())),
        (None, None) => None,
    };
    let candles = match csv {
        Some(adapter) => adapter.fetch_candles(&source.pair, timeframe, source.count)?,
        None => synthetic_candles(&source.pair, timeframe, source.count, source.seed)?,
    };

    if candles.is_empty() {
        return Err(FxSignalError::NoCandles {
            pair: source.pair.clone(),
        });
    }
    info!(pair = %source.pair, %timeframe, candles = candles.len(), "candles ready");
    Ok(candles)
}

#[cfg(feature = "synthetic")]
fn synthetic_candles(
    pair: &str,
    timeframe: Timeframe,
    count: usize,
    seed: u64,
) -> Result<Vec<Candle>, FxSignalError> {
    use crate::adapters::synthetic_adapter::SyntheticCandleAdapter;
    SyntheticCandleAdapter::new(seed).fetch_candles(pair, timeframe, count)
}

#[cfg(not(feature = "synthetic"))]
fn synthetic_candles(
    _pair: &str,
    _timeframe: Timeframe,
    _count: usize,
    _seed: u64,
) -> Result<Vec<Candle>, FxSignalError> {
    Err(FxSignalError::Data {
        reason: "synthetic candles need the `synthetic` feature; pass --candles".into(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), FxSignalError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_analyze(source: &SourceArgs, format: OutputFormat) -> Result<(), FxSignalError> {
    let config = resolve_config(source.config.as_ref())?;
    let candles = load_candles(source)?;
    let snapshot = compute_indicators_with(&candles, &config);
    debug!(rsi = snapshot.rsi, divergence = ?snapshot.divergence, "snapshot computed");

    match format {
        OutputFormat::Json => print_json(&snapshot),
        OutputFormat::Text => {
            print_indicators_text(&source.pair, &snapshot, &config);
            Ok(())
        }
    }
}

fn run_volatility(source: &SourceArgs, format: OutputFormat) -> Result<(), FxSignalError> {
    let config = resolve_config(source.config.as_ref())?;
    let candles = load_candles(source)?;
    let info = compute_volatility_with(&candles, &config);

    match format {
        OutputFormat::Json => print_json(&info),
        OutputFormat::Text => {
            print_volatility_text(&info, &config);
            Ok(())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignalReport<'a> {
    pair: &'a str,
    strategy: &'static str,
    signal: TradeSignal,
    dedicated_rule: bool,
    indicators: &'a Indicators,
}

fn run_signal(
    source: &SourceArgs,
    strategy_name: &str,
    format: OutputFormat,
) -> Result<(), FxSignalError> {
    let strategy: Strategy = strategy_name.parse()?;
    let config = resolve_config(source.config.as_ref())?;
    let candles = load_candles(source)?;
    let snapshot = compute_indicators_with(&candles, &config);
    let signal = evaluate(strategy, &snapshot, &config.thresholds);
    info!(%strategy, %signal, "strategy evaluated");

    match format {
        OutputFormat::Json => print_json(&SignalReport {
            pair: &source.pair,
            strategy: strategy.name(),
            signal,
            dedicated_rule: strategy.has_dedicated_rule(),
            indicators: &snapshot,
        }),
        OutputFormat::Text => {
            println!("{} {} on {}: {}", source.pair, strategy, source.timeframe, signal);
            if !strategy.has_dedicated_rule() {
                println!("  (RSI fallback rule)");
            }
            Ok(())
        }
    }
}

fn run_strength(source: &SourceArgs, format: OutputFormat) -> Result<(), FxSignalError> {
    let config = resolve_config(source.config.as_ref())?;
    let candles = load_candles(source)?;
    let snapshot = compute_indicators_with(&candles, &config);
    let strength = currency_strength(&source.pair, &snapshot);

    match format {
        OutputFormat::Json => print_json(&strength),
        OutputFormat::Text => {
            print_strength_text(&strength);
            Ok(())
        }
    }
}

fn print_strength_text(s: &CurrencyStrength) {
    println!("  {:<6} {:>3.0}%", s.base, s.base_strength);
    println!("  {:<6} {:>3.0}%", s.quote, s.quote_strength);
    println!("{} dominates", s.dominant());
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SizeReport<'a> {
    pair: &'a str,
    price: f64,
    #[serde(flatten)]
    size: PositionSize,
}

fn run_size(
    source: &SourceArgs,
    price: Option<f64>,
    inputs: &RiskInputs,
    format: OutputFormat,
) -> Result<(), FxSignalError> {
    let price = match price {
        Some(p) => p,
        None => {
            let candles = load_candles(source)?;
            candles
                .last()
                .map(|c| c.close)
                .ok_or_else(|| FxSignalError::NoCandles {
                    pair: source.pair.clone(),
                })?
        }
    };
    let size = position_size(&source.pair, price, inputs).ok_or_else(|| {
        FxSignalError::InvalidRiskInput(format!(
            "balance {} and stop loss {} pips must be positive and finite",
            inputs.balance, inputs.stop_loss_pips
        ))
    })?;
    debug!(pair = %source.pair, price, units = size.units, "position sized");

    match format {
        OutputFormat::Json => print_json(&SizeReport {
            pair: &source.pair,
            price,
            size,
        }),
        OutputFormat::Text => {
            println!("{} at {:.5}", source.pair, price);
            println!("  Risk amount     {:.2}", size.risk_amount);
            println!("  Position size   {:.0} units", size.units);
            println!("  Leverage        1:{:.1}", size.leverage);
            Ok(())
        }
    }
}

fn run_strategies() {
    for s in Strategy::ALL {
        let rule = if s.has_dedicated_rule() {
            "dedicated"
        } else {
            "rsi fallback"
        };
        println!("{:<28} {}", s.name(), rule);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionReport<'a> {
    pair: &'a str,
    utc_hour: u32,
    sessions: Vec<SessionState>,
    impact: String,
}

fn run_sessions(
    pair: &str,
    hour: Option<u32>,
    at: Option<i64>,
    format: OutputFormat,
) -> Result<(), FxSignalError> {
    let utc_hour = match hour {
        Some(h) => h,
        None => {
            let timestamp = at.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
            session::utc_hour_of(timestamp).ok_or_else(|| FxSignalError::Data {
                reason: format!("timestamp {} is out of range", timestamp),
            })?
        }
    };
    let sessions = session::session_states(pair, utc_hour)?;
    let impact = session::session_impact(pair, utc_hour)?;

    match format {
        OutputFormat::Json => print_json(&SessionReport {
            pair,
            utc_hour,
            sessions,
            impact,
        }),
        OutputFormat::Text => {
            println!("{} at {:02}:00 UTC", pair, utc_hour);
            for s in &sessions {
                let status = if s.is_active { "open" } else { "closed" };
                let peak = if s.is_peak { " (peak)" } else { "" };
                println!("  {:<9} {:<20} {}{}", s.name.to_string(), s.hours_utc, status, peak);
            }
            println!("{}", impact);
            Ok(())
        }
    }
}

fn run_generate(
    pair: &str,
    timeframe: &str,
    count: usize,
    seed: u64,
    output: &Path,
) -> Result<(), FxSignalError> {
    let timeframe: Timeframe = timeframe.parse()?;
    let candles = synthetic_candles(pair, timeframe, count, seed)?;
    csv_adapter::write_candles(output, &candles)?;
    eprintln!("Wrote {} {} candles to {}", candles.len(), pair, output.display());
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), FxSignalError> {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = FileConfigAdapter::from_file(config_path)?;
    for section in adapter.sections() {
        if !CONFIG_SECTIONS.contains(&section.as_str()) {
            eprintln!("note: section [{}] is not used", section);
        }
    }
    let config = build_analysis_config(&adapter)?;
    let p = &config.periods;
    let t = &config.thresholds;

    eprintln!("\nIndicators:");
    for label in indicator_labels(&config) {
        eprintln!("  {}", label);
    }
    eprintln!("\nThresholds:");
    eprintln!("  RSI        {} / {}", t.rsi_oversold, t.rsi_overbought);
    eprintln!("  CCI        {} / {}", t.cci_oversold, t.cci_overbought);
    eprintln!("  Stochastic {} / {}", t.stochastic_oversold, t.stochastic_overbought);
    eprintln!(
        "  Divergence floors {} / {}",
        t.divergence_bullish_floor, t.divergence_bearish_floor
    );
    eprintln!("  Fibonacci needs {} candles", p.fib_min_candles);
    eprintln!("\nConfig is valid");
    Ok(())
}

const CONFIG_SECTIONS: [&str; 3] = ["periods", "thresholds", "volatility"];

fn indicator_labels(config: &AnalysisConfig) -> Vec<IndicatorType> {
    let p = &config.periods;
    vec![
        IndicatorType::Rsi(p.rsi),
        IndicatorType::Sma(p.sma),
        IndicatorType::Bollinger {
            period: p.bollinger,
            stddev_mult_x100: (p.bollinger_multiplier * 100.0).round() as u32,
        },
        IndicatorType::Macd {
            fast: p.macd_fast,
            slow: p.macd_slow,
            signal: p.macd_signal,
        },
        IndicatorType::Stochastic {
            period: p.stochastic,
            k_smooth: p.stochastic_k_smooth,
            d_smooth: p.stochastic_d_smooth,
        },
        IndicatorType::Cci(p.cci),
        IndicatorType::Atr(p.atr),
        IndicatorType::Fibonacci {
            lookback: p.fib_lookback,
        },
        IndicatorType::Divergence {
            window: p.divergence_window,
        },
    ]
}

fn print_indicators_text(pair: &str, ind: &Indicators, config: &AnalysisConfig) {
    let [rsi, sma, boll, macd, stoch, cci, atr, fib, div] = label_strings(config);
    let fib_levels = ind.fibonacci.levels();

    println!("{}  price {:.5}", pair, ind.current_price);
    println!("  {:<22} {:.2}", rsi, ind.rsi);
    println!("  {:<22} {:.5}", sma, ind.sma20);
    println!(
        "  {:<22} {:.5} / {:.5} / {:.5}",
        boll, ind.bollinger_bands.upper, ind.bollinger_bands.middle, ind.bollinger_bands.lower
    );
    println!(
        "  {:<22} {:.5} signal {:.5} hist {:.5}",
        macd, ind.macd.macd, ind.macd.signal, ind.macd.histogram
    );
    println!("  {:<22} %K {:.2} %D {:.2}", stoch, ind.stochastic.k, ind.stochastic.d);
    println!("  {:<22} {:.2}", cci, ind.cci);
    println!("  {:<22} {:.5}", atr, ind.atr);
    println!(
        "  {:<22} {:?}: {}",
        fib,
        ind.fibonacci.trend,
        fib_levels
            .iter()
            .map(|l| format!("{:.5}", l))
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!("  {:<22} {:?}", div, ind.divergence);
}

fn label_strings(config: &AnalysisConfig) -> [String; 9] {
    let labels = indicator_labels(config);
    std::array::from_fn(|i| labels[i].to_string())
}

fn print_volatility_text(info: &VolatilityInfo, config: &AnalysisConfig) {
    println!(
        "{} {:.5} ({})",
        IndicatorType::Atr(config.periods.atr),
        info.atr,
        info.level
    );
}
