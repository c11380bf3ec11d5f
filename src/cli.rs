//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{backtest_buy_and_hold, DEFAULT_INITIAL_CAPITAL};
use crate::domain::config_validation::{
    validate_data_config, validate_forecast_config, validate_report_config,
    validate_strategy_config,
};
use crate::domain::crossover::{run_crossover, DrawdownBasis, StrategyParameters};
use crate::domain::error::AssetlabError;
use crate::domain::forecast::forecast_trend;
use crate::domain::metrics::compute_metrics;
use crate::domain::report::{build_report_rows, parse_tickers};
use crate::domain::returns::compute_returns;
use crate::domain::series::PricePoint;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "assetlab", about = "Single-asset analytics and backtesting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute returns, metrics and a buy-and-hold backtest for one ticker
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Run the moving-average crossover strategy
    Strategy {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        short: Option<usize>,
        #[arg(long)]
        long: Option<usize>,
    },
    /// Fit a linear trend and extrapolate it forward
    Forecast {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        days: Option<usize>,
    },
    /// Write the per-ticker metrics report CSV
    Report {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List tickers available in the data directory
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze { config, ticker } => run_analyze(&config, ticker.as_deref()),
        Command::Strategy {
            config,
            ticker,
            short,
            long,
        } => run_strategy(&config, ticker.as_deref(), short, long),
        Command::Forecast {
            config,
            ticker,
            days,
        } => run_forecast(&config, ticker.as_deref(), days),
        Command::Report { config, output } => run_report(&config, output.as_ref()),
        Command::ListTickers { config } => run_list_tickers(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = AssetlabError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_analyze(config_path: &PathBuf, ticker_override: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let (ticker, prices) = match load_prices(&adapter, ticker_override) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Analyzing {} ({} points)", ticker, prices.len());

    let returns = compute_returns(&prices);
    let report = compute_metrics(&returns, &prices);
    let equity = match backtest_buy_and_hold(&returns, DEFAULT_INITIAL_CAPITAL) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("Ticker:            {}", ticker);
    println!(
        "Last close:        {:.4}",
        prices.last().map(|p| p.close).unwrap_or_default()
    );
    println!("Cumulative return: {:.6}", report.cumulative_return);
    println!("Volatility (daily): {}", report.vol_daily);
    println!("Sharpe (ann.):     {}", report.sharpe);
    println!("Max drawdown:      {:.6}", report.max_drawdown);
    println!(
        "Buy & hold equity: {:.4} (from {:.0})",
        equity.last().copied().unwrap_or(DEFAULT_INITIAL_CAPITAL),
        DEFAULT_INITIAL_CAPITAL
    );

    ExitCode::SUCCESS
}

fn run_strategy(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    short_override: Option<usize>,
    long_override: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (ticker, prices) = match load_prices(&adapter, ticker_override) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let params = build_strategy_parameters(&adapter, short_override, long_override);
    eprintln!(
        "Running SMA({}) x SMA({}) crossover on {} ({} points)",
        params.short_window,
        params.long_window,
        ticker,
        prices.len()
    );

    let outcome = match run_crossover(&prices, &params) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let invested_days = outcome.positions.iter().filter(|&&p| p == 1).count();

    println!("Ticker:            {}", ticker);
    println!(
        "Windows:           short={} long={}",
        params.short_window, params.long_window
    );
    println!(
        "Days invested:     {} of {}",
        invested_days,
        outcome.positions.len()
    );
    println!(
        "Cumulative return: {:.6}",
        outcome.metrics.cumulative_return
    );
    println!("Volatility (daily): {}", outcome.metrics.vol_daily);
    println!("Sharpe (ann.):     {}", outcome.metrics.sharpe);
    println!("Max drawdown:      {:.6}", outcome.metrics.max_drawdown);
    println!(
        "Final portfolio:   {:.4} (from {:.0})",
        outcome
            .portfolio
            .last()
            .copied()
            .unwrap_or(params.initial_capital),
        params.initial_capital
    );

    ExitCode::SUCCESS
}

fn run_forecast(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    days_override: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_forecast_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (ticker, prices) = match load_prices(&adapter, ticker_override) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let days = days_override.unwrap_or_else(|| adapter.get_int("forecast", "days", 30) as usize);
    eprintln!("Fitting trend for {} ({} points)", ticker, prices.len());

    let result = match forecast_trend(&prices, days) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("Ticker:    {}", ticker);
    println!(
        "Trend:     slope {:.6} / day, intercept {:.4}",
        result.fit.slope, result.fit.intercept
    );
    println!("Forecast ({} days):", days);
    for point in &result.future {
        println!("  {}  {:.4}", point.date, point.close);
    }

    ExitCode::SUCCESS
}

fn run_report(config_path: &PathBuf, output_override: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_report_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Validated above, so the parse cannot fail here.
    let tickers = parse_tickers(
        &adapter
            .get_string("report", "tickers")
            .unwrap_or_default(),
    )
    .unwrap_or_default();

    let (start_date, end_date) = date_range(&adapter);
    let data_port = CsvAdapter::new(data_path(&adapter));

    eprintln!(
        "Building report for {} tickers ({} to {})",
        tickers.len(),
        start_date,
        end_date
    );
    let rows = build_report_rows(&data_port, &tickers, start_date, end_date);
    for row in &rows {
        if let Some(error) = &row.error {
            eprintln!("Warning: {} failed ({})", row.ticker, error);
        }
    }

    let output_dir = match output_override {
        Some(dir) => dir.clone(),
        None => PathBuf::from(
            adapter
                .get_string("report", "output_dir")
                .unwrap_or_else(|| "reports".to_string()),
        ),
    };
    if let Err(e) = fs::create_dir_all(&output_dir) {
        let err = AssetlabError::Io(e);
        eprintln!("error: {err}");
        return (&err).into();
    }

    let today = chrono::Local::now().date_naive();
    let output_path = CsvReportAdapter::default_report_path(&output_dir, today);

    if let Err(e) = CsvReportAdapter.write(&rows, &output_path) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    println!("Report written to {}", output_path.display());
    ExitCode::SUCCESS
}

fn run_list_tickers(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_port = CsvAdapter::new(data_path(&adapter));
    match data_port.list_tickers() {
        Ok(tickers) => {
            for ticker in tickers {
                println!("{}", ticker);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Resolve the ticker, fetch its prices over the configured window and
/// reject an empty result.
fn load_prices(
    adapter: &FileConfigAdapter,
    ticker_override: Option<&str>,
) -> Result<(String, Vec<PricePoint>), AssetlabError> {
    validate_data_config(adapter)?;

    let ticker = match ticker_override {
        Some(t) => t.to_uppercase(),
        None => adapter.get_string("analysis", "ticker").ok_or_else(|| {
            AssetlabError::ConfigMissing {
                section: "analysis".into(),
                key: "ticker".into(),
            }
        })?,
    };

    let (start_date, end_date) = date_range(adapter);
    let data_port = CsvAdapter::new(data_path(adapter));
    let prices = data_port.fetch_prices(&ticker, start_date, end_date)?;

    if prices.is_empty() {
        return Err(AssetlabError::NoData { ticker });
    }

    Ok((ticker, prices))
}

fn data_path(adapter: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(adapter.get_string("data", "path").unwrap_or_default())
}

/// Dates are validated before this runs; fall back to an open range so a
/// bypassed validation still behaves sanely.
fn date_range(adapter: &dyn ConfigPort) -> (NaiveDate, NaiveDate) {
    let parse = |key: &str, default: NaiveDate| {
        adapter
            .get_string("data", key)
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
            .unwrap_or(default)
    };
    (
        parse("start_date", NaiveDate::MIN),
        parse("end_date", NaiveDate::MAX),
    )
}

pub fn build_strategy_parameters(
    adapter: &dyn ConfigPort,
    short_override: Option<usize>,
    long_override: Option<usize>,
) -> StrategyParameters {
    let short_window =
        short_override.unwrap_or_else(|| adapter.get_int("strategy", "short_window", 20) as usize);
    let long_window =
        long_override.unwrap_or_else(|| adapter.get_int("strategy", "long_window", 50) as usize);
    let initial_capital =
        adapter.get_double("strategy", "initial_capital", DEFAULT_INITIAL_CAPITAL);
    let drawdown_basis = adapter
        .get_string("strategy", "drawdown_basis")
        .and_then(|s| DrawdownBasis::from_config_value(&s))
        .unwrap_or(DrawdownBasis::StrategyEquity);

    StrategyParameters {
        short_window,
        long_window,
        initial_capital,
        drawdown_basis,
    }
}
