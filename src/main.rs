use analytics::AlphaEngine;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{AppSettings, load_config_from};
use core_types::DateRange;
use market_data::{ConstantRiskFree, PriceSource, RiskFreeSource, YahooChartSource};
use std::net::SocketAddr;
use std::path::PathBuf;

/// The main entry point for the alphastat application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if one exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = load_config_from(&cli.config)?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Returns(args) => handle_returns(args, settings).await,
        Commands::Alpha(args) => handle_alpha(args, settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Risk-adjusted performance analytics for securities against a benchmark.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),
    /// Fetch and print the daily price series for one symbol.
    Returns(ReturnsArgs),
    /// Print the alpha/beta performance decomposition of a symbol against a benchmark.
    Alpha(AlphaArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address, overriding the configured one (e.g. "0.0.0.0:5000").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct ReturnsArgs {
    /// The symbol to fetch (e.g., "AAPL").
    #[arg(long)]
    ticker: String,

    /// The start of the window (format: YYYY-MM-DD).
    #[arg(long)]
    from_date: NaiveDate,

    /// The end of the window (format: YYYY-MM-DD).
    #[arg(long)]
    to_date: NaiveDate,
}

#[derive(Parser)]
struct AlphaArgs {
    /// The symbol to analyze (e.g., "AAPL").
    #[arg(long)]
    ticker: String,

    /// The benchmark to decompose against (e.g., "SPY").
    #[arg(long)]
    benchmark: String,

    /// The start of the window (format: YYYY-MM-DD).
    #[arg(long)]
    from_date: NaiveDate,

    /// The end of the window (format: YYYY-MM-DD).
    #[arg(long)]
    to_date: NaiveDate,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, settings: AppSettings) -> anyhow::Result<()> {
    let addr = match args.addr {
        Some(addr) => addr,
        None => format!("{}:{}", settings.server.host, settings.server.port).parse()?,
    };
    tracing::info!(%addr, "starting API server");
    web_server::run_server(addr, settings).await
}

async fn handle_returns(args: ReturnsArgs, settings: AppSettings) -> anyhow::Result<()> {
    let range = DateRange::new(args.from_date, args.to_date)?;
    let source = YahooChartSource::new(&settings.market_data)?;
    let prices = source.fetch_prices(&args.ticker, &range).await?;

    let mut table = Table::new();
    table.set_header(vec!["Date", "Price"]);
    for point in &prices {
        table.add_row(vec![
            point.date.to_string(),
            format!("{:.2}", point.price),
        ]);
    }
    println!("{table}");
    println!("{} observations for {}", prices.len(), args.ticker);

    Ok(())
}

async fn handle_alpha(args: AlphaArgs, settings: AppSettings) -> anyhow::Result<()> {
    let range = DateRange::new(args.from_date, args.to_date)?;
    let source = YahooChartSource::new(&settings.market_data)?;

    let (ticker_prices, benchmark_prices) = tokio::join!(
        source.fetch_prices(&args.ticker, &range),
        source.fetch_prices(&args.benchmark, &range),
    );
    let ticker_prices = ticker_prices?;
    let benchmark_prices = benchmark_prices?;

    let dates: Vec<NaiveDate> = ticker_prices.iter().map(|p| p.date).collect();
    let risk_free =
        ConstantRiskFree::new(settings.analytics.risk_free_rate_annualized).series_for(&dates);

    let report = AlphaEngine::new().alpha_report(&ticker_prices, &benchmark_prices, &risk_free)?;

    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec![
        "Alpha geometric (annualized)".to_string(),
        format!("{:.2}%", report.alpha_geom_annualized * 100.0),
    ]);
    table.add_row(vec![
        "Alpha geometric (daily)".to_string(),
        format!("{:.5}", report.alpha_geom_daily),
    ]);
    table.add_row(vec![
        "Alpha regression (annualized)".to_string(),
        format!("{:.2}%", report.alpha_regression_annualized * 100.0),
    ]);
    table.add_row(vec![
        "Alpha regression (daily)".to_string(),
        format!("{:.5}", report.alpha_regression_daily),
    ]);
    table.add_row(vec!["Beta".to_string(), format!("{:.2}", report.beta)]);
    table.add_row(vec![
        "R-squared".to_string(),
        format!("{:.2}", report.r_squared),
    ]);
    table.add_row(vec![
        "Alpha p-value".to_string(),
        format!("{:.5}", report.alpha_pvalue),
    ]);
    table.add_row(vec![
        "Beta p-value".to_string(),
        format!("{:.5}", report.beta_pvalue),
    ]);
    table.add_row(vec![
        format!("{} annualized return", args.ticker),
        format!("{:.2}%", report.ticker_annualized_return * 100.0),
    ]);
    table.add_row(vec![
        format!("{} annualized return", args.benchmark),
        format!("{:.2}%", report.benchmark_annualized_return * 100.0),
    ]);
    table.add_row(vec![
        format!("{} annualized volatility", args.ticker),
        format!("{:.2}%", report.ticker_annualized_volatility * 100.0),
    ]);
    table.add_row(vec![
        format!("{} annualized volatility", args.benchmark),
        format!("{:.2}%", report.benchmark_annualized_volatility * 100.0),
    ]);
    table.add_row(vec![
        format!("{} Sharpe ratio", args.ticker),
        format!("{:.2}", report.ticker_sharpe_ratio),
    ]);
    table.add_row(vec![
        format!("{} Sharpe ratio", args.benchmark),
        format!("{:.2}", report.benchmark_sharpe_ratio),
    ]);
    println!("{table}");
    println!(
        "{} aligned trading days between {} and {}",
        report.data.len(),
        args.from_date,
        args.to_date
    );

    Ok(())
}
