//! lprange - estimate fee income for a concentrated liquidity range.
//!
//! Usage: lprange [--config PATH] [--prices P] [--fees F] [--ticks T]
//!                [--deposit N] [--lower X] [--upper Y]

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lprange::display::{
    format_bounds, format_price, format_usd, EstimateView, FeeSummaryView, PLACEHOLDER,
};
use lprange::Session;
use lprange_config::Config;
use lprange_data::{DataSource, FileSource, SeriesKind, TokenDecimals};

/// Parsed command line options.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    prices: Option<PathBuf>,
    fees: Option<PathBuf>,
    ticks: Option<PathBuf>,
    deposit: Option<f64>,
    lower: Option<f64>,
    upper: Option<f64>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!("Options:");
    eprintln!("  --config PATH   Config file (default: ./config.toml, then user config dir)");
    eprintln!("  --prices P      Price series (JSON or CSV)");
    eprintln!("  --fees F        Daily fee series (JSON or CSV)");
    eprintln!("  --ticks T       Liquidity ticks (JSON or CSV)");
    eprintln!("  --deposit N     Deposit in USD (default from config)");
    eprintln!("  --lower X       Lower bound price");
    eprintln!("  --upper Y       Upper bound price");
}

fn parse_number(flag: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .with_context(|| format!("Invalid value for {flag}: {value}"))
}

/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut parsed = Args::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--help" || flag == "-h" {
            return Ok(None);
        }
        let Some(value) = args.get(i + 1) else {
            anyhow::bail!("Missing value for {flag}");
        };
        match flag {
            "--config" => parsed.config = Some(PathBuf::from(value)),
            "--prices" => parsed.prices = Some(PathBuf::from(value)),
            "--fees" => parsed.fees = Some(PathBuf::from(value)),
            "--ticks" => parsed.ticks = Some(PathBuf::from(value)),
            "--deposit" => parsed.deposit = Some(parse_number(flag, value)?),
            "--lower" => parsed.lower = Some(parse_number(flag, value)?),
            "--upper" => parsed.upper = Some(parse_number(flag, value)?),
            _ => anyhow::bail!("Unknown option: {flag}"),
        }
        i += 2;
    }
    Ok(Some(parsed))
}

/// Load one series into the session, recording a failure instead of aborting.
fn load_series(session: &mut Session, source: &FileSource, kind: SeriesKind) {
    let id = session.begin_fetch(kind);
    let result = match kind {
        SeriesKind::Prices => source.load_prices().map(|data| session.land_prices(id, data)),
        SeriesKind::Fees => source.load_fees().map(|data| session.land_fees(id, data)),
        SeriesKind::Ticks => source.load_ticks().map(|data| session.land_ticks(id, data)),
    };
    if let Err(e) = result {
        session.fetch_failed(id, format!("{e:#}"));
    }
}

fn run() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("lprange");
    let Some(args) = parse_args(&args)? else {
        print_usage(program);
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default(),
    };

    let source = FileSource::new(
        args.prices.or_else(|| config.data.prices_path.clone()),
        args.fees.or_else(|| config.data.fees_path.clone()),
        args.ticks.or_else(|| config.data.ticks_path.clone()),
        TokenDecimals::new(config.data.token0_decimals, config.data.token1_decimals),
    );

    let mut session = Session::new(&config);
    for &kind in SeriesKind::all() {
        load_series(&mut session, &source, kind);
    }

    if args.lower.is_some() || args.upper.is_some() {
        session.set_bounds(args.lower, args.upper);
    }

    let deposit = args.deposit.unwrap_or(config.general.default_deposit_usd);
    let estimate = EstimateView::from(session.calculate(deposit));
    let fees = FeeSummaryView::from(session.fee_summary());

    println!("{}", config.general.pool_label);
    if let Some(message) = session.fetch_error() {
        println!("  ! {}", message);
    }
    println!(
        "  Latest price:       {}",
        session.latest_price().map_or_else(|| PLACEHOLDER.to_string(), format_price)
    );
    println!("  Range:              {}", format_bounds(session.bounds()));
    let in_range = match (session.bounds(), session.latest_price()) {
        (Some(bounds), Some(price)) if bounds.contains(price) => "yes",
        (Some(_), Some(_)) => "no",
        _ => PLACEHOLDER,
    };
    println!("  Price in range:     {}", in_range);
    println!("  Liquidity in range: {}", format_usd(session.liquidity_in_range()));
    println!();
    println!("  Fees 24h:           {}", fees.last_1d);
    println!("  Fees 7d:            {}", fees.last_7d);
    println!("  Fees 30d:           {}", fees.last_30d);
    println!();
    println!("  Deposit:            {}", format_usd(Some(deposit)));
    println!("  Daily fees:         {}", estimate.daily);
    println!("  Weekly fees:        {}", estimate.weekly);
    println!("  APR:                {}", estimate.apr);

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
