//! Event study command implementation.

use crate::data::{self, DataSource};
use crate::output;
use anyhow::Result;
use clap::{Args, ValueEnum};
use ronda_event::{EventStudy, EventStudyConfig, EventStudyReport, events_frame, summary_frame};
use ronda_traits::{Date, Direction, Horizons, PriceHistoryProvider, PriceSeries, RondaError};
use std::path::PathBuf;
use tracing::warn;

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct EventArgs {
    /// Ticker symbol, e.g. NVDA
    #[arg(long)]
    symbol: String,

    /// Minimum one-day move in percent, e.g. 5 for 5%
    #[arg(long)]
    percent: f64,

    /// Which moves qualify (up, down, both)
    #[arg(long, default_value = "both")]
    direction: Direction,

    /// Comma-separated forward horizons in trading days
    #[arg(long, default_value = "1,3,5,10,20")]
    horizons: Horizons,

    /// Calendar-day gap required between kept events
    #[arg(long, default_value_t = 0)]
    cooldown_days: u32,

    /// History start date (YYYY-MM-DD)
    #[arg(long, default_value = "2012-01-01")]
    start: String,

    /// Print the first and last K event dates
    #[arg(long, default_value_t = 0)]
    show_dates: usize,

    /// CSV path to save all event dates
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// CSV path to save the per-horizon summary
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Read prices from <DIR>/<SYMBOL>.csv instead of the FMP API
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Load a symbol's history, treating "no data" as an empty series.
pub(crate) async fn load_series<P: PriceHistoryProvider>(
    provider: &P,
    symbol: &str,
    start: Date,
) -> ronda_traits::Result<PriceSeries> {
    match provider.daily_bars(symbol, start, None).await {
        Err(RondaError::NoData(_)) => {
            warn!(symbol, "no price history");
            Ok(PriceSeries::empty(symbol))
        }
        other => other,
    }
}

/// Header line describing the study, e.g.
/// `Symbol=NVDA  Event: down moves ≥ 5%  Sample=12  (cooldownDays=3)`.
pub(crate) fn headline(report: &EventStudyReport) -> String {
    let config = &report.config;
    let percent = (config.threshold * 100.0 * 1e6).round() / 1e6;
    let mut line = format!(
        "Symbol={}  Event: {} moves ≥ {percent}%  Sample={}",
        report.symbol,
        config.direction,
        report.sample()
    );
    if config.cooldown_days > 0 {
        line.push_str(&format!("  (cooldownDays={})", config.cooldown_days));
    }
    line
}

/// Run an event study for one symbol.
pub(crate) async fn run_event(args: EventArgs) -> Result<()> {
    let symbol = args.symbol.trim().to_uppercase();
    let start = data::parse_date(&args.start)?;
    let source = DataSource::resolve(args.data_dir)?;

    let study = EventStudy::new(EventStudyConfig {
        threshold: args.percent / 100.0,
        direction: args.direction,
        cooldown_days: args.cooldown_days,
        horizons: args.horizons,
    });

    let series = load_series(&source, &symbol, start).await?;
    let report = study.run(&series)?;

    if let Some(path) = &args.summary_out {
        output::write_csv(&mut summary_frame(&report.summary)?, path)?;
    }

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", headline(&report));
        print!("{}", output::summary_table(&report.summary));
    }

    if let Some(path) = &args.events_out
        && !report.table.is_empty()
    {
        output::write_csv(&mut events_frame(&report.table)?, path)?;
        if args.format == OutputFormat::Text {
            println!("\nSaved all event dates to: {}", path.display());
        }
    }

    if args.show_dates > 0 && args.format == OutputFormat::Text {
        print_event_dates(&report, args.show_dates);
    }

    Ok(())
}

fn print_event_dates(report: &EventStudyReport, k: usize) {
    let table = &report.table;
    if table.is_empty() {
        println!("\nNo qualifying events to show.");
        return;
    }

    println!("\nEvent dates (first {k}):");
    print!("{}", output::events_table(&table[..k.min(table.len())]));
    if table.len() > k {
        println!("\nEvent dates (last {k}):");
        print!("{}", output::events_table(&table[table.len() - k..]));
    }
}
