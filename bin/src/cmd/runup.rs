//! Bulk pre-earnings run-up scan.

use crate::data::DataSource;
use crate::output;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Args;
use ronda_runup::{
    RankingConfig, RunupConfig, ScoreMode, best_frame, grid_frame, rows_frame, run_batch,
};
use ronda_traits::Horizons;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub(crate) struct RunupArgs {
    /// Comma-separated tickers, e.g. AAPL,MSFT,NVDA
    #[arg(long)]
    tickers: Option<String>,

    /// Text file with one ticker per line
    #[arg(long)]
    tickers_file: Option<PathBuf>,

    /// Number of past earnings to analyze
    #[arg(long = "x", default_value_t = 6)]
    earnings_count: usize,

    /// Comma-separated lookbacks in trading days
    #[arg(long = "ys", default_value = "5,10,15,20")]
    lookbacks: Horizons,

    /// Minimum win rate (0..1)
    #[arg(long = "min-win", default_value_t = 0.0)]
    min_win_rate: f64,

    /// Minimum run-ups required per lookback
    #[arg(long, default_value_t = 2)]
    min_samples: usize,

    /// Ranking metric (avg, sharpe, avg_with_win)
    #[arg(long, default_value = "sharpe")]
    score: ScoreMode,

    /// CSV for the best lookback per ticker
    #[arg(long, default_value = "best.csv")]
    out: PathBuf,

    /// CSV for every (ticker, lookback) summary
    #[arg(long, default_value = "all_results.csv")]
    grid: PathBuf,

    /// CSV for per-earnings rows
    #[arg(long, default_value = "per_rows.csv")]
    per: PathBuf,

    /// Read prices and earnings from CSV files in <DIR>
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Merge tickers from the comma list and the file contents, uppercased.
fn collect_tickers(list: Option<&str>, file: Option<&str>) -> Vec<String> {
    let from_list = list.into_iter().flat_map(|l| l.split(','));
    let from_file = file.into_iter().flat_map(str::lines);
    from_list
        .chain(from_file)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Scan tickers and write grid, best and per-row CSVs.
pub(crate) async fn run_runup(args: RunupArgs) -> Result<()> {
    if args.tickers.is_none() && args.tickers_file.is_none() {
        bail!("Provide --tickers or --tickers-file");
    }

    let file = args
        .tickers_file
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .transpose()?;
    let tickers = collect_tickers(args.tickers.as_deref(), file.as_deref());

    let config = RunupConfig {
        earnings_count: args.earnings_count,
        lookbacks: args.lookbacks,
    };
    let ranking = RankingConfig {
        min_win_rate: args.min_win_rate,
        min_samples: args.min_samples,
        score: args.score,
    };
    ranking.validate()?;

    output::print_banner("PRE-EARNINGS RUN-UP SCAN");
    println!("Tickers: {}", tickers.join(", "));
    println!(
        "X={}  Y={:?}  score={}  minWin={}  minSamples={}",
        config.earnings_count,
        config.lookbacks.as_slice(),
        ranking.score,
        ranking.min_win_rate,
        ranking.min_samples
    );

    let source = DataSource::resolve(args.data_dir)?;
    let today = Utc::now().date_naive();
    info!(tickers = tickers.len(), %today, "starting run-up scan");
    let batch = run_batch(source, &tickers, &config, today).await?;

    let grid = batch.grid();
    let best = batch.best_picks(&ranking);

    output::write_csv(&mut grid_frame(&grid)?, &args.grid)?;
    output::write_csv(&mut best_frame(&best)?, &args.out)?;

    println!(
        "\nWrote grid results to {} ({} rows)",
        args.grid.display(),
        grid.len()
    );
    println!(
        "Wrote best-per-ticker to {} ({} tickers)",
        args.out.display(),
        best.len()
    );
    if !best.is_empty() {
        println!("\nTop picks (head):");
        print!("{}", output::best_table(&best[..best.len().min(10)]));
    }

    let mut per = rows_frame(batch.rows())?;
    output::write_csv(&mut per, &args.per)?;
    println!(
        "Wrote per-earnings rows to {} ({} rows)",
        args.per.display(),
        per.height()
    );

    Ok(())
}
