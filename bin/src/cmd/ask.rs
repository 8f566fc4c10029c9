//! Natural-language event study command.

use crate::cmd::event::{headline, load_series};
use crate::data::{self, DataSource};
use crate::output;
use crate::query::{ParsedQuery, QueryParser};
use anyhow::Result;
use clap::Args;
use ronda_event::{EventStudy, EventStudyConfig, EventStudyReport};
use ronda_traits::{Date, PriceHistoryProvider};
use serde::Serialize;
use std::path::PathBuf;

const EXAMPLE_QUERY: &str =
    "What happens after a 7% down day on TSLA over the next 3 and 5 sessions?";

#[derive(Debug, Args)]
pub(crate) struct AskArgs {
    /// Question, e.g. "What happens after a 7% down day on TSLA next 3 days?"
    #[arg(default_value = EXAMPLE_QUERY)]
    query: String,

    /// Symbol to use when the question names none
    #[arg(long)]
    current_symbol: Option<String>,

    /// History start date (YYYY-MM-DD)
    #[arg(long, default_value = "2012-01-01")]
    start: String,

    /// Calendar-day gap required between kept events
    #[arg(long, default_value_t = 3)]
    cooldown_days: u32,

    /// Read prices from <DIR>/<SYMBOL>.csv instead of the FMP API
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Outcome of a question.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(crate) enum Answer {
    /// The question was complete and the study ran.
    Ok {
        parsed: ParsedQuery,
        report: EventStudyReport,
    },
    /// Symbol or percent missing.
    Rejected {
        message: String,
        parsed: ParsedQuery,
    },
}

/// Parse `query` and run the study it describes.
pub(crate) async fn answer<P: PriceHistoryProvider>(
    provider: &P,
    parser: &QueryParser,
    query: &str,
    current_symbol: Option<&str>,
    start: Date,
    cooldown_days: u32,
) -> ronda_traits::Result<Answer> {
    let parsed = parser.parse(query, current_symbol);
    let (Some(symbol), Some(percent)) = (parsed.symbol.clone(), parsed.percent) else {
        return Ok(Answer::Rejected {
            message: "Need a symbol and a percent (e.g., '7% on NVDA').".to_string(),
            parsed,
        });
    };

    let series = load_series(provider, &symbol, start).await?;
    let study = EventStudy::new(EventStudyConfig {
        threshold: percent / 100.0,
        direction: parsed.direction,
        cooldown_days,
        horizons: parsed.horizons.clone(),
    });
    let report = study.run(&series)?;

    Ok(Answer::Ok { parsed, report })
}

fn describe(parsed: &ParsedQuery) -> String {
    format!(
        "symbol={} percent={} direction={} horizons={:?}",
        parsed.symbol.as_deref().unwrap_or("-"),
        parsed.percent.map_or_else(|| "-".to_string(), |p| p.to_string()),
        parsed.direction,
        parsed.horizons.as_slice()
    )
}

/// Answer a free-text question.
pub(crate) async fn run_ask(args: AskArgs) -> Result<()> {
    let start = data::parse_date(&args.start)?;
    let parser = QueryParser::new()?;
    let source = DataSource::resolve(args.data_dir)?;

    let result = answer(
        &source,
        &parser,
        &args.query,
        args.current_symbol.as_deref(),
        start,
        args.cooldown_days,
    )
    .await?;

    match result {
        Answer::Rejected { message, parsed } => {
            println!("Parsed: {}", describe(&parsed));
            println!("Error: {message}");
        }
        Answer::Ok { parsed, report } => {
            println!("Parsed: {}", describe(&parsed));
            println!("\n{}", headline(&report));
            print!("{}", output::summary_table(&report.summary));
        }
    }

    Ok(())
}
