use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Args, Parser, Subcommand};
use journal_calc::config::{AppConfig, fetch_config};
use journal_calc::models::{NewTrade, TradeForm};
use journal_calc::report::CalcReport;
use journal_calc::sizing::PositionSizer;
use journal_calc::tui::event::{self, Action};
use journal_calc::tui::{App, render, restore_terminal, setup_terminal};
use journal_calc::{JournalError, Result};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::Level;

/// Tick interval for status message expiry.
const TICK_MS: u64 = 250;

#[derive(Parser, Debug)]
#[command(name = "journal-calc")]
#[command(about = "Position sizing and trade validation for a trading journal")]
struct Cli {
    /// Log debug output (stderr for `calc`, the log file for the form)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive trade entry form (the default)
    Tui,
    /// Size one trade and print the result
    Calc(CalcArgs),
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Instrument, in any spelling (EURUSD, eur/usd, gold, nas100)
    #[arg(short, long)]
    symbol: String,

    #[arg(short, long)]
    entry: String,

    /// Stop-loss price
    #[arg(long)]
    sl: String,

    /// Take-profit price
    #[arg(long, default_value = "")]
    tp: String,

    /// Account capital (default: JOURNAL_DEFAULT_CAPITAL)
    #[arg(short, long, default_value = "")]
    capital: String,

    /// Percent of capital to risk (default: JOURNAL_RISK_PCT)
    #[arg(short, long)]
    risk_pct: Option<Decimal>,

    /// Long or Short; enables form validation
    #[arg(short, long)]
    direction: Option<String>,

    /// Trade date, checked when validating
    #[arg(long, default_value = "")]
    date: String,

    /// Exit price of a closed trade; prints its profit and R-multiple
    #[arg(long)]
    exit: Option<Decimal>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = fetch_config()?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    match cli.command {
        Some(Command::Calc(args)) => {
            tracing_subscriber::fmt()
                .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
                .with_writer(std::io::stderr)
                .init();
            let sizer = config.sizer()?;
            calc(&sizer, &config, &args)
        }
        Some(Command::Tui) | None => {
            if let Some(path) = &config.log_file {
                init_file_logging(path, level)?;
            }
            let sizer = config.sizer()?;
            let recorded = run_tui(sizer, &config).await?;
            for trade in &recorded {
                println!("{}", serde_json::to_string(trade)?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Sends the form's log to `path`; the terminal belongs to the UI.
fn init_file_logging(path: &Path, level: Level) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| JournalError::Io(format!("failed to open log file {}: {e}", path.display())))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Runs the interactive form until the user quits and returns the trades
/// recorded along the way.
async fn run_tui(sizer: PositionSizer, config: &AppConfig) -> Result<Vec<NewTrade>> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(sizer, config.risk_pct);

    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx, TICK_MS);

    tracing::info!(default_capital = %config.default_capital, risk_pct = %config.risk_pct, "trade form started");

    let mut recorded = Vec::new();
    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| render(frame, &app)) {
            break Err(JournalError::Io(format!("failed to draw: {e}")));
        }
        let Some(message) = rx.recv().await else {
            break Ok(());
        };
        if let Some(Action::Submit(trade)) = event::update(&mut app, message) {
            tracing::info!(symbol = %trade.symbol, direction = %trade.direction, rr = %trade.rr, "trade recorded");
            recorded.push(trade);
        }
        if app.should_quit {
            break Ok(());
        }
    };

    restore_terminal(&mut terminal)?;
    outcome?;
    Ok(recorded)
}

fn calc(sizer: &PositionSizer, config: &AppConfig, args: &CalcArgs) -> Result<ExitCode> {
    let form = TradeForm {
        date: args.date.clone(),
        symbol: args.symbol.clone(),
        direction: args.direction.clone().unwrap_or_default(),
        entry: args.entry.clone(),
        sl: args.sl.clone(),
        tp: args.tp.clone(),
        capital: args.capital.clone(),
    };
    let risk_pct = args.risk_pct.unwrap_or(config.risk_pct);
    let report = CalcReport::new(sizer, &form, risk_pct, args.direction.is_some(), args.exit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
