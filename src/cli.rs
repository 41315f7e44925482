use crate::error::AppError;
use crate::receipts::{breakdown, validate, RawReceipt};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Receipt Points Service",
    about = "Score retail receipts into reward points, as a service or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a receipt JSON file and print the rule-by-rule breakdown
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) receipt: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
    }
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let text = fs::read_to_string(&args.receipt)?;
    let raw: RawReceipt = serde_json::from_str(&text)?;
    let receipt = validate(raw)?;
    let scored = breakdown(&receipt);

    println!("Receipt: {} on {}", receipt.retailer, receipt.purchase_date);
    for contribution in &scored.contributions {
        println!("- {}: {}", contribution.rule.label(), contribution.points);
    }
    println!("Total points: {}", scored.total);

    Ok(())
}
