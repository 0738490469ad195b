use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "TextLens - analyze text or web pages and revisit past results", long_about = None)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze text, or a web page with --url
    Analyze(AnalyzeArgs),
    /// Inspect or clear stored analyses
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze, or the page URL with --url
    input: String,

    /// Treat the input as a URL fetched by the service
    #[arg(long)]
    url: bool,

    /// Request a summary
    #[arg(long)]
    summarize: bool,

    /// Request topic detection
    #[arg(long)]
    topics: bool,

    /// Request sentiment analysis
    #[arg(long)]
    sentiment: bool,

    /// Request intent recognition
    #[arg(long)]
    intents: bool,

    /// Request every feature
    #[arg(long, conflicts_with_all = ["summarize", "topics", "sentiment", "intents"])]
    all: bool,

    /// Language code sent to the service (defaults to the configured one)
    #[arg(long)]
    language: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List stored analyses, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show a stored analysis without contacting the service
    Show {
        /// Correlation id, or a unique prefix of it
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Remove every stored analysis
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration and history file locations
    Path,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args).await?,
        Commands::History { action } => match action {
            HistoryAction::List { json } => commands::history::list(json).await?,
            HistoryAction::Show { id, json } => commands::history::show(&id, json).await?,
            HistoryAction::Clear => commands::history::clear().await?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Show => commands::config::show()?,
        },
    }

    Ok(())
}
