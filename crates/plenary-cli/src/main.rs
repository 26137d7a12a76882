mod report;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use plenary_core::meeting::DEFAULT_BASE_URL;
use plenary_core::{ExtractConfig, MeetingInfo, Session, TimeOfDay};
use plenary_extract::classifier::classify;
use plenary_extract::{ExtractError, Extractor};
use plenary_store::{DocumentRegistry, QuestionRegistry, Roster};
use plenary_sync::{FetchConfig, Harvester, HttpSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plenary", version)]
#[command(about = "Topics, votes and references from Belgian Chamber plenary transcripts", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "PLENARY_LOG", default_value = "info", global = true)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one meeting, from the website or a saved transcript
    Meeting(MeetingArgs),
    /// Harvest every meeting of a session as JSON lines
    Session(SessionArgs),
    /// Classify an agenda item from its Dutch title and section
    Classify {
        title: String,
        #[arg(long, default_value = "")]
        section: String,
    },
}

#[derive(Args)]
struct MeetingArgs {
    /// Meeting number within the session
    id: u32,
    #[arg(long, env = "PLENARY_SESSION", default_value_t = 55)]
    session: u32,
    /// Read the transcript from this file instead of the website
    #[arg(long)]
    file: Option<PathBuf>,
    /// Meeting date (YYYY-MM-DD), required with --file
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Time of day as printed in the listing (AM, PM, Avond)
    #[arg(long, default_value = "AM")]
    time_of_day: String,
    /// Print a summary card instead of JSON
    #[arg(long)]
    card: bool,
    #[command(flatten)]
    extract: ExtractArgs,
    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args)]
struct SessionArgs {
    #[arg(env = "PLENARY_SESSION")]
    session: u32,
    /// Only the first N listed meetings
    #[arg(long)]
    limit: Option<usize>,
    /// Write the legislation and question indexes to this file
    #[arg(long)]
    index: Option<PathBuf>,
    #[command(flatten)]
    extract: ExtractArgs,
    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args)]
struct ExtractArgs {
    /// Session composition JSON (`[{id, first_name, last_name, party}]`)
    #[arg(long, env = "PLENARY_ROSTER")]
    roster: Option<PathBuf>,
    #[arg(long, env = "PLENARY_COUNT_TOLERANCE", default_value_t = 2)]
    count_tolerance: u32,
    #[arg(long, env = "PLENARY_TABLE_DEPTH", default_value_t = 6)]
    table_ancestor_depth: usize,
    /// Root of every URI in the output
    #[arg(long, env = "PLENARY_BASE_URI", default_value = "/")]
    base_uri: String,
}

#[derive(Args)]
struct FetchArgs {
    #[arg(long, env = "PLENARY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "PLENARY_MARKER_RETRIES", default_value_t = 10)]
    marker_retries: u32,
    #[arg(long, env = "PLENARY_TRANSPORT_RETRIES", default_value_t = 5)]
    transport_retries: u32,
    #[arg(long, env = "PLENARY_BACKOFF_MS", default_value_t = 1000)]
    backoff_ms: u64,
    #[arg(long, env = "PLENARY_WORKERS", default_value_t = 10)]
    workers: usize,
}

impl From<&ExtractArgs> for ExtractConfig {
    fn from(args: &ExtractArgs) -> Self {
        Self {
            count_tolerance: args.count_tolerance,
            table_ancestor_depth: args.table_ancestor_depth,
            base_uri: args.base_uri.clone(),
        }
    }
}

impl From<&FetchArgs> for FetchConfig {
    fn from(args: &FetchArgs) -> Self {
        Self {
            base_url: args.base_url.clone(),
            marker_retries: args.marker_retries,
            transport_retries: args.transport_retries,
            backoff_ms: args.backoff_ms,
            workers: args.workers,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    info!("plenary v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Meeting(args) => run_meeting(args).await,
        Commands::Session(args) => run_session(args).await,
        Commands::Classify { title, section } => {
            println!("{}", classify(&title, &section));
            Ok(())
        }
    }
}

// ── Wiring ──

struct Registries {
    documents: Arc<DocumentRegistry>,
    questions: Arc<QuestionRegistry>,
}

fn load_roster(path: Option<&Path>) -> Result<Roster> {
    match path {
        Some(path) => Roster::load(path).with_context(|| format!("loading roster {}", path.display())),
        None => {
            warn!("no roster given, vote names will not resolve");
            Ok(Roster::new(Vec::new())?)
        }
    }
}

fn build_extractor(args: &ExtractArgs) -> Result<(Extractor, Registries)> {
    let roster = load_roster(args.roster.as_deref())?;
    let registries = Registries {
        documents: Arc::new(DocumentRegistry::new()),
        questions: Arc::new(QuestionRegistry::new()),
    };
    let extractor = Extractor::new(
        Arc::new(roster),
        registries.documents.clone(),
        registries.questions.clone(),
        ExtractConfig::from(args),
    );
    Ok((extractor, registries))
}

fn known_session(number: u32) -> Result<Session> {
    Ok(Session::known(number).ok_or(ExtractError::UnknownSession(number))?)
}

// ── Commands ──

async fn run_meeting(args: MeetingArgs) -> Result<()> {
    let session = known_session(args.session)?;
    let (extractor, _) = build_extractor(&args.extract)?;
    let base_uri = session.base_uri(&extractor.config().base_uri);

    let extraction = match &args.file {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading transcript {}", path.display()))?;
            let date = args.date.context("--date is required with --file")?;
            let info = MeetingInfo {
                session: session.number,
                id: args.id,
                time_of_day: TimeOfDay::from_listing(&args.time_of_day),
                date,
            };
            extractor.extract(info, &String::from_utf8_lossy(&bytes))
        }
        None => {
            let config = FetchConfig::from(&args.fetch);
            let source = Arc::new(HttpSource::new(&config));
            let harvester = Harvester::new(source, Arc::new(extractor), config);
            let info = harvester
                .meetings(&session)
                .await
                .context("fetching meeting listing")?
                .into_iter()
                .find(|m| m.id == args.id)
                .with_context(|| format!("meeting {} is not listed for session {}", args.id, session.number))?;
            harvester.meeting(info).await
        }
    };

    if args.card {
        report::print_meeting_card(&extraction);
    } else {
        let json = report::extraction_json(&extraction, &base_uri);
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

async fn run_session(args: SessionArgs) -> Result<()> {
    let session = known_session(args.session)?;
    let (extractor, registries) = build_extractor(&args.extract)?;
    let base_uri = session.base_uri(&extractor.config().base_uri);

    let config = FetchConfig::from(&args.fetch);
    let source = Arc::new(HttpSource::new(&config));
    let harvester = Harvester::new(source, Arc::new(extractor), config);

    let mut meetings = harvester
        .meetings(&session)
        .await
        .context("fetching meeting listing")?;
    if let Some(limit) = args.limit {
        meetings.truncate(limit);
    }

    let mut extractions = harvester.harvest(meetings).await;
    extractions.sort_by_key(|e| e.meeting.id);

    let mut out = std::io::stdout().lock();
    for extraction in &extractions {
        let json = report::extraction_json(extraction, &base_uri);
        writeln!(out, "{}", serde_json::to_string(&json)?)?;
    }

    info!(
        session = session.number,
        meetings = extractions.len(),
        documents = registries.documents.len(),
        questions = registries.questions.len(),
        "session harvested"
    );

    if let Some(path) = &args.index {
        let index = report::entity_index(
            &registries.documents,
            &registries.questions,
            session.number,
            &base_uri,
        );
        std::fs::write(path, serde_json::to_string_pretty(&index)?)
            .with_context(|| format!("writing index {}", path.display()))?;
        info!(path = %path.display(), "wrote entity index");
    }
    Ok(())
}
