use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use openwith_events::{EventSinkRef, TracingEventSink};
use openwith_preferences::ComponentName;
use openwith_rating::{
    DisplayCondition, FeedbackChoice, RatingEngagementController, RatingState,
    UsageDisplayCondition,
};
use openwith_storage::{Database, PreferenceStore};
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use terminal::{ForcedCondition, TerminalActions, TerminalHost};

#[derive(Parser)]
#[command(name = "openwith", version, about = "Per-host app preferences and rating prompt")]
struct Cli {
    /// Database file (defaults to $OPENWITH_DB, then the user data dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the app chosen for a host
    Get { host: String },
    /// Remember an app for a host
    Set {
        host: String,
        /// Component as `package/class` (`package/.Class` is accepted)
        component: String,
        /// Open without asking from now on
        #[arg(long)]
        preferred: bool,
    },
    /// Forget the app chosen for a host
    Clear { host: String },
    /// List every remembered host
    List,
    /// Count an app launch towards the rating prompt
    Launch,
    /// Answer the rating prompt
    Rate {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        /// Button pressed in the feedback dialog after a low rating
        #[arg(long, value_enum)]
        choice: Option<Choice>,
        /// Show the prompt even if usage thresholds are not met
        #[arg(long)]
        force: bool,
    },
    /// Show rating prompt counters and policy
    RatingStatus,
}

#[derive(Clone, Copy, ValueEnum)]
enum Choice {
    Cancel,
    Never,
    Submit,
}

impl From<Choice> for FeedbackChoice {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Cancel => FeedbackChoice::Cancel,
            Choice::Never => FeedbackChoice::Never,
            Choice::Submit => FeedbackChoice::Submit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,openwith=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let env_db = std::env::var_os(config::DB_ENV_VAR).map(PathBuf::from);
    let db_path = config::resolve_db_path(cli.db, env_db)?;
    config::ensure_parent_dir(&db_path)?;
    let db = Arc::new(
        Database::open(&db_path)
            .with_context(|| format!("failed to open {}", db_path.display()))?,
    );

    match cli.command {
        Commands::Get { host } => get(&PreferenceStore::new(db), &host).await,
        Commands::Set {
            host,
            component,
            preferred,
        } => {
            let component: ComponentName = component
                .parse()
                .with_context(|| format!("invalid component {component:?}"))?;
            PreferenceStore::new(db)
                .set_preference(&host, component, preferred)
                .await?;
            Ok(())
        }
        Commands::Clear { host } => {
            PreferenceStore::new(db).clear_preference(&host).await?;
            Ok(())
        }
        Commands::List => list(&PreferenceStore::new(db)).await,
        Commands::Launch => {
            UsageDisplayCondition::new(db).record_launch(Utc::now());
            Ok(())
        }
        Commands::Rate {
            rating,
            choice,
            force,
        } => {
            rate(db, rating, choice.map(Into::into), force);
            Ok(())
        }
        Commands::RatingStatus => rating_status(db),
    }
}

async fn get(store: &PreferenceStore, host: &str) -> Result<()> {
    match store.get_preference(host).await? {
        Some(app) => {
            let component = app
                .component_name()
                .with_context(|| format!("stored component for {host} is corrupt"))?;
            println!("{} -> {} ({})", app.host, component, mode(app.preferred));
        }
        None => println!("{host}: no preference, will ask"),
    }
    Ok(())
}

async fn list(store: &PreferenceStore) -> Result<()> {
    let apps = store.list_preferences().await?;
    if apps.is_empty() {
        println!("No preferences saved.");
    }
    for app in apps {
        println!("{:>4}  {}  {}  {}", app.id, app.host, app.component, mode(app.preferred));
    }
    Ok(())
}

fn mode(preferred: bool) -> &'static str {
    if preferred {
        "always"
    } else {
        "once"
    }
}

fn rate(db: Arc<Database>, rating: u8, choice: Option<FeedbackChoice>, force: bool) {
    let usage = UsageDisplayCondition::new(db);
    let good_rating = usage.policy().good_rating;
    let events: EventSinkRef = Arc::new(TracingEventSink);
    let mut controller = RatingEngagementController::new(
        ForcedCondition::new(usage, force),
        TerminalHost::default(),
        TerminalActions,
        events,
    )
    .with_good_rating(good_rating);

    controller.on_evaluate();
    if controller.state() != RatingState::Visible {
        println!("Rating prompt is not due yet (use --force to show it anyway).");
        return;
    }

    controller.on_rating_submitted(rating);
    if controller.state() == RatingState::AwaitingFeedbackChoice {
        controller.complete_feedback(choice);
    }
    tracing::debug!(state = ?controller.state(), "Rating flow finished");
}

fn rating_status(db: Arc<Database>) -> Result<()> {
    let usage = UsageDisplayCondition::new(db);
    let first_seen = usage
        .first_seen()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    println!("launches:      {}", usage.launch_count());
    println!("first seen:    {first_seen}");
    println!("already shown: {}", usage.already_shown());
    println!("due now:       {}", usage.should_display());
    println!("policy:        {}", serde_json::to_string(&usage.policy())?);
    Ok(())
}
