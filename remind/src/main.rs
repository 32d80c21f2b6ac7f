//! remind - study tracker with spaced-repetition reviews.
//!
//! Command-line front end over the `schedule` store. Every invocation loads
//! the collections from the data directory, applies one command, and waits
//! for persistence (and backend mirroring, if configured) before exiting.
//! Logs go to a daily rolling file so stdout only carries command output.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use schedule::{EntityStore, JsonFileStore, MirrorHandle, SeedData, StoreError};
use study::{Clock, Difficulty, LogId, ProfileUpdate, ReviewId, StudyPayload, SubjectId, SystemClock};
use study_client::{ActorResolver, HttpBackend, SessionFile, StoredSession};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod render;

#[derive(Parser)]
#[command(name = "remind", about = "Study tracker with spaced-repetition reviews")]
struct Cli {
    /// When omitted, prints the dashboard.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Store(StoreCommand),
    #[command(flatten)]
    Account(AccountCommand),
}

/// Commands that operate on the local store.
#[derive(Subcommand)]
enum StoreCommand {
    /// Show streak, totals, weekly activity and upcoming reviews.
    Dashboard,
    /// Record a study session; schedules reviews after 1, 7 and 14 days.
    Study {
        subject: String,
        topic: String,
        /// Minutes studied.
        minutes: i64,
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,
    },
    /// Mark a review done and log the session.
    Complete {
        id: ReviewId,
        /// Minutes spent reviewing (defaults to 30).
        #[arg(short, long)]
        minutes: Option<i64>,
    },
    /// List reviews.
    Reviews {
        /// Show completed reviews instead of pending ones.
        #[arg(long)]
        done: bool,
    },
    Subjects {
        #[command(subcommand)]
        action: Option<SubjectAction>,
    },
    Logs {
        #[command(subcommand)]
        action: Option<LogAction>,
    },
    /// Show or edit the local profile.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Erase all local data.
    DeleteAccount {
        /// Required confirmation.
        #[arg(long)]
        yes: bool,
    },
}

/// Commands that talk to the backend only.
#[derive(Subcommand)]
enum AccountCommand {
    /// Log in to the backend; new sessions are mirrored as this user.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the backend login.
    Logout,
    /// Create a backend account.
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirmation: String,
    },
    /// Query sessions recorded by the backend.
    Remote {
        #[command(subcommand)]
        query: RemoteQuery,
    },
}

#[derive(Subcommand)]
enum SubjectAction {
    List,
    Add {
        name: String,
        /// Hex color, e.g. "#2F80ED".
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a subject and all of its reviews.
    Rm { id: SubjectId },
}

#[derive(Subcommand)]
enum LogAction {
    List,
    /// Delete a study log. Its reviews are kept.
    Rm { id: LogId },
}

#[derive(Subcommand)]
enum RemoteQuery {
    Today,
    Week,
    History { date: NaiveDate },
    Schedule { date: NaiveDate },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no backend configured (set REMIND_BACKEND_URL)")]
    BackendNotConfigured,

    #[error("refusing to delete the account without --yes")]
    NotConfirmed,

    #[error("failed to set up logging: {0}")]
    Logging(#[from] std::io::Error),
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard, CliError> {
    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "remind");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(guard)
}

fn backend() -> anyhow::Result<Option<HttpBackend>> {
    let Some(url) = config::get_backend_url() else {
        return Ok(None);
    };
    let timeout = Duration::from_secs(config::get_backend_timeout_secs());
    Ok(Some(HttpBackend::new(&url, timeout)?))
}

fn require_backend() -> anyhow::Result<HttpBackend> {
    backend()?.ok_or_else(|| CliError::BackendNotConfigured.into())
}

async fn open_store() -> anyhow::Result<EntityStore> {
    let data_dir = config::get_data_dir();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let kv = Arc::new(JsonFileStore::new(data_dir.clone()));

    tracing::info!(data_dir = %data_dir.display(), "Opening store");
    let store = EntityStore::load(kv, SeedData::demo(clock.now()), clock).await;

    Ok(match backend()? {
        Some(backend) => {
            let actors: Arc<dyn ActorResolver> =
                Arc::new(SessionFile::new(config::get_session_path()));
            store.with_mirror(MirrorHandle::spawn(Arc::new(backend)), actors)
        }
        None => store,
    })
}

/// Print the outcome of a registration. A missing login only skips mirroring.
fn report_registration(result: Result<Option<LogId>, StoreError>) -> anyhow::Result<()> {
    match result {
        Ok(Some(log_id)) => println!("Logged session {}", log_id),
        Ok(None) => println!("Nothing to do."),
        Err(e @ StoreError::MissingActor { .. }) => {
            tracing::warn!("{}", e);
            if let Some(log_id) = e.saved_log_id() {
                println!("Logged session {} (not synced: run `remind login`)", log_id);
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn run_store_command(store: &mut EntityStore, command: StoreCommand) -> anyhow::Result<()> {
    match command {
        StoreCommand::Dashboard => print!("{}", render::dashboard(&store.analytics())),
        StoreCommand::Study {
            subject,
            topic,
            minutes,
            difficulty,
        } => {
            let payload = StudyPayload::new(subject, topic, minutes).with_difficulty(difficulty);
            report_registration(store.register_study(payload).map(Some))?;
        }
        StoreCommand::Complete { id, minutes } => {
            let minutes = minutes.unwrap_or(store.config().default_review_minutes);
            report_registration(store.complete_review_with_duration(id, minutes))?;
        }
        StoreCommand::Reviews { done } => {
            let reviews = if done {
                store.done_reviews()
            } else {
                store.pending_reviews()
            };
            for review in reviews {
                println!("{}", render::review_line(review));
            }
            if !done {
                println!(
                    "{} due today, {} overdue",
                    store.today_count(),
                    store.overdue_count()
                );
            }
        }
        StoreCommand::Subjects { action } => match action.unwrap_or(SubjectAction::List) {
            SubjectAction::List => {
                for subject in store.subjects() {
                    println!("{}", render::subject_line(subject));
                }
            }
            SubjectAction::Add { name, color } => {
                let id = store.add_subject(&name, color.as_deref())?;
                println!("Added subject {}", id);
            }
            SubjectAction::Rm { id } => match store.delete_subject(id) {
                Some(subject) => println!("Deleted subject {}", subject.name),
                None => println!("No such subject."),
            },
        },
        StoreCommand::Logs { action } => match action.unwrap_or(LogAction::List) {
            LogAction::List => {
                for log in store.logs_by_recency() {
                    println!("{}", render::log_line(log));
                }
            }
            LogAction::Rm { id } => {
                if store.delete_study_log(id) {
                    println!("Deleted log {}", id);
                } else {
                    println!("No such log.");
                }
            }
        },
        StoreCommand::Profile {
            name,
            email,
            avatar,
        } => {
            if name.is_some() || email.is_some() || avatar.is_some() {
                store.update_profile(ProfileUpdate {
                    name,
                    email,
                    avatar,
                });
            }
            print!("{}", render::profile(store.profile()));
        }
        StoreCommand::DeleteAccount { yes } => {
            if !yes {
                return Err(CliError::NotConfirmed.into());
            }
            store.delete_account();
            println!("All local data deleted.");
        }
    }
    Ok(())
}

async fn run_account_command(command: AccountCommand) -> anyhow::Result<()> {
    let session = SessionFile::new(config::get_session_path());
    match command {
        AccountCommand::Login { email, password } => {
            let actor_id = require_backend()?.login(&email, &password).await?;
            session.save(&StoredSession {
                actor_id: actor_id.clone(),
                email: Some(email),
            })?;
            tracing::info!(%actor_id, "Logged in");
            println!("Logged in as {}", actor_id);
        }
        AccountCommand::Logout => {
            session.clear()?;
            println!("Logged out.");
        }
        AccountCommand::Register {
            name,
            email,
            password,
            confirmation,
        } => {
            let body = require_backend()?
                .register(&name, &email, &password, &confirmation)
                .await?;
            println!("{}", body);
        }
        AccountCommand::Remote { query } => {
            let backend = require_backend()?;
            let actor_id = session.resolve_actor_id()?;
            let body = match query {
                RemoteQuery::Today => backend.today_studies(&actor_id).await?,
                RemoteQuery::Week => backend.week_studies(&actor_id).await?,
                RemoteQuery::History { date } => backend.history_studies(&actor_id, date).await?,
                RemoteQuery::Schedule { date } => backend.schedule_studies(&actor_id, date).await?,
            };
            println!("{:#}", body);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_logging()?;
    let cli = Cli::parse();

    tracing::info!("remind starting");

    let command = match cli.command {
        Some(Commands::Account(command)) => return run_account_command(command).await,
        Some(Commands::Store(command)) => command,
        None => StoreCommand::Dashboard,
    };

    let mut store = open_store().await?;
    let result = run_store_command(&mut store, command);
    if let Err(e) = store.close().await {
        tracing::error!("Failed to flush store: {}", e);
    }
    result
}
