//! MoodMate CLI
//!
//! Command-line front end for the MoodMate backend:
//! - Log in, register and log out
//! - Chat with the AI companion
//! - Record moods, log exercises, generate reports
//! - Browse sessions from the REST backend or the hosted database

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dialoguer::{Input, Password};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodmate::api::{NewExercise, SessionId, DEFAULT_PERIOD};
use moodmate::config::{generate_default_config, Config, LoggingConfig};
use moodmate::pages::dashboard::DEFAULT_MOOD_SCORE;
use moodmate::pages::{
    AuthPage, ChatEntry, ChatPage, DashboardPage, RegisterForm, Route, SessionSummary,
    SessionsView, SettingsForm,
};
use moodmate::{
    ApiClient, ChatBackend, HostedClient, HtmlRenderer, LocalStore, Notice, Render,
    ReqwestTransport, TerminalRenderer,
};

#[derive(Parser)]
#[command(name = "moodmate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mood tracking and AI chat companion")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./moodmate.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Storage backend for settings, sessions and chat history
    #[arg(long, value_enum, default_value = "rest", global = true)]
    pub backend: BackendKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    Rest,
    Hosted,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the token
    Login {
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Register { username: String, email: String },

    /// Forget the stored token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// AI provider settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Chat with the AI; interactive when no message is given
    Chat { message: Option<String> },

    /// Chat sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Mood records
    Mood {
        #[command(subcommand)]
        action: MoodAction,
    },

    /// Mindfulness exercises
    Exercise {
        #[command(subcommand)]
        action: ExerciseAction,
    },

    /// Mental health reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Mood chart, recent sessions and the latest report
    Dashboard {
        /// Render as HTML
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the stored provider settings
    Show,
    /// Store provider settings
    Set {
        #[arg(long)]
        api_url: String,
        #[arg(long)]
        model_name: String,
        /// API key (prompted when omitted)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Generate a default config file
    Init {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// List sessions, newest first
    List,
    /// Show the messages of a session
    Messages {
        id: String,
        /// Render as HTML
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record a mood (score 1-10)
    Record {
        #[arg(value_parser = clap::value_parser!(i32).range(1..=10), default_value_t = DEFAULT_MOOD_SCORE)]
        score: i32,
        #[arg(short = 't', long = "type", default_value = "neutral")]
        mood_type: String,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List mood records
    List,
    /// Average mood per day
    Trends {
        #[arg(short, long, default_value = DEFAULT_PERIOD)]
        period: String,
    },
}

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List available exercise types
    Types,
    /// Start an exercise
    Start { kind: String },
    /// Log a completed exercise
    Log {
        kind: String,
        content: String,
        /// Duration in minutes
        #[arg(short, long)]
        minutes: Option<u32>,
    },
    /// List completed exercises
    List,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Generate a report for a period
    Generate {
        #[arg(short, long, default_value = DEFAULT_PERIOD)]
        period: String,
    },
    /// List generated reports
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => {
            let (config, skipped) = Config::load_default();
            for e in skipped {
                eprintln!("{} {}", "warning:".yellow(), e);
            }
            config
        }
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging)?;

    let store_path = match &config.store.path {
        Some(path) => PathBuf::from(path),
        None => LocalStore::default_path()?,
    };
    let mut store = LocalStore::open(store_path)?;

    let client = ApiClient::new(config.api.client_config()).with_token(store.token().map(String::from));
    let mut out = TerminalRenderer::stdout();

    match cli.command {
        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => Password::new().with_prompt("Password").interact()?,
            };

            let mut page = AuthPage::new(&client, &mut store);
            match page.login(&username, &password).await {
                Ok(nav) => {
                    out.notice(&Notice::success(format!("Logged in as {}", username)))?;
                    println!("Next: {}", route_hint(nav.route));
                }
                Err(notice) => fail(&mut out, &notice),
            }
        }

        Commands::Register { username, email } => {
            let password = Password::new().with_prompt("Password").interact()?;
            let confirm_password = Password::new().with_prompt("Confirm password").interact()?;

            let form = RegisterForm {
                username: &username,
                email: &email,
                password: &password,
                confirm_password: &confirm_password,
            };

            let mut page = AuthPage::new(&client, &mut store);
            match page.register(&form).await {
                Ok((notice, nav)) => {
                    out.notice(&notice)?;
                    tokio::time::sleep(nav.delay).await;
                    println!("Next: {}", route_hint(nav.route));
                }
                Err(notice) => fail(&mut out, &notice),
            }
        }

        Commands::Logout => {
            let mut page = AuthPage::new(&client, &mut store);
            page.logout().await?;
            out.notice(&Notice::success("Logged out"))?;
        }

        Commands::Whoami => match store.user() {
            Some(user) => println!("{}", serde_json::to_string_pretty(user)?),
            None if store.is_logged_in() => println!("Logged in (no user details stored)"),
            None => println!("{}", "Not logged in".yellow()),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let backend = open_backend(cli.backend, &config, &store)?;
                match backend.load_settings().await? {
                    Some(settings) => {
                        println!("{} ({})", "Provider settings".bold(), backend.name());
                        println!("  API URL: {}", settings.api_url);
                        println!("  Model:   {}", settings.model_name);
                        println!(
                            "  API key: {}",
                            if settings.api_key.is_some() { "Set".green() } else { "Not shown".dimmed() }
                        );
                    }
                    None => println!("{}", "No provider settings stored".yellow()),
                }
            }
            ConfigAction::Set {
                api_url,
                model_name,
                api_key,
            } => {
                let api_key = match api_key {
                    Some(k) => k,
                    None => Password::new().with_prompt("API key").interact()?,
                };
                let form = SettingsForm {
                    api_url,
                    api_key,
                    model_name,
                };

                let backend = open_backend(cli.backend, &config, &store)?;
                let mut page = ChatPage::with_backend(&client, backend.as_ref());
                let notice = page.save_settings(&form).await;
                if notice.is_error() {
                    fail(&mut out, &notice);
                }
                out.notice(&notice)?;
            }
            ConfigAction::Init { output } => {
                let content = generate_default_config();
                match output {
                    Some(path) => {
                        std::fs::write(&path, content)
                            .with_context(|| format!("Failed to write {:?}", path))?;
                        println!("Config written to {:?}", path);
                    }
                    None => print!("{}", content),
                }
            }
        },

        Commands::Chat { message } => {
            let backend = open_backend(cli.backend, &config, &store)?;
            let mut page = ChatPage::with_backend(&client, backend.as_ref());
            if !page.init().await {
                println!("{}", "No AI provider configured yet.".yellow());
                let form = prompt_settings(&page.settings_form())?;
                let notice = page.save_settings(&form).await;
                out.notice(&notice)?;
                if notice.is_error() {
                    std::process::exit(1);
                }
            }

            match message {
                Some(message) => {
                    chat_turn(&mut page, &mut out, &message).await?;
                }
                None => {
                    println!("Type a message and press Enter. /quit to leave.");
                    let mut lines = BufReader::new(tokio::io::stdin()).lines();
                    while let Some(line) = lines.next_line().await? {
                        if line.trim() == "/quit" {
                            break;
                        }
                        chat_turn(&mut page, &mut out, &line).await?;
                    }
                }
            }
        }

        Commands::Sessions { action } => {
            let backend = open_backend(cli.backend, &config, &store)?;
            match action {
                SessionAction::List => {
                    let view = match backend.sessions().await {
                        Ok(sessions) if sessions.is_empty() => SessionsView::Empty,
                        Ok(sessions) => {
                            SessionsView::List(sessions.iter().map(SessionSummary::from).collect())
                        }
                        Err(e) => SessionsView::Failed(e.to_string()),
                    };
                    out.sessions(&view)?;
                }
                SessionAction::Messages { id, html } => {
                    let messages = backend.messages(&SessionId::new(id)).await?;
                    let entries: Vec<ChatEntry> = messages.iter().map(ChatEntry::from_message).collect();
                    if html {
                        HtmlRenderer::new(std::io::stdout()).transcript(&entries)?;
                    } else {
                        out.transcript(&entries)?;
                    }
                }
            }
        }

        Commands::Mood { action } => {
            let mut page = DashboardPage::new(&client);
            match action {
                MoodAction::Record {
                    score,
                    mood_type,
                    notes,
                } => {
                    let notice = page.record_mood(score, &mood_type, &notes).await;
                    if notice.is_error() {
                        fail(&mut out, &notice);
                    }
                    out.notice(&notice)?;
                    if let Some(chart) = page.chart() {
                        out.mood_chart(chart)?;
                    }
                }
                MoodAction::List => {
                    let records = match page.mood_records().await {
                        Ok(records) => records,
                        Err(notice) => fail(&mut out, &notice),
                    };
                    if records.is_empty() {
                        println!("No mood records yet");
                    }
                    for record in records {
                        println!(
                            "{:>2}/10  {:<10} {:<18} {}",
                            record.mood_score,
                            record.mood_type.unwrap_or_default(),
                            record
                                .created_at
                                .as_deref()
                                .map(moodmate::format::format_relative_str)
                                .unwrap_or_default()
                                .dimmed(),
                            record.notes.unwrap_or_default()
                        );
                    }
                }
                MoodAction::Trends { period } => {
                    let chart = page.load_chart_for(&period).await.clone();
                    out.mood_chart(&chart)?;
                }
            }
        }

        Commands::Exercise { action } => {
            let page = DashboardPage::new(&client);
            match action {
                ExerciseAction::Types => {
                    let types = match page.exercise_types().await {
                        Ok(types) => types,
                        Err(notice) => fail(&mut out, &notice),
                    };
                    for t in types {
                        println!(
                            "{:<14} {}",
                            t.key.cyan(),
                            t.description.as_deref().unwrap_or(t.display_name())
                        );
                    }
                }
                ExerciseAction::Start { kind } => {
                    out.notice(&page.start_exercise(&kind))?;
                }
                ExerciseAction::Log {
                    kind,
                    content,
                    minutes,
                } => {
                    let exercise = NewExercise {
                        exercise_type: kind,
                        content,
                        duration_minutes: minutes,
                    };
                    let notice = page.log_exercise(&exercise).await;
                    if notice.is_error() {
                        fail(&mut out, &notice);
                    }
                    out.notice(&notice)?;
                }
                ExerciseAction::List => {
                    let exercises = match page.exercises().await {
                        Ok(exercises) => exercises,
                        Err(notice) => fail(&mut out, &notice),
                    };
                    if exercises.is_empty() {
                        println!("No exercises logged yet");
                    }
                    for exercise in exercises {
                        println!(
                            "{:<14} {:<18} {}",
                            exercise.exercise_type.cyan(),
                            exercise
                                .created_at
                                .as_deref()
                                .map(moodmate::format::format_relative_str)
                                .unwrap_or_default()
                                .dimmed(),
                            exercise.content.unwrap_or_default()
                        );
                    }
                }
            }
        }

        Commands::Report { action } => {
            let page = DashboardPage::new(&client);
            match action {
                ReportAction::Generate { period } => {
                    out.report(&page.generate_report_for(&period).await)?;
                }
                ReportAction::List => {
                    let reports = match page.reports().await {
                        Ok(reports) => reports,
                        Err(notice) => fail(&mut out, &notice),
                    };
                    if reports.is_empty() {
                        println!("No reports yet");
                    }
                    for report in reports {
                        out.report(&moodmate::ReportPanel::Ready(report))?;
                    }
                }
            }
        }

        Commands::Dashboard { html } => {
            let mut page = DashboardPage::new(&client);
            let chart = page.load_chart().await.clone();
            let sessions = page.recent_sessions().await;
            let report = page.generate_report().await;

            if html {
                let mut renderer = HtmlRenderer::new(std::io::stdout());
                renderer.mood_chart(&chart)?;
                renderer.sessions(&sessions)?;
                renderer.report(&report)?;
            } else {
                out.mood_chart(&chart)?;
                println!();
                println!("{}", "Recent sessions".bold());
                out.sessions(&sessions)?;
                println!();
                out.report(&report)?;
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("moodmate={}", config.level)));

    let writer = match &config.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}

fn open_backend(
    kind: BackendKind,
    config: &Config,
    store: &LocalStore,
) -> anyhow::Result<Box<dyn ChatBackend>> {
    let backend: Box<dyn ChatBackend> = match kind {
        BackendKind::Rest => Box::new(
            ApiClient::new(config.api.client_config()).with_token(store.token().map(String::from)),
        ),
        BackendKind::Hosted => Box::new(HostedClient::new(&config.hosted, ReqwestTransport::new())?),
    };
    tracing::debug!(backend = backend.name(), "Opened backend");
    Ok(backend)
}

fn prompt_settings(current: &SettingsForm) -> anyhow::Result<SettingsForm> {
    let api_url: String = Input::new()
        .with_prompt("API URL")
        .with_initial_text(current.api_url.clone())
        .interact_text()?;
    let model_name: String = Input::new()
        .with_prompt("Model name")
        .with_initial_text(current.model_name.clone())
        .interact_text()?;
    let api_key = Password::new().with_prompt("API key").interact()?;

    Ok(SettingsForm {
        api_url,
        api_key,
        model_name,
    })
}

/// Send one message and print what it added to the transcript
async fn chat_turn(
    page: &mut ChatPage<'_, ReqwestTransport>,
    out: &mut TerminalRenderer<std::io::Stdout>,
    message: &str,
) -> anyhow::Result<()> {
    let before = page.state().transcript.len();
    if let Some(notice) = page.send(message).await {
        out.notice(&notice)?;
    }
    out.transcript(&page.state().transcript[before..])?;
    Ok(())
}

fn route_hint(route: Route) -> &'static str {
    match route {
        Route::Index => "moodmate --help",
        Route::Login => "moodmate login <username>",
        Route::Dashboard => "moodmate dashboard",
        Route::Chat => "moodmate chat",
    }
}

/// Print an error notice and exit non-zero
fn fail<R: Render>(out: &mut R, notice: &Notice) -> ! {
    if out.notice(notice).is_err() {
        eprintln!("{}", notice.text);
    }
    std::process::exit(1);
}
