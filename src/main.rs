//! healthtrack - operator CLI for stored HealthTrack records.
//!
//! Resolves routes through the session gate, inspects, clears or submits the
//! saved wizard draft, writes and deletes session records and computes BMI.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use healthtrack::adapters::notify::TracingNotifier;
use healthtrack::adapters::storage::{
    shared_codec, FileKeyValueStore, InMemoryKeyValueStore, KvDraftStore, KvSessionStore,
};
use healthtrack::adapters::WizardWiring;
use healthtrack::application::{AuthHandler, LoginCommand, SessionGate, ViewScope};
use healthtrack::config::{AppConfig, LogFormat, StorageBackend};
use healthtrack::domain::profile::Bmi;
use healthtrack::domain::routing::RouteDecision;
use healthtrack::domain::session::{LoginForm, Role};
use healthtrack::domain::wizard::WizardStep;
use healthtrack::ports::{DraftStore, KeyValueStore};

/// healthtrack - inspect and manage HealthTrack client records
#[derive(Parser, Debug)]
#[command(name = "healthtrack")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show what entering a path would do
    Route {
        /// Requested path, e.g. /doctor/dashboard
        path: String,
    },

    /// Saved wizard draft
    #[command(subcommand)]
    Draft(DraftCommands),

    /// Write a session record for a role
    Login {
        /// patient, caregiver or doctor
        #[arg(long)]
        role: Role,

        /// Login identifier
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Path to return to after login
        #[arg(long)]
        return_to: Option<String>,

        /// Password; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Delete the session record of a role
    Logout {
        /// patient, caregiver or doctor
        #[arg(long)]
        role: Role,
    },

    /// Compute BMI and its band
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimeters
        #[arg(long)]
        height: f64,
    },
}

#[derive(Subcommand, Debug)]
enum DraftCommands {
    /// Print the saved draft as JSON
    Show,
    /// Delete the saved draft
    Clear,
    /// Validate and submit the saved draft as the committed profile
    Submit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config);

    let store = key_value_store(&config);
    let codec = shared_codec();
    let sessions = Arc::new(KvSessionStore::new(Arc::clone(&store), Arc::clone(&codec)));
    let policy = config.features.access_policy();

    match cli.command {
        Commands::Route { path } => {
            let gate = SessionGate::new(sessions, Arc::new(TracingNotifier::new()), policy)
                .with_max_age(config.session.max_age_secs);
            match gate.guard(&path).await {
                RouteDecision::Allow(route) => println!("allow {}", route),
                RouteDecision::Redirect {
                    to,
                    notice,
                    return_to,
                } => {
                    println!("redirect {}", to);
                    if let Some(notice) = notice {
                        println!("notice: {}", notice);
                    }
                    if let Some(from) = return_to {
                        println!("return to: {}", from);
                    }
                }
                RouteDecision::NotFound => println!("not found"),
            }
        }

        Commands::Draft(cmd) => {
            let drafts = KvDraftStore::new(Arc::clone(&store), codec);
            match cmd {
                DraftCommands::Show => match drafts.load().await {
                    Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
                    None => println!("no saved draft"),
                },
                DraftCommands::Clear => {
                    drafts.clear().await.context("failed to clear draft")?;
                    println!("draft cleared");
                }
                DraftCommands::Submit => {
                    let wiring =
                        WizardWiring::new(&config.wizard, store, Arc::new(TracingNotifier::new()));
                    let mut wizard = wiring.enter(ViewScope::new()).await;
                    if !wizard.was_restored() {
                        anyhow::bail!("no saved draft to submit");
                    }
                    wizard.jump_to(WizardStep::Review).await;
                    let result = wizard
                        .complete()
                        .await
                        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                    println!("profile committed; redirect {}", result.redirect_to);
                }
            }
        }

        Commands::Login {
            role,
            id,
            name,
            return_to,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => read_password()?,
            };
            let auth = AuthHandler::new(sessions, policy, config.features.honor_return_to);
            let result = auth
                .login(LoginCommand {
                    role,
                    form: LoginForm::new(id, password),
                    display_name: name,
                    return_to,
                })
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("logged in as {} ({})", result.session.display_name, role);
            println!("redirect {}", result.redirect_to);
        }

        Commands::Logout { role } => {
            let auth = AuthHandler::new(sessions, policy, config.features.honor_return_to);
            let to = auth
                .logout(role)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("logged out; redirect {}", to);
        }

        Commands::Bmi { weight, height } => match Bmi::compute(Some(weight), Some(height)) {
            Some(bmi) => println!("{} {}", bmi, bmi.band()),
            None => anyhow::bail!("weight and height must be positive numbers"),
        },
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn key_value_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    match config.storage.backend {
        StorageBackend::File => Arc::new(
            FileKeyValueStore::new(&config.storage.data_dir).with_quota(config.storage.quota_bytes),
        ),
        StorageBackend::Memory => {
            Arc::new(InMemoryKeyValueStore::new().with_quota(config.storage.quota_bytes))
        }
    }
}

fn read_password() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
