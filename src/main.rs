//! Agent Console - command line entry point
//!
//! Drives the console client from a terminal: sign in, browse and edit
//! agents, manage phone numbers, files and preferences. Results are printed
//! as pretty JSON; rejected operations exit non-zero with the reason.

use agent_console::config::Config;
use agent_console::models::{AgentUpdate, NewAgent, PhoneNumberImport, ProfileUpdate, Signup};
use agent_console::state::Theme;
use agent_console::{Console, FetchMode, Rejection};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "agent-console",
    version,
    about = "Administration console for voice and text agents"
)]
struct Cli {
    /// Backend base URL (overrides AGENT_CONSOLE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Create an account and store the session
    Signup {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Change the account password
    ChangePassword {
        /// Current password
        #[arg(long)]
        current: String,
        /// New password
        #[arg(long)]
        new: String,
    },
    /// Permanently delete the account
    DeleteAccount,
    /// Profile commands
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Agent commands
    #[command(subcommand)]
    Agents(AgentCommand),
    /// Phone number commands
    #[command(subcommand)]
    Numbers(NumberCommand),
    /// Knowledge-base file commands
    #[command(subcommand)]
    Files(FileCommand),
    /// Voice commands
    #[command(subcommand)]
    Voices(VoiceCommand),
    /// UI preference commands
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    /// Show the profile
    Show,
    /// Change profile fields
    Update {
        /// Given name
        #[arg(long)]
        first_name: Option<String>,
        /// Family name
        #[arg(long)]
        last_name: Option<String>,
        /// Company
        #[arg(long)]
        company: Option<String>,
    },
    /// Upload a new avatar image
    Avatar {
        /// Image file
        path: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum AgentCommand {
    /// List agents
    List,
    /// Show one agent
    Show {
        /// Agent id
        id: i64,
        /// Skip the cache
        #[arg(long)]
        refresh: bool,
    },
    /// Create an agent
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Starting template
        #[arg(long)]
        template: Option<String>,
        /// System prompt
        #[arg(long)]
        prompt: Option<String>,
        /// Welcome message
        #[arg(long)]
        welcome_message: Option<String>,
    },
    /// Update an agent from a JSON object of changed fields
    Update {
        /// Agent id
        id: i64,
        /// Changed fields, e.g. '{"voice_speed": 1.2}'
        json: String,
    },
    /// Delete an agent
    Delete {
        /// Agent id
        id: i64,
    },
    /// Make an agent active and refresh agent, profile and phone numbers
    Select {
        /// Agent id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum NumberCommand {
    /// List imported numbers
    List,
    /// Import a Twilio number
    Import {
        /// Twilio account SID
        #[arg(long)]
        account_sid: String,
        /// Twilio auth token
        #[arg(long)]
        auth_token: String,
        /// Number to import
        #[arg(long)]
        number: String,
        /// Label
        #[arg(long)]
        label: Option<String>,
    },
    /// Remove a number
    Remove {
        /// Number id
        id: i64,
    },
    /// Relabel a number
    Label {
        /// Number id
        id: i64,
        /// New label
        label: String,
    },
}

#[derive(Debug, Subcommand)]
enum FileCommand {
    /// List files
    List,
    /// Upload a file
    Upload {
        /// File to upload
        path: PathBuf,
    },
    /// Delete a file
    Delete {
        /// File id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum VoiceCommand {
    /// List available voices
    List,
}

#[derive(Debug, Subcommand)]
enum PrefsCommand {
    /// Show current preferences
    Show,
    /// Set the theme (light or dark)
    Theme {
        /// Theme name
        theme: Theme,
    },
    /// Open or close the sidebar
    Sidebar {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        open: bool,
    },
    /// Set the interface language
    Language {
        /// Language code
        language: String,
    },
    /// Expand or collapse a section
    Section {
        /// Section name
        name: String,
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        expanded: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url.as_deref() {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    info!("Configuration loaded: {:?}", config);

    let console = Console::start(&config)
        .await
        .with_context(|| {
            format!(
                "Failed to open storage at {}",
                config.storage_path().display()
            )
        })?;

    run(&console, cli.command).await
}

async fn run(console: &Console, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            print(console.login(&email, &password).await?.user)
        }
        Command::Signup {
            email,
            password,
            name,
        } => print(
            console
                .signup(Signup {
                    email,
                    password,
                    name,
                })
                .await?
                .user,
        ),
        Command::Logout => {
            console.logout().await?;
            done("Logged out")
        }
        Command::ChangePassword { current, new } => {
            console.change_password(&current, &new).await?;
            done("Password changed")
        }
        Command::DeleteAccount => {
            console.delete_account().await?;
            done("Account deleted")
        }
        Command::Profile(command) => run_profile(console, command).await,
        Command::Agents(command) => run_agents(console, command).await,
        Command::Numbers(command) => run_numbers(console, command).await,
        Command::Files(command) => match command {
            FileCommand::List => print(console.fetch_files().await?),
            FileCommand::Upload { path } => print(console.upload_file(&path).await?),
            FileCommand::Delete { id } => {
                console.delete_file(id).await?;
                done("File deleted")
            }
        },
        Command::Voices(VoiceCommand::List) => print(console.fetch_voices().await?),
        Command::Prefs(command) => run_prefs(console, command).await,
    }
}

async fn run_profile(console: &Console, command: ProfileCommand) -> anyhow::Result<()> {
    match command {
        ProfileCommand::Show => print(console.fetch_profile().await?),
        ProfileCommand::Update {
            first_name,
            last_name,
            company,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                company,
            };
            print(console.update_profile(&update).await?)
        }
        ProfileCommand::Avatar { path } => print(console.update_avatar(&path).await?),
    }
}

async fn run_agents(console: &Console, command: AgentCommand) -> anyhow::Result<()> {
    match command {
        AgentCommand::List => {
            console.fetch_agents().await?;
            let agents = console
                .store()
                .read(|state| {
                    state
                        .agents
                        .sorted_list()
                        .into_iter()
                        .cloned()
                        .collect::<Vec<_>>()
                })
                .await;
            print(agents)
        }
        AgentCommand::Show { id, refresh } => {
            let mode = if refresh {
                FetchMode::Refresh
            } else {
                FetchMode::PreferCache
            };
            print(console.fetch_agent(id, mode).await?)
        }
        AgentCommand::Create {
            name,
            template,
            prompt,
            welcome_message,
        } => {
            let agent = NewAgent {
                name,
                template,
                prompt,
                welcome_message,
            };
            print(console.create_agent(&agent).await?)
        }
        AgentCommand::Update { id, json } => {
            let update: AgentUpdate =
                serde_json::from_str(&json).context("Invalid agent update JSON")?;
            if update.is_empty() {
                anyhow::bail!("Agent update contains no fields");
            }
            print(console.update_agent(id, &update).await?)
        }
        AgentCommand::Delete { id } => {
            console.delete_agent(id).await?;
            done("Agent deleted")
        }
        AgentCommand::Select { id } => {
            let refresh = console.set_active_agent_id(id).await;
            let failures: Vec<(&str, &Rejection)> = [
                ("agent", refresh.agent.as_ref().err()),
                ("profile", refresh.profile.as_ref().err()),
                ("phone numbers", refresh.phone_numbers.as_ref().err()),
            ]
            .into_iter()
            .filter_map(|(what, err)| err.map(|e| (what, e)))
            .collect();

            if failures.is_empty() {
                print(refresh.agent.clone()?)
            } else {
                for (what, err) in &failures {
                    eprintln!("Failed to refresh {}: {}", what, err);
                }
                anyhow::bail!("Agent {} selected, but {} refresh(es) failed", id, failures.len())
            }
        }
    }
}

async fn run_numbers(console: &Console, command: NumberCommand) -> anyhow::Result<()> {
    match command {
        NumberCommand::List => print(console.fetch_phone_numbers().await?),
        NumberCommand::Import {
            account_sid,
            auth_token,
            number,
            label,
        } => {
            let import = PhoneNumberImport {
                account_sid,
                auth_token,
                phone_number: number,
                label,
            };
            print(console.import_phone_number(&import).await?)
        }
        NumberCommand::Remove { id } => {
            console.remove_phone_number(id).await?;
            done("Phone number removed")
        }
        NumberCommand::Label { id, label } => {
            print(console.update_phone_number_label(id, &label).await?)
        }
    }
}

async fn run_prefs(console: &Console, command: PrefsCommand) -> anyhow::Result<()> {
    match command {
        PrefsCommand::Show => {}
        PrefsCommand::Theme { theme } => console.set_theme(theme).await?,
        PrefsCommand::Sidebar { open } => console.set_sidebar_open(open).await?,
        PrefsCommand::Language { language } => console.set_language(&language).await?,
        PrefsCommand::Section { name, expanded } => {
            console.set_section_expanded(&name, expanded).await?
        }
    }
    print(console.store().read(|state| state.preferences.clone()).await)
}

fn print<T: Serialize>(value: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn done(message: &str) -> anyhow::Result<()> {
    println!("{}", message);
    Ok(())
}
