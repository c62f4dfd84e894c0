//! FarmaLink CLI - Alert log and access table tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the durable alert log, newest first
//! fl-cli alerts list
//!
//! # Record an alert by hand
//! fl-cli alerts record -k warning -m "Revisión de bodega" -d '{"pasillo": 3}'
//!
//! # Empty the alert log
//! fl-cli alerts clear --data-dir /var/lib/farmalink
//!
//! # Sections visible to a role
//! fl-cli sections --role employee
//!
//! # Check a credential (password read from stdin)
//! echo adm123 | fl-cli check-login -e Administrador@gmail.com
//! ```
//!
//! # Commands
//!
//! - `alerts` - Inspect or edit the alert log in a data directory
//! - `sections` - Print the role to sections table
//! - `check-login` - Verify a credential against the built-in table

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fl-cli")]
#[command(author, version, about = "FarmaLink CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the durable alert log
    Alerts {
        /// Data directory (defaults to `FARMALINK_DATA_DIR` or `./data`)
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        #[command(subcommand)]
        action: AlertAction,
    },
    /// Print the sections a role may open
    Sections {
        /// Role (`admin`, `employee`); omit for a logged-out visitor
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Check a credential; the password is read from stdin
    CheckLogin {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum AlertAction {
    /// List entries, newest first
    List {
        /// Print the raw JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove every entry
    Clear,
    /// Append an entry
    Record {
        /// Kind (`info`, `success`, `warning`, `error`)
        #[arg(short, long, default_value = "info")]
        kind: String,

        /// Message text
        #[arg(short, long)]
        message: String,

        /// Details as a JSON object
        #[arg(short, long)]
        details: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Alerts { data_dir, action } => {
            let log = commands::alerts::open(commands::alerts::data_dir(data_dir))?;
            match action {
                AlertAction::List { json } => commands::alerts::list(&log, json).await?,
                AlertAction::Clear => commands::alerts::clear(&log).await?,
                AlertAction::Record {
                    kind,
                    message,
                    details,
                } => commands::alerts::record(&log, &kind, &message, details.as_deref()).await?,
            }
        }
        Commands::Sections { role } => commands::access::sections(role.as_deref())?,
        Commands::CheckLogin { email } => {
            let password = commands::access::read_password(std::io::stdin().lock())?;
            commands::access::check_login(&email, &password)?;
        }
    }
    Ok(())
}
