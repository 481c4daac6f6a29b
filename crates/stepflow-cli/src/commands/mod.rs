//! CLI command definitions and dispatch.

use clap::{Parser, Subcommand};

use stepflow_core::config::AppConfig;
use stepflow_core::result::AppResult;

mod admin;
mod migrate;

/// Stepflow operations CLI.
#[derive(Debug, Parser)]
#[command(name = "stepflow", version, about = "Stepflow operations CLI")]
pub struct Cli {
    /// Configuration environment (reads `config/{env}.toml` as an overlay).
    #[arg(long, global = true, default_value = "development")]
    pub env: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run pending database migrations.
    Migrate,
    /// Create an admin user, prompting for the password.
    CreateAdmin {
        /// Username for the new admin.
        username: String,
    },
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(&self) -> AppResult<()> {
        let config = AppConfig::load(&self.env)?;

        match &self.command {
            Commands::Migrate => migrate::run(&config).await,
            Commands::CreateAdmin { username } => admin::create_admin(&config, username).await,
        }
    }
}
