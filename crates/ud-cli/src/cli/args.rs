//! Clap argument types and configuration overrides.

use clap::Parser;
use std::path::PathBuf;

use ud_core::config::{AppConfig, BackendMode};

/// Manage the user directory from the terminal.
#[derive(Parser, Debug)]
#[command(name = "userdir", version)]
pub struct Cli {
    /// Use the locally persisted mock store instead of the REST endpoint.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Base URL of the REST endpoint.
    #[arg(long, global = true, env = "API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the mock store's data.
    #[arg(long, global = true, env = "USERDIR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List all users.
    List,

    /// Show a single user.
    Show {
        /// User id.
        id: String,
    },

    /// Create a user. Missing fields are prompted for.
    Create(FieldArgs),

    /// Edit a user. Missing fields are prompted for, defaulting to current values.
    Edit {
        /// User id.
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a user after confirmation.
    Delete {
        /// User id.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

/// Form values given on the command line.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

impl FieldArgs {
    /// Value for a form field, keyed by its wire name
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "firstName" => self.first_name.as_deref(),
            "lastName" => self.last_name.as_deref(),
            "email" => self.email.as_deref(),
            "phone" => self.phone.as_deref(),
            _ => None,
        }
    }
}

impl Cli {
    /// Layer command-line flags over the environment configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if self.mock {
            config.store.mode = BackendMode::Mock;
        }
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            config.store.api_url = url.to_string();
        }
        if let Some(dir) = &self.data_dir {
            config.store.mock.data_dir = dir.clone();
        }
    }
}
