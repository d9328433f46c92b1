use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod auth;
mod backend;
mod config;
mod inventory;
mod recipes;
mod session;
mod state;
mod tips;

use crate::config::AppConfig;
use crate::inventory::handlers::AddArgs;
use crate::session::Theme;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
    name = "nutricheck",
    version,
    about = "Track your household food inventory and cut waste"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the NutriCheck backend
    #[arg(long, env = "NUTRICHECK_API_URL", global = true)]
    api_url: Option<String>,

    /// Directory holding the session file
    #[arg(long, env = "NUTRICHECK_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password; signup is refused on a mismatch
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Log in and remember the email for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored profile; --theme switches light/dark
    Profile {
        #[arg(long, value_enum)]
        theme: Option<Theme>,
    },
    /// List your food items
    Inventory {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a food item to your inventory
    Add(AddArgs),
    /// Show your items with their freshness status
    Expiry {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Pick inventory items and generate recipe ideas
    Recipes {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
        /// Toggle an item into the selection (repeatable)
        #[arg(long = "select", value_name = "NAME")]
        select: Vec<String>,
    },
    /// Food storage tips
    Tips,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "nutricheck=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let state = AppState::init(config)?;
    let session = state.store.load();

    match cli.command {
        Command::Signup {
            email,
            password,
            confirm_password,
        } => auth::handlers::signup(&state, &email, &password, confirm_password.as_deref()).await,
        Command::Login { email, password } => {
            auth::handlers::login(&state, &email, &password).await
        }
        Command::Logout => auth::handlers::logout(&state),
        Command::Profile { theme } => auth::handlers::profile(&state, theme),
        Command::Inventory { search } => {
            inventory::handlers::browse(&state, &session, &search).await
        }
        Command::Add(args) => inventory::handlers::add_food(&state, &session, &args).await,
        Command::Expiry { search } => {
            inventory::handlers::track_expiry(&state, &session, &search).await
        }
        Command::Recipes { search, select } => {
            recipes::handlers::generate(&state, &session, &search, &select).await
        }
        Command::Tips => {
            tips::print_tips();
            Ok(())
        }
    }
}
