//! E-commerce CLI - Database migrations and user management.
//!
//! # Usage
//!
//! ```bash
//! # Apply the schema migrations
//! ecommerce migrate
//!
//! # Create a user (password read from ECOMMERCE_USER_PASSWORD)
//! ECOMMERCE_USER_PASSWORD=... ecommerce user create --username ada --email ada@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create a user through the same service as `POST /users`
//!
//! Database settings come from the same environment variables as the API
//! server (`DATABASE_URL` or `DB_*`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ecommerce")]
#[command(author, version, about = "E-commerce API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Unique username
        #[arg(short, long)]
        username: String,

        /// Unique email address
        #[arg(short, long)]
        email: String,

        /// Given name
        #[arg(long)]
        first_name: Option<String>,

        /// Family name
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                email,
                first_name,
                last_name,
            } => {
                commands::user::create(&username, &email, first_name, last_name).await?;
            }
        },
    }
    Ok(())
}
