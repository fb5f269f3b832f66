//! WeCare CLI - Admin seeding and backend checks.
//!
//! # Usage
//!
//! ```bash
//! # Create the first admin account (skipped if one already exists)
//! wecare-cli seed admin
//!
//! # Same, with explicit credentials
//! wecare-cli seed admin --phone +919876543210 --name "Ops Admin" --pin 4821
//!
//! # Check that the backend is up
//! wecare-cli health --api-url http://localhost:7090/api
//! ```
//!
//! # Commands
//!
//! - `seed admin` - Insert the first admin user directly into MongoDB
//! - `health` - Call the backend's health check

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "wecare-cli")]
#[command(author, version, about = "WeCare admin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Check the WeCare backend's health endpoint
    Health {
        /// Backend REST base URL, including `/api`
        #[arg(long, env = "WECARE_API_URL", default_value = "http://localhost:7090/api")]
        api_url: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create the first admin user if none exists
    Admin {
        /// Admin phone number
        #[arg(long, default_value = "+919999999999")]
        phone: String,

        /// Admin display name
        #[arg(long, default_value = "WeCare Admin")]
        name: String,

        /// Admin email address
        #[arg(long, default_value = "admin@wecare.com")]
        email: String,

        /// 4-digit security PIN used to sign in
        #[arg(long, default_value = "1234")]
        pin: String,

        /// MongoDB connection string
        #[arg(
            long,
            env = "MONGODB_URI",
            default_value = "mongodb://localhost:27017/wecare",
            hide_env_values = true
        )]
        mongodb_uri: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();

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
        Commands::Seed { target } => match target {
            SeedTarget::Admin {
                phone,
                name,
                email,
                pin,
                mongodb_uri,
            } => {
                let seed = commands::seed::AdminSeed::parse(&phone, &name, &email, &pin)?;
                commands::seed::admin(&SecretString::from(mongodb_uri), &seed).await?;
            }
        },
        Commands::Health { api_url } => commands::health::check(&api_url).await?,
    }
    Ok(())
}
