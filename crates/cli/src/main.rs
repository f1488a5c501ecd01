use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod render;

use commands::{admin, auth, catalog, projects, review};
use context::Portal;

#[derive(Parser)]
#[command(name = "scholarbase")]
#[command(about = "Terminal client for the ScholarBase academic project portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (signs you in on success)
    Register {
        #[command(subcommand)]
        role: auth::RegisterCommand,
    },
    /// Drop the persisted session
    Logout,
    /// Show the signed-in account
    Whoami {
        /// Re-fetch the profile even when the cached copy is fresh
        #[arg(long)]
        refresh: bool,
    },
    /// Browse, submit, and manage projects
    Projects {
        #[command(subcommand)]
        command: projects::ProjectsCommand,
    },
    /// Moderate submissions (supervisors and admins)
    Review {
        #[command(subcommand)]
        command: review::ReviewCommand,
    },
    /// Supervisor dashboard surfaces
    Supervisor {
        #[command(subcommand)]
        command: review::SupervisorCommand,
    },
    /// Administration surfaces
    Admin {
        #[command(subcommand)]
        command: admin::AdminCommand,
    },
    /// Fixed portal catalogs (tags, departments, years)
    Catalog {
        #[command(subcommand)]
        command: catalog::CatalogCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Tables and notices go to stdout; diagnostics stay on stderr.
    init_tracing();

    let cli = Cli::parse();

    // --- Client stack ---
    let mut portal = Portal::from_env()?;
    portal.auth.hydrate().await;

    match cli.command {
        Commands::Login { email, password } => auth::login(&portal, &email, &password).await,
        Commands::Register { role } => auth::register(&portal, role).await,
        Commands::Logout => auth::logout(&portal).await,
        Commands::Whoami { refresh } => auth::whoami(&portal, refresh).await,
        Commands::Projects { command } => projects::run(&mut portal, command).await,
        Commands::Review { command } => review::run(&mut portal, command).await,
        Commands::Supervisor { command } => review::run_supervisor(&portal, command).await,
        Commands::Admin { command } => admin::run(&portal, command).await,
        Commands::Catalog { command } => catalog::run(&portal, command).await,
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "scholarbase_cli=info,scholarbase_client=info,scholarbase_state=info".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
