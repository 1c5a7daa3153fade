//! Operator tooling for the bakehouse graph: bootstrap users and clean out
//! product data. The API surface never hard-deletes; this binary does.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bakehouse_api::auth;
use bakehouse_api::models::Role;
use bakehouse_api::store;

#[derive(Parser)]
#[command(name = "seed", about = "Bakehouse graph seeding and cleanup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or update an admin user
    Admin(UserArgs),
    /// Create or update a baker user
    Baker(UserArgs),
    /// Create or update a customer user
    Customer(UserArgs),
    /// Detach-delete every Product node
    ClearProducts,
}

#[derive(clap::Args)]
struct UserArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "bakehouse_api=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Admin(args) => seed_user(args, Role::Admin).await,
        Command::Baker(args) => seed_user(args, Role::Baker).await,
        Command::Customer(args) => seed_user(args, Role::Customer).await,
        Command::ClearProducts => {
            let removed = store::products::clear_all().await?;
            println!("Removed {} products", removed);
            Ok(())
        }
    }
}

async fn seed_user(args: UserArgs, role: Role) -> Result<()> {
    let hashed = auth::hash_password(&args.password)?;
    let user = store::users::upsert(&args.email, &args.name, &hashed, role).await?;
    println!("{} ready: {} ({})", role, user.email, user.id);
    Ok(())
}
