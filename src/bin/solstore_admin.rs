//! solstore-admin: out-of-band admin credential maintenance
//!
//! Works directly on the configured database, so it can reset a forgotten
//! password without a running server or a valid token.

use clap::{Parser, Subcommand};
use tracing::info;

use solstore::auth::hash_password;
use solstore::config::Config;
use solstore::storage::init_storage;
use solstore::utils::bootstrap::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "solstore-admin", about = "Manage storefront admin credentials")]
struct Args {
    #[arg(short, long, help = "Config file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// Create a credential or replace its password.
    SetPassword { username: String, password: String },
    /// Delete a credential.
    Remove { username: String },
    /// List stored usernames.
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).map_err(|e| e.to_string())?;
    let stores = init_storage(&config.storage).await?;

    match args.command {
        AdminCommand::SetPassword { username, password } => {
            if username.trim().is_empty() || password.is_empty() {
                return Err("username and password must not be empty".into());
            }
            let hash = hash_password(&password, config.auth.bcrypt_cost).await?;
            stores.admins.upsert(&username, &hash).await?;
            info!(username = %username, "admin password set");
            println!("Password set for {username}");
        }
        AdminCommand::Remove { username } => {
            let removed = stores.admins.delete(&username).await?;
            if removed == 0 {
                println!("No admin named {username}");
            } else {
                info!(username = %username, "admin removed");
                println!("Removed {username}");
            }
        }
        AdminCommand::List => {
            for admin in stores.admins.list().await? {
                println!("{}\t{}", admin.id, admin.username);
            }
        }
    }

    Ok(())
}
