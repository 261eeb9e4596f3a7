pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog-admin")]
#[command(about = "Product catalog server with a password-gated admin panel")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default when no command is given)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Print an Argon2 hash suitable for ADMIN_PASSWORD_HASH")]
    HashPassword {
        #[arg(help = "Password to hash")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        Some(Commands::HashPassword { password }) => commands::password::handle(&password),
        None => commands::serve::handle(commands::serve::ServeArgs::default()).await,
    }
}
