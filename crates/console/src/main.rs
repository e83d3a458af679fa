use clap::Parser;
use tracing_subscriber::EnvFilter;

use haven_console::cli::{Cli, Command};
use haven_console::client::ApiClient;
use haven_console::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "haven_console=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = ApiClient::from_env()?;

    match cli.command {
        Command::Browse(args) => commands::browse(&client, args).await,
        Command::Show { id } => commands::show(&client, id).await,
        Command::Add(args) => commands::add(&client, args).await,
        Command::Edit(args) => commands::edit(&client, args).await,
        Command::Delete { id, yes } => commands::delete(&client, id, yes).await,
        Command::Login { username } => commands::login(&client, username).await,
        Command::Logout => commands::logout(&client).await,
        Command::Dashboard => commands::dashboard(&client).await,
    }
}
