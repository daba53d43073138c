use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tern::codec;
use tern::config::Config;
use tern::{storage, ServiceError, UrlService};

#[derive(Parser)]
#[command(name = "tern-admin")]
#[command(about = "Tern URL shortener management CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// URL to shorten (https:// is added when no scheme is given)
        url: String,
    },
    /// Show statistics for a short code without counting an access
    Stats {
        /// Short code
        code: String,
    },
    /// Point a short code at a new URL
    Update {
        /// Short code
        code: String,
        /// Replacement URL
        url: String,
    },
    /// Delete a short code
    Delete {
        /// Short code
        code: String,
    },
    /// Show how many short URLs are stored
    Count,
    /// Encode a record id as a short code
    Encode {
        /// Record id
        id: i64,
    },
    /// Decode a short code into its record id
    Decode {
        /// Short code
        code: String,
    },
}

fn print_not_found(code: &str) {
    println!("✗ Short code '{}' not found", code);
}

#[tokio::main]
async fn main() -> Result<()> {
    tern::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { id } => println!("{}", codec::encode_base62(id)?),
        Commands::Decode { code } => println!("{}", codec::decode_base62(&code)?),
        command => run_against_store(command).await?,
    }

    Ok(())
}

async fn run_against_store(command: Commands) -> Result<()> {
    let config = Config::from_env()?;
    let storage = storage::connect(&config.database)
        .await
        .context("failed to open storage")?;
    let service = UrlService::new(storage);

    match command {
        Commands::Shorten { url } => {
            let created = service.create(&url).await?;
            println!("✓ Created short code '{}'", created.short_code);
            println!("  id:  {}", created.record.id);
            println!("  url: {}", created.record.url);
        }
        Commands::Stats { code } => match service.stats(&code).await {
            Ok(record) => {
                println!("Short code:   {}", code);
                println!("ID:           {}", record.id);
                println!("URL:          {}", record.url);
                println!("Accesses:     {}", record.access_count);
                println!("Created (ms): {}", record.created_at);
                println!("Updated (ms): {}", record.updated_at);
            }
            Err(ServiceError::NotFound(_)) => print_not_found(&code),
            Err(e) => return Err(e.into()),
        },
        Commands::Update { code, url } => match service.update(&code, &url).await {
            Ok(record) => println!("✓ Short code '{}' now points to {}", code, record.url),
            Err(ServiceError::NotFound(_)) => print_not_found(&code),
            Err(e) => return Err(e.into()),
        },
        Commands::Delete { code } => match service.delete(&code).await {
            Ok(()) => println!("✓ Deleted short code '{}'", code),
            Err(ServiceError::NotFound(_)) => print_not_found(&code),
            Err(e) => return Err(e.into()),
        },
        Commands::Count => {
            let count = service.storage().count().await?;
            println!("{} short URL(s) stored", count);
        }
        Commands::Encode { .. } | Commands::Decode { .. } => {}
    }

    Ok(())
}
