use anyhow::Context;
use clap::{Parser, Subcommand};
use corkboard_config::load as load_config;
use corkboard_database::CreateMessageRequest;
use corkboard_gateway::{create_router, GatewayState};
use corkboard_runtime::{telemetry, BackendServices};
use sqlx::Row;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "corkboard-backend")]
#[command(about = "Corkboard message board backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Dump users and messages from the database
    DumpData,
    /// Clear all users and messages from the database
    ClearData,
    /// Seed the database with demo users and a message
    SeedData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::DumpData => dump_data().await,
        Commands::ClearData => clear_data().await,
        Commands::SeedData => seed_data().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Corkboard backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.db_pool.clone(), &config.mentions);
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(corkboard_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let users = sqlx::query(
        r#"
        SELECT id, public_id, username, display_name, created_at
        FROM users
        ORDER BY username ASC
        "#,
    )
    .fetch_all(&services.db_pool)
    .await
    .context("failed to fetch users")?;

    println!("=== USERS ===");
    if users.is_empty() {
        println!("No users found in database");
    } else {
        println!("Found {} users:", users.len());
        println!(
            "{:<5} {:<28} {:<20} {:<30} {:<25}",
            "ID", "Public ID", "Username", "Display Name", "Created At"
        );
        println!("{}", "-".repeat(110));

        for user in users {
            let id: i64 = user.get("id");
            let public_id: String = user.get("public_id");
            let username: String = user.get("username");
            let display_name: String = user.get("display_name");
            let created_at: String = user.get("created_at");

            println!(
                "{:<5} {:<28} {:<20} {:<30} {:<25}",
                id, public_id, username, display_name, created_at
            );
        }
    }

    println!("\n=== MESSAGES ===");
    let messages = sqlx::query(
        r#"
        SELECT m.id, m.public_id, u.username AS author, m.content, m.created_at
        FROM messages m
        JOIN users u ON u.id = m.author_id
        ORDER BY m.created_at ASC
        "#,
    )
    .fetch_all(&services.db_pool)
    .await
    .context("failed to fetch messages")?;

    if messages.is_empty() {
        println!("No messages found in database");
    } else {
        println!("Found {} messages:", messages.len());
        println!(
            "{:<5} {:<28} {:<20} {:<60} {:<25}",
            "ID", "Public ID", "Author", "Content (truncated)", "Created At"
        );
        println!("{}", "-".repeat(140));

        for message in messages {
            let id: i64 = message.get("id");
            let public_id: String = message.get("public_id");
            let author: String = message.get("author");
            let content: String = message.get("content");
            let created_at: String = message.get("created_at");

            let content_display = truncate_content(&content);

            println!(
                "{:<5} {:<28} {:<20} {:<60} {:<25}",
                id, public_id, author, content_display, created_at
            );
        }
    }

    Ok(())
}

/// Truncate message content for table display, counting characters rather
/// than bytes so multi-byte content never splits mid-character.
fn truncate_content(content: &str) -> String {
    const MAX_DISPLAY_CHARS: usize = 57;

    if content.chars().count() > MAX_DISPLAY_CHARS {
        let head: String = content.chars().take(MAX_DISPLAY_CHARS - 3).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

async fn clear_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("clearing all data from database");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    // Messages first, they reference users
    let messages_deleted = sqlx::query("DELETE FROM messages")
        .execute(&services.db_pool)
        .await
        .context("failed to delete messages")?;

    let users_deleted = sqlx::query("DELETE FROM users")
        .execute(&services.db_pool)
        .await
        .context("failed to delete users")?;

    println!("Database cleared:");
    println!("- {} messages deleted", messages_deleted.rows_affected());
    println!("- {} users deleted", users_deleted.rows_affected());

    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("seeding database with demo data");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.db_pool.clone(), &config.mentions);

    let ada = state
        .user_service
        .create(&corkboard_database::CreateUserRequest {
            username: "ada".to_string(),
            display_name: "Ada Lovelace".to_string(),
        })
        .await
        .context("failed to create demo user ada")?;

    state
        .user_service
        .create(&corkboard_database::CreateUserRequest {
            username: "grace".to_string(),
            display_name: "Grace Hopper".to_string(),
        })
        .await
        .context("failed to create demo user grace")?;

    let message = state
        .message_service
        .post(&CreateMessageRequest {
            author_id: ada.id,
            content: "Welcome aboard @grace! Ping @ada if anything looks off.".to_string(),
        })
        .await
        .context("failed to create demo message")?;

    println!("Database seeded with demo data:");
    println!("- 2 users created (ada, grace)");
    println!("- 1 message created with resolved mentions:");
    println!("  {}", message.content);
    println!("Run 'dump-data' to see the inserted data");

    Ok(())
}
