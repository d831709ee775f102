use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use trimbook_db::config::DbConfig;
use trimbook_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load database configuration
    let config = DbConfig::from_env()?;

    println!("Connecting to database...");
    // Create database connection pool
    let db_pool = trimbook_db::create_pool(&config.database_url, config.max_connections).await?;

    // Initialize database schema
    println!("Initializing database schema...");
    initialize_database(&db_pool).await?;
    println!("Database schema initialized successfully.");

    Ok(())
}
