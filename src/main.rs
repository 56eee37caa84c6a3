use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use creatorhub::analysis::StopwordSet;
use creatorhub::config::AppConfig;
use creatorhub::conversation::ConversationService;
use creatorhub::database::Database;
use creatorhub::fetch::HttpCommentFetcher;
use creatorhub::fetch::HttpPostFetcher;
use creatorhub::models::CreatorQuery;
use creatorhub::CreatorHubError;
use creatorhub::Result;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "creatorhub")]
#[command(about = "CreatorHub CLI for the creator CRM and conversation analysis")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind (defaults to the configured server host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (defaults to the configured server port)
        #[arg(long)]
        port: Option<u16>,
        /// Disable CORS even if enabled in configuration
        #[arg(long)]
        no_cors: bool,
    },
    /// List creators from the database
    List {
        /// Maximum number of records to return
        #[arg(short, long, default_value = "20")]
        limit: u32,
        /// Search term for filtering by name, email, or content type
        #[arg(short, long)]
        search: Option<String>,
        /// Show only verified creators
        #[arg(long)]
        verified: bool,
    },
    /// Refresh the conversation cloud for a creator
    Refresh {
        /// Creator id
        creator_id: Uuid,
    },
    /// Show statistics
    Stats,
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        creatorhub::logging::init_logging_with_level("debug")?;
    } else {
        creatorhub::logging::init_logging()?;
    }

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    // The server manages its own pool; every other command connects here
    if let Commands::Serve { host, port, no_cors } = &cli.command {
        let host = host
            .clone()
            .unwrap_or_else(|| config.server.host.clone());
        let port = port.unwrap_or(config.server.port);
        let enable_cors = config.server.enable_cors && !no_cors;
        return creatorhub::api::serve_api(&config, host, port, enable_cors).await;
    }

    let pool = sqlx::PgPool::connect(config.database_url()).await?;
    let db = Database::new(pool);
    if !db.is_schema_initialized().await? {
        db.init_schema().await?;
    }

    match cli.command {
        Commands::Serve { .. } => unreachable!("handled above"),
        Commands::List {
            limit,
            search,
            verified,
        } => {
            handle_list_command(&db, limit, search, verified).await?;
        }
        Commands::Refresh { creator_id } => {
            handle_refresh_command(&db, &config, creator_id).await?;
        }
        Commands::Stats => {
            handle_stats_command(&db).await?;
        }
        Commands::Config => {
            handle_config_command(&config);
        }
    }

    Ok(())
}

async fn handle_list_command(
    db: &Database,
    limit: u32,
    search: Option<String>,
    verified: bool,
) -> Result<()> {
    let query = CreatorQuery {
        search,
        verified: if verified { Some(true) } else { None },
        limit: Some(i64::from(limit)),
        offset: None,
    };

    let creators = db.list_creators(query).await?;
    println!("Found {} creator(s):", creators.len());
    for creator in creators {
        let platforms: Vec<String> = creator
            .platform_handles()
            .into_iter()
            .map(|(platform, _)| platform.to_string())
            .collect();
        println!(
            "  {}  {}  [{}]{}",
            creator.id,
            creator.full_name,
            platforms.join(", "),
            if creator.verified { "  ✓ verified" } else { "" }
        );
    }

    Ok(())
}

async fn handle_refresh_command(db: &Database, config: &AppConfig, creator_id: Uuid) -> Result<()> {
    let creator = db
        .get_creator(creator_id)
        .await?
        .ok_or(CreatorHubError::CreatorNotFound(creator_id))?;

    let service = ConversationService::new(
        Arc::new(HttpPostFetcher::new(&config.providers)?),
        Arc::new(HttpCommentFetcher::new(&config.providers)?),
        StopwordSet::english(),
        config.cloud_options(),
    );

    let snapshot = service.refresh(&creator).await;
    db.update_conversation_cloud(creator.id, &snapshot).await?;

    println!(
        "Refreshed conversation cloud for {} in {}ms",
        creator.full_name, snapshot.fetched_in_ms
    );
    println!(
        "  {} distinct terms, comment data from: {}",
        snapshot.summary.total_terms,
        if snapshot.platforms.is_empty() {
            "none".to_string()
        } else {
            snapshot.platforms.join(", ")
        }
    );
    println!("  Top terms:");
    for (term, count) in snapshot.summary.top_overall.iter().take(15) {
        println!("    {count:>6}  {term}");
    }

    Ok(())
}

async fn handle_stats_command(db: &Database) -> Result<()> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM creators")
        .fetch_one(db.pool())
        .await?;
    let verified = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM creators WHERE verified")
        .fetch_one(db.pool())
        .await?;
    let with_clouds = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM creators WHERE conversation_terms != '{}'::jsonb",
    )
    .fetch_one(db.pool())
    .await?;
    let interactions = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM interactions")
        .fetch_one(db.pool())
        .await?;

    println!("CreatorHub statistics:");
    println!("  Creators:            {total}");
    println!("  Verified:            {verified}");
    println!("  With term clouds:    {with_clouds}");
    println!("  Interactions logged: {interactions}");

    Ok(())
}

fn handle_config_command(config: &AppConfig) {
    println!("Database URL:      {}", config.database_url());
    println!("Server:            {}:{}", config.server.host, config.server.port);
    println!("CORS enabled:      {}", config.server.enable_cors);
    println!(
        "RapidAPI key:      {}",
        if config.providers.rapidapi_key.is_some() { "configured" } else { "not set" }
    );
    println!(
        "YouTube API key:   {}",
        if config.providers.youtube_api_key.is_some() { "configured" } else { "not set" }
    );
    println!(
        "Twitter token:     {}",
        if config.providers.twitter_bearer_token.is_some() { "configured" } else { "not set" }
    );
    println!("Comment weight:    {}x", config.analysis.comment_weight);
    println!("Top terms limit:   {}", config.analysis.top_terms_limit);
}
