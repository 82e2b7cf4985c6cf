use pipeline_bot::{bot, config::Config, db::Database, health};
use poise::serenity_prelude as serenity;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded {:?}", config);

    let db = Database::new(&config.database_path)?;
    db.execute_init()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let listener = TcpListener::bind(config.http_addr()).await?;
    let mut http = tokio::spawn(health::serve(listener, shutdown_rx));

    let intents = serenity::GatewayIntents::non_privileged();
    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(bot::framework(config.clone(), db))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;
    let shard_manager = client.shard_manager.clone();

    info!("Starting bot...");
    let mut bot = tokio::spawn(async move { client.start().await });

    // Whichever side stops first takes the other one down with it
    let mut bot_exit = None;
    let mut http_exit = None;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
        res = &mut bot => bot_exit = Some(res),
        res = &mut http => http_exit = Some(res),
    }

    shard_manager.shutdown_all().await;
    let _ = shutdown_tx.send(true);

    let bot_exit = match bot_exit {
        Some(res) => res,
        None => bot.await,
    };
    let http_exit = match http_exit {
        Some(res) => res,
        None => http.await,
    };

    let mut failed = false;
    match bot_exit {
        Ok(Ok(())) => info!("Bot stopped"),
        Ok(Err(why)) => {
            error!("Client error: {:?}", why);
            failed = true;
        }
        Err(e) => {
            error!("Bot task panicked: {}", e);
            failed = true;
        }
    }
    match http_exit {
        Ok(Ok(())) => info!("Health endpoint stopped"),
        Ok(Err(e)) => {
            error!("Health endpoint error: {}", e);
            failed = true;
        }
        Err(e) => {
            error!("Health endpoint task panicked: {}", e);
            failed = true;
        }
    }

    if failed {
        anyhow::bail!("pipeline-bot exited with errors");
    }
    Ok(())
}
