mod config;

use tgdigest_ai::claude::ClaudeClient;
use tgdigest_bot::TgDigestBot;
use tgdigest_common::command::NewsCommand;
use tgdigest_news::NewsService;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = config::Config::new();

    tracing::info!(
        channels = ?config.news.channels,
        timezone = %config.news.timezone,
        "starting service"
    );

    let (news_tx, news_rx) = mpsc::channel(16);

    let ai = ClaudeClient::new(&config.ai);
    let service = NewsService::connect(&config.news, ai, news_rx).await?;
    service.authorize().await?;

    let service_handle = tokio::spawn(service.run());

    let bot = TgDigestBot::new(&config.bot, news_tx.clone());
    bot.run().await?;

    tracing::info!("Bot stopped, shutting down the news service...");

    let _ = news_tx.send(NewsCommand::Shutdown).await;
    service_handle.await??;

    Ok(())
}
