mod command;
mod config;
mod handler;
mod rate_limit;
mod response;
mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use config::Config;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::Requester;
use teloxide::utils::command::BotCommands;
use tgdigest_common::command::NewsCommand;
use tokio::sync::mpsc;

use crate::command::Command;
use crate::rate_limit::RateLimiters;

pub struct TgDigestBot {
    bot: teloxide::prelude::Bot,
    news_tx: mpsc::Sender<NewsCommand>,
}

impl TgDigestBot {
    pub fn new(config: &Config, news_tx: mpsc::Sender<NewsCommand>) -> Self {
        let bot = teloxide::prelude::Bot::new(&config.token);
        Self { bot, news_tx }
    }

    pub async fn run(self) -> Result<(), teloxide::RequestError> {
        tracing::info!("Starting Telegram bot...");

        self.bot.set_my_commands(Command::bot_commands()).await?;

        let handler = teloxide::prelude::Update::filter_message().endpoint(handler::handle_message);

        let rate_limiters = Arc::new(RateLimiters::new());

        teloxide::prelude::Dispatcher::builder(self.bot, handler)
            .dependencies(teloxide::prelude::dptree::deps![self.news_tx, rate_limiters])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
