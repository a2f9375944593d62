use std::sync::Arc;

use teloxide::prelude::Requester;
use teloxide::utils::command::BotCommands;
use tgdigest_common::command::{DigestReply, NewsCommand};
use tokio::sync::{mpsc, oneshot};

use crate::command::Command;
use crate::rate_limit::RateLimiters;
use crate::response;
use crate::utils::{format_part, split_digest};

pub(crate) async fn handle_message(
    bot: teloxide::prelude::Bot,
    msg: teloxide::prelude::Message,
    me: teloxide::types::Me,
    news_tx: mpsc::Sender<NewsCommand>,
    rate_limiters: Arc<RateLimiters>,
) -> teloxide::prelude::ResponseResult<()> {
    let user_id = match msg.from.as_ref() {
        Some(user) => user.id.0 as i64,
        None => return Ok(()),
    };

    let Some(text) = msg.text() else {
        return Ok(());
    };

    if let Ok(cmd) = <Command as BotCommands>::parse(text, me.username()) {
        if rate_limiters.commands.check_key(&user_id).is_err() {
            return Ok(());
        }

        let response = match cmd {
            Command::Help => response::help(),
            Command::Start => response::start(),
        };

        bot.send_message(msg.chat.id, response).await?;
        return Ok(());
    }

    if text.starts_with('/') {
        bot.send_message(msg.chat.id, response::unknown_command())
            .await?;
        return Ok(());
    }

    // Any other text is a digest query
    if rate_limiters.digest.check_key(&user_id).is_err() {
        bot.send_message(msg.chat.id, response::rate_limited())
            .await?;
        return Ok(());
    }

    tracing::info!(%user_id, query = %text, "received digest query");

    bot.send_message(msg.chat.id, response::accepted()).await?;

    let (tx, rx) = oneshot::channel();
    let _ = news_tx
        .send(NewsCommand::Digest {
            query: text.to_string(),
            response: tx,
        })
        .await;

    let reply = match rx.await {
        Ok(reply) => reply,
        Err(_) => {
            tracing::error!(%user_id, "news service dropped the digest request");
            bot.send_message(msg.chat.id, response::internal_error())
                .await?;
            return Ok(());
        }
    };

    match reply {
        DigestReply::WindowNotUnderstood => {
            bot.send_message(msg.chat.id, response::window_not_understood())
                .await?;
        }
        DigestReply::NoPosts { start, end } => {
            bot.send_message(msg.chat.id, response::no_posts(start, end))
                .await?;
        }
        DigestReply::Summary {
            text,
            post_count,
            start,
            end,
        } => {
            tracing::info!(
                %user_id,
                post_count,
                start = %start,
                end = %end,
                "sending digest"
            );

            let chunks = split_digest(&text);
            let total = chunks.len();

            if total == 1 {
                bot.send_message(msg.chat.id, text).await?;
            } else {
                for (i, chunk) in chunks.into_iter().enumerate() {
                    bot.send_message(msg.chat.id, format_part(i + 1, total, &chunk))
                        .await?;
                }
            }
        }
    }

    Ok(())
}
