mod config;
mod digest;
mod error;
mod fetch;
mod utils;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

pub use config::Config;
pub use error::*;

use grammers_client::session::Session;
use grammers_client::{Client, InitParams};
use tgdigest_ai::{Summarizer, TimeRangeResolver};
use tgdigest_common::command::NewsCommand;
use tokio::sync::mpsc;

use crate::utils::prompt;

/// Owns the MTProto client and runs the digest pipeline. Queries arrive over
/// the command channel and are handled one at a time, so access to the client
/// session is serialized.
pub struct NewsService<A: TimeRangeResolver + Summarizer> {
    client: Client,
    session_file: PathBuf,
    channels: Vec<String>,
    timezone: chrono_tz::Tz,
    ai: A,
    command_rx: mpsc::Receiver<NewsCommand>,
}

impl<A: TimeRangeResolver + Summarizer> NewsService<A> {
    pub async fn connect(
        config: &Config,
        ai: A,
        command_rx: mpsc::Receiver<NewsCommand>,
    ) -> anyhow::Result<Self> {
        let session = Session::load_file_or_create(&config.session_file)?;

        let client = Client::connect(grammers_client::Config {
            session,
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            params: InitParams::default(),
        })
        .await?;

        Ok(NewsService {
            client,
            session_file: config.session_file.clone(),
            channels: config.channels.clone(),
            timezone: config.timezone,
            ai,
            command_rx,
        })
    }

    pub async fn authorize(&self) -> anyhow::Result<()> {
        tracing::info!("Checking authorization status...");

        if self.client.is_authorized().await? {
            self.log_credentials().await?;
            return Ok(());
        }

        tracing::info!("Not authorized, starting sign-in flow...");

        let phone = prompt("Enter your phone number (e.g., +1234567890): ")?;
        let token = self.client.request_login_code(&phone).await?;

        let code = prompt("Enter the code you received: ")?;

        let signed_in = self.client.sign_in(&token, &code).await;

        match signed_in {
            Ok(_user) => {
                tracing::info!("Signed in successfully!");
            }
            Err(grammers_client::SignInError::PasswordRequired(password_token)) => {
                let password = prompt("2FA is enabled. Enter your password: ")?;
                self.client
                    .check_password(password_token, password.trim())
                    .await?;
                tracing::info!("Signed in with 2FA!");
            }
            Err(e) => return Err(e.into()),
        }

        self.save_session()?;
        self.log_credentials().await?;

        Ok(())
    }

    async fn log_credentials(&self) -> anyhow::Result<()> {
        let me = self.client.get_me().await?;
        tracing::info!(
            "Logged in as: {} (ID: {})",
            me.username().unwrap_or("N/A"),
            me.id()
        );
        Ok(())
    }

    fn save_session(&self) -> std::io::Result<()> {
        self.client.session().save_to_file(&self.session_file)
    }

    pub async fn run(mut self) -> NewsResult<()> {
        tracing::info!("Start listening for digest queries...");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                NewsCommand::Digest { query, response } => {
                    tracing::info!(%query, "received digest query");

                    let reply = self.handle_digest(&query).await;

                    if response.send(reply).is_err() {
                        tracing::warn!("digest requester went away before the reply");
                    }
                }
                NewsCommand::Shutdown => {
                    tracing::warn!("received shutdown command");
                    break;
                }
            }
        }

        tracing::info!("Saving session file...");
        self.save_session()?;

        Ok(())
    }

    async fn resolve_channel(&self, handle: &str) -> NewsResult<grammers_client::types::Chat> {
        let resolved = self.client.resolve_username(handle).await?;

        match resolved {
            Some(chat) => Ok(chat),
            None => Err(NewsError::NotFound(handle.to_string())),
        }
    }
}
