use anyhow::{anyhow, bail, Context};
use gloo::net::http::Request;
use serde::{Deserialize, Serialize};
use shared::MessagingSink;

use crate::services::config::AppConfig;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Messaging sink backed by the Telegram Bot API
#[derive(Debug, Clone, PartialEq)]
pub struct TelegramClient {
    api_base: String,
    bot_token: Option<String>,
}

impl TelegramClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            bot_token: config.bot_token.clone(),
        }
    }

    /// `None` until a bot token is configured
    pub fn send_message_url(&self) -> Option<String> {
        self.bot_token.as_ref().map(|token| {
            format!(
                "{}/bot{}/sendMessage",
                self.api_base.trim_end_matches('/'),
                token
            )
        })
    }

    async fn post(&self, url: &str, chat_id: &str, text: &str) -> anyhow::Result<()> {
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = Request::post(url)
            .json(&body)
            .map_err(|e| anyhow!("failed to encode request: {}", e))?
            .send()
            .await
            .map_err(|e| anyhow!("network error: {}", e))?;

        if !response.ok() {
            bail!("HTTP {}", response.status());
        }

        let parsed: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("{}", e))
            .context("unreadable sendMessage response")?;

        if !parsed.ok {
            bail!(
                "API rejected message: {}",
                parsed.description.unwrap_or_else(|| "no description".to_string())
            );
        }
        Ok(())
    }
}

impl MessagingSink for TelegramClient {
    async fn send(&self, channel: &str, message: &str) -> bool {
        let Some(url) = self.send_message_url() else {
            log::warn!("bot token is not configured, lead not sent");
            return false;
        };
        if channel.trim().is_empty() {
            log::warn!("chat id is not configured, lead not sent");
            return false;
        }

        match self.post(&url, channel, message).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("sendMessage failed: {:#}", e);
                false
            }
        }
    }
}
