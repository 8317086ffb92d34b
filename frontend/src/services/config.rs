use log::LevelFilter;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_MOUNT_SELECTOR: &str = "#booking-app";

/// Runtime settings, resolved once at startup and passed down as props
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
    pub mount_selector: String,
    pub log_level: LevelFilter,
    /// Seed avatar draws from the slot instead of reshuffling on each render
    pub stable_avatars: bool,
    pub widget_watch_timeout_ms: u32,
    pub widget_watch_interval_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            mount_selector: DEFAULT_MOUNT_SELECTOR.to_string(),
            log_level: LevelFilter::Info,
            stable_avatars: false,
            widget_watch_timeout_ms: 30_000,
            widget_watch_interval_ms: 500,
        }
    }
}

impl AppConfig {
    /// Read the values baked in at build time
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("LANDING_BOT_TOKEN"),
            option_env!("LANDING_CHAT_ID"),
            option_env!("LANDING_API_BASE"),
            option_env!("LANDING_LOG_LEVEL"),
            option_env!("LANDING_STABLE_AVATARS"),
        )
    }

    fn from_values(
        bot_token: Option<&str>,
        chat_id: Option<&str>,
        api_base: Option<&str>,
        log_level: Option<&str>,
        stable_avatars: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            bot_token: non_empty(bot_token),
            chat_id: non_empty(chat_id),
            api_base: non_empty(api_base).unwrap_or(defaults.api_base),
            log_level: log_level
                .and_then(|level| level.trim().parse().ok())
                .unwrap_or(defaults.log_level),
            stable_avatars: stable_avatars.map_or(defaults.stable_avatars, parse_flag),
            ..defaults
        }
    }

    /// Leads can only be delivered with both a bot token and a chat id
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = AppConfig::from_values(None, None, None, None, None);
        assert_eq!(config, AppConfig::default());
        assert!(!config.is_configured());
        assert_eq!(config.api_base, "https://api.telegram.org");
        assert_eq!(config.mount_selector, "#booking-app");
    }

    #[test]
    fn test_values_are_trimmed_and_parsed() {
        let config = AppConfig::from_values(
            Some(" 123:abc "),
            Some("-1001"),
            Some("http://localhost:8081"),
            Some("debug"),
            Some("TRUE"),
        );
        assert!(config.is_configured());
        assert_eq!(config.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.api_base, "http://localhost:8081");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(config.stable_avatars);
    }

    #[test]
    fn test_blank_token_is_unconfigured() {
        let config = AppConfig::from_values(Some("  "), Some("-1001"), None, Some("loud"), Some("0"));
        assert!(!config.is_configured());
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(!config.stable_avatars);
    }
}
