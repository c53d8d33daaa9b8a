//! Configuration types, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;
use secrecy::SecretString;

use crate::error::ConfigError;

/// Asia/Kolkata, +05:30.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Largest offset any real timezone uses.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Validation engine configuration.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Fixed offset the greeting period is evaluated in.
    pub utc_offset_minutes: i32,
    /// Optional JSON file overriding the built-in word tables.
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            taxonomy_path: None,
        }
    }
}

impl ValidatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env_var)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let utc_offset_minutes = match non_empty(&var, "INTRO_UTC_OFFSET_MINUTES") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "INTRO_UTC_OFFSET_MINUTES".into(),
                message: format!("expected an integer number of minutes, got {raw:?}"),
            })?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };

        let config = Self {
            utc_offset_minutes,
            taxonomy_path: non_empty(&var, "INTRO_TAXONOMY_PATH").map(PathBuf::from),
        };
        config.utc_offset()?;
        Ok(config)
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidValue {
                key: "INTRO_UTC_OFFSET_MINUTES".into(),
                message: format!("{} is outside ±14h", self.utc_offset_minutes),
            });
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            ConfigError::InvalidValue {
                key: "INTRO_UTC_OFFSET_MINUTES".into(),
                message: format!("{} is not a valid offset", self.utc_offset_minutes),
            }
        })
    }
}

/// Webhook relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    /// Token expected in the webhook verification handshake. `None` refuses
    /// every handshake.
    pub verify_token: Option<String>,
    /// Only this group is monitored when set.
    pub target_group_id: Option<String>,
    /// Monitor every group when no target group is set.
    pub monitor_group_chats: bool,
    /// Text sent back for a rejected introduction.
    pub reply_text: String,
    /// Reaction placed on an accepted introduction.
    pub ack_emoji: String,
    /// Post a welcome line in the group after an accepted introduction.
    pub send_group_welcome: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            verify_token: None,
            target_group_id: None,
            monitor_group_chats: false,
            reply_text: "repeat".to_string(),
            ack_emoji: "👍".to_string(),
            send_group_welcome: true,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env_var)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match non_empty(&var, "PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".into(),
                message: format!("expected a port number, got {raw:?}"),
            })?,
            None => defaults.port,
        };
        let flag = |key: &str, default: bool| {
            non_empty(&var, key).map_or(default, |v| parse_flag(&v))
        };

        Ok(Self {
            port,
            verify_token: non_empty(&var, "WEBHOOK_VERIFY_TOKEN"),
            target_group_id: non_empty(&var, "TARGET_GROUP_ID"),
            monitor_group_chats: flag("MONITOR_GROUP_CHATS", defaults.monitor_group_chats),
            reply_text: non_empty(&var, "REPLY_TEXT").unwrap_or(defaults.reply_text),
            ack_emoji: non_empty(&var, "ACK_EMOJI").unwrap_or(defaults.ack_emoji),
            send_group_welcome: flag("SEND_GROUP_WELCOME", defaults.send_group_welcome),
        })
    }
}

/// WhatsApp Cloud API credentials.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub access_token: SecretString,
    pub phone_number_id: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl WhatsAppConfig {
    /// `None` unless both the access token and phone number id are set.
    pub fn from_env() -> Option<Self> {
        let access_token = non_empty(env_var, "WHATSAPP_ACCESS_TOKEN")?;
        let phone_number_id = non_empty(env_var, "WHATSAPP_PHONE_NUMBER_ID")?;
        Some(Self {
            access_token: SecretString::from(access_token),
            phone_number_id,
            api_version: non_empty(env_var, "WHATSAPP_API_VERSION")
                .unwrap_or_else(|| "v18.0".into()),
            timeout: Duration::from_secs(10),
        })
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Trimmed value of `key`, `None` when unset or blank.
fn non_empty(var: impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    var(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offset_is_ist() {
        let offset = ValidatorConfig::default().utc_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), 19_800);
    }

    #[test]
    fn negative_offsets_are_allowed() {
        let config = ValidatorConfig {
            utc_offset_minutes: -300,
            taxonomy_path: None,
        };
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), -18_000);
    }

    #[test]
    fn offset_beyond_fourteen_hours_is_rejected() {
        let config = ValidatorConfig {
            utc_offset_minutes: 15 * 60,
            taxonomy_path: None,
        };
        assert!(matches!(
            config.utc_offset(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn relay_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.reply_text, "repeat");
        assert!(!config.monitor_group_chats);
        assert!(config.verify_token.is_none());
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn validator_config_reads_offset_and_taxonomy() {
        let config = ValidatorConfig::from_vars(vars(&[
            ("INTRO_UTC_OFFSET_MINUTES", " -300 "),
            ("INTRO_TAXONOMY_PATH", "/etc/intro/taxonomy.json"),
        ]))
        .unwrap();
        assert_eq!(config.utc_offset_minutes, -300);
        assert_eq!(
            config.taxonomy_path,
            Some(PathBuf::from("/etc/intro/taxonomy.json"))
        );
    }

    #[test]
    fn validator_config_defaults_when_unset_or_blank() {
        let config = ValidatorConfig::from_vars(vars(&[("INTRO_TAXONOMY_PATH", "  ")])).unwrap();
        assert_eq!(config.utc_offset_minutes, DEFAULT_UTC_OFFSET_MINUTES);
        assert!(config.taxonomy_path.is_none());
    }

    #[test]
    fn non_integer_offset_is_rejected() {
        let err = ValidatorConfig::from_vars(vars(&[("INTRO_UTC_OFFSET_MINUTES", "5:30")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "INTRO_UTC_OFFSET_MINUTES"
        ));
        assert!(err.to_string().contains("\"5:30\""));
    }

    #[test]
    fn out_of_range_offset_from_env_is_rejected() {
        let result = ValidatorConfig::from_vars(vars(&[("INTRO_UTC_OFFSET_MINUTES", "900")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let cases: [&'static [(&'static str, &'static str)]; 3] =
            [&[("PORT", "http")], &[("PORT", "70000")], &[("PORT", "-1")]];
        for pairs in cases {
            let err = RelayConfig::from_vars(vars(pairs)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"),
                "{pairs:?}: {err}"
            );
        }
    }

    #[test]
    fn relay_config_reads_overrides() {
        let config = RelayConfig::from_vars(vars(&[
            ("PORT", "8080"),
            ("WEBHOOK_VERIFY_TOKEN", "s3cret"),
            ("MONITOR_GROUP_CHATS", "yes"),
            ("SEND_GROUP_WELCOME", "false"),
            ("REPLY_TEXT", "please repeat"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.verify_token.as_deref(), Some("s3cret"));
        assert!(config.monitor_group_chats);
        assert!(!config.send_group_welcome);
        assert_eq!(config.reply_text, "please repeat");
        assert_eq!(config.ack_emoji, "👍");
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag("ON"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("nope"));
    }
}
