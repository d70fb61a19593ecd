//! API configuration

use domain_billing::NumberingMode;
use serde::Deserialize;

/// Back-office configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Secret used to sign and verify session cookies
    pub session_secret: String,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,
    /// Comma-separated e-mail addresses allowed into the back office
    pub admin_emails: String,
    /// Length of one rate-limit window in seconds
    pub rate_limit_window_secs: u64,
    /// Requests allowed per identity per window
    pub rate_limit_max_requests: u32,
    /// Document numbering strategy: "snapshot" or "reserved"
    pub numbering: String,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            session_secret: "change-me-in-production".to_string(),
            session_ttl_secs: 86_400,
            admin_emails: String::new(),
            rate_limit_window_secs: 60,
            rate_limit_max_requests: 120,
            numbering: "snapshot".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("BACKOFFICE"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the admin allow-list into normalized (lowercased, trimmed)
    /// addresses. An empty list means nobody gets in.
    pub fn allowed_admins(&self) -> Vec<String> {
        self.admin_emails
            .split(',')
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect()
    }

    /// Maps the configured numbering strategy onto the billing domain's
    /// modes. Unrecognized values fall back to the snapshot default.
    pub fn numbering_mode(&self) -> NumberingMode {
        match self.numbering.as_str() {
            "reserved" => NumberingMode::StoreReserved,
            _ => NumberingMode::SnapshotMax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_admins_trims_and_lowercases() {
        let config = ApiConfig {
            admin_emails: " Dana@Studio.example ,river@studio.example,, ".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(
            config.allowed_admins(),
            vec!["dana@studio.example", "river@studio.example"]
        );
    }

    #[test]
    fn empty_admin_list_allows_nobody() {
        assert!(ApiConfig::default().allowed_admins().is_empty());
    }

    #[test]
    fn numbering_mode_maps_strategy_names() {
        let mut config = ApiConfig::default();
        assert_eq!(config.numbering_mode(), NumberingMode::SnapshotMax);

        config.numbering = "reserved".to_string();
        assert_eq!(config.numbering_mode(), NumberingMode::StoreReserved);

        config.numbering = "garbage".to_string();
        assert_eq!(config.numbering_mode(), NumberingMode::SnapshotMax);
    }
}
