use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use desk_logging::LogDestination;
use log::LevelFilter;
use url::Url;

const DEFAULT_COVER_LETTER_WEBHOOK: &str = "http://localhost:5678/webhook/cover-letter";
const DEFAULT_PROPOSAL_WEBHOOK: &str = "http://localhost:5678/webhook/proposal";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub cover_letter_webhook: Url,
    pub proposal_webhook: Url,
    /// `LETTERDESK_BIND`. Copy-text writes to the clipboard of the machine
    /// running the server, so with `0.0.0.0` a remote browser's copy lands
    /// on the server host.
    pub bind: SocketAddr,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    /// `None` keeps submissions outstanding until the generator answers.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let log_destination = match lookup("LETTERDESK_LOG") {
            Some(raw) => LogDestination::parse(&raw).with_context(|| {
                format!("LETTERDESK_LOG must be terminal, file or both, got '{raw}'")
            })?,
            None => LogDestination::default(),
        };

        let request_timeout = match lookup("LETTERDESK_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .context("LETTERDESK_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
                if secs == 0 {
                    bail!("LETTERDESK_REQUEST_TIMEOUT_SECS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Config {
            cover_letter_webhook: parse_webhook(
                "LETTERDESK_COVER_LETTER_WEBHOOK",
                &var("LETTERDESK_COVER_LETTER_WEBHOOK", DEFAULT_COVER_LETTER_WEBHOOK),
            )?,
            proposal_webhook: parse_webhook(
                "LETTERDESK_PROPOSAL_WEBHOOK",
                &var("LETTERDESK_PROPOSAL_WEBHOOK", DEFAULT_PROPOSAL_WEBHOOK),
            )?,
            bind: var("LETTERDESK_BIND", DEFAULT_BIND)
                .parse()
                .context("LETTERDESK_BIND must be a socket address such as 127.0.0.1:8080")?,
            log_destination,
            log_level: var("RUST_LOG", "info")
                .parse()
                .context("RUST_LOG must be one of off, error, warn, info, debug, trace")?,
            request_timeout,
        })
    }
}

fn parse_webhook(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("{key} is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{key} must be an http(s) URL");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use desk_logging::LogDestination;
    use log::LevelFilter;
    use pretty_assertions::assert_eq;

    use super::Config;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.cover_letter_webhook.as_str(),
            "http://localhost:5678/webhook/cover-letter"
        );
        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("LETTERDESK_PROPOSAL_WEBHOOK", "https://n8n.example.com/webhook/p"),
            ("LETTERDESK_BIND", "0.0.0.0:9000"),
            ("LETTERDESK_LOG", "both"),
            ("LETTERDESK_REQUEST_TIMEOUT_SECS", "90"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(
            config.proposal_webhook.as_str(),
            "https://n8n.example.com/webhook/p"
        );
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("LETTERDESK_COVER_LETTER_WEBHOOK", "not a url")]).is_err());
        assert!(config_from(&[("LETTERDESK_PROPOSAL_WEBHOOK", "ftp://files/x")]).is_err());
        assert!(config_from(&[("LETTERDESK_REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("LETTERDESK_LOG", "syslog")]).is_err());
    }
}
