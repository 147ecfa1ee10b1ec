use anyhow::{bail, Context, Result};
use std::time::Duration;

pub const API_KEY_VAR: &str = "realtorApiKey";
pub const ENDPOINT_VAR: &str = "HOUSE_HUNT_ENDPOINT";
pub const API_HOST_VAR: &str = "HOUSE_HUNT_API_HOST";
pub const TIMEOUT_VAR: &str = "HOUSE_HUNT_TIMEOUT_SECS";
pub const DATE_POLICY_VAR: &str = "HOUSE_HUNT_DATE_POLICY";

pub const DEFAULT_ENDPOINT: &str = "https://realtor.p.rapidapi.com/properties/v3/list";
pub const DEFAULT_API_HOST: &str = "realtor.p.rapidapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What to do with a listing whose list date cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Drop the listing and keep the rest of the area's results
    #[default]
    Skip,
    /// Fail the whole area with `DateFormatFailed`
    Strict,
}

impl std::str::FromStr for DatePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "strict" => Ok(Self::Strict),
            other => bail!("unknown date policy {:?} (expected \"skip\" or \"strict\")", other),
        }
    }
}

/// Runtime settings for the listings client
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the listings API. Absent means every request is
    /// rejected upstream, not a startup failure.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub api_host: String,
    pub request_timeout: Duration,
    pub date_policy: DatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            date_policy: DatePolicy::default(),
        }
    }
}

impl Config {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout = match present(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_VAR))?;
                if secs == 0 {
                    bail!("{} must be greater than zero", TIMEOUT_VAR);
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        let date_policy = match present(DATE_POLICY_VAR) {
            Some(raw) => raw
                .parse::<DatePolicy>()
                .with_context(|| format!("Invalid {}", DATE_POLICY_VAR))?,
            None => defaults.date_policy,
        };

        Ok(Self {
            api_key: present(API_KEY_VAR),
            endpoint: present(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
            api_host: present(API_HOST_VAR).unwrap_or(defaults.api_host),
            request_timeout,
            date_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.api_key, None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.date_policy, DatePolicy::Skip);
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (ENDPOINT_VAR, "http://127.0.0.1:9000/list"),
            (TIMEOUT_VAR, "15"),
            (DATE_POLICY_VAR, "Strict"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/list");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.date_policy, DatePolicy::Strict);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        assert!(Config::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).is_err());
    }

    #[test]
    fn unknown_date_policy_is_rejected() {
        let err = Config::from_lookup(lookup(&[(DATE_POLICY_VAR, "lenient")])).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown date policy"));
    }
}
