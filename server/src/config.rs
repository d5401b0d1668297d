//! Server configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_AUTH_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_REFRESH_LEEWAY_SECS: i64 = 60;
/// Provider access-token lifetime (GoTrue default). A leeway this large marks
/// every freshly issued token as already expired.
pub const PROVIDER_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Identity provider base URL without a trailing slash.
    pub auth_url: String,
    /// Public API key sent as the `apikey` header.
    pub anon_key: String,
    pub port: u16,
    /// Public origin of this storefront, used in confirmation-email links.
    pub site_url: String,
    pub cookie_secure: bool,
    pub timeouts: AuthTimeouts,
    pub refresh_leeway_secs: i64,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `AUTH_URL`
    /// - `AUTH_ANON_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SITE_URL`: default `http://localhost:{PORT}`
    /// - `COOKIE_SECURE`: inferred from `SITE_URL` scheme when unset
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 10
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 5
    /// - `SESSION_REFRESH_LEEWAY_SECS`: default 60, must be below the
    ///   provider token lifetime
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_url = lookup("AUTH_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("AUTH_URL"))?
            .trim()
            .trim_end_matches('/')
            .to_owned();
        let anon_key = lookup("AUTH_ANON_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("AUTH_ANON_KEY"))?;

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let site_url = lookup("SITE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => site_url.starts_with("https://"),
        };

        let timeouts = AuthTimeouts {
            request_secs: parse_or(
                "AUTH_REQUEST_TIMEOUT_SECS",
                lookup("AUTH_REQUEST_TIMEOUT_SECS"),
                DEFAULT_AUTH_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_or(
                "AUTH_CONNECT_TIMEOUT_SECS",
                lookup("AUTH_CONNECT_TIMEOUT_SECS"),
                DEFAULT_AUTH_CONNECT_TIMEOUT_SECS,
            )?,
        };
        let refresh_leeway_secs = parse_or(
            "SESSION_REFRESH_LEEWAY_SECS",
            lookup("SESSION_REFRESH_LEEWAY_SECS"),
            DEFAULT_REFRESH_LEEWAY_SECS,
        )?;
        if !(0..PROVIDER_TOKEN_TTL_SECS).contains(&refresh_leeway_secs) {
            return Err(ConfigError::Invalid {
                var: "SESSION_REFRESH_LEEWAY_SECS",
                value: refresh_leeway_secs.to_string(),
            });
        }

        Ok(Self { auth_url, anon_key, port, site_url, cookie_secure, timeouts, refresh_leeway_secs })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
