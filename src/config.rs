/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, JWT_SECRET, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 読み込みは lookup 関数越しに行う (テストでプロセス環境を汚さないため)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // None の場合は in-memory store で起動する (development のみ)
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub jwt_secret: String,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // secret と接続文字列は出さない
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_timeout", &self.request_timeout)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .finish_non_exhaustive()
    }
}

// 未設定なら default、設定されていて parse できなければ Invalid
fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if database_url.is_none() && app_env.is_production() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections: u32 = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"));
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout =
            Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)?);

        let request_body_limit_bytes: usize =
            parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        // sqids は 0..=255 のみ受け付ける
        let sqids_min_length: usize = parse_or(&lookup, "SQIDS_MIN_LENGTH", 10)?;
        if sqids_min_length > u8::MAX as usize {
            return Err(ConfigError::Invalid("SQIDS_MIN_LENGTH"));
        }

        let sqids_alphabet = lookup("SQIDS_ALPHABET").unwrap_or_else(|| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let auth_issuer = lookup("AUTH_ISSUER").filter(|s| !s.trim().is_empty());
        let auth_audience = lookup("AUTH_AUDIENCE").filter(|s| !s.trim().is_empty());

        let access_token_leeway_seconds: u64 =
            parse_or(&lookup, "ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            request_timeout,
            request_body_limit_bytes,
            sqids_min_length,
            sqids_alphabet,
            jwt_secret,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
        assert_eq!(config.sqids_min_length, 10);
        assert_eq!(config.access_token_leeway_seconds, 60);
        assert!(config.auth_issuer.is_none());
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn missing_secret_fails_startup() {
        let err = Config::from_lookup(lookup_from(&[])).err();
        assert_eq!(err, Some(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn blank_secret_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "   ")])).err();
        assert_eq!(err, Some(ConfigError::Invalid("JWT_SECRET")));
    }

    #[test]
    fn production_requires_database_url() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("APP_ENV", "prod"),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "http"),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Invalid("PORT")));
    }

    #[test]
    fn unparsable_numeric_values_are_rejected() {
        for key in [
            "DATABASE_MAX_CONNECTIONS",
            "REQUEST_TIMEOUT_SECONDS",
            "REQUEST_BODY_LIMIT_BYTES",
            "SQIDS_MIN_LENGTH",
            "ACCESS_TOKEN_LEEWAY_SECONDS",
        ] {
            let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret"), (key, "abc")]))
                .err();
            assert_eq!(err, Some(ConfigError::Invalid(key)), "{key}");

            let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret"), (key, "-1")]))
                .err();
            assert_eq!(err, Some(ConfigError::Invalid(key)), "{key}");
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS")));

        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("SQIDS_MIN_LENGTH", "256"),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Invalid("SQIDS_MIN_LENGTH")));
    }

    #[test]
    fn numeric_values_are_read_when_valid() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("REQUEST_TIMEOUT_SECONDS", " 5 "),
            ("REQUEST_BODY_LIMIT_BYTES", "2048"),
            ("SQIDS_MIN_LENGTH", "0"),
            ("ACCESS_TOKEN_LEEWAY_SECONDS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.database_max_connections, 12);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.request_body_limit_bytes, 2048);
        assert_eq!(config.sqids_min_length, 0);
        assert_eq!(config.access_token_leeway_seconds, 0);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("CORS_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
        ]))
        .unwrap();

        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "very-secret-value"),
            ("DATABASE_URL", "postgres://user:pw@localhost/db"),
        ]))
        .unwrap();

        let printed = format!("{config:?}");
        assert!(!printed.contains("very-secret-value"));
        assert!(!printed.contains("user:pw"));
    }
}
