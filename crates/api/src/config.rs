use crate::auth::jwt::JwtConfig;

/// HTTP server configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by CORS, comma separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Listens granted per completed track purchase.
    pub listens_per_purchase: i32,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read server settings from the environment, defaulting where unset.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3001`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `LISTENS_PER_PURCHASE`  | `10`                    |
    ///
    /// JWT settings come from [`JwtConfig::from_env`], which panics when
    /// `JWT_SECRET` is absent.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed_env("PORT", "3001"),
            cors_origins,
            request_timeout_secs: parsed_env("REQUEST_TIMEOUT_SECS", "30"),
            listens_per_purchase: parsed_env("LISTENS_PER_PURCHASE", "10"),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Read an env var with a fallback and parse it, panicking with the var
/// name when the value does not parse.
fn parsed_env<T: std::str::FromStr>(name: &str, default: &str) -> T {
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .unwrap_or_else(|_| panic!("{name} must be a valid number, got '{raw}'"))
}
