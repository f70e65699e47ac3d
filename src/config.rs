use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default port for `textsim serve`.
pub const DEFAULT_PORT: u16 = 5000;

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Flat JSON credential file (TEXTSIM_USERS_PATH, default ./users.json)
    pub users_path: PathBuf,
    /// Secret for HMAC session token signing (TEXTSIM_SESSION_SECRET env var)
    pub session_secret: String,
    /// Address the web server binds to (TEXTSIM_BIND, default 127.0.0.1)
    pub bind: String,
    /// Port the web server listens on (TEXTSIM_PORT, default 5000)
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the session secret, which is only
    /// needed when serving the web API.
    pub fn load() -> Result<Self> {
        let port = match env::var("TEXTSIM_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("TEXTSIM_PORT must be a port number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            users_path: env::var("TEXTSIM_USERS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./users.json")),
            session_secret: env::var("TEXTSIM_SESSION_SECRET").unwrap_or_default(),
            bind: env::var("TEXTSIM_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
        })
    }

    /// Check that a session secret is configured.
    /// Call this before serving anything that issues session cookies.
    pub fn require_session_secret(&self) -> Result<()> {
        if self.session_secret.is_empty() {
            anyhow::bail!(
                "TEXTSIM_SESSION_SECRET not set. Add it to your .env file.\n\
                 Any long random string works, e.g. the output of `openssl rand -hex 32`."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> Config {
        Config {
            users_path: PathBuf::from("./users.json"),
            session_secret: secret.to_string(),
            bind: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }

    #[test]
    fn test_require_session_secret() {
        assert!(config_with_secret("").require_session_secret().is_err());
        assert!(config_with_secret("s3cret").require_session_secret().is_ok());
    }
}
