//! Process configuration
//!
//! Everything comes from the environment (optionally seeded from `.env`).
//! `DATABASE_URL` and `JWT_SECRET` are mandatory; there is no fallback secret.

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::mail::{ConfiguredMailer, HttpMailer, LogMailer};
use property::PropertyConfig;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAIL_FROM: &str = "Happy Homes <noreply@happyhomes.local>";
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Outbound mail API settings
#[derive(Clone)]
pub struct MailSettings {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    jwt_secret: String,
    password_pepper: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub upload_dir: PathBuf,
    pub reset_link_base: Option<String>,
    pub mail: Option<MailSettings>,
    pub mail_timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let Some(jwt_secret) = get("JWT_SECRET") else {
            bail!("JWT_SECRET must be set to a non-empty value");
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let mail_timeout = match get("MAIL_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.trim()
                    .parse()
                    .context("MAIL_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(DEFAULT_MAIL_TIMEOUT_SECS),
        };

        let db_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive number")?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let mail = get("MAIL_API_URL").map(|api_url| MailSettings {
            api_url,
            api_key: get("MAIL_API_KEY").unwrap_or_default(),
            from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
        });

        Ok(Self {
            database_url,
            db_max_connections,
            jwt_secret,
            password_pepper: get("PASSWORD_PEPPER"),
            bind_addr,
            frontend_origins,
            upload_dir: PathBuf::from(
                get("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            reset_link_base: get("RESET_LINK_BASE"),
            mail,
            mail_timeout,
        })
    }

    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let mut config = AuthConfig::new(self.jwt_secret.as_bytes())
            .context("invalid JWT_SECRET")?;
        if let Some(pepper) = &self.password_pepper {
            config = config.with_pepper(pepper.as_bytes());
        }
        if let Some(base) = &self.reset_link_base {
            config = config.with_reset_link_base(base.clone());
        }
        Ok(config)
    }

    pub fn property_config(&self) -> PropertyConfig {
        PropertyConfig::new(self.upload_dir.clone())
    }

    /// HTTP mailer when `MAIL_API_URL` is set, otherwise the log mailer
    pub fn mailer(&self) -> anyhow::Result<ConfiguredMailer> {
        match &self.mail {
            Some(mail) => {
                let mailer = HttpMailer::new(
                    mail.api_url.clone(),
                    mail.api_key.clone(),
                    mail.from.clone(),
                    self.mail_timeout,
                )
                .context("invalid mail API configuration")?;
                Ok(ConfiguredMailer::Http(mailer))
            }
            None => {
                tracing::warn!("MAIL_API_URL not set; reset mails will only be logged");
                Ok(ConfiguredMailer::Log(LogMailer))
            }
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("database_url", &"[REDACTED]")
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("bind_addr", &self.bind_addr)
            .field("frontend_origins", &self.frontend_origins)
            .field("upload_dir", &self.upload_dir)
            .field("reset_link_base", &self.reset_link_base)
            .field("mail_api_url", &self.mail.as_ref().map(|m| m.api_url.as_str()))
            .field("mail_timeout", &self.mail_timeout)
            .finish()
    }
}
