use anyhow::Context;
use secrecy::Secret;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Config {
  pub app_env: Environment,
  pub application: ApplicationSetting,
  pub settings_store: SettingsStoreSetting,
  /// Prefix of every route, e.g. `/console` when served behind a proxy.
  /// Empty when served from the root.
  pub path_prefix: String,
  /// Shown as the sender in test messages.
  pub console_name: String,
  /// Settings panels untouched for this long are dropped.
  pub widget_idle_timeout: Duration,
}

// Use 127.0.0.1 for local development and 0.0.0.0 inside a container, where
// requests from the host are not seen as local.
#[derive(Clone, Debug)]
pub struct ApplicationSetting {
  pub port: u16,
  pub host: String,
}

#[derive(Clone, Debug)]
pub struct SettingsStoreSetting {
  pub url: String,
  pub access_token: Option<Secret<String>>,
}

impl Config {
  // Default values favor local development.
  pub fn from_env() -> Result<Self, anyhow::Error> {
    let config = Config {
      app_env: get_env_var("MAIL_CONSOLE_ENVIRONMENT", "local")
        .parse()
        .context("fail to get MAIL_CONSOLE_ENVIRONMENT")?,
      application: ApplicationSetting {
        port: get_env_var("MAIL_CONSOLE_PORT", "3000")
          .parse()
          .context("fail to get MAIL_CONSOLE_PORT")?,
        host: get_env_var("MAIL_CONSOLE_HOST", "0.0.0.0"),
      },
      settings_store: SettingsStoreSetting {
        url: get_env_var(
          "MAIL_CONSOLE_SETTINGS_URL",
          "http://localhost:8082/api/v2/admin/server/settings",
        ),
        access_token: get_env_var_opt("MAIL_CONSOLE_API_TOKEN").map(Secret::new),
      },
      path_prefix: normalize_path_prefix(&get_env_var("MAIL_CONSOLE_PATH_PREFIX", "")),
      console_name: get_env_var("MAIL_CONSOLE_NAME", "Mail Console"),
      widget_idle_timeout: Duration::from_secs(
        get_env_var("MAIL_CONSOLE_WIDGET_IDLE_SECS", "1800")
          .parse()
          .context("fail to get MAIL_CONSOLE_WIDGET_IDLE_SECS")?,
      ),
    };
    Ok(config)
  }

  pub fn widget_url(&self, widget_id: &Uuid) -> String {
    format!("{}/web-api/settings/mail/{}", self.path_prefix, widget_id)
  }
}

/// The possible runtime environment for our application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
  Local,
  Production,
}

impl Environment {
  pub fn as_str(&self) -> &'static str {
    match self {
      Environment::Local => "local",
      Environment::Production => "production",
    }
  }
}

impl FromStr for Environment {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "local" => Ok(Self::Local),
      "production" => Ok(Self::Production),
      other => anyhow::bail!(
        "{} is not a supported environment. Use either `local` or `production`.",
        other
      ),
    }
  }
}

pub fn get_env_var(key: &str, default: &str) -> String {
  std::env::var(key).unwrap_or_else(|e| {
    tracing::debug!(
      "failed to read environment variable:{}:{}, using default value: {}",
      e,
      key,
      default
    );
    default.to_owned()
  })
}

/// Optionally get an environment variable.
/// if value is empty, return None.
pub fn get_env_var_opt(key: &str) -> Option<String> {
  match std::env::var(key) {
    Ok(val) => {
      if val.is_empty() {
        None
      } else {
        Some(val)
      }
    },
    Err(e) => {
      tracing::debug!("failed to read environment variable: {}, None set", e);
      None
    },
  }
}

fn normalize_path_prefix(prefix: &str) -> String {
  let prefix = prefix.trim().trim_end_matches('/');
  if prefix.is_empty() || prefix.starts_with('/') {
    prefix.to_owned()
  } else {
    format!("/{}", prefix)
  }
}
