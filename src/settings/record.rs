use mailer::MailerSetting;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::visibility::{compute_visibility, ProviderVisibility, DEFAULT_PROVIDER};

/// The server settings record, as far as the mail panel is concerned.
///
/// The remote store keeps every server setting in one record. Attributes this
/// panel does not know are kept in `extra` and written back untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
  #[serde(default, deserialize_with = "lenient_bool")]
  pub mail: bool,
  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_provider: Option<String>,

  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_smtp: Option<String>,
  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_port: Option<String>,
  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_user: Option<String>,
  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_password: Option<String>,
  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_name: Option<String>,

  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_aws_ses_region: Option<String>,
  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_aws_ses_from: Option<String>,
  #[serde(
    default,
    deserialize_with = "lenient_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub mail_aws_ses_configuration_set: Option<String>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl SettingsRecord {
  pub fn effective_provider(&self) -> &str {
    self.mail_provider.as_deref().unwrap_or(DEFAULT_PROVIDER)
  }

  pub fn visibility(&self) -> ProviderVisibility {
    compute_visibility(self.mail, self.mail_provider.as_deref())
  }
}

impl From<&SettingsRecord> for MailerSetting {
  fn from(record: &SettingsRecord) -> Self {
    MailerSetting {
      provider: Some(record.effective_provider().to_owned()),
      smtp_host: record.mail_smtp.clone(),
      smtp_port: record.mail_port.clone(),
      smtp_username: record.mail_user.clone(),
      smtp_password: record.mail_password.clone().map(Into::into),
      smtp_from: record.mail_name.clone(),
      aws_ses_region: record.mail_aws_ses_region.clone(),
      aws_ses_from: record.mail_aws_ses_from.clone(),
      aws_ses_configuration_set: record.mail_aws_ses_configuration_set.clone(),
    }
  }
}

/// Any truthy value enables mail; `null` and unknown shapes count as off.
fn lenient_bool<'a, D: Deserializer<'a>>(deserializer: D) -> Result<bool, D::Error> {
  let enabled = match Option::<Value>::deserialize(deserializer)? {
    Some(Value::Bool(b)) => b,
    Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "on" | "1"),
    Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0),
    _ => false,
  };
  Ok(enabled)
}

/// Scalars are taken as their text, anything else as absent.
fn lenient_string<'a, D: Deserializer<'a>>(deserializer: D) -> Result<Option<String>, D::Error> {
  let value = match Option::<Value>::deserialize(deserializer)? {
    Some(Value::String(s)) => Some(s),
    Some(Value::Number(n)) => Some(n.to_string()),
    Some(Value::Bool(b)) => Some(b.to_string()),
    _ => None,
  };
  Ok(value)
}
