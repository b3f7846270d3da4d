use secrecy::Secret;

pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Mail delivery settings as kept in the server settings record.
///
/// Every value is optional because the record may never have been saved with
/// the corresponding provider selected.
#[derive(Clone, Debug, Default)]
pub struct MailerSetting {
  pub provider: Option<String>,
  pub smtp_host: Option<String>,
  pub smtp_port: Option<String>,
  pub smtp_username: Option<String>,
  pub smtp_password: Option<Secret<String>>,
  /// Sender address used for SMTP delivery.
  pub smtp_from: Option<String>,
  pub aws_ses_region: Option<String>,
  pub aws_ses_from: Option<String>,
  pub aws_ses_configuration_set: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
  Smtp,
  AwsSes,
}

impl ProviderKind {
  /// Unknown or missing provider names fall back to SMTP.
  pub fn from_name(name: Option<&str>) -> Self {
    match name.map(|n| n.trim().to_lowercase()).as_deref() {
      Some("aws-ses") | Some("ses") => ProviderKind::AwsSes,
      _ => ProviderKind::Smtp,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ProviderKind::Smtp => "smtp",
      ProviderKind::AwsSes => "aws-ses",
    }
  }
}

impl MailerSetting {
  pub fn provider_kind(&self) -> ProviderKind {
    ProviderKind::from_name(self.provider.as_deref())
  }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}
