use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
  #[error("SMTP host not configured (smtp)")]
  SmtpHostMissing,

  #[error("SMTP from address not configured (name)")]
  SmtpFromMissing,

  #[error("invalid SMTP port: {0}")]
  InvalidPort(String),

  #[error("AWS SES region not configured (aws-ses-region)")]
  SesRegionMissing,

  #[error("AWS SES from address not configured (aws-ses-from)")]
  SesFromMissing,

  #[error("invalid email address: {0}")]
  InvalidAddress(String),

  #[error("no recipients given")]
  NoRecipients,

  #[error("failed to build message: {0}")]
  Build(String),

  #[error("failed to render template: {0}")]
  Template(String),

  #[error("mail could not be sent via SMTP: {0}")]
  Smtp(String),

  #[error("mail could not be sent via AWS SES: {0}")]
  AwsSes(String),
}
