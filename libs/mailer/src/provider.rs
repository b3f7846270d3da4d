use async_trait::async_trait;
use lettre::Address;

use crate::error::MailerError;

/// A backend able to deliver plain text mail.
#[async_trait]
pub trait EmailProvider: Send + Sync {
  fn name(&self) -> &'static str;

  async fn send(
    &self,
    recipients: &[Address],
    subject: &str,
    body: &str,
  ) -> Result<(), MailerError>;
}

/// Splits a recipient list on `,` or `;`. Blank entries are skipped.
pub fn parse_recipients(tos: &str) -> Result<Vec<Address>, MailerError> {
  let recipients = tos
    .split([',', ';'])
    .map(str::trim)
    .filter(|r| !r.is_empty())
    .map(|r| {
      r.parse::<Address>()
        .map_err(|err| MailerError::InvalidAddress(format!("{}: {}", r, err)))
    })
    .collect::<Result<Vec<_>, _>>()?;

  if recipients.is_empty() {
    return Err(MailerError::NoRecipients);
  }
  Ok(recipients)
}
