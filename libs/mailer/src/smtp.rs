use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::Address;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Tokio1Executor;
use secrecy::ExposeSecret;
use tracing::{debug, error, info};

use crate::config::{non_empty, MailerSetting, DEFAULT_SMTP_PORT};
use crate::error::MailerError;
use crate::provider::EmailProvider;

#[derive(Clone)]
pub struct SmtpEmailProvider {
  smtp_transport: AsyncSmtpTransport<Tokio1Executor>,
  from: Mailbox,
  authenticated: bool,
}

impl SmtpEmailProvider {
  /// Authenticates with STARTTLS when a user name is configured, otherwise
  /// talks plain SMTP to the relay.
  pub fn new(setting: &MailerSetting) -> Result<Self, MailerError> {
    let smtp_host =
      non_empty(setting.smtp_host.as_deref()).ok_or(MailerError::SmtpHostMissing)?;
    let smtp_port = parse_port(setting.smtp_port.as_deref())?;
    let from = non_empty(setting.smtp_from.as_deref())
      .ok_or(MailerError::SmtpFromMissing)?
      .parse::<Mailbox>()
      .map_err(|err| MailerError::InvalidAddress(err.to_string()))?;

    let (smtp_transport, authenticated) = match non_empty(setting.smtp_username.as_deref()) {
      Some(username) => {
        let password = setting
          .smtp_password
          .as_ref()
          .map(|p| p.expose_secret().to_owned())
          .unwrap_or_default();
        let creds = Credentials::new(username.to_owned(), password);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)
          .map_err(|err| MailerError::Smtp(err.to_string()))?
          .credentials(creds)
          .port(smtp_port)
          .build();
        (transport, true)
      },
      None => {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp_host)
          .port(smtp_port)
          .build();
        (transport, false)
      },
    };

    info!(
      "Initialized SMTP email provider for server: {}:{}",
      smtp_host, smtp_port
    );
    Ok(Self {
      smtp_transport,
      from,
      authenticated,
    })
  }

  pub fn from_mailbox(&self) -> &Mailbox {
    &self.from
  }

  pub fn is_authenticated(&self) -> bool {
    self.authenticated
  }
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
  fn name(&self) -> &'static str {
    "smtp"
  }

  async fn send(
    &self,
    recipients: &[Address],
    subject: &str,
    body: &str,
  ) -> Result<(), MailerError> {
    let mut builder = Message::builder()
      .from(self.from.clone())
      .subject(subject)
      .header(ContentType::TEXT_PLAIN);
    for recipient in recipients {
      builder = builder.to(Mailbox::new(None, recipient.clone()));
    }
    let message = builder
      .body(body.to_owned())
      .map_err(|err| MailerError::Build(err.to_string()))?;

    AsyncTransport::send(&self.smtp_transport, message)
      .await
      .map_err(|err| {
        error!("SMTP error sending email: {}", err);
        MailerError::Smtp(err.to_string())
      })?;

    debug!("Email sent via SMTP to {} recipients", recipients.len());
    Ok(())
  }
}

fn parse_port(port: Option<&str>) -> Result<u16, MailerError> {
  match non_empty(port) {
    None => Ok(DEFAULT_SMTP_PORT),
    Some(port) => port
      .parse::<u16>()
      .map_err(|_| MailerError::InvalidPort(port.to_owned())),
  }
}
