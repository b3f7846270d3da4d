use handlebars::Handlebars;
use tracing::{debug, info};

use crate::config::{non_empty, MailerSetting, ProviderKind};
use crate::error::MailerError;
use crate::provider::{parse_recipients, EmailProvider};
use crate::ses::AwsSesEmailProvider;
use crate::smtp::SmtpEmailProvider;

const TEST_MAIL_TEMPLATE_NAME: &str = "test_mail";
const TEST_MAIL_TEMPLATE: &str = "This is a test e-mail from {{sent_by}}.\n\n\
Your mail configuration is working: it was delivered through the {{provider}} provider.\n";

/// Builds the provider selected by the setting.
pub async fn provider_for(setting: &MailerSetting) -> Result<Box<dyn EmailProvider>, MailerError> {
  match setting.provider_kind() {
    ProviderKind::AwsSes => Ok(Box::new(AwsSesEmailProvider::new(setting).await?)),
    ProviderKind::Smtp => Ok(Box::new(SmtpEmailProvider::new(setting)?)),
  }
}

pub async fn send(
  setting: &MailerSetting,
  tos: &str,
  subject: &str,
  text: &str,
) -> Result<(), MailerError> {
  let recipients = parse_recipients(tos)?;
  let provider = provider_for(setting).await?;
  provider.send(&recipients, subject, text).await?;
  debug!("E-Mail sent to {} via {}", tos, provider.name());
  Ok(())
}

/// Sends to the admin address when one is configured. Returns whether a
/// message went out.
pub async fn notify_admin(
  setting: &MailerSetting,
  admin_mail: Option<&str>,
  subject: &str,
  text: &str,
) -> Result<bool, MailerError> {
  match non_empty(admin_mail) {
    Some(admin_mail) => {
      send(setting, admin_mail, subject, text).await?;
      Ok(true)
    },
    None => {
      info!("no admin mail configured, skip notification: {}", subject);
      Ok(false)
    },
  }
}

#[derive(serde::Serialize)]
pub struct TestMailParam {
  pub sent_by: String,
  pub provider: String,
}

/// Plain text templates for the messages the console sends itself.
pub struct MailTemplates {
  handlers: Handlebars<'static>,
}

impl MailTemplates {
  pub fn new() -> Result<Self, MailerError> {
    let mut templates = Self {
      handlers: Handlebars::new(),
    };
    templates.register_template(TEST_MAIL_TEMPLATE_NAME, TEST_MAIL_TEMPLATE)?;
    Ok(templates)
  }

  pub fn register_template(&mut self, name: &str, template: &str) -> Result<(), MailerError> {
    self
      .handlers
      .register_template_string(name, template)
      .map_err(|err| MailerError::Template(err.to_string()))
  }

  pub fn render<T>(&self, name: &str, param: &T) -> Result<String, MailerError>
  where
    T: serde::Serialize,
  {
    self
      .handlers
      .render(name, param)
      .map_err(|err| MailerError::Template(err.to_string()))
  }

  pub fn render_test_mail(&self, param: &TestMailParam) -> Result<String, MailerError> {
    self.render(TEST_MAIL_TEMPLATE_NAME, param)
  }
}

/// Sends the console's test message using the given setting.
pub async fn send_test_mail(
  setting: &MailerSetting,
  tos: &str,
  sent_by: &str,
) -> Result<(), MailerError> {
  let templates = MailTemplates::new()?;
  let text = templates.render_test_mail(&TestMailParam {
    sent_by: sent_by.to_owned(),
    provider: setting.provider_kind().as_str().to_owned(),
  })?;
  send(setting, tos, "Test e-mail", &text).await
}
