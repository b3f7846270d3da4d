use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2::config::Region;
use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use lettre::Address;
use tracing::{debug, error, info};

use crate::config::{non_empty, MailerSetting};
use crate::error::MailerError;
use crate::provider::EmailProvider;

const CHARSET: &str = "UTF-8";

/// Sends mail through AWS Simple Email Service. Credentials come from the
/// default AWS provider chain.
#[derive(Clone, Debug)]
pub struct AwsSesEmailProvider {
  client: aws_sdk_sesv2::Client,
  from_address: String,
  configuration_set: Option<String>,
}

/// Region and from address, validated before any AWS configuration is
/// loaded.
pub(crate) struct SesTarget<'a> {
  pub region: &'a str,
  pub from_address: &'a str,
  pub configuration_set: Option<&'a str>,
}

impl<'a> SesTarget<'a> {
  pub(crate) fn from_setting(setting: &'a MailerSetting) -> Result<Self, MailerError> {
    let region =
      non_empty(setting.aws_ses_region.as_deref()).ok_or(MailerError::SesRegionMissing)?;
    let from_address =
      non_empty(setting.aws_ses_from.as_deref()).ok_or(MailerError::SesFromMissing)?;
    let configuration_set = non_empty(setting.aws_ses_configuration_set.as_deref());
    Ok(Self {
      region,
      from_address,
      configuration_set,
    })
  }
}

impl AwsSesEmailProvider {
  pub async fn new(setting: &MailerSetting) -> Result<Self, MailerError> {
    let target = SesTarget::from_setting(setting)?;
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
      .region(Region::new(target.region.to_owned()))
      .load()
      .await;
    let client = aws_sdk_sesv2::Client::new(&sdk_config);

    info!(
      "Initialized AWS SES email provider for region: {} with from address: {}",
      target.region, target.from_address
    );
    Ok(Self {
      client,
      from_address: target.from_address.to_owned(),
      configuration_set: target.configuration_set.map(str::to_owned),
    })
  }
}

#[async_trait]
impl EmailProvider for AwsSesEmailProvider {
  fn name(&self) -> &'static str {
    "aws-ses"
  }

  async fn send(
    &self,
    recipients: &[Address],
    subject: &str,
    body: &str,
  ) -> Result<(), MailerError> {
    let destination = Destination::builder()
      .set_to_addresses(Some(recipients.iter().map(|r| r.to_string()).collect()))
      .build();
    let subject = utf8_content(subject)?;
    let text = utf8_content(body)?;
    let message = Message::builder()
      .subject(subject)
      .body(Body::builder().text(text).build())
      .build();

    let output = self
      .client
      .send_email()
      .from_email_address(&self.from_address)
      .destination(destination)
      .content(EmailContent::builder().simple(message).build())
      .set_configuration_set_name(self.configuration_set.clone())
      .send()
      .await
      .map_err(|err| {
        let err = DisplayErrorContext(err).to_string();
        error!("Failed to send email via AWS SES: {}", err);
        MailerError::AwsSes(err)
      })?;

    debug!(
      "E-Mail sent to {} recipients via AWS SES. Message ID: {:?}",
      recipients.len(),
      output.message_id()
    );
    Ok(())
  }
}

fn utf8_content(data: &str) -> Result<Content, MailerError> {
  Content::builder()
    .data(data)
    .charset(CHARSET)
    .build()
    .map_err(|err| MailerError::Build(err.to_string()))
}
