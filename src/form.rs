use serde::{Deserialize, Serialize};

/// Named fields of the mail settings form as posted by the browser.
///
/// A field that is not part of the posted form stays `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MailForm {
  #[serde(rename = "mail-smtp")]
  pub mail_smtp: Option<String>,
  #[serde(rename = "mail-port")]
  pub mail_port: Option<String>,
  #[serde(rename = "mail-user")]
  pub mail_user: Option<String>,
  #[serde(rename = "mail-password")]
  pub mail_password: Option<String>,
  #[serde(rename = "mail-name")]
  pub mail_name: Option<String>,

  #[serde(rename = "mail-aws-ses-region")]
  pub mail_aws_ses_region: Option<String>,
  #[serde(rename = "mail-aws-ses-from")]
  pub mail_aws_ses_from: Option<String>,
  #[serde(rename = "mail-aws-ses-configuration-set")]
  pub mail_aws_ses_configuration_set: Option<String>,
}

/// A form submission. Whoever dispatches the event checks
/// [`SubmitEvent::default_prevented`] to decide whether the browser's own
/// navigation still has to happen.
#[derive(Debug)]
pub struct SubmitEvent {
  form: MailForm,
  default_prevented: bool,
}

impl SubmitEvent {
  pub fn new(form: MailForm) -> Self {
    Self {
      form,
      default_prevented: false,
    }
  }

  pub fn form(&self) -> &MailForm {
    &self.form
  }

  pub fn prevent_default(&mut self) {
    self.default_prevented = true;
  }

  pub fn default_prevented(&self) -> bool {
    self.default_prevented
  }
}
