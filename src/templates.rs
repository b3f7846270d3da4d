use askama::Template;

use crate::dialog::Notification;
use crate::settings::SettingsRecord;

#[derive(Template)]
#[template(path = "mail_settings.html")]
pub struct MailSettingsWidget<'a> {
  pub widget_url: &'a str,
  pub settings: &'a SettingsRecord,
  pub smtp_visible: bool,
  pub aws_ses_visible: bool,
  pub revealed: bool,
}

impl<'a> MailSettingsWidget<'a> {
  pub fn if_eq(&self, a: &str, b: &str) -> bool {
    a == b
  }

  pub fn provider(&self) -> &str {
    self.settings.effective_provider()
  }
}

#[derive(Template)]
#[template(path = "mail_settings_page.html")]
pub struct MailSettingsPage<'a> {
  pub widget_url: Option<&'a str>,
  pub widget: &'a str,
  pub dialogs: &'a str,
}

pub struct DialogItem {
  pub class: &'static str,
  pub role: &'static str,
  pub title: Option<String>,
  pub text: String,
}

impl From<Notification> for DialogItem {
  fn from(notification: Notification) -> Self {
    match notification {
      Notification::Alert { message } => DialogItem {
        class: "alert alert-info",
        role: "alert",
        title: None,
        text: message,
      },
      Notification::Error { title, detail } => DialogItem {
        class: "alert alert-danger",
        role: "alertdialog",
        title: Some(title),
        text: detail,
      },
    }
  }
}

#[derive(Template)]
#[template(path = "dialogs.html")]
pub struct DialogsFragment {
  pub items: Vec<DialogItem>,
}

impl DialogsFragment {
  pub fn new(notifications: Vec<Notification>) -> Self {
    Self {
      items: notifications.into_iter().map(DialogItem::from).collect(),
    }
  }
}
