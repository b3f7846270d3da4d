use askama::Template;
use serde_json::{json, Map, Value};

use crate::settings::{ProviderGroup, SettingsRecord};
use crate::templates::MailSettingsWidget;

pub const VISIBILITY_EVENT: &str = "mail-visibility";

/// The rendered settings panel.
pub trait SettingsView: Send {
  fn render(&mut self, record: &SettingsRecord);
  fn set_group_visible(&mut self, group: ProviderGroup, visible: bool);
  fn reveal(&mut self);
}

/// Server side rendition of the panel. `render` binds a copy of the record;
/// the markup itself is produced by [`HtmlView::to_html`] so that visibility
/// set after binding is reflected.
#[derive(Debug)]
pub struct HtmlView {
  widget_url: String,
  settings: Option<SettingsRecord>,
  smtp_visible: bool,
  aws_ses_visible: bool,
  revealed: bool,
}

impl HtmlView {
  pub fn new(widget_url: impl Into<String>) -> Self {
    Self {
      widget_url: widget_url.into(),
      settings: None,
      smtp_visible: false,
      aws_ses_visible: false,
      revealed: false,
    }
  }

  pub fn is_group_visible(&self, group: ProviderGroup) -> bool {
    match group {
      ProviderGroup::Smtp => self.smtp_visible,
      ProviderGroup::AwsSes => self.aws_ses_visible,
    }
  }

  /// Event payload telling the browser which groups to show, keyed by
  /// element id.
  pub fn visibility_event(&self) -> Value {
    let groups = ProviderGroup::ALL
      .iter()
      .map(|g| (g.element_id().to_owned(), Value::Bool(self.is_group_visible(*g))))
      .collect::<Map<_, _>>();
    json!({ VISIBILITY_EVENT: groups })
  }

  /// `None` until a record has been bound.
  pub fn to_html(&self) -> Result<Option<String>, askama::Error> {
    let settings = match &self.settings {
      Some(settings) => settings,
      None => return Ok(None),
    };
    let s = MailSettingsWidget {
      widget_url: &self.widget_url,
      settings,
      smtp_visible: self.smtp_visible,
      aws_ses_visible: self.aws_ses_visible,
      revealed: self.revealed,
    }
    .render()?;
    Ok(Some(s))
  }
}

impl SettingsView for HtmlView {
  fn render(&mut self, record: &SettingsRecord) {
    self.settings = Some(record.clone());
  }

  fn set_group_visible(&mut self, group: ProviderGroup, visible: bool) {
    match group {
      ProviderGroup::Smtp => self.smtp_visible = visible,
      ProviderGroup::AwsSes => self.aws_ses_visible = visible,
    }
  }

  fn reveal(&mut self) {
    self.revealed = true;
  }
}
