use serde::Serialize;

/// User facing notifications raised by the settings panel.
pub trait Dialogs: Send {
  fn alert(&mut self, message: &str);
  fn show_error_dialog(&mut self, title: &str, detail: &str);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
  Alert { message: String },
  Error { title: String, detail: String },
}

/// Keeps notifications in the order they were raised until the web layer
/// drains them into a response.
#[derive(Debug, Default)]
pub struct DialogLog {
  pending: Vec<Notification>,
}

impl DialogLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn pending(&self) -> &[Notification] {
    &self.pending
  }

  pub fn drain(&mut self) -> Vec<Notification> {
    std::mem::take(&mut self.pending)
  }
}

impl Dialogs for DialogLog {
  fn alert(&mut self, message: &str) {
    self.pending.push(Notification::Alert {
      message: message.to_owned(),
    });
  }

  fn show_error_dialog(&mut self, title: &str, detail: &str) {
    tracing::warn!("{}: {}", title, detail);
    self.pending.push(Notification::Error {
      title: title.to_owned(),
      detail: detail.to_owned(),
    });
  }
}
