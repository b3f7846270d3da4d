use thiserror::Error;
use tracing::{debug, info};

use crate::dialog::Dialogs;
use crate::form::SubmitEvent;
use crate::settings::{ProviderGroup, ProviderVisibility, SettingsRecord};
use crate::store::{SettingsStore, StoreError};
use crate::view::SettingsView;

pub const SAVED_MESSAGE: &str = "E-Mail configuration updated.";
pub const NOT_SAVED_TITLE: &str = "E-Mail configuration not updated";
pub const NOT_LOADED_TITLE: &str = "E-Mail configuration not loaded";

#[derive(Debug, Error)]
pub enum ControllerError {
  #[error("settings record is not loaded")]
  NotLoaded,

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Drives the mail settings panel: loads the record, keeps provider field
/// groups in sync with the selection and saves the form.
///
/// The controller owns the record for the lifetime of the panel and mutates
/// it in place; nothing is persisted until [`MailSettingsController::submit`].
pub struct MailSettingsController<S, V, D> {
  store: S,
  view: V,
  dialogs: D,
  settings: Option<SettingsRecord>,
}

impl<S, V, D> MailSettingsController<S, V, D>
where
  S: SettingsStore,
  V: SettingsView,
  D: Dialogs,
{
  pub fn new(store: S, view: V, dialogs: D) -> Self {
    Self {
      store,
      view,
      dialogs,
      settings: None,
    }
  }

  /// Loads the record and shows the panel. When the store fails the panel
  /// stays hidden and the failure is reported through an error dialog.
  pub async fn init(&mut self) -> Result<(), ControllerError> {
    match self.store.find_one().await {
      Ok(settings) => {
        self.view.render(&settings);
        self.settings = Some(settings);
        self.update_provider_visibility();
        self.view.reveal();
        Ok(())
      },
      Err(err) => {
        self
          .dialogs
          .show_error_dialog(NOT_LOADED_TITLE, &err.to_string());
        Err(err.into())
      },
    }
  }

  pub fn on_mail_toggled(&mut self, checked: bool) -> Result<(), ControllerError> {
    self.settings_mut()?.mail = checked;
    self.update_provider_visibility();
    Ok(())
  }

  pub fn on_provider_changed(&mut self, provider: &str) -> Result<(), ControllerError> {
    self.settings_mut()?.mail_provider = Some(provider.to_owned());
    self.update_provider_visibility();
    Ok(())
  }

  /// Applies the visibility derived from the current record to the view.
  /// Does nothing before the record is loaded.
  pub fn update_provider_visibility(&mut self) -> ProviderVisibility {
    let visibility = match &self.settings {
      Some(settings) => settings.visibility(),
      None => ProviderVisibility::Hidden,
    };
    for group in ProviderGroup::ALL {
      self
        .view
        .set_group_visible(group, visibility.is_visible(group));
    }
    visibility
  }

  /// Copies both provider groups into the record, whether they are shown or
  /// not, and saves it. The event is left untouched when no record is loaded.
  pub async fn submit(&mut self, event: &mut SubmitEvent) -> Result<(), ControllerError> {
    let settings = self.settings.as_mut().ok_or(ControllerError::NotLoaded)?;
    event.prevent_default();

    let provider = settings.effective_provider().to_owned();
    settings.mail_provider = Some(provider);

    let form = event.form();
    settings.mail_smtp = form.mail_smtp.clone();
    settings.mail_port = form.mail_port.clone();
    settings.mail_user = form.mail_user.clone();
    settings.mail_password = form.mail_password.clone();
    settings.mail_name = form.mail_name.clone();

    settings.mail_aws_ses_region = form.mail_aws_ses_region.clone();
    settings.mail_aws_ses_from = form.mail_aws_ses_from.clone();
    settings.mail_aws_ses_configuration_set = form.mail_aws_ses_configuration_set.clone();
    self.view.render(settings);

    debug!(
      "saving mail settings with provider: {}",
      settings.effective_provider()
    );
    match self.store.save(settings).await {
      Ok(()) => {
        info!("mail settings saved");
        self.dialogs.alert(SAVED_MESSAGE);
        Ok(())
      },
      Err(err) => {
        self.dialogs.show_error_dialog(NOT_SAVED_TITLE, &err.to_string());
        Err(err.into())
      },
    }
  }

  pub fn settings(&self) -> Option<&SettingsRecord> {
    self.settings.as_ref()
  }

  pub fn view(&self) -> &V {
    &self.view
  }

  pub fn dialogs_mut(&mut self) -> &mut D {
    &mut self.dialogs
  }

  fn settings_mut(&mut self) -> Result<&mut SettingsRecord, ControllerError> {
    self.settings.as_mut().ok_or(ControllerError::NotLoaded)
  }
}
