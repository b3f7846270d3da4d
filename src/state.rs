use std::sync::Arc;

use crate::config::config::Config;
use crate::store::SettingsStore;
use crate::widget::WidgetRegistry;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub settings_store: Arc<dyn SettingsStore>,
  pub widgets: WidgetRegistry,
}

impl AppState {
  pub fn new(config: Config, settings_store: Arc<dyn SettingsStore>) -> Self {
    Self {
      config: Arc::new(config),
      settings_store,
      widgets: WidgetRegistry::new(),
    }
  }
}
