use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::info;
use uuid::Uuid;

use crate::controller::MailSettingsController;
use crate::dialog::DialogLog;
use crate::store::SettingsStore;
use crate::view::HtmlView;

pub type MailWidget = MailSettingsController<Arc<dyn SettingsStore>, HtmlView, DialogLog>;

struct WidgetEntry {
  widget: Arc<Mutex<MailWidget>>,
  last_active: Instant,
}

/// Live settings panels, one per opened page.
///
/// Each widget sits behind its own mutex so its events run one at a time, in
/// the order they arrive. Widgets nobody touched for a while are evicted by
/// [`spawn_idle_sweep`].
#[derive(Clone, Default)]
pub struct WidgetRegistry {
  widgets: Arc<DashMap<Uuid, WidgetEntry>>,
}

impl WidgetRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&self, widget_id: Uuid, widget: MailWidget) -> Arc<Mutex<MailWidget>> {
    let widget = Arc::new(Mutex::new(widget));
    self.widgets.insert(
      widget_id,
      WidgetEntry {
        widget: widget.clone(),
        last_active: Instant::now(),
      },
    );
    widget
  }

  /// Looks the widget up and marks it active.
  pub fn get(&self, widget_id: &Uuid) -> Option<Arc<Mutex<MailWidget>>> {
    self.widgets.get_mut(widget_id).map(|mut entry| {
      entry.last_active = Instant::now();
      entry.widget.clone()
    })
  }

  pub fn remove(&self, widget_id: &Uuid) -> bool {
    self.widgets.remove(widget_id).is_some()
  }

  /// Drops every widget idle for at least `max_idle`. Returns how many went.
  pub fn evict_idle(&self, max_idle: Duration) -> usize {
    let before = self.widgets.len();
    let now = Instant::now();
    self
      .widgets
      .retain(|_, entry| now.duration_since(entry.last_active) < max_idle);
    before.saturating_sub(self.widgets.len())
  }

  pub fn len(&self) -> usize {
    self.widgets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.widgets.is_empty()
  }
}

/// Periodically evicts widgets whose page went away without closing them.
pub fn spawn_idle_sweep(
  registry: WidgetRegistry,
  max_idle: Duration,
  period: Duration,
) -> JoinHandle<()> {
  let mut interval = interval(period);
  tokio::spawn(async move {
    loop {
      interval.tick().await;
      let evicted = registry.evict_idle(max_idle);
      if evicted > 0 {
        info!("evicted {} idle mail settings widgets", evicted);
      }
    }
  })
}
