use askama::Template;
use axum::extract::State;
use axum::response::Result;
use axum::{response::Html, routing::get, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::controller::MailSettingsController;
use crate::dialog::DialogLog;
use crate::error::RenderError;
use crate::state::AppState;
use crate::templates::{self, DialogsFragment};
use crate::view::HtmlView;
use crate::widget::MailWidget;

pub fn router() -> Router<AppState> {
  Router::new().route("/admin/settings/mail", get(mail_settings_handler))
}

/// Opens a new settings panel. The panel is registered for follow-up events
/// only when the record could be loaded.
#[instrument(skip_all)]
pub async fn mail_settings_handler(
  State(state): State<AppState>,
) -> Result<Html<String>, RenderError> {
  let widget_id = Uuid::new_v4();
  let widget_url = state.config.widget_url(&widget_id);
  let mut controller = MailSettingsController::new(
    state.settings_store.clone(),
    HtmlView::new(widget_url.clone()),
    DialogLog::new(),
  );

  let loaded = controller.init().await.is_ok();
  let page = render_settings_page(&mut controller, loaded.then_some(widget_url.as_str()))?;

  if loaded {
    info!("mail settings widget opened: {}", widget_id);
    state.widgets.insert(widget_id, controller);
  }
  Ok(Html(page))
}

/// Renders the whole page around a widget and drains its pending dialogs.
/// `widget_url` is set when the widget is registered and has to be closed
/// when the page goes away.
pub(crate) fn render_settings_page(
  widget: &mut MailWidget,
  widget_url: Option<&str>,
) -> Result<String, RenderError> {
  let dialogs = DialogsFragment::new(widget.dialogs_mut().drain()).render()?;
  let html = widget.view().to_html()?.unwrap_or_default();
  let page = templates::MailSettingsPage {
    widget_url,
    widget: &html,
    dialogs: &dialogs,
  }
  .render()?;
  Ok(page)
}
