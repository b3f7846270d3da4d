use askama::Template;
use axum::extract::{Path, State};
use axum::http::{status, HeaderMap, HeaderName, HeaderValue};
use axum::response::{Html, IntoResponse, Response, Result};
use axum::routing::{delete, post};
use axum::{Form, Router};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::controller::ControllerError;
use crate::dialog::Dialogs;
use crate::error::{RenderError, WebApiError};
use crate::form::{MailForm, SubmitEvent};
use crate::models::{WebApiChangeProviderRequest, WebApiTestMailRequest, WebApiToggleMailRequest};
use crate::state::AppState;
use crate::templates::DialogsFragment;
use crate::web_app::render_settings_page;
use crate::widget::MailWidget;

pub const TEST_MAIL_SENT_MESSAGE: &str = "Test e-mail sent.";
pub const TEST_MAIL_NOT_SENT_TITLE: &str = "Test e-mail not sent";

const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");
const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");

pub fn router() -> Router<AppState> {
  Router::new()
    .route("/settings/mail/:widget_id", delete(delete_widget_handler))
    .route("/settings/mail/:widget_id/mail", post(toggle_mail_handler))
    .route("/settings/mail/:widget_id/provider", post(change_provider_handler))
    .route("/settings/mail/:widget_id/submit", post(submit_handler))
    .route("/settings/mail/:widget_id/test-mail", post(test_mail_handler))
}

#[instrument(skip(state, param))]
pub async fn toggle_mail_handler(
  State(state): State<AppState>,
  Path(widget_id): Path<Uuid>,
  Form(param): Form<WebApiToggleMailRequest>,
) -> Result<Response, WebApiError> {
  let widget = state
    .widgets
    .get(&widget_id)
    .ok_or_else(|| WebApiError::widget_not_found(&widget_id))?;
  let mut widget = widget.lock().await;
  widget.on_mail_toggled(param.mail.is_some())?;
  event_response(&mut widget)
}

#[instrument(skip(state, param))]
pub async fn change_provider_handler(
  State(state): State<AppState>,
  Path(widget_id): Path<Uuid>,
  Form(param): Form<WebApiChangeProviderRequest>,
) -> Result<Response, WebApiError> {
  let widget = state
    .widgets
    .get(&widget_id)
    .ok_or_else(|| WebApiError::widget_not_found(&widget_id))?;
  let mut widget = widget.lock().await;
  widget.on_provider_changed(&param.mail_provider)?;
  event_response(&mut widget)
}

/// Saves the form. htmx posts get the dialogs fragment back; a plain form
/// post navigates, so it gets the whole page with the dialogs in place.
#[instrument(skip(state, headers, form))]
pub async fn submit_handler(
  State(state): State<AppState>,
  Path(widget_id): Path<Uuid>,
  headers: HeaderMap,
  Form(form): Form<MailForm>,
) -> Result<Response, WebApiError> {
  let widget = state
    .widgets
    .get(&widget_id)
    .ok_or_else(|| WebApiError::widget_not_found(&widget_id))?;
  let mut widget = widget.lock().await;

  let mut event = SubmitEvent::new(form);
  match widget.submit(&mut event).await {
    Ok(()) => {},
    Err(err @ ControllerError::NotLoaded) => return Err(err.into()),
    // Already reported through the error dialog.
    Err(ControllerError::Store(err)) => debug!("mail settings not saved: {}", err),
  }

  if headers.contains_key(&HX_REQUEST) {
    return event_response(&mut widget);
  }

  let widget_url = state.config.widget_url(&widget_id);
  let page = render_settings_page(&mut widget, Some(&widget_url))?;
  Ok(Html(page).into_response())
}

/// Sends a test message with the widget's current record.
#[instrument(skip(state, param))]
pub async fn test_mail_handler(
  State(state): State<AppState>,
  Path(widget_id): Path<Uuid>,
  Form(param): Form<WebApiTestMailRequest>,
) -> Result<Response, WebApiError> {
  let widget = state
    .widgets
    .get(&widget_id)
    .ok_or_else(|| WebApiError::widget_not_found(&widget_id))?;

  let setting = {
    let widget = widget.lock().await;
    let settings = widget.settings().ok_or(ControllerError::NotLoaded)?;
    mailer::MailerSetting::from(settings)
  };

  // The lock is not held while talking to the mail server.
  let result = mailer::send_test_mail(&setting, &param.to, &state.config.console_name).await;

  let mut widget = widget.lock().await;
  match result {
    Ok(()) => {
      info!("test e-mail sent to {}", param.to);
      widget.dialogs_mut().alert(TEST_MAIL_SENT_MESSAGE);
    },
    Err(err) => {
      widget
        .dialogs_mut()
        .show_error_dialog(TEST_MAIL_NOT_SENT_TITLE, &err.to_string());
    },
  }
  event_response(&mut widget)
}

#[instrument(skip(state))]
pub async fn delete_widget_handler(
  State(state): State<AppState>,
  Path(widget_id): Path<Uuid>,
) -> Result<status::StatusCode, WebApiError> {
  if state.widgets.remove(&widget_id) {
    info!("mail settings widget closed: {}", widget_id);
    Ok(status::StatusCode::NO_CONTENT)
  } else {
    Err(WebApiError::widget_not_found(&widget_id))
  }
}

/// Drains the widget's dialogs into the body and reports group visibility
/// through an `HX-Trigger` event.
fn event_response(widget: &mut MailWidget) -> Result<Response, WebApiError> {
  let trigger = widget.view().visibility_event().to_string();
  let trigger = HeaderValue::from_str(&trigger)
    .map_err(|err| WebApiError::new(status::StatusCode::INTERNAL_SERVER_ERROR, err))?;
  let dialogs = DialogsFragment::new(widget.dialogs_mut().drain())
    .render()
    .map_err(RenderError::from)?;
  Ok(([(HX_TRIGGER, trigger)], Html(dialogs)).into_response())
}
