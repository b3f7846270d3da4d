use axum::{http::status, response::IntoResponse};
use uuid::Uuid;

use crate::controller::ControllerError;

#[derive(Debug)]
pub struct WebApiError {
  pub status_code: status::StatusCode,
  pub payload: String,
}

impl WebApiError {
  pub fn new(code: status::StatusCode, message: impl ToString) -> Self {
    Self {
      status_code: code,
      payload: message.to_string(),
    }
  }

  pub fn widget_not_found(widget_id: &Uuid) -> Self {
    WebApiError::new(
      status::StatusCode::NOT_FOUND,
      format!("mail settings widget not found: {}", widget_id),
    )
  }
}

impl IntoResponse for WebApiError {
  fn into_response(self) -> axum::response::Response {
    (self.status_code, self.payload).into_response()
  }
}

impl From<ControllerError> for WebApiError {
  fn from(err: ControllerError) -> Self {
    match err {
      ControllerError::NotLoaded => WebApiError::new(status::StatusCode::CONFLICT, err),
      ControllerError::Store(err) => WebApiError::new(status::StatusCode::BAD_GATEWAY, err),
    }
  }
}

impl From<RenderError> for WebApiError {
  fn from(err: RenderError) -> Self {
    WebApiError::new(status::StatusCode::INTERNAL_SERVER_ERROR, err.0)
  }
}

#[derive(Debug)]
pub struct RenderError(pub askama::Error);

impl From<askama::Error> for RenderError {
  fn from(value: askama::Error) -> Self {
    Self(value)
  }
}

impl IntoResponse for RenderError {
  fn into_response(self) -> axum::response::Response {
    tracing::error!("failed to render template: {}", self.0);
    (status::StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
  }
}
