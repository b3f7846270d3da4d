use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use mail_console::application::build_router;
use mail_console::config::config::{
  ApplicationSetting, Config, Environment, SettingsStoreSetting,
};
use mail_console::settings::SettingsRecord;
use mail_console::state::AppState;
use mail_console::store::{SettingsStore, StoreError};
use scraper::{Html, Selector};
use tower::ServiceExt;

pub const PAGE_URL: &str = "/admin/settings/mail";

#[derive(Default)]
pub struct FakeStore {
  pub record: Mutex<Option<SettingsRecord>>,
  pub save_error: Mutex<Option<String>>,
  pub saved: Mutex<Vec<SettingsRecord>>,
}

impl FakeStore {
  pub fn with_record(record: SettingsRecord) -> Arc<Self> {
    let store = Self::default();
    *store.record.lock().unwrap() = Some(record);
    Arc::new(store)
  }

  pub fn unavailable() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn fail_saves_with(&self, payload: &str) {
    *self.save_error.lock().unwrap() = Some(payload.to_string());
  }

  pub fn saved(&self) -> Vec<SettingsRecord> {
    self.saved.lock().unwrap().clone()
  }
}

#[async_trait]
impl SettingsStore for FakeStore {
  async fn find_one(&self) -> Result<SettingsRecord, StoreError> {
    self
      .record
      .lock()
      .unwrap()
      .clone()
      .ok_or(StoreError::NotOk {
        status: 503,
        payload: "settings service unavailable".to_string(),
      })
  }

  async fn save(&self, record: &SettingsRecord) -> Result<(), StoreError> {
    self.saved.lock().unwrap().push(record.clone());
    match self.save_error.lock().unwrap().clone() {
      Some(payload) => Err(StoreError::NotOk {
        status: 400,
        payload,
      }),
      None => Ok(()),
    }
  }
}

pub fn test_config(path_prefix: &str) -> Config {
  Config {
    app_env: Environment::Local,
    application: ApplicationSetting {
      port: 0,
      host: "127.0.0.1".to_string(),
    },
    settings_store: SettingsStoreSetting {
      url: "http://localhost/settings".to_string(),
      access_token: None,
    },
    path_prefix: path_prefix.to_string(),
    console_name: "Mail Console".to_string(),
    widget_idle_timeout: Duration::from_secs(1800),
  }
}

pub fn test_state(store: Arc<FakeStore>) -> AppState {
  AppState::new(test_config(""), store)
}

pub struct TestConsole {
  pub state: AppState,
}

impl TestConsole {
  pub fn new(store: Arc<FakeStore>) -> Self {
    Self {
      state: test_state(store),
    }
  }

  pub fn with_state(state: AppState) -> Self {
    Self { state }
  }

  fn router(&self) -> Router {
    build_router(self.state.clone())
  }

  pub async fn send(&self, req: Request<Body>) -> Response<Body> {
    self.router().oneshot(req).await.unwrap()
  }

  pub async fn get(&self, uri: &str) -> Response<Body> {
    self
      .send(Request::get(uri).body(Body::empty()).unwrap())
      .await
  }

  /// Posts the way htmx does.
  pub async fn hx_post(&self, uri: &str, form: &str) -> Response<Body> {
    self
      .send(
        Request::post(uri)
          .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
          .header("HX-Request", "true")
          .body(Body::from(form.to_string()))
          .unwrap(),
      )
      .await
  }

  pub async fn post(&self, uri: &str, form: &str) -> Response<Body> {
    self
      .send(
        Request::post(uri)
          .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
          .body(Body::from(form.to_string()))
          .unwrap(),
      )
      .await
  }

  pub async fn delete(&self, uri: &str) -> Response<Body> {
    self
      .send(Request::delete(uri).body(Body::empty()).unwrap())
      .await
  }

  /// Opens the settings page and returns the widget url it was rendered with.
  pub async fn open_widget(&self) -> String {
    let resp = self.get(PAGE_URL).await;
    assert!(resp.status().is_success());
    let html = Html::parse_document(&body_string(resp).await);
    let selector = Selector::parse("#mail-settings").unwrap();
    html
      .select(&selector)
      .next()
      .and_then(|e| e.value().attr("data-widget-url"))
      .expect("settings widget is rendered")
      .to_string()
  }
}

pub async fn body_string(resp: Response<Body>) -> String {
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

/// Visibility pushed to the browser through the `HX-Trigger` header, as
/// `(smtp, aws_ses)`.
pub fn pushed_visibility(resp: &Response<Body>) -> (bool, bool) {
  let trigger = resp
    .headers()
    .get("hx-trigger")
    .expect("HX-Trigger header")
    .to_str()
    .unwrap();
  let value: serde_json::Value = serde_json::from_str(trigger).unwrap();
  let groups = &value["mail-visibility"];
  (
    groups["smtp-config"].as_bool().unwrap(),
    groups["aws-ses-config"].as_bool().unwrap(),
  )
}

pub fn smtp_record() -> SettingsRecord {
  SettingsRecord {
    mail: true,
    mail_provider: Some("smtp".to_string()),
    mail_smtp: Some("smtp.example.com".to_string()),
    mail_port: Some("25".to_string()),
    mail_aws_ses_region: Some("eu-west-1".to_string()),
    mail_aws_ses_from: Some("ses@example.com".to_string()),
    ..Default::default()
  }
}
