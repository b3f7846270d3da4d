use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use mail_console::settings::SettingsRecord;
use mail_console::state::AppState;
use mail_console::store::{SettingsStore, StoreError};
use scraper::{Html, Selector};
use tokio::sync::{Notify, Semaphore};

use crate::util::{
  body_string, pushed_visibility, smtp_record, test_config, FakeStore, TestConsole,
};

const SMTP_FORM: &str = "mail=on&mail-provider=smtp\
&mail-smtp=mail.example.org&mail-port=587&mail-user=admin&mail-password=secret\
&mail-name=noreply%40example.org\
&mail-aws-ses-region=eu-west-1&mail-aws-ses-from=ses%40example.com\
&mail-aws-ses-configuration-set=";

#[tokio::test]
async fn submit_saves_form_values() {
  let store = FakeStore::with_record(smtp_record());
  let console = TestConsole::new(store.clone());
  let widget_url = console.open_widget().await;

  let resp = console
    .hx_post(&format!("{}/submit", widget_url), SMTP_FORM)
    .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(pushed_visibility(&resp), (true, false));
  let body = body_string(resp).await;
  assert!(body.contains("E-Mail configuration updated."));

  let saved = store.saved();
  assert_eq!(saved.len(), 1);
  let record = &saved[0];
  assert_eq!(record.mail_provider.as_deref(), Some("smtp"));
  assert_eq!(record.mail_smtp.as_deref(), Some("mail.example.org"));
  assert_eq!(record.mail_port.as_deref(), Some("587"));
  assert_eq!(record.mail_user.as_deref(), Some("admin"));
  assert_eq!(record.mail_password.as_deref(), Some("secret"));
  assert_eq!(record.mail_name.as_deref(), Some("noreply@example.org"));
  assert_eq!(record.mail_aws_ses_region.as_deref(), Some("eu-west-1"));
  assert_eq!(record.mail_aws_ses_from.as_deref(), Some("ses@example.com"));

  // the widget stays open
  assert_eq!(console.state.widgets.len(), 1);
}

#[tokio::test]
async fn submit_keeps_provider_chosen_through_events() {
  let store = FakeStore::with_record(smtp_record());
  let console = TestConsole::new(store.clone());
  let widget_url = console.open_widget().await;

  console
    .hx_post(&format!("{}/provider", widget_url), "mail-provider=aws-ses")
    .await;
  console
    .hx_post(&format!("{}/submit", widget_url), SMTP_FORM)
    .await;

  let saved = store.saved();
  assert_eq!(saved[0].mail_provider.as_deref(), Some("aws-ses"));
}

#[tokio::test]
async fn submit_reports_save_failure() {
  let store = FakeStore::with_record(smtp_record());
  store.fail_saves_with("mail-port must be a number");
  let console = TestConsole::new(store.clone());
  let widget_url = console.open_widget().await;

  let resp = console
    .hx_post(&format!("{}/submit", widget_url), SMTP_FORM)
    .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_string(resp).await;
  assert!(body.contains("E-Mail configuration not updated"));
  assert!(body.contains("mail-port must be a number"));
  assert!(!body.contains("E-Mail configuration updated."));
  assert_eq!(store.saved().len(), 1);
}

#[tokio::test]
async fn dialogs_are_reported_once() {
  let store = FakeStore::with_record(smtp_record());
  let console = TestConsole::new(store);
  let widget_url = console.open_widget().await;

  let resp = console
    .hx_post(&format!("{}/submit", widget_url), SMTP_FORM)
    .await;
  assert!(body_string(resp).await.contains("E-Mail configuration updated."));

  let resp = console
    .hx_post(&format!("{}/mail", widget_url), "mail=on")
    .await;
  assert!(!body_string(resp).await.contains("E-Mail configuration updated."));
}

#[tokio::test]
async fn plain_submit_renders_page_with_confirmation() {
  let store = FakeStore::with_record(smtp_record());
  let console = TestConsole::new(store.clone());
  let widget_url = console.open_widget().await;

  let resp = console
    .post(&format!("{}/submit", widget_url), SMTP_FORM)
    .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_string(resp).await;
  assert!(body.contains("E-Mail configuration updated."));

  let html = Html::parse_document(&body);
  let smtp = html
    .select(&Selector::parse("input[name=mail-smtp]").unwrap())
    .next()
    .unwrap();
  assert_eq!(smtp.value().attr("value"), Some("mail.example.org"));
  let wrapper = html
    .select(&Selector::parse("#mail-settings").unwrap())
    .next()
    .unwrap();
  assert_eq!(wrapper.value().attr("data-widget-url"), Some(widget_url.as_str()));

  assert_eq!(store.saved().len(), 1);
  assert_eq!(console.state.widgets.len(), 1);
}

#[tokio::test]
async fn plain_submit_keeps_edits_when_save_fails() {
  let store = FakeStore::with_record(smtp_record());
  store.fail_saves_with("mail-port must be a number");
  let console = TestConsole::new(store.clone());
  let widget_url = console.open_widget().await;

  let resp = console
    .post(&format!("{}/submit", widget_url), SMTP_FORM)
    .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(resp.headers().get(header::LOCATION).is_none());
  let body = body_string(resp).await;
  assert!(body.contains("E-Mail configuration not updated"));
  assert!(body.contains("mail-port must be a number"));
  assert!(body.contains("value=\"mail.example.org\""));

  // the widget is still there to retry
  assert_eq!(console.state.widgets.len(), 1);
  let resp = console
    .hx_post(&format!("{}/mail", widget_url), "mail=on")
    .await;
  assert_eq!(resp.status(), StatusCode::OK);
}

/// Holds every save until the test releases it.
struct GatedStore {
  events: Mutex<Vec<String>>,
  started: Notify,
  release: Semaphore,
}

#[async_trait]
impl SettingsStore for GatedStore {
  async fn find_one(&self) -> Result<SettingsRecord, StoreError> {
    Ok(smtp_record())
  }

  async fn save(&self, record: &SettingsRecord) -> Result<(), StoreError> {
    let host = record.mail_smtp.clone().unwrap_or_default();
    self.events.lock().unwrap().push(format!("start {}", host));
    self.started.notify_one();
    self.release.acquire().await.unwrap().forget();
    self.events.lock().unwrap().push(format!("end {}", host));
    Ok(())
  }
}

#[tokio::test]
async fn concurrent_submits_run_one_after_another() {
  let store = Arc::new(GatedStore {
    events: Mutex::new(vec![]),
    started: Notify::new(),
    release: Semaphore::new(0),
  });
  let console = TestConsole::with_state(AppState::new(test_config(""), store.clone()));
  let widget_url = console.open_widget().await;
  let submit_url = format!("{}/submit", widget_url);

  let release_saves = async {
    store.started.notified().await;
    for _ in 0..20 {
      tokio::task::yield_now().await;
    }
    // the second submit is waiting for the widget, not saving
    assert_eq!(*store.events.lock().unwrap(), vec!["start first.example.org"]);
    store.release.add_permits(1);

    store.started.notified().await;
    store.release.add_permits(1);
  };

  let (first, second, ()) = tokio::join!(
    console.hx_post(&submit_url, "mail-smtp=first.example.org"),
    console.hx_post(&submit_url, "mail-smtp=second.example.org"),
    release_saves,
  );

  assert_eq!(
    *store.events.lock().unwrap(),
    vec![
      "start first.example.org",
      "end first.example.org",
      "start second.example.org",
      "end second.example.org",
    ]
  );
  for resp in [first, second] {
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("E-Mail configuration updated."));
  }
}
