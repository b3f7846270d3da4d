use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::settings::SettingsRecord;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("request failed with status {status}: {payload}")]
  NotOk { status: u16, payload: String },

  #[error(transparent)]
  Reqwest(#[from] reqwest::Error),

  #[error("{0}")]
  Unhandled(String),
}

/// Owner of the single settings record.
#[async_trait]
pub trait SettingsStore: Send + Sync {
  async fn find_one(&self) -> Result<SettingsRecord, StoreError>;
  async fn save(&self, record: &SettingsRecord) -> Result<(), StoreError>;
}

#[async_trait]
impl<T> SettingsStore for Arc<T>
where
  T: SettingsStore + ?Sized,
{
  async fn find_one(&self) -> Result<SettingsRecord, StoreError> {
    (**self).find_one().await
  }

  async fn save(&self, record: &SettingsRecord) -> Result<(), StoreError> {
    (**self).save(record).await
  }
}

/// Reads and writes the record through the server's settings endpoint:
/// `GET` returns it as JSON and `PUT` replaces it.
#[derive(Clone)]
pub struct HttpSettingsStore {
  http_client: reqwest::Client,
  settings_url: String,
  access_token: Option<Secret<String>>,
}

impl HttpSettingsStore {
  pub fn new(settings_url: impl Into<String>, access_token: Option<Secret<String>>) -> Self {
    Self {
      http_client: reqwest::Client::new(),
      settings_url: settings_url.into(),
      access_token,
    }
  }

  fn request(&self, method: Method) -> reqwest::RequestBuilder {
    let builder = self.http_client.request(method, &self.settings_url);
    match &self.access_token {
      Some(token) => builder.bearer_auth(token.expose_secret()),
      None => builder,
    }
  }
}

#[async_trait]
impl SettingsStore for HttpSettingsStore {
  async fn find_one(&self) -> Result<SettingsRecord, StoreError> {
    let resp = self.request(Method::GET).send().await?;
    from_json_response(resp).await
  }

  async fn save(&self, record: &SettingsRecord) -> Result<(), StoreError> {
    let resp = self.request(Method::PUT).json(record).send().await?;
    check_response(resp).await
  }
}

async fn from_json_response<T>(resp: reqwest::Response) -> Result<T, StoreError>
where
  T: serde::de::DeserializeOwned,
{
  let status = resp.status();
  let payload = resp.text().await?;
  if !status.is_success() {
    return Err(StoreError::NotOk {
      status: status.as_u16(),
      payload,
    });
  }

  serde_json::from_str::<T>(&payload).map_err(|err| {
    StoreError::Unhandled(format!(
      "Failed to parse JSON response: {:?}, Payload: {}",
      err, payload
    ))
  })
}

async fn check_response(resp: reqwest::Response) -> Result<(), StoreError> {
  let status = resp.status();
  if !status.is_success() {
    let payload = resp.text().await?;
    return Err(StoreError::NotOk {
      status: status.as_u16(),
      payload,
    });
  }
  Ok(())
}
