use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::config::Config;
use crate::state::AppState;
use crate::store::{HttpSettingsStore, SettingsStore};
use crate::widget::spawn_idle_sweep;
use crate::{web_api, web_app};

const WIDGET_SWEEP_PERIOD: Duration = Duration::from_secs(60);

pub struct Application {
  port: u16,
  listener: TcpListener,
  router: Router,
}

impl Application {
  pub async fn build(config: Config, state: AppState) -> Result<Self, anyhow::Error> {
    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)
      .await
      .with_context(|| format!("failed to bind {}", address))?;
    let port = listener.local_addr()?.port();
    spawn_idle_sweep(
      state.widgets.clone(),
      config.widget_idle_timeout,
      WIDGET_SWEEP_PERIOD,
    );
    let router = build_router(state);
    Ok(Self {
      port,
      listener,
      router,
    })
  }

  pub fn port(&self) -> u16 {
    self.port
  }

  pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
    info!("listening on: {}", self.listener.local_addr()?);
    axum::serve(
      self.listener,
      self
        .router
        .into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
  }
}

pub fn build_router(state: AppState) -> Router {
  let path_prefix = state.config.path_prefix.clone();
  let routes = Router::new()
    .merge(web_app::router())
    .nest("/web-api", web_api::router());

  let routes = if path_prefix.is_empty() {
    routes
  } else {
    Router::new().nest(&path_prefix, routes)
  };

  routes.layer(TraceLayer::new_for_http()).with_state(state)
}

pub fn init_state(config: &Config) -> AppState {
  let settings_store: Arc<dyn SettingsStore> = Arc::new(HttpSettingsStore::new(
    config.settings_store.url.clone(),
    config.settings_store.access_token.clone(),
  ));
  info!(
    "settings store: {}, environment: {}",
    config.settings_store.url,
    config.app_env.as_str()
  );
  AppState::new(config.clone(), settings_store)
}

async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for shutdown signal: {}", err);
  }
  info!("shutting down");
}
