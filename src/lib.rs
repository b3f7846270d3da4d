pub mod application;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod form;
pub mod models;
pub mod settings;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod templates;
pub mod view;
pub mod web_api;
pub mod web_app;
pub mod widget;
