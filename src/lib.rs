//! Bousai - A multilingual disaster information dashboard.
//!
//! # Overview
//!
//! Bousai polls a disaster backend for recent earthquakes, weather
//! overviews and active warnings, and turns them into a fully resolved,
//! language-aware view model. Every decision (intensity styling, tsunami
//! risk, alert severity) is made on the canonical Japanese field; translated
//! fields are display-only.
//!
//! # Modules
//!
//! - [`config`]: Environment configuration
//! - [`i18n`]: Language catalog and UI string resolution with fallback
//! - [`model`]: Wire data types and the weather payload adapter
//! - [`classify`]: Intensity, tsunami and alert severity classifiers
//! - [`source`]: HTTP clients and the `DataSource` seam
//! - [`poller`]: Periodic refresh with cancellation and stale-response discard
//! - [`view`]: Presentation view model and the panel render boundary
//! - [`dashboard`]: Session owning one poller per category
//! - [`api`]: HTTP API handlers

pub mod api;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod i18n;
pub mod model;
pub mod poller;
pub mod source;
pub mod view;
